//! Reactive implementations of the directory collaborators. The controller
//! pushes render instructions into signals and the map and sidebar views
//! redraw from them.

use directory::{
    DataService, DirectoryError, FilterBadge, LegendEntry, LoadState, MapMarker, MapSurface,
    MapViewController, SidebarSurface,
};
use leptos::prelude::*;
use shared_types::{FoodResourceFeed, GeoBounds, ResourceRecord};

use crate::server::{get_cities, get_food_resources};

/// Data service backed by the server functions.
#[derive(Debug, Clone, Copy, Default)]
pub struct ServerDataService;

impl DataService for ServerDataService {
    async fn get_cities(&self) -> Result<Vec<String>, DirectoryError> {
        get_cities().await.map_err(|e| DirectoryError::load("cities", e))
    }

    async fn get_food_resources(&self) -> Result<FoodResourceFeed, DirectoryError> {
        get_food_resources()
            .await
            .map_err(|e| DirectoryError::load("food resources", e))
    }
}

#[derive(Debug, Clone, Copy)]
pub struct MapSignals {
    pub markers: RwSignal<Vec<MapMarker>>,
    /// Last requested fit; every request notifies, even for equal bounds.
    pub fit_request: RwSignal<Option<GeoBounds>>,
    pub legend: RwSignal<Vec<LegendEntry>>,
}

impl MapSignals {
    pub fn new() -> Self {
        Self {
            markers: RwSignal::new(Vec::new()),
            fit_request: RwSignal::new(None),
            legend: RwSignal::new(Vec::new()),
        }
    }
}

impl Default for MapSignals {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone, Copy)]
pub struct LeafletMapSurface {
    signals: MapSignals,
}

impl LeafletMapSurface {
    pub fn new(signals: MapSignals) -> Self {
        Self { signals }
    }
}

impl MapSurface for LeafletMapSurface {
    fn clear_markers(&mut self) {
        self.signals.markers.set(Vec::new());
    }

    fn upsert_marker(&mut self, marker: &MapMarker) {
        self.signals.markers.update(|markers| {
            match markers.iter_mut().find(|m| m.key == marker.key) {
                Some(existing) => *existing = marker.clone(),
                None => markers.push(marker.clone()),
            }
        });
    }

    fn fit_marker_bounds(&mut self, bounds: Option<GeoBounds>) {
        if bounds.is_some() {
            self.signals.fit_request.set(bounds);
        }
    }

    fn add_legend(&mut self, entries: &[LegendEntry]) {
        self.signals.legend.set(entries.to_vec());
    }
}

#[derive(Debug, Clone, Copy)]
pub struct SidebarSignals {
    pub rows: RwSignal<Vec<ResourceRecord>>,
    pub total: RwSignal<usize>,
    pub badges: RwSignal<Vec<FilterBadge>>,
    pub load_state: RwSignal<LoadState>,
    /// Bumped every time the list has to jump back to the top.
    pub scroll_resets: RwSignal<u64>,
}

impl SidebarSignals {
    pub fn new() -> Self {
        Self {
            rows: RwSignal::new(Vec::new()),
            total: RwSignal::new(0),
            badges: RwSignal::new(Vec::new()),
            load_state: RwSignal::new(LoadState::Idle),
            scroll_resets: RwSignal::new(0),
        }
    }
}

impl Default for SidebarSignals {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone, Copy)]
pub struct ResultsSidebarSurface {
    signals: SidebarSignals,
}

impl ResultsSidebarSurface {
    pub fn new(signals: SidebarSignals) -> Self {
        Self { signals }
    }
}

impl SidebarSurface for ResultsSidebarSurface {
    fn render_rows(&mut self, rows: &[ResourceRecord], total: usize) {
        self.signals.rows.set(rows.to_vec());
        self.signals.total.set(total);
    }

    fn reset_scroll(&mut self) {
        self.signals.scroll_resets.update(|n| *n += 1);
    }

    fn render_filter_badges(&mut self, badges: &[FilterBadge]) {
        self.signals.badges.set(badges.to_vec());
    }

    fn show_load_state(&mut self, state: &LoadState) {
        self.signals.load_state.set(state.clone());
    }
}

pub type DirectoryController =
    MapViewController<ServerDataService, LeafletMapSurface, ResultsSidebarSurface>;

/// Handle to the session controller shared by the page's components.
pub type ControllerHandle = StoredValue<DirectoryController, LocalStorage>;
