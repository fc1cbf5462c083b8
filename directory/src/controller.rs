//! Session orchestration: fetch, normalize, filter and render.

use serde::{Deserialize, Serialize};
use shared_types::{ResourceRecord, ResourceType};
use std::collections::BTreeSet;
use tracing::{debug, error, info};

use crate::config::DirectoryConfig;
use crate::error::DirectoryError;
use crate::filter::{Filter, FilterBadge, FilterField, FilterSet, FilterValue, RadiusFilter};
use crate::markers::MarkerRegistry;
use crate::normalize::normalize_rows;
use crate::paginate::SidebarWindow;
use crate::surface::{legend_entries, DataService, MapSurface, SidebarSurface};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub enum LoadState {
    #[default]
    Idle,
    Loading,
    Ready {
        records: usize,
    },
    Failed(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoadSummary {
    /// Records normalized from every feed, inactive ones included.
    pub total: usize,
    pub active: usize,
    /// Active records with usable coordinates.
    pub placeable: usize,
    pub cities: usize,
}

/// Everything one fetch produced, before the inactive records are dropped.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct LoadedDirectory {
    pub cities: Vec<String>,
    pub records: Vec<ResourceRecord>,
}

/// Sorted distinct towns of the given records.
fn towns_of(records: &[ResourceRecord]) -> Vec<String> {
    records
        .iter()
        .map(|r| r.town.trim())
        .filter(|town| !town.is_empty())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .map(str::to_string)
        .collect()
}

/// Fetches cities and resources concurrently and normalizes every feed.
pub async fn fetch_directory<D: DataService>(service: &D) -> Result<LoadedDirectory, DirectoryError> {
    let (cities, feed) = futures::join!(service.get_cities(), service.get_food_resources());
    let feed = feed?;
    let cities = cities?;

    let mut records = normalize_rows(&feed.pantries, ResourceType::Pantry);
    records.extend(normalize_rows(&feed.schools, ResourceType::School));

    Ok(LoadedDirectory { cities, records })
}

/// Mutable view state of one browsing session.
#[derive(Debug, Clone, Default)]
pub struct SessionState {
    /// Active records only.
    pub records: Vec<ResourceRecord>,
    pub cities: Vec<String>,
    pub filters: FilterSet,
    pub filtered: Vec<ResourceRecord>,
    pub window: SidebarWindow,
    pub load_state: LoadState,
}

type LoadCallback = Box<dyn FnMut(Result<LoadSummary, DirectoryError>)>;

pub struct MapViewController<D, M, S> {
    service: D,
    map: M,
    sidebar: S,
    state: SessionState,
    markers: MarkerRegistry,
    on_load: Option<LoadCallback>,
    legend_shown: bool,
}

impl<D, M, S> MapViewController<D, M, S>
where
    D: DataService,
    M: MapSurface,
    S: SidebarSurface,
{
    pub fn new(service: D, map: M, sidebar: S, config: &DirectoryConfig) -> Self {
        Self {
            service,
            map,
            sidebar,
            state: SessionState {
                window: SidebarWindow::new(config.page_size, config.scroll_band),
                ..SessionState::default()
            },
            markers: MarkerRegistry::new(),
            on_load: None,
            legend_shown: false,
        }
    }

    /// Loads the directory once. `on_load` hears about every failure and the
    /// first success, after which it is dropped.
    pub async fn start<F>(&mut self, on_load: F)
    where
        F: FnMut(Result<LoadSummary, DirectoryError>) + 'static,
    {
        self.begin_load(on_load);
        let result = fetch_directory(&self.service).await;
        self.complete_load(result);
    }

    /// Fetches again after a failure, or to refresh stale data. Filters are kept.
    pub async fn reload(&mut self) {
        self.mark_loading();
        let result = fetch_directory(&self.service).await;
        self.complete_load(result);
    }

    /// First half of [`start`](Self::start) for callers that drive the fetch
    /// themselves.
    pub fn begin_load<F>(&mut self, on_load: F)
    where
        F: FnMut(Result<LoadSummary, DirectoryError>) + 'static,
    {
        if self.on_load.is_none() && !self.has_loaded() {
            self.on_load = Some(Box::new(on_load));
        }
        if !self.legend_shown {
            self.map.add_legend(&legend_entries());
            self.legend_shown = true;
        }
        self.mark_loading();
    }

    pub fn mark_loading(&mut self) {
        self.state.load_state = LoadState::Loading;
        self.sidebar.show_load_state(&self.state.load_state);
    }

    pub fn complete_load(&mut self, result: Result<LoadedDirectory, DirectoryError>) {
        match result {
            Ok(loaded) => {
                let total = loaded.records.len();
                self.state.records = loaded.records.into_iter().filter(|r| r.is_active).collect();
                // No city feed: offer the towns that actually have resources.
                self.state.cities = if loaded.cities.is_empty() {
                    towns_of(&self.state.records)
                } else {
                    loaded.cities
                };

                let summary = LoadSummary {
                    total,
                    active: self.state.records.len(),
                    placeable: self.state.records.iter().filter(|r| r.position().is_some()).count(),
                    cities: self.state.cities.len(),
                };
                info!(
                    total = summary.total,
                    active = summary.active,
                    placeable = summary.placeable,
                    cities = summary.cities,
                    "Directory loaded"
                );

                self.state.load_state = LoadState::Ready {
                    records: summary.active,
                };
                self.sidebar.show_load_state(&self.state.load_state);
                self.refresh();

                if let Some(mut on_load) = self.on_load.take() {
                    on_load(Ok(summary));
                }
            }
            Err(e) => {
                error!(error = %e, "Directory load failed");
                self.state.load_state = LoadState::Failed(e.to_string());
                self.sidebar.show_load_state(&self.state.load_state);
                if let Some(on_load) = self.on_load.as_mut() {
                    on_load(Err(e));
                }
            }
        }
    }

    fn has_loaded(&self) -> bool {
        matches!(self.state.load_state, LoadState::Ready { .. })
    }

    /// Re-runs the filter pipeline and redraws both surfaces.
    fn refresh(&mut self) {
        self.state.filtered = self.state.filters.apply(&self.state.records);

        self.markers.rebuild(&self.state.filtered);
        self.map.clear_markers();
        for marker in self.markers.markers() {
            self.map.upsert_marker(marker);
        }
        self.map.fit_marker_bounds(self.markers.bounds());

        self.state.window.reset(self.state.filtered.len());
        self.sidebar.reset_scroll();
        self.sidebar.render_rows(
            self.state.window.slice(&self.state.filtered),
            self.state.filtered.len(),
        );
        self.sidebar.render_filter_badges(&self.state.filters.badges());

        debug!(
            filters = self.state.filters.len(),
            filtered = self.state.filtered.len(),
            markers = self.markers.len(),
            "Applied filters"
        );
    }

    fn set_filter(&mut self, field: FilterField, value: FilterValue) {
        self.state.filters.set(Filter::new(field, value));
        self.refresh();
    }

    fn clear_filter(&mut self, field: FilterField) {
        if self.state.filters.clear(field) {
            self.refresh();
        }
    }

    pub fn set_category_filter(&mut self, categories: Vec<String>) {
        self.set_filter(FilterField::Category, FilterValue::Multi(categories));
    }

    pub fn get_category_filter(&self) -> Option<&[String]> {
        match self.state.filters.get(FilterField::Category).map(|f| &f.value) {
            Some(FilterValue::Multi(values)) => Some(values.as_slice()),
            _ => None,
        }
    }

    pub fn clear_category_filter(&mut self) {
        self.clear_filter(FilterField::Category);
    }

    pub fn set_radius_filter(&mut self, radius: RadiusFilter) {
        self.set_filter(FilterField::Location, FilterValue::Radius(radius));
    }

    pub fn get_radius_filter(&self) -> Option<&RadiusFilter> {
        match self.state.filters.get(FilterField::Location).map(|f| &f.value) {
            Some(FilterValue::Radius(radius)) => Some(radius),
            _ => None,
        }
    }

    pub fn clear_radius_filter(&mut self) {
        self.clear_filter(FilterField::Location);
    }

    pub fn set_town_filter(&mut self, town: String) {
        self.set_filter(FilterField::Town, FilterValue::Single(town));
    }

    pub fn get_town_filter(&self) -> Option<&str> {
        match self.state.filters.get(FilterField::Town).map(|f| &f.value) {
            Some(FilterValue::Single(town)) => Some(town.as_str()),
            _ => None,
        }
    }

    pub fn clear_town_filter(&mut self) {
        self.clear_filter(FilterField::Town);
    }

    pub fn clear_filters(&mut self) {
        if !self.state.filters.is_empty() {
            self.state.filters.clear_all();
            self.refresh();
        }
    }

    /// Reveals more sidebar rows as the list scrolls.
    pub fn on_scroll(&mut self, scroll_top: f64) {
        if self.state.window.on_scroll(scroll_top) {
            self.sidebar.render_rows(
                self.state.window.slice(&self.state.filtered),
                self.state.filtered.len(),
            );
        }
    }

    pub fn service(&self) -> &D {
        &self.service
    }

    pub fn map(&self) -> &M {
        &self.map
    }

    pub fn sidebar(&self) -> &S {
        &self.sidebar
    }

    pub fn records(&self) -> &[ResourceRecord] {
        &self.state.records
    }

    pub fn cities(&self) -> &[String] {
        &self.state.cities
    }

    pub fn filtered(&self) -> &[ResourceRecord] {
        &self.state.filtered
    }

    pub fn visible(&self) -> &[ResourceRecord] {
        self.state.window.slice(&self.state.filtered)
    }

    pub fn load_state(&self) -> &LoadState {
        &self.state.load_state
    }

    pub fn filter_badges(&self) -> Vec<FilterBadge> {
        self.state.filters.badges()
    }

    pub fn markers(&self) -> &MarkerRegistry {
        &self.markers
    }
}
