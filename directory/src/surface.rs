use serde::{Deserialize, Serialize};
use shared_types::{Category, FoodResourceFeed, GeoBounds, MarkerIcon, ResourceRecord};

use crate::controller::LoadState;
use crate::error::DirectoryError;
use crate::filter::FilterBadge;
use crate::markers::MapMarker;

/// Source of the raw directory data.
#[allow(async_fn_in_trait)]
pub trait DataService {
    async fn get_cities(&self) -> Result<Vec<String>, DirectoryError>;
    async fn get_food_resources(&self) -> Result<FoodResourceFeed, DirectoryError>;
}

pub trait MapSurface {
    fn clear_markers(&mut self);
    /// Adds the marker, or replaces the one already shown under `marker.key`.
    fn upsert_marker(&mut self, marker: &MapMarker);
    /// `None` when no marker is placed; the surface keeps its current view.
    fn fit_marker_bounds(&mut self, bounds: Option<GeoBounds>);
    fn add_legend(&mut self, entries: &[LegendEntry]);
}

pub trait SidebarSurface {
    /// `rows` is the visible window, `total` the size of the filtered collection.
    fn render_rows(&mut self, rows: &[ResourceRecord], total: usize);
    /// Scrolls the list back to the top. Called whenever the filtered
    /// collection is replaced and the window starts over at one page.
    fn reset_scroll(&mut self);
    fn render_filter_badges(&mut self, badges: &[FilterBadge]);
    fn show_load_state(&mut self, state: &LoadState);
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LegendEntry {
    pub icon: MarkerIcon,
    pub label: String,
}

pub fn legend_entries() -> Vec<LegendEntry> {
    Category::KNOWN
        .into_iter()
        .map(|category| LegendEntry {
            icon: category.icon(),
            label: category.to_string(),
        })
        .chain(std::iter::once(LegendEntry {
            icon: MarkerIcon::Star,
            label: "Other".to_string(),
        }))
        .collect()
}
