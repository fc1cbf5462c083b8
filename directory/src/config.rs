use serde::{Deserialize, Serialize};
use shared_types::GeoPoint;

/// View constants for the map and the sidebar list.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DirectoryConfig {
    /// Rows added to the sidebar per page.
    pub page_size: usize,
    /// Scroll distance that reveals one more page.
    pub scroll_band: f64,
    pub default_center: GeoPoint,
    pub default_zoom: f64,
}

impl Default for DirectoryConfig {
    fn default() -> Self {
        Self {
            page_size: 20,
            scroll_band: 150.0,
            // Hartford, CT
            default_center: GeoPoint::new(41.7658, -72.6734),
            default_zoom: 9.0,
        }
    }
}
