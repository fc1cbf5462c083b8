pub mod columns;
pub mod config;
pub mod controller;
pub mod error;
pub mod filter;
pub mod geo;
pub mod markers;
pub mod normalize;
pub mod paginate;
pub mod sheet;
pub mod surface;

pub use config::DirectoryConfig;
pub use controller::{fetch_directory, LoadState, LoadSummary, LoadedDirectory, MapViewController, SessionState};
pub use error::DirectoryError;
pub use filter::{Filter, FilterBadge, FilterField, FilterSet, FilterValue, RadiusFilter};
pub use markers::{MapMarker, MarkerEntry, MarkerRegistry};
pub use paginate::SidebarWindow;
pub use surface::{legend_entries, DataService, LegendEntry, MapSurface, SidebarSurface};
