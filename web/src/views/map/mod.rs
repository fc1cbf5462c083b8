pub mod directory_page;
pub mod drop_down_towns;
pub mod filter_panel;
pub mod legend;
pub mod map_marker;
pub mod map_renderer;
pub mod results_sidebar;
pub mod surface;
