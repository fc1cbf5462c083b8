pub mod status;

pub use status::{ErrorView, LoadStatus, LoadingView};
