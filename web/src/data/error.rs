use thiserror::Error;

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("could not read feed file: {0}")]
    Io(#[from] std::io::Error),

    #[error("feed is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{0} is neither a list of rows nor a sheet of values")]
    UnexpectedShape(String),

    #[error("invalid postal code: {0}")]
    InvalidPostalCode(String),

    #[error("postal code not found: {0}")]
    NotFound(String),
}
