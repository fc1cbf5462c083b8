use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum DirectoryError {
    #[error("failed to load {source_name}: {message}")]
    Load {
        source_name: &'static str,
        message: String,
    },

    #[error("filter on {field} does not support {kind} values")]
    UnsupportedFilter {
        field: &'static str,
        kind: &'static str,
    },

    #[error("row {index} is not an object")]
    InvalidRow { index: usize },
}

impl DirectoryError {
    pub fn load(source_name: &'static str, message: impl ToString) -> Self {
        DirectoryError::Load {
            source_name,
            message: message.to_string(),
        }
    }
}
