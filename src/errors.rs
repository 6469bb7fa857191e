use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Load error: {0}")]
    LoadError(String),

    #[error("Index {index} out of range for {len} questions")]
    OutOfRange { index: usize, len: usize },

    #[error("Storage unavailable: {0}")]
    StorageUnavailable(String),
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::LoadError(format!("JSON error: {}", err))
    }
}

pub type AppResult<T> = Result<T, AppError>;
