use thiserror::Error;

/// Errors surfaced by the import pipeline and its datastore backends.
#[derive(Error, Debug)]
pub enum ImportError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Datastore error: {message}")]
    Datastore { message: String },
}

pub type Result<T> = std::result::Result<T, ImportError>;
