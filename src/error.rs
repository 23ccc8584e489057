//! Error types for whereabouts

use thiserror::Error;

/// Main error type for whereabouts operations
#[derive(Error, Debug)]
pub enum Error {
    #[error("Search error: {0}")]
    Search(String),

    #[error("Location error: {0}")]
    Locate(String),

    #[error("Geocoding error: {0}")]
    Geocoding(String),

    #[error("Invalid coordinates: {0}")]
    InvalidCoordinates(String),

    #[error("Invalid location: {0}")]
    InvalidLocation(String),

    #[error("No location selected")]
    NoSelection,

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Clipboard error: {0}")]
    Clipboard(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for whereabouts operations
pub type Result<T> = std::result::Result<T, Error>;
