//! Error types shared across the midex workspace

use thiserror::Error;

/// Result type alias for midex operations
pub type Result<T> = std::result::Result<T, MidexError>;

/// Main error type for midex
#[derive(Error, Debug)]
pub enum MidexError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("XML error: {0}")]
    Xml(String),

    #[error("CSV error: {0}")]
    Csv(String),

    #[error("Invalid IMEx accession: {0}")]
    Accession(String),

    #[error("Invalid publication identifier: {0}")]
    Identifier(String),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Network error: {0}")]
    Network(String),
}
