//! Error types for schema_docgen

use std::path::PathBuf;
use thiserror::Error;

/// Result type for schema_docgen operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for schema_docgen
#[derive(Error, Debug)]
pub enum Error {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Extraction error in {unit}: {message}")]
    ExtractionError { unit: String, message: String },

    #[error("Schema export not found at {}. Run `schema_docgen extract <project-dir>` to generate it", path.display())]
    MissingInputArtifact { path: PathBuf },

    #[error("Schema export is not valid JSON: {0}")]
    MalformedInputArtifact(String),

    #[error("Render error: {0}")]
    RenderError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(String),

    #[error("Unknown error: {0}")]
    Unknown(String),
}

/// Convert Serde JSON errors to schema_docgen errors
impl From<serde_json::Error> for Error {
    fn from(error: serde_json::Error) -> Self {
        Error::SerializationError(error.to_string())
    }
}

/// Convert TOML deserialization errors to schema_docgen errors
impl From<toml::de::Error> for Error {
    fn from(error: toml::de::Error) -> Self {
        Error::ConfigError(error.to_string())
    }
}
