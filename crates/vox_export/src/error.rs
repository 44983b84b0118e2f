//! # Export Error Types

use std::io;

use thiserror::Error;
use vox_format::VoxError;

/// Errors that can occur while exporting a model.
#[derive(Error, Debug)]
pub enum ExportError {
    /// The source could not be decoded.
    #[error(transparent)]
    Decode(#[from] VoxError),

    /// JSON serialization failed.
    #[error("JSON serialization failed: {0}")]
    Json(#[from] serde_json::Error),

    /// The export configuration is not valid TOML or has unknown keys.
    #[error("invalid export configuration: {0}")]
    Config(#[from] toml::de::Error),

    /// Reading the configuration or writing the output failed.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// An input or output path is empty.
    #[error("invalid path: {0}")]
    InvalidPath(String),
}

/// Result type for export operations.
pub type ExportResult<T> = Result<T, ExportError>;
