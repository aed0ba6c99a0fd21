//! Error types for listing and decoding.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that stop a browsing session before it starts.
#[derive(Debug, Error)]
pub enum BrowseError {
    /// The requested file or directory does not exist.
    #[error("couldn't open file_path: {path}")]
    NotFound { path: PathBuf },

    /// Reading a directory failed.
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The wildcard pattern could not be compiled.
    #[error("invalid glob pattern {pattern:?}: {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: globset::Error,
    },

    /// The grid is not "rows,cols" with positive values.
    #[error("invalid grid {value:?}: {reason}")]
    InvalidGrid { value: String, reason: String },

    /// Nothing to browse after listing and filtering.
    #[error("no files to display under {path}")]
    NoFiles { path: PathBuf },

    /// Reading commands from or writing pages to the console failed.
    #[error("console I/O failed: {0}")]
    Console(#[source] std::io::Error),

    /// The windowing backend failed to start.
    #[error("display error: {message}")]
    Display { message: String },
}

impl BrowseError {
    /// Create an I/O error with path context.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let path = path.into();
        match source.kind() {
            std::io::ErrorKind::NotFound => Self::NotFound { path },
            _ => Self::Io { path, source },
        }
    }
}

/// Errors decoding a single file. These never abort a page.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("decode error: {0}")]
    Decode(String),

    #[error("unsupported format: {extension:?}")]
    UnsupportedFormat { extension: String },

    /// The header was read but its pixel data could not be decoded.
    #[error("pixel data error: {message}")]
    Pixels {
        message: String,
        metadata: Vec<String>,
    },
}

impl LoadError {
    /// Metadata read before the failure, if any.
    pub fn metadata(&self) -> &[String] {
        match self {
            LoadError::Pixels { metadata, .. } => metadata,
            _ => &[],
        }
    }
}
