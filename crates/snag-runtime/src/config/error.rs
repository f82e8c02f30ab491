//! Options loader error types.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while loading options.
#[derive(Error, Debug)]
pub enum LoaderError {
    /// An explicitly requested file does not exist.
    #[error("Options file not found: {0}")]
    FileNotFound(PathBuf),

    /// The file extension has no enabled format.
    #[error("Unsupported or disabled options file format: .{0}")]
    UnsupportedFormat(String),

    /// A source could not be parsed or did not form an option map.
    #[error("Failed to extract options: {0}")]
    Extract(#[from] Box<figment::Error>),
}

/// Result type for options loading.
pub type LoaderResult<T> = Result<T, LoaderError>;
