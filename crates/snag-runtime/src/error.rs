//! Bootstrap error types.

use thiserror::Error;

use snag_core::{AggregateConfigError, PluginError};

/// Errors that abort [`bootstrap`](crate::bootstrap).
#[derive(Error, Debug, Clone, PartialEq)]
pub enum BootstrapError {
    /// One or more options failed validation.
    #[error(transparent)]
    Config(#[from] AggregateConfigError),

    /// A plugin's `init` failed. Plugins registered before it stay registered
    /// on the discarded client.
    #[error(transparent)]
    Plugin(#[from] PluginError),
}

/// Result type for bootstrap operations.
pub type BootstrapResult<T> = Result<T, BootstrapError>;
