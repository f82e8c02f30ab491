//! Unified error types for the Snag core.
//!
//! Configuration failures are always reported as a single
//! [`AggregateConfigError`] carrying every failed option, so a client is
//! either fully configured or not configured at all.

use std::fmt;

use serde_json::Value;
use thiserror::Error;

// =============================================================================
// Configuration Errors
// =============================================================================

/// A single option that failed its validator.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("\"{key}\" {message}, got {}", render_value(.value))]
pub struct FieldError {
    /// Option name as it appears in the schema.
    pub key: String,
    /// Human readable expectation taken from the option descriptor.
    pub message: String,
    /// The value that was rejected (`Null` when absent).
    pub value: Value,
}

impl FieldError {
    /// Creates a field error.
    pub fn new(key: impl Into<String>, message: impl Into<String>, value: Value) -> Self {
        Self {
            key: key.into(),
            message: message.into(),
            value,
        }
    }
}

fn render_value(value: &Value) -> String {
    match value {
        Value::Null => "undefined".to_string(),
        other => other.to_string(),
    }
}

/// Every field error produced by one `configure` call.
///
/// Never constructed empty by the validator.
#[derive(Debug, Clone, PartialEq)]
pub struct AggregateConfigError {
    errors: Vec<FieldError>,
}

impl AggregateConfigError {
    /// Wraps the collected field errors.
    pub fn new(errors: Vec<FieldError>) -> Self {
        Self { errors }
    }

    /// The individual field errors, in schema order.
    pub fn errors(&self) -> &[FieldError] {
        &self.errors
    }

    /// Returns `true` if any field error refers to `key`.
    pub fn mentions(&self, key: &str) -> bool {
        self.errors.iter().any(|e| e.key == key)
    }

    /// One-line headline, without the per-field lines.
    pub fn summary(&self) -> &'static str {
        "Snag configuration error"
    }
}

impl fmt::Display for AggregateConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.summary())?;
        for error in &self.errors {
            write!(f, "\n{error}")?;
        }
        Ok(())
    }
}

impl std::error::Error for AggregateConfigError {}

// =============================================================================
// Plugin Errors
// =============================================================================

/// Error raised from a plugin's `init` hook.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("plugin '{plugin}' failed to initialise: {reason}")]
pub struct PluginError {
    /// Name of the failing plugin.
    pub plugin: String,
    /// Reason for failure.
    pub reason: String,
}

impl PluginError {
    /// Creates a plugin error.
    pub fn new(plugin: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            plugin: plugin.into(),
            reason: reason.into(),
        }
    }
}

// =============================================================================
// Transport Errors
// =============================================================================

/// Errors that can occur while delivering a report.
#[derive(Debug, Clone, Error)]
pub enum TransportError {
    /// The request could not be built.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// The request failed before a response arrived.
    #[error("failed to send report: {0}")]
    SendFailed(String),

    /// The endpoint answered with a non-success status.
    #[error("HTTP {status} from {url}")]
    Status {
        /// Response status code.
        status: u16,
        /// Endpoint that was called.
        url: String,
    },

    /// Payload serialization failed.
    #[error("serialization error: {0}")]
    Serialization(String),
}

impl From<serde_json::Error> for TransportError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

// =============================================================================
// Notify Errors
// =============================================================================

/// Errors returned by [`Client::notify`](crate::Client::notify).
#[derive(Debug, Clone, Error)]
pub enum NotifyError {
    /// `notify` was called before the client was configured.
    #[error("client is not configured")]
    NotConfigured,

    /// No transport has been installed.
    #[error("no transport installed")]
    NoTransport,

    /// Delivery failed.
    #[error(transparent)]
    Transport(#[from] TransportError),
}

// =============================================================================
// Result Type Aliases
// =============================================================================

/// Result type for configuration.
pub type ConfigResult<T> = Result<T, AggregateConfigError>;

/// Result type for plugin initialisation.
pub type PluginResult<T> = Result<T, PluginError>;

/// Result type for transport operations.
pub type TransportResult<T> = Result<T, TransportError>;

/// Result type for notify calls.
pub type NotifyResult<T> = Result<T, NotifyError>;

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_field_error_display() {
        let err = FieldError::new("apiKey", "is required", json!(""));
        assert_eq!(err.to_string(), r#""apiKey" is required, got """#);

        let err = FieldError::new("apiKey", "is required", Value::Null);
        assert_eq!(err.to_string(), r#""apiKey" is required, got undefined"#);
    }

    #[test]
    fn test_aggregate_lists_every_field() {
        let err = AggregateConfigError::new(vec![
            FieldError::new("apiKey", "is required", Value::Null),
            FieldError::new("autoNotify", "should be true|false", json!("yes")),
        ]);
        let text = err.to_string();
        assert!(text.starts_with("Snag configuration error"));
        assert!(text.contains("\"apiKey\""));
        assert!(text.contains("\"autoNotify\""));
        assert!(err.mentions("autoNotify"));
        assert!(!err.mentions("releaseStage"));
    }
}
