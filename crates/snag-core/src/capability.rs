//! Capability contracts the client consumes.
//!
//! The client never constructs its transport or logger. Both are injected,
//! usually by the bootstrap after probing an [`Environment`].
//!
//! # Overview
//!
//! | Capability | Trait | Consumed by |
//! |------------|-------|-------------|
//! | Report delivery | [`Transport`] | [`Client::notify`](crate::Client::notify) |
//! | Library diagnostics | [`Logger`] | the client and plugins |
//! | Host console | [`Console`] | the logger built by the resolver |
//! | Host probes | [`Environment`] | the bootstrap |

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::client::Notifier;
use crate::config::ValidatedConfig;
use crate::error::TransportResult;
use crate::report::Report;

// =============================================================================
// Transport
// =============================================================================

/// Delivers reports to the collection endpoint.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Short identifier used in logs.
    fn name(&self) -> &'static str;

    /// Sends one report.
    async fn send_report(
        &self,
        notifier: &Notifier,
        config: &ValidatedConfig,
        report: &Report,
    ) -> TransportResult<()>;
}

/// Shared transport handle.
pub type BoxedTransport = Arc<dyn Transport>;

// =============================================================================
// Logging
// =============================================================================

/// Log levels understood by [`Logger`] and [`Console`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Debug output.
    Debug,
    /// Informational output.
    Info,
    /// Warnings.
    Warn,
    /// Errors.
    Error,
}

impl LogLevel {
    /// All levels, lowest first.
    pub const ALL: [LogLevel; 4] = [Self::Debug, Self::Info, Self::Warn, Self::Error];

    /// Returns the level name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warn => "warn",
            Self::Error => "error",
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Leveled diagnostics sink for the library itself.
pub trait Logger: Send + Sync {
    /// Writes a message at `level`.
    fn log(&self, level: LogLevel, message: &str);

    /// Debug output.
    fn debug(&self, message: &str) {
        self.log(LogLevel::Debug, message);
    }

    /// Informational output.
    fn info(&self, message: &str) {
        self.log(LogLevel::Info, message);
    }

    /// Warnings.
    fn warn(&self, message: &str) {
        self.log(LogLevel::Warn, message);
    }

    /// Errors.
    fn error(&self, message: &str) {
        self.log(LogLevel::Error, message);
    }
}

/// Shared logger handle.
pub type BoxedLogger = Arc<dyn Logger>;

/// A console-style output facility offered by the host.
///
/// Hosts may only offer some levels; [`Console::log`] is the generic output
/// used for the rest.
pub trait Console: Send + Sync {
    /// Whether the console has a dedicated output for `level`.
    fn has_level(&self, level: LogLevel) -> bool;

    /// Writes to the dedicated output for `level`.
    fn write(&self, level: LogLevel, line: &str);

    /// Writes to the generic output.
    fn log(&self, line: &str);
}

// =============================================================================
// Environment
// =============================================================================

/// Facts about the host, read by plugins through the client.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HostInfo {
    /// Address of the hosting page or process, e.g. `https://example.com/app`.
    pub location: Option<String>,
    /// User agent string.
    pub user_agent: Option<String>,
    /// Locale, e.g. `en-GB`.
    pub locale: Option<String>,
    /// Operating system name.
    pub os_name: Option<String>,
    /// CPU architecture.
    pub arch: Option<String>,
    /// Source of the hosting document, when it has one.
    pub document: Option<String>,
}

impl HostInfo {
    /// [`location`](Self::location) parsed as a URL; `None` when it is
    /// absent or not an absolute URL.
    pub fn url(&self) -> Option<Url> {
        Url::parse(self.location.as_deref()?).ok()
    }

    /// Scheme of [`location`](Self::location), lowercased, e.g. `https`.
    pub fn scheme(&self) -> Option<String> {
        self.url().map(|url| url.scheme().to_string())
    }

    /// Path of [`location`](Self::location), `/` when it has none.
    pub fn path(&self) -> Option<String> {
        self.url().map(|url| url.path().to_string())
    }
}

/// The capabilities a host exposes to the bootstrap.
///
/// Injected explicitly so tests can substitute fakes.
pub trait Environment: Send + Sync {
    /// Whether the legacy-only cross-domain request facility exists.
    fn has_legacy_transport(&self) -> bool;

    /// The host console, if there is one.
    fn console(&self) -> Option<Arc<dyn Console>>;

    /// Host facts for enrichment plugins.
    fn host(&self) -> HostInfo {
        HostInfo::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parking_lot::Mutex;

    #[derive(Default)]
    struct Recording(Mutex<Vec<(LogLevel, String)>>);

    impl Logger for Recording {
        fn log(&self, level: LogLevel, message: &str) {
            self.0.lock().push((level, message.to_string()));
        }
    }

    #[test]
    fn test_logger_level_helpers() {
        let logger = Recording::default();
        logger.debug("d");
        logger.warn("w");
        let seen = logger.0.lock();
        assert_eq!(seen[0], (LogLevel::Debug, "d".to_string()));
        assert_eq!(seen[1], (LogLevel::Warn, "w".to_string()));
    }

    #[test]
    fn test_host_path_and_scheme() {
        let host = HostInfo {
            location: Some("https://example.com/shop/cart?id=1#top".into()),
            ..Default::default()
        };
        assert_eq!(host.scheme().as_deref(), Some("https"));
        assert_eq!(host.path().as_deref(), Some("/shop/cart"));

        let bare = HostInfo {
            location: Some("http://localhost:8080".into()),
            ..Default::default()
        };
        assert_eq!(bare.path().as_deref(), Some("/"));
        assert_eq!(HostInfo::default().path(), None);
    }

    #[test]
    fn test_host_scheme_normalized() {
        let host = HostInfo {
            location: Some("HTTP://Intranet.Example/App".into()),
            ..Default::default()
        };
        assert_eq!(host.scheme().as_deref(), Some("http"));
        assert_eq!(host.path().as_deref(), Some("/App"));

        let relative = HostInfo {
            location: Some("/app".into()),
            ..Default::default()
        };
        assert_eq!(relative.scheme(), None);
    }
}
