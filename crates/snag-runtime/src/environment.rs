//! Production host environment.
//!
//! A native process has no legacy cross-domain facility, so the modern
//! transport is always chosen. Its "console" is the `tracing` pipeline: every
//! level maps onto a `tracing` event with target `snag`, so whatever
//! subscriber the host installed (see [`LoggingBuilder`](crate::LoggingBuilder))
//! receives the notifier's own diagnostics.

use std::sync::Arc;

use tracing::{debug, error, info, warn};

use snag_core::{Console, Environment, HostInfo, LogLevel};

/// Console backed by `tracing` events.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingConsole;

impl Console for TracingConsole {
    fn has_level(&self, _level: LogLevel) -> bool {
        true
    }

    fn write(&self, level: LogLevel, line: &str) {
        match level {
            LogLevel::Debug => debug!(target: "snag", "{line}"),
            LogLevel::Info => info!(target: "snag", "{line}"),
            LogLevel::Warn => warn!(target: "snag", "{line}"),
            LogLevel::Error => error!(target: "snag", "{line}"),
        }
    }

    fn log(&self, line: &str) {
        info!(target: "snag", "{line}");
    }
}

/// The environment of the current native process.
#[derive(Debug, Clone, Default)]
pub struct ProcessEnvironment {
    location: Option<String>,
}

impl ProcessEnvironment {
    /// Creates the environment.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the address reported as the host location, e.g. the service URL.
    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }
}

impl Environment for ProcessEnvironment {
    fn has_legacy_transport(&self) -> bool {
        false
    }

    fn console(&self) -> Option<Arc<dyn Console>> {
        Some(Arc::new(TracingConsole))
    }

    fn host(&self) -> HostInfo {
        HostInfo {
            location: self.location.clone(),
            user_agent: Some(format!(
                "{}/{}",
                env!("CARGO_PKG_NAME"),
                env!("CARGO_PKG_VERSION")
            )),
            locale: locale(),
            os_name: Some(std::env::consts::OS.to_string()),
            arch: Some(std::env::consts::ARCH.to_string()),
            document: None,
        }
    }
}

/// Locale from the usual POSIX variables, e.g. `en_GB.UTF-8` becomes `en-GB`.
fn locale() -> Option<String> {
    ["LC_ALL", "LC_MESSAGES", "LANG"]
        .iter()
        .filter_map(|var| std::env::var(var).ok())
        .find(|value| !value.is_empty() && value != "C" && value != "POSIX")
        .map(|value| {
            value
                .split(['.', '@'])
                .next()
                .unwrap_or_default()
                .replace('_', "-")
        })
}
