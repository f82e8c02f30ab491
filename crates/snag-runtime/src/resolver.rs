//! Capability resolution.
//!
//! Probes an [`Environment`] once and builds the transport and logger the
//! client is given. Neither probe can fail: a transport is always chosen and a
//! missing console simply means no logger.

use std::sync::Arc;

use tracing::debug;

use snag_core::{BoxedLogger, BoxedTransport, Console, Environment, LogLevel, Logger};
use snag_transport::{LegacyTransport, ModernTransport};

/// Tag prepended to every library log line.
pub const LOG_TAG: &str = "[snag]";

/// Picks the legacy transport when the host offers the legacy-only
/// cross-domain facility, the modern one otherwise.
pub fn resolve_transport(env: &dyn Environment) -> BoxedTransport {
    if env.has_legacy_transport() {
        let scheme = env.host().scheme();
        debug!(scheme = ?scheme, "Legacy transport selected");
        Arc::new(LegacyTransport::new(scheme))
    } else {
        debug!("Modern transport selected");
        Arc::new(ModernTransport::new())
    }
}

/// Builds a prefixed logger when the host has leveled console output.
///
/// Leveled output is detected by the presence of a `debug` output; levels the
/// console lacks fall back to its generic output.
pub fn resolve_logger(env: &dyn Environment) -> Option<BoxedLogger> {
    let console = env.console()?;
    if !console.has_level(LogLevel::Debug) {
        debug!("Console has no leveled output, logging disabled");
        return None;
    }
    Some(Arc::new(PrefixedConsoleLogger::new(console)))
}

/// Logger writing `[snag] <message>` lines to a host console.
pub struct PrefixedConsoleLogger {
    console: Arc<dyn Console>,
    levels: [bool; 4],
}

impl PrefixedConsoleLogger {
    /// Wraps `console`, recording which levels it supports.
    pub fn new(console: Arc<dyn Console>) -> Self {
        let levels = LogLevel::ALL.map(|level| console.has_level(level));
        Self { console, levels }
    }

    fn supports(&self, level: LogLevel) -> bool {
        let index = LogLevel::ALL.iter().position(|l| *l == level);
        index.is_some_and(|i| self.levels[i])
    }
}

impl Logger for PrefixedConsoleLogger {
    fn log(&self, level: LogLevel, message: &str) {
        let line = format!("{LOG_TAG} {message}");
        if self.supports(level) {
            self.console.write(level, &line);
        } else {
            self.console.log(&line);
        }
    }
}

impl std::fmt::Debug for PrefixedConsoleLogger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PrefixedConsoleLogger")
            .field("levels", &self.levels)
            .finish_non_exhaustive()
    }
}
