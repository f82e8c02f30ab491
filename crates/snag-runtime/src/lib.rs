//! Snag Runtime - bootstrap and host integration for the Snag notifier.
//!
//! This crate provides:
//! - The client bootstrap ([`bootstrap`], [`Bootstrap`])
//! - Capability resolution from a host [`Environment`](snag_core::Environment)
//! - The plugin activation policy
//! - The production environment ([`ProcessEnvironment`])
//! - Logging setup ([`LoggingBuilder`])
//! - File and environment options loading ([`OptionsLoader`])
//!
//! # Quick Start
//!
//! ```ignore
//! use snag_runtime::{LoggingBuilder, bootstrap_process};
//!
//! LoggingBuilder::new().directive("snag=debug").init();
//!
//! let client = bootstrap_process("YOUR_API_KEY", &[])?;
//! client.notify(Report::new("Error", "something broke")).await?;
//! ```
//!
//! # Custom Environments
//!
//! Tests and unusual hosts pass their own environment:
//!
//! ```ignore
//! use snag_runtime::bootstrap;
//!
//! let client = bootstrap(options, &[MY_PLUGIN], &my_environment)?;
//! ```

pub mod bootstrap;
pub mod config;
pub mod environment;
pub mod error;
pub mod logging;
pub mod policy;
pub mod resolver;

// Re-exports
pub use bootstrap::{Bootstrap, NOTIFIER, bootstrap, bootstrap_process};
pub use config::{LoaderError, LoaderResult, OptionsLoader};
pub use environment::{ProcessEnvironment, TracingConsole};
pub use error::{BootstrapError, BootstrapResult};
pub use logging::{LogFormat, LogOutput, LoggingBuilder};
pub use policy::select_plugins;
pub use resolver::{PrefixedConsoleLogger, resolve_logger, resolve_transport};

// Re-export tracing for use by hosts
pub use tracing;
pub use tracing_subscriber;
