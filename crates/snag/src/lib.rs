//! # Snag
//!
//! An error-monitoring notifier for Rust hosts.
//!
//! ## Overview
//!
//! A Snag client is composed once, at startup, from a handful of parts:
//!
//! ```text
//! ┌──────────────┐     ┌───────────┐     ┌────────────────────────────────────┐
//! │   options    │────▶│ bootstrap │────▶│ Client                             │──▶ transport
//! │ + plugins    │     │           │     │  device, context, request, ...     │
//! │ + environment│     │           │     │  caller plugins, throttle (last)   │
//! └──────────────┘     └───────────┘     └────────────────────────────────────┘
//! ```
//!
//! - **Options**: an API key or a full option map, validated against a schema
//!   built from the base options and every plugin's contribution
//! - **Environment**: decides the transport and whether a logger exists
//! - **Plugins**: enrichment, capture and breadcrumb hooks, activated from the
//!   configuration
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use snag::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     LoggingBuilder::new().init();
//!
//!     let client = bootstrap_process("YOUR_API_KEY", &[])?;
//!     client.notify(Report::new("Error", "something broke")).await?;
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - `toml-config` (default): `snag.toml` options files
//! - `yaml-config`: `snag.yaml` options files
//! - `json-log`: JSON log output

pub use snag_core as core;
pub use snag_plugins as plugins;
pub use snag_runtime as runtime;
pub use snag_transport as transport;

/// Prelude module for convenient imports.
///
/// ```rust,ignore
/// use snag::prelude::*;
/// ```
pub mod prelude {
    // Bootstrap - main entry point
    pub use snag_runtime::{
        Bootstrap, BootstrapError, LoggingBuilder, OptionsLoader, bootstrap, bootstrap_process,
    };

    // Client and reports
    pub use snag_core::{
        Breadcrumb, BreadcrumbKind, CaptureKind, Client, Frame, RawOptions, Report, Severity,
    };

    // Plugin system
    pub use snag_core::{PluginDescriptor, PluginError, PluginResult, define_plugin};

    // Capabilities for custom hosts
    pub use snag_core::{Console, Environment, HostInfo, LogLevel, Logger, Transport};
}
