//! # Snag Core
//!
//! The core of the Snag error-monitoring notifier.
//!
//! This crate defines the pieces the bootstrap composes:
//!
//! - **Client**: the monitoring client and its report pipeline ([`Client`])
//! - **Configuration**: options, schema and validation ([`RawOptions`],
//!   [`ConfigSchema`], [`ValidatedConfig`])
//! - **Plugins**: static plugin descriptors ([`PluginDescriptor`],
//!   [`define_plugin!`])
//! - **Capabilities**: transport, logger, console and host environment
//!   contracts ([`Transport`], [`Logger`], [`Console`], [`Environment`])
//! - **Reports**: the report and breadcrumb model ([`Report`], [`Breadcrumb`])
//!
//! ## Composition
//!
//! ```text
//! ┌──────────────┐   schema    ┌────────┐   configure   ┌─────────────────┐
//! │ base schema  │────────────▶│ Client │──────────────▶│ ValidatedConfig │
//! │ + plugins'   │             └────────┘               └─────────────────┘
//! │   fragments  │                 ▲  ▲
//! └──────────────┘   transport,    │  │  use_plugin (in order)
//!                    logger ───────┘  └───────────── PluginDescriptor
//! ```

pub mod capability;
pub mod client;
pub mod config;
pub mod error;
pub mod plugin;
pub mod report;

pub use capability::{
    BoxedLogger, BoxedTransport, Console, Environment, HostInfo, LogLevel, Logger, Transport,
};
pub use client::{Client, Notifier, OnErrorFn};
pub use config::{
    ConfigSchema, OptionDescriptor, RawOptions, SchemaFragment, ValidatedConfig, base_schema,
    merge_schema, validate_options,
};
pub use error::{
    AggregateConfigError, ConfigResult, FieldError, NotifyError, NotifyResult, PluginError,
    PluginResult, TransportError, TransportResult,
};
pub use plugin::{InitFn, PluginDescriptor, PluginMetadata};
pub use report::{Breadcrumb, BreadcrumbKind, CaptureKind, Frame, Report, Severity};

/// Prelude for common imports.
pub mod prelude {
    pub use super::{
        Breadcrumb, BreadcrumbKind, CaptureKind, Client, PluginDescriptor, PluginError,
        PluginResult, RawOptions, Report, Severity, define_plugin,
    };
}
