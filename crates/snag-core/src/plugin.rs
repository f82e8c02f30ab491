//! Plugin descriptor: the static, `Copy` handle to a plugin.
//!
//! A plugin is a name, an `init` function run once against the client, and an
//! optional schema fragment declaring the options it reads.
//!
//! # Quick start
//!
//! ```rust,ignore
//! use snag_core::{Client, OptionDescriptor, PluginResult, define_plugin};
//! use snag_core::config::schema::{is_bool, yes};
//!
//! fn init(client: &mut Client) -> PluginResult<()> {
//!     client.on_error(|report| {
//!         report.add_meta("app", "flavour", "vanilla");
//!         true
//!     });
//!     Ok(())
//! }
//!
//! pub static FLAVOUR: PluginDescriptor = define_plugin! {
//!     name: "flavour",
//!     config_schema: &[("flavourEnabled", OptionDescriptor::new(yes, is_bool, "should be true|false"))],
//!     init: init,
//! };
//! ```

use crate::client::Client;
use crate::config::SchemaFragment;
use crate::error::PluginResult;

/// Signature of a plugin's `init` hook.
pub type InitFn = fn(&mut Client) -> PluginResult<()>;

/// Descriptive metadata attached to every plugin.
#[derive(Debug, Clone, Copy)]
pub struct PluginMetadata {
    /// Version of the crate that defined the plugin.
    pub version: &'static str,
    /// One-line description.
    pub desc: &'static str,
}

impl PluginMetadata {
    /// Metadata with no description.
    pub const fn versioned(version: &'static str) -> Self {
        Self { version, desc: "" }
    }
}

/// A static, `Copy` descriptor for one plugin.
#[derive(Debug, Clone, Copy)]
pub struct PluginDescriptor {
    /// Plugin name, used in logs and in the client's registration list.
    pub name: &'static str,

    /// Called once when the plugin is registered.
    pub init: InitFn,

    /// Options this plugin contributes to the schema. Empty when none.
    pub config_schema: SchemaFragment,

    /// Static metadata.
    pub metadata: PluginMetadata,
}

impl PluginDescriptor {
    /// Creates a descriptor with no schema contribution.
    pub const fn new(name: &'static str, init: InitFn) -> Self {
        Self {
            name,
            init,
            config_schema: &[],
            metadata: PluginMetadata::versioned(""),
        }
    }

    /// Sets the schema contribution.
    pub const fn with_config_schema(mut self, schema: SchemaFragment) -> Self {
        self.config_schema = schema;
        self
    }

    /// Sets the metadata.
    pub const fn with_metadata(mut self, metadata: PluginMetadata) -> Self {
        self.metadata = metadata;
        self
    }

    /// Whether this plugin contributes options.
    pub fn has_config_schema(&self) -> bool {
        !self.config_schema.is_empty()
    }
}

/// Declares a [`PluginDescriptor`] usable in a `static`.
///
/// `version` defaults to the defining crate's `CARGO_PKG_VERSION`; `desc` and
/// `config_schema` are optional.
#[macro_export]
macro_rules! define_plugin {
    (
        name: $name:expr,
        $(desc: $desc:expr,)?
        $(config_schema: $schema:expr,)?
        init: $init:expr $(,)?
    ) => {
        $crate::plugin::PluginDescriptor {
            name: $name,
            init: $init,
            config_schema: $crate::define_plugin!(@schema $($schema)?),
            metadata: $crate::plugin::PluginMetadata {
                version: ::std::env!("CARGO_PKG_VERSION"),
                desc: $crate::define_plugin!(@desc $($desc)?),
            },
        }
    };

    (@schema) => { &[] };
    (@schema $schema:expr) => { $schema };
    (@desc) => { "" };
    (@desc $desc:expr) => { $desc };
}
