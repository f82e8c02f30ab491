//! Configuration schema definitions and schema merging.
//!
//! A schema maps option names to [`OptionDescriptor`]s. The base schema is
//! defined here; plugins contribute further options through
//! [`PluginDescriptor::config_schema`]. [`merge_schema`] folds those
//! contributions into one flat schema.

use indexmap::IndexMap;
use serde_json::{Value, json};

use crate::plugin::PluginDescriptor;

/// Produces an option's default value.
pub type DefaultFn = fn() -> Value;

/// Decides whether a present (non-null) value is acceptable.
pub type ValidateFn = fn(&Value) -> bool;

/// A static list of schema entries, as contributed by a plugin.
pub type SchemaFragment = &'static [(&'static str, OptionDescriptor)];

/// Describes one accepted configuration key.
#[derive(Debug, Clone, Copy)]
pub struct OptionDescriptor {
    /// Default used when the caller leaves the option out.
    pub default: DefaultFn,
    /// Validator applied to present values.
    pub validate: ValidateFn,
    /// Expectation shown in error messages, e.g. `"should be true|false"`.
    pub message: &'static str,
    /// Whether an absent value is an error.
    pub required: bool,
}

impl OptionDescriptor {
    /// Creates an optional option.
    pub const fn new(default: DefaultFn, validate: ValidateFn, message: &'static str) -> Self {
        Self {
            default,
            validate,
            message,
            required: false,
        }
    }

    /// Marks the option as required.
    pub const fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Evaluates the default.
    pub fn default_value(&self) -> Value {
        (self.default)()
    }
}

/// Option name to descriptor, in contribution order.
///
/// Overwriting an existing name keeps its original position.
#[derive(Debug, Clone, Default)]
pub struct ConfigSchema {
    entries: IndexMap<&'static str, OptionDescriptor>,
}

impl ConfigSchema {
    /// Creates an empty schema.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a schema from a fragment.
    pub fn from_fragment(fragment: SchemaFragment) -> Self {
        let mut schema = Self::new();
        schema.extend(fragment);
        schema
    }

    /// Writes every entry of `fragment`, replacing same-named entries.
    pub fn extend(&mut self, fragment: SchemaFragment) {
        for &(name, descriptor) in fragment {
            self.entries.insert(name, descriptor);
        }
    }

    /// Looks up a descriptor.
    pub fn get(&self, name: &str) -> Option<&OptionDescriptor> {
        self.entries.get(name)
    }

    /// Returns `true` if the schema accepts `name`.
    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Iterates entries in schema order.
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &OptionDescriptor)> {
        self.entries.iter().map(|(name, desc)| (*name, desc))
    }

    /// Number of options.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if the schema has no options.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Merges plugin contributions into a copy of `base`.
///
/// Plugins are applied in slice order and later entries win. Every plugin is
/// applied, whether or not it is activated later.
pub fn merge_schema(base: &ConfigSchema, plugins: &[PluginDescriptor]) -> ConfigSchema {
    plugins.iter().fold(base.clone(), |mut accum, plugin| {
        if !plugin.config_schema.is_empty() {
            accum.extend(plugin.config_schema);
        }
        accum
    })
}

// =============================================================================
// Base schema
// =============================================================================

/// Default notify endpoint.
pub const DEFAULT_NOTIFY_ENDPOINT: &str = "https://notify.bugsnag.com";

/// Default sessions endpoint.
pub const DEFAULT_SESSIONS_ENDPOINT: &str = "https://sessions.bugsnag.com";

/// Options understood by every client.
pub static BASE_SCHEMA: SchemaFragment = &[
    (
        "apiKey",
        OptionDescriptor::new(null, is_non_empty_string, "is required").required(),
    ),
    (
        "appVersion",
        OptionDescriptor::new(null, is_string, "should be a string"),
    ),
    (
        "autoNotify",
        OptionDescriptor::new(yes, is_bool, "should be true|false"),
    ),
    (
        "autoConsoleBreadcrumbsEnabled",
        OptionDescriptor::new(no, is_bool, "should be true|false"),
    ),
    (
        "releaseStage",
        OptionDescriptor::new(null, is_non_empty_string, "should be a string"),
    ),
    (
        "notifyReleaseStages",
        OptionDescriptor::new(null, is_string_array, "should be an array of strings"),
    ),
    (
        "endpoints",
        OptionDescriptor::new(
            default_endpoints,
            is_endpoints,
            "should be an object containing endpoint URLs { notify, sessions }",
        ),
    ),
    (
        "autoCaptureSessions",
        OptionDescriptor::new(yes, is_bool, "should be true|false"),
    ),
    (
        "maxBreadcrumbs",
        OptionDescriptor::new(
            default_max_breadcrumbs,
            is_breadcrumb_limit,
            "should be a number ≤40",
        ),
    ),
    ("user", OptionDescriptor::new(null, is_object, "should be an object")),
    (
        "metaData",
        OptionDescriptor::new(null, is_object, "should be an object"),
    ),
];

/// Returns the base schema.
pub fn base_schema() -> ConfigSchema {
    ConfigSchema::from_fragment(BASE_SCHEMA)
}

// ─── Defaults ─────────────────────────────────────────────────────────────────

/// Default for options that are unset unless supplied.
pub fn null() -> Value {
    Value::Null
}

/// `true` default.
pub fn yes() -> Value {
    Value::Bool(true)
}

/// `false` default.
pub fn no() -> Value {
    Value::Bool(false)
}

fn default_endpoints() -> Value {
    json!({
        "notify": DEFAULT_NOTIFY_ENDPOINT,
        "sessions": DEFAULT_SESSIONS_ENDPOINT,
    })
}

fn default_max_breadcrumbs() -> Value {
    json!(20)
}

// ─── Validators ───────────────────────────────────────────────────────────────

/// Accepts booleans.
pub fn is_bool(value: &Value) -> bool {
    value.is_boolean()
}

/// Accepts any string.
pub fn is_string(value: &Value) -> bool {
    value.is_string()
}

/// Accepts strings with at least one character.
pub fn is_non_empty_string(value: &Value) -> bool {
    value.as_str().is_some_and(|s| !s.is_empty())
}

/// Accepts arrays whose items are all strings.
pub fn is_string_array(value: &Value) -> bool {
    value
        .as_array()
        .is_some_and(|items| items.iter().all(Value::is_string))
}

/// Accepts JSON objects.
pub fn is_object(value: &Value) -> bool {
    value.is_object()
}

/// Accepts integers in `lo..=hi`.
pub fn is_int_in(value: &Value, lo: u64, hi: u64) -> bool {
    value.as_u64().is_some_and(|n| (lo..=hi).contains(&n))
}

fn is_breadcrumb_limit(value: &Value) -> bool {
    is_int_in(value, 0, 40)
}

fn is_endpoints(value: &Value) -> bool {
    let Some(endpoints) = value.as_object() else {
        return false;
    };
    ["notify", "sessions"]
        .iter()
        .all(|key| endpoints.get(*key).is_some_and(is_non_empty_string))
}
