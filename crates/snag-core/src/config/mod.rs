//! Configuration for the Snag client.
//!
//! - [`options`]: caller-supplied [`RawOptions`] and their normalization
//! - [`schema`]: [`OptionDescriptor`], [`ConfigSchema`], the base schema and
//!   [`merge_schema`]
//! - [`validation`]: [`validate_options`] producing a [`ValidatedConfig`]

pub mod options;
pub mod schema;
pub mod validation;

pub use options::RawOptions;
pub use schema::{
    BASE_SCHEMA, ConfigSchema, DefaultFn, OptionDescriptor, SchemaFragment, ValidateFn,
    base_schema, merge_schema,
};
pub use validation::{ValidatedConfig, validate_options};
