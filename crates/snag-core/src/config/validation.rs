//! Configuration validation.
//!
//! Every option in the schema is resolved (caller value, else default) and
//! checked. Failures are collected rather than returned on the first one, so
//! the caller sees the whole picture in one [`AggregateConfigError`].

use indexmap::IndexMap;
use serde_json::{Map, Value};
use tracing::debug;

use super::schema::{ConfigSchema, DEFAULT_NOTIFY_ENDPOINT, DEFAULT_SESSIONS_ENDPOINT};
use crate::error::{AggregateConfigError, ConfigResult, FieldError};

/// Validates `options` against `schema`.
///
/// Keys the schema does not know are dropped.
pub fn validate_options(
    schema: &ConfigSchema,
    options: &Map<String, Value>,
) -> ConfigResult<ValidatedConfig> {
    let mut values = IndexMap::with_capacity(schema.len());
    let mut errors = Vec::new();

    for (name, descriptor) in schema.iter() {
        let value = match options.get(name) {
            Some(v) if !v.is_null() => v.clone(),
            _ => descriptor.default_value(),
        };

        if value.is_null() {
            if descriptor.required {
                errors.push(FieldError::new(name, descriptor.message, value));
                continue;
            }
        } else if !(descriptor.validate)(&value) {
            errors.push(FieldError::new(name, descriptor.message, value));
            continue;
        }

        values.insert(name, value);
    }

    for key in options.keys().filter(|k| !schema.contains(k)) {
        debug!(option = %key, "Ignoring unknown configuration option");
    }

    if errors.is_empty() {
        Ok(ValidatedConfig { values })
    } else {
        Err(AggregateConfigError::new(errors))
    }
}

/// Outcome of a successful validation.
///
/// Holds a value (possibly `Null`) for every option in the schema it was
/// validated against. Read-only.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedConfig {
    values: IndexMap<&'static str, Value>,
}

impl ValidatedConfig {
    /// Raw value of an option. `None` for options outside the schema.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.values.get(key)
    }

    /// Boolean option, `None` when unset or not a boolean.
    pub fn get_bool(&self, key: &str) -> Option<bool> {
        self.get(key).and_then(Value::as_bool)
    }

    /// String option, `None` when unset or not a string.
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(Value::as_str)
    }

    /// Unsigned integer option, `None` when unset or not an integer.
    pub fn get_u64(&self, key: &str) -> Option<u64> {
        self.get(key).and_then(Value::as_u64)
    }

    /// The API key. Always present in a configuration validated against the
    /// base schema.
    pub fn api_key(&self) -> &str {
        self.get_str("apiKey").unwrap_or_default()
    }

    /// The declared release stage, if any.
    pub fn release_stage(&self) -> Option<&str> {
        self.get_str("releaseStage")
    }

    /// The application version, if any.
    pub fn app_version(&self) -> Option<&str> {
        self.get_str("appVersion")
    }

    /// `false` only when the caller explicitly disabled automatic notification.
    pub fn auto_notify(&self) -> bool {
        self.get_bool("autoNotify") != Some(false)
    }

    /// `true` only when the caller explicitly enabled console breadcrumbs.
    pub fn auto_console_breadcrumbs_enabled(&self) -> bool {
        self.get_bool("autoConsoleBreadcrumbsEnabled") == Some(true)
    }

    /// Release stages for which reports are delivered. `None` means all.
    pub fn notify_release_stages(&self) -> Option<Vec<&str>> {
        self.get("notifyReleaseStages")
            .and_then(Value::as_array)
            .map(|stages| stages.iter().filter_map(Value::as_str).collect())
    }

    /// Maximum number of breadcrumbs retained by the client.
    pub fn max_breadcrumbs(&self) -> usize {
        self.get_u64("maxBreadcrumbs").unwrap_or(20) as usize
    }

    /// Notify endpoint URL.
    pub fn notify_endpoint(&self) -> &str {
        self.endpoint("notify").unwrap_or(DEFAULT_NOTIFY_ENDPOINT)
    }

    /// Sessions endpoint URL.
    pub fn sessions_endpoint(&self) -> &str {
        self.endpoint("sessions").unwrap_or(DEFAULT_SESSIONS_ENDPOINT)
    }

    fn endpoint(&self, name: &str) -> Option<&str> {
        self.get("endpoints")
            .and_then(|e| e.get(name))
            .and_then(Value::as_str)
    }

    /// Iterates resolved options in schema order.
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &Value)> {
        self.values.iter().map(|(k, v)| (*k, v))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::schema::base_schema;
    use serde_json::json;

    fn options(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => unreachable!("test options must be an object"),
        }
    }

    #[test]
    fn test_defaults_fill_missing_options() {
        let config = validate_options(&base_schema(), &options(json!({ "apiKey": "k" }))).unwrap();
        assert_eq!(config.api_key(), "k");
        assert!(config.auto_notify());
        assert!(!config.auto_console_breadcrumbs_enabled());
        assert_eq!(config.release_stage(), None);
        assert_eq!(config.max_breadcrumbs(), 20);
        assert_eq!(config.notify_endpoint(), DEFAULT_NOTIFY_ENDPOINT);
        assert_eq!(config.notify_release_stages(), None);
    }

    #[test]
    fn test_empty_api_key_rejected() {
        let err = validate_options(&base_schema(), &options(json!({ "apiKey": "" }))).unwrap_err();
        assert!(err.mentions("apiKey"));
    }

    #[test]
    fn test_missing_api_key_rejected() {
        let err = validate_options(&base_schema(), &Map::new()).unwrap_err();
        assert_eq!(err.errors().len(), 1);
        assert_eq!(err.errors()[0].key, "apiKey");
        assert_eq!(err.errors()[0].value, Value::Null);
    }

    #[test]
    fn test_all_failures_collected_in_schema_order() {
        let err = validate_options(
            &base_schema(),
            &options(json!({
                "maxBreadcrumbs": 100,
                "autoNotify": "yes",
                "apiKey": 42,
            })),
        )
        .unwrap_err();
        let keys: Vec<_> = err.errors().iter().map(|e| e.key.as_str()).collect();
        assert_eq!(keys, vec!["apiKey", "autoNotify", "maxBreadcrumbs"]);
    }

    #[test]
    fn test_unknown_options_dropped() {
        let config = validate_options(
            &base_schema(),
            &options(json!({ "apiKey": "k", "colour": "blue" })),
        )
        .unwrap();
        assert!(config.get("colour").is_none());
    }

    #[test]
    fn test_explicit_false_disables_auto_notify() {
        let config = validate_options(
            &base_schema(),
            &options(json!({ "apiKey": "k", "autoNotify": false, "notifyReleaseStages": ["production"] })),
        )
        .unwrap();
        assert!(!config.auto_notify());
        assert_eq!(config.notify_release_stages(), Some(vec!["production"]));
    }
}
