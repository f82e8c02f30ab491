//! Caller-supplied options before validation.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Options exactly as the caller supplied them.
///
/// A bare string is shorthand for `{ "apiKey": <string> }`. The shorthand is
/// resolved once by [`RawOptions::normalize`]; nothing downstream inspects the
/// variant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawOptions {
    /// Just an API key.
    ApiKey(String),
    /// Option name to value.
    Map(Map<String, Value>),
}

impl RawOptions {
    /// Converts the shorthand form into the mapping form.
    pub fn normalize(self) -> Map<String, Value> {
        match self {
            Self::ApiKey(key) => {
                let mut map = Map::new();
                map.insert("apiKey".to_string(), Value::String(key));
                map
            }
            Self::Map(map) => map,
        }
    }

    /// Sets a single option, converting the shorthand form first.
    pub fn with(self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        let mut map = self.normalize();
        map.insert(key.into(), value.into());
        Self::Map(map)
    }
}

impl Default for RawOptions {
    fn default() -> Self {
        Self::Map(Map::new())
    }
}

impl From<&str> for RawOptions {
    fn from(key: &str) -> Self {
        Self::ApiKey(key.to_string())
    }
}

impl From<String> for RawOptions {
    fn from(key: String) -> Self {
        Self::ApiKey(key)
    }
}

impl From<Map<String, Value>> for RawOptions {
    fn from(map: Map<String, Value>) -> Self {
        Self::Map(map)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_string_shorthand_normalizes_to_api_key() {
        let map = RawOptions::from("abc123").normalize();
        assert_eq!(map.len(), 1);
        assert_eq!(map["apiKey"], json!("abc123"));
    }

    #[test]
    fn test_with_keeps_shorthand_key() {
        let map = RawOptions::from("abc123")
            .with("releaseStage", "staging")
            .normalize();
        assert_eq!(map["apiKey"], json!("abc123"));
        assert_eq!(map["releaseStage"], json!("staging"));
    }

    #[test]
    fn test_deserializes_both_forms() {
        let raw: RawOptions = serde_json::from_value(json!("abc123")).unwrap();
        assert_eq!(raw, RawOptions::ApiKey("abc123".into()));

        let raw: RawOptions = serde_json::from_value(json!({ "apiKey": "abc123" })).unwrap();
        assert!(matches!(raw, RawOptions::Map(_)));
    }
}
