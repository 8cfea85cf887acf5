//! Conversions from other document models
//!
//! Lets callers that already hold a `serde_yaml::Value` or `serde_json::Value`
//! tree hand it to the property engine without re-parsing.

use serde_json::Value as JsonValue;
use serde_yaml::Value as YamlValue;

use crate::value::DynamicValue;

impl From<YamlValue> for DynamicValue {
    fn from(value: YamlValue) -> Self {
        match value {
            YamlValue::Null => Self::null(),
            YamlValue::Bool(b) => b.into(),
            YamlValue::Number(n) => yaml_number(&n),
            YamlValue::String(s) => s.into(),
            YamlValue::Sequence(items) => {
                Self::Sequence(items.into_iter().map(Self::from).collect())
            }
            YamlValue::Mapping(map) => Self::from_entries(
                map.into_iter()
                    .map(|(k, v)| (Self::from(k), Self::from(v)))
                    .collect(),
            ),
            YamlValue::Tagged(tagged) => Self::from(tagged.value),
        }
    }
}

impl From<JsonValue> for DynamicValue {
    fn from(value: JsonValue) -> Self {
        match value {
            JsonValue::Null => Self::null(),
            JsonValue::Bool(b) => b.into(),
            JsonValue::Number(n) => match n.as_i64() {
                Some(i) => i.into(),
                None => n.as_f64().unwrap_or(f64::NAN).into(),
            },
            JsonValue::String(s) => s.into(),
            JsonValue::Array(items) => Self::Sequence(items.into_iter().map(Self::from).collect()),
            JsonValue::Object(map) => {
                Self::StringKeyed(map.into_iter().map(|(k, v)| (k, Self::from(v))).collect())
            }
        }
    }
}

fn yaml_number(n: &serde_yaml::Number) -> DynamicValue {
    match n.as_i64() {
        Some(i) => i.into(),
        None => n.as_f64().unwrap_or(f64::NAN).into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn from_json_object() {
        let value = DynamicValue::from(json!({"routes": [{"name": "a", "port": 80}]}));
        let routes = value.map_get("routes").and_then(DynamicValue::as_sequence).unwrap();
        assert_eq!(routes[0].map_get("port").and_then(DynamicValue::as_i64), Some(80));
        assert!(matches!(value, DynamicValue::StringKeyed(_)));
    }

    #[test]
    fn from_yaml_mapping_with_int_keys() {
        let yaml: YamlValue = serde_yaml::from_str("80: http\n443: https\n").unwrap();
        let value = DynamicValue::from(yaml);
        assert!(matches!(value, DynamicValue::AnyKeyed(_)));
        assert_eq!(value.len(), 2);
    }

    #[test]
    fn from_yaml_tagged_value() {
        let yaml: YamlValue = serde_yaml::from_str("!secret hunter2").unwrap();
        assert_eq!(DynamicValue::from(yaml).as_str(), Some("hunter2"));
    }

    #[test]
    fn yaml_and_json_agree() {
        let yaml: YamlValue = serde_yaml::from_str("a: {b: [1, 2.5, true, ~]}").unwrap();
        let json = json!({"a": {"b": [1, 2.5, true, null]}});
        assert_eq!(DynamicValue::from(yaml), DynamicValue::from(json));
    }
}
