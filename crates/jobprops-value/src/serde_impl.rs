//! Serde support for [`DynamicValue`]
//!
//! Serialization writes the natural document shape. Deserialization accepts
//! any self-describing format; decoded mappings become string-keyed when
//! every key is a string and any-keyed otherwise.

use std::fmt;

use serde::de::{self, Deserialize, Deserializer, MapAccess, SeqAccess, Visitor};
use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::value::{DynamicValue, Scalar};

impl Serialize for Scalar {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Null => serializer.serialize_unit(),
            Self::Bool(b) => serializer.serialize_bool(*b),
            Self::Int(i) => serializer.serialize_i64(*i),
            Self::Float(x) => serializer.serialize_f64(*x),
            Self::String(s) => serializer.serialize_str(s),
        }
    }
}

impl Serialize for DynamicValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Scalar(scalar) => scalar.serialize(serializer),
            Self::Sequence(items) => serializer.collect_seq(items),
            Self::StringKeyed(map) => {
                // Sorted for stable output
                let mut keys: Vec<_> = map.keys().collect();
                keys.sort();
                let mut out = serializer.serialize_map(Some(keys.len()))?;
                for key in keys {
                    out.serialize_entry(key, &map[key])?;
                }
                out.end()
            }
            Self::AnyKeyed(map) => {
                let mut out = serializer.serialize_map(Some(map.len()))?;
                for (key, value) in map.iter() {
                    out.serialize_entry(key, value)?;
                }
                out.end()
            }
        }
    }
}

struct DynamicValueVisitor;

impl<'de> Visitor<'de> for DynamicValueVisitor {
    type Value = DynamicValue;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a scalar, sequence or mapping")
    }

    fn visit_bool<E: de::Error>(self, v: bool) -> Result<Self::Value, E> {
        Ok(v.into())
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Self::Value, E> {
        Ok(v.into())
    }

    // Integers beyond i64 keep their magnitude as floats
    #[allow(clippy::cast_precision_loss)]
    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Self::Value, E> {
        Ok(i64::try_from(v).map_or_else(|_| DynamicValue::from(v as f64), DynamicValue::from))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<Self::Value, E> {
        Ok(v.into())
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
        Ok(v.into())
    }

    fn visit_string<E: de::Error>(self, v: String) -> Result<Self::Value, E> {
        Ok(v.into())
    }

    fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(DynamicValue::null())
    }

    fn visit_none<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(DynamicValue::null())
    }

    fn visit_some<D: Deserializer<'de>>(self, deserializer: D) -> Result<Self::Value, D::Error> {
        DynamicValue::deserialize(deserializer)
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Self::Value, A::Error> {
        let mut items = Vec::with_capacity(seq.size_hint().unwrap_or(0));
        while let Some(item) = seq.next_element()? {
            items.push(item);
        }
        Ok(DynamicValue::Sequence(items))
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
        let mut entries = Vec::with_capacity(map.size_hint().unwrap_or(0));
        while let Some(entry) = map.next_entry::<DynamicValue, DynamicValue>()? {
            entries.push(entry);
        }
        Ok(DynamicValue::from_entries(entries))
    }

    // YAML tags (`!secret value`) arrive as single-variant enums; keep the value
    fn visit_enum<A: de::EnumAccess<'de>>(self, data: A) -> Result<Self::Value, A::Error> {
        use serde::de::VariantAccess;

        let (_tag, variant): (String, _) = data.variant()?;
        variant.newtype_variant()
    }
}

impl<'de> Deserialize<'de> for DynamicValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(DynamicValueVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn yaml_string_keys_become_string_keyed() {
        let value: DynamicValue = serde_yaml::from_str("a:\n  b: 1\n").unwrap();
        assert!(matches!(value, DynamicValue::StringKeyed(_)));
        assert!(matches!(value.map_get("a"), Some(DynamicValue::StringKeyed(_))));
    }

    #[test]
    fn yaml_integer_keys_become_any_keyed() {
        let value: DynamicValue = serde_yaml::from_str("1: one\ntwo: 2\n").unwrap();
        let DynamicValue::AnyKeyed(map) = &value else {
            panic!("expected any-keyed mapping, got {}", value.type_name());
        };
        assert_eq!(map.get(&1.into()), Some(&DynamicValue::from("one")));
        assert_eq!(value.map_get("two"), Some(&DynamicValue::from(2)));
    }

    #[test]
    fn yaml_scalars() {
        let value: DynamicValue =
            serde_yaml::from_str("n: ~\nb: true\ni: -3\nf: 1.5\ns: text\nl: [1, x]\n").unwrap();
        assert!(value.map_get("n").unwrap().is_null());
        assert_eq!(value.map_get("b").unwrap().as_bool(), Some(true));
        assert_eq!(value.map_get("i").unwrap().as_i64(), Some(-3));
        assert_eq!(value.map_get("f").unwrap(), &DynamicValue::from(1.5));
        assert_eq!(value.map_get("s").unwrap().as_str(), Some("text"));
        assert_eq!(value.map_get("l").unwrap().len(), 2);
    }

    #[test]
    fn yaml_tag_is_unwrapped() {
        let value: DynamicValue = serde_yaml::from_str("secret: !vault abc\n").unwrap();
        assert_eq!(value.map_get("secret").unwrap().as_str(), Some("abc"));
    }

    #[test]
    fn serialize_sorts_string_keys() {
        let value: DynamicValue = serde_json::from_str(r#"{"b": 1, "a": [true, null]}"#).unwrap();
        assert_eq!(serde_json::to_string(&value).unwrap(), r#"{"a":[true,null],"b":1}"#);
    }

    #[test]
    fn serialize_any_keyed_to_yaml() {
        let mut value = DynamicValue::any_map();
        if let DynamicValue::AnyKeyed(map) = &mut value {
            map.insert("tls".into(), DynamicValue::any_map());
            if let Some(DynamicValue::AnyKeyed(inner)) = map.get_str_mut("tls") {
                inner.insert("enabled".into(), true.into());
            }
        }
        assert_eq!(serde_yaml::to_string(&value).unwrap(), "tls:\n  enabled: true\n");
    }
}
