//! Terminal-segment operations
//!
//! Applies the last segment of a path to the container returned by
//! [`resolve`](crate::resolve::resolve): assignment, removal, raw lookup and
//! type-checked extraction.

use jobprops_value::{DynamicValue, NULL};

use crate::error::EngineError;
use crate::path::Segment;

/// Scalar type that can be extracted from a property tree
pub trait PropertyType: Sized {
    /// Type name used in mismatch errors
    const TYPE_NAME: &'static str;

    /// Extract a value of this type, or `None` if the node holds another type
    fn from_value(value: &DynamicValue) -> Option<Self>;
}

impl PropertyType for i64 {
    const TYPE_NAME: &'static str = "int";

    fn from_value(value: &DynamicValue) -> Option<Self> {
        value.as_i64()
    }
}

impl PropertyType for String {
    const TYPE_NAME: &'static str = "string";

    fn from_value(value: &DynamicValue) -> Option<Self> {
        value.as_str().map(str::to_string)
    }
}

impl PropertyType for bool {
    const TYPE_NAME: &'static str = "bool";

    fn from_value(value: &DynamicValue) -> Option<Self> {
        value.as_bool()
    }
}

/// Assign `value` at `segment` of a mapping container
///
/// # Errors
/// Returns [`EngineError::UnsupportedTerminal`] for sequences and scalars.
pub fn set(
    container: &mut DynamicValue,
    segment: &str,
    value: DynamicValue,
    path: &str,
) -> Result<(), EngineError> {
    match container {
        DynamicValue::StringKeyed(map) => {
            map.insert(segment.to_string(), value);
            Ok(())
        }
        DynamicValue::AnyKeyed(map) => {
            map.insert(segment.into(), value);
            Ok(())
        }
        DynamicValue::Sequence(_) | DynamicValue::Scalar(_) => Err(unsupported("set", path, container)),
    }
}

/// Remove `segment` from a mapping container
///
/// A missing key is not an error; returns the removed value, if any.
///
/// # Errors
/// Returns [`EngineError::UnsupportedTerminal`] for sequences and scalars.
pub fn remove(
    container: &mut DynamicValue,
    segment: &str,
    path: &str,
) -> Result<Option<DynamicValue>, EngineError> {
    match container {
        DynamicValue::StringKeyed(map) => Ok(map.remove(segment)),
        DynamicValue::AnyKeyed(map) => Ok(map.remove_str(segment)),
        DynamicValue::Sequence(_) | DynamicValue::Scalar(_) => {
            Err(unsupported("remove", path, container))
        }
    }
}

/// Look up the node `segment` addresses within `container`
///
/// Mappings are looked up by key; a missing key yields the absent value.
/// Sequences are indexed by `segment`, which must be decimal digits.
///
/// # Errors
/// - [`EngineError::IndexNotNumeric`] for a non-digit segment on a sequence
/// - [`EngineError::IndexOutOfRange`] for an index past the end
/// - [`EngineError::UnsupportedTerminal`] for scalar containers
pub fn lookup<'v>(
    container: &'v DynamicValue,
    segment: &str,
    path: &str,
) -> Result<&'v DynamicValue, EngineError> {
    match container {
        DynamicValue::StringKeyed(_) | DynamicValue::AnyKeyed(_) => {
            Ok(container.map_get(segment).unwrap_or(&NULL))
        }
        DynamicValue::Sequence(items) => {
            let Segment::Index(digits) = Segment::classify(segment) else {
                return Err(EngineError::IndexNotNumeric {
                    path: path.to_string(),
                    segment: segment.to_string(),
                });
            };
            // Indices too large for usize are past any sequence end
            digits
                .parse::<usize>()
                .ok()
                .and_then(|index| items.get(index))
                .ok_or_else(|| EngineError::IndexOutOfRange {
                    path: path.to_string(),
                    index: digits.to_string(),
                    len: items.len(),
                })
        }
        DynamicValue::Scalar(_) => Err(unsupported("read", path, container)),
    }
}

/// Look up `segment` within `container` and check it holds a `T`
///
/// # Errors
/// Lookup errors from [`lookup`], or [`EngineError::TypeMismatch`] if the
/// node is missing or holds another type.
pub fn get_typed<T: PropertyType>(
    container: &DynamicValue,
    segment: &str,
    path: &str,
) -> Result<T, EngineError> {
    let value = lookup(container, segment, path)?;
    T::from_value(value).ok_or_else(|| EngineError::TypeMismatch {
        path: path.to_string(),
        expected: T::TYPE_NAME,
        found: value.to_string(),
        found_type: value.type_name(),
    })
}

fn unsupported(operation: &'static str, path: &str, container: &DynamicValue) -> EngineError {
    EngineError::UnsupportedTerminal {
        operation,
        path: path.to_string(),
        container_type: container.type_name(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn props(yaml: &str) -> DynamicValue {
        serde_yaml::from_str(yaml).unwrap()
    }

    #[test]
    fn set_creates_and_replaces_keys() {
        let mut container = DynamicValue::string_map();
        set(&mut container, "port", 8080.into(), "port").unwrap();
        set(&mut container, "port", 9090.into(), "port").unwrap();
        assert_eq!(container.map_get("port"), Some(&DynamicValue::from(9090)));
        assert_eq!(container.len(), 1);
    }

    #[test]
    fn set_on_any_keyed() {
        let mut container = DynamicValue::any_map();
        set(&mut container, "enabled", true.into(), "tls/enabled").unwrap();
        set(&mut container, "enabled", false.into(), "tls/enabled").unwrap();
        assert_eq!(container.map_get("enabled"), Some(&DynamicValue::from(false)));
        assert_eq!(container.len(), 1);
    }

    #[test]
    fn set_on_sequence_is_unsupported() {
        let mut container = props("[a, b]");
        let err = set(&mut container, "0", "c".into(), "hosts/0").unwrap_err();
        assert!(matches!(
            err,
            EngineError::UnsupportedTerminal { operation: "set", container_type: "sequence", .. }
        ));
        assert_eq!(container, props("[a, b]"));
    }

    #[test]
    fn remove_missing_key_is_ok() {
        let mut container = props("a: 1");
        assert_eq!(remove(&mut container, "b", "b"), Ok(None));
        assert_eq!(remove(&mut container, "a", "a"), Ok(Some(1.into())));
        assert!(container.is_empty());
    }

    #[test]
    fn get_typed_from_mapping() {
        let container = props("port: 8080\nhost: example.com\ntls: true");
        assert_eq!(get_typed::<i64>(&container, "port", "port"), Ok(8080));
        assert_eq!(
            get_typed::<String>(&container, "host", "host"),
            Ok("example.com".to_string())
        );
        assert_eq!(get_typed::<bool>(&container, "tls", "tls"), Ok(true));
    }

    #[test]
    fn get_typed_type_mismatch() {
        let container = props("port: '8080'");
        let err = get_typed::<i64>(&container, "port", "a/port").unwrap_err();
        assert_eq!(
            err.to_string(),
            "expected a int at `a/port`, found `8080` of type `string`"
        );
    }

    #[test]
    fn get_typed_missing_key_is_type_mismatch() {
        let container = props("{}");
        let err = get_typed::<String>(&container, "host", "host").unwrap_err();
        assert!(matches!(err, EngineError::TypeMismatch { found_type: "null", .. }));
    }

    #[test]
    fn get_typed_by_index() {
        let container = props("[10, 20]");
        assert_eq!(get_typed::<i64>(&container, "1", "ports/1"), Ok(20));
        assert_eq!(get_typed::<i64>(&container, "00", "ports/00"), Ok(10));
    }

    #[test]
    fn index_out_of_range() {
        let container = props("[10, 20]");
        let err = get_typed::<i64>(&container, "5", "ports/5").unwrap_err();
        assert!(err.to_string().contains("only has 2 values"));

        let err = get_typed::<i64>(&container, "99999999999999999999999", "p").unwrap_err();
        assert!(matches!(err, EngineError::IndexOutOfRange { len: 2, .. }));
    }

    #[test]
    fn index_not_numeric() {
        let container = props("[10, 20]");
        let err = get_typed::<i64>(&container, "abc", "ports/abc").unwrap_err();
        assert!(err.to_string().contains("non-digit was specified"));

        let err = lookup(&container, "-1", "ports/-1").unwrap_err();
        assert!(matches!(err, EngineError::IndexNotNumeric { .. }));
    }

    #[test]
    fn scalar_container_is_unsupported() {
        let container = DynamicValue::null();
        let err = lookup(&container, "a", "a").unwrap_err();
        assert!(matches!(
            err,
            EngineError::UnsupportedTerminal { operation: "read", container_type: "null", .. }
        ));
    }
}
