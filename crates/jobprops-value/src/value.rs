//! Dynamic document values
//!
//! Provides [`DynamicValue`], the node type of an untyped property tree, and
//! [`Scalar`], its leaf kinds.

use std::collections::HashMap;
use std::fmt::{self, Display, Formatter};

use crate::mapping::AnyMapping;

/// Leaf value of a property tree
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Scalar {
    /// Absent value (`~` / `null`)
    #[default]
    Null,
    /// Boolean
    Bool(bool),
    /// Signed integer
    Int(i64),
    /// Floating point number
    Float(f64),
    /// String
    String(String),
}

impl Scalar {
    /// Discovered type name used in diagnostics
    #[inline]
    #[must_use]
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Bool(_) => "bool",
            Self::Int(_) => "int",
            Self::Float(_) => "float",
            Self::String(_) => "string",
        }
    }
}

impl Display for Scalar {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => f.write_str("null"),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Int(i) => write!(f, "{i}"),
            Self::Float(x) => write!(f, "{x}"),
            Self::String(s) => f.write_str(s),
        }
    }
}

/// Node of an untyped property tree
///
/// A node is exactly one of: a scalar, an ordered sequence, a mapping keyed
/// by strings, or a mapping keyed by arbitrary values. Only the last three
/// are containers a path can descend through.
#[derive(Debug, Clone, PartialEq)]
pub enum DynamicValue {
    /// Leaf value, including the absent value
    Scalar(Scalar),
    /// Ordered sequence
    Sequence(Vec<DynamicValue>),
    /// Mapping with string keys
    StringKeyed(HashMap<String, DynamicValue>),
    /// Mapping with arbitrary keys
    AnyKeyed(AnyMapping),
}

/// Shared absent value, handed out for missing keys
pub static NULL: DynamicValue = DynamicValue::Scalar(Scalar::Null);

impl DynamicValue {
    /// The absent value
    #[inline]
    #[must_use]
    pub fn null() -> Self {
        Self::Scalar(Scalar::Null)
    }

    /// Empty string-keyed mapping
    #[inline]
    #[must_use]
    pub fn string_map() -> Self {
        Self::StringKeyed(HashMap::new())
    }

    /// Empty any-keyed mapping
    #[inline]
    #[must_use]
    pub fn any_map() -> Self {
        Self::AnyKeyed(AnyMapping::new())
    }

    /// Build a mapping from decoded entries
    ///
    /// Produces a string-keyed mapping when every key is a string, and an
    /// any-keyed mapping otherwise.
    #[must_use]
    pub fn from_entries(entries: Vec<(DynamicValue, DynamicValue)>) -> Self {
        if entries.iter().all(|(k, _)| k.as_str().is_some()) {
            let map = entries
                .into_iter()
                .filter_map(|(k, v)| match k {
                    Self::Scalar(Scalar::String(key)) => Some((key, v)),
                    _ => None,
                })
                .collect();
            Self::StringKeyed(map)
        } else {
            Self::AnyKeyed(entries.into_iter().collect())
        }
    }

    /// Check if this node is a container a path can descend through
    ///
    /// True for sequences and both mapping kinds, false for scalars and the
    /// absent value.
    #[inline]
    #[must_use]
    pub fn is_container(&self) -> bool {
        matches!(
            self,
            Self::Sequence(_) | Self::StringKeyed(_) | Self::AnyKeyed(_)
        )
    }

    /// Check if this node is either mapping kind
    #[inline]
    #[must_use]
    pub fn is_mapping(&self) -> bool {
        matches!(self, Self::StringKeyed(_) | Self::AnyKeyed(_))
    }

    /// Check if this node is the absent value
    #[inline]
    #[must_use]
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Scalar(Scalar::Null))
    }

    /// Discovered type name used in diagnostics
    #[inline]
    #[must_use]
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Scalar(scalar) => scalar.type_name(),
            Self::Sequence(_) => "sequence",
            Self::StringKeyed(_) => "map[string]",
            Self::AnyKeyed(_) => "map[any]",
        }
    }

    /// Integer value, if this is an integer scalar
    #[inline]
    #[must_use]
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Scalar(Scalar::Int(i)) => Some(*i),
            _ => None,
        }
    }

    /// String value, if this is a string scalar
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Scalar(Scalar::String(s)) => Some(s),
            _ => None,
        }
    }

    /// Boolean value, if this is a boolean scalar
    #[inline]
    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Scalar(Scalar::Bool(b)) => Some(*b),
            _ => None,
        }
    }

    /// Sequence elements, if this is a sequence
    #[inline]
    #[must_use]
    pub fn as_sequence(&self) -> Option<&[DynamicValue]> {
        match self {
            Self::Sequence(items) => Some(items),
            _ => None,
        }
    }

    /// Look up a string key in either mapping kind
    ///
    /// Returns `None` for missing keys and for non-mapping nodes.
    #[must_use]
    pub fn map_get(&self, key: &str) -> Option<&DynamicValue> {
        match self {
            Self::StringKeyed(map) => map.get(key),
            Self::AnyKeyed(map) => map.get_str(key),
            Self::Scalar(_) | Self::Sequence(_) => None,
        }
    }

    /// Look up a string key in either mapping kind, mutably
    pub fn map_get_mut(&mut self, key: &str) -> Option<&mut DynamicValue> {
        match self {
            Self::StringKeyed(map) => map.get_mut(key),
            Self::AnyKeyed(map) => map.get_str_mut(key),
            Self::Scalar(_) | Self::Sequence(_) => None,
        }
    }

    /// Number of children for containers, zero for scalars
    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            Self::Scalar(_) => 0,
            Self::Sequence(items) => items.len(),
            Self::StringKeyed(map) => map.len(),
            Self::AnyKeyed(map) => map.len(),
        }
    }

    /// Check if this node has no children
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for DynamicValue {
    fn default() -> Self {
        Self::null()
    }
}

/// Flow-style rendering of a sequence's elements
///
/// Used to show sequence contents in error messages without cloning them.
#[derive(Debug, Clone, Copy)]
pub struct SequenceDisplay<'a>(pub &'a [DynamicValue]);

impl Display for SequenceDisplay<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for (i, item) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{item}")?;
        }
        f.write_str("]")
    }
}

impl Display for DynamicValue {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::Scalar(scalar) => write!(f, "{scalar}"),
            Self::Sequence(items) => write!(f, "{}", SequenceDisplay(items)),
            Self::StringKeyed(map) => {
                let mut keys: Vec<_> = map.keys().collect();
                keys.sort();
                f.write_str("{")?;
                for (i, key) in keys.into_iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{key}: {}", map[key])?;
                }
                f.write_str("}")
            }
            Self::AnyKeyed(map) => {
                f.write_str("{")?;
                for (i, (key, value)) in map.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{key}: {value}")?;
                }
                f.write_str("}")
            }
        }
    }
}

impl From<Scalar> for DynamicValue {
    fn from(scalar: Scalar) -> Self {
        Self::Scalar(scalar)
    }
}

impl From<&str> for DynamicValue {
    fn from(s: &str) -> Self {
        Self::Scalar(Scalar::String(s.to_string()))
    }
}

impl From<String> for DynamicValue {
    fn from(s: String) -> Self {
        Self::Scalar(Scalar::String(s))
    }
}

impl From<i64> for DynamicValue {
    fn from(i: i64) -> Self {
        Self::Scalar(Scalar::Int(i))
    }
}

impl From<i32> for DynamicValue {
    fn from(i: i32) -> Self {
        Self::Scalar(Scalar::Int(i64::from(i)))
    }
}

impl From<u16> for DynamicValue {
    fn from(i: u16) -> Self {
        Self::Scalar(Scalar::Int(i64::from(i)))
    }
}

impl From<bool> for DynamicValue {
    fn from(b: bool) -> Self {
        Self::Scalar(Scalar::Bool(b))
    }
}

impl From<f64> for DynamicValue {
    fn from(x: f64) -> Self {
        Self::Scalar(Scalar::Float(x))
    }
}

impl From<Vec<DynamicValue>> for DynamicValue {
    fn from(items: Vec<DynamicValue>) -> Self {
        Self::Sequence(items)
    }
}

impl From<AnyMapping> for DynamicValue {
    fn from(map: AnyMapping) -> Self {
        Self::AnyKeyed(map)
    }
}

impl From<HashMap<String, DynamicValue>> for DynamicValue {
    fn from(map: HashMap<String, DynamicValue>) -> Self {
        Self::StringKeyed(map)
    }
}
