//! Walking a property tree down to the terminal container
//!
//! [`resolve`] consumes every segment of a path except the last and returns
//! the node the last segment applies to.

use jobprops_value::DynamicValue;

use crate::error::EngineError;
use crate::path::PropertyPath;
use crate::query::match_query;

/// Walk `root` through all but the last segment of `path`
///
/// At each step:
/// - a sequence is searched with the segment as a `key=value` query
/// - a mapping (either kind) is descended by key; with `auto_vivify`, a
///   missing or null key first receives an empty any-keyed mapping
/// - the value found must itself be a container
///
/// With `auto_vivify`, a null `root` is first replaced by an empty
/// string-keyed mapping. Mutations made before a failing step are kept.
///
/// # Errors
/// - [`EngineError::UnsupportedContainerShape`] if a scalar or absent value
///   is found where a container is needed
/// - query errors from [`match_query`]
pub fn resolve<'v>(
    root: &'v mut DynamicValue,
    path: &PropertyPath,
    auto_vivify: bool,
) -> Result<&'v mut DynamicValue, EngineError> {
    if auto_vivify && root.is_null() {
        *root = DynamicValue::string_map();
    }

    let (_, parents) = path.split_last();
    let mut current = root;
    for segment in parents {
        current = match current {
            DynamicValue::Sequence(items) => {
                let index = match_query(segment, items, path.as_str())?;
                &mut items[index]
            }
            DynamicValue::StringKeyed(map) => {
                if auto_vivify {
                    let slot = map
                        .entry(segment.clone())
                        .or_insert_with(DynamicValue::null);
                    vivify(slot, segment);
                }
                descend(map.get_mut(segment.as_str()), segment, path)?
            }
            DynamicValue::AnyKeyed(map) => {
                if auto_vivify {
                    vivify(map.entry_str_or_insert_with(segment, DynamicValue::null), segment);
                }
                descend(map.get_str_mut(segment), segment, path)?
            }
            DynamicValue::Scalar(scalar) => {
                return Err(EngineError::UnsupportedContainerShape {
                    path: path.to_string(),
                    segment: segment.clone(),
                    value: scalar.to_string(),
                    value_type: scalar.type_name(),
                });
            }
        };
    }
    Ok(current)
}

fn vivify(slot: &mut DynamicValue, segment: &str) {
    if slot.is_null() {
        tracing::trace!("Auto-vivifying mapping at `{}`", segment);
        *slot = DynamicValue::any_map();
    }
}

fn descend<'v>(
    next: Option<&'v mut DynamicValue>,
    segment: &str,
    path: &PropertyPath,
) -> Result<&'v mut DynamicValue, EngineError> {
    match next {
        Some(value) if value.is_container() => Ok(value),
        other => {
            let (value, value_type) = other.map_or_else(
                || ("null".to_string(), "null"),
                |value| (value.to_string(), value.type_name()),
            );
            Err(EngineError::UnsupportedContainerShape {
                path: path.to_string(),
                segment: segment.to_string(),
                value,
                value_type,
            })
        }
    }
}
