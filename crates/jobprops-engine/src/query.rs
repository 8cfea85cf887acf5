//! `key=value` queries over sequences of mappings

use jobprops_value::{DynamicValue, SequenceDisplay};

use crate::error::EngineError;
use crate::path::Segment;

/// Find the first element of `items` selected by a `key=value` segment
///
/// An element matches when it is a mapping (either kind) holding a string
/// equal to `value` at `key`. Stored values of any other type never match,
/// so only string-valued fields can be queried.
///
/// # Errors
/// - [`EngineError::QueryGrammarMismatch`] if `segment` is not `key=value`
/// - [`EngineError::QueryNoMatch`] if no element matches
pub fn match_query(segment: &str, items: &[DynamicValue], path: &str) -> Result<usize, EngineError> {
    let Segment::Query { key, value } = Segment::classify(segment) else {
        return Err(EngineError::QueryGrammarMismatch {
            path: path.to_string(),
            segment: segment.to_string(),
            contents: SequenceDisplay(items).to_string(),
        });
    };

    let position = items.iter().position(|item| {
        item.is_mapping() && item.map_get(key).and_then(DynamicValue::as_str) == Some(value)
    });

    match position {
        Some(index) => {
            tracing::trace!("Query `{}` of `{}` matched element {}", segment, path, index);
            Ok(index)
        }
        None => Err(EngineError::QueryNoMatch {
            path: path.to_string(),
            segment: segment.to_string(),
            contents: SequenceDisplay(items).to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn route(name: &str, port: i64) -> DynamicValue {
        DynamicValue::from_entries(vec![("name".into(), name.into()), ("port".into(), port.into())])
    }

    fn routes() -> Vec<DynamicValue> {
        vec![
            DynamicValue::from("not-a-mapping"),
            route("cloudcache", 8080),
            route("dashboard", 8081),
            route("cloudcache", 9090),
        ]
    }

    #[test]
    fn returns_first_match() {
        assert_eq!(match_query("name=cloudcache", &routes(), "r/name=cloudcache/x"), Ok(1));
        assert_eq!(match_query("name=dashboard", &routes(), "p"), Ok(2));
    }

    #[test]
    fn matches_any_keyed_elements() {
        let mut element = DynamicValue::any_map();
        if let DynamicValue::AnyKeyed(map) = &mut element {
            map.insert("name".into(), "x".into());
        }
        assert_eq!(match_query("name=x", &[element], "p"), Ok(0));
    }

    #[test]
    fn no_match_lists_contents() {
        let err = match_query("name=missing", &routes(), "r/name=missing/port").unwrap_err();
        let EngineError::QueryNoMatch { segment, contents, .. } = &err else {
            panic!("unexpected error: {err}");
        };
        assert_eq!(segment, "name=missing");
        assert!(contents.contains("dashboard"));
        assert!(err.to_string().contains("r/name=missing/port"));
    }

    #[test]
    fn non_string_values_never_match() {
        let err = match_query("port=8080", &routes(), "p").unwrap_err();
        assert!(matches!(err, EngineError::QueryNoMatch { .. }));
    }

    #[test]
    fn plain_key_is_grammar_mismatch() {
        let err = match_query("routes", &routes(), "a/routes/b").unwrap_err();
        assert!(matches!(err, EngineError::QueryGrammarMismatch { ref segment, .. } if segment == "routes"));
    }

    #[test]
    fn index_segment_is_grammar_mismatch() {
        let err = match_query("0", &routes(), "a/0/b").unwrap_err();
        assert!(matches!(err, EngineError::QueryGrammarMismatch { .. }));
    }

    #[test]
    fn empty_sequence_has_no_match() {
        let err = match_query("name=x", &[], "p").unwrap_err();
        assert!(matches!(err, EngineError::QueryNoMatch { ref contents, .. } if contents == "[]"));
    }
}
