//! Error types for the property engine
//!
//! Every failure is terminal and carries enough context (path, offending
//! segment, offending value) to be printed verbatim to an operator.

/// Property engine error
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum EngineError {
    /// No job with this name exists in the scanned groups
    #[error("entity not found: `{name}`")]
    EntityNotFound { name: String },

    /// A chain call needing a selection ran before any `locate`
    #[error("no entity selected")]
    NothingSelected,

    /// The property path has no segments
    #[error("property path is empty")]
    EmptyPath,

    /// A scalar or absent value sits where the path needs a container
    #[error(
        "cannot descend further at `{segment}` of `{path}`: a scalar or unsupported value \
         already exists: `{value}` of type `{value_type}`"
    )]
    UnsupportedContainerShape {
        path: String,
        segment: String,
        value: String,
        value_type: &'static str,
    },

    /// A segment applied to a sequence is not of the form `key=value`
    #[error("segment `{segment}` of `{path}` is not a key=value query; sequence contents: {contents}")]
    QueryGrammarMismatch {
        path: String,
        segment: String,
        contents: String,
    },

    /// No sequence element satisfies the query
    #[error("no element matches `{segment}` of `{path}`; sequence contents: {contents}")]
    QueryNoMatch {
        path: String,
        segment: String,
        contents: String,
    },

    /// A sequence terminal was addressed with something other than digits
    #[error("value found but a non-digit was specified at `{segment}` of `{path}`")]
    IndexNotNumeric { path: String, segment: String },

    /// A sequence terminal index is past the end
    #[error("cannot read index {index} of `{path}`: sequence only has {len} values")]
    IndexOutOfRange {
        path: String,
        index: String,
        len: usize,
    },

    /// The terminal value is missing or of the wrong type
    #[error("expected a {expected} at `{path}`, found `{found}` of type `{found_type}`")]
    TypeMismatch {
        path: String,
        expected: &'static str,
        found: String,
        found_type: &'static str,
    },

    /// A single-valued read was attempted against several selected jobs
    #[error("{operation} not implemented for multiple matches ({count} entities selected)")]
    MultipleMatchesUnsupported {
        operation: &'static str,
        count: usize,
    },

    /// A variable with this name is already declared
    #[error("variable `{name}` already exists")]
    DuplicateInsertion { name: String },

    /// The terminal container cannot serve this operation
    #[error("unsupported: cannot {operation} `{path}` on a value of type `{container_type}`")]
    UnsupportedTerminal {
        operation: &'static str,
        path: String,
        container_type: &'static str,
    },
}

/// Discriminant of [`EngineError`], for mapping errors to exit codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    EntityNotFound,
    NothingSelected,
    EmptyPath,
    UnsupportedContainerShape,
    QueryGrammarMismatch,
    QueryNoMatch,
    IndexNotNumeric,
    IndexOutOfRange,
    TypeMismatch,
    MultipleMatchesUnsupported,
    DuplicateInsertion,
    UnsupportedTerminal,
}

impl EngineError {
    /// Error discriminant
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::EntityNotFound { .. } => ErrorKind::EntityNotFound,
            Self::NothingSelected => ErrorKind::NothingSelected,
            Self::EmptyPath => ErrorKind::EmptyPath,
            Self::UnsupportedContainerShape { .. } => ErrorKind::UnsupportedContainerShape,
            Self::QueryGrammarMismatch { .. } => ErrorKind::QueryGrammarMismatch,
            Self::QueryNoMatch { .. } => ErrorKind::QueryNoMatch,
            Self::IndexNotNumeric { .. } => ErrorKind::IndexNotNumeric,
            Self::IndexOutOfRange { .. } => ErrorKind::IndexOutOfRange,
            Self::TypeMismatch { .. } => ErrorKind::TypeMismatch,
            Self::MultipleMatchesUnsupported { .. } => ErrorKind::MultipleMatchesUnsupported,
            Self::DuplicateInsertion { .. } => ErrorKind::DuplicateInsertion,
            Self::UnsupportedTerminal { .. } => ErrorKind::UnsupportedTerminal,
        }
    }

    /// Check if the error reports a missing job
    #[inline]
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::EntityNotFound { .. })
    }

    /// Check if the error came from walking or reading a property path
    #[inline]
    #[must_use]
    pub fn is_path_error(&self) -> bool {
        matches!(
            self.kind(),
            ErrorKind::EmptyPath
                | ErrorKind::UnsupportedContainerShape
                | ErrorKind::QueryGrammarMismatch
                | ErrorKind::QueryNoMatch
                | ErrorKind::IndexNotNumeric
                | ErrorKind::IndexOutOfRange
                | ErrorKind::TypeMismatch
                | ErrorKind::UnsupportedTerminal
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_names_entity() {
        let err = EngineError::EntityNotFound {
            name: "missing".to_string(),
        };
        assert_eq!(err.to_string(), "entity not found: `missing`");
        assert!(err.is_not_found());
        assert!(!err.is_path_error());
        assert_eq!(err.kind(), ErrorKind::EntityNotFound);
    }

    #[test]
    fn index_out_of_range_display() {
        let err = EngineError::IndexOutOfRange {
            path: "a/5".to_string(),
            index: "5".to_string(),
            len: 2,
        };
        assert!(err.to_string().contains("only has 2 values"));
        assert!(err.is_path_error());
    }

    #[test]
    fn type_mismatch_display() {
        let err = EngineError::TypeMismatch {
            path: "a/b".to_string(),
            expected: "int",
            found: "x".to_string(),
            found_type: "string",
        };
        assert_eq!(
            err.to_string(),
            "expected a int at `a/b`, found `x` of type `string`"
        );
    }

    #[test]
    fn multiple_matches_display() {
        let err = EngineError::MultipleMatchesUnsupported {
            operation: "get_int",
            count: 2,
        };
        assert!(err.to_string().contains("not implemented for multiple matches"));
        assert!(!err.is_path_error());
    }
}
