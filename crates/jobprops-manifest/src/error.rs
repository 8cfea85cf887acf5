//! Error types for manifest ingress and egress

/// Manifest error types
#[derive(Debug, thiserror::Error)]
pub enum ManifestError {
    #[error("invalid YAML: {0}")]
    InvalidYaml(#[from] serde_yaml::Error),

    #[error("invalid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),

    /// A variable with this name is already declared
    #[error("variable `{name}` already exists")]
    DuplicateVariable { name: String },
}

impl ManifestError {
    /// Check if this is a duplicate insertion
    #[inline]
    #[must_use]
    pub fn is_duplicate(&self) -> bool {
        matches!(self, Self::DuplicateVariable { .. })
    }
}
