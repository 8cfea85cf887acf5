//! Declarative patch sets
//!
//! A [`PatchSet`] lists property edits an adapter applies to a manifest, so
//! the edits can live in a YAML, JSON or TOML document instead of code:
//!
//! ```yaml
//! patches:
//!   - job: gemfire-locator
//!     set:
//!       path: gemfire/tls/enabled
//!       value: true
//!   - job: route_registrar
//!     group: locator
//!     remove:
//!       path: route_registrar/legacy
//! ```

use jobprops_manifest::Manifest;
use jobprops_value::DynamicValue;
use serde::{Deserialize, Serialize};

use crate::error::EngineError;
use crate::options::SelectorOptions;
use crate::selector::EntitySelector;

/// Ordered list of property edits
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PatchSet {
    /// Selector options used for every patch
    #[serde(default)]
    pub options: SelectorOptions,

    /// Edits, applied in order
    #[serde(default)]
    pub patches: Vec<Patch>,
}

/// One property edit against every job with a given name
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Patch {
    /// Job name
    pub job: String,

    /// Restrict the job lookup to this instance group
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group: Option<String>,

    /// The edit
    #[serde(flatten)]
    pub op: PatchOp,
}

/// Property edit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PatchOp {
    /// Assign a value, creating intermediate mappings
    Set { path: String, value: DynamicValue },
    /// Remove a key
    Remove { path: String },
}

/// Errors loading a patch set
#[derive(Debug, thiserror::Error)]
pub enum PatchError {
    #[error("invalid YAML: {0}")]
    InvalidYaml(#[from] serde_yaml::Error),

    #[error("invalid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),

    #[error("invalid TOML: {0}")]
    InvalidToml(#[from] toml::de::Error),
}

impl PatchSet {
    /// Create an empty patch set
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a set-operation
    #[must_use]
    pub fn set(mut self, job: impl Into<String>, path: impl Into<String>, value: impl Into<DynamicValue>) -> Self {
        self.patches.push(Patch {
            job: job.into(),
            group: None,
            op: PatchOp::Set {
                path: path.into(),
                value: value.into(),
            },
        });
        self
    }

    /// Append a remove-operation
    #[must_use]
    pub fn remove(mut self, job: impl Into<String>, path: impl Into<String>) -> Self {
        self.patches.push(Patch {
            job: job.into(),
            group: None,
            op: PatchOp::Remove { path: path.into() },
        });
        self
    }

    /// Parse from YAML
    ///
    /// # Errors
    /// Returns error if the document is invalid
    pub fn from_yaml(yaml: &str) -> Result<Self, PatchError> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Parse from JSON
    ///
    /// # Errors
    /// Returns error if the document is invalid
    pub fn from_json(json: &str) -> Result<Self, PatchError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Parse from TOML
    ///
    /// # Errors
    /// Returns error if the document is invalid
    pub fn from_toml(source: &str) -> Result<Self, PatchError> {
        Ok(toml::from_str(source)?)
    }

    /// Number of patches
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.patches.len()
    }

    /// Check if there are no patches
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.patches.is_empty()
    }

    /// Apply every patch in order, each through a fresh selector
    ///
    /// Stops at the first failing patch. Patches applied before it, and any
    /// partial fan-out of the failing patch itself, stay in the manifest.
    ///
    /// # Errors
    /// Returns the error of the first failing patch.
    pub fn apply(&self, manifest: &mut Manifest) -> Result<usize, EngineError> {
        for (position, patch) in self.patches.iter().enumerate() {
            let selector = EntitySelector::with_options(&mut *manifest, self.options);
            let selector = match &patch.group {
                Some(group) => selector.locate_in_group(group, &patch.job),
                None => selector.locate(&patch.job),
            };
            let selector = match &patch.op {
                PatchOp::Set { path, value } => selector.add_property(path, value.clone()),
                PatchOp::Remove { path } => selector.remove_property(path),
            };
            if let Err(error) = selector.into_result() {
                tracing::warn!(
                    "Patch {} of {} on job '{}' failed: {}",
                    position + 1,
                    self.patches.len(),
                    patch.job,
                    error
                );
                return Err(error);
            }
        }
        tracing::debug!("Applied {} patches", self.patches.len());
        Ok(self.patches.len())
    }
}
