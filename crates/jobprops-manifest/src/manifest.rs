//! Manifest, instance group, job and variable records
//!
//! Only the fields the property engine navigates are modelled. Every other
//! field is kept verbatim in an `extra` table so that a load/patch/save cycle
//! does not drop releases, stemcells, networks or update blocks.

use std::collections::BTreeMap;

use jobprops_value::DynamicValue;
use serde::{Deserialize, Serialize};
use serde_yaml::Value as YamlValue;

use crate::error::ManifestError;

/// Deployment manifest
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Manifest {
    /// Deployment name
    pub name: String,

    /// Instance groups in document order
    #[serde(default)]
    pub instance_groups: Vec<InstanceGroup>,

    /// Generated credential/certificate variables
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub variables: Vec<Variable>,

    /// Fields not modelled here
    #[serde(flatten)]
    pub extra: BTreeMap<String, YamlValue>,
}

impl Manifest {
    /// Create an empty manifest
    #[inline]
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Append an instance group
    #[inline]
    #[must_use]
    pub fn with_group(mut self, group: InstanceGroup) -> Self {
        self.instance_groups.push(group);
        self
    }

    /// Parse from a YAML document
    ///
    /// # Errors
    /// Returns error if the YAML is invalid or lacks required fields
    pub fn from_yaml(yaml: &str) -> Result<Self, ManifestError> {
        let manifest: Self = serde_yaml::from_str(yaml)?;
        tracing::debug!(
            "Loaded manifest '{}' with {} instance groups",
            manifest.name,
            manifest.instance_groups.len()
        );
        Ok(manifest)
    }

    /// Parse from a JSON document
    ///
    /// # Errors
    /// Returns error if the JSON is invalid or lacks required fields
    pub fn from_json(json: &str) -> Result<Self, ManifestError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Serialize to YAML
    ///
    /// # Errors
    /// Returns error if a property tree cannot be represented in YAML
    pub fn to_yaml(&self) -> Result<String, ManifestError> {
        Ok(serde_yaml::to_string(self)?)
    }

    /// Serialize to pretty-printed JSON
    ///
    /// # Errors
    /// Returns error if a property tree uses keys JSON cannot represent
    pub fn to_json(&self) -> Result<String, ManifestError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Iterate over every job, group by group
    pub fn jobs(&self) -> impl Iterator<Item = &Job> {
        self.instance_groups.iter().flat_map(|group| group.jobs.iter())
    }

    /// Find an instance group by name
    #[must_use]
    pub fn group(&self, name: &str) -> Option<&InstanceGroup> {
        self.instance_groups.iter().find(|group| group.name == name)
    }

    /// Find a variable by name
    #[must_use]
    pub fn variable(&self, name: &str) -> Option<&Variable> {
        self.variables.iter().find(|variable| variable.name == name)
    }

    /// Append a variable
    ///
    /// # Errors
    /// Returns [`ManifestError::DuplicateVariable`] if a variable with the same
    /// name already exists; the manifest is left unchanged.
    pub fn add_variable(&mut self, variable: Variable) -> Result<(), ManifestError> {
        if self.variable(&variable.name).is_some() {
            return Err(ManifestError::DuplicateVariable {
                name: variable.name,
            });
        }
        tracing::debug!("Adding variable '{}' of type {}", variable.name, variable.kind);
        self.variables.push(variable);
        Ok(())
    }
}

/// Group of identically-configured instances running a list of jobs
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct InstanceGroup {
    /// Group name
    pub name: String,

    /// Instance count
    #[serde(default)]
    pub instances: u32,

    /// Jobs colocated on each instance
    #[serde(default)]
    pub jobs: Vec<Job>,

    /// Fields not modelled here
    #[serde(flatten)]
    pub extra: BTreeMap<String, YamlValue>,
}

impl InstanceGroup {
    /// Create an empty group
    #[inline]
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Set instance count
    #[inline]
    #[must_use]
    pub fn with_instances(mut self, instances: u32) -> Self {
        self.instances = instances;
        self
    }

    /// Append a job
    #[inline]
    #[must_use]
    pub fn with_job(mut self, job: Job) -> Self {
        self.jobs.push(job);
        self
    }
}

/// Named job with its own property tree
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Job {
    /// Job name
    pub name: String,

    /// Release providing the job
    #[serde(default)]
    pub release: String,

    /// Job properties (a mapping, or null when unset)
    #[serde(default, skip_serializing_if = "DynamicValue::is_null")]
    pub properties: DynamicValue,

    /// Fields not modelled here
    #[serde(flatten)]
    pub extra: BTreeMap<String, YamlValue>,
}

impl Job {
    /// Create a job with no properties
    #[inline]
    #[must_use]
    pub fn new(name: impl Into<String>, release: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            release: release.into(),
            ..Self::default()
        }
    }

    /// Set the property tree
    #[inline]
    #[must_use]
    pub fn with_properties(mut self, properties: DynamicValue) -> Self {
        self.properties = properties;
        self
    }
}

/// Credential or certificate the deployment director generates
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Variable {
    /// Variable name
    pub name: String,

    /// Variable type (`password`, `certificate`, ...)
    #[serde(rename = "type")]
    pub kind: String,

    /// Generation options
    #[serde(default, skip_serializing_if = "DynamicValue::is_null")]
    pub options: DynamicValue,
}

impl Variable {
    /// Create a variable without options
    #[inline]
    #[must_use]
    pub fn new(name: impl Into<String>, kind: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: kind.into(),
            options: DynamicValue::null(),
        }
    }

    /// Set generation options
    #[inline]
    #[must_use]
    pub fn with_options(mut self, options: DynamicValue) -> Self {
        self.options = options;
        self
    }
}
