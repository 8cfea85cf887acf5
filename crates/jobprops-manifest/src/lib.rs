//! Deployment manifest model
//!
//! The typed outer shell of a deployment manifest: instance groups holding
//! named jobs, each job owning an untyped property tree.
//!
//! # Example
//!
//! ```
//! use jobprops_manifest::Manifest;
//!
//! let manifest = Manifest::from_yaml(
//!     "name: demo\ninstance_groups:\n- name: web\n  jobs:\n  - name: nginx\n",
//! )?;
//! assert_eq!(manifest.jobs().count(), 1);
//! # Ok::<(), jobprops_manifest::ManifestError>(())
//! ```

#![warn(unreachable_pub)]
#![allow(missing_docs)]

mod error;
mod manifest;

pub use error::ManifestError;
pub use manifest::{InstanceGroup, Job, Manifest, Variable};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
