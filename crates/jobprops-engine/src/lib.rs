//! Path-addressed property engine
//!
//! Locates named jobs inside a deployment manifest and reads or edits their
//! untyped property trees through slash-delimited paths.
//!
//! # Core Concepts
//!
//! - [`EntitySelector`]: Cursor over a manifest carrying a sticky error
//! - [`PropertyPath`]: `a/b/key=value/c` paths; `key=value` selects from a
//!   sequence, trailing digits index a sequence
//! - [`resolve`]: Walk to the terminal container, auto-vivifying on writes
//! - [`PatchSet`]: Declarative list of edits loaded from YAML, JSON or TOML
//!
//! # Example
//!
//! ```
//! use jobprops_engine::EntitySelector;
//! use jobprops_manifest::Manifest;
//!
//! let mut manifest = Manifest::from_yaml(r"
//! name: cloudcache
//! instance_groups:
//! - name: locator
//!   jobs:
//!   - name: route_registrar
//!     properties:
//!       route_registrar:
//!         routes:
//!         - {name: cloudcache, port: 8080}
//! ")?;
//!
//! let mut selector = EntitySelector::new(&mut manifest)
//!     .locate("route_registrar")
//!     .add_property("route_registrar/routes/name=cloudcache/tls", true);
//! assert_eq!(selector.get_int("route_registrar/routes/name=cloudcache/port")?, 8080);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

#![warn(unreachable_pub)]
#![allow(missing_docs)]

mod access;
mod combinators;
mod error;
mod options;
mod patch;
mod path;
mod query;
mod resolve;
mod selector;

pub use access::{get_typed, lookup, remove, set, PropertyType};
pub use error::{EngineError, ErrorKind};
pub use options::SelectorOptions;
pub use patch::{Patch, PatchError, PatchOp, PatchSet};
pub use path::{PropertyPath, Segment};
pub use query::match_query;
pub use resolve::resolve;
pub use selector::{EntitySelector, JobIndex};

/// Prelude module for common imports
pub mod prelude {
    //! Common imports for working with the property engine
    pub use crate::{EngineError, EntitySelector, PatchSet, PropertyPath, SelectorOptions};
    pub use jobprops_manifest::{InstanceGroup, Job, Manifest, Variable};
    pub use jobprops_value::DynamicValue;
}

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
