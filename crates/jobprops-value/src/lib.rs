//! Dynamic property trees
//!
//! Untyped document nodes for the `properties` sub-trees attached to jobs in
//! a deployment manifest.
//!
//! # Core Concepts
//!
//! - [`DynamicValue`]: Closed variant of scalar, sequence and the two mapping kinds
//! - [`Scalar`]: Leaf kinds (null, bool, int, float, string)
//! - [`AnyMapping`]: Mapping keyed by arbitrary values
//!
//! # Example
//!
//! ```
//! use jobprops_value::DynamicValue;
//!
//! let value: DynamicValue = serde_yaml::from_str("tls: {enabled: true}").unwrap();
//! assert!(value.is_container());
//! assert_eq!(value.map_get("tls").and_then(|t| t.map_get("enabled")), Some(&DynamicValue::from(true)));
//! ```

#![warn(unreachable_pub)]
#![allow(missing_docs)]

mod convert;
mod mapping;
mod serde_impl;
mod value;

pub use mapping::AnyMapping;
pub use value::{DynamicValue, Scalar, SequenceDisplay, NULL};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
