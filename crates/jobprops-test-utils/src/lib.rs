//! Testing utilities for the jobprops workspace
//!
//! Shared manifest fixtures and log setup.

#![allow(missing_docs)]
#![allow(clippy::missing_panics_doc)]

use jobprops_manifest::{InstanceGroup, Job, Manifest};
use jobprops_value::DynamicValue;
use tracing_subscriber::EnvFilter;

/// Cloud cache deployment with a locator and two servers
pub const CLOUDCACHE_YAML: &str = r"
name: cloudcache
instance_groups:
- name: locator
  instances: 1
  jobs:
  - name: gemfire-locator
    release: gemfire
  - name: route_registrar
    release: routing
    properties:
      route_registrar:
        routes:
        - name: cloudcache
          port: 8080
        - name: pulse
          port: 7070
          uris: [pulse.example.com]
- name: server
  instances: 2
  jobs:
  - name: gemfire-server
    release: gemfire
    properties:
      gemfire:
        memory: 4096
        name: server
        ports: [40404, 40405]
variables:
- name: gemfire_ca
  type: certificate
  options: {is_ca: true, common_name: gemfire}
";

/// Install a test subscriber honoring `RUST_LOG`
///
/// Safe to call from every test; only the first call installs.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_test_writer()
        .try_init();
}

/// Parse a manifest fixture
pub fn manifest_from_yaml(yaml: &str) -> Manifest {
    Manifest::from_yaml(yaml).expect("fixture manifest must parse")
}

/// Parse a property tree fixture
pub fn properties_from_yaml(yaml: &str) -> DynamicValue {
    serde_yaml::from_str(yaml).expect("fixture properties must parse")
}

pub fn cloudcache_manifest() -> Manifest {
    manifest_from_yaml(CLOUDCACHE_YAML)
}

/// Manifest with one job that has no properties at all
pub fn empty_locator_manifest() -> Manifest {
    Manifest::new("cloudcache")
        .with_group(InstanceGroup::new("locator").with_job(Job::new("gemfire-locator", "gemfire")))
}

/// Manifest where `name` appears once in each of `groups` instance groups
pub fn replicated_job_manifest(name: &str, groups: usize) -> Manifest {
    (0..groups).fold(Manifest::new("replicated"), |manifest, index| {
        manifest.with_group(
            InstanceGroup::new(format!("group-{index}"))
                .with_job(Job::new(format!("sidecar-{index}"), "sidecars"))
                .with_job(Job::new(name, "main")),
        )
    })
}
