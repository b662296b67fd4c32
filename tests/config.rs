//! Configuration Module Tests
//!
//! Tests for DiscoveryConfig defaults and layered loading.

use node_discovery::{DiscoveryConfig, DiscoveryError};
use std::io::Write;
use std::path::PathBuf;

#[test]
fn config_has_expected_defaults() {
    let config = DiscoveryConfig::default();

    assert_eq!(config.marker_path, PathBuf::from("/tmp/dm_inprogress"));
    assert_eq!(config.snapshot_path, PathBuf::from("/tmp/dm_health.json"));
    assert_eq!(config.cluster_id, None);
    assert_eq!(config.root_id(), "no-cluster");
    assert_eq!(config.site_id, "site_001");
    assert_eq!(config.rack_id, "rack_001");
    assert_eq!(config.node_id, "node_001");
    assert!(config.validate().is_ok());
}

#[test]
fn config_file_overrides_defaults() {
    let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
    writeln!(
        file,
        r#"
marker_path = "/run/discovery/inprogress"
site_id = "site_042"
"#
    )
    .unwrap();

    let config = DiscoveryConfig::load(Some(file.path())).expect("config should load");
    assert_eq!(config.marker_path, PathBuf::from("/run/discovery/inprogress"));
    assert_eq!(config.site_id, "site_042");
    assert_eq!(config.rack_id, "rack_001");
}

#[test]
fn invalid_config_file_is_rejected() {
    let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
    writeln!(file, "node_id = \"rack_001>node_1\"").unwrap();

    let err = DiscoveryConfig::load(Some(file.path())).unwrap_err();
    assert!(matches!(err, DiscoveryError::Configuration(_)));
    assert!(err.to_string().contains("node_id"));
}

#[test]
fn environment_name_is_read_from_config_file() {
    let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
    writeln!(file, "environment = \"production\"").unwrap();

    let config = DiscoveryConfig::load(Some(file.path())).unwrap();
    assert_eq!(config.environment, "production");
}

// The only test in this binary that touches DISCOVERY_* variables; the keys it
// sets are not asserted by any other test here.
#[test]
fn environment_variables_override_config_file() {
    let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
    writeln!(
        file,
        r#"
cluster_id = "cluster_from_file"
snapshot_path = "/var/lib/discovery/file.json"
"#
    )
    .unwrap();

    std::env::set_var("DISCOVERY_CLUSTER_ID", "cluster_from_env");
    std::env::set_var("DISCOVERY_SNAPSHOT_PATH", "/var/lib/discovery/env.json");
    let loaded = DiscoveryConfig::load(Some(file.path()));
    std::env::remove_var("DISCOVERY_CLUSTER_ID");
    std::env::remove_var("DISCOVERY_SNAPSHOT_PATH");

    let config = loaded.expect("config should load");
    assert_eq!(config.root_id(), "cluster_from_env");
    assert_eq!(config.snapshot_path, PathBuf::from("/var/lib/discovery/env.json"));
    // Keys set nowhere else keep their defaults
    assert_eq!(config.node_id, "node_001");
}
