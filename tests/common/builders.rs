//! Fixture trees and isolated generator environments

#![allow(dead_code)]

use node_discovery::{
    DiscoveryConfig, HealthCollector, HealthInfo, HealthStatus, NodeHealthGenerator,
    ResourceKind, ResourceNode, SnapshotStore,
};
use std::sync::Arc;
use std::time::Duration;
use tempfile::TempDir;

pub fn node(id: &str, kind: ResourceKind, status: HealthStatus) -> ResourceNode {
    ResourceNode::new(id, kind, HealthInfo::new(status))
}

/// no-cluster > site_001 > rack_001 > srvnode-1 > {sm_001 > hw > disks > disk_001, disk_002}
pub fn storage_node_tree() -> ResourceNode {
    let disks = node("disks", ResourceKind::Category, HealthStatus::Degraded)
        .with_child(node("disk_001", ResourceKind::Component, HealthStatus::Ok))
        .with_child(
            ResourceNode::new(
                "disk_002",
                ResourceKind::Component,
                HealthInfo::new(HealthStatus::Fault).with_detail("reason", "smart failure"),
            ),
        );
    let hw = node("hw", ResourceKind::Category, HealthStatus::Degraded).with_child(disks);
    let server = node("sm_001", ResourceKind::Subsystem, HealthStatus::Degraded).with_child(hw);

    node("no-cluster", ResourceKind::Cluster, HealthStatus::Degraded).with_child(
        node("site_001", ResourceKind::Site, HealthStatus::Degraded).with_child(
            node("rack_001", ResourceKind::Rack, HealthStatus::Degraded).with_child(
                node("srvnode-1", ResourceKind::Node, HealthStatus::Degraded).with_child(server),
            ),
        ),
    )
}

/// Marker and snapshot paths inside a private temp directory
pub struct TestEnv {
    pub dir: TempDir,
    pub config: DiscoveryConfig,
}

impl TestEnv {
    pub fn new() -> Self {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let config = DiscoveryConfig {
            marker_path: dir.path().join("dm_inprogress"),
            snapshot_path: dir.path().join("dm_health.json"),
            environment: "test".to_string(),
            ..DiscoveryConfig::default()
        };
        Self { dir, config }
    }

    pub fn generator(&self, collector: Arc<dyn HealthCollector>) -> NodeHealthGenerator {
        NodeHealthGenerator::new(&self.config, collector)
    }

    pub fn snapshot_store(&self) -> SnapshotStore {
        SnapshotStore::new(&self.config.snapshot_path)
    }
}

/// Poll until no generation holds the marker
pub async fn wait_until_not_busy(generator: &NodeHealthGenerator) {
    tokio::time::timeout(Duration::from_secs(5), async {
        while generator.get_status().is_busy() {
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
    })
    .await
    .expect("generation did not release the marker in time");
}
