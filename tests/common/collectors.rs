//! Fake collectors standing in for hardware probes

#![allow(dead_code)]

use async_trait::async_trait;
use node_discovery::{DiscoveryError, HealthCollector, ResourceNode, Result};
use std::sync::atomic::{AtomicUsize, Ordering};
use tokio::sync::Notify;

/// Returns a fixed tree and counts collections
pub struct CountingCollector {
    tree: ResourceNode,
    calls: AtomicUsize,
}

impl CountingCollector {
    pub fn new(tree: ResourceNode) -> Self {
        Self {
            tree,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl HealthCollector for CountingCollector {
    async fn collect(&self) -> Result<ResourceNode> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.tree.clone())
    }

    fn name(&self) -> &str {
        "counting"
    }
}

/// Blocks inside `collect` until the test opens the gate
pub struct GatedCollector {
    tree: ResourceNode,
    started: Notify,
    gate: Notify,
}

impl GatedCollector {
    pub fn new(tree: ResourceNode) -> Self {
        Self {
            tree,
            started: Notify::new(),
            gate: Notify::new(),
        }
    }

    /// Wait until a collection is parked at the gate
    pub async fn wait_started(&self) {
        self.started.notified().await;
    }

    pub fn open(&self) {
        self.gate.notify_one();
    }
}

#[async_trait]
impl HealthCollector for GatedCollector {
    async fn collect(&self) -> Result<ResourceNode> {
        self.started.notify_one();
        self.gate.notified().await;
        Ok(self.tree.clone())
    }

    fn name(&self) -> &str {
        "gated"
    }
}

/// Probe that always fails
pub struct FailingCollector;

#[async_trait]
impl HealthCollector for FailingCollector {
    async fn collect(&self) -> Result<ResourceNode> {
        Err(DiscoveryError::collection_failure("enclosure probe timed out"))
    }

    fn name(&self) -> &str {
        "failing"
    }
}

/// Probe that panics mid-collection
pub struct PanickingCollector;

#[async_trait]
impl HealthCollector for PanickingCollector {
    async fn collect(&self) -> Result<ResourceNode> {
        panic!("firmware query crashed");
    }

    fn name(&self) -> &str {
        "panicking"
    }
}
