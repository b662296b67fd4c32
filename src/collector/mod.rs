//! # Health Collectors
//!
//! The generator never probes hardware itself. It asks an injected
//! [`HealthCollector`] for a fresh resource tree on every generation.

pub mod static_tree;
pub mod topology;

pub use static_tree::StaticCollector;
pub use topology::TopologyCollector;

use crate::error::Result;
use crate::models::ResourceNode;
use async_trait::async_trait;

/// Capability that produces a complete resource tree with health values
///
/// Implementations doing blocking probe work should move it off the async
/// runtime (e.g. `tokio::task::spawn_blocking`). A returned error is reported
/// to the caller as a collection failure; the generation marker is released
/// either way.
#[async_trait]
pub trait HealthCollector: Send + Sync {
    /// Build the resource tree, rooted at the cluster (or synthetic) root
    async fn collect(&self) -> Result<ResourceNode>;

    /// Name used in logs
    fn name(&self) -> &str;
}
