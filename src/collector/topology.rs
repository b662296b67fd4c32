use super::HealthCollector;
use crate::config::DiscoveryConfig;
use crate::error::Result;
use crate::models::{HealthInfo, ResourceKind, ResourceNode};
use async_trait::async_trait;
use tracing::debug;

/// Builds the node's place in the cluster (root → site → rack → node) from
/// configuration. Health values are `unknown`: no hardware is probed.
#[derive(Debug, Clone)]
pub struct TopologyCollector {
    root_id: String,
    site_id: String,
    rack_id: String,
    node_id: String,
}

impl TopologyCollector {
    pub fn from_config(config: &DiscoveryConfig) -> Self {
        Self {
            root_id: config.root_id().to_string(),
            site_id: config.site_id.clone(),
            rack_id: config.rack_id.clone(),
            node_id: config.node_id.clone(),
        }
    }

    fn health(&self) -> HealthInfo {
        HealthInfo::unknown().with_detail("collector", self.name())
    }
}

#[async_trait]
impl HealthCollector for TopologyCollector {
    async fn collect(&self) -> Result<ResourceNode> {
        debug!(
            root = %self.root_id,
            site = %self.site_id,
            rack = %self.rack_id,
            node = %self.node_id,
            "Building node topology"
        );

        let node = ResourceNode::new(&self.node_id, ResourceKind::Node, self.health());
        let rack = ResourceNode::new(&self.rack_id, ResourceKind::Rack, self.health()).with_child(node);
        let site = ResourceNode::new(&self.site_id, ResourceKind::Site, self.health()).with_child(rack);

        Ok(ResourceNode::new(&self.root_id, ResourceKind::Cluster, self.health()).with_child(site))
    }

    fn name(&self) -> &str {
        "topology"
    }
}
