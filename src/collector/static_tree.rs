use super::HealthCollector;
use crate::error::Result;
use crate::models::ResourceNode;
use async_trait::async_trait;

/// Returns the same tree on every collection
#[derive(Debug, Clone)]
pub struct StaticCollector {
    tree: ResourceNode,
}

impl StaticCollector {
    pub fn new(tree: ResourceNode) -> Self {
        Self { tree }
    }
}

#[async_trait]
impl HealthCollector for StaticCollector {
    async fn collect(&self) -> Result<ResourceNode> {
        Ok(self.tree.clone())
    }

    fn name(&self) -> &str {
        "static"
    }
}
