use super::resource_node::ResourceNode;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The last successfully generated health tree, as persisted on disk
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CachedHealthSnapshot {
    pub generation_id: Uuid,
    pub generated_at: DateTime<Utc>,
    #[serde(with = "crate::models::resource_node::keyed")]
    pub root: ResourceNode,
}

impl CachedHealthSnapshot {
    pub fn new(generation_id: Uuid, root: ResourceNode) -> Self {
        Self {
            generation_id,
            generated_at: Utc::now(),
            root,
        }
    }
}
