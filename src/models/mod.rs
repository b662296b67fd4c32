//! Health tree data model: resource nodes, their health records and the
//! persisted snapshot.

pub mod health;
pub mod resource_node;
pub mod snapshot;

pub use health::{HealthInfo, HealthStatus};
pub use resource_node::{ResourceKind, ResourceNode};
pub use snapshot::CachedHealthSnapshot;
