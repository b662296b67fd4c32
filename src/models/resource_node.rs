//! Resource tree model.
//!
//! A [`ResourceNode`] serializes as a nested object keyed by node id:
//!
//! ```json
//! {
//!   "no-cluster": {
//!     "kind": "cluster",
//!     "health": { "status": "ok", "timestamp": "..." },
//!     "children": {
//!       "site_001": { "kind": "site", "health": { ... } }
//!     }
//!   }
//! }
//! ```
//!
//! The id lives in the key, never in the body. Child order is kept in both
//! directions.

use super::health::{HealthInfo, HealthStatus};
use crate::constants::PATH_DELIMITER;
use crate::error::{DiscoveryError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

/// Kind of resource a node represents
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ResourceKind {
    Cluster,
    Site,
    Rack,
    Node,
    Subsystem,
    Category,
    Component,
    /// Any kind not known to this crate
    Custom(String),
}

impl ResourceKind {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Cluster => "cluster",
            Self::Site => "site",
            Self::Rack => "rack",
            Self::Node => "node",
            Self::Subsystem => "subsystem",
            Self::Category => "category",
            Self::Component => "component",
            Self::Custom(kind) => kind,
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<String> for ResourceKind {
    fn from(kind: String) -> Self {
        match kind.as_str() {
            "cluster" => Self::Cluster,
            "site" => Self::Site,
            "rack" => Self::Rack,
            "node" => Self::Node,
            "subsystem" => Self::Subsystem,
            "category" => Self::Category,
            "component" => Self::Component,
            _ => Self::Custom(kind),
        }
    }
}

impl From<ResourceKind> for String {
    fn from(kind: ResourceKind) -> Self {
        kind.as_str().to_string()
    }
}

/// A node in the health tree
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResourceNode {
    /// Unique among siblings. Carried by the parent's map key when serialized.
    #[serde(skip)]
    pub id: String,
    pub kind: ResourceKind,
    pub health: HealthInfo,
    #[serde(default, with = "children_map", skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<ResourceNode>,
}

impl ResourceNode {
    pub fn new(id: impl Into<String>, kind: ResourceKind, health: HealthInfo) -> Self {
        Self {
            id: id.into(),
            kind,
            health,
            children: Vec::new(),
        }
    }

    /// Append a child, keeping discovery order
    pub fn with_child(mut self, child: ResourceNode) -> Self {
        self.children.push(child);
        self
    }

    pub fn push_child(&mut self, child: ResourceNode) {
        self.children.push(child);
    }

    /// Direct child with the given id (case-sensitive)
    pub fn child(&self, id: &str) -> Option<&ResourceNode> {
        self.children.iter().find(|child| child.id == id)
    }

    /// Number of nodes in this subtree, including this one
    pub fn node_count(&self) -> usize {
        1 + self.children.iter().map(ResourceNode::node_count).sum::<usize>()
    }

    /// Worst health status anywhere in this subtree
    pub fn aggregate_status(&self) -> HealthStatus {
        self.children
            .iter()
            .map(ResourceNode::aggregate_status)
            .fold(self.health.status, HealthStatus::worst)
    }

    /// Check that every id in the subtree is non-empty, free of the path
    /// delimiter and unique among its siblings.
    ///
    /// A tree that fails here cannot be addressed by resource path or
    /// rendered without losing nodes, so it is reported as a
    /// `CollectionFailure`.
    pub fn validate(&self) -> Result<()> {
        check_id(&self.id, "")?;
        self.validate_children(&self.id)
    }

    fn validate_children(&self, location: &str) -> Result<()> {
        let mut seen = HashSet::with_capacity(self.children.len());
        for child in &self.children {
            check_id(&child.id, location)?;
            if !seen.insert(child.id.as_str()) {
                return Err(DiscoveryError::collection_failure(format!(
                    "duplicate resource id '{}' under '{location}'",
                    child.id
                )));
            }
            child.validate_children(&format!("{location}{PATH_DELIMITER}{}", child.id))?;
        }
        Ok(())
    }

    /// Render this subtree as `{"<id>": {...}}` pretty JSON
    pub fn to_health_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&Keyed(self))?)
    }

    /// Parse a `{"<id>": {...}}` document produced by [`Self::to_health_json`]
    pub fn from_health_json(json: &str) -> Result<Self> {
        let mut deserializer = serde_json::Deserializer::from_str(json);
        let node = keyed::deserialize(&mut deserializer)?;
        deserializer.end()?;
        Ok(node)
    }
}

fn check_id(id: &str, location: &str) -> Result<()> {
    if id.is_empty() {
        return Err(DiscoveryError::collection_failure(format!(
            "empty resource id under '{location}'"
        )));
    }
    if id.contains(PATH_DELIMITER) {
        return Err(DiscoveryError::collection_failure(format!(
            "resource id '{id}' under '{location}' contains reserved delimiter '{PATH_DELIMITER}'"
        )));
    }
    Ok(())
}

struct Keyed<'a>(&'a ResourceNode);

impl Serialize for Keyed<'_> {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        keyed::serialize(self.0, serializer)
    }
}

/// (De)serialize a single node as a one-entry map keyed by its id
pub(crate) mod keyed {
    use super::{children_map, ResourceNode};
    use serde::de::Error as _;
    use serde::ser::SerializeMap;
    use serde::{Deserializer, Serializer};

    pub fn serialize<S: Serializer>(node: &ResourceNode, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(1))?;
        map.serialize_entry(&node.id, node)?;
        map.end()
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<ResourceNode, D::Error> {
        let mut nodes = children_map::deserialize(deserializer)?;
        match (nodes.pop(), nodes.is_empty()) {
            (Some(node), true) => Ok(node),
            (None, _) => Err(D::Error::custom("expected a single root node, found none")),
            (Some(_), false) => Err(D::Error::custom("expected a single root node, found several")),
        }
    }
}

/// (De)serialize an ordered child list as a map of id to node body
mod children_map {
    use super::ResourceNode;
    use serde::de::{MapAccess, Visitor};
    use serde::{Deserializer, Serializer};
    use std::fmt;

    pub fn serialize<S: Serializer>(children: &[ResourceNode], serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(children.iter().map(|child| (&child.id, child)))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<ResourceNode>, D::Error> {
        deserializer.deserialize_map(ChildrenVisitor)
    }

    struct ChildrenVisitor;

    impl<'de> Visitor<'de> for ChildrenVisitor {
        type Value = Vec<ResourceNode>;

        fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
            formatter.write_str("a map of resource id to resource node")
        }

        fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
            let mut children = Vec::with_capacity(map.size_hint().unwrap_or(0));
            while let Some((id, mut node)) = map.next_entry::<String, ResourceNode>()? {
                node.id = id;
                children.push(node);
            }
            Ok(children)
        }
    }
}
