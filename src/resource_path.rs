//! # Resource-Path Resolver
//!
//! A resource path addresses a node in the health tree relative to its root,
//! e.g. `site_001>rack_001>node_001>sm_001`. The empty path addresses the
//! root itself. `>` is reserved and has no escape.

use crate::constants::PATH_DELIMITER;
use crate::error::{DiscoveryError, Result};
use crate::models::ResourceNode;
use std::fmt;
use std::str::FromStr;

/// Ordered id segments from the root to the target node
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct ResourcePath {
    segments: Vec<String>,
}

impl ResourcePath {
    /// The empty path, addressing the whole tree
    pub fn root() -> Self {
        Self::default()
    }

    /// Parse a delimited path. Every segment must be non-empty unless the
    /// whole string is empty.
    pub fn parse(raw: &str) -> Result<Self> {
        if raw.is_empty() {
            return Ok(Self::root());
        }

        let segments = raw
            .split(PATH_DELIMITER)
            .enumerate()
            .map(|(position, segment)| {
                if segment.is_empty() {
                    Err(DiscoveryError::malformed_path(raw, position))
                } else {
                    Ok(segment.to_string())
                }
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self { segments })
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn depth(&self) -> usize {
        self.segments.len()
    }

    /// Extend the path by one segment
    pub fn join(&self, segment: impl Into<String>) -> Self {
        let mut segments = self.segments.clone();
        segments.push(segment.into());
        Self { segments }
    }

    /// Walk `root` one segment at a time, matching child ids exactly.
    ///
    /// Fails on the first segment without a matching child, reporting that
    /// segment and its 1-based depth.
    pub fn resolve<'a>(&self, root: &'a ResourceNode) -> Result<&'a ResourceNode> {
        let mut current = root;
        for (index, segment) in self.segments.iter().enumerate() {
            current = current.child(segment).ok_or_else(|| {
                DiscoveryError::path_not_found(segment.as_str(), index + 1, self.to_string())
            })?;
        }
        Ok(current)
    }
}

impl fmt::Display for ResourcePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, segment) in self.segments.iter().enumerate() {
            if index > 0 {
                write!(f, "{PATH_DELIMITER}")?;
            }
            f.write_str(segment)?;
        }
        Ok(())
    }
}

impl FromStr for ResourcePath {
    type Err = DiscoveryError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

/// Convenience wrapper: parse `raw` and resolve it against `root`
pub fn resolve<'a>(root: &'a ResourceNode, raw: &str) -> Result<&'a ResourceNode> {
    ResourcePath::parse(raw)?.resolve(root)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{HealthInfo, ResourceKind};

    fn tree() -> ResourceNode {
        ResourceNode::new("no-cluster", ResourceKind::Cluster, HealthInfo::unknown()).with_child(
            ResourceNode::new("site_001", ResourceKind::Site, HealthInfo::unknown()).with_child(
                ResourceNode::new("rack_001", ResourceKind::Rack, HealthInfo::unknown()),
            ),
        )
    }

    #[test]
    fn test_parse_splits_on_delimiter() {
        let path = ResourcePath::parse("a>b>c").unwrap();
        assert_eq!(path.segments(), ["a", "b", "c"]);
        assert_eq!(path.depth(), 3);
        assert_eq!(path.to_string(), "a>b>c");
    }

    #[test]
    fn test_parse_empty_is_root() {
        let path = ResourcePath::parse("").unwrap();
        assert!(path.is_root());
        assert_eq!(path, ResourcePath::root());
    }

    #[test]
    fn test_parse_rejects_empty_segments() {
        for raw in ["a>>b", ">a", "a>", ">"] {
            let err = ResourcePath::parse(raw).unwrap_err();
            assert!(
                matches!(err, DiscoveryError::MalformedPath { .. }),
                "expected MalformedPath for {raw:?}, got {err:?}"
            );
        }

        match ResourcePath::parse("a>>b").unwrap_err() {
            DiscoveryError::MalformedPath { position, .. } => assert_eq!(position, 1),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_resolve_empty_path_returns_root() {
        let root = tree();
        let node = ResourcePath::root().resolve(&root).unwrap();
        assert!(std::ptr::eq(node, &root));
    }

    #[test]
    fn test_resolve_nested_node() {
        let root = tree();
        let node = resolve(&root, "site_001>rack_001").unwrap();
        assert_eq!(node.id, "rack_001");
        assert_eq!(node.kind, ResourceKind::Rack);
    }

    #[test]
    fn test_resolve_reports_failing_segment_and_depth() {
        let root = tree();
        match resolve(&root, "site_001>rack_999").unwrap_err() {
            DiscoveryError::PathNotFound {
                segment,
                depth,
                path,
            } => {
                assert_eq!(segment, "rack_999");
                assert_eq!(depth, 2);
                assert_eq!(path, "site_001>rack_999");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_resolve_is_case_sensitive() {
        let root = tree();
        assert!(resolve(&root, "SITE_001").is_err());
    }

    #[test]
    fn test_join_extends_path() {
        let path = ResourcePath::parse("site_001").unwrap().join("rack_001");
        assert_eq!(path.to_string(), "site_001>rack_001");
    }
}
