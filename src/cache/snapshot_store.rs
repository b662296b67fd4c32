use crate::error::{DiscoveryError, Result};
use crate::models::CachedHealthSnapshot;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Reads and replaces the persisted [`CachedHealthSnapshot`].
///
/// Snapshots are written whole to a sibling temp file and renamed into place,
/// so a reader sees either the previous snapshot or the new one.
#[derive(Debug, Clone)]
pub struct SnapshotStore {
    path: PathBuf,
}

impl SnapshotStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub async fn exists(&self) -> bool {
        tokio::fs::try_exists(&self.path).await.unwrap_or(false)
    }

    /// Load the snapshot; `None` when nothing has been generated yet
    pub async fn load(&self) -> Result<Option<CachedHealthSnapshot>> {
        let content = match tokio::fs::read_to_string(&self.path).await {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(snapshot = %self.path.display(), "No cached health snapshot");
                return Ok(None);
            }
            Err(e) => {
                return Err(DiscoveryError::Snapshot(format!(
                    "Failed to read snapshot {}: {e}",
                    self.path.display()
                )))
            }
        };

        let snapshot: CachedHealthSnapshot = serde_json::from_str(&content).map_err(|e| {
            DiscoveryError::Snapshot(format!(
                "Corrupt snapshot {}: {e}",
                self.path.display()
            ))
        })?;

        debug!(
            snapshot = %self.path.display(),
            generation_id = %snapshot.generation_id,
            generated_at = %snapshot.generated_at,
            "Loaded cached health snapshot"
        );
        Ok(Some(snapshot))
    }

    /// Replace the persisted snapshot atomically
    pub async fn store(&self, snapshot: &CachedHealthSnapshot) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await.map_err(|e| {
                    DiscoveryError::Snapshot(format!(
                        "Failed to create snapshot directory {}: {e}",
                        parent.display()
                    ))
                })?;
            }
        }

        let content = serde_json::to_string_pretty(snapshot)?;
        let temp_path = self.temp_path();

        tokio::fs::write(&temp_path, content).await.map_err(|e| {
            DiscoveryError::Snapshot(format!(
                "Failed to write temp snapshot {}: {e}",
                temp_path.display()
            ))
        })?;

        if let Err(e) = tokio::fs::rename(&temp_path, &self.path).await {
            let _ = tokio::fs::remove_file(&temp_path).await;
            return Err(DiscoveryError::Snapshot(format!(
                "Failed to rename {} to {}: {e}",
                temp_path.display(),
                self.path.display()
            )));
        }

        info!(
            snapshot = %self.path.display(),
            generation_id = %snapshot.generation_id,
            nodes = snapshot.root.node_count(),
            "Stored health snapshot"
        );
        Ok(())
    }

    // Unique per writer so two processes never share a temp file
    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(format!(".{}.tmp", std::process::id()));
        self.path.with_file_name(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{HealthInfo, HealthStatus, ResourceKind, ResourceNode};
    use uuid::Uuid;

    fn snapshot(status: HealthStatus) -> CachedHealthSnapshot {
        let root = ResourceNode::new("no-cluster", ResourceKind::Cluster, HealthInfo::new(status))
            .with_child(ResourceNode::new("site_001", ResourceKind::Site, HealthInfo::new(status)));
        CachedHealthSnapshot::new(Uuid::new_v4(), root)
    }

    #[tokio::test]
    async fn test_load_missing_snapshot_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let store = SnapshotStore::new(dir.path().join("health.json"));
        assert!(store.load().await.unwrap().is_none());
        assert!(!store.exists().await);
    }

    #[tokio::test]
    async fn test_store_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let store = SnapshotStore::new(dir.path().join("nested/health.json"));
        let original = snapshot(HealthStatus::Ok);

        store.store(&original).await.unwrap();
        let loaded = store.load().await.unwrap().unwrap();
        assert_eq!(loaded, original);

        let leftovers: Vec<_> = std::fs::read_dir(dir.path().join("nested"))
            .unwrap()
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.file_name().to_string_lossy().ends_with(".tmp"))
            .collect();
        assert!(leftovers.is_empty());
    }

    #[tokio::test]
    async fn test_store_overwrites_wholesale() {
        let dir = tempfile::tempdir().unwrap();
        let store = SnapshotStore::new(dir.path().join("health.json"));

        store.store(&snapshot(HealthStatus::Ok)).await.unwrap();
        let newer = snapshot(HealthStatus::Fault);
        store.store(&newer).await.unwrap();

        let loaded = store.load().await.unwrap().unwrap();
        assert_eq!(loaded.generation_id, newer.generation_id);
        assert_eq!(loaded.root.health.status, HealthStatus::Fault);
    }

    #[tokio::test]
    async fn test_corrupt_snapshot_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("health.json");
        std::fs::write(&path, "{ not json").unwrap();

        let err = SnapshotStore::new(path).load().await.unwrap_err();
        assert!(matches!(err, DiscoveryError::Snapshot(_)));
    }
}
