use crate::error::{DiscoveryError, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs::{self, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};
use uuid::Uuid;

/// Diagnostics written into the marker by its holder
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarkerRecord {
    pub generation_id: Uuid,
    pub pid: u32,
    pub acquired_at: DateTime<Utc>,
}

/// Single-flight lock backed by an exclusively created file.
///
/// A marker left behind by a crashed process keeps reporting `Processing`
/// until an operator calls [`GenerationMarker::force_clear`].
#[derive(Debug, Clone)]
pub struct GenerationMarker {
    path: PathBuf,
}

impl GenerationMarker {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Whether any process currently holds the marker
    pub fn is_held(&self) -> bool {
        self.path.exists()
    }

    /// Atomically create the marker, failing with `Busy` if it already exists
    pub fn try_acquire(&self, generation_id: Uuid) -> Result<MarkerGuard> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent).map_err(|e| {
                    DiscoveryError::Marker(format!(
                        "Failed to create marker directory {}: {e}",
                        parent.display()
                    ))
                })?;
            }
        }

        let mut file = match OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&self.path)
        {
            Ok(file) => file,
            Err(e) if e.kind() == ErrorKind::AlreadyExists => {
                debug!(
                    marker = %self.path.display(),
                    holder = ?self.holder(),
                    "Generation marker already held"
                );
                return Err(DiscoveryError::busy(&self.path));
            }
            Err(e) => {
                return Err(DiscoveryError::Marker(format!(
                    "Failed to create marker {}: {e}",
                    self.path.display()
                )))
            }
        };

        let record = MarkerRecord {
            generation_id,
            pid: std::process::id(),
            acquired_at: Utc::now(),
        };
        let written = serde_json::to_vec(&record)
            .map_err(DiscoveryError::from)
            .and_then(|body| {
                file.write_all(&body)
                    .and_then(|()| file.sync_all())
                    .map_err(|e| {
                        DiscoveryError::Marker(format!(
                            "Failed to write marker {}: {e}",
                            self.path.display()
                        ))
                    })
            });
        if let Err(e) = written {
            // The marker was created by this call, so it is ours to remove
            if let Err(remove_err) = fs::remove_file(&self.path) {
                warn!(marker = %self.path.display(), error = %remove_err, "Failed to remove partial marker");
            }
            return Err(e);
        }

        let guard = MarkerGuard {
            path: self.path.clone(),
            record,
            released: false,
        };

        debug!(
            marker = %self.path.display(),
            generation_id = %generation_id,
            "Generation marker acquired"
        );
        Ok(guard)
    }

    /// Read the holder record, if the marker exists and is readable
    pub fn holder(&self) -> Option<MarkerRecord> {
        let body = fs::read(&self.path).ok()?;
        serde_json::from_slice(&body).ok()
    }

    /// Remove a marker regardless of who holds it. Returns whether a marker
    /// was present. Intended for operators clearing a stale marker.
    pub fn force_clear(&self) -> Result<bool> {
        match fs::remove_file(&self.path) {
            Ok(()) => {
                warn!(marker = %self.path.display(), "Generation marker force-cleared");
                Ok(true)
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
            Err(e) => Err(DiscoveryError::Marker(format!(
                "Failed to remove marker {}: {e}",
                self.path.display()
            ))),
        }
    }
}

/// Scoped ownership of the generation marker. Dropping the guard removes the
/// marker, so release happens on every exit path including panics.
#[derive(Debug)]
pub struct MarkerGuard {
    path: PathBuf,
    record: MarkerRecord,
    released: bool,
}

impl MarkerGuard {
    pub fn record(&self) -> &MarkerRecord {
        &self.record
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Release explicitly, reporting a removal failure instead of logging it
    pub fn release(mut self) -> Result<()> {
        self.released = true;
        self.remove_if_owned()
    }

    /// Remove the marker only while it still carries this guard's record.
    /// After a `force_clear` another run may hold a fresh marker at the same
    /// path; that one is left alone.
    fn remove_if_owned(&self) -> Result<()> {
        let marker = GenerationMarker::new(&self.path);
        match marker.holder() {
            Some(holder) if holder.generation_id == self.record.generation_id => {}
            Some(holder) => {
                warn!(
                    marker = %self.path.display(),
                    generation_id = %self.record.generation_id,
                    holder = %holder.generation_id,
                    "Generation marker now held by another run, not releasing"
                );
                return Ok(());
            }
            None if marker.is_held() => {
                warn!(
                    marker = %self.path.display(),
                    generation_id = %self.record.generation_id,
                    "Generation marker replaced by an unreadable one, not releasing"
                );
                return Ok(());
            }
            None => {
                warn!(marker = %self.path.display(), "Generation marker vanished before release");
                return Ok(());
            }
        }

        match fs::remove_file(&self.path) {
            Ok(()) => {
                info!(marker = %self.path.display(), "Generation marker released");
                Ok(())
            }
            Err(e) if e.kind() == ErrorKind::NotFound => {
                warn!(marker = %self.path.display(), "Generation marker vanished before release");
                Ok(())
            }
            Err(e) => Err(DiscoveryError::Marker(format!(
                "Failed to remove marker {}: {e}",
                self.path.display()
            ))),
        }
    }
}

impl Drop for MarkerGuard {
    fn drop(&mut self) {
        if self.released {
            return;
        }
        if let Err(e) = self.remove_if_owned() {
            warn!(marker = %self.path.display(), error = %e, "Failed to release generation marker");
        }
    }
}
