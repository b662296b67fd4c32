//! # Node Health Generator
//!
//! Owns the generation lifecycle and answers health queries against the
//! persisted snapshot.
//!
//! A generation is admitted only if it can create the generation marker.
//! The collection then runs as a background task holding a [`MarkerGuard`],
//! so the marker is released whether collection succeeds, fails, or panics.
//!
//! ```rust,no_run
//! use node_discovery::{DiscoveryConfig, NodeHealthGenerator};
//!
//! # async fn example() -> node_discovery::Result<()> {
//! let config = DiscoveryConfig::from_env()?;
//! let generator = NodeHealthGenerator::with_topology(&config);
//!
//! let rack = generator
//!     .get_node_health_info("site_001>rack_001", true)
//!     .await?;
//! println!("{rack}");
//! # Ok(())
//! # }
//! ```

use crate::cache::SnapshotStore;
use crate::collector::{HealthCollector, TopologyCollector};
use crate::config::DiscoveryConfig;
use crate::coordination::{GenerationMarker, MarkerGuard};
use crate::error::{DiscoveryError, Result};
use crate::logging::{log_error, log_generation_operation};
use crate::models::CachedHealthSnapshot;
use crate::resource_path::ResourcePath;
use crate::state_machine::{transition, GenerationEvent, GenerationState};
use std::sync::Arc;
use std::time::Instant;
use tokio::task::JoinHandle;
use tracing::{debug, info};
use uuid::Uuid;

/// Handle on an admitted generation run
#[derive(Debug)]
pub struct GenerationTicket {
    generation_id: Uuid,
    handle: JoinHandle<Result<CachedHealthSnapshot>>,
}

impl GenerationTicket {
    pub fn generation_id(&self) -> Uuid {
        self.generation_id
    }

    /// State acknowledged at admission time
    pub fn state(&self) -> GenerationState {
        GenerationState::Processing
    }

    /// Wait for the run to finish and return the snapshot it stored
    pub async fn wait(self) -> Result<CachedHealthSnapshot> {
        self.handle.await.map_err(|e| {
            DiscoveryError::collection_failure(format!(
                "generation {} did not complete: {e}",
                self.generation_id
            ))
        })?
    }
}

pub struct NodeHealthGenerator {
    marker: GenerationMarker,
    snapshots: SnapshotStore,
    collector: Arc<dyn HealthCollector>,
}

impl NodeHealthGenerator {
    pub fn new(config: &DiscoveryConfig, collector: Arc<dyn HealthCollector>) -> Self {
        Self {
            marker: GenerationMarker::new(&config.marker_path),
            snapshots: SnapshotStore::new(&config.snapshot_path),
            collector,
        }
    }

    /// Generator backed by the configuration-driven [`TopologyCollector`]
    pub fn with_topology(config: &DiscoveryConfig) -> Self {
        Self::new(config, Arc::new(TopologyCollector::from_config(config)))
    }

    pub fn marker(&self) -> &GenerationMarker {
        &self.marker
    }

    pub fn snapshots(&self) -> &SnapshotStore {
        &self.snapshots
    }

    /// `Processing` while any process holds the marker, `Complete` otherwise
    pub fn get_status(&self) -> GenerationState {
        GenerationState::from_marker(self.marker.is_held())
    }

    /// Admit a generation and start it in the background.
    ///
    /// Fails with `Busy` without side effects if a generation is in flight.
    /// Must be called from within a tokio runtime.
    pub async fn start_generation(&self) -> Result<GenerationTicket> {
        let generation_id = Uuid::new_v4();

        // Cheap read first; the exclusive create below is what actually
        // enforces single-flight.
        let state = transition(
            self.get_status(),
            &GenerationEvent::Accept,
            self.marker.path(),
        )?;
        let guard = self.marker.try_acquire(generation_id)?;

        log_generation_operation(
            "accept",
            Some(&generation_id.to_string()),
            &state.to_string(),
            Some(self.collector.name()),
        );

        let collector = Arc::clone(&self.collector);
        let snapshots = self.snapshots.clone();
        let handle = tokio::spawn(run_generation(guard, collector, snapshots));

        Ok(GenerationTicket {
            generation_id,
            handle,
        })
    }

    /// Accept a generation request and return the acknowledgment without
    /// waiting. Poll [`Self::get_status`] to learn when it finished.
    pub async fn generate(&self) -> Result<GenerationState> {
        let ticket = self.start_generation().await?;
        Ok(ticket.state())
    }

    /// The persisted snapshot, if any generation ever completed
    pub async fn cached_snapshot(&self) -> Result<Option<CachedHealthSnapshot>> {
        self.snapshots.load().await
    }

    /// Health of the subtree at `rpath` as pretty JSON keyed by node id.
    ///
    /// With `use_cache` the persisted snapshot is used and generation only runs
    /// when none exists. Without it a fresh generation runs first, which fails
    /// with `Busy` if another one is in flight. An empty `rpath` returns the
    /// whole tree.
    pub async fn get_node_health_info(&self, rpath: &str, use_cache: bool) -> Result<String> {
        let path = ResourcePath::parse(rpath)?;
        let snapshot = self.snapshot_for_query(use_cache).await?;

        let node = path.resolve(&snapshot.root)?;
        debug!(
            rpath = %path,
            node = %node.id,
            generation_id = %snapshot.generation_id,
            "Resolved health query"
        );
        node.to_health_json()
    }

    async fn snapshot_for_query(&self, use_cache: bool) -> Result<CachedHealthSnapshot> {
        if !use_cache {
            info!("Cache bypassed, generating fresh node health");
            return self.start_generation().await?.wait().await;
        }

        match self.snapshots.load().await? {
            Some(snapshot) => Ok(snapshot),
            None => {
                info!(
                    snapshot = %self.snapshots.path().display(),
                    "No cached node health, generating"
                );
                self.start_generation().await?.wait().await
            }
        }
    }
}

async fn run_generation(
    guard: MarkerGuard,
    collector: Arc<dyn HealthCollector>,
    snapshots: SnapshotStore,
) -> Result<CachedHealthSnapshot> {
    let generation_id = guard.record().generation_id;
    let marker_path = guard.path().to_path_buf();
    let started = Instant::now();

    let outcome: Result<CachedHealthSnapshot> = async {
        let root = collector.collect().await.map_err(|e| match e {
            DiscoveryError::CollectionFailure(_) => e,
            other => DiscoveryError::collection_failure(other.to_string()),
        })?;
        root.validate()?;
        let snapshot = CachedHealthSnapshot::new(generation_id, root);
        snapshots.store(&snapshot).await?;
        Ok(snapshot)
    }
    .await;

    let event = match &outcome {
        Ok(_) => GenerationEvent::Finish,
        Err(e) => GenerationEvent::Fail(e.to_string()),
    };
    let released = guard.release();
    let state = transition(GenerationState::Processing, &event, &marker_path)?;

    let generation_id = generation_id.to_string();
    let duration = format!("{}ms", started.elapsed().as_millis());
    match event.error_message() {
        None => log_generation_operation(
            event.event_type(),
            Some(&generation_id),
            &state.to_string(),
            Some(&duration),
        ),
        Some(message) => log_error("generator", event.event_type(), message, Some(&generation_id)),
    }

    let snapshot = outcome?;
    released?;
    Ok(snapshot)
}
