#![allow(clippy::missing_errors_doc)] // Allow public functions without # Errors sections
#![allow(clippy::must_use_candidate)] // Allow methods without must_use when context is clear

//! # Node Health Discovery
//!
//! Builds the resource map of a storage-cluster node
//! (site → rack → node → subcomponents → hardware), caches it, and serves
//! health queries for any subtree addressed by a resource path.
//!
//! ## Architecture
//!
//! - **Generation** runs at most once at a time across every process on the
//!   node. Admission is decided by exclusively creating a marker file; the
//!   marker is released when the run ends, however it ends.
//! - **Collection** is an injected [`HealthCollector`]. The crate ships a
//!   configuration-driven [`TopologyCollector`] and a [`StaticCollector`];
//!   real hardware probes plug in behind the same trait.
//! - **Queries** resolve a `>`-delimited resource path against the last
//!   persisted snapshot, regenerating only when no snapshot exists or the
//!   caller bypasses the cache.
//!
//! ## Module Organization
//!
//! - [`generator`] - Generation lifecycle and health queries
//! - [`resource_path`] - Resource path parsing and resolution
//! - [`coordination`] - Cross-process generation marker
//! - [`cache`] - Persisted health snapshot
//! - [`collector`] - Collection capability and built-in collectors
//! - [`models`] - Resource tree and health records
//! - [`state_machine`] - Generation states and transitions
//! - [`config`] - Layered configuration
//! - [`error`] - Structured error handling
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use node_discovery::{DiscoveryConfig, NodeHealthGenerator};
//!
//! # async fn example() -> node_discovery::Result<()> {
//! let config = DiscoveryConfig::from_env()?;
//! let generator = NodeHealthGenerator::with_topology(&config);
//!
//! // Whole tree, from cache when available
//! let tree = generator.get_node_health_info("", true).await?;
//! println!("{tree}");
//! # Ok(())
//! # }
//! ```

pub mod cache;
pub mod collector;
pub mod config;
pub mod constants;
pub mod coordination;
pub mod error;
pub mod generator;
pub mod logging;
pub mod models;
pub mod resource_path;
pub mod state_machine;

pub use cache::SnapshotStore;
pub use collector::{HealthCollector, StaticCollector, TopologyCollector};
pub use config::DiscoveryConfig;
pub use coordination::{GenerationMarker, MarkerGuard};
pub use error::{DiscoveryError, Result};
pub use generator::{GenerationTicket, NodeHealthGenerator};
pub use models::{CachedHealthSnapshot, HealthInfo, HealthStatus, ResourceKind, ResourceNode};
pub use resource_path::ResourcePath;
pub use state_machine::GenerationState;
