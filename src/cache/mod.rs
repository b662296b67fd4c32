//! Durable storage for the last generated health snapshot.

pub mod snapshot_store;

pub use snapshot_store::SnapshotStore;
