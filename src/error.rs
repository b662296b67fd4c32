//! Error types for node health discovery.
//!
//! Every failure the core can report is a [`DiscoveryError`] variant carrying
//! enough context for the caller to render a one-line message. Nothing is
//! retried internally.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DiscoveryError {
    #[error("Node health generator is already busy processing a previous request (marker: {})", marker.display())]
    Busy { marker: PathBuf },

    #[error("Malformed resource path '{path}': empty segment at position {position}")]
    MalformedPath { path: String, position: usize },

    #[error("Resource path '{path}' not found: no '{segment}' at depth {depth}")]
    PathNotFound {
        segment: String,
        depth: usize,
        path: String,
    },

    #[error("Health collection failed: {0}")]
    CollectionFailure(String),

    #[error("Snapshot error: {0}")]
    Snapshot(String),

    #[error("Generation marker error: {0}")]
    Marker(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl DiscoveryError {
    /// Create a busy error for the marker at `marker`
    pub fn busy(marker: impl Into<PathBuf>) -> Self {
        Self::Busy {
            marker: marker.into(),
        }
    }

    /// Create a malformed path error
    pub fn malformed_path(path: impl Into<String>, position: usize) -> Self {
        Self::MalformedPath {
            path: path.into(),
            position,
        }
    }

    /// Create a path-not-found error. `depth` is the 1-based position of the
    /// unmatched segment.
    pub fn path_not_found(segment: impl Into<String>, depth: usize, path: impl Into<String>) -> Self {
        Self::PathNotFound {
            segment: segment.into(),
            depth,
            path: path.into(),
        }
    }

    /// Create a collection failure error
    pub fn collection_failure(message: impl Into<String>) -> Self {
        Self::CollectionFailure(message.into())
    }

    /// Create a configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration(message.into())
    }

    #[must_use]
    pub fn is_busy(&self) -> bool {
        matches!(self, Self::Busy { .. })
    }

    /// Whether the same call may succeed later without any change on the
    /// caller's side. Only a busy generator qualifies.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        self.is_busy()
    }
}

impl From<serde_json::Error> for DiscoveryError {
    fn from(error: serde_json::Error) -> Self {
        DiscoveryError::Serialization(error.to_string())
    }
}

impl From<config::ConfigError> for DiscoveryError {
    fn from(error: config::ConfigError) -> Self {
        DiscoveryError::Configuration(error.to_string())
    }
}

pub type Result<T> = std::result::Result<T, DiscoveryError>;
