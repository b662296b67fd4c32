use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifecycle of the node health generation, shared by every process on the
/// node through the generation marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GenerationState {
    /// No generation has run in this process yet
    Idle,
    /// A generation holds the marker
    Processing,
    /// The last generation finished and released the marker
    Complete,
}

impl GenerationState {
    /// Only `Processing` blocks a new generation. `Idle` and `Complete` are
    /// equivalent for admission.
    pub fn is_busy(&self) -> bool {
        matches!(self, Self::Processing)
    }

    /// State as observed through the marker alone
    pub fn from_marker(held: bool) -> Self {
        if held {
            Self::Processing
        } else {
            Self::Complete
        }
    }
}

impl fmt::Display for GenerationState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Idle => write!(f, "idle"),
            Self::Processing => write!(f, "processing"),
            Self::Complete => write!(f, "complete"),
        }
    }
}

impl std::str::FromStr for GenerationState {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "idle" => Ok(Self::Idle),
            "processing" => Ok(Self::Processing),
            "complete" => Ok(Self::Complete),
            _ => Err(format!("Invalid generation state: {s}")),
        }
    }
}

impl Default for GenerationState {
    fn default() -> Self {
        Self::Idle
    }
}
