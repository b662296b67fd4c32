use super::states::GenerationState;
use crate::error::{DiscoveryError, Result};
use serde::{Deserialize, Serialize};

/// Events that move the generation lifecycle
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum GenerationEvent {
    /// A generate request was admitted and the marker acquired
    Accept,
    /// Collection finished and the snapshot was written
    Finish,
    /// Collection failed; the marker is released anyway
    Fail(String),
}

impl GenerationEvent {
    /// Get a string representation of the event type for logging
    pub fn event_type(&self) -> &'static str {
        match self {
            Self::Accept => "accept",
            Self::Finish => "finish",
            Self::Fail(_) => "fail",
        }
    }

    pub fn error_message(&self) -> Option<&str> {
        match self {
            Self::Fail(msg) => Some(msg),
            _ => None,
        }
    }
}

/// Compute the state reached by applying `event` in `state`.
///
/// `Accept` in `Processing` is the single-flight violation and yields the
/// same busy error callers see.
pub fn transition(
    state: GenerationState,
    event: &GenerationEvent,
    marker: &std::path::Path,
) -> Result<GenerationState> {
    match (state, event) {
        (GenerationState::Processing, GenerationEvent::Accept) => Err(DiscoveryError::busy(marker)),
        (_, GenerationEvent::Accept) => Ok(GenerationState::Processing),
        (GenerationState::Processing, GenerationEvent::Finish | GenerationEvent::Fail(_)) => {
            Ok(GenerationState::Complete)
        }
        (from, event) => Err(DiscoveryError::Marker(format!(
            "cannot apply '{}' while {from}",
            event.event_type()
        ))),
    }
}
