//! Cross-process coordination for health generation.
//!
//! The generation marker is a file created with exclusive-create semantics;
//! its existence is the single durable signal that a generation is in flight.

pub mod marker;

pub use marker::{GenerationMarker, MarkerGuard, MarkerRecord};
