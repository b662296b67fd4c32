// Generation lifecycle: Idle -> Processing -> Complete -> Processing ...
//
// The durable form of this state is the generation marker (see
// `crate::coordination`); these types name the states and the legal moves.

pub mod events;
pub mod states;

pub use events::{transition, GenerationEvent};
pub use states::GenerationState;
