//! Timed grab sequence engine
//!
//! The grab routines are scripts of timed actions executed by a
//! tick-driven executor instead of a chain of blocking delays.

pub mod executor;
pub mod script;

pub use executor::{ExecutionPhase, SequenceExecutor};
pub use script::{approach_grab, grab_and_retreat, Action, Script, MAX_ACTIONS};
