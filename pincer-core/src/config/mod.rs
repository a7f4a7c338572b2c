//! Configuration types
//!
//! Board-agnostic configuration structures. The firmware compiles its
//! values in; the serde feature allows sending them over the link.

pub mod types;

pub use types::*;
