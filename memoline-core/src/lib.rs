//! Spaced-repetition scheduling for karaoke lines and study cards.
//!
//! The engine is pure: callers pass the previous [`Card`], a [`Rating`] and
//! the current time in epoch seconds, and get a new `Card` back.

pub mod codec;
pub mod errors;
pub mod math;
pub mod models;
pub mod params;
pub mod scheduler;
pub mod stats;

pub use codec::*;
pub use errors::*;
pub use models::*;
pub use params::*;
pub use scheduler::*;
pub use stats::*;
