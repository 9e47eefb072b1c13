//! Frame relay
//!
//! Hands the newest decoded frame from a producer thread to a render
//! consumer that samples on its own schedule.
//!
//! Key properties:
//! - Producer and consumer never wait on each other (atomic pointer swap)
//! - Only the latest frame survives; each one is converted at most once
//! - Conversion to the consumer's size, layout and orientation happens on
//!   read, into a reusable scratch buffer

pub mod clock;
pub mod config;
pub mod frame_slot;
pub mod observer;
pub mod relay;
pub mod scratch;

pub use clock::*;
pub use config::*;
pub use frame_slot::*;
pub use observer::*;
pub use relay::*;
pub use scratch::*;
