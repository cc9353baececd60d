//! Door state machine
//!
//! Defines the authoritative runtime behavior of the lock.
//! The state machine is explicit, finite, and deterministic.

pub mod countdown;
pub mod events;
pub mod machine;

pub use countdown::{Countdown, Window};
pub use events::{Cause, DoorEvent, Event};
pub use machine::DoorState;
