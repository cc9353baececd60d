//! Input conditioning
//!
//! Turns noisy raw samples into clean events before they reach the door
//! state machine:
//!
//! - Debounced, once-per-press button events
//! - Tri-state joystick axes with a dead zone around a calibrated center
//! - Single-byte serial commands

pub mod command;
pub mod debounce;
pub mod joystick;

pub use command::Command;
pub use debounce::{ButtonEvent, Debouncer, RawButtons};
pub use joystick::{AxisCalibration, Horizontal, JoystickCalibration, JoystickVector, Vertical};
