//! Motor driver implementations
//!
//! The lock bolt is moved by a brushed DC motor behind an H-bridge: one
//! PWM channel sets the speed, one GPIO selects the direction.

pub mod h_bridge;

pub use h_bridge::{HBridgeMotor, REVERSAL_PAUSE_MS};
