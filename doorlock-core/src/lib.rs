//! Board-agnostic core logic for the doorlock firmware
//!
//! This crate contains all application logic that does not depend on
//! specific hardware implementations:
//!
//! - Hardware abstraction traits (motor, display, tone, indicator, sensor)
//! - Input conditioning (button debouncing, joystick dead zone, serial commands)
//! - Password entry sub-mode
//! - Door state machine and the controller that drives it
//! - Status presenter
//! - Configuration type definitions and parser

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod climate;
pub mod config;
pub mod controller;
pub mod input;
pub mod melody;
pub mod password;
pub mod presenter;
pub mod state;
pub mod traits;

#[cfg(test)]
pub(crate) mod testing;

pub use controller::DoorController;
pub use state::DoorState;
