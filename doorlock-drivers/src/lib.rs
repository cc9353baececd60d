//! Hardware driver implementations
//!
//! This crate provides concrete implementations of the traits defined
//! in doorlock-core for the lock hardware:
//!
//! - H-bridge DC motor (PWM speed + direction pin)
//! - DHT22 temperature/humidity sensor
//! - SSD1306 OLED status display

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod display;
pub mod motor;
pub mod sensor;
