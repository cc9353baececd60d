//! Embassy task definitions
//!
//! Each task runs independently and communicates via channels.

pub mod controller;
pub mod joystick;
pub mod serial_rx;
pub mod tick;

pub use controller::controller_task;
pub use joystick::joystick_task;
pub use serial_rx::serial_rx_task;
pub use tick::{countdown_tick_task, sensor_tick_task};
