//! Hardware abstraction traits
//!
//! These traits define the interface between the application logic
//! and hardware-specific implementations.

pub mod display;
pub mod indicator;
pub mod motor;
pub mod sensor;
pub mod tone;

pub use display::{Color, DisplayDriver, DisplayError, DisplayExt};
pub use indicator::{Indicator, IndicatorOutput};
pub use motor::{Direction, MotorDriver, MotorError};
pub use sensor::{ClimateSensor, SensorError, SensorReading};
pub use tone::ToneOutput;
