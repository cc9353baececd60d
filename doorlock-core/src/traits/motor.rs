//! Motor driver trait
//!
//! The door motor is a brushed DC motor behind an H-bridge: one PWM line
//! for speed and one direction line. Speed is expressed in percent of
//! full duty cycle.

/// Rotation direction of the door motor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Direction {
    /// Unlocking travel
    #[default]
    Forward,
    /// Locking travel
    Backward,
}

/// Errors that can occur with motor operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MotorError {
    /// Invalid speed value (above 100%)
    InvalidSpeed,
    /// PWM output rejected the duty cycle
    Pwm,
    /// Direction pin could not be driven
    DirectionPin,
}

/// Trait for the door motor
///
/// Drivers only apply a new command when it differs from the current one;
/// repeating `drive_forward(30)` while already running forward at 30% is
/// a no-op.
pub trait MotorDriver {
    /// Run the motor in the opening direction
    fn drive_forward(&mut self, speed_percent: u8) -> Result<(), MotorError>;

    /// Run the motor in the closing direction
    fn drive_backward(&mut self, speed_percent: u8) -> Result<(), MotorError>;

    /// Cut drive power (the motor coasts to a stop)
    fn stop(&mut self) -> Result<(), MotorError>;

    /// Get the last commanded direction
    fn direction(&self) -> Direction;

    /// Get the current commanded speed percentage
    fn speed(&self) -> u8;
}
