//! DC motor driver for an H-bridge with PWM speed control
//!
//! This driver provides:
//! - PWM duty cycle control (0-100%)
//! - Direction control through a single H-bridge input
//! - A short coast pause whenever the direction flips, even from a stop
//!
//! Repeating the command the motor is already executing does nothing, so
//! callers can re-issue it freely.
//!
//! # Usage
//!
//! ```ignore
//! let mut motor = HBridgeMotor::new(pwm, dir_pin, Delay)?;
//! motor.drive_forward(30)?;
//! // ...
//! motor.stop()?;
//! ```

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{OutputPin, PinState};
use embedded_hal::pwm::SetDutyCycle;

use doorlock_core::traits::{Direction, MotorDriver, MotorError};

/// Time the bridge is left unpowered before the direction flips
pub const REVERSAL_PAUSE_MS: u32 = 25;

/// H-bridge DC motor
pub struct HBridgeMotor<P, D, W> {
    pwm: P,
    dir_pin: D,
    delay: W,
    direction: Direction,
    speed: u8,
}

impl<P, D, W> HBridgeMotor<P, D, W>
where
    P: SetDutyCycle,
    D: OutputPin,
    W: DelayNs,
{
    /// Create the driver with the motor stopped and set to forward
    pub fn new(pwm: P, dir_pin: D, delay: W) -> Result<Self, MotorError> {
        let mut motor = Self {
            pwm,
            dir_pin,
            delay,
            direction: Direction::Forward,
            speed: 0,
        };
        motor.apply_duty(0)?;
        motor.apply_direction(Direction::Forward)?;
        Ok(motor)
    }

    fn apply_duty(&mut self, percent: u8) -> Result<(), MotorError> {
        self.pwm
            .set_duty_cycle_percent(percent)
            .map_err(|_| MotorError::Pwm)
    }

    fn apply_direction(&mut self, dir: Direction) -> Result<(), MotorError> {
        // Forward drives the direction input high
        let state = PinState::from(dir == Direction::Forward);
        self.dir_pin
            .set_state(state)
            .map_err(|_| MotorError::DirectionPin)
    }

    fn run(&mut self, dir: Direction, speed_percent: u8) -> Result<(), MotorError> {
        if speed_percent > 100 {
            return Err(MotorError::InvalidSpeed);
        }
        if self.direction == dir && self.speed == speed_percent {
            return Ok(());
        }

        if self.direction != dir {
            self.apply_duty(0)?;
            self.speed = 0;
            self.delay.delay_ms(REVERSAL_PAUSE_MS);
        }

        self.apply_direction(dir)?;
        self.direction = dir;
        self.apply_duty(speed_percent)?;
        self.speed = speed_percent;
        Ok(())
    }
}

impl<P, D, W> MotorDriver for HBridgeMotor<P, D, W>
where
    P: SetDutyCycle,
    D: OutputPin,
    W: DelayNs,
{
    fn drive_forward(&mut self, speed_percent: u8) -> Result<(), MotorError> {
        self.run(Direction::Forward, speed_percent)
    }

    fn drive_backward(&mut self, speed_percent: u8) -> Result<(), MotorError> {
        self.run(Direction::Backward, speed_percent)
    }

    fn stop(&mut self) -> Result<(), MotorError> {
        self.apply_duty(0)?;
        self.speed = 0;
        Ok(())
    }

    fn direction(&self) -> Direction {
        self.direction
    }

    fn speed(&self) -> u8 {
        self.speed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::convert::Infallible;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Op {
        Duty(u16),
        Dir(bool),
        Pause(u32),
    }

    type Log = Rc<RefCell<Vec<Op>>>;

    struct FakePwm(Log);
    struct FakePin(Log);
    struct FakeDelay(Log);

    impl embedded_hal::pwm::ErrorType for FakePwm {
        type Error = Infallible;
    }

    impl SetDutyCycle for FakePwm {
        fn max_duty_cycle(&self) -> u16 {
            1000
        }

        fn set_duty_cycle(&mut self, duty: u16) -> Result<(), Self::Error> {
            self.0.borrow_mut().push(Op::Duty(duty));
            Ok(())
        }
    }

    impl embedded_hal::digital::ErrorType for FakePin {
        type Error = Infallible;
    }

    impl OutputPin for FakePin {
        fn set_low(&mut self) -> Result<(), Self::Error> {
            self.0.borrow_mut().push(Op::Dir(false));
            Ok(())
        }

        fn set_high(&mut self) -> Result<(), Self::Error> {
            self.0.borrow_mut().push(Op::Dir(true));
            Ok(())
        }
    }

    impl DelayNs for FakeDelay {
        fn delay_ns(&mut self, ns: u32) {
            self.0.borrow_mut().push(Op::Pause(ns / 1_000_000));
        }

        fn delay_ms(&mut self, ms: u32) {
            self.0.borrow_mut().push(Op::Pause(ms));
        }
    }

    fn motor() -> (HBridgeMotor<FakePwm, FakePin, FakeDelay>, Log) {
        let log: Log = Rc::new(RefCell::new(Vec::new()));
        let motor = HBridgeMotor::new(
            FakePwm(log.clone()),
            FakePin(log.clone()),
            FakeDelay(log.clone()),
        )
        .unwrap();
        log.borrow_mut().clear();
        (motor, log)
    }

    #[test]
    fn test_initial_state() {
        let (motor, _) = motor();
        assert_eq!(motor.speed(), 0);
        assert_eq!(motor.direction(), Direction::Forward);
        assert_eq!(motor.speed(), 0);
    }

    #[test]
    fn test_forward_sets_direction_then_duty() {
        let (mut motor, log) = motor();
        motor.drive_forward(30).unwrap();

        assert_eq!(*log.borrow(), vec![Op::Dir(true), Op::Duty(300)]);
        assert_eq!(motor.speed(), 30);
    }

    #[test]
    fn test_repeated_command_is_noop() {
        let (mut motor, log) = motor();
        motor.drive_forward(30).unwrap();
        log.borrow_mut().clear();

        motor.drive_forward(30).unwrap();
        assert!(log.borrow().is_empty());

        // A new speed in the same direction is applied without a pause
        motor.drive_forward(50).unwrap();
        assert_eq!(*log.borrow(), vec![Op::Dir(true), Op::Duty(500)]);
    }

    #[test]
    fn test_reversal_pauses_first() {
        let (mut motor, log) = motor();
        motor.drive_forward(30).unwrap();
        log.borrow_mut().clear();

        motor.drive_backward(30).unwrap();
        assert_eq!(
            *log.borrow(),
            vec![
                Op::Duty(0),
                Op::Pause(REVERSAL_PAUSE_MS),
                Op::Dir(false),
                Op::Duty(300)
            ]
        );
        assert_eq!(motor.direction(), Direction::Backward);
    }

    #[test]
    fn test_reversal_from_stop_still_pauses() {
        // Opened then Closing: stop, then run backward
        let (mut motor, log) = motor();
        motor.drive_forward(30).unwrap();
        motor.stop().unwrap();
        log.borrow_mut().clear();

        motor.drive_backward(30).unwrap();
        assert_eq!(
            *log.borrow(),
            vec![
                Op::Duty(0),
                Op::Pause(REVERSAL_PAUSE_MS),
                Op::Dir(false),
                Op::Duty(300)
            ]
        );
    }

    #[test]
    fn test_stop() {
        let (mut motor, log) = motor();
        motor.drive_backward(30).unwrap();
        motor.stop().unwrap();

        assert_eq!(log.borrow().last(), Some(&Op::Duty(0)));
        assert_eq!(motor.speed(), 0);
        // Direction is remembered across stops
        assert_eq!(motor.direction(), Direction::Backward);
    }

    #[test]
    fn test_invalid_speed() {
        let (mut motor, log) = motor();
        assert_eq!(motor.drive_forward(101), Err(MotorError::InvalidSpeed));
        assert!(log.borrow().is_empty());
    }
}
