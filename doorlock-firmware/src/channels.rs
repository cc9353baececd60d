//! Inter-task communication channels
//!
//! Defines the static channels used for communication between Embassy tasks.
//! Producers are the tick, serial and joystick tasks; the controller task is
//! the only consumer.

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Channel;
use embassy_sync::signal::Signal;

use doorlock_core::input::JoystickVector;

/// Channel capacity for received serial bytes
const SERIAL_CHANNEL_SIZE: usize = 32;

/// Countdown ticks not yet applied by the controller
const COUNTDOWN_CHANNEL_SIZE: usize = 8;

/// Bytes received on the serial link, in arrival order
pub static SERIAL_RX: Channel<CriticalSectionRawMutex, u8, SERIAL_CHANNEL_SIZE> = Channel::new();

/// One entry per elapsed second of the door countdown
pub static COUNTDOWN_TICK: Channel<CriticalSectionRawMutex, (), COUNTDOWN_CHANNEL_SIZE> =
    Channel::new();

/// Time to poll the climate sensor
pub static SENSOR_TICK: Signal<CriticalSectionRawMutex, ()> = Signal::new();

/// Latest classified joystick position
pub static JOYSTICK: Signal<CriticalSectionRawMutex, JoystickVector> = Signal::new();
