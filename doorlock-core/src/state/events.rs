//! Events that trigger state transitions

use super::machine::DoorState;

/// What asked for a transition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Cause {
    /// Command byte on the serial link
    Serial,
    /// Button1 pressed with the correct code entered
    Password,
    /// Button2 (manual override)
    Button,
    /// Hold countdown ran out
    Timeout,
}

/// Events that can trigger state transitions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Event {
    /// Unlock requested
    OpenRequested(Cause),
    /// Lock requested
    CloseRequested(Cause),
    /// Run countdown elapsed and the chime finished
    TravelFinished,
}

/// Outcome of a controller tick, reported to the firmware for logging
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DoorEvent {
    /// The door changed state
    Transition {
        from: DoorState,
        to: DoorState,
        event: Event,
    },
    /// Button1 was pressed but the entered code is wrong
    CodeRejected,
}
