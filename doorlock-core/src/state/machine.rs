//! State machine definition
//!
//! Motor, chime and indicator behavior is a function of the current state
//! and an event. The controller performs the entry actions; this module
//! only decides where an event leads.

use super::events::Event;
use crate::traits::Indicator;

/// Door states
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DoorState {
    /// Locked; password entry active
    #[default]
    Closed,
    /// Motor unlocking, opening chime playing
    Opening,
    /// Unlocked; hold countdown running
    Opened,
    /// Motor locking, closing chime playing
    Closing,
}

impl DoorState {
    /// Check if the door is moving
    pub fn is_travelling(&self) -> bool {
        matches!(self, DoorState::Opening | DoorState::Closing)
    }

    /// LED status for this state
    pub fn indicator(&self) -> Indicator {
        match self {
            DoorState::Closed => Indicator::Closed,
            DoorState::Opened => Indicator::Open,
            DoorState::Opening | DoorState::Closing => Indicator::Off,
        }
    }

    /// Text shown on the status display
    pub fn label(&self) -> &'static str {
        match self {
            DoorState::Closed => "Close",
            DoorState::Opening => "Opening",
            DoorState::Opened => "Open",
            DoorState::Closing => "Closing",
        }
    }

    /// Process an event and return the next state
    ///
    /// This is the core state transition logic.
    pub fn transition(self, event: Event) -> Self {
        use DoorState::*;

        match (self, event) {
            (Closed, Event::OpenRequested(_)) => Opening,
            (Opening, Event::TravelFinished) => Opened,
            (Opened, Event::CloseRequested(_)) => Closing,
            (Closing, Event::TravelFinished) => Closed,

            // Default: stay in current state
            _ => self,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::events::Cause;

    #[test]
    fn test_full_cycle() {
        let state = DoorState::Closed;
        let opening = state.transition(Event::OpenRequested(Cause::Serial));
        assert_eq!(opening, DoorState::Opening);

        let opened = opening.transition(Event::TravelFinished);
        assert_eq!(opened, DoorState::Opened);

        let closing = opened.transition(Event::CloseRequested(Cause::Timeout));
        assert_eq!(closing, DoorState::Closing);

        let closed = closing.transition(Event::TravelFinished);
        assert_eq!(closed, DoorState::Closed);
    }

    #[test]
    fn test_open_only_from_closed() {
        for state in [DoorState::Opening, DoorState::Opened, DoorState::Closing] {
            for cause in [Cause::Serial, Cause::Password, Cause::Button] {
                assert_eq!(state.transition(Event::OpenRequested(cause)), state);
            }
        }
    }

    #[test]
    fn test_close_only_from_opened() {
        for state in [DoorState::Closed, DoorState::Opening, DoorState::Closing] {
            let next = state.transition(Event::CloseRequested(Cause::Button));
            assert_eq!(next, state);
        }
    }

    #[test]
    fn test_travel_finished_ignored_at_rest() {
        assert_eq!(
            DoorState::Closed.transition(Event::TravelFinished),
            DoorState::Closed
        );
        assert_eq!(
            DoorState::Opened.transition(Event::TravelFinished),
            DoorState::Opened
        );
    }

    #[test]
    fn test_state_properties() {
        assert!(DoorState::Opening.is_travelling());
        assert!(DoorState::Closing.is_travelling());
        assert!(!DoorState::Closed.is_travelling());
        assert_eq!(DoorState::Closed.indicator(), Indicator::Closed);
        assert_eq!(DoorState::Opened.indicator(), Indicator::Open);
        assert_eq!(DoorState::Closing.indicator(), Indicator::Off);
    }
}
