//! Door controller coordinating state machine, motor, chime and screen
//!
//! The controller is the single owner of all door state:
//! - Consumes serial commands, debounced buttons and joystick input
//! - Runs the state machine and performs entry actions
//! - Drives the motor, chime player and status LEDs
//! - Renders the status screen and password widget
//!
//! It never blocks. The firmware calls `tick` every loop iteration and
//! `on_countdown_tick` once per second.

use crate::climate::ClimateCache;
use crate::config::DoorConfig;
use crate::input::{ButtonEvent, Command, JoystickVector};
use crate::melody::{Melody, MelodyPlayer};
use crate::password::PasswordEntry;
use crate::presenter::StatusPresenter;
use crate::state::{Cause, Countdown, DoorEvent, DoorState, Event, Window};
use crate::traits::{
    DisplayExt, IndicatorOutput, MotorDriver, MotorError, SensorError, SensorReading, ToneOutput,
};

/// Result of command intake for one tick
enum Intake {
    Idle,
    Fire(Event),
    Rejected,
}

/// Owns the door state and its peripherals
pub struct DoorController<M, T, L> {
    config: DoorConfig,
    state: DoorState,
    countdown: Countdown,
    chime: MelodyPlayer,
    password: PasswordEntry,
    presenter: StatusPresenter,
    climate: ClimateCache,
    motor: M,
    tone: T,
    indicator: L,
    motor_fault: Option<MotorError>,
}

impl<M, T, L> DoorController<M, T, L>
where
    M: MotorDriver,
    T: ToneOutput,
    L: IndicatorOutput,
{
    /// Create a controller in `Closed`
    ///
    /// Nothing is driven until `start` is called.
    pub fn new(config: DoorConfig, motor: M, tone: T, indicator: L) -> Self {
        Self {
            password: PasswordEntry::new(&config.password),
            presenter: StatusPresenter::new(&config.display),
            config,
            state: DoorState::Closed,
            countdown: Countdown::new(),
            chime: MelodyPlayer::new(),
            climate: ClimateCache::new(),
            motor,
            tone,
            indicator,
            motor_fault: None,
        }
    }

    /// Run the `Closed` entry actions and draw the first frame
    pub fn start<D: DisplayExt>(&mut self, display: &mut D, now_ms: u64) {
        self.enter(DoorState::Closed, now_ms, display);
        self.render(display, now_ms);
    }

    /// Apply one countdown tick (called once per second)
    pub fn on_countdown_tick(&mut self) {
        self.countdown.tick();
    }

    /// Record the outcome of a sensor poll
    pub fn update_climate(&mut self, result: Result<SensorReading, SensorError>) {
        self.climate.update(result);
    }

    /// Run one control loop iteration
    ///
    /// `serial` yields the bytes received since the last call. It is only
    /// drained while the door is resting, so commands sent during travel
    /// are handled once it stops.
    pub fn tick<D, I>(
        &mut self,
        now_ms: u64,
        serial: &mut I,
        button: ButtonEvent,
        joystick: JoystickVector,
        display: &mut D,
    ) -> Option<DoorEvent>
    where
        D: DisplayExt,
        I: Iterator<Item = u8>,
    {
        let intake = match self.state {
            DoorState::Closed => self.closed_intake(now_ms, serial, button, joystick),
            DoorState::Opened => self.opened_intake(serial, button),
            DoorState::Opening | DoorState::Closing => self.travel_progress(now_ms),
        };

        let outcome = match intake {
            Intake::Idle => None,
            Intake::Rejected => Some(DoorEvent::CodeRejected),
            Intake::Fire(event) => {
                let from = self.state;
                let to = from.transition(event);
                if to == from {
                    None
                } else {
                    self.enter(to, now_ms, display);
                    Some(DoorEvent::Transition { from, to, event })
                }
            }
        };

        self.render(display, now_ms);
        outcome
    }

    fn closed_intake<I: Iterator<Item = u8>>(
        &mut self,
        now_ms: u64,
        serial: &mut I,
        button: ButtonEvent,
        joystick: JoystickVector,
    ) -> Intake {
        if drain_for(serial, Command::Open) {
            return Intake::Fire(Event::OpenRequested(Cause::Serial));
        }

        let intake = match button {
            ButtonEvent::Button1 if self.password.is_correct() => {
                return Intake::Fire(Event::OpenRequested(Cause::Password));
            }
            ButtonEvent::Button2 => return Intake::Fire(Event::OpenRequested(Cause::Button)),
            // Wrong code keeps the buffer for another try
            ButtonEvent::Button1 => Intake::Rejected,
            ButtonEvent::None => Intake::Idle,
        };

        // Only fed when no transition fired this tick
        self.password.tick(joystick, now_ms);
        intake
    }

    fn opened_intake<I: Iterator<Item = u8>>(
        &mut self,
        serial: &mut I,
        button: ButtonEvent,
    ) -> Intake {
        if drain_for(serial, Command::Close) {
            return Intake::Fire(Event::CloseRequested(Cause::Serial));
        }
        if button == ButtonEvent::Button2 {
            return Intake::Fire(Event::CloseRequested(Cause::Button));
        }
        if self.countdown.is_elapsed() {
            return Intake::Fire(Event::CloseRequested(Cause::Timeout));
        }
        Intake::Idle
    }

    fn travel_progress(&mut self, now_ms: u64) -> Intake {
        let chime_done = self.chime.advance(now_ms, &mut self.tone);
        if chime_done && self.countdown.is_elapsed() {
            Intake::Fire(Event::TravelFinished)
        } else {
            Intake::Idle
        }
    }

    /// Perform the entry actions of `state`
    fn enter<D: DisplayExt>(&mut self, state: DoorState, now_ms: u64, display: &mut D) {
        self.state = state;

        // A failed clear only leaves stale pixels until the regions redraw
        let _ = display.clear();
        self.presenter.invalidate();
        self.password.invalidate();
        self.indicator.show(state.indicator());

        let timing = self.config.timing;
        let chime = self.config.chime;
        let speed = self.config.motor.speed_percent;

        match state {
            DoorState::Closed => {
                self.chime.stop(&mut self.tone);
                let result = self.motor.stop();
                self.note_motor(result);
                self.password.reset();
            }
            DoorState::Opening => {
                let result = self.motor.drive_forward(speed);
                self.note_motor(result);
                self.chime
                    .start(Melody::new(chime.opening_us, chime.note_ms), now_ms, &mut self.tone);
                self.countdown.arm(Window::Run, timing.run_window_ticks);
            }
            DoorState::Opened => {
                self.chime.stop(&mut self.tone);
                let result = self.motor.stop();
                self.note_motor(result);
                self.countdown.arm(Window::Hold, timing.hold_window_ticks);
            }
            DoorState::Closing => {
                let result = self.motor.drive_backward(speed);
                self.note_motor(result);
                self.chime
                    .start(Melody::new(chime.closing_us, chime.note_ms), now_ms, &mut self.tone);
                self.countdown.arm(Window::Run, timing.run_window_ticks);
            }
        }
    }

    fn note_motor(&mut self, result: Result<(), MotorError>) {
        if let Err(e) = result {
            self.motor_fault = Some(e);
        }
    }

    /// Draw whatever is due; a failed frame is retried next tick
    fn render<D: DisplayExt>(&mut self, display: &mut D, now_ms: u64) {
        let reading = self.climate.reading();
        let _ = self.presenter.render(display, self.state, reading, now_ms);
        if self.state == DoorState::Closed {
            let _ = self.password.render(display);
        }
    }

    /// Current door state
    pub fn state(&self) -> DoorState {
        self.state
    }

    pub fn countdown(&self) -> &Countdown {
        &self.countdown
    }

    pub fn password(&self) -> &PasswordEntry {
        &self.password
    }

    pub fn climate(&self) -> &ClimateCache {
        &self.climate
    }

    /// Take the most recent motor driver error, if any
    pub fn take_motor_fault(&mut self) -> Option<MotorError> {
        self.motor_fault.take()
    }

    pub fn config(&self) -> &DoorConfig {
        &self.config
    }

    pub fn motor(&self) -> &M {
        &self.motor
    }

    pub fn tone(&self) -> &T {
        &self.tone
    }

    pub fn indicator(&self) -> &L {
        &self.indicator
    }
}

/// Consume every pending byte; true if `wanted` was among them
fn drain_for<I: Iterator<Item = u8>>(serial: &mut I, wanted: Command) -> bool {
    let mut found = false;
    for byte in serial {
        if Command::from_byte(byte) == Some(wanted) {
            found = true;
        }
    }
    found
}
