//! Controller task
//!
//! Runs the door control loop every 10 ms:
//! - Polls the climate sensor when the sensor tick fired
//! - Applies pending countdown ticks
//! - Debounces the buttons and picks up the latest joystick position
//! - Hands everything to the `DoorController` along with queued serial bytes
//! - Logs transitions, rejected codes and motor faults

use defmt::*;
use embassy_stm32::gpio::{Input, Output, OutputOpenDrain};
use embassy_stm32::i2c::I2c;
use embassy_stm32::mode::Blocking;
use embassy_stm32::peripherals::{TIM1, TIM3};
use embassy_stm32::timer::simple_pwm::SimplePwmChannel;
use embassy_time::{Delay, Instant, Timer};

use doorlock_core::input::{Debouncer, JoystickVector, RawButtons};
use doorlock_core::state::DoorEvent;
use doorlock_core::traits::ClimateSensor;
use doorlock_core::DoorController;
use doorlock_drivers::display::{OledDisplay, Ssd1306Display};
use doorlock_drivers::motor::HBridgeMotor;
use doorlock_drivers::sensor::Dht22;

use crate::board::{LedBus, PwmBuzzer};
use crate::channels::{COUNTDOWN_TICK, JOYSTICK, SENSOR_TICK, SERIAL_RX};

/// Control loop period in milliseconds
pub const LOOP_PERIOD_MS: u64 = 10;

pub type Motor = HBridgeMotor<SimplePwmChannel<'static, TIM1>, Output<'static>, Delay>;
pub type Buzzer = PwmBuzzer<'static, TIM3>;
pub type Display = OledDisplay<Ssd1306Display<I2c<'static, Blocking>>>;
pub type Sensor = Dht22<OutputOpenDrain<'static>, Delay>;
pub type Controller = DoorController<Motor, Buzzer, LedBus<'static>>;

/// Active-low push buttons
pub struct Buttons {
    pub button1: Input<'static>,
    pub button2: Input<'static>,
}

impl Buttons {
    fn sample(&self) -> RawButtons {
        RawButtons {
            button1: self.button1.is_low(),
            button2: self.button2.is_low(),
        }
    }
}

/// Everything the control loop owns
pub struct ControlLoop {
    pub controller: Controller,
    pub display: Display,
    pub sensor: Sensor,
    pub buttons: Buttons,
    pub debouncer: Debouncer,
}

#[embassy_executor::task]
pub async fn controller_task(mut ctl: ControlLoop) {
    info!("Controller task started");

    let mut joystick = JoystickVector::NEUTRAL;

    ctl.controller
        .start(&mut ctl.display, Instant::now().as_millis());
    log_motor_fault(&mut ctl.controller);

    loop {
        if SENSOR_TICK.try_take().is_some() {
            let result = ctl.sensor.poll().await;
            if let Err(e) = result {
                warn!(
                    "Climate sensor read failed: {:?} ({} in a row)",
                    e,
                    ctl.controller.climate().consecutive_failures() + 1
                );
            }
            ctl.controller.update_climate(result);
        }

        while COUNTDOWN_TICK.try_receive().is_ok() {
            ctl.controller.on_countdown_tick();
        }

        if let Some(vector) = JOYSTICK.try_take() {
            joystick = vector;
        }

        let now_ms = Instant::now().as_millis();
        let button = ctl.debouncer.sample(ctl.buttons.sample(), now_ms);

        let mut serial = core::iter::from_fn(|| SERIAL_RX.try_receive().ok());
        let outcome = ctl.controller.tick(
            now_ms,
            &mut serial,
            button,
            joystick,
            &mut ctl.display,
        );

        match outcome {
            Some(DoorEvent::Transition { from, to, event }) => {
                info!("Door {:?} -> {:?} ({:?})", from, to, event);
            }
            Some(DoorEvent::CodeRejected) => {
                warn!("Wrong code entered");
            }
            None => {}
        }
        log_motor_fault(&mut ctl.controller);

        Timer::after_millis(LOOP_PERIOD_MS).await;
    }
}

fn log_motor_fault(controller: &mut Controller) {
    if let Some(e) = controller.take_motor_fault() {
        warn!("Motor error: {:?}", e);
    }
}
