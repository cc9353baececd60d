//! Joystick sampling task
//!
//! Calibrates the rest position at boot, then classifies both ADC axes at
//! a fixed interval and publishes the result for the controller.

use defmt::*;
use embassy_stm32::adc::{Adc, AnyAdcChannel};
use embassy_stm32::peripherals::ADC1;
use embassy_time::{Duration, Ticker, Timer};

use doorlock_core::config::InputConfig;
use doorlock_core::input::JoystickCalibration;

use crate::channels::JOYSTICK;

/// Rest samples averaged to find each axis' center
const CALIBRATION_SAMPLES: usize = 3;

/// Spacing between calibration samples
const CALIBRATION_INTERVAL_MS: u64 = 200;

/// The two joystick axes on ADC1
pub struct JoystickAxes {
    pub adc: Adc<'static, ADC1>,
    pub x: AnyAdcChannel<ADC1>,
    pub y: AnyAdcChannel<ADC1>,
}

impl JoystickAxes {
    fn read(&mut self) -> (u16, u16) {
        let x = self.adc.blocking_read(&mut self.x);
        let y = self.adc.blocking_read(&mut self.y);
        (x, y)
    }
}

#[embassy_executor::task]
pub async fn joystick_task(mut axes: JoystickAxes, config: InputConfig) {
    info!("Joystick task started");

    let mut samples = [(0u16, 0u16); CALIBRATION_SAMPLES];
    for (i, sample) in samples.iter_mut().enumerate() {
        if i > 0 {
            Timer::after_millis(CALIBRATION_INTERVAL_MS).await;
        }
        *sample = axes.read();
    }
    let calibration = JoystickCalibration::from_rest_samples(
        &samples,
        config.dead_zone,
        config.invert_x,
        config.invert_y,
    );
    info!(
        "Joystick calibrated: center x={} y={}",
        calibration.x.center, calibration.y.center
    );

    let mut ticker = Ticker::every(Duration::from_millis(u64::from(config.joystick_sample_ms)));
    let mut last = None;

    loop {
        ticker.next().await;

        let (x, y) = axes.read();
        let vector = calibration.classify(x, y);
        if last != Some(vector) {
            trace!("Joystick: {:?} (raw {} {})", vector, x, y);
            last = Some(vector);
        }
        JOYSTICK.signal(vector);
    }
}
