//! Periodic ticks for the controller
//!
//! - Countdown: one tick per second drives the run/hold windows
//! - Sensor: asks the controller to poll the climate sensor

use defmt::*;
use embassy_time::{Duration, Ticker};

use crate::channels::{COUNTDOWN_TICK, SENSOR_TICK};

/// Countdown tick interval in milliseconds
pub const COUNTDOWN_INTERVAL_MS: u64 = 1000;

/// Sensor sampling interval in milliseconds
pub const SENSOR_INTERVAL_MS: u64 = 1000;

/// Countdown tick task
#[embassy_executor::task]
pub async fn countdown_tick_task() {
    info!("Countdown tick task started");

    let mut ticker = Ticker::every(Duration::from_millis(COUNTDOWN_INTERVAL_MS));

    loop {
        ticker.next().await;

        // Queue full: the controller is stalled and the window is overdue
        if COUNTDOWN_TICK.try_send(()).is_err() {
            warn!("Countdown tick dropped");
        }
    }
}

/// Sensor tick task
#[embassy_executor::task]
pub async fn sensor_tick_task() {
    info!("Sensor tick task started");

    let mut ticker = Ticker::every(Duration::from_millis(SENSOR_INTERVAL_MS));

    loop {
        ticker.next().await;
        SENSOR_TICK.signal(());
    }
}
