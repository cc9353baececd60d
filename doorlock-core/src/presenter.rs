//! Status screen rendering
//!
//! Two regions are refreshed on their own periods: the climate readout in
//! the top-left corner and the door state label. Rendering does not depend
//! on transitions; the controller only calls `invalidate` after clearing
//! the screen so both regions come back immediately.

use core::fmt::Write;

use heapless::String;

use crate::config::DisplayConfig;
use crate::state::DoorState;
use crate::traits::{DisplayError, DisplayExt, SensorReading};

/// Screen region (x, y, width, height)
type Region = (i32, i32, u32, u32);

const READOUT_REGION: Region = (0, 0, 64, 22);
const RESTING_LABEL_REGION: Region = (65, 0, 63, 18);
const TRAVEL_LABEL_REGION: Region = (0, 28, 128, 26);

/// Throttled renderer for the climate readout and state label
#[derive(Debug, Clone)]
pub struct StatusPresenter {
    sensor_refresh_ms: u32,
    state_refresh_ms: u32,
    last_readout_ms: Option<u64>,
    last_label_ms: Option<u64>,
}

fn due(last: Option<u64>, period_ms: u32, now_ms: u64) -> bool {
    match last {
        Some(last) => now_ms.saturating_sub(last) >= u64::from(period_ms),
        None => true,
    }
}

impl StatusPresenter {
    pub fn new(config: &DisplayConfig) -> Self {
        Self {
            sensor_refresh_ms: config.sensor_refresh_ms,
            state_refresh_ms: config.state_refresh_ms,
            last_readout_ms: None,
            last_label_ms: None,
        }
    }

    /// Make both regions due on the next render
    pub fn invalidate(&mut self) {
        self.last_readout_ms = None;
        self.last_label_ms = None;
    }

    /// Redraw whichever regions are due
    ///
    /// Returns true if anything was drawn. A failed frame is retried on the
    /// next call.
    pub fn render<D: DisplayExt>(
        &mut self,
        display: &mut D,
        state: DoorState,
        reading: SensorReading,
        now_ms: u64,
    ) -> Result<bool, DisplayError> {
        let readout_due = due(self.last_readout_ms, self.sensor_refresh_ms, now_ms);
        let label_due = due(self.last_label_ms, self.state_refresh_ms, now_ms);

        if !readout_due && !label_due {
            return Ok(false);
        }

        if readout_due {
            draw_readout(display, reading)?;
        }
        if label_due {
            draw_label(display, state)?;
        }
        display.present()?;

        if readout_due {
            self.last_readout_ms = Some(now_ms);
        }
        if label_due {
            self.last_label_ms = Some(now_ms);
        }
        Ok(true)
    }
}

fn blank_region<D: DisplayExt>(display: &mut D, region: Region) -> Result<(), DisplayError> {
    let (x, y, w, h) = region;
    display.blank(x, y, w, h)
}

fn draw_readout<D: DisplayExt>(display: &mut D, reading: SensorReading) -> Result<(), DisplayError> {
    blank_region(display, READOUT_REGION)?;

    let mut line: String<16> = String::new();
    write!(line, "Temp:{:.1}C", reading.temperature_c).map_err(|_| DisplayError::BufferOverflow)?;
    display.text_at(1, 1, 1, &line)?;

    line.clear();
    write!(line, "Humi:{:.1}%", reading.humidity_pct).map_err(|_| DisplayError::BufferOverflow)?;
    display.text_at(1, 11, 1, &line)
}

fn draw_label<D: DisplayExt>(display: &mut D, state: DoorState) -> Result<(), DisplayError> {
    if state.is_travelling() {
        blank_region(display, TRAVEL_LABEL_REGION)?;
        display.text_at(1, 29, 3, state.label())
    } else {
        blank_region(display, RESTING_LABEL_REGION)?;
        display.text_at(65, 1, 2, state.label())
    }
}
