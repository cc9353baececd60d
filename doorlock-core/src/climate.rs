//! Last-known-good climate reading

use crate::traits::{SensorError, SensorReading};

/// Reading shown before the first successful poll
pub const BOOT_READING: SensorReading = SensorReading::new(25.0, 50.0);

/// Keeps the most recent good sensor reading
///
/// Failed polls leave the reading untouched and are only counted.
#[derive(Debug, Clone, Copy)]
pub struct ClimateCache {
    reading: SensorReading,
    consecutive_failures: u16,
}

impl Default for ClimateCache {
    fn default() -> Self {
        Self::new()
    }
}

impl ClimateCache {
    pub const fn new() -> Self {
        Self {
            reading: BOOT_READING,
            consecutive_failures: 0,
        }
    }

    /// Record the outcome of one poll
    pub fn update(&mut self, result: Result<SensorReading, SensorError>) {
        match result {
            Ok(reading) => {
                self.reading = reading;
                self.consecutive_failures = 0;
            }
            Err(_) => {
                self.consecutive_failures = self.consecutive_failures.saturating_add(1);
            }
        }
    }

    pub fn reading(&self) -> SensorReading {
        self.reading
    }

    /// Failed polls since the last good one
    pub fn consecutive_failures(&self) -> u16 {
        self.consecutive_failures
    }
}
