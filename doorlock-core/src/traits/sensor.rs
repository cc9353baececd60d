//! Climate sensor trait

/// Errors that can occur with temperature/humidity sensing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SensorError {
    /// Sensor did not answer in time
    Timeout,
    /// Received frame failed its checksum
    Checksum,
    /// Bus or pin error while talking to the sensor
    Bus,
    /// Reading out of the sensor's physical range
    OutOfRange,
}

/// A single temperature and humidity measurement
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SensorReading {
    /// Temperature in degrees Celsius
    pub temperature_c: f32,
    /// Relative humidity in percent
    pub humidity_pct: f32,
}

impl SensorReading {
    /// Create a reading from temperature and humidity
    pub const fn new(temperature_c: f32, humidity_pct: f32) -> Self {
        Self {
            temperature_c,
            humidity_pct,
        }
    }
}

/// Trait for temperature/humidity sensors
///
/// Polled once per sampling tick by the control loop.
#[allow(async_fn_in_trait)]
pub trait ClimateSensor {
    /// Take a fresh measurement
    async fn poll(&mut self) -> Result<SensorReading, SensorError>;
}
