//! DHT22 temperature and humidity sensor
//!
//! Single-wire protocol on an open-drain pin:
//!
//! 1. Host pulls the line low for at least 1 ms (18 ms used here), then
//!    releases it.
//! 2. Sensor answers with an ~80 µs low and ~80 µs high pulse.
//! 3. Sensor sends 40 bits MSB first. Every bit starts with a ~50 µs low;
//!    the length of the following high pulse encodes the value (~27 µs
//!    for 0, ~70 µs for 1).
//!
//! The frame is humidity (16 bit, ×10), temperature (15 bit magnitude plus
//! sign bit, ×10) and an 8-bit checksum.
//!
//! The start pulse is awaited asynchronously in `poll`; the bit reads use
//! blocking microsecond delays because the timing is too tight to yield.

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{InputPin, OutputPin, PinState};
use embedded_hal_async::delay::DelayNs as AsyncDelayNs;

use doorlock_core::traits::{ClimateSensor, SensorError, SensorReading};

const START_LOW_MS: u32 = 18;
const START_RELEASE_US: u32 = 40;
/// Sample point after the rising edge of a bit
const BIT_SAMPLE_US: u32 = 35;
const POLL_STEP_US: u32 = 1;
/// Polls before giving up on an edge
const MAX_POLLS: usize = 100;

/// Humidity and temperature as sent by the sensor
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Measurement {
    /// Relative humidity (% RH)
    pub humidity: f32,
    /// Temperature (°C)
    pub temperature: f32,
}

/// DHT22 errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Dht22Error<E> {
    /// GPIO access failed
    Pin(E),
    /// Frame checksum did not match
    Checksum,
    /// Sensor did not produce an expected edge
    Timeout,
    /// Decoded value outside the sensor's range
    OutOfRange,
}

impl<E> From<Dht22Error<E>> for SensorError {
    fn from(e: Dht22Error<E>) -> Self {
        match e {
            Dht22Error::Pin(_) => SensorError::Bus,
            Dht22Error::Checksum => SensorError::Checksum,
            Dht22Error::Timeout => SensorError::Timeout,
            Dht22Error::OutOfRange => SensorError::OutOfRange,
        }
    }
}

/// DHT22 driver over an open-drain pin
pub struct Dht22<P, D> {
    pin: P,
    delay: D,
}

impl<P, D> Dht22<P, D>
where
    P: InputPin + OutputPin,
    D: DelayNs,
{
    /// Create a driver; the pin should idle high (released)
    pub fn new(pin: P, delay: D) -> Self {
        Self { pin, delay }
    }

    /// Perform a complete blocking measurement
    pub fn read(&mut self) -> Result<Measurement, Dht22Error<P::Error>> {
        self.pin.set_low().map_err(Dht22Error::Pin)?;
        self.delay.delay_ms(START_LOW_MS);
        self.read_after_start()
    }

    /// Release the line and read the sensor's answer
    fn read_after_start(&mut self) -> Result<Measurement, Dht22Error<P::Error>> {
        self.pin.set_high().map_err(Dht22Error::Pin)?;
        self.delay.delay_us(START_RELEASE_US);

        // Response handshake
        self.wait_for(PinState::Low)?;
        self.wait_for(PinState::High)?;

        let mut frame = [0u8; 5];
        for byte in frame.iter_mut() {
            *byte = self.read_byte()?;
        }

        decode(frame)
    }

    fn wait_for(&mut self, state: PinState) -> Result<(), Dht22Error<P::Error>> {
        for _ in 0..MAX_POLLS {
            let reached = match state {
                PinState::High => self.pin.is_high(),
                PinState::Low => self.pin.is_low(),
            }
            .map_err(Dht22Error::Pin)?;
            if reached {
                return Ok(());
            }
            self.delay.delay_us(POLL_STEP_US);
        }
        Err(Dht22Error::Timeout)
    }

    fn read_byte(&mut self) -> Result<u8, Dht22Error<P::Error>> {
        let mut byte = 0;
        for bit in (0..8).rev() {
            self.wait_for(PinState::Low)?;
            self.wait_for(PinState::High)?;
            self.delay.delay_us(BIT_SAMPLE_US);
            if self.pin.is_high().map_err(Dht22Error::Pin)? {
                byte |= 1 << bit;
            }
        }
        Ok(byte)
    }
}

/// Validate and decode a 5-byte frame
fn decode<E>(frame: [u8; 5]) -> Result<Measurement, Dht22Error<E>> {
    let [hh, hl, th, tl, checksum] = frame;
    let sum = hh.wrapping_add(hl).wrapping_add(th).wrapping_add(tl);
    if sum != checksum {
        return Err(Dht22Error::Checksum);
    }

    let humidity = f32::from(u16::from_be_bytes([hh, hl])) / 10.0;
    let magnitude = f32::from(u16::from_be_bytes([th & 0x7F, tl])) / 10.0;
    let temperature = if th & 0x80 != 0 { -magnitude } else { magnitude };

    if humidity > 100.0 || !(-40.0..=80.0).contains(&temperature) {
        return Err(Dht22Error::OutOfRange);
    }

    Ok(Measurement {
        humidity,
        temperature,
    })
}

impl<P, D> ClimateSensor for Dht22<P, D>
where
    P: InputPin + OutputPin,
    D: DelayNs + AsyncDelayNs,
{
    async fn poll(&mut self) -> Result<SensorReading, SensorError> {
        self.pin
            .set_low()
            .map_err(|_| SensorError::Bus)?;
        AsyncDelayNs::delay_ms(&mut self.delay, START_LOW_MS).await;

        let m = self.read_after_start()?;
        Ok(SensorReading::new(m.temperature, m.humidity))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::convert::Infallible;
    use std::collections::VecDeque;

    /// Pin that plays back a scripted sequence of input levels
    struct ScriptedPin {
        levels: VecDeque<bool>,
        writes: Vec<bool>,
    }

    impl ScriptedPin {
        fn new(levels: impl IntoIterator<Item = bool>) -> Self {
            Self {
                levels: levels.into_iter().collect(),
                writes: Vec::new(),
            }
        }

        fn next_level(&mut self) -> bool {
            // Line floats high once the script runs out
            self.levels.pop_front().unwrap_or(true)
        }
    }

    impl embedded_hal::digital::ErrorType for ScriptedPin {
        type Error = Infallible;
    }

    impl InputPin for ScriptedPin {
        fn is_high(&mut self) -> Result<bool, Self::Error> {
            Ok(self.next_level())
        }

        fn is_low(&mut self) -> Result<bool, Self::Error> {
            Ok(!self.next_level())
        }
    }

    impl OutputPin for ScriptedPin {
        fn set_low(&mut self) -> Result<(), Self::Error> {
            self.writes.push(false);
            Ok(())
        }

        fn set_high(&mut self) -> Result<(), Self::Error> {
            self.writes.push(true);
            Ok(())
        }
    }

    struct NoopDelay;

    impl DelayNs for NoopDelay {
        fn delay_ns(&mut self, _ns: u32) {}
    }

    /// Levels the sensor produces for a whole frame
    fn script(frame: [u8; 5]) -> Vec<bool> {
        // Handshake low, handshake high
        let mut levels = vec![false, true];
        for byte in frame {
            for bit in (0..8).rev() {
                levels.push(false);
                levels.push(true);
                levels.push(byte & (1 << bit) != 0);
            }
        }
        levels
    }

    fn frame(hum_x10: u16, temp_x10: i16) -> [u8; 5] {
        let [hh, hl] = hum_x10.to_be_bytes();
        let mut t = temp_x10.unsigned_abs();
        if temp_x10 < 0 {
            t |= 0x8000;
        }
        let [th, tl] = t.to_be_bytes();
        let sum = hh.wrapping_add(hl).wrapping_add(th).wrapping_add(tl);
        [hh, hl, th, tl, sum]
    }

    #[test]
    fn test_read_positive() {
        let pin = ScriptedPin::new(script(frame(652, 235)));
        let mut dht = Dht22::new(pin, NoopDelay);

        let m = dht.read().unwrap();
        assert!((m.humidity - 65.2).abs() < 0.01);
        assert!((m.temperature - 23.5).abs() < 0.01);
        // Start pulse: low, then release
        assert_eq!(dht.pin.writes, vec![false, true]);
    }

    #[test]
    fn test_read_negative_temperature() {
        let pin = ScriptedPin::new(script(frame(400, -101)));
        let mut dht = Dht22::new(pin, NoopDelay);

        let m = dht.read().unwrap();
        assert!((m.temperature + 10.1).abs() < 0.01);
    }

    #[test]
    fn test_checksum_mismatch() {
        let mut bad = frame(500, 200);
        bad[4] = bad[4].wrapping_add(1);
        let pin = ScriptedPin::new(script(bad));
        let mut dht = Dht22::new(pin, NoopDelay);

        assert_eq!(dht.read(), Err(Dht22Error::Checksum));
    }

    #[test]
    fn test_no_response_times_out() {
        // Line stays high: the handshake low never comes
        let pin = ScriptedPin::new(core::iter::empty());
        let mut dht = Dht22::new(pin, NoopDelay);

        assert_eq!(dht.read(), Err(Dht22Error::Timeout));
    }

    #[test]
    fn test_out_of_range() {
        assert_eq!(
            decode::<Infallible>(frame(1200, 200)),
            Err(Dht22Error::OutOfRange)
        );
        assert_eq!(
            decode::<Infallible>(frame(500, 900)),
            Err(Dht22Error::OutOfRange)
        );
    }

    #[test]
    fn test_error_mapping() {
        assert_eq!(
            SensorError::from(Dht22Error::<Infallible>::Checksum),
            SensorError::Checksum
        );
        assert_eq!(
            SensorError::from(Dht22Error::<()>::Pin(())),
            SensorError::Bus
        );
    }
}
