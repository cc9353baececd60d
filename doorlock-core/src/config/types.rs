//! Door lock configuration types
//!
//! All tunables live in one `DoorConfig` that is injected into the
//! controller at construction. Defaults match the stock build.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Number of digits in the reference code
pub const CODE_LEN: usize = 4;

/// Number of notes in a chime
pub const CHIME_LEN: usize = 4;

/// Reference code and entry pacing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PasswordConfig {
    /// Digits that unlock Button1 (each 0-9)
    pub code: [u8; CODE_LEN],
    /// Minimum time between two applied edits
    pub edit_interval_ms: u32,
}

impl Default for PasswordConfig {
    fn default() -> Self {
        Self {
            code: [1, 2, 3, 4],
            edit_interval_ms: 500,
        }
    }
}

/// Countdown windows, in 1 s ticks
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DoorTiming {
    /// Ticks the motor runs while opening or closing
    pub run_window_ticks: u16,
    /// Ticks the door stays open before closing on its own
    pub hold_window_ticks: u16,
}

impl Default for DoorTiming {
    fn default() -> Self {
        Self {
            run_window_ticks: 5,
            hold_window_ticks: 30,
        }
    }
}

/// Motor settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct MotorConfig {
    /// Travel speed (0-100%)
    pub speed_percent: u8,
}

impl Default for MotorConfig {
    fn default() -> Self {
        Self { speed_percent: 30 }
    }
}

/// Opening and closing chimes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ChimeConfig {
    /// Note periods in microseconds, played when opening
    pub opening_us: [u32; CHIME_LEN],
    /// Note periods in microseconds, played when closing
    pub closing_us: [u32; CHIME_LEN],
    /// Duration of each note
    pub note_ms: u32,
}

impl Default for ChimeConfig {
    fn default() -> Self {
        // do mi sol do / do sol mi do
        Self {
            opening_us: [3830, 3038, 2550, 3830],
            closing_us: [3830, 2550, 3038, 3830],
            note_ms: 400,
        }
    }
}

/// Button and joystick conditioning
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct InputConfig {
    /// Minimum time between two reports of the same button
    pub debounce_ms: u32,
    /// Half-width of the joystick dead zone in ADC counts
    pub dead_zone: u16,
    /// Swap left/right
    pub invert_x: bool,
    /// Swap up/down
    pub invert_y: bool,
    /// Joystick sampling period
    pub joystick_sample_ms: u32,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            debounce_ms: 300,
            dead_zone: 800,
            invert_x: false,
            invert_y: false,
            joystick_sample_ms: 150,
        }
    }
}

/// Status screen refresh periods
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DisplayConfig {
    /// Temperature/humidity readout
    pub sensor_refresh_ms: u32,
    /// Door state label
    pub state_refresh_ms: u32,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            sensor_refresh_ms: 1000,
            state_refresh_ms: 500,
        }
    }
}

/// Complete door lock configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DoorConfig {
    pub password: PasswordConfig,
    pub timing: DoorTiming,
    pub motor: MotorConfig,
    pub chime: ChimeConfig,
    pub input: InputConfig,
    pub display: DisplayConfig,
}
