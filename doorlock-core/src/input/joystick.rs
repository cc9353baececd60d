//! Analog joystick classification
//!
//! Each axis is an ADC reading (12-bit, 0..=4095). A dead zone around the
//! calibrated center counts as "no input"; outside it the axis reports a
//! direction. Low raw values mean left/up, matching the screen coordinate
//! system; set `inverted` for modules wired the other way round.

/// Center of a 12-bit ADC range
pub const ADC_MIDPOINT: u16 = 2048;

/// Default half-width of the dead zone in ADC counts
pub const DEFAULT_DEAD_ZONE: u16 = 800;

/// Horizontal axis reading
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Horizontal {
    Left,
    #[default]
    Neutral,
    Right,
}

/// Vertical axis reading
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Vertical {
    Up,
    #[default]
    Neutral,
    Down,
}

/// Classified joystick position
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct JoystickVector {
    pub horizontal: Horizontal,
    pub vertical: Vertical,
}

impl JoystickVector {
    /// Stick at rest
    pub const NEUTRAL: Self = Self {
        horizontal: Horizontal::Neutral,
        vertical: Vertical::Neutral,
    };

    /// Build a vector from both axes
    pub const fn new(horizontal: Horizontal, vertical: Vertical) -> Self {
        Self {
            horizontal,
            vertical,
        }
    }

    /// Check if neither axis is deflected
    pub fn is_neutral(&self) -> bool {
        *self == Self::NEUTRAL
    }
}

/// Calibration for one axis
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AxisCalibration {
    /// Raw reading at rest
    pub center: u16,
    /// Half-width of the no-input band
    pub dead_zone: u16,
    /// Swap the low/high meaning
    pub inverted: bool,
}

impl Default for AxisCalibration {
    fn default() -> Self {
        Self {
            center: ADC_MIDPOINT,
            dead_zone: DEFAULT_DEAD_ZONE,
            inverted: false,
        }
    }
}

impl AxisCalibration {
    /// Classify a raw reading as -1 (low), 0 (dead zone) or 1 (high)
    pub fn deflection(&self, raw: u16) -> i8 {
        let low = self.center.saturating_sub(self.dead_zone);
        let high = self.center.saturating_add(self.dead_zone);

        let d = if raw < low {
            -1
        } else if raw > high {
            1
        } else {
            0
        };

        if self.inverted {
            -d
        } else {
            d
        }
    }
}

/// Calibration for both axes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct JoystickCalibration {
    pub x: AxisCalibration,
    pub y: AxisCalibration,
}

impl JoystickCalibration {
    /// Derive axis centers from samples taken with the stick at rest
    ///
    /// An empty sample set falls back to the ADC midpoint.
    pub fn from_rest_samples(
        samples: &[(u16, u16)],
        dead_zone: u16,
        invert_x: bool,
        invert_y: bool,
    ) -> Self {
        let (cx, cy) = if samples.is_empty() {
            (ADC_MIDPOINT, ADC_MIDPOINT)
        } else {
            let n = samples.len() as u32;
            let sx: u32 = samples.iter().map(|&(x, _)| u32::from(x)).sum();
            let sy: u32 = samples.iter().map(|&(_, y)| u32::from(y)).sum();
            ((sx / n) as u16, (sy / n) as u16)
        };

        Self {
            x: AxisCalibration {
                center: cx,
                dead_zone,
                inverted: invert_x,
            },
            y: AxisCalibration {
                center: cy,
                dead_zone,
                inverted: invert_y,
            },
        }
    }

    /// Classify one pair of raw readings
    pub fn classify(&self, raw_x: u16, raw_y: u16) -> JoystickVector {
        let horizontal = match self.x.deflection(raw_x) {
            -1 => Horizontal::Left,
            1 => Horizontal::Right,
            _ => Horizontal::Neutral,
        };
        let vertical = match self.y.deflection(raw_y) {
            -1 => Vertical::Up,
            1 => Vertical::Down,
            _ => Vertical::Neutral,
        };
        JoystickVector::new(horizontal, vertical)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dead_zone_is_neutral() {
        let cal = JoystickCalibration::default();
        assert!(cal.classify(2048, 2048).is_neutral());
        assert!(cal.classify(2048 - 800, 2048 + 800).is_neutral());
    }

    #[test]
    fn test_deflection() {
        let cal = JoystickCalibration::default();
        assert_eq!(
            cal.classify(100, 2048),
            JoystickVector::new(Horizontal::Left, Vertical::Neutral)
        );
        assert_eq!(
            cal.classify(4000, 2048),
            JoystickVector::new(Horizontal::Right, Vertical::Neutral)
        );
        assert_eq!(
            cal.classify(2048, 100),
            JoystickVector::new(Horizontal::Neutral, Vertical::Up)
        );
        assert_eq!(
            cal.classify(4095, 4095),
            JoystickVector::new(Horizontal::Right, Vertical::Down)
        );
    }

    #[test]
    fn test_inverted_axis() {
        let cal = JoystickCalibration::from_rest_samples(&[], DEFAULT_DEAD_ZONE, false, true);
        assert_eq!(cal.classify(2048, 100).vertical, Vertical::Down);
        assert_eq!(cal.classify(2048, 4000).vertical, Vertical::Up);
    }

    #[test]
    fn test_calibration_from_samples() {
        let samples = [(1900, 2200), (1910, 2210), (1920, 2220)];
        let cal = JoystickCalibration::from_rest_samples(&samples, 500, false, false);
        assert_eq!(cal.x.center, 1910);
        assert_eq!(cal.y.center, 2210);
        assert_eq!(cal.x.dead_zone, 500);

        // Off-center module still reads neutral at its own rest point
        assert!(cal.classify(1915, 2205).is_neutral());
        assert_eq!(cal.classify(1300, 2210).horizontal, Horizontal::Left);
    }

    #[test]
    fn test_dead_zone_saturates_at_rails() {
        let axis = AxisCalibration {
            center: 100,
            dead_zone: 800,
            inverted: false,
        };
        assert_eq!(axis.deflection(0), 0);
        assert_eq!(axis.deflection(1000), 1);
    }
}
