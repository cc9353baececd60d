//! Status indicator trait

/// Lock status shown on the LED bus
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Indicator {
    /// All LEDs off (door travelling)
    Off,
    /// Red LED: door locked
    Closed,
    /// Green LED: door open
    Open,
}

/// Trait for the status LEDs
pub trait IndicatorOutput {
    /// Show the given status
    fn show(&mut self, indicator: Indicator);
}
