//! Red/green status LEDs

use embassy_stm32::gpio::Output;

use doorlock_core::traits::{Indicator, IndicatorOutput};

/// Two push-pull LEDs, lit high
pub struct LedBus<'d> {
    red: Output<'d>,
    green: Output<'d>,
}

impl<'d> LedBus<'d> {
    pub fn new(red: Output<'d>, green: Output<'d>) -> Self {
        Self { red, green }
    }
}

impl IndicatorOutput for LedBus<'_> {
    fn show(&mut self, indicator: Indicator) {
        let (red, green) = match indicator {
            Indicator::Off => (false, false),
            Indicator::Closed => (true, false),
            Indicator::Open => (false, true),
        };
        self.red.set_level(red.into());
        self.green.set_level(green.into());
    }
}
