//! Board-level adapters between embassy-stm32 peripherals and core traits

pub mod buzzer;
pub mod leds;

pub use buzzer::PwmBuzzer;
pub use leds::LedBus;
