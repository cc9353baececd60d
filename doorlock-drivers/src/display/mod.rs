//! Status display implementations

pub mod oled;

pub use oled::{Framebuffer, OledDisplay, Ssd1306Display};
