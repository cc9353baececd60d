//! Countdown shared by the travel and hold windows
//!
//! A single signed "ticks remaining" value decremented once per second by
//! an independent timer source. Remaining ticks above zero mean the window
//! has not elapsed yet. Which window is running is recorded next to the
//! value so the two meanings never get mixed up.

/// Which window the countdown is measuring
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Window {
    /// Motor travel allowance while opening/closing
    Run,
    /// Dwell time while opened before auto-close
    Hold,
}

/// Decrementing tick counter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Countdown {
    remaining: i32,
    window: Window,
}

impl Default for Countdown {
    fn default() -> Self {
        Self::new()
    }
}

impl Countdown {
    /// Create an elapsed countdown
    pub const fn new() -> Self {
        Self {
            remaining: 0,
            window: Window::Run,
        }
    }

    /// Restart the countdown for a window
    pub fn arm(&mut self, window: Window, ticks: u16) {
        self.window = window;
        self.remaining = i32::from(ticks);
    }

    /// Apply one timer tick
    ///
    /// Keeps counting below zero, so the value always drops by exactly one.
    pub fn tick(&mut self) {
        self.remaining = self.remaining.saturating_sub(1);
    }

    /// Ticks left (may be negative once elapsed)
    pub fn remaining(&self) -> i32 {
        self.remaining
    }

    /// Check if the window has elapsed
    pub fn is_elapsed(&self) -> bool {
        self.remaining <= 0
    }

    /// Which window was last armed
    pub fn window(&self) -> Window {
        self.window
    }
}
