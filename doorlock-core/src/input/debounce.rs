//! Button debouncer
//!
//! Two push buttons are sampled every control-loop iteration. A press is
//! reported exactly once: the raw level must go from released to pressed,
//! the debounce interval must have passed since that button was last
//! reported, and the button must not be latched as already reported. The
//! latch is only released when the raw level returns to released, so
//! holding a button never produces repeats.

/// Debounce interval used when none is configured
pub const DEFAULT_DEBOUNCE_MS: u32 = 300;

/// Debounced button event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ButtonEvent {
    /// Nothing new this sample
    #[default]
    None,
    /// Password-gated open button
    Button1,
    /// Manual open/close button
    Button2,
}

/// Raw button levels for one sample (`true` = pressed)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RawButtons {
    pub button1: bool,
    pub button2: bool,
}

impl RawButtons {
    /// Both buttons released
    pub const RELEASED: Self = Self {
        button1: false,
        button2: false,
    };
}

/// Per-button debounce state
#[derive(Debug, Clone, Copy, Default)]
struct Channel {
    /// Raw level seen on the previous sample
    last_level: bool,
    /// When this button was last reported
    last_report_ms: Option<u64>,
    /// Current press already reported
    latched: bool,
}

impl Channel {
    /// Check whether this sample is a reportable press
    fn qualifies(&self, pressed: bool, now_ms: u64, interval_ms: u32) -> bool {
        let edge = pressed && !self.last_level;
        let interval_ok = match self.last_report_ms {
            Some(last) => now_ms.saturating_sub(last) >= u64::from(interval_ms),
            None => true,
        };
        edge && interval_ok && !self.latched
    }

    /// Record the sample and whether it was reported
    fn commit(&mut self, pressed: bool, now_ms: u64, reported: bool) {
        self.last_level = pressed;
        if !pressed {
            self.latched = false;
        } else if reported {
            self.last_report_ms = Some(now_ms);
            self.latched = true;
        }
    }
}

/// Debouncer for the two lock buttons
#[derive(Debug, Clone)]
pub struct Debouncer {
    button1: Channel,
    button2: Channel,
    interval_ms: u32,
}

impl Default for Debouncer {
    fn default() -> Self {
        Self::new(DEFAULT_DEBOUNCE_MS)
    }
}

impl Debouncer {
    /// Create a debouncer with the given interval
    pub fn new(interval_ms: u32) -> Self {
        Self {
            button1: Channel::default(),
            button2: Channel::default(),
            interval_ms,
        }
    }

    /// Feed one raw sample taken at `now_ms`
    ///
    /// If both buttons qualify on the same sample, Button1 is reported and
    /// Button2's channel is left untouched, so it reports on the next sample
    /// it is still held.
    pub fn sample(&mut self, raw: RawButtons, now_ms: u64) -> ButtonEvent {
        let b1 = self.button1.qualifies(raw.button1, now_ms, self.interval_ms);
        let b2 = self.button2.qualifies(raw.button2, now_ms, self.interval_ms);

        self.button1.commit(raw.button1, now_ms, b1);
        if b1 && b2 {
            return ButtonEvent::Button1;
        }
        self.button2.commit(raw.button2, now_ms, b2);

        if b1 {
            ButtonEvent::Button1
        } else if b2 {
            ButtonEvent::Button2
        } else {
            ButtonEvent::None
        }
    }
}
