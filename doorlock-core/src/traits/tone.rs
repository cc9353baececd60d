//! Tone generator trait

/// Square-wave tone output (piezo buzzer on a PWM channel)
///
/// Tones are given as a period in microseconds, matching the way note
/// tables for the buzzer are written (3830 µs ≈ C4).
pub trait ToneOutput {
    /// Start a tone with the given period at 50% duty
    fn play(&mut self, period_us: u32);

    /// Stop any tone
    fn silence(&mut self);
}
