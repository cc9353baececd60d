//! Piezo buzzer on a timer PWM channel

use embassy_stm32::time::Hertz;
use embassy_stm32::timer::simple_pwm::SimplePwm;
use embassy_stm32::timer::{Channel, GeneralInstance4Channel};

use doorlock_core::traits::ToneOutput;

/// Buzzer duty while a note plays
const TONE_DUTY_PERCENT: u8 = 50;

/// Square-wave buzzer driven by one channel of a PWM timer
pub struct PwmBuzzer<'d, T: GeneralInstance4Channel> {
    pwm: SimplePwm<'d, T>,
    channel: Channel,
}

impl<'d, T: GeneralInstance4Channel> PwmBuzzer<'d, T> {
    pub fn new(mut pwm: SimplePwm<'d, T>, channel: Channel) -> Self {
        pwm.channel(channel).disable();
        Self { pwm, channel }
    }
}

impl<T: GeneralInstance4Channel> ToneOutput for PwmBuzzer<'_, T> {
    fn play(&mut self, period_us: u32) {
        if period_us == 0 {
            self.silence();
            return;
        }
        self.pwm.set_frequency(Hertz(1_000_000 / period_us));

        // Max duty depends on the frequency, so set it afterwards
        let mut ch = self.pwm.channel(self.channel);
        ch.set_duty_cycle_percent(TONE_DUTY_PERCENT);
        ch.enable();
    }

    fn silence(&mut self) {
        self.pwm.channel(self.channel).disable();
    }
}
