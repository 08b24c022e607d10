use embedded_hal::blocking::delay::DelayMs;
use embedded_hal::digital::v2::ToggleableOutputPin;

/// The buzzer. Sounding it is a blocking sequence of toggles.
pub struct Alert<B> {
    pin: B,
    toggles: u8,
    interval_ms: u32,
}

impl<B: ToggleableOutputPin> Alert<B> {
    pub fn new(pin: B, toggles: u8, interval_ms: u32) -> Self {
        Self {
            pin,
            toggles,
            interval_ms,
        }
    }

    pub fn sound<T: DelayMs<u32>>(&mut self, delay: &mut T) {
        for _ in 0..self.toggles {
            self.pin.toggle().ok();
            delay.delay_ms(self.interval_ms);
        }
    }

    #[cfg(test)]
    pub(crate) fn pin(&self) -> &B {
        &self.pin
    }
}
