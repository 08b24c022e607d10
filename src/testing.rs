//! Host doubles for the hardware-facing traits.

use core::convert::Infallible;

use embedded_hal::blocking::delay::DelayMs;
use embedded_hal::digital::v2::{OutputPin, ToggleableOutputPin};

use crate::display::TimeDisplay;
use crate::encoder::Encoder;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Shown {
    Digits(u8, u8),
    Text(String),
}

#[derive(Debug, Default)]
pub struct RecordingDisplay {
    pub shown: Vec<Shown>,
    pub brightness: Option<u8>,
}

impl RecordingDisplay {
    pub fn last(&self) -> Option<&Shown> {
        self.shown.last()
    }
}

impl TimeDisplay for RecordingDisplay {
    fn render_digits(&mut self, minutes: u8, seconds: u8) {
        self.shown.push(Shown::Digits(minutes, seconds));
    }

    fn render_text(&mut self, text: &str) {
        self.shown.push(Shown::Text(text.to_owned()));
    }

    fn set_brightness(&mut self, level: u8) {
        self.brightness = Some(level);
    }
}

#[derive(Debug, Default)]
pub struct MockPin {
    pub high: bool,
    pub toggles: usize,
}

impl OutputPin for MockPin {
    type Error = Infallible;

    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.high = false;
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.high = true;
        Ok(())
    }
}

impl ToggleableOutputPin for MockPin {
    type Error = Infallible;

    fn toggle(&mut self) -> Result<(), Self::Error> {
        self.high = !self.high;
        self.toggles += 1;
        Ok(())
    }
}

#[derive(Debug, Default)]
pub struct MockDelay {
    pub calls: Vec<u32>,
}

impl DelayMs<u32> for MockDelay {
    fn delay_ms(&mut self, ms: u32) {
        self.calls.push(ms);
    }
}

#[derive(Debug, Default)]
pub struct MockEncoder {
    pub value: u8,
    pub seeds: Vec<u8>,
}

impl Encoder for MockEncoder {
    fn read(&self) -> u8 {
        self.value
    }

    fn seed(&mut self, value: u8) {
        self.value = value;
        self.seeds.push(value);
    }
}
