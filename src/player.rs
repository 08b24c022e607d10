use core::fmt::Write;

use embedded_hal::digital::v2::OutputPin;
use heapless::String;

use crate::config::Config;
use crate::display::TimeDisplay;
use crate::event::Segment;
use crate::timer::Timer;

/// One seat: its timer, its display and its indicator LED.
pub struct Player<D, L> {
    timer: Timer,
    display: D,
    led: L,
    flash_on: bool,
}

impl<D: TimeDisplay, L: OutputPin> Player<D, L> {
    pub fn new(mut display: D, mut led: L, config: &Config) -> Self {
        display.set_brightness(config.brightness);
        led.set_low().ok();
        let mut player = Self {
            timer: Timer::new(config.start_ms),
            display,
            led,
            flash_on: true,
        };
        player.render();
        player
    }

    pub fn reset(&mut self, initial_ms: u32) {
        self.timer.reset(initial_ms);
        self.flash_on = true;
        self.led.set_low().ok();
        self.render();
    }

    pub fn activate(&mut self, now: u32) {
        self.timer.activate(now);
    }

    pub fn render(&mut self) {
        let minutes = self.timer.minutes().min(99) as u8;
        let seconds = self.timer.seconds() as u8;
        self.display.render_digits(minutes, seconds);
    }

    /// Blinks the field being edited. The timer's activation instant is the
    /// baseline for the last toggle.
    pub fn render_flash(&mut self, segment: Segment, now: u32, interval_ms: u32) {
        let Some(since) = self.timer.since_activation(now) else {
            self.timer.activate(now);
            return;
        };
        if since < interval_ms {
            return;
        }
        self.timer.activate(now);
        self.flash_on = !self.flash_on;
        if self.flash_on {
            self.render();
        } else {
            self.render_masked(segment);
        }
    }

    fn render_masked(&mut self, segment: Segment) {
        let mut text: String<4> = String::new();
        let written = match segment {
            Segment::Minutes => write!(text, "  {:02}", self.timer.seconds()),
            Segment::Seconds => write!(text, "{:02}  ", self.timer.minutes().min(99)),
        };
        if written.is_ok() {
            self.display.render_text(&text);
        }
    }

    /// Overwrites one field, keeping the other. Seconds are capped at 59.
    pub fn set_segment_value(&mut self, segment: Segment, value: u8) {
        let value = u32::from(value);
        match segment {
            Segment::Minutes => self.timer.set_parts(value, self.timer.seconds()),
            Segment::Seconds => self.timer.set_parts(self.timer.minutes(), value.min(59)),
        }
    }

    pub fn get_segment_value(&self, segment: Segment) -> u8 {
        match segment {
            Segment::Minutes => self.timer.minutes().min(u32::from(u8::MAX)) as u8,
            Segment::Seconds => self.timer.seconds() as u8,
        }
    }

    /// Charges elapsed time, re-rendering when the shown second changes.
    /// On expiry the LED goes on and true is returned; the caller decides
    /// what game over means and must stop ticking afterwards.
    pub fn tick_and_check(&mut self, now: u32) -> bool {
        let shown = self.timer.whole_seconds();
        let expired = self.timer.tick(now);
        if expired || self.timer.whole_seconds() != shown {
            self.render();
        }
        if expired {
            self.led.set_high().ok();
        }
        expired
    }

    pub fn timer(&self) -> &Timer {
        &self.timer
    }

    #[cfg(test)]
    pub(crate) fn flash_on(&self) -> bool {
        self.flash_on
    }

    #[cfg(test)]
    pub(crate) fn display(&self) -> &D {
        &self.display
    }

    #[cfg(test)]
    pub(crate) fn led(&self) -> &L {
        &self.led
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{MockPin, RecordingDisplay, Shown};

    fn player(start_ms: u32) -> Player<RecordingDisplay, MockPin> {
        let config = Config {
            start_ms,
            ..Config::default()
        };
        Player::new(RecordingDisplay::default(), MockPin::default(), &config)
    }

    #[test]
    fn new_renders_start_time() {
        let player = player(600_000);
        assert_eq!(player.display().last(), Some(&Shown::Digits(10, 0)));
        assert_eq!(player.display().brightness, Some(2));
        assert!(!player.led().high);
    }

    #[test]
    fn minutes_segment_writes_minutes_and_keeps_seconds() {
        let mut player = player(125_000);
        player.set_segment_value(Segment::Minutes, 7);
        assert_eq!(player.timer().remaining_ms(), 425_000);
        assert_eq!(player.get_segment_value(Segment::Minutes), 7);
        assert_eq!(player.get_segment_value(Segment::Seconds), 5);
    }

    #[test]
    fn seconds_segment_caps_at_59_and_keeps_minutes() {
        let mut player = player(125_000);
        player.set_segment_value(Segment::Seconds, 60);
        assert_eq!(player.get_segment_value(Segment::Seconds), 59);
        assert_eq!(player.get_segment_value(Segment::Minutes), 2);

        player.set_segment_value(Segment::Seconds, 30);
        assert_eq!(player.timer().remaining_ms(), 150_000);
    }

    #[test]
    fn flash_alternates_masked_and_full_views() {
        let mut player = player(330_000);
        player.activate(0);

        player.render_flash(Segment::Minutes, 499, 500);
        assert_eq!(player.display().last(), Some(&Shown::Digits(5, 30)));

        player.render_flash(Segment::Minutes, 500, 500);
        assert!(!player.flash_on());
        assert_eq!(player.display().last(), Some(&Shown::Text("  30".into())));

        player.render_flash(Segment::Minutes, 1_000, 500);
        assert!(player.flash_on());
        assert_eq!(player.display().last(), Some(&Shown::Digits(5, 30)));

        player.render_flash(Segment::Seconds, 1_500, 500);
        assert_eq!(player.display().last(), Some(&Shown::Text("05  ".into())));
    }

    #[test]
    fn flash_without_baseline_starts_one() {
        let mut player = player(60_000);
        let renders = player.display().shown.len();
        player.render_flash(Segment::Minutes, 100, 500);
        assert_eq!(player.display().shown.len(), renders);
        assert!(player.timer().is_running());
    }

    #[test]
    fn tick_renders_only_on_second_change() {
        let mut player = player(10_500);
        player.activate(0);
        let renders = player.display().shown.len();

        // 10.1 s still shows 0:10.
        assert!(!player.tick_and_check(400));
        assert_eq!(player.display().shown.len(), renders);

        assert!(!player.tick_and_check(1_000));
        assert_eq!(player.display().shown.len(), renders + 1);
        assert_eq!(player.display().last(), Some(&Shown::Digits(0, 9)));
    }

    #[test]
    fn expiry_lights_led() {
        let mut player = player(1_000);
        player.activate(0);
        assert!(player.tick_and_check(2_000));
        assert!(player.led().high);
        assert_eq!(player.display().last(), Some(&Shown::Digits(0, 0)));

        player.reset(5_000);
        assert!(!player.led().high);
        assert!(player.flash_on());
        assert_eq!(player.display().last(), Some(&Shown::Digits(0, 5)));
    }
}
