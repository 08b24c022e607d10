/// Rejects repeat presses of one button that land inside a fixed window
/// after the last accepted press.
#[derive(Debug, Clone)]
pub struct Debounce {
    last_press: u32,
    window_ms: u32,
}

impl Debounce {
    /// `now` seeds the last press, so presses inside the first window after
    /// boot are also ignored.
    pub fn new(window_ms: u32, now: u32) -> Self {
        Self {
            last_press: now,
            window_ms,
        }
    }

    /// Returns true and records the press if more than the window has
    /// passed since the last accepted one.
    pub fn accept(&mut self, now: u32) -> bool {
        if now.wrapping_sub(self.last_press) > self.window_ms {
            self.last_press = now;
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_inside_window() {
        let mut debounce = Debounce::new(200, 0);
        assert!(debounce.accept(1_000));
        assert!(!debounce.accept(1_150));
        assert!(!debounce.accept(1_200));
        assert!(debounce.accept(1_201));
    }

    #[test]
    fn rejected_presses_do_not_extend_window() {
        let mut debounce = Debounce::new(200, 0);
        assert!(debounce.accept(1_000));
        assert!(!debounce.accept(1_190));
        assert!(debounce.accept(1_250));
    }

    #[test]
    fn boot_time_counts_as_a_press() {
        let mut debounce = Debounce::new(200, 50);
        assert!(!debounce.accept(100));
        assert!(debounce.accept(300));
    }
}
