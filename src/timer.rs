/// One player's remaining budget and the instant it last started running.
///
/// Times are `u32` milliseconds from a free-running counter; differences
/// use wrapping arithmetic so a counter rollover is charged correctly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Timer {
    remaining_ms: u32,
    activated_at: Option<u32>,
}

impl Timer {
    pub fn new(initial_ms: u32) -> Self {
        Self {
            remaining_ms: initial_ms,
            activated_at: None,
        }
    }

    pub fn reset(&mut self, initial_ms: u32) {
        self.remaining_ms = initial_ms;
        self.activated_at = None;
    }

    /// Starts (or rebases) the elapsed-time baseline at `now`.
    ///
    /// Any time since the previous baseline that was not yet ticked off is
    /// discarded.
    pub fn activate(&mut self, now: u32) {
        self.activated_at = Some(now);
    }

    /// Charges the time since the last baseline. Returns true once the
    /// budget is exhausted, in which case `remaining_ms` is pinned at zero.
    pub fn tick(&mut self, now: u32) -> bool {
        let Some(since) = self.activated_at else {
            return false;
        };
        let elapsed = elapsed_ms(since, now);
        self.activated_at = Some(since.wrapping_add(elapsed));
        self.remaining_ms = self.remaining_ms.saturating_sub(elapsed);
        self.remaining_ms == 0
    }

    pub fn remaining_ms(&self) -> u32 {
        self.remaining_ms
    }

    pub fn is_running(&self) -> bool {
        self.activated_at.is_some()
    }

    pub fn since_activation(&self, now: u32) -> Option<u32> {
        self.activated_at.map(|since| elapsed_ms(since, now))
    }

    /// Whole seconds left, truncated.
    pub fn whole_seconds(&self) -> u32 {
        self.remaining_ms / 1000
    }

    pub fn minutes(&self) -> u32 {
        self.whole_seconds() / 60
    }

    /// Seconds within the current minute.
    pub fn seconds(&self) -> u32 {
        self.whole_seconds() % 60
    }

    /// Replaces the budget with a whole number of minutes and seconds.
    /// Sub-second remainder is dropped.
    pub fn set_parts(&mut self, minutes: u32, seconds: u32) {
        self.remaining_ms = (minutes * 60 + seconds) * 1000;
    }
}

/// Signed counter difference; a `now` read before `since` counts as no time.
fn elapsed_ms(since: u32, now: u32) -> u32 {
    (now.wrapping_sub(since) as i32).max(0) as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tick_without_activation_is_a_noop() {
        let mut timer = Timer::new(5_000);
        assert!(!timer.tick(10_000));
        assert_eq!(timer.remaining_ms(), 5_000);
    }

    #[test]
    fn tick_charges_elapsed_time() {
        let mut timer = Timer::new(5_000);
        timer.activate(1_000);
        assert!(!timer.tick(2_500));
        assert_eq!(timer.remaining_ms(), 3_500);
        assert!(!timer.tick(3_000));
        assert_eq!(timer.remaining_ms(), 3_000);
    }

    #[test]
    fn repeated_tick_at_same_instant_charges_once() {
        let mut timer = Timer::new(5_000);
        timer.activate(0);
        timer.tick(1_200);
        timer.tick(1_200);
        assert_eq!(timer.remaining_ms(), 3_800);
    }

    #[test]
    fn expiry_clamps_to_zero() {
        let mut timer = Timer::new(1_000);
        timer.activate(0);
        assert!(timer.tick(1_500));
        assert_eq!(timer.remaining_ms(), 0);

        let mut exact = Timer::new(1_000);
        exact.activate(0);
        assert!(exact.tick(1_000));
    }

    #[test]
    fn elapsed_survives_counter_wrap() {
        let mut timer = Timer::new(10_000);
        timer.activate(u32::MAX - 499);
        timer.tick(500);
        assert_eq!(timer.remaining_ms(), 9_000);
    }

    #[test]
    fn stale_now_charges_nothing() {
        let mut timer = Timer::new(10_000);
        timer.activate(1_000);
        assert!(!timer.tick(999));
        assert_eq!(timer.remaining_ms(), 10_000);
        assert_eq!(timer.since_activation(998), Some(0));

        // The baseline never moves backwards.
        assert!(!timer.tick(1_500));
        assert_eq!(timer.remaining_ms(), 9_500);
    }

    #[test]
    fn activate_rebases_without_charging() {
        let mut timer = Timer::new(30_000);
        timer.activate(0);
        timer.activate(20_000);
        timer.tick(25_000);
        assert_eq!(timer.remaining_ms(), 25_000);
    }

    #[test]
    fn display_parts_truncate() {
        let mut timer = Timer::new(754_999);
        assert_eq!(timer.whole_seconds(), 754);
        assert_eq!(timer.minutes(), 12);
        assert_eq!(timer.seconds(), 34);

        timer.set_parts(3, 7);
        assert_eq!(timer.remaining_ms(), 187_000);
    }

    #[test]
    fn reset_clears_baseline() {
        let mut timer = Timer::new(1_000);
        timer.activate(5);
        timer.reset(2_000);
        assert!(!timer.is_running());
        assert_eq!(timer.remaining_ms(), 2_000);
    }
}
