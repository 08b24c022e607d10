//! Rotary encoder: the contract the controller seeds and reads, and a
//! quadrature decoder fed from the CLK/DT pin levels.

/// An integer dial. `seed` moves the value without reporting a change.
pub trait Encoder {
    fn read(&self) -> u8;
    fn seed(&mut self, value: u8);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RangeMode {
    /// Stepping past one end lands on the other.
    Wrap,
    /// Stepping past an end stays there.
    Bounded,
}

/// Indexed by `previous << 2 | current` Gray-code state.
const TRANSITIONS: [i8; 16] = [0, -1, 1, 0, 1, 0, 0, -1, -1, 0, 0, 1, 0, 1, -1, 0];
/// Quarter steps in one detent.
const STEPS_PER_DETENT: i8 = 4;
/// Both lines pulled up.
const REST: u8 = 0b11;

#[derive(Debug, Clone)]
pub struct RotaryEncoder {
    value: u8,
    min: u8,
    max: u8,
    mode: RangeMode,
    reversed: bool,
    state: u8,
    quarter_steps: i8,
}

impl RotaryEncoder {
    pub fn new(min: u8, max: u8, mode: RangeMode, reversed: bool) -> Self {
        Self {
            value: min,
            min,
            max,
            mode,
            reversed,
            state: REST,
            quarter_steps: 0,
        }
    }

    /// Feeds the current pin levels. Returns true when a full detent moved
    /// the value.
    pub fn update(&mut self, clk: bool, dt: bool) -> bool {
        let state = (u8::from(clk) << 1) | u8::from(dt);
        let quarter = TRANSITIONS[usize::from((self.state << 2) | state)];
        self.state = state;
        if quarter == 0 {
            return false;
        }

        self.quarter_steps += quarter;
        if self.quarter_steps.abs() < STEPS_PER_DETENT {
            return false;
        }
        let mut direction = self.quarter_steps.signum();
        self.quarter_steps = 0;
        if self.reversed {
            direction = -direction;
        }
        self.step(direction)
    }

    fn step(&mut self, direction: i8) -> bool {
        let previous = self.value;
        self.value = match (direction > 0, self.mode) {
            (true, _) if self.value < self.max => self.value + 1,
            (true, RangeMode::Wrap) => self.min,
            (true, RangeMode::Bounded) => self.max,
            (false, _) if self.value > self.min => self.value - 1,
            (false, RangeMode::Wrap) => self.max,
            (false, RangeMode::Bounded) => self.min,
        };
        self.value != previous
    }
}

impl Encoder for RotaryEncoder {
    fn read(&self) -> u8 {
        self.value
    }

    fn seed(&mut self, value: u8) {
        self.value = value.clamp(self.min, self.max);
        self.quarter_steps = 0;
    }
}
