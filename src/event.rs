//! Inputs delivered to the controller and the small enums it is built from.

/// One of the two positions at the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Seat {
    One,
    Two,
}

impl Seat {
    pub const fn index(self) -> usize {
        match self {
            Seat::One => 0,
            Seat::Two => 1,
        }
    }

    pub const fn other(self) -> Seat {
        match self {
            Seat::One => Seat::Two,
            Seat::Two => Seat::One,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Mode {
    Play,
    Pause,
    Setup,
}

/// The portion of a player's time bound to the encoder while editing.
///
/// The edit cycle starts on `Minutes` (slot 0) and moves to `Seconds`
/// (slot 1); pressing settings past the last slot finishes the player.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Segment {
    Minutes = 0,
    Seconds = 1,
}

impl Segment {
    pub const fn next(self) -> Option<Segment> {
        match self {
            Segment::Minutes => Some(Segment::Seconds),
            Segment::Seconds => None,
        }
    }
}

/// A hardware event after it has been decoded from its pin.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Event {
    PlayerButton(Seat),
    SettingsButton,
    ResetButton,
    EncoderChanged(u8),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seats_are_opposite() {
        assert_eq!(Seat::One.other(), Seat::Two);
        assert_eq!(Seat::Two.other(), Seat::One);
        assert_ne!(Seat::One.index(), Seat::Two.index());
    }

    #[test]
    fn edit_cycle_ends_after_seconds() {
        assert_eq!(Segment::Minutes.next(), Some(Segment::Seconds));
        assert_eq!(Segment::Seconds.next(), None);
    }
}
