//! Two-player countdown clock for a chess board.
//!
//! Hardware-agnostic core: the firmware binary feeds decoded pin events into
//! [`ChessClock::handle`] from its interrupt task and calls
//! [`ChessClock::update`] from its idle loop.

#![cfg_attr(not(test), no_std)]

#[macro_use]
mod fmt;

pub mod alert;
pub mod clock;
pub mod config;
pub mod debounce;
pub mod display;
pub mod encoder;
pub mod event;
pub mod player;
pub mod timer;

#[cfg(test)]
mod testing;

pub use clock::{ChessClock, IdleStep};
pub use config::{Config, ConfigError};
pub use event::{Event, Mode, Seat, Segment};
pub use player::Player;
