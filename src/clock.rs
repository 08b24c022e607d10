//! The chess clock controller: mode state machine, event dispatch and the
//! idle-loop countdown.

use embedded_hal::blocking::delay::DelayMs;
use embedded_hal::digital::v2::{OutputPin, ToggleableOutputPin};

use crate::alert::Alert;
use crate::config::Config;
use crate::debounce::Debounce;
use crate::display::TimeDisplay;
use crate::encoder::Encoder;
use crate::event::{Event, Mode, Seat, Segment};
use crate::player::Player;

/// What the idle loop should do after an update.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdleStep {
    /// Poll again straight away.
    Continue,
    /// Sleep this many milliseconds, outside any lock, then poll again.
    Sleep(u32),
}

pub struct ChessClock<D, L, E, B> {
    config: Config,
    players: [Player<D, L>; 2],
    encoder: E,
    alert: Alert<B>,
    mode: Mode,
    active: Option<Seat>,
    edit: Option<Seat>,
    segment: Segment,
    winner: bool,
    started: bool,
    settings_debounce: Debounce,
    reset_debounce: Debounce,
}

impl<D, L, E, B> ChessClock<D, L, E, B>
where
    D: TimeDisplay,
    L: OutputPin,
    E: Encoder,
    B: ToggleableOutputPin,
{
    pub fn new(config: Config, players: [Player<D, L>; 2], encoder: E, buzzer: B, now: u32) -> Self {
        Self {
            players,
            encoder,
            alert: Alert::new(buzzer, config.alert_toggles, config.alert_interval_ms),
            mode: Mode::Play,
            active: None,
            edit: None,
            segment: Segment::Minutes,
            winner: false,
            started: false,
            settings_debounce: Debounce::new(config.debounce_ms, now),
            reset_debounce: Debounce::new(config.debounce_ms, now),
            config,
        }
    }

    /// Applies one input event. Events with no transition in the current
    /// mode are dropped.
    pub fn handle(&mut self, event: Event, now: u32) {
        match event {
            Event::PlayerButton(seat) => self.on_player_button(seat, now),
            Event::SettingsButton => {
                if self.settings_debounce.accept(now) {
                    self.on_settings(now);
                } else {
                    debug!("settings press debounced");
                }
            }
            Event::ResetButton => {
                if self.reset_debounce.accept(now) {
                    self.reset_clock();
                } else {
                    debug!("reset press debounced");
                }
            }
            Event::EncoderChanged(value) => self.on_encoder(value),
        }
    }

    /// One pass of the idle loop. Expiry sounds the alert inline, so the
    /// caller's lock covers the whole game-over sequence.
    pub fn update<T: DelayMs<u32>>(&mut self, now: u32, delay: &mut T) -> IdleStep {
        match self.mode {
            Mode::Play if !self.winner => {
                if let Some(seat) = self.active {
                    if self.players[seat.index()].tick_and_check(now) {
                        self.game_over(seat, delay);
                    }
                }
                IdleStep::Continue
            }
            Mode::Play | Mode::Pause => IdleStep::Continue,
            Mode::Setup => {
                if let Some(seat) = self.edit {
                    let interval = self.config.flash_interval_ms;
                    self.players[seat.index()].render_flash(self.segment, now, interval);
                }
                IdleStep::Sleep(self.config.setup_poll_ms)
            }
        }
    }

    /// Returns every field and both players to their start-of-game state.
    pub fn reset_clock(&mut self) {
        info!("clock reset");
        self.active = None;
        self.edit = None;
        self.segment = Segment::Minutes;
        self.winner = false;
        self.started = false;
        self.mode = Mode::Play;
        let start_ms = self.config.start_ms;
        for player in &mut self.players {
            player.reset(start_ms);
        }
    }

    fn on_player_button(&mut self, seat: Seat, now: u32) {
        if self.mode != Mode::Play {
            return;
        }
        self.started = true;
        let next = seat.other();
        self.active = Some(next);
        self.players[next.index()].activate(now);
        debug!("turn passes to {}", next);
    }

    fn on_settings(&mut self, now: u32) {
        match self.mode {
            Mode::Play if self.winner => self.reset_clock(),
            Mode::Play if self.started => self.set_mode(Mode::Pause),
            Mode::Play => {
                self.set_mode(Mode::Setup);
                self.begin_edit(Seat::One, now);
            }
            Mode::Pause => {
                if let Some(seat) = self.active {
                    self.players[seat.index()].activate(now);
                }
                self.set_mode(Mode::Play);
            }
            Mode::Setup => self.advance_edit(now),
        }
    }

    fn begin_edit(&mut self, seat: Seat, now: u32) {
        self.edit = Some(seat);
        self.segment = Segment::Minutes;
        self.seed_encoder(seat);
        self.players[seat.index()].activate(now);
    }

    fn advance_edit(&mut self, now: u32) {
        let Some(seat) = self.edit else {
            return;
        };
        if let Some(next) = self.segment.next() {
            self.segment = next;
            self.seed_encoder(seat);
            return;
        }

        self.players[seat.index()].render();
        match seat {
            Seat::One => self.begin_edit(Seat::Two, now),
            Seat::Two => {
                self.edit = None;
                self.segment = Segment::Minutes;
                self.set_mode(Mode::Play);
            }
        }
    }

    fn on_encoder(&mut self, value: u8) {
        if self.mode != Mode::Setup {
            return;
        }
        if let Some(seat) = self.edit {
            self.players[seat.index()].set_segment_value(self.segment, value);
        }
    }

    fn seed_encoder(&mut self, seat: Seat) {
        let value = self.players[seat.index()].get_segment_value(self.segment);
        self.encoder.seed(value);
    }

    fn game_over<T: DelayMs<u32>>(&mut self, loser: Seat, delay: &mut T) {
        info!("{} is out of time", loser);
        self.winner = true;
        self.active = None;
        self.alert.sound(delay);
    }

    fn set_mode(&mut self, mode: Mode) {
        debug!("mode {} -> {}", self.mode, mode);
        self.mode = mode;
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn active_player(&self) -> Option<Seat> {
        self.active
    }

    pub fn edit_player(&self) -> Option<Seat> {
        self.edit
    }

    pub fn edit_segment(&self) -> Segment {
        self.segment
    }

    pub fn winner_declared(&self) -> bool {
        self.winner
    }

    pub fn started(&self) -> bool {
        self.started
    }

    pub fn player(&self, seat: Seat) -> &Player<D, L> {
        &self.players[seat.index()]
    }

    pub fn encoder(&self) -> &E {
        &self.encoder
    }

    pub fn encoder_mut(&mut self) -> &mut E {
        &mut self.encoder
    }

    #[cfg(test)]
    pub(crate) fn alert(&self) -> &Alert<B> {
        &self.alert
    }
}
