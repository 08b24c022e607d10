//! Timing constants and the startup configuration built from them.

/// Starting budget for each player, in milliseconds.
pub const DEFAULT_START_MS: u32 = 600_000;
pub const DEBOUNCE_MS: u32 = 200;
pub const FLASH_INTERVAL_MS: u32 = 500;
/// Sleep between flash polls while in setup.
pub const SETUP_POLL_MS: u32 = 100;
pub const ALERT_TOGGLES: u8 = 10;
pub const ALERT_INTERVAL_MS: u32 = 100;
pub const DISPLAY_BRIGHTNESS: u8 = 2;
pub const ENCODER_MIN: u8 = 0;
pub const ENCODER_MAX: u8 = 60;

/// Largest time the four digits can show: 99:59.
pub const MAX_DISPLAY_MS: u32 = (99 * 60 + 59) * 1000 + 999;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    StartTimeOutOfRange(u32),
    ZeroFlashInterval,
    EmptyEncoderRange,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Config {
    pub start_ms: u32,
    pub debounce_ms: u32,
    pub flash_interval_ms: u32,
    pub setup_poll_ms: u32,
    pub alert_toggles: u8,
    pub alert_interval_ms: u32,
    pub brightness: u8,
    pub encoder_min: u8,
    pub encoder_max: u8,
    pub encoder_reversed: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            start_ms: DEFAULT_START_MS,
            debounce_ms: DEBOUNCE_MS,
            flash_interval_ms: FLASH_INTERVAL_MS,
            setup_poll_ms: SETUP_POLL_MS,
            alert_toggles: ALERT_TOGGLES,
            alert_interval_ms: ALERT_INTERVAL_MS,
            brightness: DISPLAY_BRIGHTNESS,
            encoder_min: ENCODER_MIN,
            encoder_max: ENCODER_MAX,
            encoder_reversed: true,
        }
    }
}

impl Config {
    pub fn validate(self) -> Result<Self, ConfigError> {
        if self.start_ms == 0 || self.start_ms > MAX_DISPLAY_MS {
            return Err(ConfigError::StartTimeOutOfRange(self.start_ms));
        }
        if self.flash_interval_ms == 0 {
            return Err(ConfigError::ZeroFlashInterval);
        }
        if self.encoder_min > self.encoder_max {
            return Err(ConfigError::EmptyEncoderRange);
        }
        Ok(self)
    }
}
