//! Engine configuration types and builder

pub use crate::error::BuilderError;

use crate::command::MAX_INTENSITY;
use crate::game::MAX_LEVEL;

/// Default tick period in milliseconds
pub const DEFAULT_TICK_PERIOD_MS: u32 = 25;

/// Default pause after a round ends, in milliseconds
pub const DEFAULT_RESTART_PAUSE_MS: u32 = 500;

/// Default pause after a game is picked in the menu, in milliseconds
pub const DEFAULT_CONFIRM_PAUSE_MS: u32 = 1000;

/// Engine configuration
///
/// Use [`Builder`] to create a Config.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
    /// Time the engine blocks at the end of every tick
    pub tick_period_ms: u32,
    /// Pause between a finished round and the restart
    pub restart_pause_ms: u32,
    /// Pause showing the dashes after a menu selection
    pub confirm_pause_ms: u32,
    /// Highest level the level knob selects
    pub level_max: i16,
    /// Matrix intensity written by the startup sequence
    pub startup_intensity: u8,
    /// Seed of the game random generator
    pub seed: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            tick_period_ms: DEFAULT_TICK_PERIOD_MS,
            restart_pause_ms: DEFAULT_RESTART_PAUSE_MS,
            confirm_pause_ms: DEFAULT_CONFIRM_PAUSE_MS,
            level_max: 3,
            startup_intensity: 8,
            seed: 1,
        }
    }
}

/// Builder for constructing engine configuration
///
/// # Example
///
/// ```rust
/// use gridcade::Builder;
///
/// let config = match Builder::new().tick_period_ms(20).level_max(4).build() {
///     Ok(config) => config,
///     Err(_) => return,
/// };
/// assert_eq!(config.tick_period_ms, 20);
/// assert_eq!(config.restart_pause_ms, 500);
/// ```
#[must_use]
#[derive(Default)]
pub struct Builder {
    config: Config,
}

impl Builder {
    /// Create a new Builder with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the tick period (must be non-zero)
    pub fn tick_period_ms(mut self, value: u32) -> Self {
        self.config.tick_period_ms = value;
        self
    }

    /// Set the pause between a finished round and its restart
    pub fn restart_pause_ms(mut self, value: u32) -> Self {
        self.config.restart_pause_ms = value;
        self
    }

    /// Set the pause after a menu selection
    pub fn confirm_pause_ms(mut self, value: u32) -> Self {
        self.config.confirm_pause_ms = value;
        self
    }

    /// Set the highest selectable level (0..=4)
    pub fn level_max(mut self, value: i16) -> Self {
        self.config.level_max = value;
        self
    }

    /// Set the startup matrix intensity (0..=15)
    pub fn startup_intensity(mut self, value: u8) -> Self {
        self.config.startup_intensity = value;
        self
    }

    /// Set the random seed
    ///
    /// Feed it something that varies between power cycles, such as a
    /// floating ADC reading or a timer value, for different games every boot.
    pub fn seed(mut self, value: u32) -> Self {
        self.config.seed = value;
        self
    }

    /// Build the configuration
    ///
    /// # Errors
    ///
    /// Returns [`BuilderError`] if a value is out of range
    pub fn build(self) -> Result<Config, BuilderError> {
        let config = self.config;
        if config.tick_period_ms == 0 {
            return Err(BuilderError::ZeroTickPeriod);
        }
        if !(0..=MAX_LEVEL).contains(&config.level_max) {
            return Err(BuilderError::InvalidLevelRange {
                max: config.level_max,
            });
        }
        if config.startup_intensity > MAX_INTENSITY {
            return Err(BuilderError::InvalidIntensity {
                value: config.startup_intensity,
            });
        }
        Ok(config)
    }
}
