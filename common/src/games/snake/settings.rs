use std::fmt;
use std::ops::RangeInclusive;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::config::Validate;

pub const ROWS_COUNT_RANGE: RangeInclusive<u32> = 10..=30;
pub const COLS_COUNT_RANGE: RangeInclusive<u32> = 10..=30;
pub const SPEED_RANGE: RangeInclusive<u32> = 1..=10;
pub const WIN_FOOD_COUNT_RANGE: RangeInclusive<u32> = 5..=50;

/// Board size, speed and win threshold of one game.
///
/// Fields are private: once a game is built from a config it keeps its own
/// copy and nothing can change it for the lifetime of that game.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SnakeConfig {
    rows_count: u32,
    cols_count: u32,
    speed: u32,
    win_food_count: u32,
}

impl Default for SnakeConfig {
    fn default() -> Self {
        Self {
            rows_count: 21,
            cols_count: 21,
            speed: 2,
            win_food_count: 50,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SnakeConfigOverrides {
    pub rows_count: Option<u32>,
    pub cols_count: Option<u32>,
    pub speed: Option<u32>,
    pub win_food_count: Option<u32>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ValidationReport {
    pub is_valid: bool,
    pub errors: Vec<String>,
}

/// Returned when a game is created from a config that failed validation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ConfigError {
    pub errors: Vec<String>,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid game config: {}", self.errors.join("; "))
    }
}

impl std::error::Error for ConfigError {}

impl SnakeConfig {
    /// Shallow merge of `overrides` onto the defaults.
    pub fn init(overrides: &SnakeConfigOverrides) -> Self {
        Self::default().apply(overrides)
    }

    /// Shallow merge of `overrides` onto `self`.
    pub fn apply(&self, overrides: &SnakeConfigOverrides) -> Self {
        Self {
            rows_count: overrides.rows_count.unwrap_or(self.rows_count),
            cols_count: overrides.cols_count.unwrap_or(self.cols_count),
            speed: overrides.speed.unwrap_or(self.speed),
            win_food_count: overrides.win_food_count.unwrap_or(self.win_food_count),
        }
    }

    pub fn rows_count(&self) -> u32 {
        self.rows_count
    }

    pub fn cols_count(&self) -> u32 {
        self.cols_count
    }

    pub fn speed(&self) -> u32 {
        self.speed
    }

    pub fn win_food_count(&self) -> u32 {
        self.win_food_count
    }

    /// Tick period, `1000 / speed` milliseconds.
    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(1000 / u64::from(self.speed.max(1)))
    }

    /// Checks every setting independently and collects all violations.
    pub fn validate(&self) -> ValidationReport {
        let checks = [
            ("rows_count", self.rows_count, ROWS_COUNT_RANGE),
            ("cols_count", self.cols_count, COLS_COUNT_RANGE),
            ("speed", self.speed, SPEED_RANGE),
            ("win_food_count", self.win_food_count, WIN_FOOD_COUNT_RANGE),
        ];

        let errors: Vec<String> = checks
            .into_iter()
            .filter(|(_, value, range)| !range.contains(value))
            .map(|(name, value, range)| {
                format!(
                    "{} must be between {} and {}, got {}",
                    name,
                    range.start(),
                    range.end(),
                    value
                )
            })
            .collect();

        ValidationReport {
            is_valid: errors.is_empty(),
            errors,
        }
    }

    pub fn validated(self) -> Result<Self, ConfigError> {
        let report = self.validate();
        if report.is_valid {
            Ok(self)
        } else {
            Err(ConfigError {
                errors: report.errors,
            })
        }
    }
}

impl Validate for SnakeConfig {
    fn validate(&self) -> Result<(), String> {
        let report = SnakeConfig::validate(self);
        if report.is_valid {
            Ok(())
        } else {
            Err(report.errors.join("; "))
        }
    }
}
