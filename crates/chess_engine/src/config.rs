use std::time::Duration;

use crate::error::ConfigError;
use crate::evaluation::EvalTables;

/// Deepest search the controller will ever attempt
pub const MAX_DEPTH: u8 = 32;

pub const DEFAULT_TIME_BUDGET_SECONDS: f64 = 0.4;
pub const DEFAULT_MAX_DEPTH: u8 = 4;
// Share of the time budget actually spent searching. The rest is headroom
// for parsing, move generation and the caller's own overhead.
pub const DEFAULT_BUDGET_FRACTION: f64 = 0.25;

/// Engine settings supplied by the caller.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EngineConfig {
    /// Wall-clock allotment for one move, in seconds
    pub time_budget_seconds: f64,
    pub max_depth: u8,
    pub budget_fraction: f64,
    /// Use piece-square tables for every piece type instead of pawns and
    /// knights only
    pub full_piece_square_tables: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            time_budget_seconds: DEFAULT_TIME_BUDGET_SECONDS,
            max_depth: DEFAULT_MAX_DEPTH,
            budget_fraction: DEFAULT_BUDGET_FRACTION,
            full_piece_square_tables: false,
        }
    }
}

impl EngineConfig {
    pub fn with_time_budget(mut self, seconds: f64) -> Self {
        self.time_budget_seconds = seconds;
        self
    }

    pub fn with_max_depth(mut self, depth: u8) -> Self {
        self.max_depth = depth;
        self
    }

    pub fn with_budget_fraction(mut self, fraction: f64) -> Self {
        self.budget_fraction = fraction;
        self
    }

    pub fn with_full_piece_square_tables(mut self, enabled: bool) -> Self {
        self.full_piece_square_tables = enabled;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.time_budget_seconds.is_finite() || self.time_budget_seconds < 0.0 {
            return Err(ConfigError::InvalidTimeBudget(self.time_budget_seconds));
        }
        if !(self.budget_fraction > 0.0 && self.budget_fraction <= 1.0) {
            return Err(ConfigError::InvalidBudgetFraction(self.budget_fraction));
        }
        if self.max_depth == 0 || self.max_depth > MAX_DEPTH {
            return Err(ConfigError::InvalidDepth {
                depth: self.max_depth,
                max: MAX_DEPTH,
            });
        }
        Ok(())
    }

    /// Time the controller may spend searching. Budgets too large for a
    /// `Duration` saturate.
    pub fn search_budget(&self) -> Result<Duration, ConfigError> {
        self.validate()?;
        Ok(Duration::try_from_secs_f64(self.time_budget_seconds * self.budget_fraction)
            .unwrap_or(Duration::MAX))
    }

    pub fn tables(&self) -> &'static EvalTables {
        if self.full_piece_square_tables {
            EvalTables::extended()
        } else {
            EvalTables::classic()
        }
    }
}
