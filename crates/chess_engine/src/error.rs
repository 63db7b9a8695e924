use chess_core::MalformedPositionError;
use thiserror::Error;

/// Reasons a single search call can stop without a result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SearchError {
    #[error("search interrupted by deadline or stop request")]
    Interrupted,
    #[error("rules engine reported no legal moves for a live position at depth {depth}")]
    ContractViolation { depth: u8 },
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("time budget must be a finite, non-negative number of seconds, got {0}")]
    InvalidTimeBudget(f64),
    #[error("budget fraction must be in (0, 1], got {0}")]
    InvalidBudgetFraction(f64),
    #[error("max depth must be between 1 and {max}, got {depth}")]
    InvalidDepth { depth: u8, max: u8 },
}

/// Errors surfaced to callers of the move selector.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EngineError {
    #[error(transparent)]
    MalformedPosition(#[from] MalformedPositionError),
    #[error("no legal move available: the game is already over")]
    NoLegalMoveAvailable,
    #[error("invalid engine configuration: {0}")]
    InvalidConfig(#[from] ConfigError),
}
