// Move selection for two-player board games: static evaluation, alpha-beta
// search and an iterative deepening loop bounded by a time budget
pub mod config;
pub mod deepening;
pub mod error;
pub mod evaluation;
pub mod search;
pub mod selector;

// Re-export main types for convenience
pub use config::EngineConfig;
pub use deepening::{DeepeningReport, IterativeDeepening};
pub use error::{ConfigError, EngineError, SearchError};
pub use evaluation::{EvalTables, Evaluate, Evaluator, Score, DRAW_SCORE, MATE_SCORE, MATE_THRESHOLD};
pub use search::{AppliedMove, CancellationToken, SearchResult, SearchStats, Searcher, INFINITY};
pub use selector::{select, MoveSelector};
