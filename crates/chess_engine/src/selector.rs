use chess_core::{Board, GameState, PositionCodec};
use log::{debug, warn};

use crate::config::EngineConfig;
use crate::deepening::IterativeDeepening;
use crate::error::EngineError;
use crate::evaluation::{Evaluate, Evaluator};

/// Picks a move for a position given as text and answers in coordinate
/// notation.
#[derive(Debug, Clone)]
pub struct MoveSelector<E> {
    evaluator: E,
    config: EngineConfig,
}

impl<E> MoveSelector<E> {
    pub fn new(evaluator: E, config: EngineConfig) -> Result<Self, EngineError> {
        config.validate()?;
        Ok(Self { evaluator, config })
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn select<G>(&self, description: &str) -> Result<String, EngineError>
    where
        G: PositionCodec,
        E: Evaluate<G>,
    {
        let mut state = G::parse_position(description)?;
        let mv = self.select_move(&mut state)?;
        Ok(state.move_to_notation(&mv))
    }

    /// Searches within the configured share of the time budget. Falls back
    /// to the first legal move when no search iteration completes.
    pub fn select_move<G>(&self, state: &mut G) -> Result<G::Move, EngineError>
    where
        G: GameState,
        E: Evaluate<G>,
    {
        if state.is_game_over() {
            return Err(EngineError::NoLegalMoveAvailable);
        }

        let budget = self.config.search_budget()?;
        let controller = IterativeDeepening::new(&self.evaluator, self.config.max_depth);
        let report = controller.run(state, budget);
        debug!(
            "searched to depth {} in {:?} ({} nodes)",
            report.completed_depth, report.elapsed, report.nodes
        );

        match report.best_move {
            Some(mv) => Ok(mv),
            None => {
                warn!("no search result within {:?}, playing the first legal move", budget);
                state
                    .legal_moves()
                    .into_iter()
                    .next()
                    .ok_or(EngineError::NoLegalMoveAvailable)
            }
        }
    }
}

impl MoveSelector<Evaluator<'static>> {
    /// Chess selector using the tables named by `config`.
    pub fn for_chess(config: EngineConfig) -> Result<Self, EngineError> {
        Self::new(Evaluator::new(config.tables()), config)
    }

    pub fn select_chess(&self, description: &str) -> Result<String, EngineError> {
        self.select::<Board>(description)
    }
}

/// Chooses a move for the chess position `description` (a FEN, `startpos`,
/// or empty for the initial position).
pub fn select(description: &str, config: &EngineConfig) -> Result<String, EngineError> {
    MoveSelector::for_chess(*config)?.select_chess(description)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ConfigError;

    #[test]
    fn test_default_config_returns_legal_move() {
        let notation = select("startpos", &EngineConfig::default()).unwrap();
        let board = Board::new();
        assert!(board.parse_move(&notation).is_ok(), "illegal move {}", notation);
    }

    #[test]
    fn test_zero_budget_plays_first_legal_move() {
        let config = EngineConfig::default().with_time_budget(0.0);
        let board = Board::new();
        let first = board.move_to_notation(&board.legal_moves()[0]);
        assert_eq!(select("", &config).unwrap(), first);
    }

    #[test]
    fn test_finished_game_has_no_move() {
        let config = EngineConfig::default();
        assert_eq!(
            select("rnb1kbnr/pppp1ppp/8/4p3/6Pq/5P2/PPPPP2P/RNBQKBNR w KQkq - 1 3", &config),
            Err(EngineError::NoLegalMoveAvailable)
        );
        assert_eq!(
            select("7k/5Q2/6K1/8/8/8/8/8 b - - 0 1", &config),
            Err(EngineError::NoLegalMoveAvailable)
        );
    }

    #[test]
    fn test_malformed_position_is_reported() {
        let err = select("not a position", &EngineConfig::default()).unwrap_err();
        assert!(matches!(err, EngineError::MalformedPosition(_)));
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let config = EngineConfig::default().with_budget_fraction(0.0);
        assert_eq!(
            MoveSelector::for_chess(config).unwrap_err(),
            EngineError::InvalidConfig(ConfigError::InvalidBudgetFraction(0.0))
        );
    }

    #[test]
    fn test_select_move_leaves_state_untouched() {
        let selector = MoveSelector::for_chess(EngineConfig::default().with_max_depth(2)).unwrap();
        let mut board = Board::new();
        let mv = selector.select_move(&mut board).unwrap();
        assert!(board.legal_moves().contains(&mv));
        assert_eq!(board.applied_moves(), 0);
    }
}
