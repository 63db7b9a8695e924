use std::fmt::Debug;

use crate::error::{MalformedPositionError, RulesError};

/// The services a two-player, perfect-information game must provide so it
/// can be searched.
///
/// `apply` and `retract` are paired: retracting the move that was applied
/// last restores the state exactly. Callers must retract in reverse order of
/// application.
pub trait GameState {
    type Move: Clone + PartialEq + Debug;
    type Side: Copy + Eq + Debug;

    /// Legal moves for the side to move, in an order that is stable for a
    /// given position.
    fn legal_moves(&self) -> Vec<Self::Move>;

    fn apply(&mut self, mv: &Self::Move);

    fn retract(&mut self, mv: &Self::Move);

    /// True when no further move may be played (mate, stalemate or a rules
    /// draw). Must agree with `legal_moves`: a game that is not over has at
    /// least one legal move.
    fn is_game_over(&self) -> bool;

    fn is_checkmate(&self) -> bool;

    fn side_to_move(&self) -> Self::Side;
}

/// Text encodings of positions and moves.
pub trait PositionCodec: GameState + Sized {
    fn parse_position(description: &str) -> Result<Self, MalformedPositionError>;

    fn move_to_notation(&self, mv: &Self::Move) -> String;

    /// Inverse of `move_to_notation` for the moves legal in this position.
    fn parse_move(&self, notation: &str) -> Result<Self::Move, RulesError>;
}
