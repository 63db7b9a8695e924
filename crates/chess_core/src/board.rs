use std::fmt;
use std::str::FromStr;

use log::error;
use shakmaty::fen::Fen;
use shakmaty::{Bitboard, CastlingMode, Chess, Color, EnPassantMode, Position, Role};

use crate::error::{MalformedPositionError, RulesError};
use crate::moves::{self, Move};
use crate::rules::{GameState, PositionCodec};

/// Keyword accepted in place of a FEN for the standard initial position
pub const START_KEYWORD: &str = "startpos";

/// A chess position plus the stack of positions it came from.
///
/// Moves are played with [`Board::apply`] and taken back with
/// [`Board::retract`] in strict last-in, first-out order.
#[derive(Debug, Clone)]
pub struct Board {
    position: Chess,
    undo: Vec<(Chess, Move)>,
}

impl Board {
    pub fn new() -> Self {
        Self::from_position(Chess::default())
    }

    pub fn from_position(position: Chess) -> Self {
        Self {
            position,
            undo: Vec::new(),
        }
    }

    /// Reads a FEN. An empty description or `startpos` gives the initial
    /// position.
    pub fn from_fen(description: &str) -> Result<Self, MalformedPositionError> {
        let description = description.trim();
        if description.is_empty() || description == START_KEYWORD {
            return Ok(Self::new());
        }

        let fen = description
            .parse::<Fen>()
            .map_err(|err| MalformedPositionError::new(description, err.to_string()))?;
        let position = fen
            .into_position::<Chess>(CastlingMode::Standard)
            .map_err(|err| MalformedPositionError::new(description, err.to_string()))?;

        Ok(Self::from_position(position))
    }

    pub fn to_fen(&self) -> String {
        Fen::from_position(self.position.clone(), EnPassantMode::Legal).to_string()
    }

    pub fn position(&self) -> &Chess {
        &self.position
    }

    pub fn side_to_move(&self) -> Color {
        self.position.turn()
    }

    /// Squares holding pieces of the given color and type.
    pub fn pieces(&self, color: Color, role: Role) -> Bitboard {
        let board = self.position.board();
        board.by_color(color) & board.by_role(role)
    }

    pub fn legal_moves(&self) -> Vec<Move> {
        self.position.legal_moves().into_iter().collect()
    }

    pub fn legal_move_count(&self) -> usize {
        self.position.legal_moves().len()
    }

    pub fn is_check(&self) -> bool {
        self.position.is_check()
    }

    pub fn is_checkmate(&self) -> bool {
        self.position.is_checkmate()
    }

    pub fn is_stalemate(&self) -> bool {
        self.position.is_stalemate()
    }

    pub fn is_insufficient_material(&self) -> bool {
        self.position.is_insufficient_material()
    }

    pub fn is_game_over(&self) -> bool {
        self.position.is_game_over()
    }

    /// Plays a legal move, remembering the current position so the move can
    /// be retracted.
    pub fn apply(&mut self, mv: &Move) {
        let before = self.position.clone();
        self.position.play_unchecked(mv);
        self.undo.push((before, mv.clone()));
    }

    /// Takes back the most recently applied move.
    pub fn retract(&mut self, mv: &Move) {
        match self.undo.pop() {
            Some((before, applied)) => {
                debug_assert_eq!(&applied, mv, "moves must be retracted in reverse order");
                self.position = before;
            }
            None => error!(
                "retract of {} with no applied move, position left unchanged",
                moves::move_to_notation(mv)
            ),
        }
    }

    /// Number of moves applied and not yet retracted
    pub fn applied_moves(&self) -> usize {
        self.undo.len()
    }

    pub fn parse_move(&self, notation: &str) -> Result<Move, RulesError> {
        let wanted = notation.trim().to_ascii_lowercase();
        let unknown = || RulesError::UnknownMove {
            notation: notation.to_string(),
        };

        if !moves::is_coordinate_notation(&wanted) {
            return Err(unknown());
        }

        let legal = self.position.legal_moves();
        moves::find_by_notation(&legal, &wanted)
            .cloned()
            .ok_or_else(unknown)
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl FromStr for Board {
    type Err = MalformedPositionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_fen(s)
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_fen())
    }
}

impl GameState for Board {
    type Move = Move;
    type Side = Color;

    fn legal_moves(&self) -> Vec<Move> {
        Board::legal_moves(self)
    }

    fn apply(&mut self, mv: &Move) {
        Board::apply(self, mv)
    }

    fn retract(&mut self, mv: &Move) {
        Board::retract(self, mv)
    }

    fn is_game_over(&self) -> bool {
        Board::is_game_over(self)
    }

    fn is_checkmate(&self) -> bool {
        Board::is_checkmate(self)
    }

    fn side_to_move(&self) -> Color {
        Board::side_to_move(self)
    }
}

impl PositionCodec for Board {
    fn parse_position(description: &str) -> Result<Self, MalformedPositionError> {
        Self::from_fen(description)
    }

    fn move_to_notation(&self, mv: &Move) -> String {
        moves::move_to_notation(mv)
    }

    fn parse_move(&self, notation: &str) -> Result<Move, RulesError> {
        Board::parse_move(self, notation)
    }
}
