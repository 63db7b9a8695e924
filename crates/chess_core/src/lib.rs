// Rules engine consumed by the search: move generation, apply/retract,
// terminal detection and text encodings
pub mod board;
pub mod error;
pub mod moves;
pub mod rules;

// Re-export main types for convenience
pub use board::Board;
pub use error::{MalformedPositionError, RulesError};
pub use moves::{move_to_notation, Move};
pub use rules::{GameState, PositionCodec};
pub use shakmaty::{Color, Piece, Role, Square};
