use chess_core::{Board, Color, GameState, Role};
use once_cell::sync::Lazy;

pub type Score = i32;

// Checkmate, seen from the side that delivered it. Far outside anything the
// material, positional and mobility terms can add up to.
pub const MATE_SCORE: Score = 100_000;
// Any score at least this large in magnitude is a forced mate
pub const MATE_THRESHOLD: Score = 90_000;
pub const DRAW_SCORE: Score = 0;

// Standard piece values used in chess engines, measured in centipawns (100 = 1 pawn)
const PAWN_VALUE: Score = 100;    // Base unit of measurement
const KNIGHT_VALUE: Score = 320;  // Slightly more than 3 pawns
const BISHOP_VALUE: Score = 330;  // Slightly more than a knight
const ROOK_VALUE: Score = 500;    // Worth 5 pawns
const QUEEN_VALUE: Score = 900;   // Worth 9 pawns
const KING_VALUE: Score = 20000;  // Present on both sides, so it cancels out

const PIECE_VALUES: [Score; 6] = [
    PAWN_VALUE,
    KNIGHT_VALUE,
    BISHOP_VALUE,
    ROOK_VALUE,
    QUEEN_VALUE,
    KING_VALUE,
];

const ROLES: [Role; 6] = [
    Role::Pawn,
    Role::Knight,
    Role::Bishop,
    Role::Rook,
    Role::Queen,
    Role::King,
];

// Piece-square tables, written from White's side of the board: the first
// row is the 8th rank, the last row the 1st rank. Black uses the same table
// mirrored vertically.
type SquareTable = [[Score; 8]; 8];

// Pawn position table:
// - Encourages pawns to advance (higher values in ranks 4,5)
// - Rewards central pawns (higher values in d,e files)
const PAWN_TABLE: SquareTable = [
    [0,  0,  0,  0,  0,  0,  0,  0],    // 8th rank (promotion)
    [50, 50, 50, 50, 50, 50, 50, 50],   // 7th rank (near promotion)
    [10, 10, 20, 30, 30, 20, 10, 10],   // 6th rank
    [5,  5, 10, 25, 25, 10,  5,  5],    // 5th rank (center control)
    [0,  0,  0, 20, 20,  0,  0,  0],    // 4th rank
    [5, -5,-10,  0,  0,-10, -5,  5],    // 3rd rank
    [5, 10, 10,-20,-20, 10, 10,  5],    // 2nd rank (starting position)
    [0,  0,  0,  0,  0,  0,  0,  0]     // 1st rank
];

// Knight position table:
// - Encourages knights to control center
// - Penalizes edge positions (knights are less effective there)
const KNIGHT_TABLE: SquareTable = [
    [-50,-40,-30,-30,-30,-30,-40,-50],   // Edge penalties
    [-40,-20,  0,  0,  0,  0,-20,-40],
    [-30,  0, 10, 15, 15, 10,  0,-30],
    [-30,  5, 15, 20, 20, 15,  5,-30],   // Center control
    [-30,  0, 15, 20, 20, 15,  0,-30],
    [-30,  5, 10, 15, 15, 10,  5,-30],
    [-40,-20,  0,  5,  5,  0,-20,-40],
    [-50,-40,-30,-30,-30,-30,-40,-50]    // Edge penalties
];

// The tables below are only used by the extended table set

const BISHOP_TABLE: SquareTable = [
    [-20,-10,-10,-10,-10,-10,-10,-20],
    [-10,  0,  0,  0,  0,  0,  0,-10],
    [-10,  0,  5, 10, 10,  5,  0,-10],
    [-10,  5,  5, 10, 10,  5,  5,-10],
    [-10,  0, 10, 10, 10, 10,  0,-10],
    [-10, 10, 10, 10, 10, 10, 10,-10],
    [-10,  5,  0,  0,  0,  0,  5,-10],
    [-20,-10,-10,-10,-10,-10,-10,-20]
];

const ROOK_TABLE: SquareTable = [
    [0,  0,  0,  0,  0,  0,  0,  0],
    [5, 10, 10, 10, 10, 10, 10,  5],    // 7th rank bonus
    [-5,  0,  0,  0,  0,  0,  0, -5],
    [-5,  0,  0,  0,  0,  0,  0, -5],
    [-5,  0,  0,  0,  0,  0,  0, -5],
    [-5,  0,  0,  0,  0,  0,  0, -5],
    [-5,  0,  0,  0,  0,  0,  0, -5],
    [0,  0,  0,  5,  5,  0,  0,  0]     // Slight center bonus
];

const QUEEN_TABLE: SquareTable = [
    [-20,-10,-10, -5, -5,-10,-10,-20],
    [-10,  0,  0,  0,  0,  0,  0,-10],
    [-10,  0,  5,  5,  5,  5,  0,-10],
    [-5,  0,  5,  5,  5,  5,  0, -5],
    [0,  0,  5,  5,  5,  5,  0, -5],
    [-10,  5,  5,  5,  5,  5,  0,-10],
    [-10,  0,  5,  0,  0,  0,  0,-10],
    [-20,-10,-10, -5, -5,-10,-10,-20]
];

// King middle game table: rewards a castled king, punishes a central one
const KING_TABLE: SquareTable = [
    [-30,-40,-40,-50,-50,-40,-40,-30],
    [-30,-40,-40,-50,-50,-40,-40,-30],
    [-30,-40,-40,-50,-50,-40,-40,-30],
    [-30,-40,-40,-50,-50,-40,-40,-30],
    [-20,-30,-30,-40,-40,-30,-30,-20],
    [-10,-20,-20,-20,-20,-20,-20,-10],
    [20, 20,  0,  0,  0,  0, 20, 20],   // Castled position bonus
    [20, 30, 10,  0,  0, 10, 30, 20]    // Starting rank, encourages castling
];

static CLASSIC_TABLES: Lazy<EvalTables> = Lazy::new(|| {
    EvalTables::new(
        PIECE_VALUES,
        [Some(&PAWN_TABLE), Some(&KNIGHT_TABLE), None, None, None, None],
    )
});

static EXTENDED_TABLES: Lazy<EvalTables> = Lazy::new(|| {
    EvalTables::new(
        PIECE_VALUES,
        [
            Some(&PAWN_TABLE),
            Some(&KNIGHT_TABLE),
            Some(&BISHOP_TABLE),
            Some(&ROOK_TABLE),
            Some(&QUEEN_TABLE),
            Some(&KING_TABLE),
        ],
    )
});

/// Read-only evaluation parameters: piece values and per-square bonuses.
///
/// Piece types without a square table contribute no positional term.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EvalTables {
    piece_values: [Score; 6],
    // Indexed by square from White's side, a1 = 0
    square_bonus: [Option<[Score; 64]>; 6],
}

impl EvalTables {
    pub fn new(piece_values: [Score; 6], tables: [Option<&SquareTable>; 6]) -> Self {
        Self {
            piece_values,
            square_bonus: tables.map(|table| table.map(flatten)),
        }
    }

    /// Piece-square tables for pawns and knights only.
    pub fn classic() -> &'static EvalTables {
        &CLASSIC_TABLES
    }

    /// Piece-square tables for every piece type.
    pub fn extended() -> &'static EvalTables {
        &EXTENDED_TABLES
    }

    pub fn piece_value(&self, role: Role) -> Score {
        self.piece_values[role_index(role)]
    }

    pub fn has_square_table(&self, role: Role) -> bool {
        self.square_bonus[role_index(role)].is_some()
    }

    /// Positional bonus for a piece of `color` and `role` standing on
    /// `square` (0 = a1, 63 = h8).
    pub fn square_bonus(&self, color: Color, role: Role, square: usize) -> Score {
        let Some(table) = &self.square_bonus[role_index(role)] else {
            return 0;
        };
        match color {
            Color::White => table[square],
            Color::Black => table[square ^ 56],
        }
    }
}

fn flatten(table: &SquareTable) -> [Score; 64] {
    let mut squares = [0; 64];
    for (row, cells) in table.iter().enumerate() {
        for (file, &bonus) in cells.iter().enumerate() {
            squares[(7 - row) * 8 + file] = bonus;
        }
    }
    squares
}

fn role_index(role: Role) -> usize {
    match role {
        Role::Pawn => 0,
        Role::Knight => 1,
        Role::Bishop => 2,
        Role::Rook => 3,
        Role::Queen => 4,
        Role::King => 5,
    }
}

/// Static evaluation of a game state.
pub trait Evaluate<G: GameState> {
    /// Score of `state` for the side to move: positive is good for the
    /// player about to move.
    fn evaluate(&self, state: &G) -> Score;
}

/// Material, piece-square and mobility evaluation for chess.
#[derive(Debug, Clone, Copy)]
pub struct Evaluator<'t> {
    tables: &'t EvalTables,
}

impl<'t> Evaluator<'t> {
    pub fn new(tables: &'t EvalTables) -> Self {
        Self { tables }
    }

    pub fn tables(&self) -> &'t EvalTables {
        self.tables
    }

    /// Sum of piece values for one side
    pub fn material(&self, board: &Board, color: Color) -> Score {
        ROLES
            .iter()
            .map(|&role| board.pieces(color, role).count() as Score * self.tables.piece_value(role))
            .sum()
    }

    /// Sum of square bonuses for one side
    pub fn positional(&self, board: &Board, color: Color) -> Score {
        ROLES
            .iter()
            .filter(|&&role| self.tables.has_square_table(role))
            .map(|&role| {
                board
                    .pieces(color, role)
                    .into_iter()
                    .map(|square| self.tables.square_bonus(color, role, square as usize))
                    .sum::<Score>()
            })
            .sum()
    }
}

impl Default for Evaluator<'static> {
    fn default() -> Self {
        Self::new(EvalTables::classic())
    }
}

impl Evaluate<Board> for Evaluator<'_> {
    fn evaluate(&self, board: &Board) -> Score {
        // One move generation serves both terminal detection and mobility
        let mobility = board.legal_move_count();
        if mobility == 0 {
            return if board.is_check() { -MATE_SCORE } else { DRAW_SCORE };
        }
        if board.is_insufficient_material() {
            return DRAW_SCORE;
        }

        let us = board.side_to_move();
        let them = !us;

        let material = self.material(board, us) - self.material(board, them);
        let positional = self.positional(board, us) - self.positional(board, them);

        material + positional + mobility as Score
    }
}
