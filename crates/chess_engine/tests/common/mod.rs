#![allow(dead_code)]

use chess_core::{Board, GameState};
use chess_engine::{Evaluate, Evaluator, Score, INFINITY};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

/// Complete game tree of fixed branching factor and height. Every node has a
/// pseudo-random value for the first player, derived from the seed and the
/// path leading to it.
#[derive(Debug, Clone)]
pub struct TreeGame {
    seed: u64,
    branching: usize,
    height: usize,
    path: Vec<usize>,
}

impl TreeGame {
    pub fn new(seed: u64, branching: usize, height: usize) -> Self {
        Self {
            seed,
            branching,
            height,
            path: Vec::new(),
        }
    }

    pub fn path(&self) -> &[usize] {
        &self.path
    }

    /// Value of the current node for the first player.
    pub fn value(&self) -> Score {
        let key = self
            .path
            .iter()
            .fold(1u64, |key, &child| key * (self.branching as u64 + 1) + child as u64);
        let mut rng = StdRng::seed_from_u64(self.seed ^ key.wrapping_mul(0x9E37_79B9_7F4A_7C15));
        rng.gen_range(-1000..=1000)
    }
}

impl GameState for TreeGame {
    type Move = usize;
    type Side = bool;

    fn legal_moves(&self) -> Vec<usize> {
        if self.is_game_over() {
            Vec::new()
        } else {
            (0..self.branching).collect()
        }
    }

    fn apply(&mut self, mv: &usize) {
        self.path.push(*mv);
    }

    fn retract(&mut self, mv: &usize) {
        let last = self.path.pop();
        assert_eq!(last, Some(*mv), "retract out of order");
    }

    fn is_game_over(&self) -> bool {
        self.path.len() >= self.height
    }

    fn is_checkmate(&self) -> bool {
        false
    }

    fn side_to_move(&self) -> bool {
        self.path.len() % 2 == 0
    }
}

/// Scores a [`TreeGame`] node for the player about to move.
pub struct TreeEvaluator;

impl Evaluate<TreeGame> for TreeEvaluator {
    fn evaluate(&self, state: &TreeGame) -> Score {
        if state.side_to_move() {
            state.value()
        } else {
            -state.value()
        }
    }
}

/// Chess board whose rules break after the first ply: it never reports the
/// game as over, yet lists no moves once a move has been applied.
#[derive(Debug, Clone)]
pub struct NoRepliesBoard(pub Board);

impl GameState for NoRepliesBoard {
    type Move = chess_core::Move;
    type Side = chess_core::Color;

    fn legal_moves(&self) -> Vec<chess_core::Move> {
        if self.0.applied_moves() >= 1 {
            Vec::new()
        } else {
            self.0.legal_moves()
        }
    }

    fn apply(&mut self, mv: &chess_core::Move) {
        self.0.apply(mv);
    }

    fn retract(&mut self, mv: &chess_core::Move) {
        self.0.retract(mv);
    }

    fn is_game_over(&self) -> bool {
        false
    }

    fn is_checkmate(&self) -> bool {
        false
    }

    fn side_to_move(&self) -> chess_core::Color {
        self.0.side_to_move()
    }
}

impl Evaluate<NoRepliesBoard> for Evaluator<'_> {
    fn evaluate(&self, state: &NoRepliesBoard) -> Score {
        Evaluate::<Board>::evaluate(self, &state.0)
    }
}

/// Full-width minimax without pruning, scored for the side to move at the
/// root. Returns the score and the first move reaching it.
pub fn minimax<G, E>(state: &mut G, evaluator: &E, depth: u8, maximizing: bool) -> (Score, Option<G::Move>)
where
    G: GameState,
    E: Evaluate<G>,
{
    if depth == 0 || state.is_game_over() {
        let score = evaluator.evaluate(state);
        return (if maximizing { score } else { -score }, None);
    }

    let mut best = if maximizing { -INFINITY } else { INFINITY };
    let mut best_move = None;
    for mv in state.legal_moves() {
        state.apply(&mv);
        let (score, _) = minimax(state, evaluator, depth - 1, !maximizing);
        state.retract(&mv);

        let better = if maximizing { score > best } else { score < best };
        if better {
            best = score;
            best_move = Some(mv);
        }
    }
    (best, best_move)
}

/// Plays up to `plies` random legal moves from the initial position.
pub fn random_position(seed: u64, plies: usize) -> Board {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut board = Board::new();
    for _ in 0..plies {
        let moves = board.legal_moves();
        match moves.choose(&mut rng) {
            Some(mv) => board.apply(mv),
            None => break,
        }
    }
    // Continue from the reached position without the move history
    Board::from_position(board.position().clone())
}

pub const MIDGAME: &str = "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1";
pub const ENDGAME: &str = "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1";
