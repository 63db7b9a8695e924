use std::ops::{Deref, DerefMut};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Instant;

use chess_core::GameState;
use log::{debug, error};

use crate::error::SearchError;
use crate::evaluation::{Evaluate, Score, MATE_SCORE};

/// Initial search bound, worse than being mated so that a move is always
/// recorded when one exists.
pub const INFINITY: Score = MATE_SCORE + 1;

/// Nodes visited between two looks at the clock and the stop flag
pub const CHECK_INTERVAL: u64 = 1024;

/// Tells a running search when to give up: a wall-clock deadline, an
/// external stop flag, or both.
#[derive(Debug, Clone, Default)]
pub struct CancellationToken {
    deadline: Option<Instant>,
    stop: Arc<AtomicBool>,
}

impl CancellationToken {
    /// A token that never fires unless [`cancel`](Self::cancel) is called.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_deadline(mut self, deadline: Instant) -> Self {
        self.deadline = Some(deadline);
        self
    }

    /// Shares `stop` with whoever else may want to abort the search.
    pub fn with_stop_flag(mut self, stop: Arc<AtomicBool>) -> Self {
        self.stop = stop;
        self
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    pub fn cancel(&self) {
        self.stop.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.stop.load(Ordering::Relaxed)
            || self.deadline.map_or(false, |deadline| Instant::now() >= deadline)
    }
}

/// Score of a node together with the move that achieves it. The move is
/// `None` at leaves.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchResult<M> {
    pub score: Score,
    pub best_move: Option<M>,
}

impl<M> SearchResult<M> {
    fn leaf(score: Score) -> Self {
        Self {
            score,
            best_move: None,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchStats {
    pub nodes: u64,
    pub cutoffs: u64,
}

/// A move applied to a game state for as long as the guard lives.
///
/// Dropping the guard retracts the move, whether the scope ends normally,
/// through `?`, or by unwinding.
pub struct AppliedMove<'s, 'm, G: GameState> {
    state: &'s mut G,
    mv: &'m G::Move,
}

impl<'s, 'm, G: GameState> AppliedMove<'s, 'm, G> {
    pub fn new(state: &'s mut G, mv: &'m G::Move) -> Self {
        state.apply(mv);
        Self { state, mv }
    }
}

impl<G: GameState> Deref for AppliedMove<'_, '_, G> {
    type Target = G;

    fn deref(&self) -> &G {
        self.state
    }
}

impl<G: GameState> DerefMut for AppliedMove<'_, '_, G> {
    fn deref_mut(&mut self) -> &mut G {
        self.state
    }
}

impl<G: GameState> Drop for AppliedMove<'_, '_, G> {
    fn drop(&mut self) {
        self.state.retract(self.mv);
    }
}

/// Depth-limited minimax with alpha-beta pruning.
///
/// Moves are searched in the order the rules engine lists them. Scores are
/// always from the point of view of the side to move at the root call.
pub struct Searcher<'a, E> {
    evaluator: &'a E,
    token: &'a CancellationToken,
    stats: SearchStats,
}

impl<'a, E> Searcher<'a, E> {
    pub fn new(evaluator: &'a E, token: &'a CancellationToken) -> Self {
        Self {
            evaluator,
            token,
            stats: SearchStats::default(),
        }
    }

    pub fn stats(&self) -> SearchStats {
        self.stats
    }

    /// Searches `depth` plies with a full window for the side to move.
    pub fn best_move<G>(&mut self, state: &mut G, depth: u8) -> Result<SearchResult<G::Move>, SearchError>
    where
        G: GameState,
        E: Evaluate<G>,
    {
        self.search(state, depth, -INFINITY, INFINITY, true)
    }

    pub fn search<G>(
        &mut self,
        state: &mut G,
        depth: u8,
        mut alpha: Score,
        mut beta: Score,
        maximizing: bool,
    ) -> Result<SearchResult<G::Move>, SearchError>
    where
        G: GameState,
        E: Evaluate<G>,
    {
        if self.stats.nodes % CHECK_INTERVAL == 0 && self.token.is_cancelled() {
            debug!("search interrupted after {} nodes", self.stats.nodes);
            return Err(SearchError::Interrupted);
        }
        self.stats.nodes += 1;

        if depth == 0 || state.is_game_over() {
            // The evaluator scores for the side to move, which is the root
            // side exactly at maximizing nodes
            let score = self.evaluator.evaluate(state);
            return Ok(SearchResult::leaf(if maximizing { score } else { -score }));
        }

        let moves = state.legal_moves();
        if moves.is_empty() {
            error!("no legal moves in a position that is not game over (depth {})", depth);
            return Err(SearchError::ContractViolation { depth });
        }

        let mut best_score = if maximizing { -INFINITY } else { INFINITY };
        let mut best_move = None;

        for mv in &moves {
            let score = {
                let mut child = AppliedMove::new(&mut *state, mv);
                self.search(&mut *child, depth - 1, alpha, beta, !maximizing)?.score
            };

            if maximizing {
                if score > best_score {
                    best_score = score;
                    best_move = Some(mv.clone());
                }
                alpha = alpha.max(best_score);
            } else {
                if score < best_score {
                    best_score = score;
                    best_move = Some(mv.clone());
                }
                beta = beta.min(best_score);
            }

            if beta <= alpha {
                self.stats.cutoffs += 1;
                break;
            }
        }

        Ok(SearchResult {
            score: best_score,
            best_move,
        })
    }
}
