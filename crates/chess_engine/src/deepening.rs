use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use chess_core::GameState;
use log::{debug, error, info};

use crate::error::SearchError;
use crate::evaluation::{Evaluate, Score, MATE_THRESHOLD};
use crate::search::{CancellationToken, Searcher};

/// Outcome of one iterative deepening run.
#[derive(Debug, Clone, PartialEq)]
pub struct DeepeningReport<M> {
    /// Best move of the deepest completed iteration
    pub best_move: Option<M>,
    pub score: Option<Score>,
    /// 0 when no iteration finished
    pub completed_depth: u8,
    pub nodes: u64,
    pub elapsed: Duration,
    /// An iteration was abandoned part way through
    pub interrupted: bool,
}

impl<M> Default for DeepeningReport<M> {
    fn default() -> Self {
        Self {
            best_move: None,
            score: None,
            completed_depth: 0,
            nodes: 0,
            elapsed: Duration::ZERO,
            interrupted: false,
        }
    }
}

/// Runs the searcher at depth 1, 2, 3, ... until the time budget runs out,
/// the maximum depth is reached or a forced mate is proven.
pub struct IterativeDeepening<'a, E> {
    evaluator: &'a E,
    max_depth: u8,
    stop: Arc<AtomicBool>,
}

impl<'a, E> IterativeDeepening<'a, E> {
    pub fn new(evaluator: &'a E, max_depth: u8) -> Self {
        Self {
            evaluator,
            max_depth,
            stop: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn max_depth(&self) -> u8 {
        self.max_depth
    }

    /// Flag that aborts a running search from another thread when set.
    pub fn stop_flag(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.stop)
    }

    pub fn stop(&self) {
        self.stop.store(true, Ordering::Relaxed);
    }

    pub fn choose_move<G>(&self, state: &mut G, budget: Duration) -> Option<G::Move>
    where
        G: GameState,
        E: Evaluate<G>,
    {
        self.run(state, budget).best_move
    }

    pub fn run<G>(&self, state: &mut G, budget: Duration) -> DeepeningReport<G::Move>
    where
        G: GameState,
        E: Evaluate<G>,
    {
        let start = Instant::now();
        let mut token = CancellationToken::new().with_stop_flag(self.stop_flag());
        // A budget too large to add to the clock simply has no deadline
        if let Some(deadline) = start.checked_add(budget) {
            token = token.with_deadline(deadline);
        }

        let mut report = DeepeningReport::default();

        for depth in 1..=self.max_depth {
            if start.elapsed() >= budget || token.is_cancelled() {
                debug!("out of time before depth {}", depth);
                break;
            }

            let mut searcher = Searcher::new(self.evaluator, &token);
            let outcome = searcher.best_move(state, depth);
            report.nodes += searcher.stats().nodes;

            match outcome {
                Ok(result) => {
                    info!(
                        "depth {} score {} move {:?} nodes {} time {:?}",
                        depth,
                        result.score,
                        result.best_move,
                        searcher.stats().nodes,
                        start.elapsed()
                    );
                    report.completed_depth = depth;
                    report.score = Some(result.score);
                    if result.best_move.is_some() {
                        report.best_move = result.best_move;
                    }
                    if result.score.abs() >= MATE_THRESHOLD {
                        debug!("forced mate found at depth {}", depth);
                        break;
                    }
                }
                Err(SearchError::Interrupted) => {
                    debug!("depth {} interrupted, keeping depth {}", depth, report.completed_depth);
                    report.interrupted = true;
                    break;
                }
                Err(err @ SearchError::ContractViolation { .. }) => {
                    error!("{}, keeping depth {}", err, report.completed_depth);
                    break;
                }
            }
        }

        report.elapsed = start.elapsed();
        report
    }
}
