mod common;

use chess_engine::{CancellationToken, Evaluate, Evaluator, Searcher, MATE_SCORE, MATE_THRESHOLD};
use common::{minimax, random_position, TreeEvaluator, TreeGame};
use proptest::prelude::*;

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn pruning_matches_minimax_on_trees(
        seed in any::<u64>(),
        branching in 1usize..5,
        height in 1usize..6,
        depth in 1u8..6,
    ) {
        let token = CancellationToken::new();
        let mut game = TreeGame::new(seed, branching, height);

        let (expected_score, expected_move) = minimax(&mut game, &TreeEvaluator, depth, true);
        let mut searcher = Searcher::new(&TreeEvaluator, &token);
        let result = searcher.best_move(&mut game, depth).unwrap();

        prop_assert_eq!(result.score, expected_score);
        prop_assert_eq!(result.best_move, expected_move);
        prop_assert!(game.path().is_empty());
    }

    #[test]
    fn search_is_deterministic_on_trees(seed in any::<u64>(), depth in 1u8..5) {
        let token = CancellationToken::new();
        let mut game = TreeGame::new(seed, 4, 5);

        let first = Searcher::new(&TreeEvaluator, &token).best_move(&mut game, depth).unwrap();
        let second = Searcher::new(&TreeEvaluator, &token).best_move(&mut game, depth).unwrap();
        prop_assert_eq!(first, second);
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(12))]

    #[test]
    fn pruning_matches_minimax_on_chess(seed in any::<u64>(), plies in 0usize..16) {
        let evaluator = Evaluator::default();
        let token = CancellationToken::new();
        let mut board = random_position(seed, plies);

        let (expected_score, expected_move) = minimax(&mut board, &evaluator, 2, true);
        let mut searcher = Searcher::new(&evaluator, &token);
        let result = searcher.best_move(&mut board, 2).unwrap();

        prop_assert_eq!(result.score, expected_score);
        prop_assert_eq!(result.best_move, expected_move);
    }

    #[test]
    fn search_leaves_position_unchanged(seed in any::<u64>(), plies in 0usize..30, depth in 1u8..4) {
        let evaluator = Evaluator::default();
        let token = CancellationToken::new();
        let mut board = random_position(seed, plies);
        let before = board.to_fen();

        let first = Searcher::new(&evaluator, &token).best_move(&mut board, depth).unwrap();
        prop_assert_eq!(board.to_fen(), before);
        prop_assert_eq!(board.applied_moves(), 0);

        let second = Searcher::new(&evaluator, &token).best_move(&mut board, depth).unwrap();
        prop_assert_eq!(first, second);
    }

    #[test]
    fn static_scores_stay_below_mate(seed in any::<u64>(), plies in 0usize..60) {
        let board = random_position(seed, plies);
        let score = Evaluator::default().evaluate(&board);
        if board.is_checkmate() {
            prop_assert_eq!(score, -MATE_SCORE);
        } else {
            prop_assert!(score.abs() < MATE_THRESHOLD, "score {} in a live position", score);
        }
    }
}
