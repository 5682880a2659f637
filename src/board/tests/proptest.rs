//! Property-based tests using proptest.

use crate::board::{Board, Move, UndoRecord};
use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Strategy to generate a random legal move sequence length
fn move_count_strategy() -> impl Strategy<Value = usize> {
    1..=40usize
}

/// Strategy to generate a random seed for move selection
fn seed_strategy() -> impl Strategy<Value = u64> {
    any::<u64>()
}

/// Starting points with castling, en passant and promotion chances.
const START_FENS: &[&str] = &[
    "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1",
    "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
    "rnbq1k1r/pp1Pbppp/2p5/8/2B5/8/PPP1NnPP/RNBQK2R w KQ - 1 8",
    "n1n5/PPPk4/8/8/8/8/4Kppp/5N1N b - - 0 1",
];

/// Play up to `num_moves` random legal moves, returning the undo stack.
fn random_playout(board: &mut Board, rng: &mut StdRng, num_moves: usize) -> Vec<UndoRecord> {
    let mut history = Vec::new();
    for _ in 0..num_moves {
        let moves = board.generate_legal_moves();
        if moves.is_empty() {
            break;
        }
        let mv: Move = moves[rng.gen_range(0..moves.len())];
        history.push(board.apply_move(mv));
    }
    history
}

proptest! {
    /// Property: apply_move followed by undo_move restores board state exactly
    #[test]
    fn prop_apply_undo_restores_state(
        seed in seed_strategy(),
        num_moves in move_count_strategy(),
        start in 0..START_FENS.len(),
    ) {
        let mut board = Board::from_fen(START_FENS[start]);
        let initial = board.clone();
        let mut rng = StdRng::seed_from_u64(seed);

        let mut history = random_playout(&mut board, &mut rng, num_moves);
        while let Some(undo) = history.pop() {
            board.undo_move(&undo);
        }

        prop_assert_eq!(board, initial);
    }

    /// Property: the incremental hash always equals a full recomputation
    #[test]
    fn prop_hash_consistency(
        seed in seed_strategy(),
        num_moves in move_count_strategy(),
        start in 0..START_FENS.len(),
    ) {
        let mut board = Board::from_fen(START_FENS[start]);
        let mut rng = StdRng::seed_from_u64(seed);

        for _ in 0..num_moves {
            let moves = board.generate_legal_moves();
            if moves.is_empty() {
                break;
            }
            board.apply_move(moves[rng.gen_range(0..moves.len())]);
            prop_assert_eq!(board.hash(), board.compute_hash());
            prop_assert!(board.validate().is_ok(), "{:?}", board.validate());
        }
    }

    /// Property: FEN round-trip preserves position
    #[test]
    fn prop_fen_roundtrip(seed in seed_strategy(), num_moves in move_count_strategy()) {
        let mut board = Board::new();
        let mut rng = StdRng::seed_from_u64(seed);
        random_playout(&mut board, &mut rng, num_moves);

        let restored = Board::from_fen(&board.to_fen());
        prop_assert_eq!(restored, board);
    }

    /// Property: legal moves are always legal (no self-check), and the
    /// captures-only list is exactly the tactical part of the full list
    #[test]
    fn prop_legal_moves_are_legal(seed in seed_strategy(), start in 0..START_FENS.len()) {
        let mut board = Board::from_fen(START_FENS[start]);
        let mut rng = StdRng::seed_from_u64(seed);

        for _ in 0..10 {
            let moves = board.generate_legal_moves();
            if moves.is_empty() {
                break;
            }

            let us = board.side_to_move();
            for &mv in &moves {
                let undo = board.apply_move(mv);
                prop_assert!(!board.is_square_attacked(board.king_square(us), us.opponent()),
                    "Legal move left king in check: {:?}", mv);
                board.undo_move(&undo);
            }

            let mut tactical: Vec<Move> =
                moves.iter().copied().filter(|m| m.is_capture() || m.is_promotion()).collect();
            let mut captures: Vec<Move> = board.generate_legal_captures().into_iter().collect();
            tactical.sort_by_key(|m| m.as_u32());
            captures.sort_by_key(|m| m.as_u32());
            prop_assert_eq!(tactical, captures);

            board.apply_move(moves[rng.gen_range(0..moves.len())]);
        }
    }
}
