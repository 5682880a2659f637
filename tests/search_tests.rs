//! Search tests to verify the engine finds correct moves in various positions.

use std::time::Duration;

use bitchess::{search, Board, SearchConfig, Searcher};

fn best_uci(fen: &str, depth: u32) -> Option<String> {
    let board = Board::from_fen(fen);
    Searcher::new(SearchConfig::depth(depth).with_tt_mb(8))
        .search(&board)
        .best_move
        .map(|mv| mv.to_string())
}

/// Test that the engine finds a simple mate in 1
#[test]
fn finds_mate_in_one_back_rank() {
    // White to move, Re8# is mate
    let best = search(
        &Board::from_fen("6k1/5ppp/8/8/8/8/8/4R1K1 w - - 0 1"),
        Duration::from_secs(2),
    );
    assert_eq!(best.map(|m| m.to_string()).as_deref(), Some("e1e8"));
}

/// Test that the engine finds a simple mate in 1 with queen
#[test]
fn finds_mate_in_one_queen() {
    // White to move, Qxf7# is mate
    let best = best_uci(
        "r1bqkb1r/pppp1ppp/2n2n2/4p2Q/2B1P3/8/PPPP1PPP/RNB1K1NR w KQkq - 0 4",
        4,
    );
    assert_eq!(best.as_deref(), Some("h5f7"), "Should find Qxf7# (scholar's mate)");
}

/// Test that the engine avoids giving away material
#[test]
fn avoids_hanging_queen() {
    let best = best_uci(
        "r1bqkbnr/pppppppp/2n5/8/4P3/5Q2/PPPP1PPP/RNB1KBNR w KQkq - 0 3",
        4,
    );
    assert!(best.is_some());
    // The b7 and d7 pawns both guard c6.
    assert_ne!(best.as_deref(), Some("f3c6"), "Should not hang the queen on c6");
}

/// Test that the engine captures free material
#[test]
fn captures_free_queen() {
    // Nxd4 wins the queen for a knight.
    let best = best_uci(
        "rnb1kbnr/pppp1ppp/8/4p3/3qP3/5N2/PPPP1PPP/RNBQKB1R w KQkq - 0 4",
        3,
    );
    assert_eq!(best.as_deref(), Some("f3d4"));
}

/// Test that search handles single legal move positions
#[test]
fn single_legal_move() {
    // White king on a1 can only escape to a2
    let best = best_uci("1r6/8/8/8/8/8/8/K5rk w - - 0 1", 4);
    assert_eq!(best.as_deref(), Some("a1a2"), "Only legal move should be Ka2");
}

/// Test that search returns None for checkmate position
#[test]
fn no_move_in_checkmate() {
    let board = Board::from_fen("rnb1kbnr/pppp1ppp/4p3/8/6Pq/5P2/PPPPP2P/RNBQKBNR w KQkq - 0 1");
    assert!(board.is_checkmate(), "Position should be checkmate");
    assert_eq!(search(&board, Duration::from_millis(100)), None);
}

/// Test that a time-limited search always comes back with a legal move
#[test]
fn time_limited_search_returns_legal_move() {
    let board = Board::from_fen(
        "r4rk1/1pp1qppp/p1np1n2/2b1p1B1/2B1P1b1/P1NP1N2/1PP1QPPP/R4RK1 w - - 0 10",
    );
    for ms in [0, 1, 20] {
        let best = search(&board, Duration::from_millis(ms));
        let mv = best.expect("position has legal moves");
        assert!(board.generate_legal_moves().contains(mv), "{mv} after {ms}ms");
    }
}

/// Test iterative deepening keeps reusing the same searcher
#[test]
fn searcher_is_reusable() {
    let mut searcher = Searcher::new(SearchConfig::depth(3).with_tt_mb(1));
    let mut board = Board::new();
    for _ in 0..6 {
        let result = searcher.search(&board);
        let mv = result.best_move.expect("game is not over");
        board.apply_move(mv);
        assert!(board.validate().is_ok());
    }
    assert!(searcher.tt().hashfull_per_mille() > 0);
}
