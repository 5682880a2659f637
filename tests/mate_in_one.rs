use std::time::Duration;

use serde::Deserialize;

use bitchess::{Board, GameStatus, SearchConfig, Searcher};

#[derive(Deserialize)]
struct ProblemSet {
    problems: Vec<Problem>,
}

#[derive(Deserialize)]
struct Problem {
    name: String,
    fen: String,
    solution: String,
}

fn load() -> ProblemSet {
    serde_json::from_str(include_str!("data/mate_in_one.json")).expect("invalid mate_in_one.json")
}

#[test]
fn mate_in_one_solutions_are_mate() {
    for problem in load().problems {
        let mut board = Board::from_fen(&problem.fen);
        let mv = board
            .parse_move(&problem.solution)
            .unwrap_or_else(|e| panic!("{}: {e}", problem.name));
        board.apply_move(mv);
        assert_eq!(board.game_status(), GameStatus::Checkmate, "{}", problem.name);
    }
}

#[test]
fn mate_in_one_suite() {
    let mut searcher = Searcher::new(
        SearchConfig::depth(3)
            .with_time(Duration::from_secs(10))
            .with_tt_mb(4),
    );
    for problem in load().problems {
        let board = Board::from_fen(&problem.fen);
        let result = searcher.search(&board);
        let mv = result
            .best_move
            .unwrap_or_else(|| panic!("{}: no move", problem.name));

        let mut after = board.clone();
        after.apply_move(mv);
        assert!(
            after.is_checkmate(),
            "{}: {mv} is not mate (score {})",
            problem.name,
            result.score
        );
    }
}
