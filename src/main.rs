use std::env;
use std::process::ExitCode;
use std::time::{Duration, Instant};

use bitchess::{Board, SearchConfig, Searcher, START_FEN};

const USAGE: &str = "usage: bitchess perft <depth> [fen]\n       bitchess divide <depth> [fen]\n       bitchess search <ms> [fen]";

fn parse_board(fen_parts: &[String]) -> Result<Board, String> {
    let fen = if fen_parts.is_empty() {
        START_FEN.to_string()
    } else {
        fen_parts.join(" ")
    };
    Board::try_from_fen(&fen).map_err(|e| format!("bad FEN: {e}"))
}

fn parse_number(text: Option<&String>, what: &str) -> Result<u64, String> {
    text.ok_or_else(|| format!("missing {what}"))?
        .parse()
        .map_err(|_| format!("invalid {what}"))
}

fn run(args: &[String]) -> Result<(), String> {
    let command = args.first().ok_or_else(|| USAGE.to_string())?;
    match command.as_str() {
        "perft" => {
            let depth = parse_number(args.get(1), "depth")? as usize;
            let mut board = parse_board(&args[2..])?;
            let start = Instant::now();
            let nodes = board.perft(depth);
            let elapsed = start.elapsed();
            let nps = nodes as f64 / elapsed.as_secs_f64().max(1e-9);
            println!("perft({depth}) = {nodes} in {elapsed:.2?} ({nps:.0} nps)");
        }
        "divide" => {
            let depth = parse_number(args.get(1), "depth")? as usize;
            let mut board = parse_board(&args[2..])?;
            let counts = board.divide(depth);
            let total: u64 = counts.iter().map(|(_, n)| n).sum();
            for (mv, nodes) in counts {
                println!("{mv}: {nodes}");
            }
            println!("\nmoves: {}  nodes: {total}", board.generate_legal_moves().len());
        }
        "search" => {
            let ms = parse_number(args.get(1), "time in ms")?;
            let board = parse_board(&args[2..])?;
            let mut searcher = Searcher::new(SearchConfig::time(Duration::from_millis(ms)));
            let result = searcher.search(&board);
            let pv: Vec<String> = result.pv.iter().map(ToString::to_string).collect();
            println!(
                "depth {} score {} nodes {} time {}ms pv {}",
                result.depth,
                result.score,
                result.nodes,
                result.elapsed.as_millis(),
                pv.join(" ")
            );
            match result.best_move {
                Some(mv) => println!("bestmove {mv}"),
                None => println!("bestmove 0000 ({:?})", board.game_status()),
            }
        }
        _ => return Err(USAGE.to_string()),
    }
    Ok(())
}

fn main() -> ExitCode {
    let args: Vec<String> = env::args().skip(1).collect();
    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(message) => {
            eprintln!("{message}");
            ExitCode::FAILURE
        }
    }
}
