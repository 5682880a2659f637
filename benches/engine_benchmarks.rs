//! Benchmarks for chess engine performance.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use bitchess::board::attack_tables;
use bitchess::{Board, SearchConfig, Searcher, Square};

const KIWIPETE: &str = "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1";

fn bench_perft(c: &mut Criterion) {
    attack_tables::init();
    let mut group = c.benchmark_group("perft");

    // Starting position
    let mut board = Board::new();

    for depth in 1..=4 {
        group.bench_with_input(BenchmarkId::new("startpos", depth), &depth, |b, &depth| {
            b.iter(|| board.perft(black_box(depth)))
        });
    }

    // Complex middlegame position (Kiwipete)
    let mut kiwipete = Board::from_fen(KIWIPETE);

    for depth in 1..=3 {
        group.bench_with_input(BenchmarkId::new("kiwipete", depth), &depth, |b, &depth| {
            b.iter(|| kiwipete.perft(black_box(depth)))
        });
    }

    group.finish();
}

fn bench_movegen(c: &mut Criterion) {
    let mut group = c.benchmark_group("movegen");

    let positions = [
        ("startpos", Board::new()),
        (
            "middlegame",
            Board::from_fen("r1bqkb1r/pppp1ppp/2n2n2/4p3/2B1P3/5N2/PPPP1PPP/RNBQK2R w KQkq - 4 4"),
        ),
        ("kiwipete", Board::from_fen(KIWIPETE)),
    ];

    for (name, board) in &positions {
        group.bench_function(*name, |b| b.iter(|| black_box(board.generate_legal_moves())));
    }
    let kiwipete = Board::from_fen(KIWIPETE);
    group.bench_function("kiwipete_captures", |b| {
        b.iter(|| black_box(kiwipete.generate_legal_captures()))
    });

    group.finish();
}

fn bench_make_unmake(c: &mut Criterion) {
    let mut board = Board::from_fen(KIWIPETE);
    let moves = board.generate_legal_moves();
    c.bench_function("make_unmake/kiwipete_all", |b| {
        b.iter(|| {
            for &mv in &moves {
                let undo = board.apply_move(mv);
                black_box(board.hash());
                board.undo_move(&undo);
            }
        })
    });
}

fn bench_attacks(c: &mut Criterion) {
    let occupancy = Board::from_fen(KIWIPETE).occupied();
    c.bench_function("attacks/queen_all_squares", |b| {
        b.iter(|| {
            Square::all()
                .map(|sq| attack_tables::queen_attacks(sq, black_box(occupancy)).popcount())
                .sum::<u32>()
        })
    });
}

fn bench_search(c: &mut Criterion) {
    let mut group = c.benchmark_group("search");
    group.sample_size(10); // Fewer samples for slower benchmarks

    // Starting position search
    for depth in [3, 4, 5] {
        group.bench_with_input(BenchmarkId::new("startpos", depth), &depth, |b, &depth| {
            b.iter(|| Searcher::new(SearchConfig::depth(depth)).search(&Board::new()))
        });
    }

    // Tactical position
    let tactical =
        Board::from_fen("r1bqkb1r/pppp1Qpp/2n2n2/4p3/2B1P3/8/PPPP1PPP/RNB1K1NR b KQkq - 0 4");
    for depth in [3, 4] {
        group.bench_with_input(BenchmarkId::new("tactical", depth), &depth, |b, &depth| {
            b.iter(|| Searcher::new(SearchConfig::depth(depth)).search(&tactical))
        });
    }

    group.finish();
}

fn bench_eval(c: &mut Criterion) {
    let mut group = c.benchmark_group("eval");

    // Various positions to evaluate
    let positions = [
        (
            "startpos",
            "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1",
        ),
        (
            "middlegame",
            "r1bqkb1r/pppp1ppp/2n2n2/4p3/2B1P3/5N2/PPPP1PPP/RNBQK2R w KQkq - 4 4",
        ),
        ("endgame", "8/5k2/8/8/8/8/5K2/4R3 w - - 0 1"),
    ];

    for (name, fen) in positions {
        let board = Board::from_fen(fen);
        group.bench_with_input(BenchmarkId::new("position", name), &board, |b, board| {
            b.iter(|| black_box(board.evaluate()))
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_perft,
    bench_movegen,
    bench_make_unmake,
    bench_attacks,
    bench_search,
    bench_eval
);
criterion_main!(benches);
