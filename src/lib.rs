//! Bitboard chess engine core: legal move generation, make/undo with
//! incremental Zobrist hashing, and an iterative-deepening alpha-beta search.
//!
//! ```
//! use std::time::Duration;
//! use bitchess::{search, Board};
//!
//! let board = Board::from_fen("6k1/5ppp/8/8/8/8/8/4R1K1 w - - 0 1");
//! let best = search(&board, Duration::from_secs(1));
//! assert_eq!(best.map(|mv| mv.to_string()), Some("e1e8".to_string()));
//! ```

pub mod board;
pub mod tt;
mod zobrist;

pub use board::{
    search, Board, BoardError, Color, FenError, GameStatus, Move, MoveError, MoveList, Piece,
    PieceKind, SearchConfig, SearchParams, SearchResult, Searcher, Square, UndoRecord, START_FEN,
};
pub use tt::TranspositionTable;
