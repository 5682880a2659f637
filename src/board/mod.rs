//! Chess board representation and game logic.
//!
//! Uses bitboards for legal move generation and position evaluation.
//! Supports full chess rules including castling, en passant, and promotions.
//!
//! # Example
//! ```
//! use bitchess::board::Board;
//!
//! let mut board = Board::new();
//! let moves = board.generate_legal_moves();
//! assert_eq!(moves.len(), 20);
//!
//! let undo = board.apply_move(moves[0]);
//! board.undo_move(&undo);
//! assert_eq!(board, Board::new());
//! ```

pub mod attack_tables;
mod error;
mod eval;
mod fen;
mod make_unmake;
mod movegen;
pub(crate) mod search;
mod state;
mod types;

#[cfg(test)]
mod tests;

pub use error::{BoardError, FenError, MoveError, SquareError};
pub use fen::START_FEN;
pub use make_unmake::UndoRecord;
pub use movegen::GameStatus;
pub use state::Board;
pub use types::{
    Bitboard, BitboardIter, CastlingRights, Color, Move, MoveList, Piece, PieceKind, Square,
};

pub use search::{
    search, SearchConfig, SearchParams, SearchResult, Searcher, DEFAULT_MAX_DEPTH, DEFAULT_TT_MB,
};
