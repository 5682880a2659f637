//! Core chess types.
//!
//! This module contains the fundamental value types used throughout the crate:
//! - `Piece`, `PieceKind` and `Color`
//! - `Square` - compact board square representation (u8)
//! - `Bitboard` - 64-bit board representation
//! - `Move` and `MoveList` - move representation
//! - `CastlingRights` - castling state

mod bitboard;
mod castling;
mod moves;
mod piece;
mod square;

pub use bitboard::{Bitboard, BitboardIter};
pub use castling::CastlingRights;
pub use moves::{Move, MoveList};
pub use piece::{Color, Piece, PieceKind};
pub use square::Square;

pub(crate) use castling::{rook_home, rook_home_wing};
pub(crate) use moves::{ScoredMoveList, MAX_PLY};
pub(crate) use piece::PROMOTION_KINDS;
