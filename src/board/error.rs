//! Error types for chess board operations.

use thiserror::Error;

/// Error type for FEN parsing failures
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FenError {
    /// FEN string has too few fields (needs at least 4)
    #[error("FEN must have at least 4 fields, found {found}")]
    TooFewParts { found: usize },
    /// Invalid piece character in the placement field
    #[error("invalid piece character '{char}' in FEN")]
    InvalidPiece { char: char },
    /// Invalid castling character
    #[error("invalid castling character '{char}' in FEN")]
    InvalidCastling { char: char },
    /// Invalid side to move (must be 'w' or 'b')
    #[error("invalid side to move '{found}', expected 'w' or 'b'")]
    InvalidSideToMove { found: String },
    /// Invalid en passant square
    #[error("invalid en passant square '{found}'")]
    InvalidEnPassant { found: String },
    /// Placement field does not have exactly 8 ranks
    #[error("placement field has {ranks} ranks, expected 8")]
    InvalidRank { ranks: usize },
    /// A rank does not describe exactly 8 files
    #[error("rank {rank} describes {files} files, expected 8")]
    TooManyFiles { rank: usize, files: usize },
    /// Half-move clock or full-move number is not a number
    #[error("invalid move counter '{found}'")]
    InvalidClock { found: String },
    /// A side does not have exactly one king
    #[error("{color} has {count} kings, expected exactly 1")]
    KingCount {
        color: crate::board::Color,
        count: u32,
    },
    /// The side that just moved was left in check
    #[error("{color} is in check but not to move")]
    OpponentInCheck { color: crate::board::Color },
}

/// Error type for moves supplied from outside the generator
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MoveError {
    /// Move text has invalid length (must be 4-5 characters)
    #[error("move must be 4-5 characters, found {len}")]
    InvalidLength { len: usize },
    /// Invalid square notation in move text
    #[error("invalid square in move '{notation}'")]
    InvalidSquare { notation: String },
    /// Invalid promotion piece
    #[error("invalid promotion piece '{char}'")]
    InvalidPromotion { char: char },
    /// Move is not legal in the current position
    #[error("illegal move {notation}")]
    Illegal { notation: String },
}

/// Error type for square conversions
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SquareError {
    /// Index outside 0..64
    #[error("square index {index} out of bounds (must be 0-63)")]
    IndexOutOfBounds { index: u8 },
    /// Invalid algebraic notation
    #[error("invalid square notation '{notation}'")]
    InvalidNotation { notation: String },
}

/// Internal inconsistency found by [`Board::validate`](crate::board::Board::validate)
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BoardError {
    #[error("color bitboards overlap")]
    ColorOverlap,
    #[error("{kind:?} bitboard overlaps another kind")]
    KindOverlap { kind: crate::board::PieceKind },
    #[error("kind and color bitboards disagree")]
    OccupancyMismatch,
    #[error("square cache has {cached:?} on {square}, bitboards have {bitboards:?}")]
    SquareCache {
        square: crate::board::Square,
        cached: Option<crate::board::Piece>,
        bitboards: Option<crate::board::Piece>,
    },
    #[error("hash {stored:#018x} differs from recomputed {computed:#018x}")]
    HashMismatch { stored: u64, computed: u64 },
}
