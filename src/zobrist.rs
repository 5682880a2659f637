//! Zobrist hashing for chess positions.
//!
//! Provides incrementally-updatable 64-bit position hashes for the
//! transposition table and repetition detection.

use once_cell::sync::Lazy;
use rand::prelude::*;

use crate::board::{CastlingRights, Piece, Square};

pub(crate) struct ZobristKeys {
    /// `piece_keys[piece.index()][square]`
    piece_keys: [[u64; 64]; 12],
    /// One key per full castling state (4-bit mask).
    castling_keys: [u64; 16],
    /// `en_passant_keys[file]` (only the file of the target matters)
    en_passant_keys: [u64; 8],
    black_to_move_key: u64,
}

impl ZobristKeys {
    fn new() -> Self {
        let mut rng = StdRng::seed_from_u64(1234567890_u64); // fixed seed, reproducible hashes
        let mut piece_keys = [[0; 64]; 12];
        for piece in &mut piece_keys {
            for key in piece.iter_mut() {
                *key = rng.gen();
            }
        }

        let mut castling_keys = [0; 16];
        for key in &mut castling_keys {
            *key = rng.gen();
        }

        let mut en_passant_keys = [0; 8];
        for key in &mut en_passant_keys {
            *key = rng.gen();
        }

        ZobristKeys {
            piece_keys,
            castling_keys,
            en_passant_keys,
            black_to_move_key: rng.gen(),
        }
    }

    #[inline]
    pub(crate) fn piece(&self, piece: Piece, sq: Square) -> u64 {
        self.piece_keys[piece.index()][sq.index()]
    }

    #[inline]
    pub(crate) fn castling(&self, rights: CastlingRights) -> u64 {
        self.castling_keys[rights.as_u8() as usize]
    }

    #[inline]
    pub(crate) fn en_passant(&self, target: Square) -> u64 {
        self.en_passant_keys[target.file() as usize]
    }

    #[inline]
    pub(crate) fn side(&self) -> u64 {
        self.black_to_move_key
    }
}

pub(crate) static ZOBRIST: Lazy<ZobristKeys> = Lazy::new(ZobristKeys::new);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{Color, PieceKind};

    #[test]
    fn test_keys_are_distinct() {
        let mut seen = std::collections::HashSet::new();
        for piece_keys in &ZOBRIST.piece_keys {
            for &key in piece_keys {
                assert!(seen.insert(key));
            }
        }
        for &key in ZOBRIST.castling_keys.iter().chain(&ZOBRIST.en_passant_keys) {
            assert!(seen.insert(key));
        }
        assert!(seen.insert(ZOBRIST.side()));
    }

    #[test]
    fn test_en_passant_key_depends_only_on_file() {
        let e3: Square = "e3".parse().unwrap();
        let e6: Square = "e6".parse().unwrap();
        assert_eq!(ZOBRIST.en_passant(e3), ZOBRIST.en_passant(e6));
        let wp = Piece::new(PieceKind::Pawn, Color::White);
        let bp = Piece::new(PieceKind::Pawn, Color::Black);
        assert_ne!(ZOBRIST.piece(wp, e3), ZOBRIST.piece(bp, e3));
    }
}
