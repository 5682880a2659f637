//! Attack tables for move generation.
//!
//! Leapers (knight, king, pawn) use plain per-square lookups. Sliders use
//! magic bitboards. `between` and `line` give the squares that block a check
//! and the ray a pinned piece may still move along.
//!
//! All tables are built lazily on first use and are immutable afterwards.

mod leapers;
mod magic;

use once_cell::sync::Lazy;

use crate::board::types::{Bitboard, Color, Square};

use leapers::{pawn_table, KING_ATTACKS, KNIGHT_ATTACKS, PAWN_ATTACKS, PAWN_PUSHES};
use magic::{ray_attacks, BISHOP_DIRECTIONS, ROOK_DIRECTIONS, SLIDERS};

#[inline]
#[must_use]
pub fn knight_attacks(sq: Square) -> Bitboard {
    KNIGHT_ATTACKS[sq.index()]
}

#[inline]
#[must_use]
pub fn king_attacks(sq: Square) -> Bitboard {
    KING_ATTACKS[sq.index()]
}

/// Squares a pawn of `color` standing on `sq` attacks.
#[inline]
#[must_use]
pub fn pawn_attacks(color: Color, sq: Square) -> Bitboard {
    pawn_table(&PAWN_ATTACKS, color, sq)
}

/// Single-push target of a pawn of `color` on `sq` (empty on the last rank).
#[inline]
#[must_use]
pub fn pawn_push(color: Color, sq: Square) -> Bitboard {
    pawn_table(&PAWN_PUSHES, color, sq)
}

#[inline]
#[must_use]
pub fn bishop_attacks(sq: Square, occupancy: Bitboard) -> Bitboard {
    SLIDERS.bishop.attacks(sq, occupancy)
}

#[inline]
#[must_use]
pub fn rook_attacks(sq: Square, occupancy: Bitboard) -> Bitboard {
    SLIDERS.rook.attacks(sq, occupancy)
}

#[inline]
#[must_use]
pub fn queen_attacks(sq: Square, occupancy: Bitboard) -> Bitboard {
    bishop_attacks(sq, occupancy) | rook_attacks(sq, occupancy)
}

struct LineTables {
    between: Box<[[Bitboard; 64]; 64]>,
    line: Box<[[Bitboard; 64]; 64]>,
}

static LINES: Lazy<LineTables> = Lazy::new(|| {
    let mut between = Box::new([[Bitboard::EMPTY; 64]; 64]);
    let mut line = Box::new([[Bitboard::EMPTY; 64]; 64]);
    for a in Square::all() {
        for &(dr, df) in ROOK_DIRECTIONS.iter().chain(BISHOP_DIRECTIONS.iter()) {
            let full = ray_attacks(a, Bitboard::EMPTY, &[(dr, df), (-dr, -df)]).with(a);
            let mut gap = Bitboard::EMPTY;
            let mut current = a.offset(dr, df);
            while let Some(b) = current {
                between[a.index()][b.index()] = gap;
                line[a.index()][b.index()] = full;
                gap = gap.with(b);
                current = b.offset(dr, df);
            }
        }
    }
    LineTables { between, line }
});

/// Squares strictly between `a` and `b`; empty unless they share a rank,
/// file or diagonal.
#[inline]
#[must_use]
pub fn between(a: Square, b: Square) -> Bitboard {
    LINES.between[a.index()][b.index()]
}

/// The whole board line through `a` and `b` (both included); empty unless
/// they are aligned.
#[inline]
#[must_use]
pub fn line(a: Square, b: Square) -> Bitboard {
    LINES.line[a.index()][b.index()]
}

/// Build every table now instead of on first use.
pub fn init() {
    Lazy::force(&KNIGHT_ATTACKS);
    Lazy::force(&KING_ATTACKS);
    Lazy::force(&PAWN_ATTACKS);
    Lazy::force(&PAWN_PUSHES);
    Lazy::force(&SLIDERS);
    Lazy::force(&LINES);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sq(s: &str) -> Square {
        s.parse().unwrap()
    }

    #[test]
    fn test_rook_attacks_with_blockers() {
        let blockers = Bitboard::from_square(sq("e6")).with(sq("c4"));
        let attacks = rook_attacks(sq("e4"), blockers);
        assert!(attacks.contains(sq("e6")));
        assert!(!attacks.contains(sq("e7")));
        assert!(attacks.contains(sq("c4")));
        assert!(!attacks.contains(sq("b4")));
        assert!(attacks.contains(sq("h4")) && attacks.contains(sq("e1")));
        assert_eq!(attacks.popcount(), 3 + 2 + 2 + 3);
    }

    #[test]
    fn test_bishop_attacks_empty_board() {
        let attacks = bishop_attacks(sq("e4"), Bitboard::EMPTY);
        for s in ["b1", "h7", "h1", "a8"] {
            assert!(attacks.contains(sq(s)), "{s}");
        }
        assert!(!attacks.contains(sq("e4")));
        assert_eq!(attacks.popcount(), 13);
    }

    #[test]
    fn test_queen_is_union() {
        let occ = Bitboard(0x00FF_0000_0000_FF00);
        let q = sq("d4");
        assert_eq!(queen_attacks(q, occ), rook_attacks(q, occ) | bishop_attacks(q, occ));
    }

    #[test]
    fn test_between_and_line() {
        assert_eq!(between(sq("a1"), sq("d4")), Bitboard::from_square(sq("b2")).with(sq("c3")));
        assert_eq!(between(sq("d4"), sq("a1")), between(sq("a1"), sq("d4")));
        assert!(between(sq("e1"), sq("e2")).is_empty());
        assert!(between(sq("a1"), sq("b3")).is_empty());

        let l = line(sq("c3"), sq("e5"));
        assert_eq!(l.popcount(), 8);
        assert!(l.contains(sq("a1")) && l.contains(sq("h8")));
        assert!(line(sq("a1"), sq("b3")).is_empty());
        assert_eq!(line(sq("e1"), sq("e8")), Bitboard(Bitboard::FILE_A.0 << 4));
    }
}
