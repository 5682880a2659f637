//! Precomputed attack tables for leaper pieces (knights, kings, pawns).

use once_cell::sync::Lazy;

use crate::board::types::{Bitboard, Color, Square};

const KNIGHT_DELTAS: [(i8, i8); 8] = [
    (2, 1),
    (1, 2),
    (-1, 2),
    (-2, 1),
    (-2, -1),
    (-1, -2),
    (1, -2),
    (2, -1),
];

const KING_DELTAS: [(i8, i8); 8] = [
    (1, 0),
    (-1, 0),
    (0, 1),
    (0, -1),
    (1, 1),
    (1, -1),
    (-1, 1),
    (-1, -1),
];

/// Union of the on-board targets reached by each (rank, file) step.
/// `Square::offset` rejects steps that would wrap around a board edge.
fn leaper_table(deltas: &[(i8, i8)]) -> [Bitboard; 64] {
    let mut table = [Bitboard::EMPTY; 64];
    for sq in Square::all() {
        table[sq.index()] = deltas
            .iter()
            .filter_map(|&(dr, df)| sq.offset(dr, df))
            .fold(Bitboard::EMPTY, Bitboard::with);
    }
    table
}

pub(super) static KNIGHT_ATTACKS: Lazy<[Bitboard; 64]> = Lazy::new(|| leaper_table(&KNIGHT_DELTAS));

pub(super) static KING_ATTACKS: Lazy<[Bitboard; 64]> = Lazy::new(|| leaper_table(&KING_DELTAS));

/// `PAWN_ATTACKS[color][sq]`: squares a pawn of `color` on `sq` captures on.
pub(super) static PAWN_ATTACKS: Lazy<[[Bitboard; 64]; 2]> = Lazy::new(|| {
    [
        leaper_table(&[(1, -1), (1, 1)]),
        leaper_table(&[(-1, -1), (-1, 1)]),
    ]
});

/// `PAWN_PUSHES[color][sq]`: the single-push target of a pawn of `color` on `sq`.
pub(super) static PAWN_PUSHES: Lazy<[[Bitboard; 64]; 2]> =
    Lazy::new(|| [leaper_table(&[(1, 0)]), leaper_table(&[(-1, 0)])]);

#[inline]
pub(super) fn pawn_table(table: &[[Bitboard; 64]; 2], color: Color, sq: Square) -> Bitboard {
    table[color.index()][sq.index()]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sq(s: &str) -> Square {
        s.parse().unwrap()
    }

    #[test]
    fn test_knight_corner_and_center() {
        assert_eq!(KNIGHT_ATTACKS[Square::A1.index()].popcount(), 2);
        assert_eq!(KNIGHT_ATTACKS[sq("e4").index()].popcount(), 8);
        // g1 knight must not wrap onto the a-file
        let g1 = KNIGHT_ATTACKS[Square::G1.index()];
        assert!(g1.contains(sq("h3")) && g1.contains(sq("f3")) && g1.contains(sq("e2")));
        assert_eq!(g1 & Bitboard::FILE_A, Bitboard::EMPTY);
    }

    #[test]
    fn test_king_edge() {
        assert_eq!(KING_ATTACKS[Square::H8.index()].popcount(), 3);
        assert_eq!(KING_ATTACKS[sq("h4").index()] & Bitboard::FILE_A, Bitboard::EMPTY);
    }

    #[test]
    fn test_pawn_tables_by_color() {
        let white = pawn_table(&PAWN_ATTACKS, Color::White, sq("a2"));
        assert_eq!(white, Bitboard::from_square(sq("b3")));
        let black = pawn_table(&PAWN_ATTACKS, Color::Black, sq("e7"));
        assert_eq!(black.popcount(), 2);
        assert!(black.contains(sq("d6")) && black.contains(sq("f6")));
        assert_eq!(
            pawn_table(&PAWN_PUSHES, Color::Black, sq("e7")),
            Bitboard::from_square(sq("e6"))
        );
        assert!(pawn_table(&PAWN_PUSHES, Color::White, sq("e8")).is_empty());
    }
}
