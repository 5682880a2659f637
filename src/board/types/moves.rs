//! Move types and move list.

use std::fmt;
use std::ops::{Deref, Index};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::piece::{Color, Piece, PieceKind};
use super::square::Square;

// Move flags (bit set, 4 bits)
const FLAG_DOUBLE_PUSH: u32 = 1 << 0;
const FLAG_CASTLING: u32 = 1 << 1;
const FLAG_EN_PASSANT: u32 = 1 << 2;
const FLAG_PROMOTION: u32 = 1 << 3;

const FROM_SHIFT: u32 = 0;
const TO_SHIFT: u32 = 6;
const PIECE_SHIFT: u32 = 12;
const CAPTURED_SHIFT: u32 = 16;
const FLAGS_SHIFT: u32 = 20;
const PROMO_SHIFT: u32 = 24;

/// Compact 32-bit move representation.
///
/// Encoding:
/// - bits 0-5:   from square
/// - bits 6-11:  to square
/// - bits 12-15: moving piece (`Piece::index`)
/// - bits 16-19: captured piece (`Piece::index + 1`, 0 = none)
/// - bits 20-23: flags (double push, castling, en passant, promotion)
/// - bits 24-26: promotion kind (`PieceKind::index`)
///
/// A move only carries meaning in the position it was generated from: the
/// captured piece in particular describes that position's target square.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Move(u32);

impl Move {
    /// The null move (used as an empty slot in tables)
    pub const NULL: Move = Move(0);

    #[inline]
    const fn pack(
        from: Square,
        to: Square,
        piece: Piece,
        captured: Option<Piece>,
        flags: u32,
        promotion: Option<PieceKind>,
    ) -> Self {
        let captured_bits = match captured {
            Some(p) => p.index() as u32 + 1,
            None => 0,
        };
        let promo_bits = match promotion {
            Some(kind) => kind.index() as u32,
            None => 0,
        };
        Move(
            ((from.as_u8() as u32) << FROM_SHIFT)
                | ((to.as_u8() as u32) << TO_SHIFT)
                | ((piece.index() as u32) << PIECE_SHIFT)
                | (captured_bits << CAPTURED_SHIFT)
                | (flags << FLAGS_SHIFT)
                | (promo_bits << PROMO_SHIFT),
        )
    }

    /// A non-capturing move with no special flags
    #[inline]
    #[must_use]
    pub const fn quiet(from: Square, to: Square, piece: Piece) -> Self {
        Move::pack(from, to, piece, None, 0, None)
    }

    /// A regular capture of `captured` on `to`
    #[inline]
    #[must_use]
    pub const fn capture(from: Square, to: Square, piece: Piece, captured: Piece) -> Self {
        Move::pack(from, to, piece, Some(captured), 0, None)
    }

    /// A pawn advancing two ranks
    #[inline]
    #[must_use]
    pub const fn double_push(from: Square, to: Square, piece: Piece) -> Self {
        Move::pack(from, to, piece, None, FLAG_DOUBLE_PUSH, None)
    }

    /// An en passant capture; the captured pawn is the opponent's
    #[inline]
    #[must_use]
    pub const fn en_passant(from: Square, to: Square, piece: Piece) -> Self {
        let captured = Piece::new(PieceKind::Pawn, piece.color.opponent());
        Move::pack(from, to, piece, Some(captured), FLAG_EN_PASSANT, None)
    }

    /// A castling move, encoded as the king's two-square step
    #[inline]
    #[must_use]
    pub const fn castle(from: Square, to: Square, king: Piece) -> Self {
        Move::pack(from, to, king, None, FLAG_CASTLING, None)
    }

    /// A promotion, optionally capturing
    #[inline]
    #[must_use]
    pub const fn promotion(
        from: Square,
        to: Square,
        pawn: Piece,
        captured: Option<Piece>,
        kind: PieceKind,
    ) -> Self {
        Move::pack(from, to, pawn, captured, FLAG_PROMOTION, Some(kind))
    }

    #[inline]
    const fn flags(self) -> u32 {
        (self.0 >> FLAGS_SHIFT) & 0xF
    }

    /// Get the source square
    #[inline]
    #[must_use]
    pub const fn from(self) -> Square {
        Square::from_index(((self.0 >> FROM_SHIFT) & 0x3F) as u8)
    }

    /// Get the destination square
    #[inline]
    #[must_use]
    pub const fn to(self) -> Square {
        Square::from_index(((self.0 >> TO_SHIFT) & 0x3F) as u8)
    }

    /// The piece making the move (the pawn, for promotions)
    #[inline]
    #[must_use]
    pub const fn piece(self) -> Piece {
        Piece::from_index(((self.0 >> PIECE_SHIFT) & 0xF) as usize)
    }

    /// The captured piece, if any (a pawn for en passant)
    #[inline]
    #[must_use]
    pub const fn captured(self) -> Option<Piece> {
        let bits = (self.0 >> CAPTURED_SHIFT) & 0xF;
        if bits == 0 {
            None
        } else {
            Some(Piece::from_index(bits as usize - 1))
        }
    }

    /// Get the promotion kind, if this is a promotion move
    #[inline]
    #[must_use]
    pub const fn promotion_kind(self) -> Option<PieceKind> {
        if self.flags() & FLAG_PROMOTION != 0 {
            Some(PieceKind::from_index(((self.0 >> PROMO_SHIFT) & 0x7) as usize))
        } else {
            None
        }
    }

    #[inline]
    #[must_use]
    pub const fn color(self) -> Color {
        self.piece().color
    }

    #[inline]
    #[must_use]
    pub const fn is_null(self) -> bool {
        self.0 == 0
    }

    /// Returns true if this move captures a piece (including en passant)
    #[inline]
    #[must_use]
    pub const fn is_capture(self) -> bool {
        (self.0 >> CAPTURED_SHIFT) & 0xF != 0
    }

    #[inline]
    #[must_use]
    pub const fn is_en_passant(self) -> bool {
        self.flags() & FLAG_EN_PASSANT != 0
    }

    #[inline]
    #[must_use]
    pub const fn is_castling(self) -> bool {
        self.flags() & FLAG_CASTLING != 0
    }

    #[inline]
    #[must_use]
    pub const fn is_double_push(self) -> bool {
        self.flags() & FLAG_DOUBLE_PUSH != 0
    }

    #[inline]
    #[must_use]
    pub const fn is_promotion(self) -> bool {
        self.flags() & FLAG_PROMOTION != 0
    }

    /// Returns true if this move is tactical (capture or promotion)
    #[inline]
    #[must_use]
    pub const fn is_tactical(self) -> bool {
        self.is_capture() || self.is_promotion()
    }

    /// Raw value, for compact storage
    #[inline]
    #[must_use]
    pub const fn as_u32(self) -> u32 {
        self.0
    }

    #[inline]
    #[must_use]
    pub const fn from_u32(value: u32) -> Self {
        Move(value)
    }
}

impl fmt::Debug for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_null() {
            return write!(f, "Move(null)");
        }
        write!(f, "Move({} {}{}", self.piece(), self.from(), self.to())?;
        if let Some(promo) = self.promotion_kind() {
            write!(f, "={}", promo.to_char().to_ascii_uppercase())?;
        }
        if let Some(captured) = self.captured() {
            write!(f, " x{captured}")?;
        }
        if self.is_castling() {
            write!(f, " castle")?;
        }
        if self.is_en_passant() {
            write!(f, " ep")?;
        }
        write!(f, ")")
    }
}

/// Long algebraic (UCI) notation: `e2e4`, `e7e8q`.
impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_null() {
            return write!(f, "0000");
        }
        write!(f, "{}{}", self.from(), self.to())?;
        if let Some(promo) = self.promotion_kind() {
            write!(f, "{}", promo.to_char())?;
        }
        Ok(())
    }
}

/// Initial capacity of a move list; no legal position exceeds it, but the
/// list grows if it ever has to.
pub(crate) const MAX_MOVES: usize = 256;
pub(crate) const MAX_PLY: usize = 128;

/// Growable list of moves, meant to be reused across generator calls.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MoveList {
    moves: Vec<Move>,
}

impl MoveList {
    #[must_use]
    pub fn new() -> Self {
        MoveList {
            moves: Vec::with_capacity(MAX_MOVES),
        }
    }

    #[inline]
    pub(crate) fn push(&mut self, mv: Move) {
        self.moves.push(mv);
    }

    /// Empty the list, keeping its allocation.
    #[inline]
    pub fn clear(&mut self) {
        self.moves.clear();
    }

    #[must_use]
    pub fn as_slice(&self) -> &[Move] {
        &self.moves
    }

    pub(crate) fn as_mut_slice(&mut self) -> &mut [Move] {
        &mut self.moves
    }

    #[must_use]
    pub fn contains(&self, mv: Move) -> bool {
        self.moves.contains(&mv)
    }

    pub(crate) fn retain(&mut self, f: impl FnMut(&Move) -> bool) {
        self.moves.retain(f);
    }
}

impl Deref for MoveList {
    type Target = [Move];

    fn deref(&self) -> &[Move] {
        &self.moves
    }
}

impl Index<usize> for MoveList {
    type Output = Move;

    fn index(&self, idx: usize) -> &Self::Output {
        &self.moves[idx]
    }
}

impl<'a> IntoIterator for &'a MoveList {
    type Item = &'a Move;
    type IntoIter = std::slice::Iter<'a, Move>;

    fn into_iter(self) -> Self::IntoIter {
        self.moves.iter()
    }
}

impl IntoIterator for MoveList {
    type Item = Move;
    type IntoIter = std::vec::IntoIter<Move>;

    fn into_iter(self) -> Self::IntoIter {
        self.moves.into_iter()
    }
}

impl FromIterator<Move> for MoveList {
    fn from_iter<I: IntoIterator<Item = Move>>(iter: I) -> Self {
        MoveList {
            moves: iter.into_iter().collect(),
        }
    }
}

/// A scored move for move ordering.
#[derive(Clone, Copy, Debug)]
pub(crate) struct ScoredMove {
    pub mv: Move,
    pub score: i32,
}

/// Scored moves with incremental best-first selection.
#[derive(Clone, Debug, Default)]
pub(crate) struct ScoredMoveList {
    moves: Vec<ScoredMove>,
}

impl ScoredMoveList {
    pub fn with_capacity(capacity: usize) -> Self {
        ScoredMoveList {
            moves: Vec::with_capacity(capacity),
        }
    }

    #[inline]
    pub fn push(&mut self, mv: Move, score: i32) {
        self.moves.push(ScoredMove { mv, score });
    }

    pub fn len(&self) -> usize {
        self.moves.len()
    }

    /// Partial sort: find the best move from index `start` onwards and swap
    /// it to position `start`. Cheaper than a full sort when a cutoff comes
    /// early.
    #[inline]
    pub fn pick_best(&mut self, start: usize) -> Option<ScoredMove> {
        if start >= self.moves.len() {
            return None;
        }
        let mut best_idx = start;
        let mut best_score = self.moves[start].score;
        for i in (start + 1)..self.moves.len() {
            if self.moves[i].score > best_score {
                best_score = self.moves[i].score;
                best_idx = i;
            }
        }
        self.moves.swap(start, best_idx);
        Some(self.moves[start])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sq(s: &str) -> Square {
        s.parse().unwrap()
    }

    #[test]
    fn test_move_fields() {
        let pawn = Piece::new(PieceKind::Pawn, Color::White);
        let rook = Piece::new(PieceKind::Rook, Color::Black);
        let mv = Move::promotion(sq("b7"), sq("a8"), pawn, Some(rook), PieceKind::Knight);
        assert_eq!(mv.from(), sq("b7"));
        assert_eq!(mv.to(), sq("a8"));
        assert_eq!(mv.piece(), pawn);
        assert_eq!(mv.captured(), Some(rook));
        assert_eq!(mv.promotion_kind(), Some(PieceKind::Knight));
        assert!(mv.is_capture() && mv.is_promotion());
        assert!(!mv.is_castling() && !mv.is_en_passant());
        assert_eq!(mv.to_string(), "b7a8n");
    }

    #[test]
    fn test_en_passant_captures_opposing_pawn() {
        let pawn = Piece::new(PieceKind::Pawn, Color::Black);
        let mv = Move::en_passant(sq("d4"), sq("e3"), pawn);
        assert_eq!(
            mv.captured(),
            Some(Piece::new(PieceKind::Pawn, Color::White))
        );
        assert!(mv.is_en_passant() && mv.is_capture());
        assert_eq!(mv.promotion_kind(), None);
    }

    #[test]
    fn test_null_move_is_distinct() {
        let king = Piece::new(PieceKind::King, Color::White);
        assert!(Move::NULL.is_null());
        assert!(!Move::castle(Square::E1, Square::G1, king).is_null());
        // A white pawn quiet move from a1 would share the null encoding only
        // if from == to, which no generated move has.
        let pawn = Piece::new(PieceKind::Pawn, Color::White);
        assert!(!Move::quiet(Square::A1, sq("a2"), pawn).is_null());
    }

    #[test]
    fn test_move_list_grows_past_initial_capacity() {
        let pawn = Piece::new(PieceKind::Pawn, Color::White);
        let mut list = MoveList::new();
        for _ in 0..(MAX_MOVES + 10) {
            list.push(Move::quiet(sq("a2"), sq("a3"), pawn));
        }
        assert_eq!(list.len(), MAX_MOVES + 10);
        list.clear();
        assert!(list.is_empty());
    }

    #[test]
    fn test_pick_best_orders_descending() {
        let pawn = Piece::new(PieceKind::Pawn, Color::White);
        let a = Move::quiet(sq("a2"), sq("a3"), pawn);
        let b = Move::quiet(sq("b2"), sq("b3"), pawn);
        let c = Move::quiet(sq("c2"), sq("c3"), pawn);
        let mut list = ScoredMoveList::with_capacity(3);
        list.push(a, 5);
        list.push(b, 50);
        list.push(c, 10);
        let order: Vec<Move> = (0..3).filter_map(|i| list.pick_best(i)).map(|s| s.mv).collect();
        assert_eq!(order, vec![b, c, a]);
    }
}
