//! Board state and the trusted mutation primitives.
//!
//! Every primitive keeps three things in step: the bitboards, the square
//! cache, and the Zobrist hash. Nothing here checks chess legality.

use std::fmt;

use crate::zobrist::ZOBRIST;

use super::attack_tables::{
    bishop_attacks, king_attacks, knight_attacks, pawn_attacks, rook_attacks,
};
use super::error::BoardError;
use super::types::{Bitboard, CastlingRights, Color, Piece, PieceKind, Square};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Board {
    pub(crate) kinds: [Bitboard; 6],
    pub(crate) colors: [Bitboard; 2],
    pub(crate) squares: [Option<Piece>; 64],
    pub(crate) side_to_move: Color,
    pub(crate) castling: CastlingRights,
    pub(crate) en_passant: Option<Square>,
    pub(crate) halfmove_clock: u32,
    pub(crate) fullmove_number: u32,
    pub(crate) hash: u64,
}

const BACK_RANK: [PieceKind; 8] = [
    PieceKind::Rook,
    PieceKind::Knight,
    PieceKind::Bishop,
    PieceKind::Queen,
    PieceKind::King,
    PieceKind::Bishop,
    PieceKind::Knight,
    PieceKind::Rook,
];

impl Board {
    /// The standard starting position.
    #[must_use]
    pub fn new() -> Self {
        let mut board = Board::empty();
        for (file, &kind) in BACK_RANK.iter().enumerate() {
            let file = file as u8;
            board.add_piece(Piece::new(kind, Color::White), Square::from_coords(0, file));
            board.add_piece(Piece::new(PieceKind::Pawn, Color::White), Square::from_coords(1, file));
            board.add_piece(Piece::new(PieceKind::Pawn, Color::Black), Square::from_coords(6, file));
            board.add_piece(Piece::new(kind, Color::Black), Square::from_coords(7, file));
        }
        board.set_castling_rights(CastlingRights::all());
        board
    }

    /// A board with no pieces, White to move, no rights.
    #[must_use]
    pub fn empty() -> Self {
        let mut board = Board {
            kinds: [Bitboard::EMPTY; 6],
            colors: [Bitboard::EMPTY; 2],
            squares: [None; 64],
            side_to_move: Color::White,
            castling: CastlingRights::none(),
            en_passant: None,
            halfmove_clock: 0,
            fullmove_number: 1,
            hash: 0,
        };
        board.hash = board.compute_hash();
        board
    }

    #[inline]
    #[must_use]
    pub fn piece_at(&self, sq: Square) -> Option<Piece> {
        self.squares[sq.index()]
    }

    /// Bitboard of one colored piece kind.
    #[inline]
    #[must_use]
    pub fn pieces(&self, kind: PieceKind, color: Color) -> Bitboard {
        self.kinds[kind.index()] & self.colors[color.index()]
    }

    #[inline]
    #[must_use]
    pub fn kind_bb(&self, kind: PieceKind) -> Bitboard {
        self.kinds[kind.index()]
    }

    #[inline]
    #[must_use]
    pub fn color_bb(&self, color: Color) -> Bitboard {
        self.colors[color.index()]
    }

    #[inline]
    #[must_use]
    pub fn occupied(&self) -> Bitboard {
        self.colors[0] | self.colors[1]
    }

    /// Square of `color`'s king. A valid position has exactly one per side.
    #[inline]
    #[must_use]
    pub fn king_square(&self, color: Color) -> Square {
        let kings = self.pieces(PieceKind::King, color);
        debug_assert!(kings.popcount() == 1, "{color} must have exactly one king");
        Square::from_index(kings.0.trailing_zeros() as u8)
    }

    #[inline]
    #[must_use]
    pub fn side_to_move(&self) -> Color {
        self.side_to_move
    }

    #[inline]
    #[must_use]
    pub fn castling_rights(&self) -> CastlingRights {
        self.castling
    }

    #[inline]
    #[must_use]
    pub fn en_passant(&self) -> Option<Square> {
        self.en_passant
    }

    #[inline]
    #[must_use]
    pub fn halfmove_clock(&self) -> u32 {
        self.halfmove_clock
    }

    #[inline]
    #[must_use]
    pub fn fullmove_number(&self) -> u32 {
        self.fullmove_number
    }

    #[inline]
    #[must_use]
    pub fn hash(&self) -> u64 {
        self.hash
    }

    /// Pieces of `by` attacking `sq`, given an explicit occupancy.
    ///
    /// Each table is applied in reverse: a knight on `sq` reaches exactly
    /// the squares a knight would attack `sq` from, and likewise for pawns
    /// with the opposite color's pattern.
    #[must_use]
    pub fn attackers_to(&self, sq: Square, by: Color, occupancy: Bitboard) -> Bitboard {
        let diagonal = self.pieces(PieceKind::Bishop, by) | self.pieces(PieceKind::Queen, by);
        let orthogonal = self.pieces(PieceKind::Rook, by) | self.pieces(PieceKind::Queen, by);
        (pawn_attacks(by.opponent(), sq) & self.pieces(PieceKind::Pawn, by))
            | (knight_attacks(sq) & self.pieces(PieceKind::Knight, by))
            | (king_attacks(sq) & self.pieces(PieceKind::King, by))
            | (bishop_attacks(sq, occupancy) & diagonal)
            | (rook_attacks(sq, occupancy) & orthogonal)
    }

    #[inline]
    #[must_use]
    pub fn is_square_attacked(&self, sq: Square, by: Color) -> bool {
        !self.attackers_to(sq, by, self.occupied()).is_empty()
    }

    /// Every square attacked by `by`, given an explicit occupancy.
    #[must_use]
    pub(crate) fn attacked_squares(&self, by: Color, occupancy: Bitboard) -> Bitboard {
        let mut attacked = Bitboard::EMPTY;
        for sq in self.pieces(PieceKind::Pawn, by) {
            attacked |= pawn_attacks(by, sq);
        }
        for sq in self.pieces(PieceKind::Knight, by) {
            attacked |= knight_attacks(sq);
        }
        for sq in self.pieces(PieceKind::Bishop, by) | self.pieces(PieceKind::Queen, by) {
            attacked |= bishop_attacks(sq, occupancy);
        }
        for sq in self.pieces(PieceKind::Rook, by) | self.pieces(PieceKind::Queen, by) {
            attacked |= rook_attacks(sq, occupancy);
        }
        attacked | king_attacks(self.king_square(by))
    }

    /// Place `piece` on an empty square.
    #[inline]
    pub(crate) fn add_piece(&mut self, piece: Piece, sq: Square) {
        debug_assert!(self.squares[sq.index()].is_none(), "add_piece on occupied {sq}");
        self.kinds[piece.kind.index()] |= Bitboard::from_square(sq);
        self.colors[piece.color.index()] |= Bitboard::from_square(sq);
        self.squares[sq.index()] = Some(piece);
        self.hash ^= ZOBRIST.piece(piece, sq);
    }

    /// Take `piece` off `sq`, where it must currently stand.
    #[inline]
    pub(crate) fn remove_piece(&mut self, piece: Piece, sq: Square) {
        debug_assert_eq!(self.squares[sq.index()], Some(piece), "remove_piece mismatch on {sq}");
        self.kinds[piece.kind.index()] ^= Bitboard::from_square(sq);
        self.colors[piece.color.index()] ^= Bitboard::from_square(sq);
        self.squares[sq.index()] = None;
        self.hash ^= ZOBRIST.piece(piece, sq);
    }

    /// Move `piece` from `from` to the empty square `to`.
    #[inline]
    pub(crate) fn move_piece(&mut self, piece: Piece, from: Square, to: Square) {
        debug_assert_eq!(self.squares[from.index()], Some(piece), "move_piece mismatch on {from}");
        debug_assert!(self.squares[to.index()].is_none(), "move_piece onto occupied {to}");
        let both = Bitboard::from_square(from) | Bitboard::from_square(to);
        self.kinds[piece.kind.index()] ^= both;
        self.colors[piece.color.index()] ^= both;
        self.squares[from.index()] = None;
        self.squares[to.index()] = Some(piece);
        self.hash ^= ZOBRIST.piece(piece, from) ^ ZOBRIST.piece(piece, to);
    }

    /// Whether a pawn stands ready to capture en passant on `target`.
    ///
    /// Only such targets enter the hash, so a double push nobody can take
    /// hashes the same as the quiet position it transposes to.
    #[inline]
    #[must_use]
    pub(crate) fn en_passant_capturable(&self, target: Square) -> bool {
        let capturer = if target.rank() == 5 {
            Color::White
        } else {
            Color::Black
        };
        !(pawn_attacks(capturer.opponent(), target) & self.pieces(PieceKind::Pawn, capturer))
            .is_empty()
    }

    /// Replace the en-passant target. The hash key of a target is judged
    /// against the current placement, so clear the old target before moving
    /// pieces and set the new one after.
    #[inline]
    pub(crate) fn set_en_passant(&mut self, target: Option<Square>) {
        if let Some(old) = self.en_passant {
            if self.en_passant_capturable(old) {
                self.hash ^= ZOBRIST.en_passant(old);
            }
        }
        self.en_passant = target;
        if let Some(new) = target {
            if self.en_passant_capturable(new) {
                self.hash ^= ZOBRIST.en_passant(new);
            }
        }
    }

    #[inline]
    pub(crate) fn set_castling_rights(&mut self, rights: CastlingRights) {
        self.hash ^= ZOBRIST.castling(self.castling) ^ ZOBRIST.castling(rights);
        self.castling = rights;
    }

    #[inline]
    pub(crate) fn toggle_side(&mut self) {
        self.side_to_move = self.side_to_move.opponent();
        self.hash ^= ZOBRIST.side();
    }

    /// Full recomputation of the Zobrist hash from the position.
    #[must_use]
    pub fn compute_hash(&self) -> u64 {
        let mut hash = ZOBRIST.castling(self.castling);
        for sq in self.occupied() {
            if let Some(piece) = self.squares[sq.index()] {
                hash ^= ZOBRIST.piece(piece, sq);
            }
        }
        if let Some(ep) = self.en_passant.filter(|&ep| self.en_passant_capturable(ep)) {
            hash ^= ZOBRIST.en_passant(ep);
        }
        if self.side_to_move == Color::Black {
            hash ^= ZOBRIST.side();
        }
        hash
    }

    /// Check internal consistency: the square cache against the bitboards,
    /// bitboard disjointness, and the incremental hash.
    pub fn validate(&self) -> Result<(), BoardError> {
        if !(self.colors[0] & self.colors[1]).is_empty() {
            return Err(BoardError::ColorOverlap);
        }
        let mut union = Bitboard::EMPTY;
        for kind in PieceKind::ALL {
            let bb = self.kinds[kind.index()];
            if !(union & bb).is_empty() {
                return Err(BoardError::KindOverlap { kind });
            }
            union |= bb;
        }
        if union != self.occupied() {
            return Err(BoardError::OccupancyMismatch);
        }
        for sq in Square::all() {
            let from_bitboards = self.occupied().contains(sq).then(|| {
                let kind = PieceKind::ALL
                    .into_iter()
                    .find(|k| self.kinds[k.index()].contains(sq))
                    .unwrap_or(PieceKind::Pawn);
                let color = if self.colors[0].contains(sq) {
                    Color::White
                } else {
                    Color::Black
                };
                Piece::new(kind, color)
            });
            if from_bitboards != self.squares[sq.index()] {
                return Err(BoardError::SquareCache {
                    square: sq,
                    cached: self.squares[sq.index()],
                    bitboards: from_bitboards,
                });
            }
        }
        let expected = self.compute_hash();
        if expected != self.hash {
            return Err(BoardError::HashMismatch {
                stored: self.hash,
                computed: expected,
            });
        }
        Ok(())
    }
}

impl Default for Board {
    fn default() -> Self {
        Board::new()
    }
}

/// ASCII diagram, rank 8 at the top.
impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for rank in (0..8u8).rev() {
            write!(f, "{} ", rank + 1)?;
            for file in 0..8u8 {
                let c = self
                    .piece_at(Square::from_coords(rank, file))
                    .map_or('.', Piece::to_fen_char);
                write!(f, " {c}")?;
            }
            writeln!(f)?;
        }
        writeln!(f, "   a b c d e f g h")?;
        write!(f, "{} to move", self.side_to_move)
    }
}
