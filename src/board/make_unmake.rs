//! Applying and reverting moves.
//!
//! `apply_move` trusts its input: the move must have been generated for the
//! current position. Moves from outside go through `try_apply_move` or
//! `parse_move`, which check them against the legal move list first.

use super::error::MoveError;
use super::types::{rook_home, rook_home_wing, Color, Move, Piece, PieceKind, Square};
use super::{Board, CastlingRights};

/// What `undo_move` needs to restore the position before `mv`.
///
/// Everything else is recovered from the move itself: the captured piece is
/// encoded in it, and the full-move number is reversed arithmetically.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct UndoRecord {
    pub(crate) mv: Move,
    pub(crate) castling: CastlingRights,
    pub(crate) en_passant: Option<Square>,
    pub(crate) halfmove_clock: u32,
    pub(crate) hash: u64,
}

impl UndoRecord {
    #[inline]
    #[must_use]
    pub fn mv(&self) -> Move {
        self.mv
    }
}

/// Rook squares (from, to) for a castling move landing the king on `king_to`.
#[inline]
fn castling_rook_squares(color: Color, king_to: Square) -> (Square, Square) {
    let kingside = king_to.file() == 6;
    let rook_to_file = if kingside { 5 } else { 3 };
    (
        rook_home(color, kingside),
        Square::from_coords(king_to.rank(), rook_to_file),
    )
}

/// The square of the pawn taken en passant: beside the capturing pawn's origin.
#[inline]
fn en_passant_victim(mv: Move) -> Square {
    Square::from_coords(mv.from().rank(), mv.to().file())
}

impl Board {
    /// Apply a legal move and return the record that reverts it.
    pub fn apply_move(&mut self, mv: Move) -> UndoRecord {
        debug_assert!(!mv.is_null(), "apply_move called with the null move");
        let undo = UndoRecord {
            mv,
            castling: self.castling,
            en_passant: self.en_passant,
            halfmove_clock: self.halfmove_clock,
            hash: self.hash,
        };

        let us = self.side_to_move;
        let piece = mv.piece();
        let (from, to) = (mv.from(), mv.to());
        self.set_en_passant(None);

        if mv.is_castling() {
            let rook = Piece::new(PieceKind::Rook, us);
            let (rook_from, rook_to) = castling_rook_squares(us, to);
            self.move_piece(piece, from, to);
            self.move_piece(rook, rook_from, rook_to);
        } else if mv.is_en_passant() {
            if let Some(victim) = mv.captured() {
                self.remove_piece(victim, en_passant_victim(mv));
            }
            self.move_piece(piece, from, to);
        } else {
            if let Some(victim) = mv.captured() {
                self.remove_piece(victim, to);
            }
            match mv.promotion_kind() {
                Some(kind) => {
                    self.remove_piece(piece, from);
                    self.add_piece(Piece::new(kind, us), to);
                }
                None => self.move_piece(piece, from, to),
            }
        }

        let target = mv
            .is_double_push()
            .then(|| Square::from_index(((from.index() + to.index()) / 2) as u8));
        self.set_en_passant(target);

        let mut rights = self.castling;
        if piece.kind == PieceKind::King {
            rights.remove_color(us);
        }
        for sq in [from, to] {
            if let Some((color, kingside)) = rook_home_wing(sq) {
                rights.remove(color, kingside);
            }
        }
        if rights != self.castling {
            self.set_castling_rights(rights);
        }

        if piece.kind == PieceKind::Pawn || mv.is_capture() {
            self.halfmove_clock = 0;
        } else {
            self.halfmove_clock += 1;
        }
        if us == Color::Black {
            self.fullmove_number += 1;
        }
        self.toggle_side();

        undo
    }

    /// Revert the move recorded in `undo`, which must be the last one applied.
    pub fn undo_move(&mut self, undo: &UndoRecord) {
        let mv = undo.mv;
        let us = self.side_to_move.opponent();
        let piece = mv.piece();
        let (from, to) = (mv.from(), mv.to());

        self.side_to_move = us;
        if us == Color::Black {
            self.fullmove_number -= 1;
        }

        if mv.is_castling() {
            let rook = Piece::new(PieceKind::Rook, us);
            let (rook_from, rook_to) = castling_rook_squares(us, to);
            self.move_piece(rook, rook_to, rook_from);
            self.move_piece(piece, to, from);
        } else if mv.is_en_passant() {
            self.move_piece(piece, to, from);
            if let Some(victim) = mv.captured() {
                self.add_piece(victim, en_passant_victim(mv));
            }
        } else {
            match mv.promotion_kind() {
                Some(kind) => {
                    self.remove_piece(Piece::new(kind, us), to);
                    self.add_piece(piece, from);
                }
                None => self.move_piece(piece, to, from),
            }
            if let Some(victim) = mv.captured() {
                self.add_piece(victim, to);
            }
        }

        self.castling = undo.castling;
        self.en_passant = undo.en_passant;
        self.halfmove_clock = undo.halfmove_clock;
        self.hash = undo.hash;
    }

    /// Apply `mv` only if it is legal in the current position.
    pub fn try_apply_move(&mut self, mv: Move) -> Result<UndoRecord, MoveError> {
        if self.generate_legal_moves().contains(mv) {
            Ok(self.apply_move(mv))
        } else {
            Err(MoveError::Illegal {
                notation: mv.to_string(),
            })
        }
    }

    /// Resolve long algebraic text (`e2e4`, `e7e8q`) to a legal move.
    pub fn parse_move(&self, text: &str) -> Result<Move, MoveError> {
        if !(4..=5).contains(&text.len()) || !text.is_ascii() {
            return Err(MoveError::InvalidLength {
                len: text.chars().count(),
            });
        }
        let square = |s: &str| {
            s.parse::<Square>().map_err(|_| MoveError::InvalidSquare {
                notation: text.to_string(),
            })
        };
        let from = square(&text[0..2])?;
        let to = square(&text[2..4])?;
        let promotion = match text[4..].chars().next() {
            None => None,
            Some(c) => match PieceKind::from_char(c) {
                Some(kind @ (PieceKind::Knight
                | PieceKind::Bishop
                | PieceKind::Rook
                | PieceKind::Queen)) => Some(kind),
                _ => return Err(MoveError::InvalidPromotion { char: c }),
            },
        };

        self.generate_legal_moves()
            .into_iter()
            .find(|mv| mv.from() == from && mv.to() == to && mv.promotion_kind() == promotion)
            .ok_or_else(|| MoveError::Illegal {
                notation: text.to_string(),
            })
    }
}
