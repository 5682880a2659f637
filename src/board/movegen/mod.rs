//! Legal move generation.
//!
//! Moves are generated legal from the start, with no make/test/unmake:
//! - checkers are found by running the attack tables in reverse from the king;
//! - under double check only the king may move;
//! - pinned pieces are limited to the line through their king and pinner;
//! - under single check every non-king move must land in the check mask
//!   (the checker itself or a square between it and the king);
//! - the king never steps onto a square the enemy attacks with the king
//!   removed from the board.
//!
//! En passant gets an extra simulation for the rank pin that removing two
//! pawns at once can expose.

mod kings;
mod knights;
mod pawns;
mod sliders;

use super::attack_tables::{between, bishop_attacks, line, rook_attacks};
use super::types::{Bitboard, Color, Move, MoveList, Piece, PieceKind, Square};
use super::Board;

/// Per-call facts shared by all piece generators.
pub(crate) struct MoveGenContext {
    pub(super) us: Color,
    pub(super) king: Square,
    pub(super) own: Bitboard,
    pub(super) enemy: Bitboard,
    pub(super) occupied: Bitboard,
    pub(super) checkers: Bitboard,
    /// Destinations that resolve a single check; `ALL` when not in check.
    pub(super) check_mask: Bitboard,
    pub(super) pinned: Bitboard,
    pin_rays: [Bitboard; 64],
    /// Destinations the caller wants (everything, or enemy pieces only).
    pub(super) target_mask: Bitboard,
    pub(super) captures_only: bool,
}

impl MoveGenContext {
    fn new(board: &Board, captures_only: bool) -> Self {
        let us = board.side_to_move();
        let them = us.opponent();
        let king = board.king_square(us);
        let own = board.color_bb(us);
        let enemy = board.color_bb(them);
        let occupied = own | enemy;

        let checkers = board.attackers_to(king, them, occupied);
        let check_mask = match checkers.lsb() {
            None => Bitboard::ALL,
            Some(checker) if !checkers.has_many() => between(king, checker) | checkers,
            Some(_) => Bitboard::EMPTY,
        };

        // X-ray from the king through our own pieces: an enemy slider seen
        // this way pins the lone friendly piece between them.
        let queens = board.pieces(PieceKind::Queen, them);
        let snipers = (rook_attacks(king, enemy) & (board.pieces(PieceKind::Rook, them) | queens))
            | (bishop_attacks(king, enemy) & (board.pieces(PieceKind::Bishop, them) | queens));
        let mut pinned = Bitboard::EMPTY;
        let mut pin_rays = [Bitboard::ALL; 64];
        for sniper in snipers {
            let blockers = between(king, sniper) & occupied;
            if let Some(blocker) = blockers.lsb() {
                if !blockers.has_many() && own.contains(blocker) {
                    pinned = pinned.with(blocker);
                    pin_rays[blocker.index()] = line(king, sniper);
                }
            }
        }

        MoveGenContext {
            us,
            king,
            own,
            enemy,
            occupied,
            checkers,
            check_mask,
            pinned,
            pin_rays,
            target_mask: if captures_only { enemy } else { Bitboard::ALL },
            captures_only,
        }
    }

    /// Where the piece on `from` may go without exposing its king.
    #[inline]
    pub(super) fn pin_mask(&self, from: Square) -> Bitboard {
        self.pin_rays[from.index()]
    }

    #[inline]
    pub(super) fn in_double_check(&self) -> bool {
        self.checkers.has_many()
    }
}

/// Emit a quiet move or capture for every square in `targets`.
#[inline]
pub(super) fn push_targets(
    board: &Board,
    from: Square,
    piece: Piece,
    targets: Bitboard,
    moves: &mut MoveList,
) {
    for to in targets {
        match board.piece_at(to) {
            Some(victim) => moves.push(Move::capture(from, to, piece, victim)),
            None => moves.push(Move::quiet(from, to, piece)),
        }
    }
}

type PieceMoveFn = fn(&Board, Square, &MoveGenContext, &mut MoveList);

/// Generators indexed by `PieceKind::index`.
const PIECE_MOVE_FNS: [PieceMoveFn; 6] = [
    pawns::pawn_moves,
    knights::knight_moves,
    sliders::bishop_moves,
    sliders::rook_moves,
    sliders::queen_moves,
    kings::king_moves,
];

/// Outcome of a position for the side to move.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameStatus {
    Ongoing,
    Checkmate,
    Stalemate,
    /// A hundred half-moves without a capture or pawn move.
    FiftyMoveDraw,
}

impl Board {
    fn generate_into(&self, moves: &mut MoveList, captures_only: bool) {
        moves.clear();
        let ctx = MoveGenContext::new(self, captures_only);
        if ctx.in_double_check() {
            kings::king_moves(self, ctx.king, &ctx, moves);
            return;
        }
        for from in ctx.own {
            if let Some(piece) = self.piece_at(from) {
                PIECE_MOVE_FNS[piece.kind.index()](self, from, &ctx, moves);
            }
        }
    }

    /// All legal moves for the side to move.
    #[must_use]
    pub fn generate_legal_moves(&self) -> MoveList {
        let mut moves = MoveList::new();
        self.generate_into(&mut moves, false);
        moves
    }

    /// Like `generate_legal_moves`, refilling a caller-owned list.
    pub fn generate_legal_moves_into(&self, moves: &mut MoveList) {
        self.generate_into(moves, false);
    }

    /// Legal captures (en passant included) and all legal promotions.
    #[must_use]
    pub fn generate_legal_captures(&self) -> MoveList {
        let mut moves = MoveList::new();
        self.generate_into(&mut moves, true);
        moves
    }

    pub fn generate_legal_captures_into(&self, moves: &mut MoveList) {
        self.generate_into(moves, true);
    }

    /// Is the side to move in check?
    #[must_use]
    pub fn is_in_check(&self) -> bool {
        let us = self.side_to_move();
        self.is_square_attacked(self.king_square(us), us.opponent())
    }

    #[must_use]
    pub fn is_checkmate(&self) -> bool {
        self.is_in_check() && self.generate_legal_moves().is_empty()
    }

    #[must_use]
    pub fn is_stalemate(&self) -> bool {
        !self.is_in_check() && self.generate_legal_moves().is_empty()
    }

    #[must_use]
    pub fn is_fifty_move_draw(&self) -> bool {
        self.halfmove_clock() >= 100
    }

    /// Classify the position. Mate and stalemate take precedence over the
    /// fifty-move rule.
    #[must_use]
    pub fn game_status(&self) -> GameStatus {
        if self.generate_legal_moves().is_empty() {
            if self.is_in_check() {
                GameStatus::Checkmate
            } else {
                GameStatus::Stalemate
            }
        } else if self.is_fifty_move_draw() {
            GameStatus::FiftyMoveDraw
        } else {
            GameStatus::Ongoing
        }
    }

    /// Count leaf nodes of the legal move tree to `depth`.
    pub fn perft(&mut self, depth: usize) -> u64 {
        if depth == 0 {
            return 1;
        }

        let moves = self.generate_legal_moves();
        if depth == 1 {
            return moves.len() as u64;
        }

        let mut nodes = 0;
        for &mv in &moves {
            let undo = self.apply_move(mv);
            nodes += self.perft(depth - 1);
            self.undo_move(&undo);
        }
        nodes
    }

    /// Perft split by root move, in generation order.
    pub fn divide(&mut self, depth: usize) -> Vec<(Move, u64)> {
        if depth == 0 {
            return Vec::new();
        }
        let moves = self.generate_legal_moves();
        let mut counts = Vec::with_capacity(moves.len());
        for &mv in &moves {
            let undo = self.apply_move(mv);
            counts.push((mv, self.perft(depth - 1)));
            self.undo_move(&undo);
        }
        counts
    }
}
