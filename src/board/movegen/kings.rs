use super::super::attack_tables::{between, king_attacks};
use super::super::types::{rook_home, Bitboard, Move, MoveList, Piece, PieceKind, Square};
use super::super::Board;
use super::{push_targets, MoveGenContext};

pub(super) fn king_moves(board: &Board, from: Square, ctx: &MoveGenContext, moves: &mut MoveList) {
    let us = ctx.us;
    let king = Piece::new(PieceKind::King, us);

    // With the king lifted off the board, sliders see through its square, so
    // stepping back along a checking ray is correctly refused.
    let danger = board.attacked_squares(us.opponent(), ctx.occupied.without(from));
    let targets = king_attacks(from) & !ctx.own & !danger & ctx.target_mask;
    push_targets(board, from, king, targets, moves);

    if ctx.captures_only || !ctx.checkers.is_empty() {
        return;
    }

    let home = Square::from_coords(us.back_rank(), 4);
    if from != home {
        return;
    }
    for kingside in [true, false] {
        if !board.castling_rights().has(us, kingside) {
            continue;
        }
        let rook_sq = rook_home(us, kingside);
        if board.piece_at(rook_sq) != Some(Piece::new(PieceKind::Rook, us)) {
            continue;
        }
        if !(between(from, rook_sq) & ctx.occupied).is_empty() {
            continue;
        }
        let to = Square::from_coords(us.back_rank(), if kingside { 6 } else { 2 });
        // Start, transit and destination squares must all be safe.
        let path = between(from, to).with(from).with(to);
        if (path & danger) == Bitboard::EMPTY {
            moves.push(Move::castle(from, to, king));
        }
    }
}
