use super::super::attack_tables::{bishop_attacks, queen_attacks, rook_attacks};
use super::super::types::{Bitboard, MoveList, Piece, PieceKind, Square};
use super::super::Board;
use super::{push_targets, MoveGenContext};

#[inline]
fn slider_moves(
    board: &Board,
    from: Square,
    kind: PieceKind,
    attacks: Bitboard,
    ctx: &MoveGenContext,
    moves: &mut MoveList,
) {
    let targets = attacks & !ctx.own & ctx.check_mask & ctx.pin_mask(from) & ctx.target_mask;
    push_targets(board, from, Piece::new(kind, ctx.us), targets, moves);
}

pub(super) fn bishop_moves(board: &Board, from: Square, ctx: &MoveGenContext, moves: &mut MoveList) {
    let attacks = bishop_attacks(from, ctx.occupied);
    slider_moves(board, from, PieceKind::Bishop, attacks, ctx, moves);
}

pub(super) fn rook_moves(board: &Board, from: Square, ctx: &MoveGenContext, moves: &mut MoveList) {
    let attacks = rook_attacks(from, ctx.occupied);
    slider_moves(board, from, PieceKind::Rook, attacks, ctx, moves);
}

pub(super) fn queen_moves(board: &Board, from: Square, ctx: &MoveGenContext, moves: &mut MoveList) {
    let attacks = queen_attacks(from, ctx.occupied);
    slider_moves(board, from, PieceKind::Queen, attacks, ctx, moves);
}
