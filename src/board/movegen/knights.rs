use super::super::attack_tables::knight_attacks;
use super::super::types::{MoveList, Piece, PieceKind, Square};
use super::super::Board;
use super::{push_targets, MoveGenContext};

pub(super) fn knight_moves(board: &Board, from: Square, ctx: &MoveGenContext, moves: &mut MoveList) {
    // A pinned knight can never stay on its pin line.
    if ctx.pinned.contains(from) {
        return;
    }
    let targets = knight_attacks(from) & !ctx.own & ctx.check_mask & ctx.target_mask;
    push_targets(board, from, Piece::new(PieceKind::Knight, ctx.us), targets, moves);
}
