use super::super::attack_tables::{bishop_attacks, pawn_attacks, pawn_push, rook_attacks};
use super::super::types::{Bitboard, Move, MoveList, Piece, PieceKind, Square, PROMOTION_KINDS};
use super::super::Board;
use super::MoveGenContext;

pub(super) fn pawn_moves(board: &Board, from: Square, ctx: &MoveGenContext, moves: &mut MoveList) {
    let us = ctx.us;
    let pawn = Piece::new(PieceKind::Pawn, us);
    let allowed = ctx.check_mask & ctx.pin_mask(from);

    // Pushes. In captures-only mode only promotions survive.
    if let Some(one) = (pawn_push(us, from) & !ctx.occupied).lsb() {
        if allowed.contains(one) {
            if one.rank() == us.promotion_rank() {
                push_promotions(from, one, pawn, None, moves);
            } else if !ctx.captures_only {
                moves.push(Move::quiet(from, one, pawn));
            }
        }
        if from.rank() == us.pawn_start_rank() && !ctx.captures_only {
            if let Some(two) = (pawn_push(us, one) & !ctx.occupied).lsb() {
                if allowed.contains(two) {
                    moves.push(Move::double_push(from, two, pawn));
                }
            }
        }
    }

    let attacks = pawn_attacks(us, from);
    for to in attacks & ctx.enemy & allowed {
        let Some(victim) = board.piece_at(to) else {
            continue;
        };
        if to.rank() == us.promotion_rank() {
            push_promotions(from, to, pawn, Some(victim), moves);
        } else {
            moves.push(Move::capture(from, to, pawn, victim));
        }
    }

    if let Some(target) = board.en_passant() {
        if attacks.contains(target) && en_passant_is_legal(board, from, target, ctx) {
            moves.push(Move::en_passant(from, target, pawn));
        }
    }
}

fn push_promotions(
    from: Square,
    to: Square,
    pawn: Piece,
    victim: Option<Piece>,
    moves: &mut MoveList,
) {
    for kind in PROMOTION_KINDS {
        moves.push(Move::promotion(from, to, pawn, victim, kind));
    }
}

/// En passant removes two pawns from the board at once, so the pin mask
/// alone misses the case where both stood between the king and a slider.
/// Replay the capture on the occupancy and look for a sliding attack.
fn en_passant_is_legal(board: &Board, from: Square, target: Square, ctx: &MoveGenContext) -> bool {
    let victim = Square::from_coords(from.rank(), target.file());

    // Under check, the capture must take the checker or block the check.
    if !(ctx.check_mask.contains(target) || ctx.check_mask.contains(victim)) {
        return false;
    }
    if !ctx.pin_mask(from).contains(target) {
        return false;
    }

    let them = ctx.us.opponent();
    let occupied = (ctx.occupied ^ Bitboard::from_square(from) ^ Bitboard::from_square(victim))
        .with(target);
    let queens = board.pieces(PieceKind::Queen, them);
    let rooks = board.pieces(PieceKind::Rook, them) | queens;
    let bishops = board.pieces(PieceKind::Bishop, them) | queens;
    (rook_attacks(ctx.king, occupied) & rooks).is_empty()
        && (bishop_attacks(ctx.king, occupied) & bishops).is_empty()
}
