//! Move ordering: hash move, MVV-LVA captures, promotions, killers, history.

use super::constants::{
    CAPTURE_BASE, KILLER1_SCORE, KILLER2_SCORE, ORDER_VALUES, PROMOTION_BASE, TT_MOVE_SCORE,
};
use super::SearchParams;
use crate::board::attack_tables::pawn_attacks;
use crate::board::types::{Move, PieceKind, ScoredMoveList, MAX_PLY};
use crate::board::Board;

pub(crate) struct KillerTable {
    slots: [[Move; 2]; MAX_PLY],
}

impl KillerTable {
    pub fn new() -> Self {
        KillerTable {
            slots: [[Move::NULL; 2]; MAX_PLY],
        }
    }

    pub fn primary(&self, ply: usize) -> Move {
        self.slots.get(ply).map_or(Move::NULL, |row| row[0])
    }

    pub fn secondary(&self, ply: usize) -> Move {
        self.slots.get(ply).map_or(Move::NULL, |row| row[1])
    }

    pub fn update(&mut self, ply: usize, mv: Move) {
        if ply >= MAX_PLY {
            return;
        }
        if self.slots[ply][0] != mv {
            self.slots[ply][1] = self.slots[ply][0];
            self.slots[ply][0] = mv;
        }
    }

    pub fn reset(&mut self) {
        self.slots = [[Move::NULL; 2]; MAX_PLY];
    }
}

/// Cutoff counts for quiet moves, keyed by moving piece and destination.
pub(crate) struct HistoryTable {
    entries: [[i32; 64]; 12],
}

impl HistoryTable {
    pub fn new() -> Self {
        HistoryTable {
            entries: [[0; 64]; 12],
        }
    }

    pub fn score(&self, mv: Move) -> i32 {
        self.entries[mv.piece().index()][mv.to().index()]
    }

    /// Reward a quiet move that caused a beta cutoff. Returns the new entry.
    pub fn update(&mut self, mv: Move, depth: u32) -> i32 {
        let entry = &mut self.entries[mv.piece().index()][mv.to().index()];
        let bonus = (depth * depth) as i32;
        *entry = entry.saturating_add(bonus);
        *entry
    }

    /// Halve every entry so older cutoffs fade.
    pub fn decay(&mut self) {
        for row in &mut self.entries {
            for entry in row.iter_mut() {
                *entry /= 2;
            }
        }
    }

    pub fn reset(&mut self) {
        self.entries = [[0; 64]; 12];
    }
}

/// Killer and history state that persists across the nodes of a search and,
/// aged, across searches.
pub(crate) struct MoveOrderer {
    killers: KillerTable,
    history: HistoryTable,
}

impl MoveOrderer {
    pub fn new() -> Self {
        MoveOrderer {
            killers: KillerTable::new(),
            history: HistoryTable::new(),
        }
    }

    /// Prepare for a new search: killers are position-specific and dropped,
    /// history is kept at half weight.
    pub fn new_search(&mut self) {
        self.killers.reset();
        self.history.decay();
    }

    pub fn clear(&mut self) {
        self.killers.reset();
        self.history.reset();
    }

    /// Score `moves` for best-first selection at `ply`.
    pub fn score_moves(
        &self,
        board: &Board,
        moves: &[Move],
        tt_move: Option<Move>,
        ply: usize,
        params: &SearchParams,
    ) -> ScoredMoveList {
        let them = board.side_to_move().opponent();
        let enemy_pawns = board.pieces(PieceKind::Pawn, them);
        let mut scored = ScoredMoveList::with_capacity(moves.len());

        for &mv in moves {
            let score = if Some(mv) == tt_move {
                TT_MOVE_SCORE
            } else if let Some(victim) = mv.captured() {
                let promo = mv.promotion_kind().map_or(0, |kind| ORDER_VALUES[kind.index()]);
                CAPTURE_BASE + ORDER_VALUES[victim.kind.index()]
                    - ORDER_VALUES[mv.piece().kind.index()]
                    + promo
            } else if let Some(kind) = mv.promotion_kind() {
                PROMOTION_BASE + ORDER_VALUES[kind.index()]
            } else if mv == self.killers.primary(ply) {
                KILLER1_SCORE
            } else if mv == self.killers.secondary(ply) {
                KILLER2_SCORE
            } else {
                let mut score = self.history.score(mv);
                // Enemy pawns attack `to` exactly where our pawn on `to` would attack them.
                let guarded = !(pawn_attacks(board.side_to_move(), mv.to()) & enemy_pawns).is_empty();
                if guarded && mv.piece().kind != PieceKind::Pawn {
                    score -= ORDER_VALUES[mv.piece().kind.index()] * params.pawn_attack_penalty / 100;
                }
                score
            };
            scored.push(mv, score);
        }
        scored
    }

    /// Record a quiet move that refuted the node at `ply`.
    pub fn record_cutoff(&mut self, mv: Move, ply: usize, depth: u32, params: &SearchParams) {
        if mv.is_tactical() {
            return;
        }
        self.killers.update(ply, mv);
        if self.history.update(mv, depth) > params.history_max {
            self.history.decay();
        }
    }

    #[cfg(test)]
    pub fn history_score(&self, mv: Move) -> i32 {
        self.history.score(mv)
    }
}
