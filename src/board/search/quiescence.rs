use super::constants::{ABORTED, DRAW, MATE, ORDER_VALUES};
use super::SearchContext;
use crate::board::types::MAX_PLY;
use crate::tt::{score_from_tt, score_to_tt, Bound};

impl SearchContext<'_> {
    /// Quiescence search: resolve captures until the position is quiet.
    ///
    /// Out of check the side to move may stand pat on the static eval. In
    /// check there is no stand-pat and every evasion is searched, so mates
    /// at the horizon are still seen.
    pub fn quiescence(&mut self, mut alpha: i32, mut beta: i32, ply: usize) -> i32 {
        if self.should_stop() {
            return ABORTED;
        }
        self.nodes += 1;

        if self.is_draw() {
            return DRAW;
        }
        alpha = alpha.max(-MATE + ply as i32);
        beta = beta.min(MATE - ply as i32 - 1);
        if alpha >= beta {
            return alpha;
        }
        if ply >= MAX_PLY - 1 {
            return self.board.evaluate();
        }

        let hash = self.board.hash();
        let mut tt_move = None;
        if let Some(entry) = self.tt.probe(hash) {
            tt_move = entry.best_move;
            let score = score_from_tt(entry.score, ply);
            if entry.cuts(score, alpha, beta) {
                return score;
            }
        }

        let in_check = self.board.is_in_check();
        let stand_pat = if in_check {
            None
        } else {
            let eval = self.board.evaluate();
            if eval >= beta {
                return eval;
            }
            Some(eval)
        };

        let moves = if in_check {
            self.board.generate_legal_moves()
        } else {
            self.board.generate_legal_captures()
        };
        if in_check && moves.is_empty() {
            return -MATE + ply as i32;
        }

        let alpha_orig = alpha;
        let mut best_score = match stand_pat {
            Some(eval) => {
                alpha = alpha.max(eval);
                eval
            }
            None => -MATE + ply as i32,
        };
        let mut best_move = None;

        let tt_move = tt_move.filter(|&mv| moves.contains(mv));
        let mut ordered = self
            .orderer
            .score_moves(&self.board, &moves, tt_move, ply, self.params);
        let mut index = 0;
        while let Some(next) = ordered.pick_best(index) {
            index += 1;
            let mv = next.mv;

            // Delta pruning: even winning the victim outright plus a margin
            // would not reach alpha.
            if let (Some(eval), Some(victim)) = (stand_pat, mv.captured()) {
                if self.params.delta_pruning
                    && !mv.is_promotion()
                    && eval + ORDER_VALUES[victim.kind.index()] + self.params.delta_margin <= alpha
                {
                    continue;
                }
            }

            let undo = self.make(mv);
            let child = self.quiescence(-beta, -alpha, ply + 1);
            self.unmake(&undo);
            if child == ABORTED {
                return ABORTED;
            }
            let score = -child;

            if score > best_score {
                best_score = score;
                best_move = Some(mv);
            }
            if score > alpha {
                alpha = score;
            }
            if alpha >= beta {
                self.tt
                    .store(hash, 0, score_to_tt(best_score, ply), Bound::Lower, Some(mv));
                return best_score;
            }
        }

        let bound = if best_score > alpha_orig {
            Bound::Exact
        } else {
            Bound::Upper
        };
        self.tt
            .store(hash, 0, score_to_tt(best_score, ply), bound, best_move);
        best_score
    }
}
