use super::constants::{ABORTED, DRAW, INFINITY, MATE};
use super::SearchContext;
use crate::board::types::MAX_PLY;
use crate::tt::{score_from_tt, score_to_tt, Bound};

impl SearchContext<'_> {
    /// Fail-soft negamax search of the current position to `depth`.
    ///
    /// Returns a score from the side to move's perspective, or `ABORTED` if
    /// the clock ran out somewhere below; callers must pass that through
    /// untouched.
    pub fn alpha_beta(&mut self, depth: u32, mut alpha: i32, mut beta: i32, ply: usize) -> i32 {
        if self.should_stop() {
            return ABORTED;
        }
        self.nodes += 1;

        let root = ply == 0;
        if !root {
            if self.is_draw() {
                return DRAW;
            }
            // Mate distance pruning: no line from here beats a mate found
            // closer to the root.
            alpha = alpha.max(-MATE + ply as i32);
            beta = beta.min(MATE - ply as i32 - 1);
            if alpha >= beta {
                return alpha;
            }
        }
        if ply >= MAX_PLY - 1 {
            return self.board.evaluate();
        }

        let hash = self.board.hash();
        let mut tt_move = None;
        if let Some(entry) = self.tt.probe(hash) {
            tt_move = entry.best_move;
            if !root && u32::from(entry.depth) >= depth {
                let score = score_from_tt(entry.score, ply);
                if entry.cuts(score, alpha, beta) {
                    return score;
                }
            }
        }

        if depth == 0 {
            return if self.params.quiescence {
                self.quiescence(alpha, beta, ply)
            } else {
                self.board.evaluate()
            };
        }

        let moves = self.board.generate_legal_moves();
        if moves.is_empty() {
            return if self.board.is_in_check() {
                -MATE + ply as i32
            } else {
                DRAW
            };
        }
        // A colliding entry may carry a move from another position.
        let tt_move = tt_move.filter(|&mv| moves.contains(mv));
        let mut ordered = self
            .orderer
            .score_moves(&self.board, &moves, tt_move, ply, self.params);

        let alpha_orig = alpha;
        let mut best_score = -INFINITY;
        let mut best_move = None;
        let mut index = 0;
        while let Some(next) = ordered.pick_best(index) {
            index += 1;
            let mv = next.mv;

            let undo = self.make(mv);
            let child = self.alpha_beta(depth - 1, -beta, -alpha, ply + 1);
            self.unmake(&undo);
            if child == ABORTED {
                return ABORTED;
            }
            let score = -child;

            if root && self.trace {
                log::trace!("depth {depth} root move {mv} score {score} nodes {}", self.nodes);
            }

            if score > best_score {
                best_score = score;
                best_move = Some(mv);
                if root {
                    self.root_best = Some(mv);
                }
            }
            if score > alpha {
                alpha = score;
            }
            if alpha >= beta {
                self.tt
                    .store(hash, depth, score_to_tt(best_score, ply), Bound::Lower, Some(mv));
                self.orderer.record_cutoff(mv, ply, depth, self.params);
                return best_score;
            }
        }

        let bound = if best_score > alpha_orig {
            Bound::Exact
        } else {
            Bound::Upper
        };
        self.tt
            .store(hash, depth, score_to_tt(best_score, ply), bound, best_move);
        best_score
    }
}
