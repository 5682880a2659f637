use std::time::Instant;

use super::constants::{ABORTED, DRAW, INFINITY, MATE, MATE_THRESHOLD};
use super::{SearchContext, SearchResult};

impl SearchContext<'_> {
    /// Iterative deepening from depth 1 to `max_depth`.
    ///
    /// The root move and score are only committed once a depth has been
    /// searched completely; an aborted iteration is thrown away.
    pub fn iterative_deepening(&mut self, max_depth: u32) -> SearchResult {
        let root_moves = self.board.generate_legal_moves();
        let mut result = SearchResult {
            best_move: root_moves.first().copied(),
            score: 0,
            depth: 0,
            nodes: 0,
            elapsed: self.start.elapsed(),
            pv: Vec::new(),
        };
        if root_moves.is_empty() {
            result.score = if self.board.is_in_check() { -MATE } else { DRAW };
            return result;
        }

        self.path.clear();
        self.path.push(self.board.hash());

        for depth in 1..=max_depth {
            self.root_best = None;
            let score = self.alpha_beta(depth, -INFINITY, INFINITY, 0);
            if score == ABORTED {
                log::debug!("depth {depth} aborted after {} nodes", self.nodes);
                break;
            }
            let Some(best) = self.root_best else {
                break;
            };

            result.best_move = Some(best);
            result.score = score;
            result.depth = depth;
            log::debug!(
                "depth {depth} score {score} nodes {} time {}ms best {best}",
                self.nodes,
                self.start.elapsed().as_millis()
            );

            if score.abs() >= MATE_THRESHOLD {
                break;
            }
            if self.deadline.is_some_and(|deadline| Instant::now() >= deadline) {
                break;
            }
        }

        result.nodes = self.nodes;
        result.elapsed = self.start.elapsed();
        if result.depth > 0 {
            result.pv = self.extract_pv(result.depth as usize);
            // The table may have been overwritten; the committed move leads.
            if result.pv.first() != result.best_move.as_ref() {
                result.pv = result.best_move.into_iter().collect();
            }
        }
        result
    }
}
