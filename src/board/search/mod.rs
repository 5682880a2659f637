//! Search module implementing alpha-beta with iterative deepening.
//!
//! Features:
//! - Iterative deepening, committing the root move after each full depth
//! - Fail-soft negamax alpha-beta with mate distance pruning
//! - Quiescence search with stand-pat and delta pruning
//! - Move ordering (TT move, MVV-LVA, promotions, killers, history)
//! - Transposition table for move ordering and cutoffs
//! - Fifty-move and repetition draws along the search path
//!
//! Cancellation is cooperative: the clock is polled at the top of every node
//! and an out-of-time node returns [`constants::ABORTED`], which unwinds the
//! whole tree without touching the TT or the committed result.

mod alphabeta;
pub(crate) mod constants;
mod iterative;
mod ordering;
mod params;
mod quiescence;

use std::time::{Duration, Instant};

use crate::tt::TranspositionTable;

use super::types::{Move, MAX_PLY};
use super::{Board, UndoRecord};
pub use constants::{DEFAULT_MAX_DEPTH, DEFAULT_TT_MB};
use ordering::MoveOrderer;
pub use params::SearchParams;

/// Outcome of a search.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SearchResult {
    /// Best move from the deepest completed iteration, or the first legal
    /// move when not even depth 1 finished. `None` only without legal moves.
    pub best_move: Option<Move>,
    /// Score of `best_move` from the side to move's perspective
    pub score: i32,
    /// Deepest fully searched depth (0 if none completed)
    pub depth: u32,
    pub nodes: u64,
    pub elapsed: Duration,
    /// Principal variation read back from the transposition table
    pub pv: Vec<Move>,
}

/// Search configuration with builder-style setters.
///
/// ```
/// use std::time::Duration;
/// use bitchess::SearchConfig;
///
/// let config = SearchConfig::depth(6).with_time(Duration::from_millis(500)).with_trace(true);
/// assert_eq!(config.max_depth, 6);
/// ```
#[derive(Clone, Debug)]
pub struct SearchConfig {
    /// Wall-clock budget; `Duration::MAX` searches until `max_depth`
    pub time_budget: Duration,
    pub max_depth: u32,
    /// Transposition table size in MB
    pub tt_mb: usize,
    /// Stop once this many nodes have been searched
    pub node_limit: u64,
    /// Emit a `trace` record for every root move
    pub trace: bool,
    pub params: SearchParams,
}

impl Default for SearchConfig {
    fn default() -> Self {
        SearchConfig {
            time_budget: Duration::MAX,
            max_depth: DEFAULT_MAX_DEPTH,
            tt_mb: DEFAULT_TT_MB,
            node_limit: u64::MAX,
            trace: false,
            params: SearchParams::default(),
        }
    }
}

impl SearchConfig {
    /// Create a depth-limited search config
    #[must_use]
    pub fn depth(max_depth: u32) -> Self {
        SearchConfig {
            max_depth,
            ..Default::default()
        }
    }

    /// Create a time-limited search config
    #[must_use]
    pub fn time(budget: Duration) -> Self {
        SearchConfig {
            time_budget: budget,
            ..Default::default()
        }
    }

    #[must_use]
    pub fn with_depth(mut self, max_depth: u32) -> Self {
        self.max_depth = max_depth;
        self
    }

    #[must_use]
    pub fn with_time(mut self, budget: Duration) -> Self {
        self.time_budget = budget;
        self
    }

    #[must_use]
    pub fn with_tt_mb(mut self, tt_mb: usize) -> Self {
        self.tt_mb = tt_mb;
        self
    }

    #[must_use]
    pub fn with_node_limit(mut self, node_limit: u64) -> Self {
        self.node_limit = node_limit;
        self
    }

    #[must_use]
    pub fn with_trace(mut self, trace: bool) -> Self {
        self.trace = trace;
        self
    }

    #[must_use]
    pub fn with_params(mut self, params: SearchParams) -> Self {
        self.params = params;
        self
    }
}

/// Owns the transposition table and ordering heuristics between searches.
pub struct Searcher {
    config: SearchConfig,
    tt: TranspositionTable,
    orderer: MoveOrderer,
}

impl Searcher {
    #[must_use]
    pub fn new(config: SearchConfig) -> Self {
        Searcher {
            tt: TranspositionTable::new(config.tt_mb),
            orderer: MoveOrderer::new(),
            config,
        }
    }

    #[must_use]
    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// Replace the configuration. The table is rebuilt if its size changed.
    pub fn set_config(&mut self, config: SearchConfig) {
        if config.tt_mb != self.config.tt_mb {
            self.tt = TranspositionTable::new(config.tt_mb);
        }
        self.config = config;
    }

    #[must_use]
    pub fn tt(&self) -> &TranspositionTable {
        &self.tt
    }

    /// Forget everything learned from earlier searches.
    pub fn clear(&mut self) {
        self.tt.clear();
        self.orderer.clear();
    }

    /// Search `board` under the current configuration. The caller's board is
    /// never modified; the search runs on a private copy.
    pub fn search(&mut self, board: &Board) -> SearchResult {
        self.tt.new_search();
        self.orderer.new_search();

        let start = Instant::now();
        let max_depth = self.config.max_depth.clamp(1, MAX_PLY as u32 - 1);
        let mut ctx = SearchContext {
            board: board.clone(),
            tt: &mut self.tt,
            orderer: &mut self.orderer,
            params: &self.config.params,
            trace: self.config.trace,
            start,
            deadline: start.checked_add(self.config.time_budget),
            node_limit: self.config.node_limit,
            nodes: 0,
            stopped: false,
            path: Vec::with_capacity(MAX_PLY + 1),
            root_best: None,
        };
        ctx.iterative_deepening(max_depth)
    }
}

impl Default for Searcher {
    fn default() -> Self {
        Searcher::new(SearchConfig::default())
    }
}

/// Best move for the side to move within `budget`, using a fresh searcher.
///
/// Returns `None` only when the side to move has no legal moves.
#[must_use]
pub fn search(board: &Board, budget: Duration) -> Option<Move> {
    Searcher::new(SearchConfig::time(budget))
        .search(board)
        .best_move
}

/// State of one running search
pub(crate) struct SearchContext<'a> {
    pub board: Board,
    pub tt: &'a mut TranspositionTable,
    pub orderer: &'a mut MoveOrderer,
    pub params: &'a SearchParams,
    pub trace: bool,
    pub start: Instant,
    /// `None` when the budget does not fit in an `Instant`
    pub deadline: Option<Instant>,
    pub node_limit: u64,
    pub nodes: u64,
    pub stopped: bool,
    /// Hashes of the positions from the root to the current node
    pub path: Vec<u64>,
    /// Best root move of the iteration in progress
    pub root_best: Option<Move>,
}

impl SearchContext<'_> {
    /// Poll the clock and the node limit. Once stopped the search stays
    /// stopped.
    #[inline]
    pub fn should_stop(&mut self) -> bool {
        if !self.stopped && (self.nodes & constants::CLOCK_POLL_MASK) == 0 {
            self.stopped = self.nodes >= self.node_limit
                || self.deadline.is_some_and(|deadline| Instant::now() >= deadline);
        }
        self.stopped
    }

    /// Fifty-move rule or a repetition of a position on the current path.
    pub fn is_draw(&self) -> bool {
        if self.board.halfmove_clock() >= 100 {
            return true;
        }
        let Some((&current, earlier)) = self.path.split_last() else {
            return false;
        };
        // Only positions since the last irreversible move can repeat, and
        // only every second one has the same side to move.
        let window = (self.board.halfmove_clock() as usize).min(earlier.len());
        earlier[earlier.len() - window..]
            .iter()
            .rev()
            .skip(1)
            .step_by(2)
            .any(|&hash| hash == current)
    }

    /// Apply `mv` and extend the path.
    #[inline]
    pub fn make(&mut self, mv: Move) -> UndoRecord {
        let undo = self.board.apply_move(mv);
        self.path.push(self.board.hash());
        undo
    }

    #[inline]
    pub fn unmake(&mut self, undo: &UndoRecord) {
        self.path.pop();
        self.board.undo_move(undo);
    }

    /// Follow best moves through the table from the root, checking each
    /// for legality so a colliding entry cannot corrupt the line.
    pub fn extract_pv(&mut self, max_len: usize) -> Vec<Move> {
        let mut pv = Vec::new();
        let mut undos = Vec::new();
        let mut seen = Vec::new();
        while pv.len() < max_len {
            let hash = self.board.hash();
            if seen.contains(&hash) {
                break;
            }
            seen.push(hash);
            let Some(mv) = self.tt.probe(hash).and_then(|entry| entry.best_move) else {
                break;
            };
            if !self.board.generate_legal_moves().contains(mv) {
                break;
            }
            pv.push(mv);
            undos.push(self.board.apply_move(mv));
        }
        while let Some(undo) = undos.pop() {
            self.board.undo_move(&undo);
        }
        pv
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn play(ctx: &mut SearchContext<'_>, uci: &str) {
        let mv = ctx.board.parse_move(uci).unwrap();
        ctx.make(mv);
    }

    #[test]
    fn test_repetition_on_search_path() {
        let mut tt = TranspositionTable::new(1);
        let mut orderer = MoveOrderer::new();
        let params = SearchParams::default();
        let board = Board::new();
        let mut ctx = SearchContext {
            path: vec![board.hash()],
            board,
            tt: &mut tt,
            orderer: &mut orderer,
            params: &params,
            trace: false,
            start: Instant::now(),
            deadline: None,
            node_limit: u64::MAX,
            nodes: 0,
            stopped: false,
            root_best: None,
        };

        play(&mut ctx, "g1f3");
        play(&mut ctx, "g8f6");
        assert!(!ctx.is_draw());
        play(&mut ctx, "f3g1");
        assert!(!ctx.is_draw());
        play(&mut ctx, "f6g8");
        assert!(ctx.is_draw());

        // A pawn move makes every earlier position unreachable.
        play(&mut ctx, "e2e4");
        play(&mut ctx, "g8f6");
        play(&mut ctx, "g1f3");
        play(&mut ctx, "f6g8");
        assert!(!ctx.is_draw());
        // Back to the position right after e2e4.
        play(&mut ctx, "f3g1");
        assert!(ctx.is_draw());
        assert_eq!(ctx.path.len(), 10);
    }

    #[test]
    fn test_zero_budget_falls_back_to_first_legal_move() {
        let board = Board::new();
        let mut searcher = Searcher::new(SearchConfig::time(Duration::ZERO).with_tt_mb(1));
        let result = searcher.search(&board);
        assert_eq!(result.depth, 0);
        assert_eq!(result.best_move, board.generate_legal_moves().first().copied());
        assert!(searcher.tt().probe(board.hash()).is_none());
    }

    #[test]
    fn test_config_builder() {
        let params = SearchParams {
            quiescence: false,
            ..SearchParams::default()
        };
        let config = SearchConfig::time(Duration::from_millis(250))
            .with_depth(5)
            .with_tt_mb(2)
            .with_params(params.clone());
        assert_eq!(config.time_budget, Duration::from_millis(250));
        assert_eq!(config.max_depth, 5);
        assert_eq!(config.params, params);
        assert!(!config.trace);

        let mut searcher = Searcher::new(config);
        let len = searcher.tt().len();
        searcher.set_config(SearchConfig::depth(3).with_tt_mb(4));
        assert!(searcher.tt().len() > len);
    }
}
