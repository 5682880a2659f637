//! Search constants.
//!
//! Score bounds and move ordering priorities used by the alpha-beta search.

use crate::board::types::MAX_PLY;

// ============================================================================
// SCORES
// ============================================================================

/// Score of delivering mate on the current ply
pub(crate) const MATE: i32 = 30_000;

/// Scores with absolute value >= this are mate scores
pub(crate) const MATE_THRESHOLD: i32 = MATE - MAX_PLY as i32;

/// Window bound, outside every real score
pub(crate) const INFINITY: i32 = 32_000;

/// Returned by a node whose search ran out of time. Never stored or committed.
pub(crate) const ABORTED: i32 = 31_000;

pub(crate) const DRAW: i32 = 0;

// ============================================================================
// MOVE ORDERING PRIORITIES
// ============================================================================
// Higher scores = tried earlier. Ordered: TT > captures > promotions > killers > quiet

/// Hash move (from transposition table) - highest priority
pub(crate) const TT_MOVE_SCORE: i32 = 1_000_000;

/// Base for captures, adjusted by victim minus aggressor value
pub(crate) const CAPTURE_BASE: i32 = 100_000;

/// Base for quiet promotions, plus the promoted piece's value
pub(crate) const PROMOTION_BASE: i32 = 90_000;

/// First killer move (quiet that caused beta cutoff at same ply)
pub(crate) const KILLER1_SCORE: i32 = 80_000;

/// Second killer move (replaced killer)
pub(crate) const KILLER2_SCORE: i32 = 79_000;

/// Piece values for MVV-LVA, indexed by `PieceKind::index`. The king is
/// priced low enough that king captures still sort among captures.
pub(crate) const ORDER_VALUES: [i32; 6] = [100, 320, 330, 500, 900, 1_200];

// ============================================================================
// DEFAULTS
// ============================================================================

/// Default transposition table size in MB
pub const DEFAULT_TT_MB: usize = 16;

/// Default iterative deepening limit
pub const DEFAULT_MAX_DEPTH: u32 = 64;

/// Clock is read once every this many nodes (plus the first node)
pub(crate) const CLOCK_POLL_MASK: u64 = 255;
