#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Search tunables.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SearchParams {
    /// Safety margin added to a capture's gain before delta pruning it
    pub delta_margin: i32,
    pub delta_pruning: bool,
    /// Extend leaves with a capture search; when off, depth 0 is a static eval
    pub quiescence: bool,
    /// Percent of the mover's value subtracted from a quiet move that lands
    /// on a square attacked by an enemy pawn
    pub pawn_attack_penalty: i32,
    /// History scores are halved once any entry passes this
    pub history_max: i32,
}

impl Default for SearchParams {
    fn default() -> Self {
        SearchParams {
            delta_margin: 200,
            delta_pruning: true,
            quiescence: true,
            pawn_attack_penalty: 50,
            history_max: 50_000,
        }
    }
}
