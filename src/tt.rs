//! Transposition table for caching search results.
//!
//! Uses Zobrist hashes to store and retrieve position evaluations. One entry
//! per slot, indexed by the low bits of the hash; the full hash is kept in
//! the entry and checked on every probe, so index collisions only ever cost
//! a miss.
//!
//! Mate scores are stored relative to the node (distance from the stored
//! position to mate) rather than to the search root; see [`score_to_tt`].

use std::mem;

use crate::board::search::constants::MATE_THRESHOLD;
use crate::board::Move;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Bound {
    /// Score is the exact value
    Exact,
    /// Score is at least this value (failed high - score >= beta)
    Lower,
    /// Score is at most this value (failed low - score <= alpha)
    Upper,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TtEntry {
    pub key: u64,
    pub depth: u8,
    /// Node-relative score (see [`score_to_tt`])
    pub score: i32,
    pub bound: Bound,
    pub best_move: Option<Move>,
    /// Search generation the entry was written in
    pub age: u8,
}

impl TtEntry {
    /// Can this entry decide a node searched with window (alpha, beta)?
    #[inline]
    #[must_use]
    pub fn cuts(&self, score: i32, alpha: i32, beta: i32) -> bool {
        match self.bound {
            Bound::Exact => true,
            Bound::Lower => score >= beta,
            Bound::Upper => score <= alpha,
        }
    }
}

/// Convert a root-relative mate score into a node-relative one for storage.
#[inline]
#[must_use]
pub fn score_to_tt(score: i32, ply: usize) -> i32 {
    if score >= MATE_THRESHOLD {
        score + ply as i32
    } else if score <= -MATE_THRESHOLD {
        score - ply as i32
    } else {
        score
    }
}

/// Inverse of [`score_to_tt`] for a probe at `ply`.
#[inline]
#[must_use]
pub fn score_from_tt(score: i32, ply: usize) -> i32 {
    if score >= MATE_THRESHOLD {
        score - ply as i32
    } else if score <= -MATE_THRESHOLD {
        score + ply as i32
    } else {
        score
    }
}

pub struct TranspositionTable {
    entries: Vec<Option<TtEntry>>,
    mask: usize,
    age: u8,
}

impl TranspositionTable {
    /// Create a new transposition table with the given size in megabytes.
    ///
    /// The slot count is rounded down to a power of two (at least 1024).
    #[must_use]
    pub fn new(size_mb: usize) -> Self {
        let slot_size = mem::size_of::<Option<TtEntry>>();
        let wanted = (size_mb * 1024 * 1024) / slot_size;
        let num_slots = if wanted < 1024 {
            1024
        } else if wanted.is_power_of_two() {
            wanted
        } else {
            wanted.next_power_of_two() / 2
        };

        TranspositionTable {
            entries: vec![None; num_slots],
            mask: num_slots - 1,
            age: 0,
        }
    }

    #[inline]
    fn index(&self, hash: u64) -> usize {
        (hash as usize) & self.mask
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.iter().all(Option::is_none)
    }

    #[must_use]
    pub fn age(&self) -> u8 {
        self.age
    }

    /// Start a new search generation. Older entries stay probe-able but are
    /// replaced unconditionally.
    pub fn new_search(&mut self) {
        self.age = self.age.wrapping_add(1);
    }

    /// Probe the table for an entry matching the full hash.
    #[inline]
    #[must_use]
    pub fn probe(&self, hash: u64) -> Option<TtEntry> {
        self.entries[self.index(hash)].filter(|entry| entry.key == hash)
    }

    /// Store an entry in the table.
    ///
    /// Replacement policy:
    /// 1. Empty slots and slots from an older search are always replaced.
    /// 2. An exact entry is only displaced by a bound when the new depth is
    ///    at least the stored depth.
    /// 3. Otherwise replace if at least as deep, or when refreshing the same
    ///    position with an exact score.
    pub fn store(
        &mut self,
        hash: u64,
        depth: u32,
        score: i32,
        bound: Bound,
        best_move: Option<Move>,
    ) {
        let depth = depth.min(u8::MAX as u32) as u8;
        let idx = self.index(hash);
        let replace = match &self.entries[idx] {
            None => true,
            Some(old) if old.age != self.age => true,
            Some(old) if old.bound == Bound::Exact && bound != Bound::Exact => depth >= old.depth,
            Some(old) => depth >= old.depth || (bound == Bound::Exact && old.key == hash),
        };
        if !replace {
            return;
        }

        // Keep a known best move when a re-search of the same position has none.
        let best_move = best_move.or_else(|| {
            self.entries[idx]
                .filter(|old| old.key == hash)
                .and_then(|old| old.best_move)
        });

        self.entries[idx] = Some(TtEntry {
            key: hash,
            depth,
            score,
            bound,
            best_move,
            age: self.age,
        });
    }

    /// Returns table fullness in per mille (0-1000), counting only entries
    /// from the current search.
    #[must_use]
    pub fn hashfull_per_mille(&self) -> u32 {
        // Sample the first 1000 slots
        let sample_size = self.entries.len().min(1000);
        let occupied = self
            .entries
            .iter()
            .take(sample_size)
            .filter(|slot| matches!(slot, Some(e) if e.age == self.age))
            .count();
        ((occupied * 1000) / sample_size) as u32
    }

    #[cfg(test)]
    pub(crate) fn entries(&self) -> impl Iterator<Item = &TtEntry> + '_ {
        self.entries.iter().flatten()
    }

    /// Clear all entries from the table.
    pub fn clear(&mut self) {
        self.entries.fill(None);
        self.age = 0;
    }
}
