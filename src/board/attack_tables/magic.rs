//! Magic bitboard tables for sliding pieces.
//!
//! For every square the relevant occupancy (the piece's rays on an empty
//! board, minus the final edge square of each ray) is hashed with a magic
//! multiplier into a dense per-square slice of one shared attack vector:
//!
//! `attacks[offset + ((occ & mask) * magic) >> shift]`
//!
//! Magics are searched for when the table is first touched, using a seeded
//! generator so the tables come out identical on every run.

use once_cell::sync::Lazy;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::board::types::{Bitboard, Square};

pub(super) const ROOK_DIRECTIONS: [(i8, i8); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];
pub(super) const BISHOP_DIRECTIONS: [(i8, i8); 4] = [(1, 1), (1, -1), (-1, 1), (-1, -1)];

const MAGIC_SEED: u64 = 0x5eed_ba11_0f_c0ffee;
const MAX_MAGIC_ATTEMPTS: u32 = 100_000_000;

#[derive(Clone, Copy, Default)]
struct MagicEntry {
    mask: u64,
    magic: u64,
    shift: u32,
    offset: usize,
}

impl MagicEntry {
    #[inline]
    fn index(&self, occupancy: u64) -> usize {
        ((occupancy & self.mask).wrapping_mul(self.magic) >> self.shift) as usize
    }
}

pub(super) struct MagicTable {
    entries: [MagicEntry; 64],
    attacks: Vec<Bitboard>,
}

impl MagicTable {
    #[inline]
    pub(super) fn attacks(&self, sq: Square, occupancy: Bitboard) -> Bitboard {
        let entry = &self.entries[sq.index()];
        self.attacks[entry.offset + entry.index(occupancy.0)]
    }

    fn build(directions: &[(i8, i8); 4], rng: &mut StdRng) -> Self {
        let mut entries = [MagicEntry::default(); 64];
        let mut attacks = Vec::new();

        for sq in Square::all() {
            let mask = relevant_mask(sq, directions);
            let bits = mask.count_ones();

            // Carry-rippler: enumerate every subset of the mask.
            let mut occupancies = Vec::with_capacity(1 << bits);
            let mut references = Vec::with_capacity(1 << bits);
            let mut subset = 0u64;
            loop {
                occupancies.push(subset);
                references.push(ray_attacks(sq, Bitboard(subset), directions));
                subset = subset.wrapping_sub(mask) & mask;
                if subset == 0 {
                    break;
                }
            }

            let entry = MagicEntry {
                mask,
                magic: 0,
                shift: 64 - bits,
                offset: attacks.len(),
            };
            let (magic, slice) = find_magic(sq, entry, &occupancies, &references, rng);
            entries[sq.index()] = MagicEntry { magic, ..entry };
            attacks.extend_from_slice(&slice);
        }

        MagicTable { entries, attacks }
    }
}

/// Search for a collision-free magic, returning it with the filled slice.
///
/// Slider attack sets are never empty, so an empty slot marks "unused".
fn find_magic(
    sq: Square,
    entry: MagicEntry,
    occupancies: &[u64],
    references: &[Bitboard],
    rng: &mut StdRng,
) -> (u64, Vec<Bitboard>) {
    let mut slice = vec![Bitboard::EMPTY; occupancies.len()];

    for _ in 0..MAX_MAGIC_ATTEMPTS {
        // Sparse candidates hash far better than uniform ones.
        let magic = rng.gen::<u64>() & rng.gen::<u64>() & rng.gen::<u64>();
        if (entry.mask.wrapping_mul(magic) & 0xFF00_0000_0000_0000).count_ones() < 6 {
            continue;
        }

        let candidate = MagicEntry { magic, ..entry };
        slice.fill(Bitboard::EMPTY);
        let collision_free = occupancies.iter().zip(references).all(|(&occ, &attack)| {
            let slot = &mut slice[candidate.index(occ)];
            if slot.is_empty() {
                *slot = attack;
                true
            } else {
                // Constructive collisions (same attack set) are allowed.
                *slot == attack
            }
        });
        if collision_free {
            return (magic, slice);
        }
    }

    // Table construction cannot recover from this; it is a build-time bug.
    panic!("no magic found for square {sq} after {MAX_MAGIC_ATTEMPTS} attempts");
}

/// The piece's rays on an empty board, without the last square of each ray.
pub(super) fn relevant_mask(sq: Square, directions: &[(i8, i8); 4]) -> u64 {
    let mut mask = 0u64;
    for &(dr, df) in directions {
        let mut current = sq.offset(dr, df);
        while let Some(s) = current {
            let next = s.offset(dr, df);
            if next.is_none() {
                break;
            }
            mask |= 1u64 << s.index();
            current = next;
        }
    }
    mask
}

/// Reference ray cast: walk each direction until (and including) a blocker.
pub(super) fn ray_attacks(sq: Square, occupancy: Bitboard, directions: &[(i8, i8)]) -> Bitboard {
    let mut attacks = Bitboard::EMPTY;
    for &(dr, df) in directions {
        let mut current = sq.offset(dr, df);
        while let Some(s) = current {
            attacks = attacks.with(s);
            if occupancy.contains(s) {
                break;
            }
            current = s.offset(dr, df);
        }
    }
    attacks
}

/// Both slider tables, built together from one generator stream.
pub(super) struct SliderTables {
    pub(super) rook: MagicTable,
    pub(super) bishop: MagicTable,
}

pub(super) static SLIDERS: Lazy<SliderTables> = Lazy::new(|| {
    let mut rng = StdRng::seed_from_u64(MAGIC_SEED);
    let rook = MagicTable::build(&ROOK_DIRECTIONS, &mut rng);
    let bishop = MagicTable::build(&BISHOP_DIRECTIONS, &mut rng);
    log::debug!(
        "magic tables built: {} rook and {} bishop entries",
        rook.attacks.len(),
        bishop.attacks.len()
    );
    SliderTables { rook, bishop }
});

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_relevant_mask_sizes() {
        // Corner rook: 6 + 6 relevant squares; center bishop: 9.
        assert_eq!(relevant_mask(Square::A1, &ROOK_DIRECTIONS).count_ones(), 12);
        let e4: Square = "e4".parse().unwrap();
        assert_eq!(relevant_mask(e4, &BISHOP_DIRECTIONS).count_ones(), 9);
        // A rook on an edge still sees along that edge.
        assert!(relevant_mask(Square::A1, &ROOK_DIRECTIONS) & (1 << 8) != 0);
        let total: usize = Square::all()
            .map(|sq| 1usize << relevant_mask(sq, &ROOK_DIRECTIONS).count_ones())
            .sum();
        assert_eq!(total, SLIDERS.rook.attacks.len());
    }

    #[test]
    fn test_magic_lookup_matches_ray_cast() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..2_000 {
            let occupancy = Bitboard(rng.gen::<u64>() & rng.gen::<u64>());
            for sq in Square::all() {
                assert_eq!(
                    SLIDERS.rook.attacks(sq, occupancy),
                    ray_attacks(sq, occupancy, &ROOK_DIRECTIONS)
                );
                assert_eq!(
                    SLIDERS.bishop.attacks(sq, occupancy),
                    ray_attacks(sq, occupancy, &BISHOP_DIRECTIONS)
                );
            }
        }
    }
}
