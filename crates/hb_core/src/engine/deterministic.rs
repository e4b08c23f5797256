//! Hash-based deterministic selection.
//!
//! Choices that should not consume the game's RNG stream (spray direction,
//! tie-breaks) are derived from (seed, pitch, actor, subcase) with FxHasher.
//! FxHasher rather than `DefaultHasher`: the default hasher is not stable
//! across Rust versions, which would break replay determinism.

use fxhash::FxHasher;
use std::hash::{Hash, Hasher};

/// Subcase constants, one per selection context so contexts never collide.
pub mod subcase {
    /// Which infielder a ground ball finds.
    pub const SPRAY_GROUND: u32 = 0x0100;
    /// Which outfielder a fly ball finds.
    pub const SPRAY_FLY: u32 = 0x0101;
    /// Which fielder a line drive finds.
    pub const SPRAY_LINE: u32 = 0x0102;
}

/// Deterministically pick one of `options_count` choices. Identical
/// (seed, pitch, actor_idx, subcase) always yields the same index.
#[inline]
pub fn deterministic_choice(
    seed: u64,
    pitch: u64,
    actor_idx: usize,
    subcase: u32,
    options_count: usize,
) -> usize {
    if options_count <= 1 {
        return 0;
    }
    let mut hasher = FxHasher::default();
    seed.hash(&mut hasher);
    pitch.hash(&mut hasher);
    actor_idx.hash(&mut hasher);
    subcase.hash(&mut hasher);
    (hasher.finish() as usize) % options_count
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_choice_is_stable() {
        let a = deterministic_choice(42, 100, 5, subcase::SPRAY_GROUND, 4);
        let b = deterministic_choice(42, 100, 5, subcase::SPRAY_GROUND, 4);
        assert_eq!(a, b);
    }

    #[test]
    fn test_choice_in_range() {
        for options in 1..10 {
            let idx = deterministic_choice(42, 100, 5, subcase::SPRAY_FLY, options);
            assert!(idx < options);
        }
        assert_eq!(deterministic_choice(42, 100, 5, subcase::SPRAY_FLY, 0), 0);
    }

    #[test]
    fn test_subcases_diverge() {
        // Not guaranteed per input, but across many pitches the streams must
        // not be identical.
        let diverged = (0..64).any(|pitch| {
            deterministic_choice(42, pitch, 5, subcase::SPRAY_GROUND, 4)
                != deterministic_choice(42, pitch, 5, subcase::SPRAY_LINE, 4)
        });
        assert!(diverged);
    }

    #[test]
    fn test_distribution_roughly_uniform() {
        let mut counts = [0u32; 4];
        for pitch in 0..1000 {
            counts[deterministic_choice(42, pitch, 5, subcase::SPRAY_GROUND, 4)] += 1;
        }
        for &count in &counts {
            assert!(count > 150 && count < 350, "skewed spray: {:?}", counts);
        }
    }
}
