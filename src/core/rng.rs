//! Seedable randomness for deals, draws and the starting-player coin flip.
//!
//! Every random decision in a match goes through the [`RandomSource`]
//! trait, so a match can run on:
//!
//! - [`GameRng`]: ChaCha8-backed, same seed produces the same match
//! - [`ScriptedRng`]: a fixed script of picks and flips for tests
//!
//! ```
//! use domino_engine::core::{GameRng, RandomSource};
//!
//! let mut a = GameRng::new(42);
//! let mut b = GameRng::new(42);
//! assert_eq!(a.pick_index(28), b.pick_index(28));
//! ```

use std::collections::VecDeque;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

/// Source of the two random primitives the rules need.
pub trait RandomSource {
    /// Pick an index uniformly in `0..n`. `n` is always non-zero.
    fn pick_index(&mut self, n: usize) -> usize;

    /// Fair coin flip.
    fn coin_flip(&mut self) -> bool;
}

impl<T: RandomSource + ?Sized> RandomSource for &mut T {
    fn pick_index(&mut self, n: usize) -> usize {
        (**self).pick_index(n)
    }

    fn coin_flip(&mut self) -> bool {
        (**self).coin_flip()
    }
}

/// Deterministic RNG for match play.
///
/// Uses ChaCha8 for speed while keeping a serializable position,
/// so a match can be checkpointed and resumed with identical draws.
#[derive(Clone, Debug)]
pub struct GameRng {
    inner: ChaCha8Rng,
    seed: u64,
}

impl GameRng {
    /// Create a new RNG with the given seed.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            inner: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }

    /// The seed this RNG was created with.
    #[must_use]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Shuffle a slice in place.
    pub fn shuffle<T>(&mut self, slice: &mut [T]) {
        use rand::seq::SliceRandom;
        slice.shuffle(&mut self.inner);
    }

    /// Get the current state for serialization.
    #[must_use]
    pub fn state(&self) -> GameRngState {
        GameRngState {
            seed: self.seed,
            word_pos: self.inner.get_word_pos(),
        }
    }

    /// Restore from a saved state.
    #[must_use]
    pub fn from_state(state: &GameRngState) -> Self {
        let mut inner = ChaCha8Rng::seed_from_u64(state.seed);
        inner.set_word_pos(state.word_pos);
        Self {
            inner,
            seed: state.seed,
        }
    }
}

impl RandomSource for GameRng {
    fn pick_index(&mut self, n: usize) -> usize {
        self.inner.gen_range(0..n)
    }

    fn coin_flip(&mut self) -> bool {
        self.inner.gen_bool(0.5)
    }
}

/// Serializable RNG state for checkpointing.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameRngState {
    /// Original seed
    pub seed: u64,
    /// ChaCha8 word position (128-bit counter)
    pub word_pos: u128,
}

/// Replays a fixed script of index picks and coin flips.
///
/// Picks are reduced modulo `n`, so a script written for a full set stays
/// valid as the set shrinks. An exhausted script keeps answering `0` and
/// `false`.
#[derive(Clone, Debug, Default)]
pub struct ScriptedRng {
    picks: VecDeque<usize>,
    flips: VecDeque<bool>,
}

impl ScriptedRng {
    /// Create a scripted source from picks and flips, consumed in order.
    pub fn new(picks: impl IntoIterator<Item = usize>, flips: impl IntoIterator<Item = bool>) -> Self {
        Self {
            picks: picks.into_iter().collect(),
            flips: flips.into_iter().collect(),
        }
    }

    /// A source that always picks index 0 and always flips `false`.
    #[must_use]
    pub fn first() -> Self {
        Self::default()
    }

    /// Number of scripted picks not yet consumed.
    #[must_use]
    pub fn remaining_picks(&self) -> usize {
        self.picks.len()
    }
}

impl RandomSource for ScriptedRng {
    fn pick_index(&mut self, n: usize) -> usize {
        self.picks.pop_front().map_or(0, |i| i % n)
    }

    fn coin_flip(&mut self) -> bool {
        self.flips.pop_front().unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_determinism() {
        let mut rng1 = GameRng::new(42);
        let mut rng2 = GameRng::new(42);

        for _ in 0..100 {
            assert_eq!(rng1.pick_index(1000), rng2.pick_index(1000));
        }
    }

    #[test]
    fn test_different_seeds() {
        let mut rng1 = GameRng::new(1);
        let mut rng2 = GameRng::new(2);

        let seq1: Vec<_> = (0..10).map(|_| rng1.pick_index(1000)).collect();
        let seq2: Vec<_> = (0..10).map(|_| rng2.pick_index(1000)).collect();

        assert_ne!(seq1, seq2);
    }

    #[test]
    fn test_pick_index_in_range() {
        let mut rng = GameRng::new(7);
        for n in 1..30 {
            for _ in 0..20 {
                assert!(rng.pick_index(n) < n);
            }
        }
    }

    #[test]
    fn test_coin_flip_produces_both_sides() {
        let mut rng = GameRng::new(99);
        let flips: Vec<_> = (0..64).map(|_| rng.coin_flip()).collect();
        assert!(flips.contains(&true));
        assert!(flips.contains(&false));
    }

    #[test]
    fn test_state_restore() {
        let mut rng = GameRng::new(42);
        for _ in 0..100 {
            rng.pick_index(28);
        }

        let state = rng.state();
        let expected: Vec<_> = (0..10).map(|_| rng.pick_index(28)).collect();

        let mut restored = GameRng::from_state(&state);
        let actual: Vec<_> = (0..10).map(|_| restored.pick_index(28)).collect();

        assert_eq!(expected, actual);
    }

    #[test]
    fn test_state_serde() {
        let state = GameRngState {
            seed: 42,
            word_pos: 12345,
        };

        let json = serde_json::to_string(&state).unwrap();
        let deserialized: GameRngState = serde_json::from_str(&json).unwrap();

        assert_eq!(state, deserialized);
    }

    #[test]
    fn test_scripted_replays_in_order() {
        let mut rng = ScriptedRng::new([3, 30, 1], [true, false]);
        assert_eq!(rng.pick_index(10), 3);
        assert_eq!(rng.pick_index(28), 2);
        assert_eq!(rng.pick_index(10), 1);
        assert_eq!(rng.remaining_picks(), 0);
        assert_eq!(rng.pick_index(10), 0);

        assert!(rng.coin_flip());
        assert!(!rng.coin_flip());
        assert!(!rng.coin_flip());
    }

    #[test]
    fn test_mut_ref_is_a_source() {
        fn pick(mut source: impl RandomSource) -> usize {
            source.pick_index(5)
        }
        let mut rng = ScriptedRng::new([4, 2], []);
        assert_eq!(pick(&mut rng), 4);
        assert_eq!(pick(&mut rng), 2);
    }
}
