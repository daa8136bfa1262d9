//! Builder for creating a `Match`.

use super::state::Match;
use crate::core::{GameRng, MatchConfig, RandomSource};

/// Builder for creating a [`Match`].
///
/// ```
/// use domino_engine::game::MatchBuilder;
///
/// let game = MatchBuilder::new()
///     .target_score(50)
///     .hand_size(7)
///     .build(42);
/// assert_eq!(game.config().target_score, 50);
/// ```
#[derive(Clone, Debug, Default)]
pub struct MatchBuilder {
    config: MatchConfig,
}

impl MatchBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn target_score(mut self, target: u32) -> Self {
        self.config = self.config.with_target_score(target);
        self
    }

    pub fn hand_size(mut self, size: usize) -> Self {
        self.config = self.config.with_hand_size(size);
        self
    }

    /// Build a match driven by a seeded [`GameRng`].
    pub fn build(self, seed: u64) -> Match<GameRng> {
        Match::new(self.config, seed)
    }

    /// Build a match drawing randomness from `rng`.
    pub fn build_with_rng<R: RandomSource>(self, rng: R) -> Match<R> {
        Match::with_rng(self.config, rng)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::ScriptedRng;
    use crate::game::MatchPhase;

    #[test]
    fn test_builder_defaults() {
        let game = MatchBuilder::new().build(1);
        assert_eq!(game.config(), &MatchConfig::default());
        assert_eq!(game.phase(), MatchPhase::RoundStart);
    }

    #[test]
    fn test_build_with_rng() {
        let mut game = MatchBuilder::new()
            .hand_size(5)
            .build_with_rng(ScriptedRng::first());
        game.start_round().unwrap();
        assert_eq!(game.tile_count(), 28);
        assert_eq!(game.set().len(), 17);
    }

    #[test]
    #[should_panic(expected = "Hand size too large")]
    fn test_invalid_config_panics() {
        let _ = MatchBuilder::new().hand_size(13).build(1);
    }
}
