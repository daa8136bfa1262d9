//! Match configuration.
//!
//! A match is configured once at creation:
//! - `target_score`: cumulative score that ends the match
//! - `hand_size`: tiles dealt to each player at round start
//!
//! The tile set is always the double-six set.

use serde::{Deserialize, Serialize};

/// Default score that ends a match.
pub const DEFAULT_TARGET_SCORE: u32 = 30;

/// Default number of tiles dealt to each player.
pub const DEFAULT_HAND_SIZE: usize = 7;

/// Highest pip value of the double-six set.
pub const MAX_PIP: u8 = 6;

/// Tiles in the double-six set.
pub const SET_SIZE: usize = 28;

/// Complete configuration for a match.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchConfig {
    /// A match ends once a cumulative score reaches this value.
    pub target_score: u32,

    /// Tiles dealt to each player at the start of every round.
    pub hand_size: usize,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            target_score: DEFAULT_TARGET_SCORE,
            hand_size: DEFAULT_HAND_SIZE,
        }
    }
}

impl MatchConfig {
    /// Set the target score.
    #[must_use]
    pub fn with_target_score(mut self, target: u32) -> Self {
        self.target_score = target;
        self
    }

    /// Set the hand size.
    #[must_use]
    pub fn with_hand_size(mut self, size: usize) -> Self {
        self.hand_size = size;
        self
    }

    /// Panics if the configuration cannot produce a playable round.
    ///
    /// A round needs both hands, the start tile and the two
    /// starting-player comparison tiles to come out of one set.
    pub fn validate(&self) {
        assert!(self.hand_size > 0, "Hand size must be at least 1");
        assert!(self.target_score > 0, "Target score must be at least 1");
        assert!(
            self.hand_size * 2 + 3 <= SET_SIZE,
            "Hand size too large for the tile set"
        );
    }
}
