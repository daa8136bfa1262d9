//! Core engine types: players, RNG, configuration, errors.
//!
//! These are the building blocks shared by tiles, the chain and the
//! match state machine.

pub mod player;
pub mod rng;
pub mod config;
pub mod error;

pub use player::{PlayerId, PlayerMap, PLAYER_COUNT};
pub use rng::{GameRng, GameRngState, RandomSource, ScriptedRng};
pub use config::{MatchConfig, DEFAULT_HAND_SIZE, DEFAULT_TARGET_SCORE, MAX_PIP, SET_SIZE};
pub use error::GameError;
