//! # domino-engine
//!
//! A rules engine for two-player block dominoes with draw-from-set.
//!
//! ## Rules in Brief
//!
//! 1. **Deal**: each player draws a hand from the double-six set and one
//!    more tile opens the chain at position 0.
//!
//! 2. **Turns**: a player who cannot match either open end draws until
//!    they can. If the set runs out first, the turn passes.
//!
//! 3. **Scoring**: the first player to empty their hand scores the pips
//!    left in the other hand. A round where neither player can move ends
//!    with no score. The match ends when a cumulative score reaches the
//!    target.
//!
//! ## Architecture
//!
//! - **Single owner**: [`Match`] owns the set, both hands and the chain.
//!   Every tile lives in exactly one of them, and every mutation goes
//!   through a `Match` entry point that validates before it moves tiles.
//!
//! - **Injected randomness**: draws and coin flips go through
//!   [`RandomSource`], so seeded matches replay exactly.
//!
//! - **Untrusted players**: moves come from a [`MoveSource`] and are
//!   re-validated on submission.
//!
//! ## Modules
//!
//! - `core`: players, RNG, configuration, errors
//! - `tiles`: tiles, the tile set and hands
//! - `chain`: the line of placed tiles
//! - `game`: the match state machine and drivers
//! - `record`: snapshot records for offline analysis
//!
//! ```
//! use domino_engine::{play_match, seats, FirstPlayable, MatchBuilder, NullRecorder};
//!
//! let mut game = MatchBuilder::new().target_score(30).build(7);
//! let (mut one, mut two) = (FirstPlayable, FirstPlayable);
//! let record = play_match(&mut game, &mut seats(&mut one, &mut two), &mut NullRecorder).unwrap();
//! assert!(record.winner == 1 || record.winner == 2);
//! ```

pub mod core;
pub mod tiles;
pub mod chain;
pub mod game;
pub mod record;

// Re-export commonly used types
pub use crate::core::{
    PlayerId, PlayerMap,
    GameRng, GameRngState, RandomSource, ScriptedRng,
    MatchConfig, GameError,
};

pub use crate::tiles::{Side, Tile, TileSet, Hand};

pub use crate::chain::{Chain, PlacedTile};

pub use crate::game::{
    Match, MatchBuilder, MatchPhase, TurnState, DrawOutcome, RoundResult, RoundState,
    Move, MoveSource, FirstPlayable, ScriptedMoves,
    play_turn, play_round, play_match, seats, Seats, TurnOutcome,
};

pub use crate::record::{
    Recorder, NullRecorder, MatchLog, write_json_lines,
    RoundStartRecord, TurnStartRecord, TurnEndRecord, RoundRecord, MatchRecord,
};
