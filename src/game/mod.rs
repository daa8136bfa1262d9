//! The match state machine and the drivers that play it.
//!
//! - `state`: [`Match`] and its phases, turn rules and settlement
//! - `builder`: [`MatchBuilder`] for configuring a match
//! - `strategy`: [`MoveSource`] and the built-in move sources
//! - `runner`: turn, round and match loops over two move sources

pub mod state;
pub mod builder;
pub mod strategy;
pub mod runner;

pub use state::{DrawOutcome, Match, MatchPhase, RoundResult, RoundState, TurnState};
pub use builder::MatchBuilder;
pub use strategy::{FirstPlayable, Move, MoveSource, ScriptedMoves};
pub use runner::{play_match, play_round, play_turn, seats, Seats, TurnOutcome, MAX_MOVE_ATTEMPTS};
