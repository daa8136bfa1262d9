//! Flat snapshot records taken at match checkpoints.
//!
//! Every record is a flat set of key-value fields so rows can be dumped
//! as JSON lines and loaded as a table for offline analysis. Players are
//! written as 1-based seat numbers.

use serde::{Deserialize, Serialize};

use super::encode::{encode_chain, encode_hand, encode_set, encode_tile};
use crate::core::{PlayerId, RandomSource};
use crate::game::{Match, RoundResult};

/// Taken right after a round is dealt.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundStartRecord {
    pub round: u32,
    pub initial_turn: u8,
    pub initial_tile: String,
    pub player1_hand: String,
    pub player2_hand: String,
    pub set_contents: String,
}

impl RoundStartRecord {
    pub fn capture<R: RandomSource>(game: &Match<R>) -> Self {
        Self {
            round: game.round(),
            initial_turn: game.initial_turn().map_or(0, PlayerId::number),
            initial_tile: game.chain().start_tile().map(encode_tile).unwrap_or_default(),
            player1_hand: encode_hand(game.hand(PlayerId::ONE)),
            player2_hand: encode_hand(game.hand(PlayerId::TWO)),
            set_contents: encode_set(game.set()),
        }
    }
}

/// Taken before the active player acts.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnStartRecord {
    pub round: u32,
    pub player_turn: u8,
    pub set_contents: String,
    pub player1_hand: String,
    pub player2_hand: String,
    pub chain_contents: String,
}

impl TurnStartRecord {
    pub fn capture<R: RandomSource>(game: &Match<R>) -> Self {
        Self {
            round: game.round(),
            player_turn: game.active_player().number(),
            set_contents: encode_set(game.set()),
            player1_hand: encode_hand(game.hand(PlayerId::ONE)),
            player2_hand: encode_hand(game.hand(PlayerId::TWO)),
            chain_contents: encode_chain(game.chain()),
        }
    }
}

/// Taken after the active player acted, before the turn passes.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnEndRecord {
    pub round: u32,
    pub player_turn: u8,
    pub set_contents: String,
    pub player1_hand: String,
    pub player2_hand: String,
    pub chain_contents: String,
    pub tiles_drawn: u32,
    pub passed_turn: bool,
    pub placed_tile: Option<String>,
}

impl TurnEndRecord {
    pub fn capture<R: RandomSource>(game: &Match<R>) -> Self {
        let turn = game.turn();
        Self {
            round: game.round(),
            player_turn: game.active_player().number(),
            set_contents: encode_set(game.set()),
            player1_hand: encode_hand(game.hand(PlayerId::ONE)),
            player2_hand: encode_hand(game.hand(PlayerId::TWO)),
            chain_contents: encode_chain(game.chain()),
            tiles_drawn: turn.drawn,
            passed_turn: turn.passed,
            placed_tile: turn.placed.map(|p| format!("{}:{}", p.position, encode_tile(&p.tile))),
        }
    }
}

/// Taken once a round is settled.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundRecord {
    pub round: u32,
    pub initial_turn: u8,
    /// 0 when the round ended deadlocked.
    pub winner: u8,
    pub points_gained: u32,
    pub player1_points: u32,
    pub player2_points: u32,
    pub initial_tile: String,
    pub chain_layout: String,
}

impl RoundRecord {
    pub fn capture<R: RandomSource>(game: &Match<R>, result: &RoundResult) -> Self {
        Self {
            round: result.round,
            initial_turn: game.initial_turn().map_or(0, PlayerId::number),
            winner: result.winner.map_or(0, PlayerId::number),
            points_gained: result.points,
            player1_points: result.scores[PlayerId::ONE],
            player2_points: result.scores[PlayerId::TWO],
            initial_tile: game.chain().start_tile().map(encode_tile).unwrap_or_default(),
            chain_layout: encode_chain(game.chain()),
        }
    }
}

/// Taken when the match ends.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchRecord {
    pub initial_turn: u8,
    pub player1_draw_count: u32,
    pub player2_draw_count: u32,
    pub player1_pass_count: u32,
    pub player2_pass_count: u32,
    pub round_count: u32,
    /// Winner per round in order, `0` for deadlocked rounds.
    pub round_winners: String,
    pub player1_score: u32,
    pub player2_score: u32,
    /// 0 if no player reached the target.
    pub winner: u8,
}

impl MatchRecord {
    pub fn capture<R: RandomSource>(game: &Match<R>) -> Self {
        let round_winners = game
            .round_results()
            .iter()
            .map(|r| r.winner.map_or(0, PlayerId::number).to_string())
            .collect::<Vec<_>>()
            .join(" ");

        Self {
            initial_turn: game.first_turn().map_or(0, PlayerId::number),
            player1_draw_count: game.draw_totals()[PlayerId::ONE],
            player2_draw_count: game.draw_totals()[PlayerId::TWO],
            player1_pass_count: game.pass_totals()[PlayerId::ONE],
            player2_pass_count: game.pass_totals()[PlayerId::TWO],
            round_count: game.round(),
            round_winners,
            player1_score: game.score(PlayerId::ONE),
            player2_score: game.score(PlayerId::TWO),
            winner: game.match_winner().map_or(0, PlayerId::number),
        }
    }
}
