//! Move sources: whoever decides which tile to play.
//!
//! The match never trusts a move source. Every submission is
//! re-validated by [`Match::play_tile`](super::Match::play_tile), and a
//! rejected move is reported back through [`MoveSource::on_rejected`].

use crate::chain::Chain;
use crate::core::{GameError, PlayerId};
use crate::tiles::{Hand, Side, Tile};

/// A tile and the chain end to attach it to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Move {
    pub tile: Tile,
    pub side: Side,
}

impl Move {
    pub const fn new(tile: Tile, side: Side) -> Self {
        Self { tile, side }
    }
}

/// Chooses moves for one seat.
pub trait MoveSource {
    /// Choose a move for `player`, or `None` to decline.
    ///
    /// Only called when the player holds at least one playable tile.
    fn choose_move(&mut self, player: PlayerId, hand: &Hand, chain: &Chain) -> Option<Move>;

    /// Called when the match rejected the last move.
    fn on_rejected(&mut self, _player: PlayerId, _attempted: &Move, _error: &GameError) {}
}

/// Plays the first held tile that fits, trying the left end first.
#[derive(Clone, Copy, Debug, Default)]
pub struct FirstPlayable;

impl MoveSource for FirstPlayable {
    fn choose_move(&mut self, _player: PlayerId, hand: &Hand, chain: &Chain) -> Option<Move> {
        hand.first_playable(chain).map(|(tile, side)| Move::new(tile, side))
    }
}

/// Replays a fixed list of moves, then declines.
#[derive(Clone, Debug, Default)]
pub struct ScriptedMoves {
    moves: std::collections::VecDeque<Move>,
    rejected: Vec<(Move, GameError)>,
}

impl ScriptedMoves {
    pub fn new(moves: impl IntoIterator<Item = Move>) -> Self {
        Self {
            moves: moves.into_iter().collect(),
            rejected: Vec::new(),
        }
    }

    /// Moves the match rejected, with the reason.
    pub fn rejected(&self) -> &[(Move, GameError)] {
        &self.rejected
    }
}

impl MoveSource for ScriptedMoves {
    fn choose_move(&mut self, _player: PlayerId, _hand: &Hand, _chain: &Chain) -> Option<Move> {
        self.moves.pop_front()
    }

    fn on_rejected(&mut self, _player: PlayerId, attempted: &Move, error: &GameError) {
        self.rejected.push((*attempted, error.clone()));
    }
}
