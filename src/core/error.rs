//! Error kinds reported by the rules engine.
//!
//! All of these are recoverable: the operation that returns one leaves
//! the set, the hands and the chain exactly as they were.

use thiserror::Error;

use super::player::PlayerId;
use crate::game::MatchPhase;
use crate::tiles::{Side, Tile};

/// Failure reported by a rules operation.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum GameError {
    /// Draw attempted on an empty tile set.
    #[error("the tile set is empty and cannot be drawn from")]
    EmptySet,

    /// Operation attempted on an empty hand.
    #[error("{0} has no tiles in hand")]
    EmptyHand(PlayerId),

    /// Placement attempted with no matching endpoint pip on that side.
    #[error("{tile} cannot be placed on the {side} end")]
    NoCompatibleTile { tile: Tile, side: Side },

    /// Removal of a tile the hand does not hold.
    #[error("{0} is not in this hand")]
    TileNotFound(Tile),

    /// Pip value outside the double-six range.
    #[error("pip value {0} is outside 0..=6")]
    InvalidPip(u8),

    /// Side argument outside LEFT/RIGHT.
    #[error("side must be LEFT or RIGHT, got {0:?}")]
    InvalidSide(String),

    /// Rotation requested towards the orientation the tile already has.
    #[error("tile is already oriented {0}")]
    AlreadyOriented(Side),

    /// Positional removal outside the set.
    #[error("no tile at index {index} (set holds {len})")]
    InvalidIndex { index: usize, len: usize },

    /// Endpoint read or append on a chain with no start tile.
    #[error("the chain has no start tile")]
    EmptyChain,

    /// Start tile set twice in one round.
    #[error("the chain already has a start tile")]
    ChainStarted,

    /// A player acted out of turn.
    #[error("it is not {0}'s turn")]
    NotYourTurn(PlayerId),

    /// Operation not allowed in the current match phase.
    #[error("operation not allowed while the match is in {0:?}")]
    InvalidPhase(MatchPhase),

    /// Settlement requested while both players still hold tiles.
    #[error("the round is not over")]
    RoundNotOver,

    /// Both hands emptied at once, which normal play cannot produce.
    #[error("both hands are empty")]
    BothHandsEmpty,

    /// The move source declined to choose a move.
    #[error("{0} did not choose a move")]
    NoMoveChosen(PlayerId),

    /// A round was started after the match ended.
    #[error("the match is over")]
    MatchOver,
}
