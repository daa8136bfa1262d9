//! A player's hand.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use tracing::{debug, warn};

use super::set::TileSet;
use super::tile::{Side, Tile};
use crate::chain::Chain;
use crate::core::{GameError, RandomSource};

/// Tiles held by one player.
///
/// Seven tiles at round start is the common case, so the hand stays
/// inline until a long run of draws spills it to the heap.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hand {
    tiles: SmallVec<[Tile; 8]>,
}

impl Hand {
    /// Create an empty hand.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A hand holding exactly `tiles`.
    pub fn from_tiles(tiles: impl IntoIterator<Item = Tile>) -> Self {
        Self {
            tiles: tiles.into_iter().collect(),
        }
    }

    /// Deal `count` tiles from `set`.
    ///
    /// Fails with `EmptySet` before drawing anything if the set cannot
    /// cover the whole deal.
    pub fn draw_initial(
        &mut self,
        set: &mut TileSet,
        rng: &mut impl RandomSource,
        count: usize,
    ) -> Result<(), GameError> {
        if set.len() < count {
            warn!(count, available = set.len(), "not enough tiles to deal");
            return Err(GameError::EmptySet);
        }
        for _ in 0..count {
            let tile = set.draw_random(rng)?;
            self.tiles.push(tile);
        }
        Ok(())
    }

    /// Draw one tile from `set` into the hand.
    ///
    /// On an empty set the hand is left unchanged.
    pub fn draw(&mut self, set: &mut TileSet, rng: &mut impl RandomSource) -> Result<Tile, GameError> {
        let tile = set.draw_random(rng)?;
        self.tiles.push(tile);
        Ok(tile)
    }

    /// Add a tile directly.
    pub fn push(&mut self, tile: Tile) {
        self.tiles.push(tile);
    }

    /// Remove the first tile equal to `tile` and return it as held.
    pub fn remove(&mut self, tile: &Tile) -> Result<Tile, GameError> {
        match self.tiles.iter().position(|t| t == tile) {
            Some(index) => {
                let removed = self.tiles.remove(index);
                debug!(tile = %removed, left = self.tiles.len(), "removed tile from hand");
                Ok(removed)
            }
            None => {
                warn!(%tile, "tile is not in this hand");
                Err(GameError::TileNotFound(*tile))
            }
        }
    }

    pub fn contains(&self, tile: &Tile) -> bool {
        self.tiles.iter().any(|t| t == tile)
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    /// Number of tiles held.
    #[inline]
    pub fn count(&self) -> usize {
        self.tiles.len()
    }

    /// Sum of both pips over every held tile.
    pub fn sum_pips(&self) -> u32 {
        self.tiles.iter().map(Tile::pip_sum).sum()
    }

    /// Tiles in the order they were received.
    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    /// Held tiles that fit either end of `chain`.
    pub fn playable<'a>(&'a self, chain: &'a Chain) -> impl Iterator<Item = &'a Tile> + 'a {
        self.tiles.iter().filter(move |t| chain.can_add(t))
    }

    /// First held tile that fits the chain, preferring the left end.
    pub fn first_playable(&self, chain: &Chain) -> Option<(Tile, Side)> {
        self.tiles.iter().find_map(|t| {
            if chain.can_add_left(t) {
                Some((*t, Side::Left))
            } else if chain.can_add_right(t) {
                Some((*t, Side::Right))
            } else {
                None
            }
        })
    }
}
