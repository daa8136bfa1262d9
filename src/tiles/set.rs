//! The tile set (boneyard): every tile not yet dealt, drawn or placed.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::tile::Tile;
use crate::core::{GameError, GameRng, RandomSource, MAX_PIP};

/// Ordered collection of undistributed tiles.
///
/// Generated once per round and only shrinks through draws, except for
/// tiles lent out and handed back through [`TileSet::return_tile`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TileSet {
    tiles: Vec<Tile>,
}

impl Default for TileSet {
    fn default() -> Self {
        Self::generate()
    }
}

impl TileSet {
    /// The full double-six set: 28 tiles, each unordered pair once.
    #[must_use]
    pub fn generate() -> Self {
        let tiles = (0..=MAX_PIP)
            .flat_map(|i| (i..=MAX_PIP).map(move |j| Tile::new(i, j)))
            .collect();
        Self { tiles }
    }

    /// A set holding exactly `tiles`, in order.
    pub fn from_tiles(tiles: impl IntoIterator<Item = Tile>) -> Self {
        Self {
            tiles: tiles.into_iter().collect(),
        }
    }

    /// A set with no tiles.
    #[must_use]
    pub fn empty() -> Self {
        Self { tiles: Vec::new() }
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    /// Tiles in current order.
    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    /// True if an equal tile is still in the set.
    pub fn contains(&self, tile: &Tile) -> bool {
        self.tiles.iter().any(|t| t == tile)
    }

    /// Remove and return a uniformly chosen tile.
    pub fn draw_random(&mut self, rng: &mut impl RandomSource) -> Result<Tile, GameError> {
        if self.tiles.is_empty() {
            warn!("attempted to draw from an empty tile set");
            return Err(GameError::EmptySet);
        }
        let index = rng.pick_index(self.tiles.len());
        let tile = self.tiles.remove(index);
        debug!(%tile, remaining = self.tiles.len(), "drew tile from set");
        Ok(tile)
    }

    /// Look at a uniformly chosen tile without removing it.
    pub fn peek_random(&self, rng: &mut impl RandomSource) -> Option<&Tile> {
        if self.tiles.is_empty() {
            return None;
        }
        self.tiles.get(rng.pick_index(self.tiles.len()))
    }

    /// Remove the tile at `index`.
    pub fn delete_at(&mut self, index: usize) -> Result<Tile, GameError> {
        if index >= self.tiles.len() {
            warn!(index, len = self.tiles.len(), "no tile at index");
            return Err(GameError::InvalidIndex {
                index,
                len: self.tiles.len(),
            });
        }
        Ok(self.tiles.remove(index))
    }

    /// Put a tile back at the end of the set.
    ///
    /// The tile must have come out of this set; a tile already present
    /// is not added twice.
    pub fn return_tile(&mut self, tile: Tile) {
        if self.contains(&tile) {
            warn!(%tile, "tile returned to set twice");
            return;
        }
        self.tiles.push(tile);
    }

    /// Shuffle the set order in place.
    pub fn shuffle(&mut self, rng: &mut GameRng) {
        rng.shuffle(&mut self.tiles);
    }
}
