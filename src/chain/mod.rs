//! The chain of placed tiles.
//!
//! Position 0 is the start tile, negative positions grow to the left and
//! positive positions grow to the right. The chain is stored as a deque
//! with an origin offset, so positions are contiguous by construction.
//!
//! The exposed pip on the left is the leftmost tile's `pip1`; on the
//! right it is the rightmost tile's `pip2`. Placement decides legality
//! on pip values alone and rotates the tile only when committing it.

use std::collections::VecDeque;
use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, warn};

use crate::core::GameError;
use crate::tiles::{Side, Tile};

/// A placed tile with its chain position.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlacedTile {
    pub position: i32,
    pub tile: Tile,
}

impl fmt::Display for PlacedTile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} : {}", self.position, self.tile)
    }
}

/// Ordered sequence of placed tiles with two open ends.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chain {
    tiles: VecDeque<Tile>,
    /// Number of tiles placed left of the start tile.
    origin: usize,
}

impl Chain {
    /// Create an empty chain.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Place the first tile at position 0.
    pub fn set_start_tile(&mut self, tile: Tile) -> Result<(), GameError> {
        if !self.tiles.is_empty() {
            return Err(GameError::ChainStarted);
        }
        debug!(%tile, "chain started");
        self.tiles.push_back(tile);
        Ok(())
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    /// The tile at position 0.
    pub fn start_tile(&self) -> Option<&Tile> {
        self.tiles.get(self.origin)
    }

    /// Lowest occupied position.
    pub fn min_position(&self) -> Option<i32> {
        (!self.tiles.is_empty()).then(|| -(self.origin as i32))
    }

    /// Highest occupied position.
    pub fn max_position(&self) -> Option<i32> {
        (!self.tiles.is_empty()).then(|| (self.tiles.len() - 1 - self.origin) as i32)
    }

    /// Tile at a chain position.
    pub fn get(&self, position: i32) -> Option<&Tile> {
        let index = position.checked_add(self.origin as i32)?;
        usize::try_from(index).ok().and_then(|i| self.tiles.get(i))
    }

    /// Exposed pip on the left end.
    pub fn left_pip(&self) -> Option<u8> {
        self.tiles.front().map(Tile::pip1)
    }

    /// Exposed pip on the right end.
    pub fn right_pip(&self) -> Option<u8> {
        self.tiles.back().map(Tile::pip2)
    }

    /// Exposed pip on `side`.
    pub fn end_pip(&self, side: Side) -> Option<u8> {
        match side {
            Side::Left => self.left_pip(),
            Side::Right => self.right_pip(),
        }
    }

    pub fn can_add_left(&self, tile: &Tile) -> bool {
        self.left_pip().is_some_and(|pip| tile.has(pip))
    }

    pub fn can_add_right(&self, tile: &Tile) -> bool {
        self.right_pip().is_some_and(|pip| tile.has(pip))
    }

    /// True if `tile` fits `side`.
    pub fn can_add_on(&self, tile: &Tile, side: Side) -> bool {
        match side {
            Side::Left => self.can_add_left(tile),
            Side::Right => self.can_add_right(tile),
        }
    }

    /// True if `tile` fits either end.
    pub fn can_add(&self, tile: &Tile) -> bool {
        self.can_add_left(tile) || self.can_add_right(tile)
    }

    /// Attach `tile` to `side`, rotating it so the matching pip touches
    /// the chain.
    ///
    /// On the left the matching pip must end up as `pip2`, on the right
    /// as `pip1`. A double that matches either way is placed unrotated.
    /// On failure the chain is unchanged.
    #[instrument(level = "debug", skip(self, tile), fields(tile = %tile))]
    pub fn append(&mut self, mut tile: Tile, side: Side) -> Result<PlacedTile, GameError> {
        let Some(end) = self.end_pip(side) else {
            warn!("append on a chain with no start tile");
            return Err(GameError::EmptyChain);
        };
        if !self.can_add(&tile) || !tile.has(end) {
            debug!(end, "tile does not match the chain end");
            return Err(GameError::NoCompatibleTile { tile, side });
        }

        let position = match side {
            Side::Left => {
                if tile.pip2() != end {
                    tile.flip();
                }
                self.tiles.push_front(tile);
                self.origin += 1;
                -(self.origin as i32)
            }
            Side::Right => {
                if tile.pip1() != end {
                    tile.flip();
                }
                self.tiles.push_back(tile);
                (self.tiles.len() - 1 - self.origin) as i32
            }
        };

        debug!(position, placed = %tile, "tile appended");
        Ok(PlacedTile { position, tile })
    }

    /// Tiles from left to right with their positions.
    pub fn iter(&self) -> impl Iterator<Item = PlacedTile> + '_ {
        let origin = self.origin as i32;
        self.tiles
            .iter()
            .enumerate()
            .map(move |(i, tile)| PlacedTile {
                position: i as i32 - origin,
                tile: *tile,
            })
    }

    /// Snapshot of the layout from left to right.
    pub fn layout(&self) -> Vec<PlacedTile> {
        self.iter().collect()
    }

    /// One `"<position> : Tile[a, b]"` line per placed tile.
    pub fn debug_listing(&self) -> Vec<String> {
        self.iter().map(|p| p.to_string()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn started(tile: Tile) -> Chain {
        let mut chain = Chain::new();
        chain.set_start_tile(tile).unwrap();
        chain
    }

    #[test]
    fn test_empty_chain() {
        let chain = Chain::new();
        assert!(chain.is_empty());
        assert_eq!(chain.left_pip(), None);
        assert_eq!(chain.right_pip(), None);
        assert_eq!(chain.min_position(), None);
        assert!(!chain.can_add(&Tile::new(0, 0)));
    }

    #[test]
    fn test_append_to_empty_chain() {
        let mut chain = Chain::new();
        assert_eq!(chain.append(Tile::new(1, 2), Side::Right), Err(GameError::EmptyChain));
        assert!(chain.is_empty());
    }

    #[test]
    fn test_start_tile_once() {
        let mut chain = started(Tile::new(3, 4));
        assert_eq!(chain.set_start_tile(Tile::new(1, 1)), Err(GameError::ChainStarted));
        assert_eq!(chain.len(), 1);
        assert_eq!(chain.left_pip(), Some(3));
        assert_eq!(chain.right_pip(), Some(4));
    }

    #[test]
    fn test_left_append_rotates_matching_pip_inward() {
        let mut chain = started(Tile::new(2, 2));
        assert!(chain.can_add_left(&Tile::new(2, 5)));

        let placed = chain.append(Tile::new(2, 5), Side::Left).unwrap();
        assert_eq!(placed.position, -1);
        assert_eq!(placed.tile.pips(), (5, 2));
        assert_eq!(chain.left_pip(), Some(5));
        assert_eq!(chain.right_pip(), Some(2));
    }

    #[test]
    fn test_left_append_without_rotation() {
        let mut chain = started(Tile::new(3, 6));
        let placed = chain.append(Tile::new(1, 3), Side::Left).unwrap();
        assert_eq!(placed.tile.pips(), (1, 3));
        assert_eq!(placed.tile.orientation(), Side::Left);
        assert_eq!(chain.left_pip(), Some(1));
    }

    #[test]
    fn test_right_append_rotates_matching_pip_inward() {
        let mut chain = started(Tile::new(3, 6));
        let placed = chain.append(Tile::new(4, 6), Side::Right).unwrap();
        assert_eq!(placed.position, 1);
        assert_eq!(placed.tile.pips(), (6, 4));
        assert_eq!(placed.tile.orientation(), Side::Right);
        assert_eq!(chain.right_pip(), Some(4));
        assert_eq!(chain.left_pip(), Some(3));
    }

    /// Positions with pips and orientation as stored, so rotations show up.
    fn exact(chain: &Chain) -> Vec<(i32, (u8, u8), Side)> {
        chain
            .iter()
            .map(|p| (p.position, p.tile.pips(), p.tile.orientation()))
            .collect()
    }

    #[test]
    fn test_wrong_side_rejected() {
        let mut chain = started(Tile::new(3, 6));
        chain.append(Tile::new(1, 3), Side::Left).unwrap();
        let before = exact(&chain);
        assert_eq!(
            chain.append(Tile::new(6, 2), Side::Left),
            Err(GameError::NoCompatibleTile {
                tile: Tile::new(6, 2),
                side: Side::Left,
            })
        );
        assert_eq!(exact(&chain), before);
        assert_eq!(exact(&chain), vec![(-1, (1, 3), Side::Left), (0, (3, 6), Side::Left)]);
    }

    #[test]
    fn test_double_matching_both_ways_is_not_rotated() {
        let mut chain = started(Tile::new(4, 4));
        let placed = chain.append(Tile::new(4, 4), Side::Left).unwrap();
        assert_eq!(placed.tile.orientation(), Side::Left);
        let placed = chain.append(Tile::new(4, 4), Side::Right).unwrap();
        assert_eq!(placed.tile.orientation(), Side::Left);
    }

    #[test]
    fn test_positions_stay_contiguous() {
        let mut chain = started(Tile::new(3, 3));
        chain.append(Tile::new(3, 1), Side::Left).unwrap();
        chain.append(Tile::new(3, 5), Side::Right).unwrap();
        chain.append(Tile::new(1, 0), Side::Left).unwrap();

        let positions: Vec<_> = chain.iter().map(|p| p.position).collect();
        assert_eq!(positions, vec![-2, -1, 0, 1]);
        assert_eq!(chain.min_position(), Some(-2));
        assert_eq!(chain.max_position(), Some(1));
        assert_eq!(chain.start_tile(), Some(&Tile::new(3, 3)));
        assert_eq!(chain.get(-2), Some(&Tile::new(0, 1)));
        assert_eq!(chain.get(2), None);
        assert_eq!(chain.get(-3), None);
    }

    #[test]
    fn test_adjacent_pips_match() {
        let mut chain = started(Tile::new(2, 4));
        chain.append(Tile::new(4, 5), Side::Right).unwrap();
        chain.append(Tile::new(0, 5), Side::Right).unwrap();
        chain.append(Tile::new(2, 6), Side::Left).unwrap();
        chain.append(Tile::new(1, 6), Side::Left).unwrap();

        let layout = chain.layout();
        for pair in layout.windows(2) {
            assert_eq!(pair[0].tile.pip2(), pair[1].tile.pip1());
        }
        assert_eq!(chain.left_pip(), Some(1));
        assert_eq!(chain.right_pip(), Some(0));
    }

    #[test]
    fn test_debug_listing() {
        let mut chain = started(Tile::new(2, 2));
        chain.append(Tile::new(2, 5), Side::Left).unwrap();
        assert_eq!(chain.debug_listing(), vec!["-1 : Tile[5, 2]", "0 : Tile[2, 2]"]);
    }
}
