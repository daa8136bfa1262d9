//! Tiles and sides.
//!
//! A `Tile` holds two pips in its *current* orientation: `pip1` faces
//! left, `pip2` faces right. Rotating swaps them and flips the
//! orientation flag. Equality ignores orientation, so `Tile(2, 5)` and
//! `Tile(5, 2)` are the same tile.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::core::{GameError, MAX_PIP};

/// One of the two ends of the chain, also used as a tile's orientation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    Left,
    Right,
}

impl Side {
    /// The other side.
    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Side::Left => "LEFT",
            Side::Right => "RIGHT",
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Side {
    type Err = GameError;

    /// Accepts `left`/`right` in any case, or `l`/`r`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "left" | "l" => Ok(Side::Left),
            "right" | "r" => Ok(Side::Right),
            _ => Err(GameError::InvalidSide(s.to_string())),
        }
    }
}

/// A domino tile.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct Tile {
    pip1: u8,
    pip2: u8,
    orientation: Side,
}

impl Tile {
    /// Create a tile with `pip1` facing left.
    ///
    /// Panics if a pip is above 6; see [`Tile::checked`] for untrusted input.
    #[must_use]
    pub const fn new(pip1: u8, pip2: u8) -> Self {
        assert!(pip1 <= MAX_PIP && pip2 <= MAX_PIP, "Pip values must be at most 6");
        Self {
            pip1,
            pip2,
            orientation: Side::Left,
        }
    }

    /// Create a tile, rejecting pips above 6.
    pub fn checked(pip1: u8, pip2: u8) -> Result<Self, GameError> {
        match [pip1, pip2].into_iter().find(|&p| p > MAX_PIP) {
            Some(pip) => Err(GameError::InvalidPip(pip)),
            None => Ok(Self::new(pip1, pip2)),
        }
    }

    /// Pip currently facing left.
    #[inline]
    pub const fn pip1(&self) -> u8 {
        self.pip1
    }

    /// Pip currently facing right.
    #[inline]
    pub const fn pip2(&self) -> u8 {
        self.pip2
    }

    /// Both pips in current orientation.
    #[inline]
    pub const fn pips(&self) -> (u8, u8) {
        (self.pip1, self.pip2)
    }

    #[inline]
    pub const fn orientation(&self) -> Side {
        self.orientation
    }

    #[inline]
    pub const fn is_double(&self) -> bool {
        self.pip1 == self.pip2
    }

    #[inline]
    pub const fn pip_sum(&self) -> u32 {
        self.pip1 as u32 + self.pip2 as u32
    }

    /// True if either pip equals `value`.
    #[inline]
    pub const fn has(&self, value: u8) -> bool {
        self.pip1 == value || self.pip2 == value
    }

    /// Turn the tile to face `target`, swapping its pips.
    ///
    /// Fails with `AlreadyOriented` if the tile already faces `target`.
    pub fn rotate(&mut self, target: Side) -> Result<(), GameError> {
        if self.orientation == target {
            return Err(GameError::AlreadyOriented(target));
        }
        std::mem::swap(&mut self.pip1, &mut self.pip2);
        self.orientation = target;
        Ok(())
    }

    /// Rotate to the opposite orientation.
    pub fn flip(&mut self) {
        std::mem::swap(&mut self.pip1, &mut self.pip2);
        self.orientation = self.orientation.opposite();
    }

    /// Pips ordered low-high, independent of orientation.
    #[inline]
    const fn canonical(&self) -> (u8, u8) {
        if self.pip1 <= self.pip2 {
            (self.pip1, self.pip2)
        } else {
            (self.pip2, self.pip1)
        }
    }
}

impl PartialEq for Tile {
    fn eq(&self, other: &Self) -> bool {
        (self.pip1 == other.pip1 && self.pip2 == other.pip2)
            || (self.pip1 == other.pip2 && self.pip2 == other.pip1)
    }
}

impl Eq for Tile {}

impl Hash for Tile {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.canonical().hash(state);
    }
}

impl fmt::Display for Tile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Tile[{}, {}]", self.pip1, self.pip2)
    }
}
