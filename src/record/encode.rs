//! Compact text encodings of tiles and containers.
//!
//! - tile: `"1|2"`
//! - chain: `"-1:1|2 0:2|3 1:3|4"`
//! - hand and set: tiles joined by a space

use crate::chain::Chain;
use crate::tiles::{Hand, Tile, TileSet};

/// Encode a tile in its current orientation.
pub fn encode_tile(tile: &Tile) -> String {
    format!("{}|{}", tile.pip1(), tile.pip2())
}

fn join<'a>(tiles: impl Iterator<Item = &'a Tile>) -> String {
    tiles.map(encode_tile).collect::<Vec<_>>().join(" ")
}

pub fn encode_hand(hand: &Hand) -> String {
    join(hand.tiles().iter())
}

pub fn encode_set(set: &TileSet) -> String {
    join(set.tiles().iter())
}

/// Encode the chain left to right as `position:tile` entries.
pub fn encode_chain(chain: &Chain) -> String {
    chain
        .iter()
        .map(|p| format!("{}:{}", p.position, encode_tile(&p.tile)))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Parse a `"a|b"` tile encoding. Pips above 6 are rejected.
pub fn decode_tile(s: &str) -> Option<Tile> {
    let (a, b) = s.trim().split_once('|')?;
    Tile::checked(a.parse().ok()?, b.parse().ok()?).ok()
}
