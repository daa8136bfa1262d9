//! Tiles and the containers that hold them before placement.
//!
//! - `Tile`, `Side`: pip pairs and chain ends
//! - `TileSet`: undistributed tiles
//! - `Hand`: a player's held tiles

pub mod tile;
pub mod set;
pub mod hand;

pub use tile::{Side, Tile};
pub use set::TileSet;
pub use hand::Hand;
