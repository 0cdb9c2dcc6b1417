//! Procedural track generation for the jumper
//!
//! A track is a row of tiles the actor hops across one tile per jump. The
//! only structural rule is local: a gap is always followed by a solid tile.
//! That does not make every layout beatable for every jump pattern, and it
//! is not meant to.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::{Result, SimError};

/// A single track cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Tile {
    Empty,
    Solid,
}

/// Ordered tiles for one run. Index 0 is always solid.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TrackLayout {
    tiles: Vec<Tile>,
}

impl TrackLayout {
    /// Generate a fresh layout of `length` tiles
    pub fn generate<R: Rng + ?Sized>(length: usize, rng: &mut R) -> Self {
        let mut tiles = Vec::with_capacity(length);
        if length == 0 {
            return Self { tiles };
        }

        tiles.push(Tile::Solid);
        for i in 1..length {
            let tile = if tiles[i - 1] == Tile::Empty {
                Tile::Solid
            } else if rng.random_bool(0.5) {
                Tile::Empty
            } else {
                Tile::Solid
            };
            tiles.push(tile);
        }

        Self { tiles }
    }

    /// Build a layout from explicit tiles (hand-made levels, tests)
    pub fn from_tiles(tiles: Vec<Tile>) -> Result<Self> {
        match tiles.first() {
            None => {
                return Err(SimError::InvalidArgument("track has no tiles".into()));
            }
            Some(Tile::Empty) => {
                return Err(SimError::InvalidArgument(
                    "track must start on a solid tile".into(),
                ));
            }
            Some(Tile::Solid) => {}
        }

        if let Some(i) = tiles
            .windows(2)
            .position(|w| w[0] == Tile::Empty && w[1] == Tile::Empty)
        {
            return Err(SimError::InvalidArgument(format!(
                "consecutive gaps at tiles {} and {}",
                i,
                i + 1
            )));
        }

        Ok(Self { tiles })
    }

    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    /// Tile at `index`, or `None` past the end
    pub fn get(&self, index: usize) -> Option<Tile> {
        self.tiles.get(index).copied()
    }

    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    /// Indices of solid tiles (the ones the host draws)
    pub fn solid_indices(&self) -> impl Iterator<Item = usize> + '_ {
        self.tiles
            .iter()
            .enumerate()
            .filter(|(_, t)| **t == Tile::Solid)
            .map(|(i, _)| i)
    }

    /// Drop every tile
    pub fn clear(&mut self) {
        self.tiles.clear();
    }
}
