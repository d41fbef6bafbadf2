//! Map tile types

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

/// Terrain kind
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, Display, EnumIter,
)]
#[repr(u8)]
pub enum TileKind {
    #[default]
    Wall = 0,
    Empty = 1,
    StairsDown = 2,
    StairsUp = 3,
}

impl TileKind {
    /// Check if this is passable (can walk through)
    pub const fn is_passable(&self) -> bool {
        !matches!(self, TileKind::Wall)
    }

    /// Check if this blocks line of sight
    pub const fn blocks_sight(&self) -> bool {
        matches!(self, TileKind::Wall)
    }

    pub const fn is_stairs(&self) -> bool {
        matches!(self, TileKind::StairsDown | TileKind::StairsUp)
    }

    /// Get the display character for this tile kind
    pub const fn symbol(&self) -> char {
        match self {
            TileKind::Wall => '#',
            TileKind::Empty => '.',
            TileKind::StairsDown => '>',
            TileKind::StairsUp => '<',
        }
    }
}

/// A single map tile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Tile {
    /// Terrain kind
    pub kind: TileKind,

    /// Has been visible at some point. Never reset once set.
    pub explored: bool,
}

impl Tile {
    pub const fn wall() -> Self {
        Self {
            kind: TileKind::Wall,
            explored: false,
        }
    }

    pub const fn empty() -> Self {
        Self {
            kind: TileKind::Empty,
            explored: false,
        }
    }

    pub const fn is_passable(&self) -> bool {
        self.kind.is_passable()
    }
}
