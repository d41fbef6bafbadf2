//! Dungeon system
//!
//! Contains the tile grid, floor generation, field of view, and the floor
//! stack with its stairway links.

mod cell;
mod corridor;
mod generation;
mod grid;
mod level;
mod point;
mod rect;
mod topology;
mod vision;

pub use cell::{Tile, TileKind};
pub use corridor::{Tunnel, count_regions, reachable_from};
pub use generation::{GenerationParams, generate, generate_with};
pub use grid::Grid;
pub use level::{Level, Stairway};
pub use point::{Direction, Point};
pub use rect::Rect;
pub use topology::{Dungeon, LevelChange};
pub use vision::{LightLevel, VisibilityField};
