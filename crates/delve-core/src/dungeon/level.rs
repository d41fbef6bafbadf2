//! One dungeon floor: its grid, current field of view and stair links

use delve_rng::RandomSource;
use log::debug;
use serde::{Deserialize, Serialize};

use super::generation::{GenerationParams, generate_with};
use super::{Direction, Grid, LightLevel, Point, TileKind, VisibilityField};
use crate::error::{DungeonError, Result};

/// A staircase and the tile it leads to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stairway {
    pub pos: Point,
    pub up: bool,
    /// Depth of the floor it leads to
    pub destination: usize,
    /// Exact tile on `destination` where the occupant lands
    pub arrival: Point,
}

/// Complete floor state
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "LevelRepr")]
pub struct Level {
    depth: usize,
    grid: Grid,
    /// Field of view from the last refresh
    field: VisibilityField,
    stairs: Vec<Stairway>,
}

#[derive(Deserialize)]
struct LevelRepr {
    depth: usize,
    grid: Grid,
    field: VisibilityField,
    stairs: Vec<Stairway>,
}

impl TryFrom<LevelRepr> for Level {
    type Error = DungeonError;

    fn try_from(repr: LevelRepr) -> Result<Self> {
        let (grid, field) = (&repr.grid, &repr.field);
        if (field.width(), field.height()) != (grid.width(), grid.height()) {
            return Err(DungeonError::InconsistentState(format!(
                "{}x{} field over {}x{} grid",
                field.width(),
                field.height(),
                grid.width(),
                grid.height()
            )));
        }
        if let Some(link) = repr.stairs.iter().find(|s| !grid.in_bounds(s.pos)) {
            return Err(DungeonError::InconsistentState(format!(
                "stairway at {} outside the grid",
                link.pos
            )));
        }
        Ok(Self {
            depth: repr.depth,
            grid: repr.grid,
            field: repr.field,
            stairs: repr.stairs,
        })
    }
}

impl Level {
    /// Wrap an existing grid. Nothing is visible until the first refresh.
    pub fn new(depth: usize, grid: Grid) -> Self {
        let field = VisibilityField::unlit(grid.width(), grid.height());
        Self {
            depth,
            grid,
            field,
            stairs: Vec::new(),
        }
    }

    /// Create a new level with generated content
    pub fn generate<R: RandomSource + ?Sized>(
        depth: usize,
        width: i32,
        height: i32,
        params: &GenerationParams,
        rng: &mut R,
    ) -> Result<Self> {
        let grid = generate_with(width, height, params, rng)?;
        Ok(Self::new(depth, grid))
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn field(&self) -> &VisibilityField {
        &self.field
    }

    pub fn at(&self, x: i32, y: i32) -> TileKind {
        self.grid.at(x, y)
    }

    /// Check if a tile has been seen at some point
    pub fn is_explored(&self, x: i32, y: i32) -> bool {
        self.grid.explored(x, y)
    }

    /// Check if a tile is in the current field of view
    pub fn is_visible(&self, x: i32, y: i32) -> bool {
        self.field.visible(x, y)
    }

    pub fn light_level(&self, x: i32, y: i32) -> LightLevel {
        self.field.light_level(x, y)
    }

    pub fn can_move(&self, pos: Point, dir: Direction) -> bool {
        self.grid.can_move(pos, dir)
    }

    pub fn random_empty_coords<R: RandomSource + ?Sized>(&self, rng: &mut R) -> Result<Point> {
        self.grid.random_empty_coords(rng)
    }

    /// Recompute the field of view from `origin` and remember everything in it.
    ///
    /// The previous field is discarded.
    pub fn refresh_visibility(&mut self, origin: Point, radius: i32) -> &VisibilityField {
        self.field = VisibilityField::compute(&self.grid, origin, radius);
        for p in self.field.visible_points() {
            self.grid.memoize(p);
        }
        &self.field
    }

    pub fn stairs(&self) -> &[Stairway] {
        &self.stairs
    }

    /// Get stairway at position
    pub fn stairway_at(&self, pos: Point) -> Option<&Stairway> {
        self.stairs.iter().find(|s| s.pos == pos)
    }

    pub fn find_upstairs(&self) -> Option<Point> {
        self.grid.find(TileKind::StairsUp)
    }

    pub fn find_downstairs(&self) -> Option<Point> {
        self.grid.find(TileKind::StairsDown)
    }

    /// Record where the staircase at `pos` leads, replacing any earlier link
    pub(crate) fn link_stairs(&mut self, pos: Point, destination: usize, arrival: Point) {
        let up = self.grid.tile(pos).kind == TileKind::StairsUp;
        debug!(
            "linking depth {} stairs at {pos} to depth {destination} at {arrival}",
            self.depth
        );
        let link = Stairway {
            pos,
            up,
            destination,
            arrival,
        };
        match self.stairs.iter_mut().find(|s| s.pos == pos) {
            Some(existing) => *existing = link,
            None => self.stairs.push(link),
        }
    }

    /// Turn a random empty tile into an up staircase
    pub(crate) fn place_upstairs<R: RandomSource + ?Sized>(&mut self, rng: &mut R) -> Result<Point> {
        let pos = self.grid.random_empty_coords(rng)?;
        self.grid.set_kind(pos, TileKind::StairsUp);
        Ok(pos)
    }
}
