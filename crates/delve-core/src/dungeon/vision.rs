//! Field of view
//!
//! Ray marching rather than shadow casting: one ray per whole degree, each
//! advancing one tile-length per step from the center of the origin tile.
//! Thin diagonal gaps narrower than a ray's angular step can let light
//! through; this is accepted behavior.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

use super::grid::check_columns;
use super::{Grid, Point};
use crate::consts::RAY_COUNT;
use crate::error::{DungeonError, Result};

/// Per-tile light classification
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, Display, EnumIter,
)]
pub enum LightLevel {
    /// No field has been computed
    #[default]
    Invisible,
    /// Not reached by any ray this turn
    Dim,
    /// In view this turn
    Visible,
}

/// Visibility for every tile of a grid, valid for one origin
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "FieldRepr")]
pub struct VisibilityField {
    width: i32,
    height: i32,
    cells: Vec<Vec<LightLevel>>,
}

#[derive(Deserialize)]
struct FieldRepr {
    width: i32,
    height: i32,
    cells: Vec<Vec<LightLevel>>,
}

impl TryFrom<FieldRepr> for VisibilityField {
    type Error = DungeonError;

    fn try_from(repr: FieldRepr) -> Result<Self> {
        check_columns(&repr.cells, repr.width, repr.height)?;
        Ok(Self {
            width: repr.width,
            height: repr.height,
            cells: repr.cells,
        })
    }
}

impl VisibilityField {
    /// A field with nothing computed yet: every tile `Invisible`
    pub fn unlit(width: i32, height: i32) -> Self {
        Self::filled(width, height, LightLevel::Invisible)
    }

    fn filled(width: i32, height: i32, level: LightLevel) -> Self {
        Self {
            width,
            height,
            cells: vec![vec![level; height as usize]; width as usize],
        }
    }

    /// Cast rays from `origin` out to `radius` steps.
    ///
    /// A radius below 1 lights nothing, not even the origin.
    pub fn compute(grid: &Grid, origin: Point, radius: i32) -> Self {
        let mut field = Self::filled(grid.width(), grid.height(), LightLevel::Dim);
        for degree in 0..RAY_COUNT {
            let theta = f32::from(degree).to_radians();
            field.cast_ray(grid, origin, theta.cos(), theta.sin(), radius);
        }
        field
    }

    fn cast_ray(&mut self, grid: &Grid, origin: Point, dx: f32, dy: f32, radius: i32) {
        let mut ox = origin.x as f32 + 0.5;
        let mut oy = origin.y as f32 + 0.5;
        for _ in 0..radius {
            let p = Point::new(ox.floor() as i32, oy.floor() as i32);
            if !grid.in_bounds(p) {
                return;
            }
            self.cells[p.x as usize][p.y as usize] = LightLevel::Visible;
            if grid.tile(p).kind.blocks_sight() {
                return;
            }
            ox += dx;
            oy += dy;
        }
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    pub fn light_level(&self, x: i32, y: i32) -> LightLevel {
        assert!(
            x >= 0 && y >= 0 && x < self.width && y < self.height,
            "({x}, {y}) outside {}x{} field",
            self.width,
            self.height
        );
        self.cells[x as usize][y as usize]
    }

    pub fn visible(&self, x: i32, y: i32) -> bool {
        self.light_level(x, y) == LightLevel::Visible
    }

    /// Positions currently in view
    pub fn visible_points(&self) -> impl Iterator<Item = Point> + '_ {
        self.cells.iter().enumerate().flat_map(|(x, col)| {
            col.iter()
                .enumerate()
                .filter(|(_, l)| **l == LightLevel::Visible)
                .map(move |(y, _)| Point::new(x as i32, y as i32))
        })
    }
}
