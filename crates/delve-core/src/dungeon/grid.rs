//! Fixed-size tile grid backing one floor

use delve_rng::RandomSource;
use log::warn;
use serde::{Deserialize, Serialize};

use super::{Direction, Point, Tile, TileKind};
use crate::consts::MAX_PLACEMENT_ATTEMPTS;
use crate::error::{DungeonError, Result};

/// A `width` x `height` array of tiles, indexed `cells[x][y]`.
///
/// Every coordinate accessor requires `0 <= x < width` and `0 <= y < height`
/// and panics otherwise. Use [`Grid::in_bounds`] to test first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "GridRepr")]
pub struct Grid {
    width: i32,
    height: i32,
    cells: Vec<Vec<Tile>>,
}

/// Unchecked wire form of [`Grid`]
#[derive(Deserialize)]
struct GridRepr {
    width: i32,
    height: i32,
    cells: Vec<Vec<Tile>>,
}

impl TryFrom<GridRepr> for Grid {
    type Error = DungeonError;

    fn try_from(repr: GridRepr) -> Result<Self> {
        check_columns(&repr.cells, repr.width, repr.height)?;
        Ok(Self {
            width: repr.width,
            height: repr.height,
            cells: repr.cells,
        })
    }
}

/// Check that column-major `cells` hold exactly `width` columns of `height`
/// entries, with both dimensions positive.
pub(super) fn check_columns<T>(cells: &[Vec<T>], width: i32, height: i32) -> Result<()> {
    if width <= 0 || height <= 0 {
        return Err(DungeonError::InconsistentState(format!(
            "dimensions must be positive, got {width}x{height}"
        )));
    }
    if cells.len() != width as usize {
        return Err(DungeonError::InconsistentState(format!(
            "{} columns for width {width}",
            cells.len()
        )));
    }
    if let Some(x) = cells.iter().position(|col| col.len() != height as usize) {
        return Err(DungeonError::InconsistentState(format!(
            "column {x} has {} cells for height {height}",
            cells[x].len()
        )));
    }
    Ok(())
}

impl Grid {
    /// Create a grid filled with walls
    ///
    /// # Panics
    ///
    /// Panics if either dimension is not positive.
    pub fn new(width: i32, height: i32) -> Self {
        assert!(
            width > 0 && height > 0,
            "grid dimensions must be positive, got {width}x{height}"
        );
        Self {
            width,
            height,
            cells: vec![vec![Tile::wall(); height as usize]; width as usize],
        }
    }

    /// Build a grid from text rows using [`TileKind::symbol`] characters.
    ///
    /// Row `y` is `rows[y]`; unknown characters become walls and short rows
    /// are padded with walls.
    ///
    /// # Panics
    ///
    /// Panics if `rows` is empty or every row is empty.
    pub fn from_rows(rows: &[&str]) -> Self {
        let height = rows.len() as i32;
        let width = rows.iter().map(|r| r.chars().count()).max().unwrap_or(0) as i32;
        let mut grid = Self::new(width, height);
        for (y, row) in rows.iter().enumerate() {
            for (x, ch) in row.chars().enumerate() {
                let kind = match ch {
                    '.' => TileKind::Empty,
                    '>' => TileKind::StairsDown,
                    '<' => TileKind::StairsUp,
                    _ => TileKind::Wall,
                };
                grid.set_kind(Point::new(x as i32, y as i32), kind);
            }
        }
        grid
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    /// Check if position is inside the grid
    pub const fn in_bounds(&self, p: Point) -> bool {
        p.x >= 0 && p.y >= 0 && p.x < self.width && p.y < self.height
    }

    fn index(&self, p: Point) -> (usize, usize) {
        assert!(
            self.in_bounds(p),
            "{p} outside {}x{} grid",
            self.width,
            self.height
        );
        (p.x as usize, p.y as usize)
    }

    pub fn tile(&self, p: Point) -> &Tile {
        let (x, y) = self.index(p);
        &self.cells[x][y]
    }

    /// Tile kind at `(x, y)`
    pub fn at(&self, x: i32, y: i32) -> TileKind {
        self.tile(Point::new(x, y)).kind
    }

    /// Whether `(x, y)` has ever been visible
    pub fn explored(&self, x: i32, y: i32) -> bool {
        self.tile(Point::new(x, y)).explored
    }

    /// Overwrite the terrain kind, keeping the explored flag
    pub fn set_kind(&mut self, p: Point, kind: TileKind) {
        let (x, y) = self.index(p);
        self.cells[x][y].kind = kind;
    }

    /// Mark a tile as explored. Explored flags are never cleared.
    pub fn memoize(&mut self, p: Point) {
        let (x, y) = self.index(p);
        self.cells[x][y].explored = true;
    }

    /// Check whether one step from `pos` in `dir` lands on a passable tile
    pub fn can_move(&self, pos: Point, dir: Direction) -> bool {
        let target = pos.step(dir);
        self.in_bounds(target) && self.tile(target).is_passable()
    }

    /// All positions, column by column
    pub fn points(&self) -> impl Iterator<Item = Point> + use<> {
        let (width, height) = (self.width, self.height);
        (0..width).flat_map(move |x| (0..height).map(move |y| Point::new(x, y)))
    }

    pub fn count(&self, kind: TileKind) -> usize {
        self.cells
            .iter()
            .flatten()
            .filter(|t| t.kind == kind)
            .count()
    }

    /// First position of `kind` in column order
    pub fn find(&self, kind: TileKind) -> Option<Point> {
        self.points().find(|&p| self.tile(p).kind == kind)
    }

    /// Pick a random `Empty` tile.
    ///
    /// Tries [`MAX_PLACEMENT_ATTEMPTS`] uniform draws, then falls back to a
    /// uniform choice among all empty tiles. Fails only if there are none.
    pub fn random_empty_coords<R: RandomSource + ?Sized>(&self, rng: &mut R) -> Result<Point> {
        for _ in 0..MAX_PLACEMENT_ATTEMPTS {
            let p = Point::new(
                rng.int_in_range(0, self.width),
                rng.int_in_range(0, self.height),
            );
            if self.tile(p).kind == TileKind::Empty {
                return Ok(p);
            }
        }

        let empties: Vec<Point> = self
            .points()
            .filter(|&p| self.tile(p).kind == TileKind::Empty)
            .collect();
        if empties.is_empty() {
            warn!("no empty tile on {}x{} grid", self.width, self.height);
            return Err(DungeonError::NoEmptyTile {
                width: self.width,
                height: self.height,
            });
        }
        Ok(empties[rng.below(empties.len())])
    }
}

impl core::fmt::Display for Grid {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        for y in 0..self.height {
            for x in 0..self.width {
                write!(f, "{}", self.at(x, y).symbol())?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use delve_rng::{GameRng, SequenceRng};
    use strum::IntoEnumIterator;

    #[test]
    fn test_new_grid_is_all_wall() {
        let grid = Grid::new(4, 3);
        assert_eq!(grid.count(TileKind::Wall), 12);
        assert!(grid.points().all(|p| !grid.explored(p.x, p.y)));
    }

    #[test]
    fn test_from_rows_and_display() {
        let rows = ["#####", "#.>.#", "#####"];
        let grid = Grid::from_rows(&rows);
        assert_eq!((grid.width(), grid.height()), (5, 3));
        assert_eq!(grid.at(2, 1), TileKind::StairsDown);
        assert_eq!(grid.to_string(), "#####\n#.>.#\n#####\n");
    }

    #[test]
    fn test_bounds_are_half_open() {
        let grid = Grid::new(3, 2);
        assert!(grid.in_bounds(Point::new(2, 1)));
        assert!(!grid.in_bounds(Point::new(3, 1)));
        assert!(!grid.in_bounds(Point::new(2, 2)));
        assert!(!grid.in_bounds(Point::new(-1, 0)));
    }

    #[test]
    #[should_panic]
    fn test_out_of_bounds_access_panics() {
        let grid = Grid::new(3, 2);
        grid.at(3, 0);
    }

    #[test]
    fn test_can_move_walled_in() {
        let grid = Grid::from_rows(&["###", "#.#", "###"]);
        let center = Point::new(1, 1);
        for dir in Direction::iter().filter(|d| *d != Direction::Stay) {
            assert!(!grid.can_move(center, dir));
        }
        assert!(grid.can_move(center, Direction::Stay));
    }

    #[test]
    fn test_can_move_at_edge_stays_in_bounds() {
        let grid = Grid::from_rows(&["..", ".."]);
        assert!(grid.can_move(Point::new(0, 0), Direction::East));
        assert!(!grid.can_move(Point::new(0, 0), Direction::West));
        assert!(!grid.can_move(Point::new(1, 1), Direction::South));
    }

    #[test]
    fn test_memoize_is_sticky() {
        let mut grid = Grid::from_rows(&["..."]);
        grid.memoize(Point::new(1, 0));
        grid.set_kind(Point::new(1, 0), TileKind::StairsUp);
        assert!(grid.explored(1, 0));
        assert!(!grid.explored(0, 0));
    }

    #[test]
    fn test_random_empty_coords_finds_lone_tile() {
        let grid = Grid::from_rows(&["#####", "###.#", "#####"]);
        // Never hits the tile by sampling, so the scan fallback must find it.
        let mut rng = SequenceRng::new([0]);
        assert_eq!(grid.random_empty_coords(&mut rng).unwrap(), Point::new(3, 1));

        let mut rng = GameRng::new(3);
        assert_eq!(grid.random_empty_coords(&mut rng).unwrap(), Point::new(3, 1));
    }

    #[test]
    fn test_random_empty_coords_fails_without_empty() {
        let grid = Grid::from_rows(&["#>#", "###"]);
        let mut rng = GameRng::new(9);
        assert!(matches!(
            grid.random_empty_coords(&mut rng),
            Err(DungeonError::NoEmptyTile {
                width: 3,
                height: 2
            })
        ));
    }

    #[test]
    fn test_serde_round_trip_keeps_explored() {
        let mut grid = Grid::from_rows(&["#.>", "..#"]);
        grid.memoize(Point::new(1, 0));
        let json = serde_json::to_string(&grid).unwrap();
        let restored: Grid = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, grid);
        assert!(restored.explored(1, 0));
    }

    #[test]
    fn test_deserialize_rejects_missing_columns() {
        let result = serde_json::from_str::<Grid>(r#"{"width":5,"height":5,"cells":[]}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_deserialize_rejects_short_column() {
        let mut value = serde_json::to_value(Grid::new(3, 2)).unwrap();
        value["cells"][1].as_array_mut().unwrap().pop();
        assert!(serde_json::from_value::<Grid>(value).is_err());
    }

    #[test]
    fn test_deserialize_rejects_non_positive_dimensions() {
        let result = serde_json::from_str::<Grid>(r#"{"width":0,"height":3,"cells":[]}"#);
        assert!(result.is_err());
    }

    #[test]
    #[should_panic]
    fn test_from_rows_empty_panics() {
        Grid::from_rows(&[]);
    }
}
