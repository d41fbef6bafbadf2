//! Grid coordinates and movement directions

use core::ops::Add;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

/// A grid position or delta
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Position one step in `dir`
    pub fn step(self, dir: Direction) -> Self {
        self + dir.delta()
    }

    /// Chebyshev (king-move) distance
    pub fn chebyshev(&self, other: &Point) -> i32 {
        (self.x - other.x).abs().max((self.y - other.y).abs())
    }

    /// The four orthogonal neighbours
    pub fn neighbors4(self) -> [Point; 4] {
        [
            self.step(Direction::North),
            self.step(Direction::South),
            self.step(Direction::West),
            self.step(Direction::East),
        ]
    }
}

impl Add for Point {
    type Output = Point;

    fn add(self, rhs: Point) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl core::fmt::Display for Point {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Movement direction. North is towards `y = 0`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter)]
pub enum Direction {
    North,
    South,
    West,
    East,
    /// No movement
    Stay,
}

impl Direction {
    /// Unit delta for this direction
    pub const fn delta(&self) -> Point {
        match self {
            Direction::North => Point::new(0, -1),
            Direction::South => Point::new(0, 1),
            Direction::West => Point::new(-1, 0),
            Direction::East => Point::new(1, 0),
            Direction::Stay => Point::new(0, 0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn test_deltas_are_unit_and_distinct() {
        let deltas: Vec<Point> = Direction::iter().map(|d| d.delta()).collect();
        for (i, d) in deltas.iter().enumerate() {
            assert!(d.chebyshev(&Point::default()) <= 1);
            assert!(!deltas[i + 1..].contains(d));
        }
    }

    #[test]
    fn test_step_and_distance() {
        let p = Point::new(3, 4);
        assert_eq!(p.step(Direction::North), Point::new(3, 3));
        assert_eq!(p.step(Direction::Stay), p);
        assert_eq!(p.chebyshev(&Point::new(5, 1)), 3);
    }
}
