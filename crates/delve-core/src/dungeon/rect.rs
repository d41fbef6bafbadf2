//! Rectangles for room placement and tunnel carving

use delve_rng::RandomSource;
use serde::{Deserialize, Serialize};

use super::Point;

/// A half-open rectangle covering `x0..x1` by `y0..y1`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rect {
    pub x0: i32,
    pub y0: i32,
    pub x1: i32,
    pub y1: i32,
}

impl Rect {
    pub const fn new(x0: i32, y0: i32, x1: i32, y1: i32) -> Self {
        Self { x0, y0, x1, y1 }
    }

    /// Rectangle spanning two corners inclusively, in either order
    pub fn spanning(a: Point, b: Point) -> Self {
        Self::new(
            a.x.min(b.x),
            a.y.min(b.y),
            a.x.max(b.x) + 1,
            a.y.max(b.y) + 1,
        )
    }

    /// Sample a rectangle that fits in a `width` x `height` grid.
    ///
    /// Sides are drawn from `[min_size, limit_w)` and `[min_size, limit_h)`;
    /// the origin is drawn so the far edge stays strictly inside the grid.
    /// Callers clamp the limits so both ranges are non-empty.
    pub fn sample<R: RandomSource + ?Sized>(
        rng: &mut R,
        width: i32,
        height: i32,
        min_size: i32,
        limit_w: i32,
        limit_h: i32,
    ) -> Self {
        let size_w = rng.int_in_range(min_size, limit_w);
        let size_h = rng.int_in_range(min_size, limit_h);
        let x0 = rng.int_in_range(0, width - size_w);
        let y0 = rng.int_in_range(0, height - size_h);
        Self::new(x0, y0, x0 + size_w, y0 + size_h)
    }

    pub const fn width(&self) -> i32 {
        self.x1 - self.x0
    }

    pub const fn height(&self) -> i32 {
        self.y1 - self.y0
    }

    pub const fn is_empty(&self) -> bool {
        self.x1 <= self.x0 || self.y1 <= self.y0
    }

    pub fn center(&self) -> Point {
        Point::new((self.x0 + self.x1) / 2, (self.y0 + self.y1) / 2)
    }

    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.x0 && p.x < self.x1 && p.y >= self.y0 && p.y < self.y1
    }

    /// Intersection with the `width` x `height` grid
    pub fn clipped(&self, width: i32, height: i32) -> Self {
        Self::new(
            self.x0.max(0),
            self.y0.max(0),
            self.x1.min(width),
            self.y1.min(height),
        )
    }

    /// Covered positions, column by column
    pub fn points(&self) -> impl Iterator<Item = Point> + use<> {
        let r = *self;
        (r.x0..r.x1).flat_map(move |x| (r.y0..r.y1).map(move |y| Point::new(x, y)))
    }
}
