//! Tunnel carving between rooms and connectivity checks
//!
//! Each room is joined to the room placed just before it by an L-shaped
//! tunnel, two tiles thick. Chaining every room to its predecessor makes the
//! whole floor one connected region.

use std::collections::VecDeque;

use super::{Grid, Point, Rect, TileKind};
use crate::consts::TUNNEL_WIDTH;

/// The two legs of an L-shaped tunnel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tunnel {
    pub horizontal: Rect,
    pub vertical: Rect,
    /// Where the legs meet
    pub elbow: Point,
}

impl Tunnel {
    /// Plan the tunnel joining a new room's center to the previous room's.
    ///
    /// The vertical leg runs at the new center's x when the new center is
    /// both right of and below the previous one, otherwise at the previous
    /// center's x. The horizontal leg runs at the other center's y, so each
    /// leg passes through one of the two centers.
    pub fn between(new_center: Point, prev_center: Point) -> Self {
        let (pivot, other) = if new_center.x > prev_center.x && new_center.y > prev_center.y {
            (new_center, prev_center)
        } else {
            (prev_center, new_center)
        };
        let elbow = Point::new(pivot.x, other.y);
        let thick = TUNNEL_WIDTH - 1;

        let across = Rect::spanning(other, elbow);
        let down = Rect::spanning(elbow, pivot);
        Self {
            horizontal: Rect::new(across.x0, across.y0 - thick, across.x1, across.y1),
            vertical: Rect::new(down.x0 - thick, down.y0, down.x1, down.y1),
            elbow,
        }
    }

    pub fn contains(&self, p: Point) -> bool {
        self.horizontal.contains(p) || self.vertical.contains(p)
    }

    /// Carve both legs, clipped to the grid
    pub fn carve(&self, grid: &mut Grid) {
        carve_rect(grid, &self.horizontal);
        carve_rect(grid, &self.vertical);
    }
}

/// Set every in-bounds tile of `rect` to `Empty`
pub fn carve_rect(grid: &mut Grid, rect: &Rect) {
    for p in rect.clipped(grid.width(), grid.height()).points() {
        grid.set_kind(p, TileKind::Empty);
    }
}

/// Passable tiles reachable from `start` by orthogonal steps.
///
/// Returns an empty set if `start` itself is a wall.
pub fn reachable_from(grid: &Grid, start: Point) -> Vec<Point> {
    if !grid.in_bounds(start) || !grid.tile(start).is_passable() {
        return Vec::new();
    }
    let mut seen = vec![false; (grid.width() * grid.height()) as usize];
    let slot = |p: Point| (p.x * grid.height() + p.y) as usize;

    let mut queue = VecDeque::from([start]);
    seen[slot(start)] = true;
    let mut region = Vec::new();
    while let Some(p) = queue.pop_front() {
        region.push(p);
        for n in p.neighbors4() {
            if grid.in_bounds(n) && !seen[slot(n)] && grid.tile(n).is_passable() {
                seen[slot(n)] = true;
                queue.push_back(n);
            }
        }
    }
    region
}

/// Number of separate 4-connected passable regions
pub fn count_regions(grid: &Grid) -> usize {
    let mut labelled = vec![false; (grid.width() * grid.height()) as usize];
    let slot = |p: Point| (p.x * grid.height() + p.y) as usize;

    let mut regions = 0;
    for p in grid.points() {
        if labelled[slot(p)] || !grid.tile(p).is_passable() {
            continue;
        }
        regions += 1;
        for q in reachable_from(grid, p) {
            labelled[slot(q)] = true;
        }
    }
    regions
}
