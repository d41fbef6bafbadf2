//! Floor generation
//!
//! Carves randomly sized rooms out of solid wall, joins each room to the one
//! placed before it, then drops a single down staircase on an empty tile.

use delve_rng::RandomSource;
use log::{debug, info};

use super::corridor::{Tunnel, carve_rect};
use super::{Grid, Rect, TileKind};
use crate::consts::{MAX_ROOMS, MIN_GRID_DIM, MIN_ROOM_SIZE, MIN_ROOMS, ROOM_SIZE_LIMIT};
use crate::error::Result;

/// Room parameters for one floor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GenerationParams {
    /// Room count is drawn from `[min_rooms, max_rooms)`
    pub min_rooms: i32,
    pub max_rooms: i32,
    /// Exclusive upper bound on a room side
    pub room_size_limit: i32,
}

impl Default for GenerationParams {
    fn default() -> Self {
        Self {
            min_rooms: MIN_ROOMS,
            max_rooms: MAX_ROOMS,
            room_size_limit: ROOM_SIZE_LIMIT,
        }
    }
}

/// Generate a floor with the default room parameters
pub fn generate<R: RandomSource + ?Sized>(width: i32, height: i32, rng: &mut R) -> Result<Grid> {
    generate_with(width, height, &GenerationParams::default(), rng)
}

/// Generate a floor.
///
/// Panics if either dimension is below [`MIN_GRID_DIM`]. Room size limits are
/// clamped to what the grid can hold.
pub fn generate_with<R: RandomSource + ?Sized>(
    width: i32,
    height: i32,
    params: &GenerationParams,
    rng: &mut R,
) -> Result<Grid> {
    assert!(
        width >= MIN_GRID_DIM && height >= MIN_GRID_DIM,
        "grid must be at least {MIN_GRID_DIM}x{MIN_GRID_DIM}, got {width}x{height}"
    );
    let mut grid = Grid::new(width, height);

    let limit_w = room_limit(params.room_size_limit, width);
    let limit_h = room_limit(params.room_size_limit, height);
    let min_rooms = params.min_rooms.max(1);
    let nrect = rng.int_in_range(min_rooms, params.max_rooms.max(min_rooms + 1));
    info!("generating {width}x{height} floor with {nrect} rooms");

    let mut previous: Option<Rect> = None;
    for _ in 0..nrect {
        let room = Rect::sample(rng, width, height, MIN_ROOM_SIZE, limit_w, limit_h);
        carve_rect(&mut grid, &room);
        if let Some(prev) = previous {
            let tunnel = Tunnel::between(room.center(), prev.center());
            debug!("room {room:?} tunnel elbow at {}", tunnel.elbow);
            tunnel.carve(&mut grid);
        }
        previous = Some(room);
    }

    let stairs = grid.random_empty_coords(rng)?;
    info!("generated stairs at {stairs}");
    grid.set_kind(stairs, TileKind::StairsDown);
    Ok(grid)
}

/// Exclusive room side limit for one axis: at least one size above the
/// minimum, and small enough that a room never touches the far edge.
fn room_limit(limit: i32, dim: i32) -> i32 {
    limit.max(MIN_ROOM_SIZE + 1).min(dim)
}
