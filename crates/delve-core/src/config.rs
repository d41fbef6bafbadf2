//! Dungeon configuration
//!
//! Floor dimensions, sight range and room parameters. Loaded from JSON or
//! built in code; every consumer goes through [`DungeonConfig::sanitized`] so
//! out-of-range values are clamped rather than rejected.

use serde::{Deserialize, Serialize};

use crate::consts::{
    DEFAULT_HEIGHT, DEFAULT_WIDTH, LIGHT_RADIUS, MAX_ROOMS, MIN_GRID_DIM, MIN_ROOM_SIZE, MIN_ROOMS,
    ROOM_SIZE_LIMIT,
};
use crate::dungeon::GenerationParams;
use crate::error::Result;

/// User-configurable dungeon options
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DungeonConfig {
    pub width: i32,
    pub height: i32,
    pub light_radius: i32,
    /// Room count is drawn from `[min_rooms, max_rooms)`
    pub min_rooms: i32,
    pub max_rooms: i32,
    /// Exclusive upper bound on a room side
    pub room_size_limit: i32,
}

impl Default for DungeonConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            light_radius: LIGHT_RADIUS,
            min_rooms: MIN_ROOMS,
            max_rooms: MAX_ROOMS,
            room_size_limit: ROOM_SIZE_LIMIT,
        }
    }
}

impl DungeonConfig {
    /// Parse a configuration from JSON. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str::<Self>(json)?.sanitized())
    }

    /// Clamp every field into a range generation can honour.
    pub fn sanitized(&self) -> Self {
        let min_rooms = self.min_rooms.max(1);
        Self {
            width: self.width.max(MIN_GRID_DIM),
            height: self.height.max(MIN_GRID_DIM),
            light_radius: self.light_radius.max(1),
            min_rooms,
            max_rooms: self.max_rooms.max(min_rooms + 1),
            room_size_limit: self.room_size_limit.max(MIN_ROOM_SIZE + 1),
        }
    }

    /// Generation parameters for one floor
    pub fn generation_params(&self) -> GenerationParams {
        let config = self.sanitized();
        GenerationParams {
            min_rooms: config.min_rooms,
            max_rooms: config.max_rooms,
            room_size_limit: config.room_size_limit,
        }
    }
}
