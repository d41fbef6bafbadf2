//! Core generation and visibility constants

/// Default floor dimensions
pub const DEFAULT_WIDTH: i32 = 100;
pub const DEFAULT_HEIGHT: i32 = 100;

/// Smallest grid that can hold a room plus its untouched far border
pub const MIN_GRID_DIM: i32 = 5;

/// Default sight range for visibility calculation
pub const LIGHT_RADIUS: i32 = 15;

/// Number of rays cast per visibility refresh, one per degree
pub const RAY_COUNT: u16 = 360;

/// Room count is drawn from `[MIN_ROOMS, MAX_ROOMS)`
pub const MIN_ROOMS: i32 = 12;
pub const MAX_ROOMS: i32 = 26;

/// Room sides are drawn from `[MIN_ROOM_SIZE, ROOM_SIZE_LIMIT)`
pub const MIN_ROOM_SIZE: i32 = 3;
pub const ROOM_SIZE_LIMIT: i32 = 10;

/// Tunnels are this many tiles thick
pub const TUNNEL_WIDTH: i32 = 2;

/// Random draws tried before falling back to a full scan for an empty tile
pub const MAX_PLACEMENT_ATTEMPTS: u32 = 1000;
