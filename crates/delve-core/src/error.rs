//! Error types for dungeon generation and configuration

use thiserror::Error;

/// Errors reported to the caller instead of looping or panicking.
///
/// Out-of-bounds coordinates are not represented here: they are contract
/// violations and panic.
#[derive(Error, Debug)]
pub enum DungeonError {
    #[error("no empty tile on a {width}x{height} grid")]
    NoEmptyTile { width: i32, height: i32 },

    #[error("invalid dungeon configuration: {0}")]
    InvalidConfig(#[from] serde_json::Error),

    #[error("inconsistent dungeon state: {0}")]
    InconsistentState(String),
}

pub type Result<T> = core::result::Result<T, DungeonError>;
