//! delve-core: procedural dungeon floors, field of view and floor navigation
//!
//! This crate contains the game-independent core with no I/O: it builds
//! connected floors, answers tile and visibility queries, and moves an
//! occupant between floors. Rendering, input and entities belong to the
//! caller. Randomness is borrowed from a [`delve_rng::RandomSource`] and
//! diagnostics go through the `log` facade.

pub mod config;
pub mod dungeon;
pub mod error;

mod consts;

pub use config::DungeonConfig;
pub use consts::*;
pub use error::{DungeonError, Result};
