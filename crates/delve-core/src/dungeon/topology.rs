//! Floor stack and transitions between floors
//!
//! Floors are generated the first time they are reached and kept for the
//! rest of the run. Every staircase stores the exact tile it leads to, so
//! going down and straight back up returns to the starting tile.
//!
//! The occupant's position belongs to the caller: it is passed in by value
//! and every transition returns where the occupant ends up.

use delve_rng::RandomSource;
use log::info;
use serde::{Deserialize, Serialize};

use super::{Direction, GenerationParams, Level, Point, TileKind};
use crate::config::DungeonConfig;
use crate::error::{DungeonError, Result};

/// Result of attempting a level change
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LevelChange {
    /// Now on `depth`, standing at `position`. Entities of the floor just
    /// left are the caller's to discard.
    Changed { depth: usize, position: Point },
    /// No suitable staircase underfoot; nothing changed
    Blocked,
}

impl LevelChange {
    pub fn position(&self) -> Option<Point> {
        match self {
            LevelChange::Changed { position, .. } => Some(*position),
            LevelChange::Blocked => None,
        }
    }
}

/// All materialized floors plus the active one
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "DungeonRepr")]
pub struct Dungeon {
    config: DungeonConfig,
    levels: Vec<Level>,
    current: usize,
}

#[derive(Deserialize)]
struct DungeonRepr {
    config: DungeonConfig,
    levels: Vec<Level>,
    current: usize,
}

impl TryFrom<DungeonRepr> for Dungeon {
    type Error = DungeonError;

    /// `current` must index a materialized floor and floor `i` must report depth `i`.
    fn try_from(repr: DungeonRepr) -> Result<Self> {
        if repr.current >= repr.levels.len() {
            return Err(DungeonError::InconsistentState(format!(
                "current depth {} with {} floors",
                repr.current,
                repr.levels.len()
            )));
        }
        if let Some((index, level)) = repr
            .levels
            .iter()
            .enumerate()
            .find(|(i, level)| level.depth() != *i)
        {
            return Err(DungeonError::InconsistentState(format!(
                "floor {index} reports depth {}",
                level.depth()
            )));
        }
        Ok(Self {
            config: repr.config.sanitized(),
            levels: repr.levels,
            current: repr.current,
        })
    }
}

impl Dungeon {
    /// Generate the first floor. The occupant is not placed; see [`Dungeon::spawn`].
    pub fn new<R: RandomSource + ?Sized>(config: DungeonConfig, rng: &mut R) -> Result<Self> {
        let config = config.sanitized();
        info!("initializing first floor");
        let first = Level::generate(0, config.width, config.height, &config.generation_params(), rng)?;
        Ok(Self {
            config,
            levels: vec![first],
            current: 0,
        })
    }

    pub fn config(&self) -> &DungeonConfig {
        &self.config
    }

    /// Depth of the active floor
    pub fn depth(&self) -> usize {
        self.current
    }

    /// Number of floors generated so far
    pub fn materialized(&self) -> usize {
        self.levels.len()
    }

    pub fn current_level(&self) -> &Level {
        &self.levels[self.current]
    }

    pub fn level(&self, depth: usize) -> Option<&Level> {
        self.levels.get(depth)
    }

    fn params(&self) -> GenerationParams {
        self.config.generation_params()
    }

    pub fn can_move(&self, pos: Point, dir: Direction) -> bool {
        self.current_level().can_move(pos, dir)
    }

    pub fn random_empty_coords<R: RandomSource + ?Sized>(&self, rng: &mut R) -> Result<Point> {
        self.current_level().random_empty_coords(rng)
    }

    /// Recompute the active floor's field of view with the configured radius
    pub fn refresh_visibility(&mut self, origin: Point) {
        let radius = self.config.light_radius;
        self.levels[self.current].refresh_visibility(origin, radius);
    }

    /// Pick a random empty starting tile on the active floor and light it
    pub fn spawn<R: RandomSource + ?Sized>(&mut self, rng: &mut R) -> Result<Point> {
        let pos = self.random_empty_coords(rng)?;
        info!("placing occupant at {pos} on depth {}", self.current);
        self.refresh_visibility(pos);
        Ok(pos)
    }

    /// Move one step if legal, then refresh visibility from wherever the
    /// occupant stands. An illegal move returns `pos` unchanged.
    pub fn step(&mut self, pos: Point, dir: Direction) -> Point {
        let next = if self.can_move(pos, dir) {
            pos.step(dir)
        } else {
            pos
        };
        self.refresh_visibility(next);
        next
    }

    /// Go down the staircase at `pos`, generating the next floor on first visit
    pub fn descend<R: RandomSource + ?Sized>(&mut self, pos: Point, rng: &mut R) -> Result<LevelChange> {
        let level = self.current_level();
        if !level.grid().in_bounds(pos) || level.at(pos.x, pos.y) != TileKind::StairsDown {
            return Ok(LevelChange::Blocked);
        }

        let target = self.current + 1;
        let arrival = match level.stairway_at(pos).map(|link| link.arrival) {
            Some(arrival) => arrival,
            None => self.link_below(pos, rng)?,
        };
        Ok(self.enter(target, arrival))
    }

    /// Go up the staircase at `pos`
    pub fn ascend(&mut self, pos: Point) -> LevelChange {
        let level = self.current_level();
        if !level.grid().in_bounds(pos) || level.at(pos.x, pos.y) != TileKind::StairsUp {
            return LevelChange::Blocked;
        }
        match level.stairway_at(pos).map(|link| (link.destination, link.arrival)) {
            Some((destination, arrival)) => self.enter(destination, arrival),
            None => LevelChange::Blocked,
        }
    }

    /// Take whichever staircase is underfoot
    pub fn take_stairs<R: RandomSource + ?Sized>(&mut self, pos: Point, rng: &mut R) -> Result<LevelChange> {
        let level = self.current_level();
        if !level.grid().in_bounds(pos) {
            return Ok(LevelChange::Blocked);
        }
        match level.at(pos.x, pos.y) {
            kind if !kind.is_stairs() => Ok(LevelChange::Blocked),
            TileKind::StairsDown => self.descend(pos, rng),
            _ => Ok(self.ascend(pos)),
        }
    }

    /// Replace the active floor with a freshly generated one.
    ///
    /// Stair links on both neighbouring floors are rewired to the new
    /// floor's staircases. Returns a random empty starting tile, already lit.
    pub fn regenerate_current<R: RandomSource + ?Sized>(&mut self, rng: &mut R) -> Result<Point> {
        let depth = self.current;
        info!("regenerating depth {depth}");
        let mut level = Level::generate(depth, self.config.width, self.config.height, &self.params(), rng)?;

        if depth > 0 {
            let above = &mut self.levels[depth - 1];
            if let Some(down) = above.find_downstairs() {
                let up = level.place_upstairs(rng)?;
                level.link_stairs(up, depth - 1, down);
                above.link_stairs(down, depth, up);
            }
        }
        if let Some(below) = self.levels.get_mut(depth + 1) {
            if let (Some(down), Some(up)) = (level.find_downstairs(), below.find_upstairs()) {
                level.link_stairs(down, depth + 1, up);
                below.link_stairs(up, depth, down);
            }
        }

        self.levels[depth] = level;
        self.spawn(rng)
    }

    /// Link the down staircase at `from` to the floor below, generating that
    /// floor first if this is the deepest one. Returns the arrival tile.
    fn link_below<R: RandomSource + ?Sized>(&mut self, from: Point, rng: &mut R) -> Result<Point> {
        let current = self.current;
        let depth = current + 1;
        if depth == self.levels.len() {
            info!("initializing floor at depth {depth}");
            let level = Level::generate(depth, self.config.width, self.config.height, &self.params(), rng)?;
            self.levels.push(level);
        }

        let below = &mut self.levels[depth];
        let up = match below.find_upstairs() {
            Some(up) => up,
            None => below.place_upstairs(rng)?,
        };
        below.link_stairs(up, current, from);
        self.levels[current].link_stairs(from, depth, up);
        Ok(up)
    }

    fn enter(&mut self, depth: usize, position: Point) -> LevelChange {
        info!("moving to depth {depth} at {position}");
        self.current = depth;
        self.refresh_visibility(position);
        LevelChange::Changed { depth, position }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use delve_rng::GameRng;

    fn small_config() -> DungeonConfig {
        DungeonConfig {
            width: 40,
            height: 30,
            ..Default::default()
        }
    }

    #[test]
    fn test_new_dungeon_starts_at_top() {
        let dungeon = Dungeon::new(small_config(), &mut GameRng::new(1)).unwrap();
        assert_eq!(dungeon.depth(), 0);
        assert_eq!(dungeon.materialized(), 1);
        assert!(dungeon.current_level().find_upstairs().is_none());
    }

    #[test]
    fn test_descend_requires_stairs() {
        let mut rng = GameRng::new(2);
        let mut dungeon = Dungeon::new(small_config(), &mut rng).unwrap();
        let floor = dungeon.random_empty_coords(&mut rng).unwrap();
        assert_eq!(dungeon.descend(floor, &mut rng).unwrap(), LevelChange::Blocked);
        assert_eq!(dungeon.ascend(floor), LevelChange::Blocked);
        assert_eq!(dungeon.materialized(), 1);
    }

    #[test]
    fn test_round_trip_returns_to_origin_tile() {
        let mut rng = GameRng::new(3);
        let mut dungeon = Dungeon::new(small_config(), &mut rng).unwrap();
        let down = dungeon.current_level().find_downstairs().unwrap();

        let change = dungeon.descend(down, &mut rng).unwrap();
        let up = change.position().unwrap();
        assert_eq!(dungeon.depth(), 1);
        assert_eq!(dungeon.current_level().at(up.x, up.y), TileKind::StairsUp);

        let back = dungeon.ascend(up);
        assert_eq!(back, LevelChange::Changed { depth: 0, position: down });
        assert_eq!(dungeon.materialized(), 2);

        // second descent reuses the floor and lands on the same tile
        let again = dungeon.descend(down, &mut rng).unwrap();
        assert_eq!(again.position(), Some(up));
        assert_eq!(dungeon.materialized(), 2);
    }

    #[test]
    fn test_take_stairs_dispatches() {
        let mut rng = GameRng::new(4);
        let mut dungeon = Dungeon::new(small_config(), &mut rng).unwrap();
        let down = dungeon.current_level().find_downstairs().unwrap();
        let up = dungeon.take_stairs(down, &mut rng).unwrap().position().unwrap();
        assert_eq!(dungeon.depth(), 1);
        let back = dungeon.take_stairs(up, &mut rng).unwrap();
        assert_eq!(back.position(), Some(down));
        assert_eq!(dungeon.depth(), 0);

        let floor = dungeon.random_empty_coords(&mut rng).unwrap();
        assert_eq!(dungeon.take_stairs(floor, &mut rng).unwrap(), LevelChange::Blocked);
        assert_eq!(dungeon.depth(), 0);
    }

    #[test]
    fn test_step_blocked_keeps_position() {
        let mut rng = GameRng::new(5);
        let mut dungeon = Dungeon::new(small_config(), &mut rng).unwrap();
        let level = dungeon.current_level();
        let pos = level
            .grid()
            .points()
            .find(|&p| level.at(p.x, p.y).is_passable() && !level.can_move(p, Direction::East))
            .unwrap();
        assert_eq!(dungeon.step(pos, Direction::East), pos);
        assert!(dungeon.current_level().is_visible(pos.x, pos.y));
    }

    #[test]
    fn test_regenerate_relinks_neighbours() {
        let mut rng = GameRng::new(6);
        let mut dungeon = Dungeon::new(small_config(), &mut rng).unwrap();
        let down0 = dungeon.current_level().find_downstairs().unwrap();
        dungeon.descend(down0, &mut rng).unwrap();
        let down1 = dungeon.current_level().find_downstairs().unwrap();
        let up2 = dungeon.descend(down1, &mut rng).unwrap().position().unwrap();
        dungeon.ascend(up2);
        assert_eq!(dungeon.depth(), 1);

        let start = dungeon.regenerate_current(&mut rng).unwrap();
        let level = dungeon.current_level();
        assert_eq!(level.at(start.x, start.y), TileKind::Empty);

        let new_up = level.find_upstairs().unwrap();
        let new_down = level.find_downstairs().unwrap();
        assert_eq!(level.stairway_at(new_up).unwrap().arrival, down0);
        assert_eq!(level.stairway_at(new_down).unwrap().arrival, up2);
        assert_eq!(dungeon.level(0).unwrap().stairway_at(down0).unwrap().arrival, new_up);
        assert_eq!(dungeon.level(2).unwrap().stairway_at(up2).unwrap().arrival, new_down);

        assert_eq!(dungeon.descend(new_down, &mut rng).unwrap().position(), Some(up2));
    }

    #[test]
    fn test_serde_round_trip() {
        let mut rng = GameRng::new(7);
        let mut dungeon = Dungeon::new(small_config(), &mut rng).unwrap();
        let down = dungeon.current_level().find_downstairs().unwrap();
        let up = dungeon.descend(down, &mut rng).unwrap().position().unwrap();

        let json = serde_json::to_string(&dungeon).unwrap();
        let mut restored: Dungeon = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, dungeon);
        assert_eq!(restored.ascend(up), LevelChange::Changed { depth: 0, position: down });
    }

    #[test]
    fn test_deserialize_rejects_current_past_last_floor() {
        let dungeon = Dungeon::new(small_config(), &mut GameRng::new(8)).unwrap();
        let mut value = serde_json::to_value(&dungeon).unwrap();
        value["current"] = serde_json::json!(7);
        assert!(matches!(
            serde_json::from_value::<Dungeon>(value),
            Err(e) if e.to_string().contains("current depth 7")
        ));
    }

    #[test]
    fn test_deserialize_rejects_empty_stack() {
        let dungeon = Dungeon::new(small_config(), &mut GameRng::new(9)).unwrap();
        let mut value = serde_json::to_value(&dungeon).unwrap();
        value["levels"] = serde_json::json!([]);
        value["current"] = serde_json::json!(0);
        assert!(serde_json::from_value::<Dungeon>(value).is_err());
    }

    #[test]
    fn test_deserialize_rejects_misnumbered_floor() {
        let dungeon = Dungeon::new(small_config(), &mut GameRng::new(10)).unwrap();
        let mut value = serde_json::to_value(&dungeon).unwrap();
        value["levels"][0]["depth"] = serde_json::json!(3);
        assert!(serde_json::from_value::<Dungeon>(value).is_err());
    }
}
