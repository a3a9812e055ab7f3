use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::config::ConfigError;

/// Identifier stored in a tile cell. `0` is the empty tile.
pub type TileId = i32;

/// Empty tile id; never collides.
pub const EMPTY_TILE: TileId = 0;

/// Semantic role a tile id can play during resolution.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum TileRole {
    /// Stops motion from every direction.
    Block,
    /// One-way platform: lands from above, passable from below.
    DontPassUp,
    /// Blocks only upward motion.
    DontPassDown,
    /// Blocks only rightward motion.
    DontPassRight,
    /// Blocks only leftward motion.
    DontPassLeft,
}

/// Mapping from tile ids to their collision roles.
///
/// Ids are not checked for uniqueness; giving one id two roles makes it
/// satisfy both role predicates.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TileRoles {
    pub block: TileId,
    pub dont_pass_up: TileId,
    pub dont_pass_down: TileId,
    pub dont_pass_right: TileId,
    pub dont_pass_left: TileId,
}

impl Default for TileRoles {
    fn default() -> Self {
        Self::setup(1, 2, 3, 4, 5)
    }
}

impl TileRoles {
    /// Assign the id used for each role.
    pub fn setup(
        block: TileId,
        dont_pass_up: TileId,
        dont_pass_down: TileId,
        dont_pass_right: TileId,
        dont_pass_left: TileId,
    ) -> Self {
        Self {
            block,
            dont_pass_up,
            dont_pass_down,
            dont_pass_right,
            dont_pass_left,
        }
    }

    /// Id currently assigned to `role`.
    pub fn id_of(&self, role: TileRole) -> TileId {
        match role {
            TileRole::Block => self.block,
            TileRole::DontPassUp => self.dont_pass_up,
            TileRole::DontPassDown => self.dont_pass_down,
            TileRole::DontPassRight => self.dont_pass_right,
            TileRole::DontPassLeft => self.dont_pass_left,
        }
    }

    #[inline]
    pub fn is(&self, role: TileRole, tile: TileId) -> bool {
        self.id_of(role) == tile
    }

    /// Horizontal blocking rule for a body moving with horizontal speed `vx`.
    pub fn blocks_horizontal(&self, tile: TileId, vx: f32) -> bool {
        self.is(TileRole::Block, tile)
            || (self.is(TileRole::DontPassLeft, tile) && vx < 0.0)
            || (self.is(TileRole::DontPassRight, tile) && vx > 0.0)
    }
}

/// Result of one tile query.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct CollisionSample {
    pub hit: bool,
    /// Stored id at the queried cell (`0` when out of range).
    pub tile: TileId,
}

impl CollisionSample {
    pub const MISS: Self = Self { hit: false, tile: EMPTY_TILE };

    pub fn hit(tile: TileId) -> Self {
        Self { hit: true, tile }
    }

    /// The tile id, only when the query hit.
    pub fn hit_tile(self) -> Option<TileId> {
        self.hit.then_some(self.tile)
    }
}

/// Axis-aligned rectangle, Y grows downward.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Rect {
    pub location: Vec2,
    pub size: Vec2,
}

impl Rect {
    pub fn new(location: Vec2, size: Vec2) -> Self {
        Self { location, size }
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.location.x
    }
    #[inline]
    pub fn right(&self) -> f32 {
        self.location.x + self.size.x
    }
    #[inline]
    pub fn top(&self) -> f32 {
        self.location.y
    }
    #[inline]
    pub fn bottom(&self) -> f32 {
        self.location.y + self.size.y
    }
    #[inline]
    pub fn width(&self) -> f32 {
        self.size.x
    }
    #[inline]
    pub fn height(&self) -> f32 {
        self.size.y
    }

    pub fn center(&self) -> Vec2 {
        self.location + self.size * 0.5
    }
}

/// Frame clock sample for one simulation tick.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct FrameTime {
    /// Elapsed seconds after time scaling.
    pub delta: f32,
    /// Elapsed real seconds, unaffected by time scaling.
    pub unscaled_delta: f32,
}

impl FrameTime {
    /// Same value for scaled and unscaled time.
    pub fn fixed(dt: f32) -> Self {
        Self { delta: dt, unscaled_delta: dt }
    }

    /// Real step `dt` slowed down or sped up by `scale`.
    pub fn scaled(dt: f32, scale: f32) -> Self {
        Self { delta: dt * scale, unscaled_delta: dt }
    }
}

/// Settings shared by every body resolving against one tile world.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldConfig {
    /// Pixel size of one tile cell. Scales every speed constant.
    pub grid: Vec2,
    /// Seconds a jump is still accepted after leaving the ground.
    pub coyote_time: f32,
    /// Max pixels of overlap forgiven by corner correction. `0` disables it.
    pub corner_tolerance: f32,
    pub roles: TileRoles,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            grid: Vec2::splat(16.0),
            coyote_time: 0.1,
            corner_tolerance: 4.0,
            roles: TileRoles::default(),
        }
    }
}

impl WorldConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.grid.is_finite() && self.grid.x > 0.0 && self.grid.y > 0.0) {
            return Err(ConfigError::InvalidGrid(self.grid));
        }
        if self.corner_tolerance.is_nan() || self.corner_tolerance < 0.0 {
            return Err(ConfigError::NegativeCornerTolerance(self.corner_tolerance));
        }
        if self.coyote_time.is_nan() || self.coyote_time < 0.0 {
            return Err(ConfigError::NegativeCoyoteTime(self.coyote_time));
        }
        Ok(())
    }
}

/// Per-body movement constants. Speeds are in grid cells per second.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BodyTuning {
    pub ground_speed: f32,
    pub air_speed: f32,
    pub jump_speed: f32,
    pub gravity: f32,
    pub min_speed: Vec2,
    pub max_speed: Vec2,
    /// Size of the collision bounds in pixels; `None` uses one grid cell.
    pub extent: Option<Vec2>,
    /// Offset of the bounds origin from the body position.
    pub bounds_offset: Vec2,
}

impl Default for BodyTuning {
    fn default() -> Self {
        Self {
            ground_speed: 6.0,
            air_speed: 8.0,
            jump_speed: 12.0,
            gravity: 24.0,
            min_speed: Vec2::splat(-24.0),
            max_speed: Vec2::splat(24.0),
            extent: None,
            bounds_offset: Vec2::ZERO,
        }
    }
}

impl BodyTuning {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.min_speed.cmpgt(self.max_speed).any() {
            return Err(ConfigError::InvalidSpeedBounds {
                min: self.min_speed,
                max: self.max_speed,
            });
        }
        if let Some(extent) = self.extent {
            if !(extent.is_finite() && extent.x > 0.0 && extent.y > 0.0) {
                return Err(ConfigError::InvalidExtent(extent));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_roles_are_one_to_five() {
        let roles = TileRoles::default();
        assert_eq!(roles.id_of(TileRole::Block), 1);
        assert_eq!(roles.id_of(TileRole::DontPassUp), 2);
        assert_eq!(roles.id_of(TileRole::DontPassDown), 3);
        assert_eq!(roles.id_of(TileRole::DontPassRight), 4);
        assert_eq!(roles.id_of(TileRole::DontPassLeft), 5);
    }

    #[test]
    fn test_horizontal_rule_is_direction_of_travel_relative() {
        let roles = TileRoles::default();
        assert!(roles.blocks_horizontal(1, 3.0));
        assert!(roles.blocks_horizontal(1, -3.0));
        assert!(roles.blocks_horizontal(5, -3.0));
        assert!(!roles.blocks_horizontal(5, 3.0));
        assert!(roles.blocks_horizontal(4, 3.0));
        assert!(!roles.blocks_horizontal(4, -3.0));
        assert!(!roles.blocks_horizontal(2, 3.0));
    }

    #[test]
    fn test_overlapping_roles_satisfy_both() {
        let roles = TileRoles::setup(7, 7, 3, 4, 5);
        assert!(roles.is(TileRole::Block, 7));
        assert!(roles.is(TileRole::DontPassUp, 7));
    }

    #[test]
    fn test_rect_edges() {
        let r = Rect::new(Vec2::new(2.0, 4.0), Vec2::new(10.0, 6.0));
        assert_eq!(r.right(), 12.0);
        assert_eq!(r.bottom(), 10.0);
        assert_eq!(r.center(), Vec2::new(7.0, 7.0));
    }

    #[test]
    fn test_world_config_validation() {
        assert!(WorldConfig::default().validate().is_ok());
        let zero_grid = WorldConfig { grid: Vec2::new(0.0, 16.0), ..Default::default() };
        assert!(matches!(zero_grid.validate(), Err(ConfigError::InvalidGrid(_))));
        let neg_tol = WorldConfig { corner_tolerance: -1.0, ..Default::default() };
        assert!(matches!(neg_tol.validate(), Err(ConfigError::NegativeCornerTolerance(_))));
        let nan_tol = WorldConfig { corner_tolerance: f32::NAN, ..Default::default() };
        assert!(matches!(nan_tol.validate(), Err(ConfigError::NegativeCornerTolerance(_))));
        let nan_coyote = WorldConfig { coyote_time: f32::NAN, ..Default::default() };
        assert!(matches!(nan_coyote.validate(), Err(ConfigError::NegativeCoyoteTime(_))));
    }

    #[test]
    fn test_body_tuning_validation() {
        assert!(BodyTuning::default().validate().is_ok());
        let inverted = BodyTuning { min_speed: Vec2::splat(5.0), max_speed: Vec2::splat(1.0), ..Default::default() };
        assert!(matches!(inverted.validate(), Err(ConfigError::InvalidSpeedBounds { .. })));
        let flat = BodyTuning { extent: Some(Vec2::new(16.0, 0.0)), ..Default::default() };
        assert!(matches!(flat.validate(), Err(ConfigError::InvalidExtent(_))));
    }

    #[test]
    fn test_scaled_frame_time_keeps_real_delta() {
        let t = FrameTime::scaled(0.02, 0.5);
        assert!((t.delta - 0.01).abs() < 1e-7);
        assert_eq!(t.unscaled_delta, 0.02);
    }
}
