use glam::Vec2;

use crate::api::{CollisionPolicy, TileQuery};
use crate::config::ConfigError;
use crate::ground::GroundState;
use crate::types::*;

/// Platformer body resolved against a tile grid.
///
/// The body owns its velocity and contact state. Position belongs to the
/// caller and is borrowed for the duration of [`PlatBody::step`].
#[derive(Clone, Debug)]
pub struct PlatBody {
    pub(crate) world: WorldConfig,
    pub(crate) tuning: BodyTuning,
    pub(crate) speed: Vec2,
    pub(crate) ground: GroundState,
    pub(crate) was_grounded: bool,
    pub(crate) on_ghost: bool,
    pub(crate) can_jump: bool,
    pub(crate) ignore_ghost: bool,
    pub(crate) apply_physics: bool,
    pub(crate) previous_bottom: f32,
}

impl Default for PlatBody {
    fn default() -> Self {
        Self::from_valid(WorldConfig::default(), BodyTuning::default())
    }
}

impl PlatBody {
    /// Build a body after checking both configs.
    pub fn new(world: WorldConfig, tuning: BodyTuning) -> Result<Self, ConfigError> {
        world.validate()?;
        tuning.validate()?;
        Ok(Self::from_valid(world, tuning))
    }

    fn from_valid(world: WorldConfig, tuning: BodyTuning) -> Self {
        Self {
            world,
            tuning,
            speed: Vec2::ZERO,
            ground: GroundState::Airborne,
            was_grounded: false,
            on_ghost: false,
            can_jump: false,
            ignore_ghost: false,
            apply_physics: true,
            previous_bottom: 0.0,
        }
    }

    // --- Accessors ---------------------------------------------------------

    pub fn world(&self) -> &WorldConfig {
        &self.world
    }

    pub fn tuning(&self) -> &BodyTuning {
        &self.tuning
    }

    #[inline]
    pub fn grid(&self) -> Vec2 {
        self.world.grid
    }

    /// Current velocity in pixels per second.
    pub fn speed(&self) -> Vec2 {
        self.speed
    }

    pub fn ground_state(&self) -> GroundState {
        self.ground
    }

    pub fn grounded(&self) -> bool {
        self.ground.is_grounded()
    }

    pub fn was_grounded(&self) -> bool {
        self.was_grounded
    }

    /// Current ground contact is a one-way platform. Always `false` while airborne.
    pub fn on_ghost(&self) -> bool {
        self.on_ghost
    }

    /// Jump eligibility computed at the end of the last step.
    pub fn can_jump(&self) -> bool {
        self.can_jump
    }

    pub fn coyote_remaining(&self) -> f32 {
        self.ground.coyote_remaining(self.world.coyote_time)
    }

    pub fn ignore_ghost(&self) -> bool {
        self.ignore_ghost
    }

    /// Make one-way platforms non-blocking until the body jumps or exits one from below.
    pub fn set_ignore_ghost(&mut self, ignore: bool) {
        if self.ignore_ghost != ignore {
            tracing::debug!(ignore, "ghost platform latch changed");
        }
        self.ignore_ghost = ignore;
    }

    pub fn apply_physics(&self) -> bool {
        self.apply_physics
    }

    pub fn set_apply_physics(&mut self, apply: bool) {
        self.apply_physics = apply;
    }

    /// Collision bounds for a body sitting at `position`.
    pub fn bounds(&self, position: Vec2) -> Rect {
        Rect::new(
            position + self.tuning.bounds_offset,
            self.tuning.extent.unwrap_or(self.world.grid),
        )
    }

    /// Horizontal speed used by [`PlatBody::walk`]: ground speed while
    /// grounded and not ascending, air speed otherwise.
    pub fn walk_speed(&self) -> f32 {
        if self.grounded() && self.speed.y >= 0.0 {
            self.tuning.ground_speed
        } else {
            self.tuning.air_speed
        }
    }

    // --- Kinematics --------------------------------------------------------

    /// Add `impulse` to the velocity, optionally zeroing axes first, then clamp.
    pub fn impulse(&mut self, impulse: Vec2, reset_x: bool, reset_y: bool) {
        if reset_x {
            self.speed.x = 0.0;
        }
        if reset_y {
            self.speed.y = 0.0;
        }
        let grid = self.world.grid;
        self.speed = (self.speed + impulse).clamp(self.tuning.min_speed * grid, self.tuning.max_speed * grid);
    }

    pub fn stop(&mut self) {
        self.speed = Vec2::ZERO;
    }

    pub fn stop_axes(&mut self, horizontal: bool, vertical: bool) {
        if horizontal {
            self.speed.x = 0.0;
        }
        if vertical {
            self.speed.y = 0.0;
        }
    }

    /// Replace horizontal velocity with walk speed toward `direction`'s sign.
    pub fn walk(&mut self, direction: f32) {
        let vx = sign(direction) * self.walk_speed() * self.world.grid.x;
        self.impulse(Vec2::new(vx, 0.0), true, false);
    }

    /// Launch upward. Eligibility is the caller's concern; see [`PlatBody::can_jump`].
    pub fn jump(&mut self, boost: f32) {
        let vy = -self.tuning.jump_speed * boost * self.world.grid.y;
        self.impulse(Vec2::new(0.0, vy), false, true);

        self.ground = GroundState::Airborne;
        self.can_jump = false;
        self.ignore_ghost = false;
        tracing::debug!(vy = self.speed.y, "jump");
    }

    // --- Simulation --------------------------------------------------------

    /// Advance one tick: horizontal pass, then vertical pass, then jump eligibility.
    pub fn step<Q, P>(&mut self, position: &mut Vec2, tiles: &Q, policy: &mut P, time: FrameTime)
    where
        Q: TileQuery + ?Sized,
        P: CollisionPolicy + ?Sized,
    {
        if !self.apply_physics {
            return;
        }
        self.was_grounded = self.grounded();

        policy.pre_step(self);
        self.horizontal_movement(position, tiles, policy, time);
        self.vertical_movement(position, tiles, policy, time);
    }

    fn horizontal_movement<Q, P>(&mut self, position: &mut Vec2, tiles: &Q, policy: &mut P, time: FrameTime)
    where
        Q: TileQuery + ?Sized,
        P: CollisionPolicy + ?Sized,
    {
        self.handle_x(position, tiles, policy, time.delta);
        policy.post_horizontal(self, position);

        position.x += self.speed.x * time.delta;
    }

    fn vertical_movement<Q, P>(&mut self, position: &mut Vec2, tiles: &Q, policy: &mut P, time: FrameTime)
    where
        Q: TileQuery + ?Sized,
        P: CollisionPolicy + ?Sized,
    {
        if !self.grounded() {
            let fall = self.tuning.gravity * self.world.grid.y * time.delta;
            self.impulse(Vec2::new(0.0, fall), false, false);
        }
        self.ground = self.ground.tick(time.unscaled_delta);

        let was_grounded = self.grounded();
        self.handle_y(position, tiles, policy, time.delta);
        policy.post_vertical(self, position);

        position.y += self.speed.y * time.delta;
        self.can_jump = self.ground.can_jump();

        if was_grounded != self.grounded() {
            tracing::debug!(grounded = self.grounded(), on_ghost = self.on_ghost, "ground contact changed");
        }
    }
}

/// Sign with `sign(0) == 0`.
#[inline]
pub(crate) fn sign(v: f32) -> f32 {
    if v > 0.0 {
        1.0
    } else if v < 0.0 {
        -1.0
    } else {
        0.0
    }
}
