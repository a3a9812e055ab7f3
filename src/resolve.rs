//! Axis-separated sweep of a [`PlatBody`] against a tile grid.
//!
//! Each pass samples the tile grid along the leading edge of the body's
//! bounds, offset by this frame's motion, one pixel at a time. The first
//! blocking tile ends the scan.

use glam::Vec2;

use crate::api::{CollisionPolicy, TileQuery};
use crate::body::{PlatBody, sign};
use crate::ground::GroundState;
use crate::types::*;

/// Snap `v` down to the start of its grid cell.
#[inline]
pub fn to_grid(v: f32, cell: f32) -> f32 {
    (v / cell).floor() * cell
}

#[inline]
pub fn to_grid_vec(v: Vec2, cell: Vec2) -> Vec2 {
    (v / cell).floor() * cell
}

impl PlatBody {
    pub(crate) fn handle_x<Q, P>(&mut self, position: &mut Vec2, tiles: &Q, policy: &mut P, dt: f32)
    where
        Q: TileQuery + ?Sized,
        P: CollisionPolicy + ?Sized,
    {
        if self.speed.x == 0.0 {
            return;
        }
        let area = self.bounds(*position);
        let offset = position.x - area.left();
        let edge = if self.speed.x < 0.0 { area.left() } else { area.right() };
        let check_x = edge + self.speed.x * dt;

        let rows = (area.bottom() - 1.0 - area.top()).ceil().max(0.0) as u32;
        for row in 0..rows {
            let point = Vec2::new(check_x, area.top() + row as f32);

            let Some(tile) = tiles.check_collision(point).hit_tile() else { continue };
            if !self.world.roles.blocks_horizontal(tile, self.speed.x) {
                continue;
            }

            tracing::trace!(tile, x = point.x, y = point.y, "horizontal hit");
            let repos_dir = sign(-self.speed.x);
            let repos = if repos_dir < 0.0 { area.width() } else { self.world.grid.x };
            if policy.on_horizontal_hit(self, tile, point) {
                position.x = to_grid(check_x, self.world.grid.x) + repos * repos_dir + offset;
                self.speed.x = 0.0;
            }
            break;
        }
    }

    pub(crate) fn handle_y<Q, P>(&mut self, position: &mut Vec2, tiles: &Q, policy: &mut P, dt: f32)
    where
        Q: TileQuery + ?Sized,
        P: CollisionPolicy + ?Sized,
    {
        self.ground = self.ground.lift(self.world.coyote_time);
        let roles = self.world.roles;
        let area = self.bounds(*position);
        let offset = position.y - area.top();
        let edge = if self.speed.y < 0.0 { area.top() } else { area.bottom() };
        let check_y = edge + self.speed.y * dt;
        let dir = if self.speed.y != 0.0 { self.speed.y } else { 1.0 };

        let columns = (area.right() - area.left()).ceil().max(0.0) as u32;
        for column in 0..columns {
            let point = Vec2::new(area.left() + column as f32, check_y);

            let Some(tile) = tiles.check_collision(point).hit_tile() else { continue };
            let tile_pos = to_grid(check_y, self.world.grid.y);
            let from_above = self.previous_bottom <= tile_pos;

            let blocks = roles.is(TileRole::Block, tile)
                || (roles.is(TileRole::DontPassUp, tile) && !self.ignore_ghost && self.speed.y >= 0.0 && from_above)
                || (roles.is(TileRole::DontPassDown, tile) && self.speed.y < 0.0);

            if !blocks {
                if roles.is(TileRole::DontPassUp, tile) && !from_above {
                    self.ignore_ghost = false;
                }
                continue;
            }

            tracing::trace!(tile, x = point.x, y = point.y, "vertical hit");
            self.ignore_ghost = false;
            let repos_dir = sign(-dir);
            let repos = if repos_dir < 0.0 { area.height() } else { self.world.grid.y };

            if policy.on_vertical_hit(self, tile, point) && self.corner_correction(position, area, tiles, tile, point) {
                position.y = tile_pos + repos * repos_dir + offset;

                if !self.grounded() {
                    let under = Vec2::new(point.x, area.bottom() + 1.0);
                    if let Some(below) = tiles.check_collision(under).hit_tile() {
                        let supported = roles.is(TileRole::Block, below)
                            || (roles.is(TileRole::DontPassUp, below) && !self.ignore_ghost && from_above);
                        if supported {
                            self.ground = GroundState::Grounded;
                        }
                        self.on_ghost = supported && roles.is(TileRole::DontPassUp, below);
                    }
                }
                self.speed.y = 0.0;
            }
            break;
        }

        if !self.grounded() {
            self.on_ghost = false;
        }
        self.previous_bottom = area.bottom();
    }

    /// Nudge an ascending body around a tile corner it barely clips.
    ///
    /// Returns `false` when the body was moved sideways and the regular
    /// vertical correction must be skipped.
    fn corner_correction<Q>(&mut self, position: &mut Vec2, area: Rect, tiles: &Q, tile: TileId, point: Vec2) -> bool
    where
        Q: TileQuery + ?Sized,
    {
        let tolerance = self.world.corner_tolerance;
        let roles = self.world.roles;
        let snags = roles.is(TileRole::Block, tile) || roles.is(TileRole::DontPassDown, tile);
        if tolerance <= 0.0 || !snags || self.speed.y >= 0.0 {
            return true;
        }

        let grid = self.world.grid;
        let tile_pos = to_grid_vec(point, grid);
        let right_side = point.x > area.center().x;
        let body_side = if right_side { area.right() } else { area.left() };
        let tile_side = if right_side { tile_pos.x } else { tile_pos.x + grid.x };
        if (body_side - tile_side).abs() > tolerance {
            return true;
        }

        let repos = if body_side >= tile_side { -area.width() } else { grid.x };
        let offset = position.x - area.left();
        let target = Vec2::new(tile_pos.x + repos + offset, position.y);

        let side = tiles.check_collision(Vec2::new(target.x, point.y));
        if !side.hit || roles.is(TileRole::DontPassUp, side.tile) {
            tracing::debug!(from = position.x, to = target.x, "corner correction");
            *position = target;
            return false;
        }
        true
    }
}
