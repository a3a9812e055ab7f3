use glam::Vec2;

use crate::body::PlatBody;
use crate::types::*;

/// Read-only view of the tile grid a body resolves against.
pub trait TileQuery {
    /// Sample the cell containing `position`.
    ///
    /// Misses when the cell is out of range or holds the empty tile.
    fn check_collision(&self, position: Vec2) -> CollisionSample;

    /// Like [`TileQuery::check_collision`], but only tiles listed in `filter` count as hits.
    fn check_collision_filtered(&self, position: Vec2, filter: &[TileId]) -> CollisionSample {
        let sample = self.check_collision(position);
        CollisionSample {
            hit: sample.hit && filter.contains(&sample.tile),
            tile: sample.tile,
        }
    }
}

impl<T: TileQuery + ?Sized> TileQuery for &T {
    fn check_collision(&self, position: Vec2) -> CollisionSample {
        (**self).check_collision(position)
    }
}

/// Customization points invoked by [`PlatBody::step`].
///
/// Every method has a permissive default, so an empty impl behaves like
/// [`DefaultPolicy`].
pub trait CollisionPolicy {
    /// Runs before any collision checks; the place to read input and call
    /// `walk`/`jump`.
    fn pre_step(&mut self, _body: &mut PlatBody) {}

    /// A blocking tile was hit on the horizontal pass.
    /// Return `true` to snap to the tile edge and stop horizontal motion.
    fn on_horizontal_hit(&mut self, _body: &PlatBody, _tile: TileId, _point: Vec2) -> bool {
        true
    }

    /// A blocking tile was hit on the vertical pass.
    /// Return `true` to snap, stop vertical motion and check for ground below.
    fn on_vertical_hit(&mut self, _body: &PlatBody, _tile: TileId, _point: Vec2) -> bool {
        true
    }

    /// After horizontal collision handling, before the X move is applied.
    fn post_horizontal(&mut self, _body: &mut PlatBody, _position: &mut Vec2) {}

    /// After vertical collision handling, before the Y move is applied.
    fn post_vertical(&mut self, _body: &mut PlatBody, _position: &mut Vec2) {}
}

/// Policy that accepts every correction and does nothing else.
#[derive(Copy, Clone, Debug, Default)]
pub struct DefaultPolicy;

impl CollisionPolicy for DefaultPolicy {}

impl<P: CollisionPolicy + ?Sized> CollisionPolicy for &mut P {
    fn pre_step(&mut self, body: &mut PlatBody) {
        (**self).pre_step(body)
    }
    fn on_horizontal_hit(&mut self, body: &PlatBody, tile: TileId, point: Vec2) -> bool {
        (**self).on_horizontal_hit(body, tile, point)
    }
    fn on_vertical_hit(&mut self, body: &PlatBody, tile: TileId, point: Vec2) -> bool {
        (**self).on_vertical_hit(body, tile, point)
    }
    fn post_horizontal(&mut self, body: &mut PlatBody, position: &mut Vec2) {
        (**self).post_horizontal(body, position)
    }
    fn post_vertical(&mut self, body: &mut PlatBody, position: &mut Vec2) {
        (**self).post_vertical(body, position)
    }
}
