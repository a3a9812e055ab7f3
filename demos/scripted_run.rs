use glam::Vec2;
use platbody::*;
use tracing_subscriber::EnvFilter;

/// Walks right, jumps at a fixed frame, and drops through the one-way ledge.
struct Script {
    frame: u32,
}

impl CollisionPolicy for Script {
    fn pre_step(&mut self, body: &mut PlatBody) {
        self.frame += 1;
        body.walk(if self.frame < 150 { 1.0 } else { 0.0 });
        if self.frame == 40 && body.can_jump() {
            body.jump(1.0);
        }
        if self.frame == 120 && body.on_ghost() {
            body.set_ignore_ghost(true);
        }
    }

    fn on_horizontal_hit(&mut self, _body: &PlatBody, tile: TileId, point: Vec2) -> bool {
        println!("frame {:3}: wall tile={} at ({:.1},{:.1})", self.frame, tile, point.x, point.y);
        true
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cfg = PhysicsConfig::load_or_default("platbody.toml");
    let tiles = TileLayer::from_rows(
        &[
            "....................",
            "....................",
            "....................",
            "........2222........",
            "...................1",
            "...................1",
            "11111111111111111111",
        ],
        cfg.world.grid,
    )
    .expect("valid layout");

    let mut body = cfg.build_body().expect("valid physics config");
    let mut pos = Vec2::new(cfg.world.grid.x, cfg.world.grid.y * 5.0);
    let mut script = Script { frame: 0 };
    let time = FrameTime::fixed(1.0 / 60.0);

    for _ in 0..240 {
        body.step(&mut pos, &tiles, &mut script, time);
        if script.frame % 20 == 0 {
            println!(
                "frame {:3}: pos=({:6.1},{:6.1}) speed=({:6.1},{:6.1}) grounded={} ghost={} can_jump={}",
                script.frame, pos.x, pos.y, body.speed().x, body.speed().y,
                body.grounded(), body.on_ghost(), body.can_jump()
            );
        }
    }
}
