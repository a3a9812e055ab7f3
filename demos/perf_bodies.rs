use glam::Vec2;
use platbody::*;
use std::time::Instant;

fn main() {
    let world = WorldConfig::default();

    // 256x64 map: solid floor, scattered blocks and one-way ledges.
    let w = 256u32;
    let h = 64u32;
    let mut tiles = TileLayer::new(w, h, world.grid).expect("valid grid");
    for x in 0..w as i32 {
        tiles.set(x, h as i32 - 1, 1);
        if x % 7 == 0 {
            tiles.set(x, h as i32 - 2, 1);
        }
        if x % 11 < 4 {
            tiles.set(x, h as i32 - 6, 2);
        }
    }

    let n_bodies = 2_000;
    let mut bodies: Vec<(PlatBody, Vec2)> = (0..n_bodies)
        .map(|i| {
            let body = PlatBody::new(world, BodyTuning::default()).expect("valid body");
            let pos = Vec2::new((i % w as usize) as f32 * world.grid.x, (i % 40) as f32 * world.grid.y);
            (body, pos)
        })
        .collect();

    let time = FrameTime::fixed(1.0 / 60.0);
    let frames = 300;
    let t0 = Instant::now();
    for frame in 0..frames {
        for (i, (body, pos)) in bodies.iter_mut().enumerate() {
            body.walk(if (i + frame / 60) % 2 == 0 { 1.0 } else { -1.0 });
            if body.can_jump() && (i + frame) % 90 == 0 {
                body.jump(1.0);
            }
            body.step(pos, &tiles, &mut DefaultPolicy, time);
        }
    }
    let secs = t0.elapsed().as_secs_f64();
    let steps = (n_bodies * frames) as f64;
    let grounded = bodies.iter().filter(|(b, _)| b.grounded()).count();
    println!(
        "bodies={} frames={} secs={:.3} throughput={:.0} steps/s grounded={}",
        n_bodies, frames, secs, steps / secs, grounded
    );
}
