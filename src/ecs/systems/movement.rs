use glam::Vec2;

use crate::ecs::components::{
    cat_ground_y, Cat, Position, SpriteAnim, Walk, CAT_DRAW_H, CAT_DRAW_W, CAT_FRAME_W,
    CAT_RUN_FRAMES,
};
use crate::particles::ParticleSystem;
use crate::world::{WORLD_MAX_X, WORLD_MIN_X};

/// Dust kicked up by running paws.
const DUST_COLOR: [u8; 3] = [150, 120, 90];

/// Integrate cat velocity into position. Cats stay glued to the ground
/// line and inside the world strip, and a moving cat kicks up dust
/// whenever its stride loops back to the first frame.
pub fn update(
    world: &mut hecs::World,
    viewport: Vec2,
    particles: &mut ParticleSystem,
    rng: &mut fastrand::Rng,
) {
    for (_, (pos, walk, anim, _)) in
        world.query_mut::<(&mut Position, &mut Walk, &SpriteAnim, &Cat)>()
    {
        walk.facing_left = walk.velocity < 0.0;
        pos.0.x = (pos.0.x + walk.velocity)
            .clamp(WORLD_MIN_X, WORLD_MAX_X + viewport.x - CAT_DRAW_W);

        // Ground glue, re-derived every frame so window resizes land cleanly.
        pos.0.y = cat_ground_y(viewport.y);

        if walk.velocity != 0.0 && anim.frame % CAT_RUN_FRAMES == 0 {
            let paw_x = pos.0.x
                + if walk.facing_left {
                    CAT_DRAW_W
                } else {
                    CAT_FRAME_W
                };
            particles.spawn(Vec2::new(paw_x, pos.0.y + CAT_DRAW_H), DUST_COLOR, rng);
        }
    }
}
