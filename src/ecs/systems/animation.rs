//! Sprite-sheet frame advancement.

use crate::ecs::components::{
    Cat, Material, SpriteAnim, Walk, CAT_IDLE_FRAMES, CAT_RUN_FRAMES,
};

/// Time each frame is held (ms).
pub const FRAME_INTERVAL_MS: f32 = 100.0;

/// Advance every actor's animation cursor.
///
/// Cats wrap on the cycle matching their current motion, so a cat that
/// stops mid-run can briefly hold a frame index past the idle cycle;
/// the renderer treats such frames as blank, same as drawing past the
/// edge of the sheet would.
pub fn update(world: &mut hecs::World, dt_ms: f32) {
    for (_, (anim, walk, _cat)) in world.query_mut::<(&mut SpriteAnim, &Walk, &Cat)>() {
        let frames = if walk.velocity == 0.0 {
            CAT_IDLE_FRAMES
        } else {
            CAT_RUN_FRAMES
        };
        advance(anim, frames, dt_ms);
    }
    // props animate even while held by the pointer
    for (_, (anim, mat)) in world.query_mut::<(&mut SpriteAnim, &Material)>() {
        advance(anim, mat.kind.frame_count(), dt_ms);
    }
}

fn advance(anim: &mut SpriteAnim, frames: u32, dt_ms: f32) {
    anim.timer_ms += dt_ms;
    if anim.timer_ms >= FRAME_INTERVAL_MS {
        anim.frame = (anim.frame + 1) % frames;
        anim.timer_ms = 0.0;
    }
}
