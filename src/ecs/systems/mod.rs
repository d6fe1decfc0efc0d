pub mod animation;
pub mod behavior;
pub mod bond;
pub mod chase;
pub mod movement;
pub mod physics;

use crate::audio::AudioSink;
use crate::daynight;
use crate::input::{self, InputFrame};
use crate::world::WorldState;

/// Advance the whole simulation by one frame.
///
/// A zero or negative delta is a no-op, so a paused or duplicated frame
/// cannot move anything. Ordering matters: input acts before the clock
/// and camera move, cats decide and chase before anything walks, and
/// props settle and escape last.
pub fn tick(world: &mut WorldState, input: &InputFrame, dt_ms: f32, audio: &mut dyn AudioSink) {
    if dt_ms <= 0.0 {
        return;
    }

    // 1. Pending pointer/key actions from the frame gap
    input::apply(world, input, audio);

    // 2. In-game clock
    world.clock.advance(dt_ms);

    // 3. Camera scroll with inertia
    world.camera.apply_intent(input.left, input.right);
    world.camera.advance();

    // 4. Dust motes drift and fade
    world.particles.update();

    // 5. Night overlay eases toward the hour's band
    let target = daynight::darkness_target(world.clock.hour());
    world.darkness.ease_toward(target);

    // 6. Sprite animation cursors
    animation::update(&mut world.entities, dt_ms);

    // 7. Autonomous re-decisions (cats and props)
    behavior::update(
        &mut world.entities,
        dt_ms,
        &mut world.rng,
        &mut world.messages,
    );

    // 8. Active chases: steer, validate, catch
    chase::update(&mut world.entities, &mut world.messages);

    // 9. Bond between sean and powi
    bond::update(
        &mut world.entities,
        dt_ms,
        &mut world.bond,
        &mut world.messages,
    );

    // 10. Cat locomotion + dust trail
    movement::update(
        &mut world.entities,
        world.viewport,
        &mut world.particles,
        &mut world.rng,
    );

    // 11. Prop gravity, ground walk, and boundary escape
    physics::update(&mut world.entities, world.viewport, &mut world.messages);

    // 12. Notification feed aging
    world.messages.update(dt_ms);
}
