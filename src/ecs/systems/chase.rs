//! Active chases: steering, target validation, and the catch itself.

use glam::Vec2;

use crate::ecs::components::{Cat, CatName, MaterialKind, Position, Walk};
use crate::messages::MessageLog;

/// Horizontal distance that counts as a catch.
pub const CATCH_DISTANCE_X: f32 = 20.0;
/// Vertical distance that counts as a catch. The pair bond uses the
/// same window.
pub const CATCH_DISTANCE_Y: f32 = 50.0;

struct ActiveChase {
    cat: hecs::Entity,
    name: CatName,
    cat_pos: Vec2,
    target: hecs::Entity,
    kind: MaterialKind,
    target_pos: Option<Vec2>,
}

/// Steers every chasing cat at its claimed prop and settles the chase
/// when the two are close enough. A target that vanished (ran off the
/// edge of the world, usually) ends the chase with a wind-down message
/// instead.
pub fn update(world: &mut hecs::World, messages: &mut MessageLog) {
    // Read pass: collect cats with a claimed target.
    let mut active: Vec<ActiveChase> = Vec::new();
    for (entity, (cat, pos)) in world.query::<(&Cat, &Position)>().iter() {
        if let Some(chase) = cat.chasing {
            active.push(ActiveChase {
                cat: entity,
                name: cat.name,
                cat_pos: pos.0,
                target: chase.target,
                kind: chase.kind,
                target_pos: None,
            });
        }
    }

    // Resolve target positions; a missing one means the prop is gone.
    for chase in active.iter_mut() {
        if let Ok(pos) = world.get::<&Position>(chase.target) {
            chase.target_pos = Some(pos.0);
        }
    }

    // Write pass: steer toward the prop, or wind the chase down.
    for chase in &active {
        let target_pos = match chase.target_pos {
            Some(pos) => pos,
            None => {
                messages.push(format!(
                    "{} gave up chasing the {}",
                    chase.name.label(),
                    chase.kind.label()
                ));
                clear_chase(world, chase.cat);
                continue;
            }
        };

        if let Ok(mut walk) = world.get::<&mut Walk>(chase.cat) {
            walk.velocity = if chase.cat_pos.x >= target_pos.x {
                -walk.speed
            } else {
                walk.speed
            };
        }

        let dx = (chase.cat_pos.x - target_pos.x).abs();
        let dy = (chase.cat_pos.y - target_pos.y).abs();
        if dy < CATCH_DISTANCE_Y && dx < CATCH_DISTANCE_X {
            messages.push(format!(
                "{} caught the {}!",
                chase.name.label(),
                chase.kind.label()
            ));
            let _ = world.despawn(chase.target);
            clear_chase(world, chase.cat);
        }
    }
}

fn clear_chase(world: &mut hecs::World, cat: hecs::Entity) {
    if let Ok(mut cat) = world.get::<&mut Cat>(cat) {
        cat.chasing = None;
    }
}
