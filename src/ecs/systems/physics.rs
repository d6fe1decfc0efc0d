//! Prop physics: gravity, the ground line, and the world's edges.

use glam::Vec2;

use crate::ecs::components::{Material, MaterialKind, Position, Walk};
use crate::messages::MessageLog;
use crate::world::{WORLD_MAX_X, WORLD_MIN_X};

/// Downward acceleration gained per airborne frame.
const GRAVITY_STEP: f32 = 0.5;

/// Drops airborne props, lands them on their ground line, and walks the
/// grounded ones. Props are not clamped to the world strip the way cats
/// are; one that reaches either edge is gone for good, held or not.
pub fn update(world: &mut hecs::World, viewport: Vec2, messages: &mut MessageLog) {
    for (_, (mat, pos, walk)) in world.query_mut::<(&mut Material, &mut Position, &Walk)>() {
        if mat.dragging {
            continue;
        }
        pos.0.y += mat.gravity;
        let ground = mat.kind.ground_y(viewport.y);
        if pos.0.y >= ground {
            pos.0.y = ground;
            mat.gravity = 0.0;
            pos.0.x += walk.velocity;
        } else {
            mat.gravity += GRAVITY_STEP;
        }
    }

    let mut escaped: Vec<(hecs::Entity, MaterialKind)> = Vec::new();
    for (entity, (mat, pos)) in world.query::<(&Material, &Position)>().iter() {
        let limit = WORLD_MAX_X + viewport.x - mat.kind.draw_size().x;
        if pos.0.x <= WORLD_MIN_X || pos.0.x >= limit {
            escaped.push((entity, mat.kind));
        }
    }
    for (entity, kind) in escaped {
        let _ = world.despawn(entity);
        messages.push(format!("the {} ran away!", kind.label()));
    }
}
