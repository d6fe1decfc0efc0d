//! The sean and powi friendship meter.

use crate::ecs::components::{Cat, CatName, Position};
use crate::ecs::systems::chase::{CATCH_DISTANCE_X, CATCH_DISTANCE_Y};
use crate::messages::MessageLog;
use crate::world::Bond;

/// Pause between repeated bond notifications.
pub const BOND_MESSAGE_COOLDOWN_MS: f32 = 5000.0;

/// Grows the bond while sean and powi stand together. The meter gains
/// once per frame no matter how the pair is iterated, and sean throws
/// a throttled notification (plus a happy bubble) when they meet.
pub fn update(world: &mut hecs::World, dt_ms: f32, bond: &mut Bond, messages: &mut MessageLog) {
    let mut sean: Option<(hecs::Entity, glam::Vec2)> = None;
    let mut powi: Option<glam::Vec2> = None;
    for (entity, (cat, pos)) in world.query::<(&Cat, &Position)>().iter() {
        match cat.name {
            CatName::Sean => sean = Some((entity, pos.0)),
            CatName::Powi => powi = Some(pos.0),
            _ => {}
        }
    }
    let ((sean_entity, sean_pos), powi_pos) = match (sean, powi) {
        (Some(sean), Some(powi)) => (sean, powi),
        _ => return,
    };

    let dx = (sean_pos.x - powi_pos.x).abs();
    let dy = (sean_pos.y - powi_pos.y).abs();
    if dx >= CATCH_DISTANCE_X || dy >= CATCH_DISTANCE_Y {
        return;
    }

    bond.gain(dt_ms);

    if let Ok(mut cat) = world.get::<&mut Cat>(sean_entity) {
        if cat.bond_cooldown_ms <= 0.0 {
            messages.push("sean interacted with powi");
            cat.happy = true;
            cat.happy_timer_ms = 0.0;
            cat.bond_cooldown_ms = BOND_MESSAGE_COOLDOWN_MS;
        }
    }
}
