//! Autonomous re-decisions for cats and props, plus the affection and
//! bond-cooldown timers that ride along with them.

use crate::ecs::components::{Behavior, Cat, Chase, Material, Walk};
use crate::messages::MessageLog;

/// How long a petted cat stays happy (ms).
pub const HAPPY_MS: f32 = 2000.0;

pub fn update(
    world: &mut hecs::World,
    dt_ms: f32,
    rng: &mut fastrand::Rng,
    messages: &mut MessageLog,
) {
    // Cats: affection/bond timers always run; the decision timer is
    // suspended for the whole duration of a chase.
    let mut chase_seekers: Vec<hecs::Entity> = Vec::new();
    for (entity, (cat, behavior, walk)) in world.query_mut::<(&mut Cat, &mut Behavior, &mut Walk)>()
    {
        if cat.happy {
            cat.happy_timer_ms += dt_ms;
            if cat.happy_timer_ms >= HAPPY_MS {
                cat.happy = false;
                cat.happy_timer_ms = 0.0;
            }
        }
        if cat.bond_cooldown_ms > 0.0 {
            cat.bond_cooldown_ms -= dt_ms;
        }

        if cat.chasing.is_some() {
            continue;
        }
        behavior.timer_ms += dt_ms;
        if behavior.timer_ms < behavior.delay_ms {
            continue;
        }
        behavior.rearm(rng);
        match rng.u32(0..4) {
            0 => walk.velocity = 0.0,
            1 => walk.velocity = -walk.speed,
            2 => walk.velocity = walk.speed,
            _ => chase_seekers.push(entity),
        }
    }

    // A chase choice claims the first unchased prop the store yields.
    // The claim is written immediately, so two cats deciding in the
    // same frame can never share a target.
    for cat_entity in chase_seekers {
        let target = world
            .query::<&Material>()
            .iter()
            .find(|(_, mat)| mat.chased_by.is_none())
            .map(|(e, mat)| (e, mat.kind));
        let (target_entity, kind) = match target {
            Some(t) => t,
            None => continue,
        };
        if let Ok(mut mat) = world.get::<&mut Material>(target_entity) {
            mat.chased_by = Some(cat_entity);
        }
        if let Ok(mut cat) = world.get::<&mut Cat>(cat_entity) {
            cat.chasing = Some(Chase {
                target: target_entity,
                kind,
            });
            messages.push(format!(
                "{} is chasing a {}",
                cat.name.label(),
                kind.label()
            ));
        }
    }

    // Props: direction re-rolls, paused while held or hunted.
    for (_, (mat, behavior, walk)) in world.query_mut::<(&Material, &mut Behavior, &mut Walk)>() {
        if mat.dragging || mat.chased_by.is_some() {
            continue;
        }
        behavior.timer_ms += dt_ms;
        if behavior.timer_ms < behavior.delay_ms {
            continue;
        }
        behavior.rearm(rng);
        walk.velocity = if rng.bool() { -walk.speed } else { walk.speed };
        walk.facing_left = walk.velocity < 0.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ecs::components::{CatName, MaterialKind, Position, SpriteAnim, CAT_SPEED};
    use glam::Vec2;

    fn spawn_test_cat(world: &mut hecs::World, name: CatName, delay_ms: f32) -> hecs::Entity {
        world.spawn((
            Position(Vec2::ZERO),
            Walk::standing(CAT_SPEED),
            SpriteAnim::new(),
            Behavior {
                timer_ms: 0.0,
                delay_ms,
            },
            Cat::new(name),
        ))
    }

    fn spawn_test_mouse(world: &mut hecs::World, delay_ms: f32) -> hecs::Entity {
        world.spawn((
            Position(Vec2::new(50.0, 0.0)),
            Walk::standing(MaterialKind::Mouse.speed()),
            SpriteAnim::new(),
            Behavior {
                timer_ms: 0.0,
                delay_ms,
            },
            Material::new(MaterialKind::Mouse),
        ))
    }

    #[test]
    fn happiness_expires_after_two_seconds() {
        let mut world = hecs::World::new();
        let mut rng = fastrand::Rng::with_seed(1);
        let mut messages = MessageLog::new();
        let cat = spawn_test_cat(&mut world, CatName::Sean, f32::INFINITY);
        world.get::<&mut Cat>(cat).unwrap().happy = true;

        for _ in 0..19 {
            update(&mut world, 100.0, &mut rng, &mut messages);
        }
        assert!(world.get::<&Cat>(cat).unwrap().happy);
        update(&mut world, 100.0, &mut rng, &mut messages);
        let after = *world.get::<&Cat>(cat).unwrap();
        assert!(!after.happy);
        assert_eq!(after.happy_timer_ms, 0.0);
    }

    #[test]
    fn decisions_fire_only_after_the_delay() {
        let mut world = hecs::World::new();
        let mut rng = fastrand::Rng::with_seed(2);
        let mut messages = MessageLog::new();
        let cat = spawn_test_cat(&mut world, CatName::Uling, 1000.0);

        for _ in 0..9 {
            update(&mut world, 100.0, &mut rng, &mut messages);
            assert_eq!(world.get::<&Walk>(cat).unwrap().velocity, 0.0);
        }
        update(&mut world, 100.0, &mut rng, &mut messages);
        let behavior = *world.get::<&Behavior>(cat).unwrap();
        assert_eq!(behavior.timer_ms, 0.0);
        assert!(behavior.delay_ms >= 2000.0 && behavior.delay_ms < 4000.0);
        let velocity = world.get::<&Walk>(cat).unwrap().velocity;
        assert!(velocity == 0.0 || velocity.abs() == CAT_SPEED);
    }

    #[test]
    fn a_chase_choice_claims_the_prop_both_ways() {
        let mut world = hecs::World::new();
        let mut rng = fastrand::Rng::with_seed(3);
        let mut messages = MessageLog::new();
        let cat = spawn_test_cat(&mut world, CatName::Sean, 100.0);
        let mouse = spawn_test_mouse(&mut world, f32::INFINITY);

        // a quarter of decisions pick the chase branch, so a couple
        // thousand frames of short delays reaches one with certainty
        let mut claimed = false;
        for _ in 0..2000 {
            update(&mut world, 100.0, &mut rng, &mut messages);
            if world.get::<&Cat>(cat).unwrap().chasing.is_some() {
                claimed = true;
                break;
            }
        }
        assert!(claimed);
        assert_eq!(
            world.get::<&Cat>(cat).unwrap().chasing,
            Some(Chase {
                target: mouse,
                kind: MaterialKind::Mouse,
            })
        );
        assert_eq!(world.get::<&Material>(mouse).unwrap().chased_by, Some(cat));
        assert!(messages.iter().any(|m| m.text == "sean is chasing a mouse"));
    }

    #[test]
    fn already_chased_props_are_never_claimed_again() {
        let mut world = hecs::World::new();
        let mut rng = fastrand::Rng::with_seed(4);
        let mut messages = MessageLog::new();
        let hunter = spawn_test_cat(&mut world, CatName::Powi, f32::INFINITY);
        let rival = spawn_test_cat(&mut world, CatName::Adidas, 100.0);
        let mouse = spawn_test_mouse(&mut world, f32::INFINITY);
        world.get::<&mut Cat>(hunter).unwrap().chasing = Some(Chase {
            target: mouse,
            kind: MaterialKind::Mouse,
        });
        world.get::<&mut Material>(mouse).unwrap().chased_by = Some(hunter);

        for _ in 0..1000 {
            update(&mut world, 100.0, &mut rng, &mut messages);
            assert_eq!(world.get::<&Cat>(rival).unwrap().chasing, None);
            assert_eq!(
                world.get::<&Material>(mouse).unwrap().chased_by,
                Some(hunter)
            );
        }
    }

    #[test]
    fn chasing_suspends_the_decision_timer() {
        let mut world = hecs::World::new();
        let mut rng = fastrand::Rng::with_seed(5);
        let mut messages = MessageLog::new();
        let cat = spawn_test_cat(&mut world, CatName::Mingkay, 500.0);
        let mouse = spawn_test_mouse(&mut world, f32::INFINITY);
        world.get::<&mut Cat>(cat).unwrap().chasing = Some(Chase {
            target: mouse,
            kind: MaterialKind::Mouse,
        });

        for _ in 0..50 {
            update(&mut world, 100.0, &mut rng, &mut messages);
        }
        assert_eq!(world.get::<&Behavior>(cat).unwrap().timer_ms, 0.0);
        assert_eq!(world.get::<&Walk>(cat).unwrap().velocity, 0.0);
    }

    #[test]
    fn held_or_hunted_props_do_not_re_decide() {
        let mut world = hecs::World::new();
        let mut rng = fastrand::Rng::with_seed(6);
        let mut messages = MessageLog::new();
        let cat = spawn_test_cat(&mut world, CatName::Sean, f32::INFINITY);
        let mouse = spawn_test_mouse(&mut world, 200.0);

        world.get::<&mut Material>(mouse).unwrap().dragging = true;
        for _ in 0..50 {
            update(&mut world, 100.0, &mut rng, &mut messages);
        }
        assert_eq!(world.get::<&Behavior>(mouse).unwrap().timer_ms, 0.0);
        assert_eq!(world.get::<&Walk>(mouse).unwrap().velocity, 0.0);

        {
            let mut mat = world.get::<&mut Material>(mouse).unwrap();
            mat.dragging = false;
            mat.chased_by = Some(cat);
        }
        for _ in 0..50 {
            update(&mut world, 100.0, &mut rng, &mut messages);
        }
        assert_eq!(world.get::<&Walk>(mouse).unwrap().velocity, 0.0);

        world.get::<&mut Material>(mouse).unwrap().chased_by = None;
        update(&mut world, 100.0, &mut rng, &mut messages);
        update(&mut world, 100.0, &mut rng, &mut messages);
        let walk = *world.get::<&Walk>(mouse).unwrap();
        assert_eq!(walk.velocity.abs(), MaterialKind::Mouse.speed());
        assert_eq!(walk.facing_left, walk.velocity < 0.0);
    }
}
