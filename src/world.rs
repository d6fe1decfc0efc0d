//! Central simulation state and actor spawning.

use glam::Vec2;

use crate::camera::Camera;
use crate::daynight::{Darkness, DayClock};
use crate::ecs::components::{
    cat_ground_y, Behavior, Cat, CatName, Material, MaterialKind, Position, SpriteAnim, Walk,
    CAT_SPEED,
};
use crate::messages::MessageLog;
use crate::particles::ParticleSystem;

/// Left edge of the world for the camera and every actor.
pub const WORLD_MIN_X: f32 = -1000.0;
/// Right edge for the camera. Actors extend it by the viewport width.
pub const WORLD_MAX_X: f32 = 1000.0;
/// Concurrent prop cap.
pub const MAX_MATERIALS: usize = 5;

/// Proximity affinity between sean and powi, shown as a percentage.
#[derive(Debug, Clone, Copy)]
pub struct Bond {
    pub level: f32,
}

const BOND_RATE_PER_MS: f32 = 0.01;
const BOND_CAP: f32 = 100.0;

impl Bond {
    pub fn new() -> Self {
        Self { level: 0.0 }
    }

    /// Accrue one frame's worth of closeness, up to the cap.
    pub fn gain(&mut self, dt_ms: f32) {
        self.level = (self.level + dt_ms * BOND_RATE_PER_MS).min(BOND_CAP);
    }

    /// Whole percent for the HUD readout.
    pub fn percent(&self) -> u32 {
        self.level as u32
    }
}

/// Everything the simulation owns. Systems borrow the pieces they need;
/// nothing here is global.
pub struct WorldState {
    pub entities: hecs::World,
    pub camera: Camera,
    pub clock: DayClock,
    pub darkness: Darkness,
    pub particles: ParticleSystem,
    pub messages: MessageLog,
    pub bond: Bond,
    /// Prop currently held by the pointer.
    pub dragged: Option<hecs::Entity>,
    /// Window size in pixels. Ground lines and the right-hand actor
    /// bound derive from it every frame.
    pub viewport: Vec2,
    pub rng: fastrand::Rng,
}

impl WorldState {
    /// Build a world with the full cat roster scattered on the ground line.
    pub fn new(viewport: Vec2, rng: fastrand::Rng) -> Self {
        let mut world = Self {
            entities: hecs::World::new(),
            camera: Camera::new(),
            clock: DayClock::at_minutes(0),
            darkness: Darkness::new(),
            particles: ParticleSystem::new(),
            messages: MessageLog::new(),
            bond: Bond::new(),
            dragged: None,
            viewport,
            rng,
        };
        world.clock = DayClock::new(&mut world.rng);
        for name in CatName::ROSTER {
            spawn_cat(&mut world, name);
        }
        log::info!("spawned {} cats into the glade", CatName::ROSTER.len());
        world
    }

    pub fn material_count(&self) -> usize {
        self.entities.query::<&Material>().iter().count()
    }
}

/// Random spawn abscissa spanning the whole scrollable range.
fn random_world_x(viewport_w: f32, rng: &mut fastrand::Rng) -> f32 {
    (rng.f32() * (WORLD_MAX_X - WORLD_MIN_X + viewport_w)).floor() + WORLD_MIN_X
}

/// Spawn one roster cat standing on the ground line.
pub fn spawn_cat(world: &mut WorldState, name: CatName) -> hecs::Entity {
    let x = random_world_x(world.viewport.x, &mut world.rng);
    let y = cat_ground_y(world.viewport.y);
    let behavior = Behavior::roll(&mut world.rng);
    world.entities.spawn((
        Position(Vec2::new(x, y)),
        Walk::standing(CAT_SPEED),
        SpriteAnim::new(),
        behavior,
        Cat::new(name),
    ))
}

/// Spawn one prop standing on its ground line.
pub fn spawn_material(world: &mut WorldState, kind: MaterialKind) -> hecs::Entity {
    let x = random_world_x(world.viewport.x, &mut world.rng);
    let y = kind.ground_y(world.viewport.y);
    let behavior = Behavior::roll(&mut world.rng);
    world.entities.spawn((
        Position(Vec2::new(x, y)),
        Walk::standing(kind.speed()),
        SpriteAnim::new(),
        behavior,
        Material::new(kind),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::RecordingAudio;
    use crate::ecs::systems;
    use crate::input::{self, InputFrame};

    const VIEW: Vec2 = Vec2::new(960.0, 540.0);
    const STEP_MS: f32 = 100.0;

    fn test_world(seed: u64) -> WorldState {
        WorldState::new(VIEW, fastrand::Rng::with_seed(seed))
    }

    fn step(world: &mut WorldState, input: InputFrame) {
        let mut audio = RecordingAudio::default();
        systems::tick(world, &input, STEP_MS, &mut audio);
    }

    /// Park every actor so random decisions cannot fire mid-scenario.
    fn pin_actors(world: &mut WorldState) {
        for (_, (behavior, walk)) in world.entities.query_mut::<(&mut Behavior, &mut Walk)>() {
            behavior.delay_ms = f32::INFINITY;
            walk.velocity = 0.0;
        }
    }

    fn place_cat(world: &mut WorldState, name: CatName, x: f32) {
        for (_, (cat, pos)) in world.entities.query_mut::<(&Cat, &mut Position)>() {
            if cat.name == name {
                pos.0.x = x;
            }
        }
    }

    fn count_containing(world: &WorldState, needle: &str) -> usize {
        world
            .messages
            .iter()
            .filter(|m| m.text.contains(needle))
            .count()
    }

    #[test]
    fn new_world_spawns_the_roster() {
        let world = test_world(8);
        let names: Vec<CatName> = world
            .entities
            .query::<&Cat>()
            .iter()
            .map(|(_, c)| c.name)
            .collect();
        assert_eq!(names.len(), CatName::ROSTER.len());
        for name in CatName::ROSTER {
            assert!(names.contains(&name));
        }
        for (_, (pos, _)) in world.entities.query::<(&Position, &Cat)>().iter() {
            assert_eq!(pos.0.y, cat_ground_y(VIEW.y));
            assert!(pos.0.x >= WORLD_MIN_X);
            assert!(pos.0.x < WORLD_MAX_X + VIEW.x);
        }
        assert_eq!(world.material_count(), 0);
    }

    #[test]
    fn scroll_keys_move_the_camera() {
        let mut world = test_world(9);
        for _ in 0..10 {
            step(
                &mut world,
                InputFrame {
                    right: true,
                    ..Default::default()
                },
            );
        }
        assert!(world.camera.x > 0.0);
        assert!(world.camera.x <= WORLD_MAX_X);
    }

    #[test]
    fn sixth_spawn_is_rejected() {
        let mut world = test_world(1);
        let mut audio = RecordingAudio::default();
        let frame = InputFrame {
            spawn: true,
            ..Default::default()
        };
        for _ in 0..MAX_MATERIALS + 1 {
            input::apply(&mut world, &frame, &mut audio);
        }
        assert_eq!(world.material_count(), MAX_MATERIALS);
        assert_eq!(count_containing(&world, "has appeared"), MAX_MATERIALS);
        assert_eq!(count_containing(&world, "cant spawn more than 5 mouse"), 1);
    }

    #[test]
    fn pair_proximity_fills_the_bond_meter() {
        let mut world = test_world(2);
        pin_actors(&mut world);
        place_cat(&mut world, CatName::Sean, 500.0);
        place_cat(&mut world, CatName::Powi, 510.0);
        let mut saw_pair_message = false;
        for _ in 0..100 {
            step(&mut world, InputFrame::default());
            saw_pair_message |= count_containing(&world, "sean interacted with powi") > 0;
        }
        // 10 seconds of proximity at 0.01/ms lands exactly on the cap
        assert_eq!(world.bond.level, 100.0);
        assert_eq!(world.bond.percent(), 100);
        assert!(saw_pair_message);
        for _ in 0..50 {
            step(&mut world, InputFrame::default());
        }
        assert_eq!(world.bond.level, 100.0);
    }

    #[test]
    fn separated_pair_gains_nothing() {
        let mut world = test_world(6);
        pin_actors(&mut world);
        place_cat(&mut world, CatName::Sean, 0.0);
        place_cat(&mut world, CatName::Powi, 400.0);
        for _ in 0..50 {
            step(&mut world, InputFrame::default());
        }
        assert_eq!(world.bond.level, 0.0);
    }

    #[test]
    fn boundary_escape_removes_the_prop_once() {
        let mut world = test_world(3);
        pin_actors(&mut world);
        let mouse = spawn_material(&mut world, MaterialKind::Mouse);
        {
            let mut pos = world.entities.get::<&mut Position>(mouse).unwrap();
            pos.0.x = WORLD_MIN_X;
            pos.0.y = MaterialKind::Mouse.ground_y(VIEW.y);
        }
        {
            let mut walk = world.entities.get::<&mut Walk>(mouse).unwrap();
            walk.velocity = -MaterialKind::Mouse.speed();
        }
        step(&mut world, InputFrame::default());
        assert!(!world.entities.contains(mouse));
        assert_eq!(count_containing(&world, "the mouse ran away!"), 1);
        step(&mut world, InputFrame::default());
        assert_eq!(count_containing(&world, "the mouse ran away!"), 1);
    }

    #[test]
    fn released_prop_starts_falling() {
        let mut world = test_world(4);
        pin_actors(&mut world);
        let mouse = spawn_material(&mut world, MaterialKind::Mouse);
        {
            let mut pos = world.entities.get::<&mut Position>(mouse).unwrap();
            pos.0 = Vec2::new(300.0, 100.0);
        }
        let hold = Vec2::new(310.0, 110.0);
        step(
            &mut world,
            InputFrame {
                pointer: hold,
                pressed: true,
                ..Default::default()
            },
        );
        {
            let mat = *world.entities.get::<&Material>(mouse).unwrap();
            assert!(mat.dragging);
            assert_eq!(mat.gravity, 0.0);
        }
        // held props hang in the air
        for _ in 0..5 {
            step(
                &mut world,
                InputFrame {
                    pointer: hold,
                    ..Default::default()
                },
            );
        }
        let held_y = world.entities.get::<&Position>(mouse).unwrap().0.y;
        assert!(held_y < MaterialKind::Mouse.ground_y(VIEW.y));
        // release: gravity is re-armed and pulls it down on the next ticks
        step(
            &mut world,
            InputFrame {
                pointer: hold,
                released: true,
                ..Default::default()
            },
        );
        let falling = *world.entities.get::<&Material>(mouse).unwrap();
        assert!(!falling.dragging);
        assert!(falling.gravity > 0.0);
        let y_after_release = world.entities.get::<&Position>(mouse).unwrap().0.y;
        assert!(y_after_release > held_y);
        step(&mut world, InputFrame::default());
        assert!(world.entities.get::<&Position>(mouse).unwrap().0.y > y_after_release);
    }

    #[test]
    fn zero_delta_changes_nothing() {
        let mut world = test_world(5);
        spawn_material(&mut world, MaterialKind::Mouse);
        for _ in 0..3 {
            step(&mut world, InputFrame::default());
        }
        let cam_before = world.camera.x;
        let bond_before = world.bond.level;
        let minutes_before = world.clock.minutes();
        let darkness_before = world.darkness.current;
        let particles_before = world.particles.len();
        let materials_before = world.material_count();
        let positions_before: Vec<(hecs::Entity, Vec2)> = world
            .entities
            .query::<&Position>()
            .iter()
            .map(|(e, p)| (e, p.0))
            .collect();

        let mut audio = RecordingAudio::default();
        let busy_frame = InputFrame {
            right: true,
            spawn: true,
            pressed: true,
            ..Default::default()
        };
        systems::tick(&mut world, &busy_frame, 0.0, &mut audio);

        assert_eq!(world.camera.x, cam_before);
        assert_eq!(world.bond.level, bond_before);
        assert_eq!(world.clock.minutes(), minutes_before);
        assert_eq!(world.darkness.current, darkness_before);
        assert_eq!(world.particles.len(), particles_before);
        assert_eq!(world.material_count(), materials_before);
        for (entity, pos) in positions_before {
            assert_eq!(world.entities.get::<&Position>(entity).unwrap().0, pos);
        }
    }
}
