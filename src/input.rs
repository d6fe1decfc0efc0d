//! Pointer and key intake, and how one frame of it acts on the world.
//!
//! The window layer records raw events into `InputState`; once per frame
//! `snapshot` flattens them into an `InputFrame` and clears the edges.
//! `apply` then performs the actions, standing in for what browser-style
//! event handlers would do between frames: spawning props, dragging,
//! and petting cats.

use glam::Vec2;

use crate::audio::{AudioSink, MeowCue};
use crate::ecs::components::{Cat, Material, MaterialKind, Position, CAT_DRAW_H, CAT_DRAW_W};
use crate::world::{spawn_material, WorldState, MAX_MATERIALS, WORLD_MAX_X, WORLD_MIN_X};

/// Fall speed a prop is released with.
const RELEASE_GRAVITY: f32 = 2.0;

/// Raw event accumulator. Held keys persist; presses are one-frame edges.
#[derive(Debug, Default)]
pub struct InputState {
    pub left_held: bool,
    pub right_held: bool,
    pointer: Vec2,
    pressed: bool,
    released: bool,
    spawn: bool,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pointer_moved(&mut self, pos: Vec2) {
        self.pointer = pos;
    }

    pub fn pointer_pressed(&mut self) {
        self.pressed = true;
    }

    pub fn pointer_released(&mut self) {
        self.released = true;
    }

    pub fn spawn_requested(&mut self) {
        self.spawn = true;
    }

    /// Produce this frame's input and clear the edge flags.
    pub fn snapshot(&mut self) -> InputFrame {
        let frame = InputFrame {
            left: self.left_held,
            right: self.right_held,
            pointer: self.pointer,
            pressed: self.pressed,
            released: self.released,
            spawn: self.spawn,
        };
        self.pressed = false;
        self.released = false;
        self.spawn = false;
        frame
    }
}

/// One frame of normalized input, as the simulation sees it.
#[derive(Debug, Clone, Copy, Default)]
pub struct InputFrame {
    /// Scroll-left key held.
    pub left: bool,
    /// Scroll-right key held.
    pub right: bool,
    /// Pointer position in screen pixels.
    pub pointer: Vec2,
    /// Pointer went down this frame.
    pub pressed: bool,
    /// Pointer went up this frame.
    pub released: bool,
    /// A prop spawn was requested this frame.
    pub spawn: bool,
}

/// Apply one frame of input to the world. Runs first in the tick.
pub fn apply(world: &mut WorldState, input: &InputFrame, audio: &mut dyn AudioSink) {
    if input.spawn {
        spawn_request(world);
    }
    if input.pressed {
        start_drag(world, input.pointer);
    }
    if world.dragged.is_some() {
        drag_move(world, input.pointer);
    }
    if input.released {
        end_drag(world);
        affection_clicks(world, input.pointer, audio);
    }
}

fn spawn_request(world: &mut WorldState) {
    if world.material_count() >= MAX_MATERIALS {
        world
            .messages
            .push(format!("cant spawn more than {MAX_MATERIALS} mouse"));
        return;
    }
    spawn_material(world, MaterialKind::Mouse);
    world.messages.push("a mouse has appeared!");
}

fn rect_hit(pointer: Vec2, left: f32, top: f32, w: f32, h: f32) -> bool {
    pointer.x >= left && pointer.x <= left + w && pointer.y >= top && pointer.y <= top + h
}

/// Grab the first prop under the pointer, if any.
fn start_drag(world: &mut WorldState, pointer: Vec2) {
    let cam_x = world.camera.x;
    let mut grabbed: Option<(hecs::Entity, Vec2, f32)> = None;
    for (entity, (mat, pos)) in world.entities.query::<(&Material, &Position)>().iter() {
        let draw = mat.kind.draw_size();
        if rect_hit(pointer, pos.0.x - cam_x, pos.0.y, draw.x, draw.y) {
            grabbed = Some((entity, pos.0, mat.kind.frame_size().x));
            break;
        }
    }
    let (entity, pos, frame_w) = match grabbed {
        Some(g) => g,
        None => return,
    };
    if let Ok(mut mat) = world.entities.get::<&mut Material>(entity) {
        mat.dragging = true;
        mat.gravity = 0.0;
        mat.drag_offset = Vec2::new(
            pointer.x - (pos.x - cam_x + frame_w / 2.0),
            pointer.y - pos.y,
        );
    }
    world.dragged = Some(entity);
}

/// Re-anchor the held prop to the pointer. Clamped to the world bounds
/// horizontally and to its ground line vertically.
fn drag_move(world: &mut WorldState, pointer: Vec2) {
    let entity = match world.dragged {
        Some(e) => e,
        None => return,
    };
    let (offset, kind) = match world.entities.get::<&Material>(entity) {
        Ok(mat) => (mat.drag_offset, mat.kind),
        // the prop can escape at a world edge while held
        Err(_) => {
            world.dragged = None;
            return;
        }
    };
    let cam_x = world.camera.x;
    let max_x = WORLD_MAX_X + world.viewport.x - kind.draw_size().x;
    let ground = kind.ground_y(world.viewport.y);
    let frame_w = kind.frame_size().x;
    if let Ok(mut pos) = world.entities.get::<&mut Position>(entity) {
        pos.0.x = (pointer.x - offset.x + cam_x - frame_w / 2.0).clamp(WORLD_MIN_X, max_x);
        pos.0.y = (pointer.y - offset.y).min(ground);
    }
}

fn end_drag(world: &mut WorldState) {
    let entity = match world.dragged.take() {
        Some(e) => e,
        None => return,
    };
    if let Ok(mut mat) = world.entities.get::<&mut Material>(entity) {
        mat.dragging = false;
        mat.gravity = RELEASE_GRAVITY;
    }
}

/// Pet every cat under the pointer.
fn affection_clicks(world: &mut WorldState, pointer: Vec2, audio: &mut dyn AudioSink) {
    let cam_x = world.camera.x;
    let mut petted: Vec<hecs::Entity> = Vec::new();
    for (entity, (pos, _cat)) in world.entities.query::<(&Position, &Cat)>().iter() {
        if rect_hit(pointer, pos.0.x - cam_x, pos.0.y, CAT_DRAW_W, CAT_DRAW_H) {
            petted.push(entity);
        }
    }
    for entity in petted {
        show_affection(world, entity, audio);
        if let Ok(mut cat) = world.entities.get::<&mut Cat>(entity) {
            cat.happy = true;
        }
    }
}

/// Meow and announce the petting, unless the cat is already happy.
fn show_affection(world: &mut WorldState, entity: hecs::Entity, audio: &mut dyn AudioSink) {
    let name = match world.entities.get::<&Cat>(entity) {
        Ok(cat) if !cat.happy => cat.name,
        _ => return,
    };
    audio.play_meow(MeowCue::random(&mut world.rng));
    world
        .messages
        .push(format!("you interacted with {}", name.label()));
}
