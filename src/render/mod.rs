//! Scene composition into the frame buffer.
//!
//! Order matters and is part of the look: the darkness wash and the
//! night auras land on the backdrop only, sprites stay at full
//! brightness on top, and the two nearest grass layers slide past in
//! front of everyone.

pub mod canvas;
pub mod font;

use glam::Vec2;

use crate::assets::{Assets, Sheet, LAYER_COUNT};
use crate::daynight;
use crate::ecs::components::{
    Cat, Material, MaterialKind, Position, SpriteAnim, Walk, CAT_DRAW_H, CAT_DRAW_W, CAT_FRAME_W,
};
use crate::world::WorldState;

use self::canvas::Canvas;

const LAYER_SCALE: i32 = 2;
const TEXT_COLOR: [u8; 3] = [255, 255, 255];
const HEART_COLOR: [u8; 3] = [222, 70, 92];
const BUBBLE_COLOR: [u8; 3] = [248, 248, 248];
const AURA_RADIUS: f32 = 100.0;

pub fn draw(world: &WorldState, assets: &Assets, canvas: &mut Canvas) {
    canvas.clear([12, 14, 18]);
    let cam = world.camera.x;

    draw_layers(canvas, assets, cam, 2, 11);

    for particle in world.particles.iter() {
        canvas.fill_circle(
            particle.pos.x - cam,
            particle.pos.y,
            particle.radius,
            particle.color,
            particle.alpha,
        );
    }

    canvas.blend_rect(
        0,
        0,
        canvas.width(),
        canvas.height(),
        [0, 0, 0],
        world.darkness.current,
    );

    if daynight::is_night(world.clock.hour()) {
        for (_, (pos, _)) in world.entities.query::<(&Position, &Cat)>().iter() {
            let cx = pos.0.x + CAT_DRAW_W / 2.0 - cam;
            let cy = pos.0.y + CAT_DRAW_H / 2.0;
            canvas.glow(
                cx,
                cy,
                AURA_RADIUS,
                [255, 255, 255],
                0.1,
                [255, 255, 200],
                0.01,
            );
        }
    }

    for (_, (pos, walk, anim, cat)) in world
        .entities
        .query::<(&Position, &Walk, &SpriteAnim, &Cat)>()
        .iter()
    {
        draw_cat(canvas, assets, cam, pos.0, walk, anim, cat);
    }

    for (_, (pos, walk, anim, mat)) in world
        .entities
        .query::<(&Position, &Walk, &SpriteAnim, &Material)>()
        .iter()
    {
        let frame_size = mat.kind.frame_size();
        let draw_size = mat.kind.draw_size();
        let draw_x = (pos.0.x - cam + frame_size.x / 2.0) as i32;
        canvas.blit_frame(
            material_sheet(assets, mat.kind),
            anim.frame,
            draw_x,
            pos.0.y as i32,
            draw_size.x as i32,
            draw_size.y as i32,
            walk.facing_left,
        );
    }

    draw_layers(canvas, assets, cam, 0, 1);

    draw_hud(world, canvas);
}

/// Dim the scene and invite the first click. Everything behind keeps
/// animating while the menu is up.
pub fn draw_start_overlay(canvas: &mut Canvas) {
    canvas.blend_rect(0, 0, canvas.width(), canvas.height(), [0, 0, 0], 0.55);

    let title = "CATGLADE";
    let tx = (canvas.width() - font::text_width(title, 8)) / 2;
    let ty = canvas.height() / 2 - 60;
    font::draw_text_shadowed(canvas, tx, ty, title, [255, 228, 140], 1.0, 8);

    let prompt = "CLICK TO START";
    let px = (canvas.width() - font::text_width(prompt, 3)) / 2;
    font::draw_text_shadowed(canvas, px, canvas.height() / 2 + 24, prompt, TEXT_COLOR, 1.0, 3);
}

/// Parallax slice in back-to-front order. Each layer scrolls slower
/// the deeper it sits and tiles three times to cover the pan range.
fn draw_layers(canvas: &mut Canvas, assets: &Assets, cam: f32, start: usize, end: usize) {
    for i in (start..=end).rev() {
        let layer = &assets.layers[i];
        let w = layer.width as i32 * LAYER_SCALE;
        let h = layer.height as i32 * LAYER_SCALE;
        let y = canvas.height() - h;
        let speed = 1.0 - i as f32 / LAYER_COUNT as f32;
        let scroll = (-cam * speed) % w as f32;
        for offset in [-1, 0, 1] {
            canvas.blit_frame(layer, 0, scroll as i32 + offset * w, y, w, h, false);
        }
    }
}

fn material_sheet(assets: &Assets, kind: MaterialKind) -> &Sheet {
    match kind {
        MaterialKind::Mouse => &assets.mouse,
    }
}

fn draw_cat(
    canvas: &mut Canvas,
    assets: &Assets,
    cam: f32,
    pos: Vec2,
    walk: &Walk,
    anim: &SpriteAnim,
    cat: &Cat,
) {
    let draw_x = (pos.x - cam + CAT_FRAME_W / 2.0) as i32;
    let draw_y = pos.y as i32;

    let label = cat.name.label();
    let name_x = draw_x + 40 - font::text_width(label, 2) / 2;
    let name_y = draw_y - 5 - font::GLYPH_H * 2;
    font::draw_text_shadowed(canvas, name_x, name_y, label, TEXT_COLOR, 1.0, 2);

    if cat.happy {
        canvas.blend_rect(draw_x + 20, draw_y - 55, 40, 40, BUBBLE_COLOR, 0.9);
        draw_heart(canvas, draw_x + 40, draw_y - 30, 2);
    }

    let sheet = if walk.velocity == 0.0 {
        assets.cat_idle(cat.name)
    } else {
        assets.cat_run(cat.name)
    };
    canvas.blit_frame(
        sheet,
        anim.frame,
        draw_x,
        draw_y,
        CAT_DRAW_W as i32,
        CAT_DRAW_H as i32,
        walk.facing_left,
    );
}

const HEART_ROWS: [u8; 6] = [
    0b0110110, 0b1111111, 0b1111111, 0b0111110, 0b0011100, 0b0001000,
];

fn draw_heart(canvas: &mut Canvas, cx: i32, cy: i32, scale: i32) {
    let x0 = cx - 7 * scale / 2;
    let y0 = cy - 6 * scale / 2;
    for (row, bits) in HEART_ROWS.into_iter().enumerate() {
        for col in 0..7 {
            if bits & (1 << (6 - col)) == 0 {
                continue;
            }
            canvas.fill_rect(x0 + col * scale, y0 + row as i32 * scale, scale, scale, HEART_COLOR);
        }
    }
}

fn draw_hud(world: &WorldState, canvas: &mut Canvas) {
    let time_text = format!("Time: {}", world.clock.formatted());
    font::draw_text_shadowed(canvas, 10, 10, &time_text, TEXT_COLOR, 1.0, 2);

    let bond_text = format!("Sean & Powi Bond: {}%", world.bond.percent());
    let bond_x = (canvas.width() - font::text_width(&bond_text, 2)) / 2;
    font::draw_text_shadowed(canvas, bond_x, 20, &bond_text, TEXT_COLOR, 1.0, 2);

    let count = world.messages.len() as i32;
    let mut y = canvas.height() - 14 - count * 18;
    for message in world.messages.iter() {
        font::draw_text_shadowed(canvas, 10, y, &message.text, TEXT_COLOR, message.opacity(), 2);
        y += 18;
    }
}
