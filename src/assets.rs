//! Procedural pixel art: parallax forest layers, the five cats, and
//! the mouse prop. Everything is baked once at startup from a fixed
//! seed, so the glade looks the same on every run.

use crate::ecs::components::CatName;

/// Horizontal strip of equally wide animation frames, RGBA8. Parallax
/// layers are single-frame sheets where `frame_w == width`.
pub struct Sheet {
    pub width: u32,
    pub height: u32,
    pub frame_w: u32,
    pub pixels: Vec<u8>,
}

impl Sheet {
    fn blank(width: u32, height: u32, frame_w: u32) -> Self {
        Self {
            width,
            height,
            frame_w,
            pixels: vec![0; (width * height * 4) as usize],
        }
    }

    /// Writes outside the sheet are dropped.
    fn set(&mut self, x: i32, y: i32, color: [u8; 4]) {
        if x < 0 || y < 0 || x >= self.width as i32 || y >= self.height as i32 {
            return;
        }
        let idx = ((y as u32 * self.width + x as u32) * 4) as usize;
        self.pixels[idx..idx + 4].copy_from_slice(&color);
    }

    fn fill_rect(&mut self, x: i32, y: i32, w: i32, h: i32, color: [u8; 4]) {
        for py in y..y + h {
            for px in x..x + w {
                self.set(px, py, color);
            }
        }
    }

    fn fill_circle(&mut self, cx: f32, cy: f32, r: f32, color: [u8; 4]) {
        let x0 = (cx - r).floor() as i32;
        let x1 = (cx + r).ceil() as i32;
        let y0 = (cy - r).floor() as i32;
        let y1 = (cy + r).ceil() as i32;
        for py in y0..=y1 {
            for px in x0..=x1 {
                let dx = px as f32 + 0.5 - cx;
                let dy = py as f32 + 0.5 - cy;
                if dx * dx + dy * dy <= r * r {
                    self.set(px, py, color);
                }
            }
        }
    }
}

/// Number of parallax layers, nearest first.
pub const LAYER_COUNT: usize = 12;
/// Unscaled layer size; the renderer doubles it.
pub const LAYER_W: u32 = 480;
pub const LAYER_H: u32 = 270;

const ART_SEED: u64 = 0x5EED_CA75;

pub struct Assets {
    pub layers: Vec<Sheet>,
    cat_idle: Vec<Sheet>,
    cat_run: Vec<Sheet>,
    pub mouse: Sheet,
}

impl Assets {
    pub fn generate() -> Self {
        let mut rng = fastrand::Rng::with_seed(ART_SEED);

        let mut layers = Vec::with_capacity(LAYER_COUNT);
        for i in 0..LAYER_COUNT {
            layers.push(forest_layer(i, &mut rng));
        }

        let mut cat_idle = Vec::with_capacity(CatName::ROSTER.len());
        let mut cat_run = Vec::with_capacity(CatName::ROSTER.len());
        for name in CatName::ROSTER {
            let palette = cat_palette(name);
            cat_idle.push(cat_sheet(palette, 7, false, &mut rng));
            cat_run.push(cat_sheet(palette, 9, true, &mut rng));
        }

        let mouse = mouse_sheet(&mut rng);

        log::info!(
            "baked {} parallax layers and {} cat sheets",
            LAYER_COUNT,
            cat_idle.len() + cat_run.len()
        );

        Self {
            layers,
            cat_idle,
            cat_run,
            mouse,
        }
    }

    pub fn cat_idle(&self, name: CatName) -> &Sheet {
        &self.cat_idle[name as usize]
    }

    pub fn cat_run(&self, name: CatName) -> &Sheet {
        &self.cat_run[name as usize]
    }
}

#[derive(Clone, Copy)]
struct CatPalette {
    coat: [u8; 4],
    shade: [u8; 4],
    eye: [u8; 4],
}

fn cat_palette(name: CatName) -> CatPalette {
    let (coat, shade) = match name {
        CatName::Sean => ([224, 136, 56, 255], [168, 92, 34, 255]),
        CatName::Powi => ([152, 152, 160, 255], [108, 108, 118, 255]),
        CatName::Uling => ([62, 58, 64, 255], [40, 36, 42, 255]),
        CatName::Adidas => ([236, 236, 236, 255], [198, 198, 205, 255]),
        CatName::Mingkay => ([230, 208, 166, 255], [188, 160, 116, 255]),
    };
    CatPalette {
        coat,
        shade,
        eye: [70, 180, 90, 255],
    }
}

fn mix(from: [u8; 4], to: [u8; 4], t: f32) -> [u8; 4] {
    let lerp = |a: u8, b: u8| (a as f32 + (b as f32 - a as f32) * t).round() as u8;
    [
        lerp(from[0], to[0]),
        lerp(from[1], to[1]),
        lerp(from[2], to[2]),
        255,
    ]
}

/// One parallax slice. Index 0 is the blades of grass right in front
/// of the cats, index 11 the sky; everything between is tree ridges
/// that fade toward the horizon color.
fn forest_layer(index: usize, rng: &mut fastrand::Rng) -> Sheet {
    let mut sheet = Sheet::blank(LAYER_W, LAYER_H, LAYER_W);
    let depth = index as f32 / (LAYER_COUNT - 1) as f32;

    if index == LAYER_COUNT - 1 {
        sky(&mut sheet);
        return sheet;
    }

    if index <= 1 {
        grass_fringe(&mut sheet, index, rng);
        return sheet;
    }

    let near = [30, 54, 34, 255];
    let far = [118, 150, 172, 255];
    let tone = mix(near, far, depth);
    let canopy_tone = mix([24, 44, 28, 255], [128, 158, 178, 255], depth);

    // Rolling ridge via a clamped random walk, taller when nearer.
    let base = 90.0 + (1.0 - depth) * 95.0;
    let mut height = base;
    let h = LAYER_H as i32;
    for x in 0..LAYER_W as i32 {
        height = (height + (rng.f32() - 0.5) * 7.0).clamp(base - 28.0, base + 28.0);
        let top = h - height as i32;
        sheet.fill_rect(x, top, 1, height as i32, tone);
    }

    // Tree trunks and canopy blobs along the ridge.
    let trees = 6 + ((1.0 - depth) * 10.0) as i32;
    for _ in 0..trees {
        let x = rng.i32(0..LAYER_W as i32);
        let trunk_h = 20 + rng.i32(0..((1.0 - depth) * 40.0) as i32 + 10);
        let top = h - (base as i32 + trunk_h);
        sheet.fill_rect(x, top, 2 + rng.i32(0..2), trunk_h + base as i32, tone);
        let r = 6.0 + rng.f32() * (1.0 - depth) * 12.0;
        sheet.fill_circle(x as f32 + 1.0, top as f32, r, canopy_tone);
        sheet.fill_circle(
            x as f32 - r * 0.6,
            top as f32 + 3.0,
            r * 0.7,
            canopy_tone,
        );
        sheet.fill_circle(
            x as f32 + r * 0.7,
            top as f32 + 3.0,
            r * 0.7,
            canopy_tone,
        );
    }

    sheet
}

fn sky(sheet: &mut Sheet) {
    let top = [96, 134, 186, 255];
    let horizon = [186, 208, 222, 255];
    for y in 0..LAYER_H as i32 {
        let t = y as f32 / (LAYER_H - 1) as f32;
        let tone = mix(top, horizon, t);
        sheet.fill_rect(0, y, LAYER_W as i32, 1, tone);
    }
}

/// The two foreground strips that slide past in front of the cats.
fn grass_fringe(sheet: &mut Sheet, index: usize, rng: &mut fastrand::Rng) {
    let tone = if index == 0 {
        [18, 34, 20, 255]
    } else {
        [26, 46, 26, 255]
    };
    let h = LAYER_H as i32;
    let strip = if index == 0 { 16 } else { 10 };
    sheet.fill_rect(0, h - strip, LAYER_W as i32, strip, tone);
    for x in 0..LAYER_W as i32 {
        if rng.f32() < 0.35 {
            let blade = strip + rng.i32(4..18);
            sheet.fill_rect(x, h - blade, 1, blade, tone);
        }
    }
}

const CAT_FRAME: i32 = 32;

/// A cat strip. Idle frames breathe and sway the tail; run frames add
/// a body bob and swinging legs. All sprites face right, the renderer
/// mirrors them on the fly.
fn cat_sheet(palette: CatPalette, frames: u32, running: bool, rng: &mut fastrand::Rng) -> Sheet {
    let mut sheet = Sheet::blank(CAT_FRAME as u32 * frames, CAT_FRAME as u32, CAT_FRAME as u32);
    for frame in 0..frames as i32 {
        let ox = frame * CAT_FRAME;
        let phase = frame as f32 / frames as f32 * std::f32::consts::TAU;
        let bob = if running {
            ((phase * 2.0).sin() * 1.5).round() as i32
        } else {
            (phase.sin() * 0.8).round() as i32
        };
        let body_y = 17 - bob;

        // tail, drawn first so the body overlaps its root
        let sway = (phase.cos() * 3.0).round() as i32;
        for (step, seg_y) in (0..5).zip([0, -1, -2, -3, -5]) {
            sheet.fill_rect(
                ox + 5 - step + sway / 2,
                body_y + 2 + seg_y,
                2,
                2,
                palette.shade,
            );
        }

        // body and haunch
        sheet.fill_rect(ox + 7, body_y, 14, 9, palette.coat);
        sheet.fill_circle(ox as f32 + 9.0, body_y as f32 + 4.0, 4.5, palette.coat);

        // legs
        let leg_top = body_y + 8;
        for (i, leg_x) in [9, 13, 18, 22].into_iter().enumerate() {
            let swing = if running {
                ((phase + i as f32 * std::f32::consts::FRAC_PI_2).sin() * 2.5).round() as i32
            } else {
                0
            };
            sheet.fill_rect(ox + leg_x + swing, leg_top, 2, 29 - leg_top, palette.shade);
        }

        // head, ears, face
        let head_x = ox + 23;
        let head_y = body_y - 6;
        sheet.fill_rect(head_x, head_y, 8, 8, palette.coat);
        sheet.fill_rect(head_x, head_y - 2, 2, 2, palette.shade);
        sheet.fill_rect(head_x + 6, head_y - 2, 2, 2, palette.shade);
        sheet.set(head_x + 5, head_y + 3, palette.eye);
        sheet.set(head_x + 7, head_y + 5, [228, 120, 140, 255]);

        // fur specks
        for _ in 0..6 {
            let fx = ox + 8 + rng.i32(0..12);
            let fy = body_y + 1 + rng.i32(0..7);
            sheet.set(fx, fy, palette.shade);
        }
    }
    sheet
}

const MOUSE_FRAME_W: i32 = 42;
const MOUSE_FRAME_H: i32 = 32;

/// The mouse strip: four frames of scurrying, tail whipping behind.
fn mouse_sheet(rng: &mut fastrand::Rng) -> Sheet {
    let body = [142, 138, 148, 255];
    let shade = [104, 100, 112, 255];
    let pink = [228, 150, 160, 255];
    let mut sheet = Sheet::blank(MOUSE_FRAME_W as u32 * 4, MOUSE_FRAME_H as u32, MOUSE_FRAME_W as u32);
    for frame in 0..4 {
        let ox = frame * MOUSE_FRAME_W;
        let phase = frame as f32 / 4.0 * std::f32::consts::TAU;
        let wiggle = (phase.sin() * 3.0).round() as i32;

        // tail sweeps behind the body
        for step in 0..10 {
            let t = step as f32 / 10.0;
            let tx = ox + 12 - step;
            let ty = 22 + ((t * std::f32::consts::PI + phase).sin() * 3.0) as i32;
            sheet.set(tx, ty, pink);
        }

        // body, head, ear
        sheet.fill_circle(ox as f32 + 24.0, 23.0, 8.0, body);
        sheet.fill_circle(ox as f32 + 33.0, 21.0, 5.0, body);
        sheet.fill_circle(ox as f32 + 31.0, 15.0, 3.0, shade);
        sheet.set(ox + 38, 21, pink);
        sheet.set(ox + 35, 19, [30, 30, 34, 255]);

        // feet patter with the frame
        sheet.fill_rect(ox + 19 + wiggle, 30, 3, 2, shade);
        sheet.fill_rect(ox + 27 - wiggle, 30, 3, 2, shade);

        for _ in 0..4 {
            let fx = ox + 18 + rng.i32(0..12);
            let fy = 19 + rng.i32(0..7);
            sheet.set(fx, fy, shade);
        }
    }
    sheet
}
