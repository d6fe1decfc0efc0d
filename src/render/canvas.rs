//! CPU canvas over the RGBA frame buffer.
//!
//! Everything takes signed coordinates and clips; sprites and parallax
//! tiles spend half their lives partly off-screen.

use crate::assets::Sheet;

pub struct Canvas<'a> {
    frame: &'a mut [u8],
    width: i32,
    height: i32,
}

impl<'a> Canvas<'a> {
    /// The height is capped to the rows `frame` actually holds; a short
    /// buffer clips the same way the screen edges do.
    pub fn new(frame: &'a mut [u8], width: u32, height: u32) -> Self {
        let rows = if width == 0 {
            0
        } else {
            (frame.len() / (width as usize * 4)) as i32
        };
        Self {
            frame,
            width: width as i32,
            height: (height as i32).min(rows),
        }
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    pub fn clear(&mut self, color: [u8; 3]) {
        let [r, g, b] = color;
        for px in self.frame.chunks_exact_mut(4) {
            px[0] = r;
            px[1] = g;
            px[2] = b;
            px[3] = 255;
        }
    }

    pub fn fill_rect(&mut self, x: i32, y: i32, w: i32, h: i32, color: [u8; 3]) {
        let x0 = x.max(0);
        let y0 = y.max(0);
        let x1 = x.saturating_add(w).min(self.width);
        let y1 = y.saturating_add(h).min(self.height);
        if x0 >= x1 || y0 >= y1 {
            return;
        }
        let [r, g, b] = color;
        for py in y0..y1 {
            let row_start = ((py * self.width + x0) * 4) as usize;
            let row_end = ((py * self.width + x1) * 4) as usize;
            for px in self.frame[row_start..row_end].chunks_exact_mut(4) {
                px[0] = r;
                px[1] = g;
                px[2] = b;
                px[3] = 255;
            }
        }
    }

    /// Alpha-blend a rect over existing content. `alpha` is 0..=1.
    pub fn blend_rect(&mut self, x: i32, y: i32, w: i32, h: i32, color: [u8; 3], alpha: f32) {
        let a = (alpha.clamp(0.0, 1.0) * 255.0).round() as u32;
        if a == 0 {
            return;
        }
        if a == 255 {
            self.fill_rect(x, y, w, h, color);
            return;
        }
        let x0 = x.max(0);
        let y0 = y.max(0);
        let x1 = x.saturating_add(w).min(self.width);
        let y1 = y.saturating_add(h).min(self.height);
        if x0 >= x1 || y0 >= y1 {
            return;
        }
        let inv = 255 - a;
        for py in y0..y1 {
            let row_start = ((py * self.width + x0) * 4) as usize;
            let row_end = ((py * self.width + x1) * 4) as usize;
            for px in self.frame[row_start..row_end].chunks_exact_mut(4) {
                px[0] = ((px[0] as u32 * inv + color[0] as u32 * a + 127) / 255) as u8;
                px[1] = ((px[1] as u32 * inv + color[1] as u32 * a + 127) / 255) as u8;
                px[2] = ((px[2] as u32 * inv + color[2] as u32 * a + 127) / 255) as u8;
                px[3] = 255;
            }
        }
    }

    pub fn blend_pixel(&mut self, x: i32, y: i32, color: [u8; 3], alpha: u32) {
        if x < 0 || y < 0 || x >= self.width || y >= self.height || alpha == 0 {
            return;
        }
        let idx = ((y * self.width + x) * 4) as usize;
        let a = alpha.min(255);
        let inv = 255 - a;
        self.frame[idx] = ((self.frame[idx] as u32 * inv + color[0] as u32 * a + 127) / 255) as u8;
        self.frame[idx + 1] =
            ((self.frame[idx + 1] as u32 * inv + color[1] as u32 * a + 127) / 255) as u8;
        self.frame[idx + 2] =
            ((self.frame[idx + 2] as u32 * inv + color[2] as u32 * a + 127) / 255) as u8;
        self.frame[idx + 3] = 255;
    }

    pub fn fill_circle(&mut self, cx: f32, cy: f32, radius: f32, color: [u8; 3], alpha: f32) {
        let a = (alpha.clamp(0.0, 1.0) * 255.0).round() as u32;
        if a == 0 || radius <= 0.0 {
            return;
        }
        let x0 = (cx - radius).floor() as i32;
        let x1 = (cx + radius).ceil() as i32;
        let y0 = (cy - radius).floor() as i32;
        let y1 = (cy + radius).ceil() as i32;
        let r2 = radius * radius;
        for py in y0..=y1 {
            for px in x0..=x1 {
                let dx = px as f32 + 0.5 - cx;
                let dy = py as f32 + 0.5 - cy;
                if dx * dx + dy * dy <= r2 {
                    self.blend_pixel(px, py, color, a);
                }
            }
        }
    }

    /// Radial glow: color and alpha lerp from the center values out to
    /// the rim values, nothing painted past the radius.
    pub fn glow(
        &mut self,
        cx: f32,
        cy: f32,
        radius: f32,
        inner: [u8; 3],
        inner_alpha: f32,
        outer: [u8; 3],
        outer_alpha: f32,
    ) {
        if radius <= 0.0 {
            return;
        }
        let x0 = (cx - radius).floor() as i32;
        let x1 = (cx + radius).ceil() as i32;
        let y0 = (cy - radius).floor() as i32;
        let y1 = (cy + radius).ceil() as i32;
        for py in y0..=y1 {
            for px in x0..=x1 {
                let dx = px as f32 + 0.5 - cx;
                let dy = py as f32 + 0.5 - cy;
                let t = (dx * dx + dy * dy).sqrt() / radius;
                if t > 1.0 {
                    continue;
                }
                let color = [
                    lerp_channel(inner[0], outer[0], t),
                    lerp_channel(inner[1], outer[1], t),
                    lerp_channel(inner[2], outer[2], t),
                ];
                let alpha = inner_alpha + (outer_alpha - inner_alpha) * t;
                self.blend_pixel(px, py, color, (alpha.clamp(0.0, 1.0) * 255.0).round() as u32);
            }
        }
    }

    /// Nearest-neighbor blit of one animation frame, scaled to the
    /// destination rect. A frame index past the end of the sheet draws
    /// nothing, the same as sampling outside a source image.
    pub fn blit_frame(
        &mut self,
        sheet: &Sheet,
        frame: u32,
        dx: i32,
        dy: i32,
        dw: i32,
        dh: i32,
        flip: bool,
    ) {
        if dw <= 0 || dh <= 0 {
            return;
        }
        let fw = sheet.frame_w as i32;
        let fh = sheet.height as i32;
        let src_x0 = frame as i32 * fw;
        if src_x0 + fw > sheet.width as i32 {
            return;
        }
        for oy in 0..dh {
            let py = dy + oy;
            if py < 0 || py >= self.height {
                continue;
            }
            let sy = oy * fh / dh;
            for ox in 0..dw {
                let px = dx + ox;
                if px < 0 || px >= self.width {
                    continue;
                }
                let mut sx = ox * fw / dw;
                if flip {
                    sx = fw - 1 - sx;
                }
                let src = ((sy * sheet.width as i32 + src_x0 + sx) * 4) as usize;
                let a = sheet.pixels[src + 3] as u32;
                if a == 0 {
                    continue;
                }
                let color = [
                    sheet.pixels[src],
                    sheet.pixels[src + 1],
                    sheet.pixels[src + 2],
                ];
                self.blend_pixel(px, py, color, a);
            }
        }
    }
}

fn lerp_channel(from: u8, to: u8, t: f32) -> u8 {
    (from as f32 + (to as f32 - from as f32) * t).round() as u8
}
