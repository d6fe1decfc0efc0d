//! 3x5 pixel font for names, the HUD, and the notification feed.

use crate::render::canvas::Canvas;

pub const GLYPH_W: i32 = 3;
pub const GLYPH_H: i32 = 5;

pub fn glyph_advance(scale: i32) -> i32 {
    (GLYPH_W + 1) * scale.max(1)
}

/// Pixel width of a run of text, without the trailing gap.
pub fn text_width(text: &str, scale: i32) -> i32 {
    let chars = text.chars().count() as i32;
    if chars == 0 {
        return 0;
    }
    chars * glyph_advance(scale) - scale.max(1)
}

pub fn draw_text(
    canvas: &mut Canvas,
    x: i32,
    y: i32,
    text: &str,
    color: [u8; 3],
    alpha: f32,
    scale: i32,
) {
    let scale = scale.max(1);
    let a = (alpha.clamp(0.0, 1.0) * 255.0).round() as u32;
    if a == 0 {
        return;
    }
    let mut cursor_x = x;
    for ch in text.chars() {
        let rows = glyph_rows(ch);
        for (row, bits) in rows.into_iter().enumerate() {
            let py0 = y + row as i32 * scale;
            for col in 0..GLYPH_W {
                let mask = 1u8 << (GLYPH_W - 1 - col);
                if bits & mask == 0 {
                    continue;
                }
                let px0 = cursor_x + col * scale;
                for dy in 0..scale {
                    for dx in 0..scale {
                        canvas.blend_pixel(px0 + dx, py0 + dy, color, a);
                    }
                }
            }
        }
        cursor_x += glyph_advance(scale);
    }
}

/// Text with a one-pixel black drop shadow, the cheap stand-in for an
/// outlined font.
pub fn draw_text_shadowed(
    canvas: &mut Canvas,
    x: i32,
    y: i32,
    text: &str,
    color: [u8; 3],
    alpha: f32,
    scale: i32,
) {
    let scale = scale.max(1);
    draw_text(canvas, x + scale, y + scale, text, [0, 0, 0], alpha, scale);
    draw_text(canvas, x, y, text, color, alpha, scale);
}

fn glyph_rows(ch: char) -> [u8; GLYPH_H as usize] {
    match ch.to_ascii_uppercase() {
        'A' => [0b010, 0b101, 0b111, 0b101, 0b101],
        'B' => [0b110, 0b101, 0b110, 0b101, 0b110],
        'C' => [0b011, 0b100, 0b100, 0b100, 0b011],
        'D' => [0b110, 0b101, 0b101, 0b101, 0b110],
        'E' => [0b111, 0b100, 0b110, 0b100, 0b111],
        'F' => [0b111, 0b100, 0b110, 0b100, 0b100],
        'G' => [0b011, 0b100, 0b101, 0b101, 0b011],
        'H' => [0b101, 0b101, 0b111, 0b101, 0b101],
        'I' => [0b111, 0b010, 0b010, 0b010, 0b111],
        'J' => [0b001, 0b001, 0b001, 0b101, 0b010],
        'K' => [0b101, 0b101, 0b110, 0b101, 0b101],
        'L' => [0b100, 0b100, 0b100, 0b100, 0b111],
        'M' => [0b101, 0b111, 0b111, 0b101, 0b101],
        'N' => [0b110, 0b101, 0b101, 0b101, 0b101],
        'O' => [0b010, 0b101, 0b101, 0b101, 0b010],
        'P' => [0b110, 0b101, 0b110, 0b100, 0b100],
        'Q' => [0b010, 0b101, 0b101, 0b010, 0b001],
        'R' => [0b110, 0b101, 0b110, 0b101, 0b101],
        'S' => [0b011, 0b100, 0b010, 0b001, 0b110],
        'T' => [0b111, 0b010, 0b010, 0b010, 0b010],
        'U' => [0b101, 0b101, 0b101, 0b101, 0b111],
        'V' => [0b101, 0b101, 0b101, 0b101, 0b010],
        'W' => [0b101, 0b101, 0b111, 0b111, 0b101],
        'X' => [0b101, 0b101, 0b010, 0b101, 0b101],
        'Y' => [0b101, 0b101, 0b010, 0b010, 0b010],
        'Z' => [0b111, 0b001, 0b010, 0b100, 0b111],
        '0' => [0b111, 0b101, 0b101, 0b101, 0b111],
        '1' => [0b010, 0b110, 0b010, 0b010, 0b111],
        '2' => [0b111, 0b001, 0b111, 0b100, 0b111],
        '3' => [0b111, 0b001, 0b111, 0b001, 0b111],
        '4' => [0b101, 0b101, 0b111, 0b001, 0b001],
        '5' => [0b111, 0b100, 0b111, 0b001, 0b111],
        '6' => [0b111, 0b100, 0b111, 0b101, 0b111],
        '7' => [0b111, 0b001, 0b001, 0b010, 0b010],
        '8' => [0b111, 0b101, 0b111, 0b101, 0b111],
        '9' => [0b111, 0b101, 0b111, 0b001, 0b111],
        ':' => [0b000, 0b010, 0b000, 0b010, 0b000],
        '%' => [0b101, 0b001, 0b010, 0b100, 0b101],
        '!' => [0b010, 0b010, 0b010, 0b000, 0b010],
        '&' => [0b010, 0b101, 0b010, 0b101, 0b011],
        '.' => [0b000, 0b000, 0b000, 0b000, 0b010],
        ',' => [0b000, 0b000, 0b000, 0b010, 0b100],
        '-' => [0b000, 0b000, 0b111, 0b000, 0b000],
        '\'' => [0b010, 0b010, 0b000, 0b000, 0b000],
        ' ' => [0b000; 5],
        _ => [0b111, 0b001, 0b010, 0b000, 0b010],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn width_accounts_for_gaps() {
        assert_eq!(text_width("", 1), 0);
        assert_eq!(text_width("a", 1), 3);
        assert_eq!(text_width("ab", 2), 14);
    }

    #[test]
    fn glyphs_land_on_the_grid() {
        let mut frame = vec![0u8; 8 * 8 * 4];
        let mut canvas = Canvas::new(&mut frame, 8, 8);
        draw_text(&mut canvas, 0, 0, "i", [255, 255, 255], 1.0, 1);

        // top bar of the I spans three columns
        for x in 0..3 {
            let idx = (x * 4) as usize;
            assert_eq!(frame[idx], 255);
        }
        // middle row is the lone center column
        let mid = ((2 * 8 + 1) * 4) as usize;
        assert_eq!(frame[mid], 255);
        let mid_left = ((2 * 8) * 4) as usize;
        assert_eq!(frame[mid_left], 0);
    }

    #[test]
    fn spaces_draw_nothing() {
        let mut frame = vec![0u8; 8 * 8 * 4];
        let mut canvas = Canvas::new(&mut frame, 8, 8);
        draw_text(&mut canvas, 0, 0, " ", [255, 255, 255], 1.0, 1);
        assert!(frame.iter().all(|&b| b == 0));
    }
}
