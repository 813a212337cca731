//! Bitmap font text rendering for the pixel canvas.
//!
//! Labels are rendered with an 8×8 bitmap font scaled by an integer factor.
//! Each glyph is 8 bytes, one per row, most significant bit on the left.
//! Lowercase letters that appear in angle labels have their own glyphs;
//! other lowercase letters fall back to the uppercase shape.

use super::{LabelImage, RenderError, TextRenderer};
use crate::color::RgbColor;

/// Width and height of one unscaled glyph cell
pub const GLYPH_SIZE: usize = 8;

#[derive(Debug, Clone, Copy)]
pub struct BitmapFont {
    scale: usize,
}

impl BitmapFont {
    pub fn new(scale: usize) -> Self {
        Self {
            scale: scale.max(1),
        }
    }

    /// Pixel size of `text` without rendering it.
    pub fn measure(&self, text: &str) -> (usize, usize) {
        let cell = GLYPH_SIZE * self.scale;
        (text.chars().count() * cell, cell)
    }
}

impl Default for BitmapFont {
    fn default() -> Self {
        Self::new(1)
    }
}

impl TextRenderer for BitmapFont {
    fn render_text(&self, text: &str, color: RgbColor) -> Result<LabelImage, RenderError> {
        if text.is_empty() {
            return Err(RenderError::EmptyText);
        }

        let glyphs = text
            .chars()
            .map(|ch| get_char_bitmap(ch).ok_or(RenderError::UnsupportedGlyph(ch)))
            .collect::<Result<Vec<_>, _>>()?;

        let (width, height) = self.measure(text);
        let mut mask = vec![false; width * height];
        let cell = GLYPH_SIZE * self.scale;

        for (i, bitmap) in glyphs.iter().enumerate() {
            for (row_idx, &row) in bitmap.iter().enumerate() {
                for col in 0..GLYPH_SIZE {
                    if (row >> (7 - col)) & 1 == 1 {
                        for sy in 0..self.scale {
                            for sx in 0..self.scale {
                                let px = i * cell + col * self.scale + sx;
                                let py = row_idx * self.scale + sy;
                                mask[py * width + px] = true;
                            }
                        }
                    }
                }
            }
        }

        Ok(LabelImage {
            text: text.to_string(),
            color,
            width: width as i32,
            height: height as i32,
            mask,
        })
    }
}

fn get_char_bitmap(ch: char) -> Option<[u8; 8]> {
    if let Some(bitmap) = get_lowercase_bitmap(ch) {
        return Some(bitmap);
    }

    let ch = ch.to_ascii_uppercase();
    Some(match ch {
        'A' => [0x18, 0x24, 0x42, 0x7E, 0x42, 0x42, 0x42, 0x00],
        'B' => [0x7C, 0x42, 0x7C, 0x42, 0x42, 0x42, 0x7C, 0x00],
        'C' => [0x3C, 0x42, 0x40, 0x40, 0x40, 0x42, 0x3C, 0x00],
        'D' => [0x78, 0x44, 0x42, 0x42, 0x42, 0x44, 0x78, 0x00],
        'E' => [0x7E, 0x40, 0x7C, 0x40, 0x40, 0x40, 0x7E, 0x00],
        'F' => [0x7E, 0x40, 0x7C, 0x40, 0x40, 0x40, 0x40, 0x00],
        'G' => [0x3C, 0x42, 0x40, 0x4E, 0x42, 0x42, 0x3C, 0x00],
        'H' => [0x42, 0x42, 0x7E, 0x42, 0x42, 0x42, 0x42, 0x00],
        'I' => [0x3E, 0x08, 0x08, 0x08, 0x08, 0x08, 0x3E, 0x00],
        'J' => [0x1F, 0x04, 0x04, 0x04, 0x04, 0x44, 0x38, 0x00],
        'K' => [0x42, 0x44, 0x78, 0x48, 0x44, 0x42, 0x42, 0x00],
        'L' => [0x40, 0x40, 0x40, 0x40, 0x40, 0x40, 0x7E, 0x00],
        'M' => [0x42, 0x66, 0x5A, 0x42, 0x42, 0x42, 0x42, 0x00],
        'N' => [0x42, 0x62, 0x52, 0x4A, 0x46, 0x42, 0x42, 0x00],
        'O' => [0x3C, 0x42, 0x42, 0x42, 0x42, 0x42, 0x3C, 0x00],
        'P' => [0x7C, 0x42, 0x42, 0x7C, 0x40, 0x40, 0x40, 0x00],
        'Q' => [0x3C, 0x42, 0x42, 0x42, 0x4A, 0x44, 0x3A, 0x00],
        'R' => [0x7C, 0x42, 0x42, 0x7C, 0x48, 0x44, 0x42, 0x00],
        'S' => [0x3C, 0x42, 0x30, 0x0C, 0x02, 0x42, 0x3C, 0x00],
        'T' => [0x7F, 0x08, 0x08, 0x08, 0x08, 0x08, 0x08, 0x00],
        'U' => [0x42, 0x42, 0x42, 0x42, 0x42, 0x42, 0x3C, 0x00],
        'V' => [0x42, 0x42, 0x42, 0x42, 0x24, 0x24, 0x18, 0x00],
        'W' => [0x42, 0x42, 0x42, 0x5A, 0x5A, 0x66, 0x42, 0x00],
        'X' => [0x42, 0x24, 0x18, 0x18, 0x24, 0x42, 0x42, 0x00],
        'Y' => [0x41, 0x22, 0x14, 0x08, 0x08, 0x08, 0x08, 0x00],
        'Z' => [0x7E, 0x04, 0x08, 0x10, 0x20, 0x40, 0x7E, 0x00],
        '0' => [0x3C, 0x42, 0x46, 0x5A, 0x62, 0x42, 0x3C, 0x00],
        '1' => [0x08, 0x18, 0x28, 0x08, 0x08, 0x08, 0x3E, 0x00],
        '2' => [0x3C, 0x42, 0x02, 0x0C, 0x30, 0x40, 0x7E, 0x00],
        '3' => [0x3C, 0x42, 0x02, 0x1C, 0x02, 0x42, 0x3C, 0x00],
        '4' => [0x04, 0x0C, 0x14, 0x24, 0x7E, 0x04, 0x04, 0x00],
        '5' => [0x7E, 0x40, 0x7C, 0x02, 0x02, 0x42, 0x3C, 0x00],
        '6' => [0x1C, 0x20, 0x40, 0x7C, 0x42, 0x42, 0x3C, 0x00],
        '7' => [0x7E, 0x02, 0x04, 0x08, 0x10, 0x10, 0x10, 0x00],
        '8' => [0x3C, 0x42, 0x42, 0x3C, 0x42, 0x42, 0x3C, 0x00],
        '9' => [0x3C, 0x42, 0x42, 0x3E, 0x02, 0x04, 0x38, 0x00],
        ' ' => [0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00],
        '-' => [0x00, 0x00, 0x00, 0x7E, 0x00, 0x00, 0x00, 0x00],
        '.' => [0x00, 0x00, 0x00, 0x00, 0x00, 0x18, 0x18, 0x00],
        ',' => [0x00, 0x00, 0x00, 0x00, 0x00, 0x18, 0x08, 0x10],
        '/' => [0x02, 0x04, 0x04, 0x08, 0x10, 0x20, 0x20, 0x40],
        ':' => [0x00, 0x18, 0x18, 0x00, 0x18, 0x18, 0x00, 0x00],
        '(' => [0x04, 0x08, 0x10, 0x10, 0x10, 0x08, 0x04, 0x00],
        ')' => [0x20, 0x10, 0x08, 0x08, 0x08, 0x10, 0x20, 0x00],
        _ => return None,
    })
}

fn get_lowercase_bitmap(ch: char) -> Option<[u8; 8]> {
    Some(match ch {
        'i' => [0x08, 0x00, 0x18, 0x08, 0x08, 0x08, 0x1C, 0x00],
        'p' => [0x00, 0x00, 0x7C, 0x42, 0x42, 0x7C, 0x40, 0x40],
        'q' => [0x00, 0x00, 0x3E, 0x42, 0x42, 0x3E, 0x02, 0x02],
        'r' => [0x00, 0x00, 0x5C, 0x62, 0x40, 0x40, 0x40, 0x00],
        's' => [0x00, 0x00, 0x3E, 0x40, 0x3C, 0x02, 0x7C, 0x00],
        't' => [0x10, 0x10, 0x7C, 0x10, 0x10, 0x12, 0x0C, 0x00],
        _ => return None,
    })
}
