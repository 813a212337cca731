use ratatui::prelude::*;

use crate::color::RgbColor;
use crate::renderer::bresenham_line;

/// Braille dot positions within a 2x4 cell:
/// (0,0)=0x01 (1,0)=0x08
/// (0,1)=0x02 (1,1)=0x10
/// (0,2)=0x04 (1,2)=0x20
/// (0,3)=0x40 (1,3)=0x80
pub const DOT_MAP: [[u8; 4]; 2] = [
    [0x01, 0x02, 0x04, 0x40],
    [0x08, 0x10, 0x20, 0x80],
];

/// A canvas for sub-character braille rendering.
/// Each terminal character cell maps to a 2x4 grid of braille dots and
/// remembers the color of the last dot drawn into it.
pub struct BrailleCanvas {
    pub grid: Vec<bool>,
    pub grid_w: usize,
    pub grid_h: usize,
    char_w: usize,
    char_h: usize,
    colors: Vec<Option<RgbColor>>,
}

impl BrailleCanvas {
    /// Create a new braille canvas for the given character dimensions.
    pub fn new(char_w: usize, char_h: usize) -> Self {
        let grid_w = char_w * 2;
        let grid_h = char_h * 4;
        Self {
            grid: vec![false; grid_w * grid_h],
            grid_w,
            grid_h,
            char_w,
            char_h,
            colors: vec![None; char_w * char_h],
        }
    }

    pub fn char_size(&self) -> (usize, usize) {
        (self.char_w, self.char_h)
    }

    pub fn clear(&mut self) {
        self.grid.fill(false);
        self.colors.fill(None);
    }

    /// Set a single dot on the braille grid (bounds-checked).
    #[inline]
    pub fn set(&mut self, gx: i32, gy: i32, color: RgbColor) {
        if gx < 0 || gy < 0 {
            return;
        }
        let (gx, gy) = (gx as usize, gy as usize);
        if gx < self.grid_w && gy < self.grid_h {
            self.grid[gy * self.grid_w + gx] = true;
            self.colors[(gy / 4) * self.char_w + gx / 2] = Some(color);
        }
    }

    pub fn is_set(&self, gx: usize, gy: usize) -> bool {
        gx < self.grid_w && gy < self.grid_h && self.grid[gy * self.grid_w + gx]
    }

    /// Draw a line using Bresenham's algorithm.
    pub fn line(&mut self, x0: i32, y0: i32, x1: i32, y1: i32, color: RgbColor) {
        bresenham_line(x0, y0, x1, y1, |x, y| self.set(x, y, color));
    }

    pub fn cell_color(&self, cx: usize, cy: usize) -> Option<RgbColor> {
        self.colors.get(cy * self.char_w + cx).copied().flatten()
    }

    /// Braille character for the cell at (cx, cy), or None if no dot is set.
    pub fn cell_char(&self, cx: usize, cy: usize) -> Option<char> {
        let mut braille: u8 = 0;

        for (dx, col) in DOT_MAP.iter().enumerate() {
            for (dy, &bit) in col.iter().enumerate() {
                if self.is_set(cx * 2 + dx, cy * 4 + dy) {
                    braille |= bit;
                }
            }
        }

        if braille == 0 {
            None
        } else {
            char::from_u32(0x2800 + braille as u32)
        }
    }

    /// Encode braille grid to characters and write to the frame buffer.
    /// `color_fn(cx, cy)` returns an optional RGB color for the character cell at (cx, cy).
    pub fn render(
        &self,
        frame: &mut Frame,
        area: Rect,
        color_fn: impl Fn(usize, usize) -> Option<(u8, u8, u8)>,
    ) {
        for cy in 0..self.char_h.min(area.height as usize) {
            for cx in 0..self.char_w.min(area.width as usize) {
                let Some(ch) = self.cell_char(cx, cy) else {
                    continue;
                };
                if let Some((r, g, b)) = color_fn(cx, cy) {
                    let cell = frame
                        .buffer_mut()
                        .cell_mut((area.x + cx as u16, area.y + cy as u16));
                    if let Some(cell) = cell {
                        cell.set_char(ch);
                        cell.set_fg(Color::Rgb(r, g, b));
                    }
                }
            }
        }
    }
}
