//! Drawing collaborators for the unit circle scene
//!
//! The scene never talks to a terminal or an image file directly. It draws
//! through [`Surface`], asks a [`TextRenderer`] for label images and waits on
//! a [`Pacer`] between animation steps. [`Canvas`] is the in-memory RGBA
//! surface used for snapshots; the terminal backend brings its own.

pub mod font;

use std::time::Duration;
use thiserror::Error;

use crate::color::RgbColor;

pub use font::BitmapFont;

#[derive(Debug, Error, PartialEq)]
pub enum RenderError {
    #[error("cannot render an empty label")]
    EmptyText,
    #[error("font has no glyph for {0:?}")]
    UnsupportedGlyph(char),
    #[error("label image at ({x}, {y}) lies entirely outside the surface")]
    ImageOutOfBounds { x: i32, y: i32 },
}

/// Rendered label text, ready to be placed on a surface.
///
/// `width` and `height` are in surface pixels. `mask` holds `width * height`
/// coverage values for pixel backends; backends that draw text natively
/// leave it empty and use `text` instead.
#[derive(Debug, Clone, PartialEq)]
pub struct LabelImage {
    pub text: String,
    pub color: RgbColor,
    pub width: i32,
    pub height: i32,
    pub mask: Vec<bool>,
}

/// Render target the scene draws on
pub trait Surface {
    /// Fill the whole surface with the current draw color.
    fn clear(&mut self);

    fn set_draw_color(&mut self, color: RgbColor, alpha: u8);

    fn draw_point(&mut self, x: i32, y: i32);

    fn draw_line(&mut self, x0: i32, y0: i32, x1: i32, y1: i32);

    /// Place a label with its top-left corner at (x, y).
    fn draw_image(&mut self, image: &LabelImage, x: i32, y: i32) -> Result<(), RenderError>;

    /// Make everything drawn so far visible.
    fn present(&mut self);
}

pub trait TextRenderer {
    fn render_text(&self, text: &str, color: RgbColor) -> Result<LabelImage, RenderError>;
}

/// Animation pacing between visible steps
pub trait Pacer {
    fn pause(&mut self, delay: Duration);
}

/// Pacer that never waits, for headless rendering.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoDelay;

impl Pacer for NoDelay {
    fn pause(&mut self, _delay: Duration) {}
}

/// Walk every grid point on the segment from (x0, y0) to (x1, y1) using
/// Bresenham's algorithm, endpoints included.
pub fn bresenham_line(x0: i32, y0: i32, x1: i32, y1: i32, mut plot: impl FnMut(i32, i32)) {
    let mut x0 = x0;
    let mut y0 = y0;

    let dx = (x1 - x0).abs();
    let dy = -(y1 - y0).abs();
    let sx = if x0 < x1 { 1 } else { -1 };
    let sy = if y0 < y1 { 1 } else { -1 };
    let mut err = dx + dy;

    loop {
        plot(x0, y0);

        if x0 == x1 && y0 == y1 {
            break;
        }

        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            x0 += sx;
        }
        if e2 <= dx {
            err += dx;
            y0 += sy;
        }
    }
}

/// Owned RGBA pixel buffer.
///
/// Internal format is 4 bytes per pixel in **RGBA** order, which is what the
/// PNG encoder expects. Drawing outside the buffer is silently clipped.
pub struct Canvas {
    pub data: Vec<u8>,
    pub width: usize,
    pub height: usize,
    color: [u8; 4],
    frames: usize,
}

impl Canvas {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            data: vec![0u8; width * height * 4],
            width,
            height,
            color: [0, 0, 0, 0xFF],
            frames: 0,
        }
    }

    /// Write the current draw color at (x, y) if it lies on the canvas.
    #[inline]
    fn put_pixel(&mut self, x: i32, y: i32, rgba: [u8; 4]) {
        if x < 0 || y < 0 || x as usize >= self.width || y as usize >= self.height {
            return;
        }
        let idx = (y as usize * self.width + x as usize) * 4;
        self.data[idx..idx + 4].copy_from_slice(&rgba);
    }

    /// Read the RGBA values at (x, y).
    #[inline]
    pub fn get_pixel(&self, x: usize, y: usize) -> (u8, u8, u8, u8) {
        let idx = (y * self.width + x) * 4;
        if idx + 3 < self.data.len() {
            (self.data[idx], self.data[idx + 1], self.data[idx + 2], self.data[idx + 3])
        } else {
            (0, 0, 0, 0)
        }
    }

    /// Number of `present` calls so far.
    pub fn frames_presented(&self) -> usize {
        self.frames
    }
}

impl Surface for Canvas {
    fn clear(&mut self) {
        let color = self.color;
        for px in self.data.chunks_exact_mut(4) {
            px.copy_from_slice(&color);
        }
    }

    fn set_draw_color(&mut self, color: RgbColor, alpha: u8) {
        self.color = [color.r, color.g, color.b, alpha];
    }

    fn draw_point(&mut self, x: i32, y: i32) {
        self.put_pixel(x, y, self.color);
    }

    fn draw_line(&mut self, x0: i32, y0: i32, x1: i32, y1: i32) {
        let color = self.color;
        bresenham_line(x0, y0, x1, y1, |x, y| self.put_pixel(x, y, color));
    }

    fn draw_image(&mut self, image: &LabelImage, x: i32, y: i32) -> Result<(), RenderError> {
        let right = x.saturating_add(image.width);
        let bottom = y.saturating_add(image.height);
        if right <= 0 || bottom <= 0 || x >= self.width as i32 || y >= self.height as i32 {
            return Err(RenderError::ImageOutOfBounds { x, y });
        }

        let rgba = [image.color.r, image.color.g, image.color.b, 0xFF];
        let w = image.width.max(0) as usize;
        if w == 0 {
            return Ok(());
        }
        for (i, _) in image.mask.iter().enumerate().filter(|&(_, &on)| on) {
            let px = x + (i % w) as i32;
            let py = y + (i / w) as i32;
            self.put_pixel(px, py, rgba);
        }
        Ok(())
    }

    fn present(&mut self) {
        self.frames += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ink(canvas: &Canvas, x: usize, y: usize) -> bool {
        canvas.get_pixel(x, y) == (0, 0, 0, 0xFF)
    }

    #[test]
    fn clear_fills_with_draw_color() {
        let mut canvas = Canvas::new(4, 3);
        canvas.set_draw_color(RgbColor::WHITE, 0xFF);
        canvas.clear();
        assert!(canvas.data.iter().all(|&b| b == 0xFF));
    }

    #[test]
    fn line_covers_both_endpoints() {
        let mut canvas = Canvas::new(10, 10);
        canvas.set_draw_color(RgbColor::BLACK, 0xFF);
        canvas.draw_line(1, 8, 7, 2);
        assert!(ink(&canvas, 1, 8));
        assert!(ink(&canvas, 7, 2));
        assert!(ink(&canvas, 4, 5));
    }

    #[test]
    fn zero_length_line_is_a_single_point() {
        let mut points = Vec::new();
        bresenham_line(3, 3, 3, 3, |x, y| points.push((x, y)));
        assert_eq!(points, vec![(3, 3)]);
    }

    #[test]
    fn drawing_off_canvas_is_clipped() {
        let mut canvas = Canvas::new(5, 5);
        canvas.set_draw_color(RgbColor::BLACK, 0xFF);
        canvas.draw_point(-1, 2);
        canvas.draw_point(2, 7);
        canvas.draw_line(-10, 2, 10, 2);
        assert!(ink(&canvas, 0, 2));
        assert!(ink(&canvas, 4, 2));
        assert!(!ink(&canvas, 2, 3));
    }

    #[test]
    fn image_blits_mask_in_its_color() {
        let mut canvas = Canvas::new(6, 6);
        let image = LabelImage {
            text: "x".into(),
            color: RgbColor::new(10, 20, 30),
            width: 2,
            height: 2,
            mask: vec![true, false, false, true],
        };
        canvas.draw_image(&image, 3, 4).unwrap();
        assert_eq!(canvas.get_pixel(3, 4), (10, 20, 30, 0xFF));
        assert_eq!(canvas.get_pixel(4, 5), (10, 20, 30, 0xFF));
        assert_eq!(canvas.get_pixel(4, 4), (0, 0, 0, 0));

        assert_eq!(
            canvas.draw_image(&image, -2, 0),
            Err(RenderError::ImageOutOfBounds { x: -2, y: 0 })
        );
        assert_eq!(
            canvas.draw_image(&image, 6, 0),
            Err(RenderError::ImageOutOfBounds { x: 6, y: 0 })
        );
    }

    #[test]
    fn present_counts_frames() {
        let mut canvas = Canvas::new(1, 1);
        canvas.present();
        canvas.present();
        assert_eq!(canvas.frames_presented(), 2);
    }
}
