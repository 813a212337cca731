//! Headless mode: draw the finished diagram without pacing and save it as PNG.

use anyhow::{Context, Result};
use std::fs::File;
use std::io::{self, BufWriter};
use tracing::{debug, info};

use crate::config::Config;
use crate::renderer::{BitmapFont, Canvas, NoDelay};
use crate::visualizer::{probe_font, Pacing, RenderContext, Scene};

pub fn run(config: &Config) -> Result<()> {
    let path = &config.display.snapshot_path;
    let canvas = render(config);

    let file = File::create(path).with_context(|| format!("Failed to create {}", path.display()))?;
    write_png(BufWriter::new(file), &canvas)
        .with_context(|| format!("Failed to encode {}", path.display()))?;

    info!("Wrote {}x{} diagram to {}", canvas.width, canvas.height, path.display());
    Ok(())
}

/// Run the whole scene onto a fresh canvas at window resolution.
pub fn render(config: &Config) -> Canvas {
    let mut canvas = Canvas::new(config.window.width as usize, config.window.height as usize);
    let font = BitmapFont::new(config.label.font_scale);
    let mut pacer = NoDelay;
    let mut scene = Scene::new(config.circle());

    probe_font(&font);

    {
        let mut ctx = RenderContext::new(
            &mut canvas,
            &font,
            &mut pacer,
            Pacing::NONE,
            config.colors.scheme,
        );
        scene.advance(&mut ctx);
    }

    debug!(frames = canvas.frames_presented(), "Snapshot rendered");
    canvas
}

fn write_png<W: io::Write>(w: W, canvas: &Canvas) -> Result<(), png::EncodingError> {
    let mut encoder = png::Encoder::new(w, canvas.width as u32, canvas.height as u32);
    encoder.set_color(png::ColorType::Rgba);
    encoder.set_depth(png::BitDepth::Eight);
    let mut writer = encoder.write_header()?;
    writer.write_image_data(&canvas.data)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::ColorScheme;

    const PNG_SIGNATURE: [u8; 8] = [137, 80, 78, 71, 13, 10, 26, 10];

    #[test]
    fn chalkboard_snapshot_uses_scheme_colors() {
        let mut config = Config::default();
        config.colors.scheme = ColorScheme::Chalkboard;
        let canvas = render(&config);

        let bg = ColorScheme::Chalkboard.background();
        let ink = ColorScheme::Chalkboard.circle_color();
        assert_eq!(canvas.get_pixel(5, 5), (bg.r, bg.g, bg.b, 0xFF));
        assert_eq!(canvas.get_pixel(599, 400), (ink.r, ink.g, ink.b, 0xFF));
    }

    #[test]
    fn degenerate_radius_still_renders() {
        let mut config = Config::default();
        config.circle.radius = 0;
        let canvas = render(&config);
        // No circle: only zero-length radii at the center, then the labels
        assert_eq!(canvas.get_pixel(400, 400), (0, 0, 0, 0xFF));
        assert_eq!(canvas.get_pixel(400, 201), (0xFF, 0xFF, 0xFF, 0xFF));
        assert_eq!(canvas.frames_presented(), 17 + 17 + 1);
    }

    #[test]
    fn encodes_png() {
        let mut config = Config::default();
        config.window.width = 120;
        config.window.height = 100;
        config.circle.radius = 40;
        let canvas = render(&config);

        let mut bytes = Vec::new();
        write_png(&mut bytes, &canvas).unwrap();
        assert_eq!(bytes[..8], PNG_SIGNATURE);
    }

    #[test]
    fn run_writes_file() {
        let mut config = Config::default();
        config.window.width = 64;
        config.window.height = 64;
        config.circle.radius = 20;
        config.display.snapshot_path =
            std::env::temp_dir().join(format!("unitcircle-test-{}.png", std::process::id()));

        run(&config).unwrap();
        let bytes = std::fs::read(&config.display.snapshot_path).unwrap();
        std::fs::remove_file(&config.display.snapshot_path).ok();
        assert_eq!(bytes[..8], PNG_SIGNATURE);
    }
}
