use palette::{Hsl, IntoColor, Srgb};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// RGB color representation for configuration and drawing
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct RgbColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl RgbColor {
    pub const BLACK: RgbColor = RgbColor { r: 0, g: 0, b: 0 };
    pub const WHITE: RgbColor = RgbColor { r: 0xFF, g: 0xFF, b: 0xFF };

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum ColorScheme {
    /// Black ink on a white sheet
    #[default]
    Paper,
    /// Chalk-white ink on a dark green board
    Chalkboard,
    /// Each radius hued by its angle
    Spectrum,
}

impl FromStr for ColorScheme {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "paper" => Ok(Self::Paper),
            "chalk" | "chalkboard" => Ok(Self::Chalkboard),
            "spectrum" | "rainbow" => Ok(Self::Spectrum),
            _ => Err(format!("Unknown color scheme: {}", s)),
        }
    }
}

impl ColorScheme {
    pub fn background(&self) -> RgbColor {
        match self {
            ColorScheme::Paper | ColorScheme::Spectrum => RgbColor::WHITE,
            ColorScheme::Chalkboard => RgbColor::new(0x1E, 0x3B, 0x2C),
        }
    }

    /// Ink used for the traced circle
    pub fn circle_color(&self) -> RgbColor {
        match self {
            ColorScheme::Paper | ColorScheme::Spectrum => RgbColor::BLACK,
            ColorScheme::Chalkboard => RgbColor::new(0xF2, 0xF2, 0xE6),
        }
    }

    /// Ink for the radius drawn at `degrees`
    pub fn line_color(&self, degrees: f64) -> RgbColor {
        match self {
            ColorScheme::Spectrum => {
                let hue = degrees.rem_euclid(360.0) as f32;
                hsl_to_rgb(hue, 0.85, 0.4)
            }
            _ => self.circle_color(),
        }
    }

    /// Color of the label text next to the radius at `degrees`
    pub fn label_color(&self, degrees: f64) -> RgbColor {
        match self {
            // Slightly darker than the line so text stays legible on white
            ColorScheme::Spectrum => {
                let hue = degrees.rem_euclid(360.0) as f32;
                hsl_to_rgb(hue, 0.9, 0.3)
            }
            _ => self.circle_color(),
        }
    }
}

fn hsl_to_rgb(h: f32, s: f32, l: f32) -> RgbColor {
    let hsl = Hsl::new(h, s, l);
    let rgb: Srgb = hsl.into_color();

    RgbColor::new(
        (rgb.red * 255.0) as u8,
        (rgb.green * 255.0) as u8,
        (rgb.blue * 255.0) as u8,
    )
}
