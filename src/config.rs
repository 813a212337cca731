use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::warn;

use crate::color::ColorScheme;
use crate::display::DisplayMode;
use crate::visualizer::{Circle, Pacing};

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    pub display: DisplayConfig,
    pub window: WindowConfig,
    pub circle: CircleConfig,
    pub animation: AnimationConfig,
    pub colors: ColorConfig,
    pub label: LabelConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DisplayConfig {
    pub mode: DisplayMode,
    /// Where snapshot mode writes the finished diagram
    pub snapshot_path: PathBuf,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            mode: DisplayMode::Terminal,
            snapshot_path: PathBuf::from("unitcircle.png"),
        }
    }
}

/// Logical drawing area. The circle is centered in it; the terminal
/// backend scales it to fit.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct WindowConfig {
    pub width: u32,
    pub height: u32,
    pub title: String,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: 800,
            height: 800,
            title: "Unit Circle Fun!".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct CircleConfig {
    pub radius: i32,
}

impl Default for CircleConfig {
    fn default() -> Self {
        Self { radius: 200 }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AnimationConfig {
    /// Pause after each circle-tracing step, in milliseconds
    pub trace_step_ms: u64,
    /// Pause after each radius and each label, in milliseconds
    pub angle_step_ms: u64,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            trace_step_ms: 25,
            angle_step_ms: 50,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ColorConfig {
    pub scheme: ColorScheme,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct LabelConfig {
    /// Integer scale of the 8x8 bitmap font in snapshot mode
    pub font_scale: usize,
}

impl Default for LabelConfig {
    fn default() -> Self {
        Self { font_scale: 1 }
    }
}

impl Config {
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config at {}", path.display()))?;
        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config at {}", path.display()))?;
        Ok(config)
    }

    /// Get the default XDG config path (~/.config/unitcircle/config.toml)
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("unitcircle").join("config.toml"))
    }

    /// Load config from the default XDG path if it exists
    /// Returns None if file doesn't exist, logs warning on parse errors
    pub fn load_from_default_path() -> Option<Self> {
        let path = Self::default_path()?;
        if path.exists() {
            match Self::load(&path) {
                Ok(config) => Some(config),
                Err(e) => {
                    warn!("{:#}. Using defaults.", e);
                    None
                }
            }
        } else {
            None
        }
    }

    /// Initialize default config file at XDG path, returns the path
    pub fn init_default_config() -> Result<PathBuf> {
        let path = Self::default_path()
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        std::fs::write(&path, Self::generate_config_template())
            .with_context(|| format!("Failed to write {}", path.display()))?;

        Ok(path)
    }

    /// Generate a commented TOML config template
    pub fn generate_config_template() -> String {
        r#"# unitcircle configuration
# This file is auto-generated. Edit as needed.

[display]
# Display mode: "terminal" or "snapshot"
mode = "terminal"
# PNG written by snapshot mode
snapshot_path = "unitcircle.png"

[window]
# Logical drawing area in pixels; the circle is centered in it
width = 800
height = 800
title = "Unit Circle Fun!"

[circle]
# Radius in pixels
radius = 200

[animation]
# Pause after each circle-tracing step (ms)
trace_step_ms = 25
# Pause after each radius and each label (ms)
angle_step_ms = 50

[colors]
# Color scheme: "paper", "chalkboard", "spectrum"
scheme = "paper"

[label]
# Bitmap font scale for snapshot mode
font_scale = 1
"#
        .to_string()
    }

    /// Merge CLI arguments into config (CLI takes priority)
    pub fn merge_args(&mut self, args: &crate::Args) {
        if let Some(mode) = args.mode {
            self.display.mode = mode;
        }
        if let Some(ref output) = args.output {
            self.display.snapshot_path = output.clone();
        }
        if let Some(radius) = args.radius {
            self.circle.radius = radius;
        }
        if let Some(ms) = args.trace_delay {
            self.animation.trace_step_ms = ms;
        }
        if let Some(ms) = args.angle_delay {
            self.animation.angle_step_ms = ms;
        }
        if let Some(scheme) = args.colors {
            self.colors.scheme = scheme;
        }
    }

    /// Warn about settings that make for a degenerate or clipped diagram.
    /// Nothing here is fatal.
    pub fn validate(&self) {
        if self.circle.radius <= 0 {
            warn!(
                "Circle radius {} is not positive; only the radii will be drawn",
                self.circle.radius
            );
        }
        let fits = self.window.width.min(self.window.height) / 2;
        if self.circle.radius > 0 && self.circle.radius as u32 > fits {
            warn!(
                "Circle radius {} does not fit a {}x{} window",
                self.circle.radius, self.window.width, self.window.height
            );
        }
    }

    pub fn circle(&self) -> Circle {
        Circle::centered_in(self.window.width, self.window.height, self.circle.radius)
    }

    pub fn pacing(&self) -> Pacing {
        Pacing {
            trace_step: Duration::from_millis(self.animation.trace_step_ms),
            angle_step: Duration::from_millis(self.animation.angle_step_ms),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::visualizer::Point;
    use clap::Parser;

    #[test]
    fn template_parses_to_defaults() {
        let parsed: Config = toml::from_str(&Config::generate_config_template()).unwrap();
        assert_eq!(parsed, Config::default());
    }

    #[test]
    fn missing_sections_fall_back_to_defaults() {
        let parsed: Config = toml::from_str("[circle]\nradius = 120\n").unwrap();
        assert_eq!(parsed.circle.radius, 120);
        assert_eq!(parsed.window, WindowConfig::default());
        assert_eq!(parsed.animation.trace_step_ms, 25);
    }

    #[test]
    fn unknown_scheme_is_rejected() {
        assert!(toml::from_str::<Config>("[colors]\nscheme = \"neon\"\n").is_err());
    }

    #[test]
    fn circle_and_pacing_derive_from_config() {
        let config = Config::default();
        let circle = config.circle();
        assert_eq!(circle.center, Point::new(400, 400));
        assert_eq!(circle.radius, 200);
        assert_eq!(config.pacing().trace_step, Duration::from_millis(25));
        assert_eq!(config.pacing().angle_step, Duration::from_millis(50));
    }

    #[test]
    fn cli_overrides_win() {
        let args = crate::Args::parse_from([
            "unitcircle",
            "--mode",
            "snapshot",
            "--radius",
            "150",
            "--trace-delay",
            "0",
            "--colors",
            "chalkboard",
            "--output",
            "out.png",
        ]);
        let mut config = Config::default();
        config.merge_args(&args);

        assert_eq!(config.display.mode, DisplayMode::Snapshot);
        assert_eq!(config.display.snapshot_path, PathBuf::from("out.png"));
        assert_eq!(config.circle.radius, 150);
        assert_eq!(config.animation.trace_step_ms, 0);
        // Not given on the command line
        assert_eq!(config.animation.angle_step_ms, 50);
        assert_eq!(config.colors.scheme, ColorScheme::Chalkboard);
    }

    #[test]
    fn load_reports_missing_file() {
        let err = Config::load(Path::new("/nonexistent/unitcircle.toml")).unwrap_err();
        assert!(err.to_string().contains("Failed to read config"));
    }
}
