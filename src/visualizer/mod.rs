pub mod angles;
pub mod annotate;
pub mod braille;
pub mod circle;

pub use annotate::{draw_angle, popular_lines};
pub use circle::trace_circle;

use std::time::Duration;
use tracing::{debug, warn};

use crate::color::{ColorScheme, RgbColor};
use crate::renderer::{LabelImage, Pacer, RenderError, Surface, TextRenderer};

/// Sentence rendered once at startup to check the font works
pub const FONT_PROBE_TEXT: &str = "The caffeinated mathematician jumps over a lazy pack of foxes.";

/// Screen-space pixel position, y growing downwards
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Circle {
    pub center: Point,
    pub radius: i32,
}

impl Circle {
    /// Circle of `radius` centered in a `width` x `height` window.
    pub fn centered_in(width: u32, height: u32, radius: i32) -> Self {
        Self {
            center: Point::new((width / 2) as i32, (height / 2) as i32),
            radius,
        }
    }
}

/// Delays between visible animation steps
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pacing {
    /// After each circle-tracing step
    pub trace_step: Duration,
    /// After each radius and after each label
    pub angle_step: Duration,
}

impl Pacing {
    pub const NONE: Pacing = Pacing {
        trace_step: Duration::ZERO,
        angle_step: Duration::ZERO,
    };
}

/// Everything the tracer and annotator draw with.
///
/// Owns the single label slot: rendering a new label releases the previous
/// image before the new one is stored.
pub struct RenderContext<'a> {
    pub surface: &'a mut dyn Surface,
    pub text: &'a dyn TextRenderer,
    pub pacer: &'a mut dyn Pacer,
    pub pacing: Pacing,
    pub colors: ColorScheme,
    label: Option<LabelImage>,
}

impl<'a> RenderContext<'a> {
    pub fn new(
        surface: &'a mut dyn Surface,
        text: &'a dyn TextRenderer,
        pacer: &'a mut dyn Pacer,
        pacing: Pacing,
        colors: ColorScheme,
    ) -> Self {
        Self {
            surface,
            text,
            pacer,
            pacing,
            colors,
            label: None,
        }
    }

    /// The most recently rendered label, if any.
    pub fn label(&self) -> Option<&LabelImage> {
        self.label.as_ref()
    }

    /// Render `text` into the label slot, replacing what was there.
    pub(crate) fn render_label(&mut self, text: &str, color: RgbColor) -> Result<(), RenderError> {
        self.label = None;
        self.label = Some(self.text.render_text(text, color)?);
        Ok(())
    }
}

/// One-shot progress flags for the scene; never reset during a run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunState {
    pub circle_drawn: bool,
    pub lines_drawn: bool,
}

/// Traces the circle once, annotates the canonical angles once, then only
/// presents.
pub struct Scene {
    circle: Circle,
    state: RunState,
}

impl Scene {
    pub fn new(circle: Circle) -> Self {
        Self {
            circle,
            state: RunState::default(),
        }
    }

    pub fn state(&self) -> RunState {
        self.state
    }

    pub fn is_complete(&self) -> bool {
        self.state.circle_drawn && self.state.lines_drawn
    }

    pub fn advance(&mut self, ctx: &mut RenderContext<'_>) {
        if !self.state.circle_drawn {
            ctx.surface.set_draw_color(ctx.colors.background(), 0xFF);
            ctx.surface.clear();
            ctx.surface.set_draw_color(ctx.colors.circle_color(), 0xFF);

            trace_circle(ctx, self.circle);
            self.state.circle_drawn = true;
            debug!("Circle traced");
        }

        if !self.state.lines_drawn {
            popular_lines(ctx, self.circle);
            self.state.lines_drawn = true;
            debug!("Canonical angles annotated");
        }

        ctx.surface.present();
    }
}

/// Render the probe sentence once. Returns false (after logging) when the
/// font cannot render it; labels will then be skipped individually.
pub fn probe_font(text: &dyn TextRenderer) -> bool {
    match text.render_text(FONT_PROBE_TEXT, RgbColor::BLACK) {
        Ok(_) => true,
        Err(e) => {
            warn!("Font probe failed, labels may be missing: {}", e);
            false
        }
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    pub enum Call {
        Clear,
        Color(RgbColor),
        Point(i32, i32),
        Line(i32, i32, i32, i32),
        Image { text: String, x: i32, y: i32 },
        Present,
    }

    /// Surface that records every call
    #[derive(Default)]
    pub struct RecordingSurface {
        pub calls: Vec<Call>,
    }

    impl RecordingSurface {
        pub fn points(&self) -> Vec<(i32, i32)> {
            self.calls
                .iter()
                .filter_map(|c| match c {
                    Call::Point(x, y) => Some((*x, *y)),
                    _ => None,
                })
                .collect()
        }

        pub fn lines(&self) -> Vec<(i32, i32, i32, i32)> {
            self.calls
                .iter()
                .filter_map(|c| match c {
                    Call::Line(x0, y0, x1, y1) => Some((*x0, *y0, *x1, *y1)),
                    _ => None,
                })
                .collect()
        }

        pub fn images(&self) -> Vec<(String, i32, i32)> {
            self.calls
                .iter()
                .filter_map(|c| match c {
                    Call::Image { text, x, y } => Some((text.clone(), *x, *y)),
                    _ => None,
                })
                .collect()
        }

        pub fn presents(&self) -> usize {
            self.calls.iter().filter(|c| **c == Call::Present).count()
        }
    }

    impl Surface for RecordingSurface {
        fn clear(&mut self) {
            self.calls.push(Call::Clear);
        }

        fn set_draw_color(&mut self, color: RgbColor, _alpha: u8) {
            self.calls.push(Call::Color(color));
        }

        fn draw_point(&mut self, x: i32, y: i32) {
            self.calls.push(Call::Point(x, y));
        }

        fn draw_line(&mut self, x0: i32, y0: i32, x1: i32, y1: i32) {
            self.calls.push(Call::Line(x0, y0, x1, y1));
        }

        fn draw_image(&mut self, image: &LabelImage, x: i32, y: i32) -> Result<(), RenderError> {
            self.calls.push(Call::Image {
                text: image.text.clone(),
                x,
                y,
            });
            Ok(())
        }

        fn present(&mut self) {
            self.calls.push(Call::Present);
        }
    }

    /// Fixed-metrics text renderer: 6px per char, 10px tall
    #[derive(Default)]
    pub struct FixedFont {
        pub broken: bool,
    }

    pub const CHAR_W: i32 = 6;
    pub const CHAR_H: i32 = 10;

    impl TextRenderer for FixedFont {
        fn render_text(&self, text: &str, color: RgbColor) -> Result<LabelImage, RenderError> {
            if self.broken {
                return Err(RenderError::UnsupportedGlyph('?'));
            }
            Ok(LabelImage {
                text: text.to_string(),
                color,
                width: text.chars().count() as i32 * CHAR_W,
                height: CHAR_H,
                mask: Vec::new(),
            })
        }
    }

    #[derive(Default)]
    pub struct RecordingPacer {
        pub pauses: Vec<Duration>,
    }

    impl Pacer for RecordingPacer {
        fn pause(&mut self, delay: Duration) {
            self.pauses.push(delay);
        }
    }

    pub const TEST_PACING: Pacing = Pacing {
        trace_step: Duration::from_millis(25),
        angle_step: Duration::from_millis(50),
    };
}
