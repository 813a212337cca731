use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::backend::Backend;
use ratatui::prelude::*;
use ratatui::widgets::Block;
use std::io::{self, stdout};
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

use crate::color::RgbColor;
use crate::config::Config;
use crate::renderer::{LabelImage, Pacer, RenderError, Surface, TextRenderer};
use crate::visualizer::braille::BrailleCanvas;
use crate::visualizer::{probe_font, RenderContext, Scene};

pub fn run(config: &Config) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen)?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    let result = run_app(&mut terminal, config);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn run_app<B: Backend>(terminal: &mut Terminal<B>, config: &Config) -> Result<()> {
    let mut surface = TerminalSurface::new(terminal, config)?;
    let text = CellText::new(surface.projection());
    let mut pacer = KeyPacer::default();
    let mut scene = Scene::new(config.circle());

    probe_font(&text);

    let target_fps = Duration::from_secs_f64(1.0 / 30.0);
    let mut announced = false;

    loop {
        {
            let mut ctx = RenderContext::new(
                &mut surface,
                &text,
                &mut pacer,
                config.pacing(),
                config.colors.scheme,
            );
            scene.advance(&mut ctx);
        }
        surface.take_error()?;

        if !announced && scene.is_complete() {
            announced = true;
            debug!(state = ?scene.state(), "Diagram complete");
        }

        if pacer.quit_requested() || pacer.poll_quit(target_fps)? {
            break;
        }
    }

    info!("Quit requested");
    Ok(())
}

fn is_quit_key(key: &KeyEvent) -> bool {
    matches!(
        key,
        KeyEvent {
            code: KeyCode::Char('q') | KeyCode::Esc,
            ..
        } | KeyEvent {
            code: KeyCode::Char('c'),
            modifiers: KeyModifiers::CONTROL,
            ..
        }
    )
}

/// Pacer that keeps reading the keyboard while it waits, so a quit key cuts
/// the animation short. Once quit is requested every pause returns at once.
#[derive(Debug, Default)]
pub struct KeyPacer {
    quit: bool,
}

impl KeyPacer {
    pub fn quit_requested(&self) -> bool {
        self.quit
    }

    /// Wait up to `timeout` for a key press. Returns true once quit was asked for.
    pub fn poll_quit(&mut self, timeout: Duration) -> io::Result<bool> {
        if event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                if is_quit_key(&key) {
                    self.quit = true;
                }
            }
        }
        Ok(self.quit)
    }
}

impl Pacer for KeyPacer {
    fn pause(&mut self, delay: Duration) {
        let deadline = Instant::now() + delay;
        while !self.quit {
            let remaining = deadline.saturating_duration_since(Instant::now());
            if remaining.is_zero() {
                break;
            }
            if let Err(e) = self.poll_quit(remaining) {
                warn!("Keyboard polling failed: {}", e);
                std::thread::sleep(remaining);
                break;
            }
        }
    }
}

/// Maps window pixels onto the braille dot grid, uniformly scaled and
/// centered.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projection {
    scale: f64,
    offset_x: f64,
    offset_y: f64,
}

impl Projection {
    pub fn fit(window_w: u32, window_h: u32, dots_w: usize, dots_h: usize) -> Self {
        let scale_x = dots_w as f64 / f64::from(window_w.max(1));
        let scale_y = dots_h as f64 / f64::from(window_h.max(1));
        let scale = scale_x.min(scale_y);
        Self {
            scale,
            offset_x: (dots_w as f64 - f64::from(window_w) * scale) / 2.0,
            offset_y: (dots_h as f64 - f64::from(window_h) * scale) / 2.0,
        }
    }

    pub fn to_dot(&self, x: i32, y: i32) -> (i32, i32) {
        (
            (f64::from(x) * self.scale + self.offset_x).floor() as i32,
            (f64::from(y) * self.scale + self.offset_y).floor() as i32,
        )
    }

    pub fn to_cell(&self, x: i32, y: i32) -> (i32, i32) {
        let (gx, gy) = self.to_dot(x, y);
        (gx.div_euclid(2), gy.div_euclid(4))
    }

    /// Window pixels covered by one terminal cell
    pub fn cell_size(&self) -> (f64, f64) {
        (2.0 / self.scale, 4.0 / self.scale)
    }
}

/// Text renderer for the terminal: labels are drawn as terminal text, so the
/// "image" only carries the text and its footprint in window pixels.
#[derive(Debug, Clone, Copy)]
pub struct CellText {
    cell_w: f64,
    cell_h: f64,
}

impl CellText {
    pub fn new(projection: Projection) -> Self {
        let (cell_w, cell_h) = projection.cell_size();
        Self { cell_w, cell_h }
    }
}

impl TextRenderer for CellText {
    fn render_text(&self, text: &str, color: RgbColor) -> Result<LabelImage, RenderError> {
        if text.is_empty() {
            return Err(RenderError::EmptyText);
        }
        if let Some(ch) = text.chars().find(|c| c.is_control()) {
            return Err(RenderError::UnsupportedGlyph(ch));
        }
        let len = text.chars().count() as f64;
        Ok(LabelImage {
            text: text.to_string(),
            color,
            width: (len * self.cell_w).round() as i32,
            height: self.cell_h.round() as i32,
            mask: Vec::new(),
        })
    }
}

struct TextOverlay {
    cell_x: i32,
    cell_y: i32,
    text: String,
    color: RgbColor,
}

/// Terminal-backed surface. Points and lines land on a braille canvas; labels
/// are overlaid as text. The top row is a status line.
pub struct TerminalSurface<'t, B: Backend> {
    terminal: &'t mut Terminal<B>,
    canvas: BrailleCanvas,
    projection: Projection,
    labels: Vec<TextOverlay>,
    draw_color: RgbColor,
    background: Option<RgbColor>,
    status: String,
    error: Option<io::Error>,
}

impl<'t, B: Backend> TerminalSurface<'t, B> {
    pub fn new(terminal: &'t mut Terminal<B>, config: &Config) -> io::Result<Self> {
        let size = terminal.size()?;
        let cols = size.width as usize;
        let rows = size.height.saturating_sub(1) as usize;
        let projection = Projection::fit(config.window.width, config.window.height, cols * 2, rows * 4);

        Ok(Self {
            terminal,
            canvas: BrailleCanvas::new(cols, rows),
            projection,
            labels: Vec::new(),
            draw_color: RgbColor::BLACK,
            background: None,
            status: format!(" {} | [q]uit ", config.window.title),
            error: None,
        })
    }

    pub fn projection(&self) -> Projection {
        self.projection
    }

    /// Surface the first terminal write error since the last call.
    pub fn take_error(&mut self) -> io::Result<()> {
        match self.error.take() {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}

impl<B: Backend> Surface for TerminalSurface<'_, B> {
    fn clear(&mut self) {
        self.canvas.clear();
        self.labels.clear();
        self.background = Some(self.draw_color);
    }

    // Terminal cells have no alpha channel
    fn set_draw_color(&mut self, color: RgbColor, _alpha: u8) {
        self.draw_color = color;
    }

    fn draw_point(&mut self, x: i32, y: i32) {
        let (gx, gy) = self.projection.to_dot(x, y);
        self.canvas.set(gx, gy, self.draw_color);
    }

    fn draw_line(&mut self, x0: i32, y0: i32, x1: i32, y1: i32) {
        let (gx0, gy0) = self.projection.to_dot(x0, y0);
        let (gx1, gy1) = self.projection.to_dot(x1, y1);
        self.canvas.line(gx0, gy0, gx1, gy1, self.draw_color);
    }

    fn draw_image(&mut self, image: &LabelImage, x: i32, y: i32) -> Result<(), RenderError> {
        let (cell_x, cell_y) = self.projection.to_cell(x, y);
        let (cols, rows) = self.canvas.char_size();
        let len = image.text.chars().count() as i32;
        if cell_x + len <= 0 || cell_y < 0 || cell_x >= cols as i32 || cell_y >= rows as i32 {
            return Err(RenderError::ImageOutOfBounds { x, y });
        }

        self.labels.push(TextOverlay {
            cell_x,
            cell_y,
            text: image.text.clone(),
            color: image.color,
        });
        Ok(())
    }

    fn present(&mut self) {
        let Self {
            terminal,
            canvas,
            labels,
            background,
            status,
            ..
        } = self;

        let drawn = terminal
            .draw(|frame| render_frame(frame, canvas, labels, *background, status))
            .map(|_| ());

        if let Err(e) = drawn {
            if self.error.is_none() {
                warn!("Failed to draw frame: {}", e);
                self.error = Some(e);
            }
        }
    }
}

fn render_frame(
    frame: &mut Frame,
    canvas: &BrailleCanvas,
    labels: &[TextOverlay],
    background: Option<RgbColor>,
    status: &str,
) {
    let area = frame.area();

    // Without a background the terminal's own (possibly transparent) one shows
    let bg = background.map_or(Color::Reset, |c| Color::Rgb(c.r, c.g, c.b));
    frame.render_widget(Block::default().style(Style::default().bg(bg)), area);

    render_status(frame, area, status);

    let canvas_area = Rect::new(area.x, area.y + 1, area.width, area.height.saturating_sub(1));
    canvas.render(frame, canvas_area, |cx, cy| {
        canvas.cell_color(cx, cy).map(|c| (c.r, c.g, c.b))
    });

    for label in labels {
        if label.cell_y < 0 || label.cell_y >= canvas_area.height as i32 {
            continue;
        }
        for (i, ch) in label.text.chars().enumerate() {
            let x = label.cell_x + i as i32;
            if x < 0 || x >= canvas_area.width as i32 {
                continue;
            }
            let pos = (canvas_area.x + x as u16, canvas_area.y + label.cell_y as u16);
            if let Some(cell) = frame.buffer_mut().cell_mut(pos) {
                cell.set_char(ch);
                cell.set_fg(Color::Rgb(label.color.r, label.color.g, label.color.b));
            }
        }
    }
}

fn render_status(frame: &mut Frame, area: Rect, status: &str) {
    for (i, ch) in status.chars().enumerate() {
        if i < area.width as usize {
            let cell = frame.buffer_mut().cell_mut((area.x + i as u16, area.y));
            if let Some(cell) = cell {
                cell.set_char(ch);
                cell.set_fg(Color::DarkGray);
            }
        }
    }
}
