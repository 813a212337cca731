//! Midpoint circle rasterization.
//!
//! Only the first octant is computed; the other seven come from symmetry.
//! No floating point is involved and the number of steps grows linearly
//! with the radius.

use super::{Circle, Point, RenderContext};

/// First-octant boundary walk of a circle centered on the origin.
///
/// Yields `(x, y)` with `x >= y >= 0`, starting at `(radius - 1, 0)` and
/// ending once `x < y`. A radius of zero or less yields nothing.
#[derive(Debug, Clone)]
pub struct MidpointCircle {
    radius: i32,
    x: i32,
    y: i32,
    dx: i32,
    dy: i32,
    err: i32,
}

impl MidpointCircle {
    pub fn new(radius: i32) -> Self {
        let dx = 1;
        Self {
            radius,
            x: radius - 1,
            y: 0,
            dx,
            dy: 1,
            err: dx - (radius << 1),
        }
    }
}

impl Iterator for MidpointCircle {
    type Item = (i32, i32);

    fn next(&mut self) -> Option<Self::Item> {
        if self.x < self.y {
            return None;
        }
        let current = (self.x, self.y);

        // Both branches may fire in the same step: after y advances, a
        // positive error also pulls x inwards.
        if self.err <= 0 {
            self.y += 1;
            self.err += self.dy;
            self.dy += 2;
        }
        if self.err > 0 {
            self.x -= 1;
            self.dx += 2;
            self.err += self.dx - (self.radius << 1);
        }

        Some(current)
    }
}

/// The eight points symmetric to first-octant offset `(x, y)` around `center`.
///
/// Coincident points (on the axes or the diagonal) are repeated, not merged.
pub fn octant_points(center: Point, x: i32, y: i32) -> [Point; 8] {
    let Point { x: cx, y: cy } = center;
    [
        Point::new(cx + x, cy - y),
        Point::new(cx - x, cy - y),
        Point::new(cx + x, cy + y),
        Point::new(cx - x, cy + y),
        Point::new(cx + y, cy - x),
        Point::new(cx - y, cy - x),
        Point::new(cx + y, cy + x),
        Point::new(cx - y, cy + x),
    ]
}

/// Draw the circle boundary step by step, presenting and pausing after each
/// step so the trace animates.
pub fn trace_circle(ctx: &mut RenderContext<'_>, circle: Circle) {
    if circle.radius <= 0 {
        tracing::debug!(radius = circle.radius, "Degenerate circle, nothing to trace");
        return;
    }

    for (x, y) in MidpointCircle::new(circle.radius) {
        for point in octant_points(circle.center, x, y) {
            ctx.surface.draw_point(point.x, point.y);
        }
        ctx.surface.present();
        ctx.pacer.pause(ctx.pacing.trace_step);
    }
}
