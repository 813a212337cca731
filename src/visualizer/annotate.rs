use tracing::warn;

use super::angles::{self, CANONICAL_ANGLES};
use super::{Circle, Point, RenderContext};

/// Draw the radius at `degrees` and, for canonical angles, its label.
///
/// A label that fails to render or place is skipped with a warning; the
/// radius itself is always drawn.
pub fn draw_angle(ctx: &mut RenderContext<'_>, center: Point, degrees: f64, radius: i32) {
    let end = angles::endpoint(center, degrees, radius);

    ctx.surface.set_draw_color(ctx.colors.line_color(degrees), 0xFF);
    ctx.surface.draw_line(center.x, center.y, end.x, end.y);
    ctx.surface.present();
    ctx.pacer.pause(ctx.pacing.angle_step);

    let Some(entry) = angles::lookup(degrees) else {
        return;
    };

    if let Err(e) = ctx.render_label(entry.label, ctx.colors.label_color(degrees)) {
        warn!("Skipping label for {} degrees: {}", entry.degrees, e);
        return;
    }
    let Some(image) = ctx.label.as_ref() else {
        return;
    };

    let at = entry.placement.anchor(end, image.width, image.height);
    if let Err(e) = ctx.surface.draw_image(image, at.x, at.y) {
        warn!("Skipping label for {} degrees: {}", entry.degrees, e);
        return;
    }
    ctx.surface.present();
    ctx.pacer.pause(ctx.pacing.angle_step);
}

/// Annotate every canonical angle once, in ascending order.
pub fn popular_lines(ctx: &mut RenderContext<'_>, circle: Circle) {
    for entry in CANONICAL_ANGLES.iter() {
        draw_angle(ctx, circle.center, f64::from(entry.degrees), circle.radius);
    }
}
