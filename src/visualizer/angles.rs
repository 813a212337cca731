//! Canonical unit-circle angles, their labels and where the labels go.
//!
//! Angles are measured counterclockwise from the positive x-axis. Screen y
//! grows downwards, so a positive sine moves the endpoint up.

use super::Point;

/// Horizontal side of the endpoint a label sits on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Horizontal {
    /// Left edge `gap` pixels right of the endpoint
    Right(i32),
    /// Centered on the endpoint
    Centered,
    /// Right edge `gap` pixels left of the endpoint
    Left(i32),
}

/// Vertical position of a label relative to the endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Vertical {
    /// Bottom edge on the endpoint
    Above,
    /// Raised by `height / n`
    Raised(i32),
    /// Top edge on the endpoint
    Flush,
    /// Lowered by `height / n`
    Lowered(i32),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement {
    pub horizontal: Horizontal,
    pub vertical: Vertical,
}

impl Placement {
    pub const fn new(horizontal: Horizontal, vertical: Vertical) -> Self {
        Self {
            horizontal,
            vertical,
        }
    }

    /// Top-left corner for a `width` x `height` label next to `end`.
    pub fn anchor(&self, end: Point, width: i32, height: i32) -> Point {
        let x = match self.horizontal {
            Horizontal::Right(gap) => end.x + gap,
            Horizontal::Centered => end.x - width / 2,
            Horizontal::Left(gap) => end.x - gap - width,
        };
        let y = match self.vertical {
            Vertical::Above => end.y - height,
            Vertical::Raised(n) => end.y - height / n.max(1),
            Vertical::Flush => end.y,
            Vertical::Lowered(n) => end.y + height / n.max(1),
        };
        Point::new(x, y)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AngleEntry {
    pub degrees: i32,
    /// Fraction of pi followed by the exact (cos, sin) pair
    pub label: &'static str,
    pub placement: Placement,
}

const fn entry(degrees: i32, label: &'static str, horizontal: Horizontal, vertical: Vertical) -> AngleEntry {
    AngleEntry {
        degrees,
        label,
        placement: Placement::new(horizontal, vertical),
    }
}

use Horizontal::{Centered, Left, Right};
use Vertical::{Above, Flush, Lowered, Raised};

/// The seventeen labeled angles in ascending order.
///
/// Labels near an axis get a smaller vertical offset so they clear the
/// radius without running off the circle.
pub const CANONICAL_ANGLES: [AngleEntry; 17] = [
    entry(0, "0pi (1, 0)", Right(5), Above),
    entry(30, "1/6pi (sqrt(3)/2, 1/2)", Right(7), Raised(3)),
    entry(45, "1/4pi (sqrt(2)/2, sqrt(2)/2)", Right(5), Raised(2)),
    entry(60, "1/3pi (1/2, sqrt(3)/2)", Right(3), Above),
    entry(90, "1/2pi (0, 1)", Centered, Above),
    entry(120, "2/3pi (-1/2, sqrt(3)/2)", Left(3), Above),
    entry(135, "3/4pi (-sqrt(2)/2, sqrt(2)/2)", Left(5), Raised(2)),
    entry(150, "5/6pi (-sqrt(3)/2, 1/2)", Left(7), Raised(3)),
    entry(180, "1pi (-1, 0)", Left(5), Raised(2)),
    entry(210, "7/6pi (-sqrt(3)/2, -1/2)", Left(0), Flush),
    entry(225, "5/4pi (-sqrt(2)/2, -sqrt(2)/2)", Left(0), Flush),
    entry(240, "4/3pi (-1/2, -sqrt(3)/2)", Left(0), Flush),
    entry(270, "3/2pi (0, -1)", Centered, Lowered(2)),
    entry(300, "5/3pi (1/2, -sqrt(3)/2)", Right(0), Flush),
    entry(315, "7/4pi (sqrt(2)/2, -sqrt(2)/2)", Right(0), Flush),
    entry(330, "11/6pi (sqrt(3)/2, -1/2)", Right(0), Flush),
    entry(360, "2pi (1, 0)", Right(7), Lowered(2)),
];

/// Table entry for `degrees`, if it is one of the canonical angles.
/// Only whole-degree values match.
pub fn lookup(degrees: f64) -> Option<&'static AngleEntry> {
    if !degrees.is_finite() || degrees.fract() != 0.0 {
        return None;
    }
    let whole = degrees as i32;
    CANONICAL_ANGLES
        .binary_search_by_key(&whole, |e| e.degrees)
        .ok()
        .map(|i| &CANONICAL_ANGLES[i])
}

/// Point on the circle of `radius` around `center` at `degrees`.
pub fn endpoint(center: Point, degrees: f64, radius: i32) -> Point {
    let (sin, cos) = degrees.to_radians().sin_cos();
    let r = f64::from(radius);
    Point::new(
        center.x + (r * cos).round() as i32,
        center.y - (r * sin).round() as i32,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    const CENTER: Point = Point::new(400, 400);

    #[test]
    fn table_is_sorted_and_unique() {
        assert!(CANONICAL_ANGLES.windows(2).all(|w| w[0].degrees < w[1].degrees));
        assert_eq!(CANONICAL_ANGLES[0].degrees, 0);
        assert_eq!(CANONICAL_ANGLES[16].degrees, 360);
    }

    #[test]
    fn axis_labels_are_verbatim() {
        assert_eq!(lookup(0.0).unwrap().label, "0pi (1, 0)");
        assert_eq!(lookup(90.0).unwrap().label, "1/2pi (0, 1)");
        assert_eq!(lookup(180.0).unwrap().label, "1pi (-1, 0)");
        assert_eq!(lookup(270.0).unwrap().label, "3/2pi (0, -1)");
        assert_eq!(lookup(360.0).unwrap().label, "2pi (1, 0)");
    }

    #[test]
    fn non_canonical_angles_have_no_entry() {
        for degrees in [1.0, 15.0, 44.9, 45.5, 359.0, 720.0, -30.0, f64::NAN, f64::INFINITY] {
            assert!(lookup(degrees).is_none(), "{}", degrees);
        }
    }

    #[test]
    fn endpoints_match_trigonometry() {
        for entry in CANONICAL_ANGLES.iter() {
            let theta = f64::from(entry.degrees).to_radians();
            let end = endpoint(CENTER, f64::from(entry.degrees), 200);
            let ex = 400.0 + 200.0 * theta.cos();
            let ey = 400.0 - 200.0 * theta.sin();
            assert!((f64::from(end.x) - ex).abs() <= 1.0, "{}", entry.degrees);
            assert!((f64::from(end.y) - ey).abs() <= 1.0, "{}", entry.degrees);
        }
    }

    #[test]
    fn axis_endpoints_are_exact() {
        assert_eq!(endpoint(CENTER, 0.0, 200), Point::new(600, 400));
        assert_eq!(endpoint(CENTER, 90.0, 200), Point::new(400, 200));
        assert_eq!(endpoint(CENTER, 180.0, 200), Point::new(200, 400));
        assert_eq!(endpoint(CENTER, 270.0, 200), Point::new(400, 600));
        assert_eq!(endpoint(CENTER, 30.0, 200), Point::new(573, 300));
    }

    #[test]
    fn zero_radius_endpoint_is_center() {
        for entry in CANONICAL_ANGLES.iter() {
            assert_eq!(endpoint(CENTER, f64::from(entry.degrees), 0), CENTER);
        }
    }

    #[test]
    fn reference_offsets() {
        let end = Point::new(100, 100);
        let (w, h) = (60, 12);
        let at = |deg: f64| lookup(deg).unwrap().placement.anchor(end, w, h);

        assert_eq!(at(0.0), Point::new(105, 88));
        assert_eq!(at(30.0), Point::new(107, 96));
        assert_eq!(at(45.0), Point::new(105, 94));
        assert_eq!(at(90.0), Point::new(70, 88));
        assert_eq!(at(135.0), Point::new(35, 94));
        assert_eq!(at(180.0), Point::new(35, 94));
        assert_eq!(at(225.0), Point::new(40, 100));
        assert_eq!(at(270.0), Point::new(70, 106));
        assert_eq!(at(315.0), Point::new(100, 100));
        assert_eq!(at(360.0), Point::new(107, 106));
    }

    /// The label sits on the far side of the endpoint from the center:
    /// right when cos > 0, left when cos < 0, centered on the vertical axis;
    /// starting above the endpoint when sin > 0, at or below it when sin < 0.
    #[test]
    fn labels_point_away_from_center() {
        let (w, h) = (90, 12);
        for entry in CANONICAL_ANGLES.iter() {
            let theta = f64::from(entry.degrees).to_radians();
            let (sin, cos) = theta.sin_cos();
            let end = endpoint(CENTER, f64::from(entry.degrees), 200);
            let tl = entry.placement.anchor(end, w, h);

            if cos > 1e-9 {
                assert!(tl.x >= end.x, "{} should be right", entry.degrees);
            } else if cos < -1e-9 {
                assert!(tl.x + w <= end.x, "{} should be left", entry.degrees);
            } else {
                assert!(tl.x < end.x && tl.x + w > end.x, "{} should be centered", entry.degrees);
            }

            if sin > 1e-9 {
                assert!(tl.y < end.y, "{} should rise", entry.degrees);
            } else if sin < -1e-9 {
                assert!(tl.y >= end.y, "{} should hang", entry.degrees);
            }
        }
    }

    #[test]
    fn vertical_offset_shrinks_toward_the_horizontal_axis() {
        let end = Point::new(0, 0);
        let rise = |deg: f64| -lookup(deg).unwrap().placement.anchor(end, 10, 12).y;
        assert!(rise(60.0) > rise(45.0));
        assert!(rise(45.0) > rise(30.0));
        assert!(rise(120.0) > rise(135.0));
        assert!(rise(135.0) > rise(150.0));
    }
}
