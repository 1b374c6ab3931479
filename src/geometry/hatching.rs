//! Parallel stripe generation clipped to rectangles
//!
//! Lines are laid on a lattice anchored at the coordinate origin rather than
//! at the rectangle, so neighbouring rectangles hatched with the same
//! parameters continue each other's stripes.

use crate::geometry::shapes::{Point, Rect, Segment};

/// Generate parallel lines at `angle_degrees` spaced `spacing` apart, clipped to `rect`
///
/// Returns an empty set for a degenerate rectangle or a non-positive spacing.
pub fn hatch_lines(rect: &Rect, angle_degrees: f64, spacing: f64) -> Vec<Segment> {
    if rect.is_empty() || !spacing.is_finite() || spacing <= 0.0 {
        return Vec::new();
    }

    let angle = angle_degrees.to_radians();
    let (dir_y, dir_x) = angle.sin_cos();
    // Unit normal; stripe k satisfies normal · p = k * spacing
    let normal = Point::new(-dir_y, dir_x);

    let projections = rect.corners().map(|p| normal.x.mul_add(p.x, normal.y * p.y));
    let min_proj = projections.iter().copied().fold(f64::INFINITY, f64::min);
    let max_proj = projections.iter().copied().fold(f64::NEG_INFINITY, f64::max);

    let first = (min_proj / spacing).ceil() as i64;
    let last = (max_proj / spacing).floor() as i64;
    let reach = rect.width.hypot(rect.height);
    let center = rect.center();

    let mut lines = Vec::with_capacity((last - first + 1).max(0) as usize);
    for k in first..=last {
        let offset = k as f64 * spacing;
        // Foot of the stripe closest to the rectangle centre
        let along = normal.x.mul_add(center.x, normal.y * center.y) - offset;
        let foot = Point::new(
            normal.x.mul_add(-along, center.x),
            normal.y.mul_add(-along, center.y),
        );
        let line = Segment::new(
            Point::new(dir_x.mul_add(-reach, foot.x), dir_y.mul_add(-reach, foot.y)),
            Point::new(dir_x.mul_add(reach, foot.x), dir_y.mul_add(reach, foot.y)),
        );
        if let Some(clipped) = clip_segment(&line, rect) {
            lines.push(clipped);
        }
    }
    lines
}

/// Clip a segment to an axis-aligned rectangle (Liang-Barsky)
///
/// Returns `None` when nothing of the segment lies inside the rectangle or
/// only a single point touches it.
pub fn clip_segment(segment: &Segment, rect: &Rect) -> Option<Segment> {
    let dx = segment.end.x - segment.start.x;
    let dy = segment.end.y - segment.start.y;

    let mut t0: f64 = 0.0;
    let mut t1: f64 = 1.0;

    let checks = [
        (-dx, segment.start.x - rect.x),
        (dx, rect.max_x() - segment.start.x),
        (-dy, segment.start.y - rect.y),
        (dy, rect.max_y() - segment.start.y),
    ];

    for (p, q) in checks {
        if p == 0.0 {
            if q < 0.0 {
                return None;
            }
            continue;
        }
        let r = q / p;
        if p < 0.0 {
            t0 = t0.max(r);
        } else {
            t1 = t1.min(r);
        }
        if t0 >= t1 {
            return None;
        }
    }

    Some(Segment::new(
        Point::new(t0.mul_add(dx, segment.start.x), t0.mul_add(dy, segment.start.y)),
        Point::new(t1.mul_add(dx, segment.start.x), t1.mul_add(dy, segment.start.y)),
    ))
}
