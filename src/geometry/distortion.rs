//! Distortion of reference squares into rhombus-like quadrilaterals
//!
//! A normalized slider value in `[0, 1]` maps to a signed amount in
//! `[-scale, scale]`. Forward mode moves the second and fourth vertex along
//! the diagonal, reverse mode the first and third, so the middle square of a
//! nested stack can lean against its neighbours.

use crate::geometry::shapes::{Point, Quad};
use crate::io::error::{Result, invalid_parameter};

/// A distorted square together with its drawing and diagnostic data
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DistortedSquare {
    /// Outline vertices
    pub quad: Quad,
    /// Outline width in points
    pub line_width: f64,
    /// Signed vertex displacement that produced the outline
    pub amount: f64,
    /// Whether the opposite diagonal pair was displaced
    pub reverse: bool,
    /// Enclosed angle of the resulting rhombus in degrees
    pub rhombus_angle: f64,
}

/// Map a normalized distortion to a signed displacement factor
///
/// # Errors
///
/// Returns an error if `distortion` is outside `[0, 1]` or not finite
pub fn distortion_amount(distortion: f64, scale: f64) -> Result<f64> {
    if !(0.0..=1.0).contains(&distortion) {
        return Err(invalid_parameter(
            "distortion",
            &distortion,
            &"must lie within [0, 1]",
        ));
    }
    Ok(distortion.mul_add(2.0, -1.0) * scale)
}

/// Compute the outline of a square distorted by `amount`
///
/// With `amount == 0` the result is the axis-aligned square with corners
/// `origin` and `origin + size`.
pub fn distorted_square(
    origin: Point,
    size: f64,
    line_width: f64,
    amount: f64,
    reverse: bool,
) -> DistortedSquare {
    let Point { x, y } = origin;
    let d = amount;

    let vertices = if reverse {
        [
            Point::new(x + d, y + d),
            Point::new(x, y + size),
            Point::new(x + size - d, y + size - d),
            Point::new(x + size, y),
        ]
    } else {
        [
            Point::new(x, y),
            Point::new(x + d, y + size - d),
            Point::new(x + size, y + size),
            Point::new(x + size - d, y + d),
        ]
    };
    let quad = Quad::new(vertices);

    DistortedSquare {
        quad,
        line_width,
        amount,
        reverse,
        rhombus_angle: rhombus_angle(&quad, size, reverse),
    }
}

/// Enclosed angle in degrees of a distorted square
///
/// Uses the rhombus identity `sin(A) = (d1 * d2 / 2) / side²` with `d1` the
/// displaced diagonal and `d2` the untouched one of length `size * sqrt(2)`.
pub fn rhombus_angle(quad: &Quad, size: f64, reverse: bool) -> f64 {
    let [a, b, c, d] = quad.vertices;
    let displaced = if reverse { a.distance(c) } else { b.distance(d) };
    let untouched = size * std::f64::consts::SQRT_2;

    let side_squared = displaced.mul_add(displaced, untouched * untouched) / 4.0;
    if side_squared <= 0.0 {
        return 0.0;
    }
    let area = displaced * untouched / 2.0;
    (area / side_squared).clamp(-1.0, 1.0).asin().to_degrees()
}

/// Departure of a rhombus angle from a right angle
pub fn departure_from_square(rhombus_angle: f64) -> f64 {
    (90.0 - rhombus_angle).abs()
}
