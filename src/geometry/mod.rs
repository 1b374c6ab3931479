//! Scene geometry
//!
//! This module contains:
//! - Points, segments, rectangles and quadrilaterals in pattern units
//! - Distortion of reference squares
//! - Stripe generation and clipping for hatched fills

/// Square distortion and rhombus angle diagnostics
pub mod distortion;
/// Parallel stripe generation and segment clipping
pub mod hatching;
/// Primitive geometric types
pub mod shapes;

pub use distortion::{DistortedSquare, distorted_square, distortion_amount};
pub use shapes::{Point, Quad, Rect, Segment};
