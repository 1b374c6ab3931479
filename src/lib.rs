//! Parameterized optical illusion stimuli for psychophysics experiments
//!
//! Three nested squares are drawn over a hatched or striped backdrop that makes
//! them look skewed. A normalized distortion value deforms the squares into
//! parallelograms so participants can cancel the illusion out; their settings
//! are recorded per variation in participant sessions.

#![forbid(unsafe_code)]

/// Variation parameters and the catalog resolving identifiers to them
pub mod catalog;
/// Scene geometry: points, rectangles, distorted squares and hatch lines
pub mod geometry;
/// Illusion interface used by experiment front ends
pub mod illusion;
/// Input/output operations, configuration and error handling
pub mod io;
/// Backdrop tile generation and caching
pub mod pattern;
/// Scene layout, rasterization and frame compositing
pub mod render;

pub use io::error::{Result, StimulusError};
