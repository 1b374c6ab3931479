//! Illusion interface consumed by experiment front ends
//!
//! A front end initializes an illusion once, shows its static texts and asks
//! for a new frame whenever the participant moves the distortion slider or
//! switches variation.

/// The three squares illusion on a hatched backdrop
pub mod three_squares;

use crate::io::error::Result;
use crate::render::compositor::RenderedFrame;
use std::path::Path;

pub use three_squares::ThreeSquaresIllusion;

/// A stimulus family with a fixed number of variations
pub trait Illusion {
    /// Human-readable name
    fn name(&self) -> &'static str;

    /// Participant instructions as an HTML fragment
    fn instructions(&self) -> &'static str;

    /// Yes/no question asked after each variation
    fn question(&self) -> &'static str;

    /// Number of variations
    fn variation_count(&self) -> usize;

    /// Prepare static resources below `resource_root`
    ///
    /// Calling this again with the same root reuses what is already there.
    ///
    /// # Errors
    ///
    /// Returns an error if resources cannot be created or written
    fn init(&mut self, resource_root: &Path) -> Result<()>;

    /// Render a variation at a normalized distortion in `[0, 1]`
    ///
    /// # Errors
    ///
    /// Returns an error if the variation does not exist, the distortion is
    /// out of range, or a backdrop asset is unavailable
    fn render(&mut self, variation_id: usize, distortion: f64) -> Result<RenderedFrame>;
}
