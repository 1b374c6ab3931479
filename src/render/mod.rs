//! Frame rendering
//!
//! This module contains:
//! - The raster canvas mapping pattern units to pixels
//! - Structural scene layout (backdrop cells, distorted squares, fixation)
//! - The compositor turning a variation and distortion into a frame

/// Raster canvas
pub mod canvas;
/// Frame compositing
pub mod compositor;
/// Scene layout
pub mod scene;

pub use compositor::{Compositor, RenderConfig, RenderedFrame};
pub use scene::{Backdrop, Scene};
