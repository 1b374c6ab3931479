//! Striped backdrop tiles for the angled variations
//!
//! One tile is produced per nested ring of a backdrop cell. Consecutive
//! tiles alternate between the requested stripe angle and its perpendicular,
//! get wider stripes and shrink in size.

use crate::geometry::hatching::hatch_lines;
use crate::geometry::shapes::{Rect, Segment};
use crate::io::configuration::{
    FIGURE_DPI, INK, PAPER, PATTERN_SQUARE_WIDTH, RINGS_PER_CELL, TILE_LINE_WIDTH,
    TILE_LINE_WIDTH_STEP, TILE_REFERENCE_DENSITY,
};
use crate::io::error::{Result, invalid_parameter};
use crate::render::canvas::{Canvas, Viewport};
use image::RgbaImage;

/// Rendering parameters of one backdrop tile
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TileSpec {
    /// Zero-based ring index, outermost first
    pub ring: usize,
    /// Stripe angle in degrees; stripes fall to the right at `stripe_angle`
    /// below the horizontal, i.e. run at `180 - stripe_angle`
    pub stripe_angle: f64,
    /// Distance between stripes as a fraction of the tile side
    pub spacing: f64,
    /// Stripe width in points
    pub line_width: f64,
    /// Side length of the tile raster in pixels
    pub size_px: u32,
}

/// A rendered tile with the parameters that produced it
#[derive(Debug, Clone, PartialEq)]
pub struct PatternTile {
    /// Parameters used for rendering
    pub spec: TileSpec,
    /// Tile pixels
    pub image: RgbaImage,
}

/// Default raster sizes of the ring tiles, outermost first
///
/// The outer tile spans a full cell at [`FIGURE_DPI`]; each further tile
/// loses a quarter of that size.
pub fn default_tile_sizes() -> [u32; RINGS_PER_CELL] {
    let full = PATTERN_SQUARE_WIDTH * FIGURE_DPI;
    let step = full / RINGS_PER_CELL as f64;
    std::array::from_fn(|ring| (ring as f64).mul_add(-step, full).round() as u32)
}

/// Describe the tile sequence for a stripe angle without rendering it
///
/// `offsets` are calibrated for [`TILE_REFERENCE_DENSITY`]; other densities
/// scale the spacing inversely.
///
/// # Errors
///
/// Returns an error if:
/// - `density` is zero or `angle` is not finite
/// - fewer offsets than sizes are supplied
/// - an offset is not positive or a size is zero
pub fn tile_specs(
    angle: f64,
    density: u32,
    offsets: &[f64],
    sizes: &[u32],
) -> Result<Vec<TileSpec>> {
    if density == 0 {
        return Err(invalid_parameter("density", &density, &"must be positive"));
    }
    if !angle.is_finite() {
        return Err(invalid_parameter("angle", &angle, &"must be finite"));
    }
    if offsets.len() < sizes.len() {
        return Err(invalid_parameter(
            "offsets",
            &offsets.len(),
            &format!("need one offset per tile size ({})", sizes.len()),
        ));
    }

    let density_factor = f64::from(TILE_REFERENCE_DENSITY) / f64::from(density);
    let mut specs = Vec::with_capacity(sizes.len());
    let mut line_width = TILE_LINE_WIDTH;
    let mut stripe_angle = angle;

    for (ring, (&offset, &size_px)) in offsets.iter().zip(sizes).enumerate() {
        if !offset.is_finite() || offset <= 0.0 {
            return Err(invalid_parameter("offset", &offset, &"must be positive"));
        }
        if size_px == 0 {
            return Err(invalid_parameter("size", &size_px, &"must be positive"));
        }

        specs.push(TileSpec {
            ring,
            stripe_angle,
            spacing: offset * density_factor,
            line_width,
            size_px,
        });

        line_width += TILE_LINE_WIDTH_STEP;
        stripe_angle = if ring % 2 == 0 { angle + 90.0 } else { angle };
    }

    Ok(specs)
}

/// Stripe centre lines of a tile over the unit square
pub fn stripe_lines(spec: &TileSpec) -> Vec<Segment> {
    let unit = Rect::square(0.0, 0.0, 1.0);
    hatch_lines(&unit, 180.0 - spec.stripe_angle, spec.spacing)
}

/// Rasterize a single tile
///
/// # Errors
///
/// Returns an error if the raster cannot be allocated
pub fn render_tile(spec: &TileSpec) -> Result<RgbaImage> {
    let mut canvas = Canvas::new(Viewport::new(1.0, spec.size_px), FIGURE_DPI, PAPER)?;
    canvas.stroke_segments(&stripe_lines(spec), spec.line_width, INK, None);
    canvas.into_image()
}

/// Generate the ordered tile sequence for a stripe angle
///
/// # Errors
///
/// Returns an error if the parameters are invalid (see [`tile_specs`]) or a
/// tile cannot be rasterized
pub fn generate(
    angle: f64,
    density: u32,
    offsets: &[f64],
    sizes: &[u32],
) -> Result<Vec<PatternTile>> {
    tile_specs(angle, density, offsets, sizes)?
        .into_iter()
        .map(|spec| render_tile(&spec).map(|image| PatternTile { spec, image }))
        .collect()
}
