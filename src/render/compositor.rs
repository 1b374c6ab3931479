//! Frame compositing from catalog parameters, tiles and distorted squares

use crate::catalog::table::Catalog;
use crate::catalog::variation::{Hatch, VariationSpec};
use crate::geometry::hatching::hatch_lines;
use crate::geometry::shapes::{Point, Segment};
use crate::io::configuration::{
    DISTORTION_SCALE, FIXATION_LINE_WIDTH, FIXATION_RED, FIXATION_SIZE, FRAME_SIZE, INK, PAPER,
    PURPLE, RINGS_PER_CELL, TILE_OFFSETS,
};
use crate::io::error::{Result, StimulusError};
use crate::io::image::save_png;
use crate::pattern::cache::{PatternCache, TileKey};
use crate::pattern::tiles::{default_tile_sizes, tile_specs};
use crate::render::canvas::{Canvas, Viewport};
use crate::render::scene::{Backdrop, Ring, RingFill, Scene};
use image::RgbaImage;
use std::path::Path;

/// Rendering parameters shared by every variation
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RenderConfig {
    /// Side length of the output frame in pixels
    pub frame_size: u32,
    /// Maximum signed distortion relative to the square side
    pub distortion_scale: f64,
    /// Stripe spacing of the ring tiles
    pub tile_offsets: [f64; RINGS_PER_CELL],
    /// Raster size of the ring tiles
    pub tile_sizes: [u32; RINGS_PER_CELL],
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            frame_size: FRAME_SIZE,
            distortion_scale: DISTORTION_SCALE,
            tile_offsets: TILE_OFFSETS,
            tile_sizes: default_tile_sizes(),
        }
    }
}

/// A composed stimulus ready for display
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedFrame {
    /// Variation the frame shows
    pub variation_id: usize,
    /// Normalized distortion it was rendered at
    pub distortion: f64,
    /// Structural content of the frame
    pub scene: Scene,
    /// Frame pixels
    pub image: RgbaImage,
}

impl RenderedFrame {
    /// Enclosed angle of the outermost square, for diagnostics
    pub fn rhombus_angle(&self) -> Option<f64> {
        self.scene.squares.first().map(|square| square.rhombus_angle)
    }

    /// Write the frame as PNG
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written
    pub fn save(&self, path: &Path) -> Result<()> {
        save_png(&self.image, path)
    }
}

/// Renders catalog variations into frames
pub struct Compositor {
    catalog: Catalog,
    cache: PatternCache,
    config: RenderConfig,
}

impl Compositor {
    /// Create a compositor over a catalog and tile cache
    pub const fn new(catalog: Catalog, cache: PatternCache, config: RenderConfig) -> Self {
        Self {
            catalog,
            cache,
            config,
        }
    }

    /// Catalog of variations
    pub const fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Tile cache
    pub const fn cache(&self) -> &PatternCache {
        &self.cache
    }

    /// Mutable tile cache
    pub const fn cache_mut(&mut self) -> &mut PatternCache {
        &mut self.cache
    }

    /// Rendering parameters
    pub const fn config(&self) -> &RenderConfig {
        &self.config
    }

    /// Make sure every tile of the set drawn at `angle` is available
    ///
    /// # Errors
    ///
    /// Returns an error if a tile is missing and cannot be generated
    pub fn prepare_tile_set(&mut self, angle: f64, density: u32) -> Result<()> {
        let specs = tile_specs(
            angle,
            density,
            &self.config.tile_offsets,
            &self.config.tile_sizes,
        )?;
        for spec in &specs {
            let key = TileKey::new(angle, density, spec);
            self.cache.get_or_generate(key, spec)?;
        }
        Ok(())
    }

    /// Tile sets a variation needs: `(angle, density)` for both mirror images
    pub fn tile_sets(spec: &VariationSpec) -> Vec<(f64, u32)> {
        spec.pattern_angle
            .map(|angle| vec![(angle, spec.density), (-angle, spec.density)])
            .unwrap_or_default()
    }

    /// Render a variation at a normalized distortion
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `variation_id` is outside the catalog (`NotFound`)
    /// - `distortion` is outside `[0, 1]` (`InvalidParameter`)
    /// - a backdrop tile is missing and may not be generated (`MissingAsset`)
    pub fn render(&mut self, variation_id: usize, distortion: f64) -> Result<RenderedFrame> {
        let spec = self.catalog.resolve(variation_id)?.clone();
        let scene = Scene::compose(&spec, distortion, &self.config)?;

        for (key, tile) in scene.backdrop.tiles() {
            self.cache.get_or_generate(key, &tile)?;
        }

        let viewport = Viewport::new(scene.size, self.config.frame_size);
        let dpi = f64::from(self.config.frame_size) / spec.image_scale;
        let mut canvas = Canvas::new(viewport, dpi, PAPER)?;

        self.paint_backdrop(&mut canvas, &scene.backdrop, spec.image_scale)?;

        for square in &scene.squares {
            canvas.stroke_quad(&square.quad, square.line_width, PURPLE);
        }

        let arm = Self::points_to_units(&canvas, FIXATION_SIZE / 2.0);
        let Point { x, y } = scene.fixation;
        let cross = [
            Segment::new(Point::new(x - arm, y), Point::new(x + arm, y)),
            Segment::new(Point::new(x, y - arm), Point::new(x, y + arm)),
        ];
        canvas.stroke_segments(&cross, FIXATION_LINE_WIDTH, FIXATION_RED, None);

        Ok(RenderedFrame {
            variation_id,
            distortion,
            scene,
            image: canvas.into_image()?,
        })
    }

    fn paint_backdrop(
        &self,
        canvas: &mut Canvas,
        backdrop: &Backdrop,
        image_scale: f64,
    ) -> Result<()> {
        // Hatch lattice spacing follows the physical figure size
        let units_per_inch = canvas.viewport().world_size / image_scale;

        for ring in backdrop.rings() {
            match ring.fill {
                RingFill::Hatch(hatch) => {
                    let spacing = backdrop.hatch_style.spacing(hatch, units_per_inch);
                    let line_width = backdrop.hatch_style.line_width;
                    Self::paint_hatched_ring(canvas, ring, hatch, spacing, line_width);
                }
                RingFill::Tile { key, .. } => {
                    let tile = self.cache.get(&key).ok_or_else(|| {
                        let path = self.cache.tile_path(&key);
                        StimulusError::MissingAsset {
                            path: path.unwrap_or_else(|| key.file_name().into()),
                        }
                    })?;
                    canvas.draw_image(&ring.rect, tile)?;
                }
            }
        }
        Ok(())
    }

    fn paint_hatched_ring(
        canvas: &mut Canvas,
        ring: &Ring,
        hatch: Hatch,
        spacing: f64,
        line_width: f64,
    ) {
        canvas.fill_rect(&ring.rect, PAPER);
        for &angle in hatch.angles() {
            let lines = hatch_lines(&ring.rect, angle, spacing);
            canvas.stroke_segments(&lines, line_width, INK, Some(&ring.rect));
        }
    }

    fn points_to_units(canvas: &Canvas, points: f64) -> f64 {
        f64::from(canvas.points_to_pixels(points)) / canvas.viewport().scale()
    }
}
