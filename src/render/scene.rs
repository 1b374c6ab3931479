//! Structural description of a stimulus frame
//!
//! A scene is computed before anything is rasterized so that two renders can
//! be compared by what they contain rather than by their pixels.

use crate::catalog::variation::{Hatch, VariationSpec};
use crate::geometry::distortion::{DistortedSquare, distorted_square, distortion_amount};
use crate::geometry::shapes::{Point, Rect};
use crate::io::configuration::{
    DISTORTED_SQUARE_COUNT, GRID_CELLS, HATCH_LINES_PER_SYMBOL, PATTERN_SQUARE_WIDTH,
    REVERSED_SQUARE_INDEX, RINGS_PER_CELL, RING_SPACING, SCENE_SIZE,
};
use crate::io::error::Result;
use crate::pattern::cache::TileKey;
use crate::pattern::tiles::{TileSpec, tile_specs};
use crate::render::compositor::RenderConfig;
use ndarray::Array2;

/// What fills one ring of a backdrop cell
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RingFill {
    /// White square covered with hatch lines
    Hatch(Hatch),
    /// Pre-rendered striped tile stretched over the ring
    Tile {
        /// Cache entry of the tile
        key: TileKey,
        /// Parameters to render the tile from on a cache miss
        tile: TileSpec,
    },
}

/// One nested square of a backdrop cell
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ring {
    /// Area covered by the ring, including the rings inside it
    pub rect: Rect,
    /// Fill of the ring
    pub fill: RingFill,
}

/// Line parameters of hatched rings
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HatchStyle {
    /// Hatch symbol repetitions
    pub density: u32,
    /// Hatch line width in points
    pub line_width: f64,
}

impl HatchStyle {
    /// Distance between neighbouring lines of `hatch`
    ///
    /// Each density step adds [`HATCH_LINES_PER_SYMBOL`] axis-aligned lines
    /// per inch; diagonal lines are spread by [`Hatch::spacing_scale`].
    pub fn spacing(&self, hatch: Hatch, units_per_inch: f64) -> f64 {
        let lines_per_inch = f64::from(self.density) * HATCH_LINES_PER_SYMBOL;
        units_per_inch / lines_per_inch * hatch.spacing_scale()
    }
}

/// Backdrop cells indexed by `[row, column]`, row zero at the bottom
#[derive(Debug, Clone, PartialEq)]
pub struct Backdrop {
    /// Rings of each cell, outermost first
    pub cells: Array2<Vec<Ring>>,
    /// Style of hatched rings
    pub hatch_style: HatchStyle,
}

impl Backdrop {
    /// Plain hatched backdrop
    ///
    /// Cells alternate the two hatches in checkerboard fashion and every
    /// ring alternates with the ring around it.
    pub fn hatched(spec: &VariationSpec) -> Self {
        let mut cells = Array2::from_elem((GRID_CELLS, GRID_CELLS), Vec::new());
        let (mut h1, mut h2) = (spec.hatch_primary, spec.hatch_secondary);

        for col in 0..GRID_CELLS {
            for row in 0..GRID_CELLS {
                let origin = Point::new(
                    col as f64 * PATTERN_SQUARE_WIDTH,
                    row as f64 * PATTERN_SQUARE_WIDTH,
                );
                let rings = nested_rects(origin)
                    .into_iter()
                    .enumerate()
                    .map(|(ring, rect)| Ring {
                        rect,
                        fill: RingFill::Hatch(if ring % 2 == 0 { h1 } else { h2 }),
                    })
                    .collect();
                if let Some(cell) = cells.get_mut([row, col]) {
                    *cell = rings;
                }
                std::mem::swap(&mut h1, &mut h2);
            }
        }

        Self {
            cells,
            hatch_style: HatchStyle {
                density: spec.density,
                line_width: spec.pattern_line_width,
            },
        }
    }

    /// Tiled backdrop for a pattern angle
    ///
    /// The first cell uses the tile set mirrored to `-angle`, and the set
    /// flips after every cell in column-major order.
    ///
    /// # Errors
    ///
    /// Returns an error if the tile parameters are invalid (see [`tile_specs`])
    pub fn tiled(
        spec: &VariationSpec,
        angle: f64,
        offsets: &[f64],
        sizes: &[u32],
    ) -> Result<Self> {
        let tile_set = |set_angle: f64| -> Result<Vec<RingFill>> {
            Ok(tile_specs(set_angle, spec.density, offsets, sizes)?
                .into_iter()
                .map(|tile| RingFill::Tile {
                    key: TileKey::new(set_angle, spec.density, &tile),
                    tile,
                })
                .collect())
        };
        let mirrored_set = tile_set(-angle)?;
        let upright_set = tile_set(angle)?;

        let mut cells = Array2::from_elem((GRID_CELLS, GRID_CELLS), Vec::new());
        let mut mirrored = true;

        for col in 0..GRID_CELLS {
            for row in 0..GRID_CELLS {
                let fills = if mirrored { &mirrored_set } else { &upright_set };
                let origin = Point::new(
                    col as f64 * PATTERN_SQUARE_WIDTH,
                    row as f64 * PATTERN_SQUARE_WIDTH,
                );
                let rings = nested_rects(origin)
                    .into_iter()
                    .zip(fills)
                    .map(|(rect, &fill)| Ring { rect, fill })
                    .collect();
                if let Some(cell) = cells.get_mut([row, col]) {
                    *cell = rings;
                }
                mirrored = !mirrored;
            }
        }

        Ok(Self {
            cells,
            hatch_style: HatchStyle {
                density: spec.density,
                line_width: spec.pattern_line_width,
            },
        })
    }

    /// Every ring of every cell in drawing order
    pub fn rings(&self) -> impl Iterator<Item = &Ring> {
        self.cells.iter().flat_map(|cell| cell.iter())
    }

    /// Distinct tiles the backdrop refers to, ordered by key
    pub fn tiles(&self) -> Vec<(TileKey, TileSpec)> {
        let mut tiles: Vec<(TileKey, TileSpec)> = self
            .rings()
            .filter_map(|ring| match ring.fill {
                RingFill::Tile { key, tile } => Some((key, tile)),
                RingFill::Hatch(_) => None,
            })
            .collect();
        tiles.sort_unstable_by_key(|(key, _)| *key);
        tiles.dedup_by_key(|(key, _)| *key);
        tiles
    }
}

/// Everything drawn in one frame
#[derive(Debug, Clone, PartialEq)]
pub struct Scene {
    /// Side length of the scene in pattern units
    pub size: f64,
    /// Background cells
    pub backdrop: Backdrop,
    /// Nested distorted squares, outermost first
    pub squares: Vec<DistortedSquare>,
    /// Centre of the fixation cross
    pub fixation: Point,
}

impl Scene {
    /// Lay out the scene of a variation at a normalized distortion
    ///
    /// # Errors
    ///
    /// Returns an error if `distortion` is outside `[0, 1]` or the tile
    /// parameters of `config` are invalid
    pub fn compose(spec: &VariationSpec, distortion: f64, config: &RenderConfig) -> Result<Self> {
        let amount = distortion_amount(distortion, config.distortion_scale)?;
        let backdrop = spec.pattern_angle.map_or_else(
            || Ok(Backdrop::hatched(spec)),
            |angle| Backdrop::tiled(spec, angle, &config.tile_offsets, &config.tile_sizes),
        )?;

        Ok(Self {
            size: SCENE_SIZE,
            backdrop,
            squares: nested_squares(amount, spec.purple_line_width),
            fixation: Point::new(SCENE_SIZE / 2.0, SCENE_SIZE / 2.0),
        })
    }
}

/// Nested distorted squares centred in the middle cell
///
/// Each square's displacement is proportional to its side; the second square
/// leans the other way.
pub fn nested_squares(amount: f64, line_width: f64) -> Vec<DistortedSquare> {
    let mut location = PATTERN_SQUARE_WIDTH + RING_SPACING / 2.0;
    let mut size = PATTERN_SQUARE_WIDTH - RING_SPACING;

    let mut squares = Vec::with_capacity(DISTORTED_SQUARE_COUNT);
    for index in 0..DISTORTED_SQUARE_COUNT {
        squares.push(distorted_square(
            Point::new(location, location),
            size,
            line_width,
            amount * size,
            index == REVERSED_SQUARE_INDEX,
        ));
        location += RING_SPACING;
        size -= RING_SPACING * 2.0;
    }
    squares
}

fn nested_rects(origin: Point) -> [Rect; RINGS_PER_CELL] {
    std::array::from_fn(|ring| {
        let inset = ring as f64 * RING_SPACING;
        Rect::square(origin.x, origin.y, PATTERN_SQUARE_WIDTH).inset(inset)
    })
}
