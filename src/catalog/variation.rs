//! Stimulus variation parameters and hatch orientation symbols

use crate::io::configuration::{
    DEFAULT_DENSITY, DEFAULT_IMAGE_SCALE, DEFAULT_PATTERN_LINE_WIDTH, DEFAULT_PURPLE_WIDTH,
};
use crate::io::error::{Result, invalid_parameter};
use std::fmt;

/// Stripe orientation of a hatched fill
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Hatch {
    /// Diagonal lines rising to the right (`/`)
    Forward,
    /// Diagonal lines falling to the right (`\`)
    Backward,
    /// Vertical lines (`|`)
    Vertical,
    /// Horizontal lines (`-`)
    Horizontal,
    /// Horizontal and vertical lines (`+`)
    Cross,
    /// Both diagonals (`x`)
    DiagonalCross,
}

impl Hatch {
    /// Parse a hatch symbol
    ///
    /// # Errors
    ///
    /// Returns an error if the character is not a supported hatch symbol
    pub fn from_symbol(symbol: char) -> Result<Self> {
        match symbol {
            '/' => Ok(Self::Forward),
            '\\' => Ok(Self::Backward),
            '|' => Ok(Self::Vertical),
            '-' => Ok(Self::Horizontal),
            '+' => Ok(Self::Cross),
            'x' => Ok(Self::DiagonalCross),
            other => Err(invalid_parameter(
                "hatch",
                &other,
                &"expected one of / \\ | - + x",
            )),
        }
    }

    /// Symbol this hatch is written as
    pub const fn symbol(self) -> char {
        match self {
            Self::Forward => '/',
            Self::Backward => '\\',
            Self::Vertical => '|',
            Self::Horizontal => '-',
            Self::Cross => '+',
            Self::DiagonalCross => 'x',
        }
    }

    /// Line directions in degrees, counter-clockwise from the x axis
    pub const fn angles(self) -> &'static [f64] {
        match self {
            Self::Forward => &[45.0],
            Self::Backward => &[135.0],
            Self::Vertical => &[90.0],
            Self::Horizontal => &[0.0],
            Self::Cross => &[0.0, 90.0],
            Self::DiagonalCross => &[45.0, 135.0],
        }
    }

    /// Line distance relative to axis-aligned hatches of the same density
    ///
    /// Diagonal hatches cross each axis every other lattice step, which puts
    /// them `sqrt(2)` times further apart.
    pub const fn spacing_scale(self) -> f64 {
        match self {
            Self::Forward | Self::Backward | Self::DiagonalCross => std::f64::consts::SQRT_2,
            Self::Vertical | Self::Horizontal | Self::Cross => 1.0,
        }
    }
}

impl fmt::Display for Hatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// Fully resolved rendering parameters of one stimulus variant
#[derive(Clone, Debug, PartialEq)]
pub struct VariationSpec {
    /// Zero-based position in the catalog
    pub id: usize,
    /// Rotation of the tiled backdrop stripes, `None` for plain hatching
    pub pattern_angle: Option<f64>,
    /// Hatch of the outermost ring in the first cell
    pub hatch_primary: Hatch,
    /// Hatch alternated with the primary one
    pub hatch_secondary: Hatch,
    /// Hatch symbol repetitions controlling line density
    pub density: u32,
    /// Outline width of the distorted squares in points
    pub purple_line_width: f64,
    /// Hatch line width in points
    pub pattern_line_width: f64,
    /// Figure size in inches that point sizes refer to
    pub image_scale: f64,
}

impl VariationSpec {
    /// Check that every numeric field is usable for rendering
    ///
    /// # Errors
    ///
    /// Returns an error naming the first field that is not positive and finite
    pub fn validate(&self) -> Result<()> {
        if self.density == 0 {
            return Err(invalid_parameter(
                "density",
                &self.density,
                &"must be positive",
            ));
        }
        for (parameter, value) in [
            ("purple_line_width", self.purple_line_width),
            ("pattern_line_width", self.pattern_line_width),
            ("image_scale", self.image_scale),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(invalid_parameter(
                    parameter,
                    &value,
                    &"must be positive and finite",
                ));
            }
        }
        if let Some(angle) = self.pattern_angle
            && !angle.is_finite()
        {
            return Err(invalid_parameter(
                "pattern_angle",
                &angle,
                &"must be finite",
            ));
        }
        Ok(())
    }
}

/// Default values every catalog entry starts from
#[derive(Clone, Debug, PartialEq)]
pub struct VariationDefaults {
    /// Default backdrop angle
    pub pattern_angle: Option<f64>,
    /// Default primary hatch
    pub hatch_primary: Hatch,
    /// Default secondary hatch
    pub hatch_secondary: Hatch,
    /// Default density
    pub density: u32,
    /// Default square outline width
    pub purple_line_width: f64,
    /// Default hatch line width
    pub pattern_line_width: f64,
    /// Default figure size
    pub image_scale: f64,
}

impl Default for VariationDefaults {
    fn default() -> Self {
        Self {
            pattern_angle: None,
            hatch_primary: Hatch::Forward,
            hatch_secondary: Hatch::Backward,
            density: DEFAULT_DENSITY,
            purple_line_width: DEFAULT_PURPLE_WIDTH,
            pattern_line_width: DEFAULT_PATTERN_LINE_WIDTH,
            image_scale: DEFAULT_IMAGE_SCALE,
        }
    }
}

/// Per-entry overrides applied on top of the defaults
///
/// Unset fields keep the default value.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct VariationOverride {
    /// Catalog identifier the override applies to
    pub id: usize,
    /// Backdrop angle override
    pub pattern_angle: Option<f64>,
    /// Primary hatch override
    pub hatch_primary: Option<Hatch>,
    /// Secondary hatch override
    pub hatch_secondary: Option<Hatch>,
    /// Density override
    pub density: Option<u32>,
    /// Square outline width override
    pub purple_line_width: Option<f64>,
    /// Hatch line width override
    pub pattern_line_width: Option<f64>,
    /// Figure size override
    pub image_scale: Option<f64>,
}

impl VariationOverride {
    /// Override that keeps every default
    pub fn new(id: usize) -> Self {
        Self {
            id,
            ..Self::default()
        }
    }

    /// Set the backdrop angle
    pub const fn with_pattern_angle(mut self, angle: f64) -> Self {
        self.pattern_angle = Some(angle);
        self
    }

    /// Set both hatch orientations
    pub const fn with_hatches(mut self, primary: Hatch, secondary: Hatch) -> Self {
        self.hatch_primary = Some(primary);
        self.hatch_secondary = Some(secondary);
        self
    }

    /// Set the hatch density
    pub const fn with_density(mut self, density: u32) -> Self {
        self.density = Some(density);
        self
    }

    /// Set the outline width of the distorted squares
    pub const fn with_purple_line_width(mut self, width: f64) -> Self {
        self.purple_line_width = Some(width);
        self
    }

    /// Set the hatch line width
    pub const fn with_pattern_line_width(mut self, width: f64) -> Self {
        self.pattern_line_width = Some(width);
        self
    }

    /// Set the figure size
    pub const fn with_image_scale(mut self, scale: f64) -> Self {
        self.image_scale = Some(scale);
        self
    }

    /// Replace fields of `spec` that this override sets
    pub fn apply_to(&self, spec: &mut VariationSpec) {
        if let Some(angle) = self.pattern_angle {
            spec.pattern_angle = Some(angle);
        }
        if let Some(hatch) = self.hatch_primary {
            spec.hatch_primary = hatch;
        }
        if let Some(hatch) = self.hatch_secondary {
            spec.hatch_secondary = hatch;
        }
        if let Some(density) = self.density {
            spec.density = density;
        }
        if let Some(width) = self.purple_line_width {
            spec.purple_line_width = width;
        }
        if let Some(width) = self.pattern_line_width {
            spec.pattern_line_width = width;
        }
        if let Some(scale) = self.image_scale {
            spec.image_scale = scale;
        }
    }
}

impl VariationDefaults {
    /// Spec for `id` holding only default values
    pub fn spec(&self, id: usize) -> VariationSpec {
        VariationSpec {
            id,
            pattern_angle: self.pattern_angle,
            hatch_primary: self.hatch_primary,
            hatch_secondary: self.hatch_secondary,
            density: self.density,
            purple_line_width: self.purple_line_width,
            pattern_line_width: self.pattern_line_width,
            image_scale: self.image_scale,
        }
    }
}
