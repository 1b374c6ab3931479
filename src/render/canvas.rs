//! Anti-aliased drawing surface mapping pattern units to pixels

use crate::geometry::shapes::{Point, Quad, Rect, Segment};
use crate::io::configuration::POINTS_PER_INCH;
use crate::io::error::{Result, render_error};
use image::RgbaImage;
use image::imageops::FilterType;
use tiny_skia::{
    FillRule, IntSize, LineCap, Mask, Paint, Path, PathBuilder, Pixmap, PixmapPaint, Stroke,
    Transform,
};

/// Square mapping from a world extent to a pixel raster
///
/// World coordinates have the y axis pointing up; pixel rows grow downwards.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    /// Side length of the visible world square
    pub world_size: f64,
    /// Side length of the raster in pixels
    pub pixels: u32,
}

/// Pixel-aligned rectangle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PixelRect {
    /// Left column
    pub x: i32,
    /// Top row
    pub y: i32,
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
}

impl Viewport {
    /// Create a viewport
    pub const fn new(world_size: f64, pixels: u32) -> Self {
        Self { world_size, pixels }
    }

    /// Pixels per world unit
    pub fn scale(&self) -> f64 {
        f64::from(self.pixels) / self.world_size
    }

    /// Map a world point to pixel coordinates
    pub fn to_pixel(&self, point: Point) -> (f32, f32) {
        let scale = self.scale();
        (
            (point.x * scale) as f32,
            ((self.world_size - point.y) * scale) as f32,
        )
    }

    /// Snap a world rectangle to whole pixels
    pub fn pixel_rect(&self, rect: &Rect) -> PixelRect {
        let scale = self.scale();
        let left = (rect.x * scale).round() as i32;
        let right = (rect.max_x() * scale).round() as i32;
        let top = ((self.world_size - rect.max_y()) * scale).round() as i32;
        let bottom = ((self.world_size - rect.y) * scale).round() as i32;
        PixelRect {
            x: left,
            y: top,
            width: (right - left).max(0) as u32,
            height: (bottom - top).max(0) as u32,
        }
    }
}

/// Raster surface with world-unit drawing operations
pub struct Canvas {
    pixmap: Pixmap,
    viewport: Viewport,
    px_per_point: f64,
}

impl Canvas {
    /// Create a canvas filled with `background`
    ///
    /// `dpi` is the resolution point sizes are converted at.
    ///
    /// # Errors
    ///
    /// Returns an error if the raster cannot be allocated (zero size)
    pub fn new(viewport: Viewport, dpi: f64, background: [u8; 4]) -> Result<Self> {
        let mut pixmap = Pixmap::new(viewport.pixels, viewport.pixels)
            .ok_or_else(|| render_error("canvas allocation", &"raster must not be empty"))?;
        let [r, g, b, a] = background;
        pixmap.fill(tiny_skia::Color::from_rgba8(r, g, b, a));
        Ok(Self {
            pixmap,
            viewport,
            px_per_point: dpi / POINTS_PER_INCH,
        })
    }

    /// Viewport used by this canvas
    pub const fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    /// Convert a width in points to pixels
    pub fn points_to_pixels(&self, points: f64) -> f32 {
        (points * self.px_per_point) as f32
    }

    /// Fill a world rectangle with a solid colour
    pub fn fill_rect(&mut self, rect: &Rect, color: [u8; 4]) {
        if let Some(path) = self.polygon_path(&rect.corners()) {
            let paint = solid_paint(color);
            self.pixmap
                .fill_path(&path, &paint, FillRule::Winding, Transform::identity(), None);
        }
    }

    /// Stroke segments, keeping ink inside `clip` when given
    pub fn stroke_segments(
        &mut self,
        segments: &[Segment],
        width_points: f64,
        color: [u8; 4],
        clip: Option<&Rect>,
    ) {
        let mut builder = PathBuilder::new();
        for segment in segments {
            let (x0, y0) = self.viewport.to_pixel(segment.start);
            let (x1, y1) = self.viewport.to_pixel(segment.end);
            builder.move_to(x0, y0);
            builder.line_to(x1, y1);
        }
        let Some(path) = builder.finish() else {
            return;
        };

        let mask = clip.and_then(|rect| self.clip_mask(rect));
        let stroke = Stroke {
            width: self.points_to_pixels(width_points),
            line_cap: LineCap::Butt,
            ..Stroke::default()
        };
        self.pixmap.stroke_path(
            &path,
            &solid_paint(color),
            &stroke,
            Transform::identity(),
            mask.as_ref(),
        );
    }

    /// Stroke the closed outline of a quadrilateral
    pub fn stroke_quad(&mut self, quad: &Quad, width_points: f64, color: [u8; 4]) {
        if let Some(path) = self.polygon_path(&quad.vertices) {
            let stroke = Stroke {
                width: self.points_to_pixels(width_points),
                ..Stroke::default()
            };
            self.pixmap.stroke_path(
                &path,
                &solid_paint(color),
                &stroke,
                Transform::identity(),
                None,
            );
        }
    }

    /// Draw an opaque image stretched over a world rectangle
    ///
    /// # Errors
    ///
    /// Returns an error if the resized image cannot be wrapped as a raster
    pub fn draw_image(&mut self, rect: &Rect, image: &RgbaImage) -> Result<()> {
        let target = self.viewport.pixel_rect(rect);
        if target.width == 0 || target.height == 0 {
            return Ok(());
        }

        let resized =
            image::imageops::resize(image, target.width, target.height, FilterType::Triangle);
        let size = IntSize::from_wh(target.width, target.height)
            .ok_or_else(|| render_error("image placement", &"empty target"))?;
        let mut data = resized.into_raw();
        premultiply(&mut data);
        let tile = Pixmap::from_vec(data, size)
            .ok_or_else(|| render_error("image placement", &"buffer size mismatch"))?;

        self.pixmap.draw_pixmap(
            target.x,
            target.y,
            tile.as_ref(),
            &PixmapPaint::default(),
            Transform::identity(),
            None,
        );
        Ok(())
    }

    /// Finish drawing and return straight-alpha RGBA pixels
    ///
    /// # Errors
    ///
    /// Returns an error if the pixel buffer does not match the raster size
    pub fn into_image(self) -> Result<RgbaImage> {
        let width = self.pixmap.width();
        let height = self.pixmap.height();
        let mut data = Vec::with_capacity(self.pixmap.data().len());
        for pixel in self.pixmap.pixels() {
            let color = pixel.demultiply();
            data.extend_from_slice(&[color.red(), color.green(), color.blue(), color.alpha()]);
        }
        RgbaImage::from_raw(width, height, data)
            .ok_or_else(|| render_error("canvas export", &"pixel buffer size mismatch"))
    }

    fn polygon_path(&self, points: &[Point]) -> Option<Path> {
        let mut builder = PathBuilder::new();
        let mut iter = points.iter();
        let first = iter.next()?;
        let (x, y) = self.viewport.to_pixel(*first);
        builder.move_to(x, y);
        for point in iter {
            let (x, y) = self.viewport.to_pixel(*point);
            builder.line_to(x, y);
        }
        builder.close();
        builder.finish()
    }

    fn clip_mask(&self, rect: &Rect) -> Option<Mask> {
        let path = self.polygon_path(&rect.corners())?;
        let mut mask = Mask::new(self.pixmap.width(), self.pixmap.height())?;
        mask.fill_path(&path, FillRule::Winding, true, Transform::identity());
        Some(mask)
    }
}

fn solid_paint(color: [u8; 4]) -> Paint<'static> {
    let mut paint = Paint::default();
    let [r, g, b, a] = color;
    paint.set_color_rgba8(r, g, b, a);
    paint.anti_alias = true;
    paint
}

fn premultiply(data: &mut [u8]) {
    for pixel in data.chunks_exact_mut(4) {
        if let [r, g, b, a] = pixel
            && *a < u8::MAX
        {
            let alpha = u16::from(*a);
            for channel in [r, g, b] {
                *channel = ((u16::from(*channel) * alpha + 127) / 255) as u8;
            }
        }
    }
}
