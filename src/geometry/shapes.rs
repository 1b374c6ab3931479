//! Primitive scene geometry in pattern units (y axis pointing up)

/// A 2D point
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    /// Horizontal coordinate
    pub x: f64,
    /// Vertical coordinate
    pub y: f64,
}

impl Point {
    /// Create a new point
    #[inline]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another point
    #[inline]
    pub fn distance(self, other: Self) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        dx.hypot(dy)
    }

    /// Point reflection through `center`
    #[inline]
    pub fn reflect_through(self, center: Self) -> Self {
        Self::new(2.0f64.mul_add(center.x, -self.x), 2.0f64.mul_add(center.y, -self.y))
    }

    /// Mirror across the vertical line `x = axis`
    #[inline]
    pub fn mirror_x(self, axis: f64) -> Self {
        Self::new(2.0f64.mul_add(axis, -self.x), self.y)
    }

    /// Whether both coordinates agree within `tolerance`
    #[inline]
    pub fn approx_eq(self, other: Self, tolerance: f64) -> bool {
        (self.x - other.x).abs() <= tolerance && (self.y - other.y).abs() <= tolerance
    }
}

/// A line segment between two points
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    /// Start point
    pub start: Point,
    /// End point
    pub end: Point,
}

impl Segment {
    /// Create a new segment
    #[inline]
    pub const fn new(start: Point, end: Point) -> Self {
        Self { start, end }
    }
}

/// Axis-aligned rectangle
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    /// Left edge
    pub x: f64,
    /// Bottom edge
    pub y: f64,
    /// Horizontal extent
    pub width: f64,
    /// Vertical extent
    pub height: f64,
}

impl Rect {
    /// Create a rectangle from its bottom-left corner and extents
    #[inline]
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Square with bottom-left corner at `(x, y)`
    #[inline]
    pub const fn square(x: f64, y: f64, size: f64) -> Self {
        Self::new(x, y, size, size)
    }

    /// Right edge
    #[inline]
    pub const fn max_x(&self) -> f64 {
        self.x + self.width
    }

    /// Top edge
    #[inline]
    pub const fn max_y(&self) -> f64 {
        self.y + self.height
    }

    /// Centre point
    #[inline]
    pub fn center(&self) -> Point {
        Point::new(
            self.width.mul_add(0.5, self.x),
            self.height.mul_add(0.5, self.y),
        )
    }

    /// Corner points in counter-clockwise order from the bottom-left
    pub fn corners(&self) -> [Point; 4] {
        [
            Point::new(self.x, self.y),
            Point::new(self.max_x(), self.y),
            Point::new(self.max_x(), self.max_y()),
            Point::new(self.x, self.max_y()),
        ]
    }

    /// Rectangle shrunk by `amount` on every side
    #[inline]
    pub fn inset(&self, amount: f64) -> Self {
        Self::new(
            self.x + amount,
            self.y + amount,
            2.0f64.mul_add(-amount, self.width),
            2.0f64.mul_add(-amount, self.height),
        )
    }

    /// Whether the rectangle has positive area
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }
}

/// Closed quadrilateral
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Quad {
    /// Vertices in drawing order
    pub vertices: [Point; 4],
}

impl Quad {
    /// Create a quadrilateral from its vertices
    #[inline]
    pub const fn new(vertices: [Point; 4]) -> Self {
        Self { vertices }
    }

    /// Mean of the vertices
    pub fn centroid(&self) -> Point {
        let (sx, sy) = self
            .vertices
            .iter()
            .fold((0.0, 0.0), |(sx, sy), p| (sx + p.x, sy + p.y));
        Point::new(sx / 4.0, sy / 4.0)
    }

    /// Apply `f` to every vertex
    #[must_use]
    pub fn map(&self, f: impl Fn(Point) -> Point) -> Self {
        Self::new(self.vertices.map(f))
    }

    /// Whether both quads have the same vertices, ignoring order
    pub fn same_vertex_set(&self, other: &Self, tolerance: f64) -> bool {
        self.vertices.iter().all(|p| {
            other
                .vertices
                .iter()
                .any(|q| p.approx_eq(*q, tolerance))
        }) && other.vertices.iter().all(|q| {
            self.vertices
                .iter()
                .any(|p| q.approx_eq(*p, tolerance))
        })
    }
}
