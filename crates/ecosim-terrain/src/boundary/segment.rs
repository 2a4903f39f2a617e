//! Boundary primitives in world units.

/// Axis a boundary segment runs along.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Orientation {
    /// Runs along X; separates vertically adjacent cells.
    Horizontal,
    /// Runs along Y; separates horizontally adjacent cells.
    Vertical,
}

/// A thin rectangle centered on one cell edge.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BoundarySegment {
    /// Center X.
    pub x: f64,
    /// Center Y (world-Y, flipped relative to grid rows).
    pub y: f64,
    /// Extent along the segment's axis.
    pub length: f64,
    pub orientation: Orientation,
    /// Extent across the segment's axis.
    pub thickness: f64,
}

impl BoundarySegment {
    /// The segment as an axis-aligned rectangle.
    pub fn to_rectangle(&self) -> MergedRectangle {
        let (width, height) = match self.orientation {
            Orientation::Horizontal => (self.length, self.thickness),
            Orientation::Vertical => (self.thickness, self.length),
        };
        MergedRectangle {
            x: self.x,
            y: self.y,
            width,
            height,
        }
    }
}

/// Axis-aligned rectangle given by center and full extents.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MergedRectangle {
    /// Center X.
    pub x: f64,
    /// Center Y.
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl MergedRectangle {
    /// Build from edge coordinates.
    pub fn from_extents(left: f64, right: f64, bottom: f64, top: f64) -> Self {
        Self {
            x: (left + right) * 0.5,
            y: (bottom + top) * 0.5,
            width: right - left,
            height: top - bottom,
        }
    }

    #[inline]
    pub fn left(&self) -> f64 {
        self.x - self.width * 0.5
    }

    #[inline]
    pub fn right(&self) -> f64 {
        self.x + self.width * 0.5
    }

    #[inline]
    pub fn bottom(&self) -> f64 {
        self.y - self.height * 0.5
    }

    #[inline]
    pub fn top(&self) -> f64 {
        self.y + self.height * 0.5
    }

    #[inline]
    pub fn area(&self) -> f64 {
        self.width * self.height
    }

    pub fn center(&self) -> glam::DVec2 {
        glam::DVec2::new(self.x, self.y)
    }

    /// Whether `point` lies inside or on the edge.
    pub fn contains(&self, point: glam::DVec2) -> bool {
        point.x >= self.left()
            && point.x <= self.right()
            && point.y >= self.bottom()
            && point.y <= self.top()
    }
}
