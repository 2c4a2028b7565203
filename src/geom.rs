//! Screen-space geometric primitives used by the plotting pipeline.
//!
//! All coordinates are logical pixels with the origin at the top-left corner
//! and Y growing downwards.

/// A point in screen space (pixel coordinates).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ScreenPoint {
    /// X value in screen pixels.
    pub x: f32,
    /// Y value in screen pixels.
    pub y: f32,
}

impl ScreenPoint {
    /// Create a new screen point.
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Offset the point by another point.
    pub fn offset(self, by: ScreenPoint) -> Self {
        Self::new(self.x + by.x, self.y + by.y)
    }

    /// Euclidean distance to another point.
    pub fn distance(self, other: ScreenPoint) -> f32 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        (dx * dx + dy * dy).sqrt()
    }
}

/// A rectangle in screen space (pixel coordinates).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ScreenRect {
    /// Top-left corner.
    pub min: ScreenPoint,
    /// Bottom-right corner.
    pub max: ScreenPoint,
}

impl ScreenRect {
    /// Create a new screen rectangle from corners.
    pub const fn new(min: ScreenPoint, max: ScreenPoint) -> Self {
        Self { min, max }
    }

    /// Create a rectangle from an origin and a size.
    pub fn from_origin_size(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self::new(ScreenPoint::new(x, y), ScreenPoint::new(x + width, y + height))
    }

    /// Rectangle width in pixels.
    pub fn width(&self) -> f32 {
        self.max.x - self.min.x
    }

    /// Rectangle height in pixels.
    pub fn height(&self) -> f32 {
        self.max.y - self.min.y
    }

    /// Check whether the rectangle has positive area.
    pub fn is_valid(&self) -> bool {
        self.width() > 0.0 && self.height() > 0.0
    }

    /// Shrink the rectangle by per-side margins, collapsing to zero size when
    /// the margins do not fit.
    pub fn inset(&self, margins: Margins) -> Self {
        let min_x = self.min.x + margins.left;
        let min_y = self.min.y + margins.top;
        let max_x = (self.max.x - margins.right).max(min_x);
        let max_y = (self.max.y - margins.bottom).max(min_y);
        Self::new(ScreenPoint::new(min_x, min_y), ScreenPoint::new(max_x, max_y))
    }
}

/// Pixel insets on each side of a rectangle.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Margins {
    /// Left inset.
    pub left: f32,
    /// Right inset.
    pub right: f32,
    /// Top inset.
    pub top: f32,
    /// Bottom inset.
    pub bottom: f32,
}

impl Margins {
    /// Same inset on every side.
    pub const fn uniform(value: f32) -> Self {
        Self {
            left: value,
            right: value,
            top: value,
            bottom: value,
        }
    }
}

impl Default for Margins {
    fn default() -> Self {
        Self {
            left: 60.0,
            right: 20.0,
            top: 30.0,
            bottom: 40.0,
        }
    }
}
