//! Rendering primitives and stroke helpers.
//!
//! These types are backend-agnostic and are used by render backends (such as the
//! GPUI backend) to describe how plots should be drawn.

use crate::geom::{ScreenPoint, ScreenRect};

/// RGBA color in linear space.
///
/// All components are expected to be in the 0.0..=1.0 range.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Color {
    /// Red channel.
    pub r: f32,
    /// Green channel.
    pub g: f32,
    /// Blue channel.
    pub b: f32,
    /// Alpha channel.
    pub a: f32,
}

impl Color {
    /// Create a new color.
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Create an opaque color from 8-bit channels.
    pub const fn from_rgb8(r: u8, g: u8, b: u8) -> Self {
        Self::new(r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0, 1.0)
    }

    /// Return the color with a different alpha.
    pub const fn with_alpha(self, a: f32) -> Self {
        Self::new(self.r, self.g, self.b, a)
    }

    /// Opaque black.
    pub const BLACK: Self = Self::new(0.0, 0.0, 0.0, 1.0);
    /// Opaque white.
    pub const WHITE: Self = Self::new(1.0, 1.0, 1.0, 1.0);
    /// Fully transparent.
    pub const TRANSPARENT: Self = Self::new(0.0, 0.0, 0.0, 0.0);
}

/// Shape of the open ends of a stroke.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LineCap {
    /// Flat end at the last point.
    Butt,
    /// Flat end extended by half the width.
    Square,
    /// Semicircular end.
    #[default]
    Round,
}

/// Line stroke styling.
///
/// The width is expressed in logical pixels. Corners are always mitered.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineStyle {
    /// Stroke color.
    pub color: Color,
    /// Stroke width in pixels.
    pub width: f32,
    /// End shape.
    pub cap: LineCap,
}

impl Default for LineStyle {
    fn default() -> Self {
        Self {
            color: Color::BLACK,
            width: 1.0,
            cap: LineCap::Round,
        }
    }
}

impl LineStyle {
    /// Square covering the cap drawn at a stroke end, `None` for butt caps.
    ///
    /// Round caps fill the disc inscribed in the square.
    pub fn cap_rect(&self, end: ScreenPoint) -> Option<ScreenRect> {
        let half = self.width * 0.5;
        match self.cap {
            LineCap::Butt => None,
            LineCap::Square | LineCap::Round => Some(ScreenRect::new(
                ScreenPoint::new(end.x - half, end.y - half),
                ScreenPoint::new(end.x + half, end.y + half),
            )),
        }
    }
}

/// Rectangle styling.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RectStyle {
    /// Fill color.
    pub fill: Color,
    /// Stroke color.
    pub stroke: Color,
    /// Stroke width.
    pub stroke_width: f32,
}

impl Default for RectStyle {
    fn default() -> Self {
        Self {
            fill: Color::TRANSPARENT,
            stroke: Color::BLACK,
            stroke_width: 1.0,
        }
    }
}

/// Text styling.
#[derive(Debug, Clone, PartialEq)]
pub struct TextStyle {
    /// Text color.
    pub color: Color,
    /// Font size in pixels.
    pub size: f32,
}

impl Default for TextStyle {
    fn default() -> Self {
        Self {
            color: Color::BLACK,
            size: 12.0,
        }
    }
}

/// A line segment in screen space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineSegment {
    /// Segment start.
    pub start: ScreenPoint,
    /// Segment end.
    pub end: ScreenPoint,
}

impl LineSegment {
    /// Create a new line segment.
    pub fn new(start: ScreenPoint, end: ScreenPoint) -> Self {
        Self { start, end }
    }

    /// Segment length in pixels.
    pub fn length(&self) -> f32 {
        self.start.distance(self.end)
    }
}

/// A single drawing instruction.
#[derive(Debug, Clone, PartialEq)]
pub enum RenderCommand {
    /// Start clipping to a rectangle.
    ClipRect(ScreenRect),
    /// End clipping.
    ClipEnd,
    /// Stroke a connected path through the points.
    Polyline {
        /// Path vertices in order.
        points: Vec<ScreenPoint>,
        /// Stroke styling.
        style: LineStyle,
    },
    /// Stroke independent line segments.
    LineSegments {
        /// Segments to draw.
        segments: Vec<LineSegment>,
        /// Styling for the segments.
        style: LineStyle,
    },
    /// Draw a rectangle.
    Rect {
        /// Rectangle bounds.
        rect: ScreenRect,
        /// Rectangle styling.
        style: RectStyle,
    },
    /// Draw text with its top-left corner at `position`.
    Text {
        /// Text position.
        position: ScreenPoint,
        /// Text content.
        text: String,
        /// Text styling.
        style: TextStyle,
    },
}

/// Aggregated render commands.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct RenderList {
    commands: Vec<RenderCommand>,
}

impl RenderList {
    /// Create an empty render list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Push a render command.
    pub fn push(&mut self, command: RenderCommand) {
        self.commands.push(command);
    }

    /// Access all render commands.
    pub fn commands(&self) -> &[RenderCommand] {
        &self.commands
    }

    /// Number of commands.
    pub fn len(&self) -> usize {
        self.commands.len()
    }

    /// Check whether the list holds no commands.
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}

/// Split a polyline into the visible pieces of a dash pattern.
///
/// The pattern alternates stroke and gap lengths starting with a stroke and
/// continues across vertices. An empty pattern, or one whose lengths sum to
/// zero, yields the solid polyline as consecutive segments.
pub fn build_dashed_segments(points: &[ScreenPoint], pattern: &[f32], out: &mut Vec<LineSegment>) {
    out.clear();
    if points.len() < 2 {
        return;
    }
    let total: f32 = pattern.iter().sum();
    if pattern.is_empty() || !(total > 0.0) {
        out.extend(
            points
                .windows(2)
                .map(|window| LineSegment::new(window[0], window[1])),
        );
        return;
    }

    let mut index = 0;
    let mut remaining = pattern[0];
    let mut drawing = true;
    for window in points.windows(2) {
        let (start, end) = (window[0], window[1]);
        let length = start.distance(end);
        if !(length > 0.0) {
            continue;
        }
        let mut travelled = 0.0_f32;
        while travelled < length {
            let step = remaining.min(length - travelled);
            if drawing && step > 0.0 {
                out.push(LineSegment::new(
                    lerp(start, end, travelled / length),
                    lerp(start, end, (travelled + step) / length),
                ));
            }
            travelled += step;
            remaining -= step;
            if remaining <= 0.0 {
                index = (index + 1) % pattern.len();
                remaining = pattern[index];
                drawing = !drawing;
            }
        }
    }
}

fn lerp(a: ScreenPoint, b: ScreenPoint, t: f32) -> ScreenPoint {
    ScreenPoint::new(a.x + (b.x - a.x) * t, a.y + (b.y - a.y) * t)
}
