//! Axis configuration, limit validation, and formatting.

use std::fmt;
use std::sync::Arc;

use crate::error::{PlotError, Result};
use crate::view::Range;

/// Plot dimension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    /// Horizontal axis.
    X,
    /// Vertical axis.
    Y,
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::X => f.write_str("x"),
            Self::Y => f.write_str("y"),
        }
    }
}

/// Axis scale type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AxisScale {
    /// Linear scaling.
    Linear,
    /// Base-10 logarithmic scaling.
    Log10,
}

impl AxisScale {
    /// Check whether a data range is valid for this scale.
    pub fn is_range_valid(self, range: Range) -> bool {
        if !range.is_finite() {
            return false;
        }
        match self {
            Self::Linear => true,
            Self::Log10 => range.min > 0.0 && range.max > 0.0,
        }
    }
}

/// What to do when both limits of an axis are equal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DegenerateRangePolicy {
    /// Fail with [`PlotError::DegenerateRange`].
    #[default]
    Reject,
    /// Substitute [`Range::FULL`]. Only honoured on linear axes.
    FullRange,
}

/// Formatter for axis tick labels.
#[derive(Clone, Default)]
pub enum AxisFormatter {
    /// Default numeric formatter.
    #[default]
    Default,
    /// Custom formatter callback.
    Custom(Arc<dyn Fn(f32) -> String + Send + Sync>),
}

impl AxisFormatter {
    /// Format a value for display.
    pub fn format(&self, value: f32) -> String {
        match self {
            Self::Default => format_tick(value),
            Self::Custom(formatter) => formatter(value),
        }
    }
}

impl fmt::Debug for AxisFormatter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Default => write!(f, "AxisFormatter::Default"),
            Self::Custom(_) => write!(f, "AxisFormatter::Custom(..)"),
        }
    }
}

fn format_tick(value: f32) -> String {
    if value == 0.0 {
        return "0".to_string();
    }
    let magnitude = value.abs();
    if !(1e-3..1e5).contains(&magnitude) {
        return format!("{value:.0e}");
    }
    let text = format!("{value:.3}");
    let text = text.trim_end_matches('0');
    text.trim_end_matches('.').to_string()
}

/// Measures rendered text extents.
pub trait TextMeasurer {
    /// Measure text width and height in pixels at the given font size.
    fn measure(&self, text: &str, size: f32) -> (f32, f32);
}

/// Text measurer assuming fixed-width glyphs.
///
/// Used when no toolkit text system is available.
#[derive(Debug, Clone, Copy, Default)]
pub struct MonospaceMeasurer;

impl TextMeasurer for MonospaceMeasurer {
    fn measure(&self, text: &str, size: f32) -> (f32, f32) {
        if text.is_empty() {
            return (0.0, 0.0);
        }
        (text.chars().count() as f32 * size * 0.6, size * 1.2)
    }
}

/// Per-axis configuration shared by a plot and its graph lines.
#[derive(Debug, Clone)]
pub struct AxisConfig {
    scale: AxisScale,
    degenerate: DegenerateRangePolicy,
    formatter: AxisFormatter,
}

impl AxisConfig {
    /// Create a new axis configuration.
    pub fn new(scale: AxisScale) -> Self {
        Self {
            scale,
            degenerate: DegenerateRangePolicy::default(),
            formatter: AxisFormatter::default(),
        }
    }

    /// Create a linear axis configuration.
    pub fn linear() -> Self {
        Self::new(AxisScale::Linear)
    }

    /// Create a log10 axis configuration.
    pub fn log10() -> Self {
        Self::new(AxisScale::Log10)
    }

    /// Access the axis scale.
    pub fn scale(&self) -> AxisScale {
        self.scale
    }

    /// Access the degenerate range policy.
    pub fn degenerate_policy(&self) -> DegenerateRangePolicy {
        self.degenerate
    }

    /// Set the degenerate range policy.
    pub fn with_degenerate_policy(mut self, policy: DegenerateRangePolicy) -> Self {
        self.degenerate = policy;
        self
    }

    /// Set the axis formatter.
    pub fn with_formatter(mut self, formatter: AxisFormatter) -> Self {
        self.formatter = formatter;
        self
    }

    /// Access the formatter.
    pub fn formatter(&self) -> &AxisFormatter {
        &self.formatter
    }

    /// Validate caller supplied limits for `axis`.
    ///
    /// Returns the range to store, which is [`Range::FULL`] when the bounds are
    /// equal and the policy is [`DegenerateRangePolicy::FullRange`].
    pub fn limits(&self, axis: Axis, min: f32, max: f32) -> Result<Range> {
        if !min.is_finite() || !max.is_finite() || min > max {
            return Err(PlotError::InvalidRange { axis, min, max });
        }
        if self.scale == AxisScale::Log10 && min <= 0.0 {
            return Err(PlotError::LogDomain { value: min });
        }
        let range = Range { min, max };
        match (self.degenerate, self.scale) {
            // Only a span strictly below epsilon collapses to the full range.
            (DegenerateRangePolicy::FullRange, AxisScale::Linear) => {
                if range.span() < f32::EPSILON {
                    log::debug!("{axis} limits collapse at {min}, using the full range");
                    return Ok(Range::FULL);
                }
            }
            _ => {
                if range.is_degenerate() {
                    return Err(PlotError::DegenerateRange { axis, value: min });
                }
            }
        }
        Ok(range)
    }
}

impl Default for AxisConfig {
    fn default() -> Self {
        Self::linear()
    }
}
