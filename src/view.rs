//! Data ranges shared by axes, lines, and auto-scaling.

/// Numeric range with inclusive bounds.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Range {
    /// Minimum value.
    pub min: f32,
    /// Maximum value.
    pub max: f32,
}

impl Range {
    /// Create a new range, swapping bounds if needed.
    pub fn new(mut min: f32, mut max: f32) -> Self {
        if min > max {
            std::mem::swap(&mut min, &mut max);
        }
        Self { min, max }
    }

    /// The full-range sentinel used when a Y range collapses to a point.
    pub const FULL: Self = Self {
        min: 0.0,
        max: f32::MAX,
    };

    /// Span of the range.
    pub fn span(&self) -> f32 {
        self.max - self.min
    }

    /// Check whether both bounds are finite.
    pub fn is_finite(&self) -> bool {
        self.min.is_finite() && self.max.is_finite()
    }

    /// Check whether the range has positive span and finite bounds.
    pub fn is_valid(&self) -> bool {
        self.is_finite() && self.span() > 0.0
    }

    /// Check whether the bounds are equal within `f32::EPSILON`.
    pub fn is_degenerate(&self) -> bool {
        (self.max - self.min).abs() <= f32::EPSILON
    }

    /// Smallest range covering every finite value accepted by `keep`.
    pub fn from_values_where(values: &[f32], keep: impl Fn(f32) -> bool) -> Option<Self> {
        let mut range: Option<Self> = None;
        for &value in values {
            if !value.is_finite() || !keep(value) {
                continue;
            }
            match range.as_mut() {
                None => range = Some(Self::new(value, value)),
                Some(existing) => existing.expand_to_include(value),
            }
        }
        range
    }

    /// Smallest range covering every finite value.
    pub fn from_values(values: &[f32]) -> Option<Self> {
        Self::from_values_where(values, |_| true)
    }

    /// Expand the range to include a value.
    pub fn expand_to_include(&mut self, value: f32) {
        if !value.is_finite() {
            return;
        }
        if value < self.min {
            self.min = value;
        }
        if value > self.max {
            self.max = value;
        }
    }

    /// Union two ranges if both are finite.
    pub fn union(a: Self, b: Self) -> Option<Self> {
        if !a.is_finite() || !b.is_finite() {
            return None;
        }
        Some(Self {
            min: a.min.min(b.min),
            max: a.max.max(b.max),
        })
    }

    /// Add `span * frac` of padding on both sides.
    pub fn padded(&self, frac: f32) -> Self {
        let padding = self.span().abs() * frac;
        Self {
            min: self.min - padding,
            max: self.max + padding,
        }
    }
}
