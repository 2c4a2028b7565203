//! Error types for plot and graph line operations.

use thiserror::Error;

use crate::axis::Axis;

/// Result type alias using [`PlotError`].
pub type Result<T> = std::result::Result<T, PlotError>;

/// Errors reported by range, data, and styling operations.
///
/// Every operation that returns one of these leaves the target unchanged.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PlotError {
    /// The lower bound is above the upper bound, or a bound is not finite.
    #[error("{axis} limits are invalid: min {min} must be finite and not above max {max}")]
    InvalidRange {
        /// Axis the limits were meant for.
        axis: Axis,
        /// Requested lower bound.
        min: f32,
        /// Requested upper bound.
        max: f32,
    },

    /// Both bounds are equal and the axis cannot scale a zero span.
    #[error("{axis} limits must not be equal (both are {value})")]
    DegenerateRange {
        /// Axis the limits were meant for.
        axis: Axis,
        /// The repeated bound.
        value: f32,
    },

    /// A recompute was requested before a range was assigned.
    #[error("{axis} limits must be set before the {axis} data can be calculated")]
    LimitUnset {
        /// Axis without a range.
        axis: Axis,
    },

    /// A logarithmic axis was given a non-positive bound.
    #[error("logarithmic axis bound must be positive, got {value}")]
    LogDomain {
        /// Offending bound.
        value: f32,
    },

    /// A graph line index does not exist.
    #[error("graph index {index} is out of range for {len} graph lines")]
    GraphIndexOutOfRange {
        /// Requested index.
        index: usize,
        /// Number of graph lines.
        len: usize,
    },

    /// A dash length is negative or not finite.
    #[error("dash lengths must be finite and non-negative, got {value}")]
    InvalidDashPattern {
        /// Offending length.
        value: f32,
    },
}
