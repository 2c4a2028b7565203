//! Coordinate transforms between data and screen space.

use crate::axis::{Axis, AxisScale};
use crate::view::Range;

#[derive(Debug, Clone, Copy, PartialEq)]
enum Mapping {
    /// `pixel = offset + value * scale`.
    Linear { offset: f32, scale: f32 },
    /// `pixel = extent * ln(value / min) / ln(max / min)`.
    Log { min: f32, max: f32, log_span: f32 },
}

/// Transform of one data dimension onto a pixel extent.
///
/// X grows to the right from pixel `0`. Y is flipped so that the range minimum
/// lands on pixel `extent` and the maximum on pixel `0`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    axis: Axis,
    extent: f32,
    mapping: Mapping,
}

impl Transform {
    /// Create a transform for `axis` over `extent` pixels.
    ///
    /// Returns `None` when the range cannot be placed on the scale (a
    /// non-positive bound on a log axis, or a zero span).
    pub fn new(axis: Axis, scale: AxisScale, range: Range, extent: f32) -> Option<Self> {
        if !scale.is_range_valid(range) || !(range.span() > 0.0) {
            return None;
        }
        let mapping = match (scale, axis) {
            (AxisScale::Linear, Axis::X) => {
                let scale = extent / range.span();
                Mapping::Linear {
                    offset: -(range.min * scale),
                    scale,
                }
            }
            (AxisScale::Linear, Axis::Y) => {
                let scale = extent / range.span();
                Mapping::Linear {
                    offset: extent + range.min * scale,
                    scale: -scale,
                }
            }
            (AxisScale::Log10, _) => Mapping::Log {
                min: range.min,
                max: range.max,
                log_span: (range.max / range.min).ln(),
            },
        };
        Some(Self {
            axis,
            extent,
            mapping,
        })
    }

    /// Map a value into pixels without clipping.
    ///
    /// Returns `None` only for values outside the scale's domain.
    pub fn map(&self, value: f32) -> Option<f32> {
        if !value.is_finite() {
            return None;
        }
        match self.mapping {
            Mapping::Linear { offset, scale } => Some(offset + value * scale),
            Mapping::Log { min, log_span, .. } => {
                if value <= 0.0 {
                    return None;
                }
                let norm = (value / min).ln() / log_span;
                Some(match self.axis {
                    Axis::X => self.extent * norm,
                    Axis::Y => self.extent - self.extent * norm,
                })
            }
        }
    }

    /// Map a sample into the plot buffer.
    ///
    /// Log axes exclude samples at or beyond the range maximum; linear axes
    /// keep every finite sample.
    pub fn map_sample(&self, value: f32) -> Option<f32> {
        if let Mapping::Log { max, .. } = self.mapping {
            if value >= max {
                return None;
            }
        }
        self.map(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use proptest::prelude::*;

    #[test]
    fn linear_x_maps_samples() {
        let transform =
            Transform::new(Axis::X, AxisScale::Linear, Range::new(0.0, 10.0), 100.0).unwrap();
        let mapped: Vec<f32> = [0.0, 5.0, 10.0]
            .iter()
            .filter_map(|x| transform.map_sample(*x))
            .collect();
        assert_eq!(mapped, vec![0.0, 50.0, 100.0]);
    }

    #[test]
    fn linear_y_is_flipped() {
        let transform =
            Transform::new(Axis::Y, AxisScale::Linear, Range::new(0.0, 10.0), 100.0).unwrap();
        let mapped: Vec<f32> = [0.0, 5.0, 10.0]
            .iter()
            .filter_map(|y| transform.map_sample(*y))
            .collect();
        assert_eq!(mapped, vec![100.0, 50.0, 0.0]);
    }

    #[test]
    fn log_x_maps_decades_evenly() {
        let transform =
            Transform::new(Axis::X, AxisScale::Log10, Range::new(1.0, 1000.0), 300.0).unwrap();
        assert_relative_eq!(transform.map(1.0).unwrap(), 0.0);
        assert_relative_eq!(transform.map(10.0).unwrap(), 100.0, epsilon = 1e-3);
        assert_relative_eq!(transform.map(100.0).unwrap(), 200.0, epsilon = 1e-3);
        assert_relative_eq!(transform.map(1000.0).unwrap(), 300.0, epsilon = 1e-3);
    }

    #[test]
    fn log_x_excludes_samples_at_or_past_max() {
        let transform =
            Transform::new(Axis::X, AxisScale::Log10, Range::new(1.0, 100.0), 100.0).unwrap();
        assert!(transform.map_sample(100.0).is_none());
        assert!(transform.map_sample(250.0).is_none());
        assert!(transform.map_sample(0.0).is_none());
        assert!(transform.map_sample(-3.0).is_none());
        assert!(transform.map_sample(99.0).is_some());
    }

    #[test]
    fn log_rejects_non_positive_range() {
        let transform = Transform::new(Axis::X, AxisScale::Log10, Range::new(-1.0, 10.0), 100.0);
        assert!(transform.is_none());
    }

    #[test]
    fn zero_span_has_no_transform() {
        let transform = Transform::new(Axis::X, AxisScale::Linear, Range::new(2.0, 2.0), 100.0);
        assert!(transform.is_none());
    }

    proptest! {
        #[test]
        fn prop_linear_x_endpoints(
            min in -1.0e3f32..1.0e3,
            span in 1.0e-1f32..1.0e3,
            width in 1.0f32..4000.0
        ) {
            let max = min + span;
            let transform =
                Transform::new(Axis::X, AxisScale::Linear, Range::new(min, max), width).unwrap();
            let tolerance = width * 1e-4 + 1e-3;
            prop_assert!(transform.map(min).unwrap().abs() <= tolerance);
            prop_assert!((transform.map(max).unwrap() - width).abs() <= tolerance);
        }

        #[test]
        fn prop_linear_y_endpoints(
            min in -1.0e3f32..1.0e3,
            span in 1.0e-1f32..1.0e3,
            height in 1.0f32..4000.0
        ) {
            let max = min + span;
            let transform =
                Transform::new(Axis::Y, AxisScale::Linear, Range::new(min, max), height).unwrap();
            let tolerance = height * 1e-4 + 1e-3;
            prop_assert!((transform.map(min).unwrap() - height).abs() <= tolerance);
            prop_assert!(transform.map(max).unwrap().abs() <= tolerance);
        }

        #[test]
        fn prop_log_x_min_maps_to_zero(
            min in 1.0e-3f32..1.0e3,
            ratio in 1.5f32..1.0e4,
            width in 1.0f32..4000.0
        ) {
            let transform = Transform::new(
                Axis::X,
                AxisScale::Log10,
                Range::new(min, min * ratio),
                width,
            )
            .unwrap();
            prop_assert_eq!(transform.map_sample(min), Some(0.0));
        }
    }
}
