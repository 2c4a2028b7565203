//! A single data series and its transformed point buffer.
//!
//! A [`GraphLine`] stores the untransformed x/y samples, one range per axis and
//! the pixel-space points derived from them. Recomputing the points is driven by
//! the caller: after changing data, limits or bounds, call
//! [`GraphLine::calculate_x_data`] and [`GraphLine::calculate_y_data`] before
//! reading the buffer or rendering.

use crate::axis::{Axis, AxisConfig, AxisScale, DegenerateRangePolicy};
use crate::error::{PlotError, Result};
use crate::geom::{ScreenPoint, ScreenRect};
use crate::render::{Color, LineStyle, RenderCommand, RenderList, build_dashed_segments};
use crate::transform::Transform;
use crate::view::Range;

/// Transform used for the X dimension of a graph line.
///
/// The Y dimension is always linear.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GraphKind {
    /// Linear X axis.
    Linear,
    /// Logarithmic X axis.
    LogX,
}

impl GraphKind {
    /// Scale of the X axis.
    pub fn x_scale(self) -> AxisScale {
        match self {
            Self::Linear => AxisScale::Linear,
            Self::LogX => AxisScale::Log10,
        }
    }

    /// Limit validation rules for the X axis.
    pub fn x_axis(self) -> AxisConfig {
        AxisConfig::new(self.x_scale()).with_degenerate_policy(DegenerateRangePolicy::Reject)
    }

    /// Limit validation rules for the Y axis.
    pub fn y_axis(self) -> AxisConfig {
        AxisConfig::linear().with_degenerate_policy(DegenerateRangePolicy::FullRange)
    }
}

/// One plotted series with its own ranges and point buffer.
#[derive(Debug, Clone)]
pub struct GraphLine {
    kind: GraphKind,
    x_axis: AxisConfig,
    y_axis: AxisConfig,
    bounds: ScreenRect,
    x_lim: Option<Range>,
    y_lim: Option<Range>,
    x_data: Vec<f32>,
    y_data: Vec<f32>,
    graph_points: Vec<ScreenPoint>,
    x_excluded: Vec<bool>,
    y_excluded: Vec<bool>,
    dash_lengths: Vec<f32>,
    style: LineStyle,
}

impl GraphLine {
    /// Create an empty graph line of the given kind.
    pub fn new(kind: GraphKind) -> Self {
        Self {
            kind,
            x_axis: kind.x_axis(),
            y_axis: kind.y_axis(),
            bounds: ScreenRect::default(),
            x_lim: None,
            y_lim: None,
            x_data: Vec::new(),
            y_data: Vec::new(),
            graph_points: Vec::new(),
            x_excluded: Vec::new(),
            y_excluded: Vec::new(),
            dash_lengths: Vec::new(),
            style: LineStyle::default(),
        }
    }

    /// Create a graph line with linear axes.
    pub fn linear() -> Self {
        Self::new(GraphKind::Linear)
    }

    /// Create a graph line with a logarithmic X axis.
    pub fn log_x() -> Self {
        Self::new(GraphKind::LogX)
    }

    /// Access the line kind.
    pub fn kind(&self) -> GraphKind {
        self.kind
    }

    /// Access the bounds the points are computed for.
    pub fn bounds(&self) -> ScreenRect {
        self.bounds
    }

    /// Place the line inside its parent.
    ///
    /// Points are computed relative to `bounds.min` over its width and height.
    pub fn set_bounds(&mut self, bounds: ScreenRect) {
        self.bounds = bounds;
    }

    /// Set the X range.
    pub fn set_x_lim(&mut self, min: f32, max: f32) -> Result<()> {
        self.x_lim = Some(self.x_axis.limits(Axis::X, min, max)?);
        Ok(())
    }

    /// Set the Y range. Equal bounds select [`Range::FULL`].
    pub fn set_y_lim(&mut self, min: f32, max: f32) -> Result<()> {
        self.y_lim = Some(self.y_axis.limits(Axis::Y, min, max)?);
        Ok(())
    }

    /// Access the X range.
    pub fn x_lim(&self) -> Option<Range> {
        self.x_lim
    }

    /// Access the Y range.
    pub fn y_lim(&self) -> Option<Range> {
        self.y_lim
    }

    /// Replace the X samples.
    pub fn set_x_values(&mut self, x_data: impl Into<Vec<f32>>) {
        self.x_data = x_data.into();
        self.resize_buffer(self.x_data.len());
    }

    /// Replace the Y samples.
    pub fn set_y_values(&mut self, y_data: impl Into<Vec<f32>>) {
        self.y_data = y_data.into();
        self.resize_buffer(self.y_data.len());
    }

    /// Access the X samples.
    pub fn x_values(&self) -> &[f32] {
        &self.x_data
    }

    /// Access the Y samples.
    pub fn y_values(&self) -> &[f32] {
        &self.y_data
    }

    fn resize_buffer(&mut self, len: usize) {
        if self.graph_points.len() != len {
            self.graph_points.resize(len, ScreenPoint::default());
            self.x_excluded.resize(len, false);
            self.y_excluded.resize(len, false);
        }
    }

    /// Recompute the X coordinate of every point.
    ///
    /// Samples the transform cannot place are excluded from
    /// [`GraphLine::plot_points`]: non-finite values, and on a log axis values
    /// that are not positive or at or beyond the range maximum.
    pub fn calculate_x_data(&mut self) -> Result<()> {
        let transform = self.transform(Axis::X)?;
        if self.x_data.is_empty() {
            return Ok(());
        }
        let excluded = apply_transform(
            &transform,
            &self.x_data,
            self.graph_points.iter_mut().map(|point| &mut point.x),
            &mut self.x_excluded,
        );
        if excluded > 0 {
            log::debug!(
                "excluded {excluded} of {} x samples outside the {:?} axis",
                self.x_data.len(),
                self.kind.x_scale()
            );
        }
        Ok(())
    }

    /// Recompute the Y coordinate of every point.
    pub fn calculate_y_data(&mut self) -> Result<()> {
        let transform = self.transform(Axis::Y)?;
        if self.y_data.is_empty() {
            return Ok(());
        }
        let excluded = apply_transform(
            &transform,
            &self.y_data,
            self.graph_points.iter_mut().map(|point| &mut point.y),
            &mut self.y_excluded,
        );
        if excluded > 0 {
            log::debug!("excluded {excluded} non-finite y samples");
        }
        Ok(())
    }

    fn transform(&self, axis: Axis) -> Result<Transform> {
        let (lim, scale, extent) = match axis {
            Axis::X => (self.x_lim, self.kind.x_scale(), self.bounds.width()),
            Axis::Y => (self.y_lim, AxisScale::Linear, self.bounds.height()),
        };
        let Some(range) = lim else {
            log::warn!("{axis} limits must be set before calculating {axis} data");
            return Err(PlotError::LimitUnset { axis });
        };
        Transform::new(axis, scale, range, extent).ok_or(PlotError::InvalidRange {
            axis,
            min: range.min,
            max: range.max,
        })
    }

    /// Access the whole point buffer, including excluded samples.
    pub fn points(&self) -> &[ScreenPoint] {
        &self.graph_points
    }

    /// Points that will be drawn, relative to the line bounds.
    ///
    /// Only slots with both an X and a Y sample are drawn.
    pub fn plot_points(&self) -> Vec<ScreenPoint> {
        let paired = self.x_data.len().min(self.y_data.len());
        self.graph_points
            .iter()
            .take(paired)
            .zip(self.x_excluded.iter().zip(&self.y_excluded))
            .filter(|(_, (x_out, y_out))| !**x_out && !**y_out)
            .map(|(point, _)| *point)
            .collect()
    }

    /// Set the dash pattern as alternating stroke and gap lengths in pixels.
    ///
    /// An empty pattern draws a solid line.
    pub fn set_dashed_path(&mut self, dash_lengths: impl Into<Vec<f32>>) -> Result<()> {
        let dash_lengths = dash_lengths.into();
        if let Some(&value) = dash_lengths
            .iter()
            .find(|length| !length.is_finite() || **length < 0.0)
        {
            return Err(PlotError::InvalidDashPattern { value });
        }
        self.dash_lengths = dash_lengths;
        Ok(())
    }

    /// Access the dash pattern.
    pub fn dash_pattern(&self) -> &[f32] {
        &self.dash_lengths
    }

    /// Set the stroke colour.
    pub fn set_graph_colour(&mut self, colour: Color) {
        self.style.color = colour;
    }

    /// Access the stroke style.
    pub fn style(&self) -> &LineStyle {
        &self.style
    }

    /// Append the stroke for the current point buffer.
    pub fn render(&self, out: &mut RenderList) {
        let origin = self.bounds.min;
        let points: Vec<ScreenPoint> = self
            .plot_points()
            .into_iter()
            .map(|point| point.offset(origin))
            .collect();
        if points.len() < 2 {
            return;
        }
        let dash_total: f32 = self.dash_lengths.iter().sum();
        if !(dash_total > 0.0) {
            out.push(RenderCommand::Polyline {
                points,
                style: self.style,
            });
        } else {
            let mut segments = Vec::new();
            build_dashed_segments(&points, &self.dash_lengths, &mut segments);
            out.push(RenderCommand::LineSegments {
                segments,
                style: self.style,
            });
        }
    }
}

fn apply_transform<'a>(
    transform: &Transform,
    data: &[f32],
    coords: impl Iterator<Item = &'a mut f32>,
    excluded: &mut [bool],
) -> usize {
    let mut count = 0;
    for ((coord, out), &value) in coords.zip(excluded.iter_mut()).zip(data) {
        match transform.map_sample(value) {
            Some(pixel) => {
                *coord = pixel;
                *out = false;
            }
            None => {
                *out = true;
                count += 1;
            }
        }
    }
    count
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use proptest::prelude::*;

    fn sized(kind: GraphKind, width: f32, height: f32) -> GraphLine {
        let mut line = GraphLine::new(kind);
        line.set_bounds(ScreenRect::from_origin_size(0.0, 0.0, width, height));
        line
    }

    #[test]
    fn reversed_x_lim_is_rejected_and_keeps_previous() {
        let mut line = GraphLine::linear();
        line.set_x_lim(0.0, 10.0).unwrap();
        let err = line.set_x_lim(5.0, 1.0).unwrap_err();
        assert!(matches!(err, PlotError::InvalidRange { axis: Axis::X, .. }));
        assert_eq!(line.x_lim(), Some(Range::new(0.0, 10.0)));
    }

    #[test]
    fn reversed_y_lim_is_rejected() {
        let mut line = GraphLine::linear();
        assert!(matches!(
            line.set_y_lim(3.0, -3.0),
            Err(PlotError::InvalidRange { axis: Axis::Y, .. })
        ));
        assert_eq!(line.y_lim(), None);
    }

    #[test]
    fn degenerate_x_lim_is_rejected() {
        let mut line = GraphLine::linear();
        assert_eq!(
            line.set_x_lim(4.0, 4.0),
            Err(PlotError::DegenerateRange {
                axis: Axis::X,
                value: 4.0
            })
        );
        assert_eq!(line.x_lim(), None);
    }

    #[test]
    fn degenerate_y_lim_uses_full_range() {
        let mut line = GraphLine::linear();
        line.set_y_lim(4.0, 4.0).unwrap();
        assert_eq!(line.y_lim(), Some(Range::new(0.0, f32::MAX)));
    }

    #[test]
    fn log_line_rejects_non_positive_x_min() {
        let mut line = GraphLine::log_x();
        assert_eq!(
            line.set_x_lim(0.0, 100.0),
            Err(PlotError::LogDomain { value: 0.0 })
        );
        line.set_x_lim(1.0, 100.0).unwrap();
    }

    #[test]
    fn calculate_without_limits_fails() {
        let mut line = sized(GraphKind::Linear, 100.0, 100.0);
        line.set_x_values(vec![1.0, 2.0]);
        line.set_y_values(vec![1.0, 2.0]);
        assert_eq!(
            line.calculate_x_data(),
            Err(PlotError::LimitUnset { axis: Axis::X })
        );
        assert_eq!(
            line.calculate_y_data(),
            Err(PlotError::LimitUnset { axis: Axis::Y })
        );
        assert_eq!(line.points(), &[ScreenPoint::default(); 2]);
    }

    #[test]
    fn calculate_without_data_is_a_no_op() {
        let mut line = sized(GraphKind::Linear, 100.0, 100.0);
        line.set_x_lim(0.0, 1.0).unwrap();
        line.set_y_lim(0.0, 1.0).unwrap();
        line.calculate_x_data().unwrap();
        line.calculate_y_data().unwrap();
        assert!(line.points().is_empty());
    }

    #[test]
    fn linear_scenario_maps_to_pixels() {
        let mut line = sized(GraphKind::Linear, 100.0, 100.0);
        line.set_x_lim(0.0, 10.0).unwrap();
        line.set_y_lim(0.0, 10.0).unwrap();
        line.set_x_values(vec![0.0, 5.0, 10.0]);
        line.set_y_values(vec![0.0, 5.0, 10.0]);
        line.calculate_x_data().unwrap();
        line.calculate_y_data().unwrap();

        let xs: Vec<f32> = line.points().iter().map(|p| p.x).collect();
        let ys: Vec<f32> = line.points().iter().map(|p| p.y).collect();
        assert_eq!(xs, vec![0.0, 50.0, 100.0]);
        assert_eq!(ys, vec![100.0, 50.0, 0.0]);
    }

    #[test]
    fn log_x_drops_samples_at_or_past_max() {
        let mut line = sized(GraphKind::LogX, 200.0, 100.0);
        line.set_x_lim(1.0, 100.0).unwrap();
        line.set_y_lim(0.0, 1.0).unwrap();
        line.set_x_values(vec![1.0, 10.0, 100.0, 1000.0]);
        line.set_y_values(vec![0.0, 0.5, 1.0, 1.0]);
        line.calculate_x_data().unwrap();
        line.calculate_y_data().unwrap();

        let points = line.plot_points();
        assert_eq!(points.len(), 2);
        assert!(points.len() < line.x_values().len());
        assert_eq!(points[0].x, 0.0);
        assert_relative_eq!(points[1].x, 100.0, epsilon = 1e-3);
        assert_relative_eq!(points[1].y, 50.0, epsilon = 1e-4);
    }

    #[test]
    fn log_x_excludes_non_positive_samples() {
        let mut line = sized(GraphKind::LogX, 100.0, 100.0);
        line.set_x_lim(1.0, 10.0).unwrap();
        line.set_y_lim(0.0, 1.0).unwrap();
        line.set_x_values(vec![-1.0, 0.0, 2.0]);
        line.set_y_values(vec![0.0, 0.0, 0.0]);
        line.calculate_x_data().unwrap();
        line.calculate_y_data().unwrap();
        assert_eq!(line.plot_points().len(), 1);
    }

    #[test]
    fn unpaired_samples_are_not_drawn() {
        let mut line = sized(GraphKind::Linear, 100.0, 100.0);
        line.set_x_lim(0.0, 4.0).unwrap();
        line.set_y_lim(0.0, 10.0).unwrap();
        line.set_x_values(vec![1.0, 2.0, 3.0, 4.0]);
        line.set_y_values(vec![5.0, 5.0]);
        line.calculate_x_data().unwrap();
        line.calculate_y_data().unwrap();

        assert_eq!(line.points().len(), 2);
        assert_eq!(
            line.plot_points(),
            vec![ScreenPoint::new(25.0, 50.0), ScreenPoint::new(50.0, 50.0)]
        );

        line.set_x_values(vec![1.0, 2.0, 3.0, 4.0]);
        line.calculate_x_data().unwrap();
        assert_eq!(line.points().len(), 4);
        assert_eq!(line.plot_points().len(), 2);
    }

    #[test]
    fn replacing_data_resizes_buffer() {
        let mut line = GraphLine::linear();
        line.set_y_values(vec![1.0, 2.0, 3.0]);
        assert_eq!(line.points().len(), 3);
        line.set_y_values(vec![1.0]);
        assert_eq!(line.points().len(), 1);
        line.set_x_values(vec![1.0, 2.0, 3.0, 4.0, 5.0]);
        assert_eq!(line.points().len(), 5);
    }

    #[test]
    fn recompute_follows_new_bounds() {
        let mut line = sized(GraphKind::Linear, 100.0, 100.0);
        line.set_x_lim(0.0, 10.0).unwrap();
        line.set_x_values(vec![10.0]);
        line.calculate_x_data().unwrap();
        assert_eq!(line.points()[0].x, 100.0);

        line.set_bounds(ScreenRect::from_origin_size(0.0, 0.0, 300.0, 100.0));
        assert_eq!(line.points()[0].x, 100.0);
        line.calculate_x_data().unwrap();
        assert_eq!(line.points()[0].x, 300.0);
    }

    #[test]
    fn dash_pattern_is_validated() {
        let mut line = GraphLine::linear();
        line.set_dashed_path(vec![4.0, 2.0]).unwrap();
        assert_eq!(line.dash_pattern(), &[4.0, 2.0]);
        assert_eq!(
            line.set_dashed_path(vec![4.0, -1.0]),
            Err(PlotError::InvalidDashPattern { value: -1.0 })
        );
        assert_eq!(line.dash_pattern(), &[4.0, 2.0]);
        line.set_dashed_path(Vec::new()).unwrap();
        assert!(line.dash_pattern().is_empty());
    }

    #[test]
    fn non_finite_dash_lengths_are_rejected() {
        let mut line = GraphLine::linear();
        line.set_dashed_path(vec![3.0, 1.0]).unwrap();
        assert!(matches!(
            line.set_dashed_path(vec![2.0, f32::NAN]),
            Err(PlotError::InvalidDashPattern { value }) if value.is_nan()
        ));
        assert_eq!(
            line.set_dashed_path(vec![f32::INFINITY, 2.0]),
            Err(PlotError::InvalidDashPattern {
                value: f32::INFINITY
            })
        );
        assert_eq!(line.dash_pattern(), &[3.0, 1.0]);
    }

    fn computed_line(dash: &[f32]) -> GraphLine {
        let mut line = GraphLine::linear();
        line.set_bounds(ScreenRect::from_origin_size(10.0, 20.0, 100.0, 100.0));
        line.set_x_lim(0.0, 10.0).unwrap();
        line.set_y_lim(0.0, 10.0).unwrap();
        line.set_x_values(vec![0.0, 10.0]);
        line.set_y_values(vec![0.0, 0.0]);
        line.calculate_x_data().unwrap();
        line.calculate_y_data().unwrap();
        line.set_dashed_path(dash).unwrap();
        line
    }

    #[test]
    fn render_strokes_solid_polyline_in_parent_space() {
        let mut line = computed_line(&[]);
        line.set_graph_colour(Color::WHITE);
        let mut out = RenderList::new();
        line.render(&mut out);
        assert_eq!(
            out.commands(),
            &[RenderCommand::Polyline {
                points: vec![ScreenPoint::new(10.0, 120.0), ScreenPoint::new(110.0, 120.0)],
                style: LineStyle {
                    color: Color::WHITE,
                    ..LineStyle::default()
                },
            }]
        );
    }

    #[test]
    fn render_dashed_line_emits_segments() {
        let line = computed_line(&[10.0, 10.0]);
        let mut out = RenderList::new();
        line.render(&mut out);
        let [RenderCommand::LineSegments { segments, style }] = out.commands() else {
            panic!("expected dashed segments, got {:?}", out.commands());
        };
        assert_eq!(segments.len(), 5);
        assert_eq!(style.width, 1.0);
    }

    #[test]
    fn zero_length_dashes_draw_solid() {
        let line = computed_line(&[0.0, 0.0]);
        let mut out = RenderList::new();
        line.render(&mut out);
        assert!(matches!(out.commands(), [RenderCommand::Polyline { .. }]));
    }

    #[test]
    fn render_skips_single_point() {
        let mut line = GraphLine::linear();
        line.set_x_lim(0.0, 1.0).unwrap();
        line.set_y_lim(0.0, 1.0).unwrap();
        line.set_x_values(vec![0.5]);
        line.set_y_values(vec![0.5]);
        line.calculate_x_data().unwrap();
        line.calculate_y_data().unwrap();
        let mut out = RenderList::new();
        line.render(&mut out);
        assert!(out.is_empty());
    }

    proptest! {
        #[test]
        fn prop_lim_read_back(min in -1.0e6f32..1.0e6, span in 1.0e-2f32..1.0e6) {
            let max = min + span;
            prop_assume!(max > min);
            let mut line = GraphLine::linear();
            line.set_x_lim(min, max).unwrap();
            line.set_y_lim(min, max).unwrap();
            prop_assert_eq!(line.x_lim(), Some(Range { min, max }));
            prop_assert_eq!(line.y_lim(), Some(Range { min, max }));
        }

        #[test]
        fn prop_reversed_lim_leaves_range(min in -1.0e3f32..1.0e3, gap in 1.0e-1f32..1.0e3) {
            let mut line = GraphLine::linear();
            line.set_x_lim(-1.0, 1.0).unwrap();
            prop_assert!(line.set_x_lim(min + gap, min).is_err());
            prop_assert_eq!(line.x_lim(), Some(Range::new(-1.0, 1.0)));
        }
    }
}
