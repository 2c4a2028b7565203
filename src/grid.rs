//! Grid lines and tick labels behind the graph lines.

use crate::axis::{Axis, AxisConfig, AxisScale, TextMeasurer};
use crate::geom::{ScreenPoint, ScreenRect};
use crate::render::{
    LineCap, LineSegment, LineStyle, RectStyle, RenderCommand, RenderList, TextStyle,
};
use crate::style::Theme;
use crate::transform::Transform;
use crate::view::Range;

const TARGET_TICKS: usize = 10;
const MAX_TICKS: usize = 1000;
const LABEL_PADDING: f32 = 4.0;
const TICK_LABEL_SIZE: f32 = 11.0;

/// A grid line position along one axis.
#[derive(Debug, Clone, PartialEq)]
pub struct Tick {
    /// Data value of the tick.
    pub value: f32,
    /// Absolute pixel position along the axis.
    pub position: f32,
    /// Major ticks get a label and a stronger line.
    pub major: bool,
    /// Formatted label, empty for minor ticks.
    pub label: String,
}

/// Grid collaborator owned by a plot.
///
/// Ticks are recomputed by [`Grid::update`] whenever the plot area or the
/// ranges change. Hiding the grid removes the grid lines; tick labels and the
/// frame stay visible.
#[derive(Debug, Clone)]
pub struct Grid {
    visible: bool,
    area: ScreenRect,
    x_ticks: Vec<Tick>,
    y_ticks: Vec<Tick>,
}

impl Grid {
    /// Create a visible grid with no ticks.
    pub fn new() -> Self {
        Self {
            visible: true,
            area: ScreenRect::default(),
            x_ticks: Vec::new(),
            y_ticks: Vec::new(),
        }
    }

    /// Show or hide the grid lines.
    pub fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    /// Check whether grid lines are drawn.
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Ticks along the X axis.
    pub fn x_ticks(&self) -> &[Tick] {
        &self.x_ticks
    }

    /// Ticks along the Y axis.
    pub fn y_ticks(&self) -> &[Tick] {
        &self.y_ticks
    }

    /// Recompute ticks for the graph area and the current ranges.
    ///
    /// An axis without a range gets no ticks.
    pub fn update(
        &mut self,
        area: ScreenRect,
        x_axis: &AxisConfig,
        x_range: Option<Range>,
        y_axis: &AxisConfig,
        y_range: Option<Range>,
    ) {
        self.area = area;
        self.x_ticks = axis_ticks(Axis::X, area, x_axis, x_range);
        self.y_ticks = axis_ticks(Axis::Y, area, y_axis, y_range);
    }

    /// Append grid lines, the graph frame, and tick labels.
    pub fn render(&self, theme: &Theme, measurer: &dyn TextMeasurer, out: &mut RenderList) {
        let area = self.area;
        if !area.is_valid() {
            return;
        }

        if self.visible {
            let mut major = Vec::new();
            let mut minor = Vec::new();
            for tick in &self.x_ticks {
                let segment = LineSegment::new(
                    ScreenPoint::new(tick.position, area.min.y),
                    ScreenPoint::new(tick.position, area.max.y),
                );
                if tick.major {
                    major.push(segment);
                } else {
                    minor.push(segment);
                }
            }
            for tick in &self.y_ticks {
                let segment = LineSegment::new(
                    ScreenPoint::new(area.min.x, tick.position),
                    ScreenPoint::new(area.max.x, tick.position),
                );
                if tick.major {
                    major.push(segment);
                } else {
                    minor.push(segment);
                }
            }
            let style = LineStyle {
                color: theme.grid,
                cap: LineCap::Butt,
                ..LineStyle::default()
            };
            if !minor.is_empty() {
                out.push(RenderCommand::LineSegments {
                    segments: minor,
                    style: LineStyle {
                        color: theme.grid.with_alpha(theme.grid.a * 0.5),
                        ..style
                    },
                });
            }
            if !major.is_empty() {
                out.push(RenderCommand::LineSegments {
                    segments: major,
                    style,
                });
            }
        }

        out.push(RenderCommand::Rect {
            rect: area,
            style: RectStyle {
                stroke: theme.tick_label,
                ..RectStyle::default()
            },
        });

        let text_style = TextStyle {
            color: theme.tick_label,
            size: TICK_LABEL_SIZE,
        };
        for tick in self.x_ticks.iter().filter(|tick| tick.major) {
            let (width, _) = measurer.measure(&tick.label, text_style.size);
            out.push(RenderCommand::Text {
                position: ScreenPoint::new(tick.position - width * 0.5, area.max.y + LABEL_PADDING),
                text: tick.label.clone(),
                style: text_style.clone(),
            });
        }
        for tick in self.y_ticks.iter().filter(|tick| tick.major) {
            let (width, height) = measurer.measure(&tick.label, text_style.size);
            out.push(RenderCommand::Text {
                position: ScreenPoint::new(
                    area.min.x - width - LABEL_PADDING,
                    tick.position - height * 0.5,
                ),
                text: tick.label.clone(),
                style: text_style.clone(),
            });
        }
    }
}

impl Default for Grid {
    fn default() -> Self {
        Self::new()
    }
}

fn axis_ticks(
    axis: Axis,
    area: ScreenRect,
    config: &AxisConfig,
    range: Option<Range>,
) -> Vec<Tick> {
    let Some(range) = range else {
        return Vec::new();
    };
    let (origin, extent) = match axis {
        Axis::X => (area.min.x, area.width()),
        Axis::Y => (area.min.y, area.height()),
    };
    let Some(transform) = Transform::new(axis, config.scale(), range, extent) else {
        return Vec::new();
    };
    let values: Vec<(f32, bool)> = match config.scale() {
        AxisScale::Linear => linear_ticks(range, TARGET_TICKS)
            .into_iter()
            .map(|value| (value, true))
            .collect(),
        AxisScale::Log10 => log_ticks(range),
    };
    values
        .into_iter()
        .filter_map(|(value, major)| {
            let position = origin + transform.map(value)?;
            Some(Tick {
                value,
                position,
                major,
                label: if major {
                    config.formatter().format(value)
                } else {
                    String::new()
                },
            })
        })
        .collect()
}

/// Round a raw step up to 1, 2, or 5 times a power of ten.
fn nice_step(raw_step: f32) -> f32 {
    let base = 10_f32.powf(raw_step.abs().log10().floor());
    for multiple in [1.0, 2.0, 5.0] {
        let candidate = base * multiple;
        if candidate >= raw_step.abs() {
            return candidate;
        }
    }
    base * 10.0
}

/// Evenly spaced "nice" values inside the range, about `target` intervals apart.
pub fn linear_ticks(range: Range, target: usize) -> Vec<f32> {
    if !range.is_valid() || target == 0 {
        return Vec::new();
    }
    let step = nice_step(range.span() / target as f32);
    if !(step > 0.0) || !step.is_finite() {
        return Vec::new();
    }
    let start = (range.min / step).ceil() * step;
    let tolerance = step * 1e-3;
    let mut ticks = Vec::new();
    for index in 0..MAX_TICKS {
        let value = start + index as f32 * step;
        if !value.is_finite() || value > range.max + tolerance {
            break;
        }
        // Snap values that should be zero but carry rounding noise.
        ticks.push(if value.abs() < tolerance { 0.0 } else { value });
    }
    ticks
}

/// Decade ticks (major) and 2..9 multiples (minor) inside a positive range.
pub fn log_ticks(range: Range) -> Vec<(f32, bool)> {
    if !AxisScale::Log10.is_range_valid(range) || !(range.span() > 0.0) {
        return Vec::new();
    }
    let first = range.min.log10().floor() as i32;
    let last = range.max.log10().ceil() as i32;
    let tolerance = 1e-4;
    let mut ticks = Vec::new();
    for exponent in first..=last {
        let decade = 10_f32.powi(exponent);
        for multiple in 1..=9 {
            let value = decade * multiple as f32;
            let inside = value >= range.min * (1.0 - tolerance)
                && value <= range.max * (1.0 + tolerance);
            if inside {
                ticks.push((value, multiple == 1));
            }
        }
        if ticks.len() >= MAX_TICKS {
            break;
        }
    }
    ticks
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::axis::MonospaceMeasurer;
    use approx::assert_relative_eq;

    #[test]
    fn nice_steps_round_up() {
        assert_relative_eq!(nice_step(0.9), 1.0);
        assert_relative_eq!(nice_step(1.3), 2.0);
        assert_relative_eq!(nice_step(3.0), 5.0);
        assert_relative_eq!(nice_step(7.0), 10.0);
        assert_relative_eq!(nice_step(0.03), 0.05, epsilon = 1e-7);
    }

    #[test]
    fn linear_ticks_cover_range() {
        let ticks = linear_ticks(Range::new(0.0, 10.0), 10);
        assert_eq!(ticks.len(), 11);
        assert_eq!(ticks[0], 0.0);
        assert_relative_eq!(ticks[10], 10.0);
    }

    #[test]
    fn linear_ticks_snap_zero() {
        let ticks = linear_ticks(Range::new(-0.3, 0.3), 6);
        assert!(ticks.contains(&0.0));
    }

    #[test]
    fn linear_ticks_handle_full_range() {
        let ticks = linear_ticks(Range::FULL, 10);
        assert!(!ticks.is_empty());
        assert!(ticks.len() <= 11);
        assert!(ticks.iter().all(|value| value.is_finite()));
    }

    #[test]
    fn log_ticks_mark_decades_major() {
        let ticks = log_ticks(Range::new(1.0, 100.0));
        let majors: Vec<f32> = ticks
            .iter()
            .filter(|(_, major)| *major)
            .map(|(value, _)| *value)
            .collect();
        assert_eq!(majors, vec![1.0, 10.0, 100.0]);
        assert_eq!(ticks.len(), 19);
    }

    #[test]
    fn update_positions_ticks_in_area() {
        let mut grid = Grid::new();
        let area = ScreenRect::from_origin_size(50.0, 10.0, 100.0, 200.0);
        grid.update(
            area,
            &AxisConfig::log10(),
            Some(Range::new(1.0, 100.0)),
            &AxisConfig::linear(),
            Some(Range::new(0.0, 10.0)),
        );
        let decade = grid
            .x_ticks()
            .iter()
            .find(|tick| tick.value == 10.0)
            .unwrap();
        assert_relative_eq!(decade.position, 100.0, epsilon = 1e-3);
        assert_eq!(decade.label, "10");

        let bottom = &grid.y_ticks()[0];
        assert_eq!(bottom.value, 0.0);
        assert_relative_eq!(bottom.position, 210.0);
    }

    #[test]
    fn missing_range_has_no_ticks() {
        let mut grid = Grid::new();
        grid.update(
            ScreenRect::from_origin_size(0.0, 0.0, 100.0, 100.0),
            &AxisConfig::linear(),
            None,
            &AxisConfig::linear(),
            Some(Range::new(0.0, 1.0)),
        );
        assert!(grid.x_ticks().is_empty());
        assert!(!grid.y_ticks().is_empty());
    }

    #[test]
    fn hidden_grid_keeps_frame_and_labels() {
        let mut grid = Grid::new();
        grid.update(
            ScreenRect::from_origin_size(0.0, 0.0, 100.0, 100.0),
            &AxisConfig::linear(),
            Some(Range::new(0.0, 10.0)),
            &AxisConfig::linear(),
            Some(Range::new(0.0, 10.0)),
        );
        let theme = Theme::light();

        let mut shown = RenderList::new();
        grid.render(&theme, &MonospaceMeasurer, &mut shown);
        grid.set_visible(false);
        let mut hidden = RenderList::new();
        grid.render(&theme, &MonospaceMeasurer, &mut hidden);

        let has_lines = |list: &RenderList| {
            list.commands()
                .iter()
                .any(|command| matches!(command, RenderCommand::LineSegments { .. }))
        };
        assert!(has_lines(&shown));
        assert!(!has_lines(&hidden));
        assert_eq!(shown.len(), hidden.len() + 1);
        assert!(
            hidden
                .commands()
                .iter()
                .any(|command| matches!(command, RenderCommand::Rect { .. }))
        );
    }
}
