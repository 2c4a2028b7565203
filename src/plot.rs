//! Plot widget entry points and builders.
//!
//! A [`Plot`] owns one [`GraphLine`] per data series together with a [`Grid`]
//! and a [`PlotLabel`]. It derives shared axis ranges from the data when
//! auto-scaling is enabled and keeps every line's ranges, data and point buffer
//! in sync with them.

use crate::axis::{Axis, AxisConfig, AxisFormatter, AxisScale, TextMeasurer};
use crate::error::{PlotError, Result};
use crate::geom::{Margins, ScreenRect};
use crate::graph_line::{GraphKind, GraphLine};
use crate::grid::Grid;
use crate::label::PlotLabel;
use crate::render::{Color, RenderCommand, RenderList};
use crate::style::Theme;
use crate::view::Range;

/// Axis layout of a plot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlotKind {
    /// Linear X and Y axes.
    Linear,
    /// Logarithmic X axis, linear Y axis.
    SemiLogX,
}

impl PlotKind {
    /// Kind of the graph lines backing this plot.
    pub fn graph_kind(self) -> GraphKind {
        match self {
            Self::Linear => GraphKind::Linear,
            Self::SemiLogX => GraphKind::LogX,
        }
    }
}

/// Plot layout and auto-scale settings.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PlotConfig {
    /// Fraction of the data span added on both sides of an auto-scaled X range.
    /// On a log axis the fraction applies to the span in decades.
    pub horizontal_margin: f32,
    /// Fraction of the data span added on both sides of an auto-scaled Y range.
    pub vertical_margin: f32,
    /// Pixel space between the plot bounds and the graph area, used by tick
    /// labels, axis labels and the title.
    pub area_margins: Margins,
}

impl Default for PlotConfig {
    fn default() -> Self {
        Self {
            horizontal_margin: 0.0,
            vertical_margin: 0.1,
            area_margins: Margins::default(),
        }
    }
}

/// Main plot widget container.
#[derive(Debug, Clone)]
pub struct Plot {
    kind: PlotKind,
    config: PlotConfig,
    theme: Theme,
    x_axis: AxisConfig,
    y_axis: AxisConfig,
    x_autoscale: bool,
    y_autoscale: bool,
    x_range: Option<Range>,
    y_range: Option<Range>,
    lines: Vec<GraphLine>,
    grid: Grid,
    label: PlotLabel,
    plot_area: ScreenRect,
    graph_area: ScreenRect,
    x_data: Vec<Vec<f32>>,
    y_data: Vec<Vec<f32>>,
}

impl Plot {
    /// Create a plot with default configuration.
    pub fn new(kind: PlotKind) -> Self {
        Self::builder().kind(kind).build()
    }

    /// Create a plot with linear axes.
    pub fn linear() -> Self {
        Self::new(PlotKind::Linear)
    }

    /// Create a plot with a logarithmic X axis.
    pub fn semi_log_x() -> Self {
        Self::new(PlotKind::SemiLogX)
    }

    /// Start building a plot with custom configuration.
    pub fn builder() -> PlotBuilder {
        PlotBuilder::default()
    }

    /// Access the plot kind.
    pub fn kind(&self) -> PlotKind {
        self.kind
    }

    /// Access the layout and auto-scale settings.
    pub fn config(&self) -> &PlotConfig {
        &self.config
    }

    /// Access the current theme.
    pub fn theme(&self) -> &Theme {
        &self.theme
    }

    /// Access the X axis configuration.
    pub fn x_axis(&self) -> &AxisConfig {
        &self.x_axis
    }

    /// Access the Y axis configuration.
    pub fn y_axis(&self) -> &AxisConfig {
        &self.y_axis
    }

    /// Access the graph lines, one per Y series.
    pub fn lines(&self) -> &[GraphLine] {
        &self.lines
    }

    /// Access the grid collaborator.
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Access the label collaborator.
    pub fn label(&self) -> &PlotLabel {
        &self.label
    }

    /// Current X range, explicit or auto-scaled.
    pub fn x_range(&self) -> Option<Range> {
        self.x_range
    }

    /// Current Y range, explicit or auto-scaled.
    pub fn y_range(&self) -> Option<Range> {
        self.y_range
    }

    /// Check whether the X range follows the data.
    pub fn is_x_autoscale(&self) -> bool {
        self.x_autoscale
    }

    /// Check whether the Y range follows the data.
    pub fn is_y_autoscale(&self) -> bool {
        self.y_autoscale
    }

    /// Bounds of the whole widget. Everything drawn is clipped to it.
    pub fn plot_area(&self) -> ScreenRect {
        self.plot_area
    }

    /// Area inside the margins where the grid and the lines are drawn.
    pub fn graph_area(&self) -> ScreenRect {
        self.graph_area
    }

    /// Fix the X range and stop auto-scaling it.
    pub fn x_lim(&mut self, min: f32, max: f32) -> Result<()> {
        let range = self.x_axis.limits(Axis::X, min, max)?;
        self.x_autoscale = false;
        self.x_range = Some(range);
        self.update_x_data_graph()?;
        self.update_grid();
        Ok(())
    }

    /// Fix the Y range and stop auto-scaling it.
    ///
    /// Equal bounds select [`Range::FULL`].
    pub fn y_lim(&mut self, min: f32, max: f32) -> Result<()> {
        let range = self.y_axis.limits(Axis::Y, min, max)?;
        self.y_autoscale = false;
        self.y_range = Some(range);
        self.update_y_data_graph()?;
        self.update_grid();
        Ok(())
    }

    /// Replace the Y data, one series per graph line.
    ///
    /// Lines are added or removed to match the number of series. Until X data
    /// is supplied, every line uses its 1-based sample index as X values.
    pub fn update_y_data(&mut self, y_data: Vec<Vec<f32>>) -> Result<()> {
        let y_range = if self.y_autoscale {
            self.auto_y_range(&y_data)
        } else {
            self.y_range
        };
        let x_range = if self.x_autoscale {
            self.auto_x_range(&self.x_data, &y_data)
        } else {
            self.x_range
        };
        self.check_ranges(x_range, y_range)?;

        self.ensure_lines(y_data.len());
        self.y_data = y_data;
        self.x_range = x_range;
        self.y_range = y_range;
        self.update_y_data_graph()?;
        self.update_x_data_graph()?;
        self.update_grid();
        Ok(())
    }

    /// Replace the X data.
    ///
    /// A single series is shared by every line; otherwise series are matched
    /// to lines by index.
    pub fn update_x_data(&mut self, x_data: Vec<Vec<f32>>) -> Result<()> {
        let x_range = if self.x_autoscale {
            self.auto_x_range(&x_data, &self.y_data)
        } else {
            self.x_range
        };
        self.check_ranges(x_range, self.y_range)?;

        self.x_data = x_data;
        self.x_range = x_range;
        self.update_x_data_graph()?;
        self.update_grid();
        Ok(())
    }

    /// Set the X axis label.
    pub fn set_x_label(&mut self, x_label: impl Into<String>) {
        self.label.set_x_label(x_label);
    }

    /// Set the Y axis label.
    pub fn set_y_label(&mut self, y_label: impl Into<String>) {
        self.label.set_y_label(y_label);
    }

    /// Set the title.
    pub fn set_title(&mut self, title: impl Into<String>) {
        self.label.set_title(title);
    }

    /// Set the dash pattern of the line at `graph_index`.
    pub fn make_graph_dashed(
        &mut self,
        dash_lengths: impl Into<Vec<f32>>,
        graph_index: usize,
    ) -> Result<()> {
        self.line_mut(graph_index)?.set_dashed_path(dash_lengths)
    }

    /// Set the stroke colour of the line at `graph_index`.
    pub fn set_graph_colour(&mut self, colour: Color, graph_index: usize) -> Result<()> {
        self.line_mut(graph_index)?.set_graph_colour(colour);
        Ok(())
    }

    /// Show or hide the grid lines.
    pub fn grid_on(&mut self, grid_on: bool) {
        self.grid.set_visible(grid_on);
    }

    /// Lay the plot out in `bounds` and recompute every line.
    pub fn resize(&mut self, bounds: ScreenRect) -> Result<()> {
        self.plot_area = bounds;
        self.graph_area = bounds.inset(self.config.area_margins);
        log::trace!(
            "plot resized to {}x{}, graph area {}x{}",
            bounds.width(),
            bounds.height(),
            self.graph_area.width(),
            self.graph_area.height()
        );
        for line in &mut self.lines {
            line.set_bounds(self.graph_area);
        }
        self.update_x_data_graph()?;
        self.update_y_data_graph()?;
        self.update_grid();
        Ok(())
    }

    /// Build the render commands: grid, lines, then labels.
    pub fn render(&self, measurer: &dyn TextMeasurer) -> RenderList {
        let mut out = RenderList::new();
        if !self.plot_area.is_valid() {
            return out;
        }
        out.push(RenderCommand::ClipRect(self.plot_area));
        self.grid.render(&self.theme, measurer, &mut out);
        out.push(RenderCommand::ClipRect(self.graph_area));
        for line in &self.lines {
            line.render(&mut out);
        }
        out.push(RenderCommand::ClipEnd);
        self.label
            .render(self.plot_area, self.graph_area, &self.theme, measurer, &mut out);
        out.push(RenderCommand::ClipEnd);
        out
    }

    fn line_mut(&mut self, index: usize) -> Result<&mut GraphLine> {
        let len = self.lines.len();
        self.lines
            .get_mut(index)
            .ok_or(PlotError::GraphIndexOutOfRange { index, len })
    }

    fn ensure_lines(&mut self, count: usize) {
        if self.lines.len() > count {
            self.lines.truncate(count);
        }
        while self.lines.len() < count {
            let mut line = GraphLine::new(self.kind.graph_kind());
            line.set_bounds(self.graph_area);
            line.set_graph_colour(self.theme.series_color(self.lines.len()));
            self.lines.push(line);
        }
    }

    /// X range covering the data, or the current range when nothing can be
    /// derived from it.
    fn auto_x_range(&self, x_data: &[Vec<f32>], y_data: &[Vec<f32>]) -> Option<Range> {
        let series: Vec<Vec<f32>> = (0..y_data.len().max(x_data.len()))
            .map(|index| x_series(x_data, y_data, index))
            .collect();
        let range = match self.x_axis.scale() {
            AxisScale::Linear => auto_linear_range(&series, self.config.horizontal_margin),
            AxisScale::Log10 => auto_log_range(&series, self.config.horizontal_margin),
        };
        match range {
            Some(range) => {
                log::debug!("auto-scaled x range to {}..{}", range.min, range.max);
                Some(range)
            }
            None => self.x_range,
        }
    }

    /// Y range covering the data, or the current range when nothing can be
    /// derived from it.
    fn auto_y_range(&self, y_data: &[Vec<f32>]) -> Option<Range> {
        match auto_linear_range(y_data, self.config.vertical_margin) {
            Some(range) => {
                log::debug!("auto-scaled y range to {}..{}", range.min, range.max);
                Some(range)
            }
            None => self.y_range,
        }
    }

    fn check_ranges(&self, x_range: Option<Range>, y_range: Option<Range>) -> Result<()> {
        if let Some(range) = x_range {
            self.x_axis.limits(Axis::X, range.min, range.max)?;
        }
        if let Some(range) = y_range {
            self.y_axis.limits(Axis::Y, range.min, range.max)?;
        }
        Ok(())
    }

    fn update_x_data_graph(&mut self) -> Result<()> {
        for index in 0..self.lines.len() {
            let x_values = x_series(&self.x_data, &self.y_data, index);
            let line = &mut self.lines[index];
            line.set_x_values(x_values);
            if let Some(range) = self.x_range {
                line.set_x_lim(range.min, range.max)?;
                line.calculate_x_data()?;
            }
        }
        Ok(())
    }

    fn update_y_data_graph(&mut self) -> Result<()> {
        for (line, y_values) in self.lines.iter_mut().zip(&self.y_data) {
            line.set_y_values(y_values.as_slice());
            if let Some(range) = self.y_range {
                line.set_y_lim(range.min, range.max)?;
                line.calculate_y_data()?;
            }
        }
        Ok(())
    }

    fn update_grid(&mut self) {
        self.grid.update(
            self.graph_area,
            &self.x_axis,
            self.x_range,
            &self.y_axis,
            self.y_range,
        );
    }
}

impl Default for Plot {
    fn default() -> Self {
        Self::linear()
    }
}

/// X values of the line at `index`: the shared series, the matching series, or
/// 1-based sample indices when no X data was supplied.
fn x_series(x_data: &[Vec<f32>], y_data: &[Vec<f32>], index: usize) -> Vec<f32> {
    match x_data {
        [] => {
            let len = y_data.get(index).map_or(0, Vec::len);
            (1..=len).map(|i| i as f32).collect()
        }
        [shared] => shared.clone(),
        many => many.get(index).cloned().unwrap_or_default(),
    }
}

/// Combined range of every series, padded by `margin` times its span.
///
/// A range collapsed to one value is widened first so it can be scaled. The
/// padding is dropped when it would overflow `f32`.
fn auto_linear_range(series: &[Vec<f32>], margin: f32) -> Option<Range> {
    let range = series
        .iter()
        .filter_map(|values| Range::from_values(values))
        .reduce(|a, b| Range::union(a, b).unwrap_or(a))?;
    let range = if range.is_degenerate() {
        let half = (range.min.abs() * 0.05).max(0.5);
        Range::new(range.min - half, range.max + half)
    } else {
        range
    };
    let scalable = |range: &Range| range.is_finite() && range.span().is_finite();
    let padded = range.padded(margin);
    if scalable(&padded) {
        Some(padded)
    } else {
        scalable(&range).then_some(range)
    }
}

/// Whole decades around the positive values of every series, padded by
/// `margin` times the span in decades.
///
/// The upper decade is always above the largest value so that no sample lands
/// on the range maximum, which a log axis excludes.
fn auto_log_range(series: &[Vec<f32>], margin: f32) -> Option<Range> {
    let range = series
        .iter()
        .filter_map(|values| Range::from_values_where(values, |value| value > 0.0))
        .reduce(|a, b| Range::union(a, b).unwrap_or(a))?;
    let low = range.min.log10().floor();
    let mut high = range.max.log10().floor() + 1.0;
    if 10_f32.powf(high) <= range.max {
        high += 1.0;
    }
    let padding = (high - low) * margin;
    let range = Range::new(10_f32.powf(low - padding), 10_f32.powf(high + padding));
    AxisScale::Log10.is_range_valid(range).then_some(range)
}

/// Builder for configuring a plot before construction.
#[derive(Debug)]
pub struct PlotBuilder {
    kind: PlotKind,
    config: PlotConfig,
    theme: Theme,
    x_formatter: AxisFormatter,
    y_formatter: AxisFormatter,
    label: PlotLabel,
    grid_on: bool,
}

impl Default for PlotBuilder {
    fn default() -> Self {
        Self {
            kind: PlotKind::Linear,
            config: PlotConfig::default(),
            theme: Theme::default(),
            x_formatter: AxisFormatter::default(),
            y_formatter: AxisFormatter::default(),
            label: PlotLabel::default(),
            grid_on: true,
        }
    }
}

impl PlotBuilder {
    /// Set the axis layout.
    pub fn kind(mut self, kind: PlotKind) -> Self {
        self.kind = kind;
        self
    }

    /// Set the layout and auto-scale settings.
    pub fn config(mut self, config: PlotConfig) -> Self {
        self.config = config;
        self
    }

    /// Set the theme used by the plot.
    pub fn theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }

    /// Set the X tick label formatter.
    pub fn x_formatter(mut self, formatter: AxisFormatter) -> Self {
        self.x_formatter = formatter;
        self
    }

    /// Set the Y tick label formatter.
    pub fn y_formatter(mut self, formatter: AxisFormatter) -> Self {
        self.y_formatter = formatter;
        self
    }

    /// Set the title.
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.label.set_title(title);
        self
    }

    /// Set the X axis label.
    pub fn x_label(mut self, x_label: impl Into<String>) -> Self {
        self.label.set_x_label(x_label);
        self
    }

    /// Set the Y axis label.
    pub fn y_label(mut self, y_label: impl Into<String>) -> Self {
        self.label.set_y_label(y_label);
        self
    }

    /// Show or hide the grid lines.
    pub fn grid(mut self, grid_on: bool) -> Self {
        self.grid_on = grid_on;
        self
    }

    /// Build the plot.
    pub fn build(self) -> Plot {
        let graph_kind = self.kind.graph_kind();
        let mut grid = Grid::new();
        grid.set_visible(self.grid_on);
        Plot {
            kind: self.kind,
            config: self.config,
            theme: self.theme,
            x_axis: graph_kind.x_axis().with_formatter(self.x_formatter),
            y_axis: graph_kind.y_axis().with_formatter(self.y_formatter),
            x_autoscale: true,
            y_autoscale: true,
            x_range: None,
            y_range: None,
            lines: Vec::new(),
            grid,
            label: self.label,
            plot_area: ScreenRect::default(),
            graph_area: ScreenRect::default(),
            x_data: Vec::new(),
            y_data: Vec::new(),
        }
    }
}
