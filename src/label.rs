//! Title and axis labels around the graph area.

use crate::axis::TextMeasurer;
use crate::geom::{ScreenPoint, ScreenRect};
use crate::render::{RenderCommand, RenderList, TextStyle};
use crate::style::Theme;

const TITLE_SIZE: f32 = 14.0;
const LABEL_SIZE: f32 = 12.0;
const LABEL_GAP: f32 = 6.0;
/// Room left below the graph for the tick labels.
const TICK_LABEL_BAND: f32 = 18.0;

/// Label collaborator owned by a plot.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlotLabel {
    x_label: String,
    y_label: String,
    title: String,
}

impl PlotLabel {
    /// Create a label set with empty texts.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the X axis label.
    pub fn set_x_label(&mut self, x_label: impl Into<String>) {
        self.x_label = x_label.into();
    }

    /// Set the Y axis label.
    pub fn set_y_label(&mut self, y_label: impl Into<String>) {
        self.y_label = y_label.into();
    }

    /// Set the title.
    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
    }

    /// Access the X axis label.
    pub fn x_label(&self) -> &str {
        &self.x_label
    }

    /// Access the Y axis label.
    pub fn y_label(&self) -> &str {
        &self.y_label
    }

    /// Access the title.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Append the non-empty labels.
    ///
    /// The title is centred above `graph_area`, the X label centred below the
    /// tick labels, and the Y label at the left edge of `plot_area`, vertically
    /// centred on the graph.
    pub fn render(
        &self,
        plot_area: ScreenRect,
        graph_area: ScreenRect,
        theme: &Theme,
        measurer: &dyn TextMeasurer,
        out: &mut RenderList,
    ) {
        let centre_x = (graph_area.min.x + graph_area.max.x) * 0.5;
        let centre_y = (graph_area.min.y + graph_area.max.y) * 0.5;

        if !self.title.is_empty() {
            let (width, height) = measurer.measure(&self.title, TITLE_SIZE);
            push_text(
                out,
                &self.title,
                ScreenPoint::new(centre_x - width * 0.5, graph_area.min.y - height - LABEL_GAP),
                TextStyle {
                    color: theme.label,
                    size: TITLE_SIZE,
                },
            );
        }
        let style = TextStyle {
            color: theme.label,
            size: LABEL_SIZE,
        };
        if !self.x_label.is_empty() {
            let (width, _) = measurer.measure(&self.x_label, LABEL_SIZE);
            push_text(
                out,
                &self.x_label,
                ScreenPoint::new(centre_x - width * 0.5, graph_area.max.y + TICK_LABEL_BAND),
                style.clone(),
            );
        }
        if !self.y_label.is_empty() {
            let (_, height) = measurer.measure(&self.y_label, LABEL_SIZE);
            push_text(
                out,
                &self.y_label,
                ScreenPoint::new(plot_area.min.x + LABEL_GAP, centre_y - height * 0.5),
                style,
            );
        }
    }
}

fn push_text(out: &mut RenderList, text: &str, position: ScreenPoint, style: TextStyle) {
    out.push(RenderCommand::Text {
        position,
        text: text.to_string(),
        style,
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::axis::MonospaceMeasurer;

    fn texts(list: &RenderList) -> Vec<(&str, ScreenPoint)> {
        list.commands()
            .iter()
            .filter_map(|command| match command {
                RenderCommand::Text { text, position, .. } => Some((text.as_str(), *position)),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn empty_labels_draw_nothing() {
        let mut out = RenderList::new();
        let area = ScreenRect::from_origin_size(0.0, 0.0, 100.0, 100.0);
        PlotLabel::new().render(area, area, &Theme::light(), &MonospaceMeasurer, &mut out);
        assert!(out.is_empty());
    }

    #[test]
    fn labels_are_placed_around_graph() {
        let mut label = PlotLabel::new();
        label.set_title("Response");
        label.set_x_label("Frequency");
        label.set_y_label("Gain");
        assert_eq!(label.title(), "Response");

        let plot_area = ScreenRect::from_origin_size(0.0, 0.0, 300.0, 200.0);
        let graph_area = ScreenRect::from_origin_size(60.0, 30.0, 220.0, 130.0);
        let mut out = RenderList::new();
        label.render(plot_area, graph_area, &Theme::light(), &MonospaceMeasurer, &mut out);

        let placed = texts(&out);
        assert_eq!(placed.len(), 3);
        let (_, title) = placed[0];
        assert!(title.y < graph_area.min.y);
        let (_, x_label) = placed[1];
        assert!(x_label.y > graph_area.max.y);
        let (_, y_label) = placed[2];
        assert!(y_label.x < graph_area.min.x);
    }
}
