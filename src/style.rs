//! Plot colours and theming.

use crate::render::Color;

/// Visual theme for plots.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Theme {
    /// Background fill behind the whole plot.
    pub background: Color,
    /// Grid line colour.
    pub grid: Color,
    /// Tick label colour.
    pub tick_label: Color,
    /// Title and axis label colour.
    pub label: Color,
    /// Colours assigned to graph lines in order, wrapping around.
    pub series: Vec<Color>,
}

impl Theme {
    /// Create the default theme.
    pub fn new() -> Self {
        Self::light()
    }

    /// Dark text on a white background.
    pub fn light() -> Self {
        Self {
            background: Color::WHITE,
            grid: Color::new(0.0, 0.0, 0.0, 0.15),
            tick_label: Color::new(0.25, 0.25, 0.25, 1.0),
            label: Color::BLACK,
            series: default_palette(),
        }
    }

    /// Light text on a dark background.
    pub fn dark() -> Self {
        Self {
            background: Color::new(0.08, 0.09, 0.11, 1.0),
            grid: Color::new(1.0, 1.0, 1.0, 0.12),
            tick_label: Color::new(0.75, 0.77, 0.8, 1.0),
            label: Color::new(0.92, 0.93, 0.95, 1.0),
            series: default_palette(),
        }
    }

    /// Colour for the graph line at `index`.
    pub fn series_color(&self, index: usize) -> Color {
        if self.series.is_empty() {
            return self.label;
        }
        self.series[index % self.series.len()]
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::new()
    }
}

fn default_palette() -> Vec<Color> {
    vec![
        Color::from_rgb8(0x1f, 0x77, 0xb4),
        Color::from_rgb8(0xff, 0x7f, 0x0e),
        Color::from_rgb8(0x2c, 0xa0, 0x2c),
        Color::from_rgb8(0xd6, 0x27, 0x28),
        Color::from_rgb8(0x94, 0x67, 0xbd),
        Color::from_rgb8(0x8c, 0x56, 0x4b),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn series_colors_wrap() {
        let theme = Theme::light();
        assert_eq!(theme.series_color(0), theme.series_color(theme.series.len()));
    }

    #[test]
    fn empty_palette_falls_back_to_label() {
        let theme = Theme {
            series: Vec::new(),
            ..Theme::dark()
        };
        assert_eq!(theme.series_color(3), theme.label);
    }
}
