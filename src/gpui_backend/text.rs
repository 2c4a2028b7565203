use gpui::{TextRun, Window, font, px};

use crate::axis::TextMeasurer;

/// Measures text with the window text system.
pub(crate) struct GpuiTextMeasurer<'a> {
    window: &'a Window,
    font_family: &'a str,
}

impl<'a> GpuiTextMeasurer<'a> {
    pub(crate) fn new(window: &'a Window, font_family: &'a str) -> Self {
        Self {
            window,
            font_family,
        }
    }
}

impl TextMeasurer for GpuiTextMeasurer<'_> {
    fn measure(&self, text: &str, size: f32) -> (f32, f32) {
        if text.is_empty() {
            return (0.0, 0.0);
        }
        let run = TextRun {
            len: text.len(),
            font: font(self.font_family.to_string()),
            color: gpui::black(),
            background_color: None,
            underline: None,
            strikethrough: None,
        };
        let shaped =
            self.window
                .text_system()
                .shape_line(text.to_string().into(), px(size), &[run], None);
        let width = f32::from(shaped.width);
        let height = f32::from(shaped.ascent + shaped.descent);
        (width, height.max(size * 1.2))
    }
}
