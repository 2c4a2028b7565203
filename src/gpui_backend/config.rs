/// Configuration for the GPUI plot view.
#[derive(Debug, Clone)]
pub struct PlotViewConfig {
    /// Fill the view with the theme background before painting.
    pub show_background: bool,
    /// Font family for tick labels, axis labels and the title.
    pub font_family: String,
}

impl Default for PlotViewConfig {
    fn default() -> Self {
        Self {
            show_background: true,
            font_family: ".SystemUIFont".to_string(),
        }
    }
}
