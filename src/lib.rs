//! gpui_lineplot draws line plots with linear or logarithmic X axes.
//! Plot geometry and render commands are toolkit independent; the `gpui`
//! feature adds a GPUI view that paints them.

#![forbid(unsafe_code)]

pub mod axis;
pub mod error;
pub mod geom;
pub mod graph_line;
pub mod grid;
pub mod label;
pub mod plot;
pub mod render;
pub mod style;
pub mod transform;
pub mod view;

#[cfg(feature = "gpui")]
pub mod gpui_backend;

pub use axis::{
    Axis, AxisConfig, AxisFormatter, AxisScale, DegenerateRangePolicy, MonospaceMeasurer,
    TextMeasurer,
};
pub use error::{PlotError, Result};
pub use geom::{Margins, ScreenPoint, ScreenRect};
pub use graph_line::{GraphKind, GraphLine};
pub use grid::{Grid, Tick};
pub use label::PlotLabel;
pub use plot::{Plot, PlotBuilder, PlotConfig, PlotKind};
pub use render::{
    Color, LineCap, LineSegment, LineStyle, RectStyle, RenderCommand, RenderList, TextStyle,
    build_dashed_segments,
};
pub use style::Theme;
pub use transform::Transform;
pub use view::Range;
