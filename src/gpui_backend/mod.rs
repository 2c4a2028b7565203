//! GPUI integration for gpui_lineplot.
//!
//! This module provides a GPUI view that lays out a [`Plot`](crate::plot::Plot)
//! in its bounds every frame and paints the resulting render commands.

mod config;
mod paint;
mod text;
mod view;

pub use config::PlotViewConfig;
pub use view::{GpuiPlotView, PlotHandle};
