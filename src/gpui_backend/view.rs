use std::sync::{Arc, PoisonError, RwLock};

use gpui::prelude::*;
use gpui::{Bounds, Pixels, Window, canvas, div};

use crate::geom::ScreenRect;
use crate::plot::Plot;
use crate::render::RenderList;

use super::config::PlotViewConfig;
use super::paint::{paint_list, to_hsla};
use super::text::GpuiTextMeasurer;

/// A GPUI view that renders a [`Plot`].
///
/// The plot is resized to the view bounds on every frame, so data and limit
/// updates made through a [`PlotHandle`] show up on the next repaint.
#[derive(Clone)]
pub struct GpuiPlotView {
    plot: Arc<RwLock<Plot>>,
    config: PlotViewConfig,
}

impl GpuiPlotView {
    /// Create a new GPUI plot view for the given plot.
    ///
    /// Uses the default [`PlotViewConfig`].
    pub fn new(plot: Plot) -> Self {
        Self::with_config(plot, PlotViewConfig::default())
    }

    /// Create a new GPUI plot view with a custom configuration.
    pub fn with_config(plot: Plot, config: PlotViewConfig) -> Self {
        Self {
            plot: Arc::new(RwLock::new(plot)),
            config,
        }
    }

    /// Get a handle for mutating the underlying plot.
    ///
    /// This is useful for streaming updates from async tasks.
    pub fn plot_handle(&self) -> PlotHandle {
        PlotHandle {
            plot: Arc::clone(&self.plot),
        }
    }
}

impl Render for GpuiPlotView {
    fn render(&mut self, _window: &mut Window, _cx: &mut Context<Self>) -> impl IntoElement {
        let plot = Arc::clone(&self.plot);
        let config = self.config.clone();
        let background = self
            .plot
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .theme()
            .background;
        let font_family = config.font_family.clone();

        let mut root = div().size_full();
        if config.show_background {
            root = root.bg(to_hsla(background));
        }
        root.child(
            canvas(
                move |bounds, window, _| {
                    let mut plot = plot.write().unwrap_or_else(PoisonError::into_inner);
                    build_frame(&mut plot, &config, bounds, window)
                },
                move |_, list, window, cx| {
                    paint_list(&list, &font_family, window, cx);
                },
            )
            .size_full(),
        )
    }
}

fn build_frame(
    plot: &mut Plot,
    config: &PlotViewConfig,
    bounds: Bounds<Pixels>,
    window: &Window,
) -> RenderList {
    let rect = ScreenRect::from_origin_size(
        f32::from(bounds.origin.x),
        f32::from(bounds.origin.y),
        f32::from(bounds.size.width),
        f32::from(bounds.size.height),
    );
    if rect != plot.plot_area() {
        if let Err(err) = plot.resize(rect) {
            log::warn!("failed to lay out plot: {err}");
        }
    }
    plot.render(&GpuiTextMeasurer::new(window, &config.font_family))
}

/// A handle for mutating a [`Plot`] held inside a `GpuiPlotView`.
///
/// The handle clones cheaply and can be moved into async tasks.
#[derive(Clone)]
pub struct PlotHandle {
    plot: Arc<RwLock<Plot>>,
}

impl PlotHandle {
    /// Read the plot state.
    ///
    /// The plot is locked for the duration of the callback.
    pub fn read<R>(&self, f: impl FnOnce(&Plot) -> R) -> R {
        let plot = self.plot.read().unwrap_or_else(PoisonError::into_inner);
        f(&plot)
    }

    /// Mutate the plot state.
    ///
    /// The plot is locked for the duration of the callback.
    pub fn write<R>(&self, f: impl FnOnce(&mut Plot) -> R) -> R {
        let mut plot = self.plot.write().unwrap_or_else(PoisonError::into_inner);
        f(&mut plot)
    }
}
