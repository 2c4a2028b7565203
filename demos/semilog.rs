use gpui::{AppContext, Application, Bounds, WindowBounds, WindowOptions, px, size};

use gpui_lineplot::gpui_backend::{GpuiPlotView, PlotViewConfig};
use gpui_lineplot::{Plot, PlotKind, Theme};

/// Gain in dB of a first-order low-pass filter at `frequency`.
fn low_pass_gain(frequency: f32, cutoff: f32) -> f32 {
    let ratio = frequency / cutoff;
    -10.0 * (1.0 + ratio * ratio).log10()
}

fn main() {
    Application::new().run(|cx| {
        let options = WindowOptions {
            window_bounds: Some(WindowBounds::Windowed(Bounds::centered(
                None,
                size(px(720.0), px(480.0)),
                cx,
            ))),
            ..Default::default()
        };

        cx.open_window(options, |_window, cx| {
            let frequencies: Vec<f32> = (0..=300)
                .map(|i| 10_f32.powf(1.0 + i as f32 / 100.0))
                .collect();
            let gains = [200.0, 1_000.0].map(|cutoff| {
                frequencies
                    .iter()
                    .map(|&frequency| low_pass_gain(frequency, cutoff))
                    .collect::<Vec<f32>>()
            });

            let mut plot = Plot::builder()
                .kind(PlotKind::SemiLogX)
                .theme(Theme::dark())
                .title("Low-pass response")
                .x_label("Frequency (Hz)")
                .y_label("Gain (dB)")
                .build();
            plot.update_x_data(vec![frequencies]).unwrap();
            plot.update_y_data(gains.to_vec()).unwrap();
            plot.y_lim(-40.0, 5.0).unwrap();
            plot.make_graph_dashed(vec![6.0, 4.0], 1).unwrap();

            let view = GpuiPlotView::with_config(plot, PlotViewConfig::default());
            cx.new(|_| view)
        })
        .unwrap();
    });
}
