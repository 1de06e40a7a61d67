//! Plotters-powered probability chart widget for Ratatui.
//!
//! We render Plotters output into the Ratatui buffer using `plotters-ratatui-backend`.

use plotters::prelude::*;
use plotters_ratatui_backend::widget_fn;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    widgets::Widget,
};

/// A lightweight, render-only chart description.
///
/// All series and bounds are computed outside the render call.
pub struct GuessChart<'a> {
    /// Exact probability per panel size.
    pub exact: &'a [(f64, f64)],
    /// Affine approximation (two endpoints suffice).
    pub approx: &'a [(f64, f64)],
    /// Simulated correct rates, if a simulation was run.
    pub simulated: &'a [(f64, f64)],
    /// X bounds (panel size).
    pub x_bounds: [f64; 2],
    /// Y bounds (probability).
    pub y_bounds: [f64; 2],
}

impl<'a> Widget for GuessChart<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        // Plotters may fail to build a chart in tiny areas; show a hint instead.
        if area.width < 20 || area.height < 8 {
            buf.set_string(
                area.x,
                area.y,
                "Chart area too small (resize terminal).",
                Style::default().fg(Color::Yellow),
            );
            return;
        }

        let [x0, x1] = self.x_bounds;
        let [y0, y1] = self.y_bounds;
        if !(x0.is_finite() && x1.is_finite() && y0.is_finite() && y1.is_finite()) || x1 <= x0 || y1 <= y0 {
            return;
        }

        let widget = widget_fn(move |root| {
            let mut chart = ChartBuilder::on(&root)
                .margin(1)
                .set_label_area_size(LabelAreaPosition::Left, 6)
                .set_label_area_size(LabelAreaPosition::Bottom, 3)
                .build_cartesian_2d(x0..x1, y0..y1)?;

            chart
                .configure_mesh()
                .disable_x_mesh()
                .disable_y_mesh()
                .x_desc("signals (n)")
                .y_desc("P(correct)")
                .x_labels(5)
                .y_labels(5)
                .x_label_formatter(&|v| format!("{v:.0}"))
                .y_label_formatter(&|v| format!("{v:.2}"))
                .label_style(("sans-serif", 10).into_font().color(&WHITE))
                .axis_style(&WHITE)
                .bold_line_style(&WHITE)
                .draw()?;

            let exact_color = RGBColor(0, 255, 255); // cyan
            let approx_color = RGBColor(255, 255, 0); // yellow
            let sim_color = RGBColor(255, 0, 255); // magenta

            chart.draw_series(LineSeries::new(self.approx.iter().copied(), &approx_color))?;
            chart.draw_series(LineSeries::new(self.exact.iter().copied(), &exact_color))?;

            // Pixels rather than `Circle`: the backend maps circle radii incorrectly.
            chart.draw_series(
                self.exact
                    .iter()
                    .map(|&(x, y)| Pixel::new((x, y), WHITE)),
            )?;
            chart.draw_series(
                self.simulated
                    .iter()
                    .map(|&(x, y)| Pixel::new((x, y), sim_color)),
            )?;

            Ok(())
        });

        widget.render(area, buf);
    }
}
