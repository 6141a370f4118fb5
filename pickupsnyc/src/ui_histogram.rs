use crate::app::{DashboardApp, colors};
use eframe::egui;
use egui_plot::{Bar, BarChart, Plot};

impl DashboardApp {
    /// Minute-by-minute pickup counts for the selected hour, as a bar chart.
    pub(crate) fn show_histogram(&self, ui: &mut egui::Ui) {
        ui.label(
            egui::RichText::new(self.hour_window_title())
                .size(15.0)
                .strong(),
        );

        let bars: Vec<Bar> = self
            .histogram
            .iter()
            .enumerate()
            .map(|(minute, &count)| {
                #[allow(clippy::cast_precision_loss)]
                Bar::new(minute as f64, f64::from(count)).width(1.0)
            })
            .collect();

        let chart = BarChart::new(bars)
            .color(colors::HISTOGRAM_RED)
            .element_formatter(Box::new(|bar, _| {
                format!("minute {:.0}\n{:.0} pickups", bar.argument, bar.value)
            }));

        Plot::new("minute_histogram")
            .height(ui.available_height())
            .allow_drag(false)
            .allow_zoom(false)
            .allow_scroll(false)
            .allow_boxed_zoom(false)
            .include_x(-0.5)
            .include_x(59.5)
            .include_y(0.0)
            .show(ui, |plot_ui| {
                plot_ui.bar_chart(chart);
            });
    }
}
