use crate::app::DashboardApp;
use eframe::egui;

/// Height reserved for the minute histogram under the maps.
const HISTOGRAM_HEIGHT: f32 = 220.0;

/// Maps never shrink below this, the histogram gives way instead.
const MIN_MAP_HEIGHT: f32 = 240.0;

impl DashboardApp {
    /// The dashboard body: the city-wide map and the three airport maps in
    /// one row, the minute histogram underneath.
    pub(crate) fn show_central_panel(&mut self, ctx: &egui::Context) {
        egui::CentralPanel::default().show(ctx, |ui| {
            let spacing = ui.spacing().item_spacing.x;
            let map_height =
                (ui.available_height() - HISTOGRAM_HEIGHT - 2.0 * spacing).max(MIN_MAP_HEIGHT);

            let total_width = ui.available_width() - 3.0 * spacing;
            let nyc_width = total_width * 0.34;
            let airport_width = (total_width - nyc_width) / 3.0;

            let nyc_title = self.hour_window_title();

            ui.horizontal(|ui| {
                let layer = &self.hex_layer;
                for (i, panel) in self.panels.iter_mut().enumerate() {
                    let width = if i == 0 { nyc_width } else { airport_width };
                    let title = if i == 0 {
                        nyc_title.clone()
                    } else {
                        panel.view.title.to_string()
                    };

                    ui.allocate_ui(egui::vec2(width, map_height), |ui| {
                        ui.set_min_size(egui::vec2(width, map_height));
                        ui.set_max_size(egui::vec2(width, map_height));
                        panel.show(ui, layer, &title);
                    });
                }
            });

            ui.add_space(spacing);
            self.show_histogram(ui);
        });
    }
}
