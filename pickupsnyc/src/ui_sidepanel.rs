use crate::app::DashboardApp;
use eframe::egui;

/// Group digits in threes, e.g. 98304 -> "98,304".
fn format_with_separators(n: usize) -> String {
    n.to_string()
        .as_bytes()
        .rchunks(3)
        .rev()
        .map(|chunk| std::str::from_utf8(chunk).unwrap_or_default())
        .collect::<Vec<_>>()
        .join(",")
}

impl DashboardApp {
    /// Show the side panel with the dataset description, the hour slider, and
    /// dataset statistics.
    pub(crate) fn show_side_panel(&mut self, ctx: &egui::Context) {
        egui::SidePanel::left("left_panel")
            .exact_width(280.0)
            .show(ctx, |ui| {
                ui.add_space(3.0);

                // ABOUT THE DATA
                egui::CollapsingHeader::new("About the Data")
                    .default_open(true)
                    .show(ui, |ui| {
                        ui.add_space(5.0);
                        ui.label(
                            "Uber pickups in New York City during September 2014. \
                            Each map bins the pickups of the selected hour into \
                            hexagonal cells; darker red means more pickups.",
                        );
                        ui.add_space(5.0);
                    });

                ui.add_space(3.0);

                // PICKUP HOUR
                egui::CollapsingHeader::new("Pickup Hour")
                    .default_open(true)
                    .show(ui, |ui| {
                        ui.add_space(5.0);
                        ui.label("Select hour of pickup");
                        ui.add_space(3.0);
                        ui.add(egui::Slider::new(&mut self.selected_hour, 0..=23));
                        ui.add_space(5.0);
                    });

                ui.add_space(3.0);

                // DATASET
                egui::CollapsingHeader::new("Dataset")
                    .default_open(true)
                    .show(ui, |ui| {
                        ui.add_space(5.0);

                        egui::Grid::new("dataset_info_grid")
                            .num_columns(2)
                            .spacing([30.0, 4.0])
                            .show(ui, |ui| {
                                ui.label("Source");
                                // Show a short name, full source on hover
                                let short = short_source(&self.data.source);
                                ui.add(
                                    egui::Label::new(short)
                                        .wrap()
                                        .sense(egui::Sense::hover()),
                                )
                                .on_hover_text(&self.data.source);
                                ui.end_row();

                                ui.label("Records");
                                ui.label(format_with_separators(self.data.len()));
                                ui.end_row();

                                ui.label("In selected hour");
                                ui.label(format_with_separators(self.filtered_count));
                                ui.end_row();

                                ui.label("Busiest hour");
                                let busiest = busiest_hour(&self.hour_counts);
                                ui.label(format!("{busiest}:00"));
                                ui.end_row();
                            });

                        ui.add_space(5.0);
                    });
            });
    }
}

/// Last path segment of a URL or file path, for the compact source label.
fn short_source(source: &str) -> &str {
    source
        .trim_end_matches('/')
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or(source)
}

fn busiest_hour(counts: &[u32; 24]) -> usize {
    counts
        .iter()
        .enumerate()
        .max_by_key(|&(_, &count)| count)
        .map_or(0, |(hour, _)| hour)
}
