use crate::app::DashboardApp;
use crate::ui_popup::PopupType;
use eframe::egui;

impl DashboardApp {
    /// Show the menu bar with the file actions and the about entry.
    pub(crate) fn show_menu_bar(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::top("menu_bar").show(ctx, |ui| {
            ui.add_space(3.0);

            egui::menu::bar(ui, |ui| {
                ui.menu_button("File", |ui| {
                    if ui.button("Open CSV...").clicked() {
                        ui.close_menu();
                        if let Some(path) = rfd::FileDialog::new()
                            .set_title("Open trip data CSV")
                            .add_filter("Trip data", &["csv", "gz"])
                            .pick_file()
                        {
                            self.load_csv_file(&path);
                        }
                    }

                    if ui.button("Reload dataset").clicked() {
                        ui.close_menu();
                        self.reload_dataset();
                    }
                });

                if ui.button("About").clicked() {
                    self.popup.open(PopupType::About);
                }
            });

            ui.add_space(2.0);
        });
    }
}
