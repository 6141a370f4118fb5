#![warn(
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic
)]
// Tell OS to hide the console window when running.
// This attribute is only applied if the target OS is Windows.
#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

mod app;
mod loader;
mod tiles;
mod ui_centralpanel;
mod ui_histogram;
mod ui_map;
mod ui_menubar;
mod ui_popup;
mod ui_sidepanel;

use crate::ui_popup::PopupType;
use app::DashboardApp;
use eframe::egui;
use std::error::Error;

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();

    // Startup is all-or-nothing: without the basemap token or the dataset
    // there is nothing to show.
    let api_key = loader::mapbox_api_key()?;
    let data = loader::load_startup_data()?;

    let options = eframe::NativeOptions {
        vsync: true,
        viewport: egui::ViewportBuilder::default()
            .with_resizable(true)
            .with_inner_size([1440.0, 900.0]),
        ..Default::default()
    };
    eframe::run_native(
        "NYC Uber Ridesharing Data",
        options,
        Box::new(move |cc| Ok(Box::new(DashboardApp::new(cc, data, &api_key)))),
    )?;

    Ok(())
}

impl eframe::App for DashboardApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.show_menu_bar(ctx);

        if self.error.borrow().is_some() {
            self.popup.active = true;
            self.popup.ptype = Some(PopupType::Error);
        }

        self.show_side_panel(ctx);

        // Recompute the hex layer and histogram if the slider moved this
        // frame (or nothing has been rendered yet)
        self.on_hour_changed();

        // If pop active - show it and return (don't display the dashboard)
        if self.popup.active {
            self.show_popup(ctx);
            return;
        }

        self.show_central_panel(ctx);
    }
}
