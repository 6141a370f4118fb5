use crate::app::{DashboardApp, colors};
use eframe::egui;

//  ========================== Popup Type logic ============================= //

#[derive(Clone, PartialEq, Eq)]
pub enum PopupType {
    Error,
    About,
}

impl PopupType {
    pub const fn title(&self) -> &'static str {
        match self {
            Self::Error => "Error",
            Self::About => "About",
        }
    }
}

//  ========================== Popup logic =================================== //

#[derive(Default)]
pub struct Popup {
    /// Is there a pop-up
    pub(crate) active: bool,
    /// Type of the pop-up. Used to determine the title and content of the window.
    pub(crate) ptype: Option<PopupType>,
}

impl Popup {
    /// Clear (aka remove) the pop-up
    pub const fn clear(&mut self) {
        self.active = false;
        self.ptype = None;
    }

    /// Raise a pop-up of the given type, replacing any current one
    pub fn open(&mut self, ptype: PopupType) {
        self.active = true;
        self.ptype = Some(ptype);
    }
}

//  ========================== Dashboard logic ============================= //

impl DashboardApp {
    fn display_error(ui: &mut egui::Ui, msg: &str) {
        ui.label(msg);

        // Add space before close button
        ui.add_space(10.0);
    }

    fn display_about(ui: &mut egui::Ui) {
        ui.vertical(|ui| {
            ui.add_space(5.0);

            ui.heading("NYC Uber Ridesharing Data");
            ui.label("Uber pickup density across New York City and its airports");

            ui.add_space(3.0);
            ui.separator();
            ui.add_space(3.0);

            ui.label(
                "Move the hour slider to explore how pickups cluster around \
                the city through the day. The maps bin pickups into 100 m \
                hexagonal cells over a Mapbox basemap, and the chart below \
                breaks the selected hour down by minute.\n\nDataset parsing \
                and aggregation are handled by the tripdatalib library, built \
                as part of the same project.",
            );

            ui.add_space(3.0);
            ui.separator();
            ui.add_space(3.0);

            ui.label(format!("v{}", env!("CARGO_PKG_VERSION")));
            ui.add_space(5.0);
        });
    }

    /// Show the pop-up
    pub(crate) fn show_popup(&mut self, ctx: &egui::Context) {
        let screen_rect = ctx.screen_rect();

        // Block interaction with the app
        egui::Area::new(egui::Id::new("modal_blocker"))
            .order(egui::Order::Background)
            .fixed_pos(screen_rect.left_top())
            .show(ctx, |ui| {
                ui.allocate_rect(screen_rect, egui::Sense::click());
            });

        // Darken the background
        let painter = ctx.layer_painter(egui::LayerId::new(
            egui::Order::Background,
            egui::Id::new("modal_bg"),
        ));
        painter.rect_filled(screen_rect, 0.0, colors::SHADOW);

        let mut is_open = self.popup.active;
        let was_open = self.popup.active;

        let Some(popup_type) = self.popup.ptype.clone() else {
            self.popup.clear();
            return;
        };

        // Display the pop-up
        let window = egui::Window::new(popup_type.title())
            .open(&mut is_open)
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0]);

        window.show(ctx, |ui| match popup_type {
            PopupType::Error => {
                let error = self.error.borrow().clone().unwrap_or_default();
                Self::display_error(ui, &error);
            }
            PopupType::About => Self::display_about(ui),
        });

        let escape_pressed = ctx.input(|i| i.key_pressed(egui::Key::Escape));
        self.popup.active = is_open && !escape_pressed;

        // If the window got closed this frame
        if was_open && !self.popup.active {
            *self.error.borrow_mut() = None;
            self.popup.clear();
        }
    }
}
