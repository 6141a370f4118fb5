use crate::app::{MapPanel, colors};
use eframe::egui;
use tripdatalib::hexbin::HexLayer;
use walkers::{Map, Plugin, Position, Projector};

impl MapPanel {
    /// Title plus the map widget, filling the space the caller allocated.
    pub fn show(&mut self, ui: &mut egui::Ui, layer: &HexLayer, title: &str) {
        ui.vertical(|ui| {
            ui.label(egui::RichText::new(title).size(15.0).strong());

            let position = Position::from_lat_lon(self.view.lat, self.view.lon);
            let map = Map::new(Some(&mut self.tiles), &mut self.memory, position)
                .with_plugin(HexbinPlugin { layer });
            ui.add(map);
        });
    }
}

/// Paints the density cells on top of the basemap and reports the pickup
/// count of the cell under the cursor.
struct HexbinPlugin<'a> {
    layer: &'a HexLayer,
}

impl Plugin for HexbinPlugin<'_> {
    fn run(
        self: Box<Self>,
        ui: &mut egui::Ui,
        response: &egui::Response,
        projector: &Projector,
    ) {
        let painter = ui.painter().with_clip_rect(response.rect);
        // Cells partially off-screen still get drawn; fully off-screen ones
        // are skipped early.
        let bounds = response.rect.expand(60.0);
        let cursor = response.hover_pos();
        let mut hovered: Option<(egui::Pos2, u32)> = None;

        for cell in &self.layer.cells {
            let corners: Vec<egui::Pos2> = cell
                .corners
                .iter()
                .map(|&(lat, lon)| {
                    let p = projector.project(Position::from_lat_lon(lat, lon));
                    egui::pos2(p.x, p.y)
                })
                .collect();

            if !polygon_visible(&corners, bounds) {
                continue;
            }

            let fill = colors::density_color(cell.count, self.layer.max_count);
            painter.add(egui::Shape::convex_polygon(
                corners.clone(),
                fill,
                egui::Stroke::NONE,
            ));

            if let Some(cursor) = cursor {
                let c = projector.project(Position::from_lat_lon(cell.center.0, cell.center.1));
                let center = egui::pos2(c.x, c.y);
                // Inradius test (sqrt(3)/2 of the circumradius), close enough
                // for hover on a hexagon
                if cursor.distance(center) <= center.distance(corners[0]) * 0.87 {
                    hovered = Some((cursor, cell.count));
                }
            }
        }

        if let Some((cursor, count)) = hovered {
            draw_count_tag(&painter, cursor, count);
        }
    }
}

/// Whether a polygon can overlap `bounds`. Tests the polygon's bounding rect,
/// not the corners: at high zoom a cell larger than the viewport has every
/// corner off-screen while still covering it.
fn polygon_visible(corners: &[egui::Pos2], bounds: egui::Rect) -> bool {
    bounds.intersects(egui::Rect::from_points(corners))
}

/// Small floating label next to the cursor with the hovered cell's count.
fn draw_count_tag(painter: &egui::Painter, cursor: egui::Pos2, count: u32) {
    let text = if count == 1 {
        "1 pickup".to_string()
    } else {
        format!("{count} pickups")
    };

    let galley = painter.layout_no_wrap(
        text,
        egui::FontId::proportional(12.0),
        egui::Color32::WHITE,
    );
    let pos = cursor + egui::vec2(14.0, -10.0 - galley.size().y);
    let rect = egui::Rect::from_min_size(pos, galley.size()).expand(4.0);

    painter.rect_filled(rect, 3.0, egui::Color32::from_black_alpha(190));
    painter.galley(pos, galley, egui::Color32::WHITE);
}
