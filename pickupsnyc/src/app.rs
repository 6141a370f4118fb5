use crate::tiles;
use crate::ui_popup::Popup;
use std::cell::RefCell;
use std::rc::Rc;
use tripdatalib::TripDataset;
use tripdatalib::hexbin::{self, HexLayer};
use walkers::{HttpTiles, MapMemory};

/// Circumradius of the density hexagons, in meters.
pub const HEX_RADIUS_METERS: f64 = 100.0;

/// Map center used when the dataset has no mean position to offer.
const MIDTOWN: (f64, f64) = (40.7527, -73.9772);

pub mod colors {
    use eframe::egui::Color32;

    pub const SHADOW: Color32 = Color32::from_black_alpha(150);
    /// Histogram bars: pure red at half opacity (premultiplied)
    pub const HISTOGRAM_RED: Color32 = Color32::from_rgba_premultiplied(128, 0, 0, 128);

    /// Yellow-to-dark-red density ramp, lightest to densest cell.
    const DENSITY_RAMP: [(u8, u8, u8); 6] = [
        (255, 255, 178),
        (254, 217, 118),
        (254, 178, 76),
        (253, 141, 60),
        (240, 59, 32),
        (189, 0, 38),
    ];

    /// Fill color for a hex cell holding `count` pickups, scaled against the
    /// densest cell on the layer.
    #[must_use]
    pub fn density_color(count: u32, max_count: u32) -> Color32 {
        if count == 0 || max_count == 0 {
            return Color32::TRANSPARENT;
        }

        #[allow(clippy::cast_precision_loss)]
        let t = count as f32 / max_count as f32;
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let idx = ((t * DENSITY_RAMP.len() as f32).ceil() as usize).clamp(1, DENSITY_RAMP.len()) - 1;

        let (r, g, b) = DENSITY_RAMP[idx];
        Color32::from_rgba_unmultiplied(r, g, b, 190)
    }
}

/// Static description of one map view: where it looks, how close, and what it
/// is called.
pub struct MapView {
    pub id: &'static str,
    pub title: &'static str,
    pub lat: f64,
    pub lon: f64,
    pub zoom: f64,
}

/// One map widget with its own tile fetcher and pan/zoom state.
pub struct MapPanel {
    /// View descriptor (center, zoom, title)
    pub view: MapView,
    /// Tile downloader/cache for this panel
    pub tiles: HttpTiles,
    /// Pan and zoom state owned by the walkers widget
    pub memory: MapMemory,
}

impl MapPanel {
    pub fn new(view: MapView, api_key: &str, egui_ctx: &eframe::egui::Context) -> Self {
        let tiles = tiles::http_tiles(api_key, egui_ctx.clone());

        let mut memory = MapMemory::default();
        if let Err(e) = memory.set_zoom(view.zoom) {
            log::warn!("Failed to set initial zoom for '{}': {e:?}", view.id);
        }

        Self {
            view,
            tiles,
            memory,
        }
    }
}

/// The four dashboard views: the whole city plus the three major airports.
/// The city view centers on the dataset's mean pickup position.
fn map_views(data: &TripDataset) -> [MapView; 4] {
    let (nyc_lat, nyc_lon) = data.mean_position().unwrap_or(MIDTOWN);
    [
        MapView {
            id: "nyc",
            title: "All New York City",
            lat: nyc_lat,
            lon: nyc_lon,
            zoom: 11.0,
        },
        MapView {
            id: "lga",
            title: "La Guardia Airport",
            lat: 40.7900,
            lon: -73.8700,
            zoom: 12.0,
        },
        MapView {
            id: "jfk",
            title: "JFK Airport",
            lat: 40.6650,
            lon: -73.7821,
            zoom: 11.0,
        },
        MapView {
            id: "nwk",
            title: "Newark Airport",
            lat: 40.7090,
            lon: -74.1805,
            zoom: 11.0,
        },
    ]
}

pub struct DashboardApp {
    /// The loaded trip dataset. Read-only after load.
    pub data: TripDataset,
    /// Per-hour record counts, cached at load time for the side panel
    pub hour_counts: [u32; 24],
    /// Hour of day selected with the slider, 0..=23
    pub selected_hour: u32,
    /// Hour the current hex layer and histogram were computed for.
    /// `None` forces a recompute on the next frame.
    rendered_hour: Option<u32>,
    /// The four map panels; index 0 is the city-wide view
    pub panels: Vec<MapPanel>,
    /// Density cells shared by all four panels
    pub hex_layer: HexLayer,
    /// Minute-of-hour pickup counts for the selected hour
    pub histogram: [u32; 60],
    /// Number of records in the selected hour
    pub filtered_count: usize,
    /// Pop up handler
    pub popup: Popup,

    // -- Shared UI states
    /// Errors from dataset reloads and queries
    pub error: Rc<RefCell<Option<String>>>,
}

impl DashboardApp {
    pub fn new(
        cc: &eframe::CreationContext<'_>,
        data: TripDataset,
        api_key: &str,
    ) -> Self {
        let panels = map_views(&data)
            .into_iter()
            .map(|view| MapPanel::new(view, api_key, &cc.egui_ctx))
            .collect();

        Self {
            hour_counts: data.hour_counts(),
            data,
            selected_hour: 0,
            rendered_hour: None,
            panels,
            hex_layer: HexLayer::default(),
            histogram: [0; 60],
            filtered_count: 0,
            popup: Popup::default(),
            error: Rc::new(RefCell::new(None)),
        }
    }

    /// The sole reactive entry point: recompute the hex layer and histogram
    /// for the selected hour. Runs once at startup (for hour 0) and whenever
    /// the slider moves; a repeat call for the already-rendered hour is a
    /// no-op, so the derived views stay identical between changes.
    pub(crate) fn on_hour_changed(&mut self) {
        if self.rendered_hour == Some(self.selected_hour) {
            return;
        }

        let filtered = match self.data.filter_by_hour(self.selected_hour) {
            Ok(records) => records,
            Err(err) => {
                self.error.borrow_mut().replace(err.to_string());
                return;
            }
        };

        let points: Vec<(f64, f64)> = filtered.iter().map(|r| (r.lat, r.lon)).collect();
        self.hex_layer = hexbin::aggregate(&points, HEX_RADIUS_METERS);
        self.filtered_count = points.len();

        match self.data.minute_histogram(self.selected_hour) {
            Ok(buckets) => self.histogram = buckets,
            Err(err) => {
                self.error.borrow_mut().replace(err.to_string());
                return;
            }
        }

        log::debug!(
            "Rendered hour {}: {} pickups in {} cells",
            self.selected_hour,
            self.filtered_count,
            self.hex_layer.cells.len()
        );
        self.rendered_hour = Some(self.selected_hour);
    }

    /// Swap in a newly loaded dataset and invalidate everything derived from
    /// the old one. The city view re-centers on the new mean position.
    pub(crate) fn replace_dataset(&mut self, data: TripDataset) {
        if let Some((lat, lon)) = data.mean_position() {
            if let Some(nyc) = self.panels.first_mut() {
                nyc.view.lat = lat;
                nyc.view.lon = lon;
            }
        }

        self.hour_counts = data.hour_counts();
        self.data = data;
        self.rendered_hour = None;
    }

    /// Dynamic title of the city-wide view and the histogram, e.g.
    /// "All New York City from 8:00 and 9:00".
    #[must_use]
    pub fn hour_window_title(&self) -> String {
        format!(
            "All New York City from {}:00 and {}:00",
            self.selected_hour,
            self.selected_hour + 1
        )
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use eframe::egui::Color32;

    #[test]
    fn test_histogram_red_is_half_opacity_red() {
        // Premultiplied (128, 0, 0, 128) == straight red at alpha 128
        assert_eq!(
            colors::HISTOGRAM_RED,
            Color32::from_rgba_unmultiplied(255, 0, 0, 128)
        );
    }

    #[test]
    fn test_density_color_empty_cell_is_transparent() {
        assert_eq!(colors::density_color(0, 10), Color32::TRANSPARENT);
        assert_eq!(colors::density_color(5, 0), Color32::TRANSPARENT);
    }

    #[test]
    fn test_density_color_max_count_hits_darkest_stop() {
        // Act
        let color = colors::density_color(40, 40);

        // Assert
        assert_eq!(color, Color32::from_rgba_unmultiplied(189, 0, 38, 190));
    }

    #[test]
    fn test_density_color_low_count_hits_lightest_stop() {
        // Arrange: 1 out of 1000 falls in the first sixth of the ramp
        let color = colors::density_color(1, 1000);

        // Assert
        assert_eq!(color, Color32::from_rgba_unmultiplied(255, 255, 178, 190));
    }

    #[test]
    fn test_map_views_center_on_dataset_mean() {
        // Arrange
        let mut data = TripDataset::new();
        data.parse(
            "Date/Time,Lat,Lon,Base\n\
            9/1/2014 0:00:00,40.0,-74.0,B02512\n\
            9/1/2014 0:00:00,41.0,-73.0,B02512\n",
        )
        .unwrap();

        // Act
        let views = map_views(&data);

        // Assert
        assert_eq!(views[0].id, "nyc");
        assert!((views[0].lat - 40.5).abs() < 1e-9);
        assert!((views[0].lon - -73.5).abs() < 1e-9);
    }

    #[test]
    fn test_map_views_fall_back_to_midtown_when_empty() {
        // Act
        let views = map_views(&TripDataset::new());

        // Assert
        assert!((views[0].lat - MIDTOWN.0).abs() < f64::EPSILON);
        assert!((views[0].lon - MIDTOWN.1).abs() < f64::EPSILON);
    }
}
