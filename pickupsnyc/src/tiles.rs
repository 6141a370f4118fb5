use eframe::egui;
use walkers::sources::{Attribution, TileSource};
use walkers::{HttpOptions, HttpTiles, TileId};

/// Mapbox "light" raster style, the muted basemap the density hexagons are
/// drawn over. Needs an access token.
pub struct MapboxLight {
    access_token: String,
}

impl TileSource for MapboxLight {
    fn tile_url(&self, tile_id: TileId) -> String {
        format!(
            "https://api.mapbox.com/styles/v1/mapbox/light-v9/tiles/256/{}/{}/{}?access_token={}",
            tile_id.zoom, tile_id.x, tile_id.y, self.access_token
        )
    }

    fn attribution(&self) -> Attribution {
        Attribution {
            text: "© Mapbox, © OpenStreetMap",
            url: "https://www.mapbox.com/about/maps/",
            logo_light: None,
            logo_dark: None,
        }
    }
}

/// Tile fetcher for one map panel, with an on-disk cache so panning does not
/// re-download the basemap.
pub fn http_tiles(api_key: &str, egui_ctx: egui::Context) -> HttpTiles {
    let options = HttpOptions {
        cache: Some(std::env::temp_dir().join("pickupsnyc").join("tiles")),
        ..Default::default()
    };

    HttpTiles::with_options(
        MapboxLight {
            access_token: api_key.to_string(),
        },
        options,
        egui_ctx,
    )
}
