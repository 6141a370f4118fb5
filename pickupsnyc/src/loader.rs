use crate::app::DashboardApp;
use std::env;
use std::error::Error;
use std::path::Path;
use tripdatalib::TripDataset;

/// September 2014 Uber pickups export, gzip-compressed CSV.
pub const DATA_URL: &str =
    "http://s3-us-west-2.amazonaws.com/streamlit-demo-data/uber-raw-data-sep14.csv.gz";

/// Overrides the dataset location. Accepts a URL or a local file path.
pub const DATA_URL_ENV: &str = "PICKUPS_DATA_URL";

/// Token for the Mapbox basemap tiles. Required.
pub const MAPBOX_KEY_ENV: &str = "MAPBOX_API_KEY";

/// Where the startup dataset comes from: the env override if set, otherwise
/// the canonical September 2014 export.
pub fn data_source() -> String {
    env::var(DATA_URL_ENV).unwrap_or_else(|_| DATA_URL.to_string())
}

/// Read the Mapbox access token from the environment. Without it the basemap
/// cannot be fetched, so a missing token is a startup error.
pub fn mapbox_api_key() -> Result<String, Box<dyn Error>> {
    match env::var(MAPBOX_KEY_ENV) {
        Ok(key) if !key.trim().is_empty() => Ok(key),
        _ => Err(format!(
            "Missing required environment variable {MAPBOX_KEY_ENV} (Mapbox access token)"
        )
        .into()),
    }
}

/// Load the startup dataset from `data_source()`. Happens once, before the
/// window opens; every view afterwards is derived from this dataset in memory.
pub fn load_startup_data() -> Result<TripDataset, Box<dyn Error>> {
    let source = data_source();
    log::info!("Loading trip dataset from {source}");

    let data = if source.starts_with("http://") || source.starts_with("https://") {
        TripDataset::from_url(&source)?
    } else {
        TripDataset::from_csv(&source)?
    };

    // Guard: An empty dataset would leave every view blank
    if data.is_empty() {
        return Err(format!("No trip records found in {source}").into());
    }

    log::info!("Loaded {} trip records", data.len());
    Ok(data)
}

impl DashboardApp {
    /// Load a local CSV picked from the File menu. Failures land in the
    /// shared error cell and surface as a popup; the current dataset stays.
    pub(crate) fn load_csv_file(&mut self, path: &Path) {
        match TripDataset::from_csv(path) {
            Ok(data) if !data.is_empty() => {
                log::info!("Loaded {} trip records from {}", data.len(), path.display());
                self.replace_dataset(data);
            }
            Ok(_) => {
                self.error
                    .borrow_mut()
                    .replace(format!("No trip records found in {}", path.display()));
            }
            Err(err) => {
                self.error.borrow_mut().replace(err.to_string());
            }
        }
    }

    /// Re-fetch the startup source, discarding the current dataset on success.
    pub(crate) fn reload_dataset(&mut self) {
        let source = data_source();

        let result = if source.starts_with("http://") || source.starts_with("https://") {
            TripDataset::from_url(&source)
        } else {
            TripDataset::from_csv(&source)
        };

        match result {
            Ok(data) if !data.is_empty() => {
                log::info!("Reloaded {} trip records from {source}", data.len());
                self.replace_dataset(data);
            }
            Ok(_) => {
                self.error
                    .borrow_mut()
                    .replace(format!("No trip records found in {source}"));
            }
            Err(err) => {
                self.error.borrow_mut().replace(err.to_string());
            }
        }
    }
}
