//! The `dataset` module provides the [`TripDataset`] struct, a high-level API for
//! loading and querying trip pickup data.
//!
//! It supports parsing CSV text into an in-memory record vector, loading from
//! local files (plain or gzip-compressed) and remote URLs, and the hour/minute
//! queries that drive the dashboard: per-hour filtering, the 60-bucket minute
//! histogram, and per-hour totals. Records are immutable once loaded.

use crate::error::{TripDataError, TripDataErrorKind};
use crate::record::TripRecord;
use flate2::read::GzDecoder;
use std::error::Error;
use std::io::Read;
use std::path::Path;

/// Required dataset columns, matched against the lowercased header.
const COLUMN_TIMESTAMP: &str = "date/time";
const COLUMN_LAT: &str = "lat";
const COLUMN_LON: &str = "lon";

/// Row cap applied to remote fetches. The canonical September 2014 export is
/// larger than what the dashboard needs; the original pipeline reads the
/// first 100k rows.
const MAX_REMOTE_ROWS: usize = 100_000;

#[derive(Debug, Clone, Default)]
pub struct TripDataset {
    /// Where the data came from (file path or URL), for display
    pub source: String,
    /// Parsed trip records, in file order
    records: Vec<TripRecord>,
}

impl<'a> IntoIterator for &'a TripDataset {
    type Item = &'a TripRecord;
    type IntoIter = std::slice::Iter<'a, TripRecord>;
    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

impl TripDataset {
    /// Creates an empty `TripDataset` struct instance.
    ///
    /// # Examples
    /// ```
    /// use tripdatalib::TripDataset;
    ///
    /// let data = TripDataset::new();
    /// assert_eq!(data.len(), 0);
    /// ```
    #[must_use]
    pub const fn new() -> Self {
        Self {
            source: String::new(),
            records: Vec::new(),
        }
    }

    /// Clears loaded data from the `TripDataset` struct instance.
    pub fn clear(&mut self) {
        self.source.clear();
        self.records.clear();
    }

    /// Parse raw CSV text and fill the internal record vector.
    ///
    /// Header column names are matched case-insensitively and in any order;
    /// only the `date/time`, `lat` and `lon` columns are read, extra columns
    /// (e.g. the TLC base code) are ignored.
    ///
    /// # Errors
    /// - Returns an error if the header is missing or lacks a required column
    /// - Returns an error (with the 1-based data row number) if a row is too
    ///   short or a field fails to parse
    pub fn parse(&mut self, text: &str) -> Result<(), TripDataError> {
        self.parse_limited(text, usize::MAX)
    }

    /// Like [`Self::parse`], but stops after `max_rows` data rows. Rows past
    /// the limit are never parsed, so malformed trailing data cannot fail a
    /// capped load.
    fn parse_limited(&mut self, text: &str, max_rows: usize) -> Result<(), TripDataError> {
        let mut lines = text.lines().filter(|l| !l.trim().is_empty());

        let header = lines
            .next()
            .ok_or(TripDataError::ParseHeaderError(TripDataErrorKind::EmptyFile))?;

        // Normalize column names to lowercase before lookup
        let columns: Vec<String> = split_row(header)
            .iter()
            .map(|c| c.trim().to_lowercase())
            .collect();

        let find_column = |name: &str| -> Result<usize, TripDataError> {
            columns.iter().position(|c| c == name).ok_or_else(|| {
                TripDataError::ParseHeaderError(TripDataErrorKind::MissingColumn(name.to_string()))
            })
        };

        let ts_idx = find_column(COLUMN_TIMESTAMP)?;
        let lat_idx = find_column(COLUMN_LAT)?;
        let lon_idx = find_column(COLUMN_LON)?;
        let min_fields = ts_idx.max(lat_idx).max(lon_idx) + 1;

        for (count, line) in lines.enumerate() {
            if count >= max_rows {
                break;
            }

            let fields = split_row(line);

            if fields.len() < min_fields {
                return Err(TripDataError::ParseRowError(
                    TripDataErrorKind::RowTooShort(min_fields, fields.len()),
                    count + 1,
                ));
            }

            let record =
                TripRecord::from_fields(&fields[ts_idx], &fields[lat_idx], &fields[lon_idx])
                    .map_err(|err| TripDataError::ParseRowError(err, count + 1))?;

            self.records.push(record);
        }

        Ok(())
    }

    /// Creates a `TripDataset` instance and fills it with data from the provided
    /// CSV file. Gzip-compressed files are detected and inflated transparently.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or parsed.
    ///
    /// # Example
    /// ```
    /// use tripdatalib::TripDataset;
    ///
    /// let data = TripDataset::from_csv("tests/fixtures/trips_small.csv").unwrap();
    /// assert_eq!(data.len(), 10);
    /// ```
    pub fn from_csv<P: AsRef<Path>>(filepath: P) -> Result<Self, Box<dyn Error>> {
        let mut data = Self::new();
        data.load_csv(filepath)?;
        Ok(data)
    }

    /// Fills a `TripDataset` instance with data from the provided CSV file.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or parsed.
    ///
    /// # Example
    /// ```
    /// use tripdatalib::TripDataset;
    ///
    /// let mut data = TripDataset::new();
    /// data.load_csv("tests/fixtures/trips_small.csv").unwrap();
    ///
    /// assert_eq!(data.len(), 10);
    /// ```
    pub fn load_csv<P: AsRef<Path>>(&mut self, filepath: P) -> Result<(), Box<dyn Error>> {
        let raw_bytes = std::fs::read(&filepath)?;
        let text = decode_text(&raw_bytes)?;

        self.clear();
        self.source = filepath.as_ref().display().to_string();
        self.parse(&text)?;

        Ok(())
    }

    /// Creates a `TripDataset` instance and fills it with data fetched from the
    /// provided URL. The fetch is blocking; only the first 100k data rows are
    /// parsed, the rest of the response is ignored.
    ///
    /// # Errors
    /// Returns an error if the resource is unreachable, returns a non-success
    /// status, or cannot be parsed.
    pub fn from_url(url: &str) -> Result<Self, Box<dyn Error>> {
        let mut data = Self::new();
        data.load_url(url)?;
        Ok(data)
    }

    /// Fills a `TripDataset` instance with data fetched from the provided URL.
    ///
    /// # Errors
    /// Returns an error if the resource is unreachable, returns a non-success
    /// status, or cannot be parsed.
    pub fn load_url(&mut self, url: &str) -> Result<(), Box<dyn Error>> {
        let raw_bytes = reqwest::blocking::get(url)?.error_for_status()?.bytes()?;
        let text = decode_text(&raw_bytes)?;

        self.clear();
        self.source = url.to_string();
        self.parse_limited(&text, MAX_REMOTE_ROWS)?;

        Ok(())
    }

    /// Number of loaded trip records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the dataset holds no records.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Loaded trip records, in file order.
    #[must_use]
    pub fn records(&self) -> &[TripRecord] {
        &self.records
    }

    /// Get an iterator over the loaded trip records.
    pub fn iter(&self) -> std::slice::Iter<'_, TripRecord> {
        self.into_iter()
    }

    /// Get the records whose pickup hour equals `hour`.
    ///
    /// The 24 per-hour sets partition the dataset: they are pairwise disjoint
    /// and their union is the full record list.
    ///
    /// # Errors
    /// Returns an error if `hour` is outside `0..=23`.
    ///
    /// # Example
    /// ```
    /// use tripdatalib::TripDataset;
    ///
    /// let data = TripDataset::from_csv("tests/fixtures/trips_small.csv").unwrap();
    /// let morning = data.filter_by_hour(8).unwrap();
    ///
    /// assert_eq!(morning.len(), 4);
    /// ```
    pub fn filter_by_hour(&self, hour: u32) -> Result<Vec<&TripRecord>, TripDataError> {
        validate_hour(hour)?;
        Ok(self.records.iter().filter(|r| r.hour() == hour).collect())
    }

    /// Build the minute-of-hour histogram for the given hour: bucket `i` holds
    /// the number of records with pickup hour `hour` and minute `i`.
    ///
    /// # Errors
    /// Returns an error if `hour` is outside `0..=23`.
    ///
    /// # Example
    /// ```
    /// use tripdatalib::TripDataset;
    ///
    /// let data = TripDataset::from_csv("tests/fixtures/trips_small.csv").unwrap();
    /// let buckets = data.minute_histogram(8).unwrap();
    ///
    /// assert_eq!(buckets[15], 2);
    /// ```
    pub fn minute_histogram(&self, hour: u32) -> Result<[u32; 60], TripDataError> {
        validate_hour(hour)?;

        let mut buckets = [0u32; 60];
        for record in self.records.iter().filter(|r| r.hour() == hour) {
            buckets[record.minute() as usize] += 1;
        }
        Ok(buckets)
    }

    /// Record counts per hour of day.
    #[must_use]
    pub fn hour_counts(&self) -> [u32; 24] {
        let mut counts = [0u32; 24];
        for record in &self.records {
            counts[record.hour() as usize] += 1;
        }
        counts
    }

    /// Average (latitude, longitude) over all records, or `None` when the
    /// dataset is empty. Used as the city-wide map center.
    #[must_use]
    pub fn mean_position(&self) -> Option<(f64, f64)> {
        if self.records.is_empty() {
            return None;
        }

        #[allow(clippy::cast_precision_loss)]
        let n = self.records.len() as f64;
        let (lat_sum, lon_sum) = self
            .records
            .iter()
            .fold((0.0, 0.0), |(lat, lon), r| (lat + r.lat, lon + r.lon));

        Some((lat_sum / n, lon_sum / n))
    }
}

const fn validate_hour(hour: u32) -> Result<(), TripDataError> {
    if hour > 23 {
        return Err(TripDataError::QueryError(TripDataErrorKind::HourOutOfRange(
            hour,
        )));
    }
    Ok(())
}

/// Decode raw file/response bytes into CSV text, inflating gzip payloads
/// (detected by the 0x1F 0x8B magic bytes) on the fly.
fn decode_text(raw_bytes: &[u8]) -> Result<String, Box<dyn Error>> {
    if raw_bytes.starts_with(&[0x1F, 0x8B]) {
        let mut text = String::new();
        GzDecoder::new(raw_bytes).read_to_string(&mut text)?;
        return Ok(text);
    }
    Ok(String::from_utf8(raw_bytes.to_vec())?)
}

/// Split one CSV line into fields. Commas inside double-quoted fields do not
/// split; doubled quotes inside a quoted field become a literal quote.
fn split_row(line: &str) -> Vec<String> {
    let line = line.strip_suffix('\r').unwrap_or(line);

    let mut fields = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '"' => {
                if in_quotes && chars.peek() == Some(&'"') {
                    field.push('"');
                    chars.next();
                } else {
                    in_quotes = !in_quotes;
                }
            }
            ',' if !in_quotes => {
                fields.push(std::mem::take(&mut field));
            }
            _ => field.push(c),
        }
    }
    fields.push(field);

    fields
}

#[cfg(test)]
mod tests {
    use super::*;
    use flate2::Compression;
    use flate2::write::GzEncoder;
    use std::io::Write;

    const SAMPLE_CSV: &str = "\
Date/Time,Lat,Lon,Base
9/1/2014 8:15:00,40.7690,-73.9549,B02512
9/1/2014 9:02:00,40.6950,-74.1780,B02512
";

    #[test]
    fn test_parse_normalizes_header_case() {
        // Arrange
        let mut data = TripDataset::new();

        // Act
        let res = data.parse(SAMPLE_CSV);

        // Assert
        assert!(res.is_ok());
        assert_eq!(data.len(), 2);
    }

    #[test]
    fn test_parse_accepts_reordered_columns() {
        // Arrange
        let mut data = TripDataset::new();
        let csv = "Base,Lon,Lat,Date/Time\nB02512,-73.9549,40.7690,9/1/2014 8:15:00\n";

        // Act
        let res = data.parse(csv);

        // Assert
        assert!(res.is_ok());
        assert!((data.records()[0].lat - 40.7690).abs() < f64::EPSILON);
        assert!((data.records()[0].lon + 73.9549).abs() < f64::EPSILON);
    }

    #[test]
    fn test_parse_missing_column() {
        // Arrange
        let mut data = TripDataset::new();
        let csv = "Date/Time,Lat,Base\n9/1/2014 8:15:00,40.7690,B02512\n";

        // Act
        let res = data.parse(csv);

        // Assert
        assert_eq!(
            res,
            Err(TripDataError::ParseHeaderError(
                TripDataErrorKind::MissingColumn(COLUMN_LON.to_string())
            ))
        );
    }

    #[test]
    fn test_parse_empty_input() {
        // Arrange
        let mut data = TripDataset::new();

        // Act
        let res = data.parse("\n\n");

        // Assert
        assert_eq!(
            res,
            Err(TripDataError::ParseHeaderError(TripDataErrorKind::EmptyFile))
        );
    }

    #[test]
    fn test_parse_reports_bad_row_number() {
        // Arrange
        let mut data = TripDataset::new();
        let csv = "\
Date/Time,Lat,Lon
9/1/2014 8:15:00,40.7690,-73.9549
9/1/2014 8:16:00,nope,-73.9549
";

        // Act
        let res = data.parse(csv);

        // Assert
        assert_eq!(
            res,
            Err(TripDataError::ParseRowError(
                TripDataErrorKind::InvalidCoordinate("nope".to_string()),
                2
            ))
        );
    }

    #[test]
    fn test_parse_short_row() {
        // Arrange
        let mut data = TripDataset::new();
        let csv = "Date/Time,Lat,Lon\n9/1/2014 8:15:00,40.7690\n";

        // Act
        let res = data.parse(csv);

        // Assert
        assert_eq!(
            res,
            Err(TripDataError::ParseRowError(
                TripDataErrorKind::RowTooShort(3, 2),
                1
            ))
        );
    }

    #[test]
    fn test_parse_limited_stops_at_row_cap() {
        // Arrange
        let mut data = TripDataset::new();
        let csv = "\
Date/Time,Lat,Lon
9/1/2014 8:15:00,40.7690,-73.9549
9/1/2014 8:16:00,40.7691,-73.9549
9/1/2014 8:17:00,40.7692,-73.9549
";

        // Act
        let res = data.parse_limited(csv, 2);

        // Assert
        assert!(res.is_ok());
        assert_eq!(data.len(), 2);
        assert_eq!(data.records()[1].minute(), 16);
    }

    #[test]
    fn test_parse_limited_ignores_malformed_rows_past_cap() {
        // Arrange: rows beyond the cap are never parsed, so a bad trailing
        // row must not fail the load
        let mut data = TripDataset::new();
        let csv = "\
Date/Time,Lat,Lon
9/1/2014 8:15:00,40.7690,-73.9549
9/1/2014 8:16:00,40.7691,-73.9549
not-a-timestamp,40.7692,-73.9549
";

        // Act
        let capped = data.parse_limited(csv, 2);

        // Assert
        assert!(capped.is_ok());
        assert_eq!(data.len(), 2);

        // The same input without the cap does report the bad row
        let mut uncapped = TripDataset::new();
        assert_eq!(
            uncapped.parse(csv),
            Err(TripDataError::ParseRowError(
                TripDataErrorKind::InvalidTimestamp("not-a-timestamp".to_string()),
                3
            ))
        );
    }

    #[test]
    fn test_filter_by_hour_partitions_dataset() {
        // Arrange
        let mut data = TripDataset::new();
        data.parse(SAMPLE_CSV).unwrap();

        // Act
        let total: usize = (0..24)
            .map(|h| data.filter_by_hour(h).unwrap().len())
            .sum();

        // Assert
        assert_eq!(total, data.len());
        assert_eq!(data.filter_by_hour(8).unwrap().len(), 1);
        assert_eq!(data.filter_by_hour(9).unwrap().len(), 1);
        assert_eq!(data.filter_by_hour(10).unwrap().len(), 0);
    }

    #[test]
    fn test_filter_by_hour_out_of_range() {
        // Arrange
        let data = TripDataset::new();

        // Act
        let res = data.filter_by_hour(24);

        // Assert
        assert_eq!(
            res,
            Err(TripDataError::QueryError(
                TripDataErrorKind::HourOutOfRange(24)
            ))
        );
    }

    #[test]
    fn test_minute_histogram_buckets() {
        // Arrange
        let mut data = TripDataset::new();
        data.parse(SAMPLE_CSV).unwrap();

        // Act
        let hour_8 = data.minute_histogram(8).unwrap();
        let hour_9 = data.minute_histogram(9).unwrap();

        // Assert
        assert_eq!(hour_8.len(), 60);
        assert_eq!(hour_8[15], 1);
        assert_eq!(hour_8.iter().sum::<u32>(), 1);
        assert_eq!(hour_9[2], 1);
        assert_eq!(hour_9.iter().sum::<u32>(), 1);
    }

    #[test]
    fn test_minute_histogram_is_idempotent() {
        // Arrange
        let mut data = TripDataset::new();
        data.parse(SAMPLE_CSV).unwrap();

        // Act
        let first = data.minute_histogram(8).unwrap();
        let second = data.minute_histogram(8).unwrap();

        // Assert
        assert_eq!(first, second);
        assert_eq!(
            data.filter_by_hour(8).unwrap(),
            data.filter_by_hour(8).unwrap()
        );
    }

    #[test]
    fn test_hour_counts_sum_to_len() {
        // Arrange
        let mut data = TripDataset::new();
        data.parse(SAMPLE_CSV).unwrap();

        // Act
        let counts = data.hour_counts();

        // Assert
        assert_eq!(counts.iter().sum::<u32>() as usize, data.len());
        assert_eq!(counts[8], 1);
        assert_eq!(counts[9], 1);
    }

    #[test]
    fn test_mean_position() {
        // Arrange
        let mut data = TripDataset::new();
        data.parse(SAMPLE_CSV).unwrap();

        // Act
        let mean = data.mean_position().unwrap();

        // Assert
        assert!((mean.0 - 40.732).abs() < 1e-9);
        assert!((mean.1 - -74.06645).abs() < 1e-9);
    }

    #[test]
    fn test_mean_position_empty() {
        // Arrange
        let data = TripDataset::new();

        // Act & Assert
        assert!(data.mean_position().is_none());
    }

    #[test]
    fn test_split_row_quoted_fields() {
        // Act
        let fields = split_row("\"9/1/2014 8:15:00\",40.7,\"a,b\",\"say \"\"hi\"\"\"\r");

        // Assert
        assert_eq!(fields, vec!["9/1/2014 8:15:00", "40.7", "a,b", "say \"hi\""]);
    }

    #[test]
    fn test_decode_text_inflates_gzip() {
        // Arrange
        let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
        encoder.write_all(SAMPLE_CSV.as_bytes()).unwrap();
        let gz_bytes = encoder.finish().unwrap();

        // Act
        let text = decode_text(&gz_bytes).unwrap();

        // Assert
        assert_eq!(text, SAMPLE_CSV);
    }

    #[test]
    fn test_decode_text_passes_plain_bytes() {
        // Act
        let text = decode_text(SAMPLE_CSV.as_bytes()).unwrap();

        // Assert
        assert_eq!(text, SAMPLE_CSV);
    }
}
