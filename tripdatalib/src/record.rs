//! The `record` module provides the [`TripRecord`] struct, one row of the trip
//! dataset: a pickup timestamp and its lat/lon coordinates. Field-level parsing
//! lives here; row/column handling belongs to [`TripDataset`].
//!
//! [`TripDataset`]: crate::TripDataset

use crate::error::TripDataErrorKind;
use chrono::{NaiveDateTime, Timelike};

/// Timestamp formats accepted in the source data. The September 2014 Uber
/// exports use `M/D/YYYY H:MM:SS`; some mirrors drop the seconds or re-export
/// in ISO form.
const TIMESTAMP_FORMATS: [&str; 3] = [
    "%m/%d/%Y %H:%M:%S",
    "%m/%d/%Y %H:%M",
    "%Y-%m-%d %H:%M:%S",
];

#[derive(Debug, Clone, PartialEq)]
pub struct TripRecord {
    /// Pickup date and time (naive; the dataset carries no timezone)
    pub timestamp: NaiveDateTime,
    /// Pickup latitude in degrees
    pub lat: f64,
    /// Pickup longitude in degrees
    pub lon: f64,
}

impl TripRecord {
    /// Builds a record from raw CSV field values.
    ///
    /// # Errors
    /// Returns an error if the timestamp matches none of the accepted formats
    /// or if a coordinate is not a finite number within its valid range.
    pub fn from_fields(timestamp: &str, lat: &str, lon: &str) -> Result<Self, TripDataErrorKind> {
        Ok(Self {
            timestamp: parse_timestamp(timestamp)?,
            lat: parse_coordinate(lat, 90.0)?,
            lon: parse_coordinate(lon, 180.0)?,
        })
    }

    /// Hour of day of the pickup, 0..=23.
    #[must_use]
    pub fn hour(&self) -> u32 {
        self.timestamp.hour()
    }

    /// Minute of hour of the pickup, 0..=59.
    #[must_use]
    pub fn minute(&self) -> u32 {
        self.timestamp.minute()
    }
}

fn parse_timestamp(value: &str) -> Result<NaiveDateTime, TripDataErrorKind> {
    let value = value.trim();
    for format in TIMESTAMP_FORMATS {
        if let Ok(ts) = NaiveDateTime::parse_from_str(value, format) {
            return Ok(ts);
        }
    }
    Err(TripDataErrorKind::InvalidTimestamp(value.to_string()))
}

fn parse_coordinate(value: &str, max_abs: f64) -> Result<f64, TripDataErrorKind> {
    let trimmed = value.trim();
    match trimmed.parse::<f64>() {
        Ok(v) if v.is_finite() && v.abs() <= max_abs => Ok(v),
        _ => Err(TripDataErrorKind::InvalidCoordinate(trimmed.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_fields_valid() {
        // Arrange
        let (ts, lat, lon) = ("9/1/2014 8:15:00", "40.7690", "-73.9549");

        // Act
        let res = TripRecord::from_fields(ts, lat, lon);

        // Assert
        let record = res.unwrap();
        assert_eq!(record.hour(), 8);
        assert_eq!(record.minute(), 15);
        assert!((record.lat - 40.7690).abs() < f64::EPSILON);
        assert!((record.lon + 73.9549).abs() < f64::EPSILON);
    }

    #[test]
    fn test_from_fields_accepts_alternate_formats() {
        // Arrange
        let no_seconds = TripRecord::from_fields("9/1/2014 23:59", "40.0", "-74.0");
        let iso = TripRecord::from_fields("2014-09-01 00:01:00", "40.0", "-74.0");

        // Assert
        assert_eq!(no_seconds.unwrap().hour(), 23);
        assert_eq!(iso.unwrap().hour(), 0);
    }

    #[test]
    fn test_from_fields_invalid_timestamp() {
        // Act
        let res = TripRecord::from_fields("September 1st", "40.0", "-74.0");

        // Assert
        assert_eq!(
            res,
            Err(TripDataErrorKind::InvalidTimestamp(
                "September 1st".to_string()
            ))
        );
    }

    #[test]
    fn test_from_fields_invalid_coordinate() {
        // Act
        let not_a_number = TripRecord::from_fields("9/1/2014 8:15:00", "forty", "-74.0");
        let out_of_range = TripRecord::from_fields("9/1/2014 8:15:00", "140.76", "-74.0");

        // Assert
        assert_eq!(
            not_a_number,
            Err(TripDataErrorKind::InvalidCoordinate("forty".to_string()))
        );
        assert_eq!(
            out_of_range,
            Err(TripDataErrorKind::InvalidCoordinate("140.76".to_string()))
        );
    }
}
