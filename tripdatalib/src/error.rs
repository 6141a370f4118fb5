//! The `error` module defines the [`TripDataError`] struct that describes the errors that
//! can occur when parsing or loading trip datasets via [`TripDataset`].
//! It contains the two pieces of information:
//! 1. What kind of error was encountered (via [`TripDataErrorKind`] struct).
//! 2. What is the row number (if applicable), e.g., at which data row of the CSV the parsing failed.
//!
//! [`TripDataset`]: crate::TripDataset

use std::error::Error;
use std::fmt;

#[derive(Debug, PartialEq, Eq)]
pub enum TripDataError {
    ParseHeaderError(TripDataErrorKind),
    ParseRowError(TripDataErrorKind, usize),
    QueryError(TripDataErrorKind),
}

impl fmt::Display for TripDataError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ParseHeaderError(base_err) => {
                write!(
                    f,
                    "Error encountered while parsing the CSV header:\n{base_err}",
                )
            }
            Self::ParseRowError(base_err, row) => {
                write!(
                    f,
                    "Error encountered at data row #{row} of the CSV:\n{base_err}",
                )
            }
            Self::QueryError(base_err) => {
                write!(
                    f,
                    "Error encountered while querying the trip dataset:\n{base_err}",
                )
            }
        }
    }
}

#[derive(Debug, PartialEq, Eq)]
pub enum TripDataErrorKind {
    /// CSV has no header row
    EmptyFile,
    /// Header is missing a required column
    MissingColumn(String),
    /// Data row has fewer fields than the header
    RowTooShort(usize, usize),
    /// Timestamp field could not be parsed in any accepted format
    InvalidTimestamp(String),
    /// Coordinate field is not a number or is out of range
    InvalidCoordinate(String),
    /// Requested hour is outside 0..=23
    HourOutOfRange(u32),
}

impl fmt::Display for TripDataErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyFile => {
                write!(f, "CSV contains no header row")
            }
            Self::MissingColumn(name) => {
                write!(f, "Required column '{name}' not found in header")
            }
            Self::RowTooShort(expected, actual) => {
                write!(f, "Expected at least {expected} fields, found {actual}")
            }
            Self::InvalidTimestamp(value) => {
                write!(f, "Could not parse timestamp '{value}'")
            }
            Self::InvalidCoordinate(value) => {
                write!(f, "Invalid coordinate value '{value}'")
            }
            Self::HourOutOfRange(hour) => {
                write!(f, "Hour {hour} is outside the valid range 0..=23")
            }
        }
    }
}

impl Error for TripDataError {}
impl Error for TripDataErrorKind {}
