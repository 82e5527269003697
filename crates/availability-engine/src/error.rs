//! Error types for loading availability data and configuring reports.

use std::fmt;

use chrono::NaiveDate;
use thiserror::Error;

/// Input column a load error was detected in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Team,
    Player,
    TimeZone,
    Day,
    From,
    To,
    Available,
    DateFrom,
    DateTo,
    /// The row as a whole had the wrong number of columns.
    Columns,
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Field::Team => "team",
            Field::Player => "player",
            Field::TimeZone => "time zone",
            Field::Day => "day",
            Field::From => "from time",
            Field::To => "to time",
            Field::Available => "availability",
            Field::DateFrom => "from date",
            Field::DateTo => "to date",
            Field::Columns => "column count",
        };
        f.write_str(name)
    }
}

/// Errors that can occur while loading availability data or building a report.
#[derive(Error, Debug)]
pub enum AvailabilityError {
    /// A data row failed validation. `line` is 1-based.
    #[error("Invalid {field} on line {line}: {value:?}")]
    InvalidField {
        line: u64,
        field: Field,
        value: String,
    },

    /// The input ended without the expected header row.
    #[error("Unable to find header row")]
    MissingHeader,

    /// The requested simulation horizon ends past the representable range.
    #[error("Horizon of {weeks} weeks from {start} is out of range")]
    HorizonOutOfRange { start: NaiveDate, weeks: u32 },

    /// The timezone display configuration was rejected.
    #[error("Invalid report configuration: {0}")]
    InvalidConfig(String),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl AvailabilityError {
    pub(crate) fn invalid(line: u64, field: Field, value: impl Into<String>) -> Self {
        AvailabilityError::InvalidField {
            line,
            field,
            value: value.into(),
        }
    }
}

/// Convenience alias used throughout availability-engine.
pub type Result<T> = std::result::Result<T, AvailabilityError>;
