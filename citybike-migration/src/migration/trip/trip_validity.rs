use std::{fmt::Display, num::IntErrorKind};

use serde::{Deserialize, Serialize};

use crate::migration::{station::StationIdSet, MigrationError};

use super::{trip_record::TripSourceRow, ORIGIN_DISTANCE, ORIGIN_DURATION};

/// lower bounds a trip must reach to be kept
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct TripThresholds {
    /// meters
    pub min_distance: f64,
    /// seconds
    pub min_duration: i64,
}

impl Default for TripThresholds {
    fn default() -> Self {
        Self {
            min_distance: 10.0,
            min_duration: 10,
        }
    }
}

/// outcome of checking a trip log row. a row is kept only when it is
/// [`TripValidity::Valid`]; otherwise the variant names the first check it failed.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "snake_case")]
pub enum TripValidity {
    Valid,
    MissingDistance,
    MissingDuration,
    ShortDistance,
    ShortDuration,
    UnknownDepartureStation,
    UnknownReturnStation,
}

impl TripValidity {
    /// applies the checks in order, stopping at the first one that fails. numeric
    /// fields are only parsed once they are known to be non-empty, and the
    /// duration is only parsed when the distance passed. a non-empty value that
    /// does not parse is an error, not a dropped row.
    pub fn evaluate(
        row: &TripSourceRow<'_>,
        station_ids: &StationIdSet,
        thresholds: &TripThresholds,
        filepath: &str,
    ) -> Result<TripValidity, MigrationError> {
        if row.distance.is_empty() {
            return Ok(TripValidity::MissingDistance);
        }
        if row.duration.is_empty() {
            return Ok(TripValidity::MissingDuration);
        }
        let distance = row.distance.trim().parse::<f64>().map_err(|_| {
            invalid_number(ORIGIN_DISTANCE, row.distance, "decimal number", filepath)
        })?;
        // NaN never reaches the threshold
        if !(distance >= thresholds.min_distance) {
            return Ok(TripValidity::ShortDistance);
        }
        // integers outside the i64 range still compare against the threshold
        let reaches_duration = match row.duration.trim().parse::<i64>() {
            Ok(duration) => duration >= thresholds.min_duration,
            Err(e) => match e.kind() {
                IntErrorKind::PosOverflow => true,
                IntErrorKind::NegOverflow => false,
                _ => {
                    return Err(invalid_number(
                        ORIGIN_DURATION,
                        row.duration,
                        "integer",
                        filepath,
                    ))
                }
            },
        };
        if !reaches_duration {
            return Ok(TripValidity::ShortDuration);
        }
        if !station_ids.contains(row.departure_station) {
            return Ok(TripValidity::UnknownDepartureStation);
        }
        if !station_ids.contains(row.return_station) {
            return Ok(TripValidity::UnknownReturnStation);
        }
        Ok(TripValidity::Valid)
    }

    pub fn is_valid(&self) -> bool {
        matches!(self, TripValidity::Valid)
    }
}

impl Display for TripValidity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            TripValidity::Valid => "valid",
            TripValidity::MissingDistance => "missing distance",
            TripValidity::MissingDuration => "missing duration",
            TripValidity::ShortDistance => "distance below threshold",
            TripValidity::ShortDuration => "duration below threshold",
            TripValidity::UnknownDepartureStation => "unknown departure station",
            TripValidity::UnknownReturnStation => "unknown return station",
        };
        write!(f, "{s}")
    }
}

fn invalid_number(column: &str, value: &str, expected: &str, filepath: &str) -> MigrationError {
    MigrationError::InvalidNumber {
        column: column.to_string(),
        value: value.to_string(),
        expected: expected.to_string(),
        filepath: filepath.to_string(),
    }
}
