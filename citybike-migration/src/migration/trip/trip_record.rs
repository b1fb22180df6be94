use csv::StringRecord;
use serde::{Deserialize, Serialize};

use crate::migration::{csv_ops::HeaderIndex, MigrationError};

/// canonical column order of the consolidated trips file
pub const TRIPS_HEADER: [&str; 6] = [
    "departure_time",
    "return_time",
    "departure_station",
    "return_station",
    "distance",
    "duration",
];

pub const ORIGIN_DEPARTURE: &str = "Departure";
pub const ORIGIN_RETURN: &str = "Return";
pub const ORIGIN_DEPARTURE_STATION: &str = "Departure station id";
pub const ORIGIN_RETURN_STATION: &str = "Return station id";
pub const ORIGIN_DISTANCE: &str = "Covered distance (m)";
pub const ORIGIN_DURATION: &str = "Duration (sec.)";

/// a trip in the canonical schema. values are copied verbatim from the
/// trip log, so `distance` keeps e.g. "150.5" rather than a re-formatted float.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct TripRecord {
    pub departure_time: String,
    pub return_time: String,
    pub departure_station: String,
    pub return_station: String,
    pub distance: String,
    pub duration: String,
}

/// field positions of the origin trip columns within one trip log
#[derive(Debug, Clone, Copy)]
pub struct TripColumns {
    departure: usize,
    ret: usize,
    departure_station: usize,
    return_station: usize,
    distance: usize,
    duration: usize,
}

impl TripColumns {
    pub fn from_header(header: &HeaderIndex) -> Result<TripColumns, MigrationError> {
        Ok(TripColumns {
            departure: header.position(ORIGIN_DEPARTURE)?,
            ret: header.position(ORIGIN_RETURN)?,
            departure_station: header.position(ORIGIN_DEPARTURE_STATION)?,
            return_station: header.position(ORIGIN_RETURN_STATION)?,
            distance: header.position(ORIGIN_DISTANCE)?,
            duration: header.position(ORIGIN_DURATION)?,
        })
    }
}

/// borrowed view of one row of a trip log
#[derive(Debug, Clone, Copy)]
pub struct TripSourceRow<'a> {
    pub departure: &'a str,
    pub ret: &'a str,
    pub departure_station: &'a str,
    pub return_station: &'a str,
    pub distance: &'a str,
    pub duration: &'a str,
}

impl<'a> TripSourceRow<'a> {
    pub fn new(
        row: &'a StringRecord,
        columns: &TripColumns,
        header: &HeaderIndex,
    ) -> Result<TripSourceRow<'a>, MigrationError> {
        Ok(TripSourceRow {
            departure: header.field_at(row, columns.departure, ORIGIN_DEPARTURE)?,
            ret: header.field_at(row, columns.ret, ORIGIN_RETURN)?,
            departure_station: header.field_at(
                row,
                columns.departure_station,
                ORIGIN_DEPARTURE_STATION,
            )?,
            return_station: header.field_at(row, columns.return_station, ORIGIN_RETURN_STATION)?,
            distance: header.field_at(row, columns.distance, ORIGIN_DISTANCE)?,
            duration: header.field_at(row, columns.duration, ORIGIN_DURATION)?,
        })
    }
}

impl From<TripSourceRow<'_>> for TripRecord {
    fn from(row: TripSourceRow<'_>) -> Self {
        TripRecord {
            departure_time: row.departure.to_string(),
            return_time: row.ret.to_string(),
            departure_station: row.departure_station.to_string(),
            return_station: row.return_station.to_string(),
            distance: row.distance.to_string(),
            duration: row.duration.to_string(),
        }
    }
}
