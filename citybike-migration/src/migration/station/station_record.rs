use csv::StringRecord;
use serde::{Deserialize, Serialize};

use crate::migration::{csv_ops::HeaderIndex, MigrationError};

/// canonical column order of a normalized station registry
pub const STATIONS_HEADER: [&str; 13] = [
    "fid",
    "id",
    "name_fi",
    "name_se",
    "name_en",
    "address_fi",
    "address_se",
    "city_fi",
    "city_se",
    "operator",
    "capacity",
    "x",
    "y",
];

/// column names used by the HSL station registry export, in canonical order
pub const ORIGIN_STATION_COLUMNS: [&str; 13] = [
    "FID",
    "ID",
    "Nimi",
    "Namn",
    "Name",
    "Osoite",
    "Adress",
    "Kaupunki",
    "Stad",
    "Operaattor",
    "Kapasiteet",
    "x",
    "y",
];

/// a single docking station. all values are kept as the source text,
/// `id` being the key that trips refer to.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct StationRecord {
    pub fid: String,
    pub id: String,
    pub name_fi: String,
    pub name_se: String,
    pub name_en: String,
    pub address_fi: String,
    pub address_se: String,
    pub city_fi: String,
    pub city_se: String,
    pub operator: String,
    pub capacity: String,
    pub x: String,
    pub y: String,
}

impl StationRecord {
    /// re-keys a row of the origin registry into the canonical schema
    pub fn from_origin_row(
        row: &StringRecord,
        header: &HeaderIndex,
    ) -> Result<StationRecord, MigrationError> {
        let get = |column: &str| header.field(row, column).map(String::from);
        Ok(StationRecord {
            fid: get("FID")?,
            id: get("ID")?,
            name_fi: get("Nimi")?,
            name_se: get("Namn")?,
            name_en: get("Name")?,
            address_fi: get("Osoite")?,
            address_se: get("Adress")?,
            city_fi: get("Kaupunki")?,
            city_se: get("Stad")?,
            operator: get("Operaattor")?,
            capacity: get("Kapasiteet")?,
            x: get("x")?,
            y: get("y")?,
        })
    }
}
