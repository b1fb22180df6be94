use std::{collections::HashSet, path::Path};

use crate::migration::{
    csv_ops::{self, HeaderIndex},
    MigrationError,
};

use super::{StationRecord, ORIGIN_STATION_COLUMNS, STATIONS_HEADER};

/// station ids, compared as opaque strings
pub type StationIdSet = HashSet<String>;

/// rewrites a station registry exported with the origin (Finnish/Swedish/English)
/// headers into the canonical schema, in place, and returns the ids of all stations.
///
/// the whole file is read before it is truncated. the file is not
/// normalized twice: on an already normalized registry the origin columns
/// are gone and this fails with [`MigrationError::MissingColumn`].
///
/// # Arguments
/// * `stations_file` - path to the station registry, overwritten on success
///
/// # Result
/// the set of station ids, one per row of the registry
pub fn normalize_stations(stations_file: &Path) -> Result<StationIdSet, MigrationError> {
    let stations = read_origin_stations(stations_file)?;
    write_stations(stations_file, &stations)?;

    let ids = stations
        .iter()
        .map(|station| station.id.clone())
        .collect::<StationIdSet>();
    log::info!(
        "normalized {} stations in {}",
        stations.len(),
        stations_file.display()
    );
    if ids.len() != stations.len() {
        log::warn!(
            "{} contains {} duplicate station ids",
            stations_file.display(),
            stations.len() - ids.len()
        );
    }
    Ok(ids)
}

/// reads every row of a registry with origin headers
pub fn read_origin_stations(stations_file: &Path) -> Result<Vec<StationRecord>, MigrationError> {
    let filepath = csv_ops::filepath_string(stations_file);
    let mut reader = csv_ops::open_reader(stations_file)?;
    let header = HeaderIndex::from_reader(&mut reader, &filepath)?;
    header.require(&ORIGIN_STATION_COLUMNS)?;

    let mut stations = Vec::new();
    for result in reader.records() {
        let row = result.map_err(|source| MigrationError::ReadError {
            filepath: filepath.clone(),
            source,
        })?;
        stations.push(StationRecord::from_origin_row(&row, &header)?);
    }
    Ok(stations)
}

pub fn write_stations(stations_file: &Path, stations: &[StationRecord]) -> Result<(), MigrationError> {
    let mut writer = csv_ops::create_writer(stations_file, &STATIONS_HEADER)?;
    for station in stations {
        writer
            .serialize(station)
            .map_err(|source| MigrationError::WriteError {
                filepath: csv_ops::filepath_string(stations_file),
                source,
            })?;
    }
    csv_ops::flush_writer(&mut writer, stations_file)
}

/// collects station ids from a registry that was already normalized, so that
/// the trip pass can be repeated without rewriting the registry.
pub fn read_station_ids(stations_file: &Path) -> Result<StationIdSet, MigrationError> {
    let filepath = csv_ops::filepath_string(stations_file);
    let mut reader = csv_ops::open_reader(stations_file)?;
    HeaderIndex::from_reader(&mut reader, &filepath)?.require(&STATIONS_HEADER)?;

    reader
        .deserialize::<StationRecord>()
        .map(|result| {
            result
                .map(|station| station.id)
                .map_err(|source| MigrationError::ReadError {
                    filepath: filepath.clone(),
                    source,
                })
        })
        .collect()
}
