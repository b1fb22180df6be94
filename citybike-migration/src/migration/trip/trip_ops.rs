use std::{fs::File, path::Path};

use csv::Writer;
use kdam::tqdm;

use crate::migration::{
    csv_ops::{self, HeaderIndex},
    station::StationIdSet,
    MigrationError,
};

use super::{
    ConsolidationSummary, TripColumns, TripFilePattern, TripRecord, TripSourceRow, TripThresholds,
    TripValidity, TRIPS_HEADER,
};

/// merges every trip log matched by `pattern` into a single file in the canonical
/// trip schema, keeping only trips that pass [`TripValidity::evaluate`].
///
/// the output header is written before any trip log is opened. trip logs are
/// read in file name order and rows keep their order within each log.
///
/// # Arguments
/// * `pattern` - selects the trip logs to read
/// * `station_ids` - ids of the known stations; trips between other stations are dropped
/// * `thresholds` - minimum distance and duration of a kept trip
/// * `output_file` - consolidated output, created or truncated
///
/// # Result
/// counts of the rows read, written and dropped
pub fn consolidate_trips(
    pattern: &TripFilePattern,
    station_ids: &StationIdSet,
    thresholds: &TripThresholds,
    output_file: &Path,
) -> Result<ConsolidationSummary, MigrationError> {
    let trip_files = pattern.discover(output_file)?;
    log::info!("found {} trip files matching {}", trip_files.len(), pattern);

    let mut writer = csv_ops::create_writer(output_file, &TRIPS_HEADER)?;
    let mut summary = ConsolidationSummary::default();

    let n_files = trip_files.len();
    let files_iter = tqdm!(trip_files.iter(), desc = "consolidating trip files", total = n_files);
    for trip_file in files_iter {
        let written_before = summary.rows_written;
        consolidate_file(
            trip_file,
            station_ids,
            thresholds,
            output_file,
            &mut writer,
            &mut summary,
        )?;
        summary.files += 1;
        log::info!(
            "{}: kept {} rows",
            trip_file.display(),
            summary.rows_written - written_before
        );
    }

    csv_ops::flush_writer(&mut writer, output_file)?;
    log::info!("wrote {} to {}", summary, output_file.display());
    Ok(summary)
}

fn consolidate_file(
    trip_file: &Path,
    station_ids: &StationIdSet,
    thresholds: &TripThresholds,
    output_file: &Path,
    writer: &mut Writer<File>,
    summary: &mut ConsolidationSummary,
) -> Result<(), MigrationError> {
    let filepath = csv_ops::filepath_string(trip_file);
    let mut reader = csv_ops::open_reader(trip_file)?;
    let header = HeaderIndex::from_reader(&mut reader, &filepath)?;
    let columns = TripColumns::from_header(&header)?;

    for (line, result) in reader.records().enumerate() {
        let row = result.map_err(|source| MigrationError::ReadError {
            filepath: filepath.clone(),
            source,
        })?;
        let source_row = TripSourceRow::new(&row, &columns, &header)?;
        let validity = TripValidity::evaluate(&source_row, station_ids, thresholds, &filepath)?;
        summary.record(validity);

        if validity.is_valid() {
            writer
                .serialize(TripRecord::from(source_row))
                .map_err(|source| MigrationError::WriteError {
                    filepath: csv_ops::filepath_string(output_file),
                    source,
                })?;
        } else {
            // header is line 1
            log::debug!("{filepath} line {}: dropped, {validity}", line + 2);
        }
    }
    Ok(())
}
