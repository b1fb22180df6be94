//! normalizes the HSL city bike station registry and consolidates the monthly
//! trip logs (Helsinki and Espoo open data exports) into a single trips file.
pub mod app;
mod csv_ops;
mod migration_config;
mod migration_error;
pub mod station;
pub mod statistics;
pub mod trip;

use std::fmt::Display;

pub use migration_config::MigrationConfig;
pub use migration_error::MigrationError;

use trip::ConsolidationSummary;

/// result of a full migration run
#[derive(Debug, Clone)]
pub struct MigrationSummary {
    pub stations: usize,
    pub trips: ConsolidationSummary,
}

impl Display for MigrationSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} stations normalized\n{}", self.stations, self.trips)
    }
}

/// normalizes the station registry, then consolidates the trip logs against
/// the station ids it contains.
pub fn run_migration(config: &MigrationConfig) -> Result<MigrationSummary, MigrationError> {
    let station_ids = station::normalize_stations(&config.stations_path())?;
    let trips = trip::consolidate_trips(
        &config.trip_file_pattern(),
        &station_ids,
        &config.thresholds(),
        &config.trips_path(),
    )?;
    Ok(MigrationSummary {
        stations: station_ids.len(),
        trips,
    })
}
