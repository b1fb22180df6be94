use std::path::Path;

use clap::Subcommand;
use serde::{Deserialize, Serialize};

use crate::migration::{
    run_migration, station, statistics, trip, MigrationConfig, MigrationError,
};

#[derive(Debug, Clone, Serialize, Deserialize, Subcommand)]
pub enum MigrationOperation {
    /// normalize the station registry, then consolidate all trip logs into one trips file
    Migrate,
    /// only normalize the station registry, rewriting it in place
    Stations,
    /// only consolidate the trip logs, using an already normalized station registry
    Trips,
    /// report trip statistics per station from the consolidated trips file
    Statistics {
        /// a single station to report on. when omitted, reports every station
        #[arg(long)]
        station_id: Option<String>,
        /// only count trips departing in this month (1-12)
        #[arg(long)]
        month: Option<u32>,
        /// write the JSON report to this file instead of stdout
        #[arg(long)]
        output: Option<String>,
    },
}

impl MigrationOperation {
    pub fn run(&self, config: &MigrationConfig) -> Result<(), MigrationError> {
        match self {
            MigrationOperation::Migrate => {
                let summary = run_migration(config)?;
                println!("{summary}");
            }
            MigrationOperation::Stations => {
                let station_ids = station::normalize_stations(&config.stations_path())?;
                println!("{} stations normalized", station_ids.len());
            }
            MigrationOperation::Trips => {
                let station_ids = station::read_station_ids(&config.stations_path())?;
                let summary = trip::consolidate_trips(
                    &config.trip_file_pattern(),
                    &station_ids,
                    &config.thresholds(),
                    &config.trips_path(),
                )?;
                println!("{summary}");
            }
            MigrationOperation::Statistics {
                station_id,
                month,
                output,
            } => {
                let stations_path = config.stations_path();
                let trips_path = config.trips_path();
                let report = match station_id {
                    Some(id) => serde_json::to_string_pretty(&statistics::station_statistics(
                        &stations_path,
                        &trips_path,
                        id,
                        *month,
                    )?)?,
                    None => serde_json::to_string_pretty(&statistics::all_station_statistics(
                        &stations_path,
                        &trips_path,
                        *month,
                    )?)?,
                };
                match output {
                    Some(filepath) => write_report(Path::new(filepath), &report)?,
                    None => println!("{report}"),
                }
            }
        }
        Ok(())
    }
}

fn write_report(filepath: &Path, report: &str) -> Result<(), MigrationError> {
    std::fs::write(filepath, report).map_err(|source| MigrationError::IoError {
        filepath: filepath.display().to_string(),
        source,
    })?;
    log::info!("wrote station statistics to {}", filepath.display());
    Ok(())
}
