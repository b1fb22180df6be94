use std::path::{Path, PathBuf};

use config::Config;
use serde::{Deserialize, Serialize};

use super::{trip::TripFilePattern, trip::TripThresholds, MigrationError};

/// file locations and trip validity thresholds for a migration run. every
/// field is optional in a configuration file; missing entries fall back to
/// the HSL open data defaults.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct MigrationConfig {
    /// directory holding the station registry and the trip logs
    pub directory: PathBuf,
    pub stations_file: String,
    /// trip logs are all `<prefix>*.csv` files in `directory`
    pub trip_file_prefix: String,
    pub trips_file: String,
    /// meters
    pub min_distance: f64,
    /// seconds
    pub min_duration: i64,
}

impl Default for MigrationConfig {
    fn default() -> Self {
        Self {
            directory: PathBuf::from("."),
            stations_file: String::from("stations.csv"),
            trip_file_prefix: String::from("2021-"),
            trips_file: String::from("trips.csv"),
            min_distance: 10.0,
            min_duration: 10,
        }
    }
}

impl MigrationConfig {
    /// reads a TOML configuration file layered over the defaults.
    pub fn from_file(filepath: &Path) -> Result<MigrationConfig, MigrationError> {
        let filepath_str = filepath.display().to_string();
        let config_file = config::File::from(filepath).format(config::FileFormat::Toml);
        let config = Config::builder()
            .add_source(config_file)
            .build()
            .map_err(|e| MigrationError::ConfigReadError {
                msg: format!("failed reading '{filepath_str}'"),
                source: e,
            })?;
        let migration_config = config.try_deserialize::<MigrationConfig>().map_err(|e| {
            MigrationError::ConfigReadError {
                msg: format!("failed deserializing '{filepath_str}' as migration configuration"),
                source: e,
            }
        })?;
        log::debug!("loaded migration configuration {migration_config:?}");
        Ok(migration_config)
    }

    pub fn stations_path(&self) -> PathBuf {
        self.directory.join(&self.stations_file)
    }

    pub fn trips_path(&self) -> PathBuf {
        self.directory.join(&self.trips_file)
    }

    pub fn trip_file_pattern(&self) -> TripFilePattern {
        TripFilePattern::new(&self.directory, &self.trip_file_prefix)
    }

    pub fn thresholds(&self) -> TripThresholds {
        TripThresholds {
            min_distance: self.min_distance,
            min_duration: self.min_duration,
        }
    }
}
