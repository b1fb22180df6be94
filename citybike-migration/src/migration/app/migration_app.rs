use std::path::{Path, PathBuf};

use clap::Parser;

use super::MigrationOperation;
use crate::migration::{MigrationConfig, MigrationError};

/// command line tool for normalizing city bike station and trip datasets
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct MigrationApp {
    #[command(subcommand)]
    pub op: MigrationOperation,
    /// TOML file with paths and thresholds, layered over the defaults
    #[arg(long, global = true)]
    pub config_file: Option<String>,
    /// directory containing the station registry and trip logs, overrides the config file
    #[arg(long, global = true)]
    pub directory: Option<String>,
    /// file name prefix of the trip logs to consolidate, overrides the config file
    #[arg(long, global = true)]
    pub prefix: Option<String>,
}

impl MigrationApp {
    pub fn config(&self) -> Result<MigrationConfig, MigrationError> {
        let mut config = match &self.config_file {
            Some(filepath) => MigrationConfig::from_file(Path::new(filepath))?,
            None => MigrationConfig::default(),
        };
        if let Some(directory) = &self.directory {
            config.directory = PathBuf::from(directory);
        }
        if let Some(prefix) = &self.prefix {
            config.trip_file_prefix = prefix.clone();
        }
        Ok(config)
    }
}

#[cfg(test)]
mod test {
    use super::MigrationApp;
    use crate::migration::app::MigrationOperation;
    use clap::Parser;
    use std::path::PathBuf;

    #[test]
    fn test_flags_override_defaults() {
        let app = MigrationApp::parse_from([
            "citybike_migration",
            "migrate",
            "--directory",
            "/data/hsl",
            "--prefix",
            "2022-",
        ]);
        assert!(matches!(app.op, MigrationOperation::Migrate));
        let config = app.config().unwrap();
        assert_eq!(config.directory, PathBuf::from("/data/hsl"));
        assert_eq!(config.trip_file_prefix, "2022-");
        assert_eq!(config.trips_file, "trips.csv");
    }

    #[test]
    fn test_statistics_arguments() {
        let app = MigrationApp::parse_from([
            "citybike_migration",
            "statistics",
            "--station-id",
            "501",
            "--month",
            "6",
        ]);
        match app.op {
            MigrationOperation::Statistics {
                station_id, month, ..
            } => {
                assert_eq!(station_id.as_deref(), Some("501"));
                assert_eq!(month, Some(6));
            }
            _ => panic!("expected statistics operation"),
        }
    }
}
