use std::{
    fmt::Display,
    fs,
    path::{Path, PathBuf},
};

use itertools::Itertools;

use crate::migration::{csv_ops, MigrationError};

const TRIP_FILE_EXTENSION: &str = "csv";

/// selects trip logs by name: every `<prefix>*.csv` file directly inside `directory`.
#[derive(Debug, Clone, PartialEq)]
pub struct TripFilePattern {
    pub directory: PathBuf,
    pub prefix: String,
}

impl TripFilePattern {
    pub fn new(directory: &Path, prefix: &str) -> TripFilePattern {
        TripFilePattern {
            directory: directory.to_path_buf(),
            prefix: prefix.to_string(),
        }
    }

    pub fn matches(&self, path: &Path) -> bool {
        let has_prefix = path
            .file_name()
            .and_then(|name| name.to_str())
            .is_some_and(|name| name.starts_with(&self.prefix));
        let has_extension = path.extension().is_some_and(|e| e == TRIP_FILE_EXTENSION);
        has_prefix && has_extension
    }

    /// lists the matching files, sorted by file name. `exclude` is skipped even
    /// when it matches, so a consolidated output inside the same directory is
    /// never read back as a trip log.
    pub fn discover(&self, exclude: &Path) -> Result<Vec<PathBuf>, MigrationError> {
        let entries = fs::read_dir(&self.directory).map_err(|source| MigrationError::IoError {
            filepath: csv_ops::filepath_string(&self.directory),
            source,
        })?;

        let mut files = vec![];
        for entry in entries {
            let entry = entry.map_err(|source| MigrationError::IoError {
                filepath: csv_ops::filepath_string(&self.directory),
                source,
            })?;
            let path = entry.path();
            if path.is_file() && self.matches(&path) && !is_same_file(&path, exclude) {
                files.push(path);
            }
        }
        Ok(files.into_iter().sorted().collect_vec())
    }
}

impl Display for TripFilePattern {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let pattern = self
            .directory
            .join(format!("{}*.{}", self.prefix, TRIP_FILE_EXTENSION));
        write!(f, "{}", pattern.display())
    }
}

fn is_same_file(a: &Path, b: &Path) -> bool {
    match (fs::canonicalize(a), fs::canonicalize(b)) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}
