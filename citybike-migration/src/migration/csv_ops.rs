use std::{collections::HashMap, fs::File, path::Path};

use csv::{Reader, StringRecord, Writer};

use super::MigrationError;

/// some exports (Excel, the HSL open data portal) prefix the first header with this
const BYTE_ORDER_MARK: char = '\u{feff}';

/// lookup from column name to field position for a single CSV file.
/// any byte order mark on a header name is removed so that the first
/// column can be found by its plain name.
pub struct HeaderIndex {
    filepath: String,
    columns: HashMap<String, usize>,
}

impl HeaderIndex {
    pub fn new(header: &StringRecord, filepath: &str) -> HeaderIndex {
        let columns = header
            .iter()
            .enumerate()
            .map(|(idx, name)| (name.trim_start_matches(BYTE_ORDER_MARK).to_string(), idx))
            .collect();
        HeaderIndex {
            filepath: filepath.to_string(),
            columns,
        }
    }

    /// reads the header row of a reader and indexes it
    pub fn from_reader(reader: &mut Reader<File>, filepath: &str) -> Result<HeaderIndex, MigrationError> {
        let header = reader
            .headers()
            .map_err(|source| MigrationError::ReadError {
                filepath: filepath.to_string(),
                source,
            })?;
        Ok(HeaderIndex::new(header, filepath))
    }

    pub fn position(&self, column: &str) -> Result<usize, MigrationError> {
        self.columns
            .get(column)
            .copied()
            .ok_or_else(|| self.missing(column))
    }

    /// confirms that every column is present in the header
    pub fn require(&self, columns: &[&str]) -> Result<(), MigrationError> {
        for column in columns {
            self.position(column)?;
        }
        Ok(())
    }

    /// gets the value of a named column from a row of this file
    pub fn field<'a>(&self, row: &'a StringRecord, column: &str) -> Result<&'a str, MigrationError> {
        let idx = self.position(column)?;
        self.field_at(row, idx, column)
    }

    /// gets the value at a known position, failing if the row is too short
    pub fn field_at<'a>(
        &self,
        row: &'a StringRecord,
        idx: usize,
        column: &str,
    ) -> Result<&'a str, MigrationError> {
        row.get(idx).ok_or_else(|| self.missing(column))
    }

    pub fn filepath(&self) -> &str {
        &self.filepath
    }

    fn missing(&self, column: &str) -> MigrationError {
        MigrationError::MissingColumn {
            column: column.to_string(),
            filepath: self.filepath.clone(),
        }
    }
}

pub fn filepath_string(path: &Path) -> String {
    path.display().to_string()
}

pub fn open_reader(path: &Path) -> Result<Reader<File>, MigrationError> {
    csv::ReaderBuilder::new()
        .has_headers(true)
        .from_path(path)
        .map_err(|source| MigrationError::ReadError {
            filepath: filepath_string(path),
            source,
        })
}

/// creates (or truncates) a CSV file and writes the header row immediately,
/// so that the file carries a header even when no records follow.
pub fn create_writer(path: &Path, header: &[&str]) -> Result<Writer<File>, MigrationError> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_path(path)
        .map_err(|source| MigrationError::WriteError {
            filepath: filepath_string(path),
            source,
        })?;
    writer
        .write_record(header)
        .map_err(|source| MigrationError::WriteError {
            filepath: filepath_string(path),
            source,
        })?;
    Ok(writer)
}

pub fn flush_writer(writer: &mut Writer<File>, path: &Path) -> Result<(), MigrationError> {
    writer.flush().map_err(|source| MigrationError::IoError {
        filepath: filepath_string(path),
        source,
    })
}
