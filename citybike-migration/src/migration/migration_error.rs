#[derive(thiserror::Error, Debug)]
pub enum MigrationError {
    #[error("column '{column}' not found in '{filepath}'")]
    MissingColumn { column: String, filepath: String },
    #[error("failed reading '{filepath}': {source}")]
    ReadError {
        filepath: String,
        source: csv::Error,
    },
    #[error("failed writing '{filepath}': {source}")]
    WriteError {
        filepath: String,
        source: csv::Error,
    },
    #[error("failure accessing '{filepath}': {source}")]
    IoError {
        filepath: String,
        source: std::io::Error,
    },
    #[error("value '{value}' of column '{column}' in '{filepath}' is not a valid {expected}")]
    InvalidNumber {
        column: String,
        value: String,
        expected: String,
        filepath: String,
    },
    #[error("departure time '{value}' in '{filepath}' is not a valid timestamp: {source}")]
    InvalidTimestamp {
        value: String,
        filepath: String,
        source: chrono::ParseError,
    },
    #[error("station '{station_id}' not found in '{filepath}'")]
    UnknownStation { station_id: String, filepath: String },
    #[error("{0}")]
    InvalidArgument(String),
    #[error("failed serializing station statistics: {0}")]
    SerializeError(#[from] serde_json::Error),
    #[error("{msg}: {source}")]
    ConfigReadError {
        msg: String,
        source: config::ConfigError,
    },
}
