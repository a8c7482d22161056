use crate::types::dataset_kind::DatasetKind;
use polars::error::PolarsError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("Dataset '{0}' is unavailable")]
    DataUnavailable(PathBuf, #[source] std::io::Error),

    #[error("Failed to read CSV data from '{0}'")]
    CsvRead(PathBuf, #[source] PolarsError),

    #[error("Required column '{column}' not found in {kind} dataset '{path}'")]
    MissingColumn {
        path: PathBuf,
        kind: DatasetKind,
        column: String,
    },

    // Row numbers are 1-based and exclude the header line.
    #[error("Malformed row {row} in '{path}', column '{column}': {reason}")]
    MalformedRow {
        path: PathBuf,
        row: usize,
        column: String,
        reason: String,
    },

    #[error("Dataset '{0}' contains no rows")]
    EmptyDataset(PathBuf),

    #[error("Failed to assemble {kind} frame from '{path}'")]
    FrameAssembly {
        path: PathBuf,
        kind: DatasetKind,
        #[source]
        source: PolarsError,
    },
}
