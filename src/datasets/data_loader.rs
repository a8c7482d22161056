use crate::datasets::error::DatasetError;
use crate::types::dataset_kind::{ColumnKind, DatasetKind};
use chrono::{NaiveDate, NaiveDateTime};
use log::{debug, info, warn};
use polars::prelude::*;
use std::io;
use std::path::Path;

const DATE_FORMAT: &str = "%Y-%m-%d";
const DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Reads a dataset CSV into a typed `DataFrame`.
///
/// Every column is first read as text so that a bad cell can be reported with its
/// row and column, then parsed according to [`DatasetKind`]'s schema. The resulting
/// frame holds exactly the schema columns, with `location_date` as a Polars `Date`.
pub struct DatasetLoader;

impl DatasetLoader {
    pub fn load(kind: DatasetKind, path: &Path) -> Result<DataFrame, DatasetError> {
        Self::ensure_readable(path)?;
        let raw = Self::read_raw_csv(path)?;
        if raw.height() == 0 {
            return Err(DatasetError::EmptyDataset(path.to_path_buf()));
        }

        let columns = kind
            .schema()
            .iter()
            .map(|(name, column_kind)| Self::typed_column(kind, path, &raw, name, *column_kind))
            .collect::<Result<Vec<Column>, DatasetError>>()?;
        let df = DataFrame::new(columns).map_err(|source| DatasetError::FrameAssembly {
            path: path.to_path_buf(),
            kind,
            source,
        })?;

        Self::warn_on_unordered_temperatures(kind, path, &df);
        info!(
            "Loaded {} {} rows from {:?}",
            df.height(),
            kind,
            path
        );
        Ok(df)
    }

    fn ensure_readable(path: &Path) -> Result<(), DatasetError> {
        let metadata = std::fs::metadata(path)
            .map_err(|e| DatasetError::DataUnavailable(path.to_path_buf(), e))?;
        if !metadata.is_file() {
            return Err(DatasetError::DataUnavailable(
                path.to_path_buf(),
                io::Error::new(io::ErrorKind::InvalidInput, "not a regular file"),
            ));
        }
        Ok(())
    }

    /// Reads every column as a string column.
    fn read_raw_csv(path: &Path) -> Result<DataFrame, DatasetError> {
        CsvReadOptions::default()
            .with_has_header(true)
            .with_infer_schema_length(Some(0))
            .try_into_reader_with_file_path(Some(path.to_path_buf()))
            .map_err(|e| DatasetError::CsvRead(path.to_path_buf(), e))?
            .finish()
            .map_err(|e| DatasetError::CsvRead(path.to_path_buf(), e))
    }

    fn typed_column(
        kind: DatasetKind,
        path: &Path,
        raw: &DataFrame,
        name: &str,
        column_kind: ColumnKind,
    ) -> Result<Column, DatasetError> {
        let raw_column = raw
            .column(name)
            .map_err(|_| DatasetError::MissingColumn {
                path: path.to_path_buf(),
                kind,
                column: name.to_string(),
            })?;
        let cells = raw_column
            .str()
            .map_err(|e| DatasetError::CsvRead(path.to_path_buf(), e))?;
        let cell_error = |row: usize, reason: String| DatasetError::MalformedRow {
            path: path.to_path_buf(),
            row: row + 1,
            column: name.to_string(),
            reason,
        };
        let required = |row: usize, cell: Option<&str>| -> Result<String, DatasetError> {
            match cell.map(str::trim) {
                Some(text) if !text.is_empty() => Ok(text.to_string()),
                _ => Err(cell_error(row, "missing value".to_string())),
            }
        };

        let column = match column_kind {
            ColumnKind::Date => {
                let values = cells
                    .into_iter()
                    .enumerate()
                    .map(|(row, cell)| {
                        let text = required(row, cell)?;
                        parse_date(&text)
                            .ok_or_else(|| cell_error(row, format!("cannot parse date '{text}'")))
                    })
                    .collect::<Result<Vec<NaiveDate>, DatasetError>>()?;
                Column::new(name.into(), values)
            }
            ColumnKind::Text => {
                let values = cells
                    .into_iter()
                    .enumerate()
                    .map(|(row, cell)| required(row, cell))
                    .collect::<Result<Vec<String>, DatasetError>>()?;
                Column::new(name.into(), values)
            }
            ColumnKind::Float => {
                let values = cells
                    .into_iter()
                    .enumerate()
                    .map(|(row, cell)| {
                        let text = required(row, cell)?;
                        text.parse::<f64>()
                            .map_err(|e| cell_error(row, format!("'{text}' is not a number: {e}")))
                    })
                    .collect::<Result<Vec<f64>, DatasetError>>()?;
                Column::new(name.into(), values)
            }
            ColumnKind::Flag => {
                let values = cells
                    .into_iter()
                    .enumerate()
                    .map(|(row, cell)| {
                        let text = required(row, cell)?;
                        parse_flag(&text)
                            .ok_or_else(|| cell_error(row, format!("'{text}' is not a boolean")))
                    })
                    .collect::<Result<Vec<bool>, DatasetError>>()?;
                Column::new(name.into(), values)
            }
        };
        Ok(column)
    }

    /// Rows with `min > mean` or `mean > max` are kept; they are only reported.
    fn warn_on_unordered_temperatures(kind: DatasetKind, path: &Path, df: &DataFrame) {
        let [min, mean, max] = kind.temperature_columns();
        let violations = df
            .clone()
            .lazy()
            .filter(col(min).gt(col(mean)).or(col(mean).gt(col(max))))
            .collect()
            .map(|violating| violating.height());
        match violations {
            Ok(0) => {}
            Ok(count) => warn!(
                "{} of {} rows in {:?} violate {} <= {} <= {}",
                count,
                df.height(),
                path,
                min,
                mean,
                max
            ),
            Err(e) => debug!("Skipped temperature order check for {:?}: {}", path, e),
        }
    }
}

/// Accepts plain ISO dates and the midnight timestamps pandas writes for datetime columns.
fn parse_date(text: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(text, DATE_FORMAT)
        .ok()
        .or_else(|| {
            NaiveDateTime::parse_from_str(text, DATETIME_FORMAT)
                .ok()
                .map(|dt| dt.date())
        })
}

fn parse_flag(text: &str) -> Option<bool> {
    if text.eq_ignore_ascii_case("true") || text == "1" {
        Some(true)
    } else if text.eq_ignore_ascii_case("false") || text == "0" {
        Some(false)
    } else {
        None
    }
}
