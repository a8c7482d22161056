use crate::datasets::error::DatasetError;
use crate::types::season::ParseSeasonError;
use chrono::NaiveDate;
use polars::error::PolarsError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DashboardError {
    #[error(transparent)]
    Dataset(#[from] DatasetError),

    #[error("Please select at least one city.")]
    EmptySelection,

    #[error("Invalid date range: {from} is after {to}")]
    InvalidRange { from: NaiveDate, to: NaiveDate },

    #[error("Failed to parse date")]
    DateParsingError,

    #[error("Required column '{0}' not found in DataFrame")]
    ColumnNotFound(String, #[source] PolarsError),

    #[error("Unexpected null in column '{0}'")]
    UnexpectedNull(String),

    #[error(transparent)]
    ParseSeason(#[from] ParseSeasonError),

    #[error("Polars operation failed: {0}")]
    PolarsError(#[from] PolarsError),

    #[error("Failed to serialize view")]
    Json(#[from] serde_json::Error),
}

impl DashboardError {
    /// Whether the user can fix the error by changing their selection.
    ///
    /// Recoverable errors should be shown as a message next to the inputs; everything
    /// else means the data or the environment is broken.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            DashboardError::EmptySelection | DashboardError::InvalidRange { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_data_errors_are_fatal() {
        let err: DashboardError = DatasetError::EmptyDataset(PathBuf::from("x.csv")).into();
        assert!(!err.is_recoverable());
        assert!(!DashboardError::UnexpectedNull("filled".into()).is_recoverable());
    }

    #[test]
    fn test_empty_selection_message() {
        assert_eq!(
            DashboardError::EmptySelection.to_string(),
            "Please select at least one city."
        );
    }
}
