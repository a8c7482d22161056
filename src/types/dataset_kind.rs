//! Identifies the two CSV sources and the schema each one must satisfy.

use crate::types::columns::*;
use std::fmt;

/// How a raw CSV cell is parsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ColumnKind {
    Date,
    Text,
    Float,
    Flag,
}

/// The datasets the dashboard reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DatasetKind {
    /// One row per station per day, with population weights.
    Stations,
    /// One row per day of precomputed population-weighted temperatures.
    WeightedDaily,
}

impl DatasetKind {
    pub fn default_file_name(&self) -> &'static str {
        match self {
            DatasetKind::Stations => "processed_temp_df.csv",
            DatasetKind::WeightedDaily => "weighted_temp_df.csv",
        }
    }

    /// Required columns in output order. Extra columns in the source are ignored.
    pub(crate) fn schema(&self) -> &'static [(&'static str, ColumnKind)] {
        match self {
            DatasetKind::Stations => &[
                (COL_LOCATION_DATE, ColumnKind::Date),
                (COL_CITY, ColumnKind::Text),
                (COL_STATION_CODE, ColumnKind::Text),
                (COL_TEMP_MIN, ColumnKind::Float),
                (COL_TEMP_MEAN, ColumnKind::Float),
                (COL_TEMP_MAX, ColumnKind::Float),
                (COL_FILLED, ColumnKind::Flag),
                (COL_LAT, ColumnKind::Float),
                (COL_LON, ColumnKind::Float),
                (COL_POPULATION, ColumnKind::Float),
                (COL_POPULATION_WEIGHT, ColumnKind::Float),
            ],
            DatasetKind::WeightedDaily => &[
                (COL_LOCATION_DATE, ColumnKind::Date),
                (COL_WEIGHTED_MEAN, ColumnKind::Float),
                (COL_WEIGHTED_MIN, ColumnKind::Float),
                (COL_WEIGHTED_MAX, ColumnKind::Float),
                (COL_FILLED, ColumnKind::Flag),
            ],
        }
    }

    /// The `(min, mean, max)` temperature columns.
    pub(crate) fn temperature_columns(&self) -> [&'static str; 3] {
        match self {
            DatasetKind::Stations => [COL_TEMP_MIN, COL_TEMP_MEAN, COL_TEMP_MAX],
            DatasetKind::WeightedDaily => [COL_WEIGHTED_MIN, COL_WEIGHTED_MEAN, COL_WEIGHTED_MAX],
        }
    }
}

impl fmt::Display for DatasetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DatasetKind::Stations => write!(f, "station"),
            DatasetKind::WeightedDaily => write!(f, "weighted daily"),
        }
    }
}
