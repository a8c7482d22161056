//! Locations of the two CSV files the dashboard reads.

use crate::types::dataset_kind::DatasetKind;
use bon::Builder;
use std::path::{Path, PathBuf};

/// Paths of the station and weighted daily CSV files.
///
/// Both default to their conventional file names in the working directory.
///
/// ```rust
/// # use citytemps::DataSources;
/// let sources = DataSources::builder()
///     .stations("data/processed_temp_df.csv")
///     .build();
/// assert_eq!(sources.weighted_daily().to_str(), Some("weighted_temp_df.csv"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Builder)]
pub struct DataSources {
    #[builder(into, default = PathBuf::from(DatasetKind::Stations.default_file_name()))]
    stations: PathBuf,
    #[builder(into, default = PathBuf::from(DatasetKind::WeightedDaily.default_file_name()))]
    weighted_daily: PathBuf,
}

impl DataSources {
    /// Both default file names resolved under `dir`.
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref();
        Self {
            stations: dir.join(DatasetKind::Stations.default_file_name()),
            weighted_daily: dir.join(DatasetKind::WeightedDaily.default_file_name()),
        }
    }

    pub fn stations(&self) -> &Path {
        &self.stations
    }

    pub fn weighted_daily(&self) -> &Path {
        &self.weighted_daily
    }

    pub fn path_for(&self, kind: DatasetKind) -> &Path {
        match kind {
            DatasetKind::Stations => &self.stations,
            DatasetKind::WeightedDaily => &self.weighted_daily,
        }
    }
}

impl Default for DataSources {
    fn default() -> Self {
        Self::builder().build()
    }
}
