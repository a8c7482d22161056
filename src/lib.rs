mod aggregation;
mod config;
mod dashboard;
mod datasets;
mod error;
mod filtering;
mod frames;
mod types;

#[cfg(test)]
mod test_utils;

pub use config::DataSources;
pub use dashboard::*;
pub use error::DashboardError;

pub use aggregation::{weighted_value, weighted_value_expr};
pub use datasets::data_loader::DatasetLoader;
pub use datasets::error::DatasetError;
pub use datasets::frame_cache::DatasetCache;
pub use filtering::{filter_stations, TemperatureFrameFilterExt};

pub use frames::station_frame::StationLazyFrame;
pub use frames::weighted_frame::WeightedDailyLazyFrame;

pub use types::columns;
pub use types::dataset_kind::DatasetKind;
pub use types::season::{season_name_expr, ParseSeasonError, Season, SeasonBucket, SeasonCalendar};
pub use types::selection::{CitySelection, DateRange, SeasonSelection};
pub use types::temperature_data::station::{DailyTemperature, StationRecord};
pub use types::temperature_data::weighted::{
    MonthlyAggregate, SeasonalAggregate, WeightedDailyRecord,
};

pub use types::traits::any::any_date::AnyDate;
pub use types::traits::period::date_period::DatePeriod;
pub use types::traits::types::{Month, StartEndDate, Year};
