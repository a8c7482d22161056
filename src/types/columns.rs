//! Column names shared by the CSV sources, the lazy frames and the extracted records.
//!
//! The source column names are part of the file format and must not change.

pub const COL_LOCATION_DATE: &str = "location_date";
pub const COL_FILLED: &str = "filled";

// Station file
pub const COL_CITY: &str = "name";
pub const COL_STATION_CODE: &str = "station_code";
pub const COL_TEMP_MIN: &str = "temp_min_c";
pub const COL_TEMP_MEAN: &str = "temp_mean_c";
pub const COL_TEMP_MAX: &str = "temp_max_c";
pub const COL_LAT: &str = "Lat";
pub const COL_LON: &str = "Lon";
pub const COL_POPULATION: &str = "population";
pub const COL_POPULATION_WEIGHT: &str = "population_weight";

// Weighted daily file
pub const COL_WEIGHTED_MEAN: &str = "weighted_mean_temp";
pub const COL_WEIGHTED_MIN: &str = "weighted_min_temp";
pub const COL_WEIGHTED_MAX: &str = "weighted_max_temp";

// Derived
pub const COL_YEAR: &str = "year";
pub const COL_MONTH: &str = "month";
pub const COL_SEASON_NAME: &str = "season_name";
pub const COL_CUMULATIVE_SEASON: &str = "cumulative_season";
