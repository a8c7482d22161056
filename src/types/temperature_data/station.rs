use chrono::NaiveDate;
use serde::Serialize;

/// One station's recording for one day.
#[derive(Debug, PartialEq, Clone, Serialize)]
pub struct StationRecord {
    pub location_date: NaiveDate,
    #[serde(rename = "name")]
    pub city_name: String,
    pub station_code: String,
    pub temp_min_c: f64,
    pub temp_mean_c: f64,
    pub temp_max_c: f64,
    /// True if the value was interpolated rather than observed.
    pub filled: bool,
    #[serde(rename = "Lat")]
    pub lat: f64,
    #[serde(rename = "Lon")]
    pub lon: f64,
    /// Population of the city.
    pub population: f64,
    /// Normalized weight of the station within its aggregation group.
    pub population_weight: f64,
}

impl StationRecord {
    /// Whether `temp_min_c <= temp_mean_c <= temp_max_c` holds.
    pub fn has_ordered_temperatures(&self) -> bool {
        self.temp_min_c <= self.temp_mean_c && self.temp_mean_c <= self.temp_max_c
    }
}

/// A daily line/band point: one city's daily means, or the average over all selected cities.
#[derive(Debug, PartialEq, Clone, Serialize)]
pub struct DailyTemperature {
    /// `None` when the row averages every selected city.
    #[serde(rename = "name", skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    pub location_date: NaiveDate,
    pub temp_min_c: f64,
    pub temp_mean_c: f64,
    pub temp_max_c: f64,
    /// True if any contributing recording was interpolated.
    pub filled: bool,
}
