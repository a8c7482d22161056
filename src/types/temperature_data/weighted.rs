use crate::types::season::Season;
use crate::types::traits::types::Month;
use chrono::NaiveDate;
use serde::Serialize;

/// One day of population-weighted temperatures.
#[derive(Debug, PartialEq, Clone, Serialize)]
pub struct WeightedDailyRecord {
    pub location_date: NaiveDate,
    pub weighted_mean_temp: f64,
    pub weighted_min_temp: f64,
    pub weighted_max_temp: f64,
    /// True if any contributing station value for the day was interpolated.
    pub filled: bool,
}

/// Mean of the weighted daily values over one calendar month.
#[derive(Debug, PartialEq, Clone, Serialize)]
pub struct MonthlyAggregate {
    pub year: i32,
    pub month: u32,
    pub weighted_mean_temp: f64,
    pub weighted_min_temp: f64,
    pub weighted_max_temp: f64,
    pub filled: bool,
    /// Display label, e.g. "January 2020".
    pub date_string: String,
}

impl MonthlyAggregate {
    pub fn as_month(&self) -> Month {
        Month::new(self.month, self.year)
    }
}

/// Mean of the weighted daily values over one season bucket.
#[derive(Debug, PartialEq, Clone, Serialize)]
pub struct SeasonalAggregate {
    pub cumulative_season: i32,
    #[serde(rename = "season_name")]
    pub season: Season,
    /// Calendar year of the first day in the bucket.
    pub year: i32,
    pub weighted_mean_temp: f64,
    pub weighted_min_temp: f64,
    pub weighted_max_temp: f64,
    pub filled: bool,
    /// Display label, e.g. "Winter 2020".
    pub season_name_yr: String,
}
