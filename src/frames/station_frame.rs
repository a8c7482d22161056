//! `StationLazyFrame`: lazy operations on per-station daily recordings.

use crate::aggregation::{city_daily_means, cross_city_daily_means, weighted_daily};
use crate::error::DashboardError;
use crate::filtering::TemperatureFrameFilterExt;
use crate::frames::date_span;
use crate::frames::extractor::{extract_daily_temperatures, extract_station_records};
use crate::frames::weighted_frame::WeightedDailyLazyFrame;
use crate::types::columns::{COL_CITY, COL_FILLED, COL_LOCATION_DATE};
use crate::types::selection::{CitySelection, DateRange};
use crate::types::temperature_data::station::{DailyTemperature, StationRecord};
use crate::types::traits::any::any_date::AnyDate;
use crate::types::traits::period::date_period::DatePeriod;
use polars::prelude::{col, lit, Expr, LazyFrame, SortMultipleOptions};

/// A wrapper around a Polars `LazyFrame` holding station rows
/// (`location_date`, `name`, `station_code`, temperatures, `filled`, coordinates, weights).
///
/// All methods returning a new `StationLazyFrame` only extend the query plan; the
/// `collect_*`, `daily_by_city`, `average_cities` and `missing_recordings` methods run it.
#[derive(Clone)]
pub struct StationLazyFrame {
    /// The underlying Polars LazyFrame containing the station data.
    pub frame: LazyFrame,
}

impl StationLazyFrame {
    pub fn new(frame: LazyFrame) -> Self {
        Self { frame }
    }

    /// Applies an arbitrary Polars predicate.
    pub fn filter(&self, predicate: Expr) -> StationLazyFrame {
        StationLazyFrame::new(self.frame.clone().filter(predicate))
    }

    /// Keeps rows from the first day of `start` through the last day of `end`.
    ///
    /// # Errors
    ///
    /// Returns [`DashboardError::DateParsingError`] if a bound cannot be resolved and
    /// [`DashboardError::InvalidRange`] if the bounds are reversed.
    pub fn get_range(
        &self,
        start: impl AnyDate,
        end: impl AnyDate,
    ) -> Result<StationLazyFrame, DashboardError> {
        let range = DateRange::from_bounds(start, end)?;
        Ok(self.within(&range))
    }

    /// Keeps rows of a single day (the first day, if `date` spans several).
    pub fn get_at(&self, date: impl AnyDate) -> Result<StationLazyFrame, DashboardError> {
        let day = date
            .get_date_range()
            .ok_or(DashboardError::DateParsingError)?
            .start;
        Ok(self.filter(col(COL_LOCATION_DATE).eq(lit(day))))
    }

    pub fn get_for_period(
        &self,
        period: impl DatePeriod,
    ) -> Result<StationLazyFrame, DashboardError> {
        let span = period
            .get_date_period()
            .ok_or(DashboardError::DateParsingError)?;
        self.get_range(span.start, span.end)
    }

    pub fn within(&self, range: &DateRange) -> StationLazyFrame {
        StationLazyFrame::new(self.frame.clone().filter_date_range(range))
    }

    pub fn for_cities(&self, cities: &CitySelection) -> StationLazyFrame {
        StationLazyFrame::new(self.frame.clone().filter_cities(cities.as_slice()))
    }

    /// Distinct city names in order of first appearance.
    pub fn cities(&self) -> Result<Vec<String>, DashboardError> {
        let df = self
            .frame
            .clone()
            .select([col(COL_CITY).unique_stable()])
            .collect()?;
        let cities = df
            .column(COL_CITY)
            .map_err(|e| DashboardError::ColumnNotFound(COL_CITY.to_string(), e))?
            .str()?
            .into_iter()
            .flatten()
            .map(str::to_string)
            .collect();
        Ok(cities)
    }

    /// First and last `location_date`, or `None` if there are no rows.
    pub fn date_span(&self) -> Result<Option<DateRange>, DashboardError> {
        date_span(self.frame.clone())
    }

    /// Mean min/mean/max per city and day, for one line and band per city.
    pub fn daily_by_city(&self) -> Result<Vec<DailyTemperature>, DashboardError> {
        let df = city_daily_means(self.frame.clone()).collect()?;
        extract_daily_temperatures(&df)
    }

    /// Unweighted mean over all rows per day, for a single line and band.
    pub fn average_cities(&self) -> Result<Vec<DailyTemperature>, DashboardError> {
        let df = cross_city_daily_means(self.frame.clone()).collect()?;
        extract_daily_temperatures(&df)
    }

    /// Interpolated rows, sorted by date.
    pub fn missing_recordings(&self) -> Result<Vec<StationRecord>, DashboardError> {
        let df = self
            .frame
            .clone()
            .filter(col(COL_FILLED))
            .sort(
                [COL_LOCATION_DATE],
                SortMultipleOptions::default().with_maintain_order(true),
            )
            .collect()?;
        extract_station_records(&df)
    }

    /// Reduces the rows to one population-weighted row per day.
    pub fn weighted_daily(&self) -> WeightedDailyLazyFrame {
        WeightedDailyLazyFrame::new(weighted_daily(self.frame.clone()))
    }

    pub fn collect_records(&self) -> Result<Vec<StationRecord>, DashboardError> {
        let df = self.frame.clone().collect()?;
        extract_station_records(&df)
    }
}
