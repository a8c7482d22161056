//! `WeightedDailyLazyFrame`: the population-weighted daily series and its monthly and
//! seasonal views.

use crate::aggregation::{monthly_means, seasonal_means};
use crate::error::DashboardError;
use crate::filtering::TemperatureFrameFilterExt;
use crate::frames::date_span;
use crate::frames::extractor::{extract_monthly, extract_seasonal, extract_weighted_daily};
use crate::types::columns::COL_LOCATION_DATE;
use crate::types::season::SeasonCalendar;
use crate::types::selection::{DateRange, SeasonSelection};
use crate::types::temperature_data::weighted::{
    MonthlyAggregate, SeasonalAggregate, WeightedDailyRecord,
};
use crate::types::traits::any::any_date::AnyDate;
use crate::types::traits::period::date_period::DatePeriod;
use polars::prelude::{col, lit, Expr, LazyFrame};

/// A wrapper around a Polars `LazyFrame` with one row per day
/// (`location_date`, `weighted_mean_temp`, `weighted_min_temp`, `weighted_max_temp`, `filled`).
///
/// The frame can come straight from the weighted daily file or be derived from
/// station rows with [`StationLazyFrame::weighted_daily`](crate::StationLazyFrame::weighted_daily).
#[derive(Clone)]
pub struct WeightedDailyLazyFrame {
    pub frame: LazyFrame,
}

impl WeightedDailyLazyFrame {
    pub fn new(frame: LazyFrame) -> Self {
        Self { frame }
    }

    pub fn filter(&self, predicate: Expr) -> WeightedDailyLazyFrame {
        WeightedDailyLazyFrame::new(self.frame.clone().filter(predicate))
    }

    /// Keeps days from the first day of `start` through the last day of `end`.
    pub fn get_range(
        &self,
        start: impl AnyDate,
        end: impl AnyDate,
    ) -> Result<WeightedDailyLazyFrame, DashboardError> {
        let range = DateRange::from_bounds(start, end)?;
        Ok(self.within(&range))
    }

    pub fn get_at(&self, date: impl AnyDate) -> Result<WeightedDailyLazyFrame, DashboardError> {
        let day = date
            .get_date_range()
            .ok_or(DashboardError::DateParsingError)?
            .start;
        Ok(self.filter(col(COL_LOCATION_DATE).eq(lit(day))))
    }

    /// Keeps the days of a year, month or season bucket.
    pub fn get_for_period(
        &self,
        period: impl DatePeriod,
    ) -> Result<WeightedDailyLazyFrame, DashboardError> {
        let span = period
            .get_date_period()
            .ok_or(DashboardError::DateParsingError)?;
        self.get_range(span.start, span.end)
    }

    pub fn within(&self, range: &DateRange) -> WeightedDailyLazyFrame {
        WeightedDailyLazyFrame::new(self.frame.clone().filter_date_range(range))
    }

    pub fn date_span(&self) -> Result<Option<DateRange>, DashboardError> {
        date_span(self.frame.clone())
    }

    /// Adds `season_name` and `cumulative_season` columns.
    pub fn with_seasons(&self, calendar: &SeasonCalendar) -> WeightedDailyLazyFrame {
        WeightedDailyLazyFrame::new(
            self.frame
                .clone()
                .with_columns(calendar.season_columns(col(COL_LOCATION_DATE))),
        )
    }

    pub fn collect_daily(&self) -> Result<Vec<WeightedDailyRecord>, DashboardError> {
        let df = self.frame.clone().collect()?;
        extract_weighted_daily(&df)
    }

    /// Calendar-month means of the days whose season is selected.
    ///
    /// A month lies entirely inside one season, so filtering days before grouping
    /// drops exactly the months of unselected seasons.
    pub fn monthly(
        &self,
        calendar: &SeasonCalendar,
        seasons: &SeasonSelection,
    ) -> Result<Vec<MonthlyAggregate>, DashboardError> {
        let days = self.with_seasons(calendar).frame.filter_seasons(seasons);
        let df = monthly_means(days).collect()?;
        extract_monthly(&df)
    }

    /// Season bucket means, ordered by cumulative season index.
    pub fn seasonal(
        &self,
        calendar: &SeasonCalendar,
        seasons: &SeasonSelection,
    ) -> Result<Vec<SeasonalAggregate>, DashboardError> {
        let days = self.with_seasons(calendar).frame.filter_seasons(seasons);
        let df = seasonal_means(days).collect()?;
        extract_seasonal(&df)
    }
}
