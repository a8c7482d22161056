//! The query surface consumed by the presentation layer.
//!
//! A [`TemperatureDashboard`] loads both datasets once and answers every query from the
//! in-memory copies. Queries take primitive filter parameters (cities, optional dates,
//! seasons, aggregate mode) and return plain record vectors.

use crate::config::DataSources;
use crate::datasets::error::DatasetError;
use crate::datasets::frame_cache::DatasetCache;
use crate::error::DashboardError;
use crate::frames::station_frame::StationLazyFrame;
use crate::frames::weighted_frame::WeightedDailyLazyFrame;
use crate::types::dataset_kind::DatasetKind;
use crate::types::season::{Season, SeasonCalendar};
use crate::types::selection::{CitySelection, DateRange, SeasonSelection};
use crate::types::temperature_data::station::{DailyTemperature, StationRecord};
use crate::types::temperature_data::weighted::{
    MonthlyAggregate, SeasonalAggregate, WeightedDailyRecord,
};
use bon::bon;
use chrono::{Datelike, NaiveDate};
use log::{debug, info};
use polars::prelude::IntoLazy;
use serde::Serialize;
use std::fmt;

/// Time resolution of a weighted series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Resolution {
    #[default]
    Daily,
    Monthly,
    Seasonal,
}

impl fmt::Display for Resolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Resolution::Daily => write!(f, "daily"),
            Resolution::Monthly => write!(f, "monthly"),
            Resolution::Seasonal => write!(f, "seasonal"),
        }
    }
}

/// Result of [`TemperatureDashboard::weighted_series`].
///
/// Serializes as `{"resolution": "...", "rows": [...]}`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "resolution", content = "rows", rename_all = "lowercase")]
pub enum WeightedView {
    Daily(Vec<WeightedDailyRecord>),
    Monthly(Vec<MonthlyAggregate>),
    Seasonal(Vec<SeasonalAggregate>),
}

impl WeightedView {
    pub fn resolution(&self) -> Resolution {
        match self {
            WeightedView::Daily(_) => Resolution::Daily,
            WeightedView::Monthly(_) => Resolution::Monthly,
            WeightedView::Seasonal(_) => Resolution::Seasonal,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            WeightedView::Daily(rows) => rows.len(),
            WeightedView::Monthly(rows) => rows.len(),
            WeightedView::Seasonal(rows) => rows.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn to_json(&self) -> Result<String, DashboardError> {
        Ok(serde_json::to_string(self)?)
    }
}

/// Loads the station and weighted daily datasets and answers filter/aggregate queries.
///
/// Both files are read when the dashboard is created; a missing or malformed file
/// is reported then, not on the first query.
///
/// # Examples
///
/// ```no_run
/// # use citytemps::{DataSources, TemperatureDashboard, Resolution, Season};
/// # fn main() -> Result<(), citytemps::DashboardError> {
/// let dashboard = TemperatureDashboard::with_sources(DataSources::in_dir("data"))?;
///
/// let lines = dashboard
///     .temperatures()
///     .cities(&["Portland", "New York"])
///     .call()?;
/// println!("{} daily points", lines.len());
///
/// let winters = dashboard
///     .weighted_series()
///     .resolution(Resolution::Seasonal)
///     .seasons(&[Season::Winter])
///     .call()?;
/// println!("{}", winters.to_json()?);
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct TemperatureDashboard {
    sources: DataSources,
    cache: DatasetCache,
    calendar: SeasonCalendar,
}

#[bon]
impl TemperatureDashboard {
    /// Creates a dashboard reading `processed_temp_df.csv` and `weighted_temp_df.csv`
    /// from the working directory.
    pub fn new() -> Result<Self, DashboardError> {
        Self::with_sources(DataSources::default())
    }

    /// Creates a dashboard for explicit file locations and loads both files.
    ///
    /// # Errors
    ///
    /// Returns [`DashboardError::Dataset`] if either file is missing, unreadable or malformed.
    pub fn with_sources(sources: DataSources) -> Result<Self, DashboardError> {
        let cache = DatasetCache::new();
        cache.get_or_load(DatasetKind::Stations, sources.stations())?;
        let weighted = cache.get_or_load(DatasetKind::WeightedDaily, sources.weighted_daily())?;

        // Bucket indices are anchored to the full dataset, never to a filtered view.
        let span = WeightedDailyLazyFrame::new(weighted.lazy())
            .date_span()?
            .ok_or_else(|| DatasetError::EmptyDataset(sources.weighted_daily().to_path_buf()))?;
        let calendar = SeasonCalendar::new(span.from().year());
        info!(
            "Weighted series spans {} to {}; season indices start at winter {}",
            span.from(),
            span.to(),
            calendar.min_year()
        );

        Ok(Self {
            sources,
            cache,
            calendar,
        })
    }

    pub fn sources(&self) -> &DataSources {
        &self.sources
    }

    pub fn calendar(&self) -> &SeasonCalendar {
        &self.calendar
    }

    /// The full station dataset.
    pub fn station_frame(&self) -> Result<StationLazyFrame, DashboardError> {
        let df = self
            .cache
            .get_or_load(DatasetKind::Stations, self.sources.stations())?;
        Ok(StationLazyFrame::new(df.lazy()))
    }

    /// The full precomputed weighted daily dataset.
    pub fn weighted_frame(&self) -> Result<WeightedDailyLazyFrame, DashboardError> {
        let df = self
            .cache
            .get_or_load(DatasetKind::WeightedDaily, self.sources.weighted_daily())?;
        Ok(WeightedDailyLazyFrame::new(df.lazy()))
    }

    /// City names in order of first appearance in the station file.
    pub fn cities(&self) -> Result<Vec<String>, DashboardError> {
        self.station_frame()?.cities()
    }

    /// First and last day of the station file.
    pub fn date_span(&self) -> Result<Option<DateRange>, DashboardError> {
        self.station_frame()?.date_span()
    }

    /// Daily temperatures of the selected cities, one line per city or a single
    /// averaged line when `average_cities` is set.
    ///
    /// Missing `from`/`to` default to the first/last day of the station file.
    ///
    /// # Errors
    ///
    /// [`DashboardError::EmptySelection`] if `cities` is empty and
    /// [`DashboardError::InvalidRange`] if `from > to`. Both are checked before any
    /// data is touched.
    #[builder]
    pub fn temperatures(
        &self,
        cities: &[&str],
        from: Option<NaiveDate>,
        to: Option<NaiveDate>,
        #[builder(default)] average_cities: bool,
    ) -> Result<Vec<DailyTemperature>, DashboardError> {
        let Some(selected) = self.select_stations(cities, from, to)? else {
            return Ok(Vec::new());
        };
        if average_cities {
            selected.average_cities()
        } else {
            selected.daily_by_city()
        }
    }

    /// Interpolated station rows of the selected cities and range, sorted by date.
    #[builder]
    pub fn missing_recordings(
        &self,
        cities: &[&str],
        from: Option<NaiveDate>,
        to: Option<NaiveDate>,
    ) -> Result<Vec<StationRecord>, DashboardError> {
        match self.select_stations(cities, from, to)? {
            Some(selected) => selected.missing_recordings(),
            None => Ok(Vec::new()),
        }
    }

    /// The population-weighted series at the requested resolution.
    ///
    /// Without `cities` the precomputed weighted daily file is used. With `cities`
    /// the daily series is derived from the station rows of those cities.
    /// `seasons` applies to the monthly and seasonal resolutions; an empty or
    /// missing list means every season.
    #[builder]
    pub fn weighted_series(
        &self,
        from: Option<NaiveDate>,
        to: Option<NaiveDate>,
        #[builder(default)] resolution: Resolution,
        seasons: Option<&[Season]>,
        cities: Option<&[&str]>,
    ) -> Result<WeightedView, DashboardError> {
        let daily = match cities {
            Some(cities) => {
                let cities = CitySelection::new(cities.iter().copied())?;
                self.station_frame()?.for_cities(&cities).weighted_daily()
            }
            None => self.weighted_frame()?,
        };
        let seasons = SeasonSelection::new(seasons.unwrap_or_default());
        debug!(
            "Weighted {} series from {:?} to {:?} for {:?}",
            resolution,
            from,
            to,
            seasons.seasons()
        );

        let span = daily.date_span()?;
        let daily = match resolve_range(from, to, span)? {
            Some(range) => daily.within(&range),
            None => daily,
        };

        Ok(match resolution {
            Resolution::Daily => WeightedView::Daily(daily.collect_daily()?),
            Resolution::Monthly => WeightedView::Monthly(daily.monthly(&self.calendar, &seasons)?),
            Resolution::Seasonal => {
                WeightedView::Seasonal(daily.seasonal(&self.calendar, &seasons)?)
            }
        })
    }

    /// Validates the selection and narrows the station rows to it.
    /// `None` means the station file has no rows to default the range from.
    fn select_stations(
        &self,
        cities: &[&str],
        from: Option<NaiveDate>,
        to: Option<NaiveDate>,
    ) -> Result<Option<StationLazyFrame>, DashboardError> {
        let cities = CitySelection::new(cities.iter().copied())?;
        if let (Some(from), Some(to)) = (from, to) {
            DateRange::new(from, to)?;
        }
        debug!("Station query for {:?} from {:?} to {:?}", cities.as_slice(), from, to);

        let stations = self.station_frame()?;
        let Some(range) = resolve_range(from, to, stations.date_span()?)? else {
            return Ok(None);
        };
        Ok(Some(stations.for_cities(&cities).within(&range)))
    }
}

/// Fills missing bounds from `span`.
fn resolve_range(
    from: Option<NaiveDate>,
    to: Option<NaiveDate>,
    span: Option<DateRange>,
) -> Result<Option<DateRange>, DashboardError> {
    let from = from.or_else(|| span.map(|s| s.from()));
    let to = to.or_else(|| span.map(|s| s.to()));
    match (from, to) {
        (Some(from), Some(to)) => Ok(Some(DateRange::new(from, to)?)),
        _ => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::fixture_sources;
    use tempfile::TempDir;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn dashboard() -> Result<(TempDir, TemperatureDashboard), Box<dyn std::error::Error>> {
        let dir = TempDir::new()?;
        let sources = fixture_sources(&dir)?;
        let dashboard = TemperatureDashboard::with_sources(sources)?;
        Ok((dir, dashboard))
    }

    #[test]
    fn test_calendar_from_full_weighted_dataset() -> Result<(), Box<dyn std::error::Error>> {
        let (_dir, dashboard) = dashboard()?;
        assert_eq!(dashboard.calendar().min_year(), 2015);
        Ok(())
    }

    #[test]
    fn test_cities_and_span() -> Result<(), Box<dyn std::error::Error>> {
        let (_dir, dashboard) = dashboard()?;
        assert_eq!(dashboard.cities()?, vec!["Portland", "New York"]);
        let span = dashboard.date_span()?.unwrap();
        assert_eq!((span.from(), span.to()), (date(2015, 1, 15), date(2016, 1, 15)));
        Ok(())
    }

    #[test]
    fn test_empty_selection_is_recoverable() -> Result<(), Box<dyn std::error::Error>> {
        let (_dir, dashboard) = dashboard()?;
        let err = dashboard.temperatures().cities(&[]).call().unwrap_err();
        assert!(matches!(err, DashboardError::EmptySelection));
        assert!(err.is_recoverable());

        // The failed query leaves the dashboard usable.
        let rows = dashboard.temperatures().cities(&["Portland"]).call()?;
        assert_eq!(rows.len(), 4);
        Ok(())
    }

    #[test]
    fn test_reversed_range_is_recoverable() -> Result<(), Box<dyn std::error::Error>> {
        let (_dir, dashboard) = dashboard()?;
        let err = dashboard
            .temperatures()
            .cities(&["Portland"])
            .from(date(2020, 6, 1))
            .to(date(2020, 1, 1))
            .call()
            .unwrap_err();
        assert!(matches!(err, DashboardError::InvalidRange { .. }));
        assert!(err.is_recoverable());
        Ok(())
    }

    #[test]
    fn test_temperatures_per_city_and_averaged() -> Result<(), Box<dyn std::error::Error>> {
        let (_dir, dashboard) = dashboard()?;

        let per_city = dashboard
            .temperatures()
            .cities(&["Portland", "New York"])
            .call()?;
        assert_eq!(per_city.len(), 8);
        assert!(per_city.iter().all(|row| row.city.is_some()));

        let averaged = dashboard
            .temperatures()
            .cities(&["Portland", "New York"])
            .from(date(2015, 6, 1))
            .average_cities(true)
            .call()?;
        assert_eq!(averaged.len(), 3);
        assert!(averaged.iter().all(|row| row.city.is_none()));
        assert_eq!(averaged[0].location_date, date(2015, 6, 15));
        Ok(())
    }

    #[test]
    fn test_missing_recordings() -> Result<(), Box<dyn std::error::Error>> {
        let (_dir, dashboard) = dashboard()?;
        let rows = dashboard
            .missing_recordings()
            .cities(&["New York"])
            .call()?;
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].station_code, "NYC1");
        assert_eq!(rows[0].location_date, date(2015, 12, 15));
        Ok(())
    }

    #[test]
    fn test_seasonal_series_with_winter_filter() -> Result<(), Box<dyn std::error::Error>> {
        let (_dir, dashboard) = dashboard()?;
        let view = dashboard
            .weighted_series()
            .resolution(Resolution::Seasonal)
            .seasons(&[Season::Winter])
            .call()?;
        match view {
            WeightedView::Seasonal(rows) => {
                let indices: Vec<i32> = rows.iter().map(|r| r.cumulative_season).collect();
                assert_eq!(indices, vec![0, 4]);
            }
            other => panic!("unexpected view: {other:?}"),
        }
        Ok(())
    }

    #[test]
    fn test_filtered_seasonal_series_keeps_indices() -> Result<(), Box<dyn std::error::Error>> {
        let (_dir, dashboard) = dashboard()?;
        let view = dashboard
            .weighted_series()
            .from(date(2015, 12, 1))
            .resolution(Resolution::Seasonal)
            .call()?;
        let WeightedView::Seasonal(rows) = view else {
            panic!("expected a seasonal view");
        };
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].cumulative_season, 4);
        assert_eq!(rows[0].season_name_yr, "Winter 2015");
        Ok(())
    }

    #[test]
    fn test_monthly_series_default_range() -> Result<(), Box<dyn std::error::Error>> {
        let (_dir, dashboard) = dashboard()?;
        let view = dashboard
            .weighted_series()
            .resolution(Resolution::Monthly)
            .call()?;
        assert_eq!(view.resolution(), Resolution::Monthly);
        assert_eq!(view.len(), 8);
        Ok(())
    }

    #[test]
    fn test_series_derived_from_stations() -> Result<(), Box<dyn std::error::Error>> {
        let (_dir, dashboard) = dashboard()?;
        let view = dashboard
            .weighted_series()
            .cities(&["Portland", "New York"])
            .call()?;
        let WeightedView::Daily(days) = view else {
            panic!("expected a daily view");
        };
        assert_eq!(days.len(), 4);
        assert!((days[0].weighted_mean_temp - 2.2).abs() < 1e-9);

        let err = dashboard.weighted_series().cities(&[]).call().unwrap_err();
        assert!(matches!(err, DashboardError::EmptySelection));
        Ok(())
    }

    #[test]
    fn test_view_json() -> Result<(), Box<dyn std::error::Error>> {
        let (_dir, dashboard) = dashboard()?;
        let json = dashboard
            .weighted_series()
            .resolution(Resolution::Seasonal)
            .call()?
            .to_json()?;
        let value: serde_json::Value = serde_json::from_str(&json)?;
        assert_eq!(value["resolution"], "seasonal");
        assert_eq!(value["rows"][0]["season_name"], "Winter");
        assert_eq!(value["rows"][0]["season_name_yr"], "Winter 2015");
        assert_eq!(value["rows"].as_array().map(Vec::len), Some(5));
        Ok(())
    }

    #[test]
    fn test_queries_do_not_reread_files() -> Result<(), Box<dyn std::error::Error>> {
        let (dir, dashboard) = dashboard()?;
        std::fs::remove_file(dir.path().join("processed_temp_df.csv"))?;
        std::fs::remove_file(dir.path().join("weighted_temp_df.csv"))?;

        assert_eq!(dashboard.cities()?.len(), 2);
        assert_eq!(
            dashboard
                .weighted_series()
                .resolution(Resolution::Seasonal)
                .call()?
                .len(),
            5
        );
        Ok(())
    }

    #[test]
    fn test_missing_file_is_fatal() {
        let dir = TempDir::new().unwrap();
        let err = TemperatureDashboard::with_sources(DataSources::in_dir(dir.path())).unwrap_err();
        assert!(matches!(
            err,
            DashboardError::Dataset(DatasetError::DataUnavailable(..))
        ));
        assert!(!err.is_recoverable());
    }
}
