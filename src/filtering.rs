use crate::error::DashboardError;
use crate::types::columns::{COL_CITY, COL_LOCATION_DATE, COL_SEASON_NAME};
use crate::types::selection::{CitySelection, DateRange, SeasonSelection};
use chrono::NaiveDate;
use polars::prelude::{col, lit, Expr, LazyFrame};

pub trait TemperatureFrameFilterExt {
    /// Keeps rows whose `location_date` lies in the range (inclusive on both ends).
    fn filter_date_range(self, range: &DateRange) -> LazyFrame;

    /// Keeps rows whose city is one of `cities`.
    ///
    /// An empty slice applies no city constraint. Callers taking user input should
    /// go through [`CitySelection`], which rejects an empty selection instead.
    fn filter_cities(self, cities: &[String]) -> LazyFrame;

    /// Keeps rows whose `season_name` column is one of the selected seasons.
    /// Requires the season columns added by
    /// [`SeasonCalendar::season_columns`](crate::SeasonCalendar::season_columns).
    fn filter_seasons(self, seasons: &SeasonSelection) -> LazyFrame;
}

impl TemperatureFrameFilterExt for LazyFrame {
    fn filter_date_range(self, range: &DateRange) -> LazyFrame {
        self.filter(
            col(COL_LOCATION_DATE)
                .gt_eq(lit(range.from()))
                .and(col(COL_LOCATION_DATE).lt_eq(lit(range.to()))),
        )
    }

    fn filter_cities(self, cities: &[String]) -> LazyFrame {
        match any_of(col(COL_CITY), cities.iter().map(String::as_str)) {
            Some(predicate) => self.filter(predicate),
            None => self,
        }
    }

    fn filter_seasons(self, seasons: &SeasonSelection) -> LazyFrame {
        if seasons.is_all() {
            return self;
        }
        match any_of(
            col(COL_SEASON_NAME),
            seasons.seasons().iter().map(|season| season.name()),
        ) {
            Some(predicate) => self.filter(predicate),
            None => self,
        }
    }
}

/// `column == v1 OR column == v2 ...`, or `None` for no values.
fn any_of<'a>(column: Expr, values: impl Iterator<Item = &'a str>) -> Option<Expr> {
    values
        .map(|value| column.clone().eq(lit(value)))
        .reduce(|acc, predicate| acc.or(predicate))
}

/// Restricts station rows to the given cities and inclusive date range.
///
/// Validation happens before any filtering: an empty city list yields
/// [`DashboardError::EmptySelection`], `from > to` yields [`DashboardError::InvalidRange`].
/// Applying the same filter twice returns the same rows.
pub fn filter_stations(
    frame: LazyFrame,
    cities: &[&str],
    from: NaiveDate,
    to: NaiveDate,
) -> Result<LazyFrame, DashboardError> {
    let cities = CitySelection::new(cities.iter().copied())?;
    let range = DateRange::new(from, to)?;
    Ok(frame
        .filter_cities(cities.as_slice())
        .filter_date_range(&range))
}
