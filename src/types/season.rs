//! Calendar seasons and the cumulative season index used to order seasonal buckets.
//!
//! Seasons follow the meteorological convention: December, January and February form
//! Winter, and so on in blocks of three months. December is counted as part of the
//! *following* season year, so a winter bucket always holds December of year `Y`
//! together with January and February of `Y + 1`, and sorts after the autumn of `Y`.

use crate::types::columns::{COL_CUMULATIVE_SEASON, COL_SEASON_NAME};
use chrono::{Datelike, NaiveDate};
use polars::prelude::{lit, when, DataType, Expr};
use serde::Serialize;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Number of buckets per season year.
const SEASONS_PER_YEAR: i32 = 4;

/// One of the four meteorological seasons.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum Season {
    /// December, January, February.
    Winter,
    /// March, April, May.
    Spring,
    /// June, July, August.
    Summer,
    /// September, October, November.
    Autumn,
}

impl Season {
    /// All seasons in season-year order.
    pub const ALL: [Season; 4] = [
        Season::Winter,
        Season::Spring,
        Season::Summer,
        Season::Autumn,
    ];

    /// Maps a calendar month (1-12) to its season.
    pub fn from_month(month: u32) -> Option<Season> {
        if !(1..=12).contains(&month) {
            return None;
        }
        Some(Self::of_calendar_month(month))
    }

    fn of_calendar_month(month: u32) -> Season {
        let folded = if month == 12 { 0 } else { month };
        Self::ALL[(folded / 3) as usize % Self::ALL.len()]
    }

    /// Position within the season year, Winter being 0.
    pub fn index(self) -> i32 {
        match self {
            Season::Winter => 0,
            Season::Spring => 1,
            Season::Summer => 2,
            Season::Autumn => 3,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Season::Winter => "Winter",
            Season::Spring => "Spring",
            Season::Summer => "Summer",
            Season::Autumn => "Autumn",
        }
    }

    /// The three calendar months of the season, in chronological order.
    pub fn months(self) -> [u32; 3] {
        match self {
            Season::Winter => [12, 1, 2],
            Season::Spring => [3, 4, 5],
            Season::Summer => [6, 7, 8],
            Season::Autumn => [9, 10, 11],
        }
    }
}

impl fmt::Display for Season {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown season '{0}'")]
pub struct ParseSeasonError(pub String);

impl FromStr for Season {
    type Err = ParseSeasonError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        Self::ALL
            .into_iter()
            .find(|season| season.name().eq_ignore_ascii_case(trimmed))
            .or_else(|| trimmed.eq_ignore_ascii_case("fall").then_some(Season::Autumn))
            .ok_or_else(|| ParseSeasonError(s.to_string()))
    }
}

/// The bucket a date falls into.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct SeasonBucket {
    pub season: Season,
    /// Calendar year the bucket is indexed under; December counts towards the next year.
    pub season_year: i32,
    /// Monotonically increasing bucket index, 0 for the winter of the calendar's first year.
    pub cumulative_season: i32,
}

/// Assigns dates to season buckets relative to a fixed first year.
///
/// The first year must come from the complete dataset, never from a filtered view,
/// otherwise bucket indices would shift with the active filters.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct SeasonCalendar {
    min_year: i32,
}

impl SeasonCalendar {
    pub fn new(min_year: i32) -> Self {
        Self { min_year }
    }

    /// Builds a calendar anchored at the earliest year among `dates`.
    pub fn from_dates(dates: impl IntoIterator<Item = NaiveDate>) -> Option<Self> {
        dates.into_iter().map(|d| d.year()).min().map(Self::new)
    }

    pub fn min_year(&self) -> i32 {
        self.min_year
    }

    pub fn season_of(&self, date: NaiveDate) -> SeasonBucket {
        let month = date.month();
        let season = Season::of_calendar_month(month);
        let years_since_min = date.year() - self.min_year;
        let (season_year, year_offset) = if month == 12 {
            (date.year() + 1, years_since_min + 1)
        } else {
            (date.year(), years_since_min)
        };
        SeasonBucket {
            season,
            season_year,
            cumulative_season: season.index() + year_offset * SEASONS_PER_YEAR,
        }
    }

    /// Polars expression computing the cumulative season index of a date column.
    pub fn cumulative_season_expr(&self, date: Expr) -> Expr {
        let month = date.clone().dt().month().cast(DataType::Int32);
        let years_since_min = date.dt().year().cast(DataType::Int32) - lit(self.min_year);
        let year_offset = when(month.clone().eq(lit(12i32)))
            .then(years_since_min.clone() + lit(1i32))
            .otherwise(years_since_min);
        (season_index_expr(month) + year_offset * lit(SEASONS_PER_YEAR)).cast(DataType::Int32)
    }

    /// Both season columns (`season_name`, `cumulative_season`) for a date column.
    pub fn season_columns(&self, date: Expr) -> [Expr; 2] {
        [
            season_name_expr(date.clone()).alias(COL_SEASON_NAME),
            self.cumulative_season_expr(date).alias(COL_CUMULATIVE_SEASON),
        ]
    }
}

fn season_index_expr(month: Expr) -> Expr {
    season_case(month, |season| lit(season.index()))
}

/// Polars expression mapping a date column to its season name.
pub fn season_name_expr(date: Expr) -> Expr {
    season_case(date.dt().month().cast(DataType::Int32), |season| {
        lit(season.name())
    })
}

fn season_case(month: Expr, value: impl Fn(Season) -> Expr) -> Expr {
    when(
        month
            .clone()
            .eq(lit(12i32))
            .or(month.clone().lt_eq(lit(2i32))),
    )
    .then(value(Season::Winter))
    .when(month.clone().lt_eq(lit(5i32)))
    .then(value(Season::Spring))
    .when(month.lt_eq(lit(8i32)))
    .then(value(Season::Summer))
    .otherwise(value(Season::Autumn))
}
