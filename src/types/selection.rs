//! Validated filter parameters.
//!
//! The two set-valued selections deliberately treat "nothing selected" differently:
//! an empty city selection is a user error ([`DashboardError::EmptySelection`]),
//! while an empty season selection means every season.

use crate::error::DashboardError;
use crate::types::season::Season;
use crate::types::traits::any::any_date::AnyDate;
use chrono::NaiveDate;

/// An inclusive `[from, to]` date range with `from <= to`.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct DateRange {
    from: NaiveDate,
    to: NaiveDate,
}

impl DateRange {
    /// # Errors
    ///
    /// Returns [`DashboardError::InvalidRange`] if `from` is after `to`.
    pub fn new(from: NaiveDate, to: NaiveDate) -> Result<Self, DashboardError> {
        if from > to {
            return Err(DashboardError::InvalidRange { from, to });
        }
        Ok(Self { from, to })
    }

    /// Resolves period-like bounds: `start` contributes its first day, `end` its last.
    pub fn from_bounds(start: impl AnyDate, end: impl AnyDate) -> Result<Self, DashboardError> {
        let from = start
            .get_date_range()
            .ok_or(DashboardError::DateParsingError)?
            .start;
        let to = end
            .get_date_range()
            .ok_or(DashboardError::DateParsingError)?
            .end;
        Self::new(from, to)
    }

    pub fn from(&self) -> NaiveDate {
        self.from
    }

    pub fn to(&self) -> NaiveDate {
        self.to
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.from <= date && date <= self.to
    }
}

/// A non-empty set of city names, in selection order without duplicates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CitySelection(Vec<String>);

impl CitySelection {
    /// # Errors
    ///
    /// Returns [`DashboardError::EmptySelection`] if no city is given.
    pub fn new<I, S>(cities: I) -> Result<Self, DashboardError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut selected: Vec<String> = Vec::new();
        for city in cities {
            let city = city.into();
            if !selected.contains(&city) {
                selected.push(city);
            }
        }
        if selected.is_empty() {
            return Err(DashboardError::EmptySelection);
        }
        Ok(Self(selected))
    }

    pub fn contains(&self, city: &str) -> bool {
        self.0.iter().any(|c| c == city)
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }
}

/// A set of seasons; empty input selects all four.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeasonSelection(Vec<Season>);

impl SeasonSelection {
    pub fn new(seasons: &[Season]) -> Self {
        if seasons.is_empty() {
            return Self::all();
        }
        let mut selected = seasons.to_vec();
        selected.sort();
        selected.dedup();
        Self(selected)
    }

    pub fn all() -> Self {
        Self(Season::ALL.to_vec())
    }

    pub fn is_all(&self) -> bool {
        self.0.len() == Season::ALL.len()
    }

    pub fn contains(&self, season: Season) -> bool {
        self.0.contains(&season)
    }

    pub fn seasons(&self) -> &[Season] {
        &self.0
    }
}

impl Default for SeasonSelection {
    fn default() -> Self {
        Self::all()
    }
}
