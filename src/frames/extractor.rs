//! Conversion of collected frames into typed records.

use crate::error::DashboardError;
use crate::types::columns::*;
use crate::types::season::Season;
use crate::types::temperature_data::station::{DailyTemperature, StationRecord};
use crate::types::temperature_data::weighted::{
    MonthlyAggregate, SeasonalAggregate, WeightedDailyRecord,
};
use crate::types::traits::types::Month;
use crate::types::traits::utils::days_to_date;
use chrono::NaiveDate;
use polars::prelude::*;

/// Retrieves a column by name from a DataFrame.
fn get_column<'a>(df: &'a DataFrame, name: &str) -> Result<&'a Column, DashboardError> {
    df.column(name)
        .map_err(|e| DashboardError::ColumnNotFound(name.to_string(), e))
}

fn non_null<T>(
    name: &str,
    values: impl Iterator<Item = Option<T>>,
) -> Result<Vec<T>, DashboardError> {
    values
        .map(|value| value.ok_or_else(|| DashboardError::UnexpectedNull(name.to_string())))
        .collect()
}

fn float_values(df: &DataFrame, name: &str) -> Result<Vec<f64>, DashboardError> {
    non_null(name, get_column(df, name)?.f64()?.into_iter())
}

fn int_values(df: &DataFrame, name: &str) -> Result<Vec<i32>, DashboardError> {
    non_null(name, get_column(df, name)?.i32()?.into_iter())
}

fn flag_values(df: &DataFrame, name: &str) -> Result<Vec<bool>, DashboardError> {
    non_null(name, get_column(df, name)?.bool()?.into_iter())
}

fn text_values(df: &DataFrame, name: &str) -> Result<Vec<String>, DashboardError> {
    non_null(
        name,
        get_column(df, name)?
            .str()?
            .into_iter()
            .map(|value| value.map(str::to_string)),
    )
}

fn date_values(df: &DataFrame, name: &str) -> Result<Vec<NaiveDate>, DashboardError> {
    non_null(
        name,
        get_column(df, name)?
            .date()?
            .into_iter()
            .map(|days| days.and_then(days_to_date)),
    )
}

pub(crate) fn extract_station_records(df: &DataFrame) -> Result<Vec<StationRecord>, DashboardError> {
    let dates = date_values(df, COL_LOCATION_DATE)?;
    let cities = text_values(df, COL_CITY)?;
    let codes = text_values(df, COL_STATION_CODE)?;
    let mins = float_values(df, COL_TEMP_MIN)?;
    let means = float_values(df, COL_TEMP_MEAN)?;
    let maxes = float_values(df, COL_TEMP_MAX)?;
    let filled = flag_values(df, COL_FILLED)?;
    let lats = float_values(df, COL_LAT)?;
    let lons = float_values(df, COL_LON)?;
    let populations = float_values(df, COL_POPULATION)?;
    let weights = float_values(df, COL_POPULATION_WEIGHT)?;

    Ok((0..df.height())
        .map(|i| StationRecord {
            location_date: dates[i],
            city_name: cities[i].clone(),
            station_code: codes[i].clone(),
            temp_min_c: mins[i],
            temp_mean_c: means[i],
            temp_max_c: maxes[i],
            filled: filled[i],
            lat: lats[i],
            lon: lons[i],
            population: populations[i],
            population_weight: weights[i],
        })
        .collect())
}

/// Rows of a per-city or cross-city daily frame. The city column is read only if present.
pub(crate) fn extract_daily_temperatures(
    df: &DataFrame,
) -> Result<Vec<DailyTemperature>, DashboardError> {
    let cities: Vec<Option<String>> = match df.get_column_index(COL_CITY) {
        Some(_) => text_values(df, COL_CITY)?.into_iter().map(Some).collect(),
        None => vec![None; df.height()],
    };
    let dates = date_values(df, COL_LOCATION_DATE)?;
    let mins = float_values(df, COL_TEMP_MIN)?;
    let means = float_values(df, COL_TEMP_MEAN)?;
    let maxes = float_values(df, COL_TEMP_MAX)?;
    let filled = flag_values(df, COL_FILLED)?;

    Ok(cities
        .into_iter()
        .enumerate()
        .map(|(i, city)| DailyTemperature {
            city,
            location_date: dates[i],
            temp_min_c: mins[i],
            temp_mean_c: means[i],
            temp_max_c: maxes[i],
            filled: filled[i],
        })
        .collect())
}

pub(crate) fn extract_weighted_daily(
    df: &DataFrame,
) -> Result<Vec<WeightedDailyRecord>, DashboardError> {
    let dates = date_values(df, COL_LOCATION_DATE)?;
    let means = float_values(df, COL_WEIGHTED_MEAN)?;
    let mins = float_values(df, COL_WEIGHTED_MIN)?;
    let maxes = float_values(df, COL_WEIGHTED_MAX)?;
    let filled = flag_values(df, COL_FILLED)?;

    Ok((0..df.height())
        .map(|i| WeightedDailyRecord {
            location_date: dates[i],
            weighted_mean_temp: means[i],
            weighted_min_temp: mins[i],
            weighted_max_temp: maxes[i],
            filled: filled[i],
        })
        .collect())
}

pub(crate) fn extract_monthly(df: &DataFrame) -> Result<Vec<MonthlyAggregate>, DashboardError> {
    let years = int_values(df, COL_YEAR)?;
    let months = int_values(df, COL_MONTH)?;
    let means = float_values(df, COL_WEIGHTED_MEAN)?;
    let mins = float_values(df, COL_WEIGHTED_MIN)?;
    let maxes = float_values(df, COL_WEIGHTED_MAX)?;
    let filled = flag_values(df, COL_FILLED)?;

    Ok((0..df.height())
        .map(|i| {
            let month = Month::new(months[i].unsigned_abs(), years[i]);
            MonthlyAggregate {
                year: month.year(),
                month: month.month(),
                weighted_mean_temp: means[i],
                weighted_min_temp: mins[i],
                weighted_max_temp: maxes[i],
                filled: filled[i],
                date_string: month.label(),
            }
        })
        .collect())
}

pub(crate) fn extract_seasonal(df: &DataFrame) -> Result<Vec<SeasonalAggregate>, DashboardError> {
    let buckets = int_values(df, COL_CUMULATIVE_SEASON)?;
    let seasons = text_values(df, COL_SEASON_NAME)?
        .iter()
        .map(|name| name.parse::<Season>())
        .collect::<Result<Vec<_>, _>>()?;
    let years = int_values(df, COL_YEAR)?;
    let means = float_values(df, COL_WEIGHTED_MEAN)?;
    let mins = float_values(df, COL_WEIGHTED_MIN)?;
    let maxes = float_values(df, COL_WEIGHTED_MAX)?;
    let filled = flag_values(df, COL_FILLED)?;

    Ok((0..df.height())
        .map(|i| SeasonalAggregate {
            cumulative_season: buckets[i],
            season: seasons[i],
            year: years[i],
            weighted_mean_temp: means[i],
            weighted_min_temp: mins[i],
            weighted_max_temp: maxes[i],
            filled: filled[i],
            season_name_yr: format!("{} {}", seasons[i], years[i]),
        })
        .collect())
}
