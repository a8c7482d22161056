//! Population-weighted reductions over station and weighted daily frames.
//!
//! Every function here builds a lazy plan; nothing is evaluated until `collect`.

use crate::error::DashboardError;
use crate::types::columns::*;
use polars::prelude::*;

/// Group key for the per-day reduction. Kept distinct from `location_date` so the
/// date column is still available inside the aggregation.
const DAY_KEY: &str = "__day";

/// `sum(population_weight * column) / distinct_date_count`, as an aggregation expression.
pub fn weighted_value_expr(column: &str) -> Expr {
    (col(COL_POPULATION_WEIGHT) * col(column)).sum()
        / col(COL_LOCATION_DATE).n_unique().cast(DataType::Float64)
}

/// Evaluates [`weighted_value_expr`] over all rows of `frame`.
///
/// Returns `None` for an empty frame. The result does not depend on row order.
pub fn weighted_value(frame: LazyFrame, column: &str) -> Result<Option<f64>, DashboardError> {
    let df = frame
        .select([weighted_value_expr(column).alias(column)])
        .collect()?;
    let value = df
        .column(column)
        .map_err(|e| DashboardError::ColumnNotFound(column.to_string(), e))?
        .f64()?
        .get(0);
    Ok(value.filter(|v| !v.is_nan()))
}

/// Reduces station rows to one population-weighted row per day.
pub(crate) fn weighted_daily(stations: LazyFrame) -> LazyFrame {
    stations
        .group_by_stable([col(COL_LOCATION_DATE).alias(DAY_KEY)])
        .agg([
            weighted_value_expr(COL_TEMP_MEAN).alias(COL_WEIGHTED_MEAN),
            weighted_value_expr(COL_TEMP_MIN).alias(COL_WEIGHTED_MIN),
            weighted_value_expr(COL_TEMP_MAX).alias(COL_WEIGHTED_MAX),
            col(COL_FILLED).any(true),
        ])
        .select([
            col(DAY_KEY).alias(COL_LOCATION_DATE),
            col(COL_WEIGHTED_MEAN),
            col(COL_WEIGHTED_MIN),
            col(COL_WEIGHTED_MAX),
            col(COL_FILLED),
        ])
        .sort([COL_LOCATION_DATE], SortMultipleOptions::default())
}

fn weighted_means() -> [Expr; 4] {
    [
        col(COL_WEIGHTED_MEAN).mean(),
        col(COL_WEIGHTED_MIN).mean(),
        col(COL_WEIGHTED_MAX).mean(),
        col(COL_FILLED).any(true),
    ]
}

/// One row per calendar month present in `daily`, ordered chronologically.
/// Months without rows produce nothing.
pub(crate) fn monthly_means(daily: LazyFrame) -> LazyFrame {
    daily
        .with_columns([
            col(COL_LOCATION_DATE)
                .dt()
                .year()
                .cast(DataType::Int32)
                .alias(COL_YEAR),
            col(COL_LOCATION_DATE)
                .dt()
                .month()
                .cast(DataType::Int32)
                .alias(COL_MONTH),
        ])
        .group_by_stable([col(COL_YEAR), col(COL_MONTH)])
        .agg(weighted_means())
        .sort_by_exprs(
            [col(COL_YEAR), col(COL_MONTH)],
            SortMultipleOptions::default(),
        )
}

/// One row per cumulative season bucket in `daily`.
///
/// `daily` must carry the season columns. The season name and year come from the
/// bucket's earliest day.
pub(crate) fn seasonal_means(daily: LazyFrame) -> LazyFrame {
    let mut aggregations = vec![
        col(COL_SEASON_NAME).first(),
        col(COL_LOCATION_DATE)
            .first()
            .dt()
            .year()
            .cast(DataType::Int32)
            .alias(COL_YEAR),
    ];
    aggregations.extend(weighted_means());

    daily
        .sort(
            [COL_LOCATION_DATE],
            SortMultipleOptions::default().with_maintain_order(true),
        )
        .group_by_stable([col(COL_CUMULATIVE_SEASON)])
        .agg(aggregations)
        .sort([COL_CUMULATIVE_SEASON], SortMultipleOptions::default())
}

fn station_means() -> [Expr; 4] {
    [
        col(COL_TEMP_MIN).mean(),
        col(COL_TEMP_MEAN).mean(),
        col(COL_TEMP_MAX).mean(),
        col(COL_FILLED).any(true),
    ]
}

/// Mean station temperatures per (city, day), ordered by day then city.
pub(crate) fn city_daily_means(stations: LazyFrame) -> LazyFrame {
    stations
        .group_by_stable([col(COL_CITY), col(COL_LOCATION_DATE)])
        .agg(station_means())
        .sort_by_exprs(
            [col(COL_LOCATION_DATE), col(COL_CITY)],
            SortMultipleOptions::default(),
        )
}

/// Unweighted mean over every selected row per day.
pub(crate) fn cross_city_daily_means(stations: LazyFrame) -> LazyFrame {
    stations
        .group_by_stable([col(COL_LOCATION_DATE)])
        .agg(station_means())
        .sort([COL_LOCATION_DATE], SortMultipleOptions::default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::season::SeasonCalendar;
    use chrono::{Datelike, NaiveDate};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn single_day(weights: [f64; 3], means: [f64; 3]) -> LazyFrame {
        df!(
            COL_LOCATION_DATE => [date(2020, 1, 1); 3],
            COL_POPULATION_WEIGHT => weights,
            COL_TEMP_MEAN => means,
        )
        .unwrap()
        .lazy()
    }

    #[test]
    fn test_three_station_weighted_mean() -> Result<(), DashboardError> {
        let value = weighted_value(
            single_day([0.5, 0.3, 0.2], [10.0, 20.0, 30.0]),
            COL_TEMP_MEAN,
        )?
        .unwrap();
        assert!((value - 17.0).abs() < 1e-9, "got {value}");
        Ok(())
    }

    #[test]
    fn test_weighted_value_ignores_row_order() -> Result<(), DashboardError> {
        let a = weighted_value(single_day([0.5, 0.3, 0.2], [10.0, 20.0, 30.0]), COL_TEMP_MEAN)?;
        let b = weighted_value(single_day([0.2, 0.5, 0.3], [30.0, 10.0, 20.0]), COL_TEMP_MEAN)?;
        let c = weighted_value(single_day([0.3, 0.2, 0.5], [20.0, 30.0, 10.0]), COL_TEMP_MEAN)?;
        let (a, b, c) = (a.unwrap(), b.unwrap(), c.unwrap());
        assert!((a - b).abs() < 1e-9 && (a - c).abs() < 1e-9);
        Ok(())
    }

    #[test]
    fn test_weighted_value_of_empty_frame() -> Result<(), DashboardError> {
        let empty = single_day([0.5, 0.3, 0.2], [10.0, 20.0, 30.0])
            .filter(col(COL_TEMP_MEAN).gt(lit(100.0)));
        assert_eq!(weighted_value(empty, COL_TEMP_MEAN)?, None);
        Ok(())
    }

    #[test]
    fn test_weighted_daily_per_day() -> Result<(), Box<dyn std::error::Error>> {
        let stations = df!(
            COL_LOCATION_DATE => [date(2020, 1, 2), date(2020, 1, 1), date(2020, 1, 1), date(2020, 1, 2)],
            COL_POPULATION_WEIGHT => [0.4, 0.5, 0.5, 0.6],
            COL_TEMP_MIN => [0.0, -2.0, 0.0, 5.0],
            COL_TEMP_MEAN => [10.0, 2.0, 4.0, 20.0],
            COL_TEMP_MAX => [20.0, 6.0, 8.0, 25.0],
            COL_FILLED => [false, false, true, false],
        )?;

        let daily = weighted_daily(stations.lazy()).collect()?;
        assert_eq!(daily.height(), 2);

        let means: Vec<f64> = daily.column(COL_WEIGHTED_MEAN)?.f64()?.into_no_null_iter().collect();
        assert!((means[0] - 3.0).abs() < 1e-9);
        assert!((means[1] - 16.0).abs() < 1e-9);
        let mins: Vec<f64> = daily.column(COL_WEIGHTED_MIN)?.f64()?.into_no_null_iter().collect();
        assert!((mins[0] + 1.0).abs() < 1e-9);
        assert!((mins[1] - 3.0).abs() < 1e-9);

        let filled: Vec<Option<bool>> = daily.column(COL_FILLED)?.bool()?.into_iter().collect();
        assert_eq!(filled, vec![Some(true), Some(false)]);
        assert_eq!(daily.column(COL_LOCATION_DATE)?.dtype(), &DataType::Date);
        Ok(())
    }

    fn weighted_days(dates: &[NaiveDate], means: &[f64]) -> LazyFrame {
        df!(
            COL_LOCATION_DATE => dates,
            COL_WEIGHTED_MEAN => means,
            COL_WEIGHTED_MIN => means.iter().map(|m| m - 1.0).collect::<Vec<_>>(),
            COL_WEIGHTED_MAX => means.iter().map(|m| m + 1.0).collect::<Vec<_>>(),
            COL_FILLED => dates.iter().map(|d| d.month() == 3).collect::<Vec<_>>(),
        )
        .unwrap()
        .lazy()
    }

    #[test]
    fn test_monthly_means_skip_empty_months() -> Result<(), Box<dyn std::error::Error>> {
        let daily = weighted_days(
            &[date(2020, 3, 5), date(2020, 1, 1), date(2020, 1, 31), date(2020, 3, 6)],
            &[9.0, 1.0, 3.0, 11.0],
        );
        let monthly = monthly_means(daily).collect()?;

        assert_eq!(monthly.height(), 2);
        let months: Vec<Option<i32>> = monthly.column(COL_MONTH)?.i32()?.into_iter().collect();
        assert_eq!(months, vec![Some(1), Some(3)]);
        let means: Vec<Option<f64>> = monthly.column(COL_WEIGHTED_MEAN)?.f64()?.into_iter().collect();
        assert_eq!(means, vec![Some(2.0), Some(10.0)]);
        let filled: Vec<Option<bool>> = monthly.column(COL_FILLED)?.bool()?.into_iter().collect();
        assert_eq!(filled, vec![Some(false), Some(true)]);
        Ok(())
    }

    #[test]
    fn test_seasonal_means_take_year_of_first_day() -> Result<(), Box<dyn std::error::Error>> {
        let calendar = SeasonCalendar::new(2015);
        let daily = weighted_days(
            &[date(2016, 1, 10), date(2015, 12, 10), date(2015, 7, 1), date(2016, 2, 10)],
            &[2.0, 4.0, 20.0, 6.0],
        )
        .with_columns(calendar.season_columns(col(COL_LOCATION_DATE)));

        let seasonal = seasonal_means(daily).collect()?;
        assert_eq!(seasonal.height(), 2);

        let buckets: Vec<Option<i32>> = seasonal.column(COL_CUMULATIVE_SEASON)?.i32()?.into_iter().collect();
        assert_eq!(buckets, vec![Some(2), Some(4)]);
        let years: Vec<Option<i32>> = seasonal.column(COL_YEAR)?.i32()?.into_iter().collect();
        assert_eq!(years, vec![Some(2015), Some(2015)]);
        let names: Vec<Option<&str>> = seasonal.column(COL_SEASON_NAME)?.str()?.into_iter().collect();
        assert_eq!(names, vec![Some("Summer"), Some("Winter")]);
        let means: Vec<Option<f64>> = seasonal.column(COL_WEIGHTED_MEAN)?.f64()?.into_iter().collect();
        assert_eq!(means, vec![Some(20.0), Some(4.0)]);
        Ok(())
    }

    #[test]
    fn test_city_and_cross_city_means() -> Result<(), Box<dyn std::error::Error>> {
        let stations = df!(
            COL_LOCATION_DATE => [date(2020, 1, 1), date(2020, 1, 1), date(2020, 1, 1)],
            COL_CITY => ["Portland", "Portland", "Boston"],
            COL_TEMP_MIN => [0.0, 2.0, 4.0],
            COL_TEMP_MEAN => [1.0, 3.0, 8.0],
            COL_TEMP_MAX => [2.0, 4.0, 12.0],
            COL_FILLED => [false, true, false],
        )?;

        let per_city = city_daily_means(stations.clone().lazy()).collect()?;
        assert_eq!(per_city.height(), 2);
        let cities: Vec<Option<&str>> = per_city.column(COL_CITY)?.str()?.into_iter().collect();
        assert_eq!(cities, vec![Some("Boston"), Some("Portland")]);
        let means: Vec<Option<f64>> = per_city.column(COL_TEMP_MEAN)?.f64()?.into_iter().collect();
        assert_eq!(means, vec![Some(8.0), Some(2.0)]);

        let averaged = cross_city_daily_means(stations.lazy()).collect()?;
        assert_eq!(averaged.height(), 1);
        let mean = averaged.column(COL_TEMP_MEAN)?.f64()?.get(0).unwrap();
        assert!((mean - 4.0).abs() < 1e-9);
        assert_eq!(averaged.column(COL_FILLED)?.bool()?.get(0), Some(true));
        Ok(())
    }
}
