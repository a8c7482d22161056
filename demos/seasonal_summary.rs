//! Prints the seasonal and monthly weighted temperatures of a data directory.
//!
//! Usage: `cargo run --example seasonal_summary -- <data-dir> [season ...]`

use citytemps::{DashboardError, DataSources, Resolution, Season, TemperatureDashboard, WeightedView};
use std::env;

fn main() -> Result<(), DashboardError> {
    let mut args = env::args().skip(1);
    let dir = args.next().unwrap_or_else(|| ".".to_string());
    let seasons = args
        .map(|arg| arg.parse::<Season>())
        .collect::<Result<Vec<_>, _>>()?;

    let dashboard = TemperatureDashboard::with_sources(DataSources::in_dir(&dir))?;
    let cities = dashboard.cities()?;
    println!("Cities: {}", cities.join(", "));
    if let Some(span) = dashboard.date_span()? {
        println!("Recordings from {} to {}", span.from(), span.to());
    }

    let view = dashboard
        .weighted_series()
        .resolution(Resolution::Seasonal)
        .seasons(&seasons)
        .call()?;
    if let WeightedView::Seasonal(buckets) = &view {
        println!("\n{:<4} {:<14} {:>7} {:>7} {:>7}", "#", "Season", "min", "mean", "max");
        for bucket in buckets {
            println!(
                "{:<4} {:<14} {:>7.1} {:>7.1} {:>7.1}{}",
                bucket.cumulative_season,
                bucket.season_name_yr,
                bucket.weighted_min_temp,
                bucket.weighted_mean_temp,
                bucket.weighted_max_temp,
                if bucket.filled { "  *" } else { "" }
            );
        }
    }

    let city_refs: Vec<&str> = cities.iter().map(String::as_str).collect();
    let missing = dashboard.missing_recordings().cities(&city_refs).call()?;
    println!("\n{} interpolated recordings (marked *)", missing.len());

    let monthly = dashboard
        .weighted_series()
        .resolution(Resolution::Monthly)
        .seasons(&seasons)
        .call()?;
    println!("\nMonthly view as JSON:\n{}", monthly.to_json()?);

    Ok(())
}
