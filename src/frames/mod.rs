use crate::error::DashboardError;
use crate::types::columns::COL_LOCATION_DATE;
use crate::types::selection::DateRange;
use crate::types::traits::utils::days_to_date;
use polars::prelude::{col, LazyFrame};

pub mod extractor;
pub mod station_frame;
pub mod weighted_frame;

/// First and last `location_date` of a frame, or `None` if it has no rows.
pub(crate) fn date_span(frame: LazyFrame) -> Result<Option<DateRange>, DashboardError> {
    let df = frame
        .select([
            col(COL_LOCATION_DATE).min().alias("first"),
            col(COL_LOCATION_DATE).max().alias("last"),
        ])
        .collect()?;
    let first = df.column("first")?.date()?.get(0).and_then(days_to_date);
    let last = df.column("last")?.date()?.get(0).and_then(days_to_date);
    match (first, last) {
        (Some(first), Some(last)) => Ok(Some(DateRange::new(first, last)?)),
        _ => Ok(None),
    }
}
