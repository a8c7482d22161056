use chrono::{Datelike, Duration, NaiveDate};

pub(crate) fn days_in_month(year: i32, month: u32) -> Option<u32> {
    if !(1..=12).contains(&month) {
        return None;
    }
    let (next_month_year, next_month) = if month == 12 {
        (year.checked_add(1)?, 1)
    } else {
        (year, month + 1)
    };
    let first_day_of_next_month = NaiveDate::from_ymd_opt(next_month_year, next_month, 1)?;
    let last_day_of_current_month = first_day_of_next_month - Duration::days(1);
    Some(last_day_of_current_month.day())
}

/// Polars stores `Date` values as days since 1970-01-01.
pub(crate) fn days_to_date(days_since_epoch: i32) -> Option<NaiveDate> {
    NaiveDate::from_num_days_from_ce_opt(days_since_epoch.checked_add(719_163)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_days_in_month() {
        assert_eq!(days_in_month(2016, 2), Some(29));
        assert_eq!(days_in_month(2015, 2), Some(28));
        assert_eq!(days_in_month(2015, 12), Some(31));
        assert_eq!(days_in_month(2015, 0), None);
    }

    #[test]
    fn test_days_to_date() {
        assert_eq!(days_to_date(0), NaiveDate::from_ymd_opt(1970, 1, 1));
        assert_eq!(days_to_date(16_436), NaiveDate::from_ymd_opt(2015, 1, 1));
    }
}
