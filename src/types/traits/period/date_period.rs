use crate::types::season::SeasonBucket;
use crate::types::traits::any::any_date::AnyDate;
use crate::types::traits::types::{Month, StartEndDate, Year};
use chrono::NaiveDate;

pub trait DatePeriod {
    fn get_date_period(self) -> Option<StartEndDate>;
}

impl DatePeriod for Year {
    fn get_date_period(self) -> Option<StartEndDate> {
        self.get_date_range()
    }
}

impl DatePeriod for Month {
    fn get_date_period(self) -> Option<StartEndDate> {
        self.get_date_range()
    }
}

/// A winter bucket starts on December 1st of the year before its season year.
impl DatePeriod for SeasonBucket {
    fn get_date_period(self) -> Option<StartEndDate> {
        let [first, _, last] = self.season.months();
        let start_year = if first == 12 {
            self.season_year - 1
        } else {
            self.season_year
        };
        let start = NaiveDate::from_ymd_opt(start_year, first, 1)?;
        let end = Month::new(last, self.season_year).get_date_range()?.end;
        Some(StartEndDate { start, end })
    }
}
