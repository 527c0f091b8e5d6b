use chrono::{NaiveDate, NaiveDateTime};

use tatami_data::YearMonth;

/// Today as seen by the server clock.
pub fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

/// Wall clock timestamp for stored records.
pub fn now() -> NaiveDateTime {
    chrono::Local::now().naive_local()
}

/// The current calendar month.
pub fn this_month() -> YearMonth {
    YearMonth::of(today())
}
