use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use chrono_tz::Tz;

use crate::config;

/// Wall-clock time of `instant` in `tz`, as used for the future-day boundary.
pub fn local_reference(instant: DateTime<Utc>, tz: Tz) -> NaiveDateTime {
    instant.with_timezone(&tz).naive_local()
}

pub fn now_in_app_tz() -> DateTime<Tz> {
    Utc::now().with_timezone(&config::current_time_zone())
}

pub fn reference_now() -> NaiveDateTime {
    local_reference(Utc::now(), config::current_time_zone())
}

pub fn today_in_app_tz() -> NaiveDate {
    now_in_app_tz().date_naive()
}
