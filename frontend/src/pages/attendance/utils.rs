use chrono::{Datelike, NaiveDate};

use crate::api::{AttendanceRecord, AttendanceStatus};

use super::period::Period;

pub const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

pub const WEEKDAY_LABELS: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

/// First and last day of the month containing `date`. Only fails for years
/// chrono cannot represent.
pub fn month_bounds(date: NaiveDate) -> Option<(NaiveDate, NaiveDate)> {
    let first = NaiveDate::from_ymd_opt(date.year(), date.month(), 1)?;
    let last = (28..=31)
        .rev()
        .find_map(|day| NaiveDate::from_ymd_opt(date.year(), date.month(), day))?;
    Some((first, last))
}

/// Blank cells before day 1 in a Sunday-first week grid.
pub fn leading_blank_cells(period: Period) -> usize {
    period.first_day().weekday().num_days_from_sunday() as usize
}

pub fn format_iso(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AttendanceStats {
    pub present: usize,
    pub absent: usize,
}

impl AttendanceStats {
    pub fn from_records<'a>(records: impl IntoIterator<Item = &'a AttendanceRecord>) -> Self {
        records
            .into_iter()
            .fold(Self::default(), |mut stats, record| {
                match record.status {
                    AttendanceStatus::Present => stats.present += 1,
                    AttendanceStatus::Absent => stats.absent += 1,
                }
                stats
            })
    }

    pub fn total(&self) -> usize {
        self.present + self.absent
    }

    /// Present share as a rounded percentage; 0 when nothing is marked.
    pub fn rate_percent(&self) -> u32 {
        let denominator = self.total().max(1) as f64;
        ((self.present as f64 / denominator) * 100.0).round() as u32
    }
}
