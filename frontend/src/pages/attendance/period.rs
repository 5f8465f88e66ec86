use chrono::{Datelike, NaiveDate};
use std::fmt;

use super::utils::{month_bounds, MONTH_NAMES};

/// A displayed month. `month0` is zero based (January = 0).
///
/// Field order gives the derived `Ord` its (year, month) lexicographic meaning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Period {
    year: i32,
    month0: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum PeriodError {
    #[error("{0} is after the current month")]
    InFuture(Period),
    #[error("month index {0} is outside 0..=11")]
    InvalidMonth(u32),
    #[error("year {0} is outside the supported calendar range")]
    YearOutOfRange(i32),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepDirection {
    Previous,
    Next,
}

impl Period {
    pub fn new(year: i32, month0: u32) -> Result<Self, PeriodError> {
        if month0 > 11 {
            return Err(PeriodError::InvalidMonth(month0));
        }
        NaiveDate::from_ymd_opt(year, month0 + 1, 1)
            .and_then(month_bounds)
            .ok_or(PeriodError::YearOutOfRange(year))?;
        Ok(Self { year, month0 })
    }

    pub fn containing(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month0: date.month0(),
        }
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month0(&self) -> u32 {
        self.month0
    }

    /// One based month, as chrono counts it.
    pub fn month(&self) -> u32 {
        self.month0 + 1
    }

    pub fn first_day(&self) -> NaiveDate {
        self.bounds().0
    }

    pub fn last_day(&self) -> NaiveDate {
        self.bounds().1
    }

    pub fn days_in_month(&self) -> u32 {
        self.last_day().day()
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        Self::containing(date) == *self
    }

    pub fn days(&self) -> impl Iterator<Item = NaiveDate> {
        self.first_day().iter_days().take(self.days_in_month() as usize)
    }

    /// The neighbouring month, or `YearOutOfRange` at the edge of the calendar.
    pub fn step(&self, direction: StepDirection) -> Result<Self, PeriodError> {
        let (year, month0) = match (direction, self.month0) {
            (StepDirection::Previous, 0) => (self.year.checked_sub(1), 11),
            (StepDirection::Previous, m) => (Some(self.year), m - 1),
            (StepDirection::Next, 11) => (self.year.checked_add(1), 0),
            (StepDirection::Next, m) => (Some(self.year), m + 1),
        };
        let year = year.ok_or(PeriodError::YearOutOfRange(self.year))?;
        Self::new(year, month0)
    }

    fn bounds(&self) -> (NaiveDate, NaiveDate) {
        // Construction guarantees both days exist.
        NaiveDate::from_ymd_opt(self.year, self.month(), 1)
            .and_then(month_bounds)
            .unwrap_or((NaiveDate::MIN, NaiveDate::MIN))
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", MONTH_NAMES[self.month0 as usize], self.year)
    }
}

/// Holds the selected month and refuses every move past the month of `today`.
///
/// `today` is passed to each operation instead of read from a clock so the
/// ceiling is always the caller's notion of the current day.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PeriodSelector {
    period: Period,
}

impl PeriodSelector {
    pub fn new(today: NaiveDate) -> Self {
        Self {
            period: Period::containing(today),
        }
    }

    pub fn period(&self) -> Period {
        self.period
    }

    pub fn set_period(
        &mut self,
        year: i32,
        month0: u32,
        today: NaiveDate,
    ) -> Result<Period, PeriodError> {
        let candidate = Period::new(year, month0)?;
        self.accept(candidate, today)
    }

    pub fn step_month(
        &mut self,
        direction: StepDirection,
        today: NaiveDate,
    ) -> Result<Period, PeriodError> {
        let candidate = self.period.step(direction)?;
        self.accept(candidate, today)
    }

    pub fn jump_to_today(&mut self, today: NaiveDate) -> Period {
        self.period = Period::containing(today);
        self.period
    }

    pub fn can_step_forward(&self, today: NaiveDate) -> bool {
        self.period
            .step(StepDirection::Next)
            .is_ok_and(|next| next <= Period::containing(today))
    }

    /// Years offered by the year picker: five back, never ahead of `today`.
    pub fn year_options(today: NaiveDate) -> Vec<i32> {
        let current = today.year();
        (current - 5..=current).collect()
    }

    fn accept(&mut self, candidate: Period, today: NaiveDate) -> Result<Period, PeriodError> {
        if candidate > Period::containing(today) {
            return Err(PeriodError::InFuture(candidate));
        }
        self.period = candidate;
        Ok(candidate)
    }
}
