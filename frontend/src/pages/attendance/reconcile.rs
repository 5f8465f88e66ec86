//! Projection of sparse attendance records onto the day cells of a month.
//!
//! Everything here is a pure function of its inputs: callers rebuild a
//! [`RecordIndex`] when the record set changes and project it as often as the
//! view re-renders.

use chrono::{NaiveDate, NaiveDateTime};
use std::collections::HashMap;

use crate::api::{AttendanceId, AttendanceRecord, AttendanceStatus};

use super::period::Period;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DayCellState {
    /// After the end of the current day; never editable.
    Disabled,
    /// Editable, nothing recorded yet.
    Empty,
    Marked(AttendanceStatus),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayCell {
    pub date: NaiveDate,
    pub future: bool,
    pub record: Option<AttendanceRecord>,
}

impl DayCell {
    pub fn state(&self) -> DayCellState {
        match (self.future, &self.record) {
            (true, _) => DayCellState::Disabled,
            (false, None) => DayCellState::Empty,
            (false, Some(record)) => DayCellState::Marked(record.status),
        }
    }

    pub fn is_editable(&self) -> bool {
        !self.future
    }
}

/// Two records were supplied for the same calendar date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IntegrityWarning {
    pub date: NaiveDate,
    pub kept: AttendanceId,
    pub discarded: AttendanceId,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordIndex {
    by_date: HashMap<NaiveDate, AttendanceRecord>,
    warnings: Vec<IntegrityWarning>,
}

impl RecordIndex {
    /// Later records replace earlier ones for the same date.
    pub fn build(records: &[AttendanceRecord]) -> Self {
        let mut by_date: HashMap<NaiveDate, AttendanceRecord> =
            HashMap::with_capacity(records.len());
        let mut warnings = Vec::new();
        for record in records {
            if let Some(previous) = by_date.insert(record.date, record.clone()) {
                warnings.push(IntegrityWarning {
                    date: record.date,
                    kept: record.id,
                    discarded: previous.id,
                });
            }
        }
        Self { by_date, warnings }
    }

    pub fn get(&self, date: NaiveDate) -> Option<&AttendanceRecord> {
        self.by_date.get(&date)
    }

    pub fn warnings(&self) -> &[IntegrityWarning] {
        &self.warnings
    }

    pub fn len(&self) -> usize {
        self.by_date.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_date.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Projection {
    pub period: Period,
    pub cells: Vec<DayCell>,
    pub warnings: Vec<IntegrityWarning>,
}

impl Projection {
    pub fn cell(&self, date: NaiveDate) -> Option<&DayCell> {
        self.cells.iter().find(|cell| cell.date == date)
    }
}

/// Strictly after the calendar day containing `now`.
pub fn is_future(date: NaiveDate, now: NaiveDateTime) -> bool {
    date > now.date()
}

pub fn project(period: Period, records: &[AttendanceRecord], now: NaiveDateTime) -> Projection {
    project_indexed(period, &RecordIndex::build(records), now)
}

pub fn project_indexed(period: Period, index: &RecordIndex, now: NaiveDateTime) -> Projection {
    let cells = period
        .days()
        .map(|date| DayCell {
            date,
            future: is_future(date, now),
            record: index.get(date).cloned(),
        })
        .collect();
    let warnings = index
        .warnings()
        .iter()
        .filter(|w| period.contains(w.date))
        .copied()
        .collect();
    Projection {
        period,
        cells,
        warnings,
    }
}
