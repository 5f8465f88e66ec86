use chrono::NaiveDate;
use std::collections::{HashMap, HashSet};

use crate::api::{
    ApiError, AttendanceId, AttendancePayload, AttendanceRecord, AttendanceStatus, EmployeeId,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpsertAction {
    Create,
    Update(AttendanceId),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpsertPlan {
    pub action: UpsertAction,
    pub payload: AttendancePayload,
}

impl UpsertPlan {
    pub fn existing_id(&self) -> Option<AttendanceId> {
        match self.action {
            UpsertAction::Create => None,
            UpsertAction::Update(id) => Some(id),
        }
    }

    pub fn key(&self) -> UpsertKey {
        UpsertKey {
            employee: self.payload.employee,
            date: self.payload.date,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct UpsertKey {
    pub employee: EmployeeId,
    pub date: NaiveDate,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UpsertError {
    #[error("attendance for {0} is already being saved")]
    InFlight(NaiveDate),
    #[error("cannot mark attendance for future date {0}")]
    FutureDate(NaiveDate),
    #[error(transparent)]
    Api(#[from] ApiError),
}

/// What to do when a second mark arrives for a key whose write is still pending.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InFlightPolicy {
    #[default]
    Reject,
    /// Keep the latest requested status and write it once the pending one settles.
    Queue,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Admission {
    Started(UpsertPlan),
    Queued,
}

/// Create when no record exists for (employee, date), update it otherwise.
pub fn plan_upsert(
    date: NaiveDate,
    employee: EmployeeId,
    status: AttendanceStatus,
    records: &[AttendanceRecord],
) -> UpsertPlan {
    let action = records
        .iter()
        .rev()
        .find(|r| r.employee == employee && r.date == date)
        .map(|r| UpsertAction::Update(r.id))
        .unwrap_or(UpsertAction::Create);
    UpsertPlan {
        action,
        payload: AttendancePayload {
            date,
            status,
            employee,
        },
    }
}

/// Puts the server's copy of a saved record into `records`, dropping any
/// entry it supersedes (same id, or same employee and date).
pub fn merge_saved(records: &mut Vec<AttendanceRecord>, saved: AttendanceRecord) {
    let supersedes = |r: &AttendanceRecord| {
        r.id == saved.id || (r.employee == saved.employee && r.date == saved.date)
    };
    let slot = records.iter().position(supersedes);
    records.retain(|r| !supersedes(r));
    match slot {
        Some(index) => records.insert(index.min(records.len()), saved),
        None => records.push(saved),
    }
}

#[derive(Debug, Clone, Default)]
pub struct UpsertCoordinator {
    policy: InFlightPolicy,
    in_flight: HashSet<UpsertKey>,
    queued: HashMap<UpsertKey, AttendanceStatus>,
}

impl UpsertCoordinator {
    pub fn new(policy: InFlightPolicy) -> Self {
        Self {
            policy,
            ..Self::default()
        }
    }

    pub fn policy(&self) -> InFlightPolicy {
        self.policy
    }

    pub fn is_pending(&self, employee: EmployeeId, date: NaiveDate) -> bool {
        self.in_flight.contains(&UpsertKey { employee, date })
    }

    pub fn has_pending(&self) -> bool {
        !self.in_flight.is_empty()
    }

    /// Admits a mark request. A started plan must be settled with
    /// [`UpsertCoordinator::complete`] whatever the write's outcome.
    pub fn begin(
        &mut self,
        date: NaiveDate,
        employee: EmployeeId,
        status: AttendanceStatus,
        records: &[AttendanceRecord],
        today: NaiveDate,
    ) -> Result<Admission, UpsertError> {
        if date > today {
            return Err(UpsertError::FutureDate(date));
        }
        let key = UpsertKey { employee, date };
        if self.in_flight.contains(&key) {
            return match self.policy {
                InFlightPolicy::Reject => Err(UpsertError::InFlight(date)),
                InFlightPolicy::Queue => {
                    self.queued.insert(key, status);
                    Ok(Admission::Queued)
                }
            };
        }
        self.in_flight.insert(key);
        Ok(Admission::Started(plan_upsert(date, employee, status, records)))
    }

    /// Settles a started write. On success the saved record is merged into
    /// `records`; on failure `records` is left untouched and any queued
    /// follow-up for the key is dropped. Returns the queued status to write
    /// next, if any.
    pub fn complete(
        &mut self,
        plan: &UpsertPlan,
        result: &Result<AttendanceRecord, ApiError>,
        records: &mut Vec<AttendanceRecord>,
    ) -> Option<AttendanceStatus> {
        let key = plan.key();
        self.in_flight.remove(&key);
        let follow_up = self.queued.remove(&key);
        match result {
            Ok(saved) => {
                merge_saved(records, saved.clone());
                follow_up
            }
            Err(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, d).unwrap()
    }

    fn record(id: i64, d: u32, status: AttendanceStatus) -> AttendanceRecord {
        AttendanceRecord {
            id: AttendanceId(id),
            date: date(d),
            status,
            employee: EmployeeId(1),
        }
    }

    #[test]
    fn create_then_update_targets_new_identity() {
        let mut records = Vec::new();
        let plan = plan_upsert(date(5), EmployeeId(1), AttendanceStatus::Present, &records);
        assert_eq!(plan.action, UpsertAction::Create);
        assert_eq!(plan.existing_id(), None);

        let saved = AttendanceRecord {
            id: AttendanceId(42),
            date: plan.payload.date,
            status: plan.payload.status,
            employee: plan.payload.employee,
        };
        merge_saved(&mut records, saved);

        let next = plan_upsert(date(5), EmployeeId(1), AttendanceStatus::Absent, &records);
        assert_eq!(next.action, UpsertAction::Update(AttendanceId(42)));
        assert_eq!(next.payload.status, AttendanceStatus::Absent);
    }

    #[test]
    fn plan_only_matches_the_same_employee() {
        let mut other = record(7, 5, AttendanceStatus::Present);
        other.employee = EmployeeId(2);
        let plan = plan_upsert(date(5), EmployeeId(1), AttendanceStatus::Present, &[other]);
        assert_eq!(plan.action, UpsertAction::Create);
    }

    #[test]
    fn merge_replaces_in_place_without_duplicates() {
        let mut records = vec![
            record(1, 1, AttendanceStatus::Present),
            record(2, 2, AttendanceStatus::Present),
            record(3, 3, AttendanceStatus::Present),
        ];
        merge_saved(&mut records, record(2, 2, AttendanceStatus::Absent));
        assert_eq!(records.len(), 3);
        assert_eq!(records[1], record(2, 2, AttendanceStatus::Absent));
    }

    #[test]
    fn merge_of_created_record_drops_stale_entry_for_same_day() {
        let mut records = vec![record(1, 4, AttendanceStatus::Present)];
        merge_saved(&mut records, record(8, 4, AttendanceStatus::Absent));
        assert_eq!(records, vec![record(8, 4, AttendanceStatus::Absent)]);
    }

    #[test]
    fn merge_appends_new_days() {
        let mut records = vec![record(1, 4, AttendanceStatus::Present)];
        merge_saved(&mut records, record(2, 6, AttendanceStatus::Present));
        assert_eq!(records.len(), 2);
        assert_eq!(records[1].id, AttendanceId(2));
    }

    #[test]
    fn second_mark_for_pending_key_is_rejected() {
        let mut coordinator = UpsertCoordinator::new(InFlightPolicy::Reject);
        let records = Vec::new();
        let first = coordinator
            .begin(date(5), EmployeeId(1), AttendanceStatus::Present, &records, date(10))
            .unwrap();
        assert!(matches!(first, Admission::Started(_)));
        assert!(coordinator.is_pending(EmployeeId(1), date(5)));

        let second =
            coordinator.begin(date(5), EmployeeId(1), AttendanceStatus::Absent, &records, date(10));
        assert_eq!(second, Err(UpsertError::InFlight(date(5))));

        // A different day is independent.
        assert!(coordinator
            .begin(date(6), EmployeeId(1), AttendanceStatus::Absent, &records, date(10))
            .is_ok());
    }

    #[test]
    fn queued_mark_is_returned_after_success() {
        let mut coordinator = UpsertCoordinator::new(InFlightPolicy::Queue);
        let mut records = Vec::new();
        let Ok(Admission::Started(plan)) =
            coordinator.begin(date(5), EmployeeId(1), AttendanceStatus::Present, &records, date(10))
        else {
            panic!("first mark should start");
        };
        assert_eq!(
            coordinator.begin(date(5), EmployeeId(1), AttendanceStatus::Absent, &records, date(10)),
            Ok(Admission::Queued)
        );

        let saved = Ok(record(3, 5, AttendanceStatus::Present));
        let follow_up = coordinator.complete(&plan, &saved, &mut records);
        assert_eq!(follow_up, Some(AttendanceStatus::Absent));
        assert!(!coordinator.is_pending(EmployeeId(1), date(5)));
        assert_eq!(records.len(), 1);

        let Ok(Admission::Started(next)) = coordinator.begin(
            date(5),
            EmployeeId(1),
            AttendanceStatus::Absent,
            &records,
            date(10),
        ) else {
            panic!("follow-up should start");
        };
        assert_eq!(next.action, UpsertAction::Update(AttendanceId(3)));
    }

    #[test]
    fn failed_write_leaves_records_and_clears_key() {
        let mut coordinator = UpsertCoordinator::new(InFlightPolicy::Queue);
        let mut records = vec![record(1, 5, AttendanceStatus::Present)];
        let snapshot = records.clone();
        let Ok(Admission::Started(plan)) =
            coordinator.begin(date(5), EmployeeId(1), AttendanceStatus::Absent, &records, date(10))
        else {
            panic!("mark should start");
        };
        coordinator
            .begin(date(5), EmployeeId(1), AttendanceStatus::Present, &records, date(10))
            .unwrap();

        let failed = Err(ApiError::request_failed("offline"));
        assert_eq!(coordinator.complete(&plan, &failed, &mut records), None);
        assert_eq!(records, snapshot);
        assert!(!coordinator.has_pending());
    }

    #[test]
    fn future_dates_are_refused() {
        let mut coordinator = UpsertCoordinator::default();
        assert_eq!(coordinator.policy(), InFlightPolicy::Reject);
        assert_eq!(
            coordinator.begin(date(11), EmployeeId(1), AttendanceStatus::Present, &[], date(10)),
            Err(UpsertError::FutureDate(date(11)))
        );
        assert!(!coordinator.has_pending());
    }
}
