use crate::api::{ApiClient, ApiError, AttendanceRecord, AttendanceStatus, EmployeeId};
use crate::pages::attendance::{
    period::{Period, PeriodError, PeriodSelector, StepDirection},
    reconcile::{project_indexed, Projection, RecordIndex},
    upsert::{Admission, InFlightPolicy, UpsertCoordinator, UpsertError, UpsertPlan},
    utils::AttendanceStats,
};
use chrono::{NaiveDate, NaiveDateTime};
use leptos::*;
use log::{debug, error, warn};

/// Identifies one fetch so its result can be matched against the selection
/// that is current when it resolves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchTicket {
    pub period: Period,
    pub token: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchOutcome {
    Applied,
    Stale,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Navigation {
    Select { year: i32, month0: u32 },
    Step(StepDirection),
    Today,
}

/// State owned by one month attendance view: the selection, the records
/// fetched for it, and the write guard.
#[derive(Debug, Clone)]
pub struct AttendanceState {
    pub employee: EmployeeId,
    selector: PeriodSelector,
    records: Vec<AttendanceRecord>,
    index: RecordIndex,
    loaded_period: Option<Period>,
    fetch_token: u32,
    coordinator: UpsertCoordinator,
    pub loading: bool,
    pub last_error: Option<ApiError>,
}

impl AttendanceState {
    pub fn new(employee: EmployeeId, today: NaiveDate, policy: InFlightPolicy) -> Self {
        Self {
            employee,
            selector: PeriodSelector::new(today),
            records: Vec::new(),
            index: RecordIndex::default(),
            loaded_period: None,
            fetch_token: 0,
            coordinator: UpsertCoordinator::new(policy),
            loading: false,
            last_error: None,
        }
    }

    pub fn period(&self) -> Period {
        self.selector.period()
    }

    pub fn selector(&self) -> &PeriodSelector {
        &self.selector
    }

    pub fn records(&self) -> &[AttendanceRecord] {
        &self.records
    }

    pub fn loaded_period(&self) -> Option<Period> {
        self.loaded_period
    }

    pub fn is_saving(&self, date: NaiveDate) -> bool {
        self.coordinator.is_pending(self.employee, date)
    }

    pub fn navigate(&mut self, nav: Navigation, today: NaiveDate) -> Result<Period, PeriodError> {
        match nav {
            Navigation::Select { year, month0 } => self.selector.set_period(year, month0, today),
            Navigation::Step(direction) => self.selector.step_month(direction, today),
            Navigation::Today => Ok(self.selector.jump_to_today(today)),
        }
    }

    /// Supersedes every fetch issued before it.
    pub fn begin_fetch(&mut self) -> FetchTicket {
        self.fetch_token = self.fetch_token.wrapping_add(1);
        self.loading = true;
        FetchTicket {
            period: self.period(),
            token: self.fetch_token,
        }
    }

    pub fn apply_fetch(
        &mut self,
        ticket: FetchTicket,
        result: Result<Vec<AttendanceRecord>, ApiError>,
    ) -> FetchOutcome {
        if ticket.token != self.fetch_token || ticket.period != self.period() {
            debug!(
                "Discarding stale attendance fetch for {} (token {})",
                ticket.period, ticket.token
            );
            return FetchOutcome::Stale;
        }
        self.loading = false;
        match result {
            Ok(records) => {
                let employee = self.employee;
                let fetched = records.len();
                let records: Vec<_> = records
                    .into_iter()
                    .filter(|r| r.employee == employee && ticket.period.contains(r.date))
                    .collect();
                if records.len() != fetched {
                    debug!(
                        "Ignored {} fetched records outside employee {} / {}",
                        fetched - records.len(),
                        employee,
                        ticket.period
                    );
                }
                self.set_records(records);
                self.loaded_period = Some(ticket.period);
                self.last_error = None;
            }
            Err(err) => {
                error!("Failed to load attendance for {}: {}", ticket.period, err);
                self.last_error = Some(err);
            }
        }
        FetchOutcome::Applied
    }

    pub fn projection(&self, now: NaiveDateTime) -> Projection {
        project_indexed(self.period(), &self.index, now)
    }

    /// Counts only what is on screen: records of the loaded, selected month.
    pub fn stats(&self) -> AttendanceStats {
        if self.loaded_period != Some(self.period()) {
            return AttendanceStats::default();
        }
        let period = self.period();
        AttendanceStats::from_records(
            self.records
                .iter()
                .filter(|r| period.contains(r.date) && self.index.get(r.date) == Some(*r)),
        )
    }

    pub fn begin_write(
        &mut self,
        date: NaiveDate,
        status: AttendanceStatus,
        today: NaiveDate,
    ) -> Result<Admission, UpsertError> {
        self.coordinator
            .begin(date, self.employee, status, &self.records, today)
    }

    /// Settles a started write; see [`UpsertCoordinator::complete`].
    pub fn settle_write(
        &mut self,
        plan: &UpsertPlan,
        result: &Result<AttendanceRecord, ApiError>,
    ) -> Option<AttendanceStatus> {
        let mut records = std::mem::take(&mut self.records);
        let follow_up = self.coordinator.complete(plan, result, &mut records);
        if result.is_ok() {
            self.set_records(records);
        } else {
            self.records = records;
        }
        follow_up
    }

    fn set_records(&mut self, records: Vec<AttendanceRecord>) {
        self.index = RecordIndex::build(&records);
        for warning in self.index.warnings() {
            warn!(
                "Duplicate attendance for {}: keeping {}, ignoring {}",
                warning.date, warning.kept, warning.discarded
            );
        }
        self.records = records;
    }
}

pub fn use_attendance(
    employee: EmployeeId,
    today: NaiveDate,
) -> (ReadSignal<AttendanceState>, WriteSignal<AttendanceState>) {
    create_signal(AttendanceState::new(
        employee,
        today,
        InFlightPolicy::Queue,
    ))
}

/// Fetches the selected month. Only the newest request's result is applied.
pub async fn load_month(
    api: &ApiClient,
    set_state: WriteSignal<AttendanceState>,
) -> Result<FetchOutcome, ApiError> {
    let Some((ticket, employee)) =
        set_state.try_update(|state| (state.begin_fetch(), state.employee))
    else {
        return Ok(FetchOutcome::Stale);
    };
    let result = api
        .list_attendance(employee, ticket.period.first_day(), ticket.period.last_day())
        .await;
    let failure = result.as_ref().err().cloned();
    let outcome = set_state
        .try_update(|state| state.apply_fetch(ticket, result))
        .unwrap_or(FetchOutcome::Stale);
    match (outcome, failure) {
        (FetchOutcome::Applied, Some(err)) => Err(err),
        (outcome, _) => Ok(outcome),
    }
}

/// Marks `date` with `status`, creating or updating as needed. Returns the
/// saved record, or `None` when the request was queued behind a pending
/// write for the same day (the queued status is written by that call).
pub async fn save_attendance(
    api: &ApiClient,
    set_state: WriteSignal<AttendanceState>,
    date: NaiveDate,
    status: AttendanceStatus,
    today: NaiveDate,
) -> Result<Option<AttendanceRecord>, UpsertError> {
    let mut status = status;
    loop {
        let admission = set_state
            .try_update(|state| state.begin_write(date, status, today))
            .unwrap_or(Ok(Admission::Queued))?;
        let plan = match admission {
            Admission::Queued => {
                debug!("Queued {} for {} behind pending write", status.label(), date);
                return Ok(None);
            }
            Admission::Started(plan) => plan,
        };

        let result = api
            .upsert_attendance(plan.existing_id(), &plan.payload)
            .await;
        let follow_up = set_state
            .try_update(|state| state.settle_write(&plan, &result))
            .flatten();

        match (result, follow_up) {
            (Err(err), _) => {
                error!("Failed to save attendance for {}: {}", date, err);
                return Err(UpsertError::Api(err));
            }
            (Ok(_), Some(next)) => status = next,
            (Ok(saved), None) => return Ok(Some(saved)),
        }
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod tests {
    use super::*;
    use crate::api::test_support::mock::*;
    use crate::api::AttendanceId;
    use crate::pages::attendance::reconcile::DayCellState;
    use crate::test_support::ssr::with_runtime;
    use chrono::NaiveTime;
    use serde_json::json;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn noon(d: NaiveDate) -> NaiveDateTime {
        d.and_time(NaiveTime::from_hms_opt(12, 0, 0).unwrap())
    }

    fn record(id: i64, d: NaiveDate, status: AttendanceStatus) -> AttendanceRecord {
        AttendanceRecord {
            id: AttendanceId(id),
            date: d,
            status,
            employee: EmployeeId(1),
        }
    }

    #[test]
    fn stale_fetch_for_previous_period_is_discarded() {
        let today = date(2024, 6, 15);
        let mut state = AttendanceState::new(EmployeeId(1), today, InFlightPolicy::Reject);

        state
            .navigate(Navigation::Select { year: 2024, month0: 0 }, today)
            .unwrap();
        let january = state.begin_fetch();
        state
            .navigate(Navigation::Select { year: 2024, month0: 1 }, today)
            .unwrap();
        let february = state.begin_fetch();

        let feb_record = record(2, date(2024, 2, 3), AttendanceStatus::Absent);
        assert_eq!(
            state.apply_fetch(february, Ok(vec![feb_record.clone()])),
            FetchOutcome::Applied
        );
        let jan_record = record(1, date(2024, 1, 3), AttendanceStatus::Present);
        assert_eq!(
            state.apply_fetch(january, Ok(vec![jan_record])),
            FetchOutcome::Stale
        );

        assert_eq!(state.loaded_period(), Some(Period::new(2024, 1).unwrap()));
        assert_eq!(state.records(), &[feb_record]);
        let projection = state.projection(noon(today));
        assert_eq!(projection.period, Period::new(2024, 1).unwrap());
        assert_eq!(
            projection.cell(date(2024, 2, 3)).unwrap().state(),
            DayCellState::Marked(AttendanceStatus::Absent)
        );
        assert!(!state.loading);
    }

    #[test]
    fn refetch_of_same_period_supersedes_older_ticket() {
        let today = date(2024, 6, 15);
        let mut state = AttendanceState::new(EmployeeId(1), today, InFlightPolicy::Reject);
        let first = state.begin_fetch();
        let second = state.begin_fetch();
        assert_eq!(state.apply_fetch(first, Ok(vec![])), FetchOutcome::Stale);
        assert!(state.loading);
        assert_eq!(state.apply_fetch(second, Ok(vec![])), FetchOutcome::Applied);
        assert!(!state.loading);
    }

    #[test]
    fn fetched_records_of_other_employees_are_ignored() {
        let today = date(2024, 6, 15);
        let mut state = AttendanceState::new(EmployeeId(1), today, InFlightPolicy::Reject);
        let own = record(1, date(2024, 6, 3), AttendanceStatus::Present);
        let mut colleague = record(2, date(2024, 6, 3), AttendanceStatus::Absent);
        colleague.employee = EmployeeId(2);
        let last_month = record(3, date(2024, 5, 31), AttendanceStatus::Absent);

        let ticket = state.begin_fetch();
        state.apply_fetch(ticket, Ok(vec![own.clone(), colleague, last_month]));

        assert_eq!(state.records(), &[own]);
        let projection = state.projection(noon(today));
        assert_eq!(
            projection.cell(date(2024, 6, 3)).unwrap().state(),
            DayCellState::Marked(AttendanceStatus::Present)
        );
        assert!(projection.warnings.is_empty());
        let stats = state.stats();
        assert_eq!((stats.present, stats.absent), (1, 0));
    }

    #[test]
    fn failed_fetch_keeps_existing_records() {
        let today = date(2024, 6, 15);
        let mut state = AttendanceState::new(EmployeeId(1), today, InFlightPolicy::Reject);
        let existing = record(5, date(2024, 6, 1), AttendanceStatus::Present);
        let ticket = state.begin_fetch();
        state.apply_fetch(ticket, Ok(vec![existing.clone()]));

        let ticket = state.begin_fetch();
        state.apply_fetch(ticket, Err(ApiError::request_failed("offline")));
        assert_eq!(state.records(), &[existing]);
        assert_eq!(
            state.last_error.as_ref().map(|e| e.code.as_str()),
            Some("REQUEST_FAILED")
        );
    }

    #[test]
    fn navigation_into_future_is_rejected() {
        let today = date(2024, 6, 15);
        let mut state = AttendanceState::new(EmployeeId(1), today, InFlightPolicy::Reject);
        assert!(state
            .navigate(Navigation::Step(StepDirection::Next), today)
            .is_err());
        assert_eq!(state.period(), Period::new(2024, 5).unwrap());
        state
            .navigate(Navigation::Select { year: 2023, month0: 2 }, today)
            .unwrap();
        assert_eq!(
            state.navigate(Navigation::Today, today),
            Ok(Period::new(2024, 5).unwrap())
        );
    }

    #[test]
    fn stats_cover_only_the_loaded_selected_month() {
        let today = date(2024, 6, 15);
        let mut state = AttendanceState::new(EmployeeId(1), today, InFlightPolicy::Reject);
        let ticket = state.begin_fetch();
        state.apply_fetch(
            ticket,
            Ok(vec![
                record(1, date(2024, 6, 1), AttendanceStatus::Present),
                record(2, date(2024, 6, 2), AttendanceStatus::Absent),
                record(3, date(2024, 6, 3), AttendanceStatus::Present),
            ]),
        );
        let stats = state.stats();
        assert_eq!((stats.present, stats.absent), (2, 1));

        state
            .navigate(Navigation::Step(StepDirection::Previous), today)
            .unwrap();
        assert_eq!(state.stats(), AttendanceStats::default());
    }

    #[tokio::test]
    async fn load_month_applies_server_records() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET)
                .path("/attendances/")
                .query_param("date_after", "2024-06-01")
                .query_param("date_before", "2024-06-30");
            then.status(200).json_body(json!([
                {"id": 1, "date": "2024-06-03", "status": "Present", "employee": 1}
            ]));
        });
        let api = ApiClient::new_with_base_url(server.base_url());

        let runtime = create_runtime();
        let (state, set_state) = use_attendance(EmployeeId(1), date(2024, 6, 15));
        let outcome = load_month(&api, set_state).await.unwrap();
        assert_eq!(outcome, FetchOutcome::Applied);
        assert_eq!(state.get_untracked().records().len(), 1);
        runtime.dispose();
    }

    #[tokio::test]
    async fn load_month_reports_transport_failure() {
        let server = MockServer::start();
        let api = ApiClient::new_with_base_url(server.base_url());

        let runtime = create_runtime();
        let (state, set_state) = use_attendance(EmployeeId(1), date(2024, 6, 15));
        let err = load_month(&api, set_state).await.unwrap_err();
        assert_eq!(err.code, "REQUEST_FAILED");
        assert!(state.get_untracked().last_error.is_some());
        runtime.dispose();
    }

    #[tokio::test]
    async fn save_creates_then_updates_the_same_day() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(POST).path("/attendances/");
            then.status(201).json_body(
                json!({"id": 31, "date": "2024-06-10", "status": "Present", "employee": 1}),
            );
        });
        server.mock(|when, then| {
            when.method(PUT).path("/attendances/31/");
            then.status(200).json_body(
                json!({"id": 31, "date": "2024-06-10", "status": "Absent", "employee": 1}),
            );
        });
        let api = ApiClient::new_with_base_url(server.base_url());
        let today = date(2024, 6, 15);
        let day = date(2024, 6, 10);

        let runtime = create_runtime();
        let (state, set_state) = use_attendance(EmployeeId(1), today);

        let created = save_attendance(&api, set_state, day, AttendanceStatus::Present, today)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(created.id, AttendanceId(31));

        let updated = save_attendance(&api, set_state, day, AttendanceStatus::Absent, today)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(updated.status, AttendanceStatus::Absent);

        let snapshot = state.get_untracked();
        assert_eq!(snapshot.records().len(), 1);
        assert_eq!(snapshot.records()[0].status, AttendanceStatus::Absent);
        assert!(!snapshot.is_saving(day));
        assert_eq!(server.hits(&POST, "/attendances/"), 1);
        assert_eq!(server.hits(&PUT, "/attendances/31/"), 1);
        runtime.dispose();
    }

    #[tokio::test]
    async fn rejected_save_leaves_records_unchanged() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(POST).path("/attendances/");
            then.status(400)
                .json_body(json!({"status": ["\"Late\" is not a valid choice."]}));
        });
        let api = ApiClient::new_with_base_url(server.base_url());
        let today = date(2024, 6, 15);

        let runtime = create_runtime();
        let (state, set_state) = use_attendance(EmployeeId(1), today);
        let err = save_attendance(
            &api,
            set_state,
            date(2024, 6, 10),
            AttendanceStatus::Present,
            today,
        )
        .await
        .unwrap_err();

        match err {
            UpsertError::Api(api_err) => assert!(!api_err.field_errors().is_empty()),
            other => panic!("unexpected error: {other:?}"),
        }
        let snapshot = state.get_untracked();
        assert!(snapshot.records().is_empty());
        assert!(!snapshot.is_saving(date(2024, 6, 10)));
        runtime.dispose();
    }

    #[test]
    fn save_refuses_future_day_before_any_request() {
        with_runtime(|| {
            let server = MockServer::start();
            let api = ApiClient::new_with_base_url(server.base_url());
            let today = date(2024, 6, 15);
            let (_state, set_state) = use_attendance(EmployeeId(1), today);
            let result = futures::executor::block_on(save_attendance(
                &api,
                set_state,
                date(2024, 6, 16),
                AttendanceStatus::Present,
                today,
            ));
            assert_eq!(result, Err(UpsertError::FutureDate(date(2024, 6, 16))));
            assert!(server.received().is_empty());
        });
    }
}
