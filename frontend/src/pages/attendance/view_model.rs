use crate::api::{ApiClient, ApiError, AttendanceRecord, AttendanceStatus, EmployeeId};
use crate::pages::attendance::{
    period::PeriodSelector,
    reconcile::Projection,
    repository::{self, EmployeeProfile},
    upsert::UpsertError,
    utils::AttendanceStats,
};
use crate::state::attendance::{
    load_month, save_attendance, use_attendance, AttendanceState, Navigation,
};
use crate::utils::time::{reference_now, today_in_app_tz};
use chrono::NaiveDate;
use leptos::*;
use log::debug;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MarkRequest {
    pub date: NaiveDate,
    pub status: AttendanceStatus,
}

#[derive(Clone)]
pub struct AttendanceViewModel {
    pub api: ApiClient,
    pub employee: EmployeeId,
    pub state: (ReadSignal<AttendanceState>, WriteSignal<AttendanceState>),
    pub projection: Memo<Projection>,
    pub stats: Memo<AttendanceStats>,
    pub profile_resource: Resource<EmployeeId, Result<EmployeeProfile, ApiError>>,
    pub selected_date: RwSignal<Option<NaiveDate>>,
    pub save_action: Action<MarkRequest, Result<Option<AttendanceRecord>, UpsertError>>,
    pub save_error: RwSignal<Option<ApiError>>,
    pub save_message: RwSignal<Option<String>>,
}

impl AttendanceViewModel {
    pub fn new(employee: EmployeeId) -> Self {
        let api = use_context::<ApiClient>().unwrap_or_default();
        let (state, set_state) = use_attendance(employee, today_in_app_tz());

        let projection = create_memo(move |_| state.with(|s| s.projection(reference_now())));
        let stats = create_memo(move |_| state.with(|s| s.stats()));

        let api_for_profile = api.clone();
        let profile_resource = create_resource(
            move || employee,
            move |employee| {
                let api = api_for_profile.clone();
                async move { repository::fetch_employee_profile(&api, employee).await }
            },
        );

        let api_for_save = api.clone();
        let save_action = create_action(move |request: &MarkRequest| {
            let api = api_for_save.clone();
            let request = *request;
            async move {
                let result = save_attendance(
                    &api,
                    set_state,
                    request.date,
                    request.status,
                    today_in_app_tz(),
                )
                .await;
                if matches!(result, Ok(Some(_))) {
                    let _ = load_month(&api, set_state).await;
                }
                result
            }
        });

        let selected_date = create_rw_signal(None);
        let save_error = create_rw_signal(None);
        let save_message = create_rw_signal(None);

        create_effect(move |_| {
            if let Some(result) = save_action.value().get() {
                match result {
                    Ok(Some(saved)) => {
                        save_error.set(None);
                        save_message.set(Some(format!(
                            "Marked {} as {}.",
                            saved.date.format("%B %-d, %Y"),
                            saved.status.label()
                        )));
                        selected_date.set(None);
                    }
                    Ok(None) => {}
                    Err(UpsertError::Api(err)) => save_error.set(Some(err)),
                    Err(other) => save_error.set(Some(ApiError::unknown(other.to_string()))),
                }
            }
        });

        let vm = Self {
            api,
            employee,
            state: (state, set_state),
            projection,
            stats,
            profile_resource,
            selected_date,
            save_action,
            save_error,
            save_message,
        };
        vm.refresh();
        vm
    }

    pub fn refresh(&self) {
        let api = self.api.clone();
        let set_state = self.state.1;
        spawn_local(async move {
            // Failures are kept on the state and rendered from there.
            let _ = load_month(&api, set_state).await;
        });
    }

    pub fn on_navigate(&self) -> impl Fn(Navigation) + Clone + 'static {
        let vm = self.clone();
        move |nav| {
            let today = today_in_app_tz();
            let moved = vm
                .state
                .1
                .try_update(|state| state.navigate(nav, today))
                .map(|result| result.map_err(|err| debug!("Navigation refused: {}", err)));
            if let Some(Ok(_)) = moved {
                vm.selected_date.set(None);
                vm.save_message.set(None);
                vm.refresh();
            }
        }
    }

    pub fn on_select_day(&self) -> impl Fn(NaiveDate) + Clone + 'static {
        let selected_date = self.selected_date;
        let save_error = self.save_error;
        let save_message = self.save_message;
        move |date| {
            if date > today_in_app_tz() {
                return;
            }
            save_error.set(None);
            save_message.set(None);
            selected_date.set(Some(date));
        }
    }

    pub fn on_mark(&self) -> impl Fn(AttendanceStatus) + Clone + 'static {
        let selected_date = self.selected_date;
        let save_action = self.save_action;
        let save_error = self.save_error;
        move |status| {
            if let Some(date) = selected_date.get_untracked() {
                save_error.set(None);
                save_action.dispatch(MarkRequest { date, status });
            }
        }
    }

    pub fn on_close_dialog(&self) -> impl Fn(()) + Clone + 'static {
        let selected_date = self.selected_date;
        let save_error = self.save_error;
        move |_| {
            save_error.set(None);
            selected_date.set(None);
        }
    }

    pub fn year_options(&self) -> Vec<i32> {
        PeriodSelector::year_options(today_in_app_tz())
    }
}

pub fn use_attendance_view_model(employee: EmployeeId) -> AttendanceViewModel {
    match use_context::<AttendanceViewModel>() {
        Some(vm) if vm.employee == employee => vm,
        _ => {
            let vm = AttendanceViewModel::new(employee);
            provide_context(vm.clone());
            vm
        }
    }
}
