use super::{
    components::{
        calendar::CalendarGrid,
        mark_dialog::MarkDialog,
        summary::{Legend, MonthlyOverview, ProfileHeader},
        toolbar::PeriodToolbar,
    },
    layout::{AttendanceFrame, InvalidEmployeeMessage},
    reconcile::Projection,
    view_model::use_attendance_view_model,
};
use crate::api::{ApiErrorKind, EmployeeId};
use crate::components::layout::{ErrorMessage, LoadingSpinner, SuccessMessage};
use crate::config;
use crate::utils::time::today_in_app_tz;
use leptos::*;
use leptos_router::use_params_map;

/// Routed at `/attendance` (configured default employee) and
/// `/employees/:id/attendance`.
#[component]
pub fn AttendancePage() -> impl IntoView {
    let params = use_params_map();
    let employee = create_memo(move |_| {
        params.with(|p| resolve_employee(p.get("id").map(String::as_str)))
    });

    view! {
        <AttendanceFrame>
            {move || match employee.get() {
                Ok(id) => view! { <AttendancePanel employee=id /> }.into_view(),
                Err(raw) => view! { <InvalidEmployeeMessage raw=raw /> }.into_view(),
            }}
        </AttendanceFrame>
    }
}

pub fn resolve_employee(raw: Option<&str>) -> Result<EmployeeId, String> {
    match raw {
        None => Ok(config::current().default_employee_id),
        Some(raw) => raw
            .trim()
            .parse::<i64>()
            .ok()
            .filter(|id| *id > 0)
            .map(EmployeeId)
            .ok_or_else(|| raw.to_string()),
    }
}

#[component]
pub fn AttendancePanel(employee: EmployeeId) -> impl IntoView {
    let vm = use_attendance_view_model(employee);
    let (state, _) = vm.state;

    let period = Signal::derive(move || state.with(|s| s.period()));
    let can_step_forward =
        Signal::derive(move || state.with(|s| s.selector().can_step_forward(today_in_app_tz())));
    let loading = Signal::derive(move || state.with(|s| s.loading));
    let load_error = Signal::derive(move || state.with(|s| s.last_error.clone()));

    let projection: Signal<Projection> = vm.projection.into();
    let stats = Signal::from(vm.stats);
    let profile_resource = vm.profile_resource;
    let profile = Signal::derive(move || profile_resource.get());

    let selected: Signal<Option<_>> = vm.selected_date.into();
    let current = Signal::derive(move || {
        let date = selected.get()?;
        projection.with(|p| p.cell(date).and_then(|cell| cell.record.as_ref().map(|r| r.status)))
    });
    let pending = Signal::from(vm.save_action.pending());
    let save_error = vm.save_error;
    let inline_error = Signal::derive(move || {
        save_error
            .get()
            .filter(|err| err.kind() == ApiErrorKind::Validation)
    });
    let banner_error = Signal::derive(move || {
        save_error
            .get()
            .filter(|err| err.kind() != ApiErrorKind::Validation)
    });
    let save_message = vm.save_message;

    view! {
        <div class="space-y-6">
            <ProfileHeader profile=profile stats=stats />
            <div class="p-6 bg-surface-elevated rounded-2xl border border-border shadow-sm">
                <PeriodToolbar
                    period=period
                    years=vm.year_options()
                    can_step_forward=can_step_forward
                    on_navigate=Callback::new(vm.on_navigate())
                />
                {move || load_error.get().map(|err| view! {
                    <ErrorMessage message=format!("Failed to load attendance: {}", err) />
                })}
                {move || banner_error.get().map(|err| view! {
                    <ErrorMessage message=format!("Failed to save attendance: {}", err) />
                })}
                {move || save_message.get().map(|message| view! { <SuccessMessage message=message /> })}
                <Show when=move || loading.get() fallback=|| ()>
                    <LoadingSpinner />
                </Show>
                <CalendarGrid
                    projection=projection
                    selected=selected
                    on_select=Callback::new(vm.on_select_day())
                />
                <div class="mt-4">
                    <Legend />
                </div>
            </div>
            <MonthlyOverview period=period stats=stats />
            <MarkDialog
                date=selected
                current=current
                pending=pending
                error=inline_error
                on_mark=Callback::new(vm.on_mark())
                on_close=Callback::new(vm.on_close_dialog())
            />
        </div>
    }
}
