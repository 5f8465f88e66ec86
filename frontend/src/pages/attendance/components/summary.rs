use crate::api::{ApiError, AttendanceStatus};
use crate::components::layout::{ErrorMessage, LoadingSpinner};
use crate::pages::attendance::{period::Period, repository::EmployeeProfile, utils::AttendanceStats};
use leptos::*;

#[component]
pub fn ProfileHeader(
    profile: Signal<Option<Result<EmployeeProfile, ApiError>>>,
    stats: Signal<AttendanceStats>,
) -> impl IntoView {
    view! {
        <div class="flex flex-col md:flex-row md:items-center md:justify-between gap-6 p-6 bg-surface-elevated rounded-2xl border border-border shadow-sm">
            <div>
                {move || match profile.get() {
                    None => view! { <LoadingSpinner /> }.into_view(),
                    Some(Err(err)) => view! { <ErrorMessage message=err.error /> }.into_view(),
                    Some(Ok(profile)) => {
                        let department = profile
                            .department
                            .map(|d| d.name)
                            .unwrap_or_else(|| "Unassigned".to_string());
                        view! {
                            <h1 class="text-2xl font-bold text-fg">{profile.employee.full_name}</h1>
                            <p class="text-sm text-fg-muted">
                                {profile.employee.emp_id}{" · "}{profile.employee.email}
                            </p>
                            <span class="inline-block mt-2 px-3 py-1 rounded-full bg-surface text-xs font-medium text-fg">
                                {department}
                            </span>
                        }
                        .into_view()
                    }
                }}
            </div>
            <div class="grid grid-cols-3 gap-4 text-center">
                <StatTile label="Present" value=Signal::derive(move || stats.get().present.to_string()) />
                <StatTile label="Absent" value=Signal::derive(move || stats.get().absent.to_string()) />
                <StatTile label="Rate" value=Signal::derive(move || format!("{}%", stats.get().rate_percent())) />
            </div>
        </div>
    }
}

#[component]
fn StatTile(label: &'static str, value: Signal<String>) -> impl IntoView {
    view! {
        <div class="px-4 py-3 rounded-xl bg-surface">
            <div class="text-xl font-bold text-fg">{value}</div>
            <div class="text-xs uppercase tracking-wide text-fg-muted">{label}</div>
        </div>
    }
}

#[component]
pub fn Legend() -> impl IntoView {
    let entries = [
        ("bg-emerald-500", AttendanceStatus::Present.label()),
        ("bg-rose-500", AttendanceStatus::Absent.label()),
        ("bg-slate-300", "Not marked"),
        ("bg-slate-200 opacity-50", "Future"),
    ];
    view! {
        <div class="flex flex-wrap gap-4 text-sm text-fg-muted">
            {entries
                .into_iter()
                .map(|(swatch, label)| view! {
                    <div class="flex items-center gap-2">
                        <span class=format!("inline-block w-3 h-3 rounded {swatch}")></span>
                        <span>{label}</span>
                    </div>
                })
                .collect_view()}
        </div>
    }
}

/// Totals for the visible month with a present-rate bar.
#[component]
pub fn MonthlyOverview(period: Signal<Period>, stats: Signal<AttendanceStats>) -> impl IntoView {
    let rate = move || stats.get().rate_percent();
    view! {
        <div class="p-6 bg-surface-elevated rounded-2xl border border-border space-y-4">
            <h2 class="text-lg font-semibold text-fg">
                {move || format!("Monthly Overview: {}", period.get())}
            </h2>
            <div class="flex justify-between text-sm text-fg-muted">
                <span>{move || format!("{} days marked", stats.get().total())}</span>
                <span>{move || format!("{}% present", rate())}</span>
            </div>
            <div class="h-2 w-full rounded-full bg-surface overflow-hidden">
                <div
                    class="h-full bg-emerald-500 transition-all"
                    style=move || format!("width: {}%", rate())
                ></div>
            </div>
        </div>
    }
}
