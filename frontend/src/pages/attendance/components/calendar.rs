use crate::api::AttendanceStatus;
use crate::pages::attendance::{
    reconcile::{DayCell, DayCellState, Projection},
    utils::{leading_blank_cells, WEEKDAY_LABELS},
};
use chrono::{Datelike, NaiveDate};
use leptos::*;

#[component]
pub fn CalendarGrid(
    projection: Signal<Projection>,
    selected: Signal<Option<NaiveDate>>,
    on_select: Callback<NaiveDate>,
) -> impl IntoView {
    let blanks = move || leading_blank_cells(projection.with(|p| p.period));

    view! {
        <div class="border border-border rounded-xl overflow-hidden">
            <div class="grid grid-cols-7 bg-surface">
                {WEEKDAY_LABELS
                    .iter()
                    .map(|label| view! {
                        <div class="px-2 py-3 text-sm font-semibold text-fg-muted text-center border-b-2 border-border">
                            {*label}
                        </div>
                    })
                    .collect_view()}
            </div>
            <div class="grid grid-cols-7">
                {move || (0..blanks())
                    .map(|_| view! { <div class="min-h-20 bg-surface border-t border-l border-border"></div> })
                    .collect_view()}
                {move || projection
                    .get()
                    .cells
                    .into_iter()
                    .map(|cell| view! { <DayCellView cell=cell selected=selected on_select=on_select /> })
                    .collect_view()}
            </div>
        </div>
    }
}

#[component]
fn DayCellView(
    cell: DayCell,
    selected: Signal<Option<NaiveDate>>,
    on_select: Callback<NaiveDate>,
) -> impl IntoView {
    let date = cell.date;
    let state = cell.state();
    let class = move || {
        let base = "relative min-h-20 p-2 text-right border-t border-l border-border transition-all";
        let tone = match state {
            DayCellState::Disabled => "opacity-50 cursor-not-allowed bg-surface",
            DayCellState::Empty => "cursor-pointer hover:bg-action-ghost-bg-hover border-l-4 border-l-slate-300",
            DayCellState::Marked(AttendanceStatus::Present) => {
                "cursor-pointer bg-status-success-bg border-l-4 border-l-emerald-500"
            }
            DayCellState::Marked(AttendanceStatus::Absent) => {
                "cursor-pointer bg-status-error-bg border-l-4 border-l-rose-500"
            }
        };
        let ring = if selected.get() == Some(date) {
            " ring-2 ring-action-primary-bg"
        } else {
            ""
        };
        format!("{base} {tone}{ring}")
    };
    let badge = match state {
        DayCellState::Marked(status) => view! {
            <span class=match status {
                AttendanceStatus::Present => "text-xs font-semibold text-emerald-700",
                AttendanceStatus::Absent => "text-xs font-semibold text-rose-700",
            }>
                {status.short_label()}
            </span>
        }
        .into_view(),
        DayCellState::Empty => view! {
            <span class="absolute bottom-2 right-2 text-xs text-fg-muted" title="Editable">{"✎"}</span>
        }
        .into_view(),
        DayCellState::Disabled => ().into_view(),
    };
    let on_click = move |_| {
        if state != DayCellState::Disabled {
            on_select.call(date);
        }
    };

    view! {
        <div
            class=class
            data-date=date.format("%Y-%m-%d").to_string()
            data-state=match state {
                DayCellState::Disabled => "disabled",
                DayCellState::Empty => "empty",
                DayCellState::Marked(AttendanceStatus::Present) => "present",
                DayCellState::Marked(AttendanceStatus::Absent) => "absent",
            }
            aria-disabled=(state == DayCellState::Disabled).to_string()
            on:click=on_click
        >
            <div class="text-sm font-medium text-fg">{date.day()}</div>
            <div class="flex items-center justify-start px-1">{badge}</div>
        </div>
    }
}
