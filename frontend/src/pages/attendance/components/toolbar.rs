use crate::pages::attendance::{
    period::{Period, StepDirection},
    utils::MONTH_NAMES,
};
use crate::state::attendance::Navigation;
use leptos::*;

#[component]
pub fn PeriodToolbar(
    period: Signal<Period>,
    years: Vec<i32>,
    can_step_forward: Signal<bool>,
    on_navigate: Callback<Navigation>,
) -> impl IntoView {
    let on_month_change = move |ev: web_sys::Event| {
        if let Ok(month0) = event_target_value(&ev).parse::<u32>() {
            let year = period.get_untracked().year();
            on_navigate.call(Navigation::Select { year, month0 });
        }
    };
    let on_year_change = move |ev: web_sys::Event| {
        if let Ok(year) = event_target_value(&ev).parse::<i32>() {
            let month0 = period.get_untracked().month0();
            on_navigate.call(Navigation::Select { year, month0 });
        }
    };

    view! {
        <div class="flex flex-col sm:flex-row items-start sm:items-center justify-between gap-4 mb-6 pb-6 border-b border-border">
            <div class="flex items-center gap-3">
                <select
                    class="h-11 w-36 rounded-xl border-2 border-border bg-surface-elevated px-4 text-sm font-medium text-fg"
                    aria-label="Month"
                    on:change=on_month_change
                    prop:value=move || period.get().month0().to_string()
                >
                    {MONTH_NAMES
                        .iter()
                        .enumerate()
                        .map(|(idx, name)| {
                            let idx = idx as u32;
                            view! {
                                <option value=idx.to_string() selected=move || period.get().month0() == idx>
                                    {*name}
                                </option>
                            }
                        })
                        .collect_view()}
                </select>
                <select
                    class="h-11 w-28 rounded-xl border-2 border-border bg-surface-elevated px-4 text-sm font-medium text-fg"
                    aria-label="Year"
                    on:change=on_year_change
                    prop:value=move || period.get().year().to_string()
                >
                    {years
                        .into_iter()
                        .map(|year| {
                            view! {
                                <option value=year.to_string() selected=move || period.get().year() == year>
                                    {year}
                                </option>
                            }
                        })
                        .collect_view()}
                </select>
            </div>
            <div class="flex gap-2">
                <button
                    class="h-9 px-3.5 text-sm rounded-xl border-2 border-border text-fg hover:bg-action-ghost-bg-hover"
                    on:click=move |_| on_navigate.call(Navigation::Today)
                >
                    {"Today"}
                </button>
                <button
                    class="h-10 w-10 rounded-xl border-2 border-border text-fg hover:bg-action-ghost-bg-hover"
                    aria-label="Previous month"
                    on:click=move |_| on_navigate.call(Navigation::Step(StepDirection::Previous))
                >
                    {"‹"}
                </button>
                <button
                    class="h-10 w-10 rounded-xl border-2 border-border text-fg hover:bg-action-ghost-bg-hover disabled:opacity-40"
                    aria-label="Next month"
                    disabled=move || !can_step_forward.get()
                    on:click=move |_| on_navigate.call(Navigation::Step(StepDirection::Next))
                >
                    {"›"}
                </button>
            </div>
        </div>
    }
}
