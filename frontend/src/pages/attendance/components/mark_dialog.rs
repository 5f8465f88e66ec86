use crate::api::{ApiError, AttendanceStatus};
use crate::components::error::InlineErrorMessage;
use chrono::NaiveDate;
use leptos::*;

/// Modal for marking the selected day. Hidden while `date` is `None`.
#[component]
pub fn MarkDialog(
    date: Signal<Option<NaiveDate>>,
    current: Signal<Option<AttendanceStatus>>,
    pending: Signal<bool>,
    error: Signal<Option<ApiError>>,
    on_mark: Callback<AttendanceStatus>,
    on_close: Callback<()>,
) -> impl IntoView {
    let title = move || {
        date.get()
            .map(|d| d.format("%A, %B %-d, %Y").to_string())
            .unwrap_or_default()
    };
    let current_label = move || match current.get() {
        Some(status) => format!("Current status: {}", status.label()),
        None => "No attendance marked for this day".to_string(),
    };
    let status_button = move |status: AttendanceStatus| {
        let tone = match status {
            AttendanceStatus::Present => "bg-emerald-600 hover:bg-emerald-700",
            AttendanceStatus::Absent => "bg-rose-600 hover:bg-rose-700",
        };
        view! {
            <button
                class=format!("flex-1 h-11 rounded-xl text-sm font-semibold text-white disabled:opacity-50 {tone}")
                disabled=move || pending.get() || current.get() == Some(status)
                on:click=move |_| on_mark.call(status)
            >
                {move || if pending.get() { "Saving...".to_string() } else { format!("Mark {}", status.label()) }}
            </button>
        }
    };

    view! {
        <Show when=move || date.get().is_some() fallback=|| ()>
            <div class="fixed inset-0 z-50 flex items-center justify-center bg-overlay-backdrop p-4">
                <div
                    class="w-full max-w-md rounded-2xl bg-surface-elevated shadow-2xl border border-border"
                    role="dialog"
                    aria-modal="true"
                >
                    <div class="flex items-start justify-between px-6 py-5 border-b border-border">
                        <div>
                            <h3 class="text-lg font-semibold text-fg">{"Mark Attendance"}</h3>
                            <p class="text-sm text-fg-muted">{title}</p>
                        </div>
                        <button
                            class="text-fg-muted hover:text-fg"
                            aria-label="Close"
                            on:click=move |_| on_close.call(())
                        >
                            {"✕"}
                        </button>
                    </div>
                    <div class="px-6 py-5 space-y-4">
                        <p class="text-sm text-fg-muted">{current_label}</p>
                        <InlineErrorMessage error=error />
                        <div class="flex gap-3">
                            {status_button(AttendanceStatus::Present)}
                            {status_button(AttendanceStatus::Absent)}
                        </div>
                        <button
                            class="w-full h-10 rounded-xl border-2 border-border text-sm text-fg hover:bg-action-ghost-bg-hover"
                            on:click=move |_| on_close.call(())
                        >
                            {"Cancel"}
                        </button>
                    </div>
                </div>
            </div>
        </Show>
    }
}
