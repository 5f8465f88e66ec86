use crate::pages::employees::{
    query::{DirectoryQuery, OrderField, SortDirection},
    repository::DirectoryRow,
};
use crate::router::employee_attendance_href;
use leptos::*;

#[component]
pub fn EmployeeTable(
    rows: Signal<Vec<DirectoryRow>>,
    query: Signal<DirectoryQuery>,
    on_sort: Callback<OrderField>,
) -> impl IntoView {
    let header = move |field: OrderField| {
        let marker = move || match query.with(|q| q.direction_of(field)) {
            Some(SortDirection::Ascending) => " ▲",
            Some(SortDirection::Descending) => " ▼",
            None => "",
        };
        view! {
            <th class="px-4 py-3 text-left text-xs font-medium uppercase tracking-wide text-fg-muted">
                <button class="hover:text-fg" on:click=move |_| on_sort.call(field)>
                    {field.label()}{marker}
                </button>
            </th>
        }
    };
    let empty_message = move || {
        if query.with(|q| q.search.trim().is_empty()) {
            "No employees found."
        } else {
            "No employees found matching your search."
        }
    };

    view! {
        <Show
            when=move || rows.with(|r| !r.is_empty())
            fallback=move || view! {
                <p class="py-8 text-center text-sm text-fg-muted">{empty_message}</p>
            }
        >
            <div class="overflow-x-auto">
                <table class="min-w-full divide-y divide-border">
                    <thead>
                        <tr>
                            {OrderField::ALL.into_iter().map(header).collect_view()}
                            <th class="px-4 py-3"></th>
                        </tr>
                    </thead>
                    <tbody class="divide-y divide-border">
                        <For
                            each=move || rows.get()
                            key=|row| row.id
                            children=|row| view! {
                                <tr>
                                    <td class="px-4 py-3 text-sm font-mono text-fg">{row.emp_id}</td>
                                    <td class="px-4 py-3 text-sm text-fg">{row.full_name}</td>
                                    <td class="px-4 py-3 text-sm text-fg-muted">{row.email}</td>
                                    <td class="px-4 py-3 text-sm text-fg-muted">{row.department}</td>
                                    <td class="px-4 py-3 text-right">
                                        <a
                                            href=employee_attendance_href(row.id)
                                            class="text-sm font-medium text-action-primary-bg hover:underline"
                                        >
                                            {"Attendance"}
                                        </a>
                                    </td>
                                </tr>
                            }
                        />
                    </tbody>
                </table>
            </div>
        </Show>
    }
}
