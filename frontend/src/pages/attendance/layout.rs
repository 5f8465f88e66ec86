use crate::components::layout::Layout;
use leptos::*;

#[component]
pub fn AttendanceFrame(children: Children) -> impl IntoView {
    view! {
        <Layout>
            <div class="mb-6">
                <h2 class="text-2xl font-bold text-fg">{"Attendance Calendar"}</h2>
                <p class="mt-1 text-sm text-fg-muted">
                    {"Select a past or current day to mark it present or absent."}
                </p>
            </div>
            {children()}
        </Layout>
    }
}

/// Shown when `/employees/:id/attendance` carries an id that is not a positive integer.
#[component]
pub fn InvalidEmployeeMessage(raw: String) -> impl IntoView {
    view! {
        <div class="bg-surface-elevated shadow rounded-lg p-6 text-center">
            <p class="text-sm text-fg">{format!("\"{raw}\" is not a valid employee id.")}</p>
        </div>
    }
}
