use super::{
    components::{search::SearchBar, table::EmployeeTable},
    query::{DirectoryQuery, OrderField},
    repository::{self, DirectoryRow},
};
use crate::api::ApiClient;
use crate::components::layout::{ErrorMessage, Layout, LoadingSpinner};
use leptos::*;

/// Routed at `/employees`.
#[component]
pub fn EmployeeDirectoryPage() -> impl IntoView {
    let api = use_context::<ApiClient>().unwrap_or_default();
    let query = create_rw_signal(DirectoryQuery::default());
    let directory = create_resource(
        move || query.get(),
        move |query| {
            let api = api.clone();
            async move { repository::fetch_directory(&api, &query).await }
        },
    );

    let search = Signal::derive(move || query.with(|q| q.search.clone()));
    let on_search = Callback::new(move |value: String| query.update(|q| q.search = value));
    let on_sort = Callback::new(move |field: OrderField| query.update(|q| q.toggle_sort(field)));

    view! {
        <Layout>
            <div class="mb-6">
                <h2 class="text-2xl font-bold text-fg">{"Employees"}</h2>
                <p class="mt-1 text-sm text-fg-muted">
                    {"Open an employee to review and mark their attendance."}
                </p>
            </div>
            <div class="p-6 bg-surface-elevated rounded-2xl border border-border shadow-sm">
                <SearchBar value=search on_input=on_search />
                <Transition fallback=|| view! { <LoadingSpinner /> }>
                    {move || directory.get().map(|result| match result {
                        Ok(rows) => {
                            let rows: Signal<Vec<DirectoryRow>> = Signal::derive(move || rows.clone());
                            view! { <EmployeeTable rows=rows query=query.into() on_sort=on_sort /> }
                                .into_view()
                        }
                        Err(err) => view! {
                            <ErrorMessage message=format!("Failed to load employees: {}", err) />
                        }
                        .into_view(),
                    })}
                </Transition>
            </div>
        </Layout>
    }
}
