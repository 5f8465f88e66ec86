use leptos::*;

#[component]
pub fn SearchBar(value: Signal<String>, on_input: Callback<String>) -> impl IntoView {
    view! {
        <div class="mb-4">
            <input
                type="search"
                class="w-full md:w-80 h-10 px-3 rounded-xl border border-border bg-surface text-sm text-fg"
                placeholder="Search by ID, name, email or department"
                aria-label="Search employees"
                prop:value=move || value.get()
                on:input=move |ev| on_input.call(event_target_value(&ev))
            />
        </div>
    }
}
