use crate::api::{ApiError, ApiErrorKind};
use leptos::*;

/// Renders an API failure. Validation failures list their field messages so a
/// form can show them next to the action that caused them.
#[component]
pub fn InlineErrorMessage(error: Signal<Option<ApiError>>) -> impl IntoView {
    view! {
        <Show when=move || error.get().is_some() fallback=|| ()>
            <div class="bg-status-error-bg border border-status-error-border text-status-error-text px-4 py-3 rounded space-y-1 my-2">
                {move || error.get().map(|e| {
                    if e.kind() == ApiErrorKind::Validation {
                        let fields = e.field_errors();
                        if !fields.is_empty() {
                            return view! {
                                <div class="font-bold">{"Please correct the following:"}</div>
                                <ul class="list-disc list-inside text-sm">
                                    {fields.into_iter().flat_map(|(field, messages)| {
                                        messages.into_iter().map(move |message| {
                                            let label = if field == "non_field_errors" {
                                                message
                                            } else {
                                                format!("{field}: {message}")
                                            };
                                            view! { <li>{label}</li> }
                                        })
                                    }).collect_view()}
                                </ul>
                            }.into_view();
                        }
                    }
                    let code = e.code.clone();
                    let show_code = code != "UNKNOWN" && !code.is_empty();
                    view! {
                        <div class="font-bold">{e.error.clone()}</div>
                        {show_code.then(|| view! {
                            <div class="text-xs opacity-75">{"Code: "}{code}</div>
                        })}
                    }.into_view()
                }).unwrap_or_else(|| ().into_view())}
            </div>
        </Show>
    }
}
