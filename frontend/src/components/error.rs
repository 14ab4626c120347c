use crate::api::ApiError;
use leptos::*;

#[component]
pub fn InlineErrorMessage(error: Signal<Option<ApiError>>) -> impl IntoView {
    view! {
        <Show when=move || error.get().is_some() fallback=|| ()>
            <div
                class="bg-status-error-bg border border-status-error-border text-status-error-text px-4 py-3 rounded space-y-1 my-2"
                role="alert"
            >
                <div class="font-bold">{move || error.get().map(|e| e.error).unwrap_or_default()}</div>
                {move || error.get().map(|e| {
                    let fields = e.field_errors();
                    if !fields.is_empty() {
                        return view! {
                            <ul class="list-disc list-inside text-sm">
                                {fields.into_iter().map(|(field, message)| {
                                    view! { <li><span class="font-medium">{field}</span>": "{message}</li> }
                                }).collect_view()}
                            </ul>
                        }.into_view();
                    }
                    if e.code != "UNKNOWN_ERROR" && !e.code.is_empty() {
                        view! { <div class="text-xs opacity-75">{"Code: "}{e.code.clone()}</div> }.into_view()
                    } else {
                        ().into_view()
                    }
                }).unwrap_or_else(|| ().into_view())}
            </div>
        </Show>
    }
}

/// Message for a single form field, taken from a validation failure.
#[component]
pub fn FieldError(error: Signal<Option<ApiError>>, field: &'static str) -> impl IntoView {
    let message = move || error.get().and_then(|e| e.field_error(field));
    move || message().map(|msg| view! { <p class="mt-1 text-xs text-status-error-text">{msg}</p> })
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod host_tests {
    use super::*;
    use crate::test_support::ssr::render_to_string;
    use serde_json::json;

    #[test]
    fn inline_error_renders_field_details() {
        let html = render_to_string(move || {
            let error = ApiError::validation("Validation failed").with_details(json!({
                "fields": { "amount": "must be positive", "vendorId": "is required" }
            }));
            let signal = create_rw_signal(Some(error));
            view! { <InlineErrorMessage error={signal.into()} /> }
        });
        assert!(html.contains("Validation failed"));
        assert!(html.contains("must be positive"));
        assert!(html.contains("is required"));
    }

    #[test]
    fn inline_error_renders_code_when_present() {
        let html = render_to_string(move || {
            let signal = create_rw_signal(Some(ApiError::forbidden("Accountants only")));
            view! { <InlineErrorMessage error={signal.into()} /> }
        });
        assert!(html.contains("Accountants only"));
        assert!(html.contains("Code: FORBIDDEN"));
    }

    #[test]
    fn inline_error_hidden_without_error() {
        let html = render_to_string(move || {
            let signal = create_rw_signal(None::<ApiError>);
            view! { <InlineErrorMessage error={signal.into()} /> }
        });
        assert!(!html.contains("role=\"alert\""));
    }

    #[test]
    fn field_error_shows_only_its_field() {
        let html = render_to_string(move || {
            let error = ApiError::validation("bad").with_details(json!({
                "fields": { "amount": "must be positive" }
            }));
            let signal = create_rw_signal(Some(error));
            view! {
                <div>
                    <FieldError error={signal.into()} field="amount" />
                    <FieldError error={signal.into()} field="currency" />
                </div>
            }
        });
        assert_eq!(html.matches("must be positive").count(), 1);
    }
}
