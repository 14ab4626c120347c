use crate::api::ApiError;
use crate::components::{error::InlineErrorMessage, layout::SuccessMessage};
use leptos::*;

/// Outcome of the last user action on a page.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MessageState {
    pub success: Option<String>,
    pub error: Option<ApiError>,
}

impl MessageState {
    pub fn set_success(&mut self, msg: impl Into<String>) {
        self.success = Some(msg.into());
        self.error = None;
    }

    pub fn set_error(&mut self, err: ApiError) {
        self.error = Some(err);
        self.success = None;
    }

    pub fn clear(&mut self) {
        self.success = None;
        self.error = None;
    }
}

/// Applies a settled action result to `message`, returning whether it
/// succeeded.
pub fn apply_result<T>(
    result: Option<Result<T, ApiError>>,
    message: RwSignal<MessageState>,
    success: &str,
) -> bool {
    match result {
        Some(Ok(_)) => {
            message.update(|msg| msg.set_success(success));
            true
        }
        Some(Err(err)) => {
            log::error!("{} ({})", err.error, err.code);
            message.update(|msg| msg.set_error(err));
            false
        }
        None => false,
    }
}

#[component]
pub fn MessageBanner(message: RwSignal<MessageState>) -> impl IntoView {
    let error = Signal::derive(move || message.get().error);
    view! {
        {move || message.get().success.map(|text| view! { <SuccessMessage message=text /> })}
        <InlineErrorMessage error=error />
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod host_tests {
    use super::*;
    use crate::test_support::ssr::{render_to_string, with_runtime};

    #[test]
    fn apply_result_records_outcome() {
        with_runtime(|| {
            let message = create_rw_signal(MessageState::default());
            assert!(apply_result(Some(Ok::<_, ApiError>(())), message, "Saved."));
            assert_eq!(message.get().success.as_deref(), Some("Saved."));

            let failed: Option<Result<(), ApiError>> = Some(Err(ApiError::http(409, "Already closed")));
            assert!(!apply_result(failed, message, "Saved."));
            let state = message.get();
            assert!(state.success.is_none());
            assert_eq!(state.error.map(|e| e.error), Some("Already closed".to_string()));

            assert!(!apply_result(None::<Result<(), ApiError>>, message, "Saved."));
        });
    }

    #[test]
    fn banner_renders_success_and_error() {
        let html = render_to_string(|| {
            let message = create_rw_signal(MessageState::default());
            message.update(|m| m.set_success("Expense saved."));
            view! { <MessageBanner message=message /> }
        });
        assert!(html.contains("Expense saved."));

        let html = render_to_string(|| {
            let message = create_rw_signal(MessageState::default());
            message.update(|m| m.set_error(ApiError::forbidden("Not yours")));
            view! { <MessageBanner message=message /> }
        });
        assert!(html.contains("Not yours"));
    }
}
