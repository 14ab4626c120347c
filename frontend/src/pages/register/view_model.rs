use crate::api::{ApiError, RegisterRequest};
use crate::pages::login::utils;
use crate::state::auth;
use leptos::*;

#[derive(Clone, Copy, Default)]
pub struct RegisterFormState {
    pub name: RwSignal<String>,
    pub email: RwSignal<String>,
    pub password: RwSignal<String>,
    pub confirm: RwSignal<String>,
}

impl RegisterFormState {
    pub fn to_request(&self) -> Result<RegisterRequest, String> {
        let name = self.name.get_untracked();
        let email = self.email.get_untracked();
        let password = self.password.get_untracked();
        utils::validate_registration(&name, &email, &password, &self.confirm.get_untracked())?;
        Ok(RegisterRequest {
            name: name.trim().to_string(),
            email: email.trim().to_string(),
            password,
        })
    }
}

#[derive(Clone, Copy)]
pub struct RegisterViewModel {
    pub form: RegisterFormState,
    pub error: RwSignal<Option<ApiError>>,
    pub register_action: Action<RegisterRequest, Result<(), ApiError>>,
}

impl RegisterViewModel {
    pub fn submit(&self) -> bool {
        if self.register_action.pending().get_untracked() {
            return false;
        }
        match self.form.to_request() {
            Ok(request) => {
                self.error.set(None);
                self.register_action.dispatch(request);
                true
            }
            Err(msg) => {
                self.error.set(Some(ApiError::validation(msg)));
                false
            }
        }
    }
}

pub fn use_register_view_model() -> RegisterViewModel {
    let form = RegisterFormState::default();
    let error = create_rw_signal(None::<ApiError>);
    let register_action = auth::use_register_action();

    create_effect(move |_| {
        if let Some(result) = register_action.value().get() {
            match result {
                Ok(_) => {
                    if let Some(window) = web_sys::window() {
                        let _ = window.location().set_href("/dashboard");
                    }
                }
                Err(err) => error.set(Some(err)),
            }
        }
    });

    RegisterViewModel {
        form,
        error,
        register_action,
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod host_tests {
    use super::*;
    use crate::test_support::ssr::with_runtime;

    #[test]
    fn mismatched_passwords_are_rejected_locally() {
        with_runtime(|| {
            let vm = use_register_view_model();
            vm.form.name.set("Dana".into());
            vm.form.email.set("dana@example.com".into());
            vm.form.password.set("password-one".into());
            vm.form.confirm.set("password-two".into());
            assert!(!vm.submit());
            assert_eq!(
                vm.error.get().map(|e| e.error),
                Some("Passwords do not match.".to_string())
            );
        });
    }

    #[test]
    fn request_trims_name_and_email() {
        with_runtime(|| {
            let form = RegisterFormState::default();
            form.name.set("  Dana ".into());
            form.email.set(" dana@example.com ".into());
            form.password.set("password-one".into());
            form.confirm.set("password-one".into());
            let request = form.to_request().unwrap();
            assert_eq!(request.name, "Dana");
            assert_eq!(request.email, "dana@example.com");
        });
    }
}
