use crate::api::{ApiClient, ApiError, UpdateProfileRequest, UserResponse};
use crate::components::feedback::{apply_result, MessageState};
use crate::pages::login::utils::MIN_PASSWORD_LEN;
use crate::pages::profile::repository::ProfileRepository;
use crate::state::auth::use_auth;
use leptos::*;
use std::rc::Rc;

#[derive(Clone, Copy, Default)]
pub struct ProfileFormState {
    pub name: RwSignal<String>,
    pub department: RwSignal<String>,
    pub current_password: RwSignal<String>,
    pub new_password: RwSignal<String>,
    pub confirm_password: RwSignal<String>,
}

impl ProfileFormState {
    pub fn load(&self, user: &UserResponse) {
        self.name.set(user.name.clone());
        self.department
            .set(user.department.clone().unwrap_or_default());
    }

    pub fn clear_passwords(&self) {
        self.current_password.set(String::new());
        self.new_password.set(String::new());
        self.confirm_password.set(String::new());
    }

    /// Only fields that differ from `current` are sent. A password change
    /// needs the current password and a confirmed new one.
    pub fn to_request(&self, current: &UserResponse) -> Result<UpdateProfileRequest, String> {
        let name = self.name.get_untracked().trim().to_string();
        if name.is_empty() {
            return Err("Please enter your name.".into());
        }
        let department = self.department.get_untracked().trim().to_string();
        let new_password = self.new_password.get_untracked();
        let current_password = self.current_password.get_untracked();

        let mut request = UpdateProfileRequest::default();
        if name != current.name {
            request.name = Some(name);
        }
        if department != current.department.clone().unwrap_or_default() {
            request.department = Some(department);
        }
        if !new_password.is_empty() {
            if current_password.is_empty() {
                return Err("Enter your current password to set a new one.".into());
            }
            if new_password.chars().count() < MIN_PASSWORD_LEN {
                return Err(format!(
                    "Passwords must be at least {} characters.",
                    MIN_PASSWORD_LEN
                ));
            }
            if new_password != self.confirm_password.get_untracked() {
                return Err("Passwords do not match.".into());
            }
            request.current_password = Some(current_password);
            request.new_password = Some(new_password);
        }
        if request.name.is_none()
            && request.department.is_none()
            && request.new_password.is_none()
        {
            return Err("Nothing to update.".into());
        }
        Ok(request)
    }
}

#[derive(Clone, Copy)]
pub struct ProfileViewModel {
    pub form: ProfileFormState,
    pub profile: Resource<(), Result<UserResponse, ApiError>>,
    pub save_action: Action<UpdateProfileRequest, Result<UserResponse, ApiError>>,
    pub message: RwSignal<MessageState>,
}

impl ProfileViewModel {
    pub fn submit(&self) -> bool {
        let (auth, _) = use_auth();
        let Some(current) = auth.get_untracked().user else {
            return false;
        };
        match self.form.to_request(&current) {
            Ok(request) => {
                self.message.update(MessageState::clear);
                self.save_action.dispatch(request);
                true
            }
            Err(msg) => {
                self.message
                    .update(|m| m.set_error(ApiError::validation(msg)));
                false
            }
        }
    }
}

pub fn use_profile_view_model() -> ProfileViewModel {
    let api = use_context::<ApiClient>().unwrap_or_else(ApiClient::new);
    let repository = store_value(ProfileRepository::new_with_client(Rc::new(api)));
    let (auth, set_auth) = use_auth();
    let form = ProfileFormState::default();
    if let Some(user) = auth.get_untracked().user {
        form.load(&user);
    }
    let message = create_rw_signal(MessageState::default());

    let profile = create_resource(
        || (),
        move |_| {
            let repo = repository.get_value();
            async move { repo.load().await }
        },
    );
    create_effect(move |_| {
        if let Some(Ok(user)) = profile.get() {
            form.load(&user);
            set_auth.update(|state| state.user = Some(user));
        }
    });

    let save_action = create_action(move |request: &UpdateProfileRequest| {
        let repo = repository.get_value();
        let request = request.clone();
        async move { repo.update(request).await }
    });
    create_effect(move |_| {
        let result = save_action.value().get();
        if let Some(Ok(user)) = &result {
            form.load(user);
            form.clear_passwords();
            set_auth.update(|state| state.user = Some(user.clone()));
        }
        apply_result(result, message, "Profile updated.");
    });

    ProfileViewModel {
        form,
        profile,
        save_action,
        message,
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod host_tests {
    use super::*;
    use crate::test_support::helpers::{provide_auth, regular_user};
    use crate::test_support::ssr::with_runtime;

    #[test]
    fn unchanged_form_has_nothing_to_send() {
        with_runtime(|| {
            let form = ProfileFormState::default();
            form.load(&regular_user());
            assert_eq!(form.to_request(&regular_user()).unwrap_err(), "Nothing to update.");
        });
    }

    #[test]
    fn only_changed_fields_are_sent() {
        with_runtime(|| {
            let form = ProfileFormState::default();
            form.load(&regular_user());
            form.department.set("Sales".into());
            let request = form.to_request(&regular_user()).unwrap();
            assert!(request.name.is_none());
            assert_eq!(request.department.as_deref(), Some("Sales"));
            assert!(request.new_password.is_none());
        });
    }

    #[test]
    fn password_change_requires_current_and_confirmation() {
        with_runtime(|| {
            let form = ProfileFormState::default();
            form.load(&regular_user());
            form.new_password.set("long-enough".into());
            assert!(form.to_request(&regular_user()).is_err());

            form.current_password.set("old-secret".into());
            form.confirm_password.set("different".into());
            assert_eq!(
                form.to_request(&regular_user()).unwrap_err(),
                "Passwords do not match."
            );

            form.confirm_password.set("long-enough".into());
            let request = form.to_request(&regular_user()).unwrap();
            assert_eq!(request.current_password.as_deref(), Some("old-secret"));
            assert_eq!(request.new_password.as_deref(), Some("long-enough"));
        });
    }

    #[test]
    fn view_model_prefills_from_signed_in_user() {
        with_runtime(|| {
            provide_auth(Some(regular_user()));
            let vm = use_profile_view_model();
            assert_eq!(vm.form.name.get(), "Riley Member");
        });
    }

    #[test]
    fn submit_reports_validation_without_dispatch() {
        with_runtime(|| {
            provide_auth(Some(regular_user()));
            let vm = use_profile_view_model();
            vm.form.name.set("   ".into());
            assert!(!vm.submit());
            assert_eq!(
                vm.message.get().error.map(|e| e.error).as_deref(),
                Some("Please enter your name.")
            );
        });
    }
}
