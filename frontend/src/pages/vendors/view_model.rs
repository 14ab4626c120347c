use crate::api::{ApiClient, ApiError, Vendor, VendorPayload};
use crate::components::feedback::{apply_result, MessageState};
use crate::pages::vendors::{repository::VendorsRepository, utils::VendorFormState};
use crate::state::cache::use_caches;
use leptos::*;

#[derive(Clone, Copy)]
pub struct VendorsViewModel {
    pub form: VendorFormState,
    pub search_input: RwSignal<String>,
    pub search: RwSignal<String>,
    pub vendors: Resource<(String, u32), Result<Vec<Vendor>, ApiError>>,
    pub save_action: Action<(Option<String>, VendorPayload), Result<Vendor, ApiError>>,
    pub toggle_action: Action<String, Result<Vendor, ApiError>>,
    pub delete_action: Action<String, Result<(), ApiError>>,
    pub pending_delete: RwSignal<Option<Vendor>>,
    pub message: RwSignal<MessageState>,
    pub form_error: RwSignal<Option<ApiError>>,
}

impl VendorsViewModel {
    pub fn submit(&self) {
        match self.form.to_payload() {
            Ok(payload) => {
                self.form_error.set(None);
                self.save_action
                    .dispatch((self.form.editing_id.get_untracked(), payload));
            }
            Err(err) => self.form_error.set(Some(err)),
        }
    }

    pub fn apply_search(&self) {
        self.search.set(self.search_input.get_untracked().trim().to_string());
    }
}

pub fn use_vendors_view_model() -> VendorsViewModel {
    let api = use_context::<ApiClient>().unwrap_or_else(ApiClient::new);
    let repository = store_value(VendorsRepository::new(api, use_caches()));
    let form = VendorFormState::default();
    let search_input = create_rw_signal(String::new());
    let search = create_rw_signal(String::new());
    let reload = create_rw_signal(0u32);
    let message = create_rw_signal(MessageState::default());
    let form_error = create_rw_signal(None::<ApiError>);
    let pending_delete = create_rw_signal(None::<Vendor>);

    let vendors = create_resource(
        move || (search.get(), reload.get()),
        move |(term, _)| {
            let repo = repository.get_value();
            async move { repo.list(term).await }
        },
    );

    let save_action = create_action(move |input: &(Option<String>, VendorPayload)| {
        let repo = repository.get_value();
        let (id, payload) = input.clone();
        async move { repo.save(id.as_deref(), &payload).await }
    });
    let toggle_action = create_action(move |id: &String| {
        let repo = repository.get_value();
        let id = id.clone();
        async move { repo.toggle(&id).await }
    });
    let delete_action = create_action(move |id: &String| {
        let repo = repository.get_value();
        let id = id.clone();
        async move { repo.delete(&id).await }
    });

    let bump = move || reload.update(|value| *value = value.wrapping_add(1));
    create_effect(move |_| {
        let result = save_action.value().get();
        if let Some(Err(err)) = &result {
            form_error.set(Some(err.clone()));
        }
        if apply_result(result, message, "Vendor saved.") {
            form.reset();
            bump();
        }
    });
    create_effect(move |_| {
        if apply_result(toggle_action.value().get(), message, "Vendor status updated.") {
            bump();
        }
    });
    create_effect(move |_| {
        if apply_result(delete_action.value().get(), message, "Vendor deleted.") {
            bump();
        }
        pending_delete.set(None);
    });

    VendorsViewModel {
        form,
        search_input,
        search,
        vendors,
        save_action,
        toggle_action,
        delete_action,
        pending_delete,
        message,
        form_error,
    }
}
