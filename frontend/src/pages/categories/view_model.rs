use crate::api::{ApiClient, ApiError, Category, CategoryPayload, CategoryStatistics, CategoryUsage};
use crate::components::feedback::{apply_result, MessageState};
use crate::pages::categories::{repository::CategoriesRepository, utils::CategoryFormState};
use crate::state::cache::use_caches;
use leptos::*;

#[derive(Clone)]
pub struct SavePayload {
    pub id: Option<String>,
    pub payload: CategoryPayload,
}

#[derive(Clone, Copy)]
pub struct CategoriesViewModel {
    pub form: CategoryFormState,
    pub show_inactive: RwSignal<bool>,
    pub categories: Resource<(bool, u32), Result<Vec<Category>, ApiError>>,
    pub statistics: Resource<u32, Result<CategoryStatistics, ApiError>>,
    pub usage_for: RwSignal<Option<String>>,
    pub usage: Resource<Option<String>, Option<Result<CategoryUsage, ApiError>>>,
    pub save_action: Action<SavePayload, Result<Category, ApiError>>,
    pub toggle_action: Action<(String, bool), Result<Category, ApiError>>,
    pub delete_action: Action<String, Result<(), ApiError>>,
    pub pending_delete: RwSignal<Option<Category>>,
    pub message: RwSignal<MessageState>,
    pub form_error: RwSignal<Option<ApiError>>,
}

impl CategoriesViewModel {
    pub fn submit(&self) {
        match self.form.to_payload() {
            Ok(payload) => {
                self.form_error.set(None);
                self.save_action.dispatch(SavePayload {
                    id: self.form.editing_id.get_untracked(),
                    payload,
                });
            }
            Err(err) => self.form_error.set(Some(err)),
        }
    }
}

pub fn use_categories_view_model() -> CategoriesViewModel {
    let api = use_context::<ApiClient>().unwrap_or_else(ApiClient::new);
    let repository = store_value(CategoriesRepository::new(api, use_caches()));
    let form = CategoryFormState::default();
    let show_inactive = create_rw_signal(true);
    let reload = create_rw_signal(0u32);
    let message = create_rw_signal(MessageState::default());
    let form_error = create_rw_signal(None::<ApiError>);
    let usage_for = create_rw_signal(None::<String>);
    let pending_delete = create_rw_signal(None::<Category>);

    let categories = create_resource(
        move || (show_inactive.get(), reload.get()),
        move |(include_inactive, _)| {
            let repo = repository.get_value();
            async move { repo.list(include_inactive).await }
        },
    );
    let statistics = create_resource(
        move || reload.get(),
        move |_| {
            let repo = repository.get_value();
            async move { repo.statistics().await }
        },
    );
    let usage = create_resource(
        move || usage_for.get(),
        move |id| {
            let repo = repository.get_value();
            async move {
                match id {
                    Some(id) => Some(repo.usage(&id).await),
                    None => None,
                }
            }
        },
    );

    let save_action = create_action(move |input: &SavePayload| {
        let repo = repository.get_value();
        let input = input.clone();
        async move { repo.save(input.id.as_deref(), &input.payload).await }
    });
    let toggle_action = create_action(move |input: &(String, bool)| {
        let repo = repository.get_value();
        let (id, active) = input.clone();
        async move { repo.set_active(&id, active).await }
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
        if apply_result(result, message, "Category saved.") {
            form.reset();
            bump();
        }
    });
    create_effect(move |_| {
        if apply_result(toggle_action.value().get(), message, "Category status updated.") {
            bump();
        }
    });
    create_effect(move |_| {
        if apply_result(delete_action.value().get(), message, "Category deleted.") {
            bump();
        }
        pending_delete.set(None);
    });

    CategoriesViewModel {
        form,
        show_inactive,
        categories,
        statistics,
        usage_for,
        usage,
        save_action,
        toggle_action,
        delete_action,
        pending_delete,
        message,
        form_error,
    }
}
