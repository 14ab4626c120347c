use crate::api::{
    ApiClient, ApiError, Category, ConversionResult, Expense, ExpensePayload, ExpenseStatus,
    FileMetadata, Paginated, Role, StatusHistoryEntry, Vendor,
};
use crate::components::feedback::{apply_result, MessageState};
use crate::pages::expenses::{
    repository::ExpensesRepository,
    utils::{ExpenseFilterState, ExpenseFormState},
};
use crate::state::{auth::use_auth, cache::use_caches};
use crate::workflow::TransitionDraft;
use leptos::*;

fn use_repository() -> StoredValue<ExpensesRepository> {
    let api = use_context::<ApiClient>().unwrap_or_else(ApiClient::new);
    store_value(ExpensesRepository::new(api, use_caches()))
}

fn navigate_to(path: &str) {
    if let Some(window) = web_sys::window() {
        let _ = window.location().set_href(path);
    }
}

#[derive(Clone, Copy)]
pub struct ReferenceOptions {
    pub categories: Resource<(), Result<Vec<Category>, ApiError>>,
    pub vendors: Resource<(), Result<Vec<Vendor>, ApiError>>,
}

impl ReferenceOptions {
    fn new(repository: StoredValue<ExpensesRepository>) -> Self {
        let categories = create_resource(
            || (),
            move |_| {
                let repo = repository.get_value();
                async move { repo.category_options().await }
            },
        );
        let vendors = create_resource(
            || (),
            move |_| {
                let repo = repository.get_value();
                async move { repo.vendor_options().await }
            },
        );
        Self {
            categories,
            vendors,
        }
    }

    pub fn category_list(&self) -> Vec<Category> {
        self.categories
            .get()
            .and_then(Result::ok)
            .unwrap_or_default()
    }

    pub fn vendor_list(&self) -> Vec<Vendor> {
        self.vendors.get().and_then(Result::ok).unwrap_or_default()
    }
}

#[derive(Clone, Copy)]
pub struct ExpenseListViewModel {
    pub filter: ExpenseFilterState,
    pub expenses: Resource<crate::api::ExpenseQuery, Result<Paginated<Expense>, ApiError>>,
    pub options: ReferenceOptions,
}

pub fn use_expense_list_view_model(initial_status: Option<ExpenseStatus>) -> ExpenseListViewModel {
    let repository = use_repository();
    let filter = ExpenseFilterState::default();
    if let Some(status) = initial_status {
        filter.status.set(status.as_str().to_string());
    }

    let expenses = create_resource(
        move || filter.query(),
        move |query| {
            let repo = repository.get_value();
            async move { repo.list(&query).await }
        },
    );

    ExpenseListViewModel {
        filter,
        expenses,
        options: ReferenceOptions::new(repository),
    }
}

#[derive(Clone, Copy)]
pub struct ExpenseDetailViewModel {
    pub id: StoredValue<String>,
    pub loaded: Resource<(String, u32), Result<Expense, ApiError>>,
    pub confirmed: RwSignal<Option<Expense>>,
    pub history: Resource<(String, u32), Result<Vec<StatusHistoryEntry>, ApiError>>,
    pub receipt: Resource<Option<String>, Option<Result<FileMetadata, ApiError>>>,
    pub role: Signal<Option<Role>>,
    pub selected_target: RwSignal<Option<ExpenseStatus>>,
    pub transition_notes: RwSignal<String>,
    pub approval_notes: RwSignal<String>,
    pub transition_action: Action<TransitionDraft, Result<Expense, ApiError>>,
    pub transition_error: RwSignal<Option<ApiError>>,
    pub delete_action: Action<(), Result<(), ApiError>>,
    pub confirm_delete: RwSignal<bool>,
    pub message: RwSignal<MessageState>,
    pub reload: RwSignal<u32>,
}

/// Applies a settled status change. Success shows the record the backend
/// returned; failure keeps the displayed record and surfaces the error.
pub fn apply_transition_result(
    result: Result<Expense, ApiError>,
    confirmed: RwSignal<Option<Expense>>,
    transition_error: RwSignal<Option<ApiError>>,
    message: RwSignal<MessageState>,
) {
    match result {
        Ok(expense) => {
            let label = expense.status.label();
            confirmed.set(Some(expense));
            transition_error.set(None);
            message.update(|msg| msg.set_success(format!("Status is now {}.", label)));
        }
        Err(err) => {
            message.update(|msg| msg.clear());
            transition_error.set(Some(err));
        }
    }
}

impl ExpenseDetailViewModel {
    /// The record to render: the latest confirmed transition result, else the
    /// loaded record.
    pub fn expense(&self) -> Option<Expense> {
        self.confirmed
            .get()
            .or_else(|| self.loaded.get().and_then(Result::ok))
    }

    /// Status shown to the user. While a change is in flight it reads as the
    /// requested status.
    pub fn displayed_status(&self) -> Option<ExpenseStatus> {
        if self.transition_action.pending().get() {
            if let Some(draft) = self.transition_action.input().get() {
                return Some(draft.target);
            }
        }
        self.expense().map(|e| e.status)
    }

    /// Fetches the record and its history again after a failed load.
    pub fn retry_load(&self) {
        self.transition_error.set(None);
        self.reload.update(|n| *n += 1);
    }

    pub fn submit_transition(&self, draft: TransitionDraft) {
        if self.transition_action.pending().get_untracked() {
            return;
        }
        if let Err(rejection) = draft.validate() {
            self.transition_error
                .set(Some(ApiError::validation(rejection.message())));
            return;
        }
        self.transition_error.set(None);
        self.transition_action.dispatch(draft);
    }
}

pub fn use_expense_detail_view_model(id: String) -> ExpenseDetailViewModel {
    let repository = use_repository();
    let (auth, _) = use_auth();
    let id = store_value(id);
    let reload = create_rw_signal(0u32);

    let loaded = create_resource(
        move || (id.get_value(), reload.get()),
        move |(id, _)| {
            let repo = repository.get_value();
            async move { repo.get(&id).await }
        },
    );
    let history = create_resource(
        move || (id.get_value(), reload.get()),
        move |(id, _)| {
            let repo = repository.get_value();
            async move { repo.history(&id).await }
        },
    );
    let confirmed = create_rw_signal(None::<Expense>);

    let receipt = create_resource(
        move || {
            confirmed
                .get()
                .or_else(|| loaded.get().and_then(Result::ok))
                .and_then(|e| e.file_id)
        },
        move |file_id| {
            let repo = repository.get_value();
            async move {
                match file_id {
                    Some(file_id) => Some(repo.receipt(&file_id).await),
                    None => None,
                }
            }
        },
    );

    let transition_action = create_action(move |draft: &TransitionDraft| {
        let repo = repository.get_value();
        let draft = draft.clone();
        let id = id.get_value();
        async move { repo.transition(&id, &draft).await }
    });
    let delete_action = create_action(move |_: &()| {
        let repo = repository.get_value();
        let id = id.get_value();
        async move { repo.delete(&id).await }
    });

    let transition_error = create_rw_signal(None::<ApiError>);
    let message = create_rw_signal(MessageState::default());
    let selected_target = create_rw_signal(None::<ExpenseStatus>);
    let transition_notes = create_rw_signal(String::new());
    let approval_notes = create_rw_signal(String::new());
    let confirm_delete = create_rw_signal(false);

    create_effect(move |_| {
        if let Some(result) = transition_action.value().get() {
            let succeeded = result.is_ok();
            apply_transition_result(result, confirmed, transition_error, message);
            if succeeded {
                selected_target.set(None);
                transition_notes.set(String::new());
                approval_notes.set(String::new());
                history.refetch();
            }
        }
    });

    create_effect(move |_| {
        if apply_result(delete_action.value().get(), message, "Expense deleted.") {
            navigate_to("/expenses");
        }
        confirm_delete.set(false);
    });

    ExpenseDetailViewModel {
        id,
        loaded,
        confirmed,
        history,
        receipt,
        role: Signal::derive(move || auth.get().role()),
        selected_target,
        transition_notes,
        approval_notes,
        transition_action,
        transition_error,
        delete_action,
        confirm_delete,
        message,
        reload,
    }
}

#[derive(Clone, Copy)]
pub struct ExpenseFormViewModel {
    pub editing_id: StoredValue<Option<String>>,
    pub form: ExpenseFormState,
    pub options: ReferenceOptions,
    pub existing: Resource<Option<String>, Option<Result<Expense, ApiError>>>,
    pub save_action: Action<ExpensePayload, Result<Expense, ApiError>>,
    pub upload_action: Action<(Vec<u8>, String, String), Result<FileMetadata, ApiError>>,
    pub remove_receipt_action: Action<String, Result<(), ApiError>>,
    pub convert_target: RwSignal<String>,
    pub convert_action: Action<(f64, String, String), Result<ConversionResult, ApiError>>,
    pub error: RwSignal<Option<ApiError>>,
    pub message: RwSignal<MessageState>,
}

impl ExpenseFormViewModel {
    pub fn is_edit(&self) -> bool {
        self.editing_id.with_value(Option::is_some)
    }

    pub fn submit(&self) -> bool {
        if self.save_action.pending().get_untracked() {
            return false;
        }
        match self.form.to_payload() {
            Ok(payload) => {
                self.error.set(None);
                self.save_action.dispatch(payload);
                true
            }
            Err(err) => {
                self.error.set(Some(err));
                false
            }
        }
    }

    pub fn request_conversion(&self) {
        let amount = self.form.amount.get_untracked().trim().replace(',', ".");
        let from = self.form.currency.get_untracked().trim().to_uppercase();
        let to = self.convert_target.get_untracked().trim().to_uppercase();
        match amount.parse::<f64>() {
            Ok(amount) if amount > 0.0 && !to.is_empty() && to != from => {
                self.convert_action.dispatch((amount, from, to));
            }
            _ => self.message.update(|msg| {
                msg.set_error(ApiError::validation(
                    "Enter an amount and a different target currency to convert.",
                ))
            }),
        }
    }

    /// Replaces amount and currency with a conversion result.
    pub fn apply_conversion(&self, result: &ConversionResult) {
        self.form.amount.set(format!("{:.2}", result.converted_amount));
        self.form.currency.set(result.to.clone());
    }
}

pub fn use_expense_form_view_model(editing_id: Option<String>) -> ExpenseFormViewModel {
    let repository = use_repository();
    let form = ExpenseFormState::default();
    let editing_id = store_value(editing_id);
    let error = create_rw_signal(None::<ApiError>);
    let message = create_rw_signal(MessageState::default());

    let existing = create_resource(
        move || editing_id.get_value(),
        move |id| {
            let repo = repository.get_value();
            async move {
                match id {
                    Some(id) => Some(repo.get(&id).await),
                    None => None,
                }
            }
        },
    );

    create_effect(move |_| {
        if let Some(Some(result)) = existing.get() {
            match result {
                Ok(expense) => form.load(&expense),
                Err(err) => error.set(Some(err)),
            }
        }
    });

    let save_action = create_action(move |payload: &ExpensePayload| {
        let repo = repository.get_value();
        let payload = payload.clone();
        let id = editing_id.get_value();
        async move {
            match id {
                Some(id) => repo.update(&id, &payload).await,
                None => repo.create(&payload).await,
            }
        }
    });
    create_effect(move |_| {
        if let Some(result) = save_action.value().get() {
            match result {
                Ok(expense) => navigate_to(&format!("/expenses/{}", expense.id)),
                Err(err) => error.set(Some(err)),
            }
        }
    });

    let upload_action = create_action(move |input: &(Vec<u8>, String, String)| {
        let repo = repository.get_value();
        let (bytes, name, content_type) = input.clone();
        async move { repo.upload_receipt(&bytes, &name, &content_type).await }
    });
    create_effect(move |_| {
        if let Some(result) = upload_action.value().get() {
            if let Ok(file) = &result {
                form.file_id.set(Some(file.id.clone()));
            }
            apply_result(Some(result), message, "Receipt attached.");
        }
    });

    let remove_receipt_action = create_action(move |file_id: &String| {
        let repo = repository.get_value();
        let file_id = file_id.clone();
        async move { repo.remove_receipt(&file_id).await }
    });
    create_effect(move |_| {
        let result = remove_receipt_action.value().get();
        if apply_result(result, message, "Receipt removed.") {
            form.file_id.set(None);
        }
    });

    let convert_action = create_action(move |input: &(f64, String, String)| {
        let repo = repository.get_value();
        let (amount, from, to) = input.clone();
        async move { repo.convert(amount, &from, &to).await }
    });

    ExpenseFormViewModel {
        editing_id,
        form,
        options: ReferenceOptions::new(repository),
        existing,
        save_action,
        upload_action,
        remove_receipt_action,
        convert_target: create_rw_signal(String::new()),
        convert_action,
        error,
        message,
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod host_tests {
    use super::*;
    use crate::test_support::helpers::expense;
    use crate::test_support::ssr::with_runtime;

    #[test]
    fn successful_transition_uses_backend_status() {
        with_runtime(|| {
            let confirmed = create_rw_signal(None);
            let error = create_rw_signal(Some(ApiError::unknown("stale")));
            let message = create_rw_signal(MessageState::default());
            apply_transition_result(
                Ok(expense("e1", ExpenseStatus::Paid)),
                confirmed,
                error,
                message,
            );
            assert_eq!(confirmed.get().map(|e| e.status), Some(ExpenseStatus::Paid));
            assert!(error.get().is_none());
            assert_eq!(message.get().success.as_deref(), Some("Status is now Paid."));
        });
    }

    #[test]
    fn failed_transition_keeps_displayed_record() {
        with_runtime(|| {
            let confirmed = create_rw_signal(Some(expense("e1", ExpenseStatus::Submitted)));
            let error = create_rw_signal(None);
            let message = create_rw_signal(MessageState::default());
            apply_transition_result(
                Err(ApiError::http(409, "Expense was already approved")),
                confirmed,
                error,
                message,
            );
            assert_eq!(
                confirmed.get().map(|e| e.status),
                Some(ExpenseStatus::Submitted)
            );
            assert_eq!(
                error.get().map(|e| e.error),
                Some("Expense was already approved".to_string())
            );
        });
    }

    #[test]
    fn invalid_transition_is_rejected_before_dispatch() {
        with_runtime(|| {
            let vm = use_expense_detail_view_model("e1".into());
            vm.submit_transition(TransitionDraft::new(
                ExpenseStatus::Submitted,
                ExpenseStatus::Draft,
            ));
            assert_eq!(
                vm.transition_error.get().map(|e| e.code),
                Some("VALIDATION_ERROR".to_string())
            );
            assert_eq!(vm.transition_action.version().get(), 0);
        });
    }

    #[test]
    fn retry_load_bumps_the_reload_key() {
        with_runtime(|| {
            let vm = use_expense_detail_view_model("e1".into());
            vm.transition_error.set(Some(ApiError::network("offline")));
            vm.retry_load();
            vm.retry_load();
            assert_eq!(vm.reload.get(), 2);
            assert!(vm.transition_error.get().is_none());
        });
    }

    #[test]
    fn form_view_model_rejects_invalid_payload() {
        with_runtime(|| {
            let vm = use_expense_form_view_model(None);
            assert!(!vm.is_edit());
            assert!(!vm.submit());
            assert!(vm.error.get().is_some());
        });
    }

    #[test]
    fn conversion_result_replaces_amount_and_currency() {
        with_runtime(|| {
            let vm = use_expense_form_view_model(Some("e1".into()));
            assert!(vm.is_edit());
            vm.apply_conversion(&ConversionResult {
                amount: 100.0,
                from: "USD".into(),
                to: "EUR".into(),
                converted_amount: 91.5,
                rate: 0.915,
            });
            assert_eq!(vm.form.amount.get(), "91.50");
            assert_eq!(vm.form.currency.get(), "EUR");
        });
    }

    #[test]
    fn conversion_requires_distinct_currency() {
        with_runtime(|| {
            let vm = use_expense_form_view_model(None);
            vm.form.amount.set("10".into());
            vm.convert_target.set("EUR".into());
            vm.request_conversion();
            assert!(vm.message.get().error.is_some());
            assert_eq!(vm.convert_action.version().get(), 0);
        });
    }
}
