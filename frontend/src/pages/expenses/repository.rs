use crate::api::{
    ApiClient, ApiError, Category, ConversionResult, Expense, ExpensePayload, ExpenseQuery,
    FileMetadata, Paginated, StatusHistoryEntry, Vendor,
};
use crate::state::cache::{
    expense_history_key, expense_key, AppCaches, QueryKey, EXPENSE_LIST_PREFIX,
};
use crate::workflow::TransitionDraft;
use std::rc::Rc;

pub fn list_key(query: &ExpenseQuery) -> QueryKey {
    query
        .to_params()
        .into_iter()
        .fold(QueryKey::new(EXPENSE_LIST_PREFIX), |key, (name, value)| {
            key.with(name, value)
        })
}

const CATEGORY_OPTIONS_KEY: &str = "categories/active";
const VENDOR_OPTIONS_KEY: &str = "vendors/all";

#[derive(Clone)]
pub struct ExpensesRepository {
    client: Rc<ApiClient>,
    caches: AppCaches,
}

impl ExpensesRepository {
    pub fn new(api: ApiClient, caches: AppCaches) -> Self {
        Self {
            client: Rc::new(api),
            caches,
        }
    }

    pub async fn list(&self, query: &ExpenseQuery) -> Result<Paginated<Expense>, ApiError> {
        let client = self.client.clone();
        let query_owned = query.clone();
        let page = self
            .caches
            .expense_lists
            .get_or_fetch(list_key(query), move || async move {
                client.list_expenses(&query_owned).await
            })
            .await?;
        for expense in &page.items {
            if !self.caches.expenses.has_pending(&expense_key(&expense.id)) {
                self.caches
                    .expenses
                    .insert(expense_key(&expense.id), expense.clone());
            }
        }
        Ok(page)
    }

    pub async fn get(&self, id: &str) -> Result<Expense, ApiError> {
        let client = self.client.clone();
        let owned = id.to_string();
        self.caches
            .expenses
            .get_or_fetch(expense_key(id), move || async move {
                client.get_expense(&owned).await
            })
            .await
    }

    pub async fn history(&self, id: &str) -> Result<Vec<StatusHistoryEntry>, ApiError> {
        let client = self.client.clone();
        let owned = id.to_string();
        self.caches
            .expense_history
            .get_or_fetch(expense_history_key(id), move || async move {
                client.get_expense_history(&owned).await
            })
            .await
    }

    pub async fn create(&self, payload: &ExpensePayload) -> Result<Expense, ApiError> {
        let created = self.client.create_expense(payload).await?;
        self.caches
            .expenses
            .insert(expense_key(&created.id), created.clone());
        self.caches.expense_lists.invalidate(EXPENSE_LIST_PREFIX);
        Ok(created)
    }

    pub async fn update(&self, id: &str, payload: &ExpensePayload) -> Result<Expense, ApiError> {
        let updated = self.client.update_expense(id, payload).await?;
        self.caches.expenses.insert(expense_key(id), updated.clone());
        self.caches.expense_lists.invalidate(EXPENSE_LIST_PREFIX);
        Ok(updated)
    }

    pub async fn delete(&self, id: &str) -> Result<(), ApiError> {
        self.client.delete_expense(id).await?;
        self.caches.expenses.invalidate(expense_key(id).as_str());
        self.caches
            .expense_history
            .invalidate(expense_history_key(id).as_str());
        self.caches.expense_lists.invalidate(EXPENSE_LIST_PREFIX);
        Ok(())
    }

    /// Sends a status change. While the request is in flight the cached
    /// expense shows the requested status; once it settles the cache holds
    /// whatever the backend returned, or the previous record on failure.
    pub async fn transition(&self, id: &str, draft: &TransitionDraft) -> Result<Expense, ApiError> {
        draft
            .validate()
            .map_err(|rejection| ApiError::validation(rejection.message()))?;

        let key = expense_key(id);
        let target = draft.target;
        let pending = self
            .caches
            .expenses
            .apply_optimistic(&key, |expense| expense.status = target);

        match self
            .client
            .transition_expense(id, target, draft.trimmed_notes())
            .await
        {
            Ok(expense) => {
                match &pending {
                    Some(write) => self.caches.expenses.reconcile(write, expense.clone()),
                    None => self.caches.expenses.insert(key, expense.clone()),
                }
                if expense.status != target {
                    log::info!(
                        "expense {} settled as {} after requesting {}",
                        id,
                        expense.status,
                        target
                    );
                }
                self.caches.expense_lists.invalidate(EXPENSE_LIST_PREFIX);
                self.caches
                    .expense_history
                    .invalidate(expense_history_key(id).as_str());
                Ok(expense)
            }
            Err(err) => {
                if let Some(write) = &pending {
                    self.caches.expenses.rollback(write);
                }
                log::error!("status change for {} failed: {}", id, err);
                Err(err)
            }
        }
    }

    /// The record the UI should show right now, overlay included.
    pub fn cached(&self, id: &str) -> Option<Expense> {
        self.caches.expenses.get(&expense_key(id))
    }

    pub async fn category_options(&self) -> Result<Vec<Category>, ApiError> {
        let client = self.client.clone();
        self.caches
            .categories
            .get_or_fetch(QueryKey::new(CATEGORY_OPTIONS_KEY), move || async move {
                client.list_categories(false).await
            })
            .await
    }

    pub async fn vendor_options(&self) -> Result<Vec<Vendor>, ApiError> {
        let client = self.client.clone();
        self.caches
            .vendors
            .get_or_fetch(QueryKey::new(VENDOR_OPTIONS_KEY), move || async move {
                client.list_vendors(None).await
            })
            .await
    }

    pub async fn upload_receipt(
        &self,
        bytes: &[u8],
        file_name: &str,
        content_type: &str,
    ) -> Result<FileMetadata, ApiError> {
        self.client.upload_file(bytes, file_name, content_type).await
    }

    pub async fn receipt(&self, file_id: &str) -> Result<FileMetadata, ApiError> {
        self.client.get_file(file_id).await
    }

    pub async fn remove_receipt(&self, file_id: &str) -> Result<(), ApiError> {
        self.client.delete_file(file_id).await
    }

    pub async fn convert(
        &self,
        amount: f64,
        from: &str,
        to: &str,
    ) -> Result<ConversionResult, ApiError> {
        self.client.convert_currency(amount, from, to).await
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod host_tests {
    use super::*;
    use crate::api::tests::expense_json;
    use crate::api::{ExpenseStatus, RetryPolicy};
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};
    use serde_json::json;

    fn repo(server: &MockServer) -> ExpensesRepository {
        let api = ApiClient::new_with_base_url(format!("{}/api", server.uri())).with_retry_policy(RetryPolicy {
            max_retries: 2,
            base_delay_ms: 1,
            max_delay_ms: 5,
            jitter: false,
        });
        ExpensesRepository::new(api, AppCaches::new(30))
    }

    #[tokio::test]
    async fn get_is_served_from_cache_while_fresh() {
        let server = MockServer::start().await;
        let detail = Mock::given(method("GET"))
            .and(path("/api/expenses/e1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(expense_json("e1", "DRAFT")))
            .mount_as_scoped(&server)
            .await;

        let repo = repo(&server);
        repo.get("e1").await.unwrap();
        repo.get("e1").await.unwrap();
        assert_eq!(detail.received_requests().await.len(), 1);
    }

    #[tokio::test]
    async fn list_seeds_detail_entries() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/expenses"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "items": [expense_json("e1", "DRAFT"), expense_json("e2", "PAID")],
                "total": 2,
                "page": 1,
                "pageSize": 20
            })))
            .mount(&server)
            .await;
        let detail = Mock::given(method("GET"))
            .and(path("/api/expenses/e2"))
            .respond_with(ResponseTemplate::new(200).set_body_json(expense_json("e2", "PAID")))
            .mount_as_scoped(&server)
            .await;

        let repo = repo(&server);
        let page = repo
            .list(&ExpenseQuery {
                page: 1,
                page_size: 20,
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(page.items.len(), 2);
        assert_eq!(repo.get("e2").await.unwrap().status, ExpenseStatus::Paid);
        assert_eq!(detail.received_requests().await.len(), 0);
    }

    #[tokio::test]
    async fn transition_shows_status_returned_by_backend() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/expenses/e1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(expense_json("e1", "SUBMITTED")))
            .mount(&server)
            .await;
        let patch = Mock::given(method("PATCH"))
            .and(path("/api/expenses/e1/status"))
            .and(body_json(json!({ "status": "APPROVED", "notes": "ok" })))
            .respond_with(ResponseTemplate::new(200).set_body_json(expense_json("e1", "PAID")))
            .mount_as_scoped(&server)
            .await;

        let repo = repo(&server);
        repo.get("e1").await.unwrap();
        let draft = TransitionDraft::new(ExpenseStatus::Submitted, ExpenseStatus::Approved)
            .with_notes("ok");
        let settled = repo.transition("e1", &draft).await.unwrap();

        assert_eq!(patch.received_requests().await.len(), 1);
        assert_eq!(settled.status, ExpenseStatus::Paid);
        assert_eq!(repo.cached("e1").unwrap().status, ExpenseStatus::Paid);
    }

    #[tokio::test]
    async fn failed_transition_rolls_back_to_previous_status() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/expenses/e1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(expense_json("e1", "SUBMITTED")))
            .mount(&server)
            .await;
        let patch = Mock::given(method("PATCH"))
            .and(path("/api/expenses/e1/status"))
            .respond_with(ResponseTemplate::new(409).set_body_json(json!({ "message": "Expense was already approved" })))
            .mount_as_scoped(&server)
            .await;

        let repo = repo(&server);
        repo.get("e1").await.unwrap();
        let draft = TransitionDraft::new(ExpenseStatus::Submitted, ExpenseStatus::Approved);
        let err = repo.transition("e1", &draft).await.unwrap_err();

        assert_eq!(patch.received_requests().await.len(), 1);
        assert_eq!(err.error, "Expense was already approved");
        assert_eq!(err.code, "HTTP_409");
        assert_eq!(repo.cached("e1").unwrap().status, ExpenseStatus::Submitted);
    }

    #[tokio::test]
    async fn return_to_draft_without_notes_never_reaches_backend() {
        let server = MockServer::start().await;
        let patch = Mock::given(method("PATCH"))
            .and(path("/api/expenses/e1/status"))
            .respond_with(ResponseTemplate::new(200).set_body_json(expense_json("e1", "DRAFT")))
            .mount_as_scoped(&server)
            .await;

        let repo = repo(&server);
        let draft =
            TransitionDraft::new(ExpenseStatus::Submitted, ExpenseStatus::Draft).with_notes("   ");
        let err = repo.transition("e1", &draft).await.unwrap_err();
        assert_eq!(err.code, "VALIDATION_ERROR");
        assert_eq!(patch.received_requests().await.len(), 0);
    }

    #[tokio::test]
    async fn create_invalidates_cached_lists() {
        let server = MockServer::start().await;
        let list = Mock::given(method("GET"))
            .and(path("/api/expenses"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "items": [], "total": 0, "page": 1, "pageSize": 20
            })))
            .mount_as_scoped(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/api/expenses"))
            .respond_with(ResponseTemplate::new(201).set_body_json(expense_json("e3", "DRAFT")))
            .mount(&server)
            .await;

        let repo = repo(&server);
        let query = ExpenseQuery {
            page: 1,
            page_size: 20,
            ..Default::default()
        };
        repo.list(&query).await.unwrap();
        repo.create(&ExpensePayload {
            payment_id: None,
            transaction_date: chrono::NaiveDate::from_ymd_opt(2025, 3, 1).unwrap(),
            vendor_id: "v1".into(),
            category: "Travel".into(),
            amount: 10.0,
            currency: "EUR".into(),
            vat_rate: None,
            vat_amount: None,
            description: None,
            file_id: None,
        })
        .await
        .unwrap();
        repo.list(&query).await.unwrap();
        assert_eq!(list.received_requests().await.len(), 2);
    }

    #[test]
    fn list_keys_differ_by_filter() {
        let all = list_key(&ExpenseQuery::default());
        let drafts = list_key(&ExpenseQuery {
            status: Some(ExpenseStatus::Draft),
            ..Default::default()
        });
        assert_ne!(all, drafts);
        assert!(drafts.as_str().starts_with(EXPENSE_LIST_PREFIX));
    }
}
