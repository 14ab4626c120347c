use reqwest::Method;

use super::{
    client::{encode_segment, ApiClient},
    types::{
        ApiError, Expense, ExpensePayload, ExpenseQuery, ExpenseStatus, Paginated,
        StatusHistoryEntry, StatusTransitionRequest,
    },
};

impl ApiClient {
    pub async fn list_expenses(&self, query: &ExpenseQuery) -> Result<Paginated<Expense>, ApiError> {
        self.get_json_with_query("/expenses", &query.to_params()).await
    }

    pub async fn get_expense(&self, id: &str) -> Result<Expense, ApiError> {
        self.get_json(&format!("/expenses/{}", encode_segment(id))).await
    }

    pub async fn create_expense(&self, payload: &ExpensePayload) -> Result<Expense, ApiError> {
        self.send_json(Method::POST, "/expenses", payload).await
    }

    pub async fn update_expense(
        &self,
        id: &str,
        payload: &ExpensePayload,
    ) -> Result<Expense, ApiError> {
        self.send_json(Method::PATCH, &format!("/expenses/{}", encode_segment(id)), payload)
            .await
    }

    pub async fn delete_expense(&self, id: &str) -> Result<(), ApiError> {
        self.send_empty(Method::DELETE, &format!("/expenses/{}", encode_segment(id)))
            .await
    }

    /// `PATCH /expenses/{id}/status`. The returned record carries the status
    /// the backend actually stored.
    pub async fn transition_expense(
        &self,
        id: &str,
        status: ExpenseStatus,
        notes: Option<String>,
    ) -> Result<Expense, ApiError> {
        let body = StatusTransitionRequest { status, notes };
        self.send_json(
            Method::PATCH,
            &format!("/expenses/{}/status", encode_segment(id)),
            &body,
        )
        .await
    }

    pub async fn get_expense_history(&self, id: &str) -> Result<Vec<StatusHistoryEntry>, ApiError> {
        self.get_json(&format!("/expenses/{}/status-history", encode_segment(id)))
            .await
    }
}
