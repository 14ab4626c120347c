use crate::api::{ApiClient, ApiError, DashboardStats};

pub async fn fetch_stats(api: &ApiClient) -> Result<DashboardStats, ApiError> {
    api.get_dashboard_stats().await
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod host_tests {
    use super::*;
    use crate::api::ExpenseStatus;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};
    use serde_json::json;

    #[tokio::test]
    async fn fetch_stats_decodes_status_breakdown() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/dashboard/stats"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "totalExpenses": 12,
                "totalAmount": 1543.5,
                "currency": "EUR",
                "byStatus": { "DRAFT": 4, "SUBMITTED": 3, "PAID": 5 },
                "pendingApprovals": 3,
                "recentExpenses": []
            })))
            .mount(&server)
            .await;

        let api = ApiClient::new_with_base_url(format!("{}/api", server.uri()));
        let stats = fetch_stats(&api).await.unwrap();
        assert_eq!(stats.total_expenses, 12);
        assert_eq!(stats.by_status.get(&ExpenseStatus::Submitted), Some(&3));
        assert!(stats.recent_expenses.is_empty());
    }
}
