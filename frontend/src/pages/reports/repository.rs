use crate::api::{ApiClient, ApiError, DownloadedFile, ExportFormat, ExportRequest, ReportQuery, ReportSummary};
use std::rc::Rc;

#[derive(Clone)]
pub struct ReportsRepository {
    client: Rc<ApiClient>,
}

impl ReportsRepository {
    pub fn new_with_client(client: Rc<ApiClient>) -> Self {
        Self { client }
    }

    pub async fn summary(&self, query: &ReportQuery) -> Result<ReportSummary, ApiError> {
        self.client.get_report_summary(query).await
    }

    pub async fn export(&self, format: ExportFormat, query: ReportQuery) -> Result<DownloadedFile, ApiError> {
        let file = self
            .client
            .export_report(&ExportRequest { format, query })
            .await?;
        log::info!("exported {} ({} bytes)", file.file_name, file.bytes.len());
        Ok(file)
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod host_tests {
    use super::*;
    use crate::api::{ExpenseStatus, ReportGrouping};
    use chrono::NaiveDate;
    use wiremock::matchers::{body_partial_json, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};
    use serde_json::json;

    fn repo(server: &MockServer) -> ReportsRepository {
        ReportsRepository::new_with_client(Rc::new(ApiClient::new_with_base_url(format!(
            "{}/api",
            server.uri()
        ))))
    }

    #[tokio::test]
    async fn summary_sends_filters_as_query() {
        let server = MockServer::start().await;
        let mock = Mock::given(method("GET"))
            .and(path("/api/reports"))
            .and(query_param("groupBy", "vendor"))
            .and(query_param("from", "2026-01-01"))
            .and(query_param("status", "PAID"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "rows": [{ "key": "v1", "label": "Acme", "count": 3, "totalAmount": 300.0 }],
                "totalAmount": 300.0,
                "totalCount": 3,
                "currency": "EUR"
            })))
            .mount_as_scoped(&server)
            .await;

        let query = ReportQuery {
            from: NaiveDate::from_ymd_opt(2026, 1, 1),
            to: None,
            group_by: ReportGrouping::Vendor,
            status: Some(ExpenseStatus::Paid),
        };
        let summary = repo(&server).summary(&query).await.unwrap();
        assert_eq!(mock.received_requests().await.len(), 1);
        assert_eq!(summary.rows[0].label, "Acme");
    }

    #[tokio::test]
    async fn export_uses_disposition_file_name() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/reports/export"))
            .and(body_partial_json(json!({ "format": "xlsx" })))
            .respond_with(
                ResponseTemplate::new(200)
                    .insert_header("content-type", "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet")
                    .insert_header("content-disposition", "attachment; filename=\"q1.xlsx\"")
                    .set_body_string("PK"),
            )
            .mount(&server)
            .await;

        let file = repo(&server)
            .export(ExportFormat::Xlsx, ReportQuery::default())
            .await
            .unwrap();
        assert_eq!(file.file_name, "q1.xlsx");
        assert_eq!(file.bytes, b"PK");
    }
}
