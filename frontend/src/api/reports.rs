use reqwest::Method;

use super::{
    client::ApiClient,
    types::{ApiError, DashboardStats, DownloadedFile, ExportRequest, ReportQuery, ReportSummary},
};

impl ApiClient {
    pub async fn get_dashboard_stats(&self) -> Result<DashboardStats, ApiError> {
        self.get_json("/dashboard/stats").await
    }

    pub async fn get_report_summary(&self, query: &ReportQuery) -> Result<ReportSummary, ApiError> {
        self.get_json_with_query("/reports", &query.to_params())
            .await
    }

    pub async fn export_report(&self, request: &ExportRequest) -> Result<DownloadedFile, ApiError> {
        let fallback = format!("expenses.{}", request.format.extension());
        self.send_for_file(Method::POST, "/reports/export", request, &fallback)
            .await
    }
}
