use chrono::{DateTime, NaiveDate, Utc};
use leptos::{IntoView, View};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

pub use crate::workflow::{ExpenseStatus, Role};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub user: UserResponse,
    pub token: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refresh_token: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RefreshResponse {
    pub token: String,
    #[serde(default)]
    pub refresh_token: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: Role,
    #[serde(default)]
    pub department: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProfileRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub department: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_password: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub new_password: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Paginated<T> {
    pub items: Vec<T>,
    pub total: u64,
    pub page: u32,
    pub page_size: u32,
}

impl<T> Paginated<T> {
    pub fn total_pages(&self) -> u32 {
        if self.page_size == 0 {
            return 1;
        }
        let pages = (self.total + u64::from(self.page_size) - 1) / u64::from(self.page_size);
        pages.max(1) as u32
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Expense {
    pub id: String,
    #[serde(default)]
    pub payment_id: Option<String>,
    pub transaction_date: NaiveDate,
    pub vendor_id: String,
    #[serde(default)]
    pub vendor_name: Option<String>,
    pub category: String,
    pub amount: f64,
    pub currency: String,
    #[serde(default)]
    pub vat_rate: Option<f64>,
    #[serde(default)]
    pub vat_amount: Option<f64>,
    #[serde(default)]
    pub description: Option<String>,
    pub status: ExpenseStatus,
    pub submitted_by: String,
    #[serde(default)]
    pub file_id: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Body for both create and whole-record update.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpensePayload {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_id: Option<String>,
    pub transaction_date: NaiveDate,
    pub vendor_id: String,
    pub category: String,
    pub amount: f64,
    pub currency: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vat_rate: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vat_amount: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_id: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpenseQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<ExpenseStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vendor_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub to: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    pub page: u32,
    pub page_size: u32,
}

impl ExpenseQuery {
    pub fn to_params(&self) -> Vec<(&'static str, String)> {
        let mut params = Vec::new();
        if let Some(status) = self.status {
            params.push(("status", status.as_str().to_string()));
        }
        if let Some(category) = non_empty(self.category.as_deref()) {
            params.push(("category", category));
        }
        if let Some(vendor_id) = non_empty(self.vendor_id.as_deref()) {
            params.push(("vendorId", vendor_id));
        }
        if let Some(from) = self.from {
            params.push(("from", from.to_string()));
        }
        if let Some(to) = self.to {
            params.push(("to", to.to_string()));
        }
        if let Some(search) = non_empty(self.search.as_deref()) {
            params.push(("search", search));
        }
        params.push(("page", self.page.max(1).to_string()));
        params.push(("pageSize", self.page_size.max(1).to_string()));
        params
    }
}

fn non_empty(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatusTransitionRequest {
    pub status: ExpenseStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusHistoryEntry {
    pub id: String,
    #[serde(default)]
    pub from_status: Option<ExpenseStatus>,
    pub to_status: ExpenseStatus,
    #[serde(default)]
    pub notes: Option<String>,
    pub changed_by: String,
    #[serde(default)]
    pub changed_by_name: Option<String>,
    pub changed_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    pub is_active: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryPayload {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryStatusRequest {
    pub is_active: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryUsage {
    pub category_id: String,
    pub expense_count: u64,
    pub total_amount: f64,
    #[serde(default)]
    pub last_used_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryStatistics {
    pub total: u64,
    pub active: u64,
    pub inactive: u64,
    #[serde(default)]
    pub most_used: Vec<CategoryUsage>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Vendor {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub contact_name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    pub is_active: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VendorPayload {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileMetadata {
    pub id: String,
    pub file_name: String,
    pub content_type: String,
    pub size: u64,
    #[serde(default)]
    pub url: Option<String>,
    pub uploaded_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum NotificationKind {
    StatusChange,
    Approval,
    Import,
    #[serde(other)]
    General,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    pub id: String,
    #[serde(rename = "type", default = "default_notification_kind")]
    pub kind: NotificationKind,
    pub title: String,
    pub message: String,
    pub is_read: bool,
    #[serde(default)]
    pub expense_id: Option<String>,
    pub created_at: DateTime<Utc>,
}

fn default_notification_kind() -> NotificationKind {
    NotificationKind::General
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnreadCount {
    pub count: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub total_expenses: u64,
    pub total_amount: f64,
    pub currency: String,
    #[serde(default)]
    pub by_status: BTreeMap<ExpenseStatus, u64>,
    #[serde(default)]
    pub pending_approvals: u64,
    #[serde(default)]
    pub recent_expenses: Vec<Expense>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ReportGrouping {
    #[default]
    Category,
    Vendor,
    Month,
    Status,
}

impl ReportGrouping {
    pub fn as_str(self) -> &'static str {
        match self {
            ReportGrouping::Category => "category",
            ReportGrouping::Vendor => "vendor",
            ReportGrouping::Month => "month",
            ReportGrouping::Status => "status",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct ReportQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub to: Option<NaiveDate>,
    pub group_by: ReportGrouping,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<ExpenseStatus>,
}

impl ReportQuery {
    pub fn to_params(&self) -> Vec<(&'static str, String)> {
        let mut params = vec![("groupBy", self.group_by.as_str().to_string())];
        if let Some(from) = self.from {
            params.push(("from", from.to_string()));
        }
        if let Some(to) = self.to {
            params.push(("to", to.to_string()));
        }
        if let Some(status) = self.status {
            params.push(("status", status.as_str().to_string()));
        }
        params
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportRow {
    pub key: String,
    pub label: String,
    pub count: u64,
    pub total_amount: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportSummary {
    pub rows: Vec<ReportRow>,
    pub total_amount: f64,
    pub total_count: u64,
    pub currency: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    #[default]
    Csv,
    Xlsx,
    Pdf,
}

impl ExportFormat {
    pub fn extension(self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Xlsx => "xlsx",
            ExportFormat::Pdf => "pdf",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportRequest {
    pub format: ExportFormat,
    #[serde(flatten)]
    pub query: ReportQuery,
}

/// A binary download returned by the backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadedFile {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExchangeRate {
    pub from: String,
    pub to: String,
    pub rate: f64,
    #[serde(default)]
    pub as_of: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConvertRequest {
    pub amount: f64,
    pub from: String,
    pub to: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConversionResult {
    pub amount: f64,
    pub from: String,
    pub to: String,
    pub converted_amount: f64,
    pub rate: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ImportJobStatus {
    Pending,
    Processing,
    Completed,
    Failed,
}

impl ImportJobStatus {
    pub fn is_terminal(self) -> bool {
        matches!(self, ImportJobStatus::Completed | ImportJobStatus::Failed)
    }

    pub fn label(self) -> &'static str {
        match self {
            ImportJobStatus::Pending => "Queued",
            ImportJobStatus::Processing => "Processing",
            ImportJobStatus::Completed => "Completed",
            ImportJobStatus::Failed => "Failed",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportJob {
    pub id: String,
    pub file_name: String,
    pub status: ImportJobStatus,
    #[serde(default)]
    pub total_rows: u64,
    #[serde(default)]
    pub imported_rows: u64,
    #[serde(default)]
    pub failed_rows: u64,
    #[serde(default)]
    pub errors: Vec<String>,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub completed_at: Option<DateTime<Utc>>,
}

/// Normalised error returned by every API call.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ApiError {
    pub error: String,
    pub code: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Value>,
}

pub const GENERIC_ERROR_MESSAGE: &str = "Something went wrong. Please try again.";

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.error)
    }
}

impl std::error::Error for ApiError {}

impl From<ApiError> for String {
    fn from(error: ApiError) -> Self {
        error.error
    }
}

impl IntoView for ApiError {
    fn into_view(self) -> View {
        self.error.into_view()
    }
}

impl ApiError {
    fn with_code(msg: impl Into<String>, code: impl Into<String>) -> Self {
        Self {
            error: msg.into(),
            code: code.into(),
            details: None,
        }
    }

    pub fn network(msg: impl Into<String>) -> Self {
        Self::with_code(msg, "NETWORK_ERROR")
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        Self::with_code(msg, "VALIDATION_ERROR")
    }

    pub fn unauthorized(msg: impl Into<String>) -> Self {
        Self::with_code(msg, "UNAUTHORIZED")
    }

    pub fn forbidden(msg: impl Into<String>) -> Self {
        Self::with_code(msg, "FORBIDDEN")
    }

    pub fn http(status: u16, msg: impl Into<String>) -> Self {
        Self::with_code(msg, format!("HTTP_{}", status))
    }

    pub fn unknown(msg: impl Into<String>) -> Self {
        Self::with_code(msg, "UNKNOWN_ERROR")
    }

    pub fn with_details(mut self, details: Value) -> Self {
        self.details = Some(details);
        self
    }

    /// Builds the error for a non-success response. The backend message is
    /// kept verbatim; a fallback is used only when the body carries none.
    pub fn from_status_and_body(status: u16, body: &[u8]) -> Self {
        let payload: Option<Value> = serde_json::from_slice(body).ok();
        let message = payload.as_ref().and_then(extract_message);
        let fields = payload.as_ref().and_then(extract_field_errors);

        match status {
            400 => {
                let mut err = Self::validation(
                    message.unwrap_or_else(|| "Please check the highlighted fields.".into()),
                );
                if let Some(fields) = fields {
                    err.details = Some(serde_json::json!({ "fields": fields }));
                }
                err
            }
            401 => Self::unauthorized(
                message.unwrap_or_else(|| "Your session has expired. Please sign in again.".into()),
            ),
            403 => Self::forbidden(
                message.unwrap_or_else(|| "You do not have permission to do that.".into()),
            ),
            other => Self::http(other, message.unwrap_or_else(|| GENERIC_ERROR_MESSAGE.into())),
        }
    }

    pub fn is_network(&self) -> bool {
        self.code == "NETWORK_ERROR"
    }

    pub fn is_unauthorized(&self) -> bool {
        self.code == "UNAUTHORIZED"
    }

    pub fn http_status(&self) -> Option<u16> {
        self.code.strip_prefix("HTTP_").and_then(|s| s.parse().ok())
    }

    /// Per-field messages supplied with a validation failure.
    pub fn field_errors(&self) -> BTreeMap<String, String> {
        self.details
            .as_ref()
            .and_then(|d| d.get("fields"))
            .and_then(|f| f.as_object())
            .map(|map| {
                map.iter()
                    .filter_map(|(k, v)| v.as_str().map(|s| (k.clone(), s.to_string())))
                    .collect()
            })
            .unwrap_or_default()
    }

    pub fn field_error(&self, field: &str) -> Option<String> {
        self.field_errors().remove(field)
    }
}

fn extract_message(payload: &Value) -> Option<String> {
    ["message", "error"]
        .iter()
        .filter_map(|key| payload.get(*key))
        .find_map(|v| v.as_str())
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

/// Accepts `{"errors": {"field": "msg"}}`, `{"errors": {"field": ["msg"]}}`
/// and `{"errors": [{"field": "..", "message": ".."}]}`.
fn extract_field_errors(payload: &Value) -> Option<BTreeMap<String, String>> {
    let errors = payload.get("errors").or_else(|| payload.get("details"))?;
    let mut fields = BTreeMap::new();
    if let Some(map) = errors.as_object() {
        for (field, value) in map {
            let msg = match value {
                Value::String(s) => Some(s.clone()),
                Value::Array(items) => items.iter().find_map(|i| i.as_str()).map(str::to_string),
                _ => None,
            };
            if let Some(msg) = msg {
                fields.insert(field.clone(), msg);
            }
        }
    } else if let Some(items) = errors.as_array() {
        for item in items {
            let field = item.get("field").and_then(|v| v.as_str());
            let msg = item.get("message").and_then(|v| v.as_str());
            if let (Some(field), Some(msg)) = (field, msg) {
                fields.insert(field.to_string(), msg.to_string());
            }
        }
    }
    if fields.is_empty() {
        None
    } else {
        Some(fields)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wasm_bindgen_test::*;

    #[wasm_bindgen_test]
    fn serialize_transition_request_omits_missing_notes() {
        let req = StatusTransitionRequest {
            status: ExpenseStatus::Submitted,
            notes: None,
        };
        let v = serde_json::to_value(&req).unwrap();
        assert_eq!(v, serde_json::json!({ "status": "SUBMITTED" }));
    }

    #[wasm_bindgen_test]
    fn deserialize_expense_camel_case() {
        let raw = r#"{
            "id": "e1",
            "paymentId": "PAY-1",
            "transactionDate": "2025-03-01",
            "vendorId": "v1",
            "category": "Travel",
            "amount": 120.5,
            "currency": "EUR",
            "status": "DRAFT",
            "submittedBy": "u1",
            "createdAt": "2025-03-01T10:00:00Z",
            "updatedAt": "2025-03-01T10:00:00Z"
        }"#;
        let expense: Expense = serde_json::from_str(raw).unwrap();
        assert_eq!(expense.status, ExpenseStatus::Draft);
        assert_eq!(expense.payment_id.as_deref(), Some("PAY-1"));
        assert!(expense.vat_amount.is_none());
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod host_tests {
    use super::*;
    use leptos::IntoView;
    use serde_json::json;

    #[test]
    fn api_error_helpers_set_expected_codes() {
        assert_eq!(ApiError::network("x").code, "NETWORK_ERROR");
        assert_eq!(ApiError::validation("x").code, "VALIDATION_ERROR");
        assert_eq!(ApiError::unauthorized("x").code, "UNAUTHORIZED");
        assert_eq!(ApiError::forbidden("x").code, "FORBIDDEN");
        assert_eq!(ApiError::http(502, "x").code, "HTTP_502");
        assert_eq!(ApiError::http(502, "x").http_status(), Some(502));
        assert_eq!(ApiError::unknown("x").code, "UNKNOWN_ERROR");
    }

    #[test]
    fn api_error_display_and_string_conversion_match_error_text() {
        let error = ApiError::unknown("boom");
        assert_eq!(format!("{}", error), "boom");
        let raw: String = ApiError::validation("bad input").into();
        assert_eq!(raw, "bad input");
    }

    #[test]
    fn api_error_can_be_converted_to_view() {
        let _: View = ApiError::network("offline").into_view();
    }

    #[test]
    fn validation_body_maps_field_errors() {
        let body = json!({
            "message": "Validation failed",
            "errors": { "amount": ["must be positive"], "vendorId": "is required" }
        });
        let err = ApiError::from_status_and_body(400, body.to_string().as_bytes());
        assert_eq!(err.code, "VALIDATION_ERROR");
        assert_eq!(err.error, "Validation failed");
        assert_eq!(err.field_error("amount").as_deref(), Some("must be positive"));
        assert_eq!(err.field_error("vendorId").as_deref(), Some("is required"));
    }

    #[test]
    fn validation_body_accepts_error_list() {
        let body = json!({
            "error": "Invalid",
            "errors": [{ "field": "email", "message": "already taken" }]
        });
        let err = ApiError::from_status_and_body(400, body.to_string().as_bytes());
        assert_eq!(err.error, "Invalid");
        assert_eq!(err.field_error("email").as_deref(), Some("already taken"));
    }

    #[test]
    fn status_codes_map_to_taxonomy_with_fallbacks() {
        let unauthorized = ApiError::from_status_and_body(401, b"");
        assert_eq!(unauthorized.code, "UNAUTHORIZED");
        assert!(!unauthorized.error.is_empty());

        let forbidden = ApiError::from_status_and_body(403, br#"{"message":"Accountants only"}"#);
        assert_eq!(forbidden.code, "FORBIDDEN");
        assert_eq!(forbidden.error, "Accountants only");

        let conflict = ApiError::from_status_and_body(409, b"not json");
        assert_eq!(conflict.code, "HTTP_409");
        assert_eq!(conflict.error, GENERIC_ERROR_MESSAGE);
    }

    #[test]
    fn paginated_total_pages_rounds_up() {
        let page: Paginated<u8> = Paginated {
            items: vec![],
            total: 41,
            page: 1,
            page_size: 20,
        };
        assert_eq!(page.total_pages(), 3);
        let empty: Paginated<u8> = Paginated {
            items: vec![],
            total: 0,
            page: 1,
            page_size: 20,
        };
        assert_eq!(empty.total_pages(), 1);
    }

    #[test]
    fn expense_query_skips_blank_filters() {
        let query = ExpenseQuery {
            status: Some(ExpenseStatus::Paid),
            category: Some("  ".into()),
            vendor_id: Some("v1".into()),
            page: 2,
            page_size: 25,
            ..Default::default()
        };
        let params = query.to_params();
        assert!(params.contains(&("status", "PAID".to_string())));
        assert!(params.contains(&("vendorId", "v1".to_string())));
        assert!(params.contains(&("page", "2".to_string())));
        assert!(!params.iter().any(|(k, _)| *k == "category"));
    }

    #[test]
    fn export_request_flattens_report_query() {
        let req = ExportRequest {
            format: ExportFormat::Xlsx,
            query: ReportQuery {
                from: NaiveDate::from_ymd_opt(2025, 1, 1),
                to: None,
                group_by: ReportGrouping::Vendor,
                status: None,
            },
        };
        let v = serde_json::to_value(&req).unwrap();
        assert_eq!(v["format"], json!("xlsx"));
        assert_eq!(v["groupBy"], json!("vendor"));
        assert_eq!(v["from"], json!("2025-01-01"));
        assert!(v.get("to").is_none());
    }

    #[test]
    fn dashboard_stats_decode_status_map() {
        let stats: DashboardStats = serde_json::from_value(json!({
            "totalExpenses": 3,
            "totalAmount": 300.0,
            "currency": "EUR",
            "byStatus": { "DRAFT": 1, "SUBMITTED": 2 },
            "pendingApprovals": 2
        }))
        .unwrap();
        assert_eq!(stats.by_status.get(&ExpenseStatus::Submitted), Some(&2));
        assert!(stats.recent_expenses.is_empty());
    }

    #[test]
    fn unknown_notification_type_falls_back_to_general() {
        let n: Notification = serde_json::from_value(json!({
            "id": "n1",
            "type": "SOMETHING_NEW",
            "title": "Hello",
            "message": "World",
            "isRead": false,
            "createdAt": "2025-01-01T00:00:00Z"
        }))
        .unwrap();
        assert_eq!(n.kind, NotificationKind::General);
    }
}
