use reqwest::Method;

use super::{
    client::{encode_segment, ApiClient},
    types::{ApiError, Vendor, VendorPayload},
};

impl ApiClient {
    pub async fn list_vendors(&self, search: Option<&str>) -> Result<Vec<Vendor>, ApiError> {
        match search.map(str::trim).filter(|s| !s.is_empty()) {
            Some(term) => {
                self.get_json_with_query("/vendors", &[("search", term.to_string())])
                    .await
            }
            None => self.get_json("/vendors").await,
        }
    }

    pub async fn get_vendor(&self, id: &str) -> Result<Vendor, ApiError> {
        self.get_json(&format!("/vendors/{}", encode_segment(id))).await
    }

    pub async fn create_vendor(&self, payload: &VendorPayload) -> Result<Vendor, ApiError> {
        self.send_json(Method::POST, "/vendors", payload).await
    }

    pub async fn update_vendor(&self, id: &str, payload: &VendorPayload) -> Result<Vendor, ApiError> {
        self.send_json(Method::PATCH, &format!("/vendors/{}", encode_segment(id)), payload)
            .await
    }

    pub async fn toggle_vendor(&self, id: &str) -> Result<Vendor, ApiError> {
        self.send_json(
            Method::PATCH,
            &format!("/vendors/{}/toggle-status", encode_segment(id)),
            &serde_json::json!({}),
        )
        .await
    }

    pub async fn delete_vendor(&self, id: &str) -> Result<(), ApiError> {
        self.send_empty(Method::DELETE, &format!("/vendors/{}", encode_segment(id)))
            .await
    }
}
