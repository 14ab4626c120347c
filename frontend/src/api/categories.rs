use reqwest::Method;

use super::{
    client::{encode_segment, ApiClient},
    types::{
        ApiError, Category, CategoryPayload, CategoryStatistics, CategoryStatusRequest,
        CategoryUsage,
    },
};

impl ApiClient {
    pub async fn list_categories(&self, include_inactive: bool) -> Result<Vec<Category>, ApiError> {
        if include_inactive {
            self.get_json_with_query("/categories", &[("includeInactive", "true".to_string())])
                .await
        } else {
            self.get_json("/categories").await
        }
    }

    pub async fn get_category(&self, id: &str) -> Result<Category, ApiError> {
        self.get_json(&format!("/categories/{}", encode_segment(id)))
            .await
    }

    pub async fn create_category(&self, payload: &CategoryPayload) -> Result<Category, ApiError> {
        self.send_json(Method::POST, "/categories", payload).await
    }

    pub async fn update_category(
        &self,
        id: &str,
        payload: &CategoryPayload,
    ) -> Result<Category, ApiError> {
        self.send_json(Method::PUT, &format!("/categories/{}", encode_segment(id)), payload)
            .await
    }

    pub async fn set_category_active(&self, id: &str, is_active: bool) -> Result<Category, ApiError> {
        self.send_json(
            Method::PUT,
            &format!("/categories/{}/status", encode_segment(id)),
            &CategoryStatusRequest { is_active },
        )
        .await
    }

    pub async fn delete_category(&self, id: &str) -> Result<(), ApiError> {
        self.send_empty(Method::DELETE, &format!("/categories/{}", encode_segment(id)))
            .await
    }

    pub async fn get_category_usage(&self, id: &str) -> Result<CategoryUsage, ApiError> {
        self.get_json(&format!("/categories/{}/usage", encode_segment(id)))
            .await
    }

    pub async fn get_category_statistics(&self) -> Result<CategoryStatistics, ApiError> {
        self.get_json("/categories/statistics").await
    }
}
