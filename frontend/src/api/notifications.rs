use reqwest::Method;

use super::{
    client::{encode_segment, ApiClient},
    types::{ApiError, Notification, Paginated, UnreadCount},
};

impl ApiClient {
    pub async fn list_notifications(
        &self,
        page: u32,
        page_size: u32,
        unread_only: bool,
    ) -> Result<Paginated<Notification>, ApiError> {
        let mut params = vec![
            ("page", page.max(1).to_string()),
            ("pageSize", page_size.max(1).to_string()),
        ];
        if unread_only {
            params.push(("unreadOnly", "true".to_string()));
        }
        self.get_json_with_query("/notifications", &params).await
    }

    pub async fn get_unread_count(&self) -> Result<u32, ApiError> {
        let count: UnreadCount = self.get_json("/notifications/unread-count").await?;
        Ok(count.count)
    }

    pub async fn mark_notification_read(&self, id: &str) -> Result<(), ApiError> {
        self.send_empty(
            Method::PATCH,
            &format!("/notifications/{}/read", encode_segment(id)),
        )
        .await
    }

    pub async fn mark_all_notifications_read(&self) -> Result<(), ApiError> {
        self.send_empty(Method::PATCH, "/notifications/read-all").await
    }

    pub async fn delete_notification(&self, id: &str) -> Result<(), ApiError> {
        self.send_empty(Method::DELETE, &format!("/notifications/{}", encode_segment(id)))
            .await
    }
}
