use crate::api::{ApiClient, ApiError, Notification, Paginated};
use crate::state::notifications::{refresh_unread, NotificationState};
use std::rc::Rc;

pub const NOTIFICATION_PAGE_SIZE: u32 = 20;

#[derive(Clone)]
pub struct NotificationsRepository {
    client: Rc<ApiClient>,
}

impl NotificationsRepository {
    pub fn new_with_client(client: Rc<ApiClient>) -> Self {
        Self { client }
    }

    pub async fn list(&self, page: u32, unread_only: bool) -> Result<Paginated<Notification>, ApiError> {
        self.client
            .list_notifications(page, NOTIFICATION_PAGE_SIZE, unread_only)
            .await
    }

    /// Every write re-reads the unread count so the header badge stays in step.
    pub async fn mark_read(&self, id: &str, badge: NotificationState) -> Result<(), ApiError> {
        self.client.mark_notification_read(id).await?;
        self.sync_badge(badge).await;
        Ok(())
    }

    pub async fn mark_all_read(&self, badge: NotificationState) -> Result<(), ApiError> {
        self.client.mark_all_notifications_read().await?;
        self.sync_badge(badge).await;
        Ok(())
    }

    pub async fn delete(&self, id: &str, badge: NotificationState) -> Result<(), ApiError> {
        self.client.delete_notification(id).await?;
        self.sync_badge(badge).await;
        Ok(())
    }

    async fn sync_badge(&self, badge: NotificationState) {
        if let Err(err) = refresh_unread(&self.client, badge).await {
            log::warn!("failed to refresh unread count: {}", err);
        }
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod host_tests {
    use super::*;
    use crate::state::notifications::use_notifications;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};
    use leptos::*;
    use serde_json::json;

    fn repo(server: &MockServer) -> NotificationsRepository {
        NotificationsRepository::new_with_client(Rc::new(ApiClient::new_with_base_url(
            format!("{}/api", server.uri()),
        )))
    }

    #[tokio::test]
    async fn list_requests_unread_only_page() {
        let server = MockServer::start().await;
        let mock = Mock::given(method("GET"))
            .and(path("/api/notifications"))
            .and(query_param("page", "2"))
            .and(query_param("pageSize", "20"))
            .and(query_param("unreadOnly", "true"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "items": [{
                    "id": "n1",
                    "type": "APPROVAL",
                    "title": "Expense approved",
                    "message": "Taxi was approved",
                    "isRead": false,
                    "expenseId": "e1",
                    "createdAt": "2026-03-02T10:00:00Z"
                }],
                "total": 21,
                "page": 2,
                "pageSize": 20
            })))
            .mount_as_scoped(&server)
            .await;

        let page = repo(&server).list(2, true).await.unwrap();
        assert_eq!(mock.received_requests().await.len(), 1);
        assert_eq!(page.items[0].expense_id.as_deref(), Some("e1"));
        assert_eq!(page.total_pages(), 2);
    }

    #[tokio::test]
    async fn mark_all_read_refreshes_badge() {
        let server = MockServer::start().await;
        let read_all = Mock::given(method("PATCH"))
            .and(path("/api/notifications/read-all"))
            .respond_with(ResponseTemplate::new(204))
            .mount_as_scoped(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/api/notifications/unread-count"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "count": 0 })))
            .mount(&server)
            .await;

        let runtime = create_runtime();
        let badge = use_notifications();
        badge.unread.set(5);
        repo(&server).mark_all_read(badge).await.unwrap();
        assert_eq!(read_all.received_requests().await.len(), 1);
        assert_eq!(badge.unread.get_untracked(), 0);
        runtime.dispose();
    }

    #[tokio::test]
    async fn failed_delete_leaves_badge_untouched() {
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .and(path("/api/notifications/n1"))
            .respond_with(ResponseTemplate::new(404).set_body_json(json!({ "error": "Notification not found" })))
            .mount(&server)
            .await;
        let count = Mock::given(method("GET"))
            .and(path("/api/notifications/unread-count"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "count": 0 })))
            .mount_as_scoped(&server)
            .await;

        let runtime = create_runtime();
        let badge = use_notifications();
        badge.unread.set(2);
        let err = repo(&server).delete("n1", badge).await.unwrap_err();
        assert_eq!(err.http_status(), Some(404));
        assert_eq!(badge.unread.get_untracked(), 2);
        assert_eq!(count.received_requests().await.len(), 0);
        runtime.dispose();
    }
}
