use crate::api::{ApiClient, ApiError, UpdateProfileRequest, UserResponse};
use std::rc::Rc;

#[derive(Clone)]
pub struct ProfileRepository {
    client: Rc<ApiClient>,
}

impl ProfileRepository {
    pub fn new_with_client(client: Rc<ApiClient>) -> Self {
        Self { client }
    }

    pub async fn load(&self) -> Result<UserResponse, ApiError> {
        self.client.get_me().await
    }

    pub async fn update(&self, request: UpdateProfileRequest) -> Result<UserResponse, ApiError> {
        self.client.update_profile(request).await
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod host_tests {
    use super::*;
    use crate::api::tests::user_json;
    use crate::test_support::helpers::regular_user;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};
    use serde_json::json;

    #[tokio::test]
    async fn update_sends_only_changed_fields_and_persists_user() {
        let server = MockServer::start().await;
        let mock = Mock::given(method("PATCH"))
            .and(path("/api/auth/profile"))
            .and(body_json(json!({ "name": "Riley M." })))
            .respond_with(ResponseTemplate::new(200).set_body_json(user_json("u-regular", "USER")))
            .mount_as_scoped(&server)
            .await;

        let client = Rc::new(ApiClient::new_with_base_url(format!("{}/api", server.uri())));
        client
            .session()
            .sign_in(regular_user(), "token".into(), None);
        let repo = ProfileRepository::new_with_client(client.clone());
        let user = repo
            .update(UpdateProfileRequest {
                name: Some("Riley M.".into()),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(mock.received_requests().await.len(), 1);
        assert_eq!(user.name, "Alice Example");
        assert_eq!(
            client.session().user().map(|u| u.name).as_deref(),
            Some("Alice Example")
        );
    }

    #[tokio::test]
    async fn wrong_current_password_is_a_validation_failure() {
        let server = MockServer::start().await;
        Mock::given(method("PATCH"))
            .and(path("/api/auth/profile"))
            .respond_with(ResponseTemplate::new(400).set_body_json(json!({
                "error": "Current password is incorrect",
                "code": "VALIDATION_ERROR"
            })))
            .mount(&server)
            .await;

        let repo = ProfileRepository::new_with_client(Rc::new(ApiClient::new_with_base_url(
            format!("{}/api", server.uri()),
        )));
        let err = repo
            .update(UpdateProfileRequest {
                current_password: Some("old".into()),
                new_password: Some("new-password".into()),
                ..Default::default()
            })
            .await
            .unwrap_err();
        assert_eq!(err.code, "VALIDATION_ERROR");
        assert_eq!(err.error, "Current password is incorrect");
    }
}
