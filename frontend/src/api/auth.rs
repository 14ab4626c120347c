use reqwest::Method;

use super::{
    client::ApiClient,
    types::{ApiError, LoginRequest, LoginResponse, RegisterRequest, UpdateProfileRequest, UserResponse},
};

impl ApiClient {
    pub async fn login(&self, request: LoginRequest) -> Result<LoginResponse, ApiError> {
        let response: LoginResponse = self.send_json(Method::POST, "/auth/login", &request).await?;
        self.session().sign_in(
            response.user.clone(),
            response.token.clone(),
            response.refresh_token.clone(),
        );
        Ok(response)
    }

    pub async fn register(&self, request: RegisterRequest) -> Result<LoginResponse, ApiError> {
        let response: LoginResponse = self
            .send_json(Method::POST, "/auth/register", &request)
            .await?;
        self.session().sign_in(
            response.user.clone(),
            response.token.clone(),
            response.refresh_token.clone(),
        );
        Ok(response)
    }

    /// Best effort: the local session is cleared even when the call fails.
    pub async fn logout(&self) -> Result<(), ApiError> {
        let result = self.send_empty(Method::POST, "/auth/logout").await;
        self.session().clear();
        result
    }

    pub async fn get_me(&self) -> Result<UserResponse, ApiError> {
        let user: UserResponse = self.get_json("/auth/profile").await?;
        self.session().update_user(user.clone());
        Ok(user)
    }

    pub async fn update_profile(
        &self,
        request: UpdateProfileRequest,
    ) -> Result<UserResponse, ApiError> {
        let user: UserResponse = self
            .send_json(Method::PATCH, "/auth/profile", &request)
            .await?;
        self.session().update_user(user.clone());
        Ok(user)
    }
}
