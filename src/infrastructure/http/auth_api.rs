use crate::application::ports::AuthGateway;
use crate::domain::entities::UserProfile;
use crate::domain::value_objects::AccessToken;
use crate::infrastructure::http::client::{ApiClient, send_json};
use crate::shared::error::AppError;
use async_trait::async_trait;
use reqwest::Method;
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
}

/// `POST /users` のボディ。
#[derive(Serialize)]
struct NewAccount<'a> {
    username: &'a str,
    email: &'a str,
    password: &'a str,
}

pub struct HttpAuthGateway {
    api: ApiClient,
}

impl HttpAuthGateway {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }
}

#[async_trait]
impl AuthGateway for HttpAuthGateway {
    async fn request_token(
        &self,
        username: &str,
        password: &str,
    ) -> Result<AccessToken, AppError> {
        let builder = self
            .api
            .request(Method::POST, "/token")
            .form(&[("username", username), ("password", password)]);
        let response: TokenResponse = send_json(builder).await?;
        AccessToken::new(response.access_token).map_err(AppError::DeserializationError)
    }

    async fn current_user(&self, token: &AccessToken) -> Result<UserProfile, AppError> {
        let builder = self
            .api
            .request(Method::GET, "/users/me")
            .bearer_auth(token.as_str());
        send_json(builder).await
    }

    async fn register(
        &self,
        username: &str,
        email: &str,
        password: &str,
    ) -> Result<UserProfile, AppError> {
        let builder = self.api.request(Method::POST, "/users").json(&NewAccount {
            username,
            email,
            password,
        });
        send_json(builder).await
    }
}
