use crate::application::ports::PreferencesGateway;
use crate::domain::entities::{Session, UserPreferences};
use crate::infrastructure::http::client::{ApiClient, send_json};
use crate::shared::error::AppError;
use async_trait::async_trait;
use reqwest::Method;
use std::sync::Arc;

/// `GET` / `POST /preferences` の HTTP 実装。
pub struct HttpPreferencesGateway {
    api: ApiClient,
    session: Arc<Session>,
}

impl HttpPreferencesGateway {
    pub fn new(api: ApiClient, session: Arc<Session>) -> Self {
        Self { api, session }
    }
}

#[async_trait]
impl PreferencesGateway for HttpPreferencesGateway {
    async fn fetch_preferences(&self) -> Result<UserPreferences, AppError> {
        let builder = self
            .api
            .authorized_request(Method::GET, "/preferences", &self.session)?;
        send_json(builder).await
    }

    async fn save_preferences(
        &self,
        preferences: &UserPreferences,
    ) -> Result<UserPreferences, AppError> {
        let builder = self
            .api
            .authorized_request(Method::POST, "/preferences", &self.session)?
            .json(preferences);
        send_json(builder).await
    }
}
