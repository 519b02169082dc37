use crate::application::ports::{
    RecommendationGateway, RecommendationStatus, StatusChange, StatusPatch,
};
use crate::domain::entities::{Recommendation, Session};
use crate::domain::value_objects::ListingId;
use crate::infrastructure::http::client::{ApiClient, send_json};
use crate::shared::error::AppError;
use async_trait::async_trait;
use reqwest::{Method, RequestBuilder};
use serde::Deserialize;
use std::sync::Arc;
use tracing::debug;

/// `GET /recommendations` の応答。
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RecommendationEnvelope {
    recommendations: Vec<Recommendation>,
    #[serde(default)]
    has_recommendations: Option<bool>,
}

/// 推薦 API の HTTP 実装。すべての呼び出しに Bearer トークンが必要。
pub struct HttpRecommendationGateway {
    api: ApiClient,
    session: Arc<Session>,
}

impl HttpRecommendationGateway {
    pub fn new(api: ApiClient, session: Arc<Session>) -> Self {
        Self { api, session }
    }

    fn authorized_request(&self, method: Method, path: &str) -> Result<RequestBuilder, AppError> {
        self.api.authorized_request(method, path, &self.session)
    }
}

#[async_trait]
impl RecommendationGateway for HttpRecommendationGateway {
    async fn fetch_recommendations(&self) -> Result<Vec<Recommendation>, AppError> {
        let builder = self.authorized_request(Method::GET, "/recommendations")?;
        let envelope: RecommendationEnvelope = send_json(builder).await?;
        debug!(
            count = envelope.recommendations.len(),
            has_recommendations = ?envelope.has_recommendations,
            "fetched recommendations"
        );
        Ok(envelope.recommendations)
    }

    async fn mark_viewed(&self, listing_id: ListingId) -> Result<StatusChange, AppError> {
        let path = format!("/recommendations/{listing_id}/view");
        let builder = self.authorized_request(Method::POST, &path)?;
        send_json(builder).await
    }

    async fn save(&self, listing_id: ListingId) -> Result<StatusChange, AppError> {
        let path = format!("/recommendations/{listing_id}/save");
        let builder = self.authorized_request(Method::POST, &path)?;
        send_json(builder).await
    }

    async fn unsave(&self, listing_id: ListingId) -> Result<StatusChange, AppError> {
        let path = format!("/recommendations/{listing_id}/save");
        let builder = self.authorized_request(Method::DELETE, &path)?;
        send_json(builder).await
    }

    async fn update_status(
        &self,
        listing_id: ListingId,
        patch: StatusPatch,
    ) -> Result<StatusChange, AppError> {
        let path = format!("/recommendations/{listing_id}/status");
        let builder = self.authorized_request(Method::PATCH, &path)?.json(&patch);
        send_json(builder).await
    }

    async fn get_status(&self, listing_id: ListingId) -> Result<RecommendationStatus, AppError> {
        let path = format!("/recommendations/{listing_id}/status");
        let builder = self.authorized_request(Method::GET, &path)?;
        send_json(builder).await
    }
}
