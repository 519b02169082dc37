use crate::domain::entities::Recommendation;
use crate::domain::value_objects::ListingId;
use crate::shared::error::AppError;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// view / save / unsave / status 更新の応答。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatusChange {
    pub message: String,
    #[serde(default)]
    pub recommendation_id: Option<ListingId>,
    #[serde(default)]
    pub is_viewed: Option<bool>,
    #[serde(default)]
    pub is_saved: Option<bool>,
}

/// `PATCH /recommendations/{id}/status` のボディ。指定されたフィールドのみ送る。
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_saved: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_viewed: Option<bool>,
}

impl StatusPatch {
    pub fn is_empty(&self) -> bool {
        self.is_saved.is_none() && self.is_viewed.is_none()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecommendationStatus {
    pub is_saved: bool,
    pub is_viewed: bool,
    pub listing_id: ListingId,
    pub user_id: i64,
}

#[async_trait]
pub trait RecommendationGateway: Send + Sync {
    async fn fetch_recommendations(&self) -> Result<Vec<Recommendation>, AppError>;
    async fn mark_viewed(&self, listing_id: ListingId) -> Result<StatusChange, AppError>;
    async fn save(&self, listing_id: ListingId) -> Result<StatusChange, AppError>;
    async fn unsave(&self, listing_id: ListingId) -> Result<StatusChange, AppError>;
    async fn update_status(
        &self,
        listing_id: ListingId,
        patch: StatusPatch,
    ) -> Result<StatusChange, AppError>;
    async fn get_status(&self, listing_id: ListingId) -> Result<RecommendationStatus, AppError>;
}
