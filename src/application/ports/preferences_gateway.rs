use crate::domain::entities::UserPreferences;
use crate::shared::error::AppError;
use async_trait::async_trait;

/// ログインユーザーの推薦設定の読み書き。
#[async_trait]
pub trait PreferencesGateway: Send + Sync {
    async fn fetch_preferences(&self) -> Result<UserPreferences, AppError>;
    /// 保存後にサーバーが受け付けた値を返す。
    async fn save_preferences(
        &self,
        preferences: &UserPreferences,
    ) -> Result<UserPreferences, AppError>;
}
