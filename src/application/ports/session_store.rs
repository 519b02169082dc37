use crate::domain::entities::Session;
use crate::shared::error::AppError;
use async_trait::async_trait;

/// セッションの永続化先。
#[async_trait]
pub trait SessionStore: Send + Sync {
    async fn load(&self) -> Result<Option<Session>, AppError>;
    async fn save(&self, session: &Session) -> Result<(), AppError>;
    async fn clear(&self) -> Result<(), AppError>;
}
