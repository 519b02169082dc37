use crate::domain::entities::UserProfile;
use crate::domain::value_objects::AccessToken;
use crate::shared::error::AppError;
use async_trait::async_trait;

#[async_trait]
pub trait AuthGateway: Send + Sync {
    async fn request_token(&self, username: &str, password: &str)
    -> Result<AccessToken, AppError>;
    async fn current_user(&self, token: &AccessToken) -> Result<UserProfile, AppError>;
    /// アカウントを作成する。トークンは発行されない。
    async fn register(
        &self,
        username: &str,
        email: &str,
        password: &str,
    ) -> Result<UserProfile, AppError>;
}
