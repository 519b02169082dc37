use crate::domain::entities::UserProfile;
use crate::domain::value_objects::AccessToken;
use crate::shared::error::AppError;
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// 認証済みセッション。生成後は変更せず、更新時は新しい値に差し替える。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    access_token: Option<AccessToken>,
    profile: Option<UserProfile>,
    issued_at: DateTime<Utc>,
    expires_at: Option<DateTime<Utc>>,
}

impl Session {
    pub fn anonymous() -> Self {
        Self {
            access_token: None,
            profile: None,
            issued_at: Utc::now(),
            expires_at: None,
        }
    }

    pub fn authenticated(
        access_token: AccessToken,
        profile: Option<UserProfile>,
        ttl: Option<Duration>,
    ) -> Self {
        let issued_at = Utc::now();
        Self {
            access_token: Some(access_token),
            profile,
            issued_at,
            expires_at: ttl.map(|ttl| issued_at + ttl),
        }
    }

    pub fn with_profile(&self, profile: UserProfile) -> Self {
        Self {
            profile: Some(profile),
            ..self.clone()
        }
    }

    pub fn access_token(&self) -> Option<&AccessToken> {
        self.access_token.as_ref()
    }

    pub fn profile(&self) -> Option<&UserProfile> {
        self.profile.as_ref()
    }

    pub fn issued_at(&self) -> DateTime<Utc> {
        self.issued_at
    }

    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        self.expires_at
    }

    pub fn is_authenticated(&self) -> bool {
        self.access_token.is_some()
    }

    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires_at.is_some_and(|exp| exp <= now)
    }

    /// API 呼び出し前の唯一のトークン検証経路。
    pub fn bearer_token(&self, now: DateTime<Utc>) -> Result<&AccessToken, AppError> {
        let Some(token) = self.access_token.as_ref() else {
            return Err(AppError::MissingToken);
        };
        if self.is_expired(now) {
            return Err(AppError::Unauthorized("Session has expired".to_string()));
        }
        Ok(token)
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::anonymous()
    }
}
