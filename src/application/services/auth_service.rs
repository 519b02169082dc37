use crate::application::ports::{AuthGateway, SessionStore};
use crate::domain::entities::{Session, UserProfile};
use crate::shared::error::AppError;
use chrono::{Duration, Utc};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tracing::{info, warn};

pub struct AuthService {
    gateway: Arc<dyn AuthGateway>,
    store: Arc<dyn SessionStore>,
    session_ttl: Option<Duration>,
    current: Mutex<Arc<Session>>,
}

impl AuthService {
    pub fn new(
        gateway: Arc<dyn AuthGateway>,
        store: Arc<dyn SessionStore>,
        session_ttl: Option<Duration>,
    ) -> Self {
        Self {
            gateway,
            store,
            session_ttl,
            current: Mutex::new(Arc::new(Session::anonymous())),
        }
    }

    pub fn current_session(&self) -> Arc<Session> {
        Arc::clone(&self.lock_current())
    }

    /// ログインしてセッションを保存する
    pub async fn login(&self, username: &str, password: &str) -> Result<Arc<Session>, AppError> {
        if username.trim().is_empty() || password.is_empty() {
            return Err(AppError::InvalidInput(
                "Username and password are required".to_string(),
            ));
        }

        let token = self.gateway.request_token(username, password).await?;
        let profile = self.gateway.current_user(&token).await?;
        let session = Session::authenticated(token, Some(profile), self.session_ttl);
        self.store.save(&session).await?;

        info!(username = %username, "logged in");
        Ok(self.replace_current(session))
    }

    /// アカウントを作成する。セッションは変更しないので、続けて `login` が必要。
    pub async fn register(
        &self,
        username: &str,
        email: &str,
        password: &str,
    ) -> Result<UserProfile, AppError> {
        let username = username.trim();
        let email = email.trim();
        if username.is_empty() || password.is_empty() {
            return Err(AppError::InvalidInput(
                "Username and password are required".to_string(),
            ));
        }
        if !is_plausible_email(email) {
            return Err(AppError::InvalidInput(format!("Invalid email address: {email}")));
        }

        let profile = self.gateway.register(username, email, password).await?;
        info!(username = %profile.username, user_id = profile.id, "account created");
        Ok(profile)
    }

    /// ログアウトしてセッションを破棄する
    pub async fn logout(&self) -> Result<(), AppError> {
        self.store.clear().await?;
        self.replace_current(Session::anonymous());
        info!("logged out");
        Ok(())
    }

    /// 保存済みセッションを読み込み、`/users/me` で有効性を確認する。
    ///
    /// 401 の場合は破棄し、通信エラーなどでは保存済みのセッションをそのまま使う。
    pub async fn restore(&self) -> Result<Arc<Session>, AppError> {
        let Some(stored) = self.store.load().await? else {
            return Ok(self.replace_current(Session::anonymous()));
        };

        let token = match stored.bearer_token(Utc::now()) {
            Ok(token) => token.clone(),
            Err(err) => {
                info!(reason = %err, "discarding stored session");
                self.store.clear().await?;
                return Ok(self.replace_current(Session::anonymous()));
            }
        };

        match self.gateway.current_user(&token).await {
            Ok(profile) => {
                let refreshed = stored.with_profile(profile);
                self.store.save(&refreshed).await?;
                Ok(self.replace_current(refreshed))
            }
            Err(err) if is_rejected_token(&err) => {
                info!("stored session rejected by server");
                self.store.clear().await?;
                Ok(self.replace_current(Session::anonymous()))
            }
            Err(err) => {
                warn!(error = %err, "could not validate stored session, keeping it");
                Ok(self.replace_current(stored))
            }
        }
    }

    fn replace_current(&self, session: Session) -> Arc<Session> {
        let session = Arc::new(session);
        *self.lock_current() = Arc::clone(&session);
        session
    }

    fn lock_current(&self) -> MutexGuard<'_, Arc<Session>> {
        self.current.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

fn is_plausible_email(email: &str) -> bool {
    email
        .split_once('@')
        .is_some_and(|(local, domain)| !local.is_empty() && domain.contains('.'))
}

fn is_rejected_token(err: &AppError) -> bool {
    matches!(err, AppError::Unauthorized(_)) || err.status_code() == Some(401)
}
