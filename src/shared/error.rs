use thiserror::Error;

/// 認証トークンが無い場合にユーザーへ表示するメッセージ。
pub const MISSING_TOKEN_MESSAGE: &str = "Token d'authentification manquant";
/// エラーがメッセージを持たない場合のフォールバック。
pub const UNKNOWN_ERROR_MESSAGE: &str = "Erreur inconnue";

#[derive(Debug, Error)]
pub enum AppError {
    #[error("{}", MISSING_TOKEN_MESSAGE)]
    MissingToken,

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("{message}")]
    Http { status: u16, message: String },

    #[error("Network error: {0}")]
    Network(String),

    #[error("Deserialization error: {0}")]
    DeserializationError(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Configuration error: {0}")]
    ConfigurationError(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// 非 2xx レスポンスからエラーを組み立てる。
    ///
    /// ボディを JSON として解釈し（失敗時は空オブジェクト扱い）、`detail`
    /// があればそれをメッセージに、無ければ `Erreur HTTP {status}` を使う。
    pub fn from_http_response(status: u16, body: &str) -> Self {
        let payload: serde_json::Value =
            serde_json::from_str(body).unwrap_or_else(|_| serde_json::json!({}));
        let message = match payload.get("detail") {
            Some(serde_json::Value::String(detail)) if !detail.is_empty() => detail.clone(),
            Some(serde_json::Value::Null) | None => format!("Erreur HTTP {status}"),
            Some(serde_json::Value::String(_)) => format!("Erreur HTTP {status}"),
            Some(other) => other.to_string(),
        };
        AppError::Http { status, message }
    }

    pub fn status_code(&self) -> Option<u16> {
        match self {
            AppError::Http { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// リスト項目にインライン表示する文字列。
    pub fn user_message(&self) -> String {
        let message = self.to_string();
        if message.trim().is_empty() {
            UNKNOWN_ERROR_MESSAGE.to_string()
        } else {
            message
        }
    }
}

impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        AppError::Network(err.to_string())
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::DeserializationError(err.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::Storage(err.to_string())
    }
}

impl From<String> for AppError {
    fn from(err: String) -> Self {
        AppError::Internal(err)
    }
}

impl From<&str> for AppError {
    fn from(err: &str) -> Self {
        AppError::Internal(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
