use reqwest::Url;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub const DEFAULT_API_BASE_URL: &str = "http://127.0.0.1:8000";
const APP_DIR_NAME: &str = "stage-explorer";
const SESSION_FILE_NAME: &str = "session.json";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub api: ApiConfig,
    pub session: SessionConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    pub base_url: String,
    pub user_agent: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    pub file_path: PathBuf,
    // None の場合はサーバー側の失効 (401) のみで判定する
    #[serde(default)]
    pub ttl_minutes: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
    pub json: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api: ApiConfig {
                base_url: DEFAULT_API_BASE_URL.to_string(),
                user_agent: format!("stage-explorer/{}", env!("CARGO_PKG_VERSION")),
            },
            session: SessionConfig {
                file_path: default_session_path(),
                ttl_minutes: None,
            },
            logging: LoggingConfig {
                level: "info".to_string(),
                json: false,
            },
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// 任意の参照関数から設定を組み立てる。`from_env` とテストで共有する。
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut cfg = Self::default();

        if let Some(v) = lookup("STAGE_EXPLORER_API_URL") {
            let trimmed = v.trim();
            if !trimmed.is_empty() {
                cfg.api.base_url = trimmed.trim_end_matches('/').to_string();
            }
        }
        if let Some(v) = lookup("STAGE_EXPLORER_SESSION_FILE") {
            let trimmed = v.trim();
            if !trimmed.is_empty() {
                cfg.session.file_path = PathBuf::from(trimmed);
            }
        }
        if let Some(v) = lookup("STAGE_EXPLORER_SESSION_TTL_MINUTES")
            && let Some(value) = parse_u64(&v)
        {
            cfg.session.ttl_minutes = if value == 0 { None } else { Some(value) };
        }
        if let Some(v) = lookup("STAGE_EXPLORER_LOG_LEVEL") {
            let trimmed = v.trim();
            if !trimmed.is_empty() {
                cfg.logging.level = trimmed.to_string();
            }
        }
        if let Some(v) = lookup("STAGE_EXPLORER_JSON_LOGS") {
            cfg.logging.json = parse_bool(&v, cfg.logging.json);
        }

        cfg
    }

    pub fn validate(&self) -> Result<(), String> {
        let url = Url::parse(&self.api.base_url)
            .map_err(|err| format!("API base_url is invalid: {err}"))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err("API base_url scheme must be http or https".to_string());
        }
        if let Some(ttl) = self.session.ttl_minutes
            && ttl == 0
        {
            return Err("Session ttl_minutes must be greater than 0".to_string());
        }
        if self.logging.level.trim().is_empty() {
            return Err("Logging level must not be empty".to_string());
        }
        Ok(())
    }
}

fn default_session_path() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_DIR_NAME)
        .join(SESSION_FILE_NAME)
}

fn parse_bool(s: &str, default: bool) -> bool {
    match s.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => true,
        "0" | "false" | "no" | "off" => false,
        _ => default,
    }
}

fn parse_u64(value: &str) -> Option<u64> {
    value.trim().parse::<u64>().ok()
}
