use crate::application::ports::SessionStore;
use crate::domain::entities::Session;
use crate::shared::error::AppError;
use async_trait::async_trait;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs;

/// セッションを JSON ファイルに保存する。書き込みは一時ファイル経由で置き換える。
pub struct FileSessionStore {
    path: PathBuf,
}

impl FileSessionStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|name| name.to_os_string())
            .unwrap_or_else(|| "session.json".into());
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

#[async_trait]
impl SessionStore for FileSessionStore {
    async fn load(&self) -> Result<Option<Session>, AppError> {
        let bytes = match fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(None),
            Err(err) => {
                return Err(AppError::Storage(format!(
                    "Failed to read session file: {err}"
                )));
            }
        };
        if bytes.is_empty() {
            return Ok(None);
        }
        let session = serde_json::from_slice(&bytes).map_err(|err| {
            AppError::DeserializationError(format!("Failed to parse session file: {err}"))
        })?;
        Ok(Some(session))
    }

    async fn save(&self, session: &Session) -> Result<(), AppError> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent).await.map_err(|err| {
                AppError::Storage(format!("Failed to create session dir: {err}"))
            })?;
        }
        let json = serde_json::to_vec_pretty(session).map_err(|err| {
            AppError::SerializationError(format!("Failed to serialize session: {err}"))
        })?;
        let temp_path = self.temp_path();
        fs::write(&temp_path, json)
            .await
            .map_err(|err| AppError::Storage(format!("Failed to write session file: {err}")))?;
        fs::rename(&temp_path, &self.path)
            .await
            .map_err(|err| AppError::Storage(format!("Failed to replace session file: {err}")))
    }

    async fn clear(&self) -> Result<(), AppError> {
        match fs::remove_file(&self.path).await {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(()),
            Err(err) => Err(AppError::Storage(format!(
                "Failed to remove session file: {err}"
            ))),
        }
    }
}
