use serde::{Deserialize, Serialize};
use std::fmt;

/// 楽観的更新の対象になる真偽値フィールド。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusField {
    IsViewed,
    IsSaved,
}

impl StatusField {
    pub fn as_str(&self) -> &'static str {
        match self {
            StatusField::IsViewed => "is_viewed",
            StatusField::IsSaved => "is_saved",
        }
    }
}

impl fmt::Display for StatusField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
