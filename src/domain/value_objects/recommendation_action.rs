use super::StatusField;
use serde::{Deserialize, Serialize};
use std::fmt;

/// ディスパッチャーがコールバックへ渡すアクション名。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecommendationAction {
    Viewed,
    Saved,
    Unsaved,
    Updated,
}

impl RecommendationAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            RecommendationAction::Viewed => "viewed",
            RecommendationAction::Saved => "saved",
            RecommendationAction::Unsaved => "unsaved",
            RecommendationAction::Updated => "updated",
        }
    }

    /// 楽観的更新と対応するフィールド。`Updated` は複数フィールドに跨るため `None`。
    pub fn field(&self) -> Option<StatusField> {
        match self {
            RecommendationAction::Viewed => Some(StatusField::IsViewed),
            RecommendationAction::Saved | RecommendationAction::Unsaved => {
                Some(StatusField::IsSaved)
            }
            RecommendationAction::Updated => None,
        }
    }

    pub fn for_toggle(current_saved: bool) -> Self {
        if current_saved {
            RecommendationAction::Unsaved
        } else {
            RecommendationAction::Saved
        }
    }
}

impl fmt::Display for RecommendationAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggle_action_depends_on_current_state() {
        assert_eq!(
            RecommendationAction::for_toggle(true),
            RecommendationAction::Unsaved
        );
        assert_eq!(
            RecommendationAction::for_toggle(false),
            RecommendationAction::Saved
        );
    }

    #[test]
    fn maps_actions_to_fields() {
        assert_eq!(
            RecommendationAction::Viewed.field(),
            Some(StatusField::IsViewed)
        );
        assert_eq!(
            RecommendationAction::Unsaved.field(),
            Some(StatusField::IsSaved)
        );
        assert_eq!(RecommendationAction::Updated.field(), None);
        assert_eq!(RecommendationAction::Saved.to_string(), "saved");
    }
}
