use crate::domain::value_objects::{ListingId, RecommendationAction};
use crate::shared::error::AppError;

/// ディスパッチャーの成功・失敗通知を受け取る側。
///
/// 呼び出しは同期的で、ディスパッチャーの内部状態のロックを保持していない。
pub trait ActionObserver: Send + Sync {
    fn on_success(&self, action: RecommendationAction, listing_id: ListingId);
    fn on_error(&self, error: &AppError, action: RecommendationAction, listing_id: ListingId);
}
