use crate::application::ports::{
    ActionObserver, RecommendationGateway, RecommendationStatus, StatusPatch,
};
use crate::application::services::optimistic_tracker::OptimisticTracker;
use crate::application::services::recommendation_actions::RecommendationActions;
use crate::application::services::recommendation_filter::{ListCriteria, filter_and_sort};
use crate::domain::entities::Recommendation;
use crate::domain::value_objects::{ListingId, RecommendationAction, StatusField};
use crate::shared::error::AppError;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tracing::{debug, info, warn};

fn lock_tracker(tracker: &Mutex<OptimisticTracker>) -> MutexGuard<'_, OptimisticTracker> {
    tracker.lock().unwrap_or_else(PoisonError::into_inner)
}

/// ディスパッチャーの結果を楽観的更新の確定・巻き戻しへ変換する。
struct TrackerReconciler {
    tracker: Arc<Mutex<OptimisticTracker>>,
}

impl ActionObserver for TrackerReconciler {
    fn on_success(&self, action: RecommendationAction, listing_id: ListingId) {
        if let Some(field) = action.field() {
            lock_tracker(&self.tracker).confirm_optimistic_update(listing_id, field);
        }
    }

    fn on_error(&self, _error: &AppError, action: RecommendationAction, listing_id: ListingId) {
        if let Some(field) = action.field() {
            lock_tracker(&self.tracker).revert_optimistic_update(listing_id, field);
        }
    }
}

/// 一覧項目に対するユーザー操作。
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ItemInteraction {
    Click,
    Key(String),
    SaveButton,
    OpenLink,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InteractionOutcome {
    Ignored,
    MarkedViewed,
    ToggledSaved,
    OpenLink(String),
}

/// 描画用に一覧項目とその操作状態をまとめたもの。
#[derive(Debug, Clone, PartialEq)]
pub struct ListItemView {
    pub recommendation: Recommendation,
    pub loading: bool,
    pub error: Option<String>,
}

pub struct RecommendationExplorer {
    gateway: Arc<dyn RecommendationGateway>,
    tracker: Arc<Mutex<OptimisticTracker>>,
    actions: RecommendationActions,
    load_error: Mutex<Option<String>>,
}

impl RecommendationExplorer {
    pub fn new(gateway: Arc<dyn RecommendationGateway>) -> Self {
        let tracker = Arc::new(Mutex::new(OptimisticTracker::default()));
        let reconciler = Arc::new(TrackerReconciler {
            tracker: Arc::clone(&tracker),
        });
        let actions = RecommendationActions::new(Arc::clone(&gateway)).with_observer(reconciler);
        Self {
            gateway,
            tracker,
            actions,
            load_error: Mutex::new(None),
        }
    }

    /// 推薦一覧を取得して保持中のリストを置き換える。
    ///
    /// 失敗時は保持中のリストを空にし、エラーメッセージを記録したうえでエラーを返す。
    pub async fn load(&self) -> Result<usize, AppError> {
        match self.gateway.fetch_recommendations().await {
            Ok(records) => {
                let count = records.len();
                lock_tracker(&self.tracker).replace_records(records);
                *self.lock_load_error() = None;
                info!(count, "loaded recommendations");
                Ok(count)
            }
            Err(err) => {
                warn!(error = %err, "failed to load recommendations");
                lock_tracker(&self.tracker).replace_records(Vec::new());
                *self.lock_load_error() = Some(err.user_message());
                Err(err)
            }
        }
    }

    pub fn load_error(&self) -> Option<String> {
        self.lock_load_error().clone()
    }

    pub fn records(&self) -> Vec<Recommendation> {
        lock_tracker(&self.tracker).records().to_vec()
    }

    pub fn get(&self, listing_id: ListingId) -> Option<Recommendation> {
        lock_tracker(&self.tracker).get(listing_id).cloned()
    }

    pub fn visible(&self, criteria: &ListCriteria) -> Vec<Recommendation> {
        filter_and_sort(lock_tracker(&self.tracker).records(), criteria)
    }

    pub fn actions(&self) -> &RecommendationActions {
        &self.actions
    }

    /// 閲覧済みへ楽観的に更新してからリモートへ通知する。
    ///
    /// 未知の項目や既に閲覧済みの項目では何もせず `false` を返す。
    pub async fn handle_mark_as_viewed(&self, listing_id: ListingId) -> bool {
        {
            let mut tracker = lock_tracker(&self.tracker);
            match tracker.get(listing_id).map(Recommendation::is_viewed) {
                None => {
                    debug!(listing_id = %listing_id, "mark as viewed ignored for unknown listing");
                    return false;
                }
                Some(true) => {
                    debug!(listing_id = %listing_id, "listing already viewed");
                    return false;
                }
                Some(false) => {}
            }
            if tracker
                .apply_optimistic_update(listing_id, StatusField::IsViewed, true)
                .is_none()
            {
                return false;
            }
        }
        self.actions.mark_as_viewed(listing_id).await;
        true
    }

    /// 保存状態を楽観的に反転してからリモートへ通知する。
    ///
    /// 同じ項目の操作が進行中の場合は何もせず `false` を返す。
    pub async fn handle_toggle_saved(&self, listing_id: ListingId) -> bool {
        if self.actions.is_loading(listing_id) {
            debug!(listing_id = %listing_id, "toggle ignored while request is in flight");
            return false;
        }
        let applied = {
            let mut tracker = lock_tracker(&self.tracker);
            let Some(current_saved) = tracker.get(listing_id).map(Recommendation::is_saved) else {
                return false;
            };
            tracker
                .apply_optimistic_update(listing_id, StatusField::IsSaved, !current_saved)
                .map(|update| update.original_value)
        };
        let Some(current_saved) = applied else {
            return false;
        };
        self.actions.toggle_saved(listing_id, current_saved).await;
        true
    }

    pub async fn handle_interaction(
        &self,
        listing_id: ListingId,
        interaction: ItemInteraction,
    ) -> InteractionOutcome {
        let Some(record) = self.get(listing_id) else {
            return InteractionOutcome::Ignored;
        };

        match interaction {
            ItemInteraction::Click => self.open_item(&record).await,
            ItemInteraction::Key(key) if key == "Enter" => self.open_item(&record).await,
            ItemInteraction::Key(_) => InteractionOutcome::Ignored,
            ItemInteraction::SaveButton => {
                if self.handle_toggle_saved(listing_id).await {
                    InteractionOutcome::ToggledSaved
                } else {
                    InteractionOutcome::Ignored
                }
            }
            ItemInteraction::OpenLink => {
                InteractionOutcome::OpenLink(record.details().link.clone())
            }
        }
    }

    async fn open_item(&self, record: &Recommendation) -> InteractionOutcome {
        if self.handle_mark_as_viewed(record.id()).await {
            InteractionOutcome::MarkedViewed
        } else {
            InteractionOutcome::Ignored
        }
    }

    /// 状態を直接書き換える。楽観的更新は行わない。
    pub async fn update_status(&self, listing_id: ListingId, patch: StatusPatch) {
        self.actions.update_status(listing_id, patch).await;
    }

    pub async fn fetch_status(&self, listing_id: ListingId) -> Result<RecommendationStatus, AppError> {
        self.gateway.get_status(listing_id).await
    }

    pub fn item_view(&self, listing_id: ListingId) -> Option<ListItemView> {
        let recommendation = self.get(listing_id)?;
        Some(ListItemView {
            recommendation,
            loading: self.actions.is_loading(listing_id),
            error: self.actions.error(listing_id),
        })
    }

    pub fn has_pending(&self, listing_id: ListingId, field: StatusField) -> bool {
        lock_tracker(&self.tracker).has_pending(listing_id, field)
    }

    fn lock_load_error(&self) -> MutexGuard<'_, Option<String>> {
        self.load_error.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
