use crate::application::ports::{ActionObserver, RecommendationGateway, StatusChange, StatusPatch};
use crate::domain::value_objects::{ListingId, RecommendationAction};
use crate::shared::error::AppError;
use std::collections::HashMap;
use std::future::Future;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tracing::{debug, warn};

#[derive(Debug, Default)]
struct ActionState {
    loading: HashMap<ListingId, bool>,
    errors: HashMap<ListingId, Option<String>>,
}

/// 推薦に対するリモート操作を発行し、ID ごとの読み込み状態とエラーを保持する。
///
/// 失敗は呼び出し元へ返さず、状態と observer への通知で伝える。
/// 同じ ID への呼び出しが重なっても直列化しない。
pub struct RecommendationActions {
    gateway: Arc<dyn RecommendationGateway>,
    observer: Option<Arc<dyn ActionObserver>>,
    state: Mutex<ActionState>,
}

impl RecommendationActions {
    pub fn new(gateway: Arc<dyn RecommendationGateway>) -> Self {
        Self {
            gateway,
            observer: None,
            state: Mutex::new(ActionState::default()),
        }
    }

    pub fn with_observer(mut self, observer: Arc<dyn ActionObserver>) -> Self {
        self.observer = Some(observer);
        self
    }

    /// 閲覧済みにする
    pub async fn mark_as_viewed(&self, listing_id: ListingId) {
        self.run(
            listing_id,
            RecommendationAction::Viewed,
            self.gateway.mark_viewed(listing_id),
        )
        .await;
    }

    /// 保存状態を反転する。`current_saved` が true なら保存解除。
    pub async fn toggle_saved(&self, listing_id: ListingId, current_saved: bool) {
        let action = RecommendationAction::for_toggle(current_saved);
        if current_saved {
            self.run(listing_id, action, self.gateway.unsave(listing_id))
                .await;
        } else {
            self.run(listing_id, action, self.gateway.save(listing_id))
                .await;
        }
    }

    pub async fn update_status(&self, listing_id: ListingId, patch: StatusPatch) {
        self.run(
            listing_id,
            RecommendationAction::Updated,
            self.gateway.update_status(listing_id, patch),
        )
        .await;
    }

    pub fn is_loading(&self, listing_id: ListingId) -> bool {
        self.lock()
            .loading
            .get(&listing_id)
            .copied()
            .unwrap_or(false)
    }

    pub fn error(&self, listing_id: ListingId) -> Option<String> {
        self.lock().errors.get(&listing_id).cloned().flatten()
    }

    pub fn loading_snapshot(&self) -> HashMap<ListingId, bool> {
        self.lock().loading.clone()
    }

    pub fn errors_snapshot(&self) -> HashMap<ListingId, Option<String>> {
        self.lock().errors.clone()
    }

    async fn run<F>(&self, listing_id: ListingId, action: RecommendationAction, call: F)
    where
        F: Future<Output = Result<StatusChange, AppError>>,
    {
        self.begin(listing_id);

        match call.await {
            Ok(change) => {
                debug!(
                    listing_id = %listing_id,
                    action = action.as_str(),
                    message = %change.message,
                    "recommendation action succeeded"
                );
                if let Some(observer) = &self.observer {
                    observer.on_success(action, listing_id);
                }
            }
            Err(err) => {
                let message = err.user_message();
                warn!(
                    listing_id = %listing_id,
                    action = action.as_str(),
                    error = %message,
                    "recommendation action failed"
                );
                self.lock().errors.insert(listing_id, Some(message));
                if let Some(observer) = &self.observer {
                    observer.on_error(&err, action, listing_id);
                }
            }
        }

        self.lock().loading.insert(listing_id, false);
    }

    fn begin(&self, listing_id: ListingId) {
        let mut state = self.lock();
        state.loading.insert(listing_id, true);
        state.errors.insert(listing_id, None);
    }

    fn lock(&self) -> MutexGuard<'_, ActionState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::RecommendationStatus;
    use crate::domain::entities::Recommendation;
    use async_trait::async_trait;
    use mockall::{mock, predicate::*};
    use tokio::sync::{Notify, oneshot};

    mock! {
        pub Gateway {}

        #[async_trait]
        impl RecommendationGateway for Gateway {
            async fn fetch_recommendations(&self) -> Result<Vec<Recommendation>, AppError>;
            async fn mark_viewed(&self, listing_id: ListingId) -> Result<StatusChange, AppError>;
            async fn save(&self, listing_id: ListingId) -> Result<StatusChange, AppError>;
            async fn unsave(&self, listing_id: ListingId) -> Result<StatusChange, AppError>;
            async fn update_status(&self, listing_id: ListingId, patch: StatusPatch) -> Result<StatusChange, AppError>;
            async fn get_status(&self, listing_id: ListingId) -> Result<RecommendationStatus, AppError>;
        }
    }

    #[derive(Default)]
    struct RecordingObserver {
        successes: Mutex<Vec<(RecommendationAction, ListingId)>>,
        failures: Mutex<Vec<(String, RecommendationAction, ListingId)>>,
    }

    impl ActionObserver for RecordingObserver {
        fn on_success(&self, action: RecommendationAction, listing_id: ListingId) {
            self.successes.lock().unwrap().push((action, listing_id));
        }

        fn on_error(&self, error: &AppError, action: RecommendationAction, listing_id: ListingId) {
            self.failures
                .lock()
                .unwrap()
                .push((error.to_string(), action, listing_id));
        }
    }

    fn ok_change(message: &str) -> StatusChange {
        StatusChange {
            message: message.to_string(),
            recommendation_id: None,
            is_viewed: None,
            is_saved: None,
        }
    }

    #[tokio::test]
    async fn mark_as_viewed_notifies_success_and_clears_loading() {
        let mut gateway = MockGateway::new();
        gateway
            .expect_mark_viewed()
            .with(eq(ListingId::new(7)))
            .times(1)
            .returning(|_| Ok(ok_change("Recommandation marquée comme vue")));
        let observer = Arc::new(RecordingObserver::default());
        let actions = RecommendationActions::new(Arc::new(gateway)).with_observer(observer.clone());

        actions.mark_as_viewed(ListingId::new(7)).await;

        assert!(!actions.is_loading(ListingId::new(7)));
        assert_eq!(actions.error(ListingId::new(7)), None);
        assert_eq!(
            observer.successes.lock().unwrap().as_slice(),
            &[(RecommendationAction::Viewed, ListingId::new(7))]
        );
        assert!(observer.failures.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn toggle_saved_picks_endpoint_from_current_state() {
        let mut gateway = MockGateway::new();
        gateway
            .expect_save()
            .with(eq(ListingId::new(1)))
            .times(1)
            .returning(|_| Ok(ok_change("saved")));
        gateway
            .expect_unsave()
            .with(eq(ListingId::new(2)))
            .times(1)
            .returning(|_| Ok(ok_change("unsaved")));
        let observer = Arc::new(RecordingObserver::default());
        let actions = RecommendationActions::new(Arc::new(gateway)).with_observer(observer.clone());

        actions.toggle_saved(ListingId::new(1), false).await;
        actions.toggle_saved(ListingId::new(2), true).await;

        assert_eq!(
            observer.successes.lock().unwrap().as_slice(),
            &[
                (RecommendationAction::Saved, ListingId::new(1)),
                (RecommendationAction::Unsaved, ListingId::new(2)),
            ]
        );
    }

    #[tokio::test]
    async fn failure_records_message_and_notifies_error() {
        let mut gateway = MockGateway::new();
        gateway.expect_save().times(1).returning(|_| {
            Err(AppError::Http {
                status: 500,
                message: "Erreur HTTP 500".into(),
            })
        });
        let observer = Arc::new(RecordingObserver::default());
        let actions = RecommendationActions::new(Arc::new(gateway)).with_observer(observer.clone());

        actions.toggle_saved(ListingId::new(3), false).await;

        assert_eq!(
            actions.error(ListingId::new(3)).as_deref(),
            Some("Erreur HTTP 500")
        );
        assert!(!actions.is_loading(ListingId::new(3)));
        assert!(observer.successes.lock().unwrap().is_empty());
        assert_eq!(
            observer.failures.lock().unwrap().as_slice(),
            &[(
                "Erreur HTTP 500".to_string(),
                RecommendationAction::Saved,
                ListingId::new(3)
            )]
        );
    }

    #[tokio::test]
    async fn new_attempt_clears_previous_error() {
        let mut gateway = MockGateway::new();
        let mut calls = 0;
        gateway.expect_mark_viewed().times(2).returning(move |_| {
            calls += 1;
            if calls == 1 {
                Err(AppError::Network("connection refused".into()))
            } else {
                Ok(ok_change("ok"))
            }
        });
        let actions = RecommendationActions::new(Arc::new(gateway));
        let id = ListingId::new(4);

        actions.mark_as_viewed(id).await;
        assert!(actions.error(id).is_some());

        actions.mark_as_viewed(id).await;
        assert_eq!(actions.error(id), None);
        assert_eq!(actions.errors_snapshot().get(&id), Some(&None));
    }

    #[tokio::test]
    async fn update_status_forwards_patch_and_reports_updated() {
        let mut gateway = MockGateway::new();
        gateway
            .expect_update_status()
            .withf(|id, patch| {
                *id == ListingId::new(5)
                    && patch.is_saved == Some(true)
                    && patch.is_viewed.is_none()
            })
            .times(1)
            .returning(|_, _| Ok(ok_change("updated")));
        let observer = Arc::new(RecordingObserver::default());
        let actions = RecommendationActions::new(Arc::new(gateway)).with_observer(observer.clone());

        actions
            .update_status(
                ListingId::new(5),
                StatusPatch {
                    is_saved: Some(true),
                    is_viewed: None,
                },
            )
            .await;

        assert_eq!(
            observer.successes.lock().unwrap().as_slice(),
            &[(RecommendationAction::Updated, ListingId::new(5))]
        );
    }

    struct GatedGateway {
        started: Notify,
        release: Mutex<Option<oneshot::Receiver<Result<StatusChange, AppError>>>>,
    }

    #[async_trait]
    impl RecommendationGateway for GatedGateway {
        async fn fetch_recommendations(&self) -> Result<Vec<Recommendation>, AppError> {
            Ok(Vec::new())
        }

        async fn mark_viewed(&self, _listing_id: ListingId) -> Result<StatusChange, AppError> {
            Ok(ok_change("viewed"))
        }

        async fn save(&self, _listing_id: ListingId) -> Result<StatusChange, AppError> {
            self.started.notify_one();
            let receiver = self.release.lock().unwrap().take();
            match receiver {
                Some(receiver) => receiver
                    .await
                    .unwrap_or_else(|_| Err(AppError::Internal("gate dropped".into()))),
                None => Err(AppError::Internal("gate already used".into())),
            }
        }

        async fn unsave(&self, _listing_id: ListingId) -> Result<StatusChange, AppError> {
            Ok(ok_change("unsaved"))
        }

        async fn update_status(
            &self,
            _listing_id: ListingId,
            _patch: StatusPatch,
        ) -> Result<StatusChange, AppError> {
            Ok(ok_change("updated"))
        }

        async fn get_status(&self, listing_id: ListingId) -> Result<RecommendationStatus, AppError> {
            Ok(RecommendationStatus {
                is_saved: false,
                is_viewed: false,
                listing_id,
                user_id: 1,
            })
        }
    }

    #[tokio::test]
    async fn loading_is_true_while_call_is_in_flight() {
        let (sender, receiver) = oneshot::channel();
        let gateway = Arc::new(GatedGateway {
            started: Notify::new(),
            release: Mutex::new(Some(receiver)),
        });
        let actions = Arc::new(RecommendationActions::new(gateway.clone()));
        let id = ListingId::new(11);

        let task = {
            let actions = Arc::clone(&actions);
            tokio::spawn(async move { actions.toggle_saved(id, false).await })
        };

        gateway.started.notified().await;
        assert!(actions.is_loading(id));
        assert_eq!(actions.loading_snapshot().get(&id), Some(&true));

        sender.send(Ok(ok_change("saved"))).unwrap();
        task.await.unwrap();

        assert!(!actions.is_loading(id));
        assert_eq!(actions.error(id), None);
    }
}
