use crate::application::ports::StatusPatch;
use crate::application::services::{
    AuthService, ItemInteraction, ListItemView, PreferencesService, RecommendationExplorer,
};
use crate::domain::value_objects::ListingId;
use crate::infrastructure::{
    ApiClient, FileSessionStore, HttpAuthGateway, HttpPreferencesGateway, HttpRecommendationGateway,
};
use crate::presentation::cli::{Commands, ListArgs, PreferencesCommand};
use crate::presentation::render;
use crate::shared::config::AppConfig;
use crate::shared::error::AppError;
use std::sync::Arc;
use tracing::info;

/// コマンド実行に必要な依存関係をまとめたもの。
pub struct AppContext {
    api: ApiClient,
    auth: AuthService,
}

impl AppContext {
    pub fn new(config: &AppConfig) -> Result<Self, AppError> {
        let api = ApiClient::new(&config.api)?;
        let store = Arc::new(FileSessionStore::new(config.session.file_path.clone()));
        let gateway = Arc::new(HttpAuthGateway::new(api.clone()));
        let ttl = config
            .session
            .ttl_minutes
            .and_then(|minutes| i64::try_from(minutes).ok())
            .map(chrono::Duration::minutes);
        let auth = AuthService::new(gateway, store, ttl);
        Ok(Self { api, auth })
    }

    /// 保存済みセッションを復元し、そのトークンで推薦 API を使う。
    async fn explorer(&self) -> Result<RecommendationExplorer, AppError> {
        let session = self.auth.restore().await?;
        let gateway = HttpRecommendationGateway::new(self.api.clone(), session);
        Ok(RecommendationExplorer::new(Arc::new(gateway)))
    }

    async fn preferences(&self) -> Result<PreferencesService, AppError> {
        let session = self.auth.restore().await?;
        let gateway = HttpPreferencesGateway::new(self.api.clone(), session);
        Ok(PreferencesService::new(Arc::new(gateway)))
    }

    async fn loaded_explorer(&self) -> Result<RecommendationExplorer, AppError> {
        let explorer = self.explorer().await?;
        explorer.load().await?;
        Ok(explorer)
    }

    /// コマンドを実行し、標準出力に書く文字列を返す。
    pub async fn run(&self, command: Commands) -> Result<String, AppError> {
        match command {
            Commands::Login { username, password } => self.login(&username, &password).await,
            Commands::Register {
                username,
                email,
                password,
            } => {
                let profile = self.auth.register(&username, &email, &password).await?;
                Ok(format!(
                    "Compte créé pour {}. Connectez-vous avec `login`.",
                    profile.username
                ))
            }
            Commands::Logout => {
                self.auth.logout().await?;
                Ok("Déconnecté".to_string())
            }
            Commands::Whoami => {
                let session = self.auth.restore().await?;
                Ok(render::render_session(&session))
            }
            Commands::List(args) => self.list(&args).await,
            Commands::View { id } => self.view(id).await,
            Commands::ToggleSave { id } => self.toggle_save(id).await,
            Commands::Status { id } => {
                let explorer = self.explorer().await?;
                let status = explorer.fetch_status(id).await?;
                Ok(render::render_status(&status))
            }
            Commands::SetStatus { id, saved, viewed } => {
                self.set_status(
                    id,
                    StatusPatch {
                        is_saved: saved,
                        is_viewed: viewed,
                    },
                )
                .await
            }
            Commands::Preferences(PreferencesCommand::Show) => {
                let preferences = self.preferences().await?.current().await?;
                Ok(render::render_preferences(&preferences))
            }
            Commands::Preferences(PreferencesCommand::Set(args)) => {
                let saved = self.preferences().await?.update(&args.update()).await?;
                Ok(render::render_preferences(&saved))
            }
        }
    }

    async fn login(&self, username: &str, password: &str) -> Result<String, AppError> {
        let session = self.auth.login(username, password).await?;
        Ok(format!("Connecté: {}", render::render_session(&session)))
    }

    async fn list(&self, args: &ListArgs) -> Result<String, AppError> {
        let explorer = self.loaded_explorer().await?;
        let criteria = args.criteria();
        let views: Vec<ListItemView> = explorer
            .visible(&criteria)
            .into_iter()
            .filter_map(|rec| explorer.item_view(rec.id()))
            .collect();
        info!(
            total = explorer.records().len(),
            visible = views.len(),
            sort = criteria.sort.as_str(),
            "listing recommendations"
        );
        Ok(render::render_list(&views))
    }

    async fn view(&self, id: ListingId) -> Result<String, AppError> {
        let explorer = self.loaded_explorer().await?;
        explorer.handle_interaction(id, ItemInteraction::Click).await;
        rendered_item(&explorer, id, render::render_detail)
    }

    async fn toggle_save(&self, id: ListingId) -> Result<String, AppError> {
        let explorer = self.loaded_explorer().await?;
        explorer
            .handle_interaction(id, ItemInteraction::SaveButton)
            .await;
        rendered_item(&explorer, id, render::render_item)
    }

    async fn set_status(&self, id: ListingId, patch: StatusPatch) -> Result<String, AppError> {
        if patch.is_empty() {
            return Err(AppError::InvalidInput(
                "Pass --saved and/or --viewed".to_string(),
            ));
        }
        let explorer = self.explorer().await?;
        explorer.update_status(id, patch).await;
        if let Some(error) = explorer.actions().error(id) {
            return Err(AppError::Internal(error));
        }
        let status = explorer.fetch_status(id).await?;
        Ok(render::render_status(&status))
    }
}

fn rendered_item(
    explorer: &RecommendationExplorer,
    id: ListingId,
    render: fn(&ListItemView) -> String,
) -> Result<String, AppError> {
    explorer
        .item_view(id)
        .map(|view| render(&view))
        .ok_or_else(|| AppError::NotFound(format!("Recommendation {id}")))
}
