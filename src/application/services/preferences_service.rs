use crate::application::ports::PreferencesGateway;
use crate::domain::entities::UserPreferences;
use crate::shared::error::AppError;
use std::sync::Arc;
use tracing::info;

/// 推薦設定への部分的な変更。指定された項目だけを現在値に上書きする。
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PreferenceUpdate {
    pub domain_weight: Option<f64>,
    pub skills_weight: Option<f64>,
    pub title_weight: Option<f64>,
    pub description_weight: Option<f64>,
    pub country_weights: Vec<(String, f64)>,
    pub platform_weights: Vec<(String, f64)>,
}

impl PreferenceUpdate {
    pub fn is_empty(&self) -> bool {
        self.domain_weight.is_none()
            && self.skills_weight.is_none()
            && self.title_weight.is_none()
            && self.description_weight.is_none()
            && self.country_weights.is_empty()
            && self.platform_weights.is_empty()
    }

    pub fn apply_to(&self, preferences: &mut UserPreferences) {
        let criteria = [
            (self.domain_weight, &mut preferences.domain_weight),
            (self.skills_weight, &mut preferences.skills_weight),
            (self.title_weight, &mut preferences.title_weight),
            (self.description_weight, &mut preferences.description_weight),
        ];
        for (value, slot) in criteria {
            if let Some(value) = value {
                *slot = value;
            }
        }
        for (name, weight) in &self.country_weights {
            preferences.country_weights.insert(name.clone(), *weight);
        }
        for (name, weight) in &self.platform_weights {
            preferences.platform_weights.insert(name.clone(), *weight);
        }
    }
}

pub struct PreferencesService {
    gateway: Arc<dyn PreferencesGateway>,
}

impl PreferencesService {
    pub fn new(gateway: Arc<dyn PreferencesGateway>) -> Self {
        Self { gateway }
    }

    pub async fn current(&self) -> Result<UserPreferences, AppError> {
        self.gateway.fetch_preferences().await
    }

    /// 現在値を取得して変更を重ね、検証してから保存する。
    ///
    /// 検証に失敗した場合は保存を行わない。
    pub async fn update(&self, update: &PreferenceUpdate) -> Result<UserPreferences, AppError> {
        if update.is_empty() {
            return Err(AppError::InvalidInput(
                "No preference change given".to_string(),
            ));
        }
        let mut preferences = self.gateway.fetch_preferences().await?;
        update.apply_to(&mut preferences);
        preferences.validate().map_err(AppError::InvalidInput)?;

        let saved = self.gateway.save_preferences(&preferences).await?;
        info!(
            countries = saved.country_weights.len(),
            platforms = saved.platform_weights.len(),
            "preferences saved"
        );
        Ok(saved)
    }
}
