use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// 推薦スコアの基準ごとの重みの上限。
pub const MAX_CRITERION_WEIGHT: f64 = 1.0;
/// 国・プラットフォームごとの重みの上限。
pub const MAX_MARKET_WEIGHT: f64 = 2.0;

/// `/preferences` で読み書きする推薦の重み付け。
///
/// 欠けた項目はバックエンドの既定値で補う。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UserPreferences {
    pub domain_weight: f64,
    pub skills_weight: f64,
    pub title_weight: f64,
    pub description_weight: f64,
    pub country_weights: BTreeMap<String, f64>,
    pub platform_weights: BTreeMap<String, f64>,
}

impl Default for UserPreferences {
    fn default() -> Self {
        let full = |names: &[&str]| {
            names
                .iter()
                .map(|name| (name.to_string(), 1.0))
                .collect::<BTreeMap<_, _>>()
        };
        Self {
            domain_weight: 0.4,
            skills_weight: 0.3,
            title_weight: 0.2,
            description_weight: 0.1,
            country_weights: full(&["Morocco", "France", "Canada"]),
            platform_weights: full(&["LinkedIn", "Indeed", "Glassdoor"]),
        }
    }
}

impl UserPreferences {
    /// 表示順に並べた基準ごとの重み。
    pub fn criteria(&self) -> [(&'static str, f64); 4] {
        [
            ("domain", self.domain_weight),
            ("skills", self.skills_weight),
            ("title", self.title_weight),
            ("description", self.description_weight),
        ]
    }

    pub fn validate(&self) -> Result<(), String> {
        for (name, weight) in self.criteria() {
            check_range(name, weight, MAX_CRITERION_WEIGHT)?;
        }
        for (name, weight) in self.country_weights.iter().chain(&self.platform_weights) {
            if name.trim().is_empty() {
                return Err("Weight names must not be empty".to_string());
            }
            check_range(name, *weight, MAX_MARKET_WEIGHT)?;
        }
        Ok(())
    }
}

fn check_range(name: &str, weight: f64, max: f64) -> Result<(), String> {
    if weight.is_finite() && (0.0..=max).contains(&weight) {
        Ok(())
    } else {
        Err(format!("Weight for {name} must be between 0 and {max}, got {weight}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn defaults_fill_missing_fields() {
        let prefs: UserPreferences = serde_json::from_value(json!({
            "domain_weight": 0.7,
            "platform_weights": { "LinkedIn": 2.0 }
        }))
        .unwrap();

        assert_eq!(prefs.domain_weight, 0.7);
        assert_eq!(prefs.skills_weight, 0.3);
        assert_eq!(prefs.country_weights.len(), 3);
        assert_eq!(prefs.platform_weights.len(), 1);
        assert!(prefs.validate().is_ok());
    }

    #[test]
    fn criterion_weights_stay_within_unit_range() {
        let prefs = UserPreferences {
            title_weight: 1.5,
            ..Default::default()
        };

        let err = prefs.validate().unwrap_err();

        assert!(err.contains("title"));
    }

    #[test]
    fn market_weights_allow_up_to_two() {
        let mut prefs = UserPreferences::default();
        prefs.country_weights.insert("Spain".into(), 2.0);
        assert!(prefs.validate().is_ok());

        prefs.platform_weights.insert("Indeed".into(), -0.1);
        assert!(prefs.validate().unwrap_err().contains("Indeed"));
    }

    #[test]
    fn non_finite_weights_are_rejected() {
        let prefs = UserPreferences {
            skills_weight: f64::NAN,
            ..Default::default()
        };

        assert!(prefs.validate().is_err());
    }
}
