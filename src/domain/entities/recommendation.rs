use crate::domain::value_objects::{ListingId, StatusField};
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// 表示専用の求人情報。楽観的更新の対象にはならない。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListingDetails {
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub company: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub location: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub country: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub platform: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub skills: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub domain: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub link: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub similarity_score: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub recommended_at: String,
    #[serde(default)]
    pub duration: Option<String>,
}

/// 類似度スコアの区分。一覧表示の色分けに使う。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoreBand {
    High,
    Medium,
    Low,
}

impl ScoreBand {
    pub fn from_score(score: f64) -> Self {
        if score >= 75.0 {
            ScoreBand::High
        } else if score >= 50.0 {
            ScoreBand::Medium
        } else {
            ScoreBand::Low
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ScoreBand::High => "high",
            ScoreBand::Medium => "medium",
            ScoreBand::Low => "low",
        }
    }
}

/// サーバーから取得した推薦レコードのクライアント側コピー。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    id: ListingId,
    #[serde(flatten)]
    details: ListingDetails,
    #[serde(default, deserialize_with = "null_as_default")]
    is_viewed: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    is_saved: bool,
}

impl Recommendation {
    pub fn new(id: ListingId, details: ListingDetails) -> Self {
        Self {
            id,
            details,
            is_viewed: false,
            is_saved: false,
        }
    }

    pub fn with_status(mut self, is_viewed: bool, is_saved: bool) -> Self {
        self.is_viewed = is_viewed;
        self.is_saved = is_saved;
        self
    }

    pub fn id(&self) -> ListingId {
        self.id
    }

    pub fn details(&self) -> &ListingDetails {
        &self.details
    }

    pub fn is_viewed(&self) -> bool {
        self.is_viewed
    }

    pub fn is_saved(&self) -> bool {
        self.is_saved
    }

    pub fn flag(&self, field: StatusField) -> bool {
        match field {
            StatusField::IsViewed => self.is_viewed,
            StatusField::IsSaved => self.is_saved,
        }
    }

    pub(crate) fn set_flag(&mut self, field: StatusField, value: bool) {
        match field {
            StatusField::IsViewed => self.is_viewed = value,
            StatusField::IsSaved => self.is_saved = value,
        }
    }

    /// 未閲覧かつ未保存のものを「新着」とみなす。
    pub fn is_new(&self) -> bool {
        !self.is_viewed && !self.is_saved
    }

    pub fn score_band(&self) -> ScoreBand {
        ScoreBand::from_score(self.details.similarity_score)
    }

    pub fn skill_list(&self) -> Vec<&str> {
        self.details
            .skills
            .split(',')
            .map(str::trim)
            .filter(|skill| !skill.is_empty())
            .collect()
    }

    /// `recommended_at` を UTC 時刻として解釈する。解釈できない場合は `None`。
    pub fn recommended_timestamp(&self) -> Option<DateTime<Utc>> {
        let raw = self.details.recommended_at.trim();
        if raw.is_empty() {
            return None;
        }
        if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
            return Some(parsed.with_timezone(&Utc));
        }
        for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
            if let Ok(naive) = NaiveDateTime::parse_from_str(raw, format) {
                return Some(naive.and_utc());
            }
        }
        NaiveDate::parse_from_str(raw, "%Y-%m-%d")
            .ok()
            .and_then(|date| date.and_hms_opt(0, 0, 0))
            .map(|naive| naive.and_utc())
    }
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};
    use serde_json::json;

    fn parse(value: serde_json::Value) -> Recommendation {
        serde_json::from_value(value).expect("recommendation")
    }

    #[test]
    fn decodes_backend_payload() {
        let rec = parse(json!({
            "id": 12,
            "title": "Data Intern",
            "company": "Acme",
            "location": "Casablanca",
            "country": "Morocco",
            "platform": "LinkedIn",
            "description": "Work on pipelines",
            "skills": "Python, SQL ,  ,Spark",
            "domain": "Data",
            "link": "https://example.org/jobs/12",
            "similarity_score": 81.5,
            "recommended_at": "2024-05-01T10:00:00+00:00",
            "is_viewed": true,
            "is_saved": false
        }));

        assert_eq!(rec.id(), ListingId::new(12));
        assert!(rec.is_viewed());
        assert!(!rec.is_saved());
        assert_eq!(rec.details().company, "Acme");
        assert_eq!(rec.skill_list(), vec!["Python", "SQL", "Spark"]);
        assert_eq!(rec.score_band(), ScoreBand::High);
        assert!(rec.details().duration.is_none());
    }

    #[test]
    fn null_and_missing_fields_decode_as_defaults() {
        let rec = parse(json!({
            "id": 3,
            "title": null,
            "similarity_score": 40,
            "is_saved": null
        }));

        assert_eq!(rec.details().title, "");
        assert_eq!(rec.details().country, "");
        assert!(rec.is_new());
        assert_eq!(rec.score_band(), ScoreBand::Low);
    }

    #[test]
    fn wrong_field_type_is_rejected() {
        let result = serde_json::from_value::<Recommendation>(json!({
            "id": 3,
            "title": ["not", "a", "string"]
        }));
        assert!(result.is_err());
    }

    #[test]
    fn parses_recommended_at_variants() {
        let mut details = parse(json!({"id": 1})).details().clone();

        details.recommended_at = "2024-03-02T08:15:30.123456".into();
        let naive = Recommendation::new(ListingId::new(1), details.clone());
        let ts = naive.recommended_timestamp().unwrap();
        assert_eq!((ts.year(), ts.month(), ts.day(), ts.hour()), (2024, 3, 2, 8));

        details.recommended_at = "2024-03-02".into();
        let date_only = Recommendation::new(ListingId::new(1), details.clone());
        assert_eq!(date_only.recommended_timestamp().unwrap().hour(), 0);

        details.recommended_at = "yesterday".into();
        let invalid = Recommendation::new(ListingId::new(1), details);
        assert!(invalid.recommended_timestamp().is_none());
    }

    #[test]
    fn score_band_thresholds() {
        assert_eq!(ScoreBand::from_score(75.0), ScoreBand::High);
        assert_eq!(ScoreBand::from_score(74.99), ScoreBand::Medium);
        assert_eq!(ScoreBand::from_score(50.0), ScoreBand::Medium);
        assert_eq!(ScoreBand::from_score(49.9), ScoreBand::Low);
    }
}
