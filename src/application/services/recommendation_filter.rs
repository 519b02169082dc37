use crate::domain::entities::Recommendation;
use std::cmp::Ordering;
use std::collections::{BTreeSet, HashSet};
use std::fmt;
use std::str::FromStr;
use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum LocationFilter {
    #[default]
    All,
    Country(String),
}

impl LocationFilter {
    fn matches(&self, country: &str) -> bool {
        match self {
            LocationFilter::All => true,
            LocationFilter::Country(wanted) => wanted.to_lowercase() == country.to_lowercase(),
        }
    }
}

impl FromStr for LocationFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("all") {
            Ok(LocationFilter::All)
        } else {
            Ok(LocationFilter::Country(trimmed.to_string()))
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatusFilter {
    New,
    Viewed,
    Saved,
}

impl StatusFilter {
    pub fn as_str(&self) -> &'static str {
        match self {
            StatusFilter::New => "new",
            StatusFilter::Viewed => "viewed",
            StatusFilter::Saved => "saved",
        }
    }
}

impl FromStr for StatusFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "new" => Ok(StatusFilter::New),
            "viewed" => Ok(StatusFilter::Viewed),
            "saved" => Ok(StatusFilter::Saved),
            other => Err(format!("Unknown status filter: {other}")),
        }
    }
}

impl fmt::Display for StatusFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortOrder {
    #[default]
    Match,
    Date,
    Company,
}

impl SortOrder {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortOrder::Match => "match",
            SortOrder::Date => "date",
            SortOrder::Company => "company",
        }
    }

    fn compare(&self, a: &Recommendation, b: &Recommendation) -> Ordering {
        match self {
            SortOrder::Match => b
                .details()
                .similarity_score
                .total_cmp(&a.details().similarity_score),
            SortOrder::Date => match (a.recommended_timestamp(), b.recommended_timestamp()) {
                (Some(left), Some(right)) => right.cmp(&left),
                (Some(_), None) => Ordering::Less,
                (None, Some(_)) => Ordering::Greater,
                (None, None) => Ordering::Equal,
            },
            SortOrder::Company => {
                let left = &a.details().company;
                let right = &b.details().company;
                collation_key(left)
                    .cmp(&collation_key(right))
                    .then_with(|| left.to_lowercase().cmp(&right.to_lowercase()))
                    .then_with(|| left.cmp(right))
            }
        }
    }
}

/// 会社名の比較キー。NFD で分解してアクセント記号を落とし、小文字にそろえる。
fn collation_key(value: &str) -> String {
    value
        .nfd()
        .filter(|ch| !is_combining_mark(*ch))
        .flat_map(char::to_lowercase)
        .collect()
}

impl FromStr for SortOrder {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "match" => Ok(SortOrder::Match),
            "date" => Ok(SortOrder::Date),
            "company" => Ok(SortOrder::Company),
            other => Err(format!("Unknown sort order: {other}")),
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 一覧の絞り込み条件。すべての条件を満たすものだけが残る。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecommendationFilter {
    pub query: String,
    pub location: LocationFilter,
    pub platforms: BTreeSet<String>,
    pub statuses: HashSet<StatusFilter>,
}

impl RecommendationFilter {
    pub fn matches(&self, recommendation: &Recommendation) -> bool {
        self.matches_query(recommendation)
            && self.location.matches(&recommendation.details().country)
            && self.matches_platform(recommendation)
            && self.matches_status(recommendation)
    }

    fn matches_query(&self, recommendation: &Recommendation) -> bool {
        if self.query.is_empty() {
            return true;
        }
        let needle = self.query.to_lowercase();
        let details = recommendation.details();
        [
            &details.title,
            &details.company,
            &details.description,
            &details.skills,
            &details.domain,
        ]
        .iter()
        .any(|field| field.to_lowercase().contains(&needle))
    }

    fn matches_platform(&self, recommendation: &Recommendation) -> bool {
        self.platforms.is_empty() || self.platforms.contains(&recommendation.details().platform)
    }

    fn matches_status(&self, recommendation: &Recommendation) -> bool {
        if self.statuses.is_empty() {
            return true;
        }
        (self.statuses.contains(&StatusFilter::New) && recommendation.is_new())
            || (self.statuses.contains(&StatusFilter::Viewed) && recommendation.is_viewed())
            || (self.statuses.contains(&StatusFilter::Saved) && recommendation.is_saved())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListCriteria {
    pub filter: RecommendationFilter,
    pub sort: SortOrder,
}

/// 絞り込んでから安定ソートする。
pub fn filter_and_sort(records: &[Recommendation], criteria: &ListCriteria) -> Vec<Recommendation> {
    let mut visible: Vec<Recommendation> = records
        .iter()
        .filter(|rec| criteria.filter.matches(rec))
        .cloned()
        .collect();
    visible.sort_by(|a, b| criteria.sort.compare(a, b));
    visible
}
