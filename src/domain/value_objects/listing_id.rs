use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// 推薦（インターンシップ求人）の識別子。セッション中は安定している。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ListingId(i64);

impl ListingId {
    pub const fn new(value: i64) -> Self {
        Self(value)
    }

    pub const fn value(&self) -> i64 {
        self.0
    }
}

impl fmt::Display for ListingId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for ListingId {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

impl From<ListingId> for i64 {
    fn from(value: ListingId) -> Self {
        value.0
    }
}

impl FromStr for ListingId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<i64>()
            .map(Self)
            .map_err(|err| format!("Invalid listing id '{s}': {err}"))
    }
}
