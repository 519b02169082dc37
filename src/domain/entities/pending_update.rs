use crate::domain::value_objects::{ListingId, StatusField};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// サーバー応答待ちの楽観的更新。
///
/// 確定・巻き戻しは `(listing_id, field)` で照合する。`update_id` と
/// `created_at` はログ用で、照合や順序付けには使わない。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PendingUpdate {
    pub update_id: Uuid,
    pub listing_id: ListingId,
    pub field: StatusField,
    pub original_value: bool,
    pub new_value: bool,
    pub created_at: DateTime<Utc>,
}

impl PendingUpdate {
    pub fn new(
        listing_id: ListingId,
        field: StatusField,
        original_value: bool,
        new_value: bool,
    ) -> Self {
        Self {
            update_id: Uuid::new_v4(),
            listing_id,
            field,
            original_value,
            new_value,
            created_at: Utc::now(),
        }
    }

    pub fn matches(&self, listing_id: ListingId, field: StatusField) -> bool {
        self.listing_id == listing_id && self.field == field
    }
}
