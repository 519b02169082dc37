use crate::domain::entities::{PendingUpdate, Recommendation};
use crate::domain::value_objects::{ListingId, StatusField};
use tracing::debug;

/// 推薦リストと未確定の楽観的更新を保持する。
///
/// すべての操作は同期的で、対象が存在しない場合は何もしない。
/// 同じ `(listing_id, field)` への更新が並行した場合、どちらの確定・巻き戻しでも
/// 両方のエントリが取り除かれる。
#[derive(Debug, Default)]
pub struct OptimisticTracker {
    records: Vec<Recommendation>,
    pending: Vec<PendingUpdate>,
}

impl OptimisticTracker {
    pub fn new(records: Vec<Recommendation>) -> Self {
        Self {
            records,
            pending: Vec::new(),
        }
    }

    /// 取得し直したリストで置き換える。未確定の更新は破棄する。
    pub fn replace_records(&mut self, records: Vec<Recommendation>) {
        self.records = records;
        self.pending.clear();
    }

    pub fn records(&self) -> &[Recommendation] {
        &self.records
    }

    pub fn get(&self, listing_id: ListingId) -> Option<&Recommendation> {
        self.records.iter().find(|rec| rec.id() == listing_id)
    }

    pub fn pending_updates(&self) -> &[PendingUpdate] {
        &self.pending
    }

    pub fn has_pending(&self, listing_id: ListingId, field: StatusField) -> bool {
        self.pending
            .iter()
            .any(|update| update.matches(listing_id, field))
    }

    pub fn apply_optimistic_update(
        &mut self,
        listing_id: ListingId,
        field: StatusField,
        new_value: bool,
    ) -> Option<PendingUpdate> {
        let record = self
            .records
            .iter_mut()
            .find(|rec| rec.id() == listing_id)?;

        let update = PendingUpdate::new(listing_id, field, record.flag(field), new_value);
        record.set_flag(field, new_value);
        self.pending.push(update.clone());

        debug!(
            update_id = %update.update_id,
            listing_id = %listing_id,
            field = field.as_str(),
            new_value,
            "applied optimistic update"
        );
        Some(update)
    }

    pub fn confirm_optimistic_update(&mut self, listing_id: ListingId, field: StatusField) {
        let before = self.pending.len();
        self.pending
            .retain(|update| !update.matches(listing_id, field));
        let removed = before - self.pending.len();
        if removed > 0 {
            debug!(listing_id = %listing_id, field = field.as_str(), removed, "confirmed optimistic update");
        }
    }

    pub fn revert_optimistic_update(&mut self, listing_id: ListingId, field: StatusField) {
        let Some(original_value) = self
            .pending
            .iter()
            .find(|update| update.matches(listing_id, field))
            .map(|update| update.original_value)
        else {
            return;
        };

        if let Some(record) = self.records.iter_mut().find(|rec| rec.id() == listing_id) {
            record.set_flag(field, original_value);
        }
        self.pending
            .retain(|update| !update.matches(listing_id, field));

        debug!(
            listing_id = %listing_id,
            field = field.as_str(),
            original_value,
            "reverted optimistic update"
        );
    }
}
