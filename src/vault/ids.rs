//! Record id generation
//!
//! Ids are creation timestamps in milliseconds, bumped past the last issued
//! id so two saves in the same millisecond (or a clock step backwards) still
//! get distinct, increasing ids.

use chrono::Utc;

use super::record::RecordId;

#[derive(Debug, Clone, Default)]
pub struct IdGenerator {
    last: Option<i64>,
}

impl IdGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make sure future ids sort after `id`
    pub fn observe(&mut self, id: RecordId) {
        self.last = Some(self.last.map_or(id.0, |last| last.max(id.0)));
    }

    /// Next id for a record created at `now_millis`
    pub fn next_at(&mut self, now_millis: i64) -> RecordId {
        let id = match self.last {
            Some(last) if now_millis <= last => last.saturating_add(1),
            _ => now_millis,
        };
        self.last = Some(id);
        RecordId(id)
    }

    /// Next id for a record created now
    pub fn next(&mut self) -> RecordId {
        self.next_at(Utc::now().timestamp_millis())
    }
}
