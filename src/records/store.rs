// Record store: the authoritative list of activity records
//
// The whole list is re-serialized and written on every mutation. A mutation
// only counts as done once that write has succeeded, so the in-memory list and
// the persisted list never diverge.

use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::{DateTime, Datelike, Local, NaiveDate, TimeZone, Utc};
use thiserror::Error;
use uuid::Uuid;

use super::types::{ActivityRecord, RecordDraft};
use crate::storage::{KeyValueStore, StorageError, RECORDS_KEY};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error("저장된 기록 목록이 손상되었습니다: {0}")]
    Corrupt(#[source] serde_json::Error),

    #[error("기록 목록 변환 실패: {0}")]
    Serialize(#[source] serde_json::Error),
}

/// Label of the group holding records whose timestamp has no calendar date.
pub const UNDATED_LABEL: &str = "날짜 미상";

/// Records sharing one calendar day.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayGroup<'a> {
    /// `None` for records whose timestamp is outside the representable range
    pub date: Option<NaiveDate>,
    /// Same relative order as the store's list
    pub records: Vec<&'a ActivityRecord>,
}

impl DayGroup<'_> {
    /// Korean-locale short date, e.g. `2026. 10. 16.`
    pub fn label(&self) -> String {
        match self.date {
            Some(date) => format_day_label(date),
            None => UNDATED_LABEL.to_string(),
        }
    }
}

pub fn format_day_label(date: NaiveDate) -> String {
    format!("{}. {}. {}.", date.year(), date.month(), date.day())
}

pub struct RecordStore {
    storage: Arc<dyn KeyValueStore>,
    records: Vec<ActivityRecord>,
}

impl RecordStore {
    /// Load the persisted list, or start empty when nothing was stored yet.
    ///
    /// A value that does not parse as a record list is reported as
    /// [`StoreError::Corrupt`] and left untouched on disk.
    pub fn open(storage: Arc<dyn KeyValueStore>) -> Result<Self, StoreError> {
        let records = match storage.get(RECORDS_KEY)? {
            Some(raw) if !raw.trim().is_empty() => {
                serde_json::from_str::<Vec<ActivityRecord>>(&raw).map_err(StoreError::Corrupt)?
            }
            _ => Vec::new(),
        };
        tracing::debug!(count = records.len(), "Loaded activity records");
        Ok(Self { storage, records })
    }

    /// All records, most recent first.
    pub fn records(&self) -> &[ActivityRecord] {
        &self.records
    }

    pub fn get(&self, id: &str) -> Option<&ActivityRecord> {
        self.records.iter().find(|r| r.id == id)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Create a record stamped with the current time.
    pub fn create(&mut self, draft: RecordDraft) -> Result<&ActivityRecord, StoreError> {
        self.create_at(draft, Utc::now().timestamp_millis())
    }

    /// Create a record with a caller-supplied timestamp (epoch ms).
    pub fn create_at(
        &mut self,
        draft: RecordDraft,
        timestamp: i64,
    ) -> Result<&ActivityRecord, StoreError> {
        let record = draft.into_record(Uuid::new_v4().to_string(), timestamp);
        self.records.insert(0, record);

        if let Err(e) = self.persist() {
            self.records.remove(0);
            return Err(e);
        }

        let created = &self.records[0];
        tracing::info!(id = %created.id, class = %created.class_name, "Created activity record");
        Ok(created)
    }

    /// Replace the content of the record with `id`.
    ///
    /// Returns `Ok(false)` without writing anything when no such record
    /// exists. Identity, snapshots and timestamp are never changed.
    pub fn update_content(&mut self, id: &str, content: &str) -> Result<bool, StoreError> {
        let Some(index) = self.records.iter().position(|r| r.id == id) else {
            tracing::debug!(id, "Update skipped, record not found");
            return Ok(false);
        };

        let previous = std::mem::replace(&mut self.records[index].content, content.to_string());
        if let Err(e) = self.persist() {
            self.records[index].content = previous;
            return Err(e);
        }

        tracing::info!(id, "Updated activity record");
        Ok(true)
    }

    /// Group records by calendar day in `tz`, newest day first.
    ///
    /// Records whose timestamp has no calendar date are kept in one trailing
    /// group with `date: None`.
    pub fn grouped_by_day<Tz: TimeZone>(&self, tz: &Tz) -> Vec<DayGroup<'_>> {
        // None sorts before every date, so it ends up last once reversed.
        let mut days: BTreeMap<Option<NaiveDate>, Vec<&ActivityRecord>> = BTreeMap::new();
        for record in &self.records {
            let date = DateTime::<Utc>::from_timestamp_millis(record.timestamp)
                .map(|instant| instant.with_timezone(tz).date_naive());
            if date.is_none() {
                tracing::warn!(id = %record.id, timestamp = record.timestamp, "Record timestamp out of range");
            }
            days.entry(date).or_default().push(record);
        }

        days.into_iter()
            .rev()
            .map(|(date, records)| DayGroup { date, records })
            .collect()
    }

    /// Group records by calendar day in the machine's local timezone.
    pub fn grouped_by_local_day(&self) -> Vec<DayGroup<'_>> {
        self.grouped_by_day(&Local)
    }

    fn persist(&self) -> Result<(), StoreError> {
        let json = serde_json::to_string(&self.records).map_err(StoreError::Serialize)?;
        self.storage.set(RECORDS_KEY, &json)?;
        Ok(())
    }
}
