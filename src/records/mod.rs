// Activity records and their persistent store

mod store;
mod types;

pub use store::{format_day_label, DayGroup, RecordStore, StoreError, UNDATED_LABEL};
pub use types::{ActivityRecord, ActivityType, RecordDraft};
