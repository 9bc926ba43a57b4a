// Activity record types
//
// Field names serialize in camelCase so a persisted list keeps the same layout
// the browser client wrote to local storage.

use serde::{Deserialize, Serialize};

use crate::roster::{ClassGroup, Student};

/// Category tag carried by every record. There is only one today.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum ActivityType {
    #[default]
    #[serde(rename = "활동")]
    Activity,
}

/// One free-text note about one student at one point in time.
///
/// Student and class fields are snapshots taken when the record was created.
/// Renaming a student upstream does not touch existing records.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityRecord {
    pub id: String,
    pub student_id: String,
    pub student_name: String,
    pub student_number: i64,
    pub class_id: String,
    pub class_name: String,
    #[serde(rename = "type", default)]
    pub kind: ActivityType,
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ai_polished_content: Option<String>,
    /// Creation time, Unix epoch milliseconds. Edits never change it.
    pub timestamp: i64,
}

/// Everything needed to create a record except identity and time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordDraft {
    pub student_id: String,
    pub student_name: String,
    pub student_number: i64,
    pub class_id: String,
    pub class_name: String,
    pub content: String,
}

impl RecordDraft {
    /// Snapshot a student and class into a draft.
    pub fn new(class: &ClassGroup, student: &Student, content: impl Into<String>) -> Self {
        Self {
            student_id: student.id.clone(),
            student_name: student.name.clone(),
            student_number: student.number,
            class_id: class.id.clone(),
            class_name: class.name.clone(),
            content: content.into(),
        }
    }

    pub(crate) fn into_record(self, id: String, timestamp: i64) -> ActivityRecord {
        ActivityRecord {
            id,
            student_id: self.student_id,
            student_name: self.student_name,
            student_number: self.student_number,
            class_id: self.class_id,
            class_name: self.class_name,
            kind: ActivityType::Activity,
            content: self.content,
            ai_polished_content: None,
            timestamp,
        }
    }
}
