// Integration tests for the record store over a file-backed store

use anyhow::Result;
use chrono::{Local, Utc};
use edulog::records::{format_day_label, RecordDraft, RecordStore};
use edulog::storage::{FileStore, KeyValueStore, RECORDS_KEY};
use std::sync::Arc;
use tempfile::TempDir;

fn draft(number: i64, name: &str, class: &str, content: &str) -> RecordDraft {
    RecordDraft {
        student_id: format!("{}_{}", class, number),
        student_name: name.to_string(),
        student_number: number,
        class_id: class.to_string(),
        class_name: class.to_string(),
        content: content.to_string(),
    }
}

fn open(dir: &TempDir) -> Result<(RecordStore, Arc<FileStore>)> {
    let backing = Arc::new(FileStore::open(dir.path())?);
    let store = RecordStore::open(backing.clone())?;
    Ok((store, backing))
}

#[test]
fn test_reload_equals_memory_after_creates() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let (mut store, _) = open(&dir)?;

    store.create(draft(1, "Kim", "1-1", "Led the group discussion."))?;
    store.create(draft(2, "Lee", "1-1", "Asked two questions about photosynthesis."))?;
    store.create(draft(3, "Park", "1-2", "줄 바꿈\n포함"))?;

    let (reloaded, _) = open(&dir)?;
    assert_eq!(reloaded.records(), store.records());
    Ok(())
}

#[test]
fn test_reload_equals_memory_after_update() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let (mut store, _) = open(&dir)?;
    let id = store.create(draft(1, "Kim", "1-1", "draft"))?.id.clone();
    store.update_content(&id, "final")?;

    let (reloaded, _) = open(&dir)?;
    assert_eq!(reloaded.records(), store.records());
    assert_eq!(reloaded.get(&id).unwrap().content, "final");
    Ok(())
}

#[test]
fn test_update_unknown_id_leaves_disk_untouched() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let (mut store, backing) = open(&dir)?;
    store.create(draft(1, "Kim", "1-1", "keep me"))?;
    let before = backing.get(RECORDS_KEY)?;

    assert!(!store.update_content("does-not-exist", "overwrite")?);
    assert_eq!(store.len(), 1);
    assert_eq!(backing.get(RECORDS_KEY)?, before);
    Ok(())
}

#[test]
fn test_update_preserves_snapshot_and_timestamp() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let (mut store, _) = open(&dir)?;
    let original = store
        .create_at(draft(9, "Choi", "2-3", "before"), 1_700_000_000_000)?
        .clone();

    store.update_content(&original.id, "after")?;
    let (reloaded, _) = open(&dir)?;
    let updated = reloaded.get(&original.id).unwrap();

    assert_eq!(updated.id, original.id);
    assert_eq!(updated.student_id, original.student_id);
    assert_eq!(updated.student_name, "Choi");
    assert_eq!(updated.student_number, 9);
    assert_eq!(updated.class_id, "2-3");
    assert_eq!(updated.class_name, "2-3");
    assert_eq!(updated.timestamp, 1_700_000_000_000);
    assert_eq!(updated.content, "after");
    Ok(())
}

#[test]
fn test_same_day_records_share_a_group() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let (mut store, _) = open(&dir)?;
    // 2026-10-15T01:00Z, 2026-10-16T09:00Z, 2026-10-16T23:00Z, 2026-10-14T12:00Z
    let hour = 3_600_000;
    let oct_16 = 1_792_108_800_000;
    store.create_at(draft(1, "A", "1-1", "a"), oct_16 - 23 * hour)?;
    store.create_at(draft(2, "B", "1-1", "b"), oct_16 + 9 * hour)?;
    store.create_at(draft(3, "C", "1-1", "c"), oct_16 + 23 * hour)?;
    store.create_at(draft(4, "D", "1-1", "d"), oct_16 - 36 * hour)?;

    let groups = store.grouped_by_day(&Utc);
    let labels: Vec<String> = groups.iter().map(|g| g.label()).collect();
    assert_eq!(labels, vec!["2026. 10. 16.", "2026. 10. 15.", "2026. 10. 14."]);

    let newest: Vec<&str> = groups[0].records.iter().map(|r| r.content.as_str()).collect();
    assert_eq!(newest, vec!["c", "b"]);
    Ok(())
}

#[test]
fn test_first_record_for_today() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let (mut store, _) = open(&dir)?;
    assert!(store.is_empty());

    let before = Utc::now().timestamp_millis();
    store.create(draft(5, "Kim", "1-1", "Helped a classmate."))?;
    let after = Utc::now().timestamp_millis();

    let groups = store.grouped_by_local_day();
    assert_eq!(groups.len(), 1);
    assert_eq!(groups[0].label(), format_day_label(Local::now().date_naive()));
    assert_eq!(groups[0].records.len(), 1);

    let record = groups[0].records[0];
    assert_eq!(record.student_number, 5);
    assert_eq!(record.student_name, "Kim");
    assert_eq!(record.class_name, "1-1");
    assert_eq!(record.content, "Helped a classmate.");
    assert!(uuid::Uuid::parse_str(&record.id).is_ok());
    assert!(record.timestamp >= before && record.timestamp <= after);
    Ok(())
}

#[test]
fn test_corrupt_file_is_reported_not_replaced() -> Result<()> {
    let dir = tempfile::tempdir()?;
    std::fs::write(dir.path().join(RECORDS_KEY), "[{\"id\": 1}")?;

    let backing = Arc::new(FileStore::open(dir.path())?);
    assert!(RecordStore::open(backing).is_err());
    assert_eq!(
        std::fs::read_to_string(dir.path().join(RECORDS_KEY))?,
        "[{\"id\": 1}"
    );
    Ok(())
}
