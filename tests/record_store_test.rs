//! Integration tests for RecordStore (collection + persistence contract)
mod common;

use common::{date, draft, test_clock, test_store};
use ppe_tracker::ppe::{ItemPatch, Tier};
use ppe_tracker::{FileSlot, MemorySlot, RecordStore, Slot, TrackerError, codec};
use std::fs;
use tempfile::TempDir;

// 追加した項目が先頭に来て、一意なIDが振られることを確認
#[test]
fn test_add_prepends_with_unique_ids() {
    let (mut store, _slot) = test_store();

    let first = store.add(draft("Respirator", 30, date(2024, 4, 1))).unwrap();
    let second = store.add(draft("Gloves", 1, date(2024, 4, 25))).unwrap();

    assert_ne!(first.id, second.id);
    let ids: Vec<u64> = store.list().iter().map(|i| i.id).collect();
    assert_eq!(ids, vec![second.id, first.id]);
    assert_eq!(store.list()[0].name, "Gloves");
}

#[test]
fn test_add_assigns_id_and_creation_stamp_from_clock() {
    let (mut store, _slot) = test_store();
    let item = store.add(draft("  Hard hat  ", 365, date(2024, 1, 10))).unwrap();

    // 2024-04-25T10:00:00Z in epoch milliseconds
    assert_eq!(item.id, 1_714_039_200_000);
    assert_eq!(item.created_at.to_rfc3339(), "2024-04-25T10:00:00+00:00");
    assert_eq!(item.name, "Hard hat");
}

#[test]
fn test_many_adds_never_collide() {
    let (mut store, _slot) = test_store();
    for i in 0..50 {
        store
            .add(draft(&format!("Item {}", i), 10, date(2024, 4, 1)))
            .unwrap();
    }
    let mut ids: Vec<u64> = store.list().iter().map(|i| i.id).collect();
    ids.sort_unstable();
    ids.dedup();
    assert_eq!(ids.len(), 50);
}

// 不正な入力はValidationErrorとなり、コレクションも保存先も変わらないことを確認
#[test]
fn test_add_rejects_invalid_drafts() {
    let (mut store, slot) = test_store();

    for bad in [
        draft("", 30, date(2024, 4, 1)),
        draft("   ", 30, date(2024, 4, 1)),
        draft("Mask", 0, date(2024, 4, 1)),
        draft("Mask", -7, date(2024, 4, 1)),
    ] {
        let err = store.add(bad).unwrap_err();
        assert!(matches!(err, TrackerError::Validation(_)), "{:?}", err);
    }

    assert!(store.is_empty());
    assert!(slot.content().is_none());
}

#[test]
fn test_every_mutation_persists() {
    let (mut store, slot) = test_store();

    let item = store.add(draft("Ear plugs", 7, date(2024, 4, 20))).unwrap();
    assert_eq!(codec::decode(&slot.content().unwrap()).unwrap(), store.list());

    store.mark_replaced(item.id).unwrap();
    assert_eq!(codec::decode(&slot.content().unwrap()).unwrap(), store.list());

    store.remove(item.id).unwrap();
    assert!(codec::decode(&slot.content().unwrap()).unwrap().is_empty());
}

#[test]
fn test_update_replaces_fields_in_place() {
    let (mut store, _slot) = test_store();
    let a = store.add(draft("Apron", 60, date(2024, 3, 1))).unwrap();
    let b = store.add(draft("Boots", 180, date(2024, 1, 1))).unwrap();

    let updated = store
        .update(
            a.id,
            ItemPatch {
                name: Some("Lead apron".to_string()),
                interval_days: Some(90),
                last_replaced_date: None,
            },
        )
        .unwrap();

    assert_eq!(updated.id, a.id);
    assert_eq!(updated.created_at, a.created_at);
    assert_eq!(updated.interval_days, 90);
    assert_eq!(updated.last_replaced_date, date(2024, 3, 1));

    // Order unchanged: b was added last, so it stays first
    assert_eq!(store.list()[0].id, b.id);
    assert_eq!(store.list()[1].name, "Lead apron");
}

#[test]
fn test_update_validates_patch() {
    let (mut store, _slot) = test_store();
    let item = store.add(draft("Apron", 60, date(2024, 3, 1))).unwrap();

    let err = store
        .update(
            item.id,
            ItemPatch {
                interval_days: Some(0),
                ..Default::default()
            },
        )
        .unwrap_err();
    assert!(matches!(err, TrackerError::Validation(_)));
    assert_eq!(store.get(item.id).unwrap().interval_days, 60);
}

#[test]
fn test_update_unknown_id_is_not_found() {
    let (mut store, _slot) = test_store();
    store.add(draft("Apron", 60, date(2024, 3, 1))).unwrap();

    let err = store
        .update(42, ItemPatch::replaced_on(date(2024, 4, 25)))
        .unwrap_err();
    assert!(matches!(err, TrackerError::NotFound(42)));
}

// 「今日交換」を記録すると最終交換日が今日になり、Freshに戻ることを確認
#[test]
fn test_mark_replaced_uses_clock_today() {
    let (mut store, _slot) = test_store();
    let item = store.add(draft("Respirator", 30, date(2024, 3, 1))).unwrap();
    assert_eq!(store.status_of(&item).tier, Tier::Overdue);

    let replaced = store.mark_replaced(item.id).unwrap();
    assert_eq!(replaced.last_replaced_date, date(2024, 4, 25));
    assert_eq!(store.status_of(&replaced).tier, Tier::Fresh);
}

#[test]
fn test_remove_unknown_id_leaves_collection_unchanged() {
    let (mut store, slot) = test_store();
    store.add(draft("Apron", 60, date(2024, 3, 1))).unwrap();
    store.add(draft("Boots", 180, date(2024, 1, 1))).unwrap();

    let before = store.list().to_vec();
    let persisted_before = slot.content();

    let err = store.remove(7).unwrap_err();
    assert!(matches!(err, TrackerError::NotFound(7)));
    assert_eq!(store.list(), before.as_slice());
    assert_eq!(slot.content(), persisted_before);
}

#[test]
fn test_remove_returns_deleted_item() {
    let (mut store, _slot) = test_store();
    let a = store.add(draft("Apron", 60, date(2024, 3, 1))).unwrap();
    let b = store.add(draft("Boots", 180, date(2024, 1, 1))).unwrap();

    let removed = store.remove(a.id).unwrap();
    assert_eq!(removed, a);
    assert_eq!(store.list(), &[b]);
}

#[test]
fn test_replace_all_overwrites() {
    let (mut source, _) = test_store();
    source.add(draft("Visor", 14, date(2024, 4, 20))).unwrap();
    source.add(draft("Coverall", 3, date(2024, 4, 24))).unwrap();
    let imported = source.list().to_vec();

    let (mut store, slot) = test_store();
    store.add(draft("Old entry", 5, date(2024, 1, 1))).unwrap();

    store.replace_all(imported.clone()).unwrap();
    assert_eq!(store.list(), imported.as_slice());
    assert_eq!(codec::decode(&slot.content().unwrap()).unwrap(), imported);
}

#[test]
fn test_replace_all_rejects_malformed_and_keeps_prior() {
    let (mut store, _slot) = test_store();
    let original = store.add(draft("Apron", 60, date(2024, 3, 1))).unwrap();

    let mut dup = original.clone();
    dup.name = "Copy".to_string();
    let err = store.replace_all(vec![original.clone(), dup]).unwrap_err();
    assert!(matches!(err, TrackerError::Validation(_)));

    let mut zero = original.clone();
    zero.interval_days = 0;
    assert!(store.replace_all(vec![zero]).is_err());

    assert_eq!(store.list(), &[original]);
}

// 最大値のIDを取り込んだ後の追加は、重複IDを作らずにエラーになることを確認
#[test]
fn test_add_after_largest_possible_id_is_rejected() {
    let (mut source, _) = test_store();
    let mut top = source.add(draft("Apron", 60, date(2024, 3, 1))).unwrap();
    top.id = u64::MAX;

    let (mut store, slot) = test_store();
    store.replace_all(vec![top.clone()]).unwrap();
    let before = slot.content();

    let err = store.add(draft("Boots", 90, date(2024, 4, 1))).unwrap_err();
    assert!(matches!(err, TrackerError::Validation(_)));
    assert_eq!(store.list(), &[top]);
    assert_eq!(slot.content(), before);

    let reopened = RecordStore::open(Box::new(slot), test_clock());
    assert_eq!(reopened.len(), 1);
}

// 書き込み失敗時はPersistenceErrorが返り、メモリ上の状態も変わらないことを確認
#[test]
fn test_write_failure_is_surfaced_and_not_committed() {
    let (mut store, slot) = test_store();
    let kept = store.add(draft("Apron", 60, date(2024, 3, 1))).unwrap();

    slot.set_fail_writes(true);
    let err = store.add(draft("Boots", 180, date(2024, 1, 1))).unwrap_err();
    assert!(matches!(err, TrackerError::Persistence { .. }));
    assert_eq!(store.list(), &[kept.clone()]);

    assert!(store.remove(kept.id).is_err());
    assert_eq!(store.len(), 1);

    slot.set_fail_writes(false);
    store.add(draft("Boots", 180, date(2024, 1, 1))).unwrap();
    assert_eq!(store.len(), 2);
}

#[test]
fn test_reopen_restores_collection() {
    let slot = MemorySlot::new();
    let mut store = RecordStore::open(Box::new(slot.clone()), test_clock());
    store.add(draft("Apron", 60, date(2024, 3, 1))).unwrap();
    store.add(draft("Boots", 180, date(2024, 1, 1))).unwrap();
    let expected = store.list().to_vec();
    drop(store);

    let reopened = RecordStore::open(Box::new(slot), test_clock());
    assert_eq!(reopened.list(), expected.as_slice());
}

#[test]
fn test_open_degrades_to_empty_on_bad_content() {
    for content in [
        "not json",
        r#"{"items": []}"#,
        r#"[{"id": 1, "name": "Apron"}]"#,
    ] {
        let slot = MemorySlot::with_content(content);
        let store = RecordStore::open(Box::new(slot), test_clock());
        assert!(store.is_empty(), "content {:?} should load empty", content);
    }
}

#[test]
fn test_file_backed_store_round_trip() {
    let dir = TempDir::new().unwrap();
    let slot = FileSlot::keyed(dir.path(), "ppe_items_v1");
    let path = slot.file_path().to_path_buf();

    let mut store = RecordStore::open(Box::new(slot), test_clock());
    let item = store.add(draft("Face shield", 45, date(2024, 4, 1))).unwrap();
    drop(store);

    assert!(path.exists());
    let reopened = RecordStore::open(Box::new(FileSlot::new(&path)), test_clock());
    assert_eq!(reopened.list(), &[item]);
}

#[test]
fn test_file_backed_malformed_content_is_preserved() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("ppe_items_v1.json");
    fs::write(&path, "{broken").unwrap();

    let slot = FileSlot::new(&path);
    assert!(slot.read().unwrap().is_some());
    let store = RecordStore::open(Box::new(slot), test_clock());

    assert!(store.is_empty());
    let backup = fs::read_to_string(dir.path().join("ppe_items_v1.json.corrupt")).unwrap();
    assert_eq!(backup, "{broken");
}

// 間隔1日の手袋を今日登録すると、すぐにWarningになることを確認
#[test]
fn test_one_day_gloves_are_warning_immediately() {
    let (mut store, _slot) = test_store();
    let gloves = store.add(draft("Gloves", 1, date(2024, 4, 25))).unwrap();

    let status = store.status_of(&gloves);
    assert_eq!(status.elapsed_days, 0);
    assert_eq!(status.remaining_days, 1);
    assert_eq!(status.tier, Tier::Warning);
}

#[test]
fn test_future_replacement_date_is_fresh() {
    let (mut store, _slot) = test_store();
    let item = store.add(draft("Helmet", 2, date(2024, 6, 1))).unwrap();

    let status = store.status_of(&item);
    assert_eq!(status.elapsed_days, 0);
    assert_eq!(status.tier, Tier::Fresh);
}
