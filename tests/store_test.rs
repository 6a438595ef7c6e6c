//! data.csv ストアの統合テスト
//!
//! 追記のみであること・読み込みが冪等であることを検証

use screen_time_common::Record;
use screen_time_survey::store::TabularStore;
use tempfile::tempdir;

fn records(pairs: &[(&str, f64)]) -> Vec<Record> {
    pairs.iter().map(|(c, v)| Record::new(*c, *v)).collect()
}

#[test]
fn test_read_all_is_idempotent() {
    let dir = tempdir().expect("Failed to create temp dir");
    let store = TabularStore::new(dir.path().join("data.csv"));
    store.append(&records(&[("Instagram", 3.5), ("TikTok", 2.0)])).unwrap();

    let first = store.read_all().unwrap();
    let second = store.read_all().unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_appends_are_concatenated_in_order() {
    let dir = tempdir().expect("Failed to create temp dir");
    let store = TabularStore::new(dir.path().join("data.csv"));

    let batches = vec![
        records(&[("Instagram", 3.5)]),
        records(&[]),
        records(&[("TikTok", 2.0), ("YouTube", 1.25)]),
        records(&[("Discord", 0.5)]),
    ];

    let mut expected = Vec::new();
    for batch in &batches {
        let before = std::fs::read_to_string(store.path()).unwrap_or_default();
        store.append(batch).unwrap();
        let after = std::fs::read_to_string(store.path()).unwrap_or_default();

        // 既存の内容は一切変わらない
        assert!(after.starts_with(&before), "既存の行が変更された");
        expected.extend(batch.iter().cloned());
    }

    let frame = store.read_all().unwrap().unwrap();
    assert_eq!(frame.records(), expected.as_slice());

    let content = std::fs::read_to_string(store.path()).unwrap();
    assert_eq!(content.matches("Category,Value").count(), 1, "ヘッダーは1回だけ");
    assert!(content.starts_with("Category,Value\n"));
    assert!(content.ends_with('\n'));
}

#[test]
fn test_append_to_existing_file_from_other_writer() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("data.csv");
    std::fs::write(&path, "Category,Value\nSafari,1.0\n").unwrap();

    let store = TabularStore::new(&path);
    store.append(&records(&[("Maps", 0.5)])).unwrap();

    assert_eq!(
        std::fs::read_to_string(&path).unwrap(),
        "Category,Value\nSafari,1.0\nMaps,0.5\n"
    );
}

#[test]
fn test_category_with_comma_keeps_two_fields() {
    let dir = tempdir().expect("Failed to create temp dir");
    let store = TabularStore::new(dir.path().join("data.csv"));
    store.append(&records(&[("Mail, Calendar", 1.5), ("Say \"Hi\"", 2.0)])).unwrap();

    let frame = store.read_all().unwrap().unwrap();
    assert_eq!(frame.records(), records(&[("Mail, Calendar", 1.5), ("Say \"Hi\"", 2.0)]).as_slice());
}

#[test]
fn test_padded_header_is_accepted() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("data.csv");
    std::fs::write(&path, " Category ,Value \nInstagram,3.5\nTikTok,two\n").unwrap();

    let frame = TabularStore::new(&path).read_all().unwrap().unwrap();
    assert_eq!(frame.records(), records(&[("Instagram", 3.5)]).as_slice());
    assert_eq!(frame.dropped_rows(), 1);
}

#[test]
fn test_append_after_missing_trailing_newline_keeps_last_row() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("data.csv");
    std::fs::write(&path, "Category,Value\nSafari,1.0").unwrap();

    let store = TabularStore::new(&path);
    store.append(&records(&[("Maps", 0.5)])).unwrap();

    assert_eq!(
        std::fs::read_to_string(&path).unwrap(),
        "Category,Value\nSafari,1.0\nMaps,0.5\n"
    );
    let frame = store.read_all().unwrap().unwrap();
    assert_eq!(frame.records(), records(&[("Safari", 1.0), ("Maps", 0.5)]).as_slice());
    assert_eq!(frame.dropped_rows(), 0);
}

#[test]
fn test_append_after_header_without_newline() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("data.csv");
    std::fs::write(&path, "Category,Value").unwrap();

    let store = TabularStore::new(&path);
    store.append(&records(&[("Maps", 0.5)])).unwrap();

    assert_eq!(std::fs::read_to_string(&path).unwrap(), "Category,Value\nMaps,0.5\n");
}

#[test]
fn test_excel_utf8_bom_file_is_readable() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("data.csv");
    std::fs::write(&path, "\u{FEFF}Category,Value\r\nSafari,1.0\r\n").unwrap();

    let frame = TabularStore::new(&path).read_all().unwrap().unwrap();
    assert_eq!(frame.records(), records(&[("Safari", 1.0)]).as_slice());
}

#[test]
fn test_quoted_newline_in_category_round_trips() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("data.csv");
    std::fs::write(&path, "Category,Value\n\"Mail\nCalendar\",1.5\nMaps,0.5\n").unwrap();

    let store = TabularStore::new(&path);
    store.append(&records(&[("Line\nBreak", 2.0)])).unwrap();

    let frame = store.read_all().unwrap().unwrap();
    assert_eq!(
        frame.records(),
        records(&[("Mail\nCalendar", 1.5), ("Maps", 0.5), ("Line\nBreak", 2.0)]).as_slice()
    );
    assert_eq!(frame.dropped_rows(), 0);
}
