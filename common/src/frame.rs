//! 表データ（data.csv）のパーサー
//!
//! ヘッダーの前後空白を除去してから `Category` / `Value` 列を探す。
//! 数値に変換できない行は捨てて件数だけ残す。

use crate::csv::{parse_csv_line, split_records};
use crate::error::{Error, Result};
use crate::types::{Record, ValidatedFrame};

/// カテゴリ列名
pub const CATEGORY_COLUMN: &str = "Category";
/// 値列名
pub const VALUE_COLUMN: &str = "Value";
/// 追記時に書き込むヘッダー行
pub const HEADER: &str = "Category,Value";

/// 生の表（表示用、型変換なし）
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawTable {
    pub header: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

/// 区切りテキストを生の表に分解
///
/// 先頭のBOM（Excelの「CSV UTF-8」保存）は除去し、空行は読み飛ばす。
/// ヘッダーが無い（全行空）の場合は `None`。
pub fn parse_raw_table(content: &str) -> Option<RawTable> {
    let content = content.strip_prefix('\u{FEFF}').unwrap_or(content);
    let mut lines = split_records(content)
        .into_iter()
        .map(|line| line.trim_end_matches('\r'))
        .filter(|line| !line.trim().is_empty());

    let header: Vec<String> = lines
        .next()
        .map(|line| parse_csv_line(line).into_iter().map(|h| h.trim().to_string()).collect())?;
    let rows = lines.map(parse_csv_line).collect();

    Some(RawTable { header, rows })
}

/// 区切りテキストを検証済みの表に変換
///
/// # Arguments
/// * `source` - エラーメッセージ用のソース名（ファイル名など）
/// * `content` - ファイル内容
///
/// # Returns
/// * `Ok(None)` - 内容が空
/// * `Ok(Some(frame))` - 変換成功
/// * `Err(Error::Schema)` - 必須列が不足
pub fn parse_frame(source: &str, content: &str) -> Result<Option<ValidatedFrame>> {
    let Some(table) = parse_raw_table(content) else {
        return Ok(None);
    };
    frame_from_table(source, &table).map(Some)
}

/// 生の表から検証済みの表を作る
pub fn frame_from_table(source: &str, table: &RawTable) -> Result<ValidatedFrame> {
    let category_idx = column_index(&table.header, CATEGORY_COLUMN);
    let value_idx = column_index(&table.header, VALUE_COLUMN);

    let (category_idx, value_idx) = match (category_idx, value_idx) {
        (Some(c), Some(v)) => (c, v),
        (c, v) => {
            let mut missing = Vec::new();
            if c.is_none() {
                missing.push(CATEGORY_COLUMN);
            }
            if v.is_none() {
                missing.push(VALUE_COLUMN);
            }
            return Err(Error::missing_columns(source, &missing));
        }
    };

    let mut records = Vec::with_capacity(table.rows.len());
    let mut dropped = 0;

    for row in &table.rows {
        let category = row
            .get(category_idx)
            .map(|s| s.trim())
            .filter(|s| !s.is_empty());
        let value = row.get(value_idx).and_then(|s| coerce_number(s));

        match (category, value) {
            (Some(category), Some(value)) => records.push(Record::new(category, value)),
            _ => dropped += 1,
        }
    }

    if dropped > 0 {
        tracing::debug!(source, dropped, "数値に変換できない行を除外");
    }

    Ok(ValidatedFrame::new(records, dropped))
}

/// 数値への変換（有限値のみ）
pub fn coerce_number(raw: &str) -> Option<f64> {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
}

fn column_index(header: &[String], name: &str) -> Option<usize> {
    header.iter().position(|h| h.trim() == name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_frame_basic() {
        let content = "Category,Value\nInstagram,3.5\nTikTok,2.0\n";
        let frame = parse_frame("data.csv", content).unwrap().unwrap();
        assert_eq!(frame.len(), 2);
        assert_eq!(frame.records()[0], Record::new("Instagram", 3.5));
        assert_eq!(frame.records()[1], Record::new("TikTok", 2.0));
        assert_eq!(frame.dropped_rows(), 0);
    }

    #[test]
    fn test_bom_header_is_accepted() {
        let content = "\u{FEFF}Category,Value\nSafari,1.0\n";
        let frame = parse_frame("data.csv", content).unwrap().unwrap();
        assert_eq!(frame.records(), &[Record::new("Safari", 1.0)]);

        let table = parse_raw_table(content).unwrap();
        assert_eq!(table.header, vec!["Category", "Value"]);
    }

    #[test]
    fn test_quoted_newline_stays_in_one_row() {
        let content = "Category,Value\r\n\"Mail\nCalendar\",1.5\r\nMaps,0.5\r\n";
        let frame = parse_frame("data.csv", content).unwrap().unwrap();
        assert_eq!(
            frame.records(),
            &[Record::new("Mail\nCalendar", 1.5), Record::new("Maps", 0.5)]
        );
        assert_eq!(frame.dropped_rows(), 0);
    }

    #[test]
    fn test_parse_frame_empty_content() {
        assert!(parse_frame("data.csv", "").unwrap().is_none());
        assert!(parse_frame("data.csv", "\n\n").unwrap().is_none());
    }

    #[test]
    fn test_parse_frame_header_only() {
        let frame = parse_frame("data.csv", "Category,Value\n").unwrap().unwrap();
        assert!(frame.is_empty());
    }

    #[test]
    fn test_header_whitespace_is_trimmed() {
        let content = " Category , Value \nYouTube,1.25\n";
        let frame = parse_frame("data.csv", content).unwrap().unwrap();
        assert_eq!(frame.records(), &[Record::new("YouTube", 1.25)]);
    }

    #[test]
    fn test_columns_may_be_reordered() {
        let content = "Value,Category\n4,Discord\n";
        let frame = parse_frame("data.csv", content).unwrap().unwrap();
        assert_eq!(frame.records(), &[Record::new("Discord", 4.0)]);
    }

    #[test]
    fn test_missing_columns_is_schema_error() {
        let err = parse_frame("data.csv", "Name,Hours\nA,1\n").unwrap_err();
        assert!(matches!(err, Error::Schema(_)));
        let display = format!("{}", err);
        assert!(display.contains("Category"));
        assert!(display.contains("Value"));
    }

    #[test]
    fn test_missing_one_column_names_only_that_column() {
        let err = parse_frame("data.csv", "Category,Hours\nA,1\n").unwrap_err();
        let display = format!("{}", err);
        assert!(display.contains("Value"));
        assert!(!display.contains("Category,"));
    }

    #[test]
    fn test_non_numeric_rows_are_dropped() {
        let content = "Category,Value\nA,1\nB,abc\nC,\nD\nE,inf\n,3\nF,2.5\n";
        let frame = parse_frame("data.csv", content).unwrap().unwrap();
        let names: Vec<&str> = frame.iter().map(|r| r.category.as_str()).collect();
        assert_eq!(names, vec!["A", "F"]);
        assert_eq!(frame.dropped_rows(), 5);
    }

    #[test]
    fn test_crlf_line_endings() {
        let content = "Category,Value\r\nA,1\r\n";
        let frame = parse_frame("data.csv", content).unwrap().unwrap();
        assert_eq!(frame.records(), &[Record::new("A", 1.0)]);
    }

    #[test]
    fn test_raw_table_keeps_cells_as_text() {
        let table = parse_raw_table("Category,Value\nA,abc\n").unwrap();
        assert_eq!(table.header, vec!["Category", "Value"]);
        assert_eq!(table.rows, vec![vec!["A".to_string(), "abc".to_string()]]);
    }
}
