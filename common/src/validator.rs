//! 入力フォームの検証
//!
//! アプリ名と時間を位置で対にして、有効な組だけを残す。
//! 行ごとのエラーは出さず、件数だけ `ValidationReport` に集計する。

use crate::frame::coerce_number;
use crate::types::Record;

/// フォームの入力枠数（上位7アプリ）
pub const MAX_ENTRIES: usize = 7;

/// 検証結果
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ValidationReport {
    /// 受け付けたレコード（入力順）
    pub records: Vec<Record>,
    /// どちらかが空欄だった組の数
    pub blank_pairs: usize,
    /// 時間が数値として不正だった組の数
    pub rejected_pairs: usize,
}

impl ValidationReport {
    /// 入力されたのに捨てられた組があるか
    pub fn has_rejections(&self) -> bool {
        self.rejected_pairs > 0
    }
}

/// 入力を検証してレコードを返す
///
/// # Examples
/// ```
/// use screen_time_common::validator::validate;
///
/// let records = validate(&["A", "B", ""], &["1", "x", "5"]);
/// assert_eq!(records.len(), 1);
/// assert_eq!(records[0].category, "A");
/// ```
pub fn validate<C, V>(category_inputs: &[C], value_inputs: &[V]) -> Vec<Record>
where
    C: AsRef<str>,
    V: AsRef<str>,
{
    validate_detailed(category_inputs, value_inputs).records
}

/// 入力を検証して集計付きの結果を返す
pub fn validate_detailed<C, V>(category_inputs: &[C], value_inputs: &[V]) -> ValidationReport
where
    C: AsRef<str>,
    V: AsRef<str>,
{
    let mut report = ValidationReport::default();

    for (category, value) in category_inputs.iter().zip(value_inputs) {
        let category = normalize_category(category.as_ref());
        let value = value.as_ref().trim();

        if category.is_empty() || value.is_empty() {
            report.blank_pairs += 1;
            continue;
        }

        // 負の時間は受け付けない
        match coerce_number(value).filter(|hours| *hours >= 0.0) {
            Some(hours) => report.records.push(Record::new(category, hours)),
            None => report.rejected_pairs += 1,
        }
    }

    report
}

/// 改行を空白に置き換えて前後の空白を除去
fn normalize_category(raw: &str) -> String {
    raw.replace(['\r', '\n'], " ").trim().to_string()
}
