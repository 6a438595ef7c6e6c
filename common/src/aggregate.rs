//! 集計データ（data.json）のパーサー
//!
//! JSONとして壊れていれば Parse、構造が違えば Schema。
//! 型なしの `serde_json::Value` はこのモジュールの外に出さない。

use crate::error::{Error, Result};
use crate::types::AggregateDocument;
use serde_json::Value;

/// 必須キー
pub const AVERAGE_KEY: &str = "average_screen_time";
/// 表示順キー（任意）
pub const TOP_APPS_KEY: &str = "top_apps";

/// JSON文字列を集計データに変換
///
/// # Returns
/// * `Ok(None)` - 内容が空（空白のみを含む）
/// * `Ok(Some(doc))` - 変換成功
/// * `Err(Error::Parse)` - JSONとして不正
/// * `Err(Error::Schema)` - `average_screen_time` が無い、またはオブジェクトでない
pub fn parse_aggregate(source: &str, content: &str) -> Result<Option<AggregateDocument>> {
    if content.trim().is_empty() {
        return Ok(None);
    }

    let value: Value = serde_json::from_str(content)
        .map_err(|e| Error::Parse(format!("'{}': {}", source, e)))?;

    let Value::Object(root) = value else {
        return Err(schema_error(source));
    };

    let Some(Value::Object(averages)) = root.get(AVERAGE_KEY) else {
        return Err(schema_error(source));
    };

    let mut average_screen_time = Vec::with_capacity(averages.len());
    for (category, hours) in averages {
        match hours.as_f64().filter(|h| h.is_finite()) {
            Some(hours) => average_screen_time.push((category.clone(), hours)),
            None => tracing::warn!(source, category = %category, "数値でない平均時間を除外"),
        }
    }

    let top_apps = match root.get(TOP_APPS_KEY) {
        None | Some(Value::Null) => None,
        Some(Value::Array(items)) => Some(
            items
                .iter()
                .filter_map(|item| match item {
                    Value::String(name) => Some(name.clone()),
                    other => {
                        tracing::warn!(source, item = %other, "top_apps の文字列でない要素を除外");
                        None
                    }
                })
                .collect(),
        ),
        Some(_) => {
            tracing::warn!(source, "top_apps が配列でないため無視");
            None
        }
    };

    Ok(Some(AggregateDocument {
        average_screen_time,
        top_apps,
    }))
}

fn schema_error(source: &str) -> Error {
    Error::Schema(format!(
        "'{}' must include an '{}' mapping of app name to hours",
        source, AVERAGE_KEY
    ))
}
