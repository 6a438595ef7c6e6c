//! データファイルの読み書き
//!
//! - tabular: data.csv（追記のみ）
//! - aggregate: data.json（読み込みのみ）
//!
//! どちらも「ファイルが無い/空」は `Ok(None)` で返す。

pub mod tabular;
pub mod aggregate;

pub use tabular::TabularStore;
pub use aggregate::AggregateStore;

use std::path::Path;

/// ファイルが存在して中身があるか
pub(crate) fn has_content(path: &Path) -> std::io::Result<bool> {
    match std::fs::metadata(path) {
        Ok(meta) => Ok(meta.len() > 0),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
        Err(e) => Err(e),
    }
}

/// エラーメッセージ用のファイル名
pub(crate) fn source_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| path.display().to_string())
}
