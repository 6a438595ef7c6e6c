//! エラー型定義
//!
//! データソースの失敗を3種類に分ける（I/O は呼び出し側で扱う）:
//! - MissingSource: ファイルが存在しない/空（想定内、通知のみ）
//! - Schema: 必須列・必須キーが無い、または型が違う
//! - Parse: テキストとして壊れている

use thiserror::Error;

/// 共通エラー型
#[derive(Error, Debug)]
pub enum Error {
    #[error("Source missing or empty: {0}")]
    MissingSource(String),

    #[error("Schema error: {0}")]
    Schema(String),

    #[error("Parse error: {0}")]
    Parse(String),
}

impl Error {
    /// 必須列が不足している場合のSchemaエラー
    pub fn missing_columns(source: &str, missing: &[&str]) -> Self {
        Error::Schema(format!(
            "'{}' is missing required columns: {}",
            source,
            missing.join(", ")
        ))
    }
}

/// Result型エイリアス
pub type Result<T> = std::result::Result<T, Error>;
