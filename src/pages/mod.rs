//! ページ単位の処理
//!
//! - survey: 入力フォーム → data.csv 追記
//! - visuals: data.csv / data.json → 3つのグラフ
//!
//! データソースの失敗はページ内で通知に変換し、処理は続ける。

pub mod survey;
pub mod visuals;

use crate::error::{Result, SurveyError};
use crate::store::{AggregateStore, TabularStore};
use screen_time_common::{AggregateDocument, ValidatedFrame};

/// データソース1件の読み込み状態
#[derive(Debug)]
pub enum SourceStatus<T> {
    Loaded(T),
    /// ファイルが無いか空（想定内）
    Missing(String),
    /// 構造違い・パース失敗など
    Failed(SurveyError),
}

impl<T> SourceStatus<T> {
    /// ストアの読み込み結果を状態に変換
    pub fn from_read(source: String, read: Result<Option<T>>) -> Self {
        match read {
            Ok(Some(value)) => SourceStatus::Loaded(value),
            Ok(None) => SourceStatus::Missing(source),
            Err(e) => {
                if matches!(e, SurveyError::Common(_)) {
                    tracing::warn!(source = %source, error = %e, "データソースを除外");
                } else {
                    tracing::error!(source = %source, error = %e, "データソースを読み込めない");
                }
                SourceStatus::Failed(e)
            }
        }
    }

    pub fn loaded(&self) -> Option<&T> {
        match self {
            SourceStatus::Loaded(value) => Some(value),
            _ => None,
        }
    }

    /// グラフに表示する「使えない理由」
    pub fn unavailable_reason(&self) -> Option<String> {
        match self {
            SourceStatus::Loaded(_) => None,
            SourceStatus::Missing(source) => {
                Some(screen_time_common::Error::MissingSource(source.clone()).to_string())
            }
            SourceStatus::Failed(e) => Some(e.to_string()),
        }
    }
}

/// 1回の評価で読み込んだデータ
#[derive(Debug)]
pub struct Snapshot {
    pub tabular: SourceStatus<ValidatedFrame>,
    pub aggregate: SourceStatus<AggregateDocument>,
}

impl Snapshot {
    /// 両方のストアを読み込む（片方の失敗はもう片方に影響しない）
    pub fn load(tabular: &TabularStore, aggregate: &AggregateStore) -> Self {
        Self {
            tabular: SourceStatus::from_read(tabular.source_name(), tabular.read_all()),
            aggregate: SourceStatus::from_read(aggregate.source_name(), aggregate.read()),
        }
    }
}
