//! 調査データの型定義
//!
//! CLIと他のフロントエンドで共有される型:
//! - Record: 1件の回答（アプリ名 + 利用時間）
//! - ValidatedFrame: 検証済みの表データ
//! - AggregateDocument: data.json の型付き表現
//! - RankedPoint / LinePoint / ScatterPoint: グラフ用データ

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// スライダーの下限（時間）
pub const MIN_HOURS_FLOOR: f64 = 0.0;
/// スライダーの上限（時間）
pub const MIN_HOURS_CEIL: f64 = 24.0;
/// スライダーの刻み幅
pub const MIN_HOURS_STEP: f64 = 0.5;

/// 1件の回答
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Record {
    pub category: String,     // アプリ名
    pub value: f64,           // 利用時間（h）
}

impl Record {
    pub fn new(category: impl Into<String>, value: f64) -> Self {
        Self {
            category: category.into(),
            value,
        }
    }
}

/// 検証済みの表データ
///
/// 数値変換に失敗した行は取り除かれ、件数だけ `dropped_rows` に残る。
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ValidatedFrame {
    records: Vec<Record>,
    dropped_rows: usize,
}

impl ValidatedFrame {
    pub fn new(records: Vec<Record>, dropped_rows: usize) -> Self {
        Self { records, dropped_rows }
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn dropped_rows(&self) -> usize {
        self.dropped_rows
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Record> {
        self.records.iter()
    }
}

impl From<Vec<Record>> for ValidatedFrame {
    fn from(records: Vec<Record>) -> Self {
        Self::new(records, 0)
    }
}

/// data.json の型付き表現
///
/// `average_screen_time` はファイル内の記述順を保持する。
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AggregateDocument {
    pub average_screen_time: Vec<(String, f64)>,
    pub top_apps: Option<Vec<String>>,
}

impl AggregateDocument {
    pub fn get(&self, category: &str) -> Option<f64> {
        self.average_screen_time
            .iter()
            .find(|(name, _)| name == category)
            .map(|(_, value)| *value)
    }
}

/// グラフ1（静的棒グラフ）の1点
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RankedPoint {
    pub category: String,
    pub value: f64,
}

/// グラフ2（閾値フィルタ付き折れ線）の1点
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LinePoint {
    pub category: String,
    pub value: f64,
}

/// グラフ3（選択フィルタ付き散布図）の1点
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScatterPoint {
    pub category: String,
    pub value: f64,
    /// 散布図のX座標（1始まりの連番）
    pub app_index: usize,
}

/// 射影結果
///
/// 該当行が無い場合は空のグラフではなく `NoRows` を返す。
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", content = "rows", rename_all = "camelCase")]
pub enum Projection<T> {
    Rows(Vec<T>),
    NoRows,
}

impl<T> Projection<T> {
    pub fn from_rows(rows: Vec<T>) -> Self {
        if rows.is_empty() {
            Projection::NoRows
        } else {
            Projection::Rows(rows)
        }
    }

    pub fn rows(&self) -> &[T] {
        match self {
            Projection::Rows(rows) => rows,
            Projection::NoRows => &[],
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Projection::NoRows)
    }
}

/// グラフ1件分の表示データ
///
/// データソースが読めなかった場合は理由だけを持ち、他のグラフには影響しない。
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "camelCase")]
pub enum ChartSection<T> {
    Unavailable { reason: String },
    Projected { projection: Projection<T> },
}

impl<T> ChartSection<T> {
    pub fn unavailable(reason: impl Into<String>) -> Self {
        ChartSection::Unavailable { reason: reason.into() }
    }

    pub fn rows(&self) -> &[T] {
        match self {
            ChartSection::Projected { projection } => projection.rows(),
            ChartSection::Unavailable { .. } => &[],
        }
    }
}

impl<T> From<Projection<T>> for ChartSection<T> {
    fn from(projection: Projection<T>) -> Self {
        ChartSection::Projected { projection }
    }
}

/// 画面操作の状態（セッション内のみ）
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterState {
    pub min_hours: f64,
    pub selected_categories: BTreeSet<String>,
}

impl FilterState {
    /// 初回表示時の状態: 閾値0、全アプリ選択
    pub fn initial(frame: &ValidatedFrame) -> Self {
        Self {
            min_hours: MIN_HOURS_FLOOR,
            selected_categories: frame.iter().map(|r| r.category.clone()).collect(),
        }
    }

    /// 閾値を変更した新しい状態を返す（範囲外はクランプ）
    pub fn with_min_hours(&self, min_hours: f64) -> Self {
        let min_hours = if min_hours.is_nan() {
            self.min_hours
        } else {
            min_hours.clamp(MIN_HOURS_FLOOR, MIN_HOURS_CEIL)
        };
        Self {
            min_hours,
            selected_categories: self.selected_categories.clone(),
        }
    }

    /// 選択アプリを置き換えた新しい状態を返す
    pub fn with_selection<I, S>(&self, selected: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            min_hours: self.min_hours,
            selected_categories: selected.into_iter().map(Into::into).collect(),
        }
    }
}

impl Default for FilterState {
    fn default() -> Self {
        Self {
            min_hours: MIN_HOURS_FLOOR,
            selected_categories: BTreeSet::new(),
        }
    }
}
