//! グラフ用データの射影
//!
//! どの関数も入力を変更しない純粋な変換で、操作のたびに全体を再計算する。

use crate::types::{
    AggregateDocument, LinePoint, Projection, RankedPoint, ScatterPoint, ValidatedFrame,
};
use std::collections::{BTreeSet, HashSet};

/// グラフ1: 平均利用時間を表示順に並べる
///
/// `order` があればその順に並べ、マップに無い名前は捨てる（重複は1回だけ）。
/// 無ければ `average_screen_time` の記述順。
pub fn ranked_static(avg: &[(String, f64)], order: Option<&[String]>) -> Vec<RankedPoint> {
    match order {
        Some(order) => {
            let mut seen = HashSet::new();
            order
                .iter()
                .filter(|name| seen.insert(name.as_str()))
                .filter_map(|name| {
                    avg.iter()
                        .find(|(category, _)| category == name)
                        .map(|(category, value)| RankedPoint {
                            category: category.clone(),
                            value: *value,
                        })
                })
                .collect()
        }
        None => avg
            .iter()
            .map(|(category, value)| RankedPoint {
                category: category.clone(),
                value: *value,
            })
            .collect(),
    }
}

/// 集計データからグラフ1を作る
pub fn ranked_from_document(doc: &AggregateDocument) -> Vec<RankedPoint> {
    ranked_static(&doc.average_screen_time, doc.top_apps.as_deref())
}

/// グラフ2: 閾値以上の行をアプリ名の昇順で返す
pub fn above_threshold(frame: &ValidatedFrame, min_value: f64) -> Projection<LinePoint> {
    let mut rows: Vec<LinePoint> = frame
        .iter()
        .filter(|r| r.value >= min_value)
        .map(|r| LinePoint {
            category: r.category.clone(),
            value: r.value,
        })
        .collect();

    rows.sort_by(|a, b| a.category.cmp(&b.category));

    Projection::from_rows(rows)
}

/// グラフ3: 選択されたアプリの行に1始まりの連番を振る
pub fn by_selection(frame: &ValidatedFrame, selected: &BTreeSet<String>) -> Projection<ScatterPoint> {
    let rows = frame
        .iter()
        .filter(|r| selected.contains(&r.category))
        .enumerate()
        .map(|(i, r)| ScatterPoint {
            category: r.category.clone(),
            value: r.value,
            app_index: i + 1,
        })
        .collect();

    Projection::from_rows(rows)
}

/// 複数選択の候補（重複なし、昇順）
pub fn category_options(frame: &ValidatedFrame) -> Vec<String> {
    frame
        .iter()
        .map(|r| r.category.clone())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}
