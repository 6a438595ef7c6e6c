//! 可視化ページ
//!
//! 1回の評価ごとに data.csv / data.json を読み直し、3つのグラフを独立に組み立てる。
//! - グラフ1: data.json の平均利用時間（top_apps 順の棒グラフ）
//! - グラフ2: data.csv の閾値フィルタ（アプリ名順の折れ線）
//! - グラフ3: data.csv の選択フィルタ（App_Index を X 軸にした散布図）

use super::Snapshot;
use crate::error::Result;
use crate::render;
use crate::session::{self, Interaction};
use crate::store::{AggregateStore, TabularStore};
use screen_time_common::{
    above_threshold, by_selection, category_options, ranked_from_document, ChartSection,
    FilterState, LinePoint, RankedPoint, ScatterPoint,
};
use serde::Serialize;

/// 表示用に組み立てたページ
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VisualsPage {
    pub filter: FilterState,
    /// 複数選択の候補
    pub options: Vec<String>,
    pub ranked: ChartSection<RankedPoint>,
    pub threshold: ChartSection<LinePoint>,
    pub selection: ChartSection<ScatterPoint>,
}

/// スナップショットと現在の状態からページを組み立てる
pub fn build_page(snapshot: &Snapshot, state: &FilterState) -> VisualsPage {
    let ranked = match snapshot.aggregate.loaded() {
        Some(doc) => ChartSection::from(screen_time_common::Projection::from_rows(
            ranked_from_document(doc),
        )),
        None => ChartSection::unavailable(
            snapshot.aggregate.unavailable_reason().unwrap_or_default(),
        ),
    };

    let (options, threshold, selection) = match snapshot.tabular.loaded() {
        Some(frame) => (
            category_options(frame),
            ChartSection::from(above_threshold(frame, state.min_hours)),
            ChartSection::from(by_selection(frame, &state.selected_categories)),
        ),
        None => {
            let reason = snapshot.tabular.unavailable_reason().unwrap_or_default();
            (
                Vec::new(),
                ChartSection::unavailable(reason.clone()),
                ChartSection::unavailable(reason),
            )
        }
    };

    VisualsPage {
        filter: state.clone(),
        options,
        ranked,
        threshold,
        selection,
    }
}

/// 1回だけ評価して表示
pub fn run(
    tabular: &TabularStore,
    aggregate: &AggregateStore,
    min_hours: Option<f64>,
    selected: &[String],
    json: bool,
) -> Result<()> {
    let snapshot = Snapshot::load(tabular, aggregate);
    let state = session::start(&snapshot, min_hours, selected);
    let page = build_page(&snapshot, &state);

    if json {
        println!("{}", serde_json::to_string_pretty(&page)?);
    } else {
        render::print_visuals(&snapshot, &page);
    }
    Ok(())
}

/// 対話的に閾値・選択を変更しながら表示
///
/// 操作のたびにファイルを読み直してページ全体を再評価する。
/// 状態はこのループの中だけで保持し、終了時に捨てる。
pub fn run_interactive(
    tabular: &TabularStore,
    aggregate: &AggregateStore,
    min_hours: Option<f64>,
    selected: &[String],
) -> Result<()> {
    let mut snapshot = Snapshot::load(tabular, aggregate);
    let mut state = session::start(&snapshot, min_hours, selected);

    loop {
        let page = build_page(&snapshot, &state);
        render::print_visuals(&snapshot, &page);

        let interaction = session::prompt_interaction(&page)?;
        if interaction == Interaction::Quit {
            break;
        }

        snapshot = Snapshot::load(tabular, aggregate);
        state = session::apply(&state, interaction, &snapshot);
    }

    Ok(())
}
