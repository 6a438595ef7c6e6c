//! グラフ付きExcelブックの出力（CLI版）

use crate::error::{Result, SurveyError};
use crate::pages::visuals::{build_page, VisualsPage};
use crate::pages::Snapshot;
use crate::session;
use crate::store::{AggregateStore, TabularStore};
use screen_time_common::export::chart_book::{generate_chart_book_buffer, ChartBook};
use std::path::{Path, PathBuf};

/// 出力ファイル名の既定値
pub const DEFAULT_FILE_NAME: &str = "screen-time.xlsx";

/// 出力先がフォルダか拡張子なしならファイル名を補う
pub fn output_path(output: &Path) -> PathBuf {
    if output.is_dir() || output.extension().is_none() {
        output.join(DEFAULT_FILE_NAME)
    } else {
        output.to_path_buf()
    }
}

/// ページの内容からブックの入力を作る
pub fn chart_book(page: &VisualsPage, title: &str) -> ChartBook {
    ChartBook {
        title: title.to_string(),
        generated_at: chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
        min_hours: page.filter.min_hours,
        selected_categories: page.filter.selected_categories.iter().cloned().collect(),
        ranked: page.ranked.clone(),
        threshold: page.threshold.clone(),
        selection: page.selection.clone(),
    }
}

/// ブックをファイルに書き出す
pub fn generate_workbook(page: &VisualsPage, output_path: &Path, title: &str) -> Result<()> {
    let buffer = generate_chart_book_buffer(&chart_book(page, title))
        .map_err(SurveyError::Export)?;
    if let Some(parent) = output_path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    std::fs::write(output_path, buffer)?;
    tracing::info!(path = %output_path.display(), "ブックを出力");
    Ok(())
}

/// export コマンド本体
pub fn run(
    tabular: &TabularStore,
    aggregate: &AggregateStore,
    output: &Path,
    min_hours: Option<f64>,
    selected: &[String],
    title: &str,
) -> Result<PathBuf> {
    println!("📊 screen-time - エクスポート\n");

    let snapshot = Snapshot::load(tabular, aggregate);
    let state = session::start(&snapshot, min_hours, selected);
    let page = build_page(&snapshot, &state);

    for (label, reason) in [
        ("data.csv", snapshot.tabular.unavailable_reason()),
        ("data.json", snapshot.aggregate.unavailable_reason()),
    ] {
        if let Some(reason) = reason {
            println!("⚠ {} は利用できません: {}", label, reason);
        }
    }

    let path = output_path(output);
    println!("- Excelを生成中...");
    generate_workbook(&page, &path, title)?;
    println!("✔ Excel出力: {}", path.display());

    Ok(path)
}
