//! 端末への表示
//!
//! 表とグラフ用データをテキストで出力する。グラフそのものは描かない
//! （描画は export のExcelブックに任せる）。

use crate::pages::visuals::VisualsPage;
use crate::pages::{Snapshot, SourceStatus};
use screen_time_common::{ChartSection, Projection, RawTable, Record};

/// 列幅を揃えた表を文字列にする
pub fn format_table<H, C>(header: &[H], rows: &[Vec<C>]) -> String
where
    H: AsRef<str>,
    C: AsRef<str>,
{
    let columns = header.len().max(rows.iter().map(|r| r.len()).max().unwrap_or(0));
    let mut widths = vec![0usize; columns];
    for (i, h) in header.iter().enumerate() {
        widths[i] = widths[i].max(h.as_ref().chars().count());
    }
    for row in rows {
        for (i, cell) in row.iter().enumerate() {
            widths[i] = widths[i].max(cell.as_ref().chars().count());
        }
    }

    let line = |cells: Vec<&str>| -> String {
        (0..columns)
            .map(|i| {
                let cell = cells.get(i).copied().unwrap_or("");
                let pad = widths[i].saturating_sub(cell.chars().count());
                format!("{}{}", cell, " ".repeat(pad))
            })
            .collect::<Vec<_>>()
            .join("  ")
            .trim_end()
            .to_string()
    };

    let mut out = Vec::with_capacity(rows.len() + 2);
    out.push(line(header.iter().map(|h| h.as_ref()).collect()));
    out.push(
        widths
            .iter()
            .map(|w| "-".repeat(*w))
            .collect::<Vec<_>>()
            .join("  "),
    );
    for row in rows {
        out.push(line(row.iter().map(|c| c.as_ref()).collect()));
    }
    out.join("\n")
}

pub fn print_records(records: &[Record]) {
    let rows: Vec<Vec<String>> = records
        .iter()
        .map(|r| vec![r.category.clone(), format_hours(r.value)])
        .collect();
    println!("{}", format_table(&["Category", "Value"], &rows));
}

pub fn print_raw_table(table: &RawTable) {
    println!("{}", format_table(&table.header, &table.rows));
}

/// 可視化ページ全体を表示
pub fn print_visuals(snapshot: &Snapshot, page: &VisualsPage) {
    println!("📈 screen-time - データ可視化\n");

    println!("=== 入力データ ===");
    print_source_notice(&snapshot.tabular, "data.csv");
    if let Some(frame) = snapshot.tabular.loaded() {
        print_records(frame.records());
        if frame.dropped_rows() > 0 {
            println!("⚠ 数値でない行 {}件 を除外しました", frame.dropped_rows());
        }
    }
    print_source_notice(&snapshot.aggregate, "data.json");
    println!();

    println!("=== グラフ1: 平均利用時間（data.json、静的） ===");
    print_section(
        &page.ranked,
        &["App", "Hours"],
        |p| vec![p.category.clone(), format_hours(p.value)],
        "JSON が利用できません",
        "表示するアプリがありません。",
    );
    println!();

    println!(
        "=== グラフ2: 最低利用時間 {} 時間以上（data.csv、折れ線） ===",
        format_hours(page.filter.min_hours)
    );
    print_section(
        &page.threshold,
        &["Category", "Value"],
        |p| vec![p.category.clone(), format_hours(p.value)],
        "CSV が利用できません",
        "条件に合う行がありません。最低利用時間を下げてください。",
    );
    println!();

    let selected: Vec<&str> = page.filter.selected_categories.iter().map(|s| s.as_str()).collect();
    println!("=== グラフ3: 選択アプリの散布図（data.csv） ===");
    println!("選択中: {}", if selected.is_empty() { "(なし)".to_string() } else { selected.join(", ") });
    print_section(
        &page.selection,
        &["App_Index", "Category", "Value"],
        |p| vec![p.app_index.to_string(), p.category.clone(), format_hours(p.value)],
        "CSV が利用できません",
        "表示するデータがありません。アプリを1つ以上選択してください。",
    );
    println!();
}

fn print_source_notice<T>(status: &SourceStatus<T>, label: &str) {
    match status {
        SourceStatus::Loaded(_) => println!("✔ {} を読み込みました", label),
        SourceStatus::Missing(source) => println!("⚠ '{}' が無いか空です", source),
        SourceStatus::Failed(e) => println!("✖ {} の読み込みエラー: {}", label, e),
    }
}

fn print_section<T, F>(
    section: &ChartSection<T>,
    header: &[&str],
    to_row: F,
    unavailable: &str,
    no_rows: &str,
) where
    F: Fn(&T) -> Vec<String>,
{
    match section {
        ChartSection::Unavailable { reason } => {
            println!("ℹ {}", unavailable);
            tracing::debug!(reason = %reason, "グラフを表示しない");
        }
        ChartSection::Projected { projection: Projection::NoRows } => {
            println!("⚠ {}", no_rows);
        }
        ChartSection::Projected { projection: Projection::Rows(points) } => {
            let rows: Vec<Vec<String>> = points.iter().map(&to_row).collect();
            println!("{}", format_table(header, &rows));
        }
    }
}

/// 時間の表示（2.0 → "2.0"）
pub fn format_hours(value: f64) -> String {
    format!("{:?}", value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_table_aligns_columns() {
        let rows = vec![
            vec!["Instagram".to_string(), "3.5".to_string()],
            vec!["X".to_string(), "12.25".to_string()],
        ];
        let table = format_table(&["Category", "Value"], &rows);
        let lines: Vec<&str> = table.lines().collect();
        assert_eq!(lines[0], "Category   Value");
        assert_eq!(lines[1], "---------  -----");
        assert_eq!(lines[2], "Instagram  3.5");
        assert_eq!(lines[3], "X          12.25");
    }

    #[test]
    fn test_format_table_ragged_rows() {
        let rows = vec![vec!["only"]];
        let table = format_table(&["A", "B"], &rows);
        assert_eq!(table.lines().nth(2), Some("only"));
    }

    #[test]
    fn test_format_hours() {
        assert_eq!(format_hours(2.0), "2.0");
        assert_eq!(format_hours(0.25), "0.25");
    }
}
