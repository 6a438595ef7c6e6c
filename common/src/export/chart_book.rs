//! グラフ用ブック生成（共通ライブラリ）
//!
//! 3つのグラフをそれぞれ別シートに書き出し、Excelのネイティブグラフで描画させる。
//! データが無いグラフはシートに通知文だけを書く。

use crate::types::{ChartSection, LinePoint, Projection, RankedPoint, ScatterPoint};
use rust_xlsxwriter::*;

/// グラフ1のシート名
pub const RANKED_SHEET: &str = "Ranked";
/// グラフ2のシート名
pub const THRESHOLD_SHEET: &str = "Threshold";
/// グラフ3のシート名
pub const SELECTION_SHEET: &str = "Selection";
/// 概要シート名
pub const SUMMARY_SHEET: &str = "Summary";

/// ブック全体の入力
#[derive(Debug, Clone)]
pub struct ChartBook {
    pub title: String,
    pub generated_at: String,
    pub min_hours: f64,
    pub selected_categories: Vec<String>,
    pub ranked: ChartSection<RankedPoint>,
    pub threshold: ChartSection<LinePoint>,
    pub selection: ChartSection<ScatterPoint>,
}

enum Cell<'a> {
    Text(&'a str),
    Number(f64),
}

/// ブックをバッファに生成
pub fn generate_chart_book_buffer(book: &ChartBook) -> Result<Vec<u8>, String> {
    let mut workbook = Workbook::new();

    let header_format = Format::new()
        .set_bold()
        .set_background_color(Color::RGB(0xF5F5F5))
        .set_border(FormatBorder::Hair)
        .set_border_color(Color::RGB(0xAAAAAA));
    let notice_format = Format::new()
        .set_italic()
        .set_font_color(Color::RGB(0x884400));

    // 概要
    {
        let worksheet = workbook.add_worksheet();
        worksheet.set_name(SUMMARY_SHEET)
            .map_err(|e| format!("シート名設定エラー: {}", e))?;
        worksheet.set_column_width(0, 24)
            .map_err(|e| format!("列幅設定エラー: {}", e))?;
        worksheet.set_column_width(1, 40)
            .map_err(|e| format!("列幅設定エラー: {}", e))?;

        let selected = book.selected_categories.join(", ");
        let lines: [(&str, Cell); 4] = [
            ("Title", Cell::Text(&book.title)),
            ("Generated", Cell::Text(&book.generated_at)),
            ("Minimum hours", Cell::Number(book.min_hours)),
            ("Selected apps", Cell::Text(&selected)),
        ];
        for (row, (label, value)) in lines.iter().enumerate() {
            let row = row as u32;
            worksheet.write_string_with_format(row, 0, *label, &header_format)
                .map_err(|e| format!("概要書き込みエラー: {}", e))?;
            write_cell(worksheet, row, 1, value)?;
        }
    }

    // グラフ1: 静的棒グラフ
    {
        let worksheet = workbook.add_worksheet();
        worksheet.set_name(RANKED_SHEET)
            .map_err(|e| format!("シート名設定エラー: {}", e))?;
        match &book.ranked {
            ChartSection::Projected { projection: Projection::Rows(points) } => {
                let rows: Vec<Vec<Cell>> = points
                    .iter()
                    .map(|p| vec![Cell::Text(&p.category), Cell::Number(p.value)])
                    .collect();
                write_table(worksheet, &["App", "Hours"], &rows, &header_format)?;

                let mut chart = Chart::new(ChartType::Column);
                chart.add_series()
                    .set_name("Average screen time")
                    .set_categories((RANKED_SHEET, 1, 0, rows.len() as u32, 0))
                    .set_values((RANKED_SHEET, 1, 1, rows.len() as u32, 1));
                chart.title().set_name("Average screen time by app");
                chart.x_axis().set_name("App");
                chart.y_axis().set_name("Hours");
                chart.legend().set_hidden();
                worksheet.insert_chart(1, 3, &chart)
                    .map_err(|e| format!("グラフ挿入エラー: {}", e))?;
            }
            other => write_notice(worksheet, other, &notice_format)?,
        }
    }

    // グラフ2: 閾値フィルタ付き折れ線
    {
        let worksheet = workbook.add_worksheet();
        worksheet.set_name(THRESHOLD_SHEET)
            .map_err(|e| format!("シート名設定エラー: {}", e))?;
        match &book.threshold {
            ChartSection::Projected { projection: Projection::Rows(points) } => {
                let rows: Vec<Vec<Cell>> = points
                    .iter()
                    .map(|p| vec![Cell::Text(&p.category), Cell::Number(p.value)])
                    .collect();
                write_table(worksheet, &["Category", "Value"], &rows, &header_format)?;

                let mut chart = Chart::new(ChartType::Line);
                chart.add_series()
                    .set_name("Screen time")
                    .set_categories((THRESHOLD_SHEET, 1, 0, rows.len() as u32, 0))
                    .set_values((THRESHOLD_SHEET, 1, 1, rows.len() as u32, 1));
                chart.title().set_name(&format!("Screen time of at least {} hours", book.min_hours));
                chart.x_axis().set_name("Category");
                chart.y_axis().set_name("Value");
                chart.legend().set_hidden();
                worksheet.insert_chart(1, 3, &chart)
                    .map_err(|e| format!("グラフ挿入エラー: {}", e))?;
            }
            other => write_notice(worksheet, other, &notice_format)?,
        }
    }

    // グラフ3: 選択フィルタ付き散布図
    {
        let worksheet = workbook.add_worksheet();
        worksheet.set_name(SELECTION_SHEET)
            .map_err(|e| format!("シート名設定エラー: {}", e))?;
        match &book.selection {
            ChartSection::Projected { projection: Projection::Rows(points) } => {
                let rows: Vec<Vec<Cell>> = points
                    .iter()
                    .map(|p| {
                        vec![
                            Cell::Number(p.app_index as f64),
                            Cell::Text(&p.category),
                            Cell::Number(p.value),
                        ]
                    })
                    .collect();
                write_table(worksheet, &["App_Index", "Category", "Value"], &rows, &header_format)?;

                let mut chart = Chart::new(ChartType::Scatter);
                chart.add_series()
                    .set_name("Selected apps")
                    .set_categories((SELECTION_SHEET, 1, 0, rows.len() as u32, 0))
                    .set_values((SELECTION_SHEET, 1, 2, rows.len() as u32, 2));
                chart.title().set_name("Screen time of selected apps");
                chart.x_axis().set_name("App_Index");
                chart.y_axis().set_name("Value");
                chart.legend().set_hidden();
                worksheet.insert_chart(1, 4, &chart)
                    .map_err(|e| format!("グラフ挿入エラー: {}", e))?;
            }
            other => write_notice(worksheet, other, &notice_format)?,
        }
    }

    workbook.save_to_buffer()
        .map_err(|e| format!("Excel保存エラー: {}", e))
}

fn write_cell(worksheet: &mut Worksheet, row: u32, col: u16, cell: &Cell) -> Result<(), String> {
    let written = match cell {
        Cell::Text(text) => worksheet.write_string(row, col, *text).map(|_| ()),
        Cell::Number(number) => worksheet.write_number(row, col, *number).map(|_| ()),
    };
    written.map_err(|e| format!("セル書き込みエラー: {}", e))
}

fn write_table(
    worksheet: &mut Worksheet,
    header: &[&str],
    rows: &[Vec<Cell>],
    header_format: &Format,
) -> Result<(), String> {
    for (col, label) in header.iter().enumerate() {
        worksheet.write_string_with_format(0, col as u16, *label, header_format)
            .map_err(|e| format!("ヘッダー書き込みエラー: {}", e))?;
    }
    for (row, cells) in rows.iter().enumerate() {
        for (col, cell) in cells.iter().enumerate() {
            write_cell(worksheet, row as u32 + 1, col as u16, cell)?;
        }
    }
    Ok(())
}

fn write_notice<T>(worksheet: &mut Worksheet, input: &ChartSection<T>, format: &Format) -> Result<(), String> {
    let message = match input {
        ChartSection::Unavailable { reason } => format!("Data not available: {}", reason),
        ChartSection::Projected { projection: Projection::NoRows } => "No rows match the current filter.".to_string(),
        ChartSection::Projected { projection: Projection::Rows(_) } => return Ok(()),
    };
    worksheet.write_string_with_format(0, 0, &message, format)
        .map_err(|e| format!("通知書き込みエラー: {}", e))?;
    Ok(())
}
