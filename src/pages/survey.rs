//! 入力フォームページ
//!
//! 上位アプリと利用時間（最大7組）を受け取り、有効な組だけを data.csv に追記する。
//! 送信後は入力内容と data.csv の現在の内容を表示する。

use crate::cli::Entry;
use crate::error::{Result, SurveyError};
use crate::render;
use crate::store::TabularStore;
use dialoguer::Input;
use screen_time_common::{validate_detailed, ValidationReport};

/// フォームの入力（位置で対になる2列）
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FormInput {
    pub categories: Vec<String>,
    pub values: Vec<String>,
}

impl FormInput {
    pub fn from_entries(entries: &[Entry]) -> Self {
        Self {
            categories: entries.iter().map(|e| e.category.clone()).collect(),
            values: entries.iter().map(|e| e.value.clone()).collect(),
        }
    }
}

/// 入力を検証して有効な行を追記
///
/// 有効な行が無ければファイルには触れない。
pub fn submit(store: &TabularStore, form: &FormInput, max_entries: usize) -> Result<ValidationReport> {
    let slots = form.categories.len().max(form.values.len());
    if slots > max_entries {
        return Err(SurveyError::Prompt(format!(
            "入力は最大{}組までです（{}組指定されました）",
            max_entries, slots
        )));
    }

    let report = validate_detailed(&form.categories, &form.values);
    tracing::debug!(
        accepted = report.records.len(),
        blank = report.blank_pairs,
        rejected = report.rejected_pairs,
        "入力を検証"
    );

    store.append(&report.records)?;
    Ok(report)
}

/// フォームを対話的に入力
fn prompt_form(max_entries: usize) -> Result<FormInput> {
    println!("よく使うアプリ（上位{}件、順不同）と1日の利用時間（時間）を入力してください。", max_entries);
    println!("空欄のままEnterで未使用の枠になります。\n");

    let mut form = FormInput::default();
    for i in 0..max_entries {
        let category: String = Input::new()
            .with_prompt(format!("アプリ #{}", i + 1))
            .allow_empty(true)
            .interact_text()
            .map_err(|e| SurveyError::Prompt(e.to_string()))?;
        let value: String = Input::new()
            .with_prompt(format!("利用時間 #{} (時間)", i + 1))
            .allow_empty(true)
            .interact_text()
            .map_err(|e| SurveyError::Prompt(e.to_string()))?;

        form.categories.push(category);
        form.values.push(value);
    }
    Ok(form)
}

/// 入力ページを実行
///
/// `entries` が空なら対話入力。
pub fn run(store: &TabularStore, entries: &[Entry], max_entries: usize) -> Result<()> {
    println!("📝 screen-time - データ入力\n");

    let form = if entries.is_empty() {
        prompt_form(max_entries)?
    } else {
        FormInput::from_entries(entries)
    };

    let report = submit(store, &form, max_entries)?;

    if report.records.is_empty() {
        println!("⚠ 有効な（アプリ, 利用時間）の組がありません。利用時間が数値か確認してください。");
    } else {
        println!("✔ データを送信しました: {}", store.path().display());
        if report.has_rejections() {
            println!("⚠ 利用時間が数値でない組 {}件 は登録されませんでした", report.rejected_pairs);
        }
        println!("\n入力内容:");
        render::print_records(&report.records);
    }

    println!();
    // 追記は済んでいるので、読み返しの失敗は通知だけにする
    if let Err(e) = show(store) {
        tracing::warn!(path = %store.path().display(), error = %e, "data.csv を読み返せない");
        println!("✖ {} の読み込みエラー: {}", store.source_name(), e);
    }
    Ok(())
}

/// data.csv の現在の内容を表示
pub fn show(store: &TabularStore) -> Result<()> {
    println!("--- data.csv の現在の内容 ---");
    match store.read_raw()? {
        Some(table) => render::print_raw_table(&table),
        None => println!("⚠ '{}' は空か、まだ存在しません", store.source_name()),
    }
    Ok(())
}
