//! 画面操作の状態管理
//!
//! 状態（閾値・選択アプリ）はグローバルに持たず、操作ごとに
//! 「現在の状態 + 操作 + スナップショット → 新しい状態」として受け渡す。

use crate::error::{Result, SurveyError};
use crate::pages::visuals::VisualsPage;
use crate::pages::Snapshot;
use dialoguer::{Input, MultiSelect};
use screen_time_common::types::{MIN_HOURS_CEIL, MIN_HOURS_FLOOR, MIN_HOURS_STEP};
use screen_time_common::{category_options, FilterState};

/// ユーザー操作
#[derive(Debug, Clone, PartialEq)]
pub enum Interaction {
    /// 閾値を指定値に
    SetMinHours(f64),
    /// 閾値をスライダーの刻み幅単位で増減
    StepMinHours(i32),
    /// 選択アプリを置き換え
    SetSelection(Vec<String>),
    /// 全アプリを選択
    SelectAll,
    /// 終了
    Quit,
}

/// セッション開始時の状態
///
/// data.csv が読めていれば全アプリを選択、コマンドライン指定があれば上書きする。
pub fn start(snapshot: &Snapshot, min_hours: Option<f64>, selected: &[String]) -> FilterState {
    let mut state = snapshot
        .tabular
        .loaded()
        .map(FilterState::initial)
        .unwrap_or_default();

    if let Some(min_hours) = min_hours {
        state = state.with_min_hours(min_hours);
    }
    if !selected.is_empty() {
        state = state.with_selection(selected.iter().cloned());
    }
    state
}

/// 操作を適用した新しい状態を返す
pub fn apply(state: &FilterState, interaction: Interaction, snapshot: &Snapshot) -> FilterState {
    match interaction {
        Interaction::SetMinHours(hours) => state.with_min_hours(hours),
        Interaction::StepMinHours(steps) => {
            state.with_min_hours(state.min_hours + f64::from(steps) * MIN_HOURS_STEP)
        }
        Interaction::SetSelection(selected) => state.with_selection(selected),
        Interaction::SelectAll => {
            let options = snapshot
                .tabular
                .loaded()
                .map(category_options)
                .unwrap_or_default();
            state.with_selection(options)
        }
        Interaction::Quit => state.clone(),
    }
}

/// 操作入力の解釈（選択の変更は `None` を返し、呼び出し側で複数選択を出す）
pub fn parse_command(input: &str) -> std::result::Result<Option<Interaction>, String> {
    match input.trim() {
        "q" | "Q" | "quit" => Ok(Some(Interaction::Quit)),
        "+" => Ok(Some(Interaction::StepMinHours(1))),
        "-" => Ok(Some(Interaction::StepMinHours(-1))),
        "a" | "A" => Ok(Some(Interaction::SelectAll)),
        "s" | "S" => Ok(None),
        other => other
            .parse::<f64>()
            .ok()
            .filter(|h| h.is_finite())
            .map(|h| Some(Interaction::SetMinHours(h)))
            .ok_or_else(|| format!("不明な操作: {}", other)),
    }
}

/// 操作を対話的に入力
pub fn prompt_interaction(page: &VisualsPage) -> Result<Interaction> {
    let prompt = format!(
        "操作 (数値:最低時間 {}〜{} / +,-:{}刻み / s:アプリ選択 / a:全選択 / q:終了)",
        MIN_HOURS_FLOOR, MIN_HOURS_CEIL, MIN_HOURS_STEP
    );

    loop {
        let input: String = Input::new()
            .with_prompt(&prompt)
            .allow_empty(true)
            .interact_text()
            .map_err(|e| SurveyError::Prompt(e.to_string()))?;

        match parse_command(&input) {
            Ok(Some(interaction)) => return Ok(interaction),
            Ok(None) => return prompt_selection(page),
            Err(message) => println!("⚠ {}", message),
        }
    }
}

fn prompt_selection(page: &VisualsPage) -> Result<Interaction> {
    if page.options.is_empty() {
        println!("⚠ 選択できるアプリがありません");
        return Ok(Interaction::SetSelection(Vec::new()));
    }

    let defaults: Vec<bool> = page
        .options
        .iter()
        .map(|o| page.filter.selected_categories.contains(o))
        .collect();

    let chosen = MultiSelect::new()
        .with_prompt("散布図に含めるアプリを選択 (Space:切替 Enter:決定)")
        .items(&page.options)
        .defaults(&defaults)
        .interact()
        .map_err(|e| SurveyError::Prompt(e.to_string()))?;

    Ok(Interaction::SetSelection(
        chosen.into_iter().map(|i| page.options[i].clone()).collect(),
    ))
}
