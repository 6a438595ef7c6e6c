use thiserror::Error;

#[derive(Error, Debug)]
pub enum SurveyError {
    #[error("設定エラー: {0}")]
    Config(String),

    #[error("JSON解析エラー: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("IOエラー: {0}")]
    Io(#[from] std::io::Error),

    #[error("Excel生成エラー: {0}")]
    Export(String),

    #[error("入力エラー: {0}")]
    Prompt(String),

    #[error(transparent)]
    Common(#[from] screen_time_common::Error),
}

pub type Result<T> = std::result::Result<T, SurveyError>;
