use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "screen-time")]
#[command(about = "スクリーンタイム調査の入力・可視化ツール", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// 詳細ログを出力
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// data.csv / data.json のあるフォルダ（設定より優先）
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// アプリと利用時間を入力して data.csv に追記
    Survey {
        /// 入力（APP=HOURS 形式、複数指定可）。省略時は対話入力
        #[arg(short, long = "entry", value_parser = parse_entry)]
        entries: Vec<Entry>,
    },

    /// data.csv の現在の内容を表示
    Show,

    /// グラフ用データを表示
    Visuals {
        /// 最低利用時間（グラフ2の閾値）
        #[arg(short, long)]
        min_hours: Option<f64>,

        /// 散布図に含めるアプリ（グラフ3、複数指定可。省略時は全アプリ）
        #[arg(short, long = "select")]
        selected: Vec<String>,

        /// グラフ用データをJSONで出力
        #[arg(long)]
        json: bool,

        /// 閾値・選択を対話的に変更
        #[arg(short, long)]
        interactive: bool,
    },

    /// グラフ付きExcelブックを出力
    Export {
        /// 出力ファイル（デフォルト: データフォルダ/screen-time.xlsx）
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// 最低利用時間（グラフ2の閾値）
        #[arg(short, long)]
        min_hours: Option<f64>,

        /// 散布図に含めるアプリ（複数指定可）
        #[arg(short, long = "select")]
        selected: Vec<String>,
    },

    /// 設定を表示/編集
    Config {
        /// データフォルダを設定
        #[arg(long)]
        set_data_dir: Option<PathBuf>,

        /// 設定を表示
        #[arg(long)]
        show: bool,
    },
}

/// コマンドラインの1入力（未検証の文字列のまま保持）
#[derive(Clone, Debug, PartialEq)]
pub struct Entry {
    pub category: String,
    pub value: String,
}

/// `APP=HOURS` を分割（検証はフォームと同じ規則で後段が行う）
pub fn parse_entry(s: &str) -> Result<Entry, String> {
    match s.rsplit_once('=') {
        Some((category, value)) => Ok(Entry {
            category: category.to_string(),
            value: value.to_string(),
        }),
        None => Err(format!("Invalid entry: {}. Use APP=HOURS", s)),
    }
}
