//! スクリーンタイム調査ツール
//!
//! 入力ページ（survey）で data.csv に追記し、可視化ページ（visuals）で
//! data.csv と data.json から3つのグラフ用データを作る。

pub mod cli;
pub mod config;
pub mod error;
pub mod export;
pub mod pages;
pub mod render;
pub mod session;
pub mod store;
