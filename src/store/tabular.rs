//! 表データストア（data.csv）
//!
//! 既存の行は書き換えない。ヘッダーはファイルが無いか空のときだけ書く。

use super::{has_content, source_name};
use crate::error::Result;
use screen_time_common::csv::format_line;
use screen_time_common::frame::{self, HEADER};
use screen_time_common::{RawTable, Record, ValidatedFrame};
use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone)]
pub struct TabularStore {
    path: PathBuf,
}

impl TabularStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn source_name(&self) -> String {
        source_name(&self.path)
    }

    /// レコードを末尾に追記
    ///
    /// 空のスライスなら何もしない（ファイルも作らない）。
    pub fn append(&self, rows: &[Record]) -> Result<()> {
        if rows.is_empty() {
            return Ok(());
        }

        let needs_header = !has_content(&self.path)?;
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        let mut writer = BufWriter::new(file);

        if needs_header {
            writeln!(writer, "{}", HEADER)?;
        } else if !ends_with_newline(&self.path)? {
            // 末尾改行の無いファイルでは最終行を閉じてから書く
            writeln!(writer)?;
        }
        for record in rows {
            writeln!(writer, "{}", format_line(&[record.category.clone(), format_value(record.value)]))?;
        }
        writer.flush()?;

        tracing::info!(
            path = %self.path.display(),
            rows = rows.len(),
            header = needs_header,
            "data.csv に追記"
        );
        Ok(())
    }

    /// 検証済みの表として全件読み込み
    ///
    /// ファイルが無いか空なら `Ok(None)`。必須列が無ければ Schema エラー。
    pub fn read_all(&self) -> Result<Option<ValidatedFrame>> {
        let Some(content) = self.read_content()? else {
            return Ok(None);
        };
        let frame = frame::parse_frame(&self.source_name(), &content)?;
        if let Some(frame) = &frame {
            tracing::debug!(
                path = %self.path.display(),
                rows = frame.len(),
                dropped = frame.dropped_rows(),
                "data.csv を読み込み"
            );
        }
        Ok(frame)
    }

    /// 表示用に型変換せず読み込み
    pub fn read_raw(&self) -> Result<Option<RawTable>> {
        Ok(self
            .read_content()?
            .and_then(|content| frame::parse_raw_table(&content)))
    }

    fn read_content(&self) -> Result<Option<String>> {
        if !has_content(&self.path)? {
            tracing::debug!(path = %self.path.display(), "data.csv が無いか空");
            return Ok(None);
        }
        Ok(Some(std::fs::read_to_string(&self.path)?))
    }
}

/// 中身のあるファイルの最後のバイトが改行か
fn ends_with_newline(path: &Path) -> std::io::Result<bool> {
    let mut file = File::open(path)?;
    file.seek(SeekFrom::End(-1))?;
    let mut last = [0u8; 1];
    file.read_exact(&mut last)?;
    Ok(last[0] == b'\n')
}

/// 値を小数表記で書き出す（2.0 は "2.0"）
fn format_value(value: f64) -> String {
    format!("{:?}", value)
}
