//! 集計データストア（data.json、読み込みのみ）

use super::{has_content, source_name};
use crate::error::Result;
use screen_time_common::{parse_aggregate, AggregateDocument};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone)]
pub struct AggregateStore {
    path: PathBuf,
}

impl AggregateStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn source_name(&self) -> String {
        source_name(&self.path)
    }

    /// 集計データを読み込み
    ///
    /// ファイルが無いか空なら `Ok(None)`。壊れたJSONは Parse、構造違いは Schema。
    pub fn read(&self) -> Result<Option<AggregateDocument>> {
        if !has_content(&self.path)? {
            tracing::debug!(path = %self.path.display(), "data.json が無いか空");
            return Ok(None);
        }

        let content = std::fs::read_to_string(&self.path)?;
        let doc = parse_aggregate(&self.source_name(), &content)?;
        if let Some(doc) = &doc {
            tracing::debug!(
                path = %self.path.display(),
                apps = doc.average_screen_time.len(),
                ranked = doc.top_apps.is_some(),
                "data.json を読み込み"
            );
        }
        Ok(doc)
    }
}
