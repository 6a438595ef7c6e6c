use crate::error::{Result, SurveyError};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// 表データのファイル名
pub const DEFAULT_CSV_FILE: &str = "data.csv";
/// 集計データのファイル名
pub const DEFAULT_JSON_FILE: &str = "data.json";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// data.csv / data.json を置くフォルダ（未設定ならカレント）
    pub data_dir: Option<PathBuf>,
    pub csv_file: String,
    pub json_file: String,
    /// 入力フォームの枠数
    pub max_entries: usize,
    /// エクスポートのタイトル
    pub export_title: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: None,
            csv_file: DEFAULT_CSV_FILE.into(),
            json_file: DEFAULT_JSON_FILE.into(),
            max_entries: screen_time_common::MAX_ENTRIES,
            export_title: "Screen Time".into(),
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;
        Self::load_from(&config_path)
    }

    pub fn load_from(config_path: &Path) -> Result<Self> {
        if config_path.exists() {
            let content = std::fs::read_to_string(config_path)?;
            let config: Config = serde_json::from_str(&content)?;
            config.check()?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    pub fn save(&self) -> Result<()> {
        let config_path = Self::config_path()?;
        self.save_to(&config_path)
    }

    pub fn save_to(&self, config_path: &Path) -> Result<()> {
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(config_path, content)?;
        Ok(())
    }

    pub fn config_path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| SurveyError::Config("ホームディレクトリが見つかりません".into()))?;
        Ok(home.join(".config").join("screen-time").join("config.json"))
    }

    /// データフォルダ（コマンドライン指定 > 設定 > カレント）
    pub fn data_dir(&self, override_dir: Option<&Path>) -> PathBuf {
        override_dir
            .map(Path::to_path_buf)
            .or_else(|| self.data_dir.clone())
            .unwrap_or_else(|| PathBuf::from("."))
    }

    pub fn csv_path(&self, override_dir: Option<&Path>) -> PathBuf {
        self.data_dir(override_dir).join(&self.csv_file)
    }

    pub fn json_path(&self, override_dir: Option<&Path>) -> PathBuf {
        self.data_dir(override_dir).join(&self.json_file)
    }

    pub fn set_data_dir(&mut self, dir: PathBuf) -> Result<()> {
        self.data_dir = Some(dir);
        self.save()
    }

    fn check(&self) -> Result<()> {
        if self.max_entries == 0 {
            return Err(SurveyError::Config("max_entries は1以上にしてください".into()));
        }
        if self.csv_file.trim().is_empty() || self.json_file.trim().is_empty() {
            return Err(SurveyError::Config("ファイル名が空です".into()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_load_missing_file_uses_defaults() {
        let dir = tempdir().unwrap();
        let config = Config::load_from(&dir.path().join("none.json")).unwrap();
        assert_eq!(config.csv_file, "data.csv");
        assert_eq!(config.json_file, "data.json");
        assert_eq!(config.max_entries, 7);
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("config.json");
        let config = Config {
            data_dir: Some(PathBuf::from("/srv/lab02")),
            ..Default::default()
        };
        config.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded.data_dir, Some(PathBuf::from("/srv/lab02")));
        assert_eq!(loaded.csv_path(None), PathBuf::from("/srv/lab02/data.csv"));
    }

    #[test]
    fn test_partial_config_fills_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{"json_file": "averages.json"}"#).unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.json_file, "averages.json");
        assert_eq!(config.csv_file, "data.csv");
    }

    #[test]
    fn test_zero_entries_is_rejected() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{"max_entries": 0}"#).unwrap();

        let err = Config::load_from(&path).unwrap_err();
        assert!(matches!(err, SurveyError::Config(_)));
    }

    #[test]
    fn test_override_dir_wins() {
        let config = Config {
            data_dir: Some(PathBuf::from("/configured")),
            ..Default::default()
        };
        let path = config.json_path(Some(Path::new("/override")));
        assert_eq!(path, PathBuf::from("/override/data.json"));
    }
}
