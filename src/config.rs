use crate::error::{EvalError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// 評価対象データセットのAI所見列（元データのヘッダーは空白2つ）
pub const DEFAULT_AI_COLUMN: &str = "AI 2  findings";
/// 評価対象データセットの正解列
pub const DEFAULT_GROUND_TRUTH_COLUMN: &str = "Ground truth";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub ai_column: String,
    pub ground_truth_column: String,
    /// 処理する最大行数（None は全行）
    pub max_rows: Option<usize>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            ai_column: DEFAULT_AI_COLUMN.into(),
            ground_truth_column: DEFAULT_GROUND_TRUTH_COLUMN.into(),
            max_rows: None,
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    pub fn load_from(config_path: &Path) -> Result<Self> {
        if config_path.exists() {
            let content = std::fs::read_to_string(config_path)?;
            let config: Config = serde_json::from_str(&content)?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    /// 読み込めない設定ファイルは警告して既定値を使う
    pub fn load_or_default() -> Result<Self> {
        Ok(Self::load_from_or_default(&Self::config_path()?))
    }

    pub fn load_from_or_default(config_path: &Path) -> Self {
        Self::load_from(config_path).unwrap_or_else(|e| {
            tracing::warn!(path = %config_path.display(), error = %e, "設定ファイルを読み込めないため既定値を使用");
            Self::default()
        })
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
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
            .ok_or_else(|| EvalError::Config("ホームディレクトリが見つかりません".into()))?;
        Ok(home.join(".config").join("xray-eval").join("config.json"))
    }

    /// CLI引数で上書き（指定されたものだけ）
    pub fn with_overrides(
        mut self,
        ai_column: Option<String>,
        ground_truth_column: Option<String>,
        max_rows: Option<usize>,
    ) -> Self {
        if let Some(column) = ai_column {
            self.ai_column = column;
        }
        if let Some(column) = ground_truth_column {
            self.ground_truth_column = column;
        }
        if max_rows.is_some() {
            self.max_rows = max_rows;
        }
        self
    }
}
