//! データセット読み込みモジュール
//!
//! CSV / Excel を読み込み、ヘッダー名からAI所見列と正解列を特定する。
//! セルの中身（JSON）は解釈せず、文字列のまま評価側へ渡す。

mod csv_reader;
mod spreadsheet;

use crate::error::{EvalError, Result};
use std::path::Path;

const SPREADSHEET_EXTENSIONS: &[&str] = &["xlsx", "xlsm", "xls", "xlsb", "ods"];

/// 読み込んだ表
#[derive(Debug, Clone, Default)]
pub struct Table {
    pub headers: Vec<String>,
    /// データ行（ヘッダーを除く、入力順）
    pub rows: Vec<Vec<String>>,
}

impl Table {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// 評価に使う2列の位置
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FindingColumns {
    pub ai: usize,
    pub ground_truth: usize,
}

impl FindingColumns {
    /// ヘッダー名（前後空白は無視、大文字小文字は区別）で列を特定
    pub fn locate(headers: &[String], ai_column: &str, ground_truth_column: &str) -> Result<Self> {
        Ok(Self {
            ai: find_column(headers, ai_column)?,
            ground_truth: find_column(headers, ground_truth_column)?,
        })
    }
}

fn find_column(headers: &[String], name: &str) -> Result<usize> {
    headers
        .iter()
        .position(|h| h.trim() == name.trim())
        .ok_or_else(|| EvalError::MissingColumn {
            column: name.to_string(),
            available: headers.to_vec(),
        })
}

/// 拡張子でCSV/Excelを判定して読み込み
///
/// `max_rows` を指定した場合はデータ行をその件数で打ち切る。
pub fn load_table(path: &Path, max_rows: Option<usize>) -> Result<Table> {
    if !path.exists() {
        return Err(EvalError::FileNotFound(path.display().to_string()));
    }

    let mut table = if is_spreadsheet(path) {
        spreadsheet::read_table(path)?
    } else {
        csv_reader::read_table(path, max_rows)?
    };

    if let Some(limit) = max_rows {
        table.rows.truncate(limit);
    }

    Ok(table)
}

fn is_spreadsheet(path: &Path) -> bool {
    path.extension()
        .map(|ext| {
            let ext = ext.to_string_lossy().to_lowercase();
            SPREADSHEET_EXTENSIONS.contains(&ext.as_str())
        })
        .unwrap_or(false)
}
