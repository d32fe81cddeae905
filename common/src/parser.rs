//! 所見セルパーサー
//!
//! データセットの1セル（JSON文字列）を Finding の配列へ変換する。

use crate::error::Result;
use crate::types::Finding;
use serde_json::Value;

/// 所見なしを表すマーカー
const EMPTY_MARKER: &str = "[]";

/// セル文字列を所見リストへパース
///
/// 判定順:
/// 1. 前後の空白を除去して空文字 or `[]` → 所見なし
/// 2. 偽とみなす JSON 値（`null` / `{}` / `""` / `false` / `0`）→ 所見なし
/// 3. `pathology` を持つオブジェクトの配列 → 所見リスト
/// 4. それ以外 → `Error::Json`
///
/// # Examples
/// ```
/// use xray_eval_common::parse_findings;
///
/// let findings = parse_findings(r#"[{"pathology": "Nodule"}]"#).unwrap();
/// assert_eq!(findings[0].pathology, "Nodule");
/// assert!(parse_findings("  ").unwrap().is_empty());
/// ```
pub fn parse_findings(cell: &str) -> Result<Vec<Finding>> {
    let text = cell.trim();
    if text.is_empty() || text == EMPTY_MARKER {
        return Ok(Vec::new());
    }

    let value: Value = serde_json::from_str(text)?;
    if is_empty_value(&value) {
        return Ok(Vec::new());
    }

    Ok(serde_json::from_value(value)?)
}

fn is_empty_value(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::Object(map) => map.is_empty(),
    }
}
