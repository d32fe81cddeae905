use super::Table;
use crate::error::{EvalError, Result};
use std::path::Path;

/// CSVを読み込み
///
/// 列数が揃っていない行も受け付ける（不足分は評価側でスキップ扱い）。
/// UTF-8として不正なバイトは置換文字に変換し、行は読み捨てない。
pub fn read_table(path: &Path, max_rows: Option<usize>) -> Result<Table> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_path(path)?;

    let headers: Vec<String> = decode_record(reader.byte_headers()?).0;
    if headers.is_empty() {
        return Err(EvalError::EmptyDataset(path.display().to_string()));
    }

    let mut rows = Vec::new();
    for record in reader.byte_records() {
        if max_rows.is_some_and(|limit| rows.len() >= limit) {
            break;
        }
        let (fields, lossy) = decode_record(&record?);
        if lossy {
            tracing::warn!(row = rows.len(), "UTF-8として不正なバイトを置換しました");
        }
        rows.push(fields);
    }

    Ok(Table { headers, rows })
}

/// フィールドを文字列化（不正なバイトを含んでいたかも返す）
fn decode_record(record: &csv::ByteRecord) -> (Vec<String>, bool) {
    let mut lossy = false;
    let fields = record
        .iter()
        .map(|field| match std::str::from_utf8(field) {
            Ok(s) => s.to_string(),
            Err(_) => {
                lossy = true;
                String::from_utf8_lossy(field).into_owned()
            }
        })
        .collect();
    (fields, lossy)
}
