use super::Table;
use crate::error::{EvalError, Result};
use calamine::{open_workbook_auto, Data, Reader};
use std::path::Path;

/// Excel/ODSの先頭シートを読み込み（1行目をヘッダーとする）
pub fn read_table(path: &Path) -> Result<Table> {
    let mut workbook = open_workbook_auto(path)?;
    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| EvalError::EmptyDataset(path.display().to_string()))??;

    let mut rows = range.rows();
    let headers: Vec<String> = match rows.next() {
        Some(header_row) => header_row.iter().map(cell_to_string).collect(),
        None => return Err(EvalError::EmptyDataset(path.display().to_string())),
    };

    let rows = rows
        .map(|row| row.iter().map(cell_to_string).collect())
        .collect();

    Ok(Table { headers, rows })
}

fn cell_to_string(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(s) => s.clone(),
        other => other.to_string(),
    }
}
