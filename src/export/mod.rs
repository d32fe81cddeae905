pub mod excel;
pub mod json;

use crate::cli::ExportFormat;
use crate::error::Result;
use crate::evaluator::EvaluationReport;
use std::path::{Path, PathBuf};

const DEFAULT_STEM: &str = "evaluation";

fn output_path_for_format(output: &Path, extension: &str) -> PathBuf {
    if output.is_dir() || output.extension().is_none() {
        output.join(format!("{}.{}", DEFAULT_STEM, extension))
    } else {
        output.to_path_buf()
    }
}

fn output_paths_for_both(output: &Path) -> (PathBuf, PathBuf) {
    if output.is_dir() || output.extension().is_none() {
        let json_path = output.join(format!("{}.json", DEFAULT_STEM));
        let excel_path = output.join(format!("{}.xlsx", DEFAULT_STEM));
        (json_path, excel_path)
    } else {
        let parent = output.parent().unwrap_or_else(|| Path::new("."));
        let stem = output
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or(DEFAULT_STEM);
        let json_path = parent.join(format!("{}.json", stem));
        let excel_path = parent.join(format!("{}.xlsx", stem));
        (json_path, excel_path)
    }
}

/// 評価結果をファイルへ出力し、書き出したパスを返す
pub fn export_report(
    report: &EvaluationReport,
    input: &Path,
    format: &ExportFormat,
    output: &Path,
) -> Result<Vec<PathBuf>> {
    if output.extension().is_none() {
        std::fs::create_dir_all(output)?;
    } else if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }

    let written = match format {
        ExportFormat::Json => {
            let path = output_path_for_format(output, "json");
            json::write_json(report, input, &path)?;
            vec![path]
        }
        ExportFormat::Excel => {
            let path = output_path_for_format(output, "xlsx");
            excel::generate_excel(report, &path)?;
            vec![path]
        }
        ExportFormat::Both => {
            let (json_path, excel_path) = output_paths_for_both(output);
            json::write_json(report, input, &json_path)?;
            excel::generate_excel(report, &excel_path)?;
            vec![json_path, excel_path]
        }
    };

    for path in &written {
        tracing::info!(path = %path.display(), "出力しました");
    }

    Ok(written)
}
