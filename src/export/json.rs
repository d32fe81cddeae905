//! JSON出力

use crate::error::Result;
use crate::evaluator::EvaluationReport;
use serde::Serialize;
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

#[derive(Serialize)]
struct ExportedReport<'a> {
    generated_at: String,
    input: String,
    #[serde(flatten)]
    report: &'a EvaluationReport,
}

pub fn write_json(report: &EvaluationReport, input: &Path, output_path: &Path) -> Result<()> {
    let exported = ExportedReport {
        generated_at: chrono::Utc::now().to_rfc3339(),
        input: input.display().to_string(),
        report,
    };

    let writer = BufWriter::new(File::create(output_path)?);
    serde_json::to_writer_pretty(writer, &exported)?;
    Ok(())
}
