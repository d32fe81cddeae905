//! Excel出力
//!
//! "Metrics" シート: カテゴリ別 TP/FP/FN と指標
//! "Skipped" シート: デコードできずにスキップした行

use crate::error::Result;
use crate::evaluator::EvaluationReport;
use rust_xlsxwriter::*;
use std::path::Path;

const METRICS_HEADERS: &[&str] = &["Category", "TP", "FP", "FN", "Recall", "Precision", "F1"];

pub fn generate_excel(report: &EvaluationReport, output_path: &Path) -> Result<()> {
    let buffer = generate_excel_buffer(report)?;
    std::fs::write(output_path, buffer)?;
    Ok(())
}

/// Excelをバッファに生成
pub fn generate_excel_buffer(report: &EvaluationReport) -> Result<Vec<u8>> {
    let mut workbook = Workbook::new();

    let header_format = Format::new()
        .set_bold()
        .set_background_color(Color::RGB(0xF5F5F5))
        .set_align(FormatAlign::Center)
        .set_border(FormatBorder::Thin)
        .set_border_color(Color::RGB(0xAAAAAA));
    let ratio_format = Format::new().set_num_format("0.0000");
    let total_format = Format::new().set_bold().set_num_format("0.0000");

    {
        let worksheet = workbook.add_worksheet();
        worksheet.set_name("Metrics")?;
        worksheet.set_column_width(0, 34)?;

        for (col, header) in METRICS_HEADERS.iter().enumerate() {
            worksheet.write_string_with_format(0, col as u16, *header, &header_format)?;
        }

        let mut row: u32 = 1;
        for (category, metrics) in &report.metrics {
            worksheet.write_string(row, 0, category.as_str())?;
            worksheet.write_number(row, 1, report.totals.true_positive(category) as f64)?;
            worksheet.write_number(row, 2, report.totals.false_positive(category) as f64)?;
            worksheet.write_number(row, 3, report.totals.false_negative(category) as f64)?;
            worksheet.write_number_with_format(row, 4, metrics.recall, &ratio_format)?;
            worksheet.write_number_with_format(row, 5, metrics.precision, &ratio_format)?;
            worksheet.write_number_with_format(row, 6, metrics.f1_score, &ratio_format)?;
            row += 1;
        }

        let micro = &report.micro_average;
        worksheet.write_string_with_format(row, 0, "(micro)", &total_format)?;
        worksheet.write_number_with_format(row, 4, micro.recall, &total_format)?;
        worksheet.write_number_with_format(row, 5, micro.precision, &total_format)?;
        worksheet.write_number_with_format(row, 6, micro.f1_score, &total_format)?;

        row += 2;
        worksheet.write_string(row, 0, "Rows read")?;
        worksheet.write_number(row, 1, report.rows_read as f64)?;
        worksheet.write_string(row + 1, 0, "Rows evaluated")?;
        worksheet.write_number(row + 1, 1, report.rows_evaluated as f64)?;
        worksheet.write_string(row + 2, 0, "Rows skipped")?;
        worksheet.write_number(row + 2, 1, report.skipped.len() as f64)?;
    }

    {
        let worksheet = workbook.add_worksheet();
        worksheet.set_name("Skipped")?;
        worksheet.set_column_width(1, 80)?;
        worksheet.write_string_with_format(0, 0, "Row", &header_format)?;
        worksheet.write_string_with_format(0, 1, "Reason", &header_format)?;

        for (i, skipped) in report.skipped.iter().enumerate() {
            let row = i as u32 + 1;
            worksheet.write_number(row, 0, skipped.row as f64)?;
            worksheet.write_string(row, 1, skipped.reason.as_str())?;
        }
    }

    Ok(workbook.save_to_buffer()?)
}
