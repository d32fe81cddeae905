//! コンソール出力

use crate::evaluator::EvaluationReport;
use xray_eval_common::{CategoryCounts, CategoryMap, CategoryMetrics};

/// 評価結果を表形式の文字列に整形
pub fn format_report(report: &EvaluationReport) -> String {
    let mut lines = vec![
        format!(
            "行数: {} (評価 {} / スキップ {})",
            report.rows_read,
            report.rows_evaluated,
            report.skipped.len()
        ),
        String::new(),
        format!("True Positives (TP):  {}", format_counts(&report.totals.true_positives)),
        format!("False Positives (FP): {}", format_counts(&report.totals.false_positives)),
        format!("False Negatives (FN): {}", format_counts(&report.totals.false_negatives)),
        String::new(),
    ];

    let width = report
        .metrics
        .keys()
        .map(|k| k.chars().count())
        .max()
        .unwrap_or(0)
        .max("Category".len());

    lines.push(format!(
        "{:<width$}  {:>5} {:>5} {:>5}  {:>9} {:>9} {:>9}",
        "Category", "TP", "FP", "FN", "Recall", "Precision", "F1",
        width = width
    ));
    for (category, metrics) in &report.metrics {
        lines.push(format!(
            "{:<width$}  {:>5} {:>5} {:>5}  {}",
            category,
            report.totals.true_positive(category),
            report.totals.false_positive(category),
            report.totals.false_negative(category),
            format_metrics(metrics),
            width = width
        ));
    }
    lines.push(format!(
        "{:<width$}  {:>5} {:>5} {:>5}  {}",
        "(micro)",
        "",
        "",
        "",
        format_metrics(&report.micro_average),
        width = width
    ));

    let mut out = lines.join("\n");
    out.push('\n');
    out
}

pub fn print_report(report: &EvaluationReport) {
    print!("{}", format_report(report));
}

fn format_counts(counts: &CategoryCounts) -> String {
    if counts.is_empty() {
        return "{}".to_string();
    }
    let body: Vec<String> = counts.iter().map(|(k, v)| format!("{}: {}", k, v)).collect();
    format!("{{{}}}", body.join(", "))
}

fn format_metrics(metrics: &CategoryMetrics) -> String {
    format!(
        "{:>9.4} {:>9.4} {:>9.4}",
        metrics.recall, metrics.precision, metrics.f1_score
    )
}

/// カテゴリマップを一覧表示用に整形
pub fn format_category_map(map: &CategoryMap) -> String {
    let mut out = String::new();
    for (category, labels) in map.iter() {
        out.push_str(&format!("{} ({}件)\n", category, labels.len()));
        for label in labels {
            out.push_str(&format!("  - {}\n", label));
        }
    }
    out
}
