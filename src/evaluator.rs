//! 評価ループ
//!
//! 表の各行について所見セルをデコードし、分類・集計する。
//! デコードできない行はスキップして記録し、処理は継続する。

use crate::dataset::{FindingColumns, Table};
use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;
use xray_eval_common::{
    parse_findings, Aggregator, CategoryMetrics, CategoryResolver, Finding, MetricsResult,
    OutcomeCounts,
};

/// スキップした行
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedRow {
    /// データ行の番号（0始まり、ヘッダー除く）
    pub row: usize,
    pub reason: String,
}

/// 評価結果
#[derive(Debug, Clone, Serialize)]
pub struct EvaluationReport {
    /// 読み込んだ行数（スキップ含む）
    pub rows_read: usize,
    /// 分類・集計した行数
    pub rows_evaluated: usize,
    pub skipped: Vec<SkippedRow>,
    pub totals: OutcomeCounts,
    pub metrics: MetricsResult,
    pub micro_average: CategoryMetrics,
}

/// 評価オプション
#[derive(Debug, Clone, Copy, Default)]
pub struct EvaluateOptions {
    /// 進捗バーを表示
    pub show_progress: bool,
}

/// 表全体を評価
pub fn evaluate_table(
    table: &Table,
    columns: &FindingColumns,
    resolver: &CategoryResolver,
    options: EvaluateOptions,
) -> EvaluationReport {
    let progress = if options.show_progress {
        let pb = ProgressBar::new(table.len() as u64);
        pb.set_style(
            ProgressStyle::with_template("  {bar:30} {pos}/{len} 行")
                .unwrap_or_else(|_| ProgressStyle::default_bar()),
        );
        pb
    } else {
        ProgressBar::hidden()
    };

    let mut aggregator = Aggregator::new();
    let mut skipped = Vec::new();

    for (index, row) in table.rows.iter().enumerate() {
        progress.inc(1);

        let (ai_findings, ground_truth) = match decode_row(row, columns) {
            Ok(decoded) => decoded,
            Err(reason) => {
                tracing::warn!(row = index, %reason, "行をスキップ");
                tracing::debug!(row = index, cells = ?row, "スキップした行の内容");
                skipped.push(SkippedRow { row: index, reason });
                continue;
            }
        };

        let outcome = aggregator.classify_and_add(
            Some(ai_findings.as_slice()),
            Some(ground_truth.as_slice()),
            resolver,
        );

        tracing::debug!(
            row = index,
            tp = ?outcome.true_positives,
            fp = ?outcome.false_positives,
            fn_ = ?outcome.false_negatives,
            "Row {}",
            index
        );
    }

    progress.finish_and_clear();

    let metrics = aggregator.finalize();
    let micro_average = aggregator.micro_average();
    let rows_evaluated = aggregator.rows();

    EvaluationReport {
        rows_read: table.len(),
        rows_evaluated,
        skipped,
        totals: aggregator.into_totals(),
        metrics,
        micro_average,
    }
}

/// 1行から AI所見・正解所見を取り出す
fn decode_row(
    row: &[String],
    columns: &FindingColumns,
) -> std::result::Result<(Vec<Finding>, Vec<Finding>), String> {
    let ai_cell = cell(row, columns.ai, "AI所見")?;
    let ground_truth_cell = cell(row, columns.ground_truth, "正解")?;

    let ai_findings = parse_findings(ai_cell).map_err(|e| format!("AI所見: {}", e))?;
    let ground_truth = parse_findings(ground_truth_cell).map_err(|e| format!("正解: {}", e))?;

    Ok((ai_findings, ground_truth))
}

fn cell<'a>(row: &'a [String], index: usize, label: &str) -> std::result::Result<&'a str, String> {
    row.get(index)
        .map(|s| s.as_str())
        .ok_or_else(|| format!("{}列がありません（列数: {}）", label, row.len()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(rows: &[(&str, &str)]) -> Table {
        Table {
            headers: vec!["AI 2  findings".into(), "Ground truth".into()],
            rows: rows
                .iter()
                .map(|(ai, gt)| vec![ai.to_string(), gt.to_string()])
                .collect(),
        }
    }

    const COLUMNS: FindingColumns = FindingColumns { ai: 0, ground_truth: 1 };

    #[test]
    fn test_evaluate_counts_and_metrics() {
        let resolver = CategoryResolver::chest_xray().unwrap();
        let table = table(&[
            (r#"[{"pathology": "Rib Fracture"}]"#, r#"[{"pathology": "Clavicle Fracture"}]"#),
            (r#"[{"pathology": "Nodule"}]"#, "[]"),
            ("", r#"[{"pathology": "Edema"}]"#),
            ("[]", ""),
        ]);

        let report = evaluate_table(&table, &COLUMNS, &resolver, EvaluateOptions::default());

        assert_eq!(report.rows_read, 4);
        assert_eq!(report.rows_evaluated, 4);
        assert!(report.skipped.is_empty());
        assert_eq!(report.totals.true_positive("Fracture"), 1);
        assert_eq!(report.totals.false_positive("Lung Lesion"), 1);
        assert_eq!(report.totals.false_negative("Edema"), 1);
        assert_eq!(report.metrics.len(), 3);
        assert_eq!(report.metrics["Fracture"].f1_score, 1.0);
    }

    #[test]
    fn test_malformed_row_is_skipped() {
        let resolver = CategoryResolver::chest_xray().unwrap();
        let table = table(&[
            (r#"[{"pathology": "Edema"}"#, "[]"),
            (r#"[{"pathology": "Edema"}]"#, r#"[{"pathology": "Edema"}]"#),
        ]);

        let report = evaluate_table(&table, &COLUMNS, &resolver, EvaluateOptions::default());

        assert_eq!(report.rows_read, 2);
        assert_eq!(report.rows_evaluated, 1);
        assert_eq!(report.skipped.len(), 1);
        assert_eq!(report.skipped[0].row, 0);
        assert!(report.skipped[0].reason.starts_with("AI所見"));
        assert_eq!(report.totals.true_positive("Edema"), 1);
        assert!(report.totals.false_positives.is_empty());
    }

    #[test]
    fn test_short_row_is_skipped() {
        let resolver = CategoryResolver::chest_xray().unwrap();
        let mut table = table(&[]);
        table.rows.push(vec![r#"[{"pathology": "Edema"}]"#.to_string()]);

        let report = evaluate_table(&table, &COLUMNS, &resolver, EvaluateOptions::default());

        assert_eq!(report.rows_evaluated, 0);
        assert_eq!(report.skipped.len(), 1);
        assert!(report.skipped[0].reason.contains("正解列がありません"));
        assert!(report.totals.is_empty());
    }
}
