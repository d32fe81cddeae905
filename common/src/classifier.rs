//! 行分類・集計モジュール
//!
//! 1行分の AI所見と正解所見をカテゴリ単位で突き合わせて TP/FP/FN を判定し、
//! Aggregator で全行の累計を持つ。

use crate::category::CategoryResolver;
use crate::metrics::derive_metrics;
use crate::types::{CategoryCounts, CategoryMetrics, Finding, MetricsResult, OutcomeCounts};
use std::collections::HashSet;

/// 所見リストをカテゴリ集合へ変換
///
/// pathology の重複、および複数ラベルが同じカテゴリに集約される重複はここで潰れる。
fn resolve_categories<'a>(
    findings: Option<&'a [Finding]>,
    resolver: &'a CategoryResolver,
) -> HashSet<&'a str> {
    let labels: HashSet<&str> = findings
        .unwrap_or_default()
        .iter()
        .map(|f| f.pathology.as_str())
        .collect();

    labels.into_iter().map(|label| resolver.resolve(label)).collect()
}

fn mark(counts: &mut CategoryCounts, category: &str) {
    counts.insert(category.to_string(), 1);
}

/// 1行分の TP/FP/FN を判定
///
/// 判定ルール（上から順に排他）:
/// - 正解が空 → AIカテゴリはすべて FP
/// - AIが空 → 正解カテゴリはすべて FN
/// - 両方あり → AI∩正解 は TP、AIのみ FP、正解のみ FN
///
/// 両方空の行は何も計上しない。各カテゴリの件数は1行あたり最大1。
pub fn classify_row(
    ai_findings: Option<&[Finding]>,
    ground_truth: Option<&[Finding]>,
    resolver: &CategoryResolver,
) -> OutcomeCounts {
    let mapped_ai = resolve_categories(ai_findings, resolver);
    let mapped_ground_truth = resolve_categories(ground_truth, resolver);

    let mut outcome = OutcomeCounts::default();

    if mapped_ground_truth.is_empty() {
        for category in &mapped_ai {
            mark(&mut outcome.false_positives, category);
        }
    } else if mapped_ai.is_empty() {
        for category in &mapped_ground_truth {
            mark(&mut outcome.false_negatives, category);
        }
    } else {
        for category in &mapped_ai {
            if mapped_ground_truth.contains(category) {
                mark(&mut outcome.true_positives, category);
            } else {
                mark(&mut outcome.false_positives, category);
            }
        }
        for category in &mapped_ground_truth {
            if !mapped_ai.contains(category) {
                mark(&mut outcome.false_negatives, category);
            }
        }
    }

    outcome
}

/// 全行の累計
#[derive(Debug, Clone, Default)]
pub struct Aggregator {
    totals: OutcomeCounts,
    rows: usize,
}

impl Aggregator {
    pub fn new() -> Self {
        Self::default()
    }

    /// 1行分を累計へ加算
    pub fn add(&mut self, row: &OutcomeCounts) {
        self.totals.merge(row);
        self.rows += 1;
    }

    /// 分類して加算し、その行の結果を返す
    pub fn classify_and_add(
        &mut self,
        ai_findings: Option<&[Finding]>,
        ground_truth: Option<&[Finding]>,
        resolver: &CategoryResolver,
    ) -> OutcomeCounts {
        let outcome = classify_row(ai_findings, ground_truth, resolver);
        self.add(&outcome);
        outcome
    }

    pub fn totals(&self) -> &OutcomeCounts {
        &self.totals
    }

    /// 加算した行数
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// 現在の累計からカテゴリ別指標を算出
    pub fn finalize(&self) -> MetricsResult {
        derive_metrics(&self.totals)
    }

    pub fn micro_average(&self) -> CategoryMetrics {
        self.totals.micro_average()
    }

    pub fn into_totals(self) -> OutcomeCounts {
        self.totals
    }
}
