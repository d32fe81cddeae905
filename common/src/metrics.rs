//! 評価指標の算出

use crate::types::{CategoryMetrics, MetricsResult, OutcomeCounts};

/// 累計 TP/FP/FN からカテゴリ別の recall/precision/F1 を算出
///
/// 対象は3つのマップのいずれかに現れるカテゴリすべて。
/// 入力が同じなら結果も同じ（累計は変更しない）。
pub fn derive_metrics(totals: &OutcomeCounts) -> MetricsResult {
    totals
        .categories()
        .into_iter()
        .map(|category| {
            let metrics = CategoryMetrics::from_counts(
                totals.true_positive(category),
                totals.false_positive(category),
                totals.false_negative(category),
            );
            (category.to_string(), metrics)
        })
        .collect()
}
