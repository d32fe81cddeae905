//! 評価の型定義
//!
//! - Finding: 1件の所見（AI出力・正解ラベル共通）
//! - OutcomeCounts: カテゴリ別 TP/FP/FN（1行分・累計の両方に使う）
//! - CategoryMetrics: カテゴリ別 recall/precision/F1

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// カテゴリ → 件数
pub type CategoryCounts = BTreeMap<String, u64>;

/// カテゴリ → 指標
pub type MetricsResult = BTreeMap<String, CategoryMetrics>;

/// 所見レコード
///
/// 参照するのは `pathology` のみ。座標や確信度など他のフィールドは読み捨てる。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Finding {
    pub pathology: String,
}

impl Finding {
    pub fn new(pathology: impl Into<String>) -> Self {
        Self {
            pathology: pathology.into(),
        }
    }
}

/// カテゴリ別の TP/FP/FN
///
/// 値が0のキーは挿入しない。
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutcomeCounts {
    pub true_positives: CategoryCounts,
    pub false_positives: CategoryCounts,
    pub false_negatives: CategoryCounts,
}

impl OutcomeCounts {
    /// TP/FP/FN いずれも空か
    pub fn is_empty(&self) -> bool {
        self.true_positives.is_empty()
            && self.false_positives.is_empty()
            && self.false_negatives.is_empty()
    }

    pub fn true_positive(&self, category: &str) -> u64 {
        self.true_positives.get(category).copied().unwrap_or(0)
    }

    pub fn false_positive(&self, category: &str) -> u64 {
        self.false_positives.get(category).copied().unwrap_or(0)
    }

    pub fn false_negative(&self, category: &str) -> u64 {
        self.false_negatives.get(category).copied().unwrap_or(0)
    }

    /// 3つのマップに現れる全カテゴリ（ソート済み・重複なし）
    pub fn categories(&self) -> Vec<&str> {
        let mut categories: Vec<&str> = self
            .true_positives
            .keys()
            .chain(self.false_positives.keys())
            .chain(self.false_negatives.keys())
            .map(|s| s.as_str())
            .collect();
        categories.sort_unstable();
        categories.dedup();
        categories
    }

    /// 別の件数を加算（存在しないカテゴリは0から開始）
    pub fn merge(&mut self, other: &OutcomeCounts) {
        add_counts(&mut self.true_positives, &other.true_positives);
        add_counts(&mut self.false_positives, &other.false_positives);
        add_counts(&mut self.false_negatives, &other.false_negatives);
    }

    /// 全カテゴリを合算したマイクロ平均
    pub fn micro_average(&self) -> CategoryMetrics {
        let tp = self.true_positives.values().sum();
        let fp = self.false_positives.values().sum();
        let fn_ = self.false_negatives.values().sum();
        CategoryMetrics::from_counts(tp, fp, fn_)
    }
}

fn add_counts(total: &mut CategoryCounts, row: &CategoryCounts) {
    for (category, count) in row {
        *total.entry(category.clone()).or_insert(0) += count;
    }
}

/// カテゴリ別の評価指標
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct CategoryMetrics {
    pub recall: f64,
    pub precision: f64,
    pub f1_score: f64,
}

impl CategoryMetrics {
    /// TP/FP/FN から算出。分母0の指標は0とする。
    pub fn from_counts(tp: u64, fp: u64, fn_: u64) -> Self {
        let recall = ratio(tp, tp + fn_);
        let precision = ratio(tp, tp + fp);
        let f1_score = if precision + recall > 0.0 {
            2.0 * precision * recall / (precision + recall)
        } else {
            0.0
        };

        Self {
            recall,
            precision,
            f1_score,
        }
    }
}

fn ratio(numerator: u64, denominator: u64) -> f64 {
    if denominator > 0 {
        numerator as f64 / denominator as f64
    } else {
        0.0
    }
}
