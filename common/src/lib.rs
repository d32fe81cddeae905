//! X-ray Eval Common Library
//!
//! AI所見と正解ラベルを比較して検出精度を算出するコア。
//! CSV読み込みや出力はCLI側が担当し、ここはファイルI/Oを持たない。

pub mod types;
pub mod error;
pub mod category;
pub mod parser;
pub mod classifier;
pub mod metrics;

pub use types::{CategoryCounts, CategoryMetrics, Finding, MetricsResult, OutcomeCounts};
pub use error::{Error, Result};
pub use category::{CategoryMap, CategoryResolver};
pub use parser::parse_findings;
pub use classifier::{classify_row, Aggregator};
pub use metrics::derive_metrics;
