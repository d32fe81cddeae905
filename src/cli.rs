use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "xray-eval")]
#[command(about = "胸部X線AI所見の検出精度評価ツール", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// 詳細ログを出力（行ごとの TP/FP/FN を表示）
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// データセット（CSV/Excel）を評価して指標を出力
    Evaluate {
        /// 入力ファイル（.csv / .xlsx）
        #[arg(required = true)]
        input: PathBuf,

        /// AI所見の列名（省略時は設定値）
        #[arg(long)]
        ai_column: Option<String>,

        /// 正解ラベルの列名（省略時は設定値）
        #[arg(long)]
        ground_truth_column: Option<String>,

        /// 処理する最大行数
        #[arg(short = 'n', long)]
        max_rows: Option<usize>,

        /// 出力ファイル/ディレクトリ（省略時はコンソール表示のみ）
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// 出力形式 (json/excel/both)
        #[arg(short, long, default_value = "json")]
        format: ExportFormat,
    },

    /// 組み込みカテゴリマップを表示
    Categories,

    /// ラベルがどのカテゴリに集約されるかを表示
    Resolve {
        /// 所見ラベル
        #[arg(required = true)]
        labels: Vec<String>,
    },

    /// 設定を表示/編集
    Config {
        /// 設定を表示
        #[arg(long)]
        show: bool,

        /// AI所見の列名を設定
        #[arg(long)]
        ai_column: Option<String>,

        /// 正解ラベルの列名を設定
        #[arg(long)]
        ground_truth_column: Option<String>,

        /// 最大行数を設定
        #[arg(long)]
        max_rows: Option<usize>,

        /// 最大行数の設定を解除（全行処理）
        #[arg(long, conflicts_with = "max_rows")]
        clear_max_rows: bool,
    },
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum ExportFormat {
    #[default]
    Json,
    Excel,
    Both,
}

impl std::str::FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "json" => Ok(ExportFormat::Json),
            "excel" | "xlsx" => Ok(ExportFormat::Excel),
            "both" => Ok(ExportFormat::Both),
            _ => Err(format!("Unknown format: {}. Use json, excel, or both", s)),
        }
    }
}

impl std::fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExportFormat::Json => write!(f, "json"),
            ExportFormat::Excel => write!(f, "excel"),
            ExportFormat::Both => write!(f, "both"),
        }
    }
}
