use thiserror::Error;

#[derive(Error, Debug)]
pub enum EvalError {
    #[error("設定エラー: {0}")]
    Config(String),

    #[error("ファイルが見つかりません: {0}")]
    FileNotFound(String),

    #[error("列が見つかりません: '{column}' (ヘッダー: {available:?})")]
    MissingColumn {
        column: String,
        available: Vec<String>,
    },

    #[error("データセットにヘッダー行がありません: {0}")]
    EmptyDataset(String),

    #[error("CSV読み込みエラー: {0}")]
    Csv(#[from] csv::Error),

    #[error("スプレッドシート読み込みエラー: {0}")]
    Spreadsheet(#[from] calamine::Error),

    #[error("Excel生成エラー: {0}")]
    ExcelGeneration(String),

    #[error("JSON解析エラー: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("IOエラー: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Common(#[from] xray_eval_common::Error),
}

impl From<rust_xlsxwriter::XlsxError> for EvalError {
    fn from(e: rust_xlsxwriter::XlsxError) -> Self {
        EvalError::ExcelGeneration(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, EvalError>;
