//! エラー型定義

use thiserror::Error;

/// 共通エラー型
#[derive(Error, Debug)]
pub enum Error {
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Duplicate label '{label}': listed under both '{first}' and '{second}'")]
    DuplicateLabel {
        label: String,
        first: String,
        second: String,
    },
}

/// Result型エイリアス
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_json() {
        let json_error = serde_json::from_str::<serde_json::Value>("[{").unwrap_err();
        let error = Error::Json(json_error);
        assert!(format!("{}", error).starts_with("JSON error: "));
    }

    #[test]
    fn test_error_display_duplicate_label() {
        let error = Error::DuplicateLabel {
            label: "Interstitial Lung Opacity".to_string(),
            first: "Lung Opacity".to_string(),
            second: "Interstitial Disease".to_string(),
        };
        assert_eq!(
            format!("{}", error),
            "Duplicate label 'Interstitial Lung Opacity': listed under both 'Lung Opacity' and 'Interstitial Disease'"
        );
    }

    #[test]
    fn test_error_from_json() {
        let json_error = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let error: Error = json_error.into();
        assert!(matches!(error, Error::Json(_)));
    }
}
