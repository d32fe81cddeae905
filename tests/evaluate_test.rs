//! データセット評価の統合テスト
//!
//! CSV/Excelファイルを書き出し、読み込み→分類→集計まで通して検証

use std::path::Path;
use tempfile::tempdir;
use xray_eval::dataset::{self, FindingColumns};
use xray_eval::error::EvalError;
use xray_eval::evaluator::{evaluate_table, EvaluateOptions, EvaluationReport};
use xray_eval_common::CategoryResolver;

const AI_COLUMN: &str = "AI 2  findings";
const GT_COLUMN: &str = "Ground truth";

/// CSVフィールドのエスケープ（"を二重化して囲む）
fn quote(field: &str) -> String {
    format!("\"{}\"", field.replace('"', "\"\""))
}

fn write_csv(path: &Path, rows: &[(&str, &str)]) {
    let mut content = format!("Study ID,{},{}\n", AI_COLUMN, GT_COLUMN);
    for (i, (ai, gt)) in rows.iter().enumerate() {
        content.push_str(&format!("S{:03},{},{}\n", i, quote(ai), quote(gt)));
    }
    std::fs::write(path, content).expect("CSV書き込み失敗");
}

fn evaluate_file(path: &Path, max_rows: Option<usize>) -> EvaluationReport {
    let table = dataset::load_table(path, max_rows).expect("読み込み失敗");
    let columns = FindingColumns::locate(&table.headers, AI_COLUMN, GT_COLUMN).expect("列が見つからない");
    let resolver = CategoryResolver::chest_xray().unwrap();
    evaluate_table(&table, &columns, &resolver, EvaluateOptions::default())
}

fn sample_rows() -> Vec<(&'static str, &'static str)> {
    vec![
        // TP: Fracture（別ラベル同士でも同カテゴリ）
        (
            r#"[{"pathology": "Rib Fracture"}, {"pathology": "Rib Fracture"}]"#,
            r#"[{"pathology": "Clavicle Fracture"}]"#,
        ),
        // 正解なし → FP
        (r#"[{"pathology": "Cardiomegaly"}]"#, "[]"),
        // AIなし → FN
        ("", r#"[{"pathology": "Pneumothorax"}]"#),
        // 壊れたJSON → スキップ
        (r#"[{"pathology": "Edema""#, r#"[{"pathology": "Edema"}]"#),
        // 両方なし → 何も計上しない
        ("[]", ""),
        // 未登録ラベルはそのままカテゴリ扱い
        (r#"[{"pathology": "Unmapped Thing"}]"#, r#"[{"pathology": "Unmapped Thing"}]"#),
    ]
}

#[test]
fn test_csv_end_to_end() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("mVgdata.csv");
    write_csv(&path, &sample_rows());

    let report = evaluate_file(&path, None);

    assert_eq!(report.rows_read, 6);
    assert_eq!(report.rows_evaluated, 5);
    assert_eq!(report.skipped.len(), 1);
    assert_eq!(report.skipped[0].row, 3);

    assert_eq!(report.totals.true_positive("Fracture"), 1);
    assert_eq!(report.totals.true_positive("Unmapped Thing"), 1);
    assert_eq!(report.totals.false_positive("Abnormal Cardiac Silhouette"), 1);
    assert_eq!(report.totals.false_negative("Pneumothorax"), 1);
    assert!(report.totals.true_positives.get("Edema").is_none());

    let fracture = report.metrics["Fracture"];
    assert_eq!((fracture.precision, fracture.recall, fracture.f1_score), (1.0, 1.0, 1.0));
    assert_eq!(report.metrics["Pneumothorax"].recall, 0.0);
    assert_eq!(report.metrics.len(), 4);
}

#[test]
fn test_max_rows_cutoff_counts_skipped_rows() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("data.csv");
    write_csv(&path, &sample_rows());

    // 4行目（壊れたJSON）までで打ち切り
    let report = evaluate_file(&path, Some(4));

    assert_eq!(report.rows_read, 4);
    assert_eq!(report.rows_evaluated, 3);
    assert_eq!(report.skipped.len(), 1);
    assert!(report.metrics.get("Unmapped Thing").is_none());
}

#[test]
fn test_missing_column() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("data.csv");
    std::fs::write(&path, "Study ID,AI findings,Ground truth\nS001,[],[]\n").unwrap();

    let table = dataset::load_table(&path, None).unwrap();
    let result = FindingColumns::locate(&table.headers, AI_COLUMN, GT_COLUMN);

    match result {
        Err(EvalError::MissingColumn { column, available }) => {
            assert_eq!(column, AI_COLUMN);
            assert_eq!(available, vec!["Study ID", "AI findings", "Ground truth"]);
        }
        other => panic!("MissingColumnを期待: {:?}", other),
    }
}

#[test]
fn test_nonexistent_file() {
    let result = dataset::load_table(Path::new("/nonexistent/path/12345.csv"), None);
    assert!(matches!(result, Err(EvalError::FileNotFound(_))));
}

#[test]
fn test_empty_csv() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("empty.csv");
    std::fs::write(&path, "").unwrap();

    let result = dataset::load_table(&path, None);
    assert!(matches!(result, Err(EvalError::EmptyDataset(_))));
}

#[test]
fn test_xlsx_end_to_end() {
    use rust_xlsxwriter::Workbook;

    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("data.xlsx");

    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.write_string(0, 0, AI_COLUMN).unwrap();
    worksheet.write_string(0, 1, GT_COLUMN).unwrap();
    worksheet
        .write_string(1, 0, r#"[{"pathology": "Nodule"}]"#)
        .unwrap();
    worksheet
        .write_string(1, 1, r#"[{"pathology": "Lung Mass"}]"#)
        .unwrap();
    worksheet
        .write_string(2, 0, r#"[{"pathology": "Edema"}]"#)
        .unwrap();
    workbook.save(&path).expect("xlsx保存失敗");

    let report = evaluate_file(&path, None);

    assert_eq!(report.rows_read, 2);
    assert!(report.skipped.is_empty());
    assert_eq!(report.totals.true_positive("Lung Lesion"), 1);
    assert_eq!(report.totals.false_positive("Edema"), 1);
}

/// UTF-8として不正なバイトを含む行も読み込み、他の行の評価を止めない
#[test]
fn test_csv_invalid_utf8_row_is_still_evaluated() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("data.csv");

    let mut content = format!("Study ID,{},{}\n", AI_COLUMN, GT_COLUMN).into_bytes();
    content.extend_from_slice(
        format!("S1,{},{}\n", quote(r#"[{"pathology": "Edema"}]"#), quote(r#"[{"pathology": "Edema"}]"#))
            .as_bytes(),
    );
    content.extend_from_slice(b"S\xff2,");
    content.extend_from_slice(
        format!("{},{}\n", quote(r#"[{"pathology": "Nodule"}]"#), quote("[]")).as_bytes(),
    );
    std::fs::write(&path, content).expect("CSV書き込み失敗");

    let report = evaluate_file(&path, None);

    assert_eq!(report.rows_read, 2);
    assert_eq!(report.rows_evaluated, 2);
    assert!(report.skipped.is_empty());
    assert_eq!(report.totals.true_positive("Edema"), 1);
    assert_eq!(report.totals.false_positive("Lung Lesion"), 1);
}

/// 空オブジェクトのセルは所見なしとして扱う
#[test]
fn test_csv_empty_object_cell_is_no_findings() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("data.csv");
    write_csv(&path, &[("{}", r#"[{"pathology": "Pneumothorax"}]"#)]);

    let report = evaluate_file(&path, None);

    assert!(report.skipped.is_empty());
    assert_eq!(report.totals.false_negative("Pneumothorax"), 1);
}
