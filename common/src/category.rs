//! カテゴリマップモジュール
//!
//! 細かい所見ラベル（"Clavicle Fracture" など）を評価単位のカテゴリ
//! （"Fracture" など）へ集約する。マップは起動時に一度だけ構築し、以後変更しない。

use crate::error::{Error, Result};
use std::collections::HashMap;

/// 組み込みの胸部X線カテゴリ定義
///
/// "Interstitial Lung Opacity" は "Interstitial Disease" のみに置く
/// （"Lung Opacity" 側にも載っていたが、実際の集約先は常にこちらだった）。
const CHEST_XRAY_CATEGORIES: &[(&str, &[&str])] = &[
    (
        "Fracture",
        &[
            "Clavicle Fracture",
            "Humerus Fracture",
            "Rib Fracture",
            "Scapula Fracture",
            "Old Rib Fracture",
            "Old Healed Clavicle Fracture",
            "Clavicle Fracture with PO",
        ],
    ),
    ("Lung Opacity", &["Alveolar Lung Opacity"]),
    (
        "Support Devices",
        &[
            "Esophageal Stent",
            "Foreign Body - Pacemaker",
            "Foreign Body - CV Line",
            "Foreign Body - NG Tube",
            "Foreign Body - ETT",
            "Foreign Body - ICD",
            "Foreign Body - Chest Leads",
            "Foreign Body - Tracheostomy Tube",
            "Foreign Body - Sternal Sutures",
            "Foreign Body - Cardiac Valves",
            "Foreign Body - Chemoport",
            "Foreign Body - Spinal Fusion",
            "NJ Tube",
            "Surgical Staples",
        ],
    ),
    (
        "Pleural Other",
        &["Pleural Calcification", "Pleural Plaque", "Pleural Thickening"],
    ),
    ("Atelectasis", &["Atelectasis", "Lung Collapse", "Lobe Collapse"]),
    (
        "Diaphragmatic Dysfunction",
        &[
            "Diaphragmatic Hump",
            "Elevated Diaphragm",
            "Flattened Diaphragm",
            "Tented Diaphragm",
        ],
    ),
    ("Cifo-scoliosis", &["Scoliosis"]),
    (
        "Interstitial Disease",
        &["Interstitial Lung Opacity", "ILD (Interstitial Lung Disease)"],
    ),
    ("Pleural Effusion", &["Pleural Effusion"]),
    ("Abnormal Cardiac Silhouette", &["Cardiomegaly"]),
    (
        "Emphysema",
        &[
            "COPD (Chronic Obstructive Pulmonary Disease)",
            "Bullous Emphysema",
        ],
    ),
    ("Tuberculosis", &["Tuberculosis", "Old TB", "Milliary Tuberculosis"]),
    ("Consolidation", &["Consolidation"]),
    ("Pneumothorax", &["Pneumothorax"]),
    (
        "Hilar/Mediastinal Disease",
        &[
            "Hilar Lymphadenopathy",
            "Hilar Prominence",
            "Mediastinal Shift",
            "Tracheal and Mediastinal Shift",
            "Mediastinal Mass",
            "Mediastinal Widening",
        ],
    ),
    (
        "Lung Lesion",
        &[
            "Lung Mass",
            "Nodule",
            "Reticular Nodule",
            "Multiple Nodules",
            "Cavity",
            "Cannonball Metastases",
        ],
    ),
    ("Edema", &["Edema"]),
];

/// カテゴリ → ラベル列（定義順を保持）
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategoryMap {
    entries: Vec<(String, Vec<String>)>,
}

impl CategoryMap {
    /// 組み込みの胸部X線マップ
    pub fn chest_xray() -> Self {
        Self::from_entries(CHEST_XRAY_CATEGORIES.iter().map(|(category, labels)| {
            (category.to_string(), labels.iter().map(|l| l.to_string()).collect())
        }))
    }

    pub fn from_entries<I>(entries: I) -> Self
    where
        I: IntoIterator<Item = (String, Vec<String>)>,
    {
        Self {
            entries: entries.into_iter().collect(),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.entries
            .iter()
            .map(|(category, labels)| (category.as_str(), labels.as_slice()))
    }

    pub fn categories(&self) -> Vec<&str> {
        self.entries.iter().map(|(c, _)| c.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// ラベル → カテゴリの逆引き
#[derive(Debug, Clone)]
pub struct CategoryResolver {
    reverse: HashMap<String, String>,
}

impl CategoryResolver {
    /// CategoryMap から逆引きを構築
    ///
    /// 同じラベルが別々のカテゴリに載っている場合は `Error::DuplicateLabel`。
    /// 同一カテゴリ内の重複は無視する。
    pub fn new(map: &CategoryMap) -> Result<Self> {
        let mut reverse: HashMap<String, String> = HashMap::new();

        for (category, labels) in map.iter() {
            for label in labels {
                match reverse.get(label.as_str()) {
                    Some(existing) if existing != category => {
                        return Err(Error::DuplicateLabel {
                            label: label.clone(),
                            first: existing.clone(),
                            second: category.to_string(),
                        });
                    }
                    Some(_) => {}
                    None => {
                        reverse.insert(label.clone(), category.to_string());
                    }
                }
            }
        }

        Ok(Self { reverse })
    }

    /// 組み込みマップから構築
    pub fn chest_xray() -> Result<Self> {
        Self::new(&CategoryMap::chest_xray())
    }

    /// ラベルをカテゴリへ変換
    ///
    /// マップにないラベルはそのまま返す（カテゴリ名自体や未登録ラベルも
    /// 1つのカテゴリとして扱うため）。失敗しない。
    pub fn resolve<'a>(&'a self, label: &'a str) -> &'a str {
        self.reverse.get(label).map(|c| c.as_str()).unwrap_or(label)
    }

    /// ラベルがマップに登録されているか
    pub fn is_mapped(&self, label: &str) -> bool {
        self.reverse.contains_key(label)
    }

    pub fn len(&self) -> usize {
        self.reverse.len()
    }

    pub fn is_empty(&self) -> bool {
        self.reverse.is_empty()
    }
}
