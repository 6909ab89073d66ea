//! Model Module - Classifier Variants & Inference Artifacts
//!
//! Three interchangeable pre-trained classifiers share one input schema
//! and one label space. Inference logic is kept separate from the Tauri
//! command surface so models are easy to swap.

pub mod classifier;
pub mod decoder;
pub mod registry;

// Re-export common types
pub use classifier::{Classifier, OnnxClassifier};
pub use decoder::{ComponentLabel, LabelDecoder};
pub use registry::{ArtifactRegistry, EngineStatus, ModelMetadata};

use serde::{Deserialize, Serialize};

/// One of the three pre-trained classifier families.
///
/// All variants accept the same six-feature row and are decoded through
/// the same label space; from the handler's point of view they differ
/// only in which artifact file backs them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModelVariant {
    RandomForest,
    XgBoost,
    Svm,
}

impl ModelVariant {
    pub const ALL: [ModelVariant; 3] =
        [ModelVariant::RandomForest, ModelVariant::XgBoost, ModelVariant::Svm];

    /// Stable identifier used over IPC and in filenames
    pub fn as_str(&self) -> &'static str {
        match self {
            ModelVariant::RandomForest => "random_forest",
            ModelVariant::XgBoost => "xgboost",
            ModelVariant::Svm => "svm",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            ModelVariant::RandomForest => "Random Forest",
            ModelVariant::XgBoost => "XGBoost",
            ModelVariant::Svm => "Support Vector Machine",
        }
    }

    /// Model family, shown in the UI next to the variant name
    pub fn family(&self) -> &'static str {
        match self {
            ModelVariant::RandomForest | ModelVariant::XgBoost => "tree ensemble",
            ModelVariant::Svm => "margin-based",
        }
    }

    /// ONNX artifact filename exported by the offline training pipeline
    pub fn artifact_file(&self) -> &'static str {
        match self {
            ModelVariant::RandomForest => "rf_model.onnx",
            ModelVariant::XgBoost => "xgb_model.onnx",
            ModelVariant::Svm => "svm_model.onnx",
        }
    }

    /// Pre-rendered confusion matrix chart for this variant
    pub fn confusion_matrix_file(&self) -> &'static str {
        match self {
            ModelVariant::RandomForest => "confusion_matrix_rf.png",
            ModelVariant::XgBoost => "confusion_matrix_xgb.png",
            ModelVariant::Svm => "confusion_matrix_svm.png",
        }
    }

    /// Pre-rendered classification report chart for this variant
    pub fn classification_report_file(&self) -> &'static str {
        match self {
            ModelVariant::RandomForest => "classification_report_rf.png",
            ModelVariant::XgBoost => "classification_report_xgb.png",
            ModelVariant::Svm => "classification_report_svm.png",
        }
    }

    /// Slot index into the registry's model table
    pub(crate) fn index(&self) -> usize {
        match self {
            ModelVariant::RandomForest => 0,
            ModelVariant::XgBoost => 1,
            ModelVariant::Svm => 2,
        }
    }
}

impl std::str::FromStr for ModelVariant {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "random_forest" => Ok(ModelVariant::RandomForest),
            "xgboost" => Ok(ModelVariant::XgBoost),
            "svm" => Ok(ModelVariant::Svm),
            other => Err(format!("unknown model variant '{}'", other)),
        }
    }
}

impl std::fmt::Display for ModelVariant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.display_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_variant_roundtrip() {
        for variant in ModelVariant::ALL {
            let parsed: ModelVariant = variant.as_str().parse().unwrap();
            assert_eq!(parsed, variant);
        }
        assert!("decision_tree".parse::<ModelVariant>().is_err());
    }

    #[test]
    fn test_variant_artifacts_are_distinct() {
        let files: std::collections::HashSet<_> =
            ModelVariant::ALL.iter().map(|v| v.artifact_file()).collect();
        assert_eq!(files.len(), ModelVariant::ALL.len());
    }
}
