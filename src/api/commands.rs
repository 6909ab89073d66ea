//! Tauri Commands - API for the Dashboard Frontend
//!
//! One command per user-facing operation. Typed errors from the logic
//! layer are stringified at this boundary; every failure is
//! request-local and surfaces in the UI as a warning or error message.

use std::time::Instant;

use serde::{Deserialize, Serialize};

use crate::constants::{
    APP_VERSION, FEATURE_COLUMNS, TOP_FAILURES_REPORT_FILE,
};
use crate::logic::artifacts::{self, EvaluationImage, PredictionsTable};
use crate::logic::errors::{ArtifactError, PredictError};
use crate::logic::inference;
use crate::logic::model::{ArtifactRegistry, EngineStatus, ModelMetadata, ModelVariant};
use crate::logic::record::SensorReading;

// ============================================================================
// DATA STRUCTURES
// ============================================================================

/// Prediction response for the manual-inference form
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PredictionResponse {
    pub variant: String,
    pub component: String,
    pub needs_maintenance: bool,
    /// `YYYY-MM-DD HH:MM:SS`, present only when maintenance is needed
    pub recommended_maintenance_time: Option<String>,
    /// Success message shown above the form result
    pub message: String,
    /// Informational notice: the recommended time, or "no maintenance"
    pub notice: String,
}

/// One selectable model variant for the sidebar menu
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VariantInfo {
    pub id: String,
    pub display_name: String,
    pub family: String,
    pub loaded: bool,
}

/// A set of charts plus warnings for the ones that were missing
#[derive(Debug, Clone, Serialize)]
pub struct ArtifactGallery {
    pub images: Vec<EvaluationImage>,
    pub warnings: Vec<String>,
}

/// Feature-importance view: charts plus the index -> component mapping
#[derive(Debug, Clone, Serialize)]
pub struct FeatureImportanceView {
    pub images: Vec<EvaluationImage>,
    pub warnings: Vec<String>,
    pub component_mapping: Vec<ComponentMapEntry>,
    pub feature_columns: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ComponentMapEntry {
    pub index: i64,
    pub label: String,
}

/// Top-10 failing machines view: chart plus the text report
#[derive(Debug, Clone, Serialize)]
pub struct TopFailuresView {
    pub image: Option<EvaluationImage>,
    pub report_text: Option<String>,
    pub warnings: Vec<String>,
}

// ============================================================================
// PREDICTION COMMANDS
// ============================================================================

/// Run one manual prediction against the selected model variant.
#[tauri::command]
pub async fn predict_failure(
    variant: String,
    reading: SensorReading,
    state: tauri::State<'_, ArtifactRegistry>,
) -> Result<PredictionResponse, String> {
    let variant: ModelVariant = variant.parse()?;

    let classifier = state
        .classifier(variant)
        .ok_or_else(|| PredictError::ModelNotLoaded(variant.as_str().to_string()).to_string())?;

    let decoder = state
        .decoder()
        .ok_or_else(|| ArtifactError::Missing(state.decoder_path()).to_string())?;

    let start = Instant::now();
    let result = inference::predict_failure(&reading, &*classifier, &decoder)
        .map_err(|e| e.to_string())?;
    state.record_inference(start.elapsed().as_micros() as u64);

    let recommended_maintenance_time = result
        .maintenance_due
        .map(|t| t.format("%Y-%m-%d %H:%M:%S").to_string());

    let notice = match &recommended_maintenance_time {
        Some(t) => format!("Recommended Maintenance Time: {}", t),
        None => "No maintenance needed at this time.".to_string(),
    };

    Ok(PredictionResponse {
        variant: variant.display_name().to_string(),
        component: result.component.as_str().to_string(),
        needs_maintenance: result.component.needs_maintenance(),
        recommended_maintenance_time,
        message: format!("Predicted Component Failure: {}", result.component),
        notice,
    })
}

/// Default values the manual-prediction form is pre-populated with.
#[tauri::command]
pub async fn get_default_reading() -> Result<SensorReading, String> {
    Ok(SensorReading::default())
}

// ============================================================================
// MODEL COMMANDS
// ============================================================================

/// The three selectable model variants for the sidebar menu.
#[tauri::command]
pub async fn list_model_variants(
    state: tauri::State<'_, ArtifactRegistry>,
) -> Result<Vec<VariantInfo>, String> {
    Ok(ModelVariant::ALL
        .iter()
        .map(|v| VariantInfo {
            id: v.as_str().to_string(),
            display_name: v.display_name().to_string(),
            family: v.family().to_string(),
            loaded: state.is_loaded(*v),
        })
        .collect())
}

/// Engine status for the UI header
#[tauri::command]
pub async fn get_engine_status(
    state: tauri::State<'_, ArtifactRegistry>,
) -> Result<EngineStatus, String> {
    Ok(state.status())
}

/// Metadata of one loaded model, if available
#[tauri::command]
pub async fn get_model_metadata(
    variant: String,
    state: tauri::State<'_, ArtifactRegistry>,
) -> Result<Option<ModelMetadata>, String> {
    let variant: ModelVariant = variant.parse()?;
    Ok(state.metadata(variant))
}

/// (Re)load one classifier artifact from disk
#[tauri::command]
pub async fn load_model(
    variant: String,
    state: tauri::State<'_, ArtifactRegistry>,
) -> Result<ModelMetadata, String> {
    let variant: ModelVariant = variant.parse()?;
    state.load_variant(variant).map_err(|e| e.to_string())
}

/// App version string for the UI footer
#[tauri::command]
pub async fn get_app_version() -> Result<String, String> {
    Ok(APP_VERSION.to_string())
}

// ============================================================================
// EVALUATION ARTIFACT COMMANDS
// ============================================================================

fn collect_images(
    state: &ArtifactRegistry,
    wanted: &[(&str, String)],
) -> (Vec<EvaluationImage>, Vec<String>) {
    let mut images = Vec::new();
    let mut warnings = Vec::new();

    for (file, caption) in wanted {
        match artifacts::load_image(state.artifacts_dir(), file, caption) {
            Ok(img) => images.push(img),
            Err(e) => warnings.push(e.to_string()),
        }
    }

    (images, warnings)
}

/// Confusion matrix + classification report charts for one variant.
/// A missing chart becomes a warning; the page still renders.
#[tauri::command]
pub async fn get_evaluation_images(
    variant: String,
    state: tauri::State<'_, ArtifactRegistry>,
) -> Result<ArtifactGallery, String> {
    let variant: ModelVariant = variant.parse()?;

    let wanted = [
        (
            variant.confusion_matrix_file(),
            format!("Confusion Matrix - {}", variant.display_name()),
        ),
        (
            variant.classification_report_file(),
            format!("Classification Report - {}", variant.display_name()),
        ),
    ];

    let (images, warnings) = collect_images(&state, &wanted);
    Ok(ArtifactGallery { images, warnings })
}

/// Sensor + SHAP feature-importance charts, with the component mapping.
#[tauri::command]
pub async fn get_feature_importance_images(
    state: tauri::State<'_, ArtifactRegistry>,
) -> Result<FeatureImportanceView, String> {
    let wanted = [
        (
            "sensor_feature_importance.png",
            "Sensor Feature Importance".to_string(),
        ),
        (
            "shap_feature_importance_bar.png",
            "SHAP Feature Importance (Bar)".to_string(),
        ),
    ];

    let (images, warnings) = collect_images(&state, &wanted);

    // The mapping comes from the decoder when loaded, so the view
    // always matches the artifact actually in use
    let component_mapping = match state.decoder() {
        Some(decoder) => decoder
            .mapping()
            .into_iter()
            .map(|(index, label)| ComponentMapEntry {
                index,
                label: label.to_string(),
            })
            .collect(),
        // Decoder not loaded: fall back to the canonical label order
        None => crate::constants::COMPONENT_LABELS
            .iter()
            .enumerate()
            .map(|(i, l)| ComponentMapEntry {
                index: i as i64,
                label: l.to_string(),
            })
            .collect(),
    };

    Ok(FeatureImportanceView {
        images,
        warnings,
        component_mapping,
        feature_columns: FEATURE_COLUMNS.iter().map(|c| c.to_string()).collect(),
    })
}

/// Top-10 machines by predicted failure frequency: chart + text report.
#[tauri::command]
pub async fn get_top_failures_report(
    state: tauri::State<'_, ArtifactRegistry>,
) -> Result<TopFailuresView, String> {
    let mut warnings = Vec::new();

    let image = match artifacts::load_image(
        state.artifacts_dir(),
        "top10_predicted_failures.png",
        "Top 10 Machines with Highest Predicted Failures",
    ) {
        Ok(img) => Some(img),
        Err(e) => {
            warnings.push(e.to_string());
            None
        }
    };

    let report_text = match artifacts::load_report(state.artifacts_dir(), TOP_FAILURES_REPORT_FILE)
    {
        Ok(text) => Some(text),
        Err(e) => {
            warnings.push(e.to_string());
            None
        }
    };

    Ok(TopFailuresView {
        image,
        report_text,
        warnings,
    })
}

/// The precomputed predictions CSV, parsed for display plus raw text
/// for download. Unlike the chart views this errors visibly when the
/// CSV is absent.
#[tauri::command]
pub async fn get_predictions_table(
    state: tauri::State<'_, ArtifactRegistry>,
) -> Result<PredictionsTable, String> {
    artifacts::load_predictions_table(state.artifacts_dir()).map_err(|e| e.to_string())
}
