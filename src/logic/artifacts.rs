//! Display artifact loaders.
//!
//! Evaluation charts, the top-10 failures report, and the predictions
//! CSV are all produced offline by the training pipeline; this module
//! only reads them. A missing file is a typed error the UI turns into a
//! warning - never a crash.

use std::path::Path;

use base64::prelude::*;
use serde::Serialize;

use crate::constants::PREDICTIONS_CSV_FILE;
use crate::logic::errors::ArtifactError;

/// One pre-rendered chart, base64-encoded for the webview.
#[derive(Debug, Clone, Serialize)]
pub struct EvaluationImage {
    pub name: String,
    pub caption: String,
    pub mime_type: String,
    pub base64: String,
}

/// The precomputed predictions CSV, parsed for table display plus the
/// raw text for the download button.
#[derive(Debug, Clone, Serialize)]
pub struct PredictionsTable {
    pub file_name: String,
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
    pub csv_text: String,
}

/// Load a chart image and encode it for IPC transfer.
///
/// The frontend builds a `data:{mime};base64,...` URL from this rather
/// than going through the asset protocol.
pub fn load_image(dir: &Path, file: &str, caption: &str) -> Result<EvaluationImage, ArtifactError> {
    let path = dir.join(file);
    if !path.exists() {
        return Err(ArtifactError::Missing(path));
    }

    let bytes = std::fs::read(&path).map_err(|e| ArtifactError::invalid(&path, e.to_string()))?;

    let mime_type = match path.extension().and_then(|e| e.to_str()) {
        Some("png") => "image/png",
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("svg") => "image/svg+xml",
        _ => "application/octet-stream",
    };

    Ok(EvaluationImage {
        name: file.to_string(),
        caption: caption.to_string(),
        mime_type: mime_type.to_string(),
        base64: BASE64_STANDARD.encode(&bytes),
    })
}

/// Load a plain-text report artifact.
pub fn load_report(dir: &Path, file: &str) -> Result<String, ArtifactError> {
    let path = dir.join(file);
    if !path.exists() {
        return Err(ArtifactError::Missing(path));
    }

    std::fs::read_to_string(&path).map_err(|e| ArtifactError::invalid(&path, e.to_string()))
}

/// Load and parse the precomputed predictions CSV.
pub fn load_predictions_table(dir: &Path) -> Result<PredictionsTable, ArtifactError> {
    let path = dir.join(PREDICTIONS_CSV_FILE);
    if !path.exists() {
        return Err(ArtifactError::Missing(path));
    }

    let csv_text =
        std::fs::read_to_string(&path).map_err(|e| ArtifactError::invalid(&path, e.to_string()))?;

    let mut rdr = csv::Reader::from_reader(csv_text.as_bytes());

    let headers = rdr
        .headers()
        .map_err(|e| ArtifactError::invalid(&path, format!("bad CSV headers: {}", e)))?
        .iter()
        .map(|h| h.to_string())
        .collect();

    let mut rows = Vec::new();
    for (row_num, result) in rdr.records().enumerate() {
        let record = result
            .map_err(|e| ArtifactError::invalid(&path, format!("CSV row {}: {}", row_num, e)))?;
        rows.push(record.iter().map(|f| f.to_string()).collect());
    }

    log::info!("Loaded predictions CSV: {} rows", rows.len());

    Ok(PredictionsTable {
        file_name: PREDICTIONS_CSV_FILE.to_string(),
        headers,
        rows,
        csv_text,
    })
}
