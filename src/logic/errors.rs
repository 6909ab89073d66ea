//! Typed errors for artifact access and inference.
//!
//! Every failure here is request-local: the UI shows a warning and the
//! rest of the dashboard keeps rendering.

use std::path::PathBuf;
use thiserror::Error;

/// A model, decoder, image, report, or CSV file could not be used.
#[derive(Debug, Error)]
pub enum ArtifactError {
    #[error("artifact not found: {0}")]
    Missing(PathBuf),

    #[error("failed to load artifact {path}: {reason}")]
    Invalid { path: PathBuf, reason: String },
}

impl ArtifactError {
    pub fn invalid(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Self::Invalid {
            path: path.into(),
            reason: reason.into(),
        }
    }
}

/// Inference-time failures.
#[derive(Debug, Error)]
pub enum PredictError {
    #[error("no model loaded for variant '{0}'")]
    ModelNotLoaded(String),

    #[error("inference failed: {0}")]
    Inference(String),

    /// The classifier produced a class index the decoder has no mapping
    /// for. This means classifier and decoder are from different model
    /// families; failing loudly beats naming the wrong component.
    #[error("class index {index} has no label mapping (decoder knows {known} labels)")]
    LabelSpaceMismatch { index: i64, known: usize },
}
