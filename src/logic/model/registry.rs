//! Process-wide artifact registry.
//!
//! Classifiers and the label decoder are loaded once at startup and
//! handed to command handlers by reference (Tauri managed state). A
//! variant whose artifact is missing stays unloaded with a logged
//! warning; the rest of the dashboard keeps working.

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};

use super::classifier::OnnxClassifier;
use super::decoder::LabelDecoder;
use super::ModelVariant;
use crate::constants::{FEATURE_COUNT, LABEL_DECODER_FILE};
use crate::logic::errors::ArtifactError;

/// Metadata recorded when a classifier artifact is loaded
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelMetadata {
    pub variant: ModelVariant,
    pub model_path: String,
    pub feature_count: usize,
    pub checksum_sha256: String,
    pub loaded_at: chrono::DateTime<chrono::Utc>,
}

/// Engine status for the UI
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineStatus {
    pub variants: Vec<VariantStatus>,
    pub decoder_loaded: bool,
    pub inference_device: String,
    pub inference_count: u64,
    pub avg_latency_ms: f32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VariantStatus {
    pub id: String,
    pub display_name: String,
    pub family: String,
    pub loaded: bool,
    pub loaded_at: Option<String>,
}

struct LoadedModel {
    classifier: Arc<OnnxClassifier>,
    metadata: ModelMetadata,
}

/// Read-only (after load) artifact store shared across requests.
pub struct ArtifactRegistry {
    artifacts_dir: PathBuf,
    models: [RwLock<Option<LoadedModel>>; 3],
    decoder: RwLock<Option<Arc<LabelDecoder>>>,
    latency_sum_us: AtomicU64,
    inference_count: AtomicU64,
}

impl ArtifactRegistry {
    pub fn new(artifacts_dir: PathBuf) -> Self {
        Self {
            artifacts_dir,
            models: [RwLock::new(None), RwLock::new(None), RwLock::new(None)],
            decoder: RwLock::new(None),
            latency_sum_us: AtomicU64::new(0),
            inference_count: AtomicU64::new(0),
        }
    }

    pub fn artifacts_dir(&self) -> &Path {
        &self.artifacts_dir
    }

    pub fn decoder_path(&self) -> PathBuf {
        self.artifacts_dir.join(LABEL_DECODER_FILE)
    }

    /// Load everything available at startup. Missing artifacts are
    /// warnings, not errors: the dashboard still renders and the UI
    /// surfaces the unloaded state per variant.
    pub fn init(&self) {
        match self.load_decoder() {
            Ok(()) => log::info!("Label decoder ready"),
            Err(e) => log::warn!("Label decoder unavailable: {}", e),
        }

        for variant in ModelVariant::ALL {
            match self.load_variant(variant) {
                Ok(meta) => log::info!(
                    "{} model ready ({})",
                    variant.display_name(),
                    meta.model_path
                ),
                Err(e) => log::warn!("{} model unavailable: {}", variant.display_name(), e),
            }
        }
    }

    /// Load (or replace) one classifier variant from its artifact file.
    pub fn load_variant(&self, variant: ModelVariant) -> Result<ModelMetadata, ArtifactError> {
        let path = self.artifacts_dir.join(variant.artifact_file());
        let classifier = OnnxClassifier::load(&path)?;

        let metadata = ModelMetadata {
            variant,
            model_path: path.to_string_lossy().to_string(),
            feature_count: FEATURE_COUNT,
            checksum_sha256: classifier.checksum_sha256().to_string(),
            loaded_at: chrono::Utc::now(),
        };

        *self.models[variant.index()].write() = Some(LoadedModel {
            classifier: Arc::new(classifier),
            metadata: metadata.clone(),
        });

        Ok(metadata)
    }

    /// Load (or replace) the shared label decoder.
    pub fn load_decoder(&self) -> Result<(), ArtifactError> {
        let decoder = LabelDecoder::load(&self.decoder_path())?;
        *self.decoder.write() = Some(Arc::new(decoder));
        Ok(())
    }

    /// The classifier for a variant, if its artifact loaded.
    pub fn classifier(&self, variant: ModelVariant) -> Option<Arc<OnnxClassifier>> {
        self.models[variant.index()]
            .read()
            .as_ref()
            .map(|m| m.classifier.clone())
    }

    /// The shared label decoder, if its artifact loaded.
    pub fn decoder(&self) -> Option<Arc<LabelDecoder>> {
        self.decoder.read().clone()
    }

    pub fn is_loaded(&self, variant: ModelVariant) -> bool {
        self.models[variant.index()].read().is_some()
    }

    pub fn metadata(&self, variant: ModelVariant) -> Option<ModelMetadata> {
        self.models[variant.index()]
            .read()
            .as_ref()
            .map(|m| m.metadata.clone())
    }

    /// Track one completed inference for the status view.
    pub fn record_inference(&self, elapsed_us: u64) {
        self.latency_sum_us.fetch_add(elapsed_us, Ordering::Relaxed);
        self.inference_count.fetch_add(1, Ordering::Relaxed);
    }

    pub fn status(&self) -> EngineStatus {
        let variants = ModelVariant::ALL
            .iter()
            .map(|v| {
                let meta = self.metadata(*v);
                VariantStatus {
                    id: v.as_str().to_string(),
                    display_name: v.display_name().to_string(),
                    family: v.family().to_string(),
                    loaded: meta.is_some(),
                    loaded_at: meta.map(|m| m.loaded_at.to_rfc3339()),
                }
            })
            .collect();

        let sum = self.latency_sum_us.load(Ordering::Relaxed);
        let count = self.inference_count.load(Ordering::Relaxed);
        let avg = if count > 0 {
            (sum as f32 / count as f32) / 1000.0
        } else {
            0.0
        };

        EngineStatus {
            variants,
            decoder_loaded: self.decoder.read().is_some(),
            inference_device: "ONNX Runtime (CPU)".to_string(),
            inference_count: count,
            avg_latency_ms: avg,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_dir_leaves_everything_unloaded() {
        let dir = tempfile::tempdir().unwrap();
        let registry = ArtifactRegistry::new(dir.path().to_path_buf());

        // init must not panic with nothing on disk
        registry.init();

        let status = registry.status();
        assert!(!status.decoder_loaded);
        assert!(status.variants.iter().all(|v| !v.loaded));
        assert_eq!(status.inference_count, 0);

        for variant in ModelVariant::ALL {
            assert!(registry.classifier(variant).is_none());
        }
        assert!(registry.decoder().is_none());
    }

    #[test]
    fn test_load_variant_missing_artifact() {
        let dir = tempfile::tempdir().unwrap();
        let registry = ArtifactRegistry::new(dir.path().to_path_buf());

        match registry.load_variant(ModelVariant::Svm) {
            Err(ArtifactError::Missing(p)) => {
                assert!(p.ends_with("svm_model.onnx"));
            }
            other => panic!("expected ArtifactError::Missing, got {:?}", other.err()),
        }
        assert!(!registry.is_loaded(ModelVariant::Svm));
    }

    #[test]
    fn test_decoder_loads_from_artifacts_dir() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join(LABEL_DECODER_FILE),
            r#"{"classes": ["comp1", "comp2", "comp3", "comp4", "none"]}"#,
        )
        .unwrap();

        let registry = ArtifactRegistry::new(dir.path().to_path_buf());
        registry.load_decoder().unwrap();

        let decoder = registry.decoder().expect("decoder should be loaded");
        assert_eq!(decoder.mapping().len(), 5);
        assert!(registry.status().decoder_loaded);
    }

    #[test]
    fn test_inference_metrics_accumulate() {
        let dir = tempfile::tempdir().unwrap();
        let registry = ArtifactRegistry::new(dir.path().to_path_buf());

        registry.record_inference(2_000);
        registry.record_inference(4_000);

        let status = registry.status();
        assert_eq!(status.inference_count, 2);
        assert!((status.avg_latency_ms - 3.0).abs() < f32::EPSILON);
    }
}
