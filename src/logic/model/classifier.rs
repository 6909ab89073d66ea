//! ONNX-backed classifiers.
//!
//! Each pre-trained variant is exported to ONNX by the offline training
//! pipeline and loaded here through ONNX Runtime. The `Classifier` trait
//! is the only capability the inference handler needs, so test code can
//! substitute stubs.

use std::path::Path;

use ndarray::Array2;
use ort::session::{builder::GraphOptimizationLevel, Session};
use ort::value::Value;
use parking_lot::Mutex;
use sha2::{Digest, Sha256};

use crate::constants::FEATURE_COUNT;
use crate::logic::errors::{ArtifactError, PredictError};

/// The one capability the inference handler requires: accept a
/// single-row record, return one numeric class index.
pub trait Classifier: Send + Sync {
    fn predict_index(&self, row: &[f32; FEATURE_COUNT]) -> Result<i64, PredictError>;
}

/// A fitted classifier loaded from an ONNX artifact.
pub struct OnnxClassifier {
    // Session::run takes &mut self, so the session sits behind a lock
    session: Mutex<Session>,
    checksum_sha256: String,
}

impl OnnxClassifier {
    /// Load a classifier artifact from disk.
    pub fn load(model_path: &Path) -> Result<Self, ArtifactError> {
        log::info!("Loading ONNX model from: {}", model_path.display());

        if !model_path.exists() {
            return Err(ArtifactError::Missing(model_path.to_path_buf()));
        }

        let checksum_sha256 = calculate_file_hash(model_path)?;

        let session = Session::builder()
            .map_err(|e| ArtifactError::invalid(model_path, format!("session builder: {}", e)))?
            .with_optimization_level(GraphOptimizationLevel::Level3)
            .map_err(|e| ArtifactError::invalid(model_path, format!("optimization level: {}", e)))?
            .commit_from_file(model_path)
            .map_err(|e| ArtifactError::invalid(model_path, format!("load failed: {}", e)))?;

        log::info!(
            "ONNX model loaded successfully (sha256: {})",
            &checksum_sha256[..12]
        );

        Ok(Self {
            session: Mutex::new(session),
            checksum_sha256,
        })
    }

    pub fn checksum_sha256(&self) -> &str {
        &self.checksum_sha256
    }
}

impl Classifier for OnnxClassifier {
    /// Run one `[1, 6]` row through the model and return the predicted
    /// class index.
    ///
    /// sklearn-style exporters emit an int64 label tensor as the first
    /// output; exporters that only emit per-class scores get an argmax
    /// over the float output instead.
    fn predict_index(&self, row: &[f32; FEATURE_COUNT]) -> Result<i64, PredictError> {
        let input_array = Array2::<f32>::from_shape_vec((1, FEATURE_COUNT), row.to_vec())
            .map_err(|e| PredictError::Inference(format!("array error: {}", e)))?;

        let mut session = self.session.lock();

        let output_name = session
            .outputs
            .first()
            .map(|o| o.name.clone())
            .ok_or_else(|| PredictError::Inference("no output defined".to_string()))?;

        let input_tensor = Value::from_array(input_array)
            .map_err(|e| PredictError::Inference(format!("tensor error: {}", e)))?;

        let outputs = session
            .run(ort::inputs![input_tensor])
            .map_err(|e| PredictError::Inference(format!("inference failed: {}", e)))?;

        let output = outputs
            .get(&output_name)
            .ok_or_else(|| PredictError::Inference("no output".to_string()))?;

        // Label tensor path (int64)
        if let Ok(tensor) = output.try_extract_tensor::<i64>() {
            let data = tensor.1;
            return data
                .first()
                .copied()
                .ok_or_else(|| PredictError::Inference("empty label output".to_string()));
        }

        // Score tensor path (float): argmax over class scores
        let tensor = output
            .try_extract_tensor::<f32>()
            .map_err(|e| PredictError::Inference(format!("extract error: {}", e)))?;
        let data = tensor.1;

        if data.is_empty() {
            return Err(PredictError::Inference("empty score output".to_string()));
        }

        let mut best = 0usize;
        for (i, score) in data.iter().enumerate() {
            if *score > data[best] {
                best = i;
            }
        }

        Ok(best as i64)
    }
}

fn calculate_file_hash(path: &Path) -> Result<String, ArtifactError> {
    use std::io::Read;

    let mut file = std::fs::File::open(path)
        .map_err(|e| ArtifactError::invalid(path, e.to_string()))?;

    let mut hasher = Sha256::new();
    let mut buffer = [0u8; 8192];

    loop {
        let bytes_read = file
            .read(&mut buffer)
            .map_err(|e| ArtifactError::invalid(path, e.to_string()))?;

        if bytes_read == 0 {
            break;
        }

        hasher.update(&buffer[..bytes_read]);
    }

    Ok(format!("{:x}", hasher.finalize()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_load_missing_artifact() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("rf_model.onnx");

        match OnnxClassifier::load(&path) {
            Err(ArtifactError::Missing(p)) => assert_eq!(p, path),
            other => panic!("expected ArtifactError::Missing, got {:?}", other.err()),
        }
    }

    #[test]
    fn test_load_garbage_artifact_is_invalid() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("rf_model.onnx");
        let mut f = std::fs::File::create(&path).unwrap();
        f.write_all(b"not an onnx protobuf").unwrap();

        match OnnxClassifier::load(&path) {
            Err(ArtifactError::Invalid { .. }) => {}
            other => panic!("expected ArtifactError::Invalid, got {:?}", other.err()),
        }
    }

    #[test]
    fn test_file_hash_is_stable() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("artifact.bin");
        std::fs::write(&path, b"abc").unwrap();

        let hash = calculate_file_hash(&path).unwrap();
        // sha256("abc")
        assert_eq!(
            hash,
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }
}
