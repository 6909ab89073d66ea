//! Component label space and the label decoder artifact.
//!
//! The training pipeline fits one label encoder per model family and
//! exports it as `label_encoder.json`; all three classifier variants are
//! decoded through this single mapping.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::constants::COMPONENT_LABELS;
use crate::logic::errors::{ArtifactError, PredictError};

/// One of four physical machine parts, or the sentinel `none` meaning
/// no imminent failure predicted. This set is closed: every decoded
/// prediction lands in it, regardless of which variant produced it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ComponentLabel {
    Comp1,
    Comp2,
    Comp3,
    Comp4,
    None,
}

impl ComponentLabel {
    pub fn as_str(&self) -> &'static str {
        match self {
            ComponentLabel::Comp1 => "comp1",
            ComponentLabel::Comp2 => "comp2",
            ComponentLabel::Comp3 => "comp3",
            ComponentLabel::Comp4 => "comp4",
            ComponentLabel::None => "none",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "comp1" => Some(ComponentLabel::Comp1),
            "comp2" => Some(ComponentLabel::Comp2),
            "comp3" => Some(ComponentLabel::Comp3),
            "comp4" => Some(ComponentLabel::Comp4),
            "none" => Some(ComponentLabel::None),
            _ => None,
        }
    }

    /// Whether this prediction calls for a maintenance recommendation
    pub fn needs_maintenance(&self) -> bool {
        !matches!(self, ComponentLabel::None)
    }
}

impl std::fmt::Display for ComponentLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// On-disk shape of the decoder artifact: class names in trained index
/// order, as exported from the fitted label encoder.
#[derive(Debug, Deserialize)]
struct DecoderArtifact {
    classes: Vec<String>,
}

/// Read-only mapping between the classifiers' numeric class indices and
/// component labels. Loaded once per process, bidirectional.
#[derive(Debug, Clone)]
pub struct LabelDecoder {
    classes: Vec<ComponentLabel>,
}

impl LabelDecoder {
    /// Load the decoder artifact from disk.
    ///
    /// The class list must be exactly the five-label component space; a
    /// decoder trained against anything else would break the invariant
    /// that all variants decode into the same labels.
    pub fn load(path: &Path) -> Result<Self, ArtifactError> {
        if !path.exists() {
            return Err(ArtifactError::Missing(path.to_path_buf()));
        }

        let content = std::fs::read_to_string(path)
            .map_err(|e| ArtifactError::invalid(path, e.to_string()))?;

        let artifact: DecoderArtifact = serde_json::from_str(&content)
            .map_err(|e| ArtifactError::invalid(path, format!("bad JSON: {}", e)))?;

        let decoder = Self::from_classes(&artifact.classes)
            .map_err(|reason| ArtifactError::invalid(path, reason))?;

        log::info!(
            "Label decoder loaded: {} classes from {}",
            decoder.classes.len(),
            path.display()
        );

        Ok(decoder)
    }

    /// Build a decoder from raw class names, validating the label space.
    pub fn from_classes(names: &[String]) -> Result<Self, String> {
        let mut classes = Vec::with_capacity(names.len());
        for name in names {
            let label = ComponentLabel::parse(name)
                .ok_or_else(|| format!("unknown component label '{}'", name))?;
            if classes.contains(&label) {
                return Err(format!("duplicate component label '{}'", name));
            }
            classes.push(label);
        }

        if classes.len() != COMPONENT_LABELS.len() {
            return Err(format!(
                "expected {} classes, got {}",
                COMPONENT_LABELS.len(),
                classes.len()
            ));
        }

        Ok(Self { classes })
    }

    /// Map a numeric class index back to its component label.
    ///
    /// An index outside the known range means classifier and decoder are
    /// from different model families; that fails loudly rather than
    /// naming the wrong component.
    pub fn decode(&self, index: i64) -> Result<ComponentLabel, PredictError> {
        usize::try_from(index)
            .ok()
            .and_then(|i| self.classes.get(i))
            .copied()
            .ok_or(PredictError::LabelSpaceMismatch {
                index,
                known: self.classes.len(),
            })
    }

    /// Map a component label to its numeric class index.
    pub fn encode(&self, label: ComponentLabel) -> Option<i64> {
        self.classes.iter().position(|c| *c == label).map(|i| i as i64)
    }

    /// The full index -> label mapping, for display in the UI.
    pub fn mapping(&self) -> Vec<(i64, &'static str)> {
        self.classes
            .iter()
            .enumerate()
            .map(|(i, c)| (i as i64, c.as_str()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn standard_classes() -> Vec<String> {
        COMPONENT_LABELS.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_decode_and_encode_roundtrip() {
        let decoder = LabelDecoder::from_classes(&standard_classes()).unwrap();

        assert_eq!(decoder.decode(0).unwrap(), ComponentLabel::Comp1);
        assert_eq!(decoder.decode(4).unwrap(), ComponentLabel::None);
        assert_eq!(decoder.encode(ComponentLabel::Comp3), Some(2));
    }

    #[test]
    fn test_decode_out_of_range_fails_loudly() {
        let decoder = LabelDecoder::from_classes(&standard_classes()).unwrap();

        match decoder.decode(9) {
            Err(PredictError::LabelSpaceMismatch { index, known }) => {
                assert_eq!(index, 9);
                assert_eq!(known, 5);
            }
            other => panic!("expected LabelSpaceMismatch, got {:?}", other),
        }
        assert!(decoder.decode(-1).is_err());
    }

    #[test]
    fn test_rejects_foreign_label_space() {
        let classes = vec!["bearing".to_string(), "gearbox".to_string()];
        assert!(LabelDecoder::from_classes(&classes).is_err());

        // Right size, wrong content
        let mut classes = standard_classes();
        classes[0] = "comp1".to_string();
        classes[1] = "comp1".to_string();
        assert!(LabelDecoder::from_classes(&classes).is_err());
    }

    #[test]
    fn test_load_from_json_artifact() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("label_encoder.json");
        std::fs::write(
            &path,
            r#"{"classes": ["comp1", "comp2", "comp3", "comp4", "none"]}"#,
        )
        .unwrap();

        let decoder = LabelDecoder::load(&path).unwrap();
        assert_eq!(decoder.decode(1).unwrap(), ComponentLabel::Comp2);
    }

    #[test]
    fn test_load_missing_artifact() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("label_encoder.json");

        assert!(matches!(
            LabelDecoder::load(&path),
            Err(ArtifactError::Missing(_))
        ));
    }

    #[test]
    fn test_load_malformed_artifact() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("label_encoder.json");
        std::fs::write(&path, "{not json").unwrap();

        assert!(matches!(
            LabelDecoder::load(&path),
            Err(ArtifactError::Invalid { .. })
        ));
    }
}
