//! Inference Request Handler.
//!
//! One pure request/response per call: arrange the six sensor fields in
//! training column order, ask the injected classifier for a class index,
//! decode it through the injected label decoder, and derive the
//! maintenance recommendation. No cross-call state.

use chrono::{DateTime, Duration, Local};
use serde::Serialize;

use crate::constants::MAINTENANCE_LEAD_HOURS;
use crate::logic::errors::PredictError;
use crate::logic::model::{Classifier, ComponentLabel, LabelDecoder};
use crate::logic::record::SensorReading;

/// Output of one inference call.
#[derive(Debug, Clone, Serialize)]
pub struct PredictionResult {
    pub component: ComponentLabel,
    /// Present and meaningful only when `component` is not `none`.
    pub maintenance_due: Option<DateTime<Local>>,
}

/// Predict which component (if any) will fail within the lead window,
/// and when maintenance should happen.
///
/// Classifier and decoder must come from the same trained model family;
/// a mismatch is the caller's responsibility and surfaces (at best) as
/// `LabelSpaceMismatch`. Out-of-domain sensor values are not validated;
/// they go to the classifier unchanged.
pub fn predict_failure(
    reading: &SensorReading,
    classifier: &dyn Classifier,
    decoder: &LabelDecoder,
) -> Result<PredictionResult, PredictError> {
    let row = reading.to_feature_row();
    let index = classifier.predict_index(&row)?;
    let component = decoder.decode(index)?;

    let maintenance_due = if component.needs_maintenance() {
        Some(Local::now() + Duration::hours(MAINTENANCE_LEAD_HOURS))
    } else {
        None
    };

    log::debug!(
        "machine {} -> class {} -> {}",
        reading.machine_id,
        index,
        component
    );

    Ok(PredictionResult {
        component,
        maintenance_due,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::{COMPONENT_LABELS, FEATURE_COUNT};

    /// Always returns the same class index.
    struct FixedIndex(i64);

    impl Classifier for FixedIndex {
        fn predict_index(&self, _row: &[f32; FEATURE_COUNT]) -> Result<i64, PredictError> {
            Ok(self.0)
        }
    }

    /// Echoes the value found at one column position, so tests can
    /// verify which field landed where in the row.
    struct EchoColumn(usize);

    impl Classifier for EchoColumn {
        fn predict_index(&self, row: &[f32; FEATURE_COUNT]) -> Result<i64, PredictError> {
            Ok(row[self.0] as i64)
        }
    }

    fn standard_decoder() -> LabelDecoder {
        let classes: Vec<String> = COMPONENT_LABELS.iter().map(|s| s.to_string()).collect();
        LabelDecoder::from_classes(&classes).unwrap()
    }

    fn form_default_reading() -> SensorReading {
        SensorReading {
            machine_id: 1,
            volt: 160.0,
            rotate: 420.0,
            pressure: 110.0,
            vibration: 45.0,
            age: 10,
        }
    }

    #[test]
    fn test_none_prediction_has_no_maintenance_time() {
        let result = predict_failure(
            &form_default_reading(),
            &FixedIndex(4),
            &standard_decoder(),
        )
        .unwrap();

        assert_eq!(result.component, ComponentLabel::None);
        assert!(result.maintenance_due.is_none());
    }

    #[test]
    fn test_component_prediction_recommends_24h_lead() {
        let before = Local::now();
        let result = predict_failure(
            &form_default_reading(),
            &FixedIndex(0),
            &standard_decoder(),
        )
        .unwrap();
        let after = Local::now();

        assert_eq!(result.component, ComponentLabel::Comp1);

        let due = result.maintenance_due.expect("comp1 needs maintenance");
        let lead = Duration::hours(MAINTENANCE_LEAD_HOURS);
        assert!(due >= before + lead);
        assert!(due <= after + lead);
    }

    #[test]
    fn test_every_class_index_decodes_into_label_space() {
        let decoder = standard_decoder();
        let reading = form_default_reading();

        for index in 0..COMPONENT_LABELS.len() as i64 {
            let result = predict_failure(&reading, &FixedIndex(index), &decoder).unwrap();
            assert!(COMPONENT_LABELS.contains(&result.component.as_str()));
        }
    }

    #[test]
    fn test_unmapped_index_is_label_space_mismatch() {
        let result = predict_failure(
            &form_default_reading(),
            &FixedIndex(7),
            &standard_decoder(),
        );

        assert!(matches!(
            result,
            Err(PredictError::LabelSpaceMismatch { index: 7, .. })
        ));
    }

    #[test]
    fn test_column_order_reaches_classifier_unchanged() {
        // Each field carries its own expected column position as value,
        // so the echo stub reveals any reordering.
        let reading = SensorReading {
            machine_id: 0,
            volt: 1.0,
            rotate: 2.0,
            pressure: 3.0,
            vibration: 4.0,
            age: 5,
        };
        let decoder = standard_decoder();

        // Columns 0..=4 echo back decodable indices comp1..comp4,none
        for col in 0..COMPONENT_LABELS.len() {
            let result = predict_failure(&reading, &EchoColumn(col), &decoder).unwrap();
            assert_eq!(result.component, decoder.decode(col as i64).unwrap());
        }

        // Column 5 (age) echoes 5, which has no mapping
        assert!(matches!(
            predict_failure(&reading, &EchoColumn(5), &decoder),
            Err(PredictError::LabelSpaceMismatch { index: 5, .. })
        ));
    }

    #[test]
    fn test_classifier_failure_propagates() {
        struct Broken;
        impl Classifier for Broken {
            fn predict_index(&self, _row: &[f32; FEATURE_COUNT]) -> Result<i64, PredictError> {
                Err(PredictError::Inference("session gone".to_string()))
            }
        }

        let result = predict_failure(&form_default_reading(), &Broken, &standard_decoder());
        assert!(matches!(result, Err(PredictError::Inference(_))));
    }
}
