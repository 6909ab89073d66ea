//! Sensor reading record - the single-row input to every prediction.

use serde::{Deserialize, Serialize};

use crate::constants::{
    DEFAULT_AGE, DEFAULT_MACHINE_ID, DEFAULT_PRESSURE, DEFAULT_ROTATE, DEFAULT_VIBRATION,
    DEFAULT_VOLT, FEATURE_COUNT,
};

/// One manually entered set of sensor values for a single machine.
///
/// Immutable once constructed; lives only for the duration of one
/// prediction call. No field has an enforced range - out-of-domain
/// values are passed to the classifier unchanged.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SensorReading {
    pub machine_id: u32,
    pub volt: f64,
    pub rotate: f64,
    pub pressure: f64,
    pub vibration: f64,
    pub age: u32,
}

impl SensorReading {
    /// Arrange the six fields into the fixed training column order
    /// `[machineID, volt, rotate, pressure, vibration, age]`.
    ///
    /// The classifiers were trained on exactly this ordering; any
    /// permutation silently corrupts predictions.
    pub fn to_feature_row(&self) -> [f32; FEATURE_COUNT] {
        [
            self.machine_id as f32,
            self.volt as f32,
            self.rotate as f32,
            self.pressure as f32,
            self.vibration as f32,
            self.age as f32,
        ]
    }
}

impl Default for SensorReading {
    /// The values the UI form is pre-populated with.
    fn default() -> Self {
        Self {
            machine_id: DEFAULT_MACHINE_ID,
            volt: DEFAULT_VOLT,
            rotate: DEFAULT_ROTATE,
            pressure: DEFAULT_PRESSURE,
            vibration: DEFAULT_VIBRATION,
            age: DEFAULT_AGE,
        }
    }
}
