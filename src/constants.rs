//! Central Configuration Constants
//!
//! Single source of truth for all configuration defaults.
//! Artifact filenames must match what the offline training pipeline exports.

/// App version
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// App name
pub const APP_NAME: &str = "PDM Dashboard";

/// Default artifacts directory (relative to the working directory)
pub const DEFAULT_ARTIFACTS_DIR: &str = "artifacts";

/// Number of input features per sensor reading
pub const FEATURE_COUNT: usize = 6;

/// Feature column names in training order.
///
/// The classifiers were fitted against exactly this column ordering;
/// reordering silently corrupts predictions.
pub const FEATURE_COLUMNS: [&str; FEATURE_COUNT] =
    ["machineID", "volt", "rotate", "pressure", "vibration", "age"];

/// The closed component label space shared by all model variants.
/// The last entry is the sentinel meaning "no imminent failure".
pub const COMPONENT_LABELS: [&str; 5] = ["comp1", "comp2", "comp3", "comp4", "none"];

/// Fixed lead time for the recommended maintenance timestamp (hours)
pub const MAINTENANCE_LEAD_HOURS: i64 = 24;

/// Shared label-decoder artifact (one per model family)
pub const LABEL_DECODER_FILE: &str = "label_encoder.json";

/// Precomputed predictions CSV shown in the "Output in Excel" view
pub const PREDICTIONS_CSV_FILE: &str = "predicted_failures.csv";

/// Precomputed top-10 failing-machines report
pub const TOP_FAILURES_REPORT_FILE: &str = "top10_predicted_failures.txt";

// ============================================
// Default form values (UI convenience, not contract)
// ============================================

pub const DEFAULT_MACHINE_ID: u32 = 1;
pub const DEFAULT_VOLT: f64 = 160.0;
pub const DEFAULT_ROTATE: f64 = 420.0;
pub const DEFAULT_PRESSURE: f64 = 110.0;
pub const DEFAULT_VIBRATION: f64 = 45.0;
pub const DEFAULT_AGE: u32 = 10;

// ============================================
// Helper functions to read from env with fallback
// ============================================

/// Get the artifacts directory from environment or use default
pub fn get_artifacts_dir() -> std::path::PathBuf {
    std::env::var("PDM_ARTIFACTS_DIR")
        .map(std::path::PathBuf::from)
        .unwrap_or_else(|_| std::path::PathBuf::from(DEFAULT_ARTIFACTS_DIR))
}
