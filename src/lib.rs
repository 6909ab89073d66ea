//! Predictive Maintenance Dashboard - Core Service
//!
//! Rust backend of a Tauri desktop dashboard that presents
//! predictive-maintenance results for industrial machines: pre-trained
//! classifiers are loaded once at startup, manual sensor readings come
//! in over IPC, and pre-rendered evaluation artifacts are served to the
//! webview for display.

pub mod api;
pub mod constants;
pub mod logic;

use api::commands;
use logic::model::ArtifactRegistry;

/// Initialize and run the Tauri application.
///
/// Artifact loading happens eagerly at startup: the three classifier
/// variants and the shared label decoder are read from the artifacts
/// directory into the registry. Anything missing is a logged warning
/// and shows up as unloaded in the engine status; the dashboard itself
/// still runs.
pub fn run() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    log::info!(
        "Starting {} v{}...",
        constants::APP_NAME,
        constants::APP_VERSION
    );

    let artifacts_dir = constants::get_artifacts_dir();
    log::info!("Artifacts directory: {}", artifacts_dir.display());

    let registry = ArtifactRegistry::new(artifacts_dir);
    registry.init();

    tauri::Builder::default()
        .plugin(tauri_plugin_shell::init())
        .manage(registry)
        .invoke_handler(tauri::generate_handler![
            // Prediction Commands
            commands::predict_failure,
            commands::get_default_reading,

            // Model Commands
            commands::list_model_variants,
            commands::get_engine_status,
            commands::get_model_metadata,
            commands::load_model,
            commands::get_app_version,

            // Evaluation Artifact Commands
            commands::get_evaluation_images,
            commands::get_feature_importance_images,
            commands::get_top_failures_report,
            commands::get_predictions_table,
        ])
        .run(tauri::generate_context!())
        .expect("error while running tauri application");
}
