//! API Module
//!
//! Tauri command surface for the dashboard frontend.

pub mod commands;

pub use commands::*;
