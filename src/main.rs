//! Predictive Maintenance Dashboard - Main Entry Point

#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

fn main() {
    pdm_dashboard_core::run()
}
