//! Logic Module - Inference & Artifact Handling
//!
//! - `record` - the six-field sensor reading and its fixed column order
//! - `model` - classifier variants, label decoder, artifact registry
//! - `inference` - the prediction request handler
//! - `artifacts` - loaders for pre-rendered evaluation artifacts

pub mod artifacts;
pub mod errors;
pub mod inference;
pub mod model;
pub mod record;
