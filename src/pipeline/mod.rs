//! Batch processing of tile directories

/// Directory traversal, extraction and sequential classification
pub mod orchestrator;

pub use orchestrator::{ClassificationMode, ExtractionConfig, ExtractionOutcome, Orchestrator};
