//! Color signatures describing the motif inside a region

/// Signature layout, extraction and comparison
pub mod extractor;
/// Channel histograms and moments
pub mod histogram;

pub use extractor::{Signature, SignatureConfig};
