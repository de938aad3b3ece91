//! Mathematical utilities for signature comparison

/// Euclidean distance and L1 normalization
pub mod distance;
