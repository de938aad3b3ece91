//! Classification of region signatures into pattern identifiers

/// Unified classification over both strategies
pub mod classifier;
/// Anchor-based unsupervised clustering
pub mod cluster;
/// Nearest-neighbor matching against a reference catalog
pub mod reference;

pub use classifier::{BORDER_PATTERN, Classification, Classifier, PatternId, UNMATCHED};
