//! Geometric segmentation of tile images into directional regions

/// Diagonal partition into North, East, South and West masks
pub mod regions;

pub use regions::{Direction, RegionMask, RegionMasks};
