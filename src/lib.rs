//! Edge motif extraction for edge-matching puzzle tiles
//!
//! Each square tile image is cut along its diagonals into four triangular
//! regions (North, East, South, West). Every region is reduced to a color
//! signature, and signatures are labeled either by nearest neighbor against a
//! reference catalog or by incremental anchor clustering. The result is a
//! `tile_id north east south west` table for downstream solvers.

#![forbid(unsafe_code)]

/// Input/output operations and error handling
pub mod io;
/// Vector math shared by signatures and matchers
pub mod math;
/// Reference and clustering classifiers
pub mod matching;
/// Directory-level orchestration
pub mod pipeline;
/// Diagonal segmentation of tiles into directional regions
pub mod segmentation;
/// Color signatures of regions
pub mod signature;

pub use io::error::{ExtractionError, Result};
