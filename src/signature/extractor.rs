//! Fixed-length color signatures for masked tile regions
//!
//! A signature is the L1-normalized concatenation of the three channel
//! histograms, followed by the per-channel mean and, optionally, the
//! per-channel standard deviation. Its length depends only on the
//! configuration: `3 * bins + 3`, plus 3 more when the deviation is included.

use crate::io::configuration::{
    BORDER_MEAN, BORDER_STD, CHANNEL_COUNT, DEFAULT_EXCLUSION_THRESHOLD, DEFAULT_HISTOGRAM_BINS,
    DEFAULT_MIN_PIXELS, HISTOGRAM_EPSILON, MAX_HISTOGRAM_BINS, REFERENCE_HISTOGRAM_BINS,
};
use crate::io::error::{Result, invalid_parameter};
use crate::math::distance::{euclidean_distance, l1_normalize};
use crate::segmentation::RegionMask;
use crate::signature::histogram::{ChannelMoments, Rgb, brightness, channel_histograms};
use ndarray::Array3;
use serde::Serialize;

/// Parameters shared by every signature of one run
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct SignatureConfig {
    /// Histogram bins per channel
    pub bins: usize,
    /// Pixels whose summed RGB is at or below this value are dropped
    pub exclusion_threshold: Option<u32>,
    /// Append per-channel standard deviation to the vector
    pub include_std: bool,
    /// Fewest surviving pixels that still yield a signature
    pub min_pixels: usize,
}

impl Default for SignatureConfig {
    fn default() -> Self {
        Self::clustering()
    }
}

impl SignatureConfig {
    /// Coarse layout used for unsupervised clustering
    pub const fn clustering() -> Self {
        Self {
            bins: DEFAULT_HISTOGRAM_BINS,
            exclusion_threshold: None,
            include_std: false,
            min_pixels: DEFAULT_MIN_PIXELS,
        }
    }

    /// Finer layout used against a reference catalog, ignoring dark separator pixels
    pub const fn reference() -> Self {
        Self {
            bins: REFERENCE_HISTOGRAM_BINS,
            exclusion_threshold: Some(DEFAULT_EXCLUSION_THRESHOLD),
            include_std: true,
            min_pixels: DEFAULT_MIN_PIXELS,
        }
    }

    /// Length of every signature produced with this configuration
    pub const fn signature_len(&self) -> usize {
        let moments = if self.include_std { 2 } else { 1 };
        CHANNEL_COUNT * self.bins + CHANNEL_COUNT * moments
    }

    /// Check that the configuration can produce signatures
    ///
    /// # Errors
    ///
    /// Returns an error if the bin count is zero or exceeds 256
    pub fn validate(&self) -> Result<()> {
        if self.bins == 0 || self.bins > MAX_HISTOGRAM_BINS {
            return Err(invalid_parameter(
                "bins",
                &self.bins,
                &format!("must be between 1 and {MAX_HISTOGRAM_BINS}"),
            ));
        }
        Ok(())
    }
}

/// Numeric descriptor of one region's color distribution
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Signature {
    values: Vec<f64>,
}

impl Signature {
    /// Wrap precomputed values
    pub const fn from_values(values: Vec<f64>) -> Self {
        Self { values }
    }

    /// The synthetic signature of the plain puzzle border
    ///
    /// Uniform histogram, mid-gray mean and a small fixed deviation.
    pub fn border(config: &SignatureConfig) -> Self {
        let histogram_len = CHANNEL_COUNT * config.bins;
        let mut values = vec![1.0 / histogram_len as f64; histogram_len];
        values.extend([BORDER_MEAN; CHANNEL_COUNT]);
        if config.include_std {
            values.extend([BORDER_STD; CHANNEL_COUNT]);
        }
        Self { values }
    }

    /// Signature components
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Number of components
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the signature has no components
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Euclidean distance to another signature of the same configuration
    pub fn distance(&self, other: &Self) -> f64 {
        euclidean_distance(&self.values, &other.values)
    }
}

/// Pixels of `pixels` selected by `mask`, in row-major order
///
/// `pixels` is indexed (row, col, channel) and must have at least three channels.
pub fn masked_pixels(pixels: &Array3<u8>, mask: &RegionMask) -> Vec<Rgb> {
    mask.positions()
        .filter_map(|(row, col)| {
            Some([
                *pixels.get((row, col, 0))?,
                *pixels.get((row, col, 1))?,
                *pixels.get((row, col, 2))?,
            ])
        })
        .collect()
}

/// Signature of a pixel subset, or `None` when too few pixels survive filtering
///
/// Pure function of its inputs: the same pixels and configuration always
/// produce a bit-identical vector.
pub fn signature_from_pixels(pixels: &[Rgb], config: &SignatureConfig) -> Option<Signature> {
    let kept: Vec<Rgb> = match config.exclusion_threshold {
        Some(threshold) => pixels
            .iter()
            .copied()
            .filter(|&pixel| brightness(pixel) > threshold)
            .collect(),
        None => pixels.to_vec(),
    };

    if kept.is_empty() || kept.len() < config.min_pixels {
        return None;
    }

    let mut values = channel_histograms(&kept, config.bins);
    l1_normalize(&mut values, HISTOGRAM_EPSILON);

    let moments = ChannelMoments::from_pixels(&kept)?;
    values.extend(moments.mean);
    if config.include_std {
        values.extend(moments.std);
    }

    Some(Signature { values })
}

/// Signature of the region of a tile selected by `mask`
pub fn extract_signature(
    pixels: &Array3<u8>,
    mask: &RegionMask,
    config: &SignatureConfig,
) -> Option<Signature> {
    signature_from_pixels(&masked_pixels(pixels, mask), config)
}
