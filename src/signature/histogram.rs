//! Per-channel color histograms and moments over a pixel subset

use crate::io::configuration::{CHANNEL_COUNT, MAX_CHANNEL_VALUE};
use ndarray::{Array2, Axis};

/// An 8-bit RGB pixel
pub type Rgb = [u8; 3];

/// Summed channel intensity of a pixel, in 0..=765
pub const fn brightness(pixel: Rgb) -> u32 {
    pixel[0] as u32 + pixel[1] as u32 + pixel[2] as u32
}

/// Bin of an 8-bit value when 0..256 is split into `bins` equal-width bins
pub const fn bin_index(value: u8, bins: usize) -> usize {
    (value as usize * bins) / 256
}

/// Raw counts for the R, G and B channels, concatenated in that order
///
/// The returned vector has `3 * bins` entries.
pub fn channel_histograms(pixels: &[Rgb], bins: usize) -> Vec<f64> {
    let mut counts = vec![0u64; CHANNEL_COUNT * bins];
    for pixel in pixels {
        for (channel, &value) in pixel.iter().enumerate() {
            if let Some(count) = counts.get_mut(channel * bins + bin_index(value, bins)) {
                *count += 1;
            }
        }
    }
    counts.into_iter().map(|c| c as f64).collect()
}

/// Per-channel mean and population standard deviation, scaled into [0, 1]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ChannelMoments {
    /// Mean intensity of each channel divided by 255
    pub mean: [f64; 3],
    /// Standard deviation of each channel divided by 255
    pub std: [f64; 3],
}

impl ChannelMoments {
    /// Compute moments for a non-empty pixel subset; `None` when empty
    pub fn from_pixels(pixels: &[Rgb]) -> Option<Self> {
        let samples = Array2::from_shape_fn((pixels.len(), CHANNEL_COUNT), |(i, c)| {
            pixels
                .get(i)
                .and_then(|pixel| pixel.get(c))
                .copied()
                .map_or(0.0, f64::from)
        });

        let mean = samples.mean_axis(Axis(0))?;
        let std = samples.std_axis(Axis(0), 0.0);

        let mut moments = Self {
            mean: [0.0; 3],
            std: [0.0; 3],
        };
        for c in 0..CHANNEL_COUNT {
            if let (Some(m), Some(&value)) = (moments.mean.get_mut(c), mean.get(c)) {
                *m = value / MAX_CHANNEL_VALUE;
            }
            if let (Some(s), Some(&value)) = (moments.std.get_mut(c), std.get(c)) {
                *s = value / MAX_CHANNEL_VALUE;
            }
        }
        Some(moments)
    }
}
