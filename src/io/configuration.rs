//! Extraction constants and runtime configuration defaults

// Signature layout
/// Histogram bins per channel when clustering without a catalog
pub const DEFAULT_HISTOGRAM_BINS: usize = 8;
/// Histogram bins per channel when matching against reference patterns
pub const REFERENCE_HISTOGRAM_BINS: usize = 32;
/// Largest useful bin count for 8-bit channels
pub const MAX_HISTOGRAM_BINS: usize = 256;
/// Number of color channels in every tile pixel
pub const CHANNEL_COUNT: usize = 3;
/// Largest 8-bit channel intensity, used to scale mean and std into [0, 1]
pub const MAX_CHANNEL_VALUE: f64 = 255.0;
/// Additive term keeping histogram normalization away from a zero divisor
pub const HISTOGRAM_EPSILON: f64 = 1e-10;

// Pixel filtering
/// Regions with fewer surviving pixels produce no signature
pub const DEFAULT_MIN_PIXELS: usize = 10;
/// Summed RGB (of 765) at or below which a tile pixel counts as background
pub const DEFAULT_EXCLUSION_THRESHOLD: u32 = 80;
/// Summed RGB at or below which a reference image pixel counts as background
pub const REFERENCE_BACKGROUND_THRESHOLD: u32 = 30;

// Classification
/// Anchor distance below which a signature joins an existing cluster
pub const DEFAULT_CLUSTER_THRESHOLD: f64 = 0.08;
/// Number of labeled reference patterns looked up in a reference directory
pub const DEFAULT_REFERENCE_COUNT: u8 = 22;
/// Loading fewer references than this is worth a warning
pub const MIN_EXPECTED_REFERENCES: usize = 10;

// Synthetic border pattern
/// Per-channel mean of the plain puzzle border
pub const BORDER_MEAN: f64 = 0.5;
/// Per-channel standard deviation of the plain puzzle border
pub const BORDER_STD: f64 = 0.05;

// Output settings
/// Assignment file written next to the tile directory in clustering mode
pub const CLUSTER_OUTPUT_FILE: &str = "extracted_pieces.txt";
/// Assignment file written next to the tile directory in reference mode
pub const REFERENCE_OUTPUT_FILE: &str = "extracted_with_templates.txt";
/// Cluster members listed per cluster in summaries
pub const CLUSTER_PREVIEW_MEMBERS: usize = 5;
/// Width of the progress bar in characters
pub const PROGRESS_BAR_WIDTH: u16 = 40;
