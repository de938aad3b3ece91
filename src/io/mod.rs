//! Input/output operations, configuration and error handling

/// Tile assignment table and the output file format
pub mod assignment;
/// Command-line interface
pub mod cli;
/// Extraction constants and defaults
pub mod configuration;
/// Error types
pub mod error;
/// Image discovery and decoding
pub mod image;
/// Terminal progress display
pub mod progress;
/// Run summaries and JSON reports
pub mod report;
