//! Command-line interface for extracting edge motifs from a tile directory

use crate::io::configuration::{
    CLUSTER_OUTPUT_FILE, DEFAULT_CLUSTER_THRESHOLD, DEFAULT_MIN_PIXELS, DEFAULT_REFERENCE_COUNT,
    REFERENCE_OUTPUT_FILE,
};
use crate::io::error::Result;
use crate::pipeline::{ClassificationMode, ExtractionConfig, Orchestrator};
use crate::signature::SignatureConfig;
use clap::{ArgAction, Parser};
use log::info;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "edgemotif")]
#[command(
    author,
    version,
    about = "Classify the edge motifs of edge-matching puzzle tiles"
)]
/// Command-line arguments for the extraction tool
// CLI tools commonly need multiple boolean flags for various features and user preferences
#[allow(clippy::struct_excessive_bools)]
pub struct Cli {
    /// Directory of tile images named by tile id (e.g. 07.png)
    #[arg(value_name = "TILE_DIR")]
    pub tile_dir: PathBuf,

    /// Directory of reference patterns 01.png, 02.png, ...; enables reference mode
    #[arg(short, long, value_name = "DIR")]
    pub references: Option<PathBuf>,

    /// Output file [default: next to TILE_DIR]
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Anchor distance below which regions share a cluster
    #[arg(short, long, default_value_t = DEFAULT_CLUSTER_THRESHOLD)]
    pub threshold: f64,

    /// Histogram bins per channel [default: 8, or 32 with --references]
    #[arg(short, long)]
    pub bins: Option<usize>,

    /// Drop pixels whose summed RGB is at or below SUM [default: off, or 80 with --references]
    #[arg(short = 'x', long, value_name = "SUM")]
    pub exclude: Option<u32>,

    /// Keep dark pixels even with --references
    #[arg(long, conflicts_with = "exclude")]
    pub no_exclude: bool,

    /// Append per-channel standard deviation (always on with --references)
    #[arg(short, long)]
    pub std: bool,

    /// Regions with fewer surviving pixels are left unmatched
    #[arg(short, long, default_value_t = DEFAULT_MIN_PIXELS)]
    pub min_pixels: usize,

    /// Number of reference patterns to look up
    #[arg(long, default_value_t = DEFAULT_REFERENCE_COUNT)]
    pub reference_count: u8,

    /// Write a JSON run report to FILE
    #[arg(long, value_name = "FILE")]
    pub report: Option<PathBuf>,

    /// Extract tiles in parallel
    #[arg(short = 'j', long)]
    pub parallel: bool,

    /// Omit the comment header from the output file
    #[arg(long)]
    pub no_header: bool,

    /// Only log warnings and hide progress
    #[arg(short, long)]
    pub quiet: bool,

    /// Log per-tile and per-cluster detail (-vv for more)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    /// Whether a reference catalog was supplied
    pub const fn reference_mode(&self) -> bool {
        self.references.is_some()
    }

    /// Signature layout after applying mode defaults and explicit flags
    pub fn signature_config(&self) -> SignatureConfig {
        let base = if self.reference_mode() {
            SignatureConfig::reference()
        } else {
            SignatureConfig::clustering()
        };

        let exclusion_threshold = if self.no_exclude {
            None
        } else {
            self.exclude.or(base.exclusion_threshold)
        };

        SignatureConfig {
            bins: self.bins.unwrap_or(base.bins),
            exclusion_threshold,
            include_std: self.std || base.include_std,
            min_pixels: self.min_pixels,
        }
    }

    /// Classification strategy selected by the presence of `--references`
    pub fn mode(&self) -> ClassificationMode {
        match &self.references {
            Some(directory) => ClassificationMode::Reference {
                directory: directory.clone(),
                pattern_count: self.reference_count,
            },
            None => ClassificationMode::Clustering {
                threshold: self.threshold,
            },
        }
    }

    /// Full run configuration
    pub fn extraction_config(&self) -> ExtractionConfig {
        ExtractionConfig {
            signature: self.signature_config(),
            mode: self.mode(),
            parallel: self.parallel,
            show_progress: !self.quiet,
        }
    }

    /// Output path, defaulting to a mode-specific file beside the tile directory
    pub fn output_path(&self) -> PathBuf {
        if let Some(output) = &self.output {
            return output.clone();
        }
        let name = if self.reference_mode() {
            REFERENCE_OUTPUT_FILE
        } else {
            CLUSTER_OUTPUT_FILE
        };
        self.tile_dir
            .parent()
            .map_or_else(|| PathBuf::from(name), |parent| parent.join(name))
    }

    /// Default log filter implied by `--quiet` and `--verbose`
    pub const fn log_filter(&self) -> &'static str {
        if self.quiet {
            return "warn";
        }
        match self.verbose {
            0 => "info",
            1 => "debug",
            _ => "trace",
        }
    }

    /// Run the extraction and write the assignment file and optional report
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid, the tile directory
    /// cannot be listed, or an output file cannot be written
    pub fn run(&self) -> Result<()> {
        let mut orchestrator = Orchestrator::new(self.extraction_config())?;
        let outcome = orchestrator.run(&self.tile_dir)?;
        outcome.report.log_summary();

        let header_lines = if self.no_header {
            Vec::new()
        } else {
            orchestrator.config().header_lines()
        };
        let header: Vec<&str> = header_lines.iter().map(String::as_str).collect();

        let output = self.output_path();
        outcome.assignments.save(&output, &header)?;
        info!(
            "{} tiles written to {}",
            outcome.assignments.len(),
            output.display()
        );

        if let Some(report_path) = &self.report {
            outcome.report.save_json(report_path)?;
            info!("report written to {}", report_path.display());
        }

        Ok(())
    }
}
