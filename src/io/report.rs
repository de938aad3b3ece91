//! Run summary: skipped inputs, pattern usage, clusters and match distances

use crate::io::assignment::AssignmentTable;
use crate::io::configuration::CLUSTER_PREVIEW_MEMBERS;
use crate::io::error::{Result, WithPath};
use crate::matching::cluster::{Cluster, ClusterMatcher};
use crate::matching::reference::MissingReference;
use crate::matching::{Classifier, PatternId};
use crate::segmentation::Direction;
use crate::signature::SignatureConfig;
use log::{debug, info, warn};
use serde::Serialize;
use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// An input file that contributed no assignment
#[derive(Clone, Debug, Serialize)]
pub struct SkippedFile {
    /// Path of the file
    pub path: PathBuf,
    /// Why it was skipped
    pub reason: String,
}

/// Size and leading members of one cluster
#[derive(Clone, Debug, Serialize)]
pub struct ClusterSummary {
    /// Cluster id as written to the assignment file
    pub id: PatternId,
    /// Number of regions in the cluster
    pub size: usize,
    /// First members as (tile id, direction)
    pub preview: Vec<(u32, Direction)>,
}

impl ClusterSummary {
    /// Summarize a cluster under the given id
    pub fn from_cluster(id: PatternId, cluster: &Cluster) -> Self {
        Self {
            id,
            size: cluster.len(),
            preview: cluster
                .members()
                .iter()
                .take(CLUSTER_PREVIEW_MEMBERS)
                .map(|m| (m.tile_id, m.direction))
                .collect(),
        }
    }

    /// Summaries of every cluster in id order
    pub fn from_matcher(matcher: &ClusterMatcher) -> Vec<Self> {
        matcher
            .clusters()
            .iter()
            .enumerate()
            .map(|(id, cluster)| Self::from_cluster(id as PatternId, cluster))
            .collect()
    }
}

/// Minimum, mean and maximum of the winning distances of matched regions
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct DistanceStats {
    /// Number of distances summarized
    pub count: usize,
    /// Smallest distance
    pub min: f64,
    /// Arithmetic mean
    pub mean: f64,
    /// Largest distance
    pub max: f64,
}

impl DistanceStats {
    /// Summarize distances; `None` when there are none
    pub fn from_distances(distances: &[f64]) -> Option<Self> {
        if distances.is_empty() {
            return None;
        }
        let min = distances.iter().copied().fold(f64::INFINITY, f64::min);
        let max = distances.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let mean = distances.iter().sum::<f64>() / distances.len() as f64;
        Some(Self {
            count: distances.len(),
            min,
            mean,
            max,
        })
    }
}

/// Everything worth knowing about one extraction run
#[derive(Clone, Debug, Serialize)]
pub struct ExtractionReport {
    /// `reference` or `clustering`
    pub mode: &'static str,
    /// Signature parameters in effect
    pub signature: SignatureConfig,
    /// Length of every signature in the run
    pub signature_len: usize,
    /// Tiles that received an assignment
    pub tiles_processed: usize,
    /// Files skipped with the reason
    pub skipped: Vec<SkippedFile>,
    /// Catalog ids available in reference mode
    pub catalog_ids: Vec<PatternId>,
    /// Reference images left out of the catalog
    pub missing_references: Vec<MissingReference>,
    /// Occurrences of each pattern id, unmatched included
    pub pattern_usage: BTreeMap<PatternId, usize>,
    /// Clusters formed in clustering mode
    pub clusters: Vec<ClusterSummary>,
    /// Winning distances of matched regions; cluster founders are not counted
    pub distances: Option<DistanceStats>,
}

impl ExtractionReport {
    /// Assemble the report once classification has finished
    pub fn new(
        classifier: &Classifier,
        signature: SignatureConfig,
        assignments: &AssignmentTable,
        skipped: Vec<SkippedFile>,
        missing_references: Vec<MissingReference>,
        distances: &[f64],
    ) -> Self {
        let (catalog_ids, clusters) = match classifier {
            Classifier::Reference(matcher) => (matcher.catalog().ids().collect(), Vec::new()),
            Classifier::Cluster(matcher) => (Vec::new(), ClusterSummary::from_matcher(matcher)),
        };

        Self {
            mode: classifier.mode_name(),
            signature,
            signature_len: signature.signature_len(),
            tiles_processed: assignments.len(),
            skipped,
            catalog_ids,
            missing_references,
            pattern_usage: assignments.pattern_usage(),
            clusters,
            distances: DistanceStats::from_distances(distances),
        }
    }

    /// Log the summary: usage at info level, clusters at debug level
    pub fn log_summary(&self) {
        info!(
            "{} mode: {} tiles assigned, {} files skipped",
            self.mode,
            self.tiles_processed,
            self.skipped.len()
        );
        if !self.missing_references.is_empty() {
            warn!(
                "{} reference patterns missing from the catalog",
                self.missing_references.len()
            );
        }
        for (pattern, count) in &self.pattern_usage {
            info!("  pattern {pattern:>3}: {count} occurrences");
        }
        for cluster in &self.clusters {
            let preview: Vec<String> = cluster
                .preview
                .iter()
                .map(|(tile, direction)| format!("{tile}{direction}"))
                .collect();
            let more = if cluster.size > cluster.preview.len() {
                " ..."
            } else {
                ""
            };
            debug!(
                "  cluster {}: {} members [{}{more}]",
                cluster.id,
                cluster.size,
                preview.join(", ")
            );
        }
        if let Some(stats) = &self.distances {
            info!(
                "match distance over {} regions: min {:.4}, mean {:.4}, max {:.4}",
                stats.count, stats.min, stats.mean, stats.max
            );
        }
    }

    /// Write the report as pretty-printed JSON
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be created or serialization fails
    pub fn save_json(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).with_path(parent, "create directory")?;
        }
        let file = File::create(path).with_path(path, "create file")?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, self).with_path(path, "serialize report")?;
        writer.flush().with_path(path, "write report")?;
        Ok(())
    }
}
