//! Batch driver: tile directory in, per-tile pattern assignments out
//!
//! Extraction (decode, segment, signature) is independent per tile and may run
//! in parallel. Classification always runs afterwards, sequentially, in tile id
//! order and N, E, S, W within a tile, so clustering ids never depend on
//! scheduling. Per-file problems are logged and recorded, never fatal.

use crate::io::assignment::{AssignmentTable, PatternAssignment};
use crate::io::configuration::{
    DEFAULT_CLUSTER_THRESHOLD, DEFAULT_REFERENCE_COUNT, MIN_EXPECTED_REFERENCES,
};
use crate::io::error::{ExtractionError, Result, invalid_parameter};
use crate::io::image::{list_image_files, load_rgb_pixels, parse_tile_id};
use crate::io::progress::ProgressManager;
use crate::io::report::{ExtractionReport, SkippedFile};
use crate::matching::cluster::ClusterMatcher;
use crate::matching::reference::{MissingReference, ReferenceCatalog, ReferenceMatcher};
use crate::matching::{Classifier, PatternId};
use crate::segmentation::Direction;
use crate::segmentation::regions::segment;
use crate::signature::extractor::extract_signature;
use crate::signature::{Signature, SignatureConfig};
use log::{debug, info, warn};
use ndarray::Array3;
use rayon::prelude::*;
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

/// How region signatures are turned into pattern ids
#[derive(Clone, Debug, PartialEq)]
pub enum ClassificationMode {
    /// Match against reference images `01.png`..`{pattern_count}.png` in `directory`
    Reference {
        /// Directory holding the reference images
        directory: PathBuf,
        /// Highest reference id looked up
        pattern_count: u8,
    },
    /// Cluster signatures whose anchor distance is below `threshold`
    Clustering {
        /// Anchor distance threshold
        threshold: f64,
    },
}

impl Default for ClassificationMode {
    fn default() -> Self {
        Self::Clustering {
            threshold: DEFAULT_CLUSTER_THRESHOLD,
        }
    }
}

impl ClassificationMode {
    /// Reference mode with the default pattern count
    pub fn reference(directory: impl Into<PathBuf>) -> Self {
        Self::Reference {
            directory: directory.into(),
            pattern_count: DEFAULT_REFERENCE_COUNT,
        }
    }
}

/// Parameters of one extraction run
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ExtractionConfig {
    /// Signature layout shared by tiles and references
    pub signature: SignatureConfig,
    /// Reference matching or clustering
    pub mode: ClassificationMode,
    /// Extract tiles on the rayon thread pool
    pub parallel: bool,
    /// Draw a progress bar on the terminal
    pub show_progress: bool,
}

impl ExtractionConfig {
    /// Comment lines describing the assignment file written for this configuration
    pub fn header_lines(&self) -> Vec<String> {
        let mut lines = vec![
            "Edge motifs extracted from tile images".to_string(),
            "Format: tile_id north east south west".to_string(),
        ];
        match &self.mode {
            ClassificationMode::Reference { pattern_count, .. } => lines.push(format!(
                "0 = border, 1-{pattern_count} = reference patterns, -1 = unmatched"
            )),
            ClassificationMode::Clustering { threshold } => lines.push(format!(
                "Cluster ids from anchor threshold {threshold}, -1 = unmatched"
            )),
        }
        lines
    }

    /// Check every parameter before any file is touched
    ///
    /// # Errors
    ///
    /// Returns an error if the signature layout is invalid, the clustering
    /// threshold is not a positive finite number, or no reference is requested
    pub fn validate(&self) -> Result<()> {
        self.signature.validate()?;
        match &self.mode {
            ClassificationMode::Clustering { threshold } => {
                if !threshold.is_finite() || *threshold <= 0.0 {
                    return Err(invalid_parameter(
                        "threshold",
                        threshold,
                        &"must be a positive finite number",
                    ));
                }
            }
            ClassificationMode::Reference { pattern_count, .. } => {
                if *pattern_count == 0 {
                    return Err(invalid_parameter(
                        "reference_count",
                        pattern_count,
                        &"at least one reference pattern is required",
                    ));
                }
            }
        }
        Ok(())
    }
}

/// Signatures of the four regions of one tile
#[derive(Clone, Debug)]
pub struct TileSignatures {
    /// Tile identifier
    pub tile_id: u32,
    /// Signatures in N, E, S, W order; `None` where too few pixels survived
    pub signatures: [Option<Signature>; 4],
}

/// Segment a decoded tile and extract its four region signatures
pub fn extract_tile_signatures(
    tile_id: u32,
    pixels: &Array3<u8>,
    config: &SignatureConfig,
) -> TileSignatures {
    let (height, width, _) = pixels.dim();
    let masks = segment(height, width);
    let signatures =
        Direction::ALL.map(|direction| extract_signature(pixels, masks.get(direction), config));
    TileSignatures {
        tile_id,
        signatures,
    }
}

/// Assignments of a run plus its summary
#[derive(Clone, Debug)]
pub struct ExtractionOutcome {
    /// Pattern ids per tile
    pub assignments: AssignmentTable,
    /// Skipped files, usage and cluster statistics
    pub report: ExtractionReport,
}

/// Drives segmentation, extraction and classification over a tile directory
pub struct Orchestrator {
    config: ExtractionConfig,
    classifier: Classifier,
    missing_references: Vec<MissingReference>,
    progress: ProgressManager,
}

impl Orchestrator {
    /// Validate the configuration and build the classifier
    ///
    /// In reference mode the catalog is loaded here; unavailable references are
    /// logged and omitted.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid
    pub fn new(config: ExtractionConfig) -> Result<Self> {
        config.validate()?;

        let (classifier, missing_references) = match &config.mode {
            ClassificationMode::Reference {
                directory,
                pattern_count,
            } => {
                let (catalog, missing) =
                    ReferenceCatalog::load_directory(directory, *pattern_count, &config.signature);
                // Border entry is always present, so subtract it before comparing
                let loaded = catalog.len().saturating_sub(1);
                info!(
                    "{loaded} reference patterns loaded from {} (plus border)",
                    directory.display()
                );
                if loaded < MIN_EXPECTED_REFERENCES {
                    warn!("only {loaded} reference patterns loaded");
                }
                (Classifier::Reference(ReferenceMatcher::new(catalog)), missing)
            }
            ClassificationMode::Clustering { threshold } => {
                (Classifier::Cluster(ClusterMatcher::new(*threshold)), Vec::new())
            }
        };

        let progress = if config.show_progress {
            ProgressManager::new()
        } else {
            ProgressManager::hidden()
        };

        Ok(Self {
            config,
            classifier,
            missing_references,
            progress,
        })
    }

    /// Use a prebuilt classifier, e.g. a catalog assembled in memory
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid, the classifier does not
    /// implement the configured mode, or a catalog holds signatures of another
    /// length than the configured layout produces
    pub fn with_classifier(config: ExtractionConfig, classifier: Classifier) -> Result<Self> {
        config.validate()?;

        match (&config.mode, &classifier) {
            (ClassificationMode::Reference { .. }, Classifier::Reference(matcher)) => {
                let expected = config.signature.signature_len();
                let actual = matcher.catalog().signature_len();
                if actual != expected {
                    return Err(ExtractionError::SignatureLength { expected, actual });
                }
            }
            (ClassificationMode::Clustering { .. }, Classifier::Cluster(_)) => {}
            (ClassificationMode::Reference { .. }, Classifier::Cluster(_))
            | (ClassificationMode::Clustering { .. }, Classifier::Reference(_)) => {
                return Err(invalid_parameter(
                    "mode",
                    &classifier.mode_name(),
                    &"classifier does not match the configured classification mode",
                ));
            }
        }

        Ok(Self {
            config,
            classifier,
            missing_references: Vec::new(),
            progress: ProgressManager::hidden(),
        })
    }

    /// The classifier and whatever state it accumulated
    pub const fn classifier(&self) -> &Classifier {
        &self.classifier
    }

    /// Configuration in effect
    pub const fn config(&self) -> &ExtractionConfig {
        &self.config
    }

    /// Process every image in `tile_dir`
    ///
    /// # Errors
    ///
    /// Returns an error only if the directory itself cannot be listed
    pub fn run(&mut self, tile_dir: &Path) -> Result<ExtractionOutcome> {
        let files = list_image_files(tile_dir)?;
        info!(
            "processing {} image files from {}",
            files.len(),
            tile_dir.display()
        );

        let mut skipped = Vec::new();
        let tiles = self.identify_tiles(files, &mut skipped);

        self.progress.initialize(tiles.len());
        let extracted = self.extract_all(&tiles);
        self.progress.finish();

        let mut signatures = Vec::with_capacity(extracted.len());
        for (path, result) in tiles.iter().map(|(_, p)| p).zip(extracted) {
            match result {
                Ok(tile) => signatures.push(tile),
                Err(reason) => {
                    warn!("skipping {}: {reason}", path.display());
                    skipped.push(SkippedFile {
                        path: path.clone(),
                        reason,
                    });
                }
            }
        }

        let (assignments, distances) = self.classify_all(signatures);

        let report = ExtractionReport::new(
            &self.classifier,
            self.config.signature,
            &assignments,
            skipped,
            self.missing_references.clone(),
            &distances,
        );

        Ok(ExtractionOutcome {
            assignments,
            report,
        })
    }

    /// Pair files with tile ids, dropping unparseable names and duplicate ids
    fn identify_tiles(
        &self,
        files: Vec<PathBuf>,
        skipped: &mut Vec<SkippedFile>,
    ) -> Vec<(u32, PathBuf)> {
        let mut seen = BTreeSet::new();
        let mut tiles = Vec::with_capacity(files.len());

        for path in files {
            let reason = match parse_tile_id(&path) {
                Some(tile_id) if seen.insert(tile_id) => {
                    tiles.push((tile_id, path));
                    continue;
                }
                Some(tile_id) => format!("duplicate tile id {tile_id}"),
                None => "filename is not a tile id".to_string(),
            };
            warn!("skipping {}: {reason}", path.display());
            skipped.push(SkippedFile { path, reason });
        }

        // Classification order is tile id order, not filename order ("10" < "2")
        tiles.sort_by_key(|(tile_id, _)| *tile_id);
        debug!(
            "{} tiles identified in {} mode",
            tiles.len(),
            self.classifier.mode_name()
        );
        tiles
    }

    fn extract_all(
        &self,
        tiles: &[(u32, PathBuf)],
    ) -> Vec<std::result::Result<TileSignatures, String>> {
        let extract = |(tile_id, path): &(u32, PathBuf)| {
            let result = self.extract_file(*tile_id, path);
            self.progress.complete_tile(path);
            result
        };

        if self.config.parallel {
            tiles.par_iter().map(extract).collect()
        } else {
            tiles.iter().map(extract).collect()
        }
    }

    fn extract_file(
        &self,
        tile_id: u32,
        path: &Path,
    ) -> std::result::Result<TileSignatures, String> {
        let pixels = load_rgb_pixels(path).map_err(|e| e.to_string())?;
        let (height, width, _) = pixels.dim();
        if height != width {
            warn!("tile {tile_id} is {width}x{height}, not square; regions follow the height");
        }
        Ok(extract_tile_signatures(tile_id, &pixels, &self.config.signature))
    }

    fn classify_all(&mut self, tiles: Vec<TileSignatures>) -> (AssignmentTable, Vec<f64>) {
        let mut assignments = AssignmentTable::new();
        let mut distances = Vec::new();

        for tile in tiles {
            let mut assignment = PatternAssignment::unmatched(tile.tile_id);
            for (direction, signature) in Direction::ALL.into_iter().zip(tile.signatures) {
                let classification = self.classifier.classify(tile.tile_id, direction, signature);
                assignment.set(direction, classification.pattern);
                distances.extend(classification.distance);
            }

            let [n, e, s, w]: [PatternId; 4] = assignment.patterns;
            debug!("tile {:02}: N={n:2} E={e:2} S={s:2} W={w:2}", tile.tile_id);
            assignments.insert(assignment);
        }

        (assignments, distances)
    }
}
