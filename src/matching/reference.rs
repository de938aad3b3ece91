//! Nearest-neighbor classification against a fixed catalog of labeled motifs

use crate::io::configuration::REFERENCE_BACKGROUND_THRESHOLD;
use crate::io::error::{ExtractionError, Result};
use crate::io::image::{load_rgb_pixels, reference_image_path};
use crate::matching::classifier::{BORDER_PATTERN, PatternId, UNMATCHED};
use crate::segmentation::RegionMask;
use crate::signature::extractor::{Signature, SignatureConfig, extract_signature};
use log::{debug, warn};
use ndarray::Array3;
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// A reference pattern that could not be added to the catalog
#[derive(Clone, Debug, Serialize)]
pub struct MissingReference {
    /// Pattern identifier the file would have provided
    pub id: PatternId,
    /// Expected location of the reference image
    pub path: PathBuf,
    /// Why the entry was omitted
    pub reason: String,
}

/// Labeled signatures keyed by pattern identifier, iterated in ascending id order
#[derive(Clone, Debug)]
pub struct ReferenceCatalog {
    entries: BTreeMap<PatternId, Signature>,
    signature_len: usize,
}

impl ReferenceCatalog {
    /// Create an empty catalog accepting signatures of `config`'s length
    pub const fn new(config: &SignatureConfig) -> Self {
        Self {
            entries: BTreeMap::new(),
            signature_len: config.signature_len(),
        }
    }

    /// Create a catalog holding only the synthetic border pattern under id 0
    pub fn with_border(config: &SignatureConfig) -> Self {
        let mut catalog = Self::new(config);
        catalog
            .entries
            .insert(BORDER_PATTERN, Signature::border(config));
        catalog
    }

    /// Add or replace the signature for `id`
    ///
    /// # Errors
    ///
    /// Returns an error if the signature length differs from the catalog's
    pub fn insert(&mut self, id: PatternId, signature: Signature) -> Result<()> {
        if signature.len() != self.signature_len {
            return Err(ExtractionError::SignatureLength {
                expected: self.signature_len,
                actual: signature.len(),
            });
        }
        self.entries.insert(id, signature);
        Ok(())
    }

    /// Build the border entry plus references `01.png`..`{count}.png` found in `dir`
    ///
    /// Unreadable, missing or too-dark reference images are logged and left out;
    /// they are returned alongside the catalog instead of failing the build.
    pub fn load_directory(
        dir: &Path,
        count: u8,
        config: &SignatureConfig,
    ) -> (Self, Vec<MissingReference>) {
        let mut catalog = Self::with_border(config);
        let mut missing = Vec::new();

        for id in 1..=count {
            let path = reference_image_path(dir, id);
            let pattern = PatternId::from(id);

            let outcome = if path.is_file() {
                load_rgb_pixels(&path).map(|pixels| reference_signature(&pixels, config))
            } else {
                Ok(None)
            };

            let reason = match outcome {
                Ok(Some(signature)) => match catalog.insert(pattern, signature) {
                    Ok(()) => {
                        debug!("reference {id:02}: signature extracted");
                        continue;
                    }
                    Err(e) => e.to_string(),
                },
                Ok(None) if path.is_file() => "too few valid pixels".to_string(),
                Ok(None) => "file not found".to_string(),
                Err(e) => e.to_string(),
            };

            warn!("reference {id:02} omitted ({}): {reason}", path.display());
            missing.push(MissingReference {
                id: pattern,
                path,
                reason,
            });
        }

        (catalog, missing)
    }

    /// Number of entries, border included
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the catalog has no entries
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Length every entry shares
    pub const fn signature_len(&self) -> usize {
        self.signature_len
    }

    /// Signature stored for `id`
    pub fn get(&self, id: PatternId) -> Option<&Signature> {
        self.entries.get(&id)
    }

    /// Pattern identifiers in ascending order
    pub fn ids(&self) -> impl Iterator<Item = PatternId> + '_ {
        self.entries.keys().copied()
    }

    /// Entries in ascending id order
    pub fn iter(&self) -> impl Iterator<Item = (PatternId, &Signature)> {
        self.entries.iter().map(|(&id, signature)| (id, signature))
    }
}

/// Signature of a whole reference image
///
/// Reference images hold a single motif on a black background, so every pixel
/// is considered and only near-black background pixels are dropped.
pub fn reference_signature(pixels: &Array3<u8>, config: &SignatureConfig) -> Option<Signature> {
    let (height, width, _) = pixels.dim();
    let reference_config = SignatureConfig {
        exclusion_threshold: Some(REFERENCE_BACKGROUND_THRESHOLD),
        ..*config
    };
    extract_signature(pixels, &RegionMask::full(height, width), &reference_config)
}

/// Stateless nearest-neighbor matcher over an immutable catalog
#[derive(Clone, Debug)]
pub struct ReferenceMatcher {
    catalog: ReferenceCatalog,
}

impl ReferenceMatcher {
    /// Take ownership of a finished catalog
    pub const fn new(catalog: ReferenceCatalog) -> Self {
        Self { catalog }
    }

    /// The catalog being matched against
    pub const fn catalog(&self) -> &ReferenceCatalog {
        &self.catalog
    }

    /// Closest catalog entry and its distance; ties go to the lowest id
    pub fn best_match(&self, signature: &Signature) -> Option<(PatternId, f64)> {
        let mut best: Option<(PatternId, f64)> = None;
        for (id, reference) in self.catalog.iter() {
            let distance = signature.distance(reference);
            // Strict comparison keeps the earliest (lowest) id on ties
            if best.is_none_or(|(_, best_distance)| distance < best_distance) {
                best = Some((id, distance));
            }
        }
        best
    }

    /// Pattern id for a signature, or the unmatched sentinel for a null signature
    pub fn classify(&self, signature: Option<&Signature>) -> PatternId {
        signature
            .and_then(|sig| self.best_match(sig))
            .map_or(UNMATCHED, |(id, _)| id)
    }
}
