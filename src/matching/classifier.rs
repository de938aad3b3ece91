//! Single classification capability over the reference and clustering strategies

use crate::matching::cluster::ClusterMatcher;
use crate::matching::reference::ReferenceMatcher;
use crate::segmentation::Direction;
use crate::signature::Signature;

/// Motif label written to the assignment file
pub type PatternId = i32;

/// Label for regions that produced no signature or matched nothing
pub const UNMATCHED: PatternId = -1;

/// Label of the synthetic plain-border pattern in reference mode
pub const BORDER_PATTERN: PatternId = 0;

/// Result of classifying one region
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Classification {
    /// Assigned pattern, or [`UNMATCHED`]
    pub pattern: PatternId,
    /// Distance to the winning reference or to the anchor of an existing cluster;
    /// `None` for unmatched regions and for regions that found a new cluster
    pub distance: Option<f64>,
}

impl Classification {
    /// Classification of a region without a signature
    pub const fn unmatched() -> Self {
        Self {
            pattern: UNMATCHED,
            distance: None,
        }
    }
}

/// Strategy chosen by the orchestrator depending on whether a catalog exists
#[derive(Clone, Debug)]
pub enum Classifier {
    /// Nearest neighbor against labeled references
    Reference(ReferenceMatcher),
    /// Incremental anchor clustering
    Cluster(ClusterMatcher),
}

impl Classifier {
    /// Classify one region
    ///
    /// Clustering is order-sensitive, so callers must present regions in tile id
    /// order and N, E, S, W within a tile.
    pub fn classify(
        &mut self,
        tile_id: u32,
        direction: Direction,
        signature: Option<Signature>,
    ) -> Classification {
        match self {
            Self::Reference(matcher) => signature
                .as_ref()
                .and_then(|sig| matcher.best_match(sig))
                .map_or_else(Classification::unmatched, |(pattern, distance)| {
                    Classification {
                        pattern,
                        distance: Some(distance),
                    }
                }),
            Self::Cluster(matcher) => {
                let (pattern, distance) = matcher.assign(tile_id, direction, signature);
                Classification { pattern, distance }
            }
        }
    }

    /// Short name of the active strategy
    pub const fn mode_name(&self) -> &'static str {
        match self {
            Self::Reference(_) => "reference",
            Self::Cluster(_) => "clustering",
        }
    }

    /// Number of distinct patterns currently known
    pub fn pattern_count(&self) -> usize {
        match self {
            Self::Reference(matcher) => matcher.catalog().len(),
            Self::Cluster(matcher) => matcher.clusters().len(),
        }
    }
}
