//! Incremental anchor-based clustering for runs without a reference catalog
//!
//! Every cluster keeps the first signature it ever received as its anchor and
//! never recomputes it. A new signature joins the first cluster, in creation
//! order, whose anchor is closer than the threshold; otherwise it founds a new
//! cluster. Cluster ids are therefore a pure function of the processing order,
//! the set of null signatures skipped, and the threshold.
//!
//! Anchor-only membership can split or merge motifs whose regions vary a lot
//! from tile to tile. It is kept as is; centroid or nearest-member variants
//! would change which ids downstream files see.

use crate::matching::classifier::{PatternId, UNMATCHED};
use crate::segmentation::Direction;
use crate::signature::Signature;

/// One region assigned to a cluster
#[derive(Clone, Debug, PartialEq)]
pub struct ClusterMember {
    /// Tile the region belongs to
    pub tile_id: u32,
    /// Face of the tile
    pub direction: Direction,
    /// Signature of the region
    pub signature: Signature,
}

/// A group of regions sharing one anchor
#[derive(Clone, Debug)]
pub struct Cluster {
    anchor: Signature,
    members: Vec<ClusterMember>,
}

impl Cluster {
    fn new(member: ClusterMember) -> Self {
        Self {
            anchor: member.signature.clone(),
            members: vec![member],
        }
    }

    /// Signature of the founding member
    pub const fn anchor(&self) -> &Signature {
        &self.anchor
    }

    /// Members in insertion order, founder first
    pub fn members(&self) -> &[ClusterMember] {
        &self.members
    }

    /// Number of members
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// Whether the cluster has no members (never true for clusters built here)
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

/// Stateful, order-sensitive classifier; feed it regions in a fixed order
#[derive(Clone, Debug)]
pub struct ClusterMatcher {
    threshold: f64,
    clusters: Vec<Cluster>,
}

impl ClusterMatcher {
    /// Create a matcher with no clusters
    pub const fn new(threshold: f64) -> Self {
        Self {
            threshold,
            clusters: Vec::new(),
        }
    }

    /// Anchor distance below which signatures join a cluster
    pub const fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Clusters in id order
    pub fn clusters(&self) -> &[Cluster] {
        &self.clusters
    }

    /// Cluster with the given id
    pub fn cluster(&self, id: PatternId) -> Option<&Cluster> {
        usize::try_from(id).ok().and_then(|i| self.clusters.get(i))
    }

    /// Assign a region to a cluster, returning the cluster id and anchor distance
    ///
    /// A null signature is not clustered and yields the unmatched sentinel. A
    /// signature that founds a new cluster is its own anchor and reports no
    /// distance.
    pub fn assign(
        &mut self,
        tile_id: u32,
        direction: Direction,
        signature: Option<Signature>,
    ) -> (PatternId, Option<f64>) {
        let Some(signature) = signature else {
            return (UNMATCHED, None);
        };

        let joined = self.clusters.iter().enumerate().find_map(|(id, cluster)| {
            let distance = signature.distance(cluster.anchor());
            (distance < self.threshold).then_some((id, distance))
        });

        let member = ClusterMember {
            tile_id,
            direction,
            signature,
        };

        match joined {
            Some((id, distance)) => {
                if let Some(cluster) = self.clusters.get_mut(id) {
                    cluster.members.push(member);
                }
                (id as PatternId, Some(distance))
            }
            None => {
                let id = self.clusters.len();
                self.clusters.push(Cluster::new(member));
                (id as PatternId, None)
            }
        }
    }

    /// Pattern id for a region; see [`ClusterMatcher::assign`]
    pub fn classify(
        &mut self,
        tile_id: u32,
        direction: Direction,
        signature: Option<Signature>,
    ) -> PatternId {
        self.assign(tile_id, direction, signature).0
    }
}
