//! Tests for anchor-based incremental clustering

#[cfg(test)]
mod tests {
    use edgemotif::matching::UNMATCHED;
    use edgemotif::matching::cluster::ClusterMatcher;
    use edgemotif::segmentation::Direction;
    use edgemotif::signature::Signature;

    fn sig(values: &[f64]) -> Signature {
        Signature::from_values(values.to_vec())
    }

    // Tests that one repeated signature forms a single cluster
    // Verified by always creating a new cluster
    #[test]
    fn test_same_signature_single_cluster() {
        let mut matcher = ClusterMatcher::new(0.08);
        let signature = sig(&[0.1, 0.2, 0.3]);

        for tile in 0..12 {
            let id = matcher.classify(tile, Direction::North, Some(signature.clone()));
            assert_eq!(id, 0);
        }

        assert_eq!(matcher.clusters().len(), 1);
        assert_eq!(matcher.clusters()[0].len(), 12);
    }

    // Tests that distant signatures form separate clusters
    // Verified by comparing with > instead of <
    #[test]
    fn test_distant_signatures_two_clusters() {
        let mut matcher = ClusterMatcher::new(0.08);
        let a = sig(&[0.0, 0.0]);
        let b = sig(&[0.5, 0.0]);

        assert_eq!(matcher.classify(1, Direction::North, Some(a.clone())), 0);
        assert_eq!(matcher.classify(1, Direction::East, Some(b.clone())), 1);
        assert_eq!(matcher.classify(2, Direction::North, Some(b)), 1);
        assert_eq!(matcher.classify(2, Direction::East, Some(a)), 0);
        assert_eq!(matcher.clusters().len(), 2);
    }

    // Tests that membership uses the anchor, not a drifting centroid
    // Verified by replacing the anchor with the latest member
    #[test]
    fn test_anchor_is_never_recomputed() {
        let mut matcher = ClusterMatcher::new(0.1);

        assert_eq!(matcher.classify(1, Direction::North, Some(sig(&[0.0]))), 0);
        assert_eq!(matcher.classify(1, Direction::East, Some(sig(&[0.09]))), 0);
        // Within threshold of the previous member but not of the anchor
        assert_eq!(matcher.classify(1, Direction::South, Some(sig(&[0.15]))), 1);

        let Some(cluster) = matcher.cluster(0) else {
            unreachable!("cluster 0 exists");
        };
        assert_eq!(cluster.anchor(), &sig(&[0.0]));
        assert_eq!(cluster.members().len(), 2);
    }

    // Tests first-match assignment when several anchors qualify
    // Verified by choosing the nearest anchor instead of the first
    #[test]
    fn test_first_qualifying_cluster_wins() {
        let mut matcher = ClusterMatcher::new(0.5);

        assert_eq!(matcher.classify(1, Direction::North, Some(sig(&[0.0]))), 0);
        assert_eq!(matcher.classify(1, Direction::East, Some(sig(&[0.6]))), 1);
        // 0.45 from cluster 0, 0.15 from cluster 1
        assert_eq!(matcher.classify(1, Direction::South, Some(sig(&[0.45]))), 0);
    }

    // Tests that null signatures are skipped without creating clusters
    // Verified by clustering null signatures as empty vectors
    #[test]
    fn test_null_signature_unmatched() {
        let mut matcher = ClusterMatcher::new(0.08);
        let (id, distance) = matcher.assign(3, Direction::West, None);

        assert_eq!(id, UNMATCHED);
        assert!(distance.is_none());
        assert!(matcher.clusters().is_empty());

        assert_eq!(matcher.classify(3, Direction::North, Some(sig(&[1.0]))), 0);
    }

    // Tests that founders report no distance while joiners report the anchor distance
    // Verified by reporting zero for a new cluster
    #[test]
    fn test_founder_has_no_distance() {
        let mut matcher = ClusterMatcher::new(0.1);

        assert_eq!(matcher.assign(1, Direction::North, Some(sig(&[0.0]))), (0, None));
        let (id, distance) = matcher.assign(1, Direction::East, Some(sig(&[0.05])));
        assert_eq!(id, 0);
        assert!(distance.is_some_and(|d| (d - 0.05).abs() < 1e-12));
        assert_eq!(matcher.assign(1, Direction::South, Some(sig(&[0.9]))), (1, None));
    }

    // Tests that members record their tile and direction in order
    // Verified by prepending members instead of appending
    #[test]
    fn test_members_in_insertion_order() {
        let mut matcher = ClusterMatcher::new(0.08);
        let signature = sig(&[0.3]);
        for (tile, direction) in [(4, Direction::South), (2, Direction::West)] {
            matcher.classify(tile, direction, Some(signature.clone()));
        }

        let members: Vec<_> = matcher.clusters()[0]
            .members()
            .iter()
            .map(|m| (m.tile_id, m.direction))
            .collect();
        assert_eq!(members, vec![(4, Direction::South), (2, Direction::West)]);
        assert!(matcher.cluster(-1).is_none());
        assert!(matcher.cluster(1).is_none());
        assert!((matcher.threshold() - 0.08).abs() < f64::EPSILON);
    }
}
