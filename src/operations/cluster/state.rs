use tracing::trace;

use crate::error::{ConsistencyError, Result};

/// Cluster membership over a circular sequence of radii.
///
/// Every position starts as its own cluster whose id equals the position.
/// Per-cluster data (`values`, `watermarks`, `counts`) is indexed by id; an
/// id that has been absorbed is never referenced again. Merges only ever
/// join neighbouring clusters, so each cluster stays one contiguous arc of
/// the ring.
#[derive(Debug, Clone)]
pub struct ClusterRing {
    ids: Vec<usize>,
    values: Vec<f64>,
    watermarks: Vec<f64>,
    counts: Vec<usize>,
    clusters: usize,
}

impl ClusterRing {
    /// Creates one singleton cluster per radius.
    #[must_use]
    pub fn new(radii: &[f64]) -> Self {
        Self {
            ids: (0..radii.len()).collect(),
            values: radii.to_vec(),
            watermarks: radii.to_vec(),
            counts: vec![1; radii.len()],
            clusters: radii.len(),
        }
    }

    /// Number of positions in the ring.
    #[must_use]
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// Returns `true` if the ring has no positions.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Number of live clusters.
    #[must_use]
    pub fn cluster_count(&self) -> usize {
        self.clusters
    }

    /// Cluster id at position `i`.
    #[must_use]
    pub fn id(&self, i: usize) -> usize {
        self.ids[i]
    }

    /// Representative value of cluster `id`.
    #[must_use]
    pub fn value(&self, id: usize) -> f64 {
        self.values[id]
    }

    /// Largest value ever folded into cluster `id`.
    #[must_use]
    pub fn watermark(&self, id: usize) -> f64 {
        self.watermarks[id]
    }

    /// Member count of cluster `id`.
    #[must_use]
    pub fn count(&self, id: usize) -> usize {
        self.counts[id]
    }

    /// Pairs `(left_id, right_id)` of neighbouring clusters, in ring order.
    ///
    /// A pair is reported at every position whose cluster differs from the
    /// cluster of the position before it (wrapping at 0). With exactly two
    /// clusters, each is reported once from each side.
    pub fn boundaries(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        let m = self.ids.len();
        (0..m).filter_map(move |i| {
            let left = self.ids[(i + m - 1) % m];
            let right = self.ids[i];
            (left != right).then_some((left, right))
        })
    }

    /// Smallest and largest representative over all live clusters.
    #[must_use]
    pub fn value_range(&self) -> (f64, f64) {
        self.ids
            .iter()
            .map(|&id| self.values[id])
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
                (lo.min(v), hi.max(v))
            })
    }

    /// Folds cluster `absorbed` into cluster `absorbing`.
    ///
    /// The surviving representative is the smaller of the two values, the
    /// watermark the larger of the two watermarks, and member counts add.
    ///
    /// # Errors
    ///
    /// Returns `ConsistencyError::RepresentativeInvariant` if either value is
    /// not finite. Taking the minimum keeps the surviving representative at
    /// or below both pre-merge values for every finite pair.
    pub fn merge(&mut self, absorbing: usize, absorbed: usize) -> Result<()> {
        let kept = self.values[absorbing];
        let folded = self.values[absorbed];
        let merged = kept.min(folded);
        if !kept.is_finite() || !folded.is_finite() {
            return Err(ConsistencyError::RepresentativeInvariant {
                absorbing: kept,
                absorbed: folded,
            }
            .into());
        }

        for id in &mut self.ids {
            if *id == absorbed {
                *id = absorbing;
            }
        }
        self.values[absorbing] = merged;
        self.watermarks[absorbing] = self.watermarks[absorbing].max(self.watermarks[absorbed]);
        self.counts[absorbing] += self.counts[absorbed];
        self.counts[absorbed] = 0;
        self.clusters -= 1;

        trace!(absorbing, absorbed, value = merged, "merged clusters");
        Ok(())
    }

    /// Representative value at every position.
    #[must_use]
    pub fn representatives(&self) -> Vec<f64> {
        self.ids.iter().map(|&id| self.values[id]).collect()
    }

    /// Returns `true` if every cluster occupies one contiguous arc.
    #[must_use]
    pub fn is_contiguous(&self) -> bool {
        if self.clusters <= 1 {
            return true;
        }
        // A contiguous circular partition has exactly one boundary per cluster.
        self.boundaries().count() == self.clusters
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn starts_as_singletons() {
        let ring = ClusterRing::new(&[1.0, 2.0, 3.0]);
        assert_eq!(ring.cluster_count(), 3);
        assert_eq!(ring.boundaries().count(), 3);
        assert_eq!(ring.boundaries().next(), Some((2, 0)));
        assert!(ring.is_contiguous());
    }

    #[test]
    fn merge_keeps_smaller_value_and_larger_watermark() {
        let mut ring = ClusterRing::new(&[1.0, 2.0, 3.0, 4.0]);
        ring.merge(0, 1).unwrap();
        assert_eq!(ring.id(1), 0);
        assert!((ring.value(0) - 1.0).abs() < f64::EPSILON);
        assert!((ring.watermark(0) - 2.0).abs() < f64::EPSILON);
        assert_eq!(ring.count(0), 2);
        assert_eq!(ring.cluster_count(), 3);
        assert_eq!(ring.representatives(), vec![1.0, 1.0, 3.0, 4.0]);
        assert!(ring.is_contiguous());
    }

    #[test]
    fn merge_toward_larger_host_takes_smaller_value() {
        let mut ring = ClusterRing::new(&[1.0, 2.0]);
        ring.merge(1, 0).unwrap();
        assert_eq!(ring.representatives(), vec![1.0, 1.0]);
        assert_eq!(ring.boundaries().count(), 0);
    }

    #[test]
    fn non_finite_value_is_inconsistent() {
        let mut ring = ClusterRing::new(&[1.0, f64::NAN, 3.0]);
        assert!(ring.merge(0, 1).is_err());
        assert_eq!(ring.cluster_count(), 3);
    }

    #[test]
    fn value_range_tracks_live_clusters() {
        let mut ring = ClusterRing::new(&[4.0, 2.0, 3.0]);
        assert_eq!(ring.value_range(), (2.0, 4.0));
        ring.merge(1, 0).unwrap();
        assert_eq!(ring.value_range(), (2.0, 3.0));
    }

    #[test]
    fn two_clusters_report_both_boundaries() {
        let mut ring = ClusterRing::new(&[1.0, 1.0, 5.0, 5.0]);
        ring.merge(0, 1).unwrap();
        ring.merge(2, 3).unwrap();
        let pairs: Vec<_> = ring.boundaries().collect();
        assert_eq!(pairs, vec![(2, 0), (0, 2)]);
        assert!(ring.is_contiguous());
    }
}
