//! Greedy clustering of the selected samples' rounding radii.
//!
//! Each cluster becomes one physical collider, so the clusterer trades a
//! little rounding (values only ever move down) for far fewer clusters.
//! Merges happen in descending priority:
//!
//! ```text
//! similar size : neighbours within 5% of each other
//! singles      : isolated samples folded into a neighbour within 20%
//! small steps  : neighbours on the same rung of a geometric ladder
//! small diff   : neighbours within 20% relative difference
//! budget       : optional forced merges down to a cluster budget
//! ```
//!
//! A stage runs until it finds nothing to merge; earlier stages are not
//! revisited.

mod stages;
mod state;

pub use stages::{
    budget, similar_size, singles, small_diff, small_steps, SIMILAR_SPREAD, SMALL_DIFF,
};
pub use state::ClusterRing;

use tracing::debug;

use crate::error::Result;

/// Parameters of the clustering stages.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClusterParams {
    /// Number of rungs in the small-steps ladder.
    pub max_steps: usize,
    /// Smallest ratio between consecutive rungs.
    pub min_step: f64,
    /// Optional upper bound on the final cluster count.
    pub max_clusters: Option<usize>,
}

/// Final clustering of a circular radius sequence.
#[derive(Debug, Clone, PartialEq)]
pub struct Clustering {
    /// Representative radius for every input position.
    pub radii: Vec<f64>,
    /// Number of distinct clusters.
    pub cluster_count: usize,
}

/// Clusters a circular sequence of radii.
///
/// # Errors
///
/// Returns a `ConsistencyError` if a merge breaks the representative
/// invariant, a singleton cannot be folded, or the cluster budget cannot be
/// met.
pub fn cluster(radii: &[f64], params: &ClusterParams) -> Result<Clustering> {
    let mut ring = ClusterRing::new(radii);

    similar_size(&mut ring)?;
    singles(&mut ring)?;
    small_steps(&mut ring, params.max_steps, params.min_step)?;
    small_diff(&mut ring)?;
    if let Some(max_clusters) = params.max_clusters {
        budget(&mut ring, max_clusters)?;
    }

    debug_assert!(ring.is_contiguous());
    debug!(
        samples = ring.len(),
        clusters = ring.cluster_count(),
        "clustered rounding radii"
    );

    Ok(Clustering {
        radii: ring.representatives(),
        cluster_count: ring.cluster_count(),
    })
}
