use tracing::debug;

use crate::geometry::{DenseRing, SelectedSample};

/// Greedily picks the fewest ring samples that still describe the curve.
///
/// Starting from sample 0 as the anchor, the walk advances until a sample
/// drops more than `critical_drop` away from the anchor's tangent line
/// (`|n_a · (p_j - p_a)|`), or, when `min_arc_fraction` is set, until the arc
/// length walked since the anchor exceeds that fraction of the total length.
/// That sample becomes the next anchor. The walk ends when it wraps back to
/// the start.
///
/// The result is strictly increasing, always starts with index 0 and is
/// fully determined by the ring.
#[must_use]
pub fn select(
    ring: &DenseRing,
    critical_drop: f64,
    min_arc_fraction: Option<f64>,
) -> Vec<SelectedSample> {
    let n = ring.len();
    if n == 0 {
        return Vec::new();
    }
    let max_gap = min_arc_fraction.map(|f| f * ring.total_length);

    let mut indices = vec![0_usize];
    let mut anchor = 0_usize;
    loop {
        let a = &ring.samples[anchor];
        let next = (anchor + 1..n).find(|&j| {
            let s = &ring.samples[j];
            let drop = a.normal.dot(&(s.position - a.position)).abs();
            drop > critical_drop || max_gap.is_some_and(|gap| s.arc_length - a.arc_length > gap)
        });
        match next {
            Some(j) => {
                indices.push(j);
                anchor = j;
            }
            None => break,
        }
    }

    debug!(
        ring = n,
        selected = indices.len(),
        critical_drop,
        "simplified dense ring"
    );

    indices
        .into_iter()
        .map(|i| SelectedSample::from(&ring.samples[i]))
        .collect()
}
