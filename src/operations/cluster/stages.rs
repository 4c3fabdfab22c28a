use tracing::debug;

use super::state::ClusterRing;
use crate::error::{ConsistencyError, MergeStage, Result};

/// Relative spread below which two neighbouring clusters count as the same
/// size.
pub const SIMILAR_SPREAD: f64 = 0.05;

/// Relative difference `|a - b| / (a + b)` below which neighbours may merge
/// in the small-difference stage.
pub const SMALL_DIFF: f64 = 0.20;

/// Slack added before flooring a rung index, so values sitting exactly on a
/// rung boundary land on the upper rung.
const RUNG_EPSILON: f64 = 1e-9;

/// A chosen merge: `(absorbing, absorbed)` cluster ids.
type Merge = (usize, usize);

/// Orders a pair so the smaller-valued cluster absorbs the other; ties keep
/// the left cluster.
fn toward_smaller(ring: &ClusterRing, left: usize, right: usize) -> Merge {
    if ring.value(right) < ring.value(left) {
        (right, left)
    } else {
        (left, right)
    }
}

/// Repeats the merge chosen by `pick` until it finds none or one cluster
/// remains. Returns the number of merges.
fn run(
    ring: &mut ClusterRing,
    stage: MergeStage,
    mut pick: impl FnMut(&ClusterRing) -> Option<Merge>,
) -> Result<usize> {
    let mut merges = 0;
    while ring.cluster_count() > 1 {
        let Some((absorbing, absorbed)) = pick(ring) else {
            break;
        };
        ring.merge(absorbing, absorbed)?;
        merges += 1;
    }
    debug!(%stage, merges, clusters = ring.cluster_count(), "clustering stage done");
    Ok(merges)
}

/// Neighbours whose spread `(max watermark - min value) / max watermark`
/// is below [`SIMILAR_SPREAD`]; the smallest spread wins.
#[must_use]
pub fn similar_size_candidate(ring: &ClusterRing) -> Option<Merge> {
    let mut best: Option<(f64, Merge)> = None;
    for (a, b) in ring.boundaries() {
        let top = ring.watermark(a).max(ring.watermark(b));
        let spread = (top - ring.value(a).min(ring.value(b))) / top;
        if spread < SIMILAR_SPREAD && best.is_none_or(|(s, _)| spread < s) {
            best = Some((spread, toward_smaller(ring, a, b)));
        }
    }
    best.map(|(_, merge)| merge)
}

/// A singleton next to another cluster. The host is the non-singleton side
/// (or the larger-valued side when both are singletons); the pair with the
/// largest host value wins and the singleton is folded into the host.
///
/// A fold is only offered while the merged cluster stays within
/// [`SMALL_DIFF`]: `(hi - lo) / (hi + lo)` with `hi` the larger of the
/// host's watermark and the singleton, `lo` the merged representative.
/// Measuring against the watermark stops a chain of folds from dragging a
/// plateau down step by step; singletons that fit nowhere are left to the
/// later stages.
#[must_use]
pub fn singles_candidate(ring: &ClusterRing) -> Option<Merge> {
    let mut best: Option<(f64, Merge)> = None;
    for (a, b) in ring.boundaries() {
        let (host, single) = match (ring.count(a) == 1, ring.count(b) == 1) {
            (false, false) => continue,
            (true, false) => (b, a),
            (false, true) => (a, b),
            (true, true) if ring.value(b) > ring.value(a) => (b, a),
            (true, true) => (a, b),
        };
        let lo = ring.value(host).min(ring.value(single));
        let hi = ring.watermark(host).max(ring.value(single));
        if (hi - lo) / (hi + lo) >= SMALL_DIFF {
            continue;
        }
        let key = ring.value(host);
        if best.is_none_or(|(k, _)| key > k) {
            best = Some((key, (host, single)));
        }
    }
    best.map(|(_, merge)| merge)
}

/// Neighbours on the same rung of a geometric ladder spanning the current
/// value range; the pair with the smallest lower value wins.
///
/// The ladder has `max_steps` rungs of ratio
/// `max(min_step, (max / min)^(1 / max_steps))` starting at the global
/// minimum, and is rebuilt on every call.
#[must_use]
#[allow(clippy::float_cmp)]
pub fn small_steps_candidate(ring: &ClusterRing, max_steps: usize, min_step: f64) -> Option<Merge> {
    let (lo, hi) = ring.value_range();
    #[allow(clippy::cast_precision_loss)]
    let natural = (hi / lo).powf(1.0 / max_steps as f64);
    let step_ln = min_step.max(natural).ln();
    let rung = |v: f64| ((v / lo).ln() / step_ln + RUNG_EPSILON).floor();

    let mut best: Option<(f64, Merge)> = None;
    for (a, b) in ring.boundaries() {
        let (va, vb) = (ring.value(a), ring.value(b));
        if rung(va) != rung(vb) {
            continue;
        }
        let low = va.min(vb);
        if best.is_none_or(|(l, _)| low < l) {
            best = Some((low, toward_smaller(ring, a, b)));
        }
    }
    best.map(|(_, merge)| merge)
}

/// Neighbours with `|a - b| / (a + b)` below [`SMALL_DIFF`]; the smallest
/// ratio wins, ties go to the pair with the smaller larger value.
#[must_use]
#[allow(clippy::float_cmp)]
pub fn small_diff_candidate(ring: &ClusterRing) -> Option<Merge> {
    let mut best: Option<(f64, f64, Merge)> = None;
    for (a, b) in ring.boundaries() {
        let (va, vb) = (ring.value(a), ring.value(b));
        let ratio = (va - vb).abs() / (va + vb);
        if ratio >= SMALL_DIFF {
            continue;
        }
        let top = va.max(vb);
        let better = best.is_none_or(|(r, t, _)| ratio < r || (ratio == r && top < t));
        if better {
            best = Some((ratio, top, toward_smaller(ring, a, b)));
        }
    }
    best.map(|(_, _, merge)| merge)
}

/// Unconditional merge of the neighbours with the smallest
/// `|a - b| / min(a, b)`.
#[must_use]
pub fn budget_candidate(ring: &ClusterRing) -> Option<Merge> {
    let mut best: Option<(f64, Merge)> = None;
    for (a, b) in ring.boundaries() {
        let (va, vb) = (ring.value(a), ring.value(b));
        let diff = (va - vb).abs() / va.min(vb);
        if best.is_none_or(|(d, _)| diff < d) {
            best = Some((diff, toward_smaller(ring, a, b)));
        }
    }
    best.map(|(_, merge)| merge)
}

/// Stage 1: merge neighbours of nearly equal size.
///
/// # Errors
///
/// Propagates merge invariant violations.
pub fn similar_size(ring: &mut ClusterRing) -> Result<usize> {
    run(ring, MergeStage::SimilarSize, similar_size_candidate)
}

/// Stage 2: fold singletons into a neighbouring cluster.
///
/// # Errors
///
/// Propagates merge invariant violations.
pub fn singles(ring: &mut ClusterRing) -> Result<usize> {
    run(ring, MergeStage::Singles, singles_candidate)
}

/// Stage 3: merge neighbours that quantize to the same ladder rung.
///
/// # Errors
///
/// Propagates merge invariant violations.
pub fn small_steps(ring: &mut ClusterRing, max_steps: usize, min_step: f64) -> Result<usize> {
    run(ring, MergeStage::SmallSteps, |r| {
        small_steps_candidate(r, max_steps, min_step)
    })
}

/// Stage 4: merge neighbours with a small relative difference.
///
/// # Errors
///
/// Propagates merge invariant violations.
pub fn small_diff(ring: &mut ClusterRing) -> Result<usize> {
    run(ring, MergeStage::SmallDiff, small_diff_candidate)
}

/// Optional last stage: force merges until at most `max_clusters` remain.
///
/// # Errors
///
/// Returns `ConsistencyError::NoMerge` if the budget cannot be met, and
/// propagates merge invariant violations.
pub fn budget(ring: &mut ClusterRing, max_clusters: usize) -> Result<usize> {
    let mut merges = 0;
    while ring.cluster_count() > max_clusters {
        let Some((absorbing, absorbed)) = budget_candidate(ring) else {
            return Err(ConsistencyError::NoMerge {
                stage: MergeStage::Budget,
            }
            .into());
        };
        ring.merge(absorbing, absorbed)?;
        merges += 1;
    }
    debug!(
        stage = %MergeStage::Budget,
        merges,
        clusters = ring.cluster_count(),
        "clustering stage done"
    );
    Ok(merges)
}
