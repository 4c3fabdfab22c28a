mod params;

pub use params::ChainParams;

use tracing::{debug, info_span};

use crate::error::Result;
use crate::geometry::{ControlPoint, DenseRing, Segment, SelectedSample};
use crate::operations::analysis::{differential, radius_field, self_intersection};
use crate::operations::cluster::{cluster, ClusterParams};
use crate::operations::emit::emit;
use crate::operations::sampling::{arc_length, curve_sampler};
use crate::operations::simplify::select;

/// Everything produced by one run of [`CapsuleChain2D`].
#[derive(Debug, Clone)]
pub struct ChainOutput {
    /// Uniform-radius chains, one per cluster.
    pub segments: Vec<Segment>,
    /// The fully analysed dense ring, in world units.
    pub ring: DenseRing,
    /// Samples kept by the simplifier.
    pub selected: Vec<SelectedSample>,
    /// Clustered radius of each selected sample.
    pub radii: Vec<f64>,
    /// Number of clusters after merging.
    pub cluster_count: usize,
}

/// Builds variable-radius capsule-chain colliders that hug a closed, thick
/// Bézier curve.
///
/// The curve is sampled densely, displaced outward by its half-thickness,
/// and given a rounding radius per sample that follows the local curvature
/// without letting the rounded border cross another part of the curve.
/// The ring is then simplified to a few representative samples whose radii
/// are merged into as few groups as possible; each group becomes one
/// [`Segment`].
#[derive(Debug)]
pub struct CapsuleChain2D {
    points: Vec<ControlPoint>,
    params: ChainParams,
}

impl CapsuleChain2D {
    /// Creates a new capsule-chain operation.
    #[must_use]
    pub fn new(points: Vec<ControlPoint>, params: ChainParams) -> Self {
        Self { points, params }
    }

    /// Runs the full pipeline.
    ///
    /// # Errors
    ///
    /// Returns `ParameterError` for invalid parameters, `InputError` for
    /// fewer than 3 control points, non-finite input or a curve without
    /// extent, and `ConsistencyError` if clustering or segment emission
    /// breaks one of its invariants.
    pub fn execute(&self) -> Result<ChainOutput> {
        let span = info_span!(
            "capsule_chain",
            control_points = self.points.len(),
            samples_per_segment = self.params.samples_per_segment
        );
        let _enter = span.enter();

        let p = &self.params;
        p.validate()?;

        // Step 1: Sample the curve and lay out its thickness.
        let mut ring = curve_sampler::build(&self.points, p.samples_per_segment)?;
        arc_length::measure(&mut ring)?;
        arc_length::apply_thickness(&mut ring, p.height_offset, &p.world_scale)?;

        // Step 2: Curvature, raw radius, and the self-intersection clamp.
        differential::estimate(&mut ring);
        radius_field::assign(&mut ring, p.min_radius, p.max_radius);
        self_intersection::clamp(&mut ring, p.min_radius, p.max_radius, p.clamp_passes);

        // Step 3: Keep only the samples the shape needs.
        let selected = select(&ring, p.critical_drop, p.min_arc_fraction);

        // Step 4: Merge radii into as few groups as possible.
        let max_radii: Vec<f64> = selected.iter().map(|s| s.max_radius).collect();
        let clustering = cluster(
            &max_radii,
            &ClusterParams {
                max_steps: p.max_steps,
                min_step: p.min_step,
                max_clusters: p.max_clusters,
            },
        )?;

        // Step 5: One segment per run of equal radius.
        let segments = emit(
            &selected,
            &clustering.radii,
            &p.world_scale,
            p.expected_segments,
        )?;

        debug!(
            samples = ring.len(),
            selected = selected.len(),
            clusters = clustering.cluster_count,
            segments = segments.len(),
            "built capsule chain"
        );

        Ok(ChainOutput {
            segments,
            ring,
            selected,
            radii: clustering.radii,
            cluster_count: clustering.cluster_count,
        })
    }
}
