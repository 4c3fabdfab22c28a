//! Per-sample differential geometry and rounding radii.

pub mod differential;
pub mod radius_field;
pub mod self_intersection;
