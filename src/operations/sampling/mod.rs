//! Dense sampling of the source curve and its arc-length field.

pub mod arc_length;
pub mod curve_sampler;
