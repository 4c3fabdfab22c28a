//! Variable-radius capsule-chain colliders for closed, thick 2D Bézier
//! curves.
//!
//! [`CapsuleChain2D`] samples the curve, derives a rounding radius per
//! sample that never lets the rounded border cross the curve elsewhere,
//! keeps only the samples the shape needs, and merges their radii into as
//! few uniform-radius [`Segment`]s as possible.

pub mod error;
pub mod geometry;
pub mod math;
pub mod operations;

pub use error::{Result, RoundchainError};
pub use geometry::{ControlPoint, Segment};
pub use operations::{CapsuleChain2D, ChainOutput, ChainParams};
