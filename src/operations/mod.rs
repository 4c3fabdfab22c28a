pub mod analysis;
mod capsule_chain;
pub mod cluster;
pub mod emit;
pub mod sampling;
pub mod simplify;

pub use capsule_chain::{CapsuleChain2D, ChainOutput, ChainParams};
