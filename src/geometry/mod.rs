mod control_point;
mod ring;
mod segment;

pub use control_point::ControlPoint;
pub use ring::{DenseRing, Sample, SelectedSample};
pub use segment::Segment;
