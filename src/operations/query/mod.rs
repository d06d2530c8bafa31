mod corners;
mod principal_axis;
mod rail_pair;

pub use corners::DetectCorners;
pub use principal_axis::PrincipalAxis;
pub use rail_pair::{RailScoring, SelectRails};
