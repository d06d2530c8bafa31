pub mod path;
pub mod segment;

pub use path::Path;
pub use segment::PathSegment;
