mod segment_offset;

pub use segment_offset::{SegmentOffset, DEFAULT_CURVE_SAMPLES};
