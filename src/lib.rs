pub mod config;
pub mod document;
pub mod error;
pub mod geometry;
pub mod math;
pub mod operations;
pub mod pipeline;

pub use error::{Result, TracklineError};
