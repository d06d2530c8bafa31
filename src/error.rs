use std::path::PathBuf;

use thiserror::Error;

/// Top-level error type for track geometry reconstruction.
#[derive(Debug, Error)]
pub enum TracklineError {
    #[error(transparent)]
    Geometry(#[from] GeometryError),

    #[error(transparent)]
    Operation(#[from] OperationError),

    #[error(transparent)]
    Document(#[from] DocumentError),

    #[error(transparent)]
    Lookup(#[from] LookupError),
}

/// Errors related to geometric computations.
#[derive(Debug, Error)]
pub enum GeometryError {
    #[error("at least {required} points are required, got {actual}")]
    InsufficientPoints { required: usize, actual: usize },

    #[error("degenerate geometry: {0}")]
    Degenerate(String),

    #[error("singular value decomposition did not converge")]
    DecompositionFailed,
}

/// Errors related to geometric operations on segments.
#[derive(Debug, Error)]
pub enum OperationError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
}

/// Errors related to reading, writing and interpreting the map document.
#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("failed to access {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed XML: {0}")]
    Xml(#[from] roxmltree::Error),

    #[error("document has no root element")]
    NoRootElement,

    #[error("path element missing 'd' attribute in group {group}")]
    MissingPathData { group: String },

    #[error("invalid path data {data:?}: {message}")]
    InvalidPathData { data: String, message: String },

    #[error("no group with id prefix {0:?} found")]
    NoTrackGroup(String),

    #[error("track group {0:?} not found")]
    TrackGroupNotFound(String),
}

/// Errors raised while resolving station positions.
#[derive(Debug, Error)]
pub enum LookupError {
    #[error("no group found for station {0}")]
    StationNotFound(String),

    #[error("could not resolve a position for station {0}")]
    PositionUnresolved(String),
}

/// Why a track shape was left untransformed.
#[derive(Debug, Error)]
pub enum SkipReason {
    #[error("path is not closed")]
    NotClosed,

    #[error("expected 4 segments, found {0}")]
    SegmentCount(usize),

    #[error(transparent)]
    Failed(#[from] TracklineError),
}

/// Convenience type alias for results using [`TracklineError`].
pub type Result<T> = std::result::Result<T, TracklineError>;
