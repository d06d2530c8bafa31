use std::path::PathBuf;

/// Id prefix of the groups holding track shapes.
pub const DEFAULT_TRACK_PREFIX: &str = "Track";

/// Id prefix of station groups (`Station-EW1`).
pub const DEFAULT_STATION_PREFIX: &str = "Station-";

/// Id of the group holding the station-to-station paths to orient.
pub const DEFAULT_TRACK_GROUP: &str = "Track_18";

/// Settings for one reconstruction run (centerlines, rails or curved rails).
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Source document.
    pub input: PathBuf,
    /// Destination document.
    pub output: PathBuf,
    /// Inward displacement of rails. Unused for centerlines.
    pub offset: f64,
    /// Stroke width given to derived paths that have none.
    pub stroke_width: f64,
    /// Groups whose id starts with this prefix are processed.
    pub track_prefix: String,
    /// Number of samples per shape: points for the principal-axis fit,
    /// points for corner detection, or points per curve when refitting
    /// offset curves.
    pub samples: usize,
}

impl PipelineConfig {
    /// Defaults for centerline extraction.
    #[must_use]
    pub fn centerlines(input: impl Into<PathBuf>, output: impl Into<PathBuf>) -> Self {
        Self {
            input: input.into(),
            output: output.into(),
            offset: 0.0,
            stroke_width: 4.0,
            track_prefix: DEFAULT_TRACK_PREFIX.to_owned(),
            samples: 200,
        }
    }

    /// Defaults for straight rail extraction from detected corners.
    #[must_use]
    pub fn rails(input: impl Into<PathBuf>, output: impl Into<PathBuf>) -> Self {
        Self {
            offset: 1.0,
            stroke_width: 2.0,
            samples: 400,
            ..Self::centerlines(input, output)
        }
    }

    /// Defaults for rail extraction from four-segment, possibly curved, shapes.
    #[must_use]
    pub fn curved_rails(input: impl Into<PathBuf>, output: impl Into<PathBuf>) -> Self {
        Self {
            offset: 2.0,
            stroke_width: 3.0,
            samples: 50,
            ..Self::centerlines(input, output)
        }
    }
}

/// Settings for orienting station-to-station track paths.
#[derive(Debug, Clone)]
pub struct OrientConfig {
    /// Source document.
    pub input: PathBuf,
    /// Destination document; may equal `input`.
    pub output: PathBuf,
    /// Id of the group whose `<path id="FROM-TO">` children are oriented.
    pub track_group: String,
    /// Id prefix of station groups.
    pub station_prefix: String,
}

impl OrientConfig {
    /// Creates a config with the default group id and station prefix.
    #[must_use]
    pub fn new(input: impl Into<PathBuf>, output: impl Into<PathBuf>) -> Self {
        Self {
            input: input.into(),
            output: output.into(),
            track_group: DEFAULT_TRACK_GROUP.to_owned(),
            station_prefix: DEFAULT_STATION_PREFIX.to_owned(),
        }
    }
}
