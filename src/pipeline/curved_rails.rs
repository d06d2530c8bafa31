use super::{interior_side, load, reconstruct, save, ReconstructionReport};
use crate::config::PipelineConfig;
use crate::document::style::DerivedStyle;
use crate::document::Document;
use crate::error::{Result, SkipReason};
use crate::operations::offset::SegmentOffset;
use crate::operations::query::{RailScoring, SelectRails};

/// Samples of the outline used to determine its winding.
const WINDING_SAMPLES: usize = 200;

/// Replaces each four-segment track shape with two rails that keep its curvature.
///
/// The pair of segments that is long and closest to parallel is chosen, and
/// each is offset `config.offset` into the shape. Curved segments
/// are refitted from `config.samples` displaced points.
///
/// # Errors
///
/// Returns an error if the document has no track group or a track path has
/// no path data.
pub fn extract_curved_rails(
    doc: &mut Document,
    config: &PipelineConfig,
) -> Result<ReconstructionReport> {
    let style = DerivedStyle {
        stroke_width: config.stroke_width,
        clear_fill: true,
    };
    reconstruct(doc, config, style, |path| {
        let segments = path.segments();
        if segments.len() != 4 {
            return Err(SkipReason::SegmentCount(segments.len()));
        }
        let [a, b] = SelectRails::new(segments, RailScoring::LengthAndParallelism).execute()?;
        let distance = interior_side(&path.sample(WINDING_SAMPLES))? * config.offset;

        Ok([a, b]
            .into_iter()
            .map(|i| {
                SegmentOffset::new(segments[i], distance)
                    .with_samples(config.samples)
                    .execute()
            })
            .collect())
    })
}

/// Loads `config.input`, extracts curved rails and writes `config.output`.
///
/// # Errors
///
/// Returns an error if the input cannot be read or parsed, the output cannot
/// be written, or [`extract_curved_rails`] fails.
pub fn run_curved_rails(config: &PipelineConfig) -> Result<ReconstructionReport> {
    let mut doc = load(&config.input)?;
    let report = extract_curved_rails(&mut doc, config)?;
    save(&doc, &config.output)?;
    Ok(report)
}
