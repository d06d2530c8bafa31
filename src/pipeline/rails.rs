use super::{interior_side, load, reconstruct, save, ReconstructionReport};
use crate::config::PipelineConfig;
use crate::document::style::DerivedStyle;
use crate::document::Document;
use crate::error::Result;
use crate::geometry::PathSegment;
use crate::operations::offset::SegmentOffset;
use crate::operations::query::{DetectCorners, RailScoring, SelectRails};

/// Replaces each closed track shape with two straight rails.
///
/// The shape is sampled, four corners are detected, and the two longest of
/// the resulting straight edges are moved `config.offset` into the shape.
///
/// # Errors
///
/// Returns an error if the document has no track group or a track path has
/// no path data.
pub fn extract_rails(doc: &mut Document, config: &PipelineConfig) -> Result<ReconstructionReport> {
    let style = DerivedStyle {
        stroke_width: config.stroke_width,
        clear_fill: true,
    };
    reconstruct(doc, config, style, |path| {
        let points = path.sample(config.samples);
        let corners = DetectCorners::new(&points).execute()?;
        let edges: Vec<PathSegment> = (0..4)
            .map(|k| PathSegment::line(points[corners[k]], points[corners[(k + 1) % 4]]))
            .collect();
        let [a, b] = SelectRails::new(&edges, RailScoring::LengthOnly).execute()?;
        let distance = interior_side(&points)? * config.offset;

        Ok([a, b]
            .into_iter()
            .map(|i| SegmentOffset::new(edges[i], distance).execute())
            .collect())
    })
}

/// Loads `config.input`, extracts straight rails and writes `config.output`.
///
/// # Errors
///
/// Returns an error if the input cannot be read or parsed, the output cannot
/// be written, or [`extract_rails`] fails.
pub fn run_rails(config: &PipelineConfig) -> Result<ReconstructionReport> {
    let mut doc = load(&config.input)?;
    let report = extract_rails(&mut doc, config)?;
    save(&doc, &config.output)?;
    Ok(report)
}
