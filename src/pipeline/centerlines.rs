use super::{load, reconstruct, save, ReconstructionReport};
use crate::config::PipelineConfig;
use crate::document::style::DerivedStyle;
use crate::document::Document;
use crate::error::{Result, TracklineError};
use crate::operations::query::PrincipalAxis;

/// Replaces each closed track shape with its straight centerline.
///
/// # Errors
///
/// Returns an error if the document has no track group or a track path has
/// no path data.
pub fn extract_centerlines(
    doc: &mut Document,
    config: &PipelineConfig,
) -> Result<ReconstructionReport> {
    let style = DerivedStyle {
        stroke_width: config.stroke_width,
        clear_fill: false,
    };
    reconstruct(doc, config, style, |path| {
        let points = path.sample(config.samples);
        let axis = PrincipalAxis::new(&points)
            .execute()
            .map_err(TracklineError::from)?;
        Ok(vec![axis])
    })
}

/// Loads `config.input`, extracts centerlines and writes `config.output`.
///
/// # Errors
///
/// Returns an error if the input cannot be read or parsed, the output cannot
/// be written, or [`extract_centerlines`] fails.
pub fn run_centerlines(config: &PipelineConfig) -> Result<ReconstructionReport> {
    let mut doc = load(&config.input)?;
    let report = extract_centerlines(&mut doc, config)?;
    save(&doc, &config.output)?;
    Ok(report)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::geometry::Path;
    use crate::math::Point2;

    const MAP: &str = r##"<svg xmlns="http://www.w3.org/2000/svg">
  <g id="Track_EW">
    <path id="ew1" d="M0,0 L10,0 L10,2 L0,2 Z" fill="#009645"/>
    <path id="open" d="M0,5 L10,5"/>
  </g>
  <g id="Labels"><path id="label" d="M0,0 L1,0 L1,1 Z"/></g>
</svg>"##;

    #[test]
    fn rectangle_becomes_centerline() {
        let mut doc = Document::parse(MAP).unwrap();
        let config = PipelineConfig::centerlines("in.svg", "out.svg");
        let report = extract_centerlines(&mut doc, &config).unwrap();
        assert_eq!(report.replaced, 1);
        assert_eq!(report.skipped, 1);

        let root = doc.root().unwrap();
        let group = root.find(&|el: &crate::document::Element| el.id() == Some("Track_EW")).unwrap();
        let paths: Vec<_> = group.child_elements().collect();
        assert_eq!(paths.len(), 2);
        let line = paths[0];
        assert_eq!(line.id(), Some("ew1"));
        assert_eq!(line.attr("stroke"), Some("#009645"));
        assert_eq!(line.attr("stroke-width"), Some("4"));
        assert_eq!(line.attr("fill"), Some("#009645"));
        assert_eq!(paths[1].id(), Some("open"));

        let path = Path::from_svg(line.attr("d").unwrap()).unwrap();
        assert_eq!(path.segments().len(), 1);
        let (s, e) = (path.start().unwrap(), path.end().unwrap());
        let (left, right) = if s.x < e.x { (s, e) } else { (e, s) };
        assert!((left - Point2::new(0.0, 1.0)).norm() < 0.1, "left={left}");
        assert!((right - Point2::new(10.0, 1.0)).norm() < 0.1, "right={right}");
    }

    #[test]
    fn groups_without_prefix_are_untouched() {
        let mut doc = Document::parse(MAP).unwrap();
        let config = PipelineConfig::centerlines("in.svg", "out.svg");
        extract_centerlines(&mut doc, &config).unwrap();
        let root = doc.root().unwrap();
        let label = root.find(&|el: &crate::document::Element| el.id() == Some("label")).unwrap();
        assert_eq!(label.attr("d"), Some("M0,0 L1,0 L1,1 Z"));
    }

    #[test]
    fn run_reads_and_writes_files() {
        let dir = std::env::temp_dir().join(format!("trackline-centerlines-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let input = dir.join("map.svg");
        let output = dir.join("map-centerlines.svg");
        std::fs::write(&input, MAP).unwrap();

        let report = run_centerlines(&PipelineConfig::centerlines(&input, &output)).unwrap();
        assert_eq!(report.replaced, 1);
        let written = Document::load(&output).unwrap();
        let root = written.root().unwrap();
        assert!(root.find(&|el: &crate::document::Element| el.attr("stroke-width") == Some("4")).is_some());

        std::fs::remove_dir_all(&dir).unwrap();
    }
}
