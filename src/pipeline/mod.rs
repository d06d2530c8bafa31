//! Batch transforms over a map document.
//!
//! Every reconstruction pipeline walks the groups whose id starts with the
//! track prefix, turns each closed `<path>` child into one or more derived
//! paths, and leaves everything else untouched. A shape that cannot be
//! reconstructed is kept as is; only structural problems with the document
//! abort the run.

mod centerlines;
mod curved_rails;
mod orient;
mod rails;

pub use centerlines::{extract_centerlines, run_centerlines};
pub use curved_rails::{extract_curved_rails, run_curved_rails};
pub use orient::{orient_paths, run_orient, OrientReport};
pub use rails::{extract_rails, run_rails};

use tracing::{debug, info, warn};

use crate::config::PipelineConfig;
use crate::document::style::DerivedStyle;
use crate::document::{Document, Element, Node};
use crate::error::{DocumentError, GeometryError, Result, SkipReason};
use crate::geometry::{Path, PathSegment};
use crate::math::polygon_2d::signed_area;
use crate::math::{Point2, TOLERANCE};

/// Outcome counts of a reconstruction run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReconstructionReport {
    /// Shapes replaced by derived paths.
    pub replaced: usize,
    /// Shapes left untouched.
    pub skipped: usize,
}

/// Replaces every reconstructable track shape in `doc`.
///
/// `build` receives each closed shape and returns the derived segments, one
/// output path per segment. Derived paths get `-rail-N` id suffixes when a
/// shape yields more than one. On error the document is left unmodified.
fn reconstruct<F>(
    doc: &mut Document,
    config: &PipelineConfig,
    style: DerivedStyle,
    build: F,
) -> Result<ReconstructionReport>
where
    F: Fn(&Path) -> std::result::Result<Vec<PathSegment>, SkipReason>,
{
    let root = doc.root_mut().ok_or(DocumentError::NoRootElement)?;
    check_track_groups(root, &config.track_prefix)?;

    let mut report = ReconstructionReport::default();
    let mut groups = 0;
    root.visit_mut(&mut |el: &mut Element| {
        if el.is_group_with_id_prefix(&config.track_prefix) {
            groups += 1;
            reconstruct_group(el, &style, &build, &mut report);
        }
    });

    info!(
        groups,
        replaced = report.replaced,
        skipped = report.skipped,
        "reconstruction finished"
    );
    Ok(report)
}

/// Rejects documents without track groups or with track paths lacking data.
fn check_track_groups(root: &Element, prefix: &str) -> Result<()> {
    if root.find(&|el: &Element| el.is_group_with_id_prefix(prefix)).is_none() {
        return Err(DocumentError::NoTrackGroup(prefix.to_owned()).into());
    }
    let lacks_data = |el: &Element| {
        el.local_name() == "path" && el.attr("d").is_none_or(|d| d.trim().is_empty())
    };
    if let Some(group) = root.find(&|el: &Element| {
        el.is_group_with_id_prefix(prefix) && el.child_elements().any(&lacks_data)
    }) {
        return Err(DocumentError::MissingPathData {
            group: group.id().unwrap_or_default().to_owned(),
        }
        .into());
    }
    Ok(())
}

fn reconstruct_group<F>(
    group: &mut Element,
    style: &DerivedStyle,
    build: &F,
    report: &mut ReconstructionReport,
) where
    F: Fn(&Path) -> std::result::Result<Vec<PathSegment>, SkipReason>,
{
    let group_id = group.id().unwrap_or_default().to_owned();
    let children = std::mem::take(&mut group.children);

    for child in children {
        let shape = match child {
            Node::Element(el) if el.local_name() == "path" => el,
            other => {
                group.children.push(other);
                continue;
            }
        };

        let outcome = Path::from_svg(shape.attr("d").unwrap_or_default())
            .map_err(SkipReason::from)
            .and_then(|path| {
                if path.is_closed() {
                    build(&path)
                } else {
                    Err(SkipReason::NotClosed)
                }
            });

        match outcome {
            Ok(segments) => {
                debug!(group = %group_id, shape = shape.id(), count = segments.len(), "replacing shape");
                let numbered = segments.len() > 1;
                for (i, seg) in segments.into_iter().enumerate() {
                    let suffix = numbered.then(|| format!("-rail-{}", i + 1));
                    let data = Path::new(vec![seg]).to_svg();
                    group
                        .children
                        .push(Node::Element(style.derive(&shape, data, suffix.as_deref())));
                }
                report.replaced += 1;
            }
            Err(reason) => {
                match reason {
                    SkipReason::NotClosed => {
                        debug!(group = %group_id, shape = shape.id(), "skipping open path");
                    }
                    _ => warn!(group = %group_id, shape = shape.id(), "skipping shape: {reason}"),
                }
                report.skipped += 1;
                group.children.push(Node::Element(shape));
            }
        }
    }
}

/// Returns the sign that moves an edge of a closed outline toward its
/// interior when applied to an offset along the edge's +90° normal.
///
/// Edges must run in the outline's own direction. A counter-clockwise
/// outline has its interior on the +90° side.
fn interior_side(outline: &[Point2]) -> Result<f64> {
    let area = signed_area(outline);
    if area.abs() < TOLERANCE {
        return Err(GeometryError::Degenerate("outline encloses no area".to_owned()).into());
    }
    Ok(area.signum())
}

fn load(input: &std::path::Path) -> Result<Document> {
    info!(input = %input.display(), "loading document");
    Document::load(input)
}

fn save(doc: &Document, output: &std::path::Path) -> Result<()> {
    doc.save(output)?;
    info!(output = %output.display(), "document written");
    Ok(())
}
