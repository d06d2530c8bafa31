use tracing::{debug, info, warn};

use super::{load, save};
use crate::config::OrientConfig;
use crate::document::station::StationLookup;
use crate::document::{Document, Element, Node};
use crate::error::{DocumentError, Result};
use crate::geometry::Path;
use crate::operations::transform::OrientPath;

/// Outcome counts of an orientation run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OrientReport {
    /// Paths whose stations both resolved.
    pub checked: usize,
    /// Paths that were reversed.
    pub reversed: usize,
    /// Paths left alone because a station could not be located.
    pub unresolved: usize,
    /// Paths left alone because their data could not be parsed.
    pub skipped: usize,
}

/// Makes every `FROM-TO` path in the track group start at station `FROM`.
///
/// Each `<path>` child of the group whose id is `FROM-TO` is reversed when
/// its start lies farther from `FROM` than its end does. Paths without such
/// an id are ignored.
///
/// # Errors
///
/// - `DocumentError::TrackGroupNotFound` if no group has the configured id
/// - `DocumentError::MissingPathData` if a station path has no `d`
pub fn orient_paths(doc: &mut Document, config: &OrientConfig) -> Result<OrientReport> {
    let is_track_group =
        |el: &Element| el.local_name() == "g" && el.id() == Some(config.track_group.as_str());

    let root = doc.root().ok_or(DocumentError::NoRootElement)?;
    let group = root
        .find(&is_track_group)
        .ok_or_else(|| DocumentError::TrackGroupNotFound(config.track_group.clone()))?;
    let stations = StationLookup::new(root, &config.station_prefix);

    let mut report = OrientReport::default();
    let mut updates = Vec::new();
    for (index, child) in group.children.iter().enumerate() {
        let Node::Element(el) = child else { continue };
        if el.local_name() != "path" {
            continue;
        }
        let Some((id, (from, to))) = el
            .id()
            .and_then(|id| id.split_once('-').map(|ends| (id, ends)))
        else {
            continue;
        };

        let start = match stations
            .resolve(from)
            .and_then(|start| stations.resolve(to).map(|_| start))
        {
            Ok(start) => start,
            Err(err) => {
                warn!(path = id, "{err}");
                report.unresolved += 1;
                continue;
            }
        };
        let data = el
            .attr("d")
            .filter(|d| !d.trim().is_empty())
            .ok_or_else(|| DocumentError::MissingPathData {
                group: config.track_group.clone(),
            })?;
        let path = match Path::from_svg(data) {
            Ok(path) if !path.is_empty() => path,
            Ok(_) => {
                warn!(path = id, "empty path data");
                report.skipped += 1;
                continue;
            }
            Err(err) => {
                warn!(path = id, "{err}");
                report.skipped += 1;
                continue;
            }
        };

        report.checked += 1;
        if let Some(reversed) = OrientPath::new(&path, start).execute() {
            debug!(path = id, "reversing");
            updates.push((index, reversed.to_svg()));
        }
    }

    report.reversed = updates.len();
    if !updates.is_empty() {
        let group = doc
            .root_mut()
            .and_then(|root| root.find_mut(&is_track_group))
            .ok_or_else(|| DocumentError::TrackGroupNotFound(config.track_group.clone()))?;
        for (index, data) in updates {
            if let Some(Node::Element(el)) = group.children.get_mut(index) {
                el.set_attr("d", data);
            }
        }
    }

    info!(
        checked = report.checked,
        reversed = report.reversed,
        unresolved = report.unresolved,
        skipped = report.skipped,
        "orientation finished"
    );
    Ok(report)
}

/// Loads `config.input`, orients its station paths and writes `config.output`.
///
/// # Errors
///
/// Returns an error if the input cannot be read or parsed, the output cannot
/// be written, or [`orient_paths`] fails.
pub fn run_orient(config: &OrientConfig) -> Result<OrientReport> {
    let mut doc = load(&config.input)?;
    let report = orient_paths(&mut doc, config)?;
    save(&doc, &config.output)?;
    Ok(report)
}
