use tracing::debug;

use super::Element;
use crate::error::LookupError;
use crate::math::Point2;

/// Resolves station names to approximate map positions.
///
/// A station `NAME` is the first `<g id="{prefix}NAME">` in document order.
pub struct StationLookup<'a> {
    root: &'a Element,
    prefix: &'a str,
}

impl<'a> StationLookup<'a> {
    /// Creates a lookup over the document rooted at `root`.
    #[must_use]
    pub fn new(root: &'a Element, prefix: &'a str) -> Self {
        Self { root, prefix }
    }

    /// Returns the position of the named station.
    ///
    /// # Errors
    ///
    /// - `LookupError::StationNotFound` if no group has the station's id
    /// - `LookupError::PositionUnresolved` if the group has no usable geometry
    pub fn resolve(&self, name: &str) -> Result<Point2, LookupError> {
        let id = format!("{}{name}", self.prefix);
        let group = self
            .root
            .find(&|el: &Element| el.local_name() == "g" && el.id() == Some(id.as_str()))
            .ok_or_else(|| LookupError::StationNotFound(name.to_owned()))?;
        station_position(group).ok_or_else(|| LookupError::PositionUnresolved(name.to_owned()))
    }
}

/// Derives a station group's position from its geometry.
///
/// Direct children are scanned in order: the first circle or ellipse with a
/// center, or rectangle with a position (its `x`/`y`, or else a `translate`
/// transform) gives the position; rectangles contribute their center. If no
/// child qualifies, the group's own `translate` transform is used.
#[must_use]
pub fn station_position(group: &Element) -> Option<Point2> {
    for child in group.child_elements() {
        let found = match child.local_name() {
            "circle" | "ellipse" => number(child, "cx").zip(number(child, "cy")),
            "rect" => rect_center(child),
            _ => continue,
        };
        if let Some((x, y)) = found {
            return Some(Point2::new(x, y));
        }
    }
    let position = group
        .attr("transform")
        .and_then(parse_translate)
        .map(|(x, y)| Point2::new(x, y));
    if position.is_none() {
        debug!(group = group.id(), "no geometric child or transform");
    }
    position
}

fn number(el: &Element, name: &str) -> Option<f64> {
    el.attr(name)?.trim().parse().ok()
}

fn rect_center(rect: &Element) -> Option<(f64, f64)> {
    let w = rect.attr("width").map_or(Some(0.0), |_| number(rect, "width"))?;
    let h = rect.attr("height").map_or(Some(0.0), |_| number(rect, "height"))?;
    let origin = number(rect, "x")
        .zip(number(rect, "y"))
        .or_else(|| rect.attr("transform").and_then(parse_translate))?;
    Some((origin.0 + w / 2.0, origin.1 + h / 2.0))
}

/// Extracts the offset of the first `translate(tx [ty])` in a transform list.
///
/// A missing `ty` is zero.
#[must_use]
pub fn parse_translate(transform: &str) -> Option<(f64, f64)> {
    let start = transform.find("translate")? + "translate".len();
    let rest = transform[start..].trim_start().strip_prefix('(')?;
    let args = &rest[..rest.find(')')?];
    let mut values = args
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|s| !s.is_empty())
        .map(str::parse::<f64>);
    let x = values.next()?.ok()?;
    let y = match values.next() {
        Some(v) => v.ok()?,
        None => 0.0,
    };
    if values.next().is_some() {
        return None;
    }
    Some((x, y))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::document::Document;

    const MAP: &str = r#"<svg xmlns="http://www.w3.org/2000/svg">
  <g id="Station-EW1"><text>EW1</text><circle cx="10" cy="20" r="3"/></g>
  <g id="Station-EW2"><ellipse cx="30.5" cy="40" rx="2" ry="1"/></g>
  <g id="Station-NS1"><rect x="100" y="50" width="10" height="4"/></g>
  <g id="Station-NS2"><rect transform="translate(200 60)" width="6" height="2"/></g>
  <g id="Station-NS3" transform="translate(7,8)"><text>NS3</text></g>
  <g id="Station-NS4"><circle r="3"/><rect x="1" y="1"/></g>
  <g id="Station-CC1"><text>CC1</text></g>
</svg>"#;

    fn resolve(name: &str) -> Result<Point2, LookupError> {
        let doc = Document::parse(MAP).unwrap();
        StationLookup::new(doc.root().unwrap(), "Station-").resolve(name)
    }

    #[test]
    fn circle_and_ellipse_centers() {
        assert_eq!(resolve("EW1").unwrap(), Point2::new(10.0, 20.0));
        assert_eq!(resolve("EW2").unwrap(), Point2::new(30.5, 40.0));
    }

    #[test]
    fn rect_center() {
        assert_eq!(resolve("NS1").unwrap(), Point2::new(105.0, 52.0));
        assert_eq!(resolve("NS2").unwrap(), Point2::new(203.0, 61.0));
    }

    #[test]
    fn group_transform_fallback() {
        assert_eq!(resolve("NS3").unwrap(), Point2::new(7.0, 8.0));
    }

    #[test]
    fn skips_child_without_center() {
        assert_eq!(resolve("NS4").unwrap(), Point2::new(1.0, 1.0));
    }

    #[test]
    fn unresolvable_station() {
        assert!(matches!(
            resolve("CC1"),
            Err(LookupError::PositionUnresolved(name)) if name == "CC1"
        ));
    }

    #[test]
    fn missing_station() {
        assert!(matches!(
            resolve("XX9"),
            Err(LookupError::StationNotFound(name)) if name == "XX9"
        ));
    }

    #[test]
    fn translate_forms() {
        assert_eq!(parse_translate("translate(3 4)"), Some((3.0, 4.0)));
        assert_eq!(parse_translate("translate( 3 , -4.5 )"), Some((3.0, -4.5)));
        assert_eq!(parse_translate("scale(2) translate(5)"), Some((5.0, 0.0)));
        assert_eq!(parse_translate("rotate(45)"), None);
        assert_eq!(parse_translate("translate(a b)"), None);
        assert_eq!(parse_translate("translate(1 2 3)"), None);
    }
}
