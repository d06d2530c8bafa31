use super::Element;

/// Stroke color used when a shape has neither a stroke nor a usable fill.
pub const DEFAULT_STROKE: &str = "#000";

/// Styling rules for path elements derived from a track shape.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DerivedStyle {
    /// Stroke width applied when the source has none.
    pub stroke_width: f64,
    /// Force `fill="none"` on the derived element.
    pub clear_fill: bool,
}

impl DerivedStyle {
    /// Builds a new `<path>` element from `source`, replacing its geometry.
    ///
    /// The new element has the same qualified name as `source`, `d` as its
    /// first attribute and all other source attributes in order. A missing or
    /// empty stroke falls back to the fill color unless that is `none`, then
    /// to [`DEFAULT_STROKE`]. When `id_suffix` is given it is appended to the
    /// source id.
    #[must_use]
    pub fn derive(&self, source: &Element, data: String, id_suffix: Option<&str>) -> Element {
        let mut el = Element::new(source.name.clone());
        el.attributes.push(("d".to_owned(), data));
        el.attributes.extend(
            source
                .attributes
                .iter()
                .filter(|(k, _)| k != "d")
                .cloned(),
        );

        if source.attr("stroke").is_none_or(str::is_empty) {
            let stroke = source
                .attr("fill")
                .filter(|fill| !fill.is_empty() && !fill.eq_ignore_ascii_case("none"))
                .unwrap_or(DEFAULT_STROKE)
                .to_owned();
            el.set_attr("stroke", stroke);
        }
        if source.attr("stroke-width").is_none() {
            el.set_attr("stroke-width", self.stroke_width.to_string());
        }
        if self.clear_fill {
            el.set_attr("fill", "none");
        }
        if let (Some(id), Some(suffix)) = (source.id(), id_suffix) {
            el.set_attr("id", format!("{id}{suffix}"));
        }
        el
    }
}
