//! SVG export serializer.
//!
//! Renders a source geometry with an optional extracted section drawn
//! over it, using the [`svg`] crate for document construction, XML
//! escaping, and path data formatting.
//!
//! Each line component becomes a separate `<path>` element using `M`
//! (move to) and `L` (line to) commands. Source and section paths are
//! grouped under `<g id="source">` and `<g id="section">`.
//!
//! Geometry coordinates have y pointing up; SVG has y pointing down. The
//! document frame flips y and shifts everything so the source's bounding
//! box sits `margin` units inside the `viewBox`.
//!
//! This is a pure function with no I/O -- it returns a `String`.

use geo::BoundingRect;
use serde::{Deserialize, Serialize};
use svg::Document;
use svg::node::element::path::Data;
use svg::node::element::{Description, Group, Path, Title};
use svg::node::{Text, Value};

use linref::{Coordinate, Line, LinearGeometry};

/// Metadata to embed in the SVG document.
///
/// Both fields are optional. When present, a `<title>` and/or `<desc>`
/// element is emitted immediately after the opening `<svg>` tag.
#[derive(Debug, Clone, Default)]
pub struct SvgMetadata<'a> {
    /// Document title -- emitted as `<title>`.
    pub title: Option<&'a str>,

    /// Document description -- emitted as `<desc>`.
    ///
    /// Typically the requested start and end locations.
    pub description: Option<&'a str>,
}

/// Stroke styling for [`to_svg`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SvgStyle {
    /// Stroke color of the source geometry.
    pub source_stroke: String,
    /// Stroke width of the source geometry, in geometry units.
    pub source_width: f64,
    /// Stroke color of the extracted section.
    pub section_stroke: String,
    /// Stroke width of the extracted section, in geometry units.
    pub section_width: f64,
    /// Space between the source's bounding box and the document edge.
    pub margin: f64,
}

impl SvgStyle {
    /// Default source stroke color.
    pub const DEFAULT_SOURCE_STROKE: &str = "#999999";
    /// Default source stroke width.
    pub const DEFAULT_SOURCE_WIDTH: f64 = 0.5;
    /// Default section stroke color.
    pub const DEFAULT_SECTION_STROKE: &str = "#ff3333";
    /// Default section stroke width.
    pub const DEFAULT_SECTION_WIDTH: f64 = 1.0;
    /// Default margin.
    pub const DEFAULT_MARGIN: f64 = 1.0;
}

impl Default for SvgStyle {
    fn default() -> Self {
        Self {
            source_stroke: Self::DEFAULT_SOURCE_STROKE.to_owned(),
            source_width: Self::DEFAULT_SOURCE_WIDTH,
            section_stroke: Self::DEFAULT_SECTION_STROKE.to_owned(),
            section_width: Self::DEFAULT_SECTION_WIDTH,
            margin: Self::DEFAULT_MARGIN,
        }
    }
}

/// Mapping from geometry coordinates into the document's `viewBox`.
#[derive(Debug, Clone, Copy)]
struct Frame {
    min_x: f64,
    max_y: f64,
    margin: f64,
    width: f64,
    height: f64,
}

impl Frame {
    fn around(geometry: &LinearGeometry, margin: f64) -> Self {
        let rect = geo::Geometry::from(geometry)
            .bounding_rect()
            .unwrap_or_else(|| {
                let origin = geo::Coord { x: 0.0, y: 0.0 };
                geo::Rect::new(origin, origin)
            });
        Self {
            min_x: rect.min().x,
            max_y: rect.max().y,
            margin,
            width: 2.0f64.mul_add(margin, rect.width()),
            height: 2.0f64.mul_add(margin, rect.height()),
        }
    }

    fn apply(&self, c: Coordinate) -> (f64, f64) {
        (
            c.x - self.min_x + self.margin,
            self.max_y - c.y + self.margin,
        )
    }
}

/// Build an SVG path `d` attribute string from a line, using the line's
/// own coordinates.
///
/// # Examples
///
/// ```
/// use linref::{Coordinate, Line};
/// use linref_export::build_path_data;
///
/// let line = Line::try_new(vec![
///     Coordinate::new(10.0, 20.0),
///     Coordinate::new(30.0, 40.0),
/// ])?;
/// assert_eq!(build_path_data(&line), "M10,20 L30,40");
/// # Ok::<(), linref::LinearRefError>(())
/// ```
#[must_use]
pub fn build_path_data(line: &Line) -> String {
    path_data(line, |c| (c.x, c.y))
}

fn path_data(line: &Line, tx: impl Fn(Coordinate) -> (f64, f64)) -> String {
    let Some((&first, rest)) = line.coordinates().split_first() else {
        return String::new();
    };
    let mut data = Data::new().move_to(tx(first));
    for &c in rest {
        data = data.line_to(tx(c));
    }
    String::from(Value::from(data))
}

fn group(
    id: &str,
    geometry: &LinearGeometry,
    frame: &Frame,
    stroke: &str,
    stroke_width: f64,
) -> Group {
    let mut group = Group::new()
        .set("id", id)
        .set("fill", "none")
        .set("stroke", stroke)
        .set("stroke-width", stroke_width)
        .set("stroke-linecap", "round");
    for line in geometry.components() {
        let d = path_data(line, |c| frame.apply(c));
        group = group.add(Path::new().set("d", d));
    }
    group
}

/// Serialize a source geometry, and optionally a section extracted from
/// it, into an SVG document.
///
/// The `viewBox` is sized to the source geometry. Zero-length section
/// components are drawn with round caps so they show up as dots.
#[must_use]
pub fn to_svg(
    source: &LinearGeometry,
    section: Option<&LinearGeometry>,
    metadata: &SvgMetadata<'_>,
    style: &SvgStyle,
) -> String {
    let frame = Frame::around(source, style.margin);
    let mut doc = Document::new()
        .set("width", frame.width)
        .set("height", frame.height)
        .set("viewBox", (0, 0, frame.width, frame.height));

    if let Some(title) = metadata.title {
        doc = doc.add(Title::new(title));
    }
    if let Some(description) = metadata.description {
        doc = doc.add(Description::new().add(Text::new(description)));
    }

    doc = doc.add(group(
        "source",
        source,
        &frame,
        &style.source_stroke,
        style.source_width,
    ));
    if let Some(section) = section {
        doc = doc.add(group(
            "section",
            section,
            &frame,
            &style.section_stroke,
            style.section_width,
        ));
    }

    // The svg crate omits the XML declaration, so we prepend it.
    format!("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n{doc}\n")
}
