//! Well-known text serializer.
//!
//! Builds [`wkt`] geometries and renders them through `Display`, giving
//! `LINESTRING` or `MULTILINESTRING` text. When every coordinate of the
//! geometry carries a z ordinate the `Z` variant is written, otherwise z
//! is dropped.

use wkt::Wkt;

use linref::{Coordinate, Line, LinearGeometry};

fn coord_to_wkt(c: Coordinate, has_z: bool) -> wkt::types::Coord<f64> {
    wkt::types::Coord {
        x: c.x,
        y: c.y,
        z: if has_z { c.z } else { None },
        m: None,
    }
}

fn line_to_wkt(line: &Line, has_z: bool) -> wkt::types::LineString<f64> {
    wkt::types::LineString(
        line.coordinates()
            .iter()
            .map(|&c| coord_to_wkt(c, has_z))
            .collect(),
    )
}

/// Convert a linear geometry into a [`Wkt`] value.
#[must_use]
pub fn geometry_to_wkt(geometry: &LinearGeometry) -> Wkt<f64> {
    let has_z = geometry.coordinates().all(|c| c.z.is_some());
    match geometry {
        LinearGeometry::Line(line) => Wkt::LineString(line_to_wkt(line, has_z)),
        LinearGeometry::MultiLine(multi) => Wkt::MultiLineString(wkt::types::MultiLineString(
            multi
                .lines()
                .iter()
                .map(|line| line_to_wkt(line, has_z))
                .collect(),
        )),
    }
}

/// Serialize a linear geometry as WKT.
///
/// # Examples
///
/// ```
/// use linref::{Coordinate, Line, LinearGeometry};
/// use linref_export::to_wkt;
///
/// let line: LinearGeometry = Line::try_new(vec![
///     Coordinate::new(5.0, 0.0),
///     Coordinate::new(10.0, 2.5),
/// ])?
/// .into();
/// assert_eq!(to_wkt(&line), "LINESTRING(5 0,10 2.5)");
/// # Ok::<(), linref::LinearRefError>(())
/// ```
#[must_use]
pub fn to_wkt(geometry: &LinearGeometry) -> String {
    geometry_to_wkt(geometry).to_string()
}
