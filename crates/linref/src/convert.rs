//! Conversions between linref types and the [`geo`] crate.
//!
//! `geo` has no z ordinate, so converting to `geo` drops it and
//! converting back yields 2D coordinates. The fallible conversions
//! enforce the same minimums as the linref constructors.

use crate::types::{Coordinate, Line, LinearGeometry, LinearRefError, MultiLine};

impl From<Coordinate> for geo::Coord<f64> {
    fn from(c: Coordinate) -> Self {
        Self { x: c.x, y: c.y }
    }
}

impl From<Coordinate> for geo::Point<f64> {
    fn from(c: Coordinate) -> Self {
        Self::new(c.x, c.y)
    }
}

impl From<geo::Coord<f64>> for Coordinate {
    fn from(c: geo::Coord<f64>) -> Self {
        Self::new(c.x, c.y)
    }
}

impl From<&Line> for geo::LineString<f64> {
    fn from(line: &Line) -> Self {
        line.coordinates()
            .iter()
            .map(|&c| geo::Coord::from(c))
            .collect()
    }
}

impl TryFrom<&geo::LineString<f64>> for Line {
    type Error = LinearRefError;

    fn try_from(line_string: &geo::LineString<f64>) -> Result<Self, Self::Error> {
        Self::try_new(line_string.coords().map(|&c| Coordinate::from(c)).collect())
    }
}

impl From<&MultiLine> for geo::MultiLineString<f64> {
    fn from(multi: &MultiLine) -> Self {
        Self::new(multi.lines().iter().map(geo::LineString::from).collect())
    }
}

impl TryFrom<&geo::MultiLineString<f64>> for MultiLine {
    type Error = LinearRefError;

    fn try_from(multi: &geo::MultiLineString<f64>) -> Result<Self, Self::Error> {
        let lines = multi
            .iter()
            .map(Line::try_from)
            .collect::<Result<Vec<_>, _>>()?;
        Self::try_new(lines)
    }
}

impl From<&LinearGeometry> for geo::Geometry<f64> {
    fn from(geometry: &LinearGeometry) -> Self {
        match geometry {
            LinearGeometry::Line(line) => Self::LineString(line.into()),
            LinearGeometry::MultiLine(multi) => Self::MultiLineString(multi.into()),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn line_to_geo_and_back() {
        let line = Line::try_new(vec![
            Coordinate::new(0.0, 0.0),
            Coordinate::new(1.0, 2.0),
        ])
        .unwrap();
        let line_string = geo::LineString::from(&line);
        assert_eq!(line_string.0.len(), 2);
        assert_eq!(Line::try_from(&line_string).unwrap(), line);
    }

    #[test]
    fn conversion_to_geo_drops_z() {
        let coord = geo::Coord::from(Coordinate::new_3d(1.0, 2.0, 3.0));
        assert_eq!(Coordinate::from(coord), Coordinate::new(1.0, 2.0));
    }

    #[test]
    fn degenerate_geo_line_string_is_rejected() {
        let line_string = geo::LineString::from(vec![(0.0, 0.0)]);
        assert_eq!(
            Line::try_from(&line_string),
            Err(LinearRefError::TooFewPoints { count: 1 }),
        );
    }

    #[test]
    fn empty_geo_multi_line_string_is_rejected() {
        let multi = geo::MultiLineString::<f64>::new(vec![]);
        assert_eq!(MultiLine::try_from(&multi), Err(LinearRefError::EmptyMultiLine));
    }

    #[test]
    fn geometry_to_geo_keeps_kind() {
        let multi = MultiLine::try_new(vec![
            Line::try_new(vec![Coordinate::new(0.0, 0.0), Coordinate::new(1.0, 0.0)]).unwrap(),
            Line::try_new(vec![Coordinate::new(2.0, 0.0), Coordinate::new(3.0, 0.0)]).unwrap(),
        ])
        .unwrap();
        let geometry = geo::Geometry::from(&LinearGeometry::from(multi));
        assert!(matches!(geometry, geo::Geometry::MultiLineString(ref m) if m.0.len() == 2));
    }
}
