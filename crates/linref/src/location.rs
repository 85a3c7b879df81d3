//! Linear addresses: points on a linear geometry named by
//! (component, segment, fraction).
//!
//! A [`LinearLocation`] is a plain value. It does not borrow the geometry
//! it was computed against; operations that need the geometry take it as
//! an argument and check the address against it.
//!
//! Addresses are totally ordered lexicographically on
//! `(component_index, segment_index, segment_fraction)`. Two addresses
//! can name the same point without comparing equal: `(c, s, 1.0)` and
//! `(c, s + 1, 0.0)` are the same vertex. [`LinearLocation::normalize`]
//! maps the first form onto the second.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::types::{Coordinate, Line, LinearGeometry, LinearRefError};

/// A point on a linear geometry.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(from = "RawLocation")]
pub struct LinearLocation {
    component_index: usize,
    segment_index: usize,
    segment_fraction: f64,
}

impl LinearLocation {
    /// Create a location. The fraction is clamped into `[0, 1]`; NaN is
    /// kept so that [`validate`](Self::validate) can reject it.
    #[must_use]
    pub const fn new(component_index: usize, segment_index: usize, segment_fraction: f64) -> Self {
        Self {
            component_index,
            segment_index,
            segment_fraction: clamp_fraction(segment_fraction),
        }
    }

    /// The first point of the first component.
    #[must_use]
    pub const fn start() -> Self {
        Self::new(0, 0, 0.0)
    }

    /// The last vertex of the last component of `geometry`.
    #[must_use]
    pub fn end_of(geometry: &LinearGeometry) -> Self {
        let last = geometry.num_components() - 1;
        let segments = geometry.component(last).map_or(0, Line::num_segments);
        Self::new(last, segments, 0.0)
    }

    /// Component index within the geometry.
    #[must_use]
    pub const fn component_index(&self) -> usize {
        self.component_index
    }

    /// Segment index within the component.
    #[must_use]
    pub const fn segment_index(&self) -> usize {
        self.segment_index
    }

    /// Parametric position within the segment.
    #[must_use]
    pub const fn segment_fraction(&self) -> f64 {
        self.segment_fraction
    }

    /// Whether this location is exactly at a vertex.
    ///
    /// A fraction of 1.0 addresses the segment's end vertex, so it counts.
    #[must_use]
    pub fn is_vertex(&self) -> bool {
        self.segment_fraction <= 0.0 || self.segment_fraction >= 1.0
    }

    /// Compare against a location given by its raw fields.
    #[must_use]
    pub fn compare_location_values(
        &self,
        component_index: usize,
        segment_index: usize,
        segment_fraction: f64,
    ) -> Ordering {
        self.component_index
            .cmp(&component_index)
            .then(self.segment_index.cmp(&segment_index))
            .then(self.segment_fraction.total_cmp(&segment_fraction))
    }

    /// Whether `other` lies on the same segment of the same component.
    ///
    /// The end vertex of a segment is treated as lying on it, so
    /// `(c, s, f)` and `(c, s + 1, 0.0)` are on the same segment.
    #[must_use]
    pub fn is_on_same_segment(&self, other: &Self) -> bool {
        if self.component_index != other.component_index {
            return false;
        }
        if self.segment_index == other.segment_index {
            return true;
        }
        let (lo, hi) = if self.segment_index < other.segment_index {
            (self, other)
        } else {
            (other, self)
        };
        hi.segment_index == lo.segment_index + 1 && hi.segment_fraction <= 0.0
    }

    /// Map a fraction of exactly 1.0 onto fraction 0.0 of the next segment.
    ///
    /// The result names the same point and sorts consistently with every
    /// vertex address of the same component.
    #[must_use]
    pub fn normalize(self) -> Self {
        if self.segment_fraction >= 1.0 {
            Self::new(self.component_index, self.segment_index + 1, 0.0)
        } else {
            self
        }
    }

    /// Inverse of [`normalize`](Self::normalize): an address at fraction
    /// 0.0 of segment `s > 0` becomes fraction 1.0 of segment `s - 1`.
    ///
    /// Useful when the caller wants the segment *ending* at a vertex
    /// rather than the one starting there.
    #[must_use]
    pub fn to_lowest(self) -> Self {
        if self.segment_fraction <= 0.0 && self.segment_index > 0 {
            Self::new(self.component_index, self.segment_index - 1, 1.0)
        } else {
            self
        }
    }

    /// Check that this address lies within `geometry`.
    ///
    /// # Errors
    ///
    /// Returns [`LinearRefError::InvalidFraction`] for a NaN fraction,
    /// [`LinearRefError::ComponentOutOfRange`] for a missing component,
    /// and [`LinearRefError::SegmentOutOfRange`] when the segment index
    /// exceeds the component's segment count, or equals it with a
    /// non-zero fraction.
    pub fn validate(&self, geometry: &LinearGeometry) -> Result<(), LinearRefError> {
        if self.segment_fraction.is_nan() {
            return Err(LinearRefError::InvalidFraction(self.segment_fraction));
        }
        let line = self.line(geometry)?;
        let count = line.num_segments();
        if self.segment_index > count || (self.segment_index == count && self.segment_fraction > 0.0)
        {
            return Err(LinearRefError::SegmentOutOfRange {
                component: self.component_index,
                segment: self.segment_index,
                count,
            });
        }
        Ok(())
    }

    /// Whether this address lies within `geometry`.
    #[must_use]
    pub fn is_valid(&self, geometry: &LinearGeometry) -> bool {
        self.validate(geometry).is_ok()
    }

    /// Pull an out-of-range address back onto `geometry`.
    ///
    /// A component past the end clamps to the end of the geometry; a
    /// segment past the end of its component clamps to the component's
    /// last vertex. A NaN fraction becomes 0.0.
    #[must_use]
    pub fn clamp(self, geometry: &LinearGeometry) -> Self {
        if self.component_index >= geometry.num_components() {
            return Self::end_of(geometry);
        }
        let fraction = if self.segment_fraction.is_nan() {
            0.0
        } else {
            self.segment_fraction
        };
        let count = geometry
            .component(self.component_index)
            .map_or(0, Line::num_segments);
        if self.segment_index >= count {
            return Self::new(self.component_index, count, 0.0);
        }
        Self::new(self.component_index, self.segment_index, fraction)
    }

    /// The interpolated coordinate at this address.
    ///
    /// A segment index at the component's last vertex returns that vertex.
    ///
    /// # Errors
    ///
    /// Returns an error if the address is not valid for `geometry`.
    pub fn coordinate(&self, geometry: &LinearGeometry) -> Result<Coordinate, LinearRefError> {
        self.validate(geometry)?;
        let line = self.line(geometry)?;
        let coordinates = line.coordinates();
        let p0 = coordinates[self.segment_index];
        match coordinates.get(self.segment_index + 1) {
            Some(&p1) => Ok(p0.point_along(p1, self.segment_fraction)),
            None => Ok(p0),
        }
    }

    /// Endpoints of the segment this address lies on.
    ///
    /// At a component's last vertex the segment ending there is returned.
    ///
    /// # Errors
    ///
    /// Returns an error if the address is not valid for `geometry`.
    pub fn segment(
        &self,
        geometry: &LinearGeometry,
    ) -> Result<(Coordinate, Coordinate), LinearRefError> {
        self.validate(geometry)?;
        let line = self.line(geometry)?;
        let index = self.segment_index.min(line.num_segments() - 1);
        let coordinates = line.coordinates();
        Ok((coordinates[index], coordinates[index + 1]))
    }

    /// Planar length of the segment this address lies on.
    ///
    /// # Errors
    ///
    /// Returns an error if the address is not valid for `geometry`.
    pub fn segment_length(&self, geometry: &LinearGeometry) -> Result<f64, LinearRefError> {
        let (p0, p1) = self.segment(geometry)?;
        Ok(p0.distance(p1))
    }

    /// Whether this address is the last vertex of its component.
    ///
    /// # Errors
    ///
    /// Returns an error if the address is not valid for `geometry`.
    pub fn is_endpoint(&self, geometry: &LinearGeometry) -> Result<bool, LinearRefError> {
        self.validate(geometry)?;
        let count = self.line(geometry)?.num_segments();
        Ok(self.segment_index >= count
            || (self.segment_index + 1 == count && self.segment_fraction >= 1.0))
    }

    fn line<'a>(&self, geometry: &'a LinearGeometry) -> Result<&'a Line, LinearRefError> {
        geometry
            .component(self.component_index)
            .ok_or(LinearRefError::ComponentOutOfRange {
                component: self.component_index,
                count: geometry.num_components(),
            })
    }
}

/// Serialized form of [`LinearLocation`]; converted through
/// [`LinearLocation::new`] so the fraction is clamped.
#[derive(Deserialize)]
struct RawLocation {
    component_index: usize,
    segment_index: usize,
    segment_fraction: f64,
}

impl From<RawLocation> for LinearLocation {
    fn from(raw: RawLocation) -> Self {
        Self::new(raw.component_index, raw.segment_index, raw.segment_fraction)
    }
}

impl Default for LinearLocation {
    fn default() -> Self {
        Self::start()
    }
}

impl PartialEq for LinearLocation {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for LinearLocation {}

impl PartialOrd for LinearLocation {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for LinearLocation {
    fn cmp(&self, other: &Self) -> Ordering {
        self.compare_location_values(
            other.component_index,
            other.segment_index,
            other.segment_fraction,
        )
    }
}

const fn clamp_fraction(fraction: f64) -> f64 {
    if fraction <= 0.0 {
        0.0
    } else if fraction > 1.0 {
        1.0
    } else {
        fraction
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::types::MultiLine;

    fn line(points: &[(f64, f64)]) -> Line {
        Line::try_new(points.iter().map(|&(x, y)| Coordinate::new(x, y)).collect()).unwrap()
    }

    fn elbow() -> LinearGeometry {
        line(&[(0.0, 0.0), (10.0, 0.0), (10.0, 10.0)]).into()
    }

    fn two_parts() -> LinearGeometry {
        MultiLine::try_new(vec![
            line(&[(0.0, 0.0), (1.0, 0.0)]),
            line(&[(2.0, 0.0), (3.0, 0.0), (3.0, 1.0)]),
        ])
        .unwrap()
        .into()
    }

    #[test]
    fn new_clamps_fraction() {
        assert!((LinearLocation::new(0, 0, -0.5).segment_fraction()).abs() < f64::EPSILON);
        assert!((LinearLocation::new(0, 0, 1.5).segment_fraction() - 1.0).abs() < f64::EPSILON);
        assert!(LinearLocation::new(0, 0, f64::NAN).segment_fraction().is_nan());
    }

    #[test]
    fn ordering_is_lexicographic() {
        let a = LinearLocation::new(0, 5, 0.9);
        let b = LinearLocation::new(1, 0, 0.0);
        let c = LinearLocation::new(1, 0, 0.5);
        let d = LinearLocation::new(1, 1, 0.0);
        assert!(a < b);
        assert!(b < c);
        assert!(c < d);
        let mut sorted = vec![d, b, a, c];
        sorted.sort();
        assert_eq!(sorted, vec![a, b, c, d]);
    }

    #[test]
    fn compare_location_values_matches_ord() {
        let loc = LinearLocation::new(1, 2, 0.25);
        assert_eq!(loc.compare_location_values(1, 2, 0.25), Ordering::Equal);
        assert_eq!(loc.compare_location_values(1, 3, 0.0), Ordering::Less);
        assert_eq!(loc.compare_location_values(0, 9, 0.0), Ordering::Greater);
        assert_eq!(loc.compare_location_values(1, 2, 0.0), Ordering::Greater);
    }

    #[test]
    fn vertex_detection() {
        assert!(LinearLocation::new(0, 1, 0.0).is_vertex());
        assert!(LinearLocation::new(0, 1, 1.0).is_vertex());
        assert!(!LinearLocation::new(0, 1, 0.5).is_vertex());
    }

    #[test]
    fn normalize_moves_full_fraction_to_next_segment() {
        let loc = LinearLocation::new(0, 1, 1.0).normalize();
        assert_eq!(loc, LinearLocation::new(0, 2, 0.0));
        let interior = LinearLocation::new(0, 1, 0.5);
        assert_eq!(interior.normalize(), interior);
    }

    #[test]
    fn to_lowest_inverts_normalize() {
        let loc = LinearLocation::new(0, 2, 0.0);
        assert_eq!(loc.to_lowest(), LinearLocation::new(0, 1, 1.0));
        assert_eq!(loc.to_lowest().normalize(), loc);
        assert_eq!(LinearLocation::start().to_lowest(), LinearLocation::start());
    }

    #[test]
    fn same_segment() {
        let a = LinearLocation::new(0, 1, 0.2);
        assert!(a.is_on_same_segment(&LinearLocation::new(0, 1, 0.9)));
        assert!(a.is_on_same_segment(&LinearLocation::new(0, 2, 0.0)));
        assert!(!a.is_on_same_segment(&LinearLocation::new(0, 2, 0.1)));
        assert!(!a.is_on_same_segment(&LinearLocation::new(1, 1, 0.2)));
    }

    #[test]
    fn coordinate_interpolates() {
        let g = elbow();
        let p = LinearLocation::new(0, 0, 0.5).coordinate(&g).unwrap();
        assert_eq!(p, Coordinate::new(5.0, 0.0));
        let q = LinearLocation::new(0, 1, 0.5).coordinate(&g).unwrap();
        assert_eq!(q, Coordinate::new(10.0, 5.0));
    }

    #[test]
    fn coordinate_at_last_vertex() {
        let g = elbow();
        let end = LinearLocation::end_of(&g);
        assert_eq!(end, LinearLocation::new(0, 2, 0.0));
        assert_eq!(end.coordinate(&g).unwrap(), Coordinate::new(10.0, 10.0));
        let full = LinearLocation::new(0, 1, 1.0);
        assert_eq!(full.coordinate(&g).unwrap(), Coordinate::new(10.0, 10.0));
    }

    #[test]
    fn validate_rejects_out_of_range() {
        let g = two_parts();
        assert_eq!(
            LinearLocation::new(2, 0, 0.0).validate(&g),
            Err(LinearRefError::ComponentOutOfRange {
                component: 2,
                count: 2
            }),
        );
        assert_eq!(
            LinearLocation::new(0, 2, 0.0).validate(&g),
            Err(LinearRefError::SegmentOutOfRange {
                component: 0,
                segment: 2,
                count: 1
            }),
        );
        assert!(LinearLocation::new(0, 1, 0.5).validate(&g).is_err());
        assert!(LinearLocation::new(0, 1, 0.0).is_valid(&g));
        assert!(LinearLocation::new(1, 2, 0.0).is_valid(&g));
        assert!(matches!(
            LinearLocation::new(0, 0, f64::NAN).validate(&g),
            Err(LinearRefError::InvalidFraction(_))
        ));
    }

    #[test]
    fn coordinate_rejects_invalid_address() {
        let g = elbow();
        assert!(LinearLocation::new(0, 7, 0.0).coordinate(&g).is_err());
    }

    #[test]
    fn clamp_pulls_back_onto_geometry() {
        let g = two_parts();
        assert_eq!(
            LinearLocation::new(9, 0, 0.3).clamp(&g),
            LinearLocation::new(1, 2, 0.0),
        );
        assert_eq!(
            LinearLocation::new(0, 5, 0.3).clamp(&g),
            LinearLocation::new(0, 1, 0.0),
        );
        let inside = LinearLocation::new(1, 1, 0.3);
        assert_eq!(inside.clamp(&g), inside);
        assert!(LinearLocation::new(0, 0, f64::NAN).clamp(&g).is_valid(&g));
    }

    #[test]
    fn segment_and_length() {
        let g = elbow();
        let loc = LinearLocation::new(0, 1, 0.25);
        assert_eq!(
            loc.segment(&g).unwrap(),
            (Coordinate::new(10.0, 0.0), Coordinate::new(10.0, 10.0)),
        );
        assert!((loc.segment_length(&g).unwrap() - 10.0).abs() < 1e-12);
        let last = LinearLocation::end_of(&g);
        assert_eq!(
            last.segment(&g).unwrap(),
            (Coordinate::new(10.0, 0.0), Coordinate::new(10.0, 10.0)),
        );
    }

    #[test]
    fn endpoint_detection() {
        let g = two_parts();
        assert!(LinearLocation::new(0, 1, 0.0).is_endpoint(&g).unwrap());
        assert!(LinearLocation::new(0, 0, 1.0).is_endpoint(&g).unwrap());
        assert!(!LinearLocation::new(1, 1, 0.5).is_endpoint(&g).unwrap());
    }

    #[test]
    fn serde_round_trip() {
        let loc = LinearLocation::new(1, 2, 0.25);
        let json = serde_json::to_string(&loc).unwrap();
        let deserialized: LinearLocation = serde_json::from_str(&json).unwrap();
        assert_eq!(loc, deserialized);
    }

    #[test]
    fn deserialize_clamps_fraction() {
        let parse = |fraction: &str| -> LinearLocation {
            serde_json::from_str(&format!(
                r#"{{"component_index":0,"segment_index":1,"segment_fraction":{fraction}}}"#
            ))
            .unwrap()
        };
        assert_eq!(parse("-0.5"), LinearLocation::new(0, 1, 0.0));
        assert_eq!(parse("1.5"), LinearLocation::new(0, 1, 1.0));
    }

    #[test]
    fn deserialized_negative_zero_sorts_with_zero() {
        let loc: LinearLocation = serde_json::from_str(
            r#"{"component_index":0,"segment_index":1,"segment_fraction":-0.0}"#,
        )
        .unwrap();
        assert!(loc.segment_fraction().is_sign_positive());
        assert_eq!(loc, LinearLocation::new(0, 1, 0.0));
        assert!(LinearLocation::new(0, 0, 0.5) < loc);
    }
}
