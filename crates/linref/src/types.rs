//! Shared types for the linref linear-referencing kernel.
//!
//! [`LinearGeometry`] is a closed set of the two geometry kinds that can
//! be referenced by a [`LinearLocation`](crate::LinearLocation): a single
//! [`Line`] or a [`MultiLine`]. Every operation in this crate accepts or
//! returns one of these, so there is no "non-linear geometry" case to
//! handle at runtime.

use geo::{Distance, Euclidean, Length};
use serde::{Deserialize, Serialize};

/// A 2D or 3D coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    /// Horizontal position.
    pub x: f64,
    /// Vertical position.
    pub y: f64,
    /// Optional elevation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub z: Option<f64>,
}

impl Coordinate {
    /// Create a new 2D coordinate.
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y, z: None }
    }

    /// Create a new 3D coordinate.
    #[must_use]
    pub const fn new_3d(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z: Some(z) }
    }

    /// Planar Euclidean distance to another coordinate (z is ignored).
    #[must_use]
    pub fn distance(self, other: Self) -> f64 {
        Euclidean.distance(geo::Point::from(self), geo::Point::from(other))
    }

    /// Point at `fraction` of the way from `self` to `other`.
    ///
    /// Fractions at or below 0 return `self` and fractions at or above 1
    /// return `other` exactly, so vertex coordinates never pick up
    /// rounding error. The z ordinate is interpolated only when both
    /// endpoints carry one.
    #[must_use]
    pub fn point_along(self, other: Self, fraction: f64) -> Self {
        if fraction <= 0.0 {
            return self;
        }
        if fraction >= 1.0 {
            return other;
        }

        let z = match (self.z, other.z) {
            (Some(z0), Some(z1)) => Some(fraction.mul_add(z1 - z0, z0)),
            _ => None,
        };
        Self {
            x: fraction.mul_add(other.x - self.x, self.x),
            y: fraction.mul_add(other.y - self.y, self.y),
            z,
        }
    }
}

/// A single chain of straight segments with at least two coordinates.
///
/// Coincident coordinates are allowed: a two-point line whose points are
/// equal is how a zero-length section is represented.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Coordinate>", into = "Vec<Coordinate>")]
pub struct Line(Vec<Coordinate>);

impl Line {
    /// Create a line from its coordinates.
    ///
    /// # Errors
    ///
    /// Returns [`LinearRefError::TooFewPoints`] if fewer than two
    /// coordinates are given.
    pub fn try_new(coordinates: Vec<Coordinate>) -> Result<Self, LinearRefError> {
        if coordinates.len() < 2 {
            return Err(LinearRefError::TooFewPoints {
                count: coordinates.len(),
            });
        }
        Ok(Self(coordinates))
    }

    /// Number of coordinates. Always at least 2.
    #[must_use]
    pub const fn num_points(&self) -> usize {
        self.0.len()
    }

    /// Number of segments (`num_points - 1`).
    #[must_use]
    pub const fn num_segments(&self) -> usize {
        self.0.len() - 1
    }

    /// Coordinate at `index`, if it exists.
    #[must_use]
    pub fn coordinate(&self, index: usize) -> Option<Coordinate> {
        self.0.get(index).copied()
    }

    /// Returns a slice of all coordinates.
    #[must_use]
    pub fn coordinates(&self) -> &[Coordinate] {
        &self.0
    }

    /// Returns the first coordinate.
    #[must_use]
    pub fn first(&self) -> Coordinate {
        self.0[0]
    }

    /// Returns the last coordinate.
    #[must_use]
    pub fn last(&self) -> Coordinate {
        self.0[self.0.len() - 1]
    }

    /// Planar length of the line.
    #[must_use]
    pub fn length(&self) -> f64 {
        Euclidean.length(&geo::LineString::from(self))
    }

    /// Consume the line and return it with its vertex order reversed.
    #[must_use]
    pub fn reversed(mut self) -> Self {
        self.0.reverse();
        self
    }

    /// Consumes the line and returns the underlying vector of coordinates.
    #[must_use]
    pub fn into_coordinates(self) -> Vec<Coordinate> {
        self.0
    }
}

impl TryFrom<Vec<Coordinate>> for Line {
    type Error = LinearRefError;

    fn try_from(coordinates: Vec<Coordinate>) -> Result<Self, Self::Error> {
        Self::try_new(coordinates)
    }
}

impl From<Line> for Vec<Coordinate> {
    fn from(line: Line) -> Self {
        line.0
    }
}

/// An ordered, non-empty collection of [`Line`] components.
///
/// Components need not touch: a gap between the end of one component and
/// the start of the next is part of the geometry and is preserved by
/// extraction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Line>", into = "Vec<Line>")]
pub struct MultiLine(Vec<Line>);

impl MultiLine {
    /// Create a multi-line from its components.
    ///
    /// # Errors
    ///
    /// Returns [`LinearRefError::EmptyMultiLine`] if `lines` is empty.
    pub fn try_new(lines: Vec<Line>) -> Result<Self, LinearRefError> {
        if lines.is_empty() {
            return Err(LinearRefError::EmptyMultiLine);
        }
        Ok(Self(lines))
    }

    /// Returns a slice of all components.
    #[must_use]
    pub fn lines(&self) -> &[Line] {
        &self.0
    }

    /// Consume the multi-line and return it with every component reversed
    /// and the component order reversed.
    #[must_use]
    pub fn reversed(self) -> Self {
        Self(self.0.into_iter().rev().map(Line::reversed).collect())
    }

    /// Consumes the multi-line and returns its components.
    #[must_use]
    pub fn into_lines(self) -> Vec<Line> {
        self.0
    }
}

impl TryFrom<Vec<Line>> for MultiLine {
    type Error = LinearRefError;

    fn try_from(lines: Vec<Line>) -> Result<Self, Self::Error> {
        Self::try_new(lines)
    }
}

impl From<MultiLine> for Vec<Line> {
    fn from(multi: MultiLine) -> Self {
        multi.0
    }
}

/// A geometry that can be addressed by a [`LinearLocation`](crate::LinearLocation).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum LinearGeometry {
    /// A single component.
    Line(Line),
    /// One or more components, possibly disjoint.
    MultiLine(MultiLine),
}

impl LinearGeometry {
    /// Number of line components (1 for a [`Line`]).
    #[must_use]
    pub fn num_components(&self) -> usize {
        match self {
            Self::Line(_) => 1,
            Self::MultiLine(multi) => multi.lines().len(),
        }
    }

    /// Component at `index`, if it exists.
    #[must_use]
    pub fn component(&self, index: usize) -> Option<&Line> {
        match self {
            Self::Line(line) => (index == 0).then_some(line),
            Self::MultiLine(multi) => multi.lines().get(index),
        }
    }

    /// Iterate over the components in order.
    pub fn components(&self) -> impl Iterator<Item = &Line> {
        let lines = match self {
            Self::Line(line) => std::slice::from_ref(line),
            Self::MultiLine(multi) => multi.lines(),
        };
        lines.iter()
    }

    /// Iterate over every coordinate of every component in order.
    pub fn coordinates(&self) -> impl Iterator<Item = Coordinate> + '_ {
        self.components()
            .flat_map(|line| line.coordinates().iter().copied())
    }

    /// Total number of coordinates across all components.
    #[must_use]
    pub fn num_points(&self) -> usize {
        self.components().map(Line::num_points).sum()
    }

    /// Total planar length across all components. Gaps between
    /// components do not contribute.
    #[must_use]
    pub fn length(&self) -> f64 {
        self.components().map(Line::length).sum()
    }
}

impl From<Line> for LinearGeometry {
    fn from(line: Line) -> Self {
        Self::Line(line)
    }
}

impl From<MultiLine> for LinearGeometry {
    fn from(multi: MultiLine) -> Self {
        Self::MultiLine(multi)
    }
}

/// Errors raised when an address or geometry breaks the contracts of
/// this crate.
///
/// None of these are transient: retrying with the same inputs always
/// produces the same error.
#[derive(Debug, Clone, PartialEq, thiserror::Error, Serialize, Deserialize)]
pub enum LinearRefError {
    /// The address names a component the geometry does not have.
    #[error("component index {component} out of range (geometry has {count} components)")]
    ComponentOutOfRange {
        /// Requested component index.
        component: usize,
        /// Number of components in the geometry.
        count: usize,
    },

    /// The address names a segment past the end of its component.
    #[error(
        "segment index {segment} out of range for component {component} (component has {count} segments)"
    )]
    SegmentOutOfRange {
        /// Component the segment was looked up in.
        component: usize,
        /// Requested segment index.
        segment: usize,
        /// Number of segments in the component.
        count: usize,
    },

    /// The segment fraction is not a number.
    #[error("segment fraction {0} is not a number")]
    InvalidFraction(f64),

    /// A line needs at least two coordinates.
    #[error("a line needs at least 2 points, got {count}")]
    TooFewPoints {
        /// Number of coordinates supplied.
        count: usize,
    },

    /// A multi-line needs at least one component.
    #[error("a multi-line needs at least one component")]
    EmptyMultiLine,

    /// The geometry builder was finalized without producing any component.
    #[error("no line components were produced")]
    EmptyResult,

    /// A single-line operation was given a multi-line.
    #[error("operation requires a single line, got a multi-line")]
    NotSingleLine,

    /// A forward-only operation was given an end location that precedes
    /// its start location.
    #[error("section end precedes its start")]
    ReversedRange,
}
