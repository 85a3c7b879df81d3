//! Ordered traversal of the vertices of a linear geometry.
//!
//! [`LinearIterator`] walks vertices in ascending address order across
//! all components, reporting for each one whether it closes its
//! component. Starting from a [`LinearLocation`] skips every vertex that
//! precedes it: a location strictly inside a segment starts at that
//! segment's end vertex.

use crate::location::LinearLocation;
use crate::types::{Coordinate, Line, LinearGeometry};

/// One vertex visited by a [`LinearIterator`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VertexVisit {
    /// Component the vertex belongs to.
    pub component_index: usize,
    /// Index of the vertex within its component.
    pub vertex_index: usize,
    /// The vertex itself.
    pub coordinate: Coordinate,
    /// Whether this is the last vertex of its component.
    pub is_end_of_line: bool,
}

/// Cursor over the vertices of a [`LinearGeometry`].
///
/// Usable either as a plain [`Iterator`] of [`VertexVisit`]s or as a
/// cursor via [`has_next`](Self::has_next) / [`advance`](Self::advance)
/// and the position accessors.
#[derive(Debug, Clone)]
pub struct LinearIterator<'a> {
    geometry: &'a LinearGeometry,
    component_index: usize,
    vertex_index: usize,
}

impl<'a> LinearIterator<'a> {
    /// Iterate over every vertex of `geometry`.
    #[must_use]
    pub fn new(geometry: &'a LinearGeometry) -> Self {
        Self::from_location(geometry, LinearLocation::start())
    }

    /// Iterate over the vertices of `geometry` at or after `start`.
    #[must_use]
    pub fn from_location(geometry: &'a LinearGeometry, start: LinearLocation) -> Self {
        let vertex_index = if start.segment_fraction() > 0.0 {
            start.segment_index() + 1
        } else {
            start.segment_index()
        };
        let mut iter = Self {
            geometry,
            component_index: start.component_index(),
            vertex_index,
        };
        iter.skip_exhausted_components();
        iter
    }

    /// Whether there is a vertex at the current position.
    #[must_use]
    pub fn has_next(&self) -> bool {
        self.current_line()
            .is_some_and(|line| self.vertex_index < line.num_points())
    }

    /// Move to the next vertex, crossing into the next component when the
    /// current one is exhausted. Does nothing once the traversal is done.
    pub fn advance(&mut self) {
        if !self.has_next() {
            return;
        }
        self.vertex_index += 1;
        self.skip_exhausted_components();
    }

    /// Component of the current vertex.
    #[must_use]
    pub const fn component_index(&self) -> usize {
        self.component_index
    }

    /// Index of the current vertex within its component.
    #[must_use]
    pub const fn vertex_index(&self) -> usize {
        self.vertex_index
    }

    /// Whether the current vertex is the last one of its component.
    #[must_use]
    pub fn is_end_of_line(&self) -> bool {
        self.current_line()
            .is_some_and(|line| self.vertex_index + 1 == line.num_points())
    }

    /// The current vertex, i.e. the start of the segment beginning here.
    #[must_use]
    pub fn segment_start(&self) -> Option<Coordinate> {
        self.current_line()?.coordinate(self.vertex_index)
    }

    /// The vertex after the current one within the same component, if any.
    #[must_use]
    pub fn segment_end(&self) -> Option<Coordinate> {
        self.current_line()?.coordinate(self.vertex_index + 1)
    }

    fn current_line(&self) -> Option<&'a Line> {
        self.geometry.component(self.component_index)
    }

    fn skip_exhausted_components(&mut self) {
        while let Some(line) = self.current_line() {
            if self.vertex_index < line.num_points()
                || self.component_index + 1 >= self.geometry.num_components()
            {
                return;
            }
            self.component_index += 1;
            self.vertex_index = 0;
        }
    }
}

impl Iterator for LinearIterator<'_> {
    type Item = VertexVisit;

    fn next(&mut self) -> Option<Self::Item> {
        let visit = VertexVisit {
            component_index: self.component_index,
            vertex_index: self.vertex_index,
            coordinate: self.segment_start()?,
            is_end_of_line: self.is_end_of_line(),
        };
        self.advance();
        Some(visit)
    }
}
