//! Section extraction: the sub-path of a linear geometry between two
//! [`LinearLocation`]s.
//!
//! The result always runs from the caller's `start` toward the caller's
//! `end`. When `end` precedes `start` the forward section over
//! `[end, start]` is computed and then reversed, so asking for a section
//! "backwards" yields the exact reverse of the forward section.
//!
//! Sections are freshly allocated and never share storage with the
//! source. Disjoint source components stay disjoint in the output: a
//! section spanning a gap between components is a [`MultiLine`].
//!
//! [`MultiLine`]: crate::MultiLine

use log::debug;

use crate::builder::{BuilderConfig, LinearGeometryBuilder};
use crate::iterator::LinearIterator;
use crate::location::LinearLocation;
use crate::types::{Coordinate, Line, LinearGeometry, LinearRefError};

/// Extract the section of `geometry` between `start` and `end`.
///
/// # Errors
///
/// Returns an error if either location is not valid for `geometry`.
///
/// # Examples
///
/// ```
/// use linref::{Coordinate, Line, LinearGeometry, LinearLocation, extract};
///
/// let route: LinearGeometry = Line::try_new(vec![
///     Coordinate::new(0.0, 0.0),
///     Coordinate::new(10.0, 0.0),
///     Coordinate::new(10.0, 10.0),
/// ])?
/// .into();
///
/// let section = extract(
///     &route,
///     LinearLocation::new(0, 0, 0.5),
///     LinearLocation::new(0, 1, 0.5),
/// )?;
/// let coords: Vec<_> = section.coordinates().collect();
/// assert_eq!(
///     coords,
///     vec![
///         Coordinate::new(5.0, 0.0),
///         Coordinate::new(10.0, 0.0),
///         Coordinate::new(10.0, 5.0),
///     ],
/// );
/// # Ok::<(), linref::LinearRefError>(())
/// ```
pub fn extract(
    geometry: &LinearGeometry,
    start: LinearLocation,
    end: LinearLocation,
) -> Result<LinearGeometry, LinearRefError> {
    LineExtractor::new(geometry).extract(start, end)
}

/// Reverse the direction of a linear geometry.
///
/// A [`Line`] has its vertex order reversed. A multi-line has each
/// component reversed and the component order reversed, so the whole
/// path is traversed backwards.
#[must_use]
pub fn reverse(linear: LinearGeometry) -> LinearGeometry {
    match linear {
        LinearGeometry::Line(line) => LinearGeometry::Line(line.reversed()),
        LinearGeometry::MultiLine(multi) => LinearGeometry::MultiLine(multi.reversed()),
    }
}

/// Extracts sections of a fixed geometry.
#[derive(Debug, Clone, Copy)]
pub struct LineExtractor<'a> {
    geometry: &'a LinearGeometry,
}

impl<'a> LineExtractor<'a> {
    /// Bind an extractor to `geometry`.
    #[must_use]
    pub const fn new(geometry: &'a LinearGeometry) -> Self {
        Self { geometry }
    }

    /// The geometry sections are extracted from.
    #[must_use]
    pub const fn geometry(&self) -> &'a LinearGeometry {
        self.geometry
    }

    /// Extract the section between `start` and `end`, in that direction.
    ///
    /// # Errors
    ///
    /// Returns an error if either location is not valid for the geometry.
    pub fn extract(
        &self,
        start: LinearLocation,
        end: LinearLocation,
    ) -> Result<LinearGeometry, LinearRefError> {
        let (start, end) = self.prepare(start, end)?;
        if end < start {
            debug!("extracting reversed section {end:?}..{start:?}");
            return Ok(reverse(self.forward_linear(end, start)?));
        }
        debug!("extracting section {start:?}..{end:?}");
        self.forward_linear(start, end)
    }

    /// Extract the section between `start` and `end` from a single-line
    /// geometry by slicing its coordinates directly.
    ///
    /// # Errors
    ///
    /// Returns [`LinearRefError::NotSingleLine`] for a multi-line, or an
    /// error if either location is not valid for the geometry.
    pub fn extract_line(
        &self,
        start: LinearLocation,
        end: LinearLocation,
    ) -> Result<Line, LinearRefError> {
        let line = self.single_line()?;
        let (start, end) = self.prepare(start, end)?;
        if end < start {
            return Ok(self.forward_line(line, end, start)?.reversed());
        }
        self.forward_line(line, start, end)
    }

    /// Forward section over `[start, end]` for any linear geometry.
    ///
    /// Both locations are validated and normalized first, so `(c, s, 1.0)`
    /// and `(c, s + 1, 0.0)` behave the same.
    ///
    /// # Errors
    ///
    /// Returns an error if either location is not valid for the geometry,
    /// or [`LinearRefError::ReversedRange`] if `end` precedes `start`.
    pub fn compute_linear(
        &self,
        start: LinearLocation,
        end: LinearLocation,
    ) -> Result<LinearGeometry, LinearRefError> {
        let (start, end) = self.prepare_forward(start, end)?;
        self.forward_linear(start, end)
    }

    /// Forward section over `[start, end]` for a single-line geometry.
    ///
    /// Validates and normalizes like [`compute_linear`](Self::compute_linear).
    ///
    /// # Errors
    ///
    /// Returns [`LinearRefError::NotSingleLine`] for a multi-line,
    /// [`LinearRefError::ReversedRange`] if `end` precedes `start`, or an
    /// error if either location is not valid for the geometry.
    pub fn compute_line(
        &self,
        start: LinearLocation,
        end: LinearLocation,
    ) -> Result<Line, LinearRefError> {
        let line = self.single_line()?;
        let (start, end) = self.prepare_forward(start, end)?;
        self.forward_line(line, start, end)
    }

    /// Expects validated, normalized locations with `start <= end`.
    fn forward_linear(
        &self,
        start: LinearLocation,
        end: LinearLocation,
    ) -> Result<LinearGeometry, LinearRefError> {
        let mut builder = LinearGeometryBuilder::new(BuilderConfig::REPAIR);

        if !start.is_vertex() {
            builder.add(start.coordinate(self.geometry)?);
        }

        for vertex in LinearIterator::from_location(self.geometry, start) {
            if end
                .compare_location_values(vertex.component_index, vertex.vertex_index, 0.0)
                .is_lt()
            {
                break;
            }
            builder.add(vertex.coordinate);
            if vertex.is_end_of_line {
                builder.end_line()?;
            }
        }

        if !end.is_vertex() {
            builder.add(end.coordinate(self.geometry)?);
        }

        let section = builder.build()?;
        debug!(
            "section has {} component(s), {} point(s)",
            section.num_components(),
            section.num_points(),
        );
        Ok(section)
    }

    /// Slice `line` over `[start, end]`. Expects validated, normalized
    /// locations with `start <= end`.
    fn forward_line(
        &self,
        line: &Line,
        start: LinearLocation,
        end: LinearLocation,
    ) -> Result<Line, LinearRefError> {
        let start_coordinate = start.coordinate(self.geometry)?;
        let end_coordinate = end.coordinate(self.geometry)?;
        let coordinates = line.coordinates();

        let mut start_index = start.segment_index();
        if start.segment_fraction() > 0.0 {
            start_index += 1;
        }

        let mut last_index = end.segment_index();
        if end.segment_fraction() >= 1.0 {
            last_index += 1;
        }
        last_index = last_index.min(coordinates.len() - 1);

        let mut section: Vec<Coordinate> = Vec::new();
        if !start.is_vertex() {
            section.push(start_coordinate);
        }
        if let Some(slice) = coordinates.get(start_index..=last_index) {
            section.extend_from_slice(slice);
        }
        if !end.is_vertex() {
            section.push(end_coordinate);
        }

        if section.is_empty() {
            section.push(start_coordinate);
        }
        if section.len() == 1 {
            section.push(section[0]);
        }

        Line::try_new(section)
    }

    fn single_line(&self) -> Result<&'a Line, LinearRefError> {
        match self.geometry {
            LinearGeometry::Line(line) => Ok(line),
            LinearGeometry::MultiLine(_) => Err(LinearRefError::NotSingleLine),
        }
    }

    /// Validate both locations and bring them into normal form so that
    /// comparing them orders the points they name.
    fn prepare(
        &self,
        start: LinearLocation,
        end: LinearLocation,
    ) -> Result<(LinearLocation, LinearLocation), LinearRefError> {
        start.validate(self.geometry)?;
        end.validate(self.geometry)?;
        Ok((start.normalize(), end.normalize()))
    }

    fn prepare_forward(
        &self,
        start: LinearLocation,
        end: LinearLocation,
    ) -> Result<(LinearLocation, LinearLocation), LinearRefError> {
        let (start, end) = self.prepare(start, end)?;
        if end < start {
            return Err(LinearRefError::ReversedRange);
        }
        Ok((start, end))
    }
}
