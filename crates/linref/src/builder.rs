//! Incremental assembly of line components into a [`LinearGeometry`].
//!
//! Coordinates are appended to the currently open component; closing it
//! with [`LinearGeometryBuilder::end_line`] makes the next appended
//! coordinate start a new component. Finalizing yields a [`Line`] when
//! exactly one component was produced and a [`MultiLine`] otherwise.
//!
//! A component that ends up with a single coordinate is degenerate.
//! [`BuilderConfig`] selects whether such components are repaired by
//! duplicating the point, dropped, or reported as an error.

use log::trace;
use serde::{Deserialize, Serialize};

use crate::types::{Coordinate, Line, LinearGeometry, LinearRefError, MultiLine};

/// How [`LinearGeometryBuilder`] treats one-point components.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BuilderConfig {
    /// Repair one-point components by duplicating the point into a
    /// zero-length two-point line.
    pub fix_invalid_lines: bool,

    /// Silently drop one-point components. Takes precedence over
    /// `fix_invalid_lines`.
    pub ignore_invalid_lines: bool,
}

impl BuilderConfig {
    /// Default for [`fix_invalid_lines`](Self::fix_invalid_lines).
    pub const DEFAULT_FIX_INVALID_LINES: bool = false;
    /// Default for [`ignore_invalid_lines`](Self::ignore_invalid_lines).
    pub const DEFAULT_IGNORE_INVALID_LINES: bool = false;

    /// Configuration used by extraction: degenerate components are
    /// always repaired.
    pub const REPAIR: Self = Self {
        fix_invalid_lines: true,
        ignore_invalid_lines: false,
    };
}

impl Default for BuilderConfig {
    fn default() -> Self {
        Self {
            fix_invalid_lines: Self::DEFAULT_FIX_INVALID_LINES,
            ignore_invalid_lines: Self::DEFAULT_IGNORE_INVALID_LINES,
        }
    }
}

/// Whether a component is currently open.
#[derive(Debug, Clone, Default)]
enum BuilderState {
    /// No component is open; the next coordinate starts one.
    #[default]
    Idle,
    /// Coordinates of the open component. Never empty.
    Accumulating(Vec<Coordinate>),
}

/// Accumulates coordinates into one or more line components.
#[derive(Debug, Clone, Default)]
pub struct LinearGeometryBuilder {
    config: BuilderConfig,
    state: BuilderState,
    lines: Vec<Line>,
    last_coordinate: Option<Coordinate>,
}

impl LinearGeometryBuilder {
    /// Create an empty builder.
    #[must_use]
    pub fn new(config: BuilderConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    /// Append a coordinate to the open component, opening one if needed.
    ///
    /// Repeated coordinates are kept.
    pub fn add(&mut self, coordinate: Coordinate) {
        self.add_with_repeat_policy(coordinate, true);
    }

    /// Append a coordinate to the open component, opening one if needed.
    ///
    /// When `allow_repeated` is `false`, a coordinate equal to the last
    /// one in the open component is skipped.
    pub fn add_with_repeat_policy(&mut self, coordinate: Coordinate, allow_repeated: bool) {
        match &mut self.state {
            BuilderState::Idle => {
                self.state = BuilderState::Accumulating(vec![coordinate]);
            }
            BuilderState::Accumulating(points) => {
                if !allow_repeated && points.last() == Some(&coordinate) {
                    return;
                }
                points.push(coordinate);
            }
        }
        self.last_coordinate = Some(coordinate);
    }

    /// The most recently added coordinate, across all components.
    #[must_use]
    pub const fn last_coordinate(&self) -> Option<Coordinate> {
        self.last_coordinate
    }

    /// Number of components closed so far.
    #[must_use]
    pub fn num_lines(&self) -> usize {
        self.lines.len()
    }

    /// Close the open component. Does nothing when no component is open.
    ///
    /// # Errors
    ///
    /// Returns [`LinearRefError::TooFewPoints`] if the component has a
    /// single point and the configuration neither repairs nor ignores it.
    pub fn end_line(&mut self) -> Result<(), LinearRefError> {
        let BuilderState::Accumulating(mut points) = std::mem::take(&mut self.state) else {
            return Ok(());
        };

        if points.len() < 2 {
            if self.config.ignore_invalid_lines {
                trace!("dropping one-point component at {:?}", points.first());
                return Ok(());
            }
            if self.config.fix_invalid_lines {
                trace!("repairing one-point component at {:?}", points.first());
                if let Some(&only) = points.first() {
                    points.push(only);
                }
            }
        }

        self.lines.push(Line::try_new(points)?);
        Ok(())
    }

    /// Close any open component and return the built geometry.
    ///
    /// # Errors
    ///
    /// Returns [`LinearRefError::EmptyResult`] if no component was
    /// produced, or the error from closing the last component.
    pub fn build(mut self) -> Result<LinearGeometry, LinearRefError> {
        self.end_line()?;
        let mut lines = self.lines;
        match lines.len() {
            0 => Err(LinearRefError::EmptyResult),
            1 => lines
                .pop()
                .map(LinearGeometry::Line)
                .ok_or(LinearRefError::EmptyResult),
            _ => Ok(MultiLine::try_new(lines)?.into()),
        }
    }
}
