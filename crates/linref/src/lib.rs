//! linref: pure linear-referencing kernel (sans-IO).
//!
//! Extracts the sub-path of a line or multi-line between two linear
//! addresses. An address is a [`LinearLocation`]: a component index, a
//! segment index within that component, and a fraction along that
//! segment. Converting distances or measures into addresses happens
//! upstream of this crate.
//!
//! The building blocks are exposed alongside the extraction entry point:
//!
//! - [`LinearLocation`]: totally ordered address with interpolation
//! - [`LinearIterator`]: vertex traversal in address order
//! - [`LinearGeometryBuilder`]: incremental assembly of line components
//! - [`extract`] / [`LineExtractor`]: section extraction
//!
//! This crate has **no I/O dependencies**. Serialization to text formats
//! lives in `linref-export`.

pub mod builder;
pub mod convert;
pub mod extract;
pub mod iterator;
pub mod location;
pub mod types;

pub use builder::{BuilderConfig, LinearGeometryBuilder};
pub use extract::{LineExtractor, extract, reverse};
pub use iterator::{LinearIterator, VertexVisit};
pub use location::LinearLocation;
pub use types::{Coordinate, Line, LinearGeometry, LinearRefError, MultiLine};
