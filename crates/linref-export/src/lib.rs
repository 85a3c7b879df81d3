//! linref-export: text serializers for extracted sections.
//!
//! Pure functions that turn a [`linref::LinearGeometry`] into WKT or an
//! SVG preview. No filesystem or stdout access happens here; callers own
//! the I/O.

pub mod svg;
pub mod wkt;

pub use svg::{SvgMetadata, SvgStyle, build_path_data, to_svg};
pub use wkt::{geometry_to_wkt, to_wkt};
