// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! GML Stream Geometry
//!
//! Decodes GML 3.1/3.2 geometry elements straight from a pull-based XML
//! cursor into typed geometries. Curves are linearized on the way out and
//! surfaces are normalized to polygons.
//!
//! ```rust,ignore
//! use gml_stream_geometry::{GeometryStreamDecoder, QuickXmlCursor};
//!
//! let xml = r#"<gml:Point xmlns:gml="http://www.opengis.net/gml"><gml:pos>10 20</gml:pos></gml:Point>"#;
//! let mut cursor = QuickXmlCursor::at_root(xml)?;
//! let geometry = GeometryStreamDecoder::new().decode(&mut cursor)?;
//! ```

pub mod arc;
pub mod assembler;
pub mod decoder;
pub mod error;
pub mod geometry;

pub use arc::{CircularArcFactory, CurvedGeometryFactory};
pub use assembler::CurveAssembler;
pub use decoder::GeometryStreamDecoder;
pub use error::{Error, Result};
pub use geometry::{
    Curve, CurveSegment, Geometry, GeometryType, LineString, LinearRing, MultiLineString,
    MultiPoint, MultiPolygon, Point, Polygon,
};

// Re-export the core types callers need alongside the decoder
pub use gml_stream_core::{
    Coordinate, CrsError, CrsHandle, DecoderConfig, QuickXmlCursor, SrsResolver, XmlCursor,
};
