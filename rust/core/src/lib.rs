// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! # GML Stream Core
//!
//! Building blocks for decoding OGC GML 3.1/3.2 geometries from a pull-based
//! XML stream without buffering the document.
//!
//! ## Overview
//!
//! - **XML Cursor**: tag-level, namespace-aware pull reader over
//!   [quick-xml](https://docs.rs/quick-xml) ([`XmlCursor`], [`QuickXmlCursor`])
//! - **Coordinate Text**: `pos`, `posList`, `coordinates` and `coord`
//!   encodings parsed with [fast-float](https://docs.rs/fast-float)
//! - **CRS Identity**: `srsName` normalization and resolution to a [`CrsHandle`]
//! - **Axis Order**: per-CRS swap decision, memoized
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use gml_stream_core::{parse_pos_list, QuickXmlCursor, XmlCursor};
//!
//! let mut cursor = QuickXmlCursor::at_root("<gml:posList xmlns:gml=\"http://www.opengis.net/gml\">1 2 3 4</gml:posList>")?;
//! let text = cursor.element_text()?;
//! let coords = parse_pos_list(&text, 2, false)?;
//! assert_eq!(coords.len(), 2);
//! ```
//!
//! The geometry decoder itself lives in `gml-stream-geometry`.

pub mod axis_order;
pub mod config;
pub mod coordinate;
pub mod coordinate_text;
pub mod crs;
pub mod cursor;
pub mod element;
pub mod error;

pub use axis_order::{AxisOrderPredicate, AxisOrderResolver};
pub use config::{DecoderConfig, DEFAULT_CURVE_TOLERANCE, DEFAULT_DIMENSION};
pub use coordinate::Coordinate;
pub use coordinate_text::{
    parse_coord, parse_coordinates, parse_ordinate, parse_pos_list, parse_srs_dimension,
    CoordinateSeparators,
};
pub use crs::{normalize_srs_name, AuthorityCodeResolver, CrsHandle, SrsResolver};
pub use cursor::{CursorEvent, QualifiedName, QuickXmlCursor, XmlCursor};
pub use element::{GmlElement, GmlNamespace, GML_3_1_NAMESPACE, GML_3_2_NAMESPACE};
pub use error::{CrsError, Error, Result};
