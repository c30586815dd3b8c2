// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Curve assembly: joins segments into one polyline, linearizing arcs

use crate::arc::{CircularArcFactory, CurvedGeometryFactory};
use crate::geometry::{Curve, CurveSegment, LineString, LinearRing};
use crate::{Error, Result};
use gml_stream_core::Coordinate;
use std::fmt;

/// Concatenates curve segments, delegating arc math to a [`CurvedGeometryFactory`]
pub struct CurveAssembler {
    factory: Box<dyn CurvedGeometryFactory + Send>,
}

impl Default for CurveAssembler {
    fn default() -> Self {
        Self::new(Box::new(CircularArcFactory::default()))
    }
}

impl fmt::Debug for CurveAssembler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CurveAssembler")
            .field("tolerance", &self.factory.tolerance())
            .finish()
    }
}

impl CurveAssembler {
    pub fn new(factory: Box<dyn CurvedGeometryFactory + Send>) -> Self {
        Self { factory }
    }

    #[inline]
    pub fn factory(&self) -> &dyn CurvedGeometryFactory {
        self.factory.as_ref()
    }

    /// Linearize a curve into an open polyline
    pub fn assemble(&self, curve: Curve) -> Result<LineString> {
        let crs = curve.crs().clone();
        let coords = self.concatenate(curve.into_segments())?;
        Ok(LineString::new(coords, crs))
    }

    /// Linearize a ring's segments; the result must be closed
    pub fn assemble_ring(&self, curve: Curve) -> Result<LinearRing> {
        let crs = curve.crs().clone();
        let coords = self.concatenate(curve.into_segments())?;
        LinearRing::try_new(coords, crs)
    }

    fn concatenate(&self, segments: Vec<CurveSegment>) -> Result<Vec<Coordinate>> {
        let mut coords: Vec<Coordinate> = Vec::new();
        for (index, segment) in segments.into_iter().enumerate() {
            let points = match segment {
                CurveSegment::LineSegment(points) => points,
                CurveSegment::Arc(control_points) => self.factory.linearize_arc(&control_points)?,
            };
            let first = match points.as_slice() {
                [first, _, ..] => *first,
                short => {
                    return Err(Error::invalid(format!(
                        "curve segment {} needs at least 2 positions, got {}",
                        index,
                        short.len()
                    )))
                }
            };
            match coords.last() {
                None => coords.extend(points),
                Some(last) if last.coincides(&first) => coords.extend(points.into_iter().skip(1)),
                Some(last) => {
                    return Err(Error::invalid(format!(
                        "curve segment {} starts at {} but the previous segment ends at {}",
                        index, first, last
                    )))
                }
            }
        }
        Ok(coords)
    }
}
