// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! `Curve` segments and general `Ring`s

use super::{
    current_name, next_start, require_end, start_element, unexpected, Context,
    GeometryStreamDecoder,
};
use crate::geometry::{Curve, CurveSegment, LineString, LinearRing};
use crate::{Error, Result};
use gml_stream_core::{CursorEvent, GmlElement, XmlCursor};

impl GeometryStreamDecoder {
    /// `Curve`, linearized
    pub(super) fn parse_curve<C: XmlCursor + ?Sized>(
        &mut self,
        cursor: &mut C,
        parent: &Context,
    ) -> Result<LineString> {
        let curve = self.parse_curve_segments(cursor, parent)?;
        self.assembler.assemble(curve)
    }

    /// `Curve` as its raw segments, `segments` > (`LineStringSegment` | `Arc`)*
    pub(super) fn parse_curve_segments<C: XmlCursor + ?Sized>(
        &mut self,
        cursor: &mut C,
        parent: &Context,
    ) -> Result<Curve> {
        let ctx = self.enter(cursor, parent, GmlElement::Curve)?;
        let mut curve = Curve::new(ctx.crs.clone());

        next_start(cursor, "segments")?;
        if start_element(cursor, &ctx) != Some(GmlElement::Segments) {
            return Err(unexpected(cursor, "segments"));
        }

        while cursor.next_tag()? == CursorEvent::StartElement {
            let segment = match start_element(cursor, &ctx) {
                Some(element @ GmlElement::LineStringSegment) => {
                    let segment_ctx = self.enter(cursor, &ctx, element)?;
                    CurveSegment::LineSegment(self.read_line_coordinates(
                        cursor,
                        &segment_ctx,
                        element,
                    )?)
                }
                Some(element @ GmlElement::Arc) => {
                    let segment_ctx = self.enter(cursor, &ctx, element)?;
                    CurveSegment::Arc(self.read_line_coordinates(cursor, &segment_ctx, element)?)
                }
                _ => return Err(Error::UnsupportedConstruct(current_name(cursor))),
            };
            curve.push(segment);
        }
        require_end(cursor, &ctx, GmlElement::Segments)?;

        cursor.next_tag()?;
        require_end(cursor, &ctx, GmlElement::Curve)?;
        Ok(curve)
    }

    /// General `Ring`: `curveMember`s holding a `LineString` or a `Curve`,
    /// spliced into one closed polyline
    pub(super) fn parse_ring<C: XmlCursor + ?Sized>(
        &mut self,
        cursor: &mut C,
        parent: &Context,
    ) -> Result<LinearRing> {
        let ctx = self.enter(cursor, parent, GmlElement::Ring)?;
        let mut ring = Curve::new(ctx.crs.clone());

        while cursor.next_tag()? == CursorEvent::StartElement {
            if start_element(cursor, &ctx) != Some(GmlElement::CurveMember) {
                return Err(unexpected(cursor, "curveMember"));
            }
            next_start(cursor, "LineString or Curve")?;
            match start_element(cursor, &ctx) {
                Some(GmlElement::LineString) => {
                    let line = self.parse_line_string(cursor, &ctx)?;
                    ring.push(CurveSegment::LineSegment(line.into_coords()));
                }
                Some(GmlElement::Curve) => {
                    let curve = self.parse_curve_segments(cursor, &ctx)?;
                    ring.splice(curve);
                }
                _ => return Err(Error::UnsupportedConstruct(current_name(cursor))),
            }
            cursor.next_tag()?;
            require_end(cursor, &ctx, GmlElement::CurveMember)?;
        }
        require_end(cursor, &ctx, GmlElement::Ring)?;

        self.assembler.assemble_ring(ring)
    }
}
