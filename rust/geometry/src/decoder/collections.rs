// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Multi geometries and their member encodings

use super::{
    current_name, next_start, require_end, start_element, unexpected, Context,
    GeometryStreamDecoder,
};
use crate::geometry::{MultiLineString, MultiPoint, MultiPolygon};
use crate::{Error, Result};
use gml_stream_core::{CursorEvent, GmlElement, XmlCursor};

/// Member wrappers a collection accepts
struct Members {
    /// Wraps exactly one geometry, may repeat
    single: GmlElement,
    /// Wraps any number of geometries
    array: Option<GmlElement>,
}

impl GeometryStreamDecoder {
    /// Walk the member wrappers of `owner` until its end tag
    ///
    /// `read` starts on a member geometry's start tag and must leave the
    /// cursor on its end tag.
    fn read_members<C, T, F>(
        &mut self,
        cursor: &mut C,
        ctx: &Context,
        owner: GmlElement,
        members: Members,
        mut read: F,
    ) -> Result<Vec<T>>
    where
        C: XmlCursor + ?Sized,
        F: FnMut(&mut Self, &mut C, &mut Vec<T>) -> Result<()>,
    {
        let mut out = Vec::new();
        while cursor.next_tag()? == CursorEvent::StartElement {
            match start_element(cursor, ctx) {
                Some(wrapper) if wrapper == members.single => {
                    next_start(cursor, "member geometry")?;
                    read(&mut *self, &mut *cursor, &mut out)?;
                    cursor.next_tag()?;
                    require_end(cursor, ctx, wrapper)?;
                }
                Some(wrapper) if Some(wrapper) == members.array => {
                    while cursor.next_tag()? == CursorEvent::StartElement {
                        read(&mut *self, &mut *cursor, &mut out)?;
                    }
                    require_end(cursor, ctx, wrapper)?;
                }
                _ => {
                    let expected = match members.array {
                        Some(array) => format!("{} or {}", members.single, array),
                        None => members.single.to_string(),
                    };
                    return Err(unexpected(cursor, &expected));
                }
            }
        }
        require_end(cursor, ctx, owner)?;
        Ok(out)
    }

    pub(super) fn parse_multi_point<C: XmlCursor + ?Sized>(
        &mut self,
        cursor: &mut C,
        parent: &Context,
    ) -> Result<MultiPoint> {
        let ctx = self.enter(cursor, parent, GmlElement::MultiPoint)?;
        let members = Members {
            single: GmlElement::PointMember,
            array: Some(GmlElement::PointMembers),
        };
        let points = self.read_members(
            cursor,
            &ctx,
            GmlElement::MultiPoint,
            members,
            |this, cursor, out| {
                out.push(this.parse_point(cursor, &ctx)?);
                Ok(())
            },
        )?;
        Ok(MultiPoint::new(points, ctx.crs))
    }

    pub(super) fn parse_multi_line_string<C: XmlCursor + ?Sized>(
        &mut self,
        cursor: &mut C,
        parent: &Context,
    ) -> Result<MultiLineString> {
        let ctx = self.enter(cursor, parent, GmlElement::MultiLineString)?;
        let members = Members {
            single: GmlElement::LineStringMember,
            array: None,
        };
        let lines = self.read_members(
            cursor,
            &ctx,
            GmlElement::MultiLineString,
            members,
            |this, cursor, out| {
                out.push(this.parse_line_string(cursor, &ctx)?);
                Ok(())
            },
        )?;
        Ok(MultiLineString::new(lines, ctx.crs))
    }

    /// `MultiCurve`: `LineString` and `Curve` members, curves linearized
    pub(super) fn parse_multi_curve<C: XmlCursor + ?Sized>(
        &mut self,
        cursor: &mut C,
        parent: &Context,
    ) -> Result<MultiLineString> {
        let ctx = self.enter(cursor, parent, GmlElement::MultiCurve)?;
        let members = Members {
            single: GmlElement::CurveMember,
            array: Some(GmlElement::CurveMembers),
        };
        let lines = self.read_members(
            cursor,
            &ctx,
            GmlElement::MultiCurve,
            members,
            |this, cursor, out| {
                let line = match start_element(cursor, &ctx) {
                    Some(GmlElement::LineString) => this.parse_line_string(cursor, &ctx)?,
                    Some(GmlElement::Curve) => this.parse_curve(cursor, &ctx)?,
                    _ => return Err(Error::UnsupportedConstruct(current_name(cursor))),
                };
                out.push(line);
                Ok(())
            },
        )?;
        Ok(MultiLineString::new(lines, ctx.crs))
    }

    /// `MultiSurface`: `Polygon` members, `Surface` members flattened
    pub(super) fn parse_multi_surface<C: XmlCursor + ?Sized>(
        &mut self,
        cursor: &mut C,
        parent: &Context,
    ) -> Result<MultiPolygon> {
        let ctx = self.enter(cursor, parent, GmlElement::MultiSurface)?;
        let members = Members {
            single: GmlElement::SurfaceMember,
            array: Some(GmlElement::SurfaceMembers),
        };
        let polygons = self.read_members(
            cursor,
            &ctx,
            GmlElement::MultiSurface,
            members,
            |this, cursor, out| {
                match start_element(cursor, &ctx) {
                    Some(GmlElement::Polygon) => out.push(this.parse_polygon(cursor, &ctx)?),
                    Some(GmlElement::Surface) => {
                        out.extend(this.parse_surface(cursor, &ctx)?.into_polygons())
                    }
                    _ => return Err(Error::UnsupportedConstruct(current_name(cursor))),
                }
                Ok(())
            },
        )?;
        Ok(MultiPolygon::new(polygons, ctx.crs))
    }

    pub(super) fn parse_multi_polygon<C: XmlCursor + ?Sized>(
        &mut self,
        cursor: &mut C,
        parent: &Context,
    ) -> Result<MultiPolygon> {
        let ctx = self.enter(cursor, parent, GmlElement::MultiPolygon)?;
        let members = Members {
            single: GmlElement::PolygonMember,
            array: None,
        };
        let polygons = self.read_members(
            cursor,
            &ctx,
            GmlElement::MultiPolygon,
            members,
            |this, cursor, out| {
                out.push(this.parse_polygon(cursor, &ctx)?);
                Ok(())
            },
        )?;
        Ok(MultiPolygon::new(polygons, ctx.crs))
    }
}
