// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Polygons, polygon patches and surfaces

use super::{
    current_name, next_start, require_end, start_element, unexpected, Context,
    GeometryStreamDecoder,
};
use crate::geometry::{LinearRing, MultiPolygon, Polygon};
use crate::{Error, Result};
use gml_stream_core::{CursorEvent, GmlElement, XmlCursor};

/// Polygon boundary role, GML 3 and GML 2 spellings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Boundary {
    Shell,
    Hole,
}

impl Boundary {
    fn of(element: GmlElement) -> Option<Self> {
        match element {
            GmlElement::Exterior | GmlElement::OuterBoundaryIs => Some(Boundary::Shell),
            GmlElement::Interior | GmlElement::InnerBoundaryIs => Some(Boundary::Hole),
            _ => None,
        }
    }
}

impl GeometryStreamDecoder {
    pub(super) fn parse_polygon<C: XmlCursor + ?Sized>(
        &mut self,
        cursor: &mut C,
        parent: &Context,
    ) -> Result<Polygon> {
        let ctx = self.enter(cursor, parent, GmlElement::Polygon)?;
        self.read_polygon_boundaries(cursor, &ctx, GmlElement::Polygon)
    }

    /// `Surface` > `patches` > `PolygonPatch`*; always a multi polygon
    pub(super) fn parse_surface<C: XmlCursor + ?Sized>(
        &mut self,
        cursor: &mut C,
        parent: &Context,
    ) -> Result<MultiPolygon> {
        let ctx = self.enter(cursor, parent, GmlElement::Surface)?;

        next_start(cursor, "patches")?;
        if start_element(cursor, &ctx) != Some(GmlElement::Patches) {
            return Err(unexpected(cursor, "patches"));
        }

        let mut polygons = Vec::new();
        while cursor.next_tag()? == CursorEvent::StartElement {
            if start_element(cursor, &ctx) != Some(GmlElement::PolygonPatch) {
                return Err(Error::UnsupportedConstruct(current_name(cursor)));
            }
            let patch_ctx = self.enter(cursor, &ctx, GmlElement::PolygonPatch)?;
            polygons.push(self.read_polygon_boundaries(
                cursor,
                &patch_ctx,
                GmlElement::PolygonPatch,
            )?);
        }
        require_end(cursor, &ctx, GmlElement::Patches)?;

        cursor.next_tag()?;
        require_end(cursor, &ctx, GmlElement::Surface)?;
        Ok(MultiPolygon::new(polygons, ctx.crs))
    }

    /// One shell boundary followed by any number of hole boundaries
    ///
    /// Precondition: on the owner's start tag. Postcondition: on its end tag.
    fn read_polygon_boundaries<C: XmlCursor + ?Sized>(
        &mut self,
        cursor: &mut C,
        ctx: &Context,
        owner: GmlElement,
    ) -> Result<Polygon> {
        next_start(cursor, "exterior or outerBoundaryIs")?;
        let shell = match start_element(cursor, ctx) {
            Some(element) if Boundary::of(element) == Some(Boundary::Shell) => {
                self.read_boundary_ring(cursor, ctx, element)?
            }
            _ => return Err(unexpected(cursor, "exterior or outerBoundaryIs")),
        };

        let mut holes = Vec::new();
        loop {
            cursor.next_tag()?;
            match start_element(cursor, ctx) {
                Some(element) if Boundary::of(element) == Some(Boundary::Hole) => {
                    holes.push(self.read_boundary_ring(cursor, ctx, element)?);
                }
                _ => break,
            }
        }

        require_end(cursor, ctx, owner)?;
        Ok(Polygon::new(shell, holes, ctx.crs.clone()))
    }

    /// Ring inside a boundary element; leaves the cursor on the boundary's end tag
    fn read_boundary_ring<C: XmlCursor + ?Sized>(
        &mut self,
        cursor: &mut C,
        ctx: &Context,
        boundary: GmlElement,
    ) -> Result<LinearRing> {
        next_start(cursor, "LinearRing or Ring")?;
        let ring = match start_element(cursor, ctx) {
            Some(GmlElement::LinearRing) => self.parse_linear_ring(cursor, ctx)?,
            Some(GmlElement::Ring) => self.parse_ring(cursor, ctx)?,
            _ => return Err(Error::UnsupportedConstruct(current_name(cursor))),
        };
        cursor.next_tag()?;
        require_end(cursor, ctx, boundary)?;
        Ok(ring)
    }
}
