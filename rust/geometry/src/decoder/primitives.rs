// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Points, line strings, linear rings and the four coordinate encodings

use super::{next_start, require_end, start_element, unexpected, Context, GeometryStreamDecoder};
use crate::geometry::{LineString, LinearRing, Point};
use crate::{Error, Result};
use gml_stream_core::{
    parse_coord, parse_coordinates, parse_pos_list, parse_srs_dimension, Coordinate,
    CoordinateSeparators, CursorEvent, GmlElement, XmlCursor,
};

const POINT_CONTENT: &str = "pos, coordinates or coord";
const LINE_CONTENT: &str = "pos, posList, coordinates or coord";

impl GeometryStreamDecoder {
    /// `Point`: exactly one position from `pos`, `coordinates` or `coord`
    pub(super) fn parse_point<C: XmlCursor + ?Sized>(
        &mut self,
        cursor: &mut C,
        parent: &Context,
    ) -> Result<Point> {
        let ctx = self.enter(cursor, parent, GmlElement::Point)?;
        next_start(cursor, POINT_CONTENT)?;

        let coords = match start_element(cursor, &ctx) {
            Some(GmlElement::Pos) => read_pos(cursor, &ctx)?,
            Some(GmlElement::Coordinates) => read_coordinates(cursor, &ctx)?,
            Some(GmlElement::Coord) => vec![read_coord(cursor, &ctx)?],
            _ => return Err(unexpected(cursor, POINT_CONTENT)),
        };
        let coord = single_position(&coords, GmlElement::Point)?;

        cursor.next_tag()?;
        require_end(cursor, &ctx, GmlElement::Point)?;
        Ok(Point::new(coord, ctx.crs))
    }

    pub(super) fn parse_line_string<C: XmlCursor + ?Sized>(
        &mut self,
        cursor: &mut C,
        parent: &Context,
    ) -> Result<LineString> {
        let ctx = self.enter(cursor, parent, GmlElement::LineString)?;
        let coords = self.read_line_coordinates(cursor, &ctx, GmlElement::LineString)?;
        Ok(LineString::new(coords, ctx.crs))
    }

    pub(super) fn parse_linear_ring<C: XmlCursor + ?Sized>(
        &mut self,
        cursor: &mut C,
        parent: &Context,
    ) -> Result<LinearRing> {
        let ctx = self.enter(cursor, parent, GmlElement::LinearRing)?;
        let coords = self.read_line_coordinates(cursor, &ctx, GmlElement::LinearRing)?;
        LinearRing::try_new(coords, ctx.crs)
    }

    /// Positions of a line-like element (`LineString`, `LinearRing`, segments)
    ///
    /// The first child decides the encoding: repeated `pos`, one `posList`,
    /// one `coordinates` or repeated `coord`. An element without children
    /// has no positions.
    ///
    /// Precondition: on the owner's start tag. Postcondition: on its end tag.
    pub(super) fn read_line_coordinates<C: XmlCursor + ?Sized>(
        &mut self,
        cursor: &mut C,
        ctx: &Context,
        owner: GmlElement,
    ) -> Result<Vec<Coordinate>> {
        let mut coords = Vec::new();
        if cursor.next_tag()? == CursorEvent::EndElement {
            require_end(cursor, ctx, owner)?;
            return Ok(coords);
        }

        match start_element(cursor, ctx) {
            Some(GmlElement::PosList) => {
                coords = read_pos(cursor, ctx)?;
                cursor.next_tag()?;
            }
            Some(GmlElement::Coordinates) => {
                coords = read_coordinates(cursor, ctx)?;
                cursor.next_tag()?;
            }
            Some(first @ (GmlElement::Pos | GmlElement::Coord)) => loop {
                if start_element(cursor, ctx) != Some(first) {
                    return Err(unexpected(cursor, first.as_str()));
                }
                if first == GmlElement::Pos {
                    coords.push(single_position(&read_pos(cursor, ctx)?, GmlElement::Pos)?);
                } else {
                    coords.push(read_coord(cursor, ctx)?);
                }
                if cursor.next_tag()? == CursorEvent::EndElement {
                    break;
                }
            },
            _ => return Err(unexpected(cursor, LINE_CONTENT)),
        }

        require_end(cursor, ctx, owner)?;
        Ok(coords)
    }
}

/// Dimension for a coordinate element, which may override the inherited one
fn element_dimension<C: XmlCursor + ?Sized>(cursor: &C, ctx: &Context) -> Result<usize> {
    Ok(match cursor.attribute("srsDimension") {
        Some(value) => parse_srs_dimension(value)?,
        None => ctx.dimension,
    })
}

/// A `pos` holds exactly one tuple, and a `Point` exactly one position
fn single_position(coords: &[Coordinate], owner: GmlElement) -> Result<Coordinate> {
    match coords {
        [coord] => Ok(*coord),
        other => Err(Error::invalid(format!(
            "{} needs exactly one position, got {}",
            owner,
            other.len()
        ))),
    }
}

/// `pos` or `posList`. Leaves the cursor on the element's end tag.
fn read_pos<C: XmlCursor + ?Sized>(cursor: &mut C, ctx: &Context) -> Result<Vec<Coordinate>> {
    let dimension = element_dimension(cursor, ctx)?;
    let text = cursor.element_text()?;
    Ok(parse_pos_list(&text, dimension, ctx.invert_axis)?)
}

/// `coordinates` with its `decimal`, `cs` and `ts` attributes
fn read_coordinates<C: XmlCursor + ?Sized>(
    cursor: &mut C,
    ctx: &Context,
) -> Result<Vec<Coordinate>> {
    let dimension = element_dimension(cursor, ctx)?;
    let separators = CoordinateSeparators::from_attributes(
        cursor.attribute("decimal"),
        cursor.attribute("cs"),
        cursor.attribute("ts"),
    )?;
    let text = cursor.element_text()?;
    Ok(parse_coordinates(&text, &separators, dimension, ctx.invert_axis)?)
}

/// `coord` with `X`, `Y` and optional `Z` children
fn read_coord<C: XmlCursor + ?Sized>(cursor: &mut C, ctx: &Context) -> Result<Coordinate> {
    let x = read_ordinate(cursor, ctx, GmlElement::X)?;
    let y = read_ordinate(cursor, ctx, GmlElement::Y)?;
    let z = match cursor.next_tag()? {
        CursorEvent::StartElement => {
            if start_element(cursor, ctx) != Some(GmlElement::Z) {
                return Err(unexpected(cursor, "Z"));
            }
            let z = cursor.element_text()?;
            cursor.next_tag()?;
            Some(z)
        }
        _ => None,
    };
    require_end(cursor, ctx, GmlElement::Coord)?;
    Ok(parse_coord(&x, &y, z.as_deref(), ctx.invert_axis)?)
}

fn read_ordinate<C: XmlCursor + ?Sized>(
    cursor: &mut C,
    ctx: &Context,
    element: GmlElement,
) -> Result<String> {
    next_start(cursor, element.as_str())?;
    if start_element(cursor, ctx) != Some(element) {
        return Err(unexpected(cursor, element.as_str()));
    }
    Ok(cursor.element_text()?)
}
