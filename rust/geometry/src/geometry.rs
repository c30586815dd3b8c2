// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Geometry Model
//!
//! Output values of the stream decoder plus the intermediate curve types the
//! decoder builds before linearization. Every value carries the CRS it was
//! decoded in; the CRS is not part of equality.

use crate::{Error, Result};
use gml_stream_core::{Coordinate, CrsHandle};
use std::fmt;

macro_rules! impl_eq_ignoring_crs {
    ($($ty:ident { $($field:ident),+ }),+ $(,)?) => {
        $(
            impl PartialEq for $ty {
                fn eq(&self, other: &Self) -> bool {
                    $(self.$field == other.$field)&&+
                }
            }

            impl $ty {
                /// CRS the geometry was decoded in
                #[inline]
                pub fn crs(&self) -> &CrsHandle {
                    &self.crs
                }
            }
        )+
    };
}

/// Single position
#[derive(Debug, Clone)]
pub struct Point {
    coord: Coordinate,
    crs: CrsHandle,
}

impl Point {
    pub fn new(coord: Coordinate, crs: CrsHandle) -> Self {
        Self { coord, crs }
    }

    #[inline]
    pub fn coord(&self) -> Coordinate {
        self.coord
    }

    #[inline]
    pub fn x(&self) -> f64 {
        self.coord.x
    }

    #[inline]
    pub fn y(&self) -> f64 {
        self.coord.y
    }

    #[inline]
    pub fn z(&self) -> Option<f64> {
        self.coord.z
    }
}

/// Open polyline
#[derive(Debug, Clone)]
pub struct LineString {
    coords: Vec<Coordinate>,
    crs: CrsHandle,
}

impl LineString {
    pub fn new(coords: Vec<Coordinate>, crs: CrsHandle) -> Self {
        Self { coords, crs }
    }

    #[inline]
    pub fn coords(&self) -> &[Coordinate] {
        &self.coords
    }

    pub fn into_coords(self) -> Vec<Coordinate> {
        self.coords
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.coords.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.coords.is_empty()
    }

    /// Whether the first and last positions coincide
    pub fn is_closed(&self) -> bool {
        match (self.coords.first(), self.coords.last()) {
            (Some(first), Some(last)) => first.coincides(last),
            _ => false,
        }
    }
}

/// Closed polyline: at least 4 positions, first equal to last
#[derive(Debug, Clone)]
pub struct LinearRing {
    coords: Vec<Coordinate>,
    crs: CrsHandle,
}

impl LinearRing {
    /// Minimum number of positions of a valid ring
    pub const MIN_POINTS: usize = 4;

    /// Validate closure and length, failing with [`Error::InvalidGeometry`]
    pub fn try_new(coords: Vec<Coordinate>, crs: CrsHandle) -> Result<Self> {
        if coords.len() < Self::MIN_POINTS {
            return Err(Error::invalid(format!(
                "linear ring needs at least {} points, got {}",
                Self::MIN_POINTS,
                coords.len()
            )));
        }
        let (first, last) = (coords[0], coords[coords.len() - 1]);
        if !first.coincides(&last) {
            return Err(Error::invalid(format!(
                "linear ring is not closed: starts at {} and ends at {}",
                first, last
            )));
        }
        Ok(Self { coords, crs })
    }

    #[inline]
    pub fn coords(&self) -> &[Coordinate] {
        &self.coords
    }

    pub fn into_coords(self) -> Vec<Coordinate> {
        self.coords
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.coords.len()
    }

    /// Always false: a ring has at least [`Self::MIN_POINTS`] positions
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.coords.is_empty()
    }
}

/// Polygon with one shell and zero or more holes
#[derive(Debug, Clone)]
pub struct Polygon {
    shell: LinearRing,
    holes: Vec<LinearRing>,
    crs: CrsHandle,
}

impl Polygon {
    pub fn new(shell: LinearRing, holes: Vec<LinearRing>, crs: CrsHandle) -> Self {
        Self { shell, holes, crs }
    }

    #[inline]
    pub fn shell(&self) -> &LinearRing {
        &self.shell
    }

    #[inline]
    pub fn holes(&self) -> &[LinearRing] {
        &self.holes
    }

    pub fn num_coords(&self) -> usize {
        self.shell.len() + self.holes.iter().map(LinearRing::len).sum::<usize>()
    }
}

#[derive(Debug, Clone)]
pub struct MultiPoint {
    points: Vec<Point>,
    crs: CrsHandle,
}

impl MultiPoint {
    pub fn new(points: Vec<Point>, crs: CrsHandle) -> Self {
        Self { points, crs }
    }

    #[inline]
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

#[derive(Debug, Clone)]
pub struct MultiLineString {
    line_strings: Vec<LineString>,
    crs: CrsHandle,
}

impl MultiLineString {
    pub fn new(line_strings: Vec<LineString>, crs: CrsHandle) -> Self {
        Self { line_strings, crs }
    }

    #[inline]
    pub fn line_strings(&self) -> &[LineString] {
        &self.line_strings
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.line_strings.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.line_strings.is_empty()
    }
}

#[derive(Debug, Clone)]
pub struct MultiPolygon {
    polygons: Vec<Polygon>,
    crs: CrsHandle,
}

impl MultiPolygon {
    pub fn new(polygons: Vec<Polygon>, crs: CrsHandle) -> Self {
        Self { polygons, crs }
    }

    #[inline]
    pub fn polygons(&self) -> &[Polygon] {
        &self.polygons
    }

    pub fn into_polygons(self) -> Vec<Polygon> {
        self.polygons
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.polygons.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.polygons.is_empty()
    }
}

impl_eq_ignoring_crs! {
    Point { coord },
    LineString { coords },
    LinearRing { coords },
    Polygon { shell, holes },
    MultiPoint { points },
    MultiLineString { line_strings },
    MultiPolygon { polygons },
}

/// Kind of a decoded geometry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GeometryType {
    Point,
    LineString,
    LinearRing,
    Polygon,
    MultiPoint,
    MultiLineString,
    MultiPolygon,
}

impl GeometryType {
    pub fn as_str(self) -> &'static str {
        match self {
            GeometryType::Point => "Point",
            GeometryType::LineString => "LineString",
            GeometryType::LinearRing => "LinearRing",
            GeometryType::Polygon => "Polygon",
            GeometryType::MultiPoint => "MultiPoint",
            GeometryType::MultiLineString => "MultiLineString",
            GeometryType::MultiPolygon => "MultiPolygon",
        }
    }
}

impl fmt::Display for GeometryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Decoded geometry
///
/// Curves and surfaces have no variant of their own: curves are linearized
/// into [`LineString`]s and surfaces normalized to [`MultiPolygon`]s.
#[derive(Debug, Clone, PartialEq)]
pub enum Geometry {
    Point(Point),
    LineString(LineString),
    LinearRing(LinearRing),
    Polygon(Polygon),
    MultiPoint(MultiPoint),
    MultiLineString(MultiLineString),
    MultiPolygon(MultiPolygon),
}

impl Geometry {
    pub fn crs(&self) -> &CrsHandle {
        match self {
            Geometry::Point(g) => g.crs(),
            Geometry::LineString(g) => g.crs(),
            Geometry::LinearRing(g) => g.crs(),
            Geometry::Polygon(g) => g.crs(),
            Geometry::MultiPoint(g) => g.crs(),
            Geometry::MultiLineString(g) => g.crs(),
            Geometry::MultiPolygon(g) => g.crs(),
        }
    }

    pub fn geometry_type(&self) -> GeometryType {
        match self {
            Geometry::Point(_) => GeometryType::Point,
            Geometry::LineString(_) => GeometryType::LineString,
            Geometry::LinearRing(_) => GeometryType::LinearRing,
            Geometry::Polygon(_) => GeometryType::Polygon,
            Geometry::MultiPoint(_) => GeometryType::MultiPoint,
            Geometry::MultiLineString(_) => GeometryType::MultiLineString,
            Geometry::MultiPolygon(_) => GeometryType::MultiPolygon,
        }
    }

    /// Total number of positions
    pub fn num_coords(&self) -> usize {
        match self {
            Geometry::Point(_) => 1,
            Geometry::LineString(g) => g.len(),
            Geometry::LinearRing(g) => g.len(),
            Geometry::Polygon(g) => g.num_coords(),
            Geometry::MultiPoint(g) => g.len(),
            Geometry::MultiLineString(g) => g.line_strings().iter().map(LineString::len).sum(),
            Geometry::MultiPolygon(g) => g.polygons().iter().map(Polygon::num_coords).sum(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.num_coords() == 0
    }
}

macro_rules! impl_from_variant {
    ($($variant:ident),+) => {
        $(
            impl From<$variant> for Geometry {
                fn from(value: $variant) -> Self {
                    Geometry::$variant(value)
                }
            }
        )+
    };
}

impl_from_variant!(Point, LineString, LinearRing, Polygon, MultiPoint, MultiLineString, MultiPolygon);

/// One piece of a curve, before linearization
#[derive(Debug, Clone, PartialEq)]
pub enum CurveSegment {
    /// Straight polyline
    LineSegment(Vec<Coordinate>),
    /// Circular arc chain: control points in triples sharing endpoints
    Arc(Vec<Coordinate>),
}

impl CurveSegment {
    #[inline]
    pub fn points(&self) -> &[Coordinate] {
        match self {
            CurveSegment::LineSegment(points) | CurveSegment::Arc(points) => points,
        }
    }

    #[inline]
    pub fn first(&self) -> Option<&Coordinate> {
        self.points().first()
    }

    #[inline]
    pub fn last(&self) -> Option<&Coordinate> {
        self.points().last()
    }
}

/// Ordered segments of a curve or ring, before linearization
///
/// Always flat: splicing another curve appends its segments, never the
/// curve itself.
#[derive(Debug, Clone)]
pub struct Curve {
    segments: Vec<CurveSegment>,
    crs: CrsHandle,
}

impl Curve {
    pub fn new(crs: CrsHandle) -> Self {
        Self {
            segments: Vec::new(),
            crs,
        }
    }

    pub fn push(&mut self, segment: CurveSegment) {
        self.segments.push(segment);
    }

    /// Append the segments of a compound member
    pub fn splice(&mut self, other: Curve) {
        self.segments.extend(other.segments);
    }

    #[inline]
    pub fn segments(&self) -> &[CurveSegment] {
        &self.segments
    }

    pub fn into_segments(self) -> Vec<CurveSegment> {
        self.segments
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }
}

impl_eq_ignoring_crs! {
    Curve { segments },
}
