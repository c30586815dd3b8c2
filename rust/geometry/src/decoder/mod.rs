// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Geometry Stream Decoder - recursive descent over an XML cursor
//!
//! Every parse function starts on the start tag of the element it handles
//! and returns with the cursor on the matching end tag. Nested calls keep
//! the same contract, so the caller can resume its own walk right after
//! [`GeometryStreamDecoder::decode`] returns.

mod collections;
mod curves;
mod primitives;
mod surfaces;

#[cfg(test)]
mod tests;

use crate::arc::{CircularArcFactory, CurvedGeometryFactory};
use crate::assembler::CurveAssembler;
use crate::geometry::Geometry;
use crate::{Error, Result};
use gml_stream_core::{
    normalize_srs_name, parse_srs_dimension, AuthorityCodeResolver, AxisOrderResolver, CrsHandle,
    CursorEvent, DecoderConfig, GmlElement, GmlNamespace, SrsResolver, XmlCursor,
};
use std::fmt;

/// Elements accepted by [`GeometryStreamDecoder::decode`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum GeometryKind {
    Point,
    LineString,
    LinearRing,
    Curve,
    Polygon,
    Surface,
    MultiPoint,
    MultiLineString,
    MultiCurve,
    MultiSurface,
    MultiPolygon,
}

impl GeometryKind {
    fn from_element(element: GmlElement) -> Option<Self> {
        Some(match element {
            GmlElement::Point => GeometryKind::Point,
            GmlElement::LineString => GeometryKind::LineString,
            GmlElement::LinearRing => GeometryKind::LinearRing,
            GmlElement::Curve => GeometryKind::Curve,
            GmlElement::Polygon => GeometryKind::Polygon,
            GmlElement::Surface => GeometryKind::Surface,
            GmlElement::MultiPoint => GeometryKind::MultiPoint,
            GmlElement::MultiLineString => GeometryKind::MultiLineString,
            GmlElement::MultiCurve => GeometryKind::MultiCurve,
            GmlElement::MultiSurface => GeometryKind::MultiSurface,
            GmlElement::MultiPolygon => GeometryKind::MultiPolygon,
            _ => return None,
        })
    }

    fn element(self) -> GmlElement {
        match self {
            GeometryKind::Point => GmlElement::Point,
            GeometryKind::LineString => GmlElement::LineString,
            GeometryKind::LinearRing => GmlElement::LinearRing,
            GeometryKind::Curve => GmlElement::Curve,
            GeometryKind::Polygon => GmlElement::Polygon,
            GeometryKind::Surface => GmlElement::Surface,
            GeometryKind::MultiPoint => GmlElement::MultiPoint,
            GeometryKind::MultiLineString => GmlElement::MultiLineString,
            GeometryKind::MultiCurve => GmlElement::MultiCurve,
            GeometryKind::MultiSurface => GmlElement::MultiSurface,
            GeometryKind::MultiPolygon => GmlElement::MultiPolygon,
        }
    }
}

impl fmt::Display for GeometryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.element().as_str())
    }
}

/// Effective CRS and dimension of the element being decoded
#[derive(Debug, Clone)]
struct Context {
    namespace: GmlNamespace,
    crs: CrsHandle,
    dimension: usize,
    invert_axis: bool,
}

/// Decodes GML 3.1/3.2 geometry elements from an [`XmlCursor`]
///
/// Holds the axis-order cache across calls; everything else is per call.
pub struct GeometryStreamDecoder {
    config: DecoderConfig,
    srs_resolver: Box<dyn SrsResolver + Send>,
    axis_order: AxisOrderResolver,
    assembler: CurveAssembler,
}

impl Default for GeometryStreamDecoder {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for GeometryStreamDecoder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GeometryStreamDecoder")
            .field("config", &self.config)
            .field("axis_order", &self.axis_order)
            .field("assembler", &self.assembler)
            .finish()
    }
}

impl GeometryStreamDecoder {
    /// Decoder with default configuration and the standard SRS resolver
    pub fn new() -> Self {
        Self::with_config(DecoderConfig::default())
    }

    pub fn with_config(config: DecoderConfig) -> Self {
        let assembler = CurveAssembler::new(Box::new(CircularArcFactory::new(
            config.curve_tolerance,
        )));
        Self {
            config,
            srs_resolver: Box::new(AuthorityCodeResolver),
            axis_order: AxisOrderResolver::default(),
            assembler,
        }
    }

    /// Replace the `srsName` resolver
    pub fn with_srs_resolver<R>(mut self, resolver: R) -> Self
    where
        R: SrsResolver + Send + 'static,
    {
        self.srs_resolver = Box::new(resolver);
        self
    }

    /// Swap x and y for every CRS the predicate accepts
    pub fn with_axis_order_predicate<F>(mut self, predicate: F) -> Self
    where
        F: Fn(&CrsHandle) -> bool + Send + 'static,
    {
        self.axis_order = AxisOrderResolver::with_predicate(predicate);
        self
    }

    /// Replace the arc linearization strategy
    ///
    /// `config().curve_tolerance` follows the factory's tolerance.
    pub fn with_curve_factory<F>(mut self, factory: F) -> Self
    where
        F: CurvedGeometryFactory + Send + 'static,
    {
        self.config.curve_tolerance = factory.tolerance();
        self.assembler = CurveAssembler::new(Box::new(factory));
        self
    }

    pub fn set_unsafe_xml_allowed(&mut self, allowed: bool) {
        self.config.unsafe_xml_allowed = allowed;
    }

    #[inline]
    pub fn config(&self) -> &DecoderConfig {
        &self.config
    }

    pub fn clear_axis_order_cache(&mut self) {
        self.axis_order.clear_cache();
    }

    pub fn axis_order_cache_len(&self) -> usize {
        self.axis_order.cache_len()
    }

    /// Decode the geometry whose start tag the cursor is on
    ///
    /// On success the cursor is left on the matching end tag.
    pub fn decode<C: XmlCursor + ?Sized>(&mut self, cursor: &mut C) -> Result<Geometry> {
        self.check_unsafe_xml(cursor)?;
        cursor.require(CursorEvent::StartElement, None, None)?;

        let namespace = cursor
            .namespace()
            .and_then(GmlNamespace::from_uri)
            .ok_or_else(|| unexpected(cursor, "start tag in a GML namespace"))?;
        let local_name = cursor.local_name().unwrap_or_default();
        let kind = GmlElement::from_local_name(local_name)
            .and_then(GeometryKind::from_element)
            .ok_or_else(|| Error::UnrecognizedElement(local_name.to_string()))?;

        let default_crs = self.config.default_crs.clone();
        let root = Context {
            namespace,
            invert_axis: self.axis_order.needs_invert(&default_crs),
            crs: default_crs,
            dimension: self.config.default_dimension,
        };

        let geometry = self.decode_kind(cursor, kind, &root)?;
        tracing::debug!(
            element = %kind,
            geometry_type = %geometry.geometry_type(),
            crs = %geometry.crs(),
            coords = geometry.num_coords(),
            "Decoded geometry"
        );
        Ok(geometry)
    }

    fn decode_kind<C: XmlCursor + ?Sized>(
        &mut self,
        cursor: &mut C,
        kind: GeometryKind,
        parent: &Context,
    ) -> Result<Geometry> {
        Ok(match kind {
            GeometryKind::Point => self.parse_point(cursor, parent)?.into(),
            GeometryKind::LineString => self.parse_line_string(cursor, parent)?.into(),
            GeometryKind::LinearRing => self.parse_linear_ring(cursor, parent)?.into(),
            GeometryKind::Curve => self.parse_curve(cursor, parent)?.into(),
            GeometryKind::Polygon => self.parse_polygon(cursor, parent)?.into(),
            GeometryKind::Surface => self.parse_surface(cursor, parent)?.into(),
            GeometryKind::MultiPoint => self.parse_multi_point(cursor, parent)?.into(),
            GeometryKind::MultiLineString => self.parse_multi_line_string(cursor, parent)?.into(),
            GeometryKind::MultiCurve => self.parse_multi_curve(cursor, parent)?.into(),
            GeometryKind::MultiSurface => self.parse_multi_surface(cursor, parent)?.into(),
            GeometryKind::MultiPolygon => self.parse_multi_polygon(cursor, parent)?.into(),
        })
    }

    fn check_unsafe_xml<C: XmlCursor + ?Sized>(&self, cursor: &C) -> Result<()> {
        if !cursor.supports_dtd() {
            return Ok(());
        }
        if !self.config.unsafe_xml_allowed {
            return Err(gml_stream_core::Error::Configuration(
                "XML cursor has DTD processing enabled; set unsafe_xml_allowed to accept it"
                    .to_string(),
            )
            .into());
        }
        tracing::warn!("Decoding from a DTD-enabled XML cursor, unsafe XML is allowed");
        Ok(())
    }

    fn resolve_crs(&self, srs_name: &str) -> Result<CrsHandle> {
        let normalized = normalize_srs_name(srs_name);
        Ok(self.srs_resolver.resolve(&normalized)?)
    }

    /// Apply `srsName` and `srsDimension` of the current start tag
    fn element_context<C: XmlCursor + ?Sized>(
        &mut self,
        cursor: &C,
        parent: &Context,
    ) -> Result<Context> {
        let mut ctx = parent.clone();
        if let Some(srs_name) = cursor.attribute("srsName") {
            let crs = self.resolve_crs(srs_name)?;
            ctx.invert_axis = self.axis_order.needs_invert(&crs);
            ctx.crs = crs;
        }
        if let Some(dimension) = cursor.attribute("srsDimension") {
            ctx.dimension = parse_srs_dimension(dimension)?;
        }
        Ok(ctx)
    }

    /// Require the start tag of `element` and derive its context
    fn enter<C: XmlCursor + ?Sized>(
        &mut self,
        cursor: &C,
        parent: &Context,
        element: GmlElement,
    ) -> Result<Context> {
        cursor.require(
            CursorEvent::StartElement,
            Some(parent.namespace.uri()),
            Some(element.as_str()),
        )?;
        let ctx = self.element_context(cursor, parent)?;
        tracing::trace!(
            element = %element,
            crs = %ctx.crs,
            dimension = ctx.dimension,
            invert_axis = ctx.invert_axis,
            "Decoding element"
        );
        Ok(ctx)
    }
}

/// GML element under the cursor, if it is a start tag in the decoding namespace
fn start_element<C: XmlCursor + ?Sized>(cursor: &C, ctx: &Context) -> Option<GmlElement> {
    if !cursor.is_start() || cursor.namespace() != Some(ctx.namespace.uri()) {
        return None;
    }
    cursor.local_name().and_then(GmlElement::from_local_name)
}

/// Require the end tag of `element`
fn require_end<C: XmlCursor + ?Sized>(cursor: &C, ctx: &Context, element: GmlElement) -> Result<()> {
    cursor.require(
        CursorEvent::EndElement,
        Some(ctx.namespace.uri()),
        Some(element.as_str()),
    )?;
    Ok(())
}

/// Advance to the next tag, which must be a start tag
fn next_start<C: XmlCursor + ?Sized>(cursor: &mut C, expected: &str) -> Result<()> {
    if cursor.next_tag()? != CursorEvent::StartElement {
        return Err(unexpected(cursor, expected));
    }
    Ok(())
}

fn unexpected<C: XmlCursor + ?Sized>(cursor: &C, expected: &str) -> Error {
    gml_stream_core::Error::structure(expected, cursor.describe(), cursor.position()).into()
}

/// Name of the current start tag, for unsupported-construct errors
fn current_name<C: XmlCursor + ?Sized>(cursor: &C) -> String {
    cursor
        .name()
        .map(|name| name.to_string())
        .unwrap_or_else(|| cursor.describe())
}
