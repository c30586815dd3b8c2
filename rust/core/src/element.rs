// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! GML namespaces and the closed set of element names the decoder understands

use std::fmt;

/// GML 3.1 namespace URI
pub const GML_3_1_NAMESPACE: &str = "http://www.opengis.net/gml";
/// GML 3.2 namespace URI
pub const GML_3_2_NAMESPACE: &str = "http://www.opengis.net/gml/3.2";

/// One of the two recognized GML namespaces
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GmlNamespace {
    Gml31,
    Gml32,
}

impl GmlNamespace {
    /// Match a namespace URI exactly
    pub fn from_uri(uri: &str) -> Option<Self> {
        match uri {
            GML_3_1_NAMESPACE => Some(GmlNamespace::Gml31),
            GML_3_2_NAMESPACE => Some(GmlNamespace::Gml32),
            _ => None,
        }
    }

    #[inline]
    pub fn uri(self) -> &'static str {
        match self {
            GmlNamespace::Gml31 => GML_3_1_NAMESPACE,
            GmlNamespace::Gml32 => GML_3_2_NAMESPACE,
        }
    }
}

macro_rules! gml_elements {
    ($($variant:ident => $name:literal),+ $(,)?) => {
        /// Local names of GML elements that take part in geometry decoding
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum GmlElement {
            $($variant),+
        }

        impl GmlElement {
            /// Every known element, in declaration order
            pub const ALL: &'static [GmlElement] = &[$(GmlElement::$variant),+];

            /// Look up an element by its local name (case-sensitive, as in XML)
            pub fn from_local_name(name: &str) -> Option<Self> {
                match name {
                    $($name => Some(GmlElement::$variant),)+
                    _ => None,
                }
            }

            /// Local name as it appears in documents
            #[inline]
            pub fn as_str(self) -> &'static str {
                match self {
                    $(GmlElement::$variant => $name),+
                }
            }
        }
    };
}

gml_elements! {
    // Geometries
    Point => "Point",
    LineString => "LineString",
    LinearRing => "LinearRing",
    Ring => "Ring",
    Curve => "Curve",
    CompositeCurve => "CompositeCurve",
    OrientableCurve => "OrientableCurve",
    Polygon => "Polygon",
    PolygonPatch => "PolygonPatch",
    Surface => "Surface",
    MultiPoint => "MultiPoint",
    MultiLineString => "MultiLineString",
    MultiCurve => "MultiCurve",
    MultiSurface => "MultiSurface",
    MultiPolygon => "MultiPolygon",
    // Curve segments and surface patches
    Segments => "segments",
    LineStringSegment => "LineStringSegment",
    Arc => "Arc",
    Patches => "patches",
    // Polygon boundaries (GML 3 and legacy GML 2 spellings)
    Exterior => "exterior",
    Interior => "interior",
    OuterBoundaryIs => "outerBoundaryIs",
    InnerBoundaryIs => "innerBoundaryIs",
    // Collection members
    PointMember => "pointMember",
    PointMembers => "pointMembers",
    CurveMember => "curveMember",
    CurveMembers => "curveMembers",
    LineStringMember => "lineStringMember",
    SurfaceMember => "surfaceMember",
    SurfaceMembers => "surfaceMembers",
    PolygonMember => "polygonMember",
    // Coordinate encodings
    Pos => "pos",
    PosList => "posList",
    Coordinates => "coordinates",
    Coord => "coord",
    X => "X",
    Y => "Y",
    Z => "Z",
}

impl fmt::Display for GmlElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
