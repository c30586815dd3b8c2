// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use super::GeometryStreamDecoder;
use crate::geometry::{CurveSegment, Geometry, GeometryType};
use crate::Error;
use gml_stream_core::{
    Coordinate, CrsError, CrsHandle, DecoderConfig, QuickXmlCursor, XmlCursor,
    GML_3_1_NAMESPACE, GML_3_2_NAMESPACE,
};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// Decode `body` nested inside a non-GML parent and check the cursor
/// contract: the decoder must stop on the geometry's own end tag so the
/// parent walk resumes at the next sibling.
fn decode_with(decoder: &mut GeometryStreamDecoder, body: &str) -> crate::Result<Geometry> {
    let xml = format!(
        r#"<feature xmlns:gml="{}" xmlns:g32="{}" xmlns:other="urn:other">{}<after/></feature>"#,
        GML_3_1_NAMESPACE, GML_3_2_NAMESPACE, body
    );
    let mut cursor = QuickXmlCursor::at_root(&xml).unwrap();
    cursor.next_tag().unwrap();
    let start = cursor.name().cloned();

    let geometry = decoder.decode(&mut cursor)?;

    assert!(cursor.is_end(), "decoder stopped on {}", cursor.describe());
    assert_eq!(cursor.name().cloned(), start);
    cursor.next_tag().unwrap();
    assert_eq!(cursor.local_name(), Some("after"));
    Ok(geometry)
}

fn decode(body: &str) -> crate::Result<Geometry> {
    decode_with(&mut GeometryStreamDecoder::new(), body)
}

fn coords(pairs: &[(f64, f64)]) -> Vec<Coordinate> {
    pairs.iter().map(|&(x, y)| Coordinate::new(x, y)).collect()
}

const SQUARE: &str = "<gml:LinearRing><gml:posList>0 0 10 0 10 10 0 10 0 0</gml:posList></gml:LinearRing>";
const HOLE: &str = "<gml:LinearRing><gml:posList>2 2 4 2 4 4 2 2</gml:posList></gml:LinearRing>";

#[test]
fn test_point_pos() {
    let geometry =
        decode(r#"<gml:Point srsName="EPSG:4326"><gml:pos>10.0 20.0</gml:pos></gml:Point>"#)
            .unwrap();
    let Geometry::Point(point) = geometry else {
        panic!("expected point");
    };
    assert_eq!(point.coord(), Coordinate::new(10.0, 20.0));
    assert_eq!(point.z(), None);
    assert_eq!(point.crs(), &CrsHandle::wgs84());
}

#[test]
fn test_point_coordinates_and_coord() {
    let a = decode("<gml:Point><gml:coordinates>1.5,2.5</gml:coordinates></gml:Point>").unwrap();
    let b = decode(
        "<gml:Point><gml:coord><gml:X>1.5</gml:X><gml:Y>2.5</gml:Y></gml:coord></gml:Point>",
    )
    .unwrap();
    assert_eq!(a, b);

    let Geometry::Point(point) = decode(
        "<gml:Point><gml:coord><gml:X>1</gml:X><gml:Y>2</gml:Y><gml:Z>3</gml:Z></gml:coord></gml:Point>",
    )
    .unwrap() else {
        panic!("expected point");
    };
    assert_eq!(point.coord(), Coordinate::new_3d(1.0, 2.0, 3.0));
}

#[test]
fn test_point_with_two_positions_rejected() {
    let err = decode("<gml:Point><gml:pos>1 2 3 4</gml:pos></gml:Point>").unwrap_err();
    assert!(matches!(err, Error::InvalidGeometry(_)));
}

#[test]
fn test_point_3d() {
    let Geometry::Point(point) =
        decode(r#"<gml:Point srsDimension="3"><gml:pos>1 2 3</gml:pos></gml:Point>"#).unwrap()
    else {
        panic!("expected point");
    };
    assert_eq!(point.z(), Some(3.0));
}

#[test]
fn test_line_string_coordinates() {
    let geometry = decode(
        r#"<gml:LineString><gml:coordinates cs="," ts=" ">0,0 10,10</gml:coordinates></gml:LineString>"#,
    )
    .unwrap();
    let Geometry::LineString(line) = geometry else {
        panic!("expected line string");
    };
    assert_eq!(line.coords(), coords(&[(0.0, 0.0), (10.0, 10.0)]).as_slice());
}

#[test]
fn test_line_string_pos_sequence() {
    let Geometry::LineString(line) = decode(
        "<gml:LineString><gml:pos>0 0</gml:pos><gml:pos>1 1</gml:pos><gml:pos>2 0</gml:pos></gml:LineString>",
    )
    .unwrap() else {
        panic!("expected line string");
    };
    assert_eq!(line.len(), 3);
}

#[test]
fn test_line_string_pos_with_several_tuples() {
    let err = decode(
        "<gml:LineString><gml:pos>0 0 5 5</gml:pos><gml:pos>9 9</gml:pos></gml:LineString>",
    )
    .unwrap_err();
    assert!(matches!(err, Error::InvalidGeometry(ref msg) if msg == "pos needs exactly one position, got 2"));

    let err = decode("<gml:Point><gml:pos>0 0 5 5</gml:pos></gml:Point>").unwrap_err();
    assert!(matches!(err, Error::InvalidGeometry(ref msg) if msg == "Point needs exactly one position, got 2"));
}

#[test]
fn test_pos_list_dimension_override() {
    let Geometry::LineString(line) = decode(
        r#"<gml:LineString srsDimension="2"><gml:posList srsDimension="3">1 2 3 4 5 6</gml:posList></gml:LineString>"#,
    )
    .unwrap() else {
        panic!("expected line string");
    };
    assert_eq!(
        line.coords(),
        &[Coordinate::new_3d(1.0, 2.0, 3.0), Coordinate::new_3d(4.0, 5.0, 6.0)]
    );
}

#[test]
fn test_empty_line_strings() {
    for body in [
        "<gml:LineString/>",
        "<gml:LineString></gml:LineString>",
        "<gml:LineString><gml:posList/></gml:LineString>",
    ] {
        let geometry = decode(body).unwrap();
        assert_eq!(geometry.geometry_type(), GeometryType::LineString);
        assert!(geometry.is_empty());
    }
}

#[test]
fn test_mixed_coordinate_encodings_rejected() {
    let err = decode(
        "<gml:LineString><gml:pos>0 0</gml:pos><gml:coord><gml:X>1</gml:X><gml:Y>1</gml:Y></gml:coord></gml:LineString>",
    )
    .unwrap_err();
    assert!(err.is_structure());
}

#[test]
fn test_dimension_mismatch() {
    let err = decode("<gml:LineString><gml:posList>1 2 3</gml:posList></gml:LineString>")
        .unwrap_err();
    assert!(matches!(
        err,
        Error::Core(gml_stream_core::Error::DimensionMismatch {
            count: 3,
            dimension: 2
        })
    ));
}

#[test]
fn test_invalid_srs_dimension() {
    let err = decode(
        r#"<gml:LineString srsDimension="x"><gml:posList>1 2</gml:posList></gml:LineString>"#,
    )
    .unwrap_err();
    assert!(matches!(
        err,
        Error::Core(gml_stream_core::Error::InvalidAttribute { ref name, .. }) if name == "srsDimension"
    ));
}

#[test]
fn test_invalid_ordinate() {
    let err = decode("<gml:Point><gml:pos>1 north</gml:pos></gml:Point>").unwrap_err();
    assert!(matches!(
        err,
        Error::Core(gml_stream_core::Error::InvalidCoordinate { ref token }) if token == "north"
    ));
}

#[test]
fn test_linear_ring() {
    let geometry = decode(SQUARE).unwrap();
    assert_eq!(geometry.geometry_type(), GeometryType::LinearRing);
    assert_eq!(geometry.num_coords(), 5);

    let err = decode("<gml:LinearRing><gml:posList>0 0 1 0 1 1 0 1</gml:posList></gml:LinearRing>")
        .unwrap_err();
    assert!(matches!(err, Error::InvalidGeometry(_)));
}

#[test]
fn test_polygon_with_hole() {
    let body = format!(
        "<gml:Polygon><gml:exterior>{}</gml:exterior><gml:interior>{}</gml:interior></gml:Polygon>",
        "<gml:LinearRing><gml:posList>0 0 10 0 10 10 0 0</gml:posList></gml:LinearRing>", HOLE
    );
    let Geometry::Polygon(polygon) = decode(&body).unwrap() else {
        panic!("expected polygon");
    };
    assert_eq!(polygon.shell().len(), 4);
    assert_eq!(polygon.holes().len(), 1);
    assert_eq!(polygon.holes()[0].len(), 4);
}

#[test]
fn test_polygon_legacy_boundaries() {
    let modern = format!(
        "<gml:Polygon><gml:exterior>{}</gml:exterior><gml:interior>{}</gml:interior><gml:interior>{}</gml:interior></gml:Polygon>",
        SQUARE, HOLE, HOLE
    );
    let legacy = format!(
        "<gml:Polygon><gml:outerBoundaryIs>{}</gml:outerBoundaryIs><gml:innerBoundaryIs>{}</gml:innerBoundaryIs><gml:innerBoundaryIs>{}</gml:innerBoundaryIs></gml:Polygon>",
        SQUARE, HOLE, HOLE
    );
    let a = decode(&modern).unwrap();
    let b = decode(&legacy).unwrap();
    assert_eq!(a, b);
    assert_eq!(a.num_coords(), 13);
}

#[test]
fn test_polygon_requires_exterior() {
    let body = format!("<gml:Polygon><gml:interior>{}</gml:interior></gml:Polygon>", HOLE);
    assert!(decode(&body).unwrap_err().is_structure());

    let twice = format!(
        "<gml:Polygon><gml:exterior>{}</gml:exterior><gml:exterior>{}</gml:exterior></gml:Polygon>",
        SQUARE, SQUARE
    );
    assert!(decode(&twice).unwrap_err().is_structure());
}

#[test]
fn test_curve_segments_are_joined() {
    let Geometry::LineString(line) = decode(
        "<gml:Curve><gml:segments>\
           <gml:LineStringSegment><gml:posList>0 0 1 0</gml:posList></gml:LineStringSegment>\
           <gml:Arc><gml:posList>1 0 2 1 3 0</gml:posList></gml:Arc>\
         </gml:segments></gml:Curve>",
    )
    .unwrap() else {
        panic!("expected linearized curve");
    };
    // 1 line segment, then 24 arc segments sharing its end point
    assert_eq!(line.len(), 26);
    assert_eq!(line.coords()[0], Coordinate::new(0.0, 0.0));
    assert_eq!(line.coords()[1], Coordinate::new(1.0, 0.0));
    assert_eq!(line.coords()[13], Coordinate::new(2.0, 1.0));
    assert_eq!(line.coords()[25], Coordinate::new(3.0, 0.0));
}

#[test]
fn test_curve_disconnected_segments() {
    let err = decode(
        "<gml:Curve><gml:segments>\
           <gml:LineStringSegment><gml:posList>0 0 1 0</gml:posList></gml:LineStringSegment>\
           <gml:LineStringSegment><gml:posList>5 5 6 6</gml:posList></gml:LineStringSegment>\
         </gml:segments></gml:Curve>",
    )
    .unwrap_err();
    assert!(matches!(err, Error::InvalidGeometry(_)));
}

#[test]
fn test_curve_unsupported_segment() {
    let err = decode(
        "<gml:Curve><gml:segments><gml:CubicSpline><gml:posList>0 0 1 1 2 0</gml:posList></gml:CubicSpline></gml:segments></gml:Curve>",
    )
    .unwrap_err();
    assert!(matches!(err, Error::UnsupportedConstruct(ref name) if name.ends_with("CubicSpline")));
}

#[test]
fn test_ring_splices_curve_members() {
    let body = "<gml:Polygon><gml:exterior><gml:Ring>\
        <gml:curveMember><gml:LineString><gml:posList>-1 0 1 0</gml:posList></gml:LineString></gml:curveMember>\
        <gml:curveMember><gml:Curve><gml:segments><gml:Arc><gml:posList>1 0 0 1 -1 0</gml:posList></gml:Arc></gml:segments></gml:Curve></gml:curveMember>\
        </gml:Ring></gml:exterior></gml:Polygon>";
    let Geometry::Polygon(polygon) = decode(body).unwrap() else {
        panic!("expected polygon");
    };
    let shell = polygon.shell().coords();
    assert_eq!(shell.len(), 26);
    assert_eq!(shell.first(), shell.last());
    assert!(shell.contains(&Coordinate::new(0.0, 1.0)));
}

#[test]
fn test_ring_rejects_empty_curve_member() {
    let body = "<gml:Polygon><gml:exterior><gml:Ring>\
        <gml:curveMember><gml:LineString><gml:posList>0 0 1 0 1 1 0 0</gml:posList></gml:LineString></gml:curveMember>\
        <gml:curveMember><gml:LineString/></gml:curveMember>\
        </gml:Ring></gml:exterior></gml:Polygon>";
    let err = decode(body).unwrap_err();
    assert!(matches!(err, Error::InvalidGeometry(ref msg) if msg.contains("at least 2 positions")));
}

#[test]
fn test_ring_rejects_composite_curve() {
    let body = "<gml:Polygon><gml:exterior><gml:Ring>\
        <gml:curveMember><gml:CompositeCurve/></gml:curveMember>\
        </gml:Ring></gml:exterior></gml:Polygon>";
    let err = decode(body).unwrap_err();
    assert!(matches!(err, Error::UnsupportedConstruct(ref name) if name.ends_with("CompositeCurve")));
}

#[test]
fn test_surface_is_multi_polygon() {
    let patch = |ring: &str| {
        format!("<gml:PolygonPatch><gml:exterior>{}</gml:exterior></gml:PolygonPatch>", ring)
    };
    let one = format!("<gml:Surface><gml:patches>{}</gml:patches></gml:Surface>", patch(SQUARE));
    let Geometry::MultiPolygon(single) = decode(&one).unwrap() else {
        panic!("expected multi polygon");
    };
    assert_eq!(single.len(), 1);

    let two = format!(
        "<gml:Surface><gml:patches>{}{}</gml:patches></gml:Surface>",
        patch(SQUARE),
        patch(HOLE)
    );
    assert_eq!(decode(&two).unwrap().geometry_type(), GeometryType::MultiPolygon);
}

#[test]
fn test_multi_surface_flattens_surfaces() {
    let patch = format!("<gml:PolygonPatch><gml:exterior>{}</gml:exterior></gml:PolygonPatch>", SQUARE);
    let body = format!(
        "<gml:MultiSurface><gml:surfaceMember><gml:Surface><gml:patches>{}{}</gml:patches></gml:Surface></gml:surfaceMember></gml:MultiSurface>",
        patch, patch
    );
    let Geometry::MultiPolygon(multi) = decode(&body).unwrap() else {
        panic!("expected multi polygon");
    };
    assert_eq!(multi.len(), 2);
}

#[test]
fn test_multi_surface_member_encodings() {
    let polygon = format!("<gml:Polygon><gml:exterior>{}</gml:exterior></gml:Polygon>", SQUARE);
    let single = format!(
        "<gml:MultiSurface><gml:surfaceMember>{}</gml:surfaceMember><gml:surfaceMember>{}</gml:surfaceMember></gml:MultiSurface>",
        polygon, polygon
    );
    let array = format!(
        "<gml:MultiSurface><gml:surfaceMembers>{}{}</gml:surfaceMembers></gml:MultiSurface>",
        polygon, polygon
    );
    assert_eq!(decode(&single).unwrap(), decode(&array).unwrap());
}

#[test]
fn test_multi_surface_rejects_unknown_member() {
    let body = "<gml:MultiSurface><gml:surfaceMember><gml:OrientableSurface/></gml:surfaceMember></gml:MultiSurface>";
    assert!(matches!(decode(body).unwrap_err(), Error::UnsupportedConstruct(_)));
}

#[test]
fn test_multi_point_encodings_match() {
    let single = "<gml:MultiPoint>\
        <gml:pointMember><gml:Point><gml:pos>1 2</gml:pos></gml:Point></gml:pointMember>\
        <gml:pointMember><gml:Point><gml:pos>3 4</gml:pos></gml:Point></gml:pointMember>\
        </gml:MultiPoint>";
    let array = "<gml:MultiPoint><gml:pointMembers>\
        <gml:Point><gml:pos>1 2</gml:pos></gml:Point>\
        <gml:Point><gml:pos>3 4</gml:pos></gml:Point>\
        </gml:pointMembers></gml:MultiPoint>";
    let a = decode(single).unwrap();
    assert_eq!(a, decode(array).unwrap());
    assert_eq!(a.num_coords(), 2);
}

#[test]
fn test_empty_collections() {
    for (body, kind) in [
        ("<gml:MultiPoint/>", GeometryType::MultiPoint),
        ("<gml:MultiPoint><gml:pointMembers/></gml:MultiPoint>", GeometryType::MultiPoint),
        ("<gml:MultiCurve></gml:MultiCurve>", GeometryType::MultiLineString),
        ("<gml:MultiSurface/>", GeometryType::MultiPolygon),
        ("<gml:MultiPolygon/>", GeometryType::MultiPolygon),
        ("<gml:MultiLineString/>", GeometryType::MultiLineString),
    ] {
        let geometry = decode(body).unwrap();
        assert_eq!(geometry.geometry_type(), kind);
        assert!(geometry.is_empty());
    }
}

#[test]
fn test_multi_point_rejects_wrong_member() {
    let body = "<gml:MultiPoint><gml:pointMember><gml:LineString><gml:posList>0 0 1 1</gml:posList></gml:LineString></gml:pointMember></gml:MultiPoint>";
    assert!(decode(body).unwrap_err().is_structure());

    let body = "<gml:MultiPoint><gml:curveMember/></gml:MultiPoint>";
    assert!(decode(body).unwrap_err().is_structure());
}

#[test]
fn test_multi_line_string() {
    let body = "<gml:MultiLineString>\
        <gml:lineStringMember><gml:LineString><gml:posList>0 0 1 1</gml:posList></gml:LineString></gml:lineStringMember>\
        <gml:lineStringMember><gml:LineString><gml:posList>2 2 3 3 4 4</gml:posList></gml:LineString></gml:lineStringMember>\
        </gml:MultiLineString>";
    let Geometry::MultiLineString(multi) = decode(body).unwrap() else {
        panic!("expected multi line string");
    };
    assert_eq!(multi.len(), 2);
    assert_eq!(multi.line_strings()[1].len(), 3);
}

#[test]
fn test_multi_curve_members() {
    let body = "<gml:MultiCurve>\
        <gml:curveMember><gml:LineString><gml:posList>0 0 1 1</gml:posList></gml:LineString></gml:curveMember>\
        <gml:curveMember><gml:Curve><gml:segments><gml:LineStringSegment><gml:posList>5 5 6 6</gml:posList></gml:LineStringSegment></gml:segments></gml:Curve></gml:curveMember>\
        </gml:MultiCurve>";
    let Geometry::MultiLineString(multi) = decode(body).unwrap() else {
        panic!("expected multi line string");
    };
    assert_eq!(multi.len(), 2);

    let array = "<gml:MultiCurve><gml:curveMembers>\
        <gml:LineString><gml:posList>0 0 1 1</gml:posList></gml:LineString>\
        <gml:Curve><gml:segments><gml:LineStringSegment><gml:posList>5 5 6 6</gml:posList></gml:LineStringSegment></gml:segments></gml:Curve>\
        </gml:curveMembers></gml:MultiCurve>";
    assert_eq!(decode(array).unwrap(), Geometry::MultiLineString(multi));
}

#[test]
fn test_multi_curve_rejects_composite_and_orientable() {
    for member in ["<gml:CompositeCurve/>", "<gml:OrientableCurve/>"] {
        let body = format!(
            "<gml:MultiCurve><gml:curveMember>{}</gml:curveMember></gml:MultiCurve>",
            member
        );
        assert!(matches!(decode(&body).unwrap_err(), Error::UnsupportedConstruct(_)));
    }
}

#[test]
fn test_multi_polygon() {
    let body = format!(
        "<gml:MultiPolygon><gml:polygonMember><gml:Polygon><gml:outerBoundaryIs>{}</gml:outerBoundaryIs></gml:Polygon></gml:polygonMember></gml:MultiPolygon>",
        SQUARE
    );
    let Geometry::MultiPolygon(multi) = decode(&body).unwrap() else {
        panic!("expected multi polygon");
    };
    assert_eq!(multi.len(), 1);
}

#[test]
fn test_unrecognized_elements() {
    let err = decode("<gml:Foo/>").unwrap_err();
    assert!(matches!(err, Error::UnrecognizedElement(ref name) if name == "Foo"));

    // Valid GML element, but not a top-level geometry
    let err = decode("<gml:Ring/>").unwrap_err();
    assert!(matches!(err, Error::UnrecognizedElement(ref name) if name == "Ring"));
}

#[test]
fn test_foreign_namespace_is_structure_error() {
    assert!(decode("<other:Point><other:pos>1 2</other:pos></other:Point>")
        .unwrap_err()
        .is_structure());
    assert!(decode("<Point/>").unwrap_err().is_structure());
}

#[test]
fn test_gml_32_namespace() {
    let a = decode("<g32:Point><g32:pos>1 2</g32:pos></g32:Point>").unwrap();
    let b = decode("<gml:Point><gml:pos>1 2</gml:pos></gml:Point>").unwrap();
    assert_eq!(a, b);

    // Children must stay in the namespace of the top-level element
    let mixed = decode("<g32:Point><gml:pos>1 2</gml:pos></g32:Point>").unwrap_err();
    assert!(mixed.is_structure());
}

#[test]
fn test_not_on_start_tag() {
    let mut cursor = QuickXmlCursor::new("<gml:Point xmlns:gml=\"http://www.opengis.net/gml\"/>");
    let err = GeometryStreamDecoder::new().decode(&mut cursor).unwrap_err();
    assert!(err.is_structure());
}

#[test]
fn test_srs_name_forms() {
    let crs_of = |srs: &str| {
        let body = format!(
            r#"<gml:Point srsName="{}"><gml:pos>1 2</gml:pos></gml:Point>"#,
            srs
        );
        decode(&body).unwrap().crs().clone()
    };
    assert_eq!(crs_of("EPSG:900913"), CrsHandle::web_mercator());
    assert_eq!(crs_of("urn:ogc:def:crs:EPSG::900913"), CrsHandle::web_mercator());
    assert_eq!(crs_of("http://www.opengis.net/gml/srs/epsg.xml#28992").code(), "28992");
    assert_eq!(crs_of("urn:ogc:def:crs:EPSG::4258").identifier(), "EPSG:4258");
}

#[test]
fn test_unresolvable_srs_name() {
    let err = decode(r#"<gml:Point srsName="WGS84"><gml:pos>1 2</gml:pos></gml:Point>"#)
        .unwrap_err();
    assert!(matches!(
        err,
        Error::Core(gml_stream_core::Error::CrsResolution(CrsError::Unrecognized(_)))
    ));
}

#[test]
fn test_member_srs_name_overrides_parent() {
    let body = r#"<gml:MultiPoint srsName="EPSG:3857">
        <gml:pointMember><gml:Point><gml:pos>1 2</gml:pos></gml:Point></gml:pointMember>
        <gml:pointMember><gml:Point srsName="EPSG:4258"><gml:pos>3 4</gml:pos></gml:Point></gml:pointMember>
        </gml:MultiPoint>"#;
    let Geometry::MultiPoint(multi) = decode(body).unwrap() else {
        panic!("expected multi point");
    };
    assert_eq!(multi.crs(), &CrsHandle::web_mercator());
    assert_eq!(multi.points()[0].crs(), &CrsHandle::web_mercator());
    assert_eq!(multi.points()[1].crs().code(), "4258");
}

#[test]
fn test_default_crs_from_config() {
    let config = DecoderConfig::default().with_default_crs(CrsHandle::new("EPSG", "25832"));
    let mut decoder = GeometryStreamDecoder::with_config(config);
    let geometry = decode_with(&mut decoder, "<gml:Point><gml:pos>1 2</gml:pos></gml:Point>").unwrap();
    assert_eq!(geometry.crs().code(), "25832");
}

#[test]
fn test_custom_srs_resolver() {
    let mut decoder = GeometryStreamDecoder::new().with_srs_resolver(|name: &str| {
        if name == "local" {
            Ok(CrsHandle::new("LOCAL", "1"))
        } else {
            Err(CrsError::Unrecognized(name.to_string()))
        }
    });
    let geometry = decode_with(
        &mut decoder,
        r#"<gml:Point srsName="local"><gml:pos>1 2</gml:pos></gml:Point>"#,
    )
    .unwrap();
    assert_eq!(geometry.crs().identifier(), "LOCAL:1");
}

#[test]
fn test_axis_order_predicate() {
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&calls);
    let mut decoder = GeometryStreamDecoder::new().with_axis_order_predicate(move |crs| {
        counter.fetch_add(1, Ordering::SeqCst);
        crs.code() == "4326"
    });

    for _ in 0..3 {
        let swapped = decode_with(
            &mut decoder,
            r#"<gml:Point srsName="urn:ogc:def:crs:EPSG::4326"><gml:pos>52 4</gml:pos></gml:Point>"#,
        )
        .unwrap();
        let Geometry::Point(point) = swapped else {
            panic!("expected point");
        };
        assert_eq!(point.coord(), Coordinate::new(4.0, 52.0));

        let kept = decode_with(
            &mut decoder,
            r#"<gml:Point srsName="EPSG:3857"><gml:pos>52 4</gml:pos></gml:Point>"#,
        )
        .unwrap();
        let Geometry::Point(point) = kept else {
            panic!("expected point");
        };
        assert_eq!(point.coord(), Coordinate::new(52.0, 4.0));
    }

    // Default CRS (EPSG:4326) plus EPSG:3857, each evaluated once
    assert_eq!(calls.load(Ordering::SeqCst), 2);
    assert_eq!(decoder.axis_order_cache_len(), 2);

    decoder.clear_axis_order_cache();
    assert_eq!(decoder.axis_order_cache_len(), 0);
}

#[test]
fn test_dtd_guard() {
    let xml = r#"<!DOCTYPE gml:Point><gml:Point xmlns:gml="http://www.opengis.net/gml"><gml:pos>1 2</gml:pos></gml:Point>"#;

    let mut cursor = QuickXmlCursor::new(xml).with_dtd_support(true);
    cursor.advance_to_start().unwrap();
    let mut decoder = GeometryStreamDecoder::new();
    let err = decoder.decode(&mut cursor).unwrap_err();
    assert!(matches!(
        err,
        Error::Core(gml_stream_core::Error::Configuration(_))
    ));

    decoder.set_unsafe_xml_allowed(true);
    let geometry = decoder.decode(&mut cursor).unwrap();
    assert_eq!(geometry.geometry_type(), GeometryType::Point);
    assert!(cursor.is_end());
}

#[test]
fn test_custom_curve_factory() {
    struct ControlPointsOnly;
    impl crate::CurvedGeometryFactory for ControlPointsOnly {
        fn tolerance(&self) -> f64 {
            0.0
        }
        fn linearize_arc(&self, control_points: &[Coordinate]) -> crate::Result<Vec<Coordinate>> {
            Ok(control_points.to_vec())
        }
    }

    let mut decoder = GeometryStreamDecoder::new().with_curve_factory(ControlPointsOnly);
    assert_eq!(decoder.config().curve_tolerance, 0.0);
    let geometry = decode_with(
        &mut decoder,
        "<gml:Curve><gml:segments><gml:Arc><gml:posList>1 0 2 1 3 0</gml:posList></gml:Arc></gml:segments></gml:Curve>",
    )
    .unwrap();
    assert_eq!(geometry.num_coords(), 3);
}

#[test]
fn test_curve_segments_stay_raw_until_assembled() {
    let xml = format!(
        "<gml:Curve xmlns:gml=\"{}\"><gml:segments><gml:Arc><gml:posList>1 0 2 1 3 0</gml:posList></gml:Arc></gml:segments></gml:Curve>",
        GML_3_1_NAMESPACE
    );
    let mut cursor = QuickXmlCursor::at_root(&xml).unwrap();
    let mut decoder = GeometryStreamDecoder::new();
    let root = super::Context {
        namespace: gml_stream_core::GmlNamespace::Gml31,
        crs: CrsHandle::wgs84(),
        dimension: 2,
        invert_axis: false,
    };
    let curve = decoder.parse_curve_segments(&mut cursor, &root).unwrap();
    assert_eq!(
        curve.segments(),
        &[CurveSegment::Arc(coords(&[(1.0, 0.0), (2.0, 1.0), (3.0, 0.0)]))]
    );
    assert!(cursor.is_end());
}

#[test]
fn test_decoder_is_send() {
    fn assert_send<T: Send>() {}
    assert_send::<GeometryStreamDecoder>();
}
