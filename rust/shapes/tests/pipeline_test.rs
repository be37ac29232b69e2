// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! End-to-end parse -> materialize pipeline tests.

use approx::assert_relative_eq;
use wkt_lite_core::{parse_wkt, GeometryKind};
use wkt_lite_shapes::{materialize, parse_and_materialize, Shape};

/// A spread of valid WKT covering every kind, dimensionality, and the
/// explicit-empty convention.
const VALID_CORPUS: &[&str] = &[
    "POINT (19 23)",
    "POINT EMPTY",
    "POINT Z (1 2 3)",
    "POINTZ(1 2 3)",
    "POINT M (1 2 9)",
    "POINT ZM (1 2 3 4)",
    "LINESTRING (0 0, 1 1, 2 2)",
    "LINESTRING EMPTY",
    "LINESTRING ZM (0 0 0 0, 1 1 1 1)",
    "POLYGON ((0 0, 4 0, 4 4, 0 4, 0 0))",
    "POLYGON ((0 0, 4 0, 4 4, 0 4, 0 0), (1 1, 2 1, 2 2, 1 2, 1 1))",
    "POLYGON EMPTY",
    "MULTIPOINT (1 2, 3 4)",
    "MULTIPOINT ((1 2), (3 4), EMPTY)",
    "MULTIPOINT EMPTY",
    "MULTILINESTRING ((0 0, 1 1), EMPTY, (2 2, 3 3))",
    "MULTIPOLYGON (((0 0, 1 0, 1 1, 0 0)), EMPTY)",
    "GEOMETRYCOLLECTION (POINT (1 2), LINESTRING (0 0, 1 1))",
    "GEOMETRYCOLLECTION (GEOMETRYCOLLECTION (POINT (1 2)), POLYGON ((0 0, 1 0, 1 1, 0 0)))",
    "GEOMETRYCOLLECTION EMPTY",
    "POINT (1 2) POINT (3 4) LINESTRING (5 6, 7 8)",
    "point(1.5e3 -2.5E-1)",
];

#[test]
fn valid_wkt_never_fails_materialization() {
    for input in VALID_CORPUS {
        let roots = parse_wkt(input).unwrap_or_else(|e| panic!("parse {:?}: {}", input, e));
        for root in &roots {
            let shapes =
                materialize(root).unwrap_or_else(|e| panic!("materialize {:?}: {}", input, e));
            assert_eq!(shapes.len(), root.shape_count(), "input {:?}", input);
        }
    }
}

#[test]
fn parse_twice_yields_equal_trees() {
    for input in VALID_CORPUS {
        assert_eq!(
            parse_wkt(input).unwrap(),
            parse_wkt(input).unwrap(),
            "input {:?}",
            input
        );
    }
}

#[test]
fn point_pipeline() {
    let shapes = parse_and_materialize("POINT (19 23)").unwrap();
    assert_eq!(shapes.len(), 1);
    match &shapes[0] {
        Shape::Marker(marker) => {
            assert_relative_eq!(marker.vertex.position.x, 19.0);
            assert_relative_eq!(marker.vertex.position.y, 23.0);
        }
        other => panic!("expected Marker, got {:?}", other),
    }
}

#[test]
fn collection_pipeline_preserves_order() {
    let shapes =
        parse_and_materialize("GEOMETRYCOLLECTION (POINT (1 2), LINESTRING (0 0, 1 1))").unwrap();
    assert_eq!(shapes.len(), 2);
    assert!(matches!(shapes[0], Shape::Marker(_)));
    assert!(matches!(shapes[1], Shape::Polyline(_)));
}

#[test]
fn multi_statement_pipeline() {
    let shapes = parse_and_materialize("POINT (1 2) POINT EMPTY LINESTRING (0 0, 1 1)").unwrap();
    assert_eq!(shapes.len(), 2);
}

#[test]
fn elevation_survives_the_pipeline() {
    let shapes = parse_and_materialize("LINESTRING Z (0 0 10, 1 1 20)").unwrap();
    match &shapes[0] {
        Shape::Polyline(line) => {
            assert_relative_eq!(line.vertices[0].position.z, 10.0);
            assert_relative_eq!(line.vertices[1].position.z, 20.0);
        }
        other => panic!("expected Polyline, got {:?}", other),
    }
}

#[test]
fn parse_errors_surface_through_the_pipeline() {
    let err = parse_and_materialize("LINESTRING (0 0)").unwrap_err();
    assert!(err.to_string().contains("at least 2"), "{}", err);

    let err = parse_and_materialize("POINT (1 2").unwrap_err();
    assert!(err.to_string().contains("end of input"), "{}", err);
}

#[test]
fn traversal_from_pipeline_roots() {
    let roots = parse_wkt(
        "GEOMETRYCOLLECTION (POINT (1 2), GEOMETRYCOLLECTION (POINT (3 4), POINT EMPTY))",
    )
    .unwrap();
    assert_eq!(roots[0].nodes_of_kind(GeometryKind::Point).count(), 3);
    assert_eq!(roots[0].shape_count(), 2);
}
