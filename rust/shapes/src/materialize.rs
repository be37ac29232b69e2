// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Shape Materializer
//!
//! Turns a geometry node into zero, one, or many shape primitives.
//! Deterministic and pure: borrows the node, never mutates it, performs
//! no I/O. Dispatch is an exhaustive match over the closed geometry
//! enum, so a newly added kind cannot be silently skipped.

use wkt_lite_core::{parse_wkt, Geometry, LineString, Point, Polygon};

use crate::error::{Error, Result};
use crate::shape::{MarkerShape, PolygonShape, PolylineShape, Shape, ShapeVertex};

/// Materialize one geometry node into its shape primitives, in order.
///
/// Empty geometries (and empty members of aggregates) contribute no
/// shapes. Collections concatenate their children's shapes recursively,
/// preserving order and duplicates.
pub fn materialize(geometry: &Geometry) -> Result<Vec<Shape>> {
    let mut shapes = Vec::with_capacity(geometry.shape_count());
    collect(geometry, &mut shapes)?;
    Ok(shapes)
}

/// Parse a WKT buffer and materialize every root, concatenating the
/// shapes in root order.
pub fn parse_and_materialize(input: &str) -> Result<Vec<Shape>> {
    let roots = parse_wkt(input)?;
    let mut shapes = Vec::with_capacity(roots.iter().map(|g| g.shape_count()).sum());
    for root in &roots {
        collect(root, &mut shapes)?;
    }
    Ok(shapes)
}

fn collect(geometry: &Geometry, out: &mut Vec<Shape>) -> Result<()> {
    match geometry {
        Geometry::Point(point) => collect_point(point, out),
        Geometry::LineString(line) => collect_line_string(line, out),
        Geometry::Polygon(polygon) => collect_polygon(polygon, out)?,
        Geometry::MultiPoint(multi) => {
            for point in &multi.points {
                collect_point(point, out);
            }
        }
        Geometry::MultiLineString(multi) => {
            for line in &multi.line_strings {
                collect_line_string(line, out);
            }
        }
        Geometry::MultiPolygon(multi) => {
            for polygon in &multi.polygons {
                collect_polygon(polygon, out)?;
            }
        }
        Geometry::GeometryCollection(collection) => {
            for child in &collection.geometries {
                collect(child, out)?;
            }
        }
    }
    Ok(())
}

fn collect_point(point: &Point, out: &mut Vec<Shape>) {
    if let Some(coord) = &point.coordinate {
        out.push(Shape::Marker(MarkerShape {
            vertex: ShapeVertex::from_coordinate(coord),
            dimension: point.dimension,
        }));
    }
}

fn collect_line_string(line: &LineString, out: &mut Vec<Shape>) {
    if line.coordinates.is_empty() {
        return;
    }
    out.push(Shape::Polyline(PolylineShape {
        vertices: line.coordinates.iter().map(ShapeVertex::from_coordinate).collect(),
        dimension: line.dimension,
    }));
}

fn collect_polygon(polygon: &Polygon, out: &mut Vec<Shape>) -> Result<()> {
    let Some((exterior, holes)) = polygon.rings.split_first() else {
        return Ok(());
    };
    // The grammar rejects rings with fewer than 4 coordinates; one
    // arriving here means a broken upstream invariant.
    for ring in &polygon.rings {
        if ring.len() < 4 {
            return Err(Error::DegenerateRing(ring.len()));
        }
    }
    out.push(Shape::Polygon(PolygonShape {
        boundary: exterior.iter().map(ShapeVertex::from_coordinate).collect(),
        holes: holes
            .iter()
            .map(|ring| ring.iter().map(ShapeVertex::from_coordinate).collect())
            .collect(),
        dimension: polygon.dimension,
    }));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use wkt_lite_core::{Coordinate, Dimension};

    fn shapes(input: &str) -> Vec<Shape> {
        parse_and_materialize(input).unwrap()
    }

    #[test]
    fn test_point_marker() {
        let shapes = shapes("POINT (19 23)");
        assert_eq!(shapes.len(), 1);
        match &shapes[0] {
            Shape::Marker(marker) => {
                assert_eq!(marker.vertex.position.x, 19.0);
                assert_eq!(marker.vertex.position.y, 23.0);
                assert_eq!(marker.vertex.position.z, 0.0);
                assert_eq!(marker.vertex.measure, None);
            }
            other => panic!("expected Marker, got {:?}", other),
        }
    }

    #[test]
    fn test_empty_geometries_yield_no_shapes() {
        assert!(shapes("POINT EMPTY").is_empty());
        assert!(shapes("MULTIPOLYGON EMPTY").is_empty());
        assert!(shapes("GEOMETRYCOLLECTION (POINT EMPTY, LINESTRING EMPTY)").is_empty());
    }

    #[test]
    fn test_polyline_vertices() {
        let shapes = shapes("LINESTRING (0 0, 1 1, 2 2)");
        assert_eq!(shapes.len(), 1);
        match &shapes[0] {
            Shape::Polyline(line) => assert_eq!(line.vertices.len(), 3),
            other => panic!("expected Polyline, got {:?}", other),
        }
    }

    #[test]
    fn test_polygon_with_hole() {
        let shapes = shapes("POLYGON ((0 0, 4 0, 4 4, 0 4, 0 0), (1 1, 2 1, 2 2, 1 2, 1 1))");
        assert_eq!(shapes.len(), 1);
        match &shapes[0] {
            Shape::Polygon(polygon) => {
                assert_eq!(polygon.boundary.len(), 5);
                assert_eq!(polygon.holes.len(), 1);
                assert_eq!(polygon.holes[0].len(), 5);
            }
            other => panic!("expected Polygon, got {:?}", other),
        }
        assert_eq!(shapes[0].vertex_count(), 10);
    }

    #[test]
    fn test_collection_order_and_duplicates_preserved() {
        let shapes = shapes(
            "GEOMETRYCOLLECTION (POINT (1 2), LINESTRING (0 0, 1 1), POINT (1 2))",
        );
        assert_eq!(shapes.len(), 3);
        assert!(matches!(shapes[0], Shape::Marker(_)));
        assert!(matches!(shapes[1], Shape::Polyline(_)));
        assert_eq!(shapes[0], shapes[2]);
    }

    #[test]
    fn test_z_and_m_carried_through() {
        let shapes = shapes("POINT ZM (1 2 3 4)");
        match &shapes[0] {
            Shape::Marker(marker) => {
                assert_eq!(marker.vertex.position.z, 3.0);
                assert_eq!(marker.vertex.measure, Some(4.0));
                assert_eq!(marker.dimension, Dimension::Xyzm);
            }
            other => panic!("expected Marker, got {:?}", other),
        }
    }

    #[test]
    fn test_degenerate_ring_is_invariant_violation() {
        // Hand-built node the parser would never produce.
        let polygon = Polygon {
            dimension: Dimension::Xy,
            rings: vec![vec![
                Coordinate::xy(0.0, 0.0),
                Coordinate::xy(1.0, 0.0),
                Coordinate::xy(0.0, 0.0),
            ]],
        };
        let err = materialize(&Geometry::Polygon(polygon)).unwrap_err();
        assert!(matches!(err, Error::DegenerateRing(3)));
    }
}
