// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Shape primitive data structures
//!
//! Renderer-ready drawables produced from the geometry object model:
//! point markers, polylines, and filled polygons. Visual attributes are
//! not modeled here; a host rendering layer attaches them to the shapes
//! it receives.

use nalgebra::Point3;
use wkt_lite_core::{Coordinate, Dimension};

/// One shape vertex. Coordinates without elevation get z = 0; the
/// owning shape's [`Dimension`] records what was actually declared, so
/// no source data is dropped.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShapeVertex {
    pub position: Point3<f64>,
    /// Linear-referencing measure, carried verbatim when present.
    pub measure: Option<f64>,
}

impl ShapeVertex {
    /// Build a vertex from a parsed coordinate.
    #[inline]
    pub fn from_coordinate(coord: &Coordinate) -> Self {
        Self {
            position: Point3::new(coord.x, coord.y, coord.z.unwrap_or(0.0)),
            measure: coord.m,
        }
    }
}

/// Point-marker primitive.
#[derive(Debug, Clone, PartialEq)]
pub struct MarkerShape {
    pub vertex: ShapeVertex,
    pub dimension: Dimension,
}

/// Polyline primitive over an ordered vertex run.
#[derive(Debug, Clone, PartialEq)]
pub struct PolylineShape {
    pub vertices: Vec<ShapeVertex>,
    pub dimension: Dimension,
}

/// Filled-polygon primitive: exterior boundary plus interior holes.
#[derive(Debug, Clone, PartialEq)]
pub struct PolygonShape {
    pub boundary: Vec<ShapeVertex>,
    pub holes: Vec<Vec<ShapeVertex>>,
    pub dimension: Dimension,
}

/// A renderable shape primitive.
#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    Marker(MarkerShape),
    Polyline(PolylineShape),
    Polygon(PolygonShape),
}

impl Shape {
    /// Declared dimensionality of the source geometry.
    pub fn dimension(&self) -> Dimension {
        match self {
            Shape::Marker(s) => s.dimension,
            Shape::Polyline(s) => s.dimension,
            Shape::Polygon(s) => s.dimension,
        }
    }

    /// Total vertices across the shape, holes included.
    pub fn vertex_count(&self) -> usize {
        match self {
            Shape::Marker(_) => 1,
            Shape::Polyline(s) => s.vertices.len(),
            Shape::Polygon(s) => {
                s.boundary.len() + s.holes.iter().map(|h| h.len()).sum::<usize>()
            }
        }
    }
}
