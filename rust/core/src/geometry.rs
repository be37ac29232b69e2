// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Geometry Object Model
//!
//! The typed tree produced by parsing WKT text. Nodes are built in a
//! single parse pass and are immutable afterwards; collections own
//! their children by value, so the tree has no back-references and no
//! cycles.

use std::fmt;

use rustc_hash::FxHashMap;

/// Coordinate dimensionality declared by a geometry's `Z`/`M`/`ZM`
/// suffix. Uniform within a geometry and across a collection's
/// children; absence of a suffix means [`Dimension::Xy`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Dimension {
    #[default]
    Xy,
    Xyz,
    Xym,
    Xyzm,
}

impl Dimension {
    /// Number of numeric components in one coordinate tuple.
    #[inline]
    pub fn coord_size(self) -> usize {
        match self {
            Dimension::Xy => 2,
            Dimension::Xyz | Dimension::Xym => 3,
            Dimension::Xyzm => 4,
        }
    }

    #[inline]
    pub fn has_z(self) -> bool {
        matches!(self, Dimension::Xyz | Dimension::Xyzm)
    }

    #[inline]
    pub fn has_m(self) -> bool {
        matches!(self, Dimension::Xym | Dimension::Xyzm)
    }

    /// Parse a dimension suffix (`Z`, `M`, `ZM`), case-insensitive.
    pub fn from_suffix(text: &str) -> Option<Dimension> {
        if text.eq_ignore_ascii_case("Z") {
            Some(Dimension::Xyz)
        } else if text.eq_ignore_ascii_case("M") {
            Some(Dimension::Xym)
        } else if text.eq_ignore_ascii_case("ZM") {
            Some(Dimension::Xyzm)
        } else {
            None
        }
    }

    /// The WKT suffix for this dimensionality (empty for XY).
    pub fn suffix(self) -> &'static str {
        match self {
            Dimension::Xy => "",
            Dimension::Xyz => "Z",
            Dimension::Xym => "M",
            Dimension::Xyzm => "ZM",
        }
    }
}

/// One coordinate tuple. Which optional components are populated is
/// governed by the owning geometry's [`Dimension`].
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Coordinate {
    pub x: f64,
    pub y: f64,
    pub z: Option<f64>,
    pub m: Option<f64>,
}

impl Coordinate {
    /// Create a 2D coordinate.
    #[inline]
    pub fn xy(x: f64, y: f64) -> Self {
        Self {
            x,
            y,
            z: None,
            m: None,
        }
    }

    /// Assemble a coordinate from `dimension.coord_size()` components
    /// in WKT order (x, y, then z and/or m as declared).
    pub fn from_components(dimension: Dimension, components: &[f64]) -> Self {
        debug_assert_eq!(components.len(), dimension.coord_size());
        let mut coord = Coordinate::xy(components[0], components[1]);
        match dimension {
            Dimension::Xy => {}
            Dimension::Xyz => coord.z = Some(components[2]),
            Dimension::Xym => coord.m = Some(components[2]),
            Dimension::Xyzm => {
                coord.z = Some(components[2]);
                coord.m = Some(components[3]);
            }
        }
        coord
    }
}

/// Kind tag for a [`Geometry`] node, without its payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum GeometryKind {
    Point,
    LineString,
    Polygon,
    MultiPoint,
    MultiLineString,
    MultiPolygon,
    GeometryCollection,
}

impl GeometryKind {
    /// Match a WKT geometry-type keyword, case-insensitive.
    pub fn from_keyword(text: &str) -> Option<GeometryKind> {
        const KEYWORDS: [(&str, GeometryKind); 7] = [
            ("POINT", GeometryKind::Point),
            ("LINESTRING", GeometryKind::LineString),
            ("POLYGON", GeometryKind::Polygon),
            ("MULTIPOINT", GeometryKind::MultiPoint),
            ("MULTILINESTRING", GeometryKind::MultiLineString),
            ("MULTIPOLYGON", GeometryKind::MultiPolygon),
            ("GEOMETRYCOLLECTION", GeometryKind::GeometryCollection),
        ];
        KEYWORDS
            .iter()
            .find(|(keyword, _)| text.eq_ignore_ascii_case(keyword))
            .map(|(_, kind)| *kind)
    }

    /// The canonical WKT keyword.
    pub fn keyword(self) -> &'static str {
        match self {
            GeometryKind::Point => "POINT",
            GeometryKind::LineString => "LINESTRING",
            GeometryKind::Polygon => "POLYGON",
            GeometryKind::MultiPoint => "MULTIPOINT",
            GeometryKind::MultiLineString => "MULTILINESTRING",
            GeometryKind::MultiPolygon => "MULTIPOLYGON",
            GeometryKind::GeometryCollection => "GEOMETRYCOLLECTION",
        }
    }
}

impl fmt::Display for GeometryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

/// A point: exactly one coordinate, or explicitly empty.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Point {
    pub dimension: Dimension,
    /// `None` for `POINT EMPTY`; the type and dimensionality survive
    /// emptiness.
    pub coordinate: Option<Coordinate>,
}

/// A line string: 0 (empty) or >= 2 coordinates. The parser rejects a
/// single-coordinate line.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LineString {
    pub dimension: Dimension,
    pub coordinates: Vec<Coordinate>,
}

/// A polygon: first ring is the exterior, the remainder are holes.
/// Each ring has >= 4 coordinates with first == last; closure is
/// required by the grammar, never auto-applied.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Polygon {
    pub dimension: Dimension,
    pub rings: Vec<Vec<Coordinate>>,
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MultiPoint {
    pub dimension: Dimension,
    pub points: Vec<Point>,
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MultiLineString {
    pub dimension: Dimension,
    pub line_strings: Vec<LineString>,
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MultiPolygon {
    pub dimension: Dimension,
    pub polygons: Vec<Polygon>,
}

/// An ordered collection of geometries of any kind, including nested
/// collections. The one recursive case of the model.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GeometryCollection {
    pub dimension: Dimension,
    pub geometries: Vec<Geometry>,
}

/// A parsed WKT geometry: a closed sum over the supported kinds.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Geometry {
    Point(Point),
    LineString(LineString),
    Polygon(Polygon),
    MultiPoint(MultiPoint),
    MultiLineString(MultiLineString),
    MultiPolygon(MultiPolygon),
    GeometryCollection(GeometryCollection),
}

impl Geometry {
    /// Kind tag of this node.
    pub fn kind(&self) -> GeometryKind {
        match self {
            Geometry::Point(_) => GeometryKind::Point,
            Geometry::LineString(_) => GeometryKind::LineString,
            Geometry::Polygon(_) => GeometryKind::Polygon,
            Geometry::MultiPoint(_) => GeometryKind::MultiPoint,
            Geometry::MultiLineString(_) => GeometryKind::MultiLineString,
            Geometry::MultiPolygon(_) => GeometryKind::MultiPolygon,
            Geometry::GeometryCollection(_) => GeometryKind::GeometryCollection,
        }
    }

    /// Declared coordinate dimensionality.
    pub fn dimension(&self) -> Dimension {
        match self {
            Geometry::Point(g) => g.dimension,
            Geometry::LineString(g) => g.dimension,
            Geometry::Polygon(g) => g.dimension,
            Geometry::MultiPoint(g) => g.dimension,
            Geometry::MultiLineString(g) => g.dimension,
            Geometry::MultiPolygon(g) => g.dimension,
            Geometry::GeometryCollection(g) => g.dimension,
        }
    }

    /// True when the node holds no coordinate data (deep for
    /// aggregates: a collection of empty geometries is empty).
    pub fn is_empty(&self) -> bool {
        match self {
            Geometry::Point(g) => g.coordinate.is_none(),
            Geometry::LineString(g) => g.coordinates.is_empty(),
            Geometry::Polygon(g) => g.rings.is_empty(),
            Geometry::MultiPoint(g) => g.points.iter().all(|p| p.coordinate.is_none()),
            Geometry::MultiLineString(g) => {
                g.line_strings.iter().all(|l| l.coordinates.is_empty())
            }
            Geometry::MultiPolygon(g) => g.polygons.iter().all(|p| p.rings.is_empty()),
            Geometry::GeometryCollection(g) => g.geometries.iter().all(|c| c.is_empty()),
        }
    }

    /// Number of shape primitives materializing this node will yield.
    /// Lets callers size buffers before materialization.
    pub fn shape_count(&self) -> usize {
        match self {
            Geometry::Point(g) => usize::from(g.coordinate.is_some()),
            Geometry::LineString(g) => usize::from(!g.coordinates.is_empty()),
            Geometry::Polygon(g) => usize::from(!g.rings.is_empty()),
            Geometry::MultiPoint(g) => g.points.iter().filter(|p| p.coordinate.is_some()).count(),
            Geometry::MultiLineString(g) => g
                .line_strings
                .iter()
                .filter(|l| !l.coordinates.is_empty())
                .count(),
            Geometry::MultiPolygon(g) => {
                g.polygons.iter().filter(|p| !p.rings.is_empty()).count()
            }
            Geometry::GeometryCollection(g) => {
                g.geometries.iter().map(|c| c.shape_count()).sum()
            }
        }
    }

    /// Total number of coordinate tuples in the subtree.
    pub fn point_count(&self) -> usize {
        match self {
            Geometry::Point(g) => usize::from(g.coordinate.is_some()),
            Geometry::LineString(g) => g.coordinates.len(),
            Geometry::Polygon(g) => g.rings.iter().map(|r| r.len()).sum(),
            Geometry::MultiPoint(g) => {
                g.points.iter().filter(|p| p.coordinate.is_some()).count()
            }
            Geometry::MultiLineString(g) => {
                g.line_strings.iter().map(|l| l.coordinates.len()).sum()
            }
            Geometry::MultiPolygon(g) => g
                .polygons
                .iter()
                .flat_map(|p| p.rings.iter())
                .map(|r| r.len())
                .sum(),
            Geometry::GeometryCollection(g) => {
                g.geometries.iter().map(|c| c.point_count()).sum()
            }
        }
    }

    /// Lazy pre-order traversal over this node and every geometry
    /// nested in collections below it, yielding nodes of `kind`.
    /// Restartable: each call returns a fresh iterator.
    pub fn nodes_of_kind(&self, kind: GeometryKind) -> NodesOfKind<'_> {
        NodesOfKind {
            kind,
            stack: vec![self],
        }
    }

    /// Count nodes per kind across this node and every geometry nested
    /// in collections below it.
    pub fn kind_counts(&self) -> FxHashMap<GeometryKind, usize> {
        let mut counts = FxHashMap::default();
        let mut stack = vec![self];
        while let Some(node) = stack.pop() {
            *counts.entry(node.kind()).or_insert(0) += 1;
            if let Geometry::GeometryCollection(collection) = node {
                stack.extend(collection.geometries.iter().rev());
            }
        }
        counts
    }

    /// Axis-aligned bounds over every coordinate in the subtree, or
    /// `None` when the subtree is empty.
    pub fn bounding_box(&self) -> Option<BoundingBox> {
        let mut bounds: Option<BoundingBox> = None;
        self.for_each_coordinate(&mut |coord| match &mut bounds {
            Some(b) => b.extend(coord),
            None => bounds = Some(BoundingBox::from_coordinate(coord)),
        });
        bounds
    }

    fn for_each_coordinate(&self, f: &mut impl FnMut(&Coordinate)) {
        match self {
            Geometry::Point(g) => {
                if let Some(coord) = &g.coordinate {
                    f(coord);
                }
            }
            Geometry::LineString(g) => g.coordinates.iter().for_each(&mut *f),
            Geometry::Polygon(g) => g.rings.iter().flatten().for_each(&mut *f),
            Geometry::MultiPoint(g) => {
                g.points.iter().filter_map(|p| p.coordinate.as_ref()).for_each(&mut *f)
            }
            Geometry::MultiLineString(g) => {
                g.line_strings.iter().flat_map(|l| &l.coordinates).for_each(&mut *f)
            }
            Geometry::MultiPolygon(g) => g
                .polygons
                .iter()
                .flat_map(|p| &p.rings)
                .flatten()
                .for_each(&mut *f),
            Geometry::GeometryCollection(g) => {
                for child in &g.geometries {
                    child.for_each_coordinate(f);
                }
            }
        }
    }
}

/// Iterator behind [`Geometry::nodes_of_kind`]. Uses an explicit stack
/// so deeply nested collections cannot overflow the call stack during
/// traversal.
#[derive(Debug)]
pub struct NodesOfKind<'a> {
    kind: GeometryKind,
    stack: Vec<&'a Geometry>,
}

impl<'a> Iterator for NodesOfKind<'a> {
    type Item = &'a Geometry;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(node) = self.stack.pop() {
            if let Geometry::GeometryCollection(collection) = node {
                self.stack.extend(collection.geometries.iter().rev());
            }
            if node.kind() == self.kind {
                return Some(node);
            }
        }
        None
    }
}

/// Axis-aligned bounding box over a geometry subtree. Z bounds are
/// present only when the underlying coordinates carry elevation.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BoundingBox {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
    pub min_z: Option<f64>,
    pub max_z: Option<f64>,
}

impl BoundingBox {
    fn from_coordinate(coord: &Coordinate) -> Self {
        Self {
            min_x: coord.x,
            min_y: coord.y,
            max_x: coord.x,
            max_y: coord.y,
            min_z: coord.z,
            max_z: coord.z,
        }
    }

    fn extend(&mut self, coord: &Coordinate) {
        self.min_x = self.min_x.min(coord.x);
        self.min_y = self.min_y.min(coord.y);
        self.max_x = self.max_x.max(coord.x);
        self.max_y = self.max_y.max(coord.y);
        if let Some(z) = coord.z {
            self.min_z = Some(self.min_z.map_or(z, |v| v.min(z)));
            self.max_z = Some(self.max_z.map_or(z, |v| v.max(z)));
        }
    }
}
