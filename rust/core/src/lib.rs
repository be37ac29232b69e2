// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! # WKT-Lite Core Parser
//!
//! Parser for the OGC Well-Known Text (WKT) geometry format: tokenizer,
//! recursive-descent grammar parser, and the geometry object model they
//! produce.
//!
//! ## Overview
//!
//! - **Tokenization**: flat token sequence with byte offsets for precise
//!   diagnostics, built on [nom](https://docs.rs/nom) recognizers
//! - **Grammar parsing**: one recursive-descent production per geometry
//!   kind, covering 2D/Z/M/ZM coordinates, explicit `EMPTY` geometries,
//!   and arbitrarily nested `GEOMETRYCOLLECTION`s
//! - **Object model**: a closed sum type over the seven geometry kinds,
//!   with traversal, counting, and bounds helpers
//! - **Number parsing**: coordinate values via
//!   [fast-float](https://docs.rs/fast-float)
//!
//! ## Quick Start
//!
//! ```rust
//! use wkt_lite_core::{parse_wkt, Geometry, GeometryKind};
//!
//! let roots = parse_wkt("POINT (19 23) LINESTRING (0 0, 1 1)").unwrap();
//! assert_eq!(roots.len(), 2);
//! assert_eq!(roots[0].kind(), GeometryKind::Point);
//!
//! match &roots[1] {
//!     Geometry::LineString(line) => assert_eq!(line.coordinates.len(), 2),
//!     _ => unreachable!(),
//! }
//! ```
//!
//! Parsing is all-or-nothing per call: the first lexical or grammar
//! mismatch aborts the whole parse with an offset-carrying error and no
//! partial results. Each call is pure and owns its output, so parses of
//! distinct inputs may run on parallel threads without coordination.
//!
//! ## Feature Flags
//!
//! - `serde`: enable serialization of the geometry object model

pub mod error;
pub mod geometry;
pub mod parser;
pub mod token;

pub use error::{Error, Result};
pub use geometry::{
    BoundingBox, Coordinate, Dimension, Geometry, GeometryCollection, GeometryKind, LineString,
    MultiLineString, MultiPoint, MultiPolygon, NodesOfKind, Point, Polygon,
};
pub use parser::parse_wkt;
pub use token::{tokenize, Token, TokenKind};
