// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! WKT-Lite Shape Materialization
//!
//! Converts parsed WKT geometries into renderer-ready shape primitives:
//! point markers, polylines, and filled polygons with holes. Elevation
//! and measure components are carried into the primitives; a rendering
//! layer that ignores them simply projects to 2D.
//!
//! ```rust
//! use wkt_lite_shapes::{parse_and_materialize, Shape};
//!
//! let shapes = parse_and_materialize("POINT (19 23)").unwrap();
//! assert!(matches!(shapes[0], Shape::Marker(_)));
//! ```

pub mod error;
pub mod materialize;
pub mod shape;

// Re-export nalgebra's point type for convenience
pub use nalgebra::Point3;

pub use error::{Error, Result};
pub use materialize::{materialize, parse_and_materialize};
pub use shape::{MarkerShape, PolygonShape, PolylineShape, Shape, ShapeVertex};
