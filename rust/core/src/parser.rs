// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! WKT Grammar Parser
//!
//! Recursive descent over the token sequence, one production per
//! geometry kind. There is no error recovery: the first mismatch
//! aborts the whole parse, matching the batch nature of WKT ingestion.
//!
//! The input may contain a sequence of top-level geometries separated
//! only by whitespace; end of input is the only valid terminal state.

use smallvec::SmallVec;

use crate::error::{Error, Result};
use crate::geometry::{
    Coordinate, Dimension, Geometry, GeometryCollection, GeometryKind, LineString,
    MultiLineString, MultiPoint, MultiPolygon, Point, Polygon,
};
use crate::token::{tokenize, Token, TokenKind};

/// Parse a full WKT input buffer into its top-level geometries.
///
/// Repeatedly runs the geometry production until the token stream is
/// exhausted. `POINT (1 2) POINT (3 4)` yields two roots.
pub fn parse_wkt(input: &str) -> Result<Vec<Geometry>> {
    let tokens = tokenize(input)?;
    let mut cursor = Cursor::new(&tokens, input.len());
    let mut roots = Vec::new();
    while cursor.peek().is_some() {
        roots.push(parse_geometry(&mut cursor, None)?);
    }
    Ok(roots)
}

/// Read cursor over the token sequence. Tracks the input length so
/// end-of-input diagnostics carry a real offset.
struct Cursor<'a, 't> {
    tokens: &'t [Token<'a>],
    pos: usize,
    end_offset: usize,
}

impl<'a, 't> Cursor<'a, 't> {
    fn new(tokens: &'t [Token<'a>], end_offset: usize) -> Self {
        Self {
            tokens,
            pos: 0,
            end_offset,
        }
    }

    fn peek(&self) -> Option<&'t Token<'a>> {
        self.tokens.get(self.pos)
    }

    fn advance(&mut self) -> Option<&'t Token<'a>> {
        let token = self.tokens.get(self.pos);
        if token.is_some() {
            self.pos += 1;
        }
        token
    }

    /// Consume the next token when it has the given kind.
    fn eat(&mut self, kind: TokenKind) -> bool {
        if self.peek().is_some_and(|t| t.kind == kind) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn expect(&mut self, kind: TokenKind, expected: &str) -> Result<&'t Token<'a>> {
        match self.peek() {
            Some(token) if token.kind == kind => {
                self.pos += 1;
                Ok(token)
            }
            _ => Err(self.error(expected)),
        }
    }

    /// Offset of the next token, or of end-of-input.
    fn offset(&self) -> usize {
        self.peek().map_or(self.end_offset, |t| t.offset)
    }

    /// Human-readable rendition of the next token for diagnostics.
    fn found(&self) -> String {
        self.peek()
            .map_or_else(|| "end of input".to_string(), |t| format!("`{}`", t.text))
    }

    fn error(&self, expected: impl Into<String>) -> Error {
        Error::syntax(expected, self.found(), self.offset())
    }
}

fn dim_name(dimension: Dimension) -> &'static str {
    match dimension {
        Dimension::Xy => "XY",
        Dimension::Xyz => "XYZ",
        Dimension::Xym => "XYM",
        Dimension::Xyzm => "XYZM",
    }
}

/// Split an identifier into geometry keyword plus optional fused
/// dimension suffix, so `POINTZ` and `POINT Z` parse identically.
/// Both forms are observed in the wild; this is a WKT dialect
/// ambiguity, not a bug.
fn split_keyword(text: &str) -> Option<(GeometryKind, Option<Dimension>)> {
    if let Some(kind) = GeometryKind::from_keyword(text) {
        return Some((kind, None));
    }
    for suffix_len in [2, 1] {
        if text.len() > suffix_len {
            let (head, tail) = text.split_at(text.len() - suffix_len);
            if let (Some(kind), Some(dimension)) =
                (GeometryKind::from_keyword(head), Dimension::from_suffix(tail))
            {
                return Some((kind, Some(dimension)));
            }
        }
    }
    None
}

/// One full geometry production: keyword, optional dimension suffix,
/// then `EMPTY` or a parenthesized body. `inherited` is the enclosing
/// collection's dimensionality; a child declaring a different one is a
/// syntax error.
fn parse_geometry(cursor: &mut Cursor, inherited: Option<Dimension>) -> Result<Geometry> {
    let keyword = cursor.expect(TokenKind::Identifier, "geometry type keyword")?;
    let (kind, mut declared) = split_keyword(keyword.text).ok_or_else(|| {
        Error::syntax(
            "geometry type keyword",
            format!("`{}`", keyword.text),
            keyword.offset,
        )
    })?;

    // Standalone Z / M / ZM suffix token.
    if declared.is_none() {
        if let Some(token) = cursor.peek() {
            if token.kind == TokenKind::Identifier {
                if let Some(dimension) = Dimension::from_suffix(token.text) {
                    cursor.advance();
                    declared = Some(dimension);
                }
            }
        }
    }

    if let (Some(child), Some(parent)) = (declared, inherited) {
        if child != parent {
            return Err(Error::syntax(
                format!(
                    "{} geometry matching the enclosing collection",
                    dim_name(parent)
                ),
                format!("{} suffix", dim_name(child)),
                keyword.offset,
            ));
        }
    }
    let dimension = declared.or(inherited).unwrap_or_default();

    if cursor.eat(TokenKind::Empty) {
        return Ok(empty_geometry(kind, dimension));
    }
    cursor.expect(TokenKind::LeftParen, "`EMPTY` or `(`")?;

    match kind {
        GeometryKind::Point => {
            let coordinate = parse_coordinate(cursor, dimension)?;
            cursor.expect(TokenKind::RightParen, "`)`")?;
            Ok(Geometry::Point(Point {
                dimension,
                coordinate: Some(coordinate),
            }))
        }
        GeometryKind::LineString => {
            let coordinates = parse_line_coordinates(cursor, dimension)?;
            Ok(Geometry::LineString(LineString {
                dimension,
                coordinates,
            }))
        }
        GeometryKind::Polygon => {
            let rings = parse_polygon_rings(cursor, dimension)?;
            Ok(Geometry::Polygon(Polygon { dimension, rings }))
        }
        GeometryKind::MultiPoint => {
            let mut points = vec![parse_multipoint_element(cursor, dimension)?];
            while cursor.eat(TokenKind::Comma) {
                points.push(parse_multipoint_element(cursor, dimension)?);
            }
            cursor.expect(TokenKind::RightParen, "`,` or `)`")?;
            Ok(Geometry::MultiPoint(MultiPoint { dimension, points }))
        }
        GeometryKind::MultiLineString => {
            let mut line_strings = vec![parse_multilinestring_element(cursor, dimension)?];
            while cursor.eat(TokenKind::Comma) {
                line_strings.push(parse_multilinestring_element(cursor, dimension)?);
            }
            cursor.expect(TokenKind::RightParen, "`,` or `)`")?;
            Ok(Geometry::MultiLineString(MultiLineString {
                dimension,
                line_strings,
            }))
        }
        GeometryKind::MultiPolygon => {
            let mut polygons = vec![parse_multipolygon_element(cursor, dimension)?];
            while cursor.eat(TokenKind::Comma) {
                polygons.push(parse_multipolygon_element(cursor, dimension)?);
            }
            cursor.expect(TokenKind::RightParen, "`,` or `)`")?;
            Ok(Geometry::MultiPolygon(MultiPolygon {
                dimension,
                polygons,
            }))
        }
        GeometryKind::GeometryCollection => parse_collection_tail(cursor, declared.or(inherited)),
    }
}

/// Collection body after `(`. Children are full geometry productions;
/// this is the one point of unbounded recursion, so nesting depth is
/// bounded by the input and available stack, never assumed shallow.
fn parse_collection_tail(cursor: &mut Cursor, inherited: Option<Dimension>) -> Result<Geometry> {
    let mut geometries = Vec::new();
    let mut child_offsets = Vec::new();
    loop {
        child_offsets.push(cursor.offset());
        geometries.push(parse_geometry(cursor, inherited)?);
        if !cursor.eat(TokenKind::Comma) {
            break;
        }
    }
    cursor.expect(TokenKind::RightParen, "`,` or `)`")?;

    // Without a declared suffix the collection takes its children's
    // dimensionality, which must be uniform.
    let dimension = match inherited {
        Some(dimension) => dimension,
        None => {
            let dimension = geometries[0].dimension();
            for (child, offset) in geometries.iter().zip(&child_offsets).skip(1) {
                if child.dimension() != dimension {
                    return Err(Error::syntax(
                        format!("{} geometry matching its siblings", dim_name(dimension)),
                        format!("{} geometry", dim_name(child.dimension())),
                        *offset,
                    ));
                }
            }
            dimension
        }
    };

    Ok(Geometry::GeometryCollection(GeometryCollection {
        dimension,
        geometries,
    }))
}

/// One coordinate tuple: exactly `dimension.coord_size()` numbers.
fn parse_coordinate(cursor: &mut Cursor, dimension: Dimension) -> Result<Coordinate> {
    let mut components: SmallVec<[f64; 4]> = SmallVec::new();
    for _ in 0..dimension.coord_size() {
        let token = cursor.expect(
            TokenKind::Number,
            &format!(
                "coordinate value ({} per {} tuple)",
                dimension.coord_size(),
                dim_name(dimension)
            ),
        )?;
        // The token matched the lexical number pattern; a failed value
        // conversion is still a syntax error, never 0 or NaN.
        let value = fast_float::parse::<f64, _>(token.text).map_err(|_| {
            Error::syntax("numeric value", format!("`{}`", token.text), token.offset)
        })?;
        components.push(value);
    }
    Ok(Coordinate::from_components(dimension, &components))
}

/// Comma-separated coordinate list after `(`, closed by `)`.
/// A line requires at least 2 coordinates.
fn parse_line_coordinates(cursor: &mut Cursor, dimension: Dimension) -> Result<Vec<Coordinate>> {
    let mut coordinates = vec![parse_coordinate(cursor, dimension)?];
    while cursor.eat(TokenKind::Comma) {
        coordinates.push(parse_coordinate(cursor, dimension)?);
    }
    let close = cursor.expect(TokenKind::RightParen, "`,` or `)`")?;
    if coordinates.len() < 2 {
        return Err(Error::syntax(
            "at least 2 coordinates",
            format!("{} coordinate", coordinates.len()),
            close.offset,
        ));
    }
    Ok(coordinates)
}

/// One polygon ring: `(` list `)`, at least 4 coordinates, first equal
/// to last. Closure is required by the grammar, never auto-applied.
fn parse_ring(cursor: &mut Cursor, dimension: Dimension) -> Result<Vec<Coordinate>> {
    cursor.expect(TokenKind::LeftParen, "`(` to begin a ring")?;
    let mut coordinates = vec![parse_coordinate(cursor, dimension)?];
    while cursor.eat(TokenKind::Comma) {
        coordinates.push(parse_coordinate(cursor, dimension)?);
    }
    let close = cursor.expect(TokenKind::RightParen, "`,` or `)`")?;
    if coordinates.len() < 4 {
        return Err(Error::syntax(
            "a ring of at least 4 coordinates",
            format!("{} coordinates", coordinates.len()),
            close.offset,
        ));
    }
    if coordinates.first() != coordinates.last() {
        return Err(Error::syntax(
            "a closed ring (first coordinate equal to last)",
            "an open ring",
            close.offset,
        ));
    }
    Ok(coordinates)
}

/// Ring list after the polygon's outer `(`, closed by `)`.
fn parse_polygon_rings(cursor: &mut Cursor, dimension: Dimension) -> Result<Vec<Vec<Coordinate>>> {
    let mut rings = vec![parse_ring(cursor, dimension)?];
    while cursor.eat(TokenKind::Comma) {
        rings.push(parse_ring(cursor, dimension)?);
    }
    cursor.expect(TokenKind::RightParen, "`,` or `)`")?;
    Ok(rings)
}

/// MULTIPOINT element. The grammar historically admits both the bare
/// form `MULTIPOINT (1 2, 3 4)` and the parenthesized form
/// `MULTIPOINT ((1 2), (3 4))`; both are accepted, element by element,
/// as is an explicitly empty member.
fn parse_multipoint_element(cursor: &mut Cursor, dimension: Dimension) -> Result<Point> {
    if cursor.eat(TokenKind::Empty) {
        return Ok(Point {
            dimension,
            coordinate: None,
        });
    }
    let coordinate = if cursor.eat(TokenKind::LeftParen) {
        let coordinate = parse_coordinate(cursor, dimension)?;
        cursor.expect(TokenKind::RightParen, "`)`")?;
        coordinate
    } else {
        parse_coordinate(cursor, dimension)?
    };
    Ok(Point {
        dimension,
        coordinate: Some(coordinate),
    })
}

/// MULTILINESTRING element: a linestring body without the keyword, or
/// an explicitly empty member.
fn parse_multilinestring_element(cursor: &mut Cursor, dimension: Dimension) -> Result<LineString> {
    if cursor.eat(TokenKind::Empty) {
        return Ok(LineString {
            dimension,
            coordinates: Vec::new(),
        });
    }
    cursor.expect(TokenKind::LeftParen, "`EMPTY` or `(`")?;
    let coordinates = parse_line_coordinates(cursor, dimension)?;
    Ok(LineString {
        dimension,
        coordinates,
    })
}

/// MULTIPOLYGON element: a polygon body without the keyword, or an
/// explicitly empty member.
fn parse_multipolygon_element(cursor: &mut Cursor, dimension: Dimension) -> Result<Polygon> {
    if cursor.eat(TokenKind::Empty) {
        return Ok(Polygon {
            dimension,
            rings: Vec::new(),
        });
    }
    cursor.expect(TokenKind::LeftParen, "`EMPTY` or `(`")?;
    let rings = parse_polygon_rings(cursor, dimension)?;
    Ok(Polygon { dimension, rings })
}

fn empty_geometry(kind: GeometryKind, dimension: Dimension) -> Geometry {
    match kind {
        GeometryKind::Point => Geometry::Point(Point {
            dimension,
            coordinate: None,
        }),
        GeometryKind::LineString => Geometry::LineString(LineString {
            dimension,
            coordinates: Vec::new(),
        }),
        GeometryKind::Polygon => Geometry::Polygon(Polygon {
            dimension,
            rings: Vec::new(),
        }),
        GeometryKind::MultiPoint => Geometry::MultiPoint(MultiPoint {
            dimension,
            points: Vec::new(),
        }),
        GeometryKind::MultiLineString => Geometry::MultiLineString(MultiLineString {
            dimension,
            line_strings: Vec::new(),
        }),
        GeometryKind::MultiPolygon => Geometry::MultiPolygon(MultiPolygon {
            dimension,
            polygons: Vec::new(),
        }),
        GeometryKind::GeometryCollection => Geometry::GeometryCollection(GeometryCollection {
            dimension,
            geometries: Vec::new(),
        }),
    }
}
