//! Geometry values and their WKT rendering.
//!
//! These are plain Rust values: the literals a client drops into an
//! expression tree. Everything here renders through `Display` as
//! Well-Known Text, which is the only textual format the crate defines.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::ast::{GeoKind, ValueKind};

/// Format a coordinate or number the way WKT and SQL literals expect:
/// integral values without a trailing `.0`.
pub fn format_number(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        format!("{}", value)
    }
}

/// A 2D point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// `x y`, the coordinate pair as it appears inside WKT.
    pub fn coordinates(&self) -> String {
        format!("{} {}", format_number(self.x), format_number(self.y))
    }

    pub fn distance_to(&self, other: &Point) -> f64 {
        ((other.x - self.x).powi(2) + (other.y - self.y).powi(2)).sqrt()
    }
}

impl From<(f64, f64)> for Point {
    fn from((x, y): (f64, f64)) -> Self {
        Point::new(x, y)
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "POINT ({})", self.coordinates())
    }
}

fn join_coordinates(points: &[Point]) -> String {
    points.iter().map(Point::coordinates).collect::<Vec<_>>().join(", ")
}

/// An open polyline. Ordered, may hold any number of points.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Line {
    points: Vec<Point>,
}

impl Line {
    pub fn new(points: impl IntoIterator<Item = impl Into<Point>>) -> Self {
        Self {
            points: points.into_iter().map(Into::into).collect(),
        }
    }

    /// Line through the points of a multipoint, in index order.
    /// A line needs at least two points.
    pub fn from_multipoint(points: &MultiPoint) -> Option<Self> {
        (points.len() >= 2).then(|| Line::new(points.points().iter().copied()))
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Consecutive point pairs.
    pub fn segments(&self) -> impl Iterator<Item = LineSegment> + '_ {
        self.points.windows(2).map(|w| LineSegment::new(w[0], w[1]))
    }

    pub fn bounds(&self) -> Option<Bounds> {
        Bounds::of(&self.points)
    }
}

impl fmt::Display for Line {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.points.is_empty() {
            write!(f, "LINESTRING EMPTY")
        } else {
            write!(f, "LINESTRING ({})", join_coordinates(&self.points))
        }
    }
}

/// A line with exactly two points.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LineSegment {
    pub start: Point,
    pub end: Point,
}

impl LineSegment {
    pub fn new(start: impl Into<Point>, end: impl Into<Point>) -> Self {
        Self {
            start: start.into(),
            end: end.into(),
        }
    }

    pub fn from_coords(x1: f64, y1: f64, x2: f64, y2: f64) -> Self {
        Self::new((x1, y1), (x2, y2))
    }

    pub fn points(&self) -> [Point; 2] {
        [self.start, self.end]
    }

    pub fn bounds(&self) -> Bounds {
        Bounds::of(&self.points()).unwrap_or_else(|| Bounds::point(self.start))
    }
}

impl fmt::Display for LineSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "LINESTRING ({})", join_coordinates(&self.points()))
    }
}

/// An ordered collection of points.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct MultiPoint {
    points: Vec<Point>,
}

impl MultiPoint {
    pub fn new(points: impl IntoIterator<Item = impl Into<Point>>) -> Self {
        Self {
            points: points.into_iter().map(Into::into).collect(),
        }
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Zero-based member access; out of range is `None`.
    pub fn get(&self, index: usize) -> Option<Point> {
        self.points.get(index).copied()
    }

    pub fn bounds(&self) -> Option<Bounds> {
        Bounds::of(&self.points)
    }
}

impl fmt::Display for MultiPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.points.is_empty() {
            return write!(f, "MULTIPOINT EMPTY");
        }
        let members: Vec<String> = self
            .points
            .iter()
            .map(|p| format!("({})", p.coordinates()))
            .collect();
        write!(f, "MULTIPOINT ({})", members.join(", "))
    }
}

/// A polygon described by its exterior ring. The ring is always closed:
/// the first point is re-appended when the input does not end with it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Polygon {
    ring: Vec<Point>,
}

impl Polygon {
    /// Build a polygon from at least three points, closing the ring.
    pub fn new(points: impl IntoIterator<Item = impl Into<Point>>) -> Option<Self> {
        let points: Vec<Point> = points.into_iter().map(Into::into).collect();
        if points.len() < 3 {
            return None;
        }
        Some(Self {
            ring: close_ring(points),
        })
    }

    /// The axis-aligned unit square (0,0) (1,0) (1,1) (0,1).
    pub fn unit_square() -> Self {
        Self {
            ring: close_ring(vec![
                Point::new(0.0, 0.0),
                Point::new(1.0, 0.0),
                Point::new(1.0, 1.0),
                Point::new(0.0, 1.0),
            ]),
        }
    }

    /// Axis-aligned rectangle, wound (minX,minY) (maxX,minY) (maxX,maxY) (minX,maxY).
    pub fn rectangle(bounds: Bounds) -> Self {
        Self {
            ring: close_ring(vec![
                Point::new(bounds.min_x, bounds.min_y),
                Point::new(bounds.max_x, bounds.min_y),
                Point::new(bounds.max_x, bounds.max_y),
                Point::new(bounds.min_x, bounds.max_y),
            ]),
        }
    }

    pub fn from_multipoint(points: &MultiPoint) -> Option<Self> {
        Polygon::new(points.points().iter().copied())
    }

    pub fn from_line(line: &Line) -> Option<Self> {
        Polygon::new(line.points().iter().copied())
    }

    /// The closed ring, first point repeated at the end.
    pub fn ring(&self) -> &[Point] {
        &self.ring
    }

    pub fn exterior_ring(&self) -> Line {
        Line::new(self.ring.iter().copied())
    }

    pub fn edges(&self) -> impl Iterator<Item = LineSegment> + '_ {
        self.ring.windows(2).map(|w| LineSegment::new(w[0], w[1]))
    }

    pub fn bounds(&self) -> Bounds {
        Bounds::of(&self.ring).unwrap_or_else(|| Bounds::point(Point::new(0.0, 0.0)))
    }
}

fn close_ring(mut points: Vec<Point>) -> Vec<Point> {
    if let Some(&first) = points.first() {
        if points.last() != Some(&first) {
            points.push(first);
        }
    }
    points
}

impl fmt::Display for Polygon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "POLYGON (({}))", join_coordinates(&self.ring))
    }
}

/// Axis-aligned bounds of a set of points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl Bounds {
    pub fn point(p: Point) -> Self {
        Self {
            min_x: p.x,
            min_y: p.y,
            max_x: p.x,
            max_y: p.y,
        }
    }

    pub fn of(points: &[Point]) -> Option<Self> {
        let (first, rest) = points.split_first()?;
        Some(rest.iter().fold(Bounds::point(*first), |b, p| Bounds {
            min_x: b.min_x.min(p.x),
            min_y: b.min_y.min(p.y),
            max_x: b.max_x.max(p.x),
            max_y: b.max_y.max(p.y),
        }))
    }
}

/// A literal value embedded in an expression tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Literal {
    Bool(bool),
    Number(f64),
    Text(String),
    Point(Point),
    Line(Line),
    LineSegment(LineSegment),
    MultiPoint(MultiPoint),
    Polygon(Polygon),
}

impl Literal {
    pub fn kind(&self) -> ValueKind {
        match self {
            Literal::Bool(_) => ValueKind::Boolean,
            Literal::Number(_) => ValueKind::Number,
            Literal::Text(_) => ValueKind::Text,
            Literal::Point(_) => ValueKind::Point2D,
            Literal::Line(_) => ValueKind::Line2D,
            Literal::LineSegment(_) => ValueKind::LineSegment2D,
            Literal::MultiPoint(_) => ValueKind::MultiPoint2D,
            Literal::Polygon(_) => ValueKind::Polygon2D,
        }
    }

    /// WKT text for geometry literals.
    pub fn wkt(&self) -> Option<(GeoKind, String)> {
        match self {
            Literal::Point(p) => Some((GeoKind::Point2D, p.to_string())),
            Literal::Line(l) => Some((GeoKind::Line2D, l.to_string())),
            Literal::LineSegment(s) => Some((GeoKind::LineSegment2D, s.to_string())),
            Literal::MultiPoint(m) => Some((GeoKind::MultiPoint2D, m.to_string())),
            Literal::Polygon(p) => Some((GeoKind::Polygon2D, p.to_string())),
            Literal::Bool(_) | Literal::Number(_) | Literal::Text(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_number_formatting() {
        assert_eq!(format_number(2.0), "2");
        assert_eq!(format_number(-3.0), "-3");
        assert_eq!(format_number(2.5), "2.5");
        assert_eq!(format_number(-0.0), "0");
    }

    #[test]
    fn test_wkt_rendering() {
        assert_eq!(Point::new(1.0, 2.5).to_string(), "POINT (1 2.5)");
        assert_eq!(
            Line::new([(2.0, 3.0), (3.0, 4.0), (4.0, 5.0)]).to_string(),
            "LINESTRING (2 3, 3 4, 4 5)"
        );
        assert_eq!(
            LineSegment::from_coords(0.0, 0.0, 1.0, 1.0).to_string(),
            "LINESTRING (0 0, 1 1)"
        );
        assert_eq!(
            MultiPoint::new([(1.0, 2.0), (3.0, 4.0)]).to_string(),
            "MULTIPOINT ((1 2), (3 4))"
        );
        assert_eq!(Line::default().to_string(), "LINESTRING EMPTY");
    }

    #[test]
    fn test_polygon_auto_close() {
        let open = Polygon::new([(0.0, 0.0), (2.0, 0.0), (2.0, 2.0)]).unwrap();
        let closed = Polygon::new([(0.0, 0.0), (2.0, 0.0), (2.0, 2.0), (0.0, 0.0)]).unwrap();
        assert_eq!(open, closed);
        assert_eq!(open.to_string(), "POLYGON ((0 0, 2 0, 2 2, 0 0))");
    }

    #[test]
    fn test_polygon_needs_three_points() {
        assert!(Polygon::new([(0.0, 0.0), (1.0, 1.0)]).is_none());
        let mp = MultiPoint::new([(0.0, 0.0), (1.0, 1.0)]);
        assert!(Polygon::from_multipoint(&mp).is_none());
        assert!(Line::from_multipoint(&mp).is_some());
        assert!(Line::from_multipoint(&MultiPoint::new([(0.0, 0.0)])).is_none());
    }

    #[test]
    fn test_unit_square_ring() {
        assert_eq!(
            Polygon::unit_square().exterior_ring().to_string(),
            "LINESTRING (0 0, 1 0, 1 1, 0 1, 0 0)"
        );
    }

    #[test]
    fn test_bounds() {
        let line = Line::new([(2.0, 3.0), (3.0, 4.0), (4.0, 5.0)]);
        let b = line.bounds().unwrap();
        assert_eq!((b.min_x, b.min_y, b.max_x, b.max_y), (2.0, 3.0, 4.0, 5.0));
        assert_eq!(
            Polygon::rectangle(b).to_string(),
            "POLYGON ((2 3, 4 3, 4 5, 2 5, 2 3))"
        );
        assert!(Line::default().bounds().is_none());
    }
}
