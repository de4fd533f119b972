use crate::ast::scalar::{BooleanExpr, NumberExpr};
use crate::ast::typed::typed_expr;
use crate::ast::values::{LineSegment, Literal};
use crate::ast::{Expr, GeoKind, GeoOp, Operands, ValueKind};

use super::{GeometryExpr, Point2DExpr, binary};

typed_expr!(
    /// A line segment expression: exactly two points.
    LineSegment2DExpr,
    ValueKind::LineSegment2D
);

impl GeometryExpr for LineSegment2DExpr {
    const KIND: GeoKind = GeoKind::LineSegment2D;
}

impl LineSegment2DExpr {
    pub fn value(segment: LineSegment) -> Self {
        Self(Expr::Literal(Literal::LineSegment(segment)))
    }

    pub fn new(start: impl Into<Point2DExpr>, end: impl Into<Point2DExpr>) -> Self {
        let (start, end) = (start.into(), end.into());
        if let (Some(a), Some(b)) = (start.literal(), end.literal()) {
            return LineSegment2DExpr::value(LineSegment::new(a, b));
        }
        Self(Expr::geo(
            GeoKind::LineSegment2D,
            GeoOp::Construct,
            Operands::nary([start.0, end.0]),
        ))
    }

    pub fn from_coords(
        x1: impl Into<NumberExpr>,
        y1: impl Into<NumberExpr>,
        x2: impl Into<NumberExpr>,
        y2: impl Into<NumberExpr>,
    ) -> Self {
        LineSegment2DExpr::new(
            Point2DExpr::from_coords(x1, y1),
            Point2DExpr::from_coords(x2, y2),
        )
    }

    pub fn literal(&self) -> Option<LineSegment> {
        self.0.as_segment()
    }

    pub fn intersects(&self, other: impl Into<LineSegment2DExpr>) -> BooleanExpr {
        BooleanExpr::from_expr(binary(
            GeoKind::LineSegment2D,
            GeoOp::Intersects,
            &self.0,
            other.into().0,
        ))
    }

    /// Crossing point with `other`; NULL when the segments do not cross or
    /// are parallel.
    pub fn intersection_with(&self, other: impl Into<LineSegment2DExpr>) -> Point2DExpr {
        Point2DExpr::from_expr(binary(
            GeoKind::LineSegment2D,
            GeoOp::IntersectionPoint,
            &self.0,
            other.into().0,
        ))
    }
}

impl From<LineSegment> for LineSegment2DExpr {
    fn from(segment: LineSegment) -> Self {
        LineSegment2DExpr::value(segment)
    }
}

impl From<((f64, f64), (f64, f64))> for LineSegment2DExpr {
    fn from((start, end): ((f64, f64), (f64, f64))) -> Self {
        LineSegment2DExpr::value(LineSegment::new(start, end))
    }
}

impl From<Option<LineSegment>> for LineSegment2DExpr {
    fn from(segment: Option<LineSegment>) -> Self {
        segment.map_or_else(LineSegment2DExpr::null, LineSegment2DExpr::value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::AsExpr;

    #[test]
    fn test_literal_coords_fold() {
        let s = LineSegment2DExpr::from_coords(0.0, 0.0, 2.0, 2.0);
        assert_eq!(s.literal(), Some(LineSegment::from_coords(0.0, 0.0, 2.0, 2.0)));
    }

    #[test]
    fn test_null_endpoint_protects() {
        let s = LineSegment2DExpr::new(Point2DExpr::column("a", "p"), Point2DExpr::null());
        assert!(s.is_null_protected());
    }

    #[test]
    fn test_intersects_absent_segment_protects() {
        let s = LineSegment2DExpr::column("walls", "edge");
        assert!(s.intersects(None::<LineSegment>).is_null_protected());
        assert!(!s.intersects(((0.0, 0.0), (1.0, 1.0))).is_null_protected());
    }

    #[test]
    fn test_wraps_untyped_segment() {
        let edge = LineSegment2DExpr::column("walls", "edge");
        let rewrapped = LineSegment2DExpr::from_expr(edge.as_expr().clone());
        assert_eq!(rewrapped, edge);
        assert_eq!(rewrapped.kind(), ValueKind::LineSegment2D);
    }
}
