use crate::ast::scalar::BooleanExpr;
use crate::ast::typed::typed_expr;
use crate::ast::values::{Line, Literal, Point};
use crate::ast::{Expr, GeoKind, GeoOp, Operands, ValueKind};
use crate::error::{GeoError, GeoResult};

use super::{GeometryExpr, MultiPoint2DExpr, Point2DExpr, Polygon2DExpr, all_literal, binary};

typed_expr!(
    /// An open polyline expression.
    Line2DExpr,
    ValueKind::Line2D
);

impl GeometryExpr for Line2DExpr {
    const KIND: GeoKind = GeoKind::Line2D;
}

impl Line2DExpr {
    pub fn value(line: Line) -> Self {
        Self(Expr::Literal(Literal::Line(line)))
    }

    /// Line through the given points, in order. Fewer than two points, or
    /// an absent point, gives a null-protected line.
    pub fn from_points(points: impl IntoIterator<Item = impl Into<Point2DExpr>>) -> Self {
        let members: Vec<Expr> = points.into_iter().map(|p| p.into().0).collect();
        Self::from_members(members)
    }

    pub(crate) fn from_members(members: Vec<Expr>) -> Self {
        if members.len() >= GeoKind::Line2D.min_members() {
            if let Some(points) = all_literal(&members, Expr::as_point) {
                return Line2DExpr::value(Line::new(points));
            }
        }
        Self(Expr::geo(GeoKind::Line2D, GeoOp::Construct, Operands::Nary(members)))
    }

    pub fn literal(&self) -> Option<&Line> {
        self.0.as_line()
    }

    pub fn intersects(&self, other: impl Into<Line2DExpr>) -> BooleanExpr {
        BooleanExpr::from_expr(binary(
            GeoKind::Line2D,
            GeoOp::Intersects,
            &self.0,
            other.into().0,
        ))
    }

    /// One crossing point with `other`: the first found walking both lines
    /// in order. NULL when they do not cross.
    pub fn intersection_with(&self, other: impl Into<Line2DExpr>) -> Point2DExpr {
        Point2DExpr::from_expr(binary(
            GeoKind::Line2D,
            GeoOp::IntersectionPoint,
            &self.0,
            other.into().0,
        ))
    }

    /// Every crossing point with `other`.
    pub fn intersection_points(&self, other: impl Into<Line2DExpr>) -> MultiPoint2DExpr {
        MultiPoint2DExpr::from_expr(binary(
            GeoKind::Line2D,
            GeoOp::IntersectionPoints,
            &self.0,
            other.into().0,
        ))
    }

    /// Polygon through the line's points. Not available on expressions;
    /// use [`crate::ast::Polygon::from_line`] on values.
    pub fn polygon2d_result(&self) -> GeoResult<Polygon2DExpr> {
        Err(GeoError::NotImplemented {
            kind: GeoKind::Line2D,
            op: GeoOp::ToPolygon,
        })
    }
}

impl From<Line> for Line2DExpr {
    fn from(line: Line) -> Self {
        if line.len() >= GeoKind::Line2D.min_members() {
            Line2DExpr::value(line)
        } else {
            Line2DExpr::from_points(line.points().iter().copied())
        }
    }
}

impl From<Vec<Point>> for Line2DExpr {
    fn from(points: Vec<Point>) -> Self {
        Line2DExpr::from_points(points)
    }
}

impl From<Vec<(f64, f64)>> for Line2DExpr {
    fn from(coords: Vec<(f64, f64)>) -> Self {
        Line2DExpr::from_points(coords)
    }
}

impl From<Option<Line>> for Line2DExpr {
    fn from(line: Option<Line>) -> Self {
        line.map_or_else(Line2DExpr::null, Line2DExpr::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::AsExpr;

    #[test]
    fn test_literal_points_fold_to_value() {
        let line = Line2DExpr::from(vec![(2.0, 3.0), (3.0, 4.0), (4.0, 5.0)]);
        assert_eq!(
            line.literal().map(ToString::to_string).as_deref(),
            Some("LINESTRING (2 3, 3 4, 4 5)")
        );
    }

    #[test]
    fn test_short_or_null_lines_protect() {
        assert!(Line2DExpr::from(Line::default()).is_null_protected());
        assert!(Line2DExpr::from(vec![(1.0, 1.0)]).is_null_protected());
        let with_null = Line2DExpr::from_points([
            Point2DExpr::value(Point::new(0.0, 0.0)),
            Point2DExpr::null(),
        ]);
        assert!(with_null.is_null_protected());
    }

    #[test]
    fn test_mixed_members_stay_a_construct() {
        let line = Line2DExpr::from_points([
            Point2DExpr::column("stops", "location"),
            Point2DExpr::value(Point::new(1.0, 1.0)),
        ]);
        assert!(line.literal().is_none());
        assert!(!line.is_null_protected());
        assert_eq!(line.tables_involved().len(), 1);
    }

    #[test]
    fn test_intersection_with_protected_line_protects() {
        let road = Line2DExpr::column("roads", "path");
        let empty = Line2DExpr::from(Line::default());
        assert!(road.intersects(empty.clone()).is_null_protected());
        assert!(road.intersection_points(empty).is_null_protected());
    }

    #[test]
    fn test_polygon2d_result_not_implemented() {
        let road = Line2DExpr::column("roads", "path");
        assert!(matches!(
            road.polygon2d_result(),
            Err(GeoError::NotImplemented { op: GeoOp::ToPolygon, .. })
        ));
    }
}
