use crate::ast::scalar::NumberExpr;
use crate::ast::typed::typed_expr;
use crate::ast::values::{Literal, Point};
use crate::ast::{Expr, GeoKind, GeoOp, Operands, ValueKind};

use super::{GeometryExpr, binary, unary};

typed_expr!(
    /// A 2D point expression.
    Point2DExpr,
    ValueKind::Point2D
);

impl GeometryExpr for Point2DExpr {
    const KIND: GeoKind = GeoKind::Point2D;
}

impl Point2DExpr {
    pub fn value(point: Point) -> Self {
        Self(Expr::Literal(Literal::Point(point)))
    }

    /// Point from two coordinate expressions. Literal coordinates give a
    /// literal point; an absent coordinate gives a null-protected point.
    pub fn from_coords(x: impl Into<NumberExpr>, y: impl Into<NumberExpr>) -> Self {
        let (x, y) = (x.into(), y.into());
        if let (Some(x), Some(y)) = (x.literal(), y.literal()) {
            return Point2DExpr::value(Point::new(x, y));
        }
        Self(Expr::geo(
            GeoKind::Point2D,
            GeoOp::Construct,
            Operands::nary([x.0, y.0]),
        ))
    }

    pub fn literal(&self) -> Option<Point> {
        self.0.as_point()
    }

    pub fn get_x(&self) -> NumberExpr {
        NumberExpr::from_expr(unary(GeoKind::Point2D, GeoOp::GetX, &self.0))
    }

    pub fn get_y(&self) -> NumberExpr {
        NumberExpr::from_expr(unary(GeoKind::Point2D, GeoOp::GetY, &self.0))
    }

    /// Euclidean distance.
    pub fn distance_to(&self, other: impl Into<Point2DExpr>) -> NumberExpr {
        NumberExpr::from_expr(binary(
            GeoKind::Point2D,
            GeoOp::DistanceTo,
            &self.0,
            other.into().0,
        ))
    }
}

impl From<Point> for Point2DExpr {
    fn from(point: Point) -> Self {
        Point2DExpr::value(point)
    }
}

impl From<(f64, f64)> for Point2DExpr {
    fn from(coords: (f64, f64)) -> Self {
        Point2DExpr::value(coords.into())
    }
}

impl From<Option<Point>> for Point2DExpr {
    fn from(point: Option<Point>) -> Self {
        point.map_or_else(Point2DExpr::null, Point2DExpr::value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::AsExpr;

    #[test]
    fn test_literal_coordinates_fold() {
        let p = Point2DExpr::from_coords(1.0, 2.0);
        assert_eq!(p.literal(), Some(Point::new(1.0, 2.0)));
    }

    #[test]
    fn test_column_coordinate_builds_construct() {
        let p = Point2DExpr::from_coords(NumberExpr::column("sites", "lon"), 2.0);
        assert_eq!(p.literal(), None);
        assert!(!p.is_null_protected());
        assert!(p.0.as_geo_node(GeoOp::Construct).is_some());
    }

    #[test]
    fn test_absent_coordinate_protects() {
        let p = Point2DExpr::from_coords(NumberExpr::null(), NumberExpr::column("sites", "lat"));
        assert!(p.is_null_protected());
    }

    #[test]
    fn test_distance_to_absent_point_protects() {
        let here = Point2DExpr::column("sites", "location");
        assert!(here.distance_to(None::<Point>).is_null_protected());
        assert!(!here.distance_to((0.0, 0.0)).is_null_protected());
    }

    #[test]
    fn test_equality_against_absent_point() {
        let here = Point2DExpr::column("sites", "location");
        assert!(here.is(Point2DExpr::null()).is_null_protected());
    }
}
