use crate::ast::scalar::{BooleanExpr, NumberExpr};
use crate::ast::typed::typed_expr;
use crate::ast::values::{Literal, Point, Polygon};
use crate::ast::{Expr, GeoKind, GeoOp, Operands, ValueKind};

use super::{GeometryExpr, Line2DExpr, Point2DExpr, all_literal, binary, unary};

typed_expr!(
    /// A polygon expression, described by its exterior ring.
    Polygon2DExpr,
    ValueKind::Polygon2D
);

impl GeometryExpr for Polygon2DExpr {
    const KIND: GeoKind = GeoKind::Polygon2D;
}

impl Polygon2DExpr {
    pub fn value(polygon: Polygon) -> Self {
        Self(Expr::Literal(Literal::Polygon(polygon)))
    }

    /// The literal square (0,0) (1,0) (1,1) (0,1).
    pub fn unit_square() -> Self {
        Polygon2DExpr::value(Polygon::unit_square())
    }

    /// Polygon through the given ring points. The ring is closed when the
    /// last point differs from the first. Fewer than three points, or an
    /// absent point, gives a null-protected polygon.
    pub fn from_points(points: impl IntoIterator<Item = impl Into<Point2DExpr>>) -> Self {
        let members: Vec<Expr> = points.into_iter().map(|p| p.into().0).collect();
        if let Some(polygon) = all_literal(&members, Expr::as_point).and_then(Polygon::new) {
            return Polygon2DExpr::value(polygon);
        }
        Self(Expr::geo(
            GeoKind::Polygon2D,
            GeoOp::Construct,
            Operands::Nary(members),
        ))
    }

    pub fn literal(&self) -> Option<&Polygon> {
        self.0.as_polygon()
    }

    fn predicate(&self, op: GeoOp, other: Expr) -> BooleanExpr {
        BooleanExpr::from_expr(binary(GeoKind::Polygon2D, op, &self.0, other))
    }

    /// Whether `other` lies inside this polygon.
    pub fn contains(&self, other: impl Into<Polygon2DExpr>) -> BooleanExpr {
        self.predicate(GeoOp::Contains, other.into().0)
    }

    /// Whether the point lies strictly inside the polygon.
    pub fn contains_point(&self, point: impl Into<Point2DExpr>) -> BooleanExpr {
        self.predicate(GeoOp::ContainsPoint, point.into().0)
    }

    pub fn intersects(&self, other: impl Into<Polygon2DExpr>) -> BooleanExpr {
        self.predicate(GeoOp::Intersects, other.into().0)
    }

    pub fn does_not_intersect(&self, other: impl Into<Polygon2DExpr>) -> BooleanExpr {
        self.predicate(GeoOp::DoesNotIntersect, other.into().0)
    }

    /// Shared area that is neither polygon in full.
    pub fn overlaps(&self, other: impl Into<Polygon2DExpr>) -> BooleanExpr {
        self.predicate(GeoOp::Overlaps, other.into().0)
    }

    pub fn touches(&self, other: impl Into<Polygon2DExpr>) -> BooleanExpr {
        self.predicate(GeoOp::Touches, other.into().0)
    }

    /// Whether this polygon lies inside `other`.
    pub fn within(&self, other: impl Into<Polygon2DExpr>) -> BooleanExpr {
        self.predicate(GeoOp::Within, other.into().0)
    }

    pub fn intersection(&self, other: impl Into<Polygon2DExpr>) -> Polygon2DExpr {
        Polygon2DExpr::from_expr(binary(
            GeoKind::Polygon2D,
            GeoOp::Intersection,
            &self.0,
            other.into().0,
        ))
    }

    pub fn area(&self) -> NumberExpr {
        NumberExpr::from_expr(unary(GeoKind::Polygon2D, GeoOp::Area, &self.0))
    }

    /// The closed ring as a line.
    pub fn exterior_ring(&self) -> Line2DExpr {
        Line2DExpr::from_expr(unary(GeoKind::Polygon2D, GeoOp::ExteriorRing, &self.0))
    }
}

impl From<Polygon> for Polygon2DExpr {
    fn from(polygon: Polygon) -> Self {
        Polygon2DExpr::value(polygon)
    }
}

impl From<Vec<Point>> for Polygon2DExpr {
    fn from(points: Vec<Point>) -> Self {
        Polygon2DExpr::from_points(points)
    }
}

impl From<Vec<(f64, f64)>> for Polygon2DExpr {
    fn from(coords: Vec<(f64, f64)>) -> Self {
        Polygon2DExpr::from_points(coords)
    }
}

impl From<Option<Polygon>> for Polygon2DExpr {
    fn from(polygon: Option<Polygon>) -> Self {
        polygon.map_or_else(Polygon2DExpr::null, Polygon2DExpr::value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::AsExpr;

    #[test]
    fn test_literal_ring_closes() {
        let triangle = Polygon2DExpr::from(vec![(0.0, 0.0), (4.0, 0.0), (0.0, 3.0)]);
        assert_eq!(
            triangle.literal().map(ToString::to_string).as_deref(),
            Some("POLYGON ((0 0, 4 0, 0 3, 0 0))")
        );
    }

    #[test]
    fn test_two_points_protect() {
        let degenerate = Polygon2DExpr::from(vec![(0.0, 0.0), (1.0, 1.0)]);
        assert!(degenerate.is_null_protected());
    }

    #[test]
    fn test_predicates_against_absent_polygon_protect() {
        let parcel = Polygon2DExpr::column("parcels", "shape");
        let absent = Polygon2DExpr::null();
        for predicate in [
            parcel.contains(absent.clone()),
            parcel.intersects(absent.clone()),
            parcel.overlaps(absent.clone()),
            parcel.touches(absent.clone()),
            parcel.within(absent.clone()),
            parcel.does_not_intersect(absent.clone()),
        ] {
            assert!(predicate.is_null_protected());
        }
        assert!(parcel.contains_point(None::<Point>).is_null_protected());
    }

    #[test]
    fn test_area_of_column_is_not_protected() {
        assert!(!Polygon2DExpr::column("parcels", "shape").area().is_null_protected());
        assert!(Polygon2DExpr::null().area().is_null_protected());
    }
}
