use crate::ast::scalar::NumberExpr;
use crate::ast::typed::typed_expr;
use crate::ast::values::{Line, Literal, MultiPoint, Point};
use crate::ast::{Expr, GeoKind, GeoOp, Operands, ValueKind};
use crate::error::{GeoError, GeoResult};

use super::{GeometryExpr, Line2DExpr, Point2DExpr, Polygon2DExpr, all_literal, binary, unary};

typed_expr!(
    /// An ordered point collection expression.
    MultiPoint2DExpr,
    ValueKind::MultiPoint2D
);

impl GeometryExpr for MultiPoint2DExpr {
    const KIND: GeoKind = GeoKind::MultiPoint2D;
}

impl MultiPoint2DExpr {
    pub fn value(points: MultiPoint) -> Self {
        Self(Expr::Literal(Literal::MultiPoint(points)))
    }

    /// Collection of the given points. No points, or an absent point, gives
    /// a null-protected collection.
    pub fn from_points(points: impl IntoIterator<Item = impl Into<Point2DExpr>>) -> Self {
        let members: Vec<Expr> = points.into_iter().map(|p| p.into().0).collect();
        if !members.is_empty() {
            if let Some(points) = all_literal(&members, Expr::as_point) {
                return MultiPoint2DExpr::value(MultiPoint::new(points));
            }
        }
        Self(Expr::geo(
            GeoKind::MultiPoint2D,
            GeoOp::Construct,
            Operands::Nary(members),
        ))
    }

    pub fn literal(&self) -> Option<&MultiPoint> {
        self.0.as_multipoint()
    }

    /// Point at a zero-based index; out of range is a null point, as is a
    /// literal index that is negative or not a whole number.
    pub fn point_at(&self, index: impl Into<NumberExpr>) -> Point2DExpr {
        let index = index.into();
        if let Some(n) = index.literal() {
            if n < 0.0 || n.fract() != 0.0 {
                return Point2DExpr::null();
            }
        }
        Point2DExpr::from_expr(binary(
            GeoKind::MultiPoint2D,
            GeoOp::PointAtIndex,
            &self.0,
            index.0,
        ))
    }

    pub fn number_of_points(&self) -> NumberExpr {
        NumberExpr::from_expr(unary(GeoKind::MultiPoint2D, GeoOp::NumberOfPoints, &self.0))
    }

    /// Line through the points in index order. Fewer than two points gives a
    /// null-protected line.
    pub fn line2d_result(&self) -> Line2DExpr {
        if let Some(points) = self.literal() {
            return match Line::from_multipoint(points) {
                Some(line) => Line2DExpr::value(line),
                None => Line2DExpr::from_members(
                    points.points().iter().map(|p| Point2DExpr::value(*p).0).collect(),
                ),
            };
        }
        if let Some(node) = self.0.as_geo_node(GeoOp::Construct) {
            return Line2DExpr::from_members(node.operands().as_slice().to_vec());
        }
        Line2DExpr::from_expr(unary(GeoKind::MultiPoint2D, GeoOp::ToLine, &self.0))
    }

    /// Polygon through the points. Not available on expressions; use
    /// [`crate::ast::Polygon::from_multipoint`] on values.
    pub fn polygon2d_result(&self) -> GeoResult<Polygon2DExpr> {
        Err(GeoError::NotImplemented {
            kind: GeoKind::MultiPoint2D,
            op: GeoOp::ToPolygon,
        })
    }
}

impl From<MultiPoint> for MultiPoint2DExpr {
    fn from(points: MultiPoint) -> Self {
        if points.is_empty() {
            MultiPoint2DExpr::from_points(Vec::<Point>::new())
        } else {
            MultiPoint2DExpr::value(points)
        }
    }
}

impl From<Vec<Point>> for MultiPoint2DExpr {
    fn from(points: Vec<Point>) -> Self {
        MultiPoint2DExpr::from_points(points)
    }
}

impl From<Vec<(f64, f64)>> for MultiPoint2DExpr {
    fn from(coords: Vec<(f64, f64)>) -> Self {
        MultiPoint2DExpr::from_points(coords)
    }
}

impl From<Option<MultiPoint>> for MultiPoint2DExpr {
    fn from(points: Option<MultiPoint>) -> Self {
        points.map_or_else(MultiPoint2DExpr::null, MultiPoint2DExpr::from)
    }
}
