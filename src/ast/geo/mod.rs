//! Typed geometry expressions.
//!
//! Each type wraps the generic [`Expr`] tree and exposes the operators valid
//! for its geometry kind. Accessors and predicates shared by every kind live
//! on [`GeometryExpr`].

mod line;
mod multipoint;
mod point;
mod polygon;
mod segment;

pub use line::Line2DExpr;
pub use multipoint::MultiPoint2DExpr;
pub use point::Point2DExpr;
pub use polygon::Polygon2DExpr;
pub use segment::LineSegment2DExpr;

use crate::ast::scalar::{BooleanExpr, NumberExpr, StringExpr};
use crate::ast::{AsExpr, Expr, GeoKind, GeoOp, Operands};

pub(crate) fn unary(kind: GeoKind, op: GeoOp, operand: &Expr) -> Expr {
    Expr::geo(kind, op, Operands::unary(operand.clone()))
}

pub(crate) fn binary(kind: GeoKind, op: GeoOp, left: &Expr, right: Expr) -> Expr {
    Expr::geo(kind, op, Operands::binary(left.clone(), right))
}

/// A bounding-box or extent node.
pub(crate) fn is_box(expr: &Expr) -> bool {
    expr.as_geo_node(GeoOp::BoundingBox).is_some() || expr.as_geo_node(GeoOp::Extent).is_some()
}

/// Members of a construction node, or `None` when any member is not a
/// literal.
pub(crate) fn all_literal<T>(
    members: &[Expr],
    extract: impl Fn(&Expr) -> Option<T>,
) -> Option<Vec<T>> {
    members.iter().map(extract).collect()
}

/// Operators every geometry kind supports.
pub trait GeometryExpr: AsExpr + Sized {
    const KIND: GeoKind;

    /// Spatial equality.
    fn is(&self, other: impl Into<Self>) -> BooleanExpr {
        BooleanExpr::from_expr(binary(
            Self::KIND,
            GeoOp::Equals,
            self.as_expr(),
            other.into().into_expr(),
        ))
    }

    fn is_not(&self, other: impl Into<Self>) -> BooleanExpr {
        BooleanExpr::from_expr(binary(
            Self::KIND,
            GeoOp::NotEquals,
            self.as_expr(),
            other.into().into_expr(),
        ))
    }

    /// Well-Known Text of the geometry.
    fn as_text(&self) -> StringExpr {
        StringExpr::from_expr(unary(Self::KIND, GeoOp::AsText, self.as_expr()))
    }

    fn min_x(&self) -> NumberExpr {
        NumberExpr::from_expr(unary(Self::KIND, GeoOp::MinX, self.as_expr()))
    }

    fn max_x(&self) -> NumberExpr {
        NumberExpr::from_expr(unary(Self::KIND, GeoOp::MaxX, self.as_expr()))
    }

    fn min_y(&self) -> NumberExpr {
        NumberExpr::from_expr(unary(Self::KIND, GeoOp::MinY, self.as_expr()))
    }

    fn max_y(&self) -> NumberExpr {
        NumberExpr::from_expr(unary(Self::KIND, GeoOp::MaxY, self.as_expr()))
    }

    /// Axis-aligned bounding rectangle. A box (or an extent) is its own
    /// bounding box.
    fn bounding_box(&self) -> Polygon2DExpr {
        let expr = self.as_expr();
        if is_box(expr) {
            return Polygon2DExpr::from_expr(expr.clone());
        }
        Polygon2DExpr::from_expr(unary(Self::KIND, GeoOp::BoundingBox, expr))
    }

    /// 0 for points, 1 for curves, 2 for surfaces.
    fn measurable_dimensions(&self) -> NumberExpr {
        NumberExpr::from_expr(unary(
            Self::KIND,
            GeoOp::MeasurableDimensions,
            self.as_expr(),
        ))
    }

    fn spatial_dimensions(&self) -> NumberExpr {
        NumberExpr::from_expr(unary(Self::KIND, GeoOp::SpatialDimensions, self.as_expr()))
    }

    fn has_magnitude(&self) -> BooleanExpr {
        BooleanExpr::from_expr(unary(Self::KIND, GeoOp::HasMagnitude, self.as_expr()))
    }

    fn magnitude(&self) -> NumberExpr {
        NumberExpr::from_expr(unary(Self::KIND, GeoOp::Magnitude, self.as_expr()))
    }

    /// Bounding box over every row of the group. Aggregate.
    fn extent(&self) -> Polygon2DExpr {
        Polygon2DExpr::from_expr(unary(Self::KIND, GeoOp::Extent, self.as_expr()))
    }
}
