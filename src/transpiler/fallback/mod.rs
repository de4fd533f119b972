//! Portable emulation of spatial operators a dialect declines.
//!
//! Every formula here is expressed with the scalar expression library and
//! strictly more primitive spatial nodes (accessors, WKT text), so the
//! compiler can lower its result again. Over literal operands the formulas
//! fold to a literal.

mod accessors;
mod curve;
mod multipoint;
mod point;
mod polygon;
mod wkt;

use tracing::trace;

use crate::ast::geo::is_box;
use crate::ast::scalar::{BooleanExpr, NumberExpr, StringExpr};
use crate::ast::values::Polygon;
use crate::ast::{Expr, GeoKind, GeoOp, Literal, Operands, ValueKind};

use accessors::{emulate_bound, point_x, point_y, resolved_bound, text_of};

/// Replacement for a declined spatial node.
#[derive(Debug)]
pub(crate) enum Emulated {
    /// An expression of the node's own result type.
    Value(Expr),
    /// WKT text of a geometry of the given kind; the compiler turns it
    /// into a geometry value.
    Wkt(GeoKind, StringExpr),
}

/// Emulation of `kind.op` over `operands`, or `None` when no portable
/// formula fits the operand shapes.
pub(crate) fn emulate(kind: GeoKind, op: GeoOp, operands: &Operands) -> Option<Emulated> {
    let args = operands.as_slice();
    let emulated = match (op, args) {
        (GeoOp::Construct, members) => Some(Emulated::Wkt(kind, wkt::construct_text(kind, members))),
        (GeoOp::AsText, [geometry]) => Some(as_text(kind, geometry)),
        (GeoOp::Equals, [a, b]) => Some(Emulated::Value(equals(kind, a, b).0)),
        (GeoOp::NotEquals, [a, b]) => {
            let equal = apply(kind, GeoOp::Equals, Operands::binary(a.clone(), b.clone()));
            Some(Emulated::Value(BooleanExpr::from_expr(equal).not().0))
        }
        (GeoOp::DoesNotIntersect, [a, b]) => {
            let crossing = apply(kind, GeoOp::Intersects, Operands::binary(a.clone(), b.clone()));
            Some(Emulated::Value(BooleanExpr::from_expr(crossing).not().0))
        }
        (GeoOp::MinX | GeoOp::MaxX | GeoOp::MinY | GeoOp::MaxY, [geometry]) => {
            emulate_bound(kind, op, geometry).map(|bound| Emulated::Value(bound.0))
        }
        (GeoOp::BoundingBox, [geometry]) => Some(bounding_box(kind, geometry)),
        (GeoOp::MeasurableDimensions, [_]) => Some(Emulated::Value(
            NumberExpr::value(f64::from(kind.measurable_dimensions())).0,
        )),
        (GeoOp::SpatialDimensions, [_]) => Some(Emulated::Value(NumberExpr::value(2.0).0)),
        (GeoOp::HasMagnitude, [_]) => Some(Emulated::Value(BooleanExpr::value(false).0)),
        (GeoOp::Magnitude, [_]) => Some(Emulated::Value(NumberExpr::null().0)),
        (GeoOp::Extent, [geometry]) => {
            let bound = |op: GeoOp| resolved_bound(kind, op, geometry);
            Some(Emulated::Wkt(
                GeoKind::Polygon2D,
                wkt::rectangle_text(
                    &bound(GeoOp::MinX).min(),
                    &bound(GeoOp::MinY).min(),
                    &bound(GeoOp::MaxX).max(),
                    &bound(GeoOp::MaxY).max(),
                ),
            ))
        }
        (GeoOp::ToPolygon, _) => None,
        _ => match kind {
            GeoKind::Point2D => point::emulate(op, args),
            GeoKind::Line2D | GeoKind::LineSegment2D => curve::emulate(kind, op, args),
            GeoKind::MultiPoint2D => multipoint::emulate(op, args),
            GeoKind::Polygon2D => polygon::emulate(op, args),
        },
    };
    if let Some(Emulated::Value(Expr::Literal(literal))) = &emulated {
        trace!(%kind, %op, ?literal, "folded spatial operator");
    }
    emulated
}

/// A spatial node over `operands`, replaced by its emulation when that
/// folds to a literal.
pub(crate) fn apply(kind: GeoKind, op: GeoOp, operands: Operands) -> Expr {
    let node = Expr::geo(kind, op, operands);
    if let Some(n) = node.as_node().filter(|n| !n.is_null_protected()) {
        if let Some(Emulated::Value(folded @ Expr::Literal(_))) = emulate(kind, op, n.operands()) {
            return folded;
        }
    }
    node
}

fn as_text(kind: GeoKind, geometry: &Expr) -> Emulated {
    let text = text_of(kind, geometry);
    // A stored geometry already is its text where no dialect function
    // exists for it.
    if text.0.as_geo_node(GeoOp::AsText).is_some() {
        return Emulated::Value(geometry.clone());
    }
    Emulated::Value(text.0)
}

fn equals(kind: GeoKind, a: &Expr, b: &Expr) -> BooleanExpr {
    if kind == GeoKind::Point2D {
        return point_x(a)
            .is(point_x(b))
            .and(point_y(a).is(point_y(b)));
    }
    text_of(kind, a).is(text_of(kind, b))
}

fn bounding_box(kind: GeoKind, geometry: &Expr) -> Emulated {
    if is_box(geometry) {
        return Emulated::Value(geometry.clone());
    }
    if let Some(bounds) = accessors::literal_bounds(geometry) {
        let folded = bounds.map_or(Expr::Null(ValueKind::Polygon2D), |b| {
            Expr::Literal(Literal::Polygon(Polygon::rectangle(b)))
        });
        return Emulated::Value(folded);
    }
    let bound = |op: GeoOp| resolved_bound(kind, op, geometry);
    Emulated::Wkt(
        GeoKind::Polygon2D,
        wkt::rectangle_text(
            &bound(GeoOp::MinX),
            &bound(GeoOp::MinY),
            &bound(GeoOp::MaxX),
            &bound(GeoOp::MaxY),
        ),
    )
}
