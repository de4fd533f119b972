//! Primitive geometry accessors used by the emulation formulas.
//!
//! Each accessor resolves statically when it can (literal operands,
//! construction nodes, absent operands) and otherwise builds a strictly
//! more primitive spatial node, or parses the operand's WKT text.

use crate::ast::scalar::{NumberExpr, StringExpr};
use crate::ast::values::Bounds;
use crate::ast::{Expr, GeoKind, GeoOp, Literal, Op, Operands};

use super::wkt;

/// A coordinate known without asking the dialect.
pub(crate) fn known_coordinate(point: &Expr, op: GeoOp) -> Option<NumberExpr> {
    if point.is_absent() {
        return Some(NumberExpr::null());
    }
    if let Some(p) = point.as_point() {
        let value = if op == GeoOp::GetX { p.x } else { p.y };
        return Some(NumberExpr::value(value));
    }
    let node = point.as_geo_node(GeoOp::Construct)?;
    let index = if op == GeoOp::GetX { 0 } else { 1 };
    let member = node.operands().as_slice().get(index)?;
    Some(NumberExpr::from_expr(member.clone()))
}

fn coordinate(point: &Expr, op: GeoOp) -> NumberExpr {
    known_coordinate(point, op).unwrap_or_else(|| {
        NumberExpr::from_expr(Expr::geo(
            GeoKind::Point2D,
            op,
            Operands::unary(point.clone()),
        ))
    })
}

pub(crate) fn point_x(point: &Expr) -> NumberExpr {
    coordinate(point, GeoOp::GetX)
}

pub(crate) fn point_y(point: &Expr) -> NumberExpr {
    coordinate(point, GeoOp::GetY)
}

/// WKT text of a geometry operand of `kind`.
pub(crate) fn text_of(kind: GeoKind, geometry: &Expr) -> StringExpr {
    if geometry.is_absent() {
        return StringExpr::null();
    }
    if let Some((_, text)) = geometry.as_literal().and_then(Literal::wkt) {
        return StringExpr::value(text);
    }
    if let Some(node) = geometry.as_geo_node(GeoOp::Construct) {
        if !node.is_null_protected() {
            return wkt::construct_text(kind, node.operands().as_slice());
        }
    }
    StringExpr::from_expr(Expr::geo(kind, GeoOp::AsText, Operands::unary(geometry.clone())))
}

/// `x` of a `POINT (x y)` text.
pub(crate) fn wkt_x(text: &StringExpr) -> NumberExpr {
    text.wkt_ordinate(0)
}

/// `y` of a `POINT (x y)` text.
pub(crate) fn wkt_y(text: &StringExpr) -> NumberExpr {
    text.wkt_ordinate(1)
}

/// Endpoint coordinates `[(x1, y1), (x2, y2)]` of a segment operand.
pub(crate) fn segment_endpoints(segment: &Expr) -> [(NumberExpr, NumberExpr); 2] {
    if let Some(s) = segment.as_segment() {
        return [s.start, s.end].map(|p| (NumberExpr::value(p.x), NumberExpr::value(p.y)));
    }
    if let Some(node) = segment.as_geo_node(GeoOp::Construct) {
        if let [start, end] = node.operands().as_slice() {
            return [(point_x(start), point_y(start)), (point_x(end), point_y(end))];
        }
    }
    let text = text_of(GeoKind::LineSegment2D, segment);
    [0, 2].map(|n| (text.wkt_ordinate(n), text.wkt_ordinate(n + 1)))
}

/// Bounds of a literal geometry. An empty literal has none.
pub(crate) fn literal_bounds(geometry: &Expr) -> Option<Option<Bounds>> {
    let bounds = match geometry.as_literal()? {
        Literal::Point(p) => Some(Bounds::point(*p)),
        Literal::Line(l) => l.bounds(),
        Literal::LineSegment(s) => Some(s.bounds()),
        Literal::MultiPoint(m) => m.bounds(),
        Literal::Polygon(p) => Some(p.bounds()),
        Literal::Bool(_) | Literal::Number(_) | Literal::Text(_) => return None,
    };
    Some(bounds)
}

pub(crate) fn pick(bounds: &Bounds, op: GeoOp) -> f64 {
    match op {
        GeoOp::MinX => bounds.min_x,
        GeoOp::MaxX => bounds.max_x,
        GeoOp::MinY => bounds.min_y,
        _ => bounds.max_y,
    }
}

fn is_min(op: GeoOp) -> bool {
    matches!(op, GeoOp::MinX | GeoOp::MinY)
}

fn is_x(op: GeoOp) -> bool {
    matches!(op, GeoOp::MinX | GeoOp::MaxX)
}

/// The min/max accessor `op` of a geometry, as an operand of a larger
/// formula: resolved statically when possible, else a spatial node the
/// dialect lowers or emulates on its own.
pub(crate) fn bound_of(kind: GeoKind, op: GeoOp, geometry: &Expr) -> NumberExpr {
    if geometry.is_absent() {
        return NumberExpr::null();
    }
    if let Some(bounds) = literal_bounds(geometry) {
        return bounds.map_or_else(NumberExpr::null, |b| NumberExpr::value(pick(&b, op)));
    }
    if kind == GeoKind::Point2D {
        return if is_x(op) { point_x(geometry) } else { point_y(geometry) };
    }
    NumberExpr::from_expr(Expr::geo(kind, op, Operands::unary(geometry.clone())))
}

/// Emulation of a min/max accessor node, or `None` when the operand shape
/// has no portable formula.
pub(crate) fn emulate_bound(kind: GeoKind, op: GeoOp, geometry: &Expr) -> Option<NumberExpr> {
    if geometry.is_absent() || literal_bounds(geometry).is_some() || kind == GeoKind::Point2D {
        return Some(bound_of(kind, op, geometry));
    }
    let reduce = |values: Vec<NumberExpr>| -> Option<NumberExpr> {
        let mut values = values.into_iter();
        let first = values.next()?;
        Some(values.fold(first, |acc, v| {
            if is_min(op) { acc.least(v) } else { acc.greatest(v) }
        }))
    };
    if let Some(node) = geometry.as_node() {
        match node.op() {
            Op::Geo(_, GeoOp::Construct) => {
                let members = node.operands().as_slice();
                return reduce(
                    members
                        .iter()
                        .map(|m| if is_x(op) { point_x(m) } else { point_y(m) })
                        .collect(),
                );
            }
            Op::Geo(inner_kind, GeoOp::BoundingBox) => {
                let inner = node.operands().primary()?;
                return Some(bound_of(inner_kind, op, inner));
            }
            Op::Geo(inner_kind, GeoOp::Extent) => {
                let inner = bound_of(inner_kind, op, node.operands().primary()?);
                return Some(if is_min(op) { inner.min() } else { inner.max() });
            }
            _ => {}
        }
    }
    if kind == GeoKind::LineSegment2D {
        let [(x1, y1), (x2, y2)] = segment_endpoints(geometry);
        let (a, b) = if is_x(op) { (x1, x2) } else { (y1, y2) };
        return reduce(vec![a, b]);
    }
    None
}

/// A bound resolved as far as possible before compilation.
pub(crate) fn resolved_bound(kind: GeoKind, op: GeoOp, geometry: &Expr) -> NumberExpr {
    emulate_bound(kind, op, geometry).unwrap_or_else(|| bound_of(kind, op, geometry))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{ColumnRef, Line, LineSegment, Point, ScalarOp, ValueKind};

    #[test]
    fn test_literal_coordinates() {
        let p = Expr::Literal(Literal::Point(Point::new(3.0, -1.0)));
        assert_eq!(point_x(&p).literal(), Some(3.0));
        assert_eq!(point_y(&p).literal(), Some(-1.0));
    }

    #[test]
    fn test_wkt_parsing_folds_on_literal_text() {
        let text = StringExpr::value("POINT (1.5 -2)");
        assert_eq!(wkt_x(&text).literal(), Some(1.5));
        assert_eq!(wkt_y(&text).literal(), Some(-2.0));
        let compact = StringExpr::value("POINT(7 8)");
        assert_eq!(wkt_x(&compact).literal(), Some(7.0));
        assert_eq!(wkt_y(&compact).literal(), Some(8.0));
    }

    #[test]
    fn test_segment_endpoints_from_column_text() {
        let column = Expr::Column(ColumnRef::new("roads", "span", ValueKind::LineSegment2D));
        let [(x1, _), (_, y2)] = segment_endpoints(&column);
        let ordinate = |n: &NumberExpr| match n.0.as_node().map(|node| node.op()) {
            Some(Op::Scalar(ScalarOp::WktOrdinate(i))) => Some(i),
            _ => None,
        };
        assert_eq!(ordinate(&x1), Some(0));
        assert_eq!(ordinate(&y2), Some(3));
    }

    #[test]
    fn test_literal_segment_endpoints() {
        let s = Expr::Literal(Literal::LineSegment(LineSegment::from_coords(0.0, 1.0, 2.0, 3.0)));
        let [(x1, _), (_, y2)] = segment_endpoints(&s);
        assert_eq!(x1.literal(), Some(0.0));
        assert_eq!(y2.literal(), Some(3.0));
    }

    #[test]
    fn test_bounds_of_literal_line() {
        let line = Expr::Literal(Literal::Line(Line::new([(2.0, 3.0), (3.0, 4.0), (4.0, 5.0)])));
        assert_eq!(bound_of(GeoKind::Line2D, GeoOp::MinX, &line).literal(), Some(2.0));
        assert_eq!(bound_of(GeoKind::Line2D, GeoOp::MaxY, &line).literal(), Some(5.0));
        let empty = Expr::Literal(Literal::Line(Line::default()));
        assert_eq!(bound_of(GeoKind::Line2D, GeoOp::MaxY, &empty).literal(), None);
    }
}
