//! WKT text built from coordinate expressions.

use crate::ast::scalar::{NumberExpr, StringExpr};
use crate::ast::{Expr, GeoKind};

use super::accessors::{point_x, point_y};

/// `x y`.
fn pair(x: &NumberExpr, y: &NumberExpr) -> StringExpr {
    StringExpr::concat_all([x.to_text(), StringExpr::value(" "), y.to_text()])
}

/// `x y` of a point operand.
pub(crate) fn coordinates(point: &Expr) -> StringExpr {
    pair(&point_x(point), &point_y(point))
}

pub(crate) fn point_text(x: &NumberExpr, y: &NumberExpr) -> StringExpr {
    StringExpr::concat_all([
        StringExpr::value("POINT ("),
        pair(x, y),
        StringExpr::value(")"),
    ])
}

fn join(items: impl IntoIterator<Item = StringExpr>) -> Vec<StringExpr> {
    let mut parts = Vec::new();
    for (i, item) in items.into_iter().enumerate() {
        if i > 0 {
            parts.push(StringExpr::value(", "));
        }
        parts.push(item);
    }
    parts
}

fn wrapped(open: &str, inner: Vec<StringExpr>, close: &str) -> StringExpr {
    let mut parts = vec![StringExpr::value(open)];
    parts.extend(inner);
    parts.push(StringExpr::value(close));
    StringExpr::concat_all(parts)
}

/// `, x y` of the first point when the ring is open, decided statically
/// when possible and with a `CASE` otherwise.
fn ring_closure(first: &Expr, last: &Expr) -> StringExpr {
    if first == last {
        return StringExpr::value("");
    }
    let closed = point_x(first)
        .is(point_x(last))
        .and(point_y(first).is(point_y(last)));
    let reopen = StringExpr::value(", ").concat(coordinates(first));
    StringExpr::case_when(&closed, "", reopen)
}

/// WKT of a construction node of `kind` over its members.
pub(crate) fn construct_text(kind: GeoKind, members: &[Expr]) -> StringExpr {
    match kind {
        GeoKind::Point2D => {
            let coordinate = |i: usize| {
                members
                    .get(i)
                    .cloned()
                    .map_or_else(NumberExpr::null, NumberExpr::from_expr)
            };
            point_text(&coordinate(0), &coordinate(1))
        }
        GeoKind::Line2D | GeoKind::LineSegment2D => wrapped(
            "LINESTRING (",
            join(members.iter().map(coordinates)),
            ")",
        ),
        GeoKind::MultiPoint2D => wrapped(
            "MULTIPOINT (",
            join(members.iter().map(|m| wrapped("(", vec![coordinates(m)], ")"))),
            ")",
        ),
        GeoKind::Polygon2D => {
            let mut ring = join(members.iter().map(coordinates));
            if let (Some(first), Some(last)) = (members.first(), members.last()) {
                ring.push(ring_closure(first, last));
            }
            wrapped("POLYGON ((", ring, "))")
        }
    }
}

/// Closed axis-aligned rectangle through the four bounds.
pub(crate) fn rectangle_text(
    min_x: &NumberExpr,
    min_y: &NumberExpr,
    max_x: &NumberExpr,
    max_y: &NumberExpr,
) -> StringExpr {
    let corners = [
        pair(min_x, min_y),
        pair(max_x, min_y),
        pair(max_x, max_y),
        pair(min_x, max_y),
        pair(min_x, min_y),
    ];
    wrapped("POLYGON ((", join(corners), "))")
}
