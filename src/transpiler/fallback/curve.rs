//! Lines and segments.

use crate::ast::planar::{
    line_intersection_points, lines_intersect, segment_intersection, segments_intersect,
};
use crate::ast::scalar::{BooleanExpr, NumberExpr, StringExpr};
use crate::ast::{Expr, GeoKind, GeoOp, Literal, ValueKind};

use super::Emulated;
use super::accessors::segment_endpoints;
use super::wkt::point_text;

type Coords = (NumberExpr, NumberExpr);

pub(super) fn emulate(kind: GeoKind, op: GeoOp, args: &[Expr]) -> Option<Emulated> {
    let [a, b] = args else {
        return None;
    };
    match kind {
        GeoKind::Line2D => line(op, a, b),
        _ => segment(op, a, b),
    }
}

fn line(op: GeoOp, a: &Expr, b: &Expr) -> Option<Emulated> {
    let (a, b) = (a.as_line()?, b.as_line()?);
    let folded = match op {
        GeoOp::Intersects => Expr::Literal(Literal::Bool(lines_intersect(a, b))),
        GeoOp::IntersectionPoint => line_intersection_points(a, b)
            .get(0)
            .map_or(Expr::Null(ValueKind::Point2D), |p| {
                Expr::Literal(Literal::Point(p))
            }),
        GeoOp::IntersectionPoints => {
            Expr::Literal(Literal::MultiPoint(line_intersection_points(a, b)))
        }
        _ => return None,
    };
    Some(Emulated::Value(folded))
}

fn segment(op: GeoOp, a: &Expr, b: &Expr) -> Option<Emulated> {
    if let (Some(s), Some(t)) = (a.as_segment(), b.as_segment()) {
        let folded = match op {
            GeoOp::Intersects => Expr::Literal(Literal::Bool(segments_intersect(&s, &t))),
            GeoOp::IntersectionPoint => segment_intersection(&s, &t)
                .map_or(Expr::Null(ValueKind::Point2D), |p| {
                    Expr::Literal(Literal::Point(p))
                }),
            _ => return None,
        };
        return Some(Emulated::Value(folded));
    }
    let [p1, p2] = segment_endpoints(a);
    let [q1, q2] = segment_endpoints(b);
    match op {
        GeoOp::Intersects => Some(Emulated::Value(intersects(&p1, &p2, &q1, &q2).0)),
        GeoOp::IntersectionPoint => {
            let (rx, ry) = (p2.0.minus(p1.0.clone()), p2.1.minus(p1.1.clone()));
            let (sx, sy) = (q2.0.minus(q1.0.clone()), q2.1.minus(q1.1.clone()));
            let denom = rx.times(sy.clone()).minus(ry.times(sx.clone()));
            let (dx, dy) = (q1.0.minus(p1.0.clone()), q1.1.minus(p1.1.clone()));
            let u = dx.times(sy).minus(dy.times(sx)).divided_by(denom.clone());
            let crossing = point_text(&p1.0.plus(u.times(rx)), &p1.1.plus(u.times(ry)));
            let crosses = intersects(&p1, &p2, &q1, &q2).and(denom.is_not(0.0));
            Some(Emulated::Wkt(
                GeoKind::Point2D,
                StringExpr::case_when(&crosses, crossing, StringExpr::null()),
            ))
        }
        _ => None,
    }
}

/// Twice the signed area of (a, b, c).
fn orientation(a: &Coords, b: &Coords, c: &Coords) -> NumberExpr {
    let (bx, by) = (b.0.minus(a.0.clone()), b.1.minus(a.1.clone()));
    let (cx, cy) = (c.0.minus(a.0.clone()), c.1.minus(a.1.clone()));
    bx.times(cy).minus(by.times(cx))
}

/// Two-segment test: each segment's endpoints lie on opposite sides of (or
/// on) the other's line, and the bounding boxes overlap.
fn intersects(p1: &Coords, p2: &Coords, q1: &Coords, q2: &Coords) -> BooleanExpr {
    let d1 = orientation(q1, q2, p1);
    let d2 = orientation(q1, q2, p2);
    let d3 = orientation(p1, p2, q1);
    let d4 = orientation(p1, p2, q2);
    let straddles = d1
        .times(d2)
        .is_less_than_or_equal(0.0)
        .and(d3.times(d4).is_less_than_or_equal(0.0));
    let overlap = |a1: &NumberExpr, a2: &NumberExpr, b1: &NumberExpr, b2: &NumberExpr| {
        a1.least(a2)
            .is_less_than_or_equal(b1.greatest(b2))
            .and(b1.least(b2).is_less_than_or_equal(a1.greatest(a2)))
    };
    straddles
        .and(overlap(&p1.0, &p2.0, &q1.0, &q2.0))
        .and(overlap(&p1.1, &p2.1, &q1.1, &q2.1))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{Line, LineSegment};

    fn segment_lit(x1: f64, y1: f64, x2: f64, y2: f64) -> Expr {
        Expr::Literal(Literal::LineSegment(LineSegment::from_coords(x1, y1, x2, y2)))
    }

    fn value(emulated: Option<Emulated>) -> Expr {
        match emulated {
            Some(Emulated::Value(expr)) => expr,
            _ => panic!("expected a value"),
        }
    }

    fn coords(x: f64, y: f64) -> Coords {
        (NumberExpr::value(x), NumberExpr::value(y))
    }

    #[test]
    fn test_formula_agrees_with_planar_test() {
        let cases = [
            ((0.0, 0.0, 2.0, 2.0), (0.0, 2.0, 2.0, 0.0), true),
            ((0.0, 0.0, 1.0, 1.0), (2.0, 2.0, 3.0, 3.0), false),
            ((0.0, 0.0, 2.0, 0.0), (1.0, 0.0, 3.0, 0.0), true),
            ((0.0, 0.0, 1.0, 0.0), (1.0, 0.0, 1.0, 5.0), true),
            ((0.0, 0.0, 1.0, 0.0), (2.0, -1.0, 2.0, 1.0), false),
        ];
        for ((a1, a2, a3, a4), (b1, b2, b3, b4), expected) in cases {
            let formula = intersects(&coords(a1, a2), &coords(a3, a4), &coords(b1, b2), &coords(b3, b4));
            assert_eq!(formula.literal(), Some(expected));
            let s = LineSegment::from_coords(a1, a2, a3, a4);
            let t = LineSegment::from_coords(b1, b2, b3, b4);
            assert_eq!(segments_intersect(&s, &t), expected);
        }
    }

    #[test]
    fn test_literal_crossing_point() {
        let p = value(emulate(
            GeoKind::LineSegment2D,
            GeoOp::IntersectionPoint,
            &[segment_lit(0.0, 0.0, 2.0, 2.0), segment_lit(0.0, 2.0, 2.0, 0.0)],
        ));
        assert_eq!(p.as_point().map(|p| (p.x, p.y)), Some((1.0, 1.0)));
    }

    #[test]
    fn test_parallel_segments_have_no_point() {
        let p = value(emulate(
            GeoKind::LineSegment2D,
            GeoOp::IntersectionPoint,
            &[segment_lit(0.0, 0.0, 2.0, 0.0), segment_lit(1.0, 0.0, 3.0, 0.0)],
        ));
        assert!(p.is_absent());
    }

    #[test]
    fn test_first_line_crossing() {
        let a = Expr::Literal(Literal::Line(Line::new([(0.0, 0.0), (4.0, 4.0), (8.0, 0.0)])));
        let b = Expr::Literal(Literal::Line(Line::new([(0.0, 2.0), (8.0, 2.0)])));
        let p = value(emulate(GeoKind::Line2D, GeoOp::IntersectionPoint, &[a.clone(), b.clone()]));
        assert_eq!(p.as_point().map(|p| (p.x, p.y)), Some((2.0, 2.0)));
        let all = value(emulate(GeoKind::Line2D, GeoOp::IntersectionPoints, &[a, b]));
        assert_eq!(all.as_multipoint().map(|m| m.len()), Some(2));
    }

    #[test]
    fn test_line_columns_have_no_formula() {
        let col = Expr::Column(crate::ast::ColumnRef::new("roads", "path", ValueKind::Line2D));
        assert!(emulate(GeoKind::Line2D, GeoOp::Intersects, &[col.clone(), col]).is_none());
    }
}
