use crate::ast::scalar::{NumberExpr, StringExpr};
use crate::ast::values::Line;
use crate::ast::{Expr, GeoKind, GeoOp, Line2DExpr, Literal, MultiPoint2DExpr, ValueKind};

use super::Emulated;
use super::accessors::text_of;

pub(super) fn emulate(op: GeoOp, args: &[Expr]) -> Option<Emulated> {
    match (op, args) {
        (GeoOp::NumberOfPoints, [points]) => Some(Emulated::Value(number_of_points(points).0)),
        (GeoOp::PointAtIndex, [points, index]) => point_at(points, index.as_number()?),
        (GeoOp::ToLine, [points]) => Some(to_line(points)),
        _ => None,
    }
}

fn members(points: &Expr) -> Option<&[Expr]> {
    let node = points.as_geo_node(GeoOp::Construct)?;
    Some(node.operands().as_slice())
}

fn number_of_points(points: &Expr) -> NumberExpr {
    if let Some(mp) = points.as_multipoint() {
        return NumberExpr::value(mp.len() as f64);
    }
    if let Some(members) = members(points) {
        return NumberExpr::value(members.len() as f64);
    }
    text_of(GeoKind::MultiPoint2D, points).count_of(",").plus(1.0)
}

/// Member at a literal zero-based index; out of range is a null point.
fn point_at(points: &Expr, index: f64) -> Option<Emulated> {
    let null_point = Emulated::Value(Expr::Null(ValueKind::Point2D));
    if index < 0.0 || index.fract() != 0.0 {
        return Some(null_point);
    }
    let at = index as usize;
    if let Some(mp) = points.as_multipoint() {
        return Some(
            mp.get(at)
                .map_or(null_point, |p| Emulated::Value(Expr::Literal(Literal::Point(p)))),
        );
    }
    if let Some(members) = members(points) {
        return Some(
            members
                .get(at)
                .map_or(null_point, |m| Emulated::Value(m.clone())),
        );
    }
    // MULTIPOINT ((x y), (x y), ...): skip `at` separators, then the member
    // runs up to its closing parenthesis.
    let mut rest = text_of(GeoKind::MultiPoint2D, points).substring_after("((");
    for _ in 0..at {
        rest = rest.substring_after(",");
    }
    let member = rest.substring_before(")").replace("(", "").trim();
    let text = StringExpr::concat_all([
        StringExpr::value("POINT ("),
        member,
        StringExpr::value(")"),
    ]);
    let in_range = NumberExpr::value(index).is_less_than(number_of_points(points));
    Some(Emulated::Wkt(
        GeoKind::Point2D,
        StringExpr::case_when(&in_range, text, StringExpr::null()),
    ))
}

fn to_line(points: &Expr) -> Emulated {
    if let Some(mp) = points.as_multipoint() {
        return Emulated::Value(
            Line::from_multipoint(mp).map_or(Expr::Null(ValueKind::Line2D), |line| {
                Expr::Literal(Literal::Line(line))
            }),
        );
    }
    if let Some(members) = members(points) {
        return Emulated::Value(Line2DExpr::from_members(members.to_vec()).0);
    }
    let count = MultiPoint2DExpr::from_expr(points.clone()).number_of_points();
    let coordinates = text_of(GeoKind::MultiPoint2D, points)
        .replace("MULTIPOINT", "")
        .replace("(", "")
        .replace(")", "")
        .trim();
    let text = StringExpr::concat_all([
        StringExpr::value("LINESTRING ("),
        coordinates,
        StringExpr::value(")"),
    ]);
    Emulated::Wkt(
        GeoKind::Line2D,
        StringExpr::case_when(&count.is_greater_than_or_equal(2.0), text, StringExpr::null()),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{AsExpr, ColumnRef, MultiPoint, Op, ScalarOp};

    #[test]
    fn test_column_member_is_guarded_text() {
        let stops = Expr::Column(ColumnRef::new("routes", "stops", ValueKind::MultiPoint2D));
        let Some(Emulated::Wkt(kind, text)) = point_at(&stops, 1.0) else {
            panic!("expected WKT");
        };
        assert_eq!(kind, GeoKind::Point2D);
        let node = text.as_expr().as_node().expect("case node");
        assert_eq!(node.op(), Op::Scalar(ScalarOp::Case));
    }

    #[test]
    fn test_literal_index_out_of_range() {
        let mp = Expr::Literal(Literal::MultiPoint(MultiPoint::new([(1.0, 2.0)])));
        let Some(Emulated::Value(p)) = point_at(&mp, 3.0) else {
            panic!("expected a value");
        };
        assert!(p.is_absent());
        let Some(Emulated::Value(p)) = point_at(&mp, -1.0) else {
            panic!("expected a value");
        };
        assert!(p.is_absent());
    }

    #[test]
    fn test_literal_count() {
        let mp = Expr::Literal(Literal::MultiPoint(MultiPoint::new([(1.0, 2.0), (3.0, 4.0)])));
        assert_eq!(number_of_points(&mp).literal(), Some(2.0));
    }
}
