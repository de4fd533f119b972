use crate::ast::planar::{
    clip_to_convex, polygon_area, polygon_contains, polygon_contains_point, polygons_intersect,
    polygons_overlap, polygons_touch,
};
use crate::ast::{
    BooleanExpr, Expr, GeoKind, GeoOp, GeometryExpr, Literal, Operands, Polygon, Polygon2DExpr,
    ValueKind,
};

use super::Emulated;
use super::accessors::text_of;

pub(super) fn emulate(op: GeoOp, args: &[Expr]) -> Option<Emulated> {
    match (op, args) {
        (GeoOp::ContainsPoint, [polygon, point]) => {
            let inside = polygon_contains_point(polygon.as_polygon()?, point.as_point()?);
            Some(Emulated::Value(Expr::Literal(Literal::Bool(inside))))
        }
        (GeoOp::Intersects, [a, b]) => {
            let crossing = polygons_intersect(a.as_polygon()?, b.as_polygon()?);
            Some(Emulated::Value(Expr::Literal(Literal::Bool(crossing))))
        }
        (GeoOp::Contains, [a, b]) => {
            let inside = polygon_contains(a.as_polygon()?, b.as_polygon()?);
            Some(Emulated::Value(Expr::Literal(Literal::Bool(inside))))
        }
        (GeoOp::Touches, [a, b]) => {
            let touching = polygons_touch(a.as_polygon()?, b.as_polygon()?);
            Some(Emulated::Value(Expr::Literal(Literal::Bool(touching))))
        }
        (GeoOp::Intersection, [a, b]) => intersection(a.as_polygon()?, b.as_polygon()?),
        (GeoOp::Overlaps, [a, b]) => Some(Emulated::Value(overlaps(a, b))),
        (GeoOp::Within, [a, b]) => {
            if a.is_absent() {
                return Some(Emulated::Value(Expr::Null(ValueKind::Boolean)));
            }
            Some(Emulated::Value(super::apply(
                GeoKind::Polygon2D,
                GeoOp::Contains,
                Operands::binary(b.clone(), a.clone()),
            )))
        }
        (GeoOp::Area, [polygon]) => {
            let area = polygon_area(polygon.as_polygon()?);
            Some(Emulated::Value(Expr::Literal(Literal::Number(area))))
        }
        (GeoOp::ExteriorRing, [polygon]) => Some(exterior_ring(polygon)),
        _ => None,
    }
}

/// The polygons intersect and their intersection is neither of them.
fn overlaps(a: &Expr, b: &Expr) -> Expr {
    if let (Some(p), Some(q)) = (a.as_polygon(), b.as_polygon()) {
        return Expr::Literal(Literal::Bool(polygons_overlap(p, q)));
    }
    let intersects = super::apply(
        GeoKind::Polygon2D,
        GeoOp::Intersects,
        Operands::binary(a.clone(), b.clone()),
    );
    let (a, b) = (Polygon2DExpr::from_expr(a.clone()), Polygon2DExpr::from_expr(b.clone()));
    let shared = a.intersection(&b);
    BooleanExpr::from_expr(intersects)
        .and(shared.is_not(&a))
        .and(shared.is_not(&b))
        .0
}

/// Shared region of two literal polygons. A region without area (touching
/// boundaries, disjoint polygons) is a null polygon. Folds only when one of
/// the polygons contains the other or one of them is convex.
fn intersection(a: &Polygon, b: &Polygon) -> Option<Emulated> {
    let shared = if !polygons_intersect(a, b) {
        None
    } else if polygon_contains(a, b) {
        Some(b.clone())
    } else if polygon_contains(b, a) {
        Some(a.clone())
    } else {
        let ring = clip_to_convex(a, b).or_else(|| clip_to_convex(b, a))?;
        Polygon::new(ring).filter(|p| polygon_area(p) > 0.0)
    };
    let folded = match shared {
        Some(polygon) => Expr::Literal(Literal::Polygon(polygon)),
        None => Expr::Null(ValueKind::Polygon2D),
    };
    Some(Emulated::Value(folded))
}

fn exterior_ring(polygon: &Expr) -> Emulated {
    if let Some(p) = polygon.as_polygon() {
        return Emulated::Value(Expr::Literal(Literal::Line(p.exterior_ring())));
    }
    let text = text_of(GeoKind::Polygon2D, polygon)
        .replace("POLYGON", "LINESTRING")
        .replace("((", "(")
        .replace("))", ")");
    Emulated::Wkt(GeoKind::Line2D, text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{AsExpr, Point};

    fn square(x: f64, y: f64, size: f64) -> Expr {
        let ring = [(x, y), (x + size, y), (x + size, y + size), (x, y + size)];
        Expr::Literal(Literal::Polygon(Polygon::new(ring).expect("square")))
    }

    fn value(emulated: Option<Emulated>) -> Expr {
        match emulated {
            Some(Emulated::Value(expr)) => expr,
            _ => panic!("expected a value"),
        }
    }

    #[test]
    fn test_literal_area_and_containment() {
        let unit = square(0.0, 0.0, 1.0);
        assert_eq!(value(emulate(GeoOp::Area, &[unit.clone()])).as_number(), Some(1.0));

        let centre = Expr::Literal(Literal::Point(Point::new(0.5, 0.5)));
        let corner = Expr::Literal(Literal::Point(Point::new(1.0, 1.0)));
        assert_eq!(
            value(emulate(GeoOp::ContainsPoint, &[unit.clone(), centre])).as_bool(),
            Some(true)
        );
        assert_eq!(
            value(emulate(GeoOp::ContainsPoint, &[unit, corner])).as_bool(),
            Some(false)
        );
    }

    #[test]
    fn test_disjoint_literals_do_not_overlap() {
        let folded = value(emulate(
            GeoOp::Overlaps,
            &[square(0.0, 0.0, 1.0), square(5.0, 5.0, 1.0)],
        ));
        assert_eq!(folded.as_bool(), Some(false));
    }

    #[test]
    fn test_literal_relations_fold() {
        let unit = square(0.0, 0.0, 1.0);
        let inner = square(0.25, 0.25, 0.5);
        let beside = square(1.0, 0.0, 1.0);
        let shifted = square(0.5, 0.5, 1.0);
        let flag = |op, a: &Expr, b: &Expr| value(emulate(op, &[a.clone(), b.clone()])).as_bool();

        assert_eq!(flag(GeoOp::Contains, &unit, &inner), Some(true));
        assert_eq!(flag(GeoOp::Contains, &inner, &unit), Some(false));
        assert_eq!(flag(GeoOp::Within, &inner, &unit), Some(true));
        assert_eq!(flag(GeoOp::Touches, &unit, &beside), Some(true));
        assert_eq!(flag(GeoOp::Touches, &unit, &shifted), Some(false));
        assert_eq!(flag(GeoOp::Overlaps, &unit, &shifted), Some(true));
        assert_eq!(flag(GeoOp::Overlaps, &unit, &inner), Some(false));
    }

    #[test]
    fn test_literal_intersection() {
        let unit = square(0.0, 0.0, 1.0);
        let shared = value(emulate(GeoOp::Intersection, &[unit.clone(), square(0.5, 0.5, 1.0)]));
        let polygon = shared.as_polygon().expect("polygon");
        assert_eq!(polygon_area(polygon), 0.25);

        let inner = square(0.25, 0.25, 0.5);
        let contained = value(emulate(GeoOp::Intersection, &[unit.clone(), inner.clone()]));
        assert_eq!(contained, inner);

        let edge_only = value(emulate(GeoOp::Intersection, &[unit.clone(), square(1.0, 0.0, 1.0)]));
        assert!(edge_only.is_absent());
        let apart = value(emulate(GeoOp::Intersection, &[unit, square(5.0, 5.0, 1.0)]));
        assert!(apart.is_absent());
    }

    #[test]
    fn test_overlap_formula_over_columns() {
        let a = Polygon2DExpr::column("parcels", "shape");
        let b = Polygon2DExpr::column("zones", "shape");
        let formula = value(emulate(GeoOp::Overlaps, &[a.as_expr().clone(), b.into_expr()]));
        assert_eq!(formula.kind(), ValueKind::Boolean);
        assert!(formula.as_node().is_some());
    }

    #[test]
    fn test_ring_text_of_column() {
        let shape = Polygon2DExpr::column("parcels", "shape");
        let Emulated::Wkt(kind, _) = exterior_ring(shape.as_expr()) else {
            panic!("expected WKT");
        };
        assert_eq!(kind, GeoKind::Line2D);
    }

    #[test]
    fn test_column_predicates_have_no_formula() {
        let a = Polygon2DExpr::column("parcels", "shape").into_expr();
        for op in [GeoOp::Contains, GeoOp::Touches, GeoOp::Intersection] {
            assert!(emulate(op, &[a.clone(), a.clone()]).is_none());
            assert!(emulate(op, &[a.clone(), square(0.0, 0.0, 1.0)]).is_none());
        }
    }
}
