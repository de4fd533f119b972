use pretty_assertions::assert_eq;

use crate::ast::*;
use crate::transpiler::{Dialect, ToSql};

fn ms(expr: &impl AsExpr) -> String {
    expr.to_sql_with_dialect(Dialect::SqlServer).unwrap()
}

#[test]
fn test_method_calls() {
    let parcel = Polygon2DExpr::column("parcels", "shape");
    let zone = Polygon2DExpr::column("zones", "shape");
    assert_eq!(ms(&parcel.area()), "[parcels].[shape].STArea()");
    assert_eq!(
        ms(&parcel.overlaps(&zone)),
        "([parcels].[shape].STOverlaps([zones].[shape]) = 1)"
    );
    assert_eq!(
        ms(&parcel.is_not(&zone)),
        "([parcels].[shape].STEquals([zones].[shape]) = 0)"
    );
}

#[test]
fn test_point_construction() {
    let p = Point2DExpr::from_coords(NumberExpr::column("s", "lon"), 3.5);
    assert_eq!(ms(&p), "geometry::Point([s].[lon], 3.5, 0)");
    assert_eq!(ms(&p.get_y()), "geometry::Point([s].[lon], 3.5, 0).STY");
}

#[test]
fn test_boolean_literals() {
    let unit = Polygon2DExpr::unit_square();
    assert_eq!(ms(&unit.has_magnitude()), "(0=1)");
}

#[test]
fn test_declined_line_conversion() {
    let stops = MultiPoint2DExpr::from_points(vec![
        Point2DExpr::column("routes", "a"),
        Point2DExpr::column("routes", "b"),
    ]);
    let line = stops.line2d_result();
    let sql = ms(&line);
    assert!(sql.starts_with("geometry::STGeomFromText(('LINESTRING (' + "), "{}", sql);
}
