use pretty_assertions::assert_eq;

use crate::ast::*;
use crate::error::GeoError;
use crate::transpiler::{Dialect, ToSql};

fn my(expr: &impl AsExpr) -> String {
    expr.to_sql_with_dialect(Dialect::MySQL).unwrap()
}

#[test]
fn test_native_operators() {
    let road = Line2DExpr::column("roads", "path");
    assert_eq!(
        my(&road.min_x()),
        "CASE ST_GeometryType(ST_Envelope(`roads`.`path`)) \
         WHEN 'POLYGON' THEN ST_X(ST_PointN(ST_ExteriorRing(ST_Envelope(`roads`.`path`)), 1)) \
         WHEN 'LINESTRING' THEN LEAST(ST_X(ST_StartPoint(ST_Envelope(`roads`.`path`))), ST_X(ST_EndPoint(ST_Envelope(`roads`.`path`)))) \
         ELSE ST_X(ST_Envelope(`roads`.`path`)) END"
    );
    let stops = MultiPoint2DExpr::column("routes", "stops");
    assert_eq!(my(&stops.point_at(2)), "ST_GeometryN(`routes`.`stops`, 3)");
}

#[test]
fn test_bounding_box_is_always_a_rectangle() {
    let road = Line2DExpr::column("roads", "path");
    let bbox = my(&road.bounding_box());
    assert!(
        bbox.starts_with(
            "ST_GeomFromText(CONCAT('POLYGON ((', CAST(CASE ST_GeometryType(ST_Envelope(`roads`.`path`)) WHEN 'POLYGON' THEN ST_X("
        ),
        "{}",
        bbox
    );
    assert!(!bbox.starts_with("ST_Envelope("), "{}", bbox);
    assert_eq!(my(&road.bounding_box().bounding_box()), bbox);
}

#[test]
fn test_line_crossing_folds_for_literals() {
    let a = Line2DExpr::from(vec![(0.0, 0.0), (4.0, 4.0), (8.0, 0.0)]);
    let b = Line2DExpr::from(vec![(0.0, 2.0), (8.0, 2.0)]);
    assert_eq!(
        my(&a.intersection_with(&b)),
        "ST_GeomFromText('POINT (2 2)')"
    );
    assert_eq!(
        my(&a.intersection_points(&b)),
        "ST_Intersection(ST_GeomFromText('LINESTRING (0 0, 4 4, 8 0)'), ST_GeomFromText('LINESTRING (0 2, 8 2)'))"
    );
}

#[test]
fn test_line_crossing_of_columns_is_unsupported() {
    let a = Line2DExpr::column("roads", "path");
    let b = Line2DExpr::column("rivers", "course");
    assert!(matches!(
        a.intersection_with(&b).to_sql_with_dialect(Dialect::MySQL),
        Err(GeoError::NoEmulation { kind: GeoKind::Line2D, op: GeoOp::IntersectionPoint, .. })
    ));
}

#[test]
fn test_extent_from_point_bounds() {
    let sql = my(&Point2DExpr::column("sites", "location").extent());
    assert!(
        sql.starts_with("ST_GeomFromText(CONCAT('POLYGON ((', CAST(MIN(ST_X(`sites`.`location`)) AS CHAR), ' ', CAST(MIN(ST_Y(`sites`.`location`)) AS CHAR)"),
        "{}",
        sql
    );
}
