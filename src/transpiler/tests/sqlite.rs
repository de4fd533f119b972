use pretty_assertions::assert_eq;

use crate::ast::*;
use crate::error::GeoError;
use crate::transpiler::{Dialect, ToSql};

fn lite(expr: &impl AsExpr) -> String {
    expr.to_sql_with_dialect(Dialect::Sqlite).unwrap()
}

#[test]
fn test_literal_line_folds_completely() {
    let line = Line2DExpr::from(vec![(2.0, 3.0), (3.0, 4.0), (4.0, 5.0)]);
    assert_eq!(lite(&line), "'LINESTRING (2 3, 3 4, 4 5)'");
    assert_eq!(lite(&line.as_text()), "'LINESTRING (2 3, 3 4, 4 5)'");
    assert_eq!(lite(&line.min_x()), "2");
    assert_eq!(lite(&line.max_x()), "4");
    assert_eq!(lite(&line.min_y()), "3");
    assert_eq!(lite(&line.max_y()), "5");
    assert_eq!(
        lite(&line.bounding_box()),
        "'POLYGON ((2 3, 4 3, 4 5, 2 5, 2 3))'"
    );
    assert_eq!(lite(&line.measurable_dimensions()), "1");
    assert_eq!(lite(&line.spatial_dimensions()), "2");
}

#[test]
fn test_unit_square() {
    let unit = Polygon2DExpr::unit_square();
    assert_eq!(lite(&unit.area()), "1");
    assert_eq!(
        lite(&unit.exterior_ring()),
        "'LINESTRING (0 0, 1 0, 1 1, 0 1, 0 0)'"
    );
    assert_eq!(lite(&unit.contains_point((0.5, 0.5))), "1");
    assert_eq!(lite(&unit.contains_point((1.0, 0.5))), "0");
}

#[test]
fn test_empty_multipoint_line_is_null_test() {
    let empty = MultiPoint2DExpr::from_points(Vec::<Point>::new());
    let line = empty.line2d_result();
    assert!(line.is_null_protected());
    assert_eq!(lite(&line), "(NULL IS NULL)");
}

#[test]
fn test_point_equality_over_components() {
    let p = Point2DExpr::from_coords(NumberExpr::column("s", "lon"), NumberExpr::column("s", "lat"));
    assert_eq!(
        lite(&p.is((1.0, 2.0))),
        "((\"s\".\"lon\" = 1) AND (\"s\".\"lat\" = 2))"
    );
    assert_eq!(
        lite(&p.is_not((1.0, 2.0))),
        "(NOT ((\"s\".\"lon\" = 1) AND (\"s\".\"lat\" = 2)))"
    );
}

#[test]
fn test_coordinate_parsed_from_stored_text() {
    let sql = lite(&Point2DExpr::column("sites", "location").get_x());
    assert!(
        sql.starts_with("CAST(json_extract('[' || REPLACE(REPLACE(TRIM(REPLACE(REPLACE(LTRIM(\"sites\".\"location\", "),
        "{}",
        sql
    );
    assert!(sql.ends_with(" || ']', '$[0]') AS REAL)"), "{}", sql);
}

#[test]
fn test_stored_point_equality_reads_each_coordinate_once() {
    let site = Point2DExpr::column("sites", "location");
    let sql = lite(&site.is((1.0, 2.0)));
    assert_eq!(sql.matches("\"sites\".\"location\"").count(), 2, "{}", sql);
    assert!(sql.contains("'$[1]'"), "{}", sql);
    assert!(sql.len() < 600, "{}", sql);
}

#[test]
fn test_literal_distance() {
    let a = Point2DExpr::from((1.0, 1.0));
    assert_eq!(lite(&a.distance_to((4.0, 5.0))), "5");
}

#[test]
fn test_segments() {
    let s = LineSegment2DExpr::from(((0.0, 0.0), (2.0, 2.0)));
    assert_eq!(lite(&s.intersects(((0.0, 2.0), (2.0, 0.0)))), "1");
    assert_eq!(lite(&s.intersection_with(((0.0, 2.0), (2.0, 0.0)))), "'POINT (1 1)'");
    assert_eq!(lite(&s.intersection_with(((5.0, 5.0), (6.0, 7.0)))), "NULL");

    let column = LineSegment2DExpr::column("edges", "seg");
    let formula = lite(&column.intersects(&s));
    assert!(formula.contains("MIN("), "{}", formula);
    assert!(formula.contains("MAX("), "{}", formula);
}

#[test]
fn test_member_access() {
    let stops = MultiPoint2DExpr::from(vec![(1.0, 2.0), (3.0, 4.0)]);
    assert_eq!(lite(&stops.point_at(1)), "'POINT (3 4)'");
    assert_eq!(lite(&stops.point_at(5)), "NULL");
    assert_eq!(lite(&stops.number_of_points()), "2");
    assert_eq!(lite(&stops.line2d_result()), "'LINESTRING (1 2, 3 4)'");
}

#[test]
fn test_column_member_index_must_be_literal() {
    let stops = MultiPoint2DExpr::column("routes", "stops");
    let at = stops.point_at(NumberExpr::column("routes", "n"));
    assert!(matches!(
        at.to_sql_with_dialect(Dialect::Sqlite),
        Err(GeoError::NoEmulation { op: GeoOp::PointAtIndex, .. })
    ));
}

#[test]
fn test_polygon_column_area_has_no_emulation() {
    let area = Polygon2DExpr::column("parcels", "shape").area();
    match area.to_sql_with_dialect(Dialect::Sqlite) {
        Err(GeoError::NoEmulation { kind, op, dialect }) => {
            assert_eq!(kind, GeoKind::Polygon2D);
            assert_eq!(op, GeoOp::Area);
            assert_eq!(dialect, "sqlite");
        }
        other => panic!("expected NoEmulation, got {:?}", other),
    }
}

#[test]
fn test_point_extent_over_text() {
    let sql = lite(&Point2DExpr::column("sites", "location").extent());
    assert!(sql.starts_with("('POLYGON ((' || PRINTF('%.15g', MIN("), "{}", sql);
}

#[test]
fn test_literal_polygon_relations() {
    let unit = Polygon2DExpr::unit_square();
    let inner = Polygon2DExpr::from(vec![(0.25, 0.25), (0.75, 0.25), (0.75, 0.75), (0.25, 0.75)]);
    let beside = Polygon2DExpr::from(vec![(1.0, 0.0), (2.0, 0.0), (2.0, 1.0), (1.0, 1.0)]);
    let shifted = Polygon2DExpr::from(vec![(0.5, 0.5), (1.5, 0.5), (1.5, 1.5), (0.5, 1.5)]);

    assert_eq!(lite(&unit.contains(&inner)), "1");
    assert_eq!(lite(&inner.contains(&unit)), "0");
    assert_eq!(lite(&inner.within(&unit)), "1");
    assert_eq!(lite(&unit.within(&inner)), "0");
    assert_eq!(lite(&unit.touches(&beside)), "1");
    assert_eq!(lite(&unit.touches(&shifted)), "0");
    assert_eq!(lite(&unit.overlaps(&shifted)), "1");
    assert_eq!(lite(&unit.overlaps(&inner)), "0");
    assert_eq!(lite(&unit.overlaps(&beside)), "1");
}

#[test]
fn test_literal_polygon_intersection() {
    let unit = Polygon2DExpr::unit_square();
    let shifted = Polygon2DExpr::from(vec![(0.5, 0.5), (1.5, 0.5), (1.5, 1.5), (0.5, 1.5)]);
    let far = Polygon2DExpr::from(vec![(5.0, 5.0), (6.0, 5.0), (6.0, 6.0)]);
    assert_eq!(
        lite(&unit.intersection(&shifted)),
        "'POLYGON ((0.5 0.5, 1 0.5, 1 1, 0.5 1, 0.5 0.5))'"
    );
    assert_eq!(lite(&unit.intersection(&far)), "NULL");
}
