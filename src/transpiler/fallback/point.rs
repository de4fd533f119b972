use crate::ast::{Expr, GeoKind, GeoOp};

use super::Emulated;
use super::accessors::{known_coordinate, point_x, point_y, text_of, wkt_x, wkt_y};

pub(super) fn emulate(op: GeoOp, args: &[Expr]) -> Option<Emulated> {
    match (op, args) {
        (GeoOp::GetX | GeoOp::GetY, [point]) => {
            let value = known_coordinate(point, op).unwrap_or_else(|| {
                let text = text_of(GeoKind::Point2D, point);
                if op == GeoOp::GetX { wkt_x(&text) } else { wkt_y(&text) }
            });
            Some(Emulated::Value(value.0))
        }
        (GeoOp::DistanceTo, [a, b]) => {
            let dx = point_x(b).minus(point_x(a));
            let dy = point_y(b).minus(point_y(a));
            Some(Emulated::Value(dx.squared().plus(dy.squared()).sqrt().0))
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{Literal, Point};

    fn point(x: f64, y: f64) -> Expr {
        Expr::Literal(Literal::Point(Point::new(x, y)))
    }

    #[test]
    fn test_distance_folds() {
        let Some(Emulated::Value(distance)) =
            emulate(GeoOp::DistanceTo, &[point(1.0, 1.0), point(4.0, 5.0)])
        else {
            panic!("expected a value");
        };
        assert_eq!(distance.as_number(), Some(5.0));
    }

    #[test]
    fn test_other_operators_decline() {
        assert!(emulate(GeoOp::Area, &[point(0.0, 0.0)]).is_none());
    }
}
