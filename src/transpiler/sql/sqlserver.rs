use crate::ast::{GeoKind, GeoOp};
use crate::transpiler::traits::SpatialGenerator;

/// SQL Server `geometry` methods (SRID 0).
pub struct SqlServerGenerator;

/// `a.Method(b)` with the method's bit result turned into a predicate.
fn predicate(method: &str, args: &[String]) -> Option<String> {
    match args {
        [a, b] => Some(format!("({}.{}({}) = 1)", a, method, b)),
        _ => None,
    }
}

fn method(name: &str, args: &[String]) -> Option<String> {
    let (receiver, rest) = args.split_first()?;
    Some(format!("{}.{}({})", receiver, name, rest.join(", ")))
}

fn property(name: &str, args: &[String]) -> Option<String> {
    Some(format!("{}.{}", args.first()?, name))
}

impl SpatialGenerator for SqlServerGenerator {
    fn name(&self) -> &str {
        "sqlserver"
    }

    fn quote_identifier(&self, name: &str) -> String {
        format!("[{}]", name.replace(']', "]]"))
    }

    fn bool_literal(&self, value: bool) -> String {
        let literal = if value { "(1=1)" } else { "(0=1)" };
        literal.to_string()
    }

    fn string_concat(&self, parts: &[&str]) -> String {
        format!("({})", parts.join(" + "))
    }

    fn position(&self, needle: &str, haystack: &str) -> String {
        format!("CHARINDEX({}, {})", needle, haystack)
    }

    fn substring(&self, text: &str, start: &str, length: Option<&str>) -> String {
        match length {
            Some(len) => format!("SUBSTRING({}, {}, {})", text, start, len),
            None => format!("SUBSTRING({}, {}, LEN({}))", text, start, text),
        }
    }

    fn length(&self, text: &str) -> String {
        format!("LEN({})", text)
    }

    fn text_to_number(&self, text: &str) -> String {
        format!("CAST({} AS FLOAT)", text)
    }

    fn number_to_text(&self, number: &str) -> String {
        format!("CAST({} AS VARCHAR(64))", number)
    }

    fn least(&self, a: &str, b: &str) -> String {
        format!("CASE WHEN {a} <= {b} THEN {a} ELSE {b} END")
    }

    fn greatest(&self, a: &str, b: &str) -> String {
        format!("CASE WHEN {a} >= {b} THEN {a} ELSE {b} END")
    }

    fn geometry_literal(&self, _kind: GeoKind, wkt: &str) -> String {
        format!("geometry::STGeomFromText({}, 0)", self.string_literal(wkt))
    }

    fn geometry_from_text(&self, _kind: GeoKind, text: &str) -> String {
        format!("geometry::STGeomFromText({}, 0)", text)
    }

    fn index_base(&self) -> i64 {
        1
    }

    fn lower(&self, kind: GeoKind, op: GeoOp, args: &[String]) -> Option<String> {
        match op {
            GeoOp::Construct => match (kind, args) {
                (GeoKind::Point2D, [x, y]) => Some(format!("geometry::Point({}, {}, 0)", x, y)),
                _ => None,
            },
            GeoOp::Equals => predicate("STEquals", args),
            GeoOp::NotEquals => match args {
                [a, b] => Some(format!("({}.STEquals({}) = 0)", a, b)),
                _ => None,
            },
            GeoOp::AsText => method("STAsText", args),
            GeoOp::GetX => property("STX", args),
            GeoOp::GetY => property("STY", args),
            GeoOp::MinX | GeoOp::MaxX | GeoOp::MinY | GeoOp::MaxY => {
                let a = args.first()?;
                let coordinate = match op {
                    GeoOp::MinX | GeoOp::MaxX => "STX",
                    _ => "STY",
                };
                if kind == GeoKind::Point2D {
                    return Some(format!("{}.{}", a, coordinate));
                }
                let corner = match op {
                    GeoOp::MinX | GeoOp::MinY => 1,
                    _ => 3,
                };
                Some(format!("{}.STEnvelope().STPointN({}).{}", a, corner, coordinate))
            }
            GeoOp::BoundingBox => method("STEnvelope", args),
            GeoOp::MeasurableDimensions => method("STDimension", args),
            GeoOp::SpatialDimensions | GeoOp::HasMagnitude | GeoOp::Magnitude => None,
            GeoOp::DistanceTo => method("STDistance", args),
            GeoOp::Intersects => predicate("STIntersects", args),
            GeoOp::IntersectionPoint => {
                method("STIntersection", args).map(|sql| format!("{}.STPointN(1)", sql))
            }
            GeoOp::IntersectionPoints | GeoOp::Intersection => method("STIntersection", args),
            GeoOp::DoesNotIntersect => predicate("STDisjoint", args),
            GeoOp::Contains | GeoOp::ContainsPoint => predicate("STContains", args),
            GeoOp::Overlaps => predicate("STOverlaps", args),
            GeoOp::Touches => predicate("STTouches", args),
            GeoOp::Within => predicate("STWithin", args),
            GeoOp::Area => method("STArea", args),
            GeoOp::ExteriorRing => method("STExteriorRing", args),
            GeoOp::NumberOfPoints => method("STNumGeometries", args),
            GeoOp::PointAtIndex => method("STGeometryN", args),
            GeoOp::ToLine | GeoOp::ToPolygon => None,
            GeoOp::Extent => Some(format!("geometry::EnvelopeAggregate({})", args.first()?)),
        }
    }
}
