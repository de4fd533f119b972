use super::call;
use crate::ast::{GeoKind, GeoOp};
use crate::transpiler::traits::SpatialGenerator;

/// MySQL 8 spatial functions.
pub struct MySqlGenerator;

impl MySqlGenerator {
    /// One bound of `ST_Envelope`, which is a Point or a LineString rather
    /// than a Polygon when the geometry has no extent along an axis.
    fn envelope_bound(arg: &str, op: GeoOp) -> String {
        let envelope = format!("ST_Envelope({})", arg);
        let accessor = match op {
            GeoOp::MinX | GeoOp::MaxX => "ST_X",
            _ => "ST_Y",
        };
        let (corner, pick) = match op {
            GeoOp::MinX | GeoOp::MinY => (1, "LEAST"),
            _ => (3, "GREATEST"),
        };
        format!(
            "CASE ST_GeometryType({env}) \
             WHEN 'POLYGON' THEN {acc}(ST_PointN(ST_ExteriorRing({env}), {corner})) \
             WHEN 'LINESTRING' THEN {pick}({acc}(ST_StartPoint({env})), {acc}(ST_EndPoint({env}))) \
             ELSE {acc}({env}) END",
            env = envelope,
            acc = accessor,
            corner = corner,
            pick = pick,
        )
    }
}

impl SpatialGenerator for MySqlGenerator {
    fn name(&self) -> &str {
        "mysql"
    }

    fn quote_identifier(&self, name: &str) -> String {
        format!("`{}`", name.replace('`', "``"))
    }

    fn string_concat(&self, parts: &[&str]) -> String {
        format!("CONCAT({})", parts.join(", "))
    }

    fn position(&self, needle: &str, haystack: &str) -> String {
        format!("LOCATE({}, {})", needle, haystack)
    }

    fn substring(&self, text: &str, start: &str, length: Option<&str>) -> String {
        match length {
            Some(len) => format!("SUBSTRING({}, {}, {})", text, start, len),
            None => format!("SUBSTRING({}, {})", text, start),
        }
    }

    fn length(&self, text: &str) -> String {
        format!("CHAR_LENGTH({})", text)
    }

    fn text_to_number(&self, text: &str) -> String {
        format!("CAST({} AS DOUBLE)", text)
    }

    fn number_to_text(&self, number: &str) -> String {
        format!("CAST({} AS CHAR)", number)
    }

    fn wkt_ordinate(&self, text: &str, n: u32) -> String {
        format!(
            "CAST(REGEXP_SUBSTR(REGEXP_REPLACE({}, '^[^(]*', ''), '[^ ,()]+', 1, {}) AS DOUBLE)",
            text,
            n + 1
        )
    }

    fn geometry_literal(&self, _kind: GeoKind, wkt: &str) -> String {
        format!("ST_GeomFromText({})", self.string_literal(wkt))
    }

    fn geometry_from_text(&self, _kind: GeoKind, text: &str) -> String {
        format!("ST_GeomFromText({})", text)
    }

    fn index_base(&self) -> i64 {
        1
    }

    fn lower(&self, kind: GeoKind, op: GeoOp, args: &[String]) -> Option<String> {
        let sql = match op {
            GeoOp::Construct => match kind {
                GeoKind::Point2D => call("POINT", args),
                GeoKind::Line2D | GeoKind::LineSegment2D => call("LINESTRING", args),
                GeoKind::MultiPoint2D => call("MULTIPOINT", args),
                GeoKind::Polygon2D => return None,
            },
            GeoOp::Equals => call("ST_Equals", args),
            GeoOp::NotEquals => format!("NOT {}", call("ST_Equals", args)),
            GeoOp::AsText => call("ST_AsText", args),
            GeoOp::GetX => call("ST_X", args),
            GeoOp::GetY => call("ST_Y", args),
            GeoOp::MinX | GeoOp::MaxX | GeoOp::MinY | GeoOp::MaxY => {
                let a = args.first()?;
                if kind == GeoKind::Point2D {
                    let accessor = match op {
                        GeoOp::MinX | GeoOp::MaxX => "ST_X",
                        _ => "ST_Y",
                    };
                    format!("{}({})", accessor, a)
                } else {
                    Self::envelope_bound(a, op)
                }
            }
            // ST_Envelope is not always a polygon; the rectangle is built from the bounds.
            GeoOp::BoundingBox => return None,
            GeoOp::MeasurableDimensions => call("ST_Dimension", args),
            GeoOp::SpatialDimensions | GeoOp::HasMagnitude | GeoOp::Magnitude => return None,
            GeoOp::DistanceTo => call("ST_Distance", args),
            GeoOp::Intersects => call("ST_Intersects", args),
            // Crossing polylines may meet more than once; only segments give a point.
            GeoOp::IntersectionPoint => match kind {
                GeoKind::LineSegment2D => call("ST_Intersection", args),
                _ => return None,
            },
            GeoOp::IntersectionPoints | GeoOp::Intersection => call("ST_Intersection", args),
            GeoOp::DoesNotIntersect => call("ST_Disjoint", args),
            GeoOp::Contains | GeoOp::ContainsPoint => call("ST_Contains", args),
            GeoOp::Overlaps => call("ST_Overlaps", args),
            GeoOp::Touches => call("ST_Touches", args),
            GeoOp::Within => call("ST_Within", args),
            GeoOp::Area => call("ST_Area", args),
            GeoOp::ExteriorRing => call("ST_ExteriorRing", args),
            GeoOp::NumberOfPoints => call("ST_NumGeometries", args),
            GeoOp::PointAtIndex => call("ST_GeometryN", args),
            GeoOp::ToLine | GeoOp::ToPolygon | GeoOp::Extent => return None,
        };
        Some(sql)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quoting_and_concat() {
        let g = MySqlGenerator;
        assert_eq!(g.quote_identifier("geo`m"), "`geo``m`");
        assert_eq!(g.string_concat(&["'a'", "b"]), "CONCAT('a', b)");
    }

    #[test]
    fn test_envelope_bounds() {
        let g = MySqlGenerator;
        let args = vec!["shape".to_string()];
        assert_eq!(
            g.lower(GeoKind::Polygon2D, GeoOp::MaxY, &args).as_deref(),
            Some(
                "CASE ST_GeometryType(ST_Envelope(shape)) \
                 WHEN 'POLYGON' THEN ST_Y(ST_PointN(ST_ExteriorRing(ST_Envelope(shape)), 3)) \
                 WHEN 'LINESTRING' THEN GREATEST(ST_Y(ST_StartPoint(ST_Envelope(shape))), ST_Y(ST_EndPoint(ST_Envelope(shape)))) \
                 ELSE ST_Y(ST_Envelope(shape)) END"
            )
        );
        assert_eq!(
            g.lower(GeoKind::Point2D, GeoOp::MinX, &args).as_deref(),
            Some("ST_X(shape)")
        );
    }

    #[test]
    fn test_degenerate_envelope_is_read_from_its_endpoints() {
        let args = vec!["path".to_string()];
        let sql = MySqlGenerator.lower(GeoKind::Line2D, GeoOp::MinY, &args).unwrap();
        assert!(sql.contains("WHEN 'LINESTRING' THEN LEAST(ST_Y(ST_StartPoint(ST_Envelope(path))), ST_Y(ST_EndPoint(ST_Envelope(path))))"));
        assert!(sql.ends_with("ELSE ST_Y(ST_Envelope(path)) END"));
    }

    #[test]
    fn test_extent_and_box_decline() {
        let args = vec!["shape".to_string()];
        assert!(MySqlGenerator.lower(GeoKind::Polygon2D, GeoOp::Extent, &args).is_none());
        assert!(MySqlGenerator.lower(GeoKind::Line2D, GeoOp::BoundingBox, &args).is_none());
    }

    #[test]
    fn test_wkt_ordinate_is_one_regexp_match() {
        assert_eq!(
            MySqlGenerator.wkt_ordinate("t", 1),
            "CAST(REGEXP_SUBSTR(REGEXP_REPLACE(t, '^[^(]*', ''), '[^ ,()]+', 1, 2) AS DOUBLE)"
        );
    }
}
