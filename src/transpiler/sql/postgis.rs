use super::call;
use crate::ast::{GeoKind, GeoOp};
use crate::transpiler::traits::SpatialGenerator;

/// PostgreSQL with the PostGIS extension.
pub struct PostgisGenerator;

impl SpatialGenerator for PostgisGenerator {
    fn name(&self) -> &str {
        "postgres"
    }

    fn geometry_literal(&self, _kind: GeoKind, wkt: &str) -> String {
        format!("ST_GeomFromText({})", self.string_literal(wkt))
    }

    fn geometry_from_text(&self, _kind: GeoKind, text: &str) -> String {
        format!("ST_GeomFromText({})", text)
    }

    fn wkt_ordinate(&self, text: &str, n: u32) -> String {
        format!(
            "CAST(NULLIF((regexp_split_to_array(btrim(regexp_replace({}, '^[^(]*', ''), ' ()'), '[ ,()]+'))[{}], '') AS DOUBLE PRECISION)",
            text,
            n + 1
        )
    }

    fn index_base(&self) -> i64 {
        1
    }

    fn lower(&self, kind: GeoKind, op: GeoOp, args: &[String]) -> Option<String> {
        let sql = match op {
            GeoOp::Construct => match kind {
                GeoKind::Point2D => call("ST_MakePoint", args),
                GeoKind::LineSegment2D => call("ST_MakeLine", args),
                GeoKind::Line2D => format!("ST_MakeLine(ARRAY[{}])", args.join(", ")),
                GeoKind::MultiPoint2D => format!("ST_Collect(ARRAY[{}])", args.join(", ")),
                // ST_MakePolygon wants a closed ring; the WKT route closes it.
                GeoKind::Polygon2D => return None,
            },
            GeoOp::Equals => call("ST_Equals", args),
            GeoOp::NotEquals => format!("NOT {}", call("ST_Equals", args)),
            GeoOp::AsText => call("ST_AsText", args),
            GeoOp::GetX => call("ST_X", args),
            GeoOp::GetY => call("ST_Y", args),
            GeoOp::MinX => call("ST_XMin", args),
            GeoOp::MaxX => call("ST_XMax", args),
            GeoOp::MinY => call("ST_YMin", args),
            GeoOp::MaxY => call("ST_YMax", args),
            GeoOp::BoundingBox => {
                let a = args.first()?;
                format!(
                    "ST_MakeEnvelope(ST_XMin({a}), ST_YMin({a}), ST_XMax({a}), ST_YMax({a}))"
                )
            }
            GeoOp::MeasurableDimensions => call("ST_Dimension", args),
            GeoOp::SpatialDimensions => call("ST_CoordDim", args),
            GeoOp::HasMagnitude | GeoOp::Magnitude => return None,
            GeoOp::DistanceTo => call("ST_Distance", args),
            GeoOp::Intersects => call("ST_Intersects", args),
            GeoOp::IntersectionPoint => {
                format!("ST_GeometryN({}, 1)", call("ST_Intersection", args))
            }
            GeoOp::IntersectionPoints => {
                format!("ST_Multi({})", call("ST_Intersection", args))
            }
            GeoOp::Intersection => call("ST_Intersection", args),
            GeoOp::DoesNotIntersect => call("ST_Disjoint", args),
            GeoOp::Contains | GeoOp::ContainsPoint => call("ST_Contains", args),
            GeoOp::Overlaps => call("ST_Overlaps", args),
            GeoOp::Touches => call("ST_Touches", args),
            GeoOp::Within => call("ST_Within", args),
            GeoOp::Area => call("ST_Area", args),
            GeoOp::ExteriorRing => call("ST_ExteriorRing", args),
            GeoOp::NumberOfPoints => call("ST_NumGeometries", args),
            GeoOp::PointAtIndex => call("ST_GeometryN", args),
            GeoOp::ToLine | GeoOp::ToPolygon => return None,
            GeoOp::Extent => format!("{}::geometry", call("ST_Extent", args)),
        };
        Some(sql)
    }
}
