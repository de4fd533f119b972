use serde::{Deserialize, Serialize};

/// The SQL type an expression produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValueKind {
    Boolean,
    Number,
    Text,
    #[serde(rename = "point2d")]
    Point2D,
    #[serde(rename = "line2d")]
    Line2D,
    #[serde(rename = "line_segment2d")]
    LineSegment2D,
    #[serde(rename = "multi_point2d")]
    MultiPoint2D,
    #[serde(rename = "polygon2d")]
    Polygon2D,
}

impl ValueKind {
    /// The geometry kind, if this is a geometry type.
    pub fn geometry(self) -> Option<GeoKind> {
        match self {
            ValueKind::Point2D => Some(GeoKind::Point2D),
            ValueKind::Line2D => Some(GeoKind::Line2D),
            ValueKind::LineSegment2D => Some(GeoKind::LineSegment2D),
            ValueKind::MultiPoint2D => Some(GeoKind::MultiPoint2D),
            ValueKind::Polygon2D => Some(GeoKind::Polygon2D),
            ValueKind::Boolean | ValueKind::Number | ValueKind::Text => None,
        }
    }
}

impl std::fmt::Display for ValueKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValueKind::Boolean => write!(f, "boolean"),
            ValueKind::Number => write!(f, "number"),
            ValueKind::Text => write!(f, "text"),
            ValueKind::Point2D => write!(f, "point2d"),
            ValueKind::Line2D => write!(f, "line2d"),
            ValueKind::LineSegment2D => write!(f, "line_segment2d"),
            ValueKind::MultiPoint2D => write!(f, "multi_point2d"),
            ValueKind::Polygon2D => write!(f, "polygon2d"),
        }
    }
}

/// The five geometry kinds a spatial operator can be lowered for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum GeoKind {
    #[serde(rename = "point2d")]
    Point2D,
    #[serde(rename = "line2d")]
    Line2D,
    #[serde(rename = "line_segment2d")]
    LineSegment2D,
    #[serde(rename = "multi_point2d")]
    MultiPoint2D,
    #[serde(rename = "polygon2d")]
    Polygon2D,
}

impl GeoKind {
    pub const ALL: [GeoKind; 5] = [
        GeoKind::Point2D,
        GeoKind::Line2D,
        GeoKind::LineSegment2D,
        GeoKind::MultiPoint2D,
        GeoKind::Polygon2D,
    ];

    pub fn value_kind(self) -> ValueKind {
        match self {
            GeoKind::Point2D => ValueKind::Point2D,
            GeoKind::Line2D => ValueKind::Line2D,
            GeoKind::LineSegment2D => ValueKind::LineSegment2D,
            GeoKind::MultiPoint2D => ValueKind::MultiPoint2D,
            GeoKind::Polygon2D => ValueKind::Polygon2D,
        }
    }

    /// Configuration name (`point2d`, `line_segment2d`, ...).
    pub fn name(self) -> &'static str {
        match self {
            GeoKind::Point2D => "point2d",
            GeoKind::Line2D => "line2d",
            GeoKind::LineSegment2D => "line_segment2d",
            GeoKind::MultiPoint2D => "multi_point2d",
            GeoKind::Polygon2D => "polygon2d",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.name() == name)
    }

    /// Leading WKT tag for values of this kind.
    pub fn wkt_tag(self) -> &'static str {
        match self {
            GeoKind::Point2D => "POINT",
            GeoKind::Line2D | GeoKind::LineSegment2D => "LINESTRING",
            GeoKind::MultiPoint2D => "MULTIPOINT",
            GeoKind::Polygon2D => "POLYGON",
        }
    }

    /// Topological dimension: 0 for points, 1 for curves, 2 for surfaces.
    pub fn measurable_dimensions(self) -> u8 {
        match self {
            GeoKind::Point2D | GeoKind::MultiPoint2D => 0,
            GeoKind::Line2D | GeoKind::LineSegment2D => 1,
            GeoKind::Polygon2D => 2,
        }
    }

    /// Fewest members a construction node needs before it stops being
    /// null-protected (coordinates for points, points otherwise).
    pub fn min_members(self) -> usize {
        match self {
            GeoKind::Point2D => 2,
            GeoKind::Line2D | GeoKind::LineSegment2D => 2,
            GeoKind::MultiPoint2D => 1,
            GeoKind::Polygon2D => 3,
        }
    }
}

impl std::fmt::Display for GeoKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Spatial operators. Paired with a [`GeoKind`] they form the key a
/// dialect lowers (or declines).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GeoOp {
    /// Build a geometry from member expressions (coordinates or points).
    Construct,
    Equals,
    NotEquals,
    /// WKT text of the geometry.
    AsText,
    GetX,
    GetY,
    MinX,
    MaxX,
    MinY,
    MaxY,
    BoundingBox,
    MeasurableDimensions,
    SpatialDimensions,
    HasMagnitude,
    Magnitude,
    DistanceTo,
    Intersects,
    /// A single crossing point of two curves.
    IntersectionPoint,
    /// Every crossing point of two curves, as a multipoint.
    IntersectionPoints,
    /// Polygon intersection.
    Intersection,
    DoesNotIntersect,
    Contains,
    ContainsPoint,
    Overlaps,
    Touches,
    Within,
    Area,
    ExteriorRing,
    NumberOfPoints,
    /// Zero-based member access; the index is rebased per dialect.
    PointAtIndex,
    ToLine,
    ToPolygon,
    /// Aggregate bounding box over all rows.
    Extent,
}

impl GeoOp {
    pub const ALL: [GeoOp; 33] = [
        GeoOp::Construct,
        GeoOp::Equals,
        GeoOp::NotEquals,
        GeoOp::AsText,
        GeoOp::GetX,
        GeoOp::GetY,
        GeoOp::MinX,
        GeoOp::MaxX,
        GeoOp::MinY,
        GeoOp::MaxY,
        GeoOp::BoundingBox,
        GeoOp::MeasurableDimensions,
        GeoOp::SpatialDimensions,
        GeoOp::HasMagnitude,
        GeoOp::Magnitude,
        GeoOp::DistanceTo,
        GeoOp::Intersects,
        GeoOp::IntersectionPoint,
        GeoOp::IntersectionPoints,
        GeoOp::Intersection,
        GeoOp::DoesNotIntersect,
        GeoOp::Contains,
        GeoOp::ContainsPoint,
        GeoOp::Overlaps,
        GeoOp::Touches,
        GeoOp::Within,
        GeoOp::Area,
        GeoOp::ExteriorRing,
        GeoOp::NumberOfPoints,
        GeoOp::PointAtIndex,
        GeoOp::ToLine,
        GeoOp::ToPolygon,
        GeoOp::Extent,
    ];

    /// Configuration name (`distance_to`, `bounding_box`, ...).
    pub fn name(self) -> &'static str {
        match self {
            GeoOp::Construct => "construct",
            GeoOp::Equals => "equals",
            GeoOp::NotEquals => "not_equals",
            GeoOp::AsText => "as_text",
            GeoOp::GetX => "get_x",
            GeoOp::GetY => "get_y",
            GeoOp::MinX => "min_x",
            GeoOp::MaxX => "max_x",
            GeoOp::MinY => "min_y",
            GeoOp::MaxY => "max_y",
            GeoOp::BoundingBox => "bounding_box",
            GeoOp::MeasurableDimensions => "measurable_dimensions",
            GeoOp::SpatialDimensions => "spatial_dimensions",
            GeoOp::HasMagnitude => "has_magnitude",
            GeoOp::Magnitude => "magnitude",
            GeoOp::DistanceTo => "distance_to",
            GeoOp::Intersects => "intersects",
            GeoOp::IntersectionPoint => "intersection_point",
            GeoOp::IntersectionPoints => "intersection_points",
            GeoOp::Intersection => "intersection",
            GeoOp::DoesNotIntersect => "does_not_intersect",
            GeoOp::Contains => "contains",
            GeoOp::ContainsPoint => "contains_point",
            GeoOp::Overlaps => "overlaps",
            GeoOp::Touches => "touches",
            GeoOp::Within => "within",
            GeoOp::Area => "area",
            GeoOp::ExteriorRing => "exterior_ring",
            GeoOp::NumberOfPoints => "number_of_points",
            GeoOp::PointAtIndex => "point_at_index",
            GeoOp::ToLine => "to_line",
            GeoOp::ToPolygon => "to_polygon",
            GeoOp::Extent => "extent",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|op| op.name() == name)
    }

    /// Whether the operator is a set function (affects GROUP BY).
    pub fn is_aggregate(self) -> bool {
        matches!(self, GeoOp::Extent)
    }

    /// Operand count; `None` for the variadic construction operator.
    pub fn arity(self) -> Option<usize> {
        match self {
            GeoOp::Construct => None,
            GeoOp::Equals
            | GeoOp::NotEquals
            | GeoOp::DistanceTo
            | GeoOp::Intersects
            | GeoOp::IntersectionPoint
            | GeoOp::IntersectionPoints
            | GeoOp::Intersection
            | GeoOp::DoesNotIntersect
            | GeoOp::Contains
            | GeoOp::ContainsPoint
            | GeoOp::Overlaps
            | GeoOp::Touches
            | GeoOp::Within
            | GeoOp::PointAtIndex => Some(2),
            _ => Some(1),
        }
    }

    /// Result type of this operator applied to a geometry of `kind`.
    pub fn result_kind(self, kind: GeoKind) -> ValueKind {
        match self {
            GeoOp::Construct => kind.value_kind(),
            GeoOp::Equals
            | GeoOp::NotEquals
            | GeoOp::HasMagnitude
            | GeoOp::Intersects
            | GeoOp::DoesNotIntersect
            | GeoOp::Contains
            | GeoOp::ContainsPoint
            | GeoOp::Overlaps
            | GeoOp::Touches
            | GeoOp::Within => ValueKind::Boolean,
            GeoOp::AsText => ValueKind::Text,
            GeoOp::GetX
            | GeoOp::GetY
            | GeoOp::MinX
            | GeoOp::MaxX
            | GeoOp::MinY
            | GeoOp::MaxY
            | GeoOp::MeasurableDimensions
            | GeoOp::SpatialDimensions
            | GeoOp::Magnitude
            | GeoOp::DistanceTo
            | GeoOp::Area
            | GeoOp::NumberOfPoints => ValueKind::Number,
            GeoOp::BoundingBox | GeoOp::Intersection | GeoOp::ToPolygon | GeoOp::Extent => {
                ValueKind::Polygon2D
            }
            GeoOp::IntersectionPoint | GeoOp::PointAtIndex => ValueKind::Point2D,
            GeoOp::IntersectionPoints => ValueKind::MultiPoint2D,
            GeoOp::ExteriorRing | GeoOp::ToLine => ValueKind::Line2D,
        }
    }
}

impl std::fmt::Display for GeoOp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Operators of the scalar expression library.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScalarOp {
    Add,
    Subtract,
    Multiply,
    Divide,
    Negate,
    SquareRoot,
    Least,
    Greatest,
    Equals,
    NotEquals,
    LessThan,
    LessThanOrEqual,
    GreaterThan,
    GreaterThanOrEqual,
    And,
    Or,
    Not,
    IsNull,
    IsNotNull,
    /// CASE WHEN a THEN b ELSE c END
    Case,
    Concat,
    NumberToText,
    TextToNumber,
    Length,
    Trim,
    Replace,
    /// Text before the first occurrence of a delimiter.
    SubstringBefore,
    /// Text after the first occurrence of a delimiter.
    SubstringAfter,
    /// The n-th number between the parentheses of a WKT text.
    WktOrdinate(u32),
    Min,
    Max,
    Count,
}

impl ScalarOp {
    pub fn is_aggregate(self) -> bool {
        matches!(self, ScalarOp::Min | ScalarOp::Max | ScalarOp::Count)
    }

    /// Binary infix SQL operator, for the operators rendered that way.
    pub fn infix(self) -> Option<&'static str> {
        match self {
            ScalarOp::Add => Some("+"),
            ScalarOp::Subtract => Some("-"),
            ScalarOp::Multiply => Some("*"),
            ScalarOp::Divide => Some("/"),
            ScalarOp::Equals => Some("="),
            ScalarOp::NotEquals => Some("<>"),
            ScalarOp::LessThan => Some("<"),
            ScalarOp::LessThanOrEqual => Some("<="),
            ScalarOp::GreaterThan => Some(">"),
            ScalarOp::GreaterThanOrEqual => Some(">="),
            ScalarOp::And => Some("AND"),
            ScalarOp::Or => Some("OR"),
            _ => None,
        }
    }
}

/// Operator tag of a [`Node`](crate::ast::Node).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Op {
    Scalar(ScalarOp),
    Geo(GeoKind, GeoOp),
}

impl Op {
    pub fn is_aggregate(self) -> bool {
        match self {
            Op::Scalar(op) => op.is_aggregate(),
            Op::Geo(_, op) => op.is_aggregate(),
        }
    }

    /// Spatial operators null-protect; scalar operators let SQL NULL flow.
    pub fn null_protects(self) -> bool {
        matches!(self, Op::Geo(..))
    }
}
