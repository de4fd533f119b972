//! Expression trees over 2D geometry and scalar values.

pub mod expr;
pub mod geo;
pub mod operators;
pub mod planar;
pub mod scalar;
pub mod table;
pub mod typed;
pub mod values;

pub use expr::{Expr, Node, Operands};
pub use geo::{
    GeometryExpr, Line2DExpr, LineSegment2DExpr, MultiPoint2DExpr, Point2DExpr, Polygon2DExpr,
};
pub use operators::{GeoKind, GeoOp, Op, ScalarOp, ValueKind};
pub use scalar::{BooleanExpr, NumberExpr, StringExpr, count};
pub use table::{ColumnRef, TableRef};
pub use typed::AsExpr;
pub use values::{Bounds, Line, LineSegment, Literal, MultiPoint, Point, Polygon};
