//! Spatial expressions for QAIL.
//!
//! Build typed expression trees over 2D geometry (points, polylines,
//! segments, point collections and polygons) and compile them to SQL for
//! a target dialect. Operators a dialect lacks are emulated with portable
//! formulas; operators whose required input is absent compile to a NULL
//! test.
//!
//! # Example
//! ```
//! use qail_geo::prelude::*;
//!
//! let parcel = Polygon2DExpr::column("parcels", "shape");
//! let sql = parcel.area().to_sql_with_dialect(Dialect::Postgres).unwrap();
//! assert_eq!(sql, "ST_Area(\"parcels\".\"shape\")");
//!
//! let line = Line2DExpr::from(vec![(2.0, 3.0), (3.0, 4.0), (4.0, 5.0)]);
//! let sql = line.min_x().to_sql_with_dialect(Dialect::Sqlite).unwrap();
//! assert_eq!(sql, "2");
//! ```

pub mod ast;
pub mod error;
pub mod transpiler;

pub use error::{GeoError, GeoResult};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::ast::{
        AsExpr, BooleanExpr, GeometryExpr, Line, Line2DExpr, LineSegment, LineSegment2DExpr,
        MultiPoint, MultiPoint2DExpr, NumberExpr, Point, Point2DExpr, Polygon, Polygon2DExpr,
        StringExpr, TableRef,
    };
    pub use crate::error::{GeoError, GeoResult};
    pub use crate::transpiler::{Dialect, DialectProfile, SpatialGenerator, ToSql};
}
