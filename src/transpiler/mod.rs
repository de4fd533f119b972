//! SQL transpiler for spatial expressions.
//!
//! Compiles typed expression trees to SQL text for a target dialect.

pub mod dialect;
pub mod profile;
pub mod sql;
pub mod traits;

mod compile;
pub(crate) mod fallback;
mod scalar;

#[cfg(test)]
mod tests;

use tracing::trace;

use crate::ast::AsExpr;
use crate::error::GeoResult;

pub use dialect::Dialect;
pub use profile::{DialectProfile, ProfileGenerator};
pub use traits::SpatialGenerator;
pub use traits::escape_identifier;

/// Trait for compiling expressions to SQL.
pub trait ToSql {
    /// Compile for the default dialect.
    fn to_sql(&self) -> GeoResult<String> {
        self.to_sql_with_dialect(Dialect::default())
    }

    /// Compile for a built-in dialect.
    fn to_sql_with_dialect(&self, dialect: Dialect) -> GeoResult<String> {
        self.to_sql_with_generator(dialect.generator().as_ref())
    }

    /// Compile with any generator, e.g. one built from a [`DialectProfile`].
    fn to_sql_with_generator(&self, generator: &dyn SpatialGenerator) -> GeoResult<String>;
}

impl<T: AsExpr> ToSql for T {
    fn to_sql_with_generator(&self, generator: &dyn SpatialGenerator) -> GeoResult<String> {
        trace!(dialect = generator.name(), kind = %self.kind(), "compiling expression");
        compile::compile_expr(self.as_expr(), generator)
    }
}
