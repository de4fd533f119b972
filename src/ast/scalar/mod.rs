//! Scalar expression library: numbers, text and booleans.
//!
//! The builders here are used directly by clients and by the portable
//! emulation formulas. Operations over literal operands fold eagerly, so a
//! formula over known coordinates collapses to a single literal.

mod boolean;
mod number;
mod string;

pub use boolean::BooleanExpr;
pub use number::NumberExpr;
pub use string::StringExpr;

use crate::ast::{Expr, Operands, ScalarOp};

/// `CASE WHEN condition THEN then ELSE otherwise END`, folded when the
/// condition is a literal. The result has the type of `then`.
pub(crate) fn case_when(condition: &BooleanExpr, then: Expr, otherwise: Expr) -> Expr {
    match condition.literal() {
        Some(true) => then,
        Some(false) => otherwise,
        None => {
            let kind = then.kind();
            Expr::scalar(
                ScalarOp::Case,
                kind,
                Operands::ternary(condition.0.clone(), then, otherwise),
            )
        }
    }
}

/// `COUNT(expr)`.
pub fn count(expr: impl Into<Expr>) -> NumberExpr {
    NumberExpr(Expr::scalar(
        ScalarOp::Count,
        crate::ast::ValueKind::Number,
        Operands::unary(expr.into()),
    ))
}
