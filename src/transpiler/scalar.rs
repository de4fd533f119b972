//! Rendering of scalar operator nodes.

use super::compile::compile_expr;
use super::traits::SpatialGenerator;
use crate::ast::{Operands, ScalarOp};
use crate::error::GeoResult;

pub(crate) fn compile_scalar(
    op: ScalarOp,
    operands: &Operands,
    g: &dyn SpatialGenerator,
) -> GeoResult<String> {
    let args = operands
        .iter()
        .map(|arg| compile_expr(arg, g))
        .collect::<GeoResult<Vec<_>>>()?;
    let arg = |i: usize| args.get(i).map_or("NULL", String::as_str);

    let sql = match op {
        // Spaced so a negative operand never forms a `--` comment.
        ScalarOp::Negate => format!("(- {})", arg(0)),
        ScalarOp::SquareRoot => g.sqrt(arg(0)),
        ScalarOp::Least => g.least(arg(0), arg(1)),
        ScalarOp::Greatest => g.greatest(arg(0), arg(1)),
        ScalarOp::Not => format!("(NOT {})", arg(0)),
        ScalarOp::IsNull => format!("({} IS NULL)", arg(0)),
        ScalarOp::IsNotNull => format!("({} IS NOT NULL)", arg(0)),
        ScalarOp::Case => format!("CASE WHEN {} THEN {} ELSE {} END", arg(0), arg(1), arg(2)),
        ScalarOp::Concat => {
            let parts: Vec<&str> = args.iter().map(String::as_str).collect();
            g.string_concat(&parts)
        }
        ScalarOp::NumberToText => g.number_to_text(arg(0)),
        ScalarOp::TextToNumber => g.text_to_number(arg(0)),
        ScalarOp::Length => g.length(arg(0)),
        ScalarOp::Trim => g.trim(arg(0)),
        ScalarOp::Replace => g.replace(arg(0), arg(1), arg(2)),
        ScalarOp::SubstringBefore => g.substring_before(arg(0), arg(1)),
        ScalarOp::SubstringAfter => g.substring_after(arg(0), arg(1)),
        ScalarOp::WktOrdinate(n) => g.wkt_ordinate(arg(0), n),
        ScalarOp::Min => format!("MIN({})", arg(0)),
        ScalarOp::Max => format!("MAX({})", arg(0)),
        ScalarOp::Count => format!("COUNT({})", arg(0)),
        ScalarOp::Add
        | ScalarOp::Subtract
        | ScalarOp::Multiply
        | ScalarOp::Divide
        | ScalarOp::Equals
        | ScalarOp::NotEquals
        | ScalarOp::LessThan
        | ScalarOp::LessThanOrEqual
        | ScalarOp::GreaterThan
        | ScalarOp::GreaterThanOrEqual
        | ScalarOp::And
        | ScalarOp::Or => format!(
            "({} {} {})",
            arg(0),
            op.infix().unwrap_or_default(),
            arg(1)
        ),
    };
    Ok(sql)
}
