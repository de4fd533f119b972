//! Expression-tree compilation.
//!
//! A spatial node is offered to the dialect first, with its operands
//! already rendered. When the dialect declines, the node is replaced by its
//! portable emulation and that is compiled instead. Null-protected nodes
//! never reach the dialect: they compile to a NULL test of their primary
//! operand.

use tracing::trace;

use super::fallback::{self, Emulated};
use super::scalar::compile_scalar;
use super::traits::SpatialGenerator;
use crate::ast::{Expr, GeoKind, GeoOp, Literal, Node, Op};
use crate::error::{GeoError, GeoResult};

pub(crate) fn compile_expr(expr: &Expr, g: &dyn SpatialGenerator) -> GeoResult<String> {
    match expr {
        Expr::Literal(lit) => Ok(literal(lit, g)),
        Expr::Column(col) => Ok(format!(
            "{}.{}",
            g.quote_identifier(col.table.qualifier()),
            g.quote_identifier(&col.column)
        )),
        Expr::Null(_) => Ok("NULL".to_string()),
        Expr::Node(node) => {
            if node.is_null_protected() {
                let subject = compile_expr(&node.null_test_subject(), g)?;
                return Ok(format!("({} IS NULL)", subject));
            }
            match node.op() {
                Op::Scalar(op) => compile_scalar(op, node.operands(), g),
                Op::Geo(kind, op) => compile_geo(kind, op, node, g),
            }
        }
    }
}

fn literal(lit: &Literal, g: &dyn SpatialGenerator) -> String {
    match lit {
        Literal::Bool(b) => g.bool_literal(*b),
        Literal::Number(n) => g.number_literal(*n),
        Literal::Text(s) => g.string_literal(s),
        geometry => geometry
            .wkt()
            .map_or_else(|| "NULL".to_string(), |(kind, wkt)| g.geometry_literal(kind, &wkt)),
    }
}

fn compile_geo(kind: GeoKind, op: GeoOp, node: &Node, g: &dyn SpatialGenerator) -> GeoResult<String> {
    let compiled: GeoResult<Vec<String>> =
        node.operands().iter().map(|arg| compile_expr(arg, g)).collect();

    // An operand the dialect cannot render may still be unnecessary to the
    // emulation, so the error is held until the fallback is known.
    let operand_error = match compiled {
        Ok(mut args) => {
            if op == GeoOp::PointAtIndex {
                rebase_index(node, &mut args, g);
            }
            if let Some(sql) = g.lower(kind, op, &args) {
                return Ok(sql);
            }
            None
        }
        Err(e) => Some(e),
    };

    trace!(dialect = g.name(), %kind, %op, "emulating spatial operator");
    match fallback::emulate(kind, op, node.operands()) {
        Some(Emulated::Value(expr)) => compile_expr(&expr, g),
        Some(Emulated::Wkt(result_kind, text)) => {
            let text = compile_expr(&text.0, g)?;
            Ok(g.geometry_from_text(result_kind, &text))
        }
        None => Err(operand_error.unwrap_or_else(|| GeoError::NoEmulation {
            kind,
            op,
            dialect: g.name().to_string(),
        })),
    }
}

/// Shift a zero-based member index to the dialect's base.
fn rebase_index(node: &Node, args: &mut [String], g: &dyn SpatialGenerator) {
    let base = g.index_base();
    if base == 0 {
        return;
    }
    let Some(rendered) = args.get_mut(1) else {
        return;
    };
    let index = node.operands().as_slice().get(1).and_then(Expr::as_number);
    *rendered = match index {
        Some(n) => g.number_literal(n + base as f64),
        None => format!("({} + {})", rendered, g.number_literal(base as f64)),
    };
}
