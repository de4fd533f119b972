use crate::ast::typed::typed_expr;
use crate::ast::values::Literal;
use crate::ast::{Expr, Operands, ScalarOp, ValueKind};

typed_expr!(
    /// A boolean (predicate) expression.
    BooleanExpr,
    ValueKind::Boolean
);

impl BooleanExpr {
    pub fn value(value: bool) -> Self {
        Self(Expr::Literal(Literal::Bool(value)))
    }

    pub fn literal(&self) -> Option<bool> {
        self.0.as_bool()
    }

    /// `expr IS NULL`. Never folded: the test must reach the database.
    pub fn null_test(expr: impl Into<Expr>) -> Self {
        Self(Expr::scalar(
            ScalarOp::IsNull,
            ValueKind::Boolean,
            Operands::unary(expr.into()),
        ))
    }

    /// `expr IS NOT NULL`.
    pub fn not_null_test(expr: impl Into<Expr>) -> Self {
        Self(Expr::scalar(
            ScalarOp::IsNotNull,
            ValueKind::Boolean,
            Operands::unary(expr.into()),
        ))
    }

    /// Comparison of two expressions of the same type, folded when both
    /// sides are literal numbers, text or booleans.
    pub(crate) fn compare(op: ScalarOp, left: &Expr, right: &Expr) -> Self {
        let folded = match (left.as_literal(), right.as_literal()) {
            (Some(Literal::Number(a)), Some(Literal::Number(b))) => compare_values(op, a, b),
            (Some(Literal::Text(a)), Some(Literal::Text(b))) => compare_values(op, a, b),
            (Some(Literal::Bool(a)), Some(Literal::Bool(b))) => compare_values(op, a, b),
            _ => None,
        };
        match folded {
            Some(result) => BooleanExpr::value(result),
            None => Self(Expr::scalar(
                op,
                ValueKind::Boolean,
                Operands::binary(left.clone(), right.clone()),
            )),
        }
    }

    pub fn and(&self, other: impl Into<BooleanExpr>) -> Self {
        let other = other.into();
        match (self.literal(), other.literal()) {
            (Some(false), _) | (_, Some(false)) => BooleanExpr::value(false),
            (Some(true), _) => other,
            (_, Some(true)) => self.clone(),
            (None, None) => Self(Expr::scalar(
                ScalarOp::And,
                ValueKind::Boolean,
                Operands::binary(self.0.clone(), other.0),
            )),
        }
    }

    pub fn or(&self, other: impl Into<BooleanExpr>) -> Self {
        let other = other.into();
        match (self.literal(), other.literal()) {
            (Some(true), _) | (_, Some(true)) => BooleanExpr::value(true),
            (Some(false), _) => other,
            (_, Some(false)) => self.clone(),
            (None, None) => Self(Expr::scalar(
                ScalarOp::Or,
                ValueKind::Boolean,
                Operands::binary(self.0.clone(), other.0),
            )),
        }
    }

    /// Conjunction of all predicates; `TRUE` when empty.
    pub fn all(predicates: impl IntoIterator<Item = BooleanExpr>) -> Self {
        predicates
            .into_iter()
            .fold(BooleanExpr::value(true), |acc, p| acc.and(p))
    }

    /// Disjunction of all predicates; `FALSE` when empty.
    pub fn any(predicates: impl IntoIterator<Item = BooleanExpr>) -> Self {
        predicates
            .into_iter()
            .fold(BooleanExpr::value(false), |acc, p| acc.or(p))
    }

    pub fn not(&self) -> Self {
        match self.literal() {
            Some(b) => BooleanExpr::value(!b),
            None => Self(Expr::scalar(
                ScalarOp::Not,
                ValueKind::Boolean,
                Operands::unary(self.0.clone()),
            )),
        }
    }

    pub fn is(&self, other: impl Into<BooleanExpr>) -> Self {
        BooleanExpr::compare(ScalarOp::Equals, &self.0, &other.into().0)
    }
}

fn compare_values<T: PartialOrd + ?Sized>(op: ScalarOp, a: &T, b: &T) -> Option<bool> {
    match op {
        ScalarOp::Equals => Some(a == b),
        ScalarOp::NotEquals => Some(a != b),
        ScalarOp::LessThan => Some(a < b),
        ScalarOp::LessThanOrEqual => Some(a <= b),
        ScalarOp::GreaterThan => Some(a > b),
        ScalarOp::GreaterThanOrEqual => Some(a >= b),
        _ => None,
    }
}

impl From<bool> for BooleanExpr {
    fn from(value: bool) -> Self {
        BooleanExpr::value(value)
    }
}

impl From<Option<bool>> for BooleanExpr {
    fn from(value: Option<bool>) -> Self {
        value.map_or_else(BooleanExpr::null, BooleanExpr::value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn flag() -> BooleanExpr {
        BooleanExpr::column("sites", "active")
    }

    #[test]
    fn test_and_or_fold_with_literals() {
        assert_eq!(flag().and(false).literal(), Some(false));
        assert_eq!(flag().and(true), flag());
        assert_eq!(flag().or(true).literal(), Some(true));
        assert_eq!(BooleanExpr::value(false).or(flag()), flag());
        assert_eq!(flag().and(flag()).literal(), None);
    }

    #[test]
    fn test_not_folds() {
        assert_eq!(BooleanExpr::value(true).not().literal(), Some(false));
        assert_eq!(flag().not().literal(), None);
    }

    #[test]
    fn test_null_test_never_folds() {
        let test = BooleanExpr::null_test(Expr::Literal(Literal::Number(1.0)));
        assert_eq!(test.literal(), None);
    }

    #[test]
    fn test_all_and_any() {
        assert_eq!(BooleanExpr::all([]).literal(), Some(true));
        assert_eq!(BooleanExpr::any([]).literal(), Some(false));
        assert_eq!(BooleanExpr::all([BooleanExpr::value(true), flag()]), flag());
    }
}
