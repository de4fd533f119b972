use crate::ast::typed::typed_expr;
use crate::ast::values::{Literal, format_number};
use crate::ast::{Expr, Operands, ScalarOp, ValueKind};

use super::{BooleanExpr, StringExpr, case_when};

typed_expr!(
    /// A numeric expression.
    NumberExpr,
    ValueKind::Number
);

impl NumberExpr {
    pub fn value(value: f64) -> Self {
        Self(Expr::Literal(Literal::Number(value)))
    }

    /// The literal value, when known without a database.
    pub fn literal(&self) -> Option<f64> {
        self.0.as_number()
    }

    fn arithmetic(
        &self,
        op: ScalarOp,
        other: NumberExpr,
        fold: impl Fn(f64, f64) -> Option<f64>,
    ) -> Self {
        if let (Some(a), Some(b)) = (self.literal(), other.literal()) {
            if let Some(folded) = fold(a, b) {
                return NumberExpr::value(folded);
            }
        }
        Self(Expr::scalar(
            op,
            ValueKind::Number,
            Operands::binary(self.0.clone(), other.0),
        ))
    }

    fn unary(&self, op: ScalarOp, fold: impl Fn(f64) -> Option<f64>) -> Self {
        if let Some(folded) = self.literal().and_then(fold) {
            return NumberExpr::value(folded);
        }
        Self(Expr::scalar(op, ValueKind::Number, Operands::unary(self.0.clone())))
    }

    pub fn plus(&self, other: impl Into<NumberExpr>) -> Self {
        self.arithmetic(ScalarOp::Add, other.into(), |a, b| Some(a + b))
    }

    pub fn minus(&self, other: impl Into<NumberExpr>) -> Self {
        self.arithmetic(ScalarOp::Subtract, other.into(), |a, b| Some(a - b))
    }

    pub fn times(&self, other: impl Into<NumberExpr>) -> Self {
        self.arithmetic(ScalarOp::Multiply, other.into(), |a, b| Some(a * b))
    }

    /// Division; a literal zero divisor is left for the database to reject.
    pub fn divided_by(&self, other: impl Into<NumberExpr>) -> Self {
        self.arithmetic(ScalarOp::Divide, other.into(), |a, b| {
            (b != 0.0).then(|| a / b)
        })
    }

    pub fn squared(&self) -> Self {
        self.times(self.clone())
    }

    pub fn negate(&self) -> Self {
        self.unary(ScalarOp::Negate, |a| Some(-a))
    }

    pub fn sqrt(&self) -> Self {
        self.unary(ScalarOp::SquareRoot, |a| (a >= 0.0).then(|| a.sqrt()))
    }

    /// The smaller of two values.
    pub fn least(&self, other: impl Into<NumberExpr>) -> Self {
        self.arithmetic(ScalarOp::Least, other.into(), |a, b| Some(a.min(b)))
    }

    /// The larger of two values.
    pub fn greatest(&self, other: impl Into<NumberExpr>) -> Self {
        self.arithmetic(ScalarOp::Greatest, other.into(), |a, b| Some(a.max(b)))
    }

    pub fn is(&self, other: impl Into<NumberExpr>) -> BooleanExpr {
        BooleanExpr::compare(ScalarOp::Equals, &self.0, &other.into().0)
    }

    pub fn is_not(&self, other: impl Into<NumberExpr>) -> BooleanExpr {
        BooleanExpr::compare(ScalarOp::NotEquals, &self.0, &other.into().0)
    }

    pub fn is_less_than(&self, other: impl Into<NumberExpr>) -> BooleanExpr {
        BooleanExpr::compare(ScalarOp::LessThan, &self.0, &other.into().0)
    }

    pub fn is_less_than_or_equal(&self, other: impl Into<NumberExpr>) -> BooleanExpr {
        BooleanExpr::compare(ScalarOp::LessThanOrEqual, &self.0, &other.into().0)
    }

    pub fn is_greater_than(&self, other: impl Into<NumberExpr>) -> BooleanExpr {
        BooleanExpr::compare(ScalarOp::GreaterThan, &self.0, &other.into().0)
    }

    pub fn is_greater_than_or_equal(&self, other: impl Into<NumberExpr>) -> BooleanExpr {
        BooleanExpr::compare(ScalarOp::GreaterThanOrEqual, &self.0, &other.into().0)
    }

    /// Decimal text of the number; integral values have no fraction.
    pub fn to_text(&self) -> StringExpr {
        match self.literal() {
            Some(n) => StringExpr::value(format_number(n)),
            None => StringExpr::from_expr(Expr::scalar(
                ScalarOp::NumberToText,
                ValueKind::Text,
                Operands::unary(self.0.clone()),
            )),
        }
    }

    /// `MIN(expr)` over the group.
    pub fn min(&self) -> Self {
        Self(Expr::scalar(ScalarOp::Min, ValueKind::Number, Operands::unary(self.0.clone())))
    }

    /// `MAX(expr)` over the group.
    pub fn max(&self) -> Self {
        Self(Expr::scalar(ScalarOp::Max, ValueKind::Number, Operands::unary(self.0.clone())))
    }

    pub fn case_when(
        condition: &BooleanExpr,
        then: impl Into<NumberExpr>,
        otherwise: impl Into<NumberExpr>,
    ) -> Self {
        Self(case_when(condition, then.into().0, otherwise.into().0))
    }
}

impl From<f64> for NumberExpr {
    fn from(value: f64) -> Self {
        NumberExpr::value(value)
    }
}

impl From<i32> for NumberExpr {
    fn from(value: i32) -> Self {
        NumberExpr::value(f64::from(value))
    }
}

impl From<u32> for NumberExpr {
    fn from(value: u32) -> Self {
        NumberExpr::value(f64::from(value))
    }
}

impl From<Option<f64>> for NumberExpr {
    fn from(value: Option<f64>) -> Self {
        value.map_or_else(NumberExpr::null, NumberExpr::value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::AsExpr;

    #[test]
    fn test_literal_arithmetic_folds() {
        let n = NumberExpr::value(3.0).minus(1.0).squared().plus(5.0).sqrt();
        assert_eq!(n.literal(), Some(3.0));
    }

    #[test]
    fn test_column_arithmetic_builds_nodes() {
        let n = NumberExpr::column("sites", "elevation").plus(1.0);
        assert_eq!(n.literal(), None);
        assert_eq!(n.tables_involved().len(), 1);
    }

    #[test]
    fn test_division_by_literal_zero_not_folded() {
        let n = NumberExpr::value(1.0).divided_by(0.0);
        assert_eq!(n.literal(), None);
    }

    #[test]
    fn test_comparisons_fold() {
        assert_eq!(NumberExpr::value(2.0).is(2.0).literal(), Some(true));
        assert_eq!(NumberExpr::value(2.0).is_less_than(1.0).literal(), Some(false));
        assert_eq!(NumberExpr::value(2.0).least(-1.0).literal(), Some(-1.0));
    }

    #[test]
    fn test_aggregates() {
        let max = NumberExpr::column("sites", "elevation").max();
        assert!(max.is_aggregator());
        assert!(!NumberExpr::column("sites", "elevation").is_aggregator());
    }

    #[test]
    fn test_to_text_folds_integral_values() {
        assert_eq!(NumberExpr::value(4.0).to_text().literal(), Some("4"));
    }
}
