use crate::ast::typed::typed_expr;
use crate::ast::values::Literal;
use crate::ast::{Expr, Op, Operands, ScalarOp, ValueKind};

use super::{BooleanExpr, NumberExpr, case_when};

typed_expr!(
    /// A text expression.
    StringExpr,
    ValueKind::Text
);

impl StringExpr {
    pub fn value(value: impl Into<String>) -> Self {
        Self(Expr::Literal(Literal::Text(value.into())))
    }

    pub fn literal(&self) -> Option<&str> {
        self.0.as_text()
    }

    /// Concatenation of all parts. Nested concatenations are flattened and
    /// adjacent literal parts merged, so a fully literal concatenation is a
    /// single literal.
    pub fn concat_all(parts: impl IntoIterator<Item = StringExpr>) -> Self {
        let mut merged: Vec<Expr> = Vec::new();
        for part in parts {
            match part.0.as_node().filter(|n| n.op() == Op::Scalar(ScalarOp::Concat)) {
                Some(node) => {
                    for inner in node.operands().iter() {
                        push_part(&mut merged, inner.clone());
                    }
                }
                None => push_part(&mut merged, part.0),
            }
        }
        match merged.len() {
            0 => StringExpr::value(""),
            1 => Self(merged.remove(0)),
            _ => Self(Expr::scalar(ScalarOp::Concat, ValueKind::Text, Operands::Nary(merged))),
        }
    }

    pub fn concat(&self, other: impl Into<StringExpr>) -> Self {
        StringExpr::concat_all([self.clone(), other.into()])
    }

    fn unary_text(&self, op: ScalarOp, fold: impl Fn(&str) -> String) -> Self {
        match self.literal() {
            Some(text) => StringExpr::value(fold(text)),
            None => Self(Expr::scalar(op, ValueKind::Text, Operands::unary(self.0.clone()))),
        }
    }

    fn with_delimiter(&self, op: ScalarOp, delimiter: &str, fold: impl Fn(&str) -> String) -> Self {
        match self.literal() {
            Some(text) => StringExpr::value(fold(text)),
            None => Self(Expr::scalar(
                op,
                ValueKind::Text,
                Operands::binary(self.0.clone(), StringExpr::value(delimiter).0),
            )),
        }
    }

    /// Text before the first `delimiter`; empty when it does not occur.
    pub fn substring_before(&self, delimiter: &str) -> Self {
        self.with_delimiter(ScalarOp::SubstringBefore, delimiter, |text| {
            text.find(delimiter)
                .map(|at| text[..at].to_string())
                .unwrap_or_default()
        })
    }

    /// Text after the first `delimiter`; the whole text when it does not occur.
    pub fn substring_after(&self, delimiter: &str) -> Self {
        self.with_delimiter(ScalarOp::SubstringAfter, delimiter, |text| {
            text.find(delimiter)
                .map(|at| text[at + delimiter.len()..].to_string())
                .unwrap_or_else(|| text.to_string())
        })
    }

    pub fn trim(&self) -> Self {
        self.unary_text(ScalarOp::Trim, |text| text.trim().to_string())
    }

    pub fn replace(&self, from: &str, to: &str) -> Self {
        match self.literal() {
            Some(text) => StringExpr::value(text.replace(from, to)),
            None => Self(Expr::scalar(
                ScalarOp::Replace,
                ValueKind::Text,
                Operands::ternary(
                    self.0.clone(),
                    StringExpr::value(from).0,
                    StringExpr::value(to).0,
                ),
            )),
        }
    }

    pub fn length(&self) -> NumberExpr {
        match self.literal() {
            Some(text) => NumberExpr::value(text.chars().count() as f64),
            None => NumberExpr::from_expr(Expr::scalar(
                ScalarOp::Length,
                ValueKind::Number,
                Operands::unary(self.0.clone()),
            )),
        }
    }

    /// Occurrences of `needle`, computed from the length difference after
    /// removing it.
    pub fn count_of(&self, needle: &str) -> NumberExpr {
        let removed = self.length().minus(self.replace(needle, "").length());
        removed.divided_by(needle.chars().count().max(1) as f64)
    }

    /// Parse the text as a number.
    pub fn to_number(&self) -> NumberExpr {
        if let Some(parsed) = self.literal().and_then(|t| t.trim().parse::<f64>().ok()) {
            return NumberExpr::value(parsed);
        }
        NumberExpr::from_expr(Expr::scalar(
            ScalarOp::TextToNumber,
            ValueKind::Number,
            Operands::unary(self.0.clone()),
        ))
    }

    /// The `n`-th number between the parentheses of a WKT text, counting
    /// from zero across all members. Literal text that has no such number
    /// is NULL.
    pub fn wkt_ordinate(&self, n: u32) -> NumberExpr {
        if let Some(text) = self.literal() {
            return parse_ordinate(text, n).map_or_else(NumberExpr::null, NumberExpr::value);
        }
        NumberExpr::from_expr(Expr::scalar(
            ScalarOp::WktOrdinate(n),
            ValueKind::Number,
            Operands::unary(self.0.clone()),
        ))
    }

    pub fn is(&self, other: impl Into<StringExpr>) -> BooleanExpr {
        BooleanExpr::compare(ScalarOp::Equals, &self.0, &other.into().0)
    }

    pub fn is_not(&self, other: impl Into<StringExpr>) -> BooleanExpr {
        BooleanExpr::compare(ScalarOp::NotEquals, &self.0, &other.into().0)
    }

    pub fn case_when(
        condition: &BooleanExpr,
        then: impl Into<StringExpr>,
        otherwise: impl Into<StringExpr>,
    ) -> Self {
        Self(case_when(condition, then.into().0, otherwise.into().0))
    }
}

fn push_part(merged: &mut Vec<Expr>, part: Expr) {
    if let (Some(Expr::Literal(Literal::Text(previous))), Some(text)) =
        (merged.last_mut(), part.as_text())
    {
        previous.push_str(text);
        return;
    }
    merged.push(part);
}

impl From<&str> for StringExpr {
    fn from(value: &str) -> Self {
        StringExpr::value(value)
    }
}

impl From<String> for StringExpr {
    fn from(value: String) -> Self {
        StringExpr::value(value)
    }
}

fn parse_ordinate(text: &str, n: u32) -> Option<f64> {
    let (_, body) = text.split_once('(')?;
    body.split(|c: char| c.is_whitespace() || matches!(c, ',' | '(' | ')'))
        .filter(|token| !token.is_empty())
        .nth(n as usize)?
        .parse()
        .ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_concat_merges_literals() {
        let column = StringExpr::column("sites", "label");
        let joined = StringExpr::concat_all([
            StringExpr::value("POINT ("),
            StringExpr::value("1"),
            StringExpr::value(" "),
            column.clone(),
            StringExpr::value(")"),
        ]);
        let node = joined.0.as_node().expect("concat node");
        assert_eq!(node.operands().len(), 3);
        assert_eq!(node.operands().as_slice()[0].as_text(), Some("POINT (1 "));
    }

    #[test]
    fn test_literal_concat_is_literal() {
        let joined = StringExpr::value("POINT (").concat("2 3").concat(")");
        assert_eq!(joined.literal(), Some("POINT (2 3)"));
    }

    #[test]
    fn test_wkt_substrings_fold() {
        let wkt = StringExpr::value("POINT (1.5 -2)");
        let inner = wkt.substring_after("(").substring_before(")");
        assert_eq!(inner.literal(), Some("1.5 -2"));
        assert_eq!(inner.substring_before(" ").to_number().literal(), Some(1.5));
        assert_eq!(inner.substring_after(" ").to_number().literal(), Some(-2.0));
    }

    #[test]
    fn test_wkt_ordinates_fold() {
        let segment = StringExpr::value("LINESTRING (0 1, 2.5 -3)");
        let values: Vec<_> = (0..4).map(|n| segment.wkt_ordinate(n).literal()).collect();
        assert_eq!(values, vec![Some(0.0), Some(1.0), Some(2.5), Some(-3.0)]);
        assert_eq!(segment.wkt_ordinate(4).literal(), None);
        assert!(segment.wkt_ordinate(4).0.is_absent());
        let members = StringExpr::value("MULTIPOINT ((1 2), (3 4))");
        assert_eq!(members.wkt_ordinate(2).literal(), Some(3.0));
        assert!(StringExpr::value("POINT EMPTY").wkt_ordinate(0).0.is_absent());
    }

    #[test]
    fn test_missing_delimiter() {
        let text = StringExpr::value("abc");
        assert_eq!(text.substring_before(",").literal(), Some(""));
        assert_eq!(text.substring_after(",").literal(), Some("abc"));
    }

    #[test]
    fn test_count_of() {
        let wkt = StringExpr::value("MULTIPOINT ((1 2), (3 4), (5 6))");
        assert_eq!(wkt.count_of(",").literal(), Some(2.0));
    }
}
