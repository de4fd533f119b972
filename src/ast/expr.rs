//! The generic expression tree.
//!
//! Every operator of every geometry kind, and every scalar operator used by
//! the emulation formulas, is one [`Node`] shape: an [`Op`] tag plus a fixed
//! operand arity. Nodes are shared through `Arc`, so cloning an [`Expr`] is
//! a reference copy; [`Expr::deep_copy`] produces a structurally independent
//! tree when the engine needs one.

use std::collections::BTreeSet;
use std::sync::Arc;

use crate::ast::values::{Line, LineSegment, Literal, MultiPoint, Point, Polygon};
use crate::ast::{ColumnRef, GeoKind, GeoOp, Op, ScalarOp, TableRef, ValueKind};

/// An expression: a leaf value or an operator node.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Literal(Literal),
    Column(ColumnRef),
    /// An absent operand of the given type; compiles to `NULL`.
    Null(ValueKind),
    Node(Arc<Node>),
}

impl Expr {
    pub fn node(op: Op, kind: ValueKind, operands: Operands) -> Self {
        Expr::Node(Arc::new(Node::new(op, kind, operands)))
    }

    /// A spatial operator node; the result type follows from `op`.
    pub fn geo(kind: GeoKind, op: GeoOp, operands: Operands) -> Self {
        Expr::node(Op::Geo(kind, op), op.result_kind(kind), operands)
    }

    pub fn scalar(op: ScalarOp, kind: ValueKind, operands: Operands) -> Self {
        Expr::node(Op::Scalar(op), kind, operands)
    }

    pub fn kind(&self) -> ValueKind {
        match self {
            Expr::Literal(lit) => lit.kind(),
            Expr::Column(col) => col.kind,
            Expr::Null(kind) => *kind,
            Expr::Node(node) => node.kind,
        }
    }

    /// An absent operand.
    pub fn is_absent(&self) -> bool {
        matches!(self, Expr::Null(_))
    }

    /// Absent, or a node that will compile to a null-test.
    pub fn includes_null(&self) -> bool {
        match self {
            Expr::Null(_) => true,
            Expr::Node(node) => node.null_protected,
            Expr::Literal(_) | Expr::Column(_) => false,
        }
    }

    pub fn is_null_protected(&self) -> bool {
        matches!(self, Expr::Node(node) if node.null_protected)
    }

    pub fn tables_involved(&self) -> BTreeSet<TableRef> {
        let mut tables = BTreeSet::new();
        self.collect_tables(&mut tables);
        tables
    }

    fn collect_tables(&self, tables: &mut BTreeSet<TableRef>) {
        match self {
            Expr::Column(col) => {
                tables.insert(col.table.clone());
            }
            Expr::Node(node) => {
                for operand in node.operands.iter() {
                    operand.collect_tables(tables);
                }
            }
            Expr::Literal(_) | Expr::Null(_) => {}
        }
    }

    pub fn is_aggregator(&self) -> bool {
        match self {
            Expr::Node(node) => {
                node.op.is_aggregate() || node.operands.iter().any(Expr::is_aggregator)
            }
            Expr::Literal(_) | Expr::Column(_) | Expr::Null(_) => false,
        }
    }

    /// Rebuild every node so the copy shares no node with `self`.
    pub fn deep_copy(&self) -> Self {
        match self {
            Expr::Node(node) => Expr::Node(Arc::new(Node {
                op: node.op,
                kind: node.kind,
                operands: node.operands.map(Expr::deep_copy),
                null_protected: node.null_protected,
            })),
            other => other.clone(),
        }
    }

    /// Whether both expressions are the same shared node.
    pub fn is_same_node(&self, other: &Expr) -> bool {
        match (self, other) {
            (Expr::Node(a), Expr::Node(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }

    pub fn as_node(&self) -> Option<&Node> {
        match self {
            Expr::Node(node) => Some(node),
            _ => None,
        }
    }

    /// The node if it applies the given spatial operator.
    pub fn as_geo_node(&self, op: GeoOp) -> Option<&Node> {
        self.as_node()
            .filter(|node| matches!(node.op, Op::Geo(_, node_op) if node_op == op))
    }

    pub fn as_literal(&self) -> Option<&Literal> {
        match self {
            Expr::Literal(lit) => Some(lit),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self.as_literal()? {
            Literal::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self.as_literal()? {
            Literal::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self.as_literal()? {
            Literal::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_point(&self) -> Option<Point> {
        match self.as_literal()? {
            Literal::Point(p) => Some(*p),
            _ => None,
        }
    }

    pub fn as_line(&self) -> Option<&Line> {
        match self.as_literal()? {
            Literal::Line(l) => Some(l),
            _ => None,
        }
    }

    pub fn as_segment(&self) -> Option<LineSegment> {
        match self.as_literal()? {
            Literal::LineSegment(s) => Some(*s),
            _ => None,
        }
    }

    pub fn as_multipoint(&self) -> Option<&MultiPoint> {
        match self.as_literal()? {
            Literal::MultiPoint(m) => Some(m),
            _ => None,
        }
    }

    pub fn as_polygon(&self) -> Option<&Polygon> {
        match self.as_literal()? {
            Literal::Polygon(p) => Some(p),
            _ => None,
        }
    }
}

impl From<Literal> for Expr {
    fn from(lit: Literal) -> Self {
        Expr::Literal(lit)
    }
}

impl From<ColumnRef> for Expr {
    fn from(col: ColumnRef) -> Self {
        Expr::Column(col)
    }
}

/// Operand-arity shapes shared by every operator.
#[derive(Debug, Clone, PartialEq)]
pub enum Operands {
    Unary([Expr; 1]),
    Binary([Expr; 2]),
    Ternary([Expr; 3]),
    /// Members of a constructed geometry, or the arguments of a variadic
    /// scalar operator.
    Nary(Vec<Expr>),
}

impl Operands {
    pub fn unary(a: Expr) -> Self {
        Operands::Unary([a])
    }

    pub fn binary(a: Expr, b: Expr) -> Self {
        Operands::Binary([a, b])
    }

    pub fn ternary(a: Expr, b: Expr, c: Expr) -> Self {
        Operands::Ternary([a, b, c])
    }

    pub fn nary(members: impl IntoIterator<Item = Expr>) -> Self {
        Operands::Nary(members.into_iter().collect())
    }

    pub fn as_slice(&self) -> &[Expr] {
        match self {
            Operands::Unary(one) => one,
            Operands::Binary(two) => two,
            Operands::Ternary(three) => three,
            Operands::Nary(members) => members,
        }
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Expr> {
        self.as_slice().iter()
    }

    pub fn len(&self) -> usize {
        self.as_slice().len()
    }

    pub fn is_empty(&self) -> bool {
        self.as_slice().is_empty()
    }

    /// First operand, if any.
    pub fn primary(&self) -> Option<&Expr> {
        self.as_slice().first()
    }

    /// Operand at `index`, or an absent value of `kind` when missing.
    pub fn get_or_null(&self, index: usize, kind: ValueKind) -> Expr {
        self.as_slice()
            .get(index)
            .cloned()
            .unwrap_or(Expr::Null(kind))
    }

    pub fn map(&self, f: impl Fn(&Expr) -> Expr) -> Operands {
        match self {
            Operands::Unary([a]) => Operands::Unary([f(a)]),
            Operands::Binary([a, b]) => Operands::Binary([f(a), f(b)]),
            Operands::Ternary([a, b, c]) => Operands::Ternary([f(a), f(b), f(c)]),
            Operands::Nary(members) => Operands::Nary(members.iter().map(f).collect()),
        }
    }
}

/// An operator applied to its operands.
///
/// Null-protection is decided once, here, from the operands: a spatial
/// node whose required input is absent compiles to `primary IS NULL`
/// instead of the operator itself.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    op: Op,
    kind: ValueKind,
    operands: Operands,
    null_protected: bool,
}

impl Node {
    pub fn new(op: Op, kind: ValueKind, operands: Operands) -> Self {
        let null_protected = op.null_protects() && Self::requires_protection(op, &operands);
        Self {
            op,
            kind,
            operands,
            null_protected,
        }
    }

    fn requires_protection(op: Op, operands: &Operands) -> bool {
        match operands {
            Operands::Unary([primary]) => primary.is_absent(),
            Operands::Binary([_, secondary]) => secondary.includes_null(),
            Operands::Ternary([_, second, third]) => {
                second.includes_null() || third.includes_null()
            }
            Operands::Nary(members) => {
                let required = match op {
                    Op::Geo(kind, GeoOp::Construct) => kind.min_members(),
                    _ => 1,
                };
                members.len() < required || members.iter().any(Expr::includes_null)
            }
        }
    }

    pub fn op(&self) -> Op {
        self.op
    }

    pub fn kind(&self) -> ValueKind {
        self.kind
    }

    pub fn operands(&self) -> &Operands {
        &self.operands
    }

    pub fn is_null_protected(&self) -> bool {
        self.null_protected
    }

    /// The operand a null-protected node tests; `NULL` when there is none.
    pub fn null_test_subject(&self) -> Expr {
        self.operands
            .primary()
            .cloned()
            .unwrap_or(Expr::Null(self.kind))
    }
}
