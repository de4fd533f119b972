//! Typed views over [`Expr`].
//!
//! Every client-facing expression type is a newtype over the untyped tree
//! that only exposes operators valid for its result type.

use std::collections::BTreeSet;

use crate::ast::{Expr, TableRef, ValueKind};

/// Access to the untyped tree behind a typed expression.
pub trait AsExpr {
    fn as_expr(&self) -> &Expr;

    fn into_expr(self) -> Expr
    where
        Self: Sized;

    fn kind(&self) -> ValueKind {
        self.as_expr().kind()
    }

    /// Tables referenced anywhere in the tree.
    fn tables_involved(&self) -> BTreeSet<TableRef> {
        self.as_expr().tables_involved()
    }

    /// Whether the tree contains a set function.
    fn is_aggregator(&self) -> bool {
        self.as_expr().is_aggregator()
    }

    fn is_null_protected(&self) -> bool {
        self.as_expr().is_null_protected()
    }
}

impl AsExpr for Expr {
    fn as_expr(&self) -> &Expr {
        self
    }

    fn into_expr(self) -> Expr {
        self
    }
}

/// Declares a typed expression newtype with the members every type shares.
macro_rules! typed_expr {
    ($(#[$meta:meta])* $name:ident, $kind:expr) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq)]
        pub struct $name(pub(crate) $crate::ast::Expr);

        impl $name {
            pub const VALUE_KIND: $crate::ast::ValueKind = $kind;

            /// A column of the given table.
            pub fn column(
                table: impl Into<$crate::ast::TableRef>,
                column: impl Into<String>,
            ) -> Self {
                Self($crate::ast::Expr::Column($crate::ast::ColumnRef::new(
                    table,
                    column,
                    $kind,
                )))
            }

            /// An absent value of this type.
            pub fn null() -> Self {
                Self($crate::ast::Expr::Null($kind))
            }

            // Not every type is produced by an untyped builder.
            #[allow(dead_code)]
            pub(crate) fn from_expr(expr: $crate::ast::Expr) -> Self {
                debug_assert_eq!(expr.kind(), $kind);
                Self(expr)
            }

            /// Structurally independent copy of this expression.
            pub fn deep_copy(&self) -> Self {
                Self(self.0.deep_copy())
            }

            pub fn is_null(&self) -> $crate::ast::scalar::BooleanExpr {
                $crate::ast::scalar::BooleanExpr::null_test(self.0.clone())
            }

            pub fn is_not_null(&self) -> $crate::ast::scalar::BooleanExpr {
                $crate::ast::scalar::BooleanExpr::not_null_test(self.0.clone())
            }
        }

        impl $crate::ast::AsExpr for $name {
            fn as_expr(&self) -> &$crate::ast::Expr {
                &self.0
            }

            fn into_expr(self) -> $crate::ast::Expr {
                self.0
            }
        }

        impl From<$name> for $crate::ast::Expr {
            fn from(typed: $name) -> Self {
                typed.0
            }
        }

        impl From<&$name> for $name {
            fn from(typed: &$name) -> Self {
                typed.clone()
            }
        }
    };
}

pub(crate) use typed_expr;
